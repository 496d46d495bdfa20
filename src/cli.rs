//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "readme-corpus", about = "repository readme corpus tool.")]
/// Holds every command that is callable by the `readme-corpus` command.
pub enum ReadmeCorpus {
    #[structopt(about = "Discover repositories and fetch their readmes (or load the cached snapshot)")]
    Acquire(Acquire),
    #[structopt(about = "Fetch readmes of a list of repositories")]
    Fetch(Fetch),
    #[structopt(about = "Normalize the cached snapshot")]
    Prepare(Prepare),
    #[structopt(about = "Print stem counts of a text")]
    Stems(Stems),
}

#[derive(Debug, StructOpt)]
/// Acquire command and parameters.
///
/// ```sh
/// readme-corpus-acquire 0.1.0
/// Discover repositories and fetch their readmes (or load the cached snapshot)
///
/// USAGE:
///     readme-corpus acquire [FLAGS] [OPTIONS]
///
/// FLAGS:
///     -h, --help        Prints help information
///         --no-cache    ignore (and replace) the cached snapshot
///
/// OPTIONS:
///     -c, --cache <cache>    snapshot location [default: repositories.json]
///     -p, --pages <pages>    number of search pages to walk [default: 40]
///     -t <workers>           number of fetching threads. Default is 4.
/// ```
pub struct Acquire {
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "cache",
        help = "snapshot location",
        default_value = "repositories.json"
    )]
    pub cache: PathBuf,
    #[structopt(
        short = "p",
        long = "pages",
        help = "number of search pages to walk",
        default_value = "40"
    )]
    pub pages: usize,
    #[structopt(long = "no-cache", help = "ignore (and replace) the cached snapshot")]
    pub no_cache: bool,
    #[structopt(short = "t", help = "number of fetching threads. Default is 4.")]
    pub workers: Option<usize>,
}

#[derive(Debug, StructOpt)]
/// Fetch command and parameters.
pub struct Fetch {
    #[structopt(parse(from_os_str), help = "file with one owner/name identifier per line")]
    pub identifiers: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "cache",
        help = "snapshot location",
        default_value = "repositories.json"
    )]
    pub cache: PathBuf,
    #[structopt(short = "t", help = "number of fetching threads. Default is 4.")]
    pub workers: Option<usize>,
}

#[derive(Debug, StructOpt)]
/// Prepare command and parameters.
pub struct Prepare {
    #[structopt(parse(from_os_str), help = "normalized records destination (JSON)")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "cache",
        help = "snapshot location",
        default_value = "repositories.json"
    )]
    pub cache: PathBuf,
    #[structopt(long = "extra", help = "additional stopwords")]
    pub extra: Vec<String>,
    #[structopt(long = "exclude", help = "stopwords to keep")]
    pub exclude: Vec<String>,
}

#[derive(Debug, StructOpt)]
/// Stems command and parameters.
pub struct Stems {
    #[structopt(help = "text to stem")]
    pub text: String,
}
