//! # readme-corpus
//!
//! Builds a corpus of repository readmes labeled with the repository primary language,
//! and normalizes it for language prediction.
//!
//! ## Getting started
//!
//! ```sh
//! readme-corpus 0.1.0
//! repository readme corpus tool.
//!
//! USAGE:
//!     readme-corpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     acquire    Discover repositories and fetch their readmes (or load the cached snapshot)
//!     fetch      Fetch readmes of a list of repositories
//!     help       Prints this message or the help of the given subcommand(s)
//!     prepare    Normalize the cached snapshot
//!     stems      Print stem counts of a text
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=readme_corpus=debug`).
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use log::{debug, error, info};
use structopt::StructOpt;

use readme_corpus::config::Config;
use readme_corpus::download::Downloader;
use readme_corpus::error::Error;
use readme_corpus::filtering::StopWordPolicy;
use readme_corpus::io::{FileStore, SnapshotStore};
use readme_corpus::pipelines::normalize::stem_frequencies;
use readme_corpus::pipelines::{BuildReport, CorpusBuilder, Normalizer};

mod cli;

fn print_report(report: &BuildReport) {
    println!(
        "{} records fetched, {} failed, {} pages failed",
        report.fetched,
        report.failed_identifiers.len(),
        report.failed_pages.len()
    );
    for identifier in &report.failed_identifiers {
        println!("failed: {}", identifier);
    }
}

fn run(opt: cli::ReadmeCorpus) -> Result<(), Error> {
    match opt {
        cli::ReadmeCorpus::Acquire(a) => {
            let config = Config {
                cache_path: a.cache,
                page_count: a.pages,
                use_cache: !a.no_cache,
                workers: a.workers.unwrap_or(4),
                ..Default::default()
            };
            let fetcher = Downloader::new(&config.user_agent, config.timeout)?;
            let store = FileStore::new(config.cache_path.clone());
            let builder = CorpusBuilder::new(config, fetcher, store);

            match builder.load_or_build(builder.config().use_cache)? {
                (snapshot, Some(report)) => {
                    println!("{} records", snapshot.len());
                    print_report(&report);
                }
                (snapshot, None) => println!("{} records (cached)", snapshot.len()),
            }
        }

        cli::ReadmeCorpus::Fetch(f) => {
            let identifiers = BufReader::new(File::open(&f.identifiers)?)
                .lines()
                .collect::<Result<Vec<String>, _>>()?;
            debug!("{} identifiers read from {:?}", identifiers.len(), f.identifiers);

            let config = Config {
                cache_path: f.cache,
                workers: f.workers.unwrap_or(4),
                ..Default::default()
            };
            let fetcher = Downloader::new(&config.user_agent, config.timeout)?;
            let store = FileStore::new(config.cache_path.clone());
            let builder = CorpusBuilder::new(config, fetcher, store);

            let (snapshot, report) = builder.build_from_identifiers(identifiers)?;
            println!("{} records", snapshot.len());
            print_report(&report);
        }

        cli::ReadmeCorpus::Prepare(p) => {
            let store = FileStore::new(p.cache);
            let snapshot = store.load()?;
            let normalizer = Normalizer::new(&StopWordPolicy::new(p.extra, p.exclude));
            let normalized = normalizer.normalize_corpus(snapshot.records());

            let mut writer = BufWriter::new(File::create(&p.dst)?);
            serde_json::to_writer(&mut writer, &normalized)?;
            writer.flush()?;
            info!("wrote {} normalized records to {:?}", normalized.len(), p.dst);
        }

        cli::ReadmeCorpus::Stems(s) => {
            for (stem, count) in stem_frequencies(&s.text) {
                println!("{}\t{}", stem, count);
            }
        }
    };
    Ok(())
}

fn main() {
    env_logger::init();

    let opt = cli::ReadmeCorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
