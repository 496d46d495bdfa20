//! Repository page reading.
//!
//! Within the repository content block (or the whole page when there is none):
//!
//! - the primary language is the first language tag, unless its text is the notebook
//!   label, in which case the second one is used. Pages with less than two tags get no language.
//! - the content is the trimmed text of the rendered readme block.
//!
//! Missing elements are not errors: the matching field is left empty.
use log::debug;
use url::Url;

use crate::config::Config;
use crate::download::PageFetcher;
use crate::error::Error;
use crate::markup::Markup;
use crate::record::RawRecord;

/// Block holding the repository page body.
pub const CONTENT_BLOCK: &str = "repository-content";

/// Language tags of the language bar.
pub const LANGUAGE_TAG: &str = "lang";

/// Rendered readme.
pub const README_BLOCK: &str = "markdown-body entry-content p-5";

/// Notebook languages are not considered as a primary language signal.
pub const NOTEBOOK_LANGUAGE: &str = "Jupyter Notebook";

/// Check that `identifier` is a `owner/name` pair (surrounding slashes are ignored).
///
/// Both parts are non-empty and made of ASCII alphanumerics, `-`, `_` and `.`,
/// and neither is `.` or `..`, so that joining it never leaves the base host.
pub fn parse_identifier(identifier: &str) -> Result<&str, Error> {
    let trimmed = identifier.trim().trim_matches('/');
    let valid_part = |part: &str| {
        !part.is_empty()
            && part != "."
            && part != ".."
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    match trimmed.split_once('/') {
        Some((owner, name)) if valid_part(owner) && valid_part(name) => Ok(trimmed),
        _ => Err(Error::InvalidIdentifier(identifier.to_string())),
    }
}

/// Url of the repository page for `identifier` (`owner/name`).
pub fn repository_url(base: &Url, identifier: &str) -> Result<Url, Error> {
    Ok(base.join(parse_identifier(identifier)?)?)
}

/// Pick the primary language out of the language tags' texts.
fn primary_language(tags: &[String]) -> Option<String> {
    match tags {
        [first, second, ..] => {
            if first.eq_ignore_ascii_case(NOTEBOOK_LANGUAGE) {
                Some(second.clone())
            } else {
                Some(first.clone())
            }
        }
        _ => None,
    }
}

/// Read a [RawRecord] out of a repository page.
pub fn extract_record(identifier: &str, raw: &str) -> RawRecord {
    let markup = Markup::parse(raw);
    let blocks = markup.find_all(CONTENT_BLOCK);

    let find_all = |selector: &str| match blocks.first() {
        Some(block) => block.find_all(selector),
        None => markup.find_all(selector),
    };

    let tags: Vec<String> = find_all(LANGUAGE_TAG)
        .iter()
        .map(|tag| tag.text().trim().to_string())
        .collect();
    let language = primary_language(&tags);

    let content = find_all(README_BLOCK)
        .first()
        .map(|readme| readme.text().trim().to_string());

    if language.is_none() {
        debug!("{}: {} language tags, no language", identifier, tags.len());
    }
    if content.is_none() {
        debug!("{}: no readme block", identifier);
    }

    RawRecord::new(identifier.to_string(), language, content)
}

/// Fetch and read the page of `identifier`.
///
/// Fails only if the page itself cannot be fetched.
pub fn fetch(
    fetcher: &dyn PageFetcher,
    config: &Config,
    identifier: &str,
) -> Result<RawRecord, Error> {
    let url = repository_url(&config.base_url()?, identifier)?;
    let raw = fetcher.fetch_page(&url)?;
    Ok(extract_record(identifier, &raw))
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{extract_record, fetch, parse_identifier, primary_language, repository_url};
    use crate::config::Config;
    use crate::download::PageFetcher;
    use crate::error::Error;

    fn page(langs: &[&str], readme: Option<&str>) -> String {
        let tags: String = langs
            .iter()
            .map(|l| format!(r#"<span class="color-fg-default text-bold mr-1 lang">{}</span>"#, l))
            .collect();
        let readme = readme
            .map(|r| {
                format!(
                    r#"<article class="markdown-body entry-content container-lg p-5">{}</article>"#,
                    r
                )
            })
            .unwrap_or_default();
        format!(
            r#"<html><body><div class="repository-content">{}{}</div></body></html>"#,
            tags, readme
        )
    }

    #[test]
    fn first_tag_wins() {
        let r = extract_record("a/b", &page(&["Rust", "Shell"], Some("\n  Fast things.\n")));
        assert_eq!(r.title(), "a/b");
        assert_eq!(r.language(), Some("Rust"));
        assert_eq!(r.content(), Some("Fast things."));
    }

    #[test]
    fn notebook_is_skipped() {
        let r = extract_record("a/b", &page(&["Jupyter Notebook", "Python"], Some("x")));
        assert_eq!(r.language(), Some("Python"));
    }

    #[test]
    fn single_tag_gives_no_language() {
        let r = extract_record("a/b", &page(&["Rust"], Some("x")));
        assert_eq!(r.language(), None);
        assert_eq!(r.content(), Some("x"));
    }

    #[test]
    fn missing_readme() {
        let r = extract_record("a/b", &page(&["Go", "Makefile"], None));
        assert_eq!(r.language(), Some("Go"));
        assert_eq!(r.content(), None);
    }

    #[test]
    fn page_without_content_block() {
        let html = r#"<span class="lang">C</span><span class="lang">C++</span>
<div class="markdown-body entry-content p-5">hello</div>"#;
        let r = extract_record("a/b", html);
        assert_eq!(r.language(), Some("C"));
        assert_eq!(r.content(), Some("hello"));
    }

    #[test]
    fn empty_page() {
        let r = extract_record("a/b", "");
        assert_eq!(r.language(), None);
        assert_eq!(r.content(), None);
    }

    #[test]
    fn notebook_comparison() {
        let tags = vec!["jupyter notebook".to_string(), "R".to_string()];
        assert_eq!(primary_language(&tags), Some("R".to_string()));
        assert_eq!(primary_language(&[]), None);
    }

    #[test]
    fn url_join() {
        let base = Url::parse("https://github.com/").unwrap();
        assert_eq!(
            repository_url(&base, "/rust-lang/rust").unwrap().as_str(),
            "https://github.com/rust-lang/rust"
        );
    }

    #[test]
    fn identifiers_stay_on_the_base_host() {
        let base = Url::parse("https://github.com/").unwrap();
        for identifier in [
            "https://evil.example/a/b",
            "a:b/c",
            "owner",
            "a/b/c",
            "../b",
            "a/..",
            "a/b?x=1",
            "",
        ]
        .iter()
        {
            assert!(
                matches!(
                    repository_url(&base, identifier),
                    Err(Error::InvalidIdentifier(_))
                ),
                "{} was accepted",
                identifier
            );
        }
        assert_eq!(parse_identifier(" torvalds/linux ").unwrap(), "torvalds/linux");
        assert_eq!(parse_identifier("vuejs/vue.js").unwrap(), "vuejs/vue.js");
    }

    struct Failing;
    impl PageFetcher for Failing {
        fn fetch_page(&self, url: &Url) -> Result<String, Error> {
            Err(Error::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[test]
    fn fetch_failure_is_an_error() {
        let r = fetch(&Failing, &Config::default(), "a/b");
        assert!(matches!(r, Err(Error::Status { status: 404, .. })));
    }
}
