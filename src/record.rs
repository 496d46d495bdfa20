/*! Corpus records.

A [RawRecord] is what acquisition extracts from a repository page.
Fields that could not be located are kept as [None] and only rendered as
sentinel strings ([LANGUAGE_SENTINEL], [CONTENT_SENTINEL]) when serialized,
so that a snapshot file always carries the three keys `title`, `language` and `content`.

A [NormalizedRecord] is derived from a [RawRecord] and is never persisted by the snapshot store.
!*/
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rendered in place of a missing readme.
pub const CONTENT_SENTINEL: &str = "Readme Not Located";

/// Rendered in place of a missing language tag.
pub const LANGUAGE_SENTINEL: &str = "Language Not Located";

/// Serializes `None` as the sentinel, and reads the sentinel back as `None`.
macro_rules! sentinel_field {
    ($name:ident, $sentinel:expr) => {
        mod $name {
            use super::*;

            pub fn serialize<S: Serializer>(v: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(v.as_deref().unwrap_or($sentinel))
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
                let v = String::deserialize(d)?;
                if v == $sentinel {
                    Ok(None)
                } else {
                    Ok(Some(v))
                }
            }
        }
    };
}

sentinel_field!(language_field, LANGUAGE_SENTINEL);
sentinel_field!(content_field, CONTENT_SENTINEL);

fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let title = String::deserialize(d)?;
    if title.trim().is_empty() {
        Err(serde::de::Error::custom("record title is empty"))
    } else {
        Ok(title)
    }
}

/// One repository, as extracted from its page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(deserialize_with = "non_empty")]
    title: String,
    #[serde(with = "language_field")]
    language: Option<String>,
    #[serde(with = "content_field")]
    content: Option<String>,
}

impl RawRecord {
    pub fn new(title: String, language: Option<String>, content: Option<String>) -> Self {
        Self {
            title,
            language,
            content,
        }
    }

    /// Repository identifier (`owner/name`).
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Content as it would be serialized, substituting the sentinel when absent.
    pub fn content_or_sentinel(&self) -> &str {
        self.content().unwrap_or(CONTENT_SENTINEL)
    }
}

/// A record along with its normalized text variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    #[serde(with = "language_field")]
    pub language: Option<String>,
    pub original: String,
    pub lemmatized: String,
    pub stemmed: String,
}

/// Ordered sequence of [RawRecord], in discovery order.
///
/// Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorpusSnapshot {
    records: Vec<RawRecord>,
}

impl CorpusSnapshot {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn into_inner(self) -> Vec<RawRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawRecord> {
        self.records.iter()
    }
}

impl From<Vec<RawRecord>> for CorpusSnapshot {
    fn from(records: Vec<RawRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_render_as_sentinels() {
        let r = RawRecord::new("a/b".to_string(), None, None);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"title":"a/b","language":"Language Not Located","content":"Readme Not Located"}"#
        );
    }

    #[test]
    fn sentinels_read_back_as_none() {
        let json = r#"{"title":"a/b","language":"Language Not Located","content":"Readme Not Located"}"#;
        let r: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.language(), None);
        assert_eq!(r.content(), None);
        assert_eq!(r.content_or_sentinel(), CONTENT_SENTINEL);
    }

    #[test]
    fn empty_title_is_rejected() {
        let json = r#"{"title":"  ","language":"Rust","content":"hello"}"#;
        let r: Result<RawRecord, _> = serde_json::from_str(json);
        assert!(r.is_err());
    }

    #[test]
    fn missing_key_is_rejected() {
        let json = r#"{"title":"a/b","language":"Rust"}"#;
        let r: Result<RawRecord, _> = serde_json::from_str(json);
        assert!(r.is_err());
    }

    #[test]
    fn snapshot_is_a_plain_array() {
        let snapshot = CorpusSnapshot::new(vec![
            RawRecord::new("a/b".to_string(), Some("Rust".to_string()), Some("x".to_string())),
            RawRecord::new("c/d".to_string(), Some("Go".to_string()), None),
        ]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.starts_with('['));

        let back: CorpusSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.records()[1].title(), "c/d");
    }
}
