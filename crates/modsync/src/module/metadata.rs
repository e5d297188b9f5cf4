//! `module.json` parsing.
//!
//! The file is written by module authors, so every field is optional and
//! fields of the wrong type are ignored rather than rejected. Only a document
//! that is not JSON at all is an error.

use serde_json::Value;
use thiserror::Error;

use super::text::ellipsize;

/// Longest summary kept, in characters.
pub const SUMMARY_MAX_CHARS: usize = 512;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid module.json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether an `additionalAuthors` entry adds or removes an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Add,
    Remove,
}

/// One entry of `additionalAuthors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAdjustment {
    pub kind: AdjustmentKind,
    pub name: String,
    pub link: Option<String>,
}

impl AuthorAdjustment {
    pub fn add(name: impl Into<String>, link: Option<&str>) -> Self {
        Self {
            kind: AdjustmentKind::Add,
            name: name.into(),
            link: link.map(String::from),
        }
    }

    pub fn remove(name: impl Into<String>) -> Self {
        Self {
            kind: AdjustmentKind::Remove,
            name: name.into(),
            link: None,
        }
    }

    /// Read one entry. Entries that are not objects, have no string `name`,
    /// or carry an unknown `type` are dropped. A missing or empty `type`
    /// means add.
    fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let name = entry.get("name")?.as_str()?.to_string();
        let kind = match entry.get("type").and_then(Value::as_str) {
            None | Some("") | Some("add") => AdjustmentKind::Add,
            Some("remove") => AdjustmentKind::Remove,
            Some(_) => return None,
        };
        let link = entry
            .get("link")
            .and_then(Value::as_str)
            .filter(|link| !link.is_empty())
            .map(String::from);
        Some(Self { kind, name, link })
    }
}

/// The parts of `module.json` the registry uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMetadata {
    /// Trimmed and shortened to [`SUMMARY_MAX_CHARS`].
    pub summary: Option<String>,
    /// Line breaks removed, trimmed.
    pub source_url: Option<String>,
    pub additional_authors: Vec<AuthorAdjustment>,
}

impl ModuleMetadata {
    /// Parse the text of a `module.json` file.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let document: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&document))
    }

    fn from_value(document: &Value) -> Self {
        let summary = document
            .get("summary")
            .and_then(Value::as_str)
            .filter(|summary| !summary.is_empty())
            .map(|summary| ellipsize(summary.trim(), SUMMARY_MAX_CHARS).trim().to_string());

        let source_url = document
            .get("sourceUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(|url| url.replace(['\r', '\n'], "").trim().to_string());

        let additional_authors: Vec<AuthorAdjustment> = document
            .get("additionalAuthors")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(AuthorAdjustment::from_value).collect())
            .unwrap_or_default();

        Self {
            summary,
            source_url,
            additional_authors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let metadata = ModuleMetadata::parse(
            r#"{
                "summary": "  Hides root from apps.  ",
                "sourceUrl": "https://github.com/alice/hide\r\n",
                "additionalAuthors": [
                    { "type": "remove", "name": "bot" },
                    { "type": "add", "name": "Carol", "link": "https://carol.dev" },
                    { "name": "Dave" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(metadata.summary.as_deref(), Some("Hides root from apps."));
        assert_eq!(
            metadata.source_url.as_deref(),
            Some("https://github.com/alice/hide")
        );
        assert_eq!(
            metadata.additional_authors,
            vec![
                AuthorAdjustment::remove("bot"),
                AuthorAdjustment::add("Carol", Some("https://carol.dev")),
                AuthorAdjustment::add("Dave", None),
            ]
        );
    }

    #[test]
    fn ignores_fields_of_the_wrong_type() {
        let metadata = ModuleMetadata::parse(
            r#"{ "summary": 42, "sourceUrl": ["x"], "additionalAuthors": "alice" }"#,
        )
        .unwrap();
        assert_eq!(metadata, ModuleMetadata::default());
    }

    #[test]
    fn drops_malformed_author_entries() {
        let metadata = ModuleMetadata::parse(
            r#"{ "additionalAuthors": [null, "alice", { "type": "maintainer", "name": "x" }, { "link": "y" }, { "name": "ok" }] }"#,
        )
        .unwrap();
        assert_eq!(
            metadata.additional_authors,
            vec![AuthorAdjustment::add("ok", None)]
        );
    }

    #[test]
    fn shortens_long_summaries() {
        let long = "lorem ipsum ".repeat(100);
        let text = format!(r#"{{ "summary": "{long}" }}"#);
        let summary = ModuleMetadata::parse(&text).unwrap().summary.unwrap();
        assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn non_object_document_is_empty_metadata() {
        assert_eq!(
            ModuleMetadata::parse("[1, 2, 3]").unwrap(),
            ModuleMetadata::default()
        );
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = ModuleMetadata::parse("{ summary: ").unwrap_err();
        assert!(err.to_string().starts_with("invalid module.json"));
    }
}
