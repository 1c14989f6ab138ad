//! Per-article metadata records.
//!
//! Each article folder carries one metadata file (default `meta.json`).
//! Required keys are `title`, `date` and `dateInt`; every other key is kept
//! in [`ArticleMeta::extra`] and passed through untouched.

use serde::{Deserialize, Serialize};

/// Metadata of a single article.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    /// Display title.
    pub title: String,
    /// Displayable publish date.
    pub date: String,
    /// Integer sort key (e.g. `20230301`).
    pub date_int: i64,
    /// Folder name the article was loaded from.
    pub route: String,
    /// Remaining metadata fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Metadata as written in the file, before the route is known.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaRecord {
    title: String,
    date: String,
    date_int: i64,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Supported metadata encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaFormat {
    Json,
    Yaml,
}

impl MetaFormat {
    /// Pick the encoding from a metadata filename.
    ///
    /// `.yaml`/`.yml` files are YAML, everything else is JSON.
    #[must_use]
    pub fn from_filename(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl ArticleMeta {
    /// Parse a metadata record and stamp it with `route`.
    ///
    /// A `route` key inside the record is discarded; the folder name wins.
    ///
    /// # Errors
    ///
    /// Returns a message describing why the record is malformed.
    pub fn parse(content: &str, format: MetaFormat, route: &str) -> Result<Self, String> {
        let record: MetaRecord = match format {
            MetaFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
            MetaFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
        };

        let mut extra = record.extra;
        extra.remove("route");

        Ok(Self {
            title: record.title,
            date: record.date,
            date_int: record.date_int,
            route: route.to_owned(),
            extra,
        })
    }
}
