//! Data model for search results and page requests

use super::error::FetchError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// API namespace to search in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    /// Animated GIFs
    #[default]
    Gifs,
    /// Stickers (transparent GIFs)
    Stickers,
}

impl Library {
    /// Path segment used by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gifs => "gifs",
            Self::Stickers => "stickers",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which file of a rendition to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenditionFileType {
    /// The `url` field (GIF)
    #[default]
    Gif,
    /// The `webp` field
    Webp,
}

/// A named, pre-sized variant of a result image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    /// GIF file URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// WebP file URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webp: Option<String>,
    /// Width in pixels
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: u32,
    /// Height in pixels
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: u32,
}

/// A resolved rendition file, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenditionRef<'a> {
    /// File URL
    pub url: &'a str,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl RenditionRef<'_> {
    /// Height when displayed at `item_width`, preserving aspect ratio
    #[must_use]
    pub fn scaled_height(&self, item_width: u32) -> Option<u32> {
        if self.width == 0 {
            return None;
        }
        let scaled = u64::from(self.height) * u64::from(item_width) / u64::from(self.width);
        u32::try_from(scaled).ok()
    }
}

/// One search result
///
/// Only the identity and the renditions matter to the widget; the rest is
/// carried through so `on_select` receives the full item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Identifier, unique within a result set
    pub id: String,
    /// Human readable title
    #[serde(default)]
    pub title: String,
    /// Page URL on the provider's site
    #[serde(default)]
    pub url: String,
    /// Renditions keyed by name (e.g. `fixed_width_downsampled`)
    #[serde(default)]
    pub images: BTreeMap<String, Rendition>,
}

impl ResultItem {
    /// Look up the file for a rendition name and file type
    #[must_use]
    pub fn rendition(&self, name: &str, file_type: RenditionFileType) -> Option<RenditionRef<'_>> {
        let rendition = self.images.get(name)?;
        let url = match file_type {
            RenditionFileType::Gif => rendition.url.as_deref(),
            RenditionFileType::Webp => rendition.webp.as_deref(),
        }?;
        Some(RenditionRef {
            url,
            width: rendition.width,
            height: rendition.height,
        })
    }

    /// Title, or the id when the title is blank
    #[must_use]
    pub fn label(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() { &self.id } else { title }
    }
}

/// One page of results as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Results in display order
    pub items: Vec<ResultItem>,
    /// Total number of results reported by the API, if any
    pub total_count: Option<u64>,
}

impl Page {
    /// Create a page from items
    #[must_use]
    pub const fn new(items: Vec<ResultItem>) -> Self {
        Self {
            items,
            total_count: None,
        }
    }

    /// Set the reported total
    #[must_use]
    pub const fn with_total(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }

    /// Decode a search or trending response body
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] if the body is not valid JSON of the
    /// expected shape, or [`FetchError::Status`] if the body carries a
    /// non-success status in its `meta` block.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let response: SearchResponse = serde_json::from_str(body)?;
        if let Some(meta) = response.meta
            && !(200..300).contains(&meta.status)
        {
            return Err(FetchError::Status(meta.status));
        }
        Ok(Self {
            items: response.data,
            total_count: response.pagination.and_then(|p| p.total_count),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ResultItem>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    status: u16,
}

/// A single page request, independent of transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// API namespace
    pub library: Library,
    /// Search text, empty for trending results
    pub query: String,
    /// Index of the first result
    pub offset: u32,
    /// Page size
    pub limit: u32,
    /// Content rating filter
    pub rating: String,
}

impl PageQuery {
    /// `search` for a non-empty query, `trending` otherwise
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        if self.query.is_empty() {
            "trending"
        } else {
            "search"
        }
    }

    /// Path relative to the API base, e.g. `stickers/search`
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.library, self.endpoint())
    }

    /// Query parameters in the order the API documents them
    #[must_use]
    pub fn params(&self, api_key: &str) -> [(&'static str, String); 5] {
        [
            ("api_key", api_key.to_string()),
            ("limit", self.limit.to_string()),
            ("rating", self.rating.clone()),
            ("offset", self.offset.to_string()),
            ("q", self.query.clone()),
        ]
    }

    /// Full request URL
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if `base` is not a valid URL.
    pub fn url(&self, base: &str, api_key: &str) -> Result<reqwest::Url, FetchError> {
        let endpoint = format!("{}/{}", base.trim_end_matches('/'), self.path());
        reqwest::Url::parse_with_params(&endpoint, self.params(api_key))
            .map_err(|e| FetchError::InvalidRequest(format!("{endpoint}: {e}")))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

/// Accept `"113"` as well as `113`; the API sends dimensions as strings
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(text) if text.trim().is_empty() => 0,
        NumberOrText::Text(text) => text.trim().parse::<u64>().map_err(serde::de::Error::custom)?,
    };
    u32::try_from(value).map_err(serde::de::Error::custom)
}
