use serde::{Deserialize, Serialize};
use thiserror::Error;

// --- Search ---

/// Query parameters for the `/search` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    #[serde(rename = "isHighlight")]
    pub is_highlight: bool,
    #[serde(rename = "departmentId")]
    pub department_id: u32,
    #[serde(rename = "hasImages")]
    pub has_images: bool,
    pub q: String,
}

impl SearchQuery {
    /// Curated highlights with images from one department, filtered by keyword.
    pub fn highlights(department_id: u32, keyword: &str) -> Self {
        Self {
            is_highlight: true,
            department_id,
            has_images: true,
            q: keyword.to_string(),
        }
    }
}

/// Response body of the `/search` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    /// The API answers `null` here when nothing matched.
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<u64>>,
}

impl SearchResponse {
    pub fn ids(&self) -> &[u64] {
        self.object_ids.as_deref().unwrap_or(&[])
    }
}

// --- Objects ---

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub term: String,
}

/// A single object from the `/objects/{id}` endpoint, as the API sends it.
/// Nothing beyond `objectID` is guaranteed; use [`MetObject::validate`]
/// before relying on image, title or artist.
#[derive(Debug, Clone, Deserialize)]
pub struct MetObject {
    #[serde(rename = "objectID")]
    pub object_id: u64,
    #[serde(rename = "primaryImage", default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "artistDisplayName", default)]
    pub artist_display_name: Option<String>,
    #[serde(rename = "objectDate", default)]
    pub object_date: Option<String>,
    #[serde(rename = "objectBeginDate", default)]
    pub object_begin_date: Option<i32>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(rename = "isPublicDomain", default)]
    pub is_public_domain: bool,
    #[serde(default)]
    pub department: Option<String>,
}

/// An object that passed validation: image, title and artist are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    pub object_id: u64,
    pub image_url: String,
    pub title: String,
    pub artist: String,
    pub object_date: Option<String>,
    /// `None` when the API reports no begin year (it sends `0`).
    pub begin_year: Option<i32>,
    pub medium: Option<String>,
    pub tags: Vec<String>,
    pub is_public_domain: bool,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("object {object_id} is missing required fields: {}", .missing.join(", "))]
pub struct IncompleteObject {
    pub object_id: u64,
    pub missing: Vec<&'static str>,
}

impl MetObject {
    /// Check that image, title and artist are all present and non-blank.
    ///
    /// A value made only of whitespace counts as missing, so `" "` for
    /// `primaryImage` is rejected the same as `""` or `null`. Optional fields
    /// get the same treatment and become `None`.
    pub fn validate(self) -> std::result::Result<Artwork, IncompleteObject> {
        let mut missing = Vec::new();
        let image_url = required(self.primary_image, "primaryImage", &mut missing);
        let title = required(self.title, "title", &mut missing);
        let artist = required(self.artist_display_name, "artistDisplayName", &mut missing);

        let (Some(image_url), Some(title), Some(artist)) = (image_url, title, artist) else {
            return Err(IncompleteObject {
                object_id: self.object_id,
                missing,
            });
        };

        Ok(Artwork {
            object_id: self.object_id,
            image_url,
            title,
            artist,
            object_date: present(self.object_date),
            begin_year: self.object_begin_date.filter(|year| *year != 0),
            medium: present(self.medium),
            tags: self
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|tag| tag.term)
                .filter(|term| !term.trim().is_empty())
                .collect(),
            is_public_domain: self.is_public_domain,
            department: present(self.department),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = present(value);
    if value.is_none() {
        missing.push(field);
    }
    value
}
