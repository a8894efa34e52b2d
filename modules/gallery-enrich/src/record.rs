use serde::{Deserialize, Serialize};

/// One painting in the local collection, in the shape the slideshow page reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalPaintingRecord {
    pub image_url: String,
    pub title: String,
    pub artist: String,
    pub year: String,
    pub style: String,
    pub description: String,
    /// Provenance block. Hand-authored seed entries have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PaintingMetadata>,
}

/// Where a record came from. Carried through verbatim; never used for
/// dedup or display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintingMetadata {
    pub museum: String,
    #[serde(rename = "objectID")]
    pub object_id: u64,
    #[serde(rename = "isPublicDomain")]
    pub is_public_domain: bool,
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_page_field_names() {
        let record = LocalPaintingRecord {
            image_url: "https://images.metmuseum.org/a.jpg".to_string(),
            title: "The Harvesters".to_string(),
            artist: "Pieter Bruegel the Elder".to_string(),
            year: "1565".to_string(),
            style: "油画 · 文艺复兴".to_string(),
            description: "...".to_string(),
            metadata: Some(PaintingMetadata {
                museum: "大都会艺术博物馆".to_string(),
                object_id: 435809,
                is_public_domain: true,
                department: "European Paintings".to_string(),
            }),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["imageUrl"], "https://images.metmuseum.org/a.jpg");
        assert_eq!(value["metadata"]["objectID"], 435809);
        assert_eq!(value["metadata"]["isPublicDomain"], true);
    }

    #[test]
    fn seed_entry_without_metadata_parses() {
        let record: LocalPaintingRecord = serde_json::from_value(json!({
            "imageUrl": "images/washington.jpg",
            "title": "Washington Crossing the Delaware",
            "artist": "Emanuel Leutze",
            "year": "1851",
            "style": "based on a photograph",
            "description": "引发关于政治思想的思辩"
        }))
        .unwrap();

        assert!(record.metadata.is_none());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("metadata").is_none());
    }
}
