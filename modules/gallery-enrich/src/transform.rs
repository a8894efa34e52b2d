//! Maps validated Met objects into local painting records.
//!
//! Everything here is pure: the same [`Artwork`] always yields the same
//! record, style string and description.

use met_client::Artwork;

use crate::record::{LocalPaintingRecord, PaintingMetadata};

/// Provenance name stored in every record's metadata.
pub const MUSEUM_NAME: &str = "大都会艺术博物馆";

/// Medium substring → base style. Scanned in order; first hit wins.
const MEDIUM_STYLES: &[(&str, &str)] = &[
    ("Oil on canvas", "油画"),
    ("Watercolor", "水彩画"),
    ("Tempera", "蛋彩画"),
    ("Fresco", "湿壁画"),
    ("Ink", "水墨画"),
];

const DEFAULT_STYLE: &str = "绘画";

/// Inclusive begin-year ranges → period label. Ranges overlap at 1900;
/// the first matching entry wins.
const PERIODS: &[(i32, i32, &str)] = &[
    (1870, 1900, "印象派"),
    (1900, 1950, "现代主义"),
    (1400, 1600, "文艺复兴"),
];

const STYLE_SEPARATOR: &str = " · ";

const UNKNOWN_ARTIST: &str = "未知艺术家";
const UNKNOWN_MEDIUM: &str = "材质未知";
const UNKNOWN_YEAR: &str = "未知";
const MAX_DESCRIPTION_TAGS: usize = 3;
const TAG_SEPARATOR: &str = "、";
const CLOSING_CLAUSE: &str = "。这件作品现藏于纽约大都会艺术博物馆。";

pub fn to_local_record(artwork: &Artwork) -> LocalPaintingRecord {
    LocalPaintingRecord {
        image_url: artwork.image_url.clone(),
        title: artwork.title.clone(),
        artist: artwork.artist.clone(),
        year: display_year(artwork),
        style: infer_style(artwork.medium.as_deref(), artwork.begin_year),
        description: describe(artwork),
        metadata: Some(PaintingMetadata {
            museum: MUSEUM_NAME.to_string(),
            object_id: artwork.object_id,
            is_public_domain: artwork.is_public_domain,
            department: artwork.department.clone().unwrap_or_default(),
        }),
    }
}

/// Begin year if known, else the free-text date, else the unknown marker.
pub fn display_year(artwork: &Artwork) -> String {
    if let Some(year) = artwork.begin_year {
        return year.to_string();
    }
    artwork
        .object_date
        .clone()
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

/// Coarse style from the medium, qualified by period when the year falls in a known range.
pub fn infer_style(medium: Option<&str>, begin_year: Option<i32>) -> String {
    let medium = medium.unwrap_or_default();
    let base = MEDIUM_STYLES
        .iter()
        .find(|(needle, _)| medium.contains(needle))
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE);

    match begin_year.and_then(period_for) {
        Some(period) => format!("{base}{STYLE_SEPARATOR}{period}"),
        None => base.to_string(),
    }
}

fn period_for(year: i32) -> Option<&'static str> {
    PERIODS
        .iter()
        .find(|(start, end, _)| (*start..=*end).contains(&year))
        .map(|(_, _, period)| *period)
}

pub fn describe(artwork: &Artwork) -> String {
    let artist = non_blank(&artwork.artist).unwrap_or(UNKNOWN_ARTIST);
    let medium = artwork
        .medium
        .as_deref()
        .and_then(non_blank)
        .unwrap_or(UNKNOWN_MEDIUM);

    let mut description = format!("《{}》是{}的{}作品", artwork.title, artist, medium);

    if let Some(year) = artwork.begin_year {
        description.push_str(&format!("，创作于{year}年前后"));
    }

    if !artwork.tags.is_empty() {
        let subjects: Vec<&str> = artwork
            .tags
            .iter()
            .take(MAX_DESCRIPTION_TAGS)
            .map(String::as_str)
            .collect();
        description.push_str(&format!("。作品主题涉及{}", subjects.join(TAG_SEPARATOR)));
    }

    description.push_str(CLOSING_CLAUSE);
    description
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
