//! Reading and writing the generated paintings artifact.
//!
//! The artifact is a script file that binds the collection to a constant.
//! Reloading locates the binding, cuts out the bracketed array literal and
//! parses it as data: strict JSON for generated artifacts, JSON5 for a
//! hand-written seed with unquoted keys, single quotes or comments. Nothing
//! in the file is ever evaluated.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

use crate::record::LocalPaintingRecord;

/// Name of the constant the collection is bound to.
pub const COLLECTION_BINDING: &str = "paintings";

const SOURCE_ATTRIBUTION: &str = "大都会艺术博物馆Open Access API";

static RE_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\bconst\s+{COLLECTION_BINDING}\s*=\s*\[")).unwrap()
});

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No `const paintings = [...]` binding found in {path}")]
    MissingCollection { path: PathBuf },

    #[error("Collection in {path} is not a JSON array of paintings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Collection literal in {path} is not plain data: {source}")]
    Literal {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load a previously written collection.
///
/// Returns `Ok(None)` when the file does not exist. A path ending in `.json`
/// is read as a bare JSON array. Anything else is treated as a script and the
/// array bound to [`COLLECTION_BINDING`] is extracted first; that literal may
/// be strict JSON (our own artifacts) or a JSON5 object literal (a seed file
/// written by hand).
pub fn load_existing(path: &Path) -> Result<Option<Vec<LocalPaintingRecord>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let is_data_file = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_data_file {
        let records = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Some(records));
    }

    let literal =
        extract_collection_literal(&content).ok_or_else(|| StoreError::MissingCollection {
            path: path.to_path_buf(),
        })?;
    if let Ok(records) = serde_json::from_str(literal) {
        return Ok(Some(records));
    }
    let records = json5::from_str(literal).map_err(|source| StoreError::Literal {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(records))
}

/// The array literal bound to [`COLLECTION_BINDING`], brackets included.
///
/// The closing bracket is found by matching brackets outside of string
/// literals and comments, so titles such as `Study [recto]; Sketch [verso]`
/// do not cut the literal short.
pub fn extract_collection_literal(content: &str) -> Option<&str> {
    let binding = RE_BINDING.find(content)?;
    let rest = &content[binding.end() - 1..];
    literal_len(rest).map(|len| &rest[..len])
}

/// Byte length of the bracketed literal at the start of `text`.
/// `None` when the brackets never balance.
fn literal_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Render the full artifact: header, bound collection, export guard.
pub fn render_artifact(
    records: &[LocalPaintingRecord],
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let collection = serde_json::to_string_pretty(records)?;
    Ok(format!(
        "// 自动化生成的名画数据库 - 最后更新: {timestamp}\n\
         // 数据来源: {SOURCE_ATTRIBUTION}\n\
         // 作品数量: {count}件\n\
         \n\
         const {COLLECTION_BINDING} = {collection};\n\
         \n\
         // 导出供其他模块使用\n\
         if (typeof module !== 'undefined' && module.exports) {{\n    \
         module.exports = {COLLECTION_BINDING};\n\
         }}\n",
        timestamp = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        count = records.len(),
    ))
}

/// Replace `path` with `contents`.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over the target, so the artifact is either the old one or the
/// complete new one.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PaintingMetadata;
    use chrono::TimeZone;

    fn sample() -> Vec<LocalPaintingRecord> {
        vec![
            LocalPaintingRecord {
                image_url: "images/The scream.jpg".to_string(),
                title: "呐喊".to_string(),
                artist: "爱德华·蒙克".to_string(),
                year: "1893".to_string(),
                style: "表现主义".to_string(),
                description: "作品展现了桥上一个人因焦虑而呐喊的瞬间。".to_string(),
                metadata: None,
            },
            LocalPaintingRecord {
                image_url: "https://images.metmuseum.org/CRDImages/ep/original/DP-1.jpg"
                    .to_string(),
                title: "The Card Players".to_string(),
                artist: "Paul Cézanne".to_string(),
                year: "1890".to_string(),
                style: "油画 · 印象派".to_string(),
                description: "《The Card Players》是Paul Cézanne的Oil on canvas作品。".to_string(),
                metadata: Some(PaintingMetadata {
                    museum: "大都会艺术博物馆".to_string(),
                    object_id: 435868,
                    is_public_domain: true,
                    department: "European Paintings".to_string(),
                }),
            },
        ]
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    #[test]
    fn artifact_has_header_binding_and_export_guard() {
        let text = render_artifact(&sample(), fixed_time()).unwrap();

        assert!(text.starts_with("// 自动化生成的名画数据库 - 最后更新: 2026-10-18 09:30:00 UTC\n"));
        assert!(text.contains("// 数据来源: 大都会艺术博物馆Open Access API\n"));
        assert!(text.contains("// 作品数量: 2件\n"));
        assert!(text.contains("const paintings = ["));
        assert!(text.contains("if (typeof module !== 'undefined' && module.exports) {\n    module.exports = paintings;\n}"));
    }

    #[test]
    fn written_artifact_reloads_to_same_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paintings-enhanced.js");
        let records = sample();

        let text = render_artifact(&records, fixed_time()).unwrap();
        write_artifact(&path, &text).unwrap();

        let reloaded = load_existing(&path).unwrap().unwrap();
        assert_eq!(reloaded, records);
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.js");
        std::fs::write(&path, "stale").unwrap();

        write_artifact(&path, "fresh").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_existing(&dir.path().join("paintings.js")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn json_data_file_is_read_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paintings.json");
        std::fs::write(&path, serde_json::to_string(&sample()).unwrap()).unwrap();

        let loaded = load_existing(&path).unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].artist, "Paul Cézanne");
    }

    #[test]
    fn file_without_binding_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.js");
        std::fs::write(&path, "console.log('hello');").unwrap();

        let err = load_existing(&path).unwrap_err();
        assert!(matches!(err, StoreError::MissingCollection { .. }));
    }

    #[test]
    fn bracket_and_semicolon_inside_title_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paintings-enhanced.js");
        let mut records = sample();
        records[1].title = "Study [recto]; Sketch [verso]".to_string();
        records[1].description = "《Study [recto]; Sketch [verso]》是一件作品。".to_string();

        let text = render_artifact(&records, fixed_time()).unwrap();
        write_artifact(&path, &text).unwrap();

        let reloaded = load_existing(&path).unwrap().unwrap();
        assert_eq!(reloaded, records);
    }

    #[test]
    fn hand_written_seed_literal_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paintings.js");
        std::fs::write(
            &path,
            r#"// 1. 名画数据数组：这里存放所有名画的信息
const paintings = [
    {
        imageUrl: 'images/Generated Image.png', // 替换为你的图片路径
        title: '星月夜',
        artist: '文森特·梵高',
        year: '1889',
        style: '后印象派',
        description: '这幅画描绘了一个夸张化与充满强烈表现力的星空下的村庄。'
    },
    {
        imageUrl: 'images/washington.jpg',
        title: 'Washington Crossing the Delaware',
        artist: 'Emanuel Leutze',
        year: '1851',
        style: 'based on a photograph',
        description: '引发关于政治思想的思辩'
    },
    {
        imageUrl: 'images/The scream.jpg',
        title: '呐喊',
        artist: '爱德华·蒙克',
        year: '1893',
        style: '表现主义',
        description: '作品展现了桥上一个人因焦虑而呐喊的瞬间，是表现主义绘画的标志性作品。'
    }
    // ... 你可以继续在这里添加更多名画数据
];

console.log('图片数据总数:', paintings.length);
"#,
        )
        .unwrap();

        let loaded = load_existing(&path).unwrap().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].image_url, "images/Generated Image.png");
        assert_eq!(loaded[1].title, "Washington Crossing the Delaware");
        assert_eq!(loaded[2].artist, "爱德华·蒙克");
        assert!(loaded.iter().all(|r| r.metadata.is_none()));
    }

    #[test]
    fn literal_with_code_is_rejected_not_evaluated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paintings.js");
        std::fs::write(&path, "const paintings = [ loadPaintings() ];\n").unwrap();

        let err = load_existing(&path).unwrap_err();
        assert!(matches!(err, StoreError::Literal { .. }));
    }

    #[test]
    fn unbalanced_literal_is_missing() {
        assert_eq!(extract_collection_literal("const paintings = [ {\"a\": 1}"), None);
        assert_eq!(
            extract_collection_literal("const paintings = ['x]; y'];"),
            Some("['x]; y']")
        );
    }

    #[test]
    fn extracts_literal_between_binding_and_semicolon() {
        let content = "// header\nconst paintings = [\n  {\"a\": [1, 2]}\n];\n\nmodule.exports = paintings;";
        assert_eq!(
            extract_collection_literal(content),
            Some("[\n  {\"a\": [1, 2]}\n]")
        );
        assert_eq!(extract_collection_literal("const other = [];"), None);
    }
}
