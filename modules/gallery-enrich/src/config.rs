use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// European Paintings.
pub const DEFAULT_DEPARTMENT_ID: u32 = 11;
pub const DEFAULT_KEYWORD: &str = "painting";
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;
pub const DEFAULT_PACING_MS: u64 = 200;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INPUT_PATH: &str = "paintings.js";
pub const DEFAULT_OUTPUT_PATH: &str = "paintings-enhanced.js";

/// Job configuration. Every field has a default, so the job runs with no
/// environment at all; variables only override.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub api_base_url: String,
    pub department_id: u32,
    pub keyword: String,
    /// Upper bound on identifiers taken from one search.
    pub limit: usize,
    /// Delay between successive items.
    pub pacing: Duration,
    pub request_timeout: Duration,
    /// Prior or hand-authored collection. Read only.
    pub input_path: PathBuf,
    /// Generated artifact. Always fully replaced.
    pub output_path: PathBuf,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            api_base_url: met_client::DEFAULT_BASE_URL.to_string(),
            department_id: DEFAULT_DEPARTMENT_ID,
            keyword: DEFAULT_KEYWORD.to_string(),
            limit: DEFAULT_LIMIT,
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl EnrichConfig {
    /// Load overrides from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or empty variables keep defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let limit: usize = parse_or(var("ENRICH_LIMIT"), "ENRICH_LIMIT", defaults.limit)?;
        let pacing_ms: u64 = parse_or(var("ENRICH_PACING_MS"), "ENRICH_PACING_MS", DEFAULT_PACING_MS)?;
        let timeout_secs: u64 = parse_or(
            var("ENRICH_REQUEST_TIMEOUT_SECS"),
            "ENRICH_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let config = Self {
            api_base_url: var("MET_API_BASE_URL").unwrap_or(defaults.api_base_url),
            department_id: parse_or(
                var("MET_DEPARTMENT_ID"),
                "MET_DEPARTMENT_ID",
                defaults.department_id,
            )?,
            keyword: var("MET_SEARCH_KEYWORD").unwrap_or(defaults.keyword),
            limit: limit.clamp(1, MAX_LIMIT),
            pacing: Duration::from_millis(pacing_ms),
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
            input_path: var("PAINTINGS_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_path: var("PAINTINGS_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
        };

        if limit != config.limit {
            tracing::warn!(requested = limit, using = config.limit, "ENRICH_LIMIT out of range, clamped");
        }

        config.validate()?;
        Ok(config)
    }

    /// The generated artifact must never land on the hand-maintained input.
    pub fn validate(&self) -> Result<()> {
        if self.output_path == self.input_path {
            bail!(
                "PAINTINGS_OUTPUT must differ from PAINTINGS_INPUT ({})",
                self.input_path.display()
            );
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  MET_API_BASE_URL: {}", self.api_base_url);
        tracing::info!("  MET_DEPARTMENT_ID: {}", self.department_id);
        tracing::info!("  MET_SEARCH_KEYWORD: {}", self.keyword);
        tracing::info!("  ENRICH_LIMIT: {}", self.limit);
        tracing::info!("  ENRICH_PACING_MS: {}", self.pacing.as_millis());
        tracing::info!("  PAINTINGS_INPUT: {}", self.input_path.display());
        tracing::info!("  PAINTINGS_OUTPUT: {}", self.output_path.display());
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> Result<EnrichConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnrichConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn no_vars_gives_defaults() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.api_base_url, met_client::DEFAULT_BASE_URL);
        assert_eq!(config.department_id, 11);
        assert_eq!(config.keyword, "painting");
        assert_eq!(config.limit, 20);
        assert_eq!(config.pacing, Duration::from_millis(200));
        assert_eq!(config.input_path, PathBuf::from("paintings.js"));
        assert_eq!(config.output_path, PathBuf::from("paintings-enhanced.js"));
    }

    #[test]
    fn overrides_apply() {
        let config = from_map(&[
            ("MET_DEPARTMENT_ID", "21"),
            ("MET_SEARCH_KEYWORD", "landscape"),
            ("ENRICH_LIMIT", "5"),
            ("ENRICH_PACING_MS", "0"),
            ("PAINTINGS_OUTPUT", "out/paintings.js"),
        ])
        .unwrap();

        assert_eq!(config.department_id, 21);
        assert_eq!(config.keyword, "landscape");
        assert_eq!(config.limit, 5);
        assert_eq!(config.pacing, Duration::ZERO);
        assert_eq!(config.output_path, PathBuf::from("out/paintings.js"));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = from_map(&[("ENRICH_LIMIT", ""), ("MET_SEARCH_KEYWORD", "  ")]).unwrap();
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert_eq!(config.keyword, DEFAULT_KEYWORD);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(from_map(&[("ENRICH_LIMIT", "0")]).unwrap().limit, 1);
        assert_eq!(from_map(&[("ENRICH_LIMIT", "5000")]).unwrap().limit, MAX_LIMIT);
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        let err = from_map(&[("ENRICH_LIMIT", "twenty")]).unwrap_err();
        assert!(err.to_string().contains("ENRICH_LIMIT"));
    }

    #[test]
    fn output_equal_to_input_is_rejected() {
        let err = from_map(&[
            ("PAINTINGS_INPUT", "paintings.js"),
            ("PAINTINGS_OUTPUT", "paintings.js"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PAINTINGS_OUTPUT"));
    }
}
