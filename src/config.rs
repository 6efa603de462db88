use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://example.com";

/// Process-wide settings. Built once in `main` and passed by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub site: SiteConfig,
    pub leads: LeadScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub disallowed_paths: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            disallowed_paths: vec!["/admin".to_owned(), "/api".to_owned()],
        }
    }
}

/// Category lists and thresholds consulted by [`crate::lead::LeadScorer`].
///
/// Project types match exactly; budget markers match as substrings of the
/// budget label. Each list is checked in the order given by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadScoringConfig {
    pub premium_project_types: Vec<String>,
    pub standard_project_types: Vec<String>,
    pub top_budget_markers: Vec<String>,
    pub high_budget_markers: Vec<String>,
    pub mid_budget_markers: Vec<String>,
    /// Messages longer than this many characters earn the message bonus.
    pub long_message_chars: usize,
}

impl Default for LeadScoringConfig {
    fn default() -> Self {
        Self {
            premium_project_types: owned(&[
                "E-commerce Platform",
                "Custom Software",
                "Mobile App Development",
            ]),
            standard_project_types: owned(&["Website Development", "API Development"]),
            top_budget_markers: owned(&["$50,000", "Over"]),
            high_budget_markers: owned(&["$25,000", "$10,000"]),
            mid_budget_markers: owned(&["$5,000"]),
            long_message_chars: 100,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl FolioConfig {
    /// Reads `path` when given, otherwise returns the built-in defaults.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file; using defaults");
            return Ok(Self::default());
        };

        let path = Path::new(path);
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config =
            Self::from_yaml_str(&yaml).with_context(|| format!("parse config: {}", path.display()))?;
        tracing::debug!(config = %path.display(), base_url = %config.site.base_url, "loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).context("deserialize config yaml")?
        };
        config.site.base_url = normalize_base_url(&config.site.base_url)?;
        Ok(config)
    }
}

/// Validates an absolute http/https URL and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("parse base url: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("base url must be http/https: {raw}");
    }
    if url.host_str().is_none() {
        anyhow::bail!("base url must have host: {raw}");
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() -> anyhow::Result<()> {
        let config = FolioConfig::from_yaml_str("")?;
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.site.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.site.disallowed_paths, vec!["/admin", "/api"]);
        Ok(())
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() -> anyhow::Result<()> {
        let config = FolioConfig::from_yaml_str(
            "site:\n  base_url: https://jane.dev/\nleads:\n  premium_project_types: [Consulting]\n",
        )?;
        assert_eq!(config.site.base_url, "https://jane.dev");
        assert_eq!(config.site.disallowed_paths, vec!["/admin", "/api"]);
        assert_eq!(config.leads.premium_project_types, vec!["Consulting"]);
        assert_eq!(
            config.leads.standard_project_types,
            vec!["Website Development", "API Development"]
        );
        assert_eq!(config.leads.long_message_chars, 100);
        Ok(())
    }

    #[test]
    fn base_url_strips_every_trailing_slash() -> anyhow::Result<()> {
        assert_eq!(normalize_base_url("https://jane.dev///")?, "https://jane.dev");
        assert_eq!(
            normalize_base_url(" http://localhost:3000/ ")?,
            "http://localhost:3000"
        );
        Ok(())
    }

    #[test]
    fn base_url_rejects_non_http_schemes() {
        assert!(normalize_base_url("ftp://jane.dev").is_err());
        assert!(normalize_base_url("jane.dev").is_err());
    }

    #[test]
    fn unknown_yaml_shape_is_an_error() {
        assert!(FolioConfig::from_yaml_str("site: 42\n").is_err());
    }
}
