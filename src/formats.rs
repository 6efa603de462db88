use std::fmt;
use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::lead::Priority;

/// A contact-form submission as exported from the site's data store.
///
/// Only `project_type`, `budget_range`, `company`, `phone` and `message`
/// take part in scoring; the other fields are carried through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, alias = "projectType", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, alias = "budgetRange", skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSubmission {
    #[serde(flatten)]
    pub submission: ContactSubmission,
    pub lead_score: u8,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoPage {
    /// Label for batch reports; not scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapSource {
    #[serde(default = "StaticPage::portfolio_defaults", alias = "staticPages")]
    pub static_pages: Vec<StaticPage>,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
    #[serde(default, alias = "blogPosts")]
    pub blog_posts: Vec<BlogPostRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub path: String,
    pub priority: f64,
    pub changefreq: ChangeFreq,
}

impl StaticPage {
    pub fn new(path: &str, priority: f64, changefreq: ChangeFreq) -> Self {
        Self {
            path: path.to_owned(),
            priority,
            changefreq,
        }
    }

    pub fn portfolio_defaults() -> Vec<StaticPage> {
        vec![
            StaticPage::new("/", 1.0, ChangeFreq::Weekly),
            StaticPage::new("/projects", 0.9, ChangeFreq::Weekly),
            StaticPage::new("/blog", 0.9, ChangeFreq::Weekly),
            StaticPage::new("/about", 0.8, ChangeFreq::Monthly),
            StaticPage::new("/contact", 0.7, ChangeFreq::Monthly),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(alias = "updatedAt", deserialize_with = "deserialize_date")]
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(alias = "updatedAt", deserialize_with = "deserialize_date")]
    pub updated_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (reduced to its UTC date).
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    anyhow::bail!("invalid date (expected YYYY-MM-DD or RFC 3339): {raw}")
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Reads JSON when the extension is `.json`, YAML otherwise.
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read input: {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&contents).with_context(|| format!("parse json: {}", path.display()))
    } else {
        serde_yaml::from_str(&contents).with_context(|| format!("parse yaml: {}", path.display()))
    }
}
