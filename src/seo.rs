use std::fmt;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::cli::{ReportFormat, SeoAnalyzeArgs, SeoBatchArgs};
use crate::formats::SeoPage;

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const MAX_KEYWORDS: usize = 10;

const TITLE_WEIGHT: f64 = 0.4;
const DESCRIPTION_WEIGHT: f64 = 0.3;
const KEYWORDS_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
    pub impact: Impact,
}

impl Recommendation {
    fn new(kind: RecommendationKind, impact: Impact, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            impact,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RecommendationKind::Success => "success",
            RecommendationKind::Warning => "warning",
            RecommendationKind::Error => "error",
        };
        let impact = match self.impact {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        };
        write!(f, "[{kind}/{impact}] {}", self.message)
    }
}

/// Title or meta description result. `length` counts characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthAnalysis {
    pub length: usize,
    pub score: u8,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub keywords_in_title: usize,
    pub keywords_in_description: usize,
    pub score: u8,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Rating::Excellent,
            70..=89 => Rating::Good,
            50..=69 => Rating::Fair,
            _ => Rating::Poor,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Fair => "fair",
            Rating::Poor => "poor",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallSeo {
    pub score: u8,
    pub rating: Rating,
    pub all_recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub title: LengthAnalysis,
    pub description: LengthAnalysis,
    pub keywords: KeywordAnalysis,
    pub overall: OverallSeo,
}

pub fn analyze_title(title: &str) -> LengthAnalysis {
    let length = title.chars().count();
    let (score, recommendation) = if length < TITLE_MIN_CHARS {
        (
            60,
            Recommendation::new(
                RecommendationKind::Warning,
                Impact::Medium,
                format!(
                    "Title is too short ({length} characters). Aim for {TITLE_MIN_CHARS}-{TITLE_MAX_CHARS} characters."
                ),
            ),
        )
    } else if length > TITLE_MAX_CHARS {
        (
            40,
            Recommendation::new(
                RecommendationKind::Error,
                Impact::High,
                format!(
                    "Title is too long ({length} characters) and may be truncated in search results."
                ),
            ),
        )
    } else {
        (
            100,
            Recommendation::new(
                RecommendationKind::Success,
                Impact::Low,
                format!("Title length is optimal ({length} characters)."),
            ),
        )
    };

    LengthAnalysis {
        length,
        score,
        recommendations: vec![recommendation],
    }
}

pub fn analyze_description(description: &str) -> LengthAnalysis {
    let length = description.chars().count();
    let (score, recommendation) = if length < DESCRIPTION_MIN_CHARS {
        (
            70,
            Recommendation::new(
                RecommendationKind::Warning,
                Impact::Medium,
                format!(
                    "Meta description is too short ({length} characters). Aim for {DESCRIPTION_MIN_CHARS}-{DESCRIPTION_MAX_CHARS} characters."
                ),
            ),
        )
    } else if length > DESCRIPTION_MAX_CHARS {
        (
            50,
            Recommendation::new(
                RecommendationKind::Error,
                Impact::High,
                format!(
                    "Meta description is too long ({length} characters) and may be truncated in search results."
                ),
            ),
        )
    } else {
        (
            100,
            Recommendation::new(
                RecommendationKind::Success,
                Impact::Low,
                format!("Meta description length is optimal ({length} characters)."),
            ),
        )
    };

    LengthAnalysis {
        length,
        score,
        recommendations: vec![recommendation],
    }
}

/// Number of keywords appearing in `text`, case-insensitively.
///
/// Repeated keywords count once per occurrence in the list, and an empty
/// keyword matches any text.
pub fn count_matches<S: AsRef<str>>(keywords: &[S], text: &str) -> usize {
    let text = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| {
            let keyword: &str = (*keyword).as_ref();
            text.contains(&keyword.to_lowercase())
        })
        .count()
}

pub fn analyze_keywords<S: AsRef<str>>(
    keywords: &[S],
    title: &str,
    description: &str,
) -> KeywordAnalysis {
    let keywords_in_title = count_matches(keywords, title);
    let keywords_in_description = count_matches(keywords, description);
    let total = keywords.len();

    let mut recommendations = Vec::new();
    if total == 0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Warning,
            Impact::Medium,
            "No keywords specified. Add 5-10 focus keywords for this page.",
        ));
    } else if total > MAX_KEYWORDS {
        recommendations.push(Recommendation::new(
            RecommendationKind::Warning,
            Impact::Low,
            format!("Too many keywords ({total}). Focus on 5-10 primary keywords."),
        ));
    }
    if keywords_in_title == 0 && total > 0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Error,
            Impact::High,
            "None of the keywords appear in the title.",
        ));
    }
    if keywords_in_description == 0 && total > 0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Warning,
            Impact::Medium,
            "None of the keywords appear in the meta description.",
        ));
    }

    let score = if total == 0 {
        30
    } else {
        let in_title = if keywords_in_title > 0 { 50 } else { 0 };
        let in_description = if keywords_in_description > 0 { 30 } else { 0 };
        let focus = if total <= MAX_KEYWORDS { 20 } else { 10 };
        (in_title + in_description + focus).min(100)
    };

    KeywordAnalysis {
        keywords_in_title,
        keywords_in_description,
        score,
        recommendations,
    }
}

pub fn calculate_overall_score(
    title: &LengthAnalysis,
    description: &LengthAnalysis,
    keywords: &KeywordAnalysis,
) -> OverallSeo {
    let weighted = f64::from(title.score) * TITLE_WEIGHT
        + f64::from(description.score) * DESCRIPTION_WEIGHT
        + f64::from(keywords.score) * KEYWORDS_WEIGHT;
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    let all_recommendations = title
        .recommendations
        .iter()
        .chain(&description.recommendations)
        .chain(&keywords.recommendations)
        .cloned()
        .collect();

    OverallSeo {
        score,
        rating: Rating::from_score(score),
        all_recommendations,
    }
}

pub fn analyze_page(page: &SeoPage) -> SeoReport {
    let title = analyze_title(&page.title);
    let description = analyze_description(&page.description);
    let keywords = analyze_keywords(&page.keywords, &page.title, &page.description);
    let overall = calculate_overall_score(&title, &description, &keywords);
    SeoReport {
        path: page.path.clone(),
        title,
        description,
        keywords,
        overall,
    }
}

pub fn render_text(report: &SeoReport) -> String {
    let mut out = String::new();
    if let Some(path) = report.path.as_deref() {
        out.push_str(&format!("Page: {path}\n"));
    }
    out.push_str(&format!(
        "SEO score: {}/100 ({})\n",
        report.overall.score, report.overall.rating
    ));
    out.push_str(&format!(
        "Title: {} characters, score {}\n",
        report.title.length, report.title.score
    ));
    out.push_str(&format!(
        "Description: {} characters, score {}\n",
        report.description.length, report.description.score
    ));
    out.push_str(&format!(
        "Keywords: {} in title, {} in description, score {}\n",
        report.keywords.keywords_in_title,
        report.keywords.keywords_in_description,
        report.keywords.score
    ));
    out.push_str("Recommendations:\n");
    for recommendation in &report.overall.all_recommendations {
        out.push_str(&format!("  {recommendation}\n"));
    }
    out
}

pub fn analyze(args: SeoAnalyzeArgs) -> anyhow::Result<()> {
    let page = SeoPage {
        path: None,
        title: args.title,
        description: args.description,
        keywords: args
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
            .collect(),
    };

    let report = analyze_page(&page);
    tracing::debug!(
        score = report.overall.score,
        rating = %report.overall.rating,
        "analyzed page"
    );

    match args.format {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize seo report")?;
            println!("{json}");
        }
        ReportFormat::Text => print!("{}", render_text(&report)),
    }
    Ok(())
}

pub fn batch(args: SeoBatchArgs) -> anyhow::Result<()> {
    let pages: Vec<SeoPage> =
        crate::formats::read_structured(Path::new(&args.input)).context("read seo pages")?;

    let mut jsonl = String::new();
    for page in &pages {
        let report = analyze_page(page);
        if report.overall.rating == Rating::Poor {
            tracing::info!(
                path = page.path.as_deref().unwrap_or("-"),
                score = report.overall.score,
                "page rated poor"
            );
        }
        jsonl.push_str(&serde_json::to_string(&report).context("serialize seo report")?);
        jsonl.push('\n');
    }
    tracing::info!(pages = pages.len(), "analyzed pages");

    crate::output::write_document("seo report", &args.out, &jsonl, args.force)
}
