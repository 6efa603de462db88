use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufRead as _, BufReader};
use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::cli::{LeadBatchArgs, LeadScoreArgs};
use crate::config::{FolioConfig, LeadScoringConfig};
use crate::formats::{ContactSubmission, ScoredSubmission};

const PREMIUM_PROJECT_POINTS: u8 = 30;
const STANDARD_PROJECT_POINTS: u8 = 20;
const OTHER_PROJECT_POINTS: u8 = 10;

const TOP_BUDGET_POINTS: u8 = 40;
const HIGH_BUDGET_POINTS: u8 = 30;
const MID_BUDGET_POINTS: u8 = 20;
const OTHER_BUDGET_POINTS: u8 = 10;

const COMPANY_POINTS: u8 = 15;
const PHONE_POINTS: u8 = 10;
const LONG_MESSAGE_POINTS: u8 = 5;

const MAX_SCORE: u8 = 100;

/// Scoring input with absent fields already normalised to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadInput {
    pub project_type: String,
    pub budget_range: String,
    pub company: String,
    pub phone: String,
    pub message: String,
}

impl From<&ContactSubmission> for LeadInput {
    fn from(submission: &ContactSubmission) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            project_type: text(&submission.project_type),
            budget_range: text(&submission.budget_range),
            company: text(&submission.company),
            phone: text(&submission.phone),
            message: text(&submission.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            Priority::High
        } else if score >= 50 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points earned per scoring dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScoreBreakdown {
    pub project_type: u8,
    pub budget: u8,
    pub company: u8,
    pub phone: u8,
    pub message: u8,
}

impl LeadScoreBreakdown {
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.project_type)
            + u16::from(self.budget)
            + u16::from(self.company)
            + u16::from(self.phone)
            + u16::from(self.message);
        sum.min(u16::from(MAX_SCORE)) as u8
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadScorer {
    config: LeadScoringConfig,
}

impl LeadScorer {
    pub fn new(config: LeadScoringConfig) -> Self {
        Self { config }
    }

    /// Lead score in `20..=100`.
    pub fn score(&self, input: &LeadInput) -> u8 {
        self.breakdown(input).total()
    }

    pub fn breakdown(&self, input: &LeadInput) -> LeadScoreBreakdown {
        LeadScoreBreakdown {
            project_type: self.project_type_points(&input.project_type),
            budget: self.budget_points(&input.budget_range),
            company: if input.company.trim().is_empty() {
                0
            } else {
                COMPANY_POINTS
            },
            phone: if input.phone.trim().is_empty() {
                0
            } else {
                PHONE_POINTS
            },
            message: if input.message.chars().count() > self.config.long_message_chars {
                LONG_MESSAGE_POINTS
            } else {
                0
            },
        }
    }

    pub fn project_type_points(&self, project_type: &str) -> u8 {
        let is_one_of = |types: &[String]| types.iter().any(|t| t == project_type);
        if is_one_of(&self.config.premium_project_types) {
            PREMIUM_PROJECT_POINTS
        } else if is_one_of(&self.config.standard_project_types) {
            STANDARD_PROJECT_POINTS
        } else {
            OTHER_PROJECT_POINTS
        }
    }

    pub fn budget_points(&self, budget_range: &str) -> u8 {
        if contains_any(budget_range, &self.config.top_budget_markers) {
            TOP_BUDGET_POINTS
        } else if contains_any(budget_range, &self.config.high_budget_markers) {
            HIGH_BUDGET_POINTS
        } else if contains_any(budget_range, &self.config.mid_budget_markers) {
            MID_BUDGET_POINTS
        } else {
            OTHER_BUDGET_POINTS
        }
    }

    pub fn score_submission(&self, submission: ContactSubmission) -> ScoredSubmission {
        let lead_score = self.score(&LeadInput::from(&submission));
        ScoredSubmission {
            submission,
            lead_score,
            priority: Priority::from_score(lead_score),
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(needle.as_str()))
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    pub score: u8,
    pub priority: Priority,
    pub breakdown: LeadScoreBreakdown,
}

pub fn score(args: LeadScoreArgs, config: &FolioConfig) -> anyhow::Result<()> {
    let submission = ContactSubmission {
        project_type: args.project_type,
        budget_range: args.budget,
        company: args.company,
        phone: args.phone,
        message: args.message,
        ..ContactSubmission::default()
    };

    let scorer = LeadScorer::new(config.leads.clone());
    let breakdown = scorer.breakdown(&LeadInput::from(&submission));
    let score = breakdown.total();
    let report = LeadReport {
        score,
        priority: Priority::from_score(score),
        breakdown,
    };
    tracing::debug!(?report, "scored lead");

    let json = serde_json::to_string_pretty(&report).context("serialize lead report")?;
    println!("{json}");
    Ok(())
}

pub fn batch(args: LeadBatchArgs, config: &FolioConfig) -> anyhow::Result<()> {
    let input_path = PathBuf::from(&args.input);
    let submissions = read_submissions(&input_path).context("read submissions")?;

    let scorer = LeadScorer::new(config.leads.clone());
    let mut jsonl = String::new();
    let mut counts = [0_usize; 3];
    for submission in submissions {
        let scored = scorer.score_submission(submission);
        counts[scored.priority as usize] += 1;
        jsonl.push_str(&serde_json::to_string(&scored).context("serialize scored submission")?);
        jsonl.push('\n');
    }

    tracing::info!(
        high = counts[Priority::High as usize],
        medium = counts[Priority::Medium as usize],
        low = counts[Priority::Low as usize],
        "scored submissions"
    );

    crate::output::write_document("scored submissions", &args.out, &jsonl, args.force)
}

fn read_submissions(path: &PathBuf) -> anyhow::Result<Vec<ContactSubmission>> {
    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("open submissions: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut submissions = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("read submissions jsonl line")?;
        if line.trim().is_empty() {
            continue;
        }
        let submission: ContactSubmission = serde_json::from_str(&line)
            .with_context(|| format!("parse submission on line {}", idx + 1))?;
        submissions.push(submission);
    }
    Ok(submissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        project_type: &str,
        budget_range: &str,
        company: &str,
        phone: &str,
        message: &str,
    ) -> LeadInput {
        LeadInput {
            project_type: project_type.to_owned(),
            budget_range: budget_range.to_owned(),
            company: company.to_owned(),
            phone: phone.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn complete_premium_lead_caps_at_one_hundred() {
        let scorer = LeadScorer::default();
        let lead = input(
            "E-commerce Platform",
            "Over $50,000",
            "Acme",
            "555-1234",
            &"x".repeat(150),
        );
        assert_eq!(scorer.score(&lead), 100);
    }

    #[test]
    fn empty_lead_scores_the_floor() {
        let scorer = LeadScorer::default();
        assert_eq!(scorer.score(&LeadInput::default()), 20);
    }

    #[test]
    fn standard_project_with_small_budget() {
        let scorer = LeadScorer::default();
        let lead = input("Website Development", "$5,000 - $10,000", "", "", "short");
        assert_eq!(scorer.score(&lead), 40);
    }

    #[test]
    fn budget_markers_are_checked_in_precedence_order() {
        let scorer = LeadScorer::default();
        assert_eq!(scorer.budget_points("Over $50,000"), 40);
        assert_eq!(scorer.budget_points("$25,000 - $50,000"), 40);
        assert_eq!(scorer.budget_points("$10,000 - $25,000"), 30);
        assert_eq!(scorer.budget_points("$5,000 - $10,000"), 30);
        assert_eq!(scorer.budget_points("$5,000"), 20);
        assert_eq!(scorer.budget_points("Under $1,000"), 10);
        assert_eq!(scorer.budget_points(""), 10);
    }

    #[test]
    fn project_types_match_exactly() {
        let scorer = LeadScorer::default();
        assert_eq!(scorer.project_type_points("Custom Software"), 30);
        assert_eq!(scorer.project_type_points("Mobile App Development"), 30);
        assert_eq!(scorer.project_type_points("API Development"), 20);
        assert_eq!(scorer.project_type_points("custom software"), 10);
        assert_eq!(scorer.project_type_points("Consulting"), 10);
    }

    #[test]
    fn whitespace_only_contact_details_do_not_count() {
        let scorer = LeadScorer::default();
        let breakdown = scorer.breakdown(&input("", "", "   ", "\t", ""));
        assert_eq!(breakdown.company, 0);
        assert_eq!(breakdown.phone, 0);
    }

    #[test]
    fn message_bonus_requires_more_than_threshold_chars() {
        let scorer = LeadScorer::default();
        let at_threshold = input("", "", "", "", &"é".repeat(100));
        let over_threshold = input("", "", "", "", &"é".repeat(101));
        assert_eq!(scorer.breakdown(&at_threshold).message, 0);
        assert_eq!(scorer.breakdown(&over_threshold).message, 5);
    }

    #[test]
    fn configured_categories_replace_defaults() {
        let config = LeadScoringConfig {
            premium_project_types: vec!["Consulting".to_owned()],
            ..LeadScoringConfig::default()
        };
        let scorer = LeadScorer::new(config);
        assert_eq!(scorer.project_type_points("Consulting"), 30);
        assert_eq!(scorer.project_type_points("E-commerce Platform"), 10);
    }

    #[test]
    fn score_stays_within_bounds() {
        let scorer = LeadScorer::default();
        let project_types = ["", "Custom Software", "API Development", "Other"];
        let budgets = ["", "Over $50,000", "$10,000 - $25,000", "$5,000 - $10,000"];
        let fillers = ["", "x"];
        let messages = [String::new(), "m".repeat(101)];
        for project_type in project_types {
            for budget in budgets {
                for company in fillers {
                    for phone in fillers {
                        for message in &messages {
                            let score =
                                scorer.score(&input(project_type, budget, company, phone, message));
                            assert!((20..=100).contains(&score), "score out of range: {score}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn priority_thresholds() {
        assert_eq!(Priority::from_score(100), Priority::High);
        assert_eq!(Priority::from_score(70), Priority::High);
        assert_eq!(Priority::from_score(69), Priority::Medium);
        assert_eq!(Priority::from_score(50), Priority::Medium);
        assert_eq!(Priority::from_score(49), Priority::Low);
        assert_eq!(Priority::from_score(20), Priority::Low);
    }

    #[test]
    fn submission_with_missing_fields_scores_lowest_buckets() {
        let scorer = LeadScorer::default();
        let scored = scorer.score_submission(ContactSubmission {
            name: Some("Ada".to_owned()),
            company: Some("Analytical Engines".to_owned()),
            ..ContactSubmission::default()
        });
        assert_eq!(scored.lead_score, 35);
        assert_eq!(scored.priority, Priority::Low);
        assert_eq!(scored.submission.name.as_deref(), Some("Ada"));
    }
}
