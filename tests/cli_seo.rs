use std::fs;

use folio::seo::{Rating, SeoReport};
use predicates::prelude::*;

fn folio() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("folio");
    cmd.env_remove("FOLIO_CONFIG").env_remove("FOLIO_BASE_URL");
    cmd
}

#[test]
fn seo_analyze_prints_json_report() -> anyhow::Result<()> {
    let title = "Jane Doe | Rust Engineer Portfolio";
    let description = "Jane Doe builds fast, reliable backend systems in Rust. \
        Browse case studies, open source projects and writing about systems engineering.";
    let output = folio()
        .args([
            "seo",
            "analyze",
            "--title",
            title,
            "--description",
            description,
            "--keywords",
            "rust, portfolio ,, backend",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: SeoReport = serde_json::from_slice(&output)?;
    assert_eq!(report.title.length, title.chars().count());
    assert_eq!(report.title.score, 100);
    assert_eq!(report.description.score, 100);
    assert_eq!(report.keywords.keywords_in_title, 2);
    assert_eq!(report.keywords.keywords_in_description, 2);
    assert_eq!(report.keywords.score, 100);
    assert_eq!(report.overall.score, 100);
    assert_eq!(report.overall.rating, Rating::Excellent);
    assert_eq!(report.overall.all_recommendations.len(), 2);
    Ok(())
}

#[test]
fn seo_analyze_text_format_lists_recommendations() {
    folio()
        .args([
            "seo",
            "analyze",
            "--title",
            "Home",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SEO score: 54/100 (fair)"))
        .stdout(predicate::str::contains("[warning/medium] Title is too short"))
        .stdout(predicate::str::contains(
            "[warning/medium] No keywords specified.",
        ));
}

#[test]
fn seo_batch_writes_one_report_per_page() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let pages_path = temp.path().join("pages.yaml");
    let out_path = temp.path().join("reports").join("seo.jsonl");
    fs::write(
        &pages_path,
        "- path: /\n  title: Home\n  description: Welcome\n  keywords: [home]\n\
         - path: /blog\n  title: Blog\n",
    )?;

    folio()
        .args([
            "seo",
            "batch",
            "--input",
            pages_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let reports = fs::read_to_string(&out_path)?
        .lines()
        .map(serde_json::from_str::<SeoReport>)
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].path.as_deref(), Some("/"));
    assert_eq!(reports[0].keywords.keywords_in_title, 1);
    assert_eq!(reports[1].path.as_deref(), Some("/blog"));
    assert_eq!(reports[1].keywords.score, 30);
    Ok(())
}

#[test]
fn seo_batch_defaults_to_stdout() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let pages_path = temp.path().join("pages.json");
    fs::write(
        &pages_path,
        r#"[{"title": "About", "description": "", "keywords": []}]"#,
    )?;

    let output = folio()
        .args(["seo", "batch", "--input", pages_path.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output)?;
    assert_eq!(text.lines().count(), 1);
    let report: SeoReport = serde_json::from_str(text.trim_end())?;
    assert_eq!(report.overall.rating, Rating::Fair);
    Ok(())
}
