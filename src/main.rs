use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    let cli = folio::cli::Cli::parse();
    folio::logging::init(cli.verbose).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    let config = folio::config::FolioConfig::load(cli.config.as_deref()).context("load config")?;

    match cli.command {
        folio::cli::Command::Lead {
            command: folio::cli::LeadCommand::Score(args),
        } => {
            folio::lead::score(args, &config).context("lead score")?;
        }
        folio::cli::Command::Lead {
            command: folio::cli::LeadCommand::Batch(args),
        } => {
            folio::lead::batch(args, &config).context("lead batch")?;
        }
        folio::cli::Command::Seo {
            command: folio::cli::SeoCommand::Analyze(args),
        } => {
            folio::seo::analyze(args).context("seo analyze")?;
        }
        folio::cli::Command::Seo {
            command: folio::cli::SeoCommand::Batch(args),
        } => {
            folio::seo::batch(args).context("seo batch")?;
        }
        folio::cli::Command::Sitemap {
            command: folio::cli::SitemapCommand::Generate(args),
        } => {
            folio::sitemap::generate(args, &config).context("sitemap generate")?;
        }
        folio::cli::Command::Sitemap {
            command: folio::cli::SitemapCommand::Robots(args),
        } => {
            folio::sitemap::robots(args, &config).context("sitemap robots")?;
        }
    }

    Ok(())
}
