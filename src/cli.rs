use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML config file (site defaults and lead scoring lists).
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<String>,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score inbound contact submissions.
    Lead {
        #[command(subcommand)]
        command: LeadCommand,
    },
    /// Analyze page title, meta description and keywords.
    Seo {
        #[command(subcommand)]
        command: SeoCommand,
    },
    /// Generate sitemap.xml and robots.txt.
    Sitemap {
        #[command(subcommand)]
        command: SitemapCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum LeadCommand {
    Score(LeadScoreArgs),
    Batch(LeadBatchArgs),
}

#[derive(Debug, Args)]
pub struct LeadScoreArgs {
    /// Project category selected on the contact form.
    #[arg(long)]
    pub project_type: Option<String>,

    /// Budget bracket label (e.g. "$10,000 - $25,000").
    #[arg(long)]
    pub budget: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, Args)]
pub struct LeadBatchArgs {
    /// Input path to a JSONL file of contact submissions.
    #[arg(long)]
    pub input: String,

    /// Output path for scored submissions (JSONL, `-` for stdout).
    #[arg(long)]
    pub out: String,

    /// Overwrite the output if it already exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Subcommand)]
pub enum SeoCommand {
    Analyze(SeoAnalyzeArgs),
    Batch(SeoBatchArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}

#[derive(Debug, Args)]
pub struct SeoAnalyzeArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    /// Meta description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Comma separated focus keywords.
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,
}

#[derive(Debug, Args)]
pub struct SeoBatchArgs {
    /// Input path to a YAML or JSON list of pages.
    #[arg(long)]
    pub input: String,

    /// Output path for reports (JSONL). Defaults to stdout.
    #[arg(long, default_value = crate::output::STDOUT)]
    pub out: String,

    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Subcommand)]
pub enum SitemapCommand {
    Generate(SitemapGenerateArgs),
    Robots(RobotsArgs),
}

#[derive(Debug, Args)]
pub struct SitemapGenerateArgs {
    /// Input path to the sitemap source (YAML, or JSON by `.json` extension).
    #[arg(long)]
    pub source: String,

    /// Output path for the sitemap (`-` for stdout).
    #[arg(long, default_value = crate::sitemap::DEFAULT_SITEMAP_FILE)]
    pub out: String,

    /// Site base URL (default: from config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct RobotsArgs {
    /// Output path for robots.txt (`-` for stdout).
    #[arg(long, default_value = crate::sitemap::DEFAULT_ROBOTS_FILE)]
    pub out: String,

    /// Site base URL (default: from config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    pub base_url: Option<String>,

    /// Disallowed path; repeatable (default: from config).
    #[arg(long = "disallow")]
    pub disallow: Vec<String>,

    /// Omit the `Allow: /` line.
    #[arg(long, default_value_t = false)]
    pub no_allow: bool,

    #[arg(long)]
    pub crawl_delay: Option<u32>,

    /// Sitemap URL (default: `<base-url>/sitemap.xml`).
    #[arg(long)]
    pub sitemap_url: Option<String>,

    #[arg(long, default_value_t = false)]
    pub force: bool,
}
