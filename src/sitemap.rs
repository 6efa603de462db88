use std::path::Path;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};

use crate::cli::{RobotsArgs, SitemapGenerateArgs};
use crate::config::{DEFAULT_BASE_URL, FolioConfig, normalize_base_url};
use crate::formats::{ChangeFreq, SitemapSource};

pub const DEFAULT_SITEMAP_FILE: &str = "sitemap.xml";
pub const DEFAULT_ROBOTS_FILE: &str = "robots.txt";

const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const PROJECT_PRIORITY: f64 = 0.8;
const BLOG_POST_PRIORITY: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotsOptions {
    pub allow_all: bool,
    pub disallowed_paths: Vec<String>,
    pub crawl_delay: Option<u32>,
    /// Defaults to `<base_url>/sitemap.xml`.
    pub sitemap_url: Option<String>,
}

impl Default for RobotsOptions {
    fn default() -> Self {
        Self {
            allow_all: true,
            disallowed_paths: vec!["/admin".to_owned(), "/api".to_owned()],
            crawl_delay: None,
            sitemap_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapGenerator {
    base_url: String,
}

impl Default for SitemapGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SitemapGenerator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URLs in output order: static pages, projects, then published posts.
    /// Static pages are stamped with `today`.
    pub fn entries(&self, source: &SitemapSource, today: NaiveDate) -> Vec<SitemapEntry> {
        let static_pages = source.static_pages.iter().map(|page| SitemapEntry {
            loc: format!("{}{}", self.base_url, page.path),
            lastmod: Some(today),
            changefreq: Some(page.changefreq),
            priority: Some(page.priority),
        });

        let projects = source.projects.iter().map(|project| SitemapEntry {
            loc: format!(
                "{}/projects/{}",
                self.base_url,
                project.slug.as_deref().unwrap_or(&project.id)
            ),
            lastmod: Some(project.updated_at),
            changefreq: Some(ChangeFreq::Monthly),
            priority: Some(PROJECT_PRIORITY),
        });

        let blog_posts = source
            .blog_posts
            .iter()
            .filter(|post| post.published != Some(false))
            .map(|post| SitemapEntry {
                loc: format!(
                    "{}/blog/{}",
                    self.base_url,
                    post.slug.as_deref().unwrap_or(&post.id)
                ),
                lastmod: Some(post.updated_at),
                changefreq: Some(ChangeFreq::Monthly),
                priority: Some(BLOG_POST_PRIORITY),
            });

        static_pages.chain(projects).chain(blog_posts).collect()
    }

    pub fn generate_sitemap(&self, source: &SitemapSource) -> String {
        self.generate_sitemap_on(source, Utc::now().date_naive())
    }

    pub fn generate_sitemap_on(&self, source: &SitemapSource, today: NaiveDate) -> String {
        render_sitemap(&self.entries(source, today))
    }

    pub fn default_sitemap_url(&self) -> String {
        format!("{}/{DEFAULT_SITEMAP_FILE}", self.base_url)
    }

    pub fn generate_robots_txt(&self, options: &RobotsOptions) -> String {
        let mut lines = vec!["User-agent: *".to_owned()];
        if options.allow_all {
            lines.push("Allow: /".to_owned());
        }
        for path in &options.disallowed_paths {
            lines.push(format!("Disallow: {path}"));
        }
        if let Some(delay) = options.crawl_delay {
            lines.push(format!("Crawl-delay: {delay}"));
        }
        lines.push(String::new());
        let sitemap_url = options
            .sitemap_url
            .clone()
            .unwrap_or_else(|| self.default_sitemap_url());
        lines.push(format!("Sitemap: {sitemap_url}"));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_XMLNS}\">\n"));
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            let lastmod = lastmod.format("%Y-%m-%d").to_string();
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", xml_escape(&lastmod)));
        }
        if let Some(changefreq) = entry.changefreq {
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                xml_escape(changefreq.as_str())
            ));
        }
        if let Some(priority) = entry.priority {
            xml.push_str(&format!(
                "    <priority>{}</priority>\n",
                format_priority(priority)
            ));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// One decimal digit, ties rounded away from zero (0.25 -> "0.3").
pub fn format_priority(priority: f64) -> String {
    let tenths = (priority * 10.0).round() / 10.0;
    format!("{tenths:.1}")
}

pub fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Inverse of [`xml_escape`] for the five predefined entities.
pub fn xml_unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn resolve_base_url(flag: Option<&str>, config: &FolioConfig) -> anyhow::Result<String> {
    match flag {
        Some(raw) => normalize_base_url(raw),
        None => Ok(config.site.base_url.clone()),
    }
}

pub fn generate(args: SitemapGenerateArgs, config: &FolioConfig) -> anyhow::Result<()> {
    let source: SitemapSource = crate::formats::read_structured(Path::new(&args.source))
        .context("read sitemap source")?;
    let base_url = resolve_base_url(args.base_url.as_deref(), config)?;
    let generator = SitemapGenerator::new(&base_url);

    let entries = generator.entries(&source, Utc::now().date_naive());
    for entry in &entries {
        if let Some(priority) = entry.priority
            && !(0.0..=1.0).contains(&priority)
        {
            tracing::warn!(loc = %entry.loc, priority, "sitemap priority outside 0.0..=1.0");
        }
    }
    tracing::info!(
        base_url = %generator.base_url(),
        urls = entries.len(),
        "generated sitemap"
    );

    let xml = render_sitemap(&entries);
    crate::output::write_document("sitemap", &args.out, &xml, args.force)
}

pub fn robots(args: RobotsArgs, config: &FolioConfig) -> anyhow::Result<()> {
    let base_url = resolve_base_url(args.base_url.as_deref(), config)?;
    let generator = SitemapGenerator::new(&base_url);

    let disallowed_paths = if args.disallow.is_empty() {
        config.site.disallowed_paths.clone()
    } else {
        args.disallow
    };
    let options = RobotsOptions {
        allow_all: !args.no_allow,
        disallowed_paths,
        crawl_delay: args.crawl_delay,
        sitemap_url: args.sitemap_url,
    };
    tracing::debug!(?options, "robots options");

    let text = generator.generate_robots_txt(&options);
    crate::output::write_document("robots.txt", &args.out, &text, args.force)
}
