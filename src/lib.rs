#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod formats;
pub mod lead;
pub mod logging;
pub mod output;
pub mod seo;
pub mod sitemap;
