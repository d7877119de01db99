/// Core structs of crate
pub mod timeline_core;
pub use timeline_core as core;

pub mod error;
pub use error::Error;

/// Request signing for the platform API
pub mod oauth;

/// HTTP client and wire records of the platform API
pub mod twitter_api;

pub mod fetcher;

/// Row-per-post table with derived columns
pub mod table;

/// Summary statistics and chart series
pub mod aggregate;

pub mod lexicon;
pub mod sentiment;

/// Percentage breakdown by sentiment label
pub mod breakdown;

pub use reqwest::Url;
