//! Genius client
//!
//! Search and artist catalogs come from the authenticated REST API
//! (https://docs.genius.com); lyrics are scraped from the public song pages.

pub mod api;
pub mod models;
pub mod scrape;

pub use api::GeniusClient;
