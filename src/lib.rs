//! Social Graph - follow graph and timeline service
//!
//! A cache-aside repository for the follow graph in front of SQLite, and a
//! timeline aggregator fanning out from the graph to a content store.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod graph;
pub mod models;
pub mod observe;
pub mod timeline;

pub use api::AppState;
pub use config::Config;
