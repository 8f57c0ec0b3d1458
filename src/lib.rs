// Public modules for testing
pub mod config;
pub mod contact;
pub mod content;
pub mod highlight;
pub mod location;
pub mod pages;
pub mod repos;
pub mod search;
pub mod server;
pub mod templates;

// Re-export main types
pub use search::{ContentIndex, SearchRecord, SearchResult, SourceCategory};
