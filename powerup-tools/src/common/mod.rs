//! Ready-made web tools.
//!
//! Network-backed tools for common agent tasks: searching the web and
//! fetching webpage content as readable text.

pub mod google_search;
pub mod web_page;

pub use google_search::{GoogleSearchConfig, GoogleSearchTool};
pub use web_page::{WebPageConfig, WebPageTool};
