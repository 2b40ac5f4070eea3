//! Federated route resolution
//!
//! Handles:
//! - Normalizing route patterns (`:id` and `[id]` conventions)
//! - Segment-wise path matching with parameter extraction
//! - Searching every remote's pages map for the first matching route

mod matcher;
mod resolver;

pub use matcher::{match_path, normalize_route_path, PathMatch};
pub use resolver::{MatchedPage, PageResolver};
