//! Route pattern matching with dynamic segments

use std::collections::HashMap;

/// A successful pattern match with the extracted parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatch {
    /// Parameter name to extracted path segment value
    pub params: HashMap<String, String>,
}

/// Rewrite colon-style parameters to the bracket convention
///
/// Remotes author route tables in either `/users/:id` or `/users/[id]`
/// style; the matcher only understands brackets, so every `:name` token
/// (the run of non-slash characters after a `:`) becomes `[name]`. A bare
/// `:` with nothing after it becomes a zero-length parameter name.
pub fn normalize_route_path(route: &str) -> String {
    let mut normalized = String::with_capacity(route.len() + 4);
    let mut rest = route;

    while let Some(idx) = rest.find(':') {
        normalized.push_str(&rest[..idx]);
        let token = &rest[idx + 1..];
        let end = token.find('/').unwrap_or(token.len());
        normalized.push('[');
        normalized.push_str(&token[..end]);
        normalized.push(']');
        rest = &token[end..];
    }

    normalized.push_str(rest);
    normalized
}

/// Test a concrete path against a route pattern
///
/// Both strings are split on `/` and walked pairwise: a `[name]` segment
/// binds the path segment literally, anything else must match byte for
/// byte. Segment counts must be equal; there are no prefix matches and no
/// catch-all segments at this level.
pub fn match_path(route: &str, path: &str) -> Option<PathMatch> {
    let normalized = normalize_route_path(route);
    let route_segments: Vec<&str> = normalized.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if route_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (route_segment, path_segment) in route_segments.iter().zip(path_segments.iter()) {
        if let Some(name) = route_segment
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
        {
            params.insert(name.to_string(), (*path_segment).to_string());
        } else if route_segment != path_segment {
            return None;
        }
    }

    Some(PathMatch { params })
}
