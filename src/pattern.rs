//! Route pattern compilation and matching
//!
//! A [`Pattern`] is the immutable compiled form of one route path template,
//! e.g. `/user/:userId/:name`. Compilation trims exactly one leading and one
//! trailing slash, then splits on `/`. The split is stored verbatim: multiple
//! slashes are not collapsed, so consecutive slashes yield empty literal
//! segments. Any segment starting with `:` is a parameter segment for the
//! entire remainder after the colon; parameter names are not validated.
//!
//! Matching is a strict arity match - a candidate with more or fewer segments
//! than the template never matches, there are no prefix or catch-all
//! semantics. Callers are responsible for normalizing trailing slashes
//! consistently; a mismatch there is surprising but intended behavior.

use crate::params::{percent_decode, RouteParams};

/// A single segment in a compiled route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text that must match exactly (case-sensitive)
    Literal(String),
    /// Parameter that captures the candidate segment under this name
    Param(String),
}

impl Segment {
    /// Parse a segment from its textual form
    ///
    /// Examples:
    /// - "users" -> Literal("users")
    /// - ":id" -> Param("id")
    /// - "" -> Literal("")
    pub fn parse(s: &str) -> Self {
        if let Some(name) = s.strip_prefix(':') {
            Segment::Param(name.to_string())
        } else {
            Segment::Literal(s.to_string())
        }
    }
}

/// Compiled route path template
///
/// # Example
///
/// ```
/// use hash_navigator::Pattern;
///
/// let pattern = Pattern::compile("/users/:id");
///
/// let params = pattern.matches("users/42").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
///
/// assert!(pattern.matches("users").is_none());
/// assert!(pattern.matches("users/42/posts").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The original template as registered
    raw: String,
    /// Segments derived once at construction, immutable thereafter
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a path template into its segment form
    pub fn compile(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = split_segments(&raw).map(Segment::parse).collect();
        Self { raw, segments }
    }

    /// The template string this pattern was compiled from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The compiled segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a concrete path against this pattern
    ///
    /// The candidate is trimmed and split the same way the template was.
    /// Returns the extracted parameters on success (possibly empty when the
    /// pattern has no parameter segments), `None` on any mismatch.
    pub fn matches(&self, candidate: &str) -> Option<RouteParams> {
        let candidate_segments: Vec<&str> = split_segments(candidate).collect();

        // Strict arity: extra or missing segments never match.
        if candidate_segments.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();

        for (segment, value) in self.segments.iter().zip(candidate_segments) {
            match segment {
                Segment::Literal(expected) => {
                    if expected.as_str() != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    // An empty candidate segment is rejected: "//" never
                    // satisfies "/:id/".
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), percent_decode(value));
                }
            }
        }

        Some(params)
    }
}

/// Trim exactly one leading and one trailing slash (idempotent per side),
/// then split the remainder on `/`.
fn split_segments(path: &str) -> std::str::Split<'_, char> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/')
}
