//! Glob pattern compilation
//!
//! Parses a textual pattern into an ordered sequence of segment matchers,
//! rejecting syntactically illegal patterns before any filesystem access.

use crate::error::{GlobError, Result};
use regex::Regex;

/// Characters that are never legal in a pattern. Bracket expressions and
/// brace expansion are deliberately unsupported.
const ILLEGAL_CHARS: &[char] = &['[', ']', '{', '}', '(', ')'];

/// A single compiled `/`-delimited pattern segment
#[derive(Debug, Clone)]
pub enum Segment {
    /// Exact name match, no wildcards
    Literal(String),
    /// `name*`: cheap prefix check, no other wildcard in the segment
    Prefix(String),
    /// `*name`: cheap suffix check, no other wildcard in the segment
    Suffix(String),
    /// Any other `*`/`?` combination, compiled to an anchored regex
    Regex(Regex),
    /// The `**` marker: matches zero or more whole directory levels
    Recursive,
}

impl Segment {
    /// Check whether this segment is a plain literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Check whether this segment is the recursive `**` marker
    pub fn is_recursive(&self) -> bool {
        matches!(self, Self::Recursive)
    }
}

/// An immutable compiled glob pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern string, validating it first.
    ///
    /// Fails with [`GlobError::InvalidPattern`] when the pattern is empty,
    /// equals `.`, is absolute, contains a `.`/`..` component, contains an
    /// empty component, uses bracket/brace syntax, or mixes `**` with other
    /// characters in one segment.
    pub fn compile(text: &str) -> Result<Self> {
        validate(text)?;

        let segments = text
            .split('/')
            .map(compile_segment)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match e {
                GlobError::InvalidPattern { reason, .. } => {
                    GlobError::invalid_pattern(text, reason)
                }
                other => other,
            })?;

        Ok(Self {
            text: text.to_string(),
            segments,
        })
    }

    /// The original pattern text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The compiled segment sequence
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check whether the segment suffix starting at `idx` is wildcard-free
    pub fn is_literal_from(&self, idx: usize) -> bool {
        self.segments[idx..].iter().all(Segment::is_literal)
    }
}

/// Reject illegal pattern text before segment compilation
fn validate(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(GlobError::invalid_pattern(text, "empty pattern"));
    }
    if text == "." {
        return Err(GlobError::invalid_pattern(text, "pattern '.' not allowed"));
    }
    if text.starts_with('/') {
        return Err(GlobError::invalid_pattern(
            text,
            "absolute path not allowed",
        ));
    }
    if let Some(c) = text.chars().find(|c| ILLEGAL_CHARS.contains(c)) {
        return Err(GlobError::invalid_pattern(
            text,
            format!("illegal character '{}'", c),
        ));
    }
    for segment in text.split('/') {
        match segment {
            "" => {
                return Err(GlobError::invalid_pattern(text, "empty segment not allowed"));
            }
            "." | ".." => {
                return Err(GlobError::invalid_pattern(
                    text,
                    format!("segment '{}' not allowed", segment),
                ));
            }
            _ => {}
        }
        if segment != "**" && segment.contains("**") {
            return Err(GlobError::invalid_pattern(
                text,
                "recursive wildcard must be its own segment",
            ));
        }
    }
    Ok(())
}

/// Classify and compile a single validated segment
fn compile_segment(segment: &str) -> Result<Segment> {
    if segment == "**" {
        return Ok(Segment::Recursive);
    }

    let stars = segment.matches('*').count();
    let questions = segment.matches('?').count();

    if stars == 0 && questions == 0 {
        return Ok(Segment::Literal(segment.to_string()));
    }

    // A single * at either end needs no regex machinery.
    if questions == 0 && stars == 1 {
        if let Some(rest) = segment.strip_prefix('*') {
            return Ok(Segment::Suffix(rest.to_string()));
        }
        if let Some(rest) = segment.strip_suffix('*') {
            return Ok(Segment::Prefix(rest.to_string()));
        }
    }

    let regex = segment_to_regex(segment)?;
    Ok(Segment::Regex(regex))
}

/// Translate a wildcard segment to an anchored regex: `*` becomes `.*`,
/// `?` becomes `.`, everything else is escaped literally.
fn segment_to_regex(segment: &str) -> Result<Regex> {
    let mut source = String::with_capacity(segment.len() + 8);
    source.push('^');
    for c in segment.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            _ => source.push_str(&regex::escape(&c.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source)
        .map_err(|e| GlobError::invalid_pattern(segment, format!("unmatchable segment: {}", e)))
}
