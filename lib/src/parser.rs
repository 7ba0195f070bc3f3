//! Line classifier for the tag table file format.
//!
//! ```text
//! # name prefixes
//! tag=<PR>   # trailing comment allowed on directives only
//! della : dela, dlla
//! van :
//! ```

use std::fmt::{Display, Formatter};

const DIRECTIVE: &str = "tag=";

#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank line or `#` comment.
    Skip,
    Directive(&'a str),
    Entry {
        canonical: &'a str,
        variants: Vec<&'a str>,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
    NoSeparator,
    EmptyCanonical,
    EmptyTag,
    InvalidTag(String),
}

impl LineError {
    pub fn is_directive(&self) -> bool {
        matches!(self, LineError::EmptyTag | LineError::InvalidTag(_))
    }
}

impl Display for LineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LineError::NoSeparator => f.write_str("missing ':' separator"),
            LineError::EmptyCanonical => f.write_str("empty canonical token"),
            LineError::EmptyTag => f.write_str("empty tag value"),
            LineError::InvalidTag(value) => write!(f, "invalid tag value {value:?}"),
        }
    }
}

pub fn parse_line(text: &str) -> Result<Line<'_>, LineError> {
    let line = text.trim();

    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Skip);
    }

    if let Some(value) = line.strip_prefix(DIRECTIVE) {
        return parse_directive(value).map(Line::Directive);
    }

    let (canonical, variants) = line.split_once(':').ok_or(LineError::NoSeparator)?;
    let canonical = canonical.trim();

    if canonical.is_empty() {
        return Err(LineError::EmptyCanonical);
    }

    let variants = variants
        .split(',')
        .map(str::trim)
        .filter(|variant| !variant.is_empty())
        .collect();

    Ok(Line::Entry {
        canonical,
        variants,
    })
}

fn parse_directive(value: &str) -> Result<&str, LineError> {
    let value = match value.split_once('#') {
        Some((value, _comment)) => value,
        None => value,
    }
    .trim();

    let tag = match value.strip_prefix('<') {
        Some(inner) => inner
            .strip_suffix('>')
            .ok_or_else(|| LineError::InvalidTag(value.to_string()))?
            .trim(),
        None => value,
    };

    if tag.is_empty() {
        return Err(LineError::EmptyTag);
    }

    if tag.chars().any(|ch| ch.is_whitespace() || ch == '<' || ch == '>') {
        return Err(LineError::InvalidTag(tag.to_string()));
    }

    Ok(tag)
}
