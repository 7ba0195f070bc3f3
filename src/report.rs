use std::fmt::Write;

use nametag::{Resolution, TagTable, TaggedWord};
use serde::Serialize;

use crate::{batch::TaggedLine, error::Error};

#[derive(Debug, Serialize)]
pub struct LookupReport<'a> {
    pub token: &'a str,
    pub found: Option<Resolution<'a>>,
}

impl LookupReport<'_> {
    pub fn render(&self) -> String {
        match &self.found {
            Some(resolution) => format!(
                "{}\t{}\t{}",
                self.token, resolution.canonical, resolution.tag
            ),
            None => format!("{}\tnot found", self.token),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagReport<'a> {
    pub input: &'a str,
    pub tagged: &'a [TaggedWord],
}

impl TagReport<'_> {
    pub fn render(&self) -> String {
        format!("{}\t{}", self.input, render_tagged(self.tagged))
    }
}

#[derive(Debug, Serialize)]
pub struct TableSummary<'a> {
    pub sources: &'a [String],
    pub entries: usize,
    pub tokens: usize,
    pub tags: &'a [String],
    pub max_key_length: usize,
}

impl<'a> TableSummary<'a> {
    pub fn new(table: &'a TagTable) -> Self {
        Self {
            sources: table.sources(),
            entries: table.entries().len(),
            tokens: table.len(),
            tags: table.tags(),
            max_key_length: table.max_key_length(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for source in self.sources {
            let _ = writeln!(out, "source:         {source}");
        }
        let _ = writeln!(out, "entries:        {}", self.entries);
        let _ = writeln!(out, "tokens:         {}", self.tokens);
        let _ = writeln!(out, "tags:           {}", self.tags.join(", "));
        let _ = write!(out, "max key length: {}", self.max_key_length);

        out
    }
}

pub fn render_line(line: &TaggedLine) -> String {
    format!(
        "{}\t{}\t{}",
        line.line,
        line.normalized,
        render_tagged(&line.tagged)
    )
}

/// Renders tagged words as `word/TAG` pairs; multi-word values are joined
/// with underscores so the output stays whitespace separated.
pub fn render_tagged(tagged: &[TaggedWord]) -> String {
    tagged
        .iter()
        .map(|tagged| format!("{}/{}", tagged.word.replace(' ', "_"), tagged.tag))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string(value)?)
}
