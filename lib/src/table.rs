extern crate hashbrown;

use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use hashbrown::HashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::Error,
    normalizer::case::CasePolicy,
    parser::{parse_line, Line},
};

const MEMORY_SOURCE: &str = "<memory>";

/// One `canonical : variants` line of a table file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    canonical: String,
    tag: String,
    variants: Vec<String>,
    source: usize,
    line: usize,
}

impl Entry {
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Result of a successful lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution<'t> {
    pub canonical: &'t str,
    pub tag: &'t str,
}

impl<'t> Resolution<'t> {
    pub fn new(canonical: &'t str, tag: &'t str) -> Self {
        Self { canonical, tag }
    }
}

/// Immutable token table mapping every canonical token and every variant to
/// its `(canonical, tag)` pair.
///
/// Built once through [`TableBuilder`] and then shared by reference (or
/// `Arc`) between any number of readers.
#[derive(Clone, Debug, PartialEq)]
pub struct TagTable {
    policy: CasePolicy,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    sources: Vec<String>,
    tags: Vec<String>,
    max_key_length: usize,
}

impl TagTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(TableBuilder::new().load_path(path)?.build())
    }

    pub fn load_all<I, P>(paths: I, policy: CasePolicy) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .try_fold(TableBuilder::with_policy(policy), |builder, path| {
                builder.load_path(path)
            })
            .map(TableBuilder::build)
    }

    pub fn lookup(&self, token: &str) -> Option<Resolution<'_>> {
        let key = self.policy.apply(token.trim());

        if is_collapsed(&key) {
            self.resolve(&key)
        } else {
            self.resolve(&collapse(&key))
        }
    }

    /// Looks up a multi-word key given as separate words.
    pub fn lookup_phrase<S: AsRef<str>>(&self, words: &[S]) -> Option<Resolution<'_>> {
        match words {
            [] => None,
            [word] => self.lookup(word.as_ref()),
            _ => {
                let phrase = words
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.lookup(&phrase)
            }
        }
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    /// Number of registered tokens, canonical forms and variants together.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Entries in load order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Longest key in words.
    #[inline]
    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    /// Distinct tags in the order they were first seen.
    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[inline]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    #[inline]
    pub fn case_policy(&self) -> CasePolicy {
        self.policy
    }

    pub fn source_of(&self, entry: &Entry) -> &str {
        &self.sources[entry.source]
    }

    fn resolve(&self, key: &str) -> Option<Resolution<'_>> {
        self.index.get(key).map(|&slot| {
            let entry = &self.entries[slot];
            Resolution::new(&entry.canonical, &entry.tag)
        })
    }
}

impl FromStr for TagTable {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(TableBuilder::new().load_str(MEMORY_SOURCE, text)?.build())
    }
}

/// Accumulates one or more table sources.
///
/// Every `load_*` method consumes the builder, so a failed load drops all
/// state gathered so far.
#[derive(Debug, Default)]
pub struct TableBuilder {
    policy: CasePolicy,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    sources: Vec<String>,
    tags: Vec<String>,
    max_key_length: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CasePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn load_path<P: AsRef<Path>>(self, path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| Error::io(path, &error))?;
        let name = path.display().to_string();

        self.load_reader(&name, BufReader::new(file))
            .map_err(|error| match error {
                Error::Io { kind, .. } => Error::Io {
                    path: path.to_path_buf(),
                    kind,
                },
                other => other,
            })
    }

    pub fn load_reader<R: BufRead>(mut self, name: &str, reader: R) -> Result<Self, Error> {
        let mut source = self.open_source(name);

        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|error| Error::io(name, &error))?;
            source.line = number + 1;
            self.feed(&mut source, &line)?;
        }

        self.close_source(source);
        Ok(self)
    }

    pub fn load_str(mut self, name: &str, text: &str) -> Result<Self, Error> {
        let mut source = self.open_source(name);

        for (number, line) in text.lines().enumerate() {
            source.line = number + 1;
            self.feed(&mut source, line)?;
        }

        self.close_source(source);
        Ok(self)
    }

    pub fn build(self) -> TagTable {
        info!(
            sources = ?self.sources,
            entries = self.entries.len(),
            tokens = self.index.len(),
            max_key_length = self.max_key_length,
            "Loaded tag table"
        );

        TagTable {
            policy: self.policy,
            entries: self.entries,
            index: self.index,
            sources: self.sources,
            tags: self.tags,
            max_key_length: self.max_key_length,
        }
    }

    fn open_source(&mut self, name: &str) -> SourceState {
        self.sources.push(name.to_string());

        SourceState {
            index: self.sources.len() - 1,
            line: 0,
            tag: None,
            entries: 0,
        }
    }

    fn close_source(&self, source: SourceState) {
        debug!(
            source = %self.sources[source.index],
            entries = source.entries,
            lines = source.line,
            "Read tag table source"
        );
    }

    fn feed(&mut self, source: &mut SourceState, text: &str) -> Result<(), Error> {
        let text = match source.line {
            1 => text.trim_start_matches('\u{feff}'),
            _ => text,
        };

        let line = parse_line(text).map_err(|error| {
            let source_name = self.sources[source.index].clone();
            let reason = error.to_string();

            if error.is_directive() {
                Error::MalformedDirective {
                    source_name,
                    line: source.line,
                    reason,
                }
            } else {
                Error::MalformedEntry {
                    source_name,
                    line: source.line,
                    reason,
                }
            }
        })?;

        match line {
            Line::Skip => Ok(()),
            Line::Directive(tag) => {
                if !self.tags.iter().any(|known| known == tag) {
                    self.tags.push(tag.to_string());
                }
                source.tag = Some(tag.to_string());
                Ok(())
            }
            Line::Entry {
                canonical,
                variants,
            } => {
                let tag = source.tag.clone().ok_or_else(|| Error::MissingTag {
                    source_name: self.sources[source.index].clone(),
                    line: source.line,
                })?;

                self.insert(source, tag, canonical, &variants)?;
                source.entries += 1;
                Ok(())
            }
        }
    }

    fn insert(
        &mut self,
        source: &SourceState,
        tag: String,
        canonical: &str,
        variants: &[&str],
    ) -> Result<(), Error> {
        let slot = self.entries.len();
        let canonical = normalize_key(self.policy, canonical);
        let variants = variants
            .iter()
            .map(|variant| normalize_key(self.policy, variant))
            .collect::<Vec<_>>();

        let mut keys = Vec::with_capacity(variants.len() + 1);
        keys.push(canonical.as_str());
        keys.extend(variants.iter().map(String::as_str));

        for (position, &key) in keys.iter().enumerate() {
            let repeated_in_line = keys[..position].contains(&key);

            if repeated_in_line || self.index.contains_key(key) {
                let (first_source, first_line) = match self.index.get(key) {
                    Some(&existing) if !repeated_in_line => {
                        let entry = &self.entries[existing];
                        (self.sources[entry.source].clone(), entry.line)
                    }
                    _ => (self.sources[source.index].clone(), source.line),
                };

                return Err(Error::DuplicateToken {
                    token: key.to_string(),
                    source_name: self.sources[source.index].clone(),
                    line: source.line,
                    first_source,
                    first_line,
                });
            }
        }

        for key in &keys {
            self.max_key_length = self.max_key_length.max(key.split(' ').count());
            self.index.insert(key.to_string(), slot);
        }

        self.entries.push(Entry {
            canonical,
            tag,
            variants,
            source: source.index,
            line: source.line,
        });

        Ok(())
    }
}

struct SourceState {
    index: usize,
    line: usize,
    tag: Option<String>,
    entries: usize,
}

fn normalize_key(policy: CasePolicy, text: &str) -> String {
    match policy.apply(text) {
        Cow::Borrowed(text) if is_collapsed(text) => text.to_string(),
        cased => collapse(&cased),
    }
}

/// True when words are separated by exactly one ASCII space.
fn is_collapsed(text: &str) -> bool {
    !text.is_empty()
        && !text.split(' ').any(str::is_empty)
        && !text.chars().any(|ch| ch.is_whitespace() && ch != ' ')
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
