use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{normalizer::TextNormalizer, token::Tokens};

/// How tokens are matched against a table.
///
/// The same policy is applied to keys when a table is loaded and to input
/// tokens when it is queried, so the two sides can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePolicy {
    /// Unicode lowercasing on both sides.
    #[default]
    Lowercase,
    /// Tokens match exactly as written.
    Sensitive,
}

impl CasePolicy {
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            CasePolicy::Sensitive => Cow::Borrowed(text),
            CasePolicy::Lowercase if text.chars().any(folds) => Cow::Owned(text.to_lowercase()),
            CasePolicy::Lowercase => Cow::Borrowed(text),
        }
    }
}

/// True for any character with a distinct lowercase form, titlecase
/// letters such as `ǅ` included.
fn folds(ch: char) -> bool {
    ch.to_lowercase().ne(std::iter::once(ch))
}

#[derive(Clone, Debug, Default)]
pub struct Lowercase;

impl Lowercase {
    pub fn new() -> Self {
        Self
    }
}

impl TextNormalizer for Lowercase {
    fn normalize(&mut self, tokens: &mut Tokens) {
        tokens.iter_mut().for_each(|token| {
            if let Cow::Owned(lowered) = CasePolicy::Lowercase.apply(token.as_str()) {
                *token.inner_mut() = lowered;
            }
        })
    }
}
