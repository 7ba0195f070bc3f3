use std::sync::Arc;

use crate::{normalizer::TextNormalizer, table::TagTable, token::Tokens};

/// Replaces every token found in the table with its canonical form.
///
/// Works token by token; multi-word keys are left to the tagger.
#[derive(Clone, Debug)]
pub struct CanonicalReplacer {
    table: Arc<TagTable>,
}

impl CanonicalReplacer {
    pub fn new(table: Arc<TagTable>) -> Self {
        Self { table }
    }
}

impl TextNormalizer for CanonicalReplacer {
    fn normalize(&mut self, tokens: &mut Tokens) {
        tokens.iter_mut().for_each(|token| {
            if let Some(resolution) = self.table.lookup(token.as_str()) {
                if resolution.canonical != token.as_str() {
                    *token.inner_mut() = resolution.canonical.to_string();
                }
            }
        });
    }
}
