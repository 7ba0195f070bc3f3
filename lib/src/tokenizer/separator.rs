use crate::{
    token::{Token, Tokens},
    tokenizer::TextTokenizer,
};

/// Characters that are kept as tokens of their own.
const SEPARATORS: [char; 3] = [',', '-', '|'];

/// Whitespace tokenizer that also splits off `,`, `-` and `|` so the tagger
/// sees them as separate elements.
#[derive(Clone, Debug, Default)]
pub struct Separator;

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextTokenizer for Separator {
    fn tokenize<T: AsRef<str>>(&mut self, text: T) -> Tokens {
        let mut tokens = Tokens::new();

        for word in text.as_ref().split_whitespace() {
            let mut start = 0;

            for (index, ch) in word.char_indices() {
                if SEPARATORS.contains(&ch) {
                    if start < index {
                        tokens.push(Token::from(&word[start..index]));
                    }
                    tokens.push(Token::from(&word[index..index + ch.len_utf8()]));
                    start = index + ch.len_utf8();
                }
            }

            if start < word.len() {
                tokens.push(Token::from(&word[start..]));
            }
        }

        tokens
    }
}
