mod separator;
mod whitespace;

pub use {separator::Separator, whitespace::Whitespace};

use crate::token::Tokens;

#[derive(Clone, Debug)]
pub enum Tokenizer {
    Separator(Separator),
    Whitespace(Whitespace),
}

impl Tokenizer {
    pub fn tokenize(&mut self, text: &str) -> Tokens {
        match self {
            Tokenizer::Separator(tokenizer) => tokenizer.tokenize(text),
            Tokenizer::Whitespace(tokenizer) => tokenizer.tokenize(text),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::Whitespace(Whitespace::new())
    }
}

pub trait TextTokenizer {
    fn tokenize<T: AsRef<str>>(&mut self, text: T) -> Tokens;
}
