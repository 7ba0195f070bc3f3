//! Greedy longest-match tagging of name strings.
//!
//! Starting from the first unprocessed word, the tagger tries the longest
//! window the table can hold and shrinks it from the right until a key
//! matches. Words no key covers are classified on their own.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use tracing::trace;

use crate::{
    table::TagTable,
    token::{Token, Tokens},
    tokenizer::Tokenizer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordTag {
    /// Tag taken from the table.
    Table(String),
    /// Single letter.
    Initial,
    Number,
    /// Mix of letters and digits.
    AlphaNumeric,
    Hyphen,
    Comma,
    Bar,
    Unknown,
}

impl WordTag {
    pub fn as_str(&self) -> &str {
        match self {
            WordTag::Table(tag) => tag,
            WordTag::Initial => "II",
            WordTag::Number => "NU",
            WordTag::AlphaNumeric => "AN",
            WordTag::Hyphen => "HY",
            WordTag::Comma => "CO",
            WordTag::Bar => "VB",
            WordTag::Unknown => "UN",
        }
    }

    fn classify(word: &str) -> Self {
        let mut chars = word.chars();

        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_alphabetic() => return WordTag::Initial,
            (Some('-'), None) => return WordTag::Hyphen,
            (Some(','), None) => return WordTag::Comma,
            (Some('|'), None) => return WordTag::Bar,
            (None, _) => return WordTag::Unknown,
            _ => {}
        }

        if word.chars().all(char::is_numeric) {
            WordTag::Number
        } else if word.chars().all(char::is_alphanumeric) && !word.chars().all(char::is_alphabetic)
        {
            WordTag::AlphaNumeric
        } else {
            WordTag::Unknown
        }
    }
}

impl Display for WordTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WordTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: WordTag,
}

impl TaggedWord {
    pub fn new<W: Into<String>>(word: W, tag: WordTag) -> Self {
        Self {
            word: word.into(),
            tag,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Tagger<'t> {
    table: &'t TagTable,
    tokenizer: Tokenizer,
}

impl<'t> Tagger<'t> {
    pub fn new(table: &'t TagTable) -> Self {
        Self {
            table,
            tokenizer: Tokenizer::default(),
        }
    }

    pub fn with_tokenizer(table: &'t TagTable, tokenizer: Tokenizer) -> Self {
        Self { table, tokenizer }
    }

    pub fn tag_str(&mut self, text: &str) -> Vec<TaggedWord> {
        let tokens = self.tokenizer.tokenize(text);
        self.tag(&tokens)
    }

    pub fn tag(&self, tokens: &Tokens) -> Vec<TaggedWord> {
        let words = tokens.as_slice();
        let longest = self.table.max_key_length().max(1);
        let mut tagged = Vec::with_capacity(words.len());
        let mut position = 0;

        while position < words.len() {
            let window = longest.min(words.len() - position);

            let found = (1..=window).rev().find_map(|length| {
                self.table
                    .lookup_phrase(&words[position..position + length])
                    .map(|resolution| (length, resolution))
            });

            match found {
                Some((length, resolution)) => {
                    tagged.push(TaggedWord::new(
                        resolution.canonical,
                        WordTag::Table(resolution.tag.to_string()),
                    ));
                    position += length;
                }
                None => {
                    let word = self.table.case_policy().apply(words[position].as_str());
                    let tag = WordTag::classify(&word);

                    // A leading hyphen carries no information.
                    if !(tag == WordTag::Hyphen && tagged.is_empty()) {
                        tagged.push(TaggedWord::new(word, tag));
                    }
                    position += 1;
                }
            }
        }

        trace!(
            input = %words.iter().map(Token::as_str).collect::<Vec<_>>().join(" "),
            output = ?tagged,
            "Tagged words"
        );

        tagged
    }
}

#[cfg(test)]
mod tests {
    use super::{TaggedWord, Tagger, WordTag};
    use crate::{
        table::{Resolution, TagTable},
        tokenizer::{Separator, Tokenizer, Whitespace},
        tokens,
    };

    fn table() -> TagTable {
        "tag=<PR>\nde la : dela\nde : da\nvan der : vd\nvan :\nmc : mac\n"
            .parse()
            .unwrap()
    }

    fn pr(word: &str) -> TaggedWord {
        TaggedWord::new(word, WordTag::Table("PR".to_string()))
    }

    #[test]
    fn test_tagger_longest_match() {
        let table = table();
        let tagger = Tagger::new(&table);

        assert_eq!(
            tagger.tag(&tokens!["de", "la", "cruz"]),
            vec![pr("de la"), TaggedWord::new("cruz", WordTag::Unknown)]
        );
    }

    #[test]
    fn test_tagger_shrinks_window() {
        let table = table();
        let tagger = Tagger::new(&table);

        assert_eq!(
            tagger.tag(&tokens!["de", "souza"]),
            vec![pr("de"), TaggedWord::new("souza", WordTag::Unknown)]
        );
        assert_eq!(
            tagger.tag(&tokens!["van", "berg"]),
            vec![pr("van"), TaggedWord::new("berg", WordTag::Unknown)]
        );
    }

    #[test]
    fn test_tagger_variant_resolves_to_canonical() {
        let table = table();
        let tagger = Tagger::new(&table);

        assert_eq!(
            tagger.tag(&tokens!["MAC", "donald"]),
            vec![pr("mc"), TaggedWord::new("donald", WordTag::Unknown)]
        );
        assert_eq!(tagger.tag(&tokens!["vd", "berg"])[0], pr("van der"));
    }

    #[test]
    fn test_tagger_fallback_classes() {
        let table = table();
        let mut tagger = Tagger::with_tokenizer(&table, Tokenizer::Separator(Separator::new()));

        let tags = tagger
            .tag_str("j 42 r2d2 smith-jones, x | ?")
            .into_iter()
            .map(|tagged| tagged.tag.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            tags,
            ["II", "NU", "AN", "UN", "HY", "UN", "CO", "II", "VB", "UN"]
        );
    }

    #[test]
    fn test_tagger_matches_hyphenated_key() {
        let table: TagTable = "tag=<PR>\nben-ali : benali\n".parse().unwrap();
        let mut tagger = Tagger::new(&table);

        assert_eq!(table.lookup("ben-ali"), Some(Resolution::new("ben-ali", "PR")));
        assert_eq!(
            tagger.tag_str("ben-ali smith"),
            vec![pr("ben-ali"), TaggedWord::new("smith", WordTag::Unknown)]
        );
        assert_eq!(tagger.tag_str("Benali")[0], pr("ben-ali"));
    }

    #[test]
    fn test_tagger_default_keeps_punctuation_attached() {
        let table = table();
        let mut tagger = Tagger::new(&table);

        assert_eq!(
            tagger.tag_str("smith-jones, van"),
            vec![
                TaggedWord::new("smith-jones,", WordTag::Unknown),
                pr("van"),
            ]
        );
    }

    #[test]
    fn test_tagger_drops_leading_hyphen() {
        let table = table();
        let mut tagger = Tagger::new(&table);

        assert_eq!(
            tagger.tag_str("- van"),
            vec![pr("van")]
        );
    }

    #[test]
    fn test_tagger_lowercases_unknown_words() {
        let table = table();
        let mut tagger = Tagger::with_tokenizer(&table, Tokenizer::Whitespace(Whitespace::new()));

        assert_eq!(
            tagger.tag_str("Van DER Berg"),
            vec![pr("van der"), TaggedWord::new("berg", WordTag::Unknown)]
        );
    }

    #[test]
    fn test_tagger_empty_input() {
        let table = table();
        let mut tagger = Tagger::new(&table);
        assert!(tagger.tag_str("   ").is_empty());
    }

    #[test]
    fn test_tagger_empty_table() {
        let table: TagTable = "".parse().unwrap();
        let mut tagger = Tagger::new(&table);

        assert_eq!(
            tagger.tag_str("van 7"),
            vec![
                TaggedWord::new("van", WordTag::Unknown),
                TaggedWord::new("7", WordTag::Number),
            ]
        );
    }
}
