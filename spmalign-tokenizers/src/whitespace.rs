use std::borrow::Cow;

use crate::Token;

/// Tokenizer that splits text on Unicode whitespace.
///
/// This tokenizer produces the words that subword tokenizers split
/// further. Offsets are character offsets into the (possibly
/// lowercased) text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WhitespaceTokenizer {
    case_sensitive: bool,
}

impl WhitespaceTokenizer {
    /// Construct a whitespace tokenizer.
    ///
    /// If `case_sensitive` is `false`, the text is lowercased before
    /// it is split. Offsets then refer to the lowercased text, which
    /// can be longer than the original text.
    pub fn new(case_sensitive: bool) -> Self {
        WhitespaceTokenizer { case_sensitive }
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let text = if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        };

        whitespace_tokens(&text)
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        WhitespaceTokenizer::new(true)
    }
}

fn whitespace_tokens(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    // Character and byte offsets of the current word.
    let mut word_start = None;

    for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((start_char, start_byte)) = word_start.take() {
                tokens.push(Token::new(&text[start_byte..byte_idx], start_char));
            }
        } else if word_start.is_none() {
            word_start = Some((char_idx, byte_idx));
        }
    }

    if let Some((start_char, start_byte)) = word_start {
        tokens.push(Token::new(&text[start_byte..], start_char));
    }

    tokens
}

/// Split an intent label into tokens.
///
/// When `split` is `false`, the intent is a single token. Otherwise,
/// the intent is split on `split_symbol`, e.g. `greet_and_ask` becomes
/// `greet`, `and`, and `ask`. Empty fragments are discarded.
pub fn split_intent(intent: &str, split: bool, split_symbol: char) -> Vec<Token> {
    if !split {
        return if intent.is_empty() {
            Vec::new()
        } else {
            vec![Token::new(intent, 0)]
        };
    }

    let mut tokens = Vec::new();
    let mut offset = 0;
    for fragment in intent.split(split_symbol) {
        let fragment_len = fragment.chars().count();
        if !fragment.is_empty() {
            tokens.push(Token::new(fragment, offset));
        }

        // Skip over the split symbol.
        offset += fragment_len + 1;
    }

    tokens
}
