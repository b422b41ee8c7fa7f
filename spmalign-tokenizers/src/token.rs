use std::collections::BTreeMap;
use std::fmt;

/// A token with character offsets into the text it was taken from.
///
/// Offsets are counted in `char`s rather than bytes, so that they
/// correspond to the entity offsets used in training data. The
/// invariant `end - start == text.chars().count()` holds for every
/// token constructed through [`Token::new`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    text: String,
    start: usize,
    end: usize,
    number_of_sub_tokens: Option<usize>,
}

impl Token {
    /// Construct a token that starts at character offset `start`.
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let end = start + text.chars().count();

        Token {
            text,
            start,
            end,
            number_of_sub_tokens: None,
        }
    }

    /// Character offset of the first character of the token.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Character offset one past the last character of the token.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The number of sub-tokens that the (parent) word was split into.
    ///
    /// Returns `None` if the token was not annotated by a subword
    /// tokenizer.
    pub fn number_of_sub_tokens(&self) -> Option<usize> {
        self.number_of_sub_tokens
    }

    pub fn set_number_of_sub_tokens(&mut self, n: usize) {
        self.number_of_sub_tokens = Some(n);
    }
}

/// Message attributes that can be tokenized.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Attribute {
    Text,
    Intent,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Text, Attribute::Intent];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Text => "text",
            Attribute::Intent => "intent",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A training or inference example.
///
/// Tokenizers store their output per attribute on the message, so that
/// later pipeline stages can pick up the tokens of the attribute that
/// they featurize.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    text: String,
    intent: Option<String>,
    tokens: BTreeMap<Attribute, Vec<Token>>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Message {
            text: text.into(),
            intent: None,
            tokens: BTreeMap::new(),
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Get the value of an attribute, if present.
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Text => Some(&self.text),
            Attribute::Intent => self.intent.as_deref(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    /// Tokens of an attribute, if the attribute was tokenized.
    pub fn tokens(&self, attribute: Attribute) -> Option<&[Token]> {
        self.tokens.get(&attribute).map(Vec::as_slice)
    }

    pub fn set_tokens(&mut self, attribute: Attribute, tokens: Vec<Token>) {
        self.tokens.insert(attribute, tokens);
    }

    /// Iterate over the tokenized attributes and their tokens.
    pub fn all_tokens(&self) -> impl Iterator<Item = (Attribute, &[Token])> {
        self.tokens
            .iter()
            .map(|(&attribute, tokens)| (attribute, tokens.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Attribute, Message, Token};

    #[test]
    fn token_end_counts_chars() {
        let token = Token::new("Köln", 3);
        assert_eq!(token.start(), 3);
        assert_eq!(token.end(), 7);
        assert_eq!(token.number_of_sub_tokens(), None);
    }

    #[test]
    fn message_attributes() {
        let message = Message::new("book a table").with_intent("restaurant_book");
        assert_eq!(message.get(Attribute::Text), Some("book a table"));
        assert_eq!(message.get(Attribute::Intent), Some("restaurant_book"));
        assert_eq!(Message::new("hi").get(Attribute::Intent), None);
    }

    #[test]
    fn attribute_display_uses_attribute_name() {
        assert_eq!(Attribute::Text.to_string(), "text");
        assert_eq!(format!("{}", Attribute::Intent), "intent");
    }

    #[test]
    fn message_stores_tokens_per_attribute() {
        let mut message = Message::new("hi there");
        assert!(message.tokens(Attribute::Text).is_none());

        message.set_tokens(
            Attribute::Text,
            vec![Token::new("hi", 0), Token::new("there", 3)],
        );

        let tokens = message.tokens(Attribute::Text).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].end(), 8);
        assert_eq!(message.all_tokens().count(), 1);
    }
}
