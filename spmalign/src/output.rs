//! Serialization of tokenized messages.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use spmalign_tokenizers::{Message, Token};

use crate::error::SpmAlignError;

#[derive(Debug, Serialize)]
pub struct TokenRecord<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_sub_tokens: Option<usize>,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        TokenRecord {
            text: token.text(),
            start: token.start(),
            end: token.end(),
            number_of_sub_tokens: token.number_of_sub_tokens(),
        }
    }
}

/// Serializable view of a tokenized message.
#[derive(Debug, Serialize)]
pub struct MessageRecord<'a> {
    pub text: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<&'a str>,

    /// Tokens per attribute.
    pub tokens: BTreeMap<&'static str, Vec<TokenRecord<'a>>>,
}

impl<'a> From<&'a Message> for MessageRecord<'a> {
    fn from(message: &'a Message) -> Self {
        MessageRecord {
            text: message.text(),
            intent: message.intent(),
            tokens: message
                .all_tokens()
                .map(|(attribute, tokens)| {
                    (
                        attribute.as_str(),
                        tokens.iter().map(TokenRecord::from).collect::<Vec<_>>(),
                    )
                })
                .collect(),
        }
    }
}

/// Writer that writes one JSON object per message.
pub struct JsonLinesWriter<W> {
    write: W,
}

impl<W> JsonLinesWriter<W>
where
    W: Write,
{
    pub fn new(write: W) -> Self {
        JsonLinesWriter { write }
    }

    pub fn write_message(&mut self, message: &Message) -> Result<(), SpmAlignError> {
        serde_json::to_writer(&mut self.write, &MessageRecord::from(message)).map_err(|err| {
            SpmAlignError::JSonSerialization(
                format!("Cannot serialize message `{}`", message.text()),
                err,
            )
        })?;
        writeln!(self.write)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), SpmAlignError> {
        Ok(self.write.flush()?)
    }

    pub fn into_inner(self) -> W {
        self.write
    }
}
