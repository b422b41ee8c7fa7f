use std::io::{BufRead, Lines};

use serde::Deserialize;
use spmalign_tokenizers::{Message, Tokenize};

use crate::dataset::DataSet;
use crate::error::SpmAlignError;

/// A message in a JSON lines data set.
///
/// Fields other than `text` and `intent` (such as entities) are
/// ignored.
#[derive(Debug, Deserialize)]
struct InputRecord {
    text: String,

    #[serde(default)]
    intent: Option<String>,
}

impl From<InputRecord> for Message {
    fn from(record: InputRecord) -> Self {
        let message = Message::new(record.text);
        match record.intent {
            Some(intent) => message.with_intent(intent),
            None => message,
        }
    }
}

/// A JSON lines data set.
///
/// Each non-empty line is a JSON object with a `text` field and an
/// optional `intent` field.
pub struct JsonLinesDataSet<R>(R);

impl<R> JsonLinesDataSet<R> {
    /// Construct a JSON lines dataset.
    pub fn new(read: R) -> Self {
        JsonLinesDataSet(read)
    }
}

impl<'a, R> DataSet<'a> for JsonLinesDataSet<R>
where
    R: BufRead,
{
    type Iter = JsonLinesIter<'a, R>;

    fn messages(self, tokenizer: &'a dyn Tokenize) -> Result<Self::Iter, SpmAlignError> {
        Ok(JsonLinesIter {
            line_number: 0,
            lines: self.0.lines(),
            tokenizer,
        })
    }
}

pub struct JsonLinesIter<'a, R> {
    line_number: usize,
    lines: Lines<R>,
    tokenizer: &'a dyn Tokenize,
}

impl<'a, R> JsonLinesIter<'a, R> {
    fn parse_message(&self, line: &str) -> Result<Message, SpmAlignError> {
        let record: InputRecord = serde_json::from_str(line).map_err(|err| {
            SpmAlignError::JSonSerialization(
                format!("Cannot parse message on line {}", self.line_number),
                err,
            )
        })?;

        let mut message = Message::from(record);
        self.tokenizer.process(&mut message)?;

        Ok(message)
    }
}

impl<'a, R> Iterator for JsonLinesIter<'a, R>
where
    R: BufRead,
{
    type Item = Result<Message, SpmAlignError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.lines.next() {
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(SpmAlignError::IoError(err))),
            };

            if line.trim().is_empty() {
                log::debug!("Skipping empty line {}", self.line_number);
                continue;
            }

            return Some(self.parse_message(&line));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use spmalign_tokenizers::{Attribute, Token};

    use crate::dataset::tests::{correct_tokens, dataset_to_tokens, unsegmented_tokenizer};
    use crate::dataset::{DataSet, JsonLinesDataSet};
    use crate::error::SpmAlignError;

    const MESSAGES: &str = r#"{"text": "book a table", "intent": "restaurant_book"}
{"text": "hello there", "intent": "greet", "entities": []}

{"text": "don't go"}"#;

    #[test]
    fn jsonl_dataset_works() {
        let tokenizer = unsegmented_tokenizer();
        let dataset = JsonLinesDataSet::new(Cursor::new(MESSAGES));

        let tokens = dataset_to_tokens(dataset, &tokenizer).unwrap();
        assert_eq!(tokens, correct_tokens());
    }

    #[test]
    fn jsonl_dataset_tokenizes_intents() {
        let tokenizer = unsegmented_tokenizer();
        let messages = JsonLinesDataSet::new(Cursor::new(MESSAGES))
            .messages(&tokenizer)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(messages[0].intent(), Some("restaurant_book"));
        assert_eq!(
            messages[0].tokens(Attribute::Intent).unwrap(),
            &[Token::new("restaurant_book", 0)]
        );
        assert!(messages[2].tokens(Attribute::Intent).is_none());
    }

    #[test]
    fn invalid_json_reports_line() {
        let tokenizer = unsegmented_tokenizer();
        let mut messages = JsonLinesDataSet::new(Cursor::new("{\"text\": \"hi\"}\n\n{\"txt\": 1}"))
            .messages(&tokenizer)
            .unwrap();

        assert!(messages.next().unwrap().is_ok());
        match messages.next().unwrap() {
            Err(SpmAlignError::JSonSerialization(context, _)) => {
                assert_eq!(context, "Cannot parse message on line 3")
            }
            other => panic!("Unexpected result: {:?}", other.map(|m| m.text().to_string())),
        }
    }
}
