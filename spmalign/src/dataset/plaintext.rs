use std::io::{BufRead, Lines};

use spmalign_tokenizers::{Message, Tokenize};

use crate::dataset::DataSet;
use crate::error::SpmAlignError;

/// A plain-text data set.
///
/// Every non-empty line is a message without an intent.
pub struct PlainTextDataSet<R>(R);

impl<R> PlainTextDataSet<R> {
    /// Construct a plain-text dataset.
    pub fn new(read: R) -> Self {
        Self(read)
    }
}

impl<'a, R> DataSet<'a> for PlainTextDataSet<R>
where
    R: BufRead,
{
    type Iter = PlainTextIter<'a, R>;

    fn messages(self, tokenizer: &'a dyn Tokenize) -> Result<Self::Iter, SpmAlignError> {
        Ok(PlainTextIter {
            lines: self.0.lines(),
            tokenizer,
        })
    }
}

pub struct PlainTextIter<'a, R> {
    lines: Lines<R>,
    tokenizer: &'a dyn Tokenize,
}

impl<'a, R> Iterator for PlainTextIter<'a, R>
where
    R: BufRead,
{
    type Item = Result<Message, SpmAlignError>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in &mut self.lines {
            // Bubble up read errors.
            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(SpmAlignError::IoError(err))),
            };

            let line_trimmed = line.trim();

            // Skip empty lines
            if line_trimmed.is_empty() {
                continue;
            }

            let mut message = Message::new(line_trimmed);
            return Some(
                self.tokenizer
                    .process(&mut message)
                    .map(|_| message)
                    .map_err(Into::into),
            );
        }

        None
    }
}
