//! Iterators over data sets.

use spmalign_tokenizers::{Message, Tokenize};

use crate::error::SpmAlignError;

mod jsonl;
pub use jsonl::JsonLinesDataSet;

mod plaintext;
pub use plaintext::PlainTextDataSet;

/// A data set consisting of messages.
///
/// A `DataSet` provides an iterator over the messages in a data set.
pub trait DataSet<'a> {
    type Iter: Iterator<Item = Result<Message, SpmAlignError>>;

    /// Get an iterator over the messages in a data set.
    ///
    /// The attributes of each message are tokenized with the given
    /// `tokenizer`.
    fn messages(self, tokenizer: &'a dyn Tokenize) -> Result<Self::Iter, SpmAlignError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use lazy_static::lazy_static;
    use spmalign_tokenizers::{
        Attribute, Message, SentencePieceTokenizer, Tokenize, TokenizerOptions,
    };

    use crate::dataset::DataSet;
    use crate::error::SpmAlignError;

    lazy_static! {
        pub static ref CORRECT_TEXT_TOKENS: Vec<Vec<(&'static str, usize, usize)>> = vec![
            vec![("book", 0, 4), ("a", 5, 6), ("table", 7, 12)],
            vec![("hello", 0, 5), ("there", 6, 11)],
            vec![("don't", 0, 5), ("go", 6, 8)],
        ];
    }

    pub fn dataset_to_tokens<'a, D, I>(
        dataset: D,
        tokenizer: &'a dyn Tokenize,
    ) -> Result<Vec<Vec<(String, usize, usize)>>, SpmAlignError>
    where
        D: DataSet<'a, Iter = I>,
        I: Iterator<Item = Result<Message, SpmAlignError>>,
    {
        dataset
            .messages(tokenizer)?
            .map(|message| {
                message.map(|message| {
                    message
                        .tokens(Attribute::Text)
                        .unwrap_or(&[])
                        .iter()
                        .map(|token| (token.text().to_string(), token.start(), token.end()))
                        .collect::<Vec<_>>()
                })
            })
            .collect()
    }

    pub fn unsegmented_tokenizer() -> SentencePieceTokenizer {
        SentencePieceTokenizer::open(None::<&str>, TokenizerOptions::default()).unwrap()
    }

    pub fn correct_tokens() -> Vec<Vec<(String, usize, usize)>> {
        CORRECT_TEXT_TOKENS
            .iter()
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|&(text, start, end)| (text.to_string(), start, end))
                    .collect()
            })
            .collect()
    }
}
