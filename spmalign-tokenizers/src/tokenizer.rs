use std::path::Path;

use sentencepiece::SentencePieceProcessor;

use crate::model::{load_model, EncodePieces};
use crate::whitespace::{split_intent, WhitespaceTokenizer};
use crate::{Attribute, Message, SubwordAligner, Token, TokenizerError};

/// Trait for message tokenizers.
pub trait Tokenize: Send + Sync {
    /// Tokenize an attribute of a message.
    ///
    /// Returns an empty vector if the message does not have the
    /// attribute.
    fn tokenize(&self, message: &Message, attribute: Attribute)
        -> Result<Vec<Token>, TokenizerError>;

    /// Tokenize all attributes of a message and store the tokens.
    fn process(&self, message: &mut Message) -> Result<(), TokenizerError> {
        for &attribute in &Attribute::ALL {
            if message.get(attribute).is_some() {
                let tokens = self.tokenize(message, attribute)?;
                message.set_tokens(attribute, tokens);
            }
        }

        Ok(())
    }
}

/// The tokens that a subword tokenizer returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenOutput {
    /// Whitespace tokens, annotated with their number of sub-tokens.
    Words,

    /// Sub-tokens, aligned with the original text.
    ///
    /// Each sub-token is annotated with the number of sub-tokens of
    /// the word that it was split from.
    SubTokens,
}

impl Default for TokenOutput {
    fn default() -> Self {
        TokenOutput::Words
    }
}

/// Options of the sentencepiece tokenizer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenizerOptions {
    /// Lowercase text before tokenization when `false`.
    pub case_sensitive: bool,

    /// Split intents into multiple tokens.
    pub intent_tokenization_flag: bool,

    /// The symbol on which intents are split.
    pub intent_split_symbol: char,

    pub output: TokenOutput,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            case_sensitive: true,
            intent_tokenization_flag: false,
            intent_split_symbol: '_',
            output: TokenOutput::default(),
        }
    }
}

/// Tokenizer that splits words with a sentencepiece model.
///
/// Sentencepiece adds a marker in front of (some) pieces and splits
/// words into pieces. To ensure that entity offsets match token
/// offsets, the text is first split into whitespace tokens. Then each
/// token is split into pieces. The pieces are either recorded as a
/// sub-token count on the whitespace token, or returned as sub-tokens
/// with offsets into the original text.
pub struct SentencePieceTokenizer {
    aligner: SubwordAligner,
    model: Box<dyn EncodePieces>,
    options: TokenizerOptions,
    whitespace: WhitespaceTokenizer,
}

impl SentencePieceTokenizer {
    pub fn new(model: Box<dyn EncodePieces>, options: TokenizerOptions) -> Self {
        SentencePieceTokenizer {
            aligner: SubwordAligner::default(),
            model,
            whitespace: WhitespaceTokenizer::new(options.case_sensitive),
            options,
        }
    }

    /// Open a tokenizer.
    ///
    /// If `model_file` is `None`, words are not split.
    pub fn open<P>(model_file: Option<P>, options: TokenizerOptions) -> Result<Self, TokenizerError>
    where
        P: AsRef<Path>,
    {
        Ok(Self::new(load_model(model_file)?, options))
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Split a word into aligned sub-tokens.
    pub fn split_word(&self, word: &Token) -> Result<Vec<Token>, TokenizerError> {
        let pieces = self.model.encode_pieces(word.text())?;
        let sub_tokens = self.aligner.split(word, &pieces);

        if sub_tokens.is_empty() {
            log::debug!(
                "Word `{}` at offset {} has no pieces after cleaning",
                word.text(),
                word.start()
            );
        }

        Ok(sub_tokens)
    }

    fn tokenize_text(&self, text: &str) -> Result<Vec<Token>, TokenizerError> {
        let words = self.whitespace.tokenize(text);

        // An average of two pieces per word is common for
        // conversational text.
        let capacity = match self.options.output {
            TokenOutput::Words => words.len(),
            TokenOutput::SubTokens => words.len() * 2,
        };
        let mut tokens = Vec::with_capacity(capacity);

        for mut word in words {
            let sub_tokens = self.split_word(&word)?;
            let n_sub_tokens = sub_tokens.len();

            match self.options.output {
                TokenOutput::Words => {
                    word.set_number_of_sub_tokens(n_sub_tokens);
                    tokens.push(word);
                }
                TokenOutput::SubTokens => {
                    tokens.extend(sub_tokens.into_iter().map(|mut sub_token| {
                        sub_token.set_number_of_sub_tokens(n_sub_tokens);
                        sub_token
                    }))
                }
            }
        }

        Ok(tokens)
    }
}

impl From<SentencePieceProcessor> for SentencePieceTokenizer {
    fn from(spp: SentencePieceProcessor) -> Self {
        SentencePieceTokenizer::new(Box::new(spp), TokenizerOptions::default())
    }
}

impl Tokenize for SentencePieceTokenizer {
    fn tokenize(
        &self,
        message: &Message,
        attribute: Attribute,
    ) -> Result<Vec<Token>, TokenizerError> {
        let value = match message.get(attribute) {
            Some(value) => value,
            None => return Ok(Vec::new()),
        };

        match attribute {
            Attribute::Text => self.tokenize_text(value),
            Attribute::Intent => Ok(split_intent(
                value,
                self.options.intent_tokenization_flag,
                self.options.intent_split_symbol,
            )),
        }
    }
}
