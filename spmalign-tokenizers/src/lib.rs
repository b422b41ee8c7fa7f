//! Subword tokenizers that align pieces with the original text.

mod aligner;
pub use aligner::{SubwordAligner, SENTENCEPIECE_MARKER};

mod error;
pub use error::TokenizerError;

pub mod model;
pub use model::{EncodePieces, UnsegmentedModel};

mod token;
pub use token::{Attribute, Message, Token};

mod tokenizer;
pub use tokenizer::{SentencePieceTokenizer, TokenOutput, Tokenize, TokenizerOptions};

mod whitespace;
pub use whitespace::{split_intent, WhitespaceTokenizer};
