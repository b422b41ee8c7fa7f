use std::path::Path;

use sentencepiece::SentencePieceProcessor;

use crate::{TokenizerError, SENTENCEPIECE_MARKER};

/// Subword models that split text into string pieces.
pub trait EncodePieces: Send + Sync {
    /// Split `text` into pieces.
    ///
    /// Pieces may contain the word boundary marker of the model.
    fn encode_pieces(&self, text: &str) -> Result<Vec<String>, TokenizerError>;
}

impl EncodePieces for SentencePieceProcessor {
    fn encode_pieces(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        Ok(self
            .encode(text)?
            .into_iter()
            .map(|piece| piece.piece)
            .collect())
    }
}

/// Model without a segmentation vocabulary.
///
/// This model is used when no sentencepiece model is configured. It
/// does not split words, each whitespace-separated chunk becomes a
/// single piece that is prefixed by the word boundary marker, like
/// sentencepiece does for word-initial pieces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UnsegmentedModel;

impl EncodePieces for UnsegmentedModel {
    fn encode_pieces(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        Ok(text
            .split_whitespace()
            .map(|chunk| format!("{}{}", SENTENCEPIECE_MARKER, chunk))
            .collect())
    }
}

/// Load a subword model.
///
/// If `model_file` is `None`, `UnsegmentedModel` is used. A model file
/// that does not exist is reported immediately, before any text is
/// tokenized.
pub fn load_model<P>(model_file: Option<P>) -> Result<Box<dyn EncodePieces>, TokenizerError>
where
    P: AsRef<Path>,
{
    let model_file = match model_file {
        Some(model_file) => model_file,
        None => {
            log::info!("No sentencepiece model configured, words will not be split");
            return Ok(Box::new(UnsegmentedModel));
        }
    };

    let model_path = model_file.as_ref();
    if !model_path.exists() {
        return Err(TokenizerError::model_not_found(
            model_path.to_string_lossy(),
        ));
    }

    let spp = SentencePieceProcessor::open(model_path)?;
    log::info!("Loaded sentencepiece model: {}", model_path.display());

    Ok(Box::new(spp))
}
