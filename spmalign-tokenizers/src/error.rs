use sentencepiece::SentencePieceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("SentencePiece model `{model_path}` not found, please check the configuration")]
    ModelNotFound { model_path: String },

    #[error(transparent)]
    SentencePiece(#[from] SentencePieceError),
}

impl TokenizerError {
    pub fn model_not_found(model_path: impl Into<String>) -> Self {
        TokenizerError::ModelNotFound {
            model_path: model_path.into(),
        }
    }
}
