use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spmalign_tokenizers::{SentencePieceTokenizer, TokenOutput, TokenizerOptions};

use crate::error::SpmAlignError;

/// Tokens returned by the tokenizer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    /// Whitespace tokens annotated with their number of sub-tokens.
    Words,

    /// Sub-tokens with offsets into the original text.
    SubTokens,
}

impl From<Output> for TokenOutput {
    fn from(output: Output) -> Self {
        match output {
            Output::Words => TokenOutput::Words,
            Output::SubTokens => TokenOutput::SubTokens,
        }
    }
}

fn default_case_sensitive() -> bool {
    true
}

fn default_intent_split_symbol() -> String {
    "_".to_string()
}

fn default_output() -> Output {
    Output::Words
}

/// Sentencepiece tokenizer configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Tokenizer {
    /// Sentencepiece model file.
    ///
    /// Words are not split when no model is given.
    #[serde(default)]
    pub model_file: Option<String>,

    /// Lowercase text before tokenization when `false`.
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    /// Split intents on `intent_split_symbol`.
    #[serde(default)]
    pub intent_tokenization_flag: bool,

    /// Symbol on which intents are split.
    #[serde(default = "default_intent_split_symbol")]
    pub intent_split_symbol: String,

    #[serde(default = "default_output")]
    pub output: Output,
}

impl Tokenizer {
    /// Get the tokenizer options.
    pub fn options(&self) -> Result<TokenizerOptions, SpmAlignError> {
        let mut chars = self.intent_split_symbol.chars();
        let intent_split_symbol = match (chars.next(), chars.next()) {
            (Some(symbol), None) => symbol,
            _ => {
                return Err(SpmAlignError::IllegalConfigurationError(format!(
                    "intent_split_symbol must be a single character, was: `{}`",
                    self.intent_split_symbol
                )))
            }
        };

        Ok(TokenizerOptions {
            case_sensitive: self.case_sensitive,
            intent_tokenization_flag: self.intent_tokenization_flag,
            intent_split_symbol,
            output: self.output.into(),
        })
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            model_file: None,
            case_sensitive: default_case_sensitive(),
            intent_tokenization_flag: false,
            intent_split_symbol: default_intent_split_symbol(),
            output: default_output(),
        }
    }
}

/// Tokenization configuration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Configuration of the tokenizer.
    #[serde(default)]
    pub tokenizer: Tokenizer,
}

impl Config {
    /// Make configuration paths relative to the configuration file.
    pub fn relativize_paths<P>(&mut self, config_path: P) -> Result<(), SpmAlignError>
    where
        P: AsRef<Path>,
    {
        let config_path = config_path.as_ref();

        if let Some(ref mut model_file) = self.tokenizer.model_file {
            let relativized = relativize_path(config_path, model_file)?;
            log::debug!("Resolved model file `{}` to `{}`", model_file, relativized);
            *model_file = relativized;
        }

        Ok(())
    }

    /// Construct the sentencepiece tokenizer.
    ///
    /// Fails if the configured model file does not exist.
    pub fn tokenizer(&self) -> Result<SentencePieceTokenizer, SpmAlignError> {
        let options = self.tokenizer.options()?;
        Ok(SentencePieceTokenizer::open(
            self.tokenizer.model_file.as_ref(),
            options,
        )?)
    }
}

pub trait TomlRead
where
    Self: Sized,
{
    fn from_toml_read(read: impl Read) -> Result<Self, SpmAlignError>;
}

impl TomlRead for Config {
    fn from_toml_read(mut read: impl Read) -> Result<Self, SpmAlignError> {
        let mut data = String::new();
        read.read_to_string(&mut data)?;
        let config: Config = toml::from_str(&data)?;
        Ok(config)
    }
}

fn relativize_path(config_path: &Path, filename: &str) -> Result<String, SpmAlignError> {
    if filename.is_empty() {
        return Ok(filename.to_owned());
    }

    let path = Path::new(&filename);

    // Don't touch absolute paths.
    if path.is_absolute() {
        return Ok(filename.to_owned());
    }

    let abs_config_path = config_path.canonicalize()?;
    Ok(abs_config_path
        .parent()
        .ok_or_else(|| {
            SpmAlignError::RelativizePathError(format!(
                "Cannot get parent path of the configuration file: {}",
                abs_config_path.to_string_lossy()
            ))
        })?
        .join(path)
        .to_str()
        .ok_or_else(|| {
            SpmAlignError::RelativizePathError(format!(
                "Cannot convert parent path to string: {}",
                abs_config_path.to_string_lossy()
            ))
        })?
        .to_owned())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use spmalign_tokenizers::{TokenOutput, TokenizerError, TokenizerOptions};

    use crate::config::{Config, Output, Tokenizer, TomlRead};
    use crate::error::SpmAlignError;

    #[test]
    fn config() {
        let config =
            Config::from_toml_read(include_bytes!("../testdata/spmalign.conf").as_ref()).unwrap();

        assert_eq!(
            config,
            Config {
                tokenizer: Tokenizer {
                    model_file: Some("spm.model".to_string()),
                    case_sensitive: false,
                    intent_tokenization_flag: true,
                    intent_split_symbol: "+".to_string(),
                    output: Output::SubTokens,
                }
            }
        );

        assert_eq!(
            config.tokenizer.options().unwrap(),
            TokenizerOptions {
                case_sensitive: false,
                intent_tokenization_flag: true,
                intent_split_symbol: '+',
                output: TokenOutput::SubTokens,
            }
        );
    }

    #[test]
    fn config_defaults() {
        let config =
            Config::from_toml_read(include_bytes!("../testdata/defaults.conf").as_ref()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.tokenizer.options().unwrap(),
            TokenizerOptions::default()
        );

        let config = Config::from_toml_read("".as_bytes()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::from_toml_read("[tokenizer]\nlowercase = true\n".as_bytes());
        assert!(matches!(
            result,
            Err(SpmAlignError::TomlDeserializationError(_))
        ));
    }

    #[test]
    fn intent_split_symbol_must_be_single_char() {
        for symbol in &["", "__"] {
            let tokenizer = Tokenizer {
                intent_split_symbol: symbol.to_string(),
                ..Tokenizer::default()
            };
            assert!(matches!(
                tokenizer.options(),
                Err(SpmAlignError::IllegalConfigurationError(_))
            ));
        }
    }

    #[test]
    fn paths_are_relative_to_config() {
        let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/spmalign.conf");
        let mut config =
            Config::from_toml_read(include_bytes!("../testdata/spmalign.conf").as_ref()).unwrap();
        config.relativize_paths(&config_path).unwrap();

        let expected = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .canonicalize()
            .unwrap()
            .join("spm.model");
        assert_eq!(
            config.tokenizer.model_file.as_deref(),
            expected.to_str()
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/spmalign.conf");
        let mut config = Config {
            tokenizer: Tokenizer {
                model_file: Some("/models/spm.model".to_string()),
                ..Tokenizer::default()
            },
        };
        config.relativize_paths(&config_path).unwrap();

        assert_eq!(
            config.tokenizer.model_file.as_deref(),
            Some("/models/spm.model")
        );
    }

    #[test]
    fn missing_model_file_fails_construction() {
        let config = Config {
            tokenizer: Tokenizer {
                model_file: Some("/nonexistent/spm.model".to_string()),
                ..Tokenizer::default()
            },
        };

        match config.tokenizer() {
            Err(SpmAlignError::TokenizerError(TokenizerError::ModelNotFound { model_path })) => {
                assert_eq!(model_path, "/nonexistent/spm.model")
            }
            Err(err) => panic!("Unexpected error: {}", err),
            Ok(_) => panic!("Tokenizer construction should fail"),
        }
    }
}
