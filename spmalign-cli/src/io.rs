use std::fs::File;

use anyhow::{Context, Result};
use spmalign::config::{Config, TomlRead};
use spmalign_tokenizers::SentencePieceTokenizer;

pub fn load_config(config_path: &str) -> Result<Config> {
    let config_file = File::open(config_path)
        .context(format!("Cannot open configuration file '{}'", &config_path))?;
    let mut config = Config::from_toml_read(config_file)
        .context(format!("Cannot parse configuration file: {}", config_path))?;
    config.relativize_paths(config_path).context(format!(
        "Cannot relativize paths in configuration file: {}",
        config_path
    ))?;

    Ok(config)
}

pub fn load_tokenizer(config: &Config) -> Result<SentencePieceTokenizer> {
    config
        .tokenizer()
        .context("Cannot construct sentencepiece tokenizer")
}
