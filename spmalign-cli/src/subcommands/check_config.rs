use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use spmalign::output::JsonLinesWriter;
use spmalign_tokenizers::{Message, TokenOutput, Tokenize};

use crate::io::{load_config, load_tokenizer};
use crate::traits::SpmAlignApp;

const CONFIG: &str = "CONFIG";
const SAMPLE: &str = "SAMPLE";

pub struct CheckConfigApp {
    config: String,
    sample: Option<String>,
}

impl SpmAlignApp for CheckConfigApp {
    fn app() -> Command {
        Command::new("check-config")
            .arg_required_else_help(true)
            .about("Check a tokenizer configuration and its model")
            .arg(
                Arg::new(CONFIG)
                    .help("Tokenizer configuration file")
                    .index(1)
                    .required(true),
            )
            .arg(
                Arg::new(SAMPLE)
                    .long("sample")
                    .value_name("TEXT")
                    .num_args(1)
                    .help("Tokenize a sample text with the configured tokenizer"),
            )
    }

    fn parse(matches: &ArgMatches) -> Result<Self> {
        let config = matches.get_one::<String>(CONFIG).unwrap().into();
        let sample = matches.get_one::<String>(SAMPLE).map(ToOwned::to_owned);

        Ok(CheckConfigApp { config, sample })
    }

    fn run(&self) -> Result<()> {
        let config = load_config(&self.config)?;
        let tokenizer = load_tokenizer(&config)?;

        let options = tokenizer.options();
        log::info!(
            "Tokenizer: model={}, case_sensitive={}, split intents={} (on `{}`), output={}",
            config
                .tokenizer
                .model_file
                .as_deref()
                .unwrap_or("<unsegmented>"),
            options.case_sensitive,
            options.intent_tokenization_flag,
            options.intent_split_symbol,
            match options.output {
                TokenOutput::Words => "words",
                TokenOutput::SubTokens => "sub-tokens",
            }
        );

        if let Some(ref sample) = self.sample {
            let mut message = Message::new(sample.as_str());
            tokenizer
                .process(&mut message)
                .context("Cannot tokenize sample text")?;

            for (attribute, tokens) in message.all_tokens() {
                log::info!("Sample {}: {} tokens", attribute, tokens.len());
            }

            let mut writer = JsonLinesWriter::new(std::io::stdout());
            writer
                .write_message(&message)
                .context("Cannot write tokenized sample")?;
        }

        Ok(())
    }
}
