use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use spmalign::dataset::{DataSet, JsonLinesDataSet, PlainTextDataSet};
use spmalign::error::SpmAlignError;
use spmalign::output::JsonLinesWriter;
use spmalign_tokenizers::{Message, Tokenize};
use stdinout::{Input, Output};

use crate::io::{load_config, load_tokenizer};
use crate::progress::{ReadProgress, TokenizerSpeed};
use crate::traits::SpmAlignApp;

const CONFIG: &str = "CONFIG";
const INPUT: &str = "INPUT";
const INPUT_FORMAT: &str = "INPUT_FORMAT";
const OUTPUT: &str = "OUTPUT";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum InputFormat {
    JsonLines,
    Text,
}

impl InputFormat {
    fn parse(format: &str) -> Result<Self> {
        match format {
            "jsonl" => Ok(InputFormat::JsonLines),
            "text" => Ok(InputFormat::Text),
            unknown => anyhow::bail!("Unknown input format: {}", unknown),
        }
    }
}

pub struct TokenizeApp {
    config: String,
    input: Option<String>,
    input_format: InputFormat,
    output: Option<String>,
}

impl TokenizeApp {
    fn process<R, W>(&self, tokenizer: &dyn Tokenize, read: R, write: W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let writer = JsonLinesWriter::new(write);

        match self.input_format {
            InputFormat::JsonLines => {
                write_messages(JsonLinesDataSet::new(read).messages(tokenizer)?, writer)
            }
            InputFormat::Text => {
                write_messages(PlainTextDataSet::new(read).messages(tokenizer)?, writer)
            }
        }
    }
}

fn write_messages<I, W>(messages: I, mut writer: JsonLinesWriter<W>) -> Result<()>
where
    I: Iterator<Item = Result<Message, SpmAlignError>>,
    W: Write,
{
    let mut speed = TokenizerSpeed::new();

    for message in messages {
        let message = message.context("Cannot tokenize message")?;

        let n_tokens = message.all_tokens().map(|(_, tokens)| tokens.len()).sum();
        speed.count_message(n_tokens);

        writer
            .write_message(&message)
            .context("Cannot write tokenized message")?;
    }

    writer.flush().context("Cannot flush output")?;

    Ok(())
}

impl SpmAlignApp for TokenizeApp {
    fn app() -> Command {
        Command::new("tokenize")
            .arg_required_else_help(true)
            .about("Tokenize messages and write the tokens as JSON lines")
            .arg(
                Arg::new(CONFIG)
                    .help("Tokenizer configuration file")
                    .index(1)
                    .required(true),
            )
            .arg(Arg::new(INPUT).help("Input messages").index(2))
            .arg(Arg::new(OUTPUT).help("Output tokens").index(3))
            .arg(
                Arg::new(INPUT_FORMAT)
                    .long("format")
                    .value_name("FORMAT")
                    .num_args(1)
                    .value_parser(["jsonl", "text"])
                    .help("Input format")
                    .default_value("text"),
            )
    }

    fn parse(matches: &ArgMatches) -> Result<Self> {
        let config = matches.get_one::<String>(CONFIG).unwrap().into();
        let input = matches.get_one::<String>(INPUT).map(ToOwned::to_owned);
        let input_format = InputFormat::parse(matches.get_one::<String>(INPUT_FORMAT).unwrap())?;
        let output = matches.get_one::<String>(OUTPUT).map(ToOwned::to_owned);

        Ok(TokenizeApp {
            config,
            input,
            input_format,
            output,
        })
    }

    fn run(&self) -> Result<()> {
        let config = load_config(&self.config)?;
        let tokenizer = load_tokenizer(&config)?;

        let output = Output::from(self.output.as_ref());
        let write = BufWriter::new(output.write().context("Cannot open output for writing")?);

        match self.input {
            Some(ref path) => {
                let f = File::open(path).context(format!("Cannot open input: {}", path))?;
                let read = ReadProgress::new(f).context("Cannot create progress bar")?;
                self.process(&tokenizer, BufReader::new(read), write)
            }
            None => {
                let input = Input::from(self.input.as_ref());
                let read = input.buf_read().context("Cannot open standard input")?;
                self.process(&tokenizer, read, write)
            }
        }
    }
}
