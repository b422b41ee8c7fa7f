use std::io::stdout;

use anyhow::Result;
use clap::{crate_version, value_parser, Arg, Command};
use clap_complete::{generate, Shell};

pub mod io;

pub mod progress;

mod subcommands;

pub mod traits;
use traits::SpmAlignApp;

fn main() -> Result<()> {
    // Known subapplications.
    let apps = vec![
        subcommands::CheckConfigApp::app(),
        subcommands::TokenizeApp::app(),
    ];

    env_logger::init();

    let cli = Command::new("spmalign")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .about("Tokenize messages with sentencepiece")
        .version(crate_version!())
        .subcommands(apps)
        .subcommand(
            Command::new("completions")
                .about("Generate completion scripts for your shell")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(value_parser!(Shell)),
                ),
        );
    let matches = cli.clone().get_matches();

    match matches.subcommand_name().unwrap() {
        "check-config" => subcommands::CheckConfigApp::parse(
            matches.subcommand_matches("check-config").unwrap(),
        )?
        .run(),
        "completions" => {
            let shell = matches
                .subcommand_matches("completions")
                .unwrap()
                .get_one::<Shell>("shell")
                .copied()
                .unwrap();
            write_completion_script(cli, shell);
            Ok(())
        }
        "tokenize" => {
            subcommands::TokenizeApp::parse(matches.subcommand_matches("tokenize").unwrap())?.run()
        }
        _unknown => unreachable!(),
    }
}

fn write_completion_script(mut cli: Command, shell: Shell) {
    generate(shell, &mut cli, "spmalign", &mut stdout());
}
