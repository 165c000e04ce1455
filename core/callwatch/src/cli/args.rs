use crate::domain::{CallwatchCommand, RunMode};
use clap::builder::ArgAction;
use clap::value_parser;
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: info 以上のログを stderr にも出す
    pub verbose: bool,
    /// --dry-run: 送信も台帳の更新もせず、通知内容を stdout に出す
    pub dry_run: bool,
    /// --seed: 通知せずに現在の履歴をすべて台帳に記録する
    pub seed: bool,
    /// --data-dir: phones.tsv / check.json の置き場所（CALLWATCH_DATA_DIR より優先）
    pub data_dir: Option<PathBuf>,
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("callwatch")
        .about("Poll the router call history, identify callers and post notifications")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit info-level logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Print notifications instead of posting them; do not update the ledger")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("seed")
                .long("seed")
                .help("Mark every current history record as checked without notifying")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("data-dir")
                .long("data-dir")
                .value_name("dir")
                .help("Directory holding phones.tsv and check.json")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        dry_run: matches.get_flag("dry-run"),
        seed: matches.get_flag("seed"),
        data_dir: matches.get_one::<PathBuf>("data-dir").cloned(),
    }
}

fn validate(config: Config) -> Result<Config, Error> {
    if config.dry_run && config.seed {
        return Err(Error::invalid_argument(
            "--dry-run and --seed cannot be used together",
        ));
    }
    Ok(config)
}

/// プロセスの引数を解析する
pub fn parse_args() -> Result<Config, Error> {
    parse_args_from(std::env::args_os())
}

/// 任意の引数列を解析する（先頭はプログラム名）
pub fn parse_args_from<I, T>(args: I) -> Result<Config, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    validate(matches_to_config(&matches))
}

/// Config を実行するコマンドに変換する
pub fn config_to_command(config: &Config) -> CallwatchCommand {
    if config.help {
        return CallwatchCommand::Help;
    }
    let mode = if config.dry_run {
        RunMode::DryRun
    } else if config.seed {
        RunMode::Seed
    } else {
        RunMode::Notify
    };
    CallwatchCommand::Run { mode }
}
