mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::adapter::StdEnvResolver;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, Config};
use domain::{CallwatchCommand, RunMode};
use wiring::{wire_callwatch, App};

/// 1 回の実行を包む Runner（開始・終了のライフサイクルログを出す）
struct Runner {
    app: App,
}

impl Runner {
    fn run(&self, mode: RunMode) -> Result<i32, Error> {
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "run started")
                .layer("cli")
                .kind("lifecycle")
                .field("mode", mode.as_str()),
        );
        let result = self.app.use_case.run(mode);
        match &result {
            Ok(summary) => {
                let _ = self.app.logger.log(
                    &LogRecord::new(LogLevel::Info, "run finished")
                        .layer("cli")
                        .kind("lifecycle")
                        .field("mode", mode.as_str())
                        .field("exit_code", 0)
                        .field("notified", summary.notified)
                        .field("failed", summary.failed)
                        .field("seeded", summary.seeded),
                );
            }
            Err(e) => {
                let level = if e.is_silent() {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                };
                let _ = self.app.logger.log(
                    &LogRecord::new(level, e.to_string())
                        .layer("cli")
                        .kind("error")
                        .field("exit_code", e.exit_code()),
                );
            }
        }
        result.map(|_| 0)
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            if !e.is_silent() {
                eprintln!("callwatch: {}", e);
            }
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let config: Config = parse_args()?;
    match config_to_command(&config) {
        CallwatchCommand::Help => {
            print_help();
            Ok(0)
        }
        CallwatchCommand::Run { mode } => {
            let app = wire_callwatch(&StdEnvResolver, &config, mode)?;
            Runner { app }.run(mode)
        }
    }
}

fn print_usage() {
    eprintln!("Usage: callwatch [options]");
}

fn print_help() {
    println!("Usage: callwatch [options]");
    println!("Options:");
    println!("  -h, --help            Show this help message");
    println!("  -v, --verbose         Emit info-level logs to stderr");
    println!("      --dry-run         Print notifications instead of posting them (ledger untouched)");
    println!("      --seed            Mark the current history as checked without notifying");
    println!("      --data-dir <dir>  Directory holding phones.tsv and check.json (default: /data)");
    println!();
    println!("Environment:");
    println!("  ROUTER_USER, ROUTER_PASSWORD          Router basic-auth credentials (required)");
    println!("  DISCORD_BOT_TOKEN                     Bot token (required unless --dry-run/--seed)");
    println!("  DISCORD_CHANNEL_ID                    Channel for outgoing and other calls");
    println!("  DISCORD_CHANNEL_ID_ONLY_INCOMING      Channel for incoming calls");
    println!("  ROUTER_HISTORY_URL                    History endpoint");
    println!("  CALLWATCH_DATA_DIR                    Data directory (overridden by --data-dir)");
    println!("  CALLWATCH_AREA_CODE                   Prefix for 7-digit numbers (default: 055)");
    println!("  CALLWATCH_LOG_FILE                    JSONL log file (default: <data_dir>/callwatch.log.jsonl)");
    println!("  CALLWATCH_WEB_SEARCH                  Set to 1 to enable Google search fallback");
    println!("  GOOGLE_SEARCH_KEY, GOOGLE_SEARCH_CX   Custom Search credentials");
}
