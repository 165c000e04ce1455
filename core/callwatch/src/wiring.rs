//! 配線: 設定を読み、標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    CompositeLog, FileJsonLog, FileSystem, HttpClient, HumanLog, Log, ReqwestHttpClient,
    StdFileSystem, BROWSER_USER_AGENT, DEFAULT_TIMEOUT,
};
use common::error::Error;
use common::ports::outbound::{EnvResolver, LogLevel, LogRecord};

use crate::adapter::lookup::default_lookups;
use crate::adapter::{
    ConsoleNotifier, DiscordBotNotifier, JsonFileLedger, RouterHistorySource, Settings,
    SettingsOverrides, TsvDirectory,
};
use crate::cli::Config;
use crate::domain::RunMode;
use crate::ports::inbound::RunCallwatch;
use crate::ports::outbound::Notifier;
use crate::usecase::{CallwatchDeps, CallwatchUseCase, IdentificationPipeline};

/// main が使う組み立て済みの部品
pub struct App {
    pub use_case: Arc<dyn RunCallwatch>,
    pub logger: Arc<dyn Log>,
}

fn build_logger(fs: Arc<dyn FileSystem>, settings: &Settings, verbose: bool) -> Arc<dyn Log> {
    Arc::new(CompositeLog::new(vec![
        Arc::new(FileJsonLog::new(fs, &settings.log_file)),
        Arc::new(HumanLog::new(verbose)),
    ]))
}

fn build_notifier(
    mode: RunMode,
    http: Arc<dyn HttpClient>,
    settings: &Settings,
    log: Arc<dyn Log>,
) -> Result<Arc<dyn Notifier>, Error> {
    if mode != RunMode::Notify {
        return Ok(Arc::new(ConsoleNotifier::stdout(log)));
    }
    let discord = settings
        .discord
        .clone()
        .ok_or_else(|| Error::config("Discord settings are required to send notifications"))?;
    let bot = Arc::new(DiscordBotNotifier::new(http, discord, Arc::clone(&log)));
    Ok(Arc::new(ConsoleNotifier::echoing(bot, log)))
}

/// 配線: 環境変数と CLI 設定から CallwatchUseCase を組み立てる
pub fn wire_callwatch(env: &dyn EnvResolver, config: &Config, mode: RunMode) -> Result<App, Error> {
    let settings = Settings::from_env(
        env,
        SettingsOverrides {
            data_dir: config.data_dir.clone(),
            require_discord: mode == RunMode::Notify,
        },
    )?;

    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let log = build_logger(Arc::clone(&fs), &settings, config.verbose);
    let http: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::new(DEFAULT_TIMEOUT, BROWSER_USER_AGENT)?);

    let directory = TsvDirectory::load(
        fs.as_ref(),
        &settings.data_dir.phones_file(),
        &settings.area_code,
        log.as_ref(),
    )?;
    let ledger = JsonFileLedger::load(
        Arc::clone(&fs),
        settings.data_dir.ledger_file(),
        Arc::clone(&log),
    )?;
    let history = RouterHistorySource::new(
        Arc::clone(&http),
        settings.router.clone(),
        settings.area_code.clone(),
        Arc::clone(&log),
    );
    let lookups = default_lookups(
        Arc::clone(&http),
        Arc::new(directory),
        settings.web_search.clone(),
    );
    let notifier = build_notifier(mode, http, &settings, Arc::clone(&log))?;

    let _ = log.log(
        &LogRecord::new(LogLevel::Debug, "wired")
            .layer("wiring")
            .kind("lifecycle")
            .field("data_dir", settings.data_dir.display().to_string())
            .field("lookups", lookups.len())
            .field("web_search", settings.web_search.is_some()),
    );

    let use_case = CallwatchUseCase::new(CallwatchDeps {
        history: Arc::new(history),
        ledger: Arc::new(ledger),
        pipeline: IdentificationPipeline::new(lookups, Arc::clone(&log)),
        notifier,
        log: Arc::clone(&log),
    });
    Ok(App {
        use_case: Arc::new(use_case),
        logger: log,
    })
}
