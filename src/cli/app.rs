//! Forwarding loop runner and config loading

use std::path::PathBuf;

use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::application::ports::{ConfigStore, NotificationSource, SourceError};
use crate::application::{CycleReport, Dispatcher, ForwardUseCase, Observer};
use crate::domain::config::AppConfig;
use crate::domain::error::{ConfigError, IntervalParseError, InvalidProviderError};
use crate::domain::interval::Interval;
use crate::infrastructure::config::env_config;
use crate::infrastructure::{build_providers, create_source, XdgConfigStore};
use crate::logging::LoggingError;

use super::pid_file::{PidFile, PidFileError};
use super::signals::{ForwarderSignal, SignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Errors that stop the forwarder or a command
#[derive(Debug, Error)]
pub enum ForwarderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Interval(#[from] IntervalParseError),

    #[error(transparent)]
    InvalidProvider(#[from] InvalidProviderError),

    #[error("No providers enabled. Configure at least one of FCM, Pushbullet or ntfy")]
    NoProviders,

    #[error("Notification source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Notification source is {0}")]
    SourceUnavailable(String),

    #[error(transparent)]
    PidFile(#[from] PidFileError),

    #[error("Failed to setup signal handler: {0}")]
    Signal(#[from] std::io::Error),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("{0} notification(s) could not be delivered to any provider")]
    Undelivered(usize),

    #[error("{failed} of {total} provider test(s) failed")]
    ProviderTests { failed: usize, total: usize },
}

impl ForwarderError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ForwarderError::Interval(_)
            | ForwarderError::InvalidProvider(_)
            | ForwarderError::Config(ConfigError::ValidationError { .. }) => EXIT_USAGE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Loop settings resolved from the merged config
#[derive(Debug, Clone)]
pub struct ForwardOptions {
    pub interval: Interval,
    pub once: bool,
    pub skip_backlog: bool,
}

impl ForwardOptions {
    pub fn from_config(config: &AppConfig, once: bool) -> Result<Self, ForwarderError> {
        let interval = match config.poll_interval.as_deref() {
            Some(s) => s.parse::<Interval>()?,
            None => Interval::default_poll(),
        };

        Ok(Self {
            interval,
            once,
            skip_backlog: config.skip_backlog_or_default(),
        })
    }
}

/// Config store for `--config`, or the XDG default
pub fn config_store(path: Option<PathBuf>) -> XdgConfigStore {
    match path {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    }
}

/// Merge: defaults < file < env < cli
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;

    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config))
}

/// Wire the configured source and providers into a forwarder
pub fn build_forwarder(
    config: &AppConfig,
) -> Result<ForwardUseCase<Box<dyn NotificationSource>>, ForwarderError> {
    let providers = build_providers(config);
    for (kind, reason) in &providers.skipped {
        warn!(provider = kind.label(), "Provider enabled but not usable: {}", reason);
    }
    if providers.is_empty() {
        return Err(ForwarderError::NoProviders);
    }

    let dispatcher = Dispatcher::new(providers.providers);
    info!("{}", dispatcher.summary());

    let observer = Observer::new(create_source(config), config.seen_capacity_or_default());
    Ok(ForwardUseCase::new(observer, config.app_filter(), dispatcher))
}

fn log_cycle(report: &CycleReport) {
    if report.new == 0 {
        return;
    }
    debug!(
        new = report.new,
        filtered = report.filtered,
        forwarded = report.forwarded(),
        "Cycle complete"
    );
    for delivery in &report.deliveries {
        if delivery.report.all_failed() {
            warn!(
                id = %delivery.notification.id,
                app = %delivery.notification.app_name,
                "Notification was not delivered to any provider"
            );
        }
    }
}

fn undelivered(report: &CycleReport) -> usize {
    report
        .deliveries
        .iter()
        .filter(|d| d.report.all_failed())
        .count()
}

/// Tracks consecutive source failures so only the first is logged loudly
#[derive(Debug, Default)]
struct FailureStreak {
    count: u32,
}

impl FailureStreak {
    fn record_failure(&mut self, error: &SourceError) {
        self.count += 1;
        if self.count == 1 {
            warn!(error = %error, "Failed to read notification store, will keep retrying");
        } else {
            debug!(error = %error, failures = self.count, "Notification store still failing");
        }
    }

    fn record_success(&mut self) {
        if self.count > 0 {
            info!(failures = self.count, "Notification store readable again");
        }
        self.count = 0;
    }
}

/// Run the forwarder until a shutdown signal, or for one cycle with `once`
pub async fn run_forwarder(config: &AppConfig, options: ForwardOptions) -> Result<(), ForwarderError> {
    let mut forwarder = build_forwarder(config)?;

    if options.once {
        if options.skip_backlog {
            let skipped = forwarder.skip_backlog().await?;
            info!(skipped, "Skipped notifications already in the store");
        }
        let report = forwarder.run_cycle().await?;
        log_cycle(&report);
        return match undelivered(&report) {
            0 => Ok(()),
            n => Err(ForwarderError::Undelivered(n)),
        };
    }

    let mut pid_file = PidFile::new();
    pid_file.acquire()?;

    let mut signals = SignalHandler::new()?;
    let result = forward_loop(
        &mut forwarder,
        &mut signals,
        options.interval,
        options.skip_backlog,
    )
    .await;

    pid_file.release()?;
    result
}

/// One loop tick. The backlog is skipped first, retried until the store reads.
async fn tick<S: NotificationSource>(
    forwarder: &mut ForwardUseCase<S>,
    backlog_pending: &mut bool,
    streak: &mut FailureStreak,
) {
    if *backlog_pending {
        match forwarder.skip_backlog().await {
            Ok(skipped) => {
                streak.record_success();
                *backlog_pending = false;
                info!(skipped, "Skipped notifications already in the store");
            }
            Err(e) => streak.record_failure(&e),
        }
        return;
    }

    match forwarder.run_cycle().await {
        Ok(report) => {
            streak.record_success();
            log_cycle(&report);
        }
        Err(e) => streak.record_failure(&e),
    }
}

async fn forward_loop<S: NotificationSource>(
    forwarder: &mut ForwardUseCase<S>,
    signals: &mut SignalHandler,
    every: Interval,
    skip_backlog: bool,
) -> Result<(), ForwarderError> {
    let mut ticker = interval(every.as_std());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut streak = FailureStreak::default();
    let mut backlog_pending = skip_backlog;

    info!(
        source = forwarder.observer().source().name(),
        interval = %every,
        "Watching for notifications"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick(forwarder, &mut backlog_pending, &mut streak).await;
            }
            signal = signals.recv() => {
                match signal {
                    Some(ForwarderSignal::Shutdown) | None => {
                        info!("Forwarder stopped");
                        return Ok(());
                    }
                }
            }
        }
    }
}
