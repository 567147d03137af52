//! notify-forwarder CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use notify_forwarder::cli::{
    app::{config_store, load_merged_config},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    diagnose_cmd::handle_diagnose,
    provider_cmd::{handle_send, handle_test},
    run_forwarder, ForwardOptions, ForwarderError, Presenter,
};
use notify_forwarder::domain::config::AppConfig;
use notify_forwarder::domain::notification::OutboundMessage;
use notify_forwarder::logging::{init_logging, LogOptions};

/// Source app reported for messages sent with `send` and no `--app`
const MANUAL_SOURCE_APP: &str = "notify-forwarder";

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    match run(cli, &mut presenter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli, presenter: &mut Presenter) -> Result<(), ForwarderError> {
    let store = config_store(cli.config.clone());

    let command = match cli.command {
        Some(Commands::Config { action }) => {
            handle_config_command(action, &store, presenter).await?;
            return Ok(());
        }
        other => other,
    };

    let cli_config = AppConfig {
        poll_interval: cli.interval.clone(),
        skip_backlog: cli.skip_backlog.then_some(true),
        ..Default::default()
    };
    let config = load_merged_config(&store, cli_config).await?;

    init_logging(&LogOptions {
        level: config.log_level_or_default().to_string(),
        verbose: cli.verbose,
        file: config.log_file().map(PathBuf::from),
    })?;

    match command {
        Some(Commands::Test { provider }) => {
            handle_test(&config, presenter, provider.as_deref()).await
        }
        Some(Commands::Send { title, body, app }) => {
            let message = OutboundMessage::new(title, body)
                .with_source_app(app.unwrap_or_else(|| MANUAL_SOURCE_APP.to_string()));
            handle_send(&config, presenter, message).await
        }
        Some(Commands::Diagnose) => handle_diagnose(&store, &config, presenter).await,
        Some(Commands::Config { .. }) | None => {
            let options = ForwardOptions::from_config(&config, cli.once)?;
            run_forwarder(&config, options).await
        }
    }
}
