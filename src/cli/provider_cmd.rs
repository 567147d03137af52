//! `test` and `send` command handlers

use crate::application::Dispatcher;
use crate::domain::config::AppConfig;
use crate::domain::notification::OutboundMessage;
use crate::domain::provider::ProviderKind;
use crate::infrastructure::{build_providers, ProviderSet};

use super::app::ForwarderError;
use super::presenter::Presenter;

fn dispatcher_for(
    config: &AppConfig,
    presenter: &Presenter,
    only: Option<ProviderKind>,
) -> Result<Dispatcher, ForwarderError> {
    let ProviderSet {
        mut providers,
        skipped,
    } = build_providers(config);

    let wanted = |kind: ProviderKind| only.map_or(true, |k| k == kind);
    providers.retain(|p| wanted(p.kind()));

    for (kind, reason) in skipped.iter().filter(|(k, _)| wanted(*k)) {
        presenter.warn(&format!("{} skipped: {}", kind.label(), reason));
    }
    if providers.is_empty() {
        return Err(ForwarderError::NoProviders);
    }

    let dispatcher = Dispatcher::new(providers);
    presenter.info(&dispatcher.summary());
    Ok(dispatcher)
}

/// Test every configured provider, or just `provider`. Fails when any test fails.
pub async fn handle_test(
    config: &AppConfig,
    presenter: &mut Presenter,
    provider: Option<&str>,
) -> Result<(), ForwarderError> {
    let only = provider.map(str::parse::<ProviderKind>).transpose()?;
    let dispatcher = dispatcher_for(config, presenter, only)?;

    presenter.start_spinner("Testing provider connections...");
    let outcomes = dispatcher.test_all().await;
    presenter.stop_spinner();

    for outcome in &outcomes {
        presenter.output(&presenter.format_outcome(outcome));
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed == 0 {
        presenter.success(&format!("All {} provider(s) connected", outcomes.len()));
        Ok(())
    } else {
        Err(ForwarderError::ProviderTests {
            failed,
            total: outcomes.len(),
        })
    }
}

/// Send one message through every provider, bypassing the app filter
pub async fn handle_send(
    config: &AppConfig,
    presenter: &mut Presenter,
    message: OutboundMessage,
) -> Result<(), ForwarderError> {
    let dispatcher = dispatcher_for(config, presenter, None)?;

    presenter.start_spinner("Sending...");
    let report = dispatcher.dispatch(&message).await;
    presenter.stop_spinner();

    presenter.dispatch_report(&report);

    if report.all_failed() {
        return Err(ForwarderError::Undelivered(1));
    }
    presenter.success(&format!(
        "Sent to {}/{} providers",
        report.succeeded(),
        report.total()
    ));
    Ok(())
}
