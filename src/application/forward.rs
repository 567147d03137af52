//! Forwarding use case: observe, filter, dispatch

use tracing::debug;

use crate::domain::notification::{AppFilter, Notification};

use super::dispatcher::{DispatchReport, Dispatcher};
use super::observer::Observer;
use super::ports::{NotificationSource, SourceError};

/// A notification that passed the filter together with its delivery results
#[derive(Debug, Clone)]
pub struct Delivery {
    pub notification: Notification,
    pub report: DispatchReport,
}

/// Summary of one poll cycle
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// New notifications with content
    pub new: usize,
    /// New notifications rejected by the app filter
    pub filtered: usize,
    pub deliveries: Vec<Delivery>,
}

impl CycleReport {
    pub fn forwarded(&self) -> usize {
        self.deliveries.len()
    }
}

/// Single-loop forwarder tying the observer, filter and dispatcher together
pub struct ForwardUseCase<S: NotificationSource> {
    observer: Observer<S>,
    filter: AppFilter,
    dispatcher: Dispatcher,
}

impl<S: NotificationSource> ForwardUseCase<S> {
    pub fn new(observer: Observer<S>, filter: AppFilter, dispatcher: Dispatcher) -> Self {
        Self {
            observer,
            filter,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn observer(&self) -> &Observer<S> {
        &self.observer
    }

    /// Mark the current store contents as already handled.
    pub async fn skip_backlog(&mut self) -> Result<usize, SourceError> {
        self.observer.prime().await
    }

    /// Run one poll cycle.
    ///
    /// A source failure aborts the cycle before anything is dispatched;
    /// delivery failures are recorded in the report and never abort it.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, SourceError> {
        let fresh = self.observer.poll().await?;

        let mut report = CycleReport {
            new: fresh.len(),
            ..Default::default()
        };

        for notification in fresh {
            if !self.filter.should_forward(&notification.app_name) {
                debug!(app = %notification.app_name, "Skipping notification (filtered)");
                report.filtered += 1;
                continue;
            }

            let dispatch = self.dispatcher.dispatch(&notification.to_message()).await;
            report.deliveries.push(Delivery {
                notification,
                report: dispatch,
            });
        }

        Ok(report)
    }
}
