//! Observer: turns store snapshots into a stream of new notifications

use tracing::{debug, info};

use crate::domain::notification::{Notification, SeenSet};

use super::ports::{NotificationSource, SourceError};

/// Polls a [`NotificationSource`] and yields only records it has not seen.
pub struct Observer<S: NotificationSource> {
    source: S,
    seen: SeenSet,
}

impl<S: NotificationSource> Observer<S> {
    /// Create an observer remembering up to `seen_capacity` ids
    pub fn new(source: S, seen_capacity: usize) -> Self {
        Self {
            source,
            seen: SeenSet::with_capacity(seen_capacity),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Fetch the store once and return the new notifications that carry content.
    ///
    /// Every new id is marked seen, including empty records, so they are
    /// not reconsidered on the next poll. Ids still in the store are kept
    /// even past the seen capacity.
    pub async fn poll(&mut self) -> Result<Vec<Notification>, SourceError> {
        let snapshot = self.source.fetch().await?;
        debug!(
            source = self.source.name(),
            count = snapshot.len(),
            "Fetched notification store"
        );

        let novelty = self.seen.observe_snapshot(snapshot.iter().map(|n| &n.id));

        let mut fresh = Vec::new();
        for (notification, is_new) in snapshot.into_iter().zip(novelty) {
            if !is_new {
                continue;
            }

            if !notification.has_content() {
                debug!(id = %notification.id, "Skipping notification without content");
                continue;
            }

            info!(id = %notification.id, app = %notification.app_name, "New notification");
            fresh.push(notification);
        }

        Ok(fresh)
    }

    /// Mark everything currently in the store as seen without yielding it.
    ///
    /// Returns the number of ids newly recorded.
    pub async fn prime(&mut self) -> Result<usize, SourceError> {
        let snapshot = self.source.fetch().await?;
        let primed = self
            .seen
            .observe_snapshot(snapshot.iter().map(|n| &n.id))
            .into_iter()
            .filter(|is_new| *is_new)
            .count();
        Ok(primed)
    }
}
