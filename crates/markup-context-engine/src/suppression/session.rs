//! Ties classification to suppression for one editing session.

use crate::classify::{CachedClassifier, Clock, SystemClock};
use crate::models::Probe;

use super::{SettingsBackend, SnapshotStore, SuppressionController};

/// What a cursor event did to the suppressed setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The cursor moved into text content; the setting was suppressed.
    Entered,
    /// The cursor left text content; the setting was restored.
    Left,
    Unchanged,
}

/// Tracks the last verdict and flips suppression only on changes.
pub struct CursorSession<B, S, C: Clock = SystemClock> {
    classifier: CachedClassifier<C>,
    controller: SuppressionController<B, S>,
    key: String,
    last_verdict: Option<bool>,
}

impl<B, S, C> CursorSession<B, S, C>
where
    B: SettingsBackend,
    S: SnapshotStore,
    C: Clock,
{
    /// `key` identifies the scope the setting is suppressed in.
    pub fn new(
        classifier: CachedClassifier<C>,
        controller: SuppressionController<B, S>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            controller,
            key: key.into(),
            last_verdict: None,
        }
    }

    pub fn controller(&self) -> &SuppressionController<B, S> {
        &self.controller
    }

    pub fn last_verdict(&self) -> Option<bool> {
        self.last_verdict
    }

    /// Classify the new cursor position and suppress or restore on a change.
    ///
    /// A session starts outside text content, so a first `false` verdict is
    /// [`Transition::Unchanged`].
    pub fn on_cursor(&mut self, probe: &Probe<'_>, version: u64) -> Transition {
        let verdict = self.classifier.classify(probe, version);
        let previous = self.last_verdict.replace(verdict).unwrap_or(false);

        match (previous, verdict) {
            (false, true) => {
                self.controller.disable(&self.key);
                if self.controller.is_suppressed(&self.key) {
                    Transition::Entered
                } else {
                    // Try again on the next cursor event
                    self.last_verdict = Some(false);
                    Transition::Unchanged
                }
            }
            (true, false) => {
                self.controller.restore(&self.key);
                Transition::Left
            }
            _ => Transition::Unchanged,
        }
    }

    /// Restore the setting and forget the last verdict.
    pub fn end(&mut self) {
        self.controller.restore(&self.key);
        self.last_verdict = None;
    }
}
