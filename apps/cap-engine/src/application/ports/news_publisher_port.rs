//! News Publisher Port (Driven Port)
//!
//! Outlet for free agency transitions. Lapsed offers and auto-declined
//! sheets are the designed outcome of an unanswered deadline, so they
//! surface here as news rather than as failures.

use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::domain::free_agency::FreeAgencyEvent;

/// News publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NewsPublishError {
    /// Serialization error.
    #[error("News serialization error: {message}")]
    SerializationError {
        /// Error message.
        message: String,
    },

    /// Publishing failed.
    #[error("News publish failed: {message}")]
    PublishFailed {
        /// Error message.
        message: String,
    },
}

/// Port for publishing free agency news.
pub trait NewsPublisherPort: Send + Sync {
    /// Publish events in order.
    ///
    /// # Errors
    ///
    /// Returns error if the outlet cannot accept the events.
    fn publish_events(&self, events: &[FreeAgencyEvent]) -> Result<(), NewsPublishError>;

    /// Publish a single event.
    ///
    /// # Errors
    ///
    /// Returns error if the outlet cannot accept the event.
    fn publish_event(&self, event: &FreeAgencyEvent) -> Result<(), NewsPublishError> {
        self.publish_events(std::slice::from_ref(event))
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNewsPublisher;

impl NewsPublisherPort for NoOpNewsPublisher {
    fn publish_events(&self, _events: &[FreeAgencyEvent]) -> Result<(), NewsPublishError> {
        Ok(())
    }
}

/// Writes each event to the log as a JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNewsPublisher;

impl NewsPublisherPort for LogNewsPublisher {
    fn publish_events(&self, events: &[FreeAgencyEvent]) -> Result<(), NewsPublishError> {
        for event in events {
            let payload = serde_json::to_string(event).map_err(|e| {
                NewsPublishError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            info!(
                event_type = event.event_type(),
                player_id = %event.player_id(),
                day = event.day(),
                payload = %payload,
                "{}",
                event.headline()
            );
        }
        Ok(())
    }
}

/// Keeps published events in memory.
#[derive(Debug, Default)]
pub struct InMemoryNewsPublisher {
    events: RwLock<Vec<FreeAgencyEvent>>,
}

impl InMemoryNewsPublisher {
    /// Create an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far.
    #[must_use]
    pub fn events(&self) -> Vec<FreeAgencyEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Headlines of everything published so far.
    #[must_use]
    pub fn headlines(&self) -> Vec<String> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(FreeAgencyEvent::headline)
            .collect()
    }

    /// Forget everything published so far.
    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NewsPublisherPort for InMemoryNewsPublisher {
    fn publish_events(&self, events: &[FreeAgencyEvent]) -> Result<(), NewsPublishError> {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(events);
        Ok(())
    }
}
