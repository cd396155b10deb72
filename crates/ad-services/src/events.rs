//! Usage event resources.

use std::time::Duration;

use ad_core::config::Config;
use ad_core::{Collection, Error, ResourceName, Result};
use ad_store::{ListPage, PageRequest, ResourceStore};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recorded usage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// `events/<id>`.
    pub name: ResourceName,
    /// Who triggered the action, e.g. `users/anonymous`.
    pub subject: String,
    /// Component that performed the action, e.g. `animal-classifier`.
    pub source: String,
    /// What was done, e.g. `classify`.
    pub action: String,
    pub execution_duration: Duration,
    pub create_time: DateTime<Utc>,
}

/// Fields supplied when creating an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub subject: String,
    pub source: String,
    pub action: String,
    /// Required; zero is a valid duration.
    pub execution_duration: Option<Duration>,
}

impl NewEvent {
    /// Convenience constructor with every field present.
    pub fn new(
        subject: impl Into<String>,
        source: impl Into<String>,
        action: impl Into<String>,
        execution_duration: Duration,
    ) -> Self {
        Self {
            subject: subject.into(),
            source: source.into(),
            action: action.into(),
            execution_duration: Some(execution_duration),
        }
    }

    fn validate(self) -> Result<ValidEvent> {
        if self.subject.is_empty() {
            return Err(Error::invalid_argument("subject is required"));
        }
        if self.source.is_empty() {
            return Err(Error::invalid_argument("source is required"));
        }
        if self.action.is_empty() {
            return Err(Error::invalid_argument("action is required"));
        }
        let execution_duration = self
            .execution_duration
            .ok_or_else(|| Error::invalid_argument("execution_duration is required"))?;

        Ok(ValidEvent {
            subject: self.subject,
            source: self.source,
            action: self.action,
            execution_duration,
        })
    }
}

struct ValidEvent {
    subject: String,
    source: String,
    action: String,
    execution_duration: Duration,
}

/// Create/Get/List/Delete over the `events` collection.
pub struct EventService {
    store: ResourceStore<Event>,
}

impl EventService {
    /// Create an empty event service.
    pub fn new(config: &Config) -> Self {
        Self {
            store: ResourceStore::new(Collection::EVENTS, &config.store),
        }
    }

    /// Validate and store a new event.
    pub fn create(&self, new_event: NewEvent) -> Result<Event> {
        let valid = new_event.validate()?;

        let event = self.store.insert(|name, create_time| Event {
            name: name.clone(),
            subject: valid.subject,
            source: valid.source,
            action: valid.action,
            execution_duration: valid.execution_duration,
            create_time,
        });

        tracing::info!(name = %event.name, action = %event.action, "Created event");
        Ok(event)
    }

    /// Fetch an event by name.
    pub fn get(&self, name: &str) -> Result<Event> {
        self.store.get(name)
    }

    /// List events, newest first.
    pub fn list(&self, request: &PageRequest) -> ListPage<Event> {
        self.store.list(request)
    }

    /// Delete an event by name.
    pub fn delete(&self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        tracing::info!(name, "Deleted event");
        Ok(())
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no events are stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
