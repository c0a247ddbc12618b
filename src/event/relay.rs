//! Gate + dispatch for host events

use super::Gate;
use super::{DomainEvent, EventCategory};
use crate::config::EventsConfig;
use crate::webhook::Dispatcher;

/// What happened to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handed to the dispatcher (delivery itself is best-effort)
    Dispatched(EventCategory),
    Disabled(EventCategory),
    Suppressed(EventCategory, &'static str),
}

/// Routes host events through the filter gate to the dispatcher
pub struct Relay {
    events: EventsConfig,
    dispatcher: Dispatcher,
}

impl Relay {
    pub fn new(events: EventsConfig, dispatcher: Dispatcher) -> Self {
        Self { events, dispatcher }
    }

    pub fn relay(&self, event: &DomainEvent) -> Outcome {
        let category = event.category();
        match Gate::check(event, &self.events) {
            Gate::Pass => {
                self.dispatcher.dispatch(category.as_str(), &event.fields());
                Outcome::Dispatched(category)
            }
            Gate::Disabled(category) => {
                log::debug!("{} is disabled, not dispatching", category);
                Outcome::Disabled(category)
            }
            Gate::Suppressed(reason) => {
                log::debug!("{} suppressed: {}", category, reason);
                Outcome::Suppressed(category, reason)
            }
        }
    }
}
