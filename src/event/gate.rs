//! Event filter gate
//!
//! Enable flag first, then the category's suppression predicates. Pure; no
//! state is kept between calls.

use super::{DomainEvent, EventCategory, NS_FILE, NS_FILE_TEXT};
use crate::config::EventsConfig;

/// Verdict for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Send it
    Pass,
    /// Category switched off in config
    Disabled(EventCategory),
    /// Category enabled, but a predicate matched
    Suppressed(&'static str),
}

impl Gate {
    pub fn check(event: &DomainEvent, events: &EventsConfig) -> Gate {
        let category = event.category();
        if !events.is_enabled(category) {
            return Gate::Disabled(category);
        }

        match suppression(event) {
            Some(reason) => Gate::Suppressed(reason),
            None => Gate::Pass,
        }
    }
}

/// First matching suppression predicate, if any
fn suppression(event: &DomainEvent) -> Option<&'static str> {
    match event {
        DomainEvent::EditedArticle(edit) => {
            if edit.is_new {
                Some("page was created by this save")
            } else if !edit.has_previous_revision {
                Some("no previous revision")
            } else {
                None
            }
        }
        DomainEvent::AddedArticle(insert) if insert.namespace_id == NS_FILE || insert.page.namespace == NS_FILE_TEXT => {
            Some("page is in the File namespace")
        }
        _ => None,
    }
}
