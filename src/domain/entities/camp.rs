//! Camp entity and its partial-update overlay.

use chrono::{DateTime, Utc};

use crate::domain::entities::Talk;

/// A conference camp.
///
/// Publicly identified by its unique, human-readable `moniker`; the numeric
/// id is a storage concern and never appears in routes or payloads.
///
/// `talks` is populated only when talks were requested with the camp.
#[derive(Debug, Clone, PartialEq)]
pub struct Camp {
    pub id: i32,
    pub moniker: String,
    pub name: String,
    pub event_date: DateTime<Utc>,
    /// Duration of the event in days.
    pub length: i32,
    pub venue: Option<String>,
    pub talks: Option<Vec<Talk>>,
}

impl Camp {
    /// Overlays `patch` onto this camp, field by field.
    ///
    /// `None` fields leave the existing value untouched. The moniker is the
    /// camp's public identity and cannot be changed through a patch.
    pub fn apply(&mut self, patch: CampPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(event_date) = patch.event_date {
            self.event_date = event_date;
        }
        if let Some(length) = patch.length {
            self.length = length;
        }
        if let Some(venue) = patch.venue {
            self.venue = Some(venue);
        }
    }
}

/// Input data for creating a new camp.
#[derive(Debug, Clone)]
pub struct NewCamp {
    pub moniker: String,
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub length: i32,
    pub venue: Option<String>,
}

/// Partial update for an existing camp.
///
/// `None` fields are left unchanged. A venue, once set, can be replaced but
/// not cleared through a patch.
#[derive(Debug, Clone, Default)]
pub struct CampPatch {
    pub name: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub length: Option<i32>,
    pub venue: Option<String>,
}
