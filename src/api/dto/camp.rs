//! Camp DTOs for create, update, and response payloads.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::talk::TalkResponse;
use crate::domain::entities::{Camp, CampPatch, NewCamp};

/// Compiled regex for moniker validation: lowercase slug form.
static MONIKER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request body for `POST /api/camps`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampRequest {
    /// Unique, human-readable identifier used in routes.
    #[validate(length(min = 3, max = 50))]
    #[validate(regex(path = "*MONIKER_REGEX"))]
    pub moniker: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub event_date: DateTime<Utc>,

    /// Duration of the event in days.
    #[validate(range(min = 1, max = 14))]
    pub length: i32,

    pub venue: Option<String>,
}

impl CreateCampRequest {
    pub fn into_new_camp(self) -> NewCamp {
        NewCamp {
            moniker: self.moniker,
            name: self.name,
            event_date: self.event_date,
            length: self.length,
            venue: self.venue,
        }
    }
}

/// Request body for `PUT /api/camps/{moniker}`.
///
/// All fields are optional — absent or `null` fields leave the stored value
/// unchanged. The moniker is fixed at creation and not updatable.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCampRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub event_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, max = 14))]
    pub length: Option<i32>,

    pub venue: Option<String>,
}

impl UpdateCampRequest {
    pub fn into_patch(self) -> CampPatch {
        CampPatch {
            name: self.name,
            event_date: self.event_date,
            length: self.length,
            venue: self.venue,
        }
    }
}

/// JSON representation of a camp.
///
/// `talks` appears only when talks were requested with the camp.
#[derive(Debug, Serialize)]
pub struct CampResponse {
    pub moniker: String,
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub length: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talks: Option<Vec<TalkResponse>>,
}

impl From<Camp> for CampResponse {
    fn from(camp: Camp) -> Self {
        Self {
            moniker: camp.moniker,
            name: camp.name,
            event_date: camp.event_date,
            length: camp.length,
            venue: camp.venue,
            talks: camp
                .talks
                .map(|talks| talks.into_iter().map(TalkResponse::from).collect()),
        }
    }
}

impl From<NewCamp> for CampResponse {
    fn from(camp: NewCamp) -> Self {
        Self {
            moniker: camp.moniker,
            name: camp.name,
            event_date: camp.event_date,
            length: camp.length,
            venue: camp.venue,
            talks: None,
        }
    }
}
