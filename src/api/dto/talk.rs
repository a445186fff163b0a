//! Talk DTOs for create, update, and response payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::speaker::{SpeakerRef, SpeakerResponse};
use crate::domain::entities::{Talk, TalkPatch};

/// Request body for `POST /api/camps/{moniker}/talks`.
///
/// The speaker reference is checked by the handler, not the validator, so
/// its absence maps to the endpoint's "speaker id is required" error rather
/// than a generic validation failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTalkRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[serde(rename = "abstract")]
    #[validate(length(min = 20, max = 4000))]
    pub abstract_text: String,

    /// Audience level, 100 (introductory) to 300 (advanced).
    #[validate(range(min = 100, max = 300))]
    pub level: i32,

    pub speaker: Option<SpeakerRef>,
}

/// Request body for `PUT /api/camps/{moniker}/talks/{id}`.
///
/// All fields are optional — absent or `null` fields leave the stored value
/// unchanged. A speaker reference that does not resolve is ignored and the
/// existing speaker stays attached.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTalkRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[serde(rename = "abstract")]
    #[validate(length(min = 20, max = 4000))]
    pub abstract_text: Option<String>,

    #[validate(range(min = 100, max = 300))]
    pub level: Option<i32>,

    pub speaker: Option<SpeakerRef>,
}

impl UpdateTalkRequest {
    /// The field overlay carried by this request, minus the speaker
    /// reference, which needs a lookup and is resolved by the handler.
    pub fn into_patch(self) -> TalkPatch {
        TalkPatch {
            title: self.title,
            abstract_text: self.abstract_text,
            level: self.level,
        }
    }
}

/// JSON representation of a talk.
#[derive(Debug, Serialize)]
pub struct TalkResponse {
    pub id: i32,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<SpeakerResponse>,
}

impl From<Talk> for TalkResponse {
    fn from(talk: Talk) -> Self {
        Self {
            id: talk.id,
            title: talk.title,
            abstract_text: talk.abstract_text,
            level: talk.level,
            speaker: talk.speaker.map(SpeakerResponse::from),
        }
    }
}
