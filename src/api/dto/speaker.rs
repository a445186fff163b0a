//! Speaker DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Speaker;

/// Speaker reference embedded in a talk payload.
///
/// Only the id is consumed; a talk payload cannot create or edit speakers.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerRef {
    pub id: Option<i32>,
}

/// JSON representation of a speaker.
#[derive(Debug, Serialize)]
pub struct SpeakerResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl From<Speaker> for SpeakerResponse {
    fn from(speaker: Speaker) -> Self {
        Self {
            id: speaker.id,
            first_name: speaker.first_name,
            last_name: speaker.last_name,
            company: speaker.company,
            blog_url: speaker.blog_url,
            twitter: speaker.twitter,
            github: speaker.github,
        }
    }
}
