//! Talk entity and its partial-update overlay.

use crate::domain::entities::Speaker;

/// A talk given at a camp.
///
/// A talk never exists without an owning camp and an assigned speaker.
/// Lookups are always scoped by `(moniker, id)` — the id alone is not part
/// of the public API surface.
///
/// `speaker` is populated only when the talk was loaded with speaker data.
#[derive(Debug, Clone, PartialEq)]
pub struct Talk {
    pub id: i32,
    pub camp_id: i32,
    pub speaker_id: i32,
    pub title: String,
    pub abstract_text: String,
    pub level: i32,
    pub speaker: Option<Speaker>,
}

impl Talk {
    /// Overlays `patch` onto this talk, field by field.
    ///
    /// `None` fields leave the existing value untouched; `Some` fields
    /// replace it. Speaker reassignment is deliberately not part of the
    /// patch — it requires a lookup and is handled by [`Self::reassign_speaker`].
    pub fn apply(&mut self, patch: TalkPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(abstract_text) = patch.abstract_text {
            self.abstract_text = abstract_text;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
    }

    /// Reattaches this talk to a different speaker.
    pub fn reassign_speaker(&mut self, speaker: Speaker) {
        self.speaker_id = speaker.id;
        self.speaker = Some(speaker);
    }
}

/// Input data for creating a new talk.
///
/// The camp and speaker references must already be resolved; a talk is never
/// staged against an unverified camp or speaker.
#[derive(Debug, Clone)]
pub struct NewTalk {
    pub camp_id: i32,
    pub speaker_id: i32,
    pub title: String,
    pub abstract_text: String,
    pub level: i32,
}

/// Partial update for an existing talk.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TalkPatch {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub level: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_talk() -> Talk {
        Talk {
            id: 1,
            camp_id: 10,
            speaker_id: 20,
            title: "Writing Services in Rust".to_string(),
            abstract_text: "An introduction to building HTTP services.".to_string(),
            level: 100,
            speaker: None,
        }
    }

    #[test]
    fn test_apply_overrides_supplied_fields() {
        let mut talk = sample_talk();
        talk.apply(TalkPatch {
            title: Some("Advanced Rust Services".to_string()),
            abstract_text: None,
            level: Some(300),
        });

        assert_eq!(talk.title, "Advanced Rust Services");
        assert_eq!(
            talk.abstract_text,
            "An introduction to building HTTP services."
        );
        assert_eq!(talk.level, 300);
    }

    #[test]
    fn test_apply_empty_patch_changes_nothing() {
        let mut talk = sample_talk();
        let before = talk.clone();

        talk.apply(TalkPatch::default());

        assert_eq!(talk, before);
    }

    #[test]
    fn test_reassign_speaker() {
        let mut talk = sample_talk();
        let speaker = Speaker {
            id: 42,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            company: None,
            blog_url: None,
            twitter: None,
            github: None,
        };

        talk.reassign_speaker(speaker.clone());

        assert_eq!(talk.speaker_id, 42);
        assert_eq!(talk.speaker, Some(speaker));
    }
}
