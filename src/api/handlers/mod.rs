//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod camps;
pub mod speakers;
pub mod talks;

pub use camps::{
    create_camp_handler, delete_camp_handler, get_camp_handler, list_camps_handler,
    search_camps_handler, update_camp_handler,
};
pub use speakers::{camp_speakers_handler, get_speaker_handler, list_speakers_handler};
pub use talks::{
    create_talk_handler, delete_talk_handler, get_talk_handler, list_talks_handler,
    update_talk_handler,
};
