//! Repository trait for camp, speaker, and talk data access.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{Camp, NewCamp, NewTalk, Speaker, Talk};
use crate::error::AppError;

/// Handle to a talk staged for insertion.
///
/// The talk's id is assigned by the store, so the created row only becomes
/// observable after a successful [`CampRepository::save_changes`]. The
/// implementation fills the handle during commit via [`StagedTalk::fulfill`].
#[derive(Debug, Clone, Default)]
pub struct StagedTalk {
    slot: Arc<OnceLock<Talk>>,
}

impl StagedTalk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the created talk. Later calls are ignored.
    pub fn fulfill(&self, talk: Talk) {
        let _ = self.slot.set(talk);
    }

    /// The created talk, or `None` before a successful commit.
    pub fn created(&self) -> Option<Talk> {
        self.slot.get().cloned()
    }
}

/// Repository interface for the conference data store.
///
/// Reads resolve immediately against the store. Mutations (`add_*`,
/// `update_*`, `delete_*`) are *staged* on the repository instance and only
/// become durable on [`Self::save_changes`], which reports whether any
/// staged change took effect. Commit semantics, connection scoping, and
/// mutation ordering are owned by the implementation; handlers impose none
/// of their own.
///
/// Repositories are units of work: one instance per request, obtained from a
/// [`CampRepositoryFactory`], so staged changes never cross requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampRepository`] - PostgreSQL
/// - Test mocks auto-generated with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampRepository: Send + Sync {
    /// All camps, ordered by event date.
    ///
    /// `include_talks` embeds each camp's talks (with speakers).
    async fn get_all_camps(&self, include_talks: bool) -> Result<Vec<Camp>, AppError>;

    /// One camp by moniker, or `None` if absent.
    async fn get_camp(&self, moniker: &str, include_talks: bool)
    -> Result<Option<Camp>, AppError>;

    /// Camps whose event falls on the given calendar date.
    async fn get_camps_by_event_date(
        &self,
        date: NaiveDate,
        include_talks: bool,
    ) -> Result<Vec<Camp>, AppError>;

    /// All speakers, ordered by last name.
    async fn get_all_speakers(&self) -> Result<Vec<Speaker>, AppError>;

    /// Speakers who have at least one talk in the given camp.
    async fn get_speakers_by_moniker(&self, moniker: &str) -> Result<Vec<Speaker>, AppError>;

    /// One speaker by id, or `None` if absent.
    async fn get_speaker(&self, speaker_id: i32) -> Result<Option<Speaker>, AppError>;

    /// All talks for the camp identified by `moniker`.
    ///
    /// An unknown moniker yields an empty collection, not an error.
    async fn get_talks_by_moniker(
        &self,
        moniker: &str,
        include_speaker: bool,
    ) -> Result<Vec<Talk>, AppError>;

    /// One talk, looked up by the `(moniker, id)` pair.
    async fn get_talk_by_moniker(
        &self,
        moniker: &str,
        talk_id: i32,
        include_speaker: bool,
    ) -> Result<Option<Talk>, AppError>;

    /// Stages a talk for insertion. The returned handle yields the created
    /// talk after a successful commit.
    fn add_talk(&self, talk: NewTalk) -> StagedTalk;

    /// Stages an update of an existing talk.
    fn update_talk(&self, talk: Talk);

    /// Stages a talk for deletion.
    fn delete_talk(&self, talk: Talk);

    /// Stages a camp for insertion.
    fn add_camp(&self, camp: NewCamp);

    /// Stages an update of an existing camp.
    fn update_camp(&self, camp: Camp);

    /// Stages a camp for deletion, along with the talks it owns.
    fn delete_camp(&self, camp: Camp);

    /// Durably persists all staged mutations.
    ///
    /// Returns `Ok(true)` when at least one staged change took effect and
    /// `Ok(false)` otherwise — including when nothing was staged, or a
    /// staged delete/update no longer matched a row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failure; nothing is
    /// committed in that case.
    async fn save_changes(&self) -> Result<bool, AppError>;
}

/// Produces one [`CampRepository`] per request.
///
/// Mirrors per-request session scoping: every handler invocation gets a
/// fresh unit of work with empty staging state.
#[cfg_attr(test, mockall::automock)]
pub trait CampRepositoryFactory: Send + Sync {
    fn repository(&self) -> Arc<dyn CampRepository>;
}
