#![allow(dead_code)]

//! In-memory substitute for the PostgreSQL repository, backing handler
//! integration tests without a database. Mirrors the unit-of-work contract:
//! staged mutations, transactional apply on `save_changes`, and a
//! configurable commit result for exercising the commit-false paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::json;

use codecamp_api::prelude::*;
use codecamp_api::routes::app_router;
use codecamp_api::utils::LinkGenerator;

#[derive(Default)]
struct StoreInner {
    camps: Vec<Camp>,
    speakers: Vec<Speaker>,
    talks: Vec<Talk>,
    next_camp_id: i32,
    next_speaker_id: i32,
    next_talk_id: i32,
}

impl StoreInner {
    fn next_talk_id(&mut self) -> i32 {
        self.next_talk_id += 1;
        self.next_talk_id
    }

    fn next_camp_id(&mut self) -> i32 {
        self.next_camp_id += 1;
        self.next_camp_id
    }

    fn next_speaker_id(&mut self) -> i32 {
        self.next_speaker_id += 1;
        self.next_speaker_id
    }

    fn speaker(&self, id: i32) -> Option<Speaker> {
        self.speakers.iter().find(|s| s.id == id).cloned()
    }

    fn camp_id_by_moniker(&self, moniker: &str) -> Option<i32> {
        self.camps
            .iter()
            .find(|c| c.moniker == moniker)
            .map(|c| c.id)
    }

    fn talks_of(&self, camp_id: i32, include_speaker: bool) -> Vec<Talk> {
        self.talks
            .iter()
            .filter(|t| t.camp_id == camp_id)
            .cloned()
            .map(|mut t| {
                if include_speaker {
                    t.speaker = self.speaker(t.speaker_id);
                }
                t
            })
            .collect()
    }
}

/// Shared backing store. One per test; survives across the per-request
/// repository instances the factory hands out.
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
    commit_succeeds: AtomicBool,
    fail_reads: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            commit_succeeds: AtomicBool::new(true),
            fail_reads: AtomicBool::new(false),
        }
    }
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes subsequent commits report `false` (no effect) without erroring.
    pub fn set_commit_result(&self, succeeds: bool) {
        self.commit_succeeds.store(succeeds, Ordering::SeqCst);
    }

    /// Makes subsequent reads fail with a storage error.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn seed_camp(&self, moniker: &str, name: &str, event_date: &str) -> i32 {
        let mut inner = self.lock();
        let id = inner.next_camp_id();
        inner.camps.push(Camp {
            id,
            moniker: moniker.to_string(),
            name: name.to_string(),
            event_date: event_date.parse().expect("valid RFC 3339 date"),
            length: 1,
            venue: None,
            talks: None,
        });
        id
    }

    pub fn seed_speaker(&self, first_name: &str, last_name: &str) -> i32 {
        let mut inner = self.lock();
        let id = inner.next_speaker_id();
        inner.speakers.push(Speaker {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            company: None,
            blog_url: None,
            twitter: None,
            github: None,
        });
        id
    }

    pub fn seed_talk(&self, camp_id: i32, speaker_id: i32, title: &str) -> i32 {
        let mut inner = self.lock();
        let id = inner.next_talk_id();
        inner.talks.push(Talk {
            id,
            camp_id,
            speaker_id,
            title: title.to_string(),
            abstract_text: "An abstract that is long enough for tests.".to_string(),
            level: 100,
            speaker: None,
        });
        id
    }

    pub fn talk_count(&self) -> usize {
        self.lock().talks.len()
    }

    pub fn camp_count(&self) -> usize {
        self.lock().camps.len()
    }
}

enum Pending {
    AddTalk { talk: NewTalk, staged: StagedTalk },
    UpdateTalk(Talk),
    DeleteTalk(i32),
    AddCamp(NewCamp),
    UpdateCamp(Camp),
    DeleteCamp(i32),
}

/// One unit of work over the shared store.
pub struct InMemoryCampRepository {
    store: Arc<InMemoryStore>,
    pending: Mutex<Vec<Pending>>,
}

impl InMemoryCampRepository {
    fn stage(&self, change: Pending) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change);
    }

    fn read_guard(&self) -> Result<(), AppError> {
        if self.store.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl CampRepository for InMemoryCampRepository {
    async fn get_all_camps(&self, include_talks: bool) -> Result<Vec<Camp>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let mut camps = inner.camps.clone();
        camps.sort_by_key(|c| c.event_date);
        if include_talks {
            for camp in &mut camps {
                camp.talks = Some(inner.talks_of(camp.id, true));
            }
        }
        Ok(camps)
    }

    async fn get_camp(
        &self,
        moniker: &str,
        include_talks: bool,
    ) -> Result<Option<Camp>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let mut camp = match inner.camps.iter().find(|c| c.moniker == moniker) {
            Some(camp) => camp.clone(),
            None => return Ok(None),
        };
        if include_talks {
            camp.talks = Some(inner.talks_of(camp.id, true));
        }
        Ok(Some(camp))
    }

    async fn get_camps_by_event_date(
        &self,
        date: NaiveDate,
        include_talks: bool,
    ) -> Result<Vec<Camp>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let mut camps: Vec<Camp> = inner
            .camps
            .iter()
            .filter(|c| c.event_date.date_naive() == date)
            .cloned()
            .collect();
        if include_talks {
            for camp in &mut camps {
                camp.talks = Some(inner.talks_of(camp.id, true));
            }
        }
        Ok(camps)
    }

    async fn get_all_speakers(&self) -> Result<Vec<Speaker>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let mut speakers = inner.speakers.clone();
        speakers.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(speakers)
    }

    async fn get_speakers_by_moniker(&self, moniker: &str) -> Result<Vec<Speaker>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let Some(camp_id) = inner.camp_id_by_moniker(moniker) else {
            return Ok(Vec::new());
        };
        let ids: HashSet<i32> = inner
            .talks
            .iter()
            .filter(|t| t.camp_id == camp_id)
            .map(|t| t.speaker_id)
            .collect();
        Ok(inner
            .speakers
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn get_speaker(&self, speaker_id: i32) -> Result<Option<Speaker>, AppError> {
        self.read_guard()?;
        Ok(self.store.lock().speaker(speaker_id))
    }

    async fn get_talks_by_moniker(
        &self,
        moniker: &str,
        include_speaker: bool,
    ) -> Result<Vec<Talk>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let Some(camp_id) = inner.camp_id_by_moniker(moniker) else {
            return Ok(Vec::new());
        };
        Ok(inner.talks_of(camp_id, include_speaker))
    }

    async fn get_talk_by_moniker(
        &self,
        moniker: &str,
        talk_id: i32,
        include_speaker: bool,
    ) -> Result<Option<Talk>, AppError> {
        self.read_guard()?;
        let inner = self.store.lock();
        let Some(camp_id) = inner.camp_id_by_moniker(moniker) else {
            return Ok(None);
        };
        let mut talk = match inner
            .talks
            .iter()
            .find(|t| t.camp_id == camp_id && t.id == talk_id)
        {
            Some(talk) => talk.clone(),
            None => return Ok(None),
        };
        if include_speaker {
            talk.speaker = inner.speaker(talk.speaker_id);
        }
        Ok(Some(talk))
    }

    fn add_talk(&self, talk: NewTalk) -> StagedTalk {
        let staged = StagedTalk::new();
        self.stage(Pending::AddTalk {
            talk,
            staged: staged.clone(),
        });
        staged
    }

    fn update_talk(&self, talk: Talk) {
        self.stage(Pending::UpdateTalk(talk));
    }

    fn delete_talk(&self, talk: Talk) {
        self.stage(Pending::DeleteTalk(talk.id));
    }

    fn add_camp(&self, camp: NewCamp) {
        self.stage(Pending::AddCamp(camp));
    }

    fn update_camp(&self, camp: Camp) {
        self.stage(Pending::UpdateCamp(camp));
    }

    fn delete_camp(&self, camp: Camp) {
        self.stage(Pending::DeleteCamp(camp.id));
    }

    async fn save_changes(&self) -> Result<bool, AppError> {
        let pending: Vec<Pending> = std::mem::take(
            &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if pending.is_empty() || !self.store.commit_succeeds.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let mut inner = self.store.lock();
        let mut affected = 0usize;

        for change in pending {
            match change {
                Pending::AddTalk { talk, staged } => {
                    let id = inner.next_talk_id();
                    let created = Talk {
                        id,
                        camp_id: talk.camp_id,
                        speaker_id: talk.speaker_id,
                        title: talk.title,
                        abstract_text: talk.abstract_text,
                        level: talk.level,
                        speaker: None,
                    };
                    inner.talks.push(created.clone());
                    staged.fulfill(created);
                    affected += 1;
                }
                Pending::UpdateTalk(talk) => {
                    if let Some(existing) = inner.talks.iter_mut().find(|t| t.id == talk.id) {
                        *existing = Talk {
                            speaker: None,
                            ..talk
                        };
                        affected += 1;
                    }
                }
                Pending::DeleteTalk(id) => {
                    let before = inner.talks.len();
                    inner.talks.retain(|t| t.id != id);
                    affected += before - inner.talks.len();
                }
                Pending::AddCamp(camp) => {
                    let id = inner.next_camp_id();
                    inner.camps.push(Camp {
                        id,
                        moniker: camp.moniker,
                        name: camp.name,
                        event_date: camp.event_date,
                        length: camp.length,
                        venue: camp.venue,
                        talks: None,
                    });
                    affected += 1;
                }
                Pending::UpdateCamp(camp) => {
                    if let Some(existing) = inner.camps.iter_mut().find(|c| c.id == camp.id) {
                        *existing = Camp {
                            talks: None,
                            ..camp
                        };
                        affected += 1;
                    }
                }
                Pending::DeleteCamp(id) => {
                    let before = inner.camps.len();
                    inner.camps.retain(|c| c.id != id);
                    // Talks cascade with their camp.
                    inner.talks.retain(|t| t.camp_id != id);
                    affected += before - inner.camps.len();
                }
            }
        }

        Ok(affected > 0)
    }
}

/// Factory handing out a fresh unit of work per request.
pub struct InMemoryFactory {
    store: Arc<InMemoryStore>,
}

impl CampRepositoryFactory for InMemoryFactory {
    fn repository(&self) -> Arc<dyn CampRepository> {
        Arc::new(InMemoryCampRepository {
            store: self.store.clone(),
            pending: Mutex::new(Vec::new()),
        })
    }
}

pub fn test_state() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let factory = InMemoryFactory {
        store: store.clone(),
    };
    let state = AppState::new(Arc::new(factory), LinkGenerator::new("/api"));
    (state, store)
}

/// Full application (routes + middleware) over the in-memory store.
pub fn make_server() -> (TestServer, Arc<InMemoryStore>) {
    let (state, store) = test_state();
    let server = TestServer::new(app_router(state)).unwrap();
    (server, store)
}
