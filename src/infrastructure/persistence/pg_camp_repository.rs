//! PostgreSQL implementation of the camp repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Camp, NewCamp, NewTalk, Speaker, Talk};
use crate::domain::repositories::{CampRepository, CampRepositoryFactory, StagedTalk};
use crate::error::AppError;

/// A mutation staged on the repository, executed on `save_changes`.
enum PendingChange {
    AddTalk { talk: NewTalk, staged: StagedTalk },
    UpdateTalk(Talk),
    DeleteTalk(i32),
    AddCamp(NewCamp),
    UpdateCamp(Camp),
    DeleteCamp(i32),
}

/// PostgreSQL unit of work over the conference schema.
///
/// Reads run directly against the pool. Staged mutations accumulate on the
/// instance and are executed inside a single transaction by
/// [`CampRepository::save_changes`]; on storage failure the transaction
/// rolls back and nothing is committed.
///
/// One instance per request — see [`PgCampRepositoryFactory`].
pub struct PgCampRepository {
    pool: PgPool,
    pending: Mutex<Vec<PendingChange>>,
}

impl PgCampRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn stage(&self, change: PendingChange) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change);
    }

    async fn talks_for_camp(&self, camp_id: i32) -> Result<Vec<Talk>, AppError> {
        let rows: Vec<TalkRow> = sqlx::query_as(
            r#"
            SELECT id, camp_id, speaker_id, title, "abstract", level
            FROM talks
            WHERE camp_id = $1
            ORDER BY id
            "#,
        )
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        let mut talks: Vec<Talk> = rows.into_iter().map(Talk::from).collect();
        self.attach_speakers(&mut talks).await?;
        Ok(talks)
    }

    async fn attach_speakers(&self, talks: &mut [Talk]) -> Result<(), AppError> {
        if talks.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = talks.iter().map(|t| t.speaker_id).collect();
        let rows: Vec<SpeakerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, company, blog_url, twitter, github
            FROM speakers
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let by_id: HashMap<i32, Speaker> =
            rows.into_iter().map(|r| (r.id, Speaker::from(r))).collect();
        for talk in talks {
            talk.speaker = by_id.get(&talk.speaker_id).cloned();
        }
        Ok(())
    }

    async fn embed_talks(&self, camps: &mut [Camp]) -> Result<(), AppError> {
        for camp in camps {
            camp.talks = Some(self.talks_for_camp(camp.id).await?);
        }
        Ok(())
    }
}

#[async_trait]
impl CampRepository for PgCampRepository {
    async fn get_all_camps(&self, include_talks: bool) -> Result<Vec<Camp>, AppError> {
        let rows: Vec<CampRow> = sqlx::query_as(
            r#"
            SELECT id, moniker, name, event_date, length, venue
            FROM camps
            ORDER BY event_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut camps: Vec<Camp> = rows.into_iter().map(Camp::from).collect();
        if include_talks {
            self.embed_talks(&mut camps).await?;
        }
        Ok(camps)
    }

    async fn get_camp(
        &self,
        moniker: &str,
        include_talks: bool,
    ) -> Result<Option<Camp>, AppError> {
        let row: Option<CampRow> = sqlx::query_as(
            r#"
            SELECT id, moniker, name, event_date, length, venue
            FROM camps
            WHERE moniker = $1
            "#,
        )
        .bind(moniker)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let mut camp = Camp::from(row);
        if include_talks {
            camp.talks = Some(self.talks_for_camp(camp.id).await?);
        }
        Ok(Some(camp))
    }

    async fn get_camps_by_event_date(
        &self,
        date: NaiveDate,
        include_talks: bool,
    ) -> Result<Vec<Camp>, AppError> {
        let rows: Vec<CampRow> = sqlx::query_as(
            r#"
            SELECT id, moniker, name, event_date, length, venue
            FROM camps
            WHERE event_date::date = $1
            ORDER BY event_date
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let mut camps: Vec<Camp> = rows.into_iter().map(Camp::from).collect();
        if include_talks {
            self.embed_talks(&mut camps).await?;
        }
        Ok(camps)
    }

    async fn get_all_speakers(&self) -> Result<Vec<Speaker>, AppError> {
        let rows: Vec<SpeakerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, company, blog_url, twitter, github
            FROM speakers
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Speaker::from).collect())
    }

    async fn get_speakers_by_moniker(&self, moniker: &str) -> Result<Vec<Speaker>, AppError> {
        let rows: Vec<SpeakerRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT s.id, s.first_name, s.last_name, s.company,
                   s.blog_url, s.twitter, s.github
            FROM speakers s
            JOIN talks t ON t.speaker_id = s.id
            JOIN camps c ON c.id = t.camp_id
            WHERE c.moniker = $1
            ORDER BY s.last_name, s.first_name
            "#,
        )
        .bind(moniker)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Speaker::from).collect())
    }

    async fn get_speaker(&self, speaker_id: i32) -> Result<Option<Speaker>, AppError> {
        let row: Option<SpeakerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, company, blog_url, twitter, github
            FROM speakers
            WHERE id = $1
            "#,
        )
        .bind(speaker_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Speaker::from))
    }

    async fn get_talks_by_moniker(
        &self,
        moniker: &str,
        include_speaker: bool,
    ) -> Result<Vec<Talk>, AppError> {
        let rows: Vec<TalkRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.camp_id, t.speaker_id, t.title, t."abstract", t.level
            FROM talks t
            JOIN camps c ON c.id = t.camp_id
            WHERE c.moniker = $1
            ORDER BY t.id
            "#,
        )
        .bind(moniker)
        .fetch_all(&self.pool)
        .await?;

        let mut talks: Vec<Talk> = rows.into_iter().map(Talk::from).collect();
        if include_speaker {
            self.attach_speakers(&mut talks).await?;
        }
        Ok(talks)
    }

    async fn get_talk_by_moniker(
        &self,
        moniker: &str,
        talk_id: i32,
        include_speaker: bool,
    ) -> Result<Option<Talk>, AppError> {
        let row: Option<TalkRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.camp_id, t.speaker_id, t.title, t."abstract", t.level
            FROM talks t
            JOIN camps c ON c.id = t.camp_id
            WHERE c.moniker = $1 AND t.id = $2
            "#,
        )
        .bind(moniker)
        .bind(talk_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        let mut talk = Talk::from(row);
        if include_speaker {
            self.attach_speakers(std::slice::from_mut(&mut talk)).await?;
        }
        Ok(Some(talk))
    }

    fn add_talk(&self, talk: NewTalk) -> StagedTalk {
        let staged = StagedTalk::new();
        self.stage(PendingChange::AddTalk {
            talk,
            staged: staged.clone(),
        });
        staged
    }

    fn update_talk(&self, talk: Talk) {
        self.stage(PendingChange::UpdateTalk(talk));
    }

    fn delete_talk(&self, talk: Talk) {
        self.stage(PendingChange::DeleteTalk(talk.id));
    }

    fn add_camp(&self, camp: NewCamp) {
        self.stage(PendingChange::AddCamp(camp));
    }

    fn update_camp(&self, camp: Camp) {
        self.stage(PendingChange::UpdateCamp(camp));
    }

    fn delete_camp(&self, camp: Camp) {
        self.stage(PendingChange::DeleteCamp(camp.id));
    }

    async fn save_changes(&self) -> Result<bool, AppError> {
        let pending: Vec<PendingChange> = std::mem::take(
            &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if pending.is_empty() {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        let mut affected: u64 = 0;

        for change in pending {
            match change {
                PendingChange::AddTalk { talk, staged } => {
                    let row: TalkRow = sqlx::query_as(
                        r#"
                        INSERT INTO talks (camp_id, speaker_id, title, "abstract", level)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING id, camp_id, speaker_id, title, "abstract", level
                        "#,
                    )
                    .bind(talk.camp_id)
                    .bind(talk.speaker_id)
                    .bind(&talk.title)
                    .bind(&talk.abstract_text)
                    .bind(talk.level)
                    .fetch_one(&mut *tx)
                    .await?;

                    staged.fulfill(Talk::from(row));
                    affected += 1;
                }
                PendingChange::UpdateTalk(talk) => {
                    let result = sqlx::query(
                        r#"
                        UPDATE talks
                        SET title = $1, "abstract" = $2, level = $3, speaker_id = $4
                        WHERE id = $5
                        "#,
                    )
                    .bind(&talk.title)
                    .bind(&talk.abstract_text)
                    .bind(talk.level)
                    .bind(talk.speaker_id)
                    .bind(talk.id)
                    .execute(&mut *tx)
                    .await?;

                    affected += result.rows_affected();
                }
                PendingChange::DeleteTalk(id) => {
                    let result = sqlx::query("DELETE FROM talks WHERE id = $1")
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;

                    affected += result.rows_affected();
                }
                PendingChange::AddCamp(camp) => {
                    sqlx::query(
                        r#"
                        INSERT INTO camps (moniker, name, event_date, length, venue)
                        VALUES ($1, $2, $3, $4, $5)
                        "#,
                    )
                    .bind(&camp.moniker)
                    .bind(&camp.name)
                    .bind(camp.event_date)
                    .bind(camp.length)
                    .bind(&camp.venue)
                    .execute(&mut *tx)
                    .await?;

                    affected += 1;
                }
                PendingChange::UpdateCamp(camp) => {
                    let result = sqlx::query(
                        r#"
                        UPDATE camps
                        SET name = $1, event_date = $2, length = $3, venue = $4
                        WHERE id = $5
                        "#,
                    )
                    .bind(&camp.name)
                    .bind(camp.event_date)
                    .bind(camp.length)
                    .bind(&camp.venue)
                    .bind(camp.id)
                    .execute(&mut *tx)
                    .await?;

                    affected += result.rows_affected();
                }
                PendingChange::DeleteCamp(id) => {
                    // Talks cascade at the schema level.
                    let result = sqlx::query("DELETE FROM camps WHERE id = $1")
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;

                    affected += result.rows_affected();
                }
            }
        }

        tx.commit().await?;
        Ok(affected > 0)
    }
}

/// Hands out a fresh [`PgCampRepository`] per request, sharing the pool.
pub struct PgCampRepositoryFactory {
    pool: PgPool,
}

impl PgCampRepositoryFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CampRepositoryFactory for PgCampRepositoryFactory {
    fn repository(&self) -> Arc<dyn CampRepository> {
        Arc::new(PgCampRepository::new(self.pool.clone()))
    }
}

#[derive(sqlx::FromRow)]
struct CampRow {
    id: i32,
    moniker: String,
    name: String,
    event_date: DateTime<Utc>,
    length: i32,
    venue: Option<String>,
}

impl From<CampRow> for Camp {
    fn from(row: CampRow) -> Self {
        Camp {
            id: row.id,
            moniker: row.moniker,
            name: row.name,
            event_date: row.event_date,
            length: row.length,
            venue: row.venue,
            talks: None,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SpeakerRow {
    id: i32,
    first_name: String,
    last_name: String,
    company: Option<String>,
    blog_url: Option<String>,
    twitter: Option<String>,
    github: Option<String>,
}

impl From<SpeakerRow> for Speaker {
    fn from(row: SpeakerRow) -> Self {
        Speaker {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            company: row.company,
            blog_url: row.blog_url,
            twitter: row.twitter,
            github: row.github,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TalkRow {
    id: i32,
    camp_id: i32,
    speaker_id: i32,
    title: String,
    #[sqlx(rename = "abstract")]
    abstract_text: String,
    level: i32,
}

impl From<TalkRow> for Talk {
    fn from(row: TalkRow) -> Self {
        Talk {
            id: row.id,
            camp_id: row.camp_id,
            speaker_id: row.speaker_id,
            title: row.title,
            abstract_text: row.abstract_text,
            level: row.level,
            speaker: None,
        }
    }
}
