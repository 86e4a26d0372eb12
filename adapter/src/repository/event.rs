use crate::database::{
    model::event::{EventRow, EventSpeakerRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        event::{AddSpeaker, CreateEvent},
        Event, EventSpeaker, DEFAULT_IMAGE_FILE,
    },
    id::EventId,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;

const SELECT_EVENTS: &str = r#"
    SELECT
        e.event_id,
        e.name,
        e.organizer_id,
        a.username AS organizer_name,
        e.description,
        e.event_type,
        e.start_date,
        e.end_date,
        e.start_time,
        e.address,
        e.price,
        e.image_file
    FROM events AS e
    LEFT OUTER JOIN accounts AS a ON a.account_id = e.organizer_id
"#;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENTS} WHERE e.event_id = ?"))
            .bind(event_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        self.attach_speaker(row).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENTS} WHERE e.name = ?"))
            .bind(name)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        self.attach_speaker(row).await
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "{SELECT_EVENTS} ORDER BY e.start_date ASC, e.event_id ASC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 登壇者は一度のクエリでまとめて取得し、イベントごとに振り分ける
        let mut speakers: HashMap<EventId, Vec<EventSpeaker>> = HashMap::new();
        for row in self.fetch_all_speakers().await? {
            speakers.entry(row.event_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let event_speakers = speakers.remove(&row.event_id).unwrap_or_default();
                row.into_event(event_speakers)
            })
            .collect())
    }

    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let res = sqlx::query(
            r#"
                INSERT INTO events (
                    name, organizer_id, description, event_type,
                    start_date, end_date, start_time, address, price, image_file
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.name)
        .bind(event.organizer_id)
        .bind(&event.description)
        .bind(&event.event_type)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.start_time)
        .bind(&event.address)
        .bind(event.price)
        .bind(event.image_file.as_deref().unwrap_or(DEFAULT_IMAGE_FILE))
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| map_constraint_violation(e, &event.name))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        Ok(EventId::new(res.last_insert_rowid()))
    }

    async fn add_speaker(&self, event: AddSpeaker) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO speakers (account_id, event_id)
                VALUES (?, ?)
                ON CONFLICT (account_id, event_id) DO NOTHING
            "#,
        )
        .bind(event.account_id)
        .bind(event.event_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| map_speaker_violation(e, event))?;

        Ok(())
    }
}

impl EventRepositoryImpl {
    async fn attach_speaker(&self, row: Option<EventRow>) -> AppResult<Option<Event>> {
        let Some(row) = row else {
            return Ok(None);
        };
        let speakers = self.fetch_speakers(row.event_id).await?;
        Ok(Some(row.into_event(speakers)))
    }

    async fn fetch_speakers(&self, event_id: EventId) -> AppResult<Vec<EventSpeaker>> {
        let rows = sqlx::query_as::<_, EventSpeakerRow>(
            r#"
                SELECT s.event_id, a.account_id, a.username
                FROM speakers AS s
                INNER JOIN accounts AS a ON a.account_id = s.account_id
                WHERE s.event_id = ?
                ORDER BY a.username ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(EventSpeaker::from).collect())
    }

    async fn fetch_all_speakers(&self) -> AppResult<Vec<EventSpeakerRow>> {
        sqlx::query_as::<_, EventSpeakerRow>(
            r#"
                SELECT s.event_id, a.account_id, a.username
                FROM speakers AS s
                INNER JOIN accounts AS a ON a.account_id = s.account_id
                ORDER BY a.username ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}

fn map_speaker_violation(e: sqlx::Error, event: AddSpeaker) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::UnprocessableEntity(format!(
                "アカウント（{}）またはイベント（{}）が存在しません。",
                event.account_id, event.event_id
            ));
        }
    }
    AppError::SpecificOperationError(e)
}

fn map_constraint_violation(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UnprocessableEntity(format!(
                "イベント名（{name}）は既に使われています。"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::UnprocessableEntity(format!(
                "イベント（{name}）の主催者が存在しません。"
            ));
        }
    }
    AppError::SpecificOperationError(e)
}
