use crate::{
    model::{
        account::event::CreateAccount,
        event::event::{AddSpeaker, CreateEvent},
        role::Role,
    },
    repository::{account::AccountRepository, event::EventRepository},
};
use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, AppResult};

const SEED_PASSWORD: &str = "password";
const SEED_SPEAKER: &str = "palestrante";

struct SeedAccount {
    username: &'static str,
    email: &'static str,
    role: Role,
}

struct SeedEvent {
    name: &'static str,
    organizer: &'static str,
    description: &'static str,
    event_type: &'static str,
    start_date: (i32, u32, u32),
    end_date: (i32, u32, u32),
    start_time: (u32, u32),
    address: &'static str,
    price: f64,
    image_file: &'static str,
}

const SEED_ACCOUNTS: [SeedAccount; 3] = [
    SeedAccount {
        username: "gestor",
        email: "gestor@example.com",
        role: Role::Manager,
    },
    SeedAccount {
        username: "palestrante",
        email: "palestrante@example.com",
        role: Role::Speaker,
    },
    SeedAccount {
        username: "participante",
        email: "participante@example.com",
        role: Role::Participant,
    },
];

const SEED_EVENTS: [SeedEvent; 2] = [
    SeedEvent {
        name: "Cultural Event 1",
        organizer: "gestor",
        description: "This is a cultural event.",
        event_type: "Cultural",
        start_date: (2023, 6, 1),
        end_date: (2023, 6, 5),
        start_time: (10, 0),
        address: "123 Culture St",
        price: 10.0,
        image_file: "header--avatar4.svg",
    },
    SeedEvent {
        name: "Educational Event 1",
        organizer: "gestor",
        description: "This is an educational event.",
        event_type: "Educational",
        start_date: (2023, 7, 1),
        end_date: (2023, 7, 5),
        start_time: (9, 0),
        address: "456 Education Rd",
        price: 20.0,
        image_file: "header--avatar4.svg",
    },
];

/// Number of records a seeding run actually inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub accounts_created: usize,
    pub events_created: usize,
}

/// Ensures the default accounts and events exist.
///
/// Every insert is preceded by an existence check, so running this any
/// number of times converges to the same data set.
pub async fn seed_defaults(
    accounts: &dyn AccountRepository,
    events: &dyn EventRepository,
) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for seed in &SEED_ACCOUNTS {
        if accounts.find_by_username(seed.username).await?.is_some() {
            continue;
        }
        accounts
            .create(CreateAccount::new(
                seed.username.into(),
                seed.email.into(),
                SEED_PASSWORD.into(),
                seed.role,
            ))
            .await?;
        tracing::debug!(username = seed.username, "seeded account");
        report.accounts_created += 1;
    }

    for seed in &SEED_EVENTS {
        if events.find_by_name(seed.name).await?.is_some() {
            continue;
        }
        // 主催者が見つからない場合は主催者なしで登録する
        let organizer = accounts.find_by_username(seed.organizer).await?;
        if organizer.is_none() {
            tracing::warn!(
                event = seed.name,
                organizer = seed.organizer,
                "organizer account is missing; seeding event without organizer"
            );
        }
        let event_id = events
            .create(CreateEvent {
                name: seed.name.into(),
                organizer_id: organizer.map(|a| a.account_id),
                description: seed.description.into(),
                event_type: seed.event_type.into(),
                start_date: date(seed.start_date)?,
                end_date: date(seed.end_date)?,
                start_time: time(seed.start_time)?,
                address: seed.address.into(),
                price: seed.price,
                image_file: Some(seed.image_file.into()),
            })
            .await?;
        if let Some(speaker) = accounts.find_by_username(SEED_SPEAKER).await? {
            events
                .add_speaker(AddSpeaker::new(event_id, speaker.account_id))
                .await?;
        }
        tracing::debug!(event = seed.name, %event_id, "seeded event");
        report.events_created += 1;
    }

    Ok(report)
}

fn date((y, m, d): (i32, u32, u32)) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| AppError::ConversionEntityError(format!("invalid date {y}-{m}-{d}")))
}

fn time((h, m): (u32, u32)) -> AppResult<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
        .ok_or_else(|| AppError::ConversionEntityError(format!("invalid time {h}:{m}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        account::Account,
        event::{Event, EventOrganizer, EventSpeaker},
        id::{AccountId, EventId},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryStore {
        accounts: Mutex<Vec<Account>>,
        events: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl AccountRepository for InMemoryStore {
        async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.username == username).cloned())
        }

        async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.account_id == account_id).cloned())
        }

        async fn create(&self, event: CreateAccount) -> AppResult<Account> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.iter().any(|a| a.username == event.username) {
                return Err(AppError::DuplicateUsername(event.username));
            }
            let account = Account {
                account_id: AccountId::new(accounts.len() as i64 + 1),
                username: event.username,
                email: event.email,
                role: event.role,
            };
            accounts.push(account.clone());
            Ok(account)
        }

        async fn verify_credentials(&self, _: &str, _: &str) -> AppResult<Account> {
            Err(AppError::UnauthenticatedError)
        }
    }

    #[async_trait]
    impl EventRepository for InMemoryStore {
        async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
            let events = self.events.lock().unwrap();
            Ok(events.iter().find(|e| e.event_id == event_id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> AppResult<Option<Event>> {
            let events = self.events.lock().unwrap();
            Ok(events.iter().find(|e| e.name == name).cloned())
        }

        async fn find_all(&self) -> AppResult<Vec<Event>> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
            let organizer = match event.organizer_id {
                Some(id) => AccountRepository::find_by_id(self, id)
                    .await?
                    .map(|a| EventOrganizer {
                        account_id: a.account_id,
                        username: a.username,
                    }),
                None => None,
            };
            let mut events = self.events.lock().unwrap();
            let event_id = EventId::new(events.len() as i64 + 1);
            events.push(Event {
                event_id,
                name: event.name,
                organizer,
                description: event.description,
                event_type: event.event_type,
                start_date: event.start_date,
                end_date: event.end_date,
                start_time: event.start_time,
                address: event.address,
                price: event.price,
                image_file: event.image_file.unwrap_or_default(),
                speakers: vec![],
            });
            Ok(event_id)
        }

        async fn add_speaker(&self, event: AddSpeaker) -> AppResult<()> {
            let speaker = AccountRepository::find_by_id(self, event.account_id)
                .await?
                .map(|a| EventSpeaker {
                    account_id: a.account_id,
                    username: a.username,
                });
            let mut events = self.events.lock().unwrap();
            if let (Some(target), Some(speaker)) = (
                events.iter_mut().find(|e| e.event_id == event.event_id),
                speaker,
            ) {
                if !target.speakers.contains(&speaker) {
                    target.speakers.push(speaker);
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn seeding_twice_creates_nothing_new() -> anyhow::Result<()> {
        let store = InMemoryStore::default();

        let first = seed_defaults(&store, &store).await?;
        assert_eq!(
            first,
            SeedReport {
                accounts_created: 3,
                events_created: 2
            }
        );

        let second = seed_defaults(&store, &store).await?;
        assert_eq!(second, SeedReport::default());
        assert_eq!(store.accounts.lock().unwrap().len(), 3);
        assert_eq!(store.events.lock().unwrap().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn seeded_events_have_organizer_and_speaker() -> anyhow::Result<()> {
        let store = InMemoryStore::default();
        seed_defaults(&store, &store).await?;

        let event = EventRepository::find_by_name(&store, "Cultural Event 1")
            .await?
            .unwrap();
        assert_eq!(event.organizer.unwrap().username, "gestor");
        assert_eq!(event.speakers.len(), 1);
        assert_eq!(event.speakers[0].username, "palestrante");
        assert_eq!(event.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        Ok(())
    }

    // 作成したアカウントを保持しないストア。主催者・登壇者の解決は常に失敗する
    struct ForgetfulAccounts;

    #[async_trait]
    impl AccountRepository for ForgetfulAccounts {
        async fn find_by_username(&self, _: &str) -> AppResult<Option<Account>> {
            Ok(None)
        }

        async fn find_by_id(&self, _: AccountId) -> AppResult<Option<Account>> {
            Ok(None)
        }

        async fn create(&self, event: CreateAccount) -> AppResult<Account> {
            Ok(Account {
                account_id: AccountId::new(1),
                username: event.username,
                email: event.email,
                role: event.role,
            })
        }

        async fn verify_credentials(&self, _: &str, _: &str) -> AppResult<Account> {
            Err(AppError::UnauthenticatedError)
        }
    }

    #[tokio::test]
    async fn missing_organizer_leaves_event_without_organizer() -> anyhow::Result<()> {
        let store = InMemoryStore::default();
        seed_defaults(&ForgetfulAccounts, &store).await?;

        let event = EventRepository::find_by_name(&store, "Educational Event 1")
            .await?
            .unwrap();
        assert!(event.organizer.is_none());
        assert!(event.speakers.is_empty());
        Ok(())
    }
}
