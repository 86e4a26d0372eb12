use crate::database::{model::account::AccountRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    account::{event::CreateAccount, Account},
    id::AccountId,
};
use kernel::repository::account::AccountRepository;
use shared::error::{AppError, AppResult};
use std::sync::OnceLock;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

#[derive(new)]
pub struct AccountRepositoryImpl {
    db: ConnectionPool,
    password_hash_cost: u32,
    #[new(default)]
    dummy_hash: OnceLock<String>,
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        self.fetch_row_by_username(username)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
                SELECT account_id, username, email, password_hash, role
                FROM accounts
                WHERE account_id = ?
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Account::try_from).transpose()
    }

    async fn create(&self, event: CreateAccount) -> AppResult<Account> {
        let mut tx = self.db.begin().await?;

        // 事前に重複を確認し、どちらの項目が衝突したかを呼び出し側へ伝える
        {
            let taken = sqlx::query_as::<_, (String, String)>(
                r#"
                    SELECT username, email
                    FROM accounts
                    WHERE username = ? OR email = ?
                "#,
            )
            .bind(&event.username)
            .bind(&event.email)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if taken.iter().any(|(username, _)| *username == event.username) {
                return Err(AppError::DuplicateUsername(event.username));
            }
            if taken.iter().any(|(_, email)| *email == event.email) {
                return Err(AppError::DuplicateEmail(event.email));
            }
        }

        let hashed_password = hash_password(&event.password, self.password_hash_cost)?;
        let res = sqlx::query(
            r#"
                INSERT INTO accounts (username, email, password_hash, role)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&event.username)
        .bind(&event.email)
        .bind(&hashed_password)
        .bind(event.role.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &event))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No account record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Account {
            account_id: AccountId::new(res.last_insert_rowid()),
            username: event.username,
            email: event.email,
            role: event.role,
        })
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Account> {
        // ユーザーが存在しない場合もパスワード不一致の場合も、同じエラーを同じコストで返す
        let Some(row) = self.fetch_row_by_username(username).await? else {
            let _ = bcrypt::verify(password, self.dummy_hash()?)?;
            return Err(AppError::UnauthenticatedError);
        };
        if !bcrypt::verify(password, &row.password_hash)? {
            return Err(AppError::UnauthenticatedError);
        }
        Account::try_from(row)
    }
}

impl AccountRepositoryImpl {
    // 設定されたコストで作ったハッシュを一度だけ用意して使い回す
    fn dummy_hash(&self) -> AppResult<&str> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash);
        }
        let hash = hash_password(DUMMY_PASSWORD, self.password_hash_cost)?;
        Ok(self.dummy_hash.get_or_init(|| hash))
    }

    async fn fetch_row_by_username(&self, username: &str) -> AppResult<Option<AccountRow>> {
        sqlx::query_as::<_, AccountRow>(
            r#"
                SELECT account_id, username, email, password_hash, role
                FROM accounts
                WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}

fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(AppError::from)
}

// 事前確認をすり抜けた重複は制約違反として返ってくる
fn map_unique_violation(e: sqlx::Error, event: &CreateAccount) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            if db_err.message().contains("accounts.email") {
                return AppError::DuplicateEmail(event.email.clone());
            }
            return AppError::DuplicateUsername(event.username.clone());
        }
    }
    AppError::SpecificOperationError(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::migrated_pool;
    use kernel::model::role::Role;
    use rstest::rstest;
    use std::time::Instant;
    // bcrypt keeps its MIN_COST private; same value (4).
    const BCRYPT_MIN_COST: u32 = 4;

    async fn repository() -> AccountRepositoryImpl {
        AccountRepositoryImpl::new(migrated_pool().await, BCRYPT_MIN_COST)
    }

    fn alice() -> CreateAccount {
        CreateAccount::new(
            "alice".into(),
            "a@x.com".into(),
            "p".into(),
            Role::Participant,
        )
    }

    #[tokio::test]
    async fn test_register_account() -> anyhow::Result<()> {
        let repo = repository().await;

        let created = repo.create(alice()).await?;
        assert_eq!(created.username, "alice");
        assert_eq!(created.role, Role::Participant);

        let found = repo.find_by_username("alice").await?;
        assert_eq!(found.as_ref(), Some(&created));

        let by_id = repo.find_by_id(created.account_id).await?;
        assert_eq!(by_id, Some(created));

        assert!(repo.find_by_username("bob").await?.is_none());
        assert!(repo.find_by_id(AccountId::new(999)).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn stores_only_a_hash_of_the_password() -> anyhow::Result<()> {
        let repo = repository().await;
        repo.create(alice()).await?;

        let row = repo.fetch_row_by_username("alice").await?.unwrap();
        assert_ne!(row.password_hash, "p");
        assert!(row.password_hash.len() <= 80);
        assert!(bcrypt::verify("p", &row.password_hash)?);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_is_reported() -> anyhow::Result<()> {
        let repo = repository().await;
        repo.create(alice()).await?;

        let res = repo
            .create(CreateAccount::new(
                "alice".into(),
                "other@x.com".into(),
                "p".into(),
                Role::Speaker,
            ))
            .await;
        assert!(matches!(res, Err(AppError::DuplicateUsername(name)) if name == "alice"));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_reported() -> anyhow::Result<()> {
        let repo = repository().await;
        repo.create(alice()).await?;

        let res = repo
            .create(CreateAccount::new(
                "bob".into(),
                "a@x.com".into(),
                "p".into(),
                Role::Speaker,
            ))
            .await;
        assert!(matches!(res, Err(AppError::DuplicateEmail(email)) if email == "a@x.com"));
        Ok(())
    }

    #[tokio::test]
    async fn verify_credentials_accepts_the_registered_password() -> anyhow::Result<()> {
        let repo = repository().await;
        let created = repo.create(alice()).await?;

        let verified = repo.verify_credentials("alice", "p").await?;
        assert_eq!(verified, created);
        Ok(())
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("nobody", "p")]
    #[case("", "")]
    #[tokio::test]
    async fn verify_credentials_failures_are_indistinguishable(
        #[case] username: &str,
        #[case] password: &str,
    ) -> anyhow::Result<()> {
        let repo = repository().await;
        repo.create(alice()).await?;

        let err = repo.verify_credentials(username, password).await.unwrap_err();
        assert!(matches!(err, AppError::UnauthenticatedError));
        assert_eq!(err.to_string(), "Invalid username or password");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_username_costs_as_much_as_a_wrong_password() -> anyhow::Result<()> {
        let repo = AccountRepositoryImpl::new(migrated_pool().await, 10);
        repo.create(alice()).await?;
        // 初回のダミーハッシュ生成を計測から外す
        let _ = repo.verify_credentials("nobody", "p").await;

        let started = Instant::now();
        let wrong_password = repo.verify_credentials("alice", "wrong").await;
        let wrong_password_elapsed = started.elapsed();

        let started = Instant::now();
        let unknown_username = repo.verify_credentials("nobody", "wrong").await;
        let unknown_username_elapsed = started.elapsed();

        assert!(matches!(wrong_password, Err(AppError::UnauthenticatedError)));
        assert!(matches!(unknown_username, Err(AppError::UnauthenticatedError)));
        assert!(
            unknown_username_elapsed * 4 >= wrong_password_elapsed,
            "unknown: {unknown_username_elapsed:?}, wrong password: {wrong_password_elapsed:?}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn dummy_hash_uses_the_configured_cost() -> anyhow::Result<()> {
        let repo = repository().await;
        let hash = repo.dummy_hash()?.to_string();
        assert!(hash.starts_with(&format!("$2b${:02}$", BCRYPT_MIN_COST)));
        assert_eq!(repo.dummy_hash()?, hash);
        Ok(())
    }
}
