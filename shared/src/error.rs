use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("データベースに接続できませんでした。")]
    StoreUnavailable(#[source] sqlx::Error),
    #[error("スキーマの作成に失敗しました。")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("Invalid username or password")]
    UnauthenticatedError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateUsername(_) | AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            e @ (AppError::StoreUnavailable(_)
            | AppError::MigrationError(_)
            | AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        status_code.into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::EntityNotFound("event".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::DuplicateUsername("alice".into()), StatusCode::CONFLICT)]
    #[case(AppError::DuplicateEmail("a@x.com".into()), StatusCode::CONFLICT)]
    #[case(AppError::UnauthenticatedError, StatusCode::UNAUTHORIZED)]
    #[case(AppError::ConversionEntityError("role".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn error_maps_to_status(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }
}
