use garde::Validate;
use kernel::model::{account::event::CreateAccount, role::Role};
use serde::Deserialize;
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[garde(length(chars, min = 1, max = 15))]
    pub username: String,
    #[garde(email, length(chars, max = 50))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
    #[garde(skip)]
    pub role: String,
}

impl TryFrom<RegisterRequest> for CreateAccount {
    type Error = AppError;

    fn try_from(value: RegisterRequest) -> AppResult<Self> {
        let RegisterRequest {
            username,
            email,
            password,
            role,
        } = value;
        let role = role
            .parse::<Role>()
            .map_err(|_| AppError::UnprocessableEntity(format!("Unknown role: {role}")))?;
        Ok(CreateAccount {
            username,
            email,
            password,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(username: &str, email: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    #[test]
    fn valid_registration_converts() {
        let req = request("alice", "a@x.com", "p", "Participante");
        assert!(req.validate(&()).is_ok());

        let create = CreateAccount::try_from(req).unwrap();
        assert_eq!(create.username, "alice");
        assert_eq!(create.role, Role::Participant);
    }

    #[rstest]
    #[case("ããããããããããã")]
    #[case("ユーザー名は十五文字までです。")]
    #[case("fifteen_chars_x")]
    fn username_length_counts_characters(#[case] username: &str) {
        let req = request(username, "a@x.com", "p", "Gestor");
        assert!(req.validate(&()).is_ok());
    }

    #[rstest]
    #[case(request("", "a@x.com", "p", "Gestor"))]
    #[case(request("ユーザー名は十五文字を超えています", "a@x.com", "p", "Gestor"))]
    #[case(request("sixteen_chars_xx", "a@x.com", "p", "Gestor"))]
    #[case(request("alice", "not-an-email", "p", "Gestor"))]
    #[case(request("alice", "a@x.com", "", "Gestor"))]
    fn invalid_registration_is_rejected(#[case] req: RegisterRequest) {
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let res = CreateAccount::try_from(request("alice", "a@x.com", "p", "Admin"));
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }
}
