use std::env;
use strum::EnumString;

#[derive(Default, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

// 開発環境・本番環境どちらで起動しているかを判定する
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match env::var("ENV") {
        Err(_) => default_env,
        Ok(v) => v.parse().unwrap_or(default_env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("development", Environment::Development)]
    #[case("production", Environment::Production)]
    fn parse_environment_names(#[case] name: &str, #[case] expected: Environment) {
        assert_eq!(name.parse::<Environment>().unwrap(), expected);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!("staging".parse::<Environment>().is_err());
    }
}
