use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ロール名は元データのラベル（ポルトガル語）のまま保存する
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display, EnumIter,
)]
pub enum Role {
    #[strum(serialize = "Gestor")]
    #[serde(rename = "Gestor")]
    Manager,
    #[strum(serialize = "Palestrante")]
    #[serde(rename = "Palestrante")]
    Speaker,
    #[strum(serialize = "Participante")]
    #[serde(rename = "Participante")]
    Participant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("Gestor", Role::Manager)]
    #[case("Palestrante", Role::Speaker)]
    #[case("Participante", Role::Participant)]
    fn role_labels_round_trip(#[case] label: &str, #[case] role: Role) {
        assert_eq!(label.parse::<Role>().unwrap(), role);
        assert_eq!(role.to_string(), label);
    }

    #[test]
    fn free_text_roles_are_rejected() {
        assert!("Admin".parse::<Role>().is_err());
        assert!("gestor".parse::<Role>().is_err());
    }

    #[test]
    fn exactly_three_roles() {
        assert_eq!(Role::iter().count(), 3);
    }
}
