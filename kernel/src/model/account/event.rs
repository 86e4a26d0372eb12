use crate::model::role::Role;
use derive_new::new;

// password は平文で受け取り、保存前にリポジトリ側でハッシュ化する
#[derive(new, Debug)]
pub struct CreateAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}
