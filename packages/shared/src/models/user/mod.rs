use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod mapping;
pub mod patch;
pub mod requests;
pub mod responses;

/// Storage-side user record. The id is the only identity key and never changes once assigned.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserEntity {
    pub id: Uuid,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub games_played: i32,
    pub current_game_id: Option<Uuid>,
}

impl UserEntity {
    /// A user that has not been stored yet. The repository assigns the id on insert.
    pub fn new(login: String, first_name: String, last_name: String) -> Self {
        UserEntity {
            id: Uuid::nil(),
            login,
            first_name,
            last_name,
            games_played: 0,
            current_game_id: None,
        }
    }

    pub fn with_id(id: Uuid, login: String, first_name: String, last_name: String) -> Self {
        UserEntity {
            id,
            ..UserEntity::new(login, first_name, last_name)
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unsaved() {
        let user = UserEntity::new("alice".to_string(), "Alice".to_string(), "Smith".to_string());
        assert!(user.id.is_nil());
        assert_eq!(user.games_played, 0);
        assert_eq!(user.current_game_id, None);
    }

    #[test]
    fn test_full_name_puts_last_name_first() {
        let user = UserEntity::new("alice".to_string(), "Alice".to_string(), "Smith".to_string());
        assert_eq!(user.full_name(), "Smith Alice");
    }

    #[test]
    fn test_with_id_keeps_id() {
        let id = Uuid::new_v4();
        let user = UserEntity::with_id(id, "bob".to_string(), "Bob".to_string(), "Jones".to_string());
        assert_eq!(user.id, id);
        assert_eq!(user.login, "bob");
    }
}
