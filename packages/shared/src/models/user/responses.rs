use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read representation returned by get-by-id.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub login: String,
    pub full_name: String,
    pub games_played: i32,
    pub current_game_id: Option<Uuid>,
}
