//! Conversions between the wire shapes and [`UserEntity`].
//!
//! Request shapes are expected to have passed validation before they are turned into entities;
//! missing required values become empty strings.

use super::requests::{UserCreateDto, UserUpdateDto};
use super::responses::UserDto;
use super::UserEntity;

impl From<&UserEntity> for UserDto {
    fn from(user: &UserEntity) -> Self {
        UserDto {
            id: user.id,
            login: user.login.clone(),
            full_name: user.full_name(),
            games_played: user.games_played,
            current_game_id: user.current_game_id,
        }
    }
}

impl From<UserCreateDto> for UserEntity {
    fn from(dto: UserCreateDto) -> Self {
        let first_name = dto.first_name().to_string();
        let last_name = dto.last_name().to_string();
        UserEntity::new(dto.login.unwrap_or_default(), first_name, last_name)
    }
}

/// A full replacement: game statistics start over.
impl From<UserUpdateDto> for UserEntity {
    fn from(dto: UserUpdateDto) -> Self {
        UserEntity::with_id(
            dto.id,
            dto.login.unwrap_or_default(),
            dto.first_name.unwrap_or_default(),
            dto.last_name.unwrap_or_default(),
        )
    }
}

impl From<&UserEntity> for UserUpdateDto {
    fn from(user: &UserEntity) -> Self {
        UserUpdateDto {
            id: user.id,
            login: Some(user.login.clone()),
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
        }
    }
}

impl UserUpdateDto {
    /// Copies the editable fields onto an existing entity, leaving its id and game state alone.
    pub fn apply_to(self, user: &mut UserEntity) {
        user.login = self.login.unwrap_or_default();
        user.first_name = self.first_name.unwrap_or_default();
        user.last_name = self.last_name.unwrap_or_default();
    }
}
