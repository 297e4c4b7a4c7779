use crate::models::user::UserEntity;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

/// Storage capability the user endpoints are written against.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, UserRepositoryError>;
    /// Stores a new user and returns it with its assigned id.
    async fn insert(&self, user: UserEntity) -> Result<UserEntity, UserRepositoryError>;
    async fn update(&self, user: &UserEntity) -> Result<(), UserRepositoryError>;
    /// Stores the user under its id, returning `true` when no user with that id existed.
    async fn update_or_insert(&self, user: &UserEntity) -> Result<bool, UserRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), UserRepositoryError>;
}

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn id_key(id: Uuid) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

fn is_conditional_check_failed<E, R>(error: &SdkError<E, R>) -> bool
where
    E: ConditionalCheck,
{
    error
        .as_service_error()
        .map_or(false, ConditionalCheck::is_conditional_check_failed)
}

trait ConditionalCheck {
    fn is_conditional_check_failed(&self) -> bool;
}

impl ConditionalCheck for aws_sdk_dynamodb::operation::put_item::PutItemError {
    fn is_conditional_check_failed(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}

impl ConditionalCheck for aws_sdk_dynamodb::operation::delete_item::DeleteItemError {
    fn is_conditional_check_failed(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", id_key(id))
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        output
            .item
            .map(|item| from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string())))
            .transpose()
    }

    async fn insert(&self, mut user: UserEntity) -> Result<UserEntity, UserRepositoryError> {
        if user.id.is_nil() {
            user.id = Uuid::new_v4();
        }
        let item = to_item(&user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(user),
            Err(e) if is_conditional_check_failed(&e) => Err(UserRepositoryError::AlreadyExists),
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn update(&self, user: &UserEntity) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failed(&e) => Err(UserRepositoryError::NotFound),
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn update_or_insert(&self, user: &UserEntity) -> Result<bool, UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let output = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        Ok(output.attributes.map_or(true, |previous| previous.is_empty()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", id_key(id))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failed(&e) => Err(UserRepositoryError::NotFound),
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }
}
