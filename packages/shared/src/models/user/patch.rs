//! Patch documents for [`UserUpdateDto`].
//!
//! A document is an ordered list of `{ "op", "path", "value" }` operations. Only field-level
//! `add`, `replace` and `remove` are supported. Problems with an operation are recorded under
//! [`PATCH_ERROR_KEY`] and the remaining operations still run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::requests::UserUpdateDto;
use crate::validation::ValidationErrors;

pub const PATCH_ERROR_KEY: &str = "UserUpdateDto";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    #[serde(default)]
    pub value: Value,
}

impl PatchOperation {
    pub fn replace(path: &str, value: impl Into<Value>) -> Self {
        PatchOperation {
            op: "replace".to_string(),
            path: path.to_string(),
            value: value.into(),
        }
    }

    pub fn remove(path: &str) -> Self {
        PatchOperation {
            op: "remove".to_string(),
            path: path.to_string(),
            value: Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchOp {
    Add,
    Replace,
    Remove,
}

impl PatchOp {
    fn parse(op: &str) -> Option<Self> {
        match op.to_ascii_lowercase().as_str() {
            "add" => Some(PatchOp::Add),
            "replace" => Some(PatchOp::Replace),
            "remove" => Some(PatchOp::Remove),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserField {
    Id,
    Login,
    FirstName,
    LastName,
}

impl UserField {
    fn parse(path: &str) -> Option<Self> {
        let name = path.strip_prefix('/').unwrap_or(path);
        match name.to_ascii_lowercase().as_str() {
            "id" => Some(UserField::Id),
            "login" => Some(UserField::Login),
            "firstname" => Some(UserField::FirstName),
            "lastname" => Some(UserField::LastName),
            _ => None,
        }
    }

    fn slot<'a>(&self, target: &'a mut UserUpdateDto) -> Option<&'a mut Option<String>> {
        match self {
            UserField::Id => None,
            UserField::Login => Some(&mut target.login),
            UserField::FirstName => Some(&mut target.first_name),
            UserField::LastName => Some(&mut target.last_name),
        }
    }
}

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        PatchDocument(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Applies every operation in order, recording failures into `errors`.
    pub fn apply_to(&self, target: &mut UserUpdateDto, errors: &mut ValidationErrors) {
        for operation in &self.0 {
            if let Err(message) = apply_operation(operation, target) {
                errors.add(PATCH_ERROR_KEY, message);
            }
        }
    }
}

fn apply_operation(operation: &PatchOperation, target: &mut UserUpdateDto) -> Result<(), String> {
    let op = PatchOp::parse(&operation.op)
        .ok_or_else(|| format!("The operation '{}' is not supported.", operation.op))?;
    let field = UserField::parse(&operation.path).ok_or_else(|| {
        format!(
            "The target location specified by path '{}' was not found.",
            operation.path
        )
    })?;
    let slot = field.slot(target).ok_or_else(|| {
        format!(
            "The property at path '{}' cannot be modified.",
            operation.path
        )
    })?;

    match op {
        PatchOp::Remove => *slot = None,
        PatchOp::Add | PatchOp::Replace => {
            *slot = match &operation.value {
                Value::String(value) => Some(value.clone()),
                Value::Null => None,
                other => {
                    return Err(format!(
                        "The value '{}' is invalid for target location '{}'.",
                        other, operation.path
                    ))
                }
            }
        }
    }
    Ok(())
}
