/// A user-defined bucket that transactions are labelled with.
/// Names are unique per owner, not globally.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validators::{is_valid_kind, is_valid_label};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(owner_id: &str, payload: NewCategory) -> Result<Self, ValidationError> {
        let name = is_valid_label("name", &payload.name)?;
        let kind = is_valid_kind(&payload.kind)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            name,
            kind,
        })
    }
}
