/// A savings target with its current progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validators::{is_non_negative_amount, is_positive_amount, is_valid_label};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: NaiveDate,
}

impl Goal {
    pub fn new(owner_id: &str, payload: NewGoal) -> Result<Self, ValidationError> {
        Self::with_id(&Uuid::new_v4().to_string(), owner_id, payload)
    }

    pub fn with_id(id: &str, owner_id: &str, payload: NewGoal) -> Result<Self, ValidationError> {
        let name = is_valid_label("name", &payload.name)?;
        is_positive_amount("target_amount", payload.target_amount)?;
        is_non_negative_amount("current_amount", payload.current_amount)?;

        Ok(Self {
            id: id.to_string(),
            user_id: owner_id.to_string(),
            name,
            target_amount: payload.target_amount,
            current_amount: payload.current_amount,
            target_date: payload.target_date,
        })
    }
}
