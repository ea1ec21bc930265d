/// A template for a repeating income or expense, carrying its own
/// schedule. Due-date advancement is driven by the client; the server
/// stores whatever next_due_date it is given.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validators::{
    is_positive_amount, is_valid_description, is_valid_frequency, is_valid_kind, is_valid_label,
};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RecurringTransaction {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct NewRecurringTransaction {
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
}

impl RecurringTransaction {
    pub fn new(owner_id: &str, payload: NewRecurringTransaction) -> Result<Self, ValidationError> {
        Self::with_id(&Uuid::new_v4().to_string(), owner_id, payload)
    }

    pub fn with_id(
        id: &str,
        owner_id: &str,
        payload: NewRecurringTransaction,
    ) -> Result<Self, ValidationError> {
        let name = is_valid_label("name", &payload.name)?;
        is_positive_amount("amount", payload.amount)?;
        let kind = is_valid_kind(&payload.kind)?;
        let category = is_valid_label("category", &payload.category)?;
        let description = is_valid_description(payload.description.as_deref())?;
        let frequency = is_valid_frequency(&payload.frequency)?;

        Ok(Self {
            id: id.to_string(),
            user_id: owner_id.to_string(),
            name,
            amount: payload.amount,
            kind,
            category,
            description,
            frequency,
            start_date: payload.start_date,
            next_due_date: payload.next_due_date,
        })
    }
}
