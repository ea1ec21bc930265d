/// A single dated income or expense entry owned by one user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validators::{
    is_positive_amount, is_valid_description, is_valid_kind, is_valid_label,
};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
}

/// Client-supplied fields for creating or replacing a transaction.
/// The owner is never part of the payload.
#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Build a transaction with a fresh id, bound to its owner
    pub fn new(owner_id: &str, payload: NewTransaction) -> Result<Self, ValidationError> {
        Self::with_id(&Uuid::new_v4().to_string(), owner_id, payload)
    }

    /// Build a transaction for a known id (full replacement on update)
    pub fn with_id(
        id: &str,
        owner_id: &str,
        payload: NewTransaction,
    ) -> Result<Self, ValidationError> {
        is_positive_amount("amount", payload.amount)?;
        let kind = is_valid_kind(&payload.kind)?;
        let category = is_valid_label("category", &payload.category)?;
        let description = is_valid_description(payload.description.as_deref())?;

        Ok(Self {
            id: id.to_string(),
            user_id: owner_id.to_string(),
            date: payload.date,
            amount: payload.amount,
            kind,
            category,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewTransaction {
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            amount: 50.0,
            kind: "expense".to_string(),
            category: "food".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_new_generates_unique_ids() {
        let a = Transaction::new("user-1", payload()).unwrap();
        let b = Transaction::new("user-1", payload()).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.user_id, "user-1");
    }

    #[test]
    fn test_with_id_keeps_the_id() {
        let t = Transaction::with_id("tx-1", "user-1", payload()).unwrap();
        assert_eq!(t.id, "tx-1");
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let mut p = payload();
        p.amount = 0.0;
        assert!(Transaction::new("user-1", p).is_err());

        let mut p = payload();
        p.amount = -3.5;
        assert!(Transaction::new("user-1", p).is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let mut p = payload();
        p.kind = "transfer".to_string();
        assert!(Transaction::new("user-1", p).is_err());
    }

    #[test]
    fn test_category_is_trimmed() {
        let mut p = payload();
        p.category = "  food  ".to_string();
        let t = Transaction::new("user-1", p).unwrap();
        assert_eq!(t.category, "food");
    }

    #[test]
    fn test_kind_uses_wire_name_type() {
        let json = r#"{
            "date": "2024-01-01",
            "amount": 50,
            "type": "expense",
            "category": "food"
        }"#;
        let p: NewTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind, "expense");
        assert_eq!(p.description, None);

        let t = Transaction::new("user-1", p).unwrap();
        let out = serde_json::to_value(&t).unwrap();
        assert_eq!(out["type"], "expense");
        assert!(out.get("kind").is_none());
    }
}
