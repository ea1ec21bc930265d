/// Transaction Routes
///
/// CRUD over the caller's own transactions. The owner always comes
/// from the authenticated user in request extensions, never from the
/// payload or the path.

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::audit::{log_audit, AuditLog};
use crate::domain::{NewTransaction, Transaction, User};
use crate::error::AppError;
use crate::store::owned::{self, DateRange};

/// Optional inclusive date bounds accepted on list endpoints
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRangeQuery {
    pub fn to_range(&self) -> Option<DateRange> {
        if self.start_date.is_none() && self.end_date.is_none() {
            None
        } else {
            Some(DateRange {
                start: self.start_date,
                end: self.end_date,
            })
        }
    }
}

/// POST /api/transactions
///
/// # Errors
/// - 400: Validation errors (amount, type, category, description)
/// - 401: Missing or invalid token (handled by middleware)
pub async fn create_transaction(
    user: web::ReqData<User>,
    payload: web::Json<NewTransaction>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let record = Transaction::new(&user.id, payload.into_inner())?;
    let record = owned::create(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new("CREATE", "transaction", "SUCCESS", "Transaction created")
            .with_resource_id(record.id.clone())
            .with_user_id(user.id),
    );

    Ok(HttpResponse::Created().json(record))
}

/// GET /api/transactions?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
///
/// Lists only the caller's transactions, optionally narrowed by date.
pub async fn list_transactions(
    user: web::ReqData<User>,
    query: web::Query<DateRangeQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let range = query.to_range();
    let records: Vec<Transaction> = owned::list(pool.get_ref(), &user.id, range.as_ref()).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// GET /api/transactions/{id}
///
/// # Errors
/// - 404: No transaction with this id belongs to the caller
pub async fn get_transaction(
    user: web::ReqData<User>,
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let record: Transaction = owned::get(pool.get_ref(), &user.id, &id).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// PUT /api/transactions/{id}
///
/// Replaces every mutable field.
///
/// # Errors
/// - 400: Validation errors
/// - 404: No transaction with this id belongs to the caller
pub async fn update_transaction(
    user: web::ReqData<User>,
    path: web::Path<String>,
    payload: web::Json<NewTransaction>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    let record = Transaction::with_id(&id, &user.id, payload.into_inner())?;
    let record = owned::update(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new("UPDATE", "transaction", "SUCCESS", "Transaction replaced")
            .with_resource_id(record.id.clone())
            .with_user_id(user.id),
    );

    Ok(HttpResponse::Ok().json(record))
}

/// DELETE /api/transactions/{id}
///
/// # Errors
/// - 404: No transaction with this id belongs to the caller
pub async fn delete_transaction(
    user: web::ReqData<User>,
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    owned::delete::<Transaction>(pool.get_ref(), &user.id, &id).await?;

    log_audit(
        &AuditLog::new("DELETE", "transaction", "SUCCESS", "Transaction deleted")
            .with_resource_id(id)
            .with_user_id(user.id),
    );

    Ok(HttpResponse::NoContent().finish())
}
