/// Recurring Transaction Routes
///
/// Templates for repeating entries. The server stores the schedule
/// as given; advancing next_due_date is the client's responsibility.

use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::audit::{log_audit, AuditLog};
use crate::domain::{NewRecurringTransaction, RecurringTransaction, User};
use crate::error::AppError;
use crate::store::owned;

/// POST /api/recurring-transactions
///
/// # Errors
/// - 400: Validation errors (name, amount, type, frequency, ...)
pub async fn create_recurring_transaction(
    user: web::ReqData<User>,
    payload: web::Json<NewRecurringTransaction>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let record = RecurringTransaction::new(&user.id, payload.into_inner())?;
    let record = owned::create(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new(
            "CREATE",
            "recurring_transaction",
            "SUCCESS",
            "Recurring transaction created",
        )
        .with_resource_id(record.id.clone())
        .with_user_id(user.id),
    );

    Ok(HttpResponse::Created().json(record))
}

/// GET /api/recurring-transactions
pub async fn list_recurring_transactions(
    user: web::ReqData<User>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let records: Vec<RecurringTransaction> = owned::list(pool.get_ref(), &user.id, None).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// PUT /api/recurring-transactions/{id}
///
/// # Errors
/// - 400: Validation errors
/// - 404: No recurring transaction with this id belongs to the caller
pub async fn update_recurring_transaction(
    user: web::ReqData<User>,
    path: web::Path<String>,
    payload: web::Json<NewRecurringTransaction>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    let record = RecurringTransaction::with_id(&id, &user.id, payload.into_inner())?;
    let record = owned::update(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new(
            "UPDATE",
            "recurring_transaction",
            "SUCCESS",
            "Recurring transaction replaced",
        )
        .with_resource_id(record.id.clone())
        .with_user_id(user.id),
    );

    Ok(HttpResponse::Ok().json(record))
}

/// DELETE /api/recurring-transactions/{id}
///
/// # Errors
/// - 404: No recurring transaction with this id belongs to the caller
pub async fn delete_recurring_transaction(
    user: web::ReqData<User>,
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    owned::delete::<RecurringTransaction>(pool.get_ref(), &user.id, &id).await?;

    log_audit(
        &AuditLog::new(
            "DELETE",
            "recurring_transaction",
            "SUCCESS",
            "Recurring transaction deleted",
        )
        .with_resource_id(id)
        .with_user_id(user.id),
    );

    Ok(HttpResponse::NoContent().finish())
}
