/// Goal Routes
///
/// Savings targets. Progress updates go through PUT as a full
/// replacement of the mutable fields.

use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::audit::{log_audit, AuditLog};
use crate::domain::{Goal, NewGoal, User};
use crate::error::AppError;
use crate::store::owned;

/// POST /api/goals
///
/// # Errors
/// - 400: Validation errors (name, target_amount, current_amount)
pub async fn create_goal(
    user: web::ReqData<User>,
    payload: web::Json<NewGoal>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let record = Goal::new(&user.id, payload.into_inner())?;
    let record = owned::create(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new("CREATE", "goal", "SUCCESS", "Goal created")
            .with_resource_id(record.id.clone())
            .with_user_id(user.id),
    );

    Ok(HttpResponse::Created().json(record))
}

/// GET /api/goals
pub async fn list_goals(
    user: web::ReqData<User>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let records: Vec<Goal> = owned::list(pool.get_ref(), &user.id, None).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// PUT /api/goals/{id}
///
/// # Errors
/// - 400: Validation errors
/// - 404: No goal with this id belongs to the caller
pub async fn update_goal(
    user: web::ReqData<User>,
    path: web::Path<String>,
    payload: web::Json<NewGoal>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    let record = Goal::with_id(&id, &user.id, payload.into_inner())?;
    let record = owned::update(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new("UPDATE", "goal", "SUCCESS", "Goal replaced")
            .with_resource_id(record.id.clone())
            .with_user_id(user.id),
    );

    Ok(HttpResponse::Ok().json(record))
}

/// DELETE /api/goals/{id}
///
/// # Errors
/// - 404: No goal with this id belongs to the caller
pub async fn delete_goal(
    user: web::ReqData<User>,
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    owned::delete::<Goal>(pool.get_ref(), &user.id, &id).await?;

    log_audit(
        &AuditLog::new("DELETE", "goal", "SUCCESS", "Goal deleted")
            .with_resource_id(id)
            .with_user_id(user.id),
    );

    Ok(HttpResponse::NoContent().finish())
}
