/// Category Routes
///
/// Create, list and delete the caller's categories. Names are unique
/// per user; a duplicate reports a conflict. Categories have no
/// update route: rename by delete and recreate.

use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::audit::{log_audit, AuditLog};
use crate::domain::{Category, NewCategory, User};
use crate::error::AppError;
use crate::store::owned;

/// POST /api/categories
///
/// # Errors
/// - 400: Validation errors (name, type)
/// - 409: The caller already has a category with this name
pub async fn create_category(
    user: web::ReqData<User>,
    payload: web::Json<NewCategory>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let record = Category::new(&user.id, payload.into_inner())?;
    let record = owned::create(pool.get_ref(), record).await?;

    log_audit(
        &AuditLog::new("CREATE", "category", "SUCCESS", "Category created")
            .with_resource_id(record.id.clone())
            .with_user_id(user.id),
    );

    Ok(HttpResponse::Created().json(record))
}

/// GET /api/categories
pub async fn list_categories(
    user: web::ReqData<User>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let records: Vec<Category> = owned::list(pool.get_ref(), &user.id, None).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// DELETE /api/categories/{id}
///
/// # Errors
/// - 404: No category with this id belongs to the caller
pub async fn delete_category(
    user: web::ReqData<User>,
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    let id = path.into_inner();
    owned::delete::<Category>(pool.get_ref(), &user.id, &id).await?;

    log_audit(
        &AuditLog::new("DELETE", "category", "SUCCESS", "Category deleted")
            .with_resource_id(id)
            .with_user_id(user.id),
    );

    Ok(HttpResponse::NoContent().finish())
}
