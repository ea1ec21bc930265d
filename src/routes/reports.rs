/// Report Routes
///
/// Aggregates computed on demand from the caller's stored
/// transactions. Nothing is precomputed or cached.

use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::domain::{Transaction, User};
use crate::error::AppError;
use crate::store::owned;

use super::transactions::DateRangeQuery;

/// Totals over a period, split by direction and category
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub spending_by_category: HashMap<String, f64>,
    pub income_by_category: HashMap<String, f64>,
}

/// GET /api/reports/summary?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
///
/// Summarizes only the caller's transactions, optionally narrowed to
/// an inclusive date range.
pub async fn summary_report(
    user: web::ReqData<User>,
    query: web::Query<DateRangeQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let range = query.to_range();
    let transactions: Vec<Transaction> =
        owned::list(pool.get_ref(), &user.id, range.as_ref()).await?;

    let mut report = SummaryReport {
        total_income: 0.0,
        total_expenses: 0.0,
        net_balance: 0.0,
        spending_by_category: HashMap::new(),
        income_by_category: HashMap::new(),
    };

    for tx in &transactions {
        if tx.kind == "income" {
            report.total_income += tx.amount;
            *report
                .income_by_category
                .entry(tx.category.clone())
                .or_insert(0.0) += tx.amount;
        } else {
            report.total_expenses += tx.amount;
            *report
                .spending_by_category
                .entry(tx.category.clone())
                .or_insert(0.0) += tx.amount;
        }
    }
    report.net_balance = report.total_income - report.total_expenses;

    Ok(HttpResponse::Ok().json(report))
}
