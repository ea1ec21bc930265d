/// Per-user resource accessor
///
/// One generic CRUD surface shared by every record type that belongs
/// to a user. Every statement filters on (id, user_id) in one step;
/// ownership is never checked in a separate read. A wrong id and
/// someone else's id are indistinguishable: both report NotFound.

use chrono::NaiveDate;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Sqlite, SqlitePool};

use crate::domain::{Category, Goal, RecurringTransaction, Transaction};
use crate::error::{AppError, DatabaseError};

/// Optional date bounds for list queries, inclusive on both ends
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// A record type stored in its own table, keyed to an owning user
pub trait OwnedRecord: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Sync + Unpin {
    const TABLE: &'static str;
    /// Full column list, id and user_id first
    const COLUMNS: &'static str;
    /// One placeholder per column
    const PLACEHOLDERS: &'static str;
    /// Mutable columns only; id and user_id are never rewritten
    const SET_CLAUSE: &'static str;
    /// Display name for NotFound messages
    const NOUN: &'static str;
    /// Column used for range filtering, if the record has one
    const DATE_COLUMN: Option<&'static str> = None;

    fn id(&self) -> &str;
    fn owner_id(&self) -> &str;

    /// Bind every column value in COLUMNS order
    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>>;

    /// Bind every value in SET_CLAUSE order
    fn bind_update<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>>;
}

fn not_found<R: OwnedRecord>() -> AppError {
    AppError::Database(DatabaseError::NotFound(format!("{} not found", R::NOUN)))
}

/// Persist a freshly built record and hand it back
pub async fn create<R: OwnedRecord>(pool: &SqlitePool, record: R) -> Result<R, AppError> {
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        R::COLUMNS,
        R::PLACEHOLDERS
    );

    record.bind_insert(sqlx::query(&sql)).execute(pool).await?;

    Ok(record)
}

/// List the owner's records, optionally narrowed to a date range
pub async fn list<R: OwnedRecord>(
    pool: &SqlitePool,
    owner_id: &str,
    range: Option<&DateRange>,
) -> Result<Vec<R>, AppError> {
    let mut sql = format!("SELECT {} FROM {} WHERE user_id = ?", R::COLUMNS, R::TABLE);

    let bounds = match (R::DATE_COLUMN, range) {
        (Some(column), Some(range)) => {
            if range.start.is_some() {
                sql.push_str(&format!(" AND {} >= ?", column));
            }
            if range.end.is_some() {
                sql.push_str(&format!(" AND {} <= ?", column));
            }
            (range.start, range.end)
        }
        _ => (None, None),
    };

    let mut query = sqlx::query_as::<_, R>(&sql).bind(owner_id);
    if let Some(start) = bounds.0 {
        query = query.bind(start);
    }
    if let Some(end) = bounds.1 {
        query = query.bind(end);
    }

    let records = query.fetch_all(pool).await?;
    Ok(records)
}

/// Fetch one record by (id, owner)
pub async fn get<R: OwnedRecord>(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
) -> Result<R, AppError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ? AND user_id = ?",
        R::COLUMNS,
        R::TABLE
    );

    let record = sqlx::query_as::<_, R>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

    record.ok_or_else(not_found::<R>)
}

/// Replace every mutable field of an existing record
pub async fn update<R: OwnedRecord>(pool: &SqlitePool, record: R) -> Result<R, AppError> {
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ? AND user_id = ?",
        R::TABLE,
        R::SET_CLAUSE
    );

    let result = record
        .bind_update(sqlx::query(&sql))
        .bind(record.id())
        .bind(record.owner_id())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found::<R>());
    }

    Ok(record)
}

/// Remove one record by (id, owner)
pub async fn delete<R: OwnedRecord>(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
) -> Result<(), AppError> {
    let sql = format!("DELETE FROM {} WHERE id = ? AND user_id = ?", R::TABLE);

    let result = sqlx::query(&sql)
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found::<R>());
    }

    Ok(())
}

impl OwnedRecord for Transaction {
    const TABLE: &'static str = "transactions";
    const COLUMNS: &'static str = "id, user_id, date, amount, type, category, description";
    const PLACEHOLDERS: &'static str = "?, ?, ?, ?, ?, ?, ?";
    const SET_CLAUSE: &'static str =
        "date = ?, amount = ?, type = ?, category = ?, description = ?";
    const NOUN: &'static str = "Transaction";
    const DATE_COLUMN: Option<&'static str> = Some("date");

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(&self.id)
            .bind(&self.user_id)
            .bind(self.date)
            .bind(self.amount)
            .bind(&self.kind)
            .bind(&self.category)
            .bind(&self.description)
    }

    fn bind_update<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(self.date)
            .bind(self.amount)
            .bind(&self.kind)
            .bind(&self.category)
            .bind(&self.description)
    }
}

impl OwnedRecord for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "id, user_id, name, type";
    const PLACEHOLDERS: &'static str = "?, ?, ?, ?";
    const SET_CLAUSE: &'static str = "name = ?, type = ?";
    const NOUN: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(&self.id)
            .bind(&self.user_id)
            .bind(&self.name)
            .bind(&self.kind)
    }

    fn bind_update<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query.bind(&self.name).bind(&self.kind)
    }
}

impl OwnedRecord for RecurringTransaction {
    const TABLE: &'static str = "recurring_transactions";
    const COLUMNS: &'static str =
        "id, user_id, name, amount, type, category, description, frequency, start_date, next_due_date";
    const PLACEHOLDERS: &'static str = "?, ?, ?, ?, ?, ?, ?, ?, ?, ?";
    const SET_CLAUSE: &'static str =
        "name = ?, amount = ?, type = ?, category = ?, description = ?, frequency = ?, start_date = ?, next_due_date = ?";
    const NOUN: &'static str = "Recurring transaction";

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(&self.id)
            .bind(&self.user_id)
            .bind(&self.name)
            .bind(self.amount)
            .bind(&self.kind)
            .bind(&self.category)
            .bind(&self.description)
            .bind(&self.frequency)
            .bind(self.start_date)
            .bind(self.next_due_date)
    }

    fn bind_update<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(&self.name)
            .bind(self.amount)
            .bind(&self.kind)
            .bind(&self.category)
            .bind(&self.description)
            .bind(&self.frequency)
            .bind(self.start_date)
            .bind(self.next_due_date)
    }
}

impl OwnedRecord for Goal {
    const TABLE: &'static str = "goals";
    const COLUMNS: &'static str = "id, user_id, name, target_amount, current_amount, target_date";
    const PLACEHOLDERS: &'static str = "?, ?, ?, ?, ?, ?";
    const SET_CLAUSE: &'static str =
        "name = ?, target_amount = ?, current_amount = ?, target_date = ?";
    const NOUN: &'static str = "Goal";

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(&self.id)
            .bind(&self.user_id)
            .bind(&self.name)
            .bind(self.target_amount)
            .bind(self.current_amount)
            .bind(self.target_date)
    }

    fn bind_update<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(&self.name)
            .bind(self.target_amount)
            .bind(self.current_amount)
            .bind(self.target_date)
    }
}
