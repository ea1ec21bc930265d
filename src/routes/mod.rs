mod auth;
mod categories;
mod goals;
mod health_check;
mod recurring_transactions;
mod reports;
mod transactions;

pub use auth::{get_current_user, login, register};
pub use categories::{create_category, delete_category, list_categories};
pub use goals::{create_goal, delete_goal, list_goals, update_goal};
pub use health_check::health_check;
pub use recurring_transactions::{
    create_recurring_transaction, delete_recurring_transaction, list_recurring_transactions,
    update_recurring_transaction,
};
pub use reports::summary_report;
pub use transactions::{
    create_transaction, delete_transaction, get_transaction, list_transactions,
    update_transaction,
};
