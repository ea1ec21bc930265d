/// Domain types for the finance tracker
///
/// Each record type pairs a stored shape (with id and owner) with a
/// client payload shape (without either). Constructors validate and
/// sanitize payloads before anything reaches the store.

mod category;
mod goal;
mod recurring_transaction;
mod transaction;
mod user;

pub use category::{Category, NewCategory};
pub use goal::{Goal, NewGoal};
pub use recurring_transaction::{NewRecurringTransaction, RecurringTransaction};
pub use transaction::{NewTransaction, Transaction};
pub use user::User;
