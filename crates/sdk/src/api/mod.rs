//! API endpoint groups.

pub mod expenses;
pub mod stats;
pub mod subscriptions;

pub use expenses::{ExpenseQuery, ExpensesApi};
pub use stats::{DateRange, StatsApi};
pub use subscriptions::SubscriptionsApi;
