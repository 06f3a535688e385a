//! # ExpenseLM SDK
//!
//! Async Rust client for the ExpenseLM expense API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use expenselm_sdk::{ExpenseLmClient, ExpenseLmResult, ExpenseQuery};
//!
//! #[tokio::main]
//! async fn main() -> ExpenseLmResult<()> {
//!     let client = ExpenseLmClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     // Latest expenses
//!     let records = client.expenses().list(&ExpenseQuery::new().limit(5)).await?;
//!     println!("Found {} expenses", records.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! Every call is a single GET with a fixed timeout. Failures are never
//! retried and never turned into empty results.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use api::{DateRange, ExpenseQuery};
pub use client::{ExpenseLmClient, ExpenseLmClientBuilder};
pub use config::ClientConfig;
pub use error::{ExpenseLmError, ExpenseLmResult};

// Re-export domain records for convenience
pub use expenselm_core::{
    CategoryCurAmtStatItem, Expense, ExpenseImage, ExpenseImageData, ExpenseImageType,
    ExpenseItem, ExpenseRecord, ExpenseType, MonthCurAmtStatItem, SubscriptionCurAmtStatItem,
    ValidationError,
};
