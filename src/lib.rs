//! Equal-share expense splitting: per-member balances and the payments that
//! settle them, plus a small actix-web service over a MongoDB group store.
pub mod balance;
pub mod error;
pub mod exchange;
pub mod report;
pub mod schemas;
pub mod server;
pub mod settings;
pub mod store;

pub use balance::{compute_balances, IgnoreReason, IgnoredExpense};
pub use error::{ServiceError, SettlementError};
pub use exchange::compute_settlement;
pub use report::{settle_strict, settle_with_report, SettlementReport};
pub use schemas::{Balance, Expense, Group, MemberName, RawAmount, Transaction};
