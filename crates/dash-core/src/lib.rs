//! dash-core
//!
//! Business logic for the budget dashboard: currency conversion, derived views,
//! the mutation gateway, CSV export, and the persisted store.
//! Depends on dash-domain. No CLI and no terminal I/O; persistence goes through
//! the [`storage::KeyValueStore`] seam.

pub mod currency;
pub mod dashboard;
pub mod error;
pub mod export_service;
pub mod filter;
pub mod goal_service;
pub mod recurring_service;
pub mod storage;
pub mod store;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use dashboard::Dashboard;
pub use error::CoreError;
pub use export_service::ExportService;
pub use filter::{filter_and_sort, DateRange};
pub use goal_service::{GoalProgress, GoalService, GoalStatus};
pub use recurring_service::RecurringService;
pub use storage::{KeyValueStore, MemoryStore, ReadError, StorageKey};
pub use store::{StatusLevel, StatusMessage, Store, StoreSettings};
pub use summary_service::{Distribution, MonthlySummary, SummaryService, Totals};
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction_service::TransactionService;
