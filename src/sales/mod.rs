//! Sales domain
//!
//! Monthly sales records, the built-in dataset, and the two calculations
//! the dashboard is built on:
//!
//! - [`summary`]: total, truncated average, max and min
//! - [`growth`]: month-over-month growth rate with an "initial" sentinel

pub mod dataset;
pub mod error;
pub mod growth;
pub mod summary;
pub mod types;

pub use dataset::{chicken_sales_2024, from_csv_reader, load_csv, load_or_default, CHICKEN_SALES_2024};
pub use error::{SalesError, SalesResult};
pub use growth::{growth_between, growth_rates, GrowthRate};
pub use summary::{best_month, summarize, worst_month, SummaryStats};
pub use types::{SalesRecord, SalesSeries};
