//! # Chicken Sales
//!
//! Monthly chicken sales dashboard: summary metrics, four chart views,
//! month-over-month growth and best/worst month callouts for a year of
//! sales, served as a web page or printed from the command line.
//!
//! ## Modules
//!
//! - [`sales`]: Sales records, the built-in dataset, summary and growth math
//! - [`chart`]: Chart specs and the SVG (plotters) / Plotly rendering backends
//! - [`dashboard`]: Assembles the dashboard view and its HTML page
//! - [`locale`]: Korean and English labels
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration
//! - [`markup`]: XML escaping for the SVG overlay and the HTML page
//!
//! ## Quick Start
//!
//! ```rust
//! use chicken_sales::chart::ChartKind;
//! use chicken_sales::dashboard::Dashboard;
//! use chicken_sales::sales::{chicken_sales_2024, summarize};
//!
//! let series = chicken_sales_2024();
//!
//! let stats = summarize(series.records()).unwrap();
//! assert_eq!(stats.total, 8260);
//! assert_eq!(stats.average, 688);
//!
//! let view = Dashboard::default().render(&series, ChartKind::Bar).unwrap();
//! assert_eq!(view.metrics.len(), 4);
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod locale;
pub mod markup;
pub mod sales;

pub use chart::{ChartKind, RendererKind};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView};
pub use locale::Locale;
pub use sales::{SalesRecord, SalesSeries};
