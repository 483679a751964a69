#![doc = include_str!("../README.md")]

pub mod aggregator;
pub mod dates;
pub mod error;
pub mod money;
pub mod report;
pub mod summary;

pub use aggregator::{aggregate, Aggregator, CsvAggregator};
pub use dates::DateFilter;
pub use error::{Result, SalesError};
pub use money::Brl;
pub use report::{ReportFormat, Renderer, SalesReport};
pub use summary::{BestSeller, FilterDates, ProductRevenue, SalesSummary};
