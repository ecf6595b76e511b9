//! Reporting handlers.

mod revenue_report;

pub use revenue_report::{GetRevenueReportHandler, GetRevenueReportQuery, RevenueLine, RevenueReport};
