pub mod aggregate;

pub use aggregate::{aggregate, hourly_histogram, DashboardStats, HourlyBucket};
