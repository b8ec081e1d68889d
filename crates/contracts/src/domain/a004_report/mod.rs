pub mod aggregate;

pub use aggregate::{Report, SubmitReportDto};
