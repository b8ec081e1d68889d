pub mod aggregate;

pub use aggregate::{PointOfSale, PointOfSaleDto};
