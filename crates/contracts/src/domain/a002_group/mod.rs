pub mod aggregate;

pub use aggregate::{Group, GroupDto};
