pub mod a001_point_of_sale;
pub mod a002_group;
pub mod a003_family;
pub mod a004_report;
