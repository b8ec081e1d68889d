pub mod common;
pub mod u501_import_price_list;
pub mod u502_backup_restore;
