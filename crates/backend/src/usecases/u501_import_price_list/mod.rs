pub mod executor;
pub mod header;
pub mod parser;

pub use executor::{ImportError, PriceListExecutor};
pub use parser::{parse, parse_bytes, IngestError};
