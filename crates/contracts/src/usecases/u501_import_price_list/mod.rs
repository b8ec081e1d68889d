pub mod request;
pub mod response;

pub use request::PriceListKind;
pub use response::ImportSummary;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportPriceList;

impl UseCaseMetadata for ImportPriceList {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_price_list"
    }

    fn display_name() -> &'static str {
        "Carga de artículos y tarifas (CSV)"
    }
}
