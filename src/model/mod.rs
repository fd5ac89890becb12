//! Types that represent the core data model, such as `CleanedRecord` and `Amount`.
mod amount;
mod mapping;
mod record;

pub use amount::Amount;
pub use mapping::{Mapping, MappingError};
pub use record::{
    CleanedRecord, Columns, RawRecord, RetailColumn, INVOICE_DATE_FORMAT, MONTH_FORMAT,
};
