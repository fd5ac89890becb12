mod clean;
mod error;
mod fs;
mod model;
mod summary;

pub mod args;
pub mod commands;


pub use clean::{clean, CleanError, CleanedTable};
pub use error::{Error, Result};
pub use model::{Amount, CleanedRecord, Mapping, MappingError, RetailColumn};
pub use summary::{
    monthly_sales_trend, revenue_by_country, top_products_by_revenue, Kpis, SummaryRecord,
    DEFAULT_TOP_PRODUCTS,
};
