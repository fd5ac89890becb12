//! The aggregate revenue views: KPIs, countries, products, and months.

use crate::commands::{render_summary, Out};
use crate::summary::{self, Kpis, SummaryRecord};
use crate::{clean, Result};
use std::path::Path;

/// `retail summary` - scalar KPIs over the cleaned table.
pub fn summary(file: &Path) -> Result<Out<Kpis>> {
    let table = clean::clean(file)?;
    let kpis = Kpis::compute(&table);
    let message = format!(
        "Summary of {} cleaned rows\n\n\
         Total revenue: {}\n\
         Invoices:      {}\n\
         Countries:     {}\n\
         Customers:     {}",
        table.len(),
        kpis.total_revenue(),
        kpis.invoices(),
        kpis.countries(),
        kpis.customers(),
    );
    Ok(Out::new(message, kpis))
}

/// `retail countries` - revenue grouped by country, highest first.
pub fn countries(file: &Path) -> Result<Out<Vec<SummaryRecord>>> {
    let table = clean::clean(file)?;
    let records = summary::revenue_by_country(&table);
    let message = format!(
        "Revenue by country\n\n{}",
        render_summary("Country", &records)
    );
    Ok(Out::new(message, records))
}

/// `retail products` - the top `n` products by revenue, highest first.
pub fn products(file: &Path, n: usize) -> Result<Out<Vec<SummaryRecord>>> {
    let table = clean::clean(file)?;
    let records = summary::top_products_by_revenue(&table, n);
    let message = format!(
        "Top {} products by revenue\n\n{}",
        records.len(),
        render_summary("Product", &records)
    );
    Ok(Out::new(message, records))
}

/// `retail months` - revenue grouped by calendar month, earliest first.
pub fn months(file: &Path) -> Result<Out<Vec<SummaryRecord>>> {
    let table = clean::clean(file)?;
    let records = summary::monthly_sales_trend(&table);
    let message = format!(
        "Monthly sales trend\n\n{}",
        render_summary("Month", &records)
    );
    Ok(Out::new(message, records))
}
