//! The cleaned-data preview, the CLI stand-in for the dashboard's table view.

use crate::commands::Out;
use crate::model::CleanedRecord;
use crate::{clean, Result};
use std::path::Path;

/// `retail preview` - the first `rows` rows of the cleaned table.
pub fn preview(file: &Path, rows: usize) -> Result<Out<Vec<CleanedRecord>>> {
    let table = clean::clean(file)?;
    let shown: Vec<CleanedRecord> = table.rows().iter().take(rows).cloned().collect();
    let message = format!(
        "Cleaned data preview ({} of {} rows)\n\n{}",
        shown.len(),
        table.len(),
        render_rows(&shown)
    );
    Ok(Out::new(message, shown))
}

fn render_rows(rows: &[CleanedRecord]) -> String {
    let description_width = rows
        .iter()
        .map(|r| r.description().chars().count())
        .chain(std::iter::once("Description".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}  {:<7}  {:<description_width$}  {:>8}  {:>10}  {:>12}  {:<10}  {:<7}  Country\n",
        "Invoice", "Month", "Description", "Qty", "Price", "Amount", "Customer", "Stock",
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<10}  {:<7}  {:<description_width$}  {:>8}  {:>10}  {:>12}  {:<10}  {:<7}  {}\n",
            row.invoice_no(),
            row.month().unwrap_or("-"),
            row.description(),
            row.quantity().to_string(),
            row.unit_price().to_string(),
            row.amount().to_string(),
            row.customer_id(),
            row.stock_code(),
            row.country(),
        ));
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::sample_file;

    #[test]
    fn test_preview_limits_rows() {
        let file = sample_file();
        let out = preview(file.path(), 2).unwrap();
        assert_eq!(out.structure().unwrap().len(), 2);
        assert!(out.message().contains("(2 of 4 rows)"));
    }

    #[test]
    fn test_preview_shows_all_when_limit_exceeds_table() {
        let file = sample_file();
        let out = preview(file.path(), 100).unwrap();
        assert_eq!(out.structure().unwrap().len(), 4);
        assert!(out.message().contains("(4 of 4 rows)"));
    }

    #[test]
    fn test_preview_renders_null_month_as_dash() {
        let file = sample_file();
        let out = preview(file.path(), 100).unwrap();
        let line = out
            .message()
            .lines()
            .find(|l| l.starts_with("536369"))
            .unwrap();
        assert!(line.contains("  -  ") || line.split_whitespace().nth(1) == Some("-"));
    }
}
