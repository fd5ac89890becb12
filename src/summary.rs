//! The aggregation stage: pure functions over the cleaned table.
//!
//! Each view is a plain associative accumulation (key to running sum)
//! followed by an explicit sort. Ties in amount resolve by key because the
//! accumulator iterates in key order and the sort is stable, so repeated
//! runs over the same file produce identical output.

use crate::clean::CleanedTable;
use crate::model::{Amount, CleanedRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How many products `top_products_by_revenue` returns unless told otherwise.
pub const DEFAULT_TOP_PRODUCTS: usize = 20;

/// A grouping key paired with its summed amount. One aggregation view is a
/// list of these.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryRecord {
    key: String,
    amount: Amount,
}

impl SummaryRecord {
    pub(crate) fn new(key: String, amount: Amount) -> Self {
        Self { key, amount }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Sums `amount` grouped by the key that `key_of` extracts. Rows where
/// `key_of` returns `None` are excluded from the view.
fn sum_by<'a, F>(table: &'a CleanedTable, key_of: F) -> BTreeMap<String, Amount>
where
    F: Fn(&'a CleanedRecord) -> Option<&'a str>,
{
    let mut sums: BTreeMap<String, Amount> = BTreeMap::new();
    for row in table.rows() {
        if let Some(key) = key_of(row) {
            *sums.entry(key.to_string()).or_insert(Amount::ZERO) += row.amount();
        }
    }
    sums
}

fn into_records(sums: BTreeMap<String, Amount>) -> Vec<SummaryRecord> {
    sums.into_iter()
        .map(|(key, amount)| SummaryRecord::new(key, amount))
        .collect()
}

/// Revenue grouped by country, highest first.
pub fn revenue_by_country(table: &CleanedTable) -> Vec<SummaryRecord> {
    let mut records = into_records(sum_by(table, |r| Some(r.country())));
    records.sort_by(|a, b| b.amount.cmp(&a.amount));
    records
}

/// The `n` highest-revenue products, grouped by description, highest first.
pub fn top_products_by_revenue(table: &CleanedTable, n: usize) -> Vec<SummaryRecord> {
    let mut records = into_records(sum_by(table, |r| Some(r.description())));
    records.sort_by(|a, b| b.amount.cmp(&a.amount));
    records.truncate(n);
    records
}

/// Revenue grouped by calendar month, earliest first.
///
/// Rows whose invoice date failed to parse have no month label and are
/// excluded here, although they count toward every other view. The
/// lexicographic `YYYY-MM` order is the chronological order.
pub fn monthly_sales_trend(table: &CleanedTable) -> Vec<SummaryRecord> {
    into_records(sum_by(table, |r| r.month()))
}

/// Scalar KPIs computed directly from the cleaned table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Kpis {
    total_revenue: Amount,
    invoices: usize,
    countries: usize,
    customers: usize,
}

impl Kpis {
    pub fn compute(table: &CleanedTable) -> Self {
        let mut invoices = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut customers = BTreeSet::new();
        for row in table.rows() {
            invoices.insert(row.invoice_no());
            countries.insert(row.country());
            customers.insert(row.customer_id());
        }
        Self {
            total_revenue: table.rows().iter().map(|r| r.amount()).sum(),
            invoices: invoices.len(),
            countries: countries.len(),
            customers: customers.len(),
        }
    }

    pub fn total_revenue(&self) -> Amount {
        self.total_revenue
    }

    pub fn invoices(&self) -> usize {
        self.invoices
    }

    pub fn countries(&self) -> usize {
        self.countries
    }

    pub fn customers(&self) -> usize {
        self.customers
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::clean::clean;
    use crate::test::{sample_file, TestFile};

    fn two_country_table() -> TestFile {
        TestFile::new(
            "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n\
             1,A,WIDGET,1,2011-01-01 10:00,10,100,France\n\
             2,B,GADGET,1,2011-01-01 11:00,20,101,France\n\
             3,C,WIDGET,1,2011-02-01 12:00,5,102,Spain\n",
        )
    }

    #[test]
    fn test_revenue_by_country_sums_and_sorts() {
        let file = two_country_table();
        let table = clean(file.path()).unwrap();
        let records = revenue_by_country(&table);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), "France");
        assert_eq!(records[0].amount(), Amount::parse_lossy("30").unwrap());
        assert_eq!(records[1].key(), "Spain");
        assert_eq!(records[1].amount(), Amount::parse_lossy("5").unwrap());
    }

    #[test]
    fn test_revenue_by_country_is_descending() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let records = revenue_by_country(&table);
        for pair in records.windows(2) {
            assert!(pair[0].amount() >= pair[1].amount());
        }
    }

    #[test]
    fn test_country_grouping_is_a_partition() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let grouped: Amount = revenue_by_country(&table).iter().map(|r| r.amount()).sum();
        let total: Amount = table.rows().iter().map(|r| r.amount()).sum();
        assert_eq!(grouped, total);
    }

    #[test]
    fn test_top_products_truncates() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let top = top_products_by_revenue(&table, 2);
        assert_eq!(top.len(), 2);
        for pair in top.windows(2) {
            assert!(pair[0].amount() >= pair[1].amount());
        }
    }

    #[test]
    fn test_top_products_is_a_prefix_of_the_full_sort() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let all = top_products_by_revenue(&table, usize::MAX);
        let top = top_products_by_revenue(&table, 3);
        assert_eq!(top.as_slice(), &all[..3]);
    }

    #[test]
    fn test_top_products_merges_repeat_descriptions() {
        let file = two_country_table();
        let table = clean(file.path()).unwrap();
        let records = top_products_by_revenue(&table, DEFAULT_TOP_PRODUCTS);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), "GADGET");
        assert_eq!(records[1].key(), "WIDGET");
        assert_eq!(records[1].amount(), Amount::parse_lossy("15").unwrap());
    }

    #[test]
    fn test_monthly_trend_ascending_and_excludes_null_months() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let records = monthly_sales_trend(&table);
        // The "not a date" row has no month and must not appear.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), "2010-12");
        assert_eq!(records[1].key(), "2011-01");
        assert_eq!(
            records[1].amount(),
            Amount::parse_lossy("12.50").unwrap()
        );
    }

    #[test]
    fn test_monthly_trend_excluded_rows_still_count_elsewhere() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let monthly: Amount = monthly_sales_trend(&table).iter().map(|r| r.amount()).sum();
        let countries: Amount = revenue_by_country(&table).iter().map(|r| r.amount()).sum();
        // The null-month row (3 x 5.95) is in the country view only.
        assert_eq!(
            countries,
            monthly + Amount::parse_lossy("17.85").unwrap()
        );
    }

    #[test]
    fn test_ties_resolve_by_key() {
        let file = TestFile::new(
            "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n\
             1,A,WIDGET,1,2011-01-01 10:00,10,100,Spain\n\
             2,B,GADGET,1,2011-01-01 11:00,10,101,France\n",
        );
        let table = clean(file.path()).unwrap();
        let records = revenue_by_country(&table);
        // Equal amounts: stable sort over key-ordered input keeps key order.
        assert_eq!(records[0].key(), "France");
        assert_eq!(records[1].key(), "Spain");
    }

    #[test]
    fn test_aggregations_are_deterministic() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        assert_eq!(revenue_by_country(&table), revenue_by_country(&table));
        assert_eq!(monthly_sales_trend(&table), monthly_sales_trend(&table));
        assert_eq!(
            top_products_by_revenue(&table, 5),
            top_products_by_revenue(&table, 5)
        );
    }

    #[test]
    fn test_empty_table() {
        let file = TestFile::new(
            "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n",
        );
        let table = clean(file.path()).unwrap();
        assert!(revenue_by_country(&table).is_empty());
        assert!(monthly_sales_trend(&table).is_empty());
        let kpis = Kpis::compute(&table);
        assert!(kpis.total_revenue().is_zero());
        assert_eq!(kpis.invoices(), 0);
    }

    #[test]
    fn test_kpis() {
        let file = sample_file();
        let table = clean(file.path()).unwrap();
        let kpis = Kpis::compute(&table);
        // 15.30 + 20.34 + 17.85 + 12.50
        assert_eq!(
            kpis.total_revenue(),
            Amount::parse_lossy("65.99").unwrap()
        );
        assert_eq!(kpis.invoices(), 3);
        assert_eq!(kpis.countries(), 2);
        assert_eq!(kpis.customers(), 3);
    }
}
