use crate::model::mapping::{Mapping, MappingError};
use crate::model::Amount;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The exact format of the invoice timestamp, e.g. `2010-12-01 08:26`.
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The format of the derived month label, e.g. `2010-12`.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Represents the columns the cleaning pipeline requires in the export.
///
/// The export may contain other columns; they are ignored.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetailColumn {
    #[default]
    InvoiceNo,
    StockCode,
    Description,
    Quantity,
    InvoiceDate,
    UnitPrice,
    CustomerId,
    Country,
}

serde_plain::derive_display_from_serialize!(RetailColumn);
serde_plain::derive_fromstr_from_deserialize!(RetailColumn);

impl RetailColumn {
    pub const ALL: [RetailColumn; 8] = [
        RetailColumn::InvoiceNo,
        RetailColumn::StockCode,
        RetailColumn::Description,
        RetailColumn::Quantity,
        RetailColumn::InvoiceDate,
        RetailColumn::UnitPrice,
        RetailColumn::CustomerId,
        RetailColumn::Country,
    ];

    /// The header string as it appears in the export's header row.
    pub fn header(&self) -> &'static str {
        match self {
            RetailColumn::InvoiceNo => INVOICE_NO_STR,
            RetailColumn::StockCode => STOCK_CODE_STR,
            RetailColumn::Description => DESCRIPTION_STR,
            RetailColumn::Quantity => QUANTITY_STR,
            RetailColumn::InvoiceDate => INVOICE_DATE_STR,
            RetailColumn::UnitPrice => UNIT_PRICE_STR,
            RetailColumn::CustomerId => CUSTOMER_ID_STR,
            RetailColumn::Country => COUNTRY_STR,
        }
    }
}

pub(super) const INVOICE_NO_STR: &str = "InvoiceNo";
pub(super) const STOCK_CODE_STR: &str = "StockCode";
pub(super) const DESCRIPTION_STR: &str = "Description";
pub(super) const QUANTITY_STR: &str = "Quantity";
pub(super) const INVOICE_DATE_STR: &str = "InvoiceDate";
pub(super) const UNIT_PRICE_STR: &str = "UnitPrice";
pub(super) const CUSTOMER_ID_STR: &str = "CustomerID";
pub(super) const COUNTRY_STR: &str = "Country";

/// The resolved positions of the required columns within one export file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Columns {
    invoice_no: usize,
    stock_code: usize,
    description: usize,
    quantity: usize,
    invoice_date: usize,
    unit_price: usize,
    customer_id: usize,
    country: usize,
}

impl Columns {
    /// Resolves every required column against the header mapping. Errors when
    /// any required column is absent.
    pub fn resolve(mapping: &Mapping) -> Result<Self, MappingError> {
        let require = |column: RetailColumn| mapping.require(column.header());
        Ok(Self {
            invoice_no: require(RetailColumn::InvoiceNo)?,
            stock_code: require(RetailColumn::StockCode)?,
            description: require(RetailColumn::Description)?,
            quantity: require(RetailColumn::Quantity)?,
            invoice_date: require(RetailColumn::InvoiceDate)?,
            unit_price: require(RetailColumn::UnitPrice)?,
            customer_id: require(RetailColumn::CustomerId)?,
            country: require(RetailColumn::Country)?,
        })
    }
}

/// One row of the export exactly as it appears in the file.
///
/// An empty string means the field is missing. No validation has happened at
/// this point.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct RawRecord {
    pub(crate) invoice_no: String,
    pub(crate) stock_code: String,
    pub(crate) description: String,
    pub(crate) quantity: String,
    pub(crate) invoice_date: String,
    pub(crate) unit_price: String,
    pub(crate) customer_id: String,
    pub(crate) country: String,
}

impl RawRecord {
    /// Extracts the required fields from a CSV record. Cells beyond the end
    /// of a short row read as empty.
    pub fn from_csv(record: &csv::StringRecord, columns: &Columns) -> Self {
        let cell = |ix: usize| record.get(ix).unwrap_or_default().to_string();
        Self {
            invoice_no: cell(columns.invoice_no),
            stock_code: cell(columns.stock_code),
            description: cell(columns.description),
            quantity: cell(columns.quantity),
            invoice_date: cell(columns.invoice_date),
            unit_price: cell(columns.unit_price),
            customer_id: cell(columns.customer_id),
            country: cell(columns.country),
        }
    }
}

/// One row that survived cleaning.
///
/// Invariants:
/// - `description` and `customer_id` are non-empty.
/// - `quantity` and `unit_price` are strictly positive.
/// - `amount == quantity * unit_price`, therefore strictly positive.
/// - `month` is `Some` exactly when `invoice_date` parsed; a row with an
///   unparseable date is retained and participates in every view except the
///   monthly trend.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CleanedRecord {
    invoice_no: String,
    stock_code: String,
    description: String,
    quantity: Amount,
    invoice_date: Option<NaiveDateTime>,
    unit_price: Amount,
    customer_id: String,
    country: String,
    amount: Amount,
    month: Option<String>,
}

impl CleanedRecord {
    /// Applies the row-level cleaning rules to a raw row.
    ///
    /// Returns `None` when the row must be dropped: missing description or
    /// customer id, unparseable quantity or unit price, or a quantity or
    /// unit price that is not strictly positive. An unparseable invoice date
    /// does not drop the row; it leaves `invoice_date` and `month` unset.
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        if raw.description.is_empty() || raw.customer_id.is_empty() {
            return None;
        }

        let invoice_date =
            NaiveDateTime::parse_from_str(raw.invoice_date.trim(), INVOICE_DATE_FORMAT).ok();

        let quantity = Amount::parse_lossy(&raw.quantity)?;
        let unit_price = Amount::parse_lossy(&raw.unit_price)?;
        if !quantity.is_positive() || !unit_price.is_positive() {
            return None;
        }

        let amount = quantity * unit_price;
        let month = invoice_date.map(|d| d.format(MONTH_FORMAT).to_string());

        Some(Self {
            invoice_no: raw.invoice_no,
            stock_code: raw.stock_code,
            description: raw.description,
            quantity,
            invoice_date,
            unit_price,
            customer_id: raw.customer_id,
            country: raw.country,
            amount,
            month,
        })
    }

    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    pub fn stock_code(&self) -> &str {
        &self.stock_code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Amount {
        self.quantity
    }

    pub fn invoice_date(&self) -> Option<NaiveDateTime> {
        self.invoice_date
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// The derived revenue for this row, `quantity * unit_price`.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The derived `YYYY-MM` month label, `None` when the date did not parse.
    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }
}
