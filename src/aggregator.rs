use chrono::Local;
use serde::Deserialize;
use tracing::warn;

use std::{
    collections::HashMap,
    fs::File,
    path::PathBuf,
    str::FromStr,
};

use crate::{
    dates::{parse_sale_date, DateFilter},
    error::{Result, SalesError},
    money::Brl,
    summary::{BestSeller, FilterDates, ProductRevenue, SalesSummary},
};

/// Capability interface for sources that aggregate sales data into a
/// [`SalesSummary`].
pub trait Aggregator {
    /// Points the aggregator at the file to read.
    fn set_source(&mut self, path: PathBuf);

    /// Sets the raw `YYYY-MM-DD` date bounds, both optional and inclusive.
    fn set_date_filter(&mut self, start: Option<String>, end: Option<String>);

    /// Runs one complete pass over the source and returns the summary.
    ///
    /// # Errors
    ///
    /// Fails only when the source cannot be opened or read at all; rows
    /// that cannot be parsed are skipped, not propagated.
    fn aggregate(&mut self) -> Result<SalesSummary>;
}

/// Streams a sales CSV file into per-product and global totals.
///
/// Each call to [`Aggregator::aggregate`] performs one complete pass over
/// the file; the running totals live only for that pass, so repeated calls
/// are independent.
///
/// # Examples
///
/// ```
/// let summary = vendas::aggregate("testdata/vendas.csv", None, None)?;
/// assert_eq!(summary.revenue_per_product.len(), 2);
/// # Ok::<(), vendas::SalesError>(())
/// ```
#[derive(Debug, Default)]
pub struct CsvAggregator {
    path: PathBuf,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl CsvAggregator {
    /// Creates an aggregator reading from `path`, with no date filter.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Aggregator for CsvAggregator {
    fn set_source(&mut self, path: PathBuf) {
        self.path = path;
    }

    fn set_date_filter(&mut self, start: Option<String>, end: Option<String>) {
        self.start_date = start;
        self.end_date = end;
    }

    fn aggregate(&mut self) -> Result<SalesSummary> {
        let filter = DateFilter::from_bounds(self.start_date.as_deref(), self.end_date.as_deref());
        let file = File::open(&self.path).map_err(|source| SalesError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut rdr = csv::Reader::from_reader(file);
        rdr.headers()?;

        let mut totals = Totals::default();
        for row in rdr.deserialize::<RawRow>() {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!("skipping unreadable row: {err}");
                    continue;
                }
            };
            let Some(record) = parse_row(row, &filter) else {
                continue;
            };
            totals.add(record);
        }

        Ok(totals.into_summary(FilterDates {
            start: self.start_date.clone(),
            end: self.end_date.clone(),
        }))
    }
}

/// Aggregates `path` in one call; the functional face of [`CsvAggregator`].
///
/// # Errors
///
/// Fails when the file cannot be opened or read; see
/// [`Aggregator::aggregate`].
pub fn aggregate(
    path: impl Into<PathBuf>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<SalesSummary> {
    let mut aggregator = CsvAggregator::new(path);
    aggregator.set_date_filter(
        start_date.map(str::to_string),
        end_date.map(str::to_string),
    );
    aggregator.aggregate()
}

/// One raw CSV row. Every field arrives as a string so a bad value in one
/// column skips that row alone instead of aborting the file.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(rename = "produto", default)]
    product: Option<String>,
    #[serde(rename = "quantidade", default)]
    quantity: Option<String>,
    #[serde(rename = "preco_unitario", default)]
    unit_price: Option<String>,
    #[serde(rename = "data_venda", default)]
    sale_date: Option<String>,
}

/// A validated sale row, alive only while it is folded into the totals.
/// Its date has already been consumed by the filter at this point.
#[derive(Debug)]
struct SaleRecord {
    product: String,
    quantity: u32,
    unit_price: Brl,
}

/// Validates one raw row against the date filter.
///
/// Returns `None` for rows that should be skipped. Rows with blank required
/// fields or outside the date window are dropped silently; rows with
/// malformed values are logged first.
fn parse_row(row: RawRow, filter: &DateFilter) -> Option<SaleRecord> {
    let product = match &row.product {
        Some(name) => name.trim().to_string(),
        None => "Unknown".to_string(),
    };
    let quantity = row.quantity.as_deref().unwrap_or("").trim();
    let unit_price = row.unit_price.as_deref().unwrap_or("").trim();
    let sale_date = row.sale_date.as_deref().unwrap_or("").trim();

    if quantity.is_empty() || unit_price.is_empty() || sale_date.is_empty() {
        return None;
    }

    let Some(date) = parse_sale_date(sale_date) else {
        warn!("skipping row with bad sale date: {row:?}");
        return None;
    };

    if !filter.contains(date) {
        return None;
    }

    let Ok(quantity) = quantity.parse::<u32>() else {
        warn!("skipping row with bad quantity: {row:?}");
        return None;
    };
    let unit_price = match Brl::from_str(unit_price) {
        Ok(price) if price >= Brl::ZERO => price,
        _ => {
            warn!("skipping row with bad unit price: {row:?}");
            return None;
        }
    };

    Some(SaleRecord {
        product,
        quantity,
        unit_price,
    })
}

/// Running totals for one aggregation pass.
///
/// Products keep the order they were first seen in; that order decides ties
/// in both the best-seller pick and the revenue ranking.
#[derive(Debug, Default)]
struct Totals {
    global_revenue: Brl,
    products: Vec<ProductTotals>,
    index: HashMap<String, usize>,
}

#[derive(Debug)]
struct ProductTotals {
    name: String,
    revenue: Brl,
    quantity: u64,
}

impl Totals {
    fn add(&mut self, record: SaleRecord) {
        let revenue = record.unit_price * record.quantity;
        self.global_revenue += revenue;

        let idx = match self.index.get(&record.product) {
            Some(&idx) => idx,
            None => {
                let idx = self.products.len();
                self.index.insert(record.product.clone(), idx);
                self.products.push(ProductTotals {
                    name: record.product,
                    revenue: Brl::ZERO,
                    quantity: 0,
                });
                idx
            }
        };
        let totals = &mut self.products[idx];
        totals.revenue += revenue;
        totals.quantity += u64::from(record.quantity);
    }

    fn into_summary(self, filter_dates: FilterDates) -> SalesSummary {
        // first product reaching the maximum wins ties
        let mut best: Option<&ProductTotals> = None;
        for totals in &self.products {
            if best.map_or(true, |b| totals.quantity > b.quantity) {
                best = Some(totals);
            }
        }
        let best_selling_product = best
            .map(|b| BestSeller {
                product: b.name.clone(),
                quantity: b.quantity,
            })
            .unwrap_or_default();

        let mut ranking: Vec<&ProductTotals> = self.products.iter().collect();
        ranking.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        let revenue_per_product = ranking
            .into_iter()
            .map(|totals| ProductRevenue {
                product: totals.name.clone(),
                revenue: totals.revenue.round_dp2(),
            })
            .collect();

        SalesSummary {
            report_date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            filter_dates,
            total_global_revenue: self.global_revenue.round_dp2(),
            best_selling_product,
            revenue_per_product,
        }
    }
}
