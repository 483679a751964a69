use serde::Serialize;

use crate::money::Brl;

/// The filter bounds as originally supplied, echoed back in the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterDates {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// The product that moved the most units, with its unit count.
///
/// Defaults to the `"None"`/0 sentinel reported when no rows matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestSeller {
    pub product: String,
    pub quantity: u64,
}

impl Default for BestSeller {
    fn default() -> Self {
        Self {
            product: "None".to_string(),
            quantity: 0,
        }
    }
}

/// One entry of the revenue ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: Brl,
}

/// The aggregated result of one pass over a sales file.
///
/// Produced by [`crate::CsvAggregator`] and consumed unchanged by
/// [`crate::SalesReport`]. Field order matches the JSON document emitted by
/// the `json` report format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    /// Wall-clock generation time, `YYYY-MM-DD HH:MM:SS`.
    pub report_date: String,
    pub filter_dates: FilterDates,
    /// Global revenue, rounded to 2 decimal places.
    pub total_global_revenue: Brl,
    pub best_selling_product: BestSeller,
    /// Products by revenue, descending; ties keep first-seen order.
    pub revenue_per_product: Vec<ProductRevenue>,
}

impl SalesSummary {
    /// True when no rows survived filtering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revenue_per_product.is_empty()
    }
}
