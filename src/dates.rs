use chrono::NaiveDate;
use tracing::warn;

/// Date format used for both filter bounds and the `data_venda` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar-date window applied to sale rows.
///
/// The end bound is stored as the day *after* the supplied date, so a row
/// dated exactly on the literal end date still passes the filter.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vendas::DateFilter;
///
/// let filter = DateFilter::from_bounds(Some("2025-01-05"), Some("2025-01-15"));
/// let last_day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let day_after = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
/// assert!(filter.contains(last_day));
/// assert!(!filter.contains(day_after));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    start: Option<NaiveDate>,
    end_exclusive: Option<NaiveDate>,
}

impl DateFilter {
    /// Builds a filter from raw `YYYY-MM-DD` bound strings.
    ///
    /// Each bound is parsed independently: a bound that fails to parse is
    /// dropped with a warning while the other bound stays in effect.
    #[must_use]
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Self {
        let start = start.and_then(|raw| parse_bound("start", raw));
        let end_exclusive = end
            .and_then(|raw| parse_bound("end", raw))
            .and_then(|d| d.succ_opt());
        Self {
            start,
            end_exclusive,
        }
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end_exclusive.is_some_and(|end| date >= end) {
            return false;
        }
        true
    }
}

fn parse_bound(which: &str, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("ignoring invalid {which} date {raw:?}: {err}");
            None
        }
    }
}

/// Parses a row's sale date; `None` if it does not match `YYYY-MM-DD`.
pub(crate) fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn contains_fn_is_inclusive_of_both_bounds() {
        let filter = DateFilter::from_bounds(Some("2025-01-05"), Some("2025-01-15"));
        assert!(!filter.contains(day(2025, 1, 4)));
        assert!(filter.contains(day(2025, 1, 5)));
        assert!(filter.contains(day(2025, 1, 15)));
        assert!(!filter.contains(day(2025, 1, 16)));
    }

    #[test]
    fn from_bounds_fn_treats_missing_bounds_as_unbounded() {
        let filter = DateFilter::from_bounds(None, None);
        assert!(filter.contains(day(1970, 1, 1)));
        assert!(filter.contains(day(2999, 12, 31)));
    }

    #[test]
    fn from_bounds_fn_drops_only_the_invalid_bound() {
        let filter = DateFilter::from_bounds(Some("2025-01-05"), Some("não-é-data"));
        assert!(!filter.contains(day(2025, 1, 4)));
        assert!(filter.contains(day(2025, 1, 5)));
        assert!(filter.contains(day(2030, 6, 1)));

        let filter = DateFilter::from_bounds(Some("2025-13-40"), Some("2025-01-15"));
        assert!(filter.contains(day(1970, 1, 1)));
        assert!(!filter.contains(day(2025, 1, 16)));
    }

    #[test]
    fn parse_sale_date_fn_requires_the_fixed_format() {
        assert_eq!(parse_sale_date("2025-01-10"), Some(day(2025, 1, 10)));
        assert_eq!(parse_sale_date("10/01/2025"), None);
        assert_eq!(parse_sale_date(""), None);
    }
}
