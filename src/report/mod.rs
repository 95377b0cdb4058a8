//! Rental reporting
//!
//! The two aggregate reports shown on the dashboard, the metric toggle that
//! drives both charts, and the orderings each view uses:
//!
//! - categories are *ranked*: descending by the selected metric
//! - periods are a *trend*: ascending by calendar month
//!
//! Both orderings are computed from an already-loaded [`Report`]; toggling
//! the metric never re-queries the database.

pub mod flow;
pub mod rows;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use flow::{load_report, run_report};

/// The analytical view every query reads from
pub const VIEW_NAME: &str = "vw_rental_analysis";

/// Smoke test confirming the view is reachable
pub const COUNT_SQL: &str = "SELECT COUNT(*) AS cnt FROM vw_rental_analysis";

/// Report 1: rentals and revenue per film category
pub const CATEGORY_SQL: &str = "SELECT film_category, COUNT(*) AS total_rentals, \
     SUM(rental_amount) AS total_revenue \
     FROM vw_rental_analysis GROUP BY film_category";

/// Report 2: monthly rentals and revenue
pub const TREND_SQL: &str = "SELECT year, month, month_name, COUNT(*) AS total_rentals, \
     SUM(rental_amount) AS total_revenue \
     FROM vw_rental_analysis GROUP BY year, month, month_name ORDER BY year, month";

/// Which value both charts plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Number of rentals
    #[default]
    Rentals,
    /// Summed rental amount
    Revenue,
}

impl Metric {
    /// Display label ("Rentals" / "Revenue")
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Rentals => "Rentals",
            Metric::Revenue => "Revenue",
        }
    }

    /// Name of the result column this metric reads
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Rentals => "total_rentals",
            Metric::Revenue => "total_revenue",
        }
    }

    /// The other metric
    pub fn toggled(self) -> Self {
        match self {
            Metric::Rentals => Metric::Revenue,
            Metric::Revenue => Metric::Rentals,
        }
    }
}

/// Shared by both aggregate row types
pub trait MetricSource {
    fn total_rentals(&self) -> i64;
    fn total_revenue(&self) -> Decimal;

    /// Value of `metric` for ordering. Exact for both metrics.
    fn metric_decimal(&self, metric: Metric) -> Decimal {
        match metric {
            Metric::Rentals => Decimal::from(self.total_rentals()),
            Metric::Revenue => self.total_revenue(),
        }
    }

    /// Value of `metric` for plotting
    fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Rentals => self.total_rentals() as f64,
            Metric::Revenue => self.total_revenue().to_f64().unwrap_or(0.0),
        }
    }
}

/// One row of the category aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub film_category: String,
    pub total_rentals: i64,
    /// Never null: a category whose amounts are all NULL sums to zero
    pub total_revenue: Decimal,
}

impl MetricSource for CategoryRow {
    fn total_rentals(&self) -> i64 {
        self.total_rentals
    }

    fn total_revenue(&self) -> Decimal {
        self.total_revenue
    }
}

/// One row of the time aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRow {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub month_name: String,
    pub total_rentals: i64,
    /// Never null: a month whose amounts are all NULL sums to zero
    pub total_revenue: Decimal,
    /// First day of the month
    pub period: NaiveDate,
}

impl PeriodRow {
    /// Chronological sort key, `year * 100 + month`
    pub fn sort_key(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.month)
    }

    /// Axis label such as "Feb 2022"
    pub fn label(&self) -> String {
        self.period.format("%b %Y").to_string()
    }
}

impl MetricSource for PeriodRow {
    fn total_rentals(&self) -> i64 {
        self.total_rentals
    }

    fn total_revenue(&self) -> Decimal {
        self.total_revenue
    }
}

/// Everything one reporting pass loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Row count of the view at load time (smoke test)
    pub record_count: i64,
    /// Category aggregate, in query order
    pub categories: Vec<CategoryRow>,
    /// Time aggregate, in query order
    pub periods: Vec<PeriodRow>,
}

impl Report {
    /// Categories ranked by `metric`, highest first.
    ///
    /// Ties are broken by category name so the ranking is stable across
    /// refreshes regardless of the order the server grouped rows in.
    pub fn ranked_categories(&self, metric: Metric) -> Vec<&CategoryRow> {
        let mut rows: Vec<&CategoryRow> = self.categories.iter().collect();
        rows.sort_by(|a, b| rank_order(*a, *b, metric));
        rows
    }

    /// Periods in ascending chronological order
    pub fn chronological_periods(&self) -> Vec<&PeriodRow> {
        let mut rows: Vec<&PeriodRow> = self.periods.iter().collect();
        rows.sort_by_key(|r| r.sort_key());
        rows
    }

    /// Sum of `total_rentals` over the category aggregate
    pub fn category_rental_total(&self) -> i64 {
        self.categories.iter().map(|c| c.total_rentals).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.periods.is_empty()
    }
}

fn rank_order(a: &CategoryRow, b: &CategoryRow, metric: Metric) -> Ordering {
    b.metric_decimal(metric)
        .cmp(&a.metric_decimal(metric))
        .then_with(|| a.film_category.cmp(&b.film_category))
}

/// Format a metric value for labels and tables
pub fn format_metric(value: f64, metric: Metric) -> String {
    match metric {
        Metric::Rentals => format!("{}", value.round() as i64),
        Metric::Revenue => format!("{:.2}", value),
    }
}
