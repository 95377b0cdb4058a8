//! End-to-end reporting pass against PostgreSQL
//!
//! When the test database has no `vw_rental_analysis`, a small fixture view
//! is created for the duration of the test and dropped afterwards. An
//! existing view is never replaced; the test then only checks invariants
//! that hold for any data.

use crate::common::{connect_or_skip, test_config};
use rentalboard::db::Database;
use rentalboard::report::{Metric, MetricSource, run_report};
use rust_decimal::Decimal;

const FIXTURE_VIEW: &str = "CREATE VIEW vw_rental_analysis AS \
     SELECT * FROM (VALUES \
       ('Action'::text, NULL::numeric(5,2), 2022, 5, 'May'::text), \
       ('Action', NULL, 2022, 5, 'May'), \
       ('Action', NULL, 2022, 6, 'June'), \
       ('Comedy', 5.00, 2022, 6, 'June'), \
       ('Comedy', 5.00, 2023, 1, 'January') \
     ) AS t(film_category, rental_amount, year, month, month_name)";

#[tokio::test]
async fn test_report_pass() {
    let Some(setup) = connect_or_skip().await else {
        return;
    };

    let existing = setup
        .execute_query("SELECT to_regclass('vw_rental_analysis') IS NOT NULL AS present")
        .await
        .expect("catalog query");
    let present = matches!(
        existing.rows[0].values[0],
        rentalboard::db::CellValue::Boolean(true)
    );
    if !present {
        setup
            .execute_query(FIXTURE_VIEW)
            .await
            .expect("create fixture view");
    }

    let result = run_report(&test_config()).await;

    if !present {
        let _ = setup.execute_query("DROP VIEW vw_rental_analysis").await;
    }
    setup.close().await;

    let report = result.expect("reporting pass");

    // Invariants for any data
    assert_eq!(report.category_rental_total(), report.record_count);
    let period_total: i64 = report.periods.iter().map(|p| p.total_rentals).sum();
    assert_eq!(period_total, report.record_count);
    for metric in [Metric::Rentals, Metric::Revenue] {
        let ranked = report.ranked_categories(metric);
        for pair in ranked.windows(2) {
            assert!(pair[0].metric_decimal(metric) >= pair[1].metric_decimal(metric));
        }
    }
    let trend = report.chronological_periods();
    for pair in trend.windows(2) {
        assert!(pair[0].sort_key() < pair[1].sort_key());
    }

    if !present {
        assert_eq!(report.record_count, 5);
        let by_rentals = report.ranked_categories(Metric::Rentals);
        assert_eq!(by_rentals[0].film_category, "Action");
        assert_eq!(by_rentals[0].total_revenue, Decimal::ZERO);
        let by_revenue = report.ranked_categories(Metric::Revenue);
        assert_eq!(by_revenue[0].film_category, "Comedy");
        assert_eq!(by_revenue[0].total_revenue, Decimal::new(1000, 2));

        let labels: Vec<String> = trend.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["May 2022", "Jun 2022", "Jan 2023"]);
        assert_eq!(trend[0].total_revenue, Decimal::ZERO);
    }
}
