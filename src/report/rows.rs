//! Typed row mapping
//!
//! Converts raw query results into [`CategoryRow`] / [`PeriodRow`] by column
//! name. Missing columns and values of the wrong type are reported as
//! `DbError::QueryFailed`; the only NULL that is accepted is a revenue sum,
//! which is coerced to zero.

use crate::db::types::{CellValue, QueryResults};
use crate::error::{DbError, DbResult};
use crate::report::{CategoryRow, PeriodRow};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Read the single `cnt` value of the smoke-test query
pub fn record_count(results: &QueryResults) -> DbResult<i64> {
    let idx = results.column_index("cnt")?;
    let row = results
        .rows
        .first()
        .ok_or_else(|| DbError::QueryFailed("count query returned no rows".to_string()))?;
    int_cell(&row.values, idx, "cnt")
}

/// Map the category aggregate
pub fn category_rows(results: &QueryResults) -> DbResult<Vec<CategoryRow>> {
    let category = results.column_index("film_category")?;
    let rentals = results.column_index("total_rentals")?;
    let revenue = results.column_index("total_revenue")?;

    results
        .rows
        .iter()
        .map(|row| {
            Ok(CategoryRow {
                film_category: text_cell(&row.values, category, "film_category")?,
                total_rentals: int_cell(&row.values, rentals, "total_rentals")?,
                total_revenue: revenue_cell(&row.values, revenue)?,
            })
        })
        .collect()
}

/// Map the time aggregate, deriving the first-of-month period date
pub fn period_rows(results: &QueryResults) -> DbResult<Vec<PeriodRow>> {
    let year = results.column_index("year")?;
    let month = results.column_index("month")?;
    let month_name = results.column_index("month_name")?;
    let rentals = results.column_index("total_rentals")?;
    let revenue = results.column_index("total_revenue")?;

    results
        .rows
        .iter()
        .map(|row| {
            let y = int_cell(&row.values, year, "year")?;
            let m = int_cell(&row.values, month, "month")?;
            let (y, m, period) = period_date(y, m)?;
            Ok(PeriodRow {
                year: y,
                month: m,
                month_name: text_cell(&row.values, month_name, "month_name")?
                    .trim()
                    .to_string(),
                total_rentals: int_cell(&row.values, rentals, "total_rentals")?,
                total_revenue: revenue_cell(&row.values, revenue)?,
                period,
            })
        })
        .collect()
}

fn period_date(year: i64, month: i64) -> DbResult<(i32, u32, NaiveDate)> {
    let invalid = || DbError::QueryFailed(format!("invalid period year={} month={}", year, month));
    let y = i32::try_from(year).map_err(|_| invalid())?;
    let m = u32::try_from(month).map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
    Ok((y, m, date))
}

fn cell<'a>(values: &'a [CellValue], idx: usize, column: &str) -> DbResult<&'a CellValue> {
    values
        .get(idx)
        .ok_or_else(|| DbError::QueryFailed(format!("row is missing column \"{}\"", column)))
}

fn unexpected(column: &str, expected: &str, found: &CellValue) -> DbError {
    DbError::QueryFailed(format!(
        "column \"{}\": expected {}, found {}",
        column,
        expected,
        found.display_string(40)
    ))
}

fn int_cell(values: &[CellValue], idx: usize, column: &str) -> DbResult<i64> {
    let value = cell(values, idx, column)?;
    value
        .as_i64()
        .ok_or_else(|| unexpected(column, "an integer", value))
}

fn text_cell(values: &[CellValue], idx: usize, column: &str) -> DbResult<String> {
    let value = cell(values, idx, column)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| unexpected(column, "text", value))
}

fn revenue_cell(values: &[CellValue], idx: usize) -> DbResult<Decimal> {
    let value = cell(values, idx, "total_revenue")?;
    match value {
        CellValue::Null => Ok(Decimal::ZERO),
        other => other
            .as_decimal()
            .ok_or_else(|| unexpected("total_revenue", "a number", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::{ColumnDef, DataType, Row};
    use std::time::Duration;

    fn table(columns: &[(&str, DataType)], rows: Vec<Vec<CellValue>>) -> QueryResults {
        let count = rows.len();
        QueryResults::new(
            columns
                .iter()
                .map(|(name, data_type)| ColumnDef {
                    name: name.to_string(),
                    data_type: data_type.clone(),
                })
                .collect(),
            rows.into_iter().map(|values| Row { values }).collect(),
            Duration::ZERO,
            count,
        )
    }

    fn category_columns() -> Vec<(&'static str, DataType)> {
        vec![
            ("film_category", DataType::Text),
            ("total_rentals", DataType::BigInt),
            ("total_revenue", DataType::Numeric),
        ]
    }

    fn trend_columns() -> Vec<(&'static str, DataType)> {
        vec![
            ("year", DataType::Integer),
            ("month", DataType::Integer),
            ("month_name", DataType::Text),
            ("total_rentals", DataType::BigInt),
            ("total_revenue", DataType::Numeric),
        ]
    }

    #[test]
    fn test_category_rows_coerce_null_revenue() {
        let results = table(
            &category_columns(),
            vec![
                vec![
                    CellValue::Text("Action".to_string()),
                    CellValue::Integer(3),
                    CellValue::Null,
                ],
                vec![
                    CellValue::Text("Comedy".to_string()),
                    CellValue::Integer(2),
                    CellValue::Decimal(Decimal::new(1000, 2)),
                ],
            ],
        );
        let rows = category_rows(&results).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].film_category, "Action");
        assert_eq!(rows[0].total_rentals, 3);
        assert_eq!(rows[0].total_revenue, Decimal::ZERO);
        assert_eq!(rows[1].total_revenue, Decimal::new(10, 0));
    }

    #[test]
    fn test_empty_results_map_to_empty_rows() {
        assert!(
            category_rows(&table(&category_columns(), vec![]))
                .unwrap()
                .is_empty()
        );
        assert!(
            period_rows(&table(&trend_columns(), vec![]))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_missing_column_is_query_error() {
        let results = table(
            &[
                ("film_category", DataType::Text),
                ("total_rentals", DataType::BigInt),
            ],
            vec![],
        );
        match category_rows(&results) {
            Err(DbError::QueryFailed(msg)) => assert!(msg.contains("total_revenue")),
            other => panic!("expected QueryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_null_rentals_is_query_error() {
        let results = table(
            &category_columns(),
            vec![vec![
                CellValue::Text("Action".to_string()),
                CellValue::Null,
                CellValue::Null,
            ]],
        );
        assert!(matches!(
            category_rows(&results),
            Err(DbError::QueryFailed(_))
        ));
    }

    #[test]
    fn test_period_rows_accept_numeric_year_and_month() {
        let results = table(
            &trend_columns(),
            vec![vec![
                CellValue::Decimal(Decimal::new(2022, 0)),
                CellValue::Decimal(Decimal::new(2, 0)),
                CellValue::Text("February ".to_string()),
                CellValue::Integer(12),
                CellValue::Null,
            ]],
        );
        let rows = period_rows(&results).unwrap();
        assert_eq!(rows[0].year, 2022);
        assert_eq!(rows[0].month, 2);
        assert_eq!(rows[0].month_name, "February");
        assert_eq!(rows[0].period, NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
        assert_eq!(rows[0].total_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_period_rows_accept_double_precision_year_and_month() {
        let results = table(
            &trend_columns(),
            vec![vec![
                CellValue::Float(2022.0),
                CellValue::Float(5.0),
                CellValue::Text("May".to_string()),
                CellValue::Integer(3),
                CellValue::Null,
            ]],
        );
        let rows = period_rows(&results).unwrap();
        assert_eq!(rows[0].year, 2022);
        assert_eq!(rows[0].month, 5);
        assert_eq!(rows[0].sort_key(), 202205);
        assert_eq!(rows[0].period, NaiveDate::from_ymd_opt(2022, 5, 1).unwrap());
    }

    #[test]
    fn test_fractional_month_is_query_error() {
        let results = table(
            &trend_columns(),
            vec![vec![
                CellValue::Integer(2022),
                CellValue::Float(5.5),
                CellValue::Text("May".to_string()),
                CellValue::Integer(3),
                CellValue::Null,
            ]],
        );
        match period_rows(&results) {
            Err(DbError::QueryFailed(msg)) => assert!(msg.contains("month"), "{}", msg),
            other => panic!("Expected QueryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_month_is_query_error() {
        let results = table(
            &trend_columns(),
            vec![vec![
                CellValue::Integer(2022),
                CellValue::Integer(13),
                CellValue::Text("Smarch".to_string()),
                CellValue::Integer(1),
                CellValue::Null,
            ]],
        );
        assert!(matches!(period_rows(&results), Err(DbError::QueryFailed(_))));
    }

    #[test]
    fn test_record_count() {
        let results = table(
            &[("cnt", DataType::BigInt)],
            vec![vec![CellValue::Integer(16044)]],
        );
        assert_eq!(record_count(&results).unwrap(), 16044);
        assert!(record_count(&table(&[("cnt", DataType::BigInt)], vec![])).is_err());
    }
}
