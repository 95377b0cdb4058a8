//! Reporting pass
//!
//! connect -> smoke test -> category report -> trend report -> release.
//! Every step depends on the previous one; the first failure ends the pass.
//! The session is released on every path once it has been opened.

use crate::config::ConnectionConfig;
use crate::db::Database;
use crate::db::postgres::PostgresProvider;
use crate::error::{DbResult, ReportError, ReportResult};
use crate::report::{
    CATEGORY_SQL, COUNT_SQL, CategoryRow, PeriodRow, Report, TREND_SQL, VIEW_NAME, rows,
};

/// Run one complete pass against PostgreSQL with its own connection
pub async fn run_report(config: &ConnectionConfig) -> ReportResult<Report> {
    let db = PostgresProvider::connect(config)
        .await
        .map_err(ReportError::Connection)?;
    load_report(db).await
}

/// Run the queries of a pass on an open session, then release it
pub async fn load_report<D: Database>(db: D) -> ReportResult<Report> {
    let record_count = match smoke_test(&db).await {
        Ok(count) => count,
        Err(source) => {
            tracing::error!(view = VIEW_NAME, error = %source, "view not accessible");
            db.close().await;
            return Err(ReportError::ViewUnavailable {
                view: VIEW_NAME,
                source,
            });
        }
    };
    tracing::info!(view = VIEW_NAME, records = record_count, "view reachable");

    let loaded = fetch_aggregates(&db).await;
    db.close().await;
    let (categories, periods) = loaded.map_err(|e| {
        tracing::error!(error = %e, "report query failed");
        ReportError::Query(e)
    })?;

    let report = Report {
        record_count,
        categories,
        periods,
    };

    let grouped = report.category_rental_total();
    if grouped != record_count {
        tracing::warn!(
            view_records = record_count,
            grouped_records = grouped,
            "category totals do not add up to the view row count"
        );
    }
    tracing::info!(
        categories = report.categories.len(),
        periods = report.periods.len(),
        "report loaded"
    );
    Ok(report)
}

async fn smoke_test<D: Database>(db: &D) -> DbResult<i64> {
    let results = db.execute_query(COUNT_SQL).await?;
    rows::record_count(&results)
}

async fn fetch_aggregates<D: Database>(db: &D) -> DbResult<(Vec<CategoryRow>, Vec<PeriodRow>)> {
    let categories = rows::category_rows(&db.execute_query(CATEGORY_SQL).await?)?;
    let periods = rows::period_rows(&db.execute_query(TREND_SQL).await?)?;
    Ok((categories, periods))
}
