//! Integration tests for PostgresProvider
//!
//! These tests require a PostgreSQL server; see `tests/integration.rs`.

use crate::common::{connect_or_skip, test_config};
use rentalboard::config::ConnectionConfig;
use rentalboard::db::Database;
use rentalboard::db::postgres::PostgresProvider;
use rentalboard::db::types::{CellValue, DataType};
use rentalboard::error::DbError;
use rust_decimal::Decimal;

#[tokio::test]
async fn test_execute_simple_query() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };

    let results = provider
        .execute_query("SELECT 1 as num, 'hello' as msg")
        .await
        .expect("query should succeed");
    assert_eq!(results.columns.len(), 2);
    assert_eq!(results.columns[0].name, "num");
    assert_eq!(results.columns[1].name, "msg");
    assert_eq!(results.row_count, 1);

    let row = &results.rows[0];
    match &row.values[0] {
        CellValue::Integer(n) => assert_eq!(*n, 1),
        other => panic!("Expected Integer, got {:?}", other),
    }
    match &row.values[1] {
        CellValue::Text(s) => assert_eq!(s, "hello"),
        other => panic!("Expected Text, got {:?}", other),
    }
    provider.close().await;
}

#[tokio::test]
async fn test_empty_result_keeps_columns() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };

    let results = provider
        .execute_query("SELECT 'x'::text AS film_category, 1::bigint AS total_rentals WHERE false")
        .await
        .expect("query should succeed");
    assert!(results.is_empty());
    assert_eq!(results.column_index("total_rentals").unwrap(), 1);
    assert_eq!(results.columns[1].data_type, DataType::BigInt);
    provider.close().await;
}

#[tokio::test]
async fn test_numeric_sum_and_null() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };

    let results = provider
        .execute_query(
            "SELECT SUM(v) AS total, SUM(n) AS none \
             FROM (VALUES (2.99::numeric, NULL::numeric), (4.99, NULL)) AS t(v, n)",
        )
        .await
        .expect("query should succeed");
    let row = &results.rows[0];
    assert_eq!(row.values[0].as_decimal(), Some(Decimal::new(798, 2)));
    assert!(row.values[1].is_null());
    provider.close().await;
}

#[tokio::test]
async fn test_query_with_params() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };

    let results = provider
        .execute_query_with_params("SELECT $1::int8 + 1 AS next", &[&41_i64])
        .await
        .expect("query should succeed");
    assert_eq!(results.rows[0].values[0].as_i64(), Some(42));
    provider.close().await;
}

#[tokio::test]
async fn test_missing_relation_is_query_error() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };

    let err = provider
        .execute_query("SELECT COUNT(*) FROM rentalboard_no_such_view")
        .await
        .unwrap_err();
    match err {
        DbError::QueryFailed(msg) => assert!(msg.contains("does not exist"), "{}", msg),
        other => panic!("Expected QueryFailed, got {:?}", other),
    }
    provider.close().await;
}

#[tokio::test]
async fn test_wrong_password_is_connection_error() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };
    provider.close().await;

    let config = ConnectionConfig {
        password: Some("definitely-not-the-password".to_string()),
        ..test_config()
    };
    match PostgresProvider::connect(&config).await {
        Err(DbError::ConnectionFailed(msg)) => {
            assert!(!msg.contains("definitely-not-the-password"));
        }
        // Trust authentication accepts any password
        Ok(provider) => provider.close().await,
        Err(other) => panic!("Expected ConnectionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    let config = ConnectionConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..test_config()
    };
    let result = PostgresProvider::connect(&config).await;
    assert!(matches!(result, Err(DbError::ConnectionFailed(_))));
}
