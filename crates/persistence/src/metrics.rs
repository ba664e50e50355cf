//! Document store metrics.
//!
//! Every store call is labelled with its collection, the operation kind and
//! whether it succeeded, so dashboards can break latency down per
//! collection without parsing free-form names.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Operation kinds reported under the `operation` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Replace,
    Insert,
    Merge,
    FindOne,
    Find,
    FindByIds,
}

impl StoreOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Insert => "insert",
            Self::Merge => "merge",
            Self::FindOne => "find_one",
            Self::Find => "find",
            Self::FindByIds => "find_by_ids",
        }
    }
}

fn outcome<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() {
        "ok"
    } else {
        "error"
    }
}

/// Records one completed store operation.
pub fn record_store_operation(
    collection: &'static str,
    operation: StoreOperation,
    outcome: &'static str,
    duration_secs: f64,
) {
    let operation = operation.as_str();
    histogram!(
        "store_operation_duration_seconds",
        "collection" => collection,
        "operation" => operation,
        "outcome" => outcome
    )
    .record(duration_secs);
    counter!(
        "store_operations_total",
        "collection" => collection,
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record database connection pool metrics.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one store operation against one collection.
///
/// ```ignore
/// let timer = QueryTimer::start("devices", StoreOperation::Replace);
/// let result = sqlx::query(...).execute(&pool).await;
/// timer.finish(&result);
/// ```
pub struct QueryTimer {
    collection: &'static str,
    operation: StoreOperation,
    start: Instant,
}

impl QueryTimer {
    pub fn start(collection: &'static str, operation: StoreOperation) -> Self {
        Self {
            collection,
            operation,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time, labelled with the outcome of `result`.
    pub fn finish<T, E>(self, result: &Result<T, E>) {
        record_store_operation(
            self.collection,
            self.operation,
            outcome(result),
            self.start.elapsed().as_secs_f64(),
        );
    }
}
