//! Embedded PostgreSQL helpers for integration tests.
//!
//! Every test gets its own temporary database on the process-wide shared
//! cluster, migrated with the same embedded migrations the server runs at
//! startup.

use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns true when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {error:?}");
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Create an empty temporary database on the shared cluster.
///
/// The database is dropped with the returned guard.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    cluster()?
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|error| format!("create temporary database: {error:?}"))
}
