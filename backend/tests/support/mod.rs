//! Shared PostgreSQL fixture for the Diesel repository suites.
//!
//! Each context owns a throwaway database on its own embedded cluster with
//! the embedded migrations applied. Set `SKIP_TEST_CLUSTER=1` to skip suites
//! where the cluster cannot start.

mod pg_embed;

use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use pomodoro_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Migrated database plus the runtime that drives its pool.
///
/// Fields drop in declaration order, so pooled connections close before the
/// database and cluster are torn down.
pub struct PostgresContext {
    pub pool: DbPool,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
    pub runtime: Runtime,
}

fn setup_postgres() -> Result<PostgresContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = pg_embed::test_cluster()?;
    let name = format!("pomodoro_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("{err:?}"))?;
    let url = database.url().to_string();

    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    let config = PoolConfig::new(url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(PostgresContext {
        pool,
        _database: database,
        _cluster: cluster,
        runtime,
    })
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Migrated database, or `None` when the cluster failed and skipping is on.
///
/// # Panics
/// Panics when the cluster cannot start and `SKIP_TEST_CLUSTER` is unset, so
/// CI breakage is not masked.
pub fn postgres_context() -> Option<PostgresContext> {
    match setup_postgres() {
        Ok(context) => Some(context),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
