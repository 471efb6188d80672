//! Shared helpers for contacts integration tests.
//!
//! Each suite gets a private embedded cluster and a freshly migrated
//! database, provisioned synchronously before any async runtime starts.

pub mod cluster_skip;
pub mod pg_embed;

use contacts::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_blocking};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

pub use cluster_skip::handle_cluster_setup_failure;

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// A migrated database inside a running embedded cluster.
///
/// Dropping it stops the cluster.
pub struct ContactsDatabase {
    url: String,
    _cluster: TestCluster,
}

impl ContactsDatabase {
    /// Pool sized for tests.
    fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1))
    }

    /// Build a pool; must be awaited inside the test's runtime.
    pub async fn pool(&self) -> DbPool {
        DbPool::new(self.pool_config())
            .await
            .expect("test pool builds")
    }

    /// Run raw SQL against the database with the synchronous client.
    ///
    /// Call outside any async runtime.
    #[allow(dead_code, reason = "only some suites seed rows directly")]
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }
}

/// Start a cluster, create a uniquely named database and migrate it.
pub fn provision_database() -> Result<ContactsDatabase, String> {
    let cluster = pg_embed::test_cluster()?;
    let admin_url = cluster.connection().database_url("postgres");
    let name = format!("contacts_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(&name);
    run_pending_migrations_blocking(&url).map_err(|err| err.to_string())?;

    Ok(ContactsDatabase {
        url,
        _cluster: cluster,
    })
}

/// Provision a database or skip per `SKIP_TEST_CLUSTER`.
pub fn database_or_skip() -> Option<ContactsDatabase> {
    match provision_database() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
