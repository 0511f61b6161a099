use thiserror::Error;
use tokio_postgres::{Client, NoTls};

use crate::config::PostgresConfig;

/// One row of the active-session listing from `pg_stat_activity`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub pid: i32,
    pub user: String,
    pub application_name: String,
    pub state: String,
}

#[derive(Debug, Error, Clone)]
pub enum GatewayError {
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("query failed: {0}")]
    Query(String),
}

/// Everything the bot asks of the target PostgreSQL server. Kept as a trait
/// so the selection workflow and the alert checks can be exercised against
/// a mock without a live server.
pub trait DatabaseGateway {
    async fn list_databases(&self) -> Result<Vec<String>, GatewayError>;
    async fn active_sessions(&self, database: &str) -> Result<Vec<SessionRecord>, GatewayError>;
    async fn sessions_with_lwlock(&self, database: &str) -> Result<i64, GatewayError>;
    /// `max(now() - query_start)` over the database's backends, rendered by
    /// the server as interval text. `None` means no backend had a running
    /// query, which is a valid result rather than an error.
    async fn longest_transaction(&self, database: &str) -> Result<Option<String>, GatewayError>;
    /// Returns whether a backend with that pid existed and was signalled.
    async fn terminate_backend(&self, pid: i32) -> Result<bool, GatewayError>;
    /// CHECKPOINT, then terminate every backend connected to the database.
    /// Returns the number of terminated backends.
    async fn checkpoint_and_terminate(&self, database: &str) -> Result<u64, GatewayError>;
}

const LIST_DATABASES: &str = "SELECT datname FROM pg_database";
const ACTIVE_SESSIONS: &str =
    "SELECT pid, usename, application_name, state FROM pg_stat_activity WHERE datname = $1";
const SESSIONS_WITH_LWLOCK: &str =
    "SELECT count(*) FROM pg_stat_activity WHERE datname = $1 AND wait_event LIKE 'LWLock%'";
const LONGEST_TRANSACTION: &str =
    "SELECT max(now() - query_start)::text FROM pg_stat_activity WHERE datname = $1";
const TERMINATE_BACKEND: &str = "SELECT pg_terminate_backend($1)";
const TERMINATE_ALL: &str =
    "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = $1";

pub struct PgGateway {
    config: tokio_postgres::Config,
}

impl PgGateway {
    pub fn from_config(postgres: &PostgresConfig) -> Self {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&postgres.host)
            .port(postgres.port)
            .user(&postgres.user)
            .password(&postgres.password)
            .dbname(&postgres.dbname);
        Self { config }
    }

    // A fresh connection per operation, matching the freshness guarantee for
    // listings: every call sees the server state at query time.
    async fn connect(&self) -> Result<Client, GatewayError> {
        let (client, connection) = self
            .config
            .connect(NoTls)
            .await
            .map_err(|error| GatewayError::Connection(error.to_string()))?;

        tokio::spawn(async move {
            if let Err(error) = connection.await {
                log::warn!("postgres connection task ended with error: {}", error);
            }
        });

        Ok(client)
    }
}

fn query_error(error: tokio_postgres::Error) -> GatewayError {
    GatewayError::Query(error.to_string())
}

impl DatabaseGateway for PgGateway {
    async fn list_databases(&self) -> Result<Vec<String>, GatewayError> {
        let client = self.connect().await?;
        let rows = client.query(LIST_DATABASES, &[]).await.map_err(query_error)?;
        Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
    }

    async fn active_sessions(&self, database: &str) -> Result<Vec<SessionRecord>, GatewayError> {
        let client = self.connect().await?;
        let rows = client
            .query(ACTIVE_SESSIONS, &[&database])
            .await
            .map_err(query_error)?;

        Ok(rows
            .iter()
            .map(|row| SessionRecord {
                pid: row.get(0),
                user: row.get::<_, Option<String>>(1).unwrap_or_default(),
                application_name: row.get::<_, Option<String>>(2).unwrap_or_default(),
                state: row.get::<_, Option<String>>(3).unwrap_or_default(),
            })
            .collect())
    }

    async fn sessions_with_lwlock(&self, database: &str) -> Result<i64, GatewayError> {
        let client = self.connect().await?;
        let row = client
            .query_one(SESSIONS_WITH_LWLOCK, &[&database])
            .await
            .map_err(query_error)?;
        Ok(row.get(0))
    }

    async fn longest_transaction(&self, database: &str) -> Result<Option<String>, GatewayError> {
        let client = self.connect().await?;
        let row = client
            .query_one(LONGEST_TRANSACTION, &[&database])
            .await
            .map_err(query_error)?;
        Ok(row.get(0))
    }

    async fn terminate_backend(&self, pid: i32) -> Result<bool, GatewayError> {
        let client = self.connect().await?;
        let row = client
            .query_one(TERMINATE_BACKEND, &[&pid])
            .await
            .map_err(query_error)?;
        Ok(row.get(0))
    }

    async fn checkpoint_and_terminate(&self, database: &str) -> Result<u64, GatewayError> {
        let client = self.connect().await?;
        client
            .batch_execute("CHECKPOINT")
            .await
            .map_err(query_error)?;
        let rows = client
            .query(TERMINATE_ALL, &[&database])
            .await
            .map_err(query_error)?;
        Ok(rows.len() as u64)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{DatabaseGateway, GatewayError, SessionRecord};

    /// Programmable gateway for workflow and alert-check tests. Every call
    /// bumps `calls` so tests can assert that a guarded path issued zero
    /// gateway calls.
    pub(crate) struct MockGateway {
        pub(crate) databases: Result<Vec<String>, GatewayError>,
        pub(crate) sessions: Result<Vec<SessionRecord>, GatewayError>,
        pub(crate) lwlock_count: Result<i64, GatewayError>,
        pub(crate) longest: Result<Option<String>, GatewayError>,
        pub(crate) calls: AtomicUsize,
    }

    impl MockGateway {
        pub(crate) fn new() -> Self {
            Self {
                databases: Ok(Vec::new()),
                sessions: Ok(Vec::new()),
                lwlock_count: Ok(0),
                longest: Ok(None),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn with_sessions(count: usize) -> Self {
            let sessions = (0..count)
                .map(|index| SessionRecord {
                    pid: index as i32 + 1,
                    user: "app_user".to_string(),
                    application_name: "app".to_string(),
                    state: "active".to_string(),
                })
                .collect();
            let mut mock = Self::new();
            mock.sessions = Ok(sessions);
            mock
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bump(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl DatabaseGateway for MockGateway {
        async fn list_databases(&self) -> Result<Vec<String>, GatewayError> {
            self.bump();
            self.databases.clone()
        }

        async fn active_sessions(
            &self,
            _database: &str,
        ) -> Result<Vec<SessionRecord>, GatewayError> {
            self.bump();
            self.sessions.clone()
        }

        async fn sessions_with_lwlock(&self, _database: &str) -> Result<i64, GatewayError> {
            self.bump();
            self.lwlock_count.clone()
        }

        async fn longest_transaction(
            &self,
            _database: &str,
        ) -> Result<Option<String>, GatewayError> {
            self.bump();
            self.longest.clone()
        }

        async fn terminate_backend(&self, _pid: i32) -> Result<bool, GatewayError> {
            self.bump();
            Ok(true)
        }

        async fn checkpoint_and_terminate(&self, _database: &str) -> Result<u64, GatewayError> {
            self.bump();
            Ok(0)
        }
    }
}
