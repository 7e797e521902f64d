//! SeaORM 远端存储实现
//!
//! 以数据库作为远端存储，支持 SQLite、PostgreSQL 和 MySQL，按行读写三个集合。

mod subjects;
mod submissions;

use crate::config::RemoteConfig;
use crate::errors::{FeedbackError, Result};
use crate::storage::{FeedbackItemRow, RemoteStore, SubjectRow, SubmissionRow};
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmRemoteStore {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmRemoteStore {
    /// 连接远端数据库并运行迁移
    pub async fn connect(config: &RemoteConfig) -> Result<Self> {
        let db_url = Self::build_database_url(config.url.trim())?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("数据库迁移失败: {e}")))?;

        info!("Remote store initialized: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &RemoteConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");
        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| FeedbackError::remote_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");
        if !in_memory {
            opt = opt.journal_mode(SqliteJournalMode::Wal);
        }

        // 内存库每个连接各自独立，只能使用单连接
        let max_connections = if in_memory { 1 } else { config.pool_size.max(1) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| FeedbackError::remote_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &RemoteConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| FeedbackError::remote_connection(format!("无法连接到远端数据库: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(FeedbackError::remote_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[async_trait]
impl RemoteStore for SeaOrmRemoteStore {
    async fn select_subjects(&self) -> Result<Vec<SubjectRow>> {
        self.select_subjects_impl().await
    }

    async fn insert_subject(&self, row: SubjectRow) -> Result<SubjectRow> {
        self.insert_subject_impl(row).await
    }

    async fn update_subject(&self, id: i64, row: SubjectRow) -> Result<SubjectRow> {
        self.update_subject_impl(id, row).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn select_submissions(&self) -> Result<Vec<SubmissionRow>> {
        self.select_submissions_impl().await
    }

    async fn select_feedback_items(&self) -> Result<Vec<FeedbackItemRow>> {
        self.select_feedback_items_impl().await
    }

    async fn replace_submission(
        &self,
        row: SubmissionRow,
        items: Vec<FeedbackItemRow>,
    ) -> Result<SubmissionRow> {
        self.replace_submission_impl(row, items).await
    }
}
