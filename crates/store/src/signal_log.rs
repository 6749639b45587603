use async_trait::async_trait;
use chrono::NaiveDate;
use shingo_core::signal::entity::{SignalHistory, SignalKind, SignalRecord};
use shingo_core::store::error::StoreError;
use shingo_core::store::port::SignalStore;
use sqlx::Row;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// SignalStore 的 SQLite 实现，单库单表保存全量信号日志。
///
/// # Summary
/// `signals` 表每行对应一条 SignalRecord，rowid 顺序即插入顺序
/// （等价于原始 CSV 日志的逐行追加语义）。
///
/// # Invariants
/// * 数据库文件位于配置的数据根目录下。
/// * `persist_history` 在单个事务内全量重写，不存在部分写入状态。
pub struct SqliteSignalStore {
    pool: SqlitePool,
}

impl SqliteSignalStore {
    /// 创建新的 SqliteSignalStore 实例。
    ///
    /// # Logic
    /// 1. 确保指定的数据目录存在。
    /// 2. 以 `create_if_missing` 打开 `signals.db` 连接池。
    /// 3. 执行初始化建表 SQL。
    ///
    /// # Arguments
    /// * `data_dir` - 数据目录（来自 AppConfig，由调用方显式传入，
    ///   不依赖任何进程级全局状态）。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或错误。
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = data_dir.as_ref();
        if !base_path.exists() {
            std::fs::create_dir_all(base_path)
                .map_err(|e| StoreError::InitError(e.to_string()))?;
        }
        let db_path = base_path.join("signals.db");

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS signals (
                symbol TEXT NOT NULL,
                date DATE NOT NULL,
                signal TEXT NOT NULL,
                price REAL NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SignalStore for SqliteSignalStore {
    /// # Summary
    /// 按插入顺序载入全量信号历史。
    ///
    /// # Logic
    /// 1. 按 rowid 升序读取 `signals` 全表。
    /// 2. 逐行解析信号字面量 ("BUY"/"SELL")，解析失败视为日志损坏。
    /// 3. 重建 SignalHistory。
    ///
    /// # Returns
    /// * `Result<SignalHistory, StoreError>`
    async fn load_history(&self) -> Result<SignalHistory, StoreError> {
        let rows = sqlx::query("SELECT symbol, date, signal, price FROM signals ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let symbol: String = row
                .try_get("symbol")
                .map_err(|e| StoreError::Database(e.to_string()))?;
            let date: NaiveDate = row
                .try_get("date")
                .map_err(|e| StoreError::Database(e.to_string()))?;
            let signal: String = row
                .try_get("signal")
                .map_err(|e| StoreError::Database(e.to_string()))?;
            let price: f64 = row
                .try_get("price")
                .map_err(|e| StoreError::Database(e.to_string()))?;

            let kind = SignalKind::from_str(&signal)
                .map_err(|_| StoreError::Corrupt(format!("Bad signal token: {}", signal)))?;
            records.push(SignalRecord {
                symbol,
                date,
                kind,
                price,
            });
        }

        debug!(count = records.len(), "Loaded signal history");
        Ok(SignalHistory::from_records(records))
    }

    /// # Summary
    /// 以整体覆盖方式持久化信号历史。
    ///
    /// # Logic
    /// 1. 开启事务。
    /// 2. 清空 `signals` 表后按插入顺序逐条写入当前历史。
    /// 3. 提交事务；任何一步失败则整体回滚。
    ///
    /// # Arguments
    /// * `history` - 合并后的全量历史。
    ///
    /// # Returns
    /// * `Result<(), StoreError>`
    async fn persist_history(&self, history: &SignalHistory) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM signals")
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for record in history.records() {
            sqlx::query("INSERT INTO signals (symbol, date, signal, price) VALUES (?, ?, ?, ?)")
                .bind(&record.symbol)
                .bind(record.date)
                .bind(record.kind.to_string())
                .bind(record.price)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(count = history.len(), "Persisted signal history");
        Ok(())
    }
}
