use crate::signal::entity::SignalHistory;
use crate::store::error::StoreError;
use async_trait::async_trait;

/// # Summary
/// 信号日志存储接口，负责信号历史的持久化与读取。
///
/// # Invariants
/// - 历史在运行开始时整体载入一次，运行结束时整体写回一次。
/// - `persist_history` 必须是原子的：要么全量生效，要么完全不生效。
///   部分写入会丢失去重状态，导致下次运行重复发出信号。
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// # Summary
    /// 载入全量信号历史。
    ///
    /// # Logic
    /// 1. 按插入顺序读取全部已持久化记录。
    /// 2. 重建 SignalHistory 聚合根。
    ///
    /// # Returns
    /// 成功返回历史（可为空），失败返回 `StoreError`（运行级致命）。
    async fn load_history(&self) -> Result<SignalHistory, StoreError>;

    /// # Summary
    /// 以整体覆盖方式持久化信号历史。
    ///
    /// # Logic
    /// 1. 在单个事务内清空旧记录并写入当前全量历史。
    /// 2. 提交事务。
    ///
    /// # Arguments
    /// * `history`: 运行结束时合并后的全量历史。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`（运行级致命）。
    async fn persist_history(&self, history: &SignalHistory) -> Result<(), StoreError>;
}
