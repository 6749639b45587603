use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 发送通知到外部系统的接口定义。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 接收人列表是实现的构造期状态，调用方只提供消息内容。
/// - 投递失败绝不影响已持久化的信号历史（先持久化，后通知）。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 发送带有主题和内容的通知。
    ///
    /// # Logic
    /// 1. 根据目标平台要求格式化消息。
    /// 2. 逐一投递给配置的全部接收人。
    /// 3. 仅当全部接收人投递成功才算成功。
    ///
    /// # Arguments
    /// * `subject` - 通知标题或主题。
    /// * `content` - 通知的具体内容。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(NotifyError)`。
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError>;
}
