use thiserror::Error;

/// # Summary
/// 通知投递域错误枚举。
///
/// # Invariants
/// - 投递失败永远不回滚已持久化的信号历史（运行器先持久化后通知）。
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 传输层错误（HTTP 连接失败、超时等）
    #[error("Network error: {0}")]
    Network(String),

    /// 配置错误（缺少 Bot Token 或接收人列表为空）
    #[error("Configuration error: {0}")]
    Config(String),

    /// 推送平台拒绝（Telegram API 非成功响应；多接收人时聚合全部失败项）
    #[error("Platform error: {0}")]
    Platform(String),
}
