use chrono::NaiveDate;
use thiserror::Error;

/// # Summary
/// 信号引擎错误枚举。
///
/// # Invariants
/// - 历史不足（InsufficientHistory）不是错误，以 `None` 指标值表达。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignalError {
    // 评估日不在价格序列中（非交易日或数据范围不足）
    #[error("Date not found in price series: {0}")]
    DateNotFound(NaiveDate),
}
