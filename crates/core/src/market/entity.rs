use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单日收盘价数据实体，记录特定交易日的收盘价。
///
/// # Invariants
/// - `close` 必须为有限正数。
/// - 同一序列中每个日历日期至多出现一次。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    // 交易日 (非交易日直接缺席，不做填充)
    pub date: NaiveDate,
    // 当日收盘价
    pub close: f64,
}

impl ClosePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}
