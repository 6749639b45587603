use chrono::NaiveDate;
use shingo_core::signal::entity::SignalRecord;

/// # Summary
/// 生成单次运行的通知主题（含评估日的头部行）。
pub fn subject_for(evaluation_date: NaiveDate) -> String {
    format!("SMA Signals for {}", evaluation_date)
}

/// # Summary
/// 生成单次运行的通知正文。
///
/// # Logic
/// 1. 有可执行信号时：每条记录一行，格式 `<symbol>: <BUY|SELL> at <price>`，
///    价格保留两位小数。
/// 2. 无信号时：单条 "No SMA signals generated for <date>." 消息。
///
/// # Arguments
/// * `evaluation_date`: 评估日。
/// * `records`: 本次运行产出的可执行信号记录。
///
/// # Returns
/// 返回格式化后的正文字符串。
pub fn format_content(evaluation_date: NaiveDate, records: &[SignalRecord]) -> String {
    if records.is_empty() {
        return format!("No SMA signals generated for {}.", evaluation_date);
    }
    records
        .iter()
        .map(|r| format!("{}: {} at {:.2}", r.symbol, r.kind, r.price))
        .collect::<Vec<_>>()
        .join("\n")
}
