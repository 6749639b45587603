use chrono::NaiveDate;
use shingo_core::market::entity::ClosePoint;
use shingo_core::signal::entity::IndicatorSnapshot;
use shingo_core::signal::error::SignalError;

// 三个固定的 SMA 窗口
pub const SMA_SHORT: usize = 20;
pub const SMA_MID: usize = 50;
pub const SMA_LONG: usize = 200;

/// # Summary
/// 计算以 `end_index` 为终点（含）的向后 `window` 期简单移动平均。
///
/// # Logic
/// 1. 若终点之前（含自身）不足 `window` 个收盘价，SMA 无定义，返回 None。
/// 2. 否则对最近 `window` 个收盘价取算术平均，不做任何加权或平滑。
///
/// # Arguments
/// * `closes`: 按日期升序的收盘价序列。
/// * `end_index`: 评估点在序列中的下标。
/// * `window`: 窗口长度。
///
/// # Returns
/// 有定义返回 `Some(均值)`，历史不足返回 `None`。
pub fn sma_at(closes: &[f64], end_index: usize, window: usize) -> Option<f64> {
    if window == 0 || end_index >= closes.len() {
        return None;
    }
    if end_index + 1 < window {
        return None;
    }
    let start = end_index + 1 - window;
    let sum: f64 = closes[start..=end_index].iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / window as f64;
    Some(mean)
}

/// # Summary
/// 对序列中的每个日期计算向后 `window` 期 SMA。
///
/// # Returns
/// 与输入等长的列表，前 `window - 1` 个位置为 `None`。
pub fn sma_series(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..closes.len()).map(|i| sma_at(closes, i, window)).collect()
}

/// # Summary
/// 提取对齐到单个评估日的指标快照。
///
/// # Logic
/// 1. 在序列中定位评估日；缺席则返回 `DateNotFound`（非交易日或数据范围不足）。
/// 2. 分别计算以该日为终点的 SMA20 / SMA50 / SMA200。
/// 3. 历史不足的窗口保持 `None`，由分类器短路处理，不在此处报错。
///
/// # Arguments
/// * `series`: 按日期升序的收盘价序列。
/// * `date`: 评估日。
///
/// # Returns
/// 成功返回快照，评估日缺席返回 `SignalError::DateNotFound`。
pub fn snapshot_at(series: &[ClosePoint], date: NaiveDate) -> Result<IndicatorSnapshot, SignalError> {
    let index = series
        .iter()
        .position(|p| p.date == date)
        .ok_or(SignalError::DateNotFound(date))?;

    let closes: Vec<f64> = series.iter().map(|p| p.close).collect();

    Ok(IndicatorSnapshot {
        date,
        close: closes[index],
        sma20: sma_at(&closes, index, SMA_SHORT),
        sma50: sma_at(&closes, index, SMA_MID),
        sma200: sma_at(&closes, index, SMA_LONG),
    })
}
