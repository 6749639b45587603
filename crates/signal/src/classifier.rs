use shingo_core::signal::entity::{IndicatorSnapshot, SignalKind};

// BUY 要求收盘价较 SMA20 至少回调 5%
const DIP_RATIO: f64 = 0.95;

/// # Summary
/// 对单个评估日的指标快照应用交叉规则，产出信号分类。
///
/// # Logic
/// 1. 任一 SMA 无定义则短路返回无信号（绝不把 `None` 当作数值参与比较）。
/// 2. BUY：`SMA50 < SMA200` 且 `SMA20 < SMA50` 且 `close < 0.95 × SMA20`
///    —— 中长期趋势一致向下，价格较短期均线深度回调（均值回归式抄底）。
/// 3. SELL：`SMA50 > SMA200` 且 `SMA20 > SMA50` 且 `close > SMA20`
///    —— 镜像条件，趋势一致向上且价格站上短期均线。
/// 4. 两个条件要求 SMA50 与 SMA200 的相反排序，构造上互斥。
///
/// # Arguments
/// * `snapshot`: 评估日的指标快照。
///
/// # Returns
/// 满足条件返回 `Some(SignalKind)`，否则返回 `None`。
pub fn classify(snapshot: &IndicatorSnapshot) -> Option<SignalKind> {
    let (sma20, sma50, sma200) = match (snapshot.sma20, snapshot.sma50, snapshot.sma200) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => return None,
    };
    let close = snapshot.close;

    if sma50 < sma200 && sma20 < sma50 && close < DIP_RATIO * sma20 {
        return Some(SignalKind::Buy);
    }
    if sma50 > sma200 && sma20 > sma50 && close > sma20 {
        return Some(SignalKind::Sell);
    }
    None
}
