use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 信号类型枚举。NONE 不是枚举值，无信号用 `Option<SignalKind>::None` 表达。
///
/// # Invariants
/// - 持久化时序列化为字面量 "BUY" / "SELL"。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SignalKind {
    // 买入信号（下跌趋势中的深度回调）
    Buy,
    // 卖出信号（仅作为 BUY 持仓的退出信号）
    Sell,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(SignalKind::Buy),
            "SELL" => Ok(SignalKind::Sell),
            _ => Err(format!("Unknown SignalKind: {}", s)),
        }
    }
}

/// # Summary
/// 指标快照实体，对齐到单个评估日的指标值。
///
/// # Invariants
/// - 窗口期内历史不足时对应 SMA 为 `None`，绝不使用 NaN 哨兵值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    // 评估日
    pub date: NaiveDate,
    // 当日收盘价
    pub close: f64,
    // 20 日简单移动平均
    pub sma20: Option<f64>,
    // 50 日简单移动平均
    pub sma50: Option<f64>,
    // 200 日简单移动平均
    pub sma200: Option<f64>,
}

impl IndicatorSnapshot {
    /// 三个 SMA 是否全部有定义
    pub fn is_complete(&self) -> bool {
        self.sma20.is_some() && self.sma50.is_some() && self.sma200.is_some()
    }
}

/// # Summary
/// 信号记录实体，一次可执行信号的不可变凭证。
///
/// # Invariants
/// - 写入后不可变更。
/// - `price` 为评估日收盘价。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalRecord {
    // 股票代码
    pub symbol: String,
    // 评估日
    pub date: NaiveDate,
    // 信号类型
    pub kind: SignalKind,
    // 参考收盘价
    pub price: f64,
}

/// # Summary
/// 信号历史聚合根，全部股票的信号记录按插入顺序排列。
///
/// # Invariants
/// - 同一股票的记录日期单调递增（以运行顺序为准）。
/// - 股票的当前状态 = 其最近一条记录的 SignalKind，无记录则为无状态。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignalHistory {
    // 按插入顺序（即历次运行的时间顺序）排列的全量记录
    records: Vec<SignalRecord>,
}

impl SignalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Summary
    /// 从已持久化的记录列表重建历史。
    ///
    /// # Invariants
    /// - 调用方必须保证 `records` 已按插入顺序排列。
    pub fn from_records(records: Vec<SignalRecord>) -> Self {
        Self { records }
    }

    /// # Summary
    /// 查询特定股票最近一次记录的信号类型。
    ///
    /// # Logic
    /// 从尾部向前扫描，返回第一条匹配记录的类型。
    ///
    /// # Returns
    /// 有记录返回 `Some(SignalKind)`，否则返回 `None`。
    pub fn last_kind(&self, symbol: &str) -> Option<SignalKind> {
        self.records
            .iter()
            .rev()
            .find(|r| r.symbol == symbol)
            .map(|r| r.kind)
    }

    /// 追加一条新记录到历史尾部
    pub fn append(&mut self, record: SignalRecord) {
        self.records.push(record);
    }

    /// 按插入顺序迭代全量记录
    pub fn records(&self) -> impl Iterator<Item = &SignalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
