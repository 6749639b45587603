use serde::{Deserialize, Serialize};

/// # Summary
/// 证券标的实体，代表监控宇宙中的特定股票。
///
/// # Invariants
/// - `symbol` 必须是合法的交易代码。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Stock {
    // 股票代码 (例如: RELIANCE, AAPL)
    pub symbol: String,
    // 交易所后缀 (可选，例如: NS 表示 NSE)
    pub exchange: Option<String>,
}

impl Stock {
    /// # Summary
    /// 创建一个新的 Stock 实例。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `exchange`: 可选的交易所后缀。
    ///
    /// # Returns
    /// 返回构造好的 Stock。
    pub fn new(symbol: impl Into<String>, exchange: Option<String>) -> Self {
        Self {
            symbol: symbol.into(),
            exchange,
        }
    }

    /// # Summary
    /// 生成行情提供者识别的完整代码。
    ///
    /// # Logic
    /// 1. 若配置了交易所后缀，拼接为 "SYMBOL.EXCHANGE" (例如 "RELIANCE.NS")。
    /// 2. 否则直接返回原始代码。
    ///
    /// # Returns
    /// 返回提供者侧的完整代码字符串。
    pub fn provider_symbol(&self) -> String {
        match &self.exchange {
            Some(exchange) => format!("{}.{}", self.symbol, exchange),
            None => self.symbol.clone(),
        }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
