use shingo_core::signal::entity::SignalKind;

/// # Summary
/// 去重策略的判定结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyOutcome {
    // 信号可执行：记录并推送
    Actionable(SignalKind),
    // 同类信号的立即重复：忽略
    RepeatIgnored(SignalKind),
    // SELL 没有可退出的 BUY 持仓：忽略
    NoPositionIgnored,
}

impl PolicyOutcome {
    /// 判定结果是否为可执行信号
    pub fn actionable(&self) -> Option<SignalKind> {
        match self {
            PolicyOutcome::Actionable(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// # Summary
/// 按股票的信号去重状态机：决定新分类的信号是否可执行。
///
/// # Logic
/// 状态 = 该股票最近一条已记录信号（无记录则为 None）。
/// 1. BUY：只要不是紧接着上一条 BUY 的重复就可执行（None 或 SELL 状态均可）。
/// 2. SELL：仅当上一条记录为 BUY 时可执行 —— SELL 是退出信号，
///    不允许从空仓或 SELL 状态发出（只平已开的仓）。
/// 3. 重复信号忽略，不产生任何副作用。
///
/// # Arguments
/// * `last`: 该股票最近一条已记录信号。
/// * `fresh`: 本次评估日新分类出的信号。
///
/// # Returns
/// 返回判定结果 `PolicyOutcome`。
pub fn evaluate(last: Option<SignalKind>, fresh: SignalKind) -> PolicyOutcome {
    match (last, fresh) {
        (Some(prev), kind) if prev == kind => PolicyOutcome::RepeatIgnored(kind),
        (_, SignalKind::Buy) => PolicyOutcome::Actionable(SignalKind::Buy),
        (Some(SignalKind::Buy), SignalKind::Sell) => PolicyOutcome::Actionable(SignalKind::Sell),
        (_, SignalKind::Sell) => PolicyOutcome::NoPositionIgnored,
    }
}
