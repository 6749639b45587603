use chrono::NaiveDate;
use shingo_core::common::Stock;
use shingo_core::market::port::DailyCloseProvider;
use shingo_core::notify::port::Notifier;
use shingo_core::signal::entity::{SignalHistory, SignalRecord};
use shingo_core::signal::error::SignalError;
use shingo_core::store::error::StoreError;
use shingo_core::store::port::SignalStore;
use shingo_signal::{classifier, dedup, indicator};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// # Summary
/// Runner 层的统一错误类型。信号历史的载入/持久化失败是仅有的
/// 运行级致命错误：吞掉它会丢失去重状态，导致下次运行重复发信号。
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// # Summary
/// 单次运行的结果汇总。
#[derive(Debug, Clone)]
pub struct RunReport {
    // 本次运行的评估日
    pub evaluation_date: NaiveDate,
    // 本次运行产出的可执行信号记录（可为空）
    pub records: Vec<SignalRecord>,
    // 未产出可执行信号的股票数量（数据缺失跳过、无信号或被去重忽略）
    pub skipped: usize,
    // 通知是否全部投递成功（投递失败不影响运行结果）
    pub notified: bool,
}

/// # Summary
/// 每日信号运行驱动器，系统的应用服务层门面 (Facade)。
/// 编译期仅依赖 `shingo-core` 中的 Trait 定义，所有具体实现通过构造函数注入。
///
/// # Invariants
/// - 每次运行只针对一个显式传入的评估日，内部不读取系统时钟。
/// - 单个股票的任何失败都被完全隔离，绝不影响其他股票或运行完成。
/// - 先计算并持久化，后通知；通知失败不回滚历史。
pub struct DailyRunner {
    // 日线行情接口
    provider: Arc<dyn DailyCloseProvider>,
    // 信号历史持久化接口
    store: Arc<dyn SignalStore>,
    // 通知投递接口
    notifier: Arc<dyn Notifier>,
    // 行情回溯的日历天数
    lookback_days: u32,
}

impl DailyRunner {
    /// # Summary
    /// 创建 DailyRunner 实例。
    ///
    /// # Arguments
    /// * `provider` - 行情接口的具体实现。
    /// * `store` - 信号历史存储的具体实现。
    /// * `notifier` - 通知接口的具体实现。
    /// * `lookback_days` - 回溯的日历天数（必须覆盖 200 交易日窗口）。
    ///
    /// # Returns
    /// * 构造好的运行驱动器。
    pub fn new(
        provider: Arc<dyn DailyCloseProvider>,
        store: Arc<dyn SignalStore>,
        notifier: Arc<dyn Notifier>,
        lookback_days: u32,
    ) -> Self {
        Self {
            provider,
            store,
            notifier,
            lookback_days,
        }
    }

    /// # Summary
    /// 对整个监控宇宙执行一次评估日运行。
    ///
    /// # Logic
    /// 1. 整体载入信号历史（失败为运行级致命错误）。
    /// 2. 逐个股票：抓取行情 → 提取评估日指标快照 → 分类 → 去重判定；
    ///    任何数据问题只跳过当前股票。可执行信号追加进内存历史。
    /// 3. 将合并后的历史原子化整体持久化（失败为运行级致命错误）。
    /// 4. 构建单条批量消息并尽力投递；投递失败仅记录告警。
    ///
    /// # Arguments
    /// * `universe` - 监控的股票列表。
    /// * `evaluation_date` - 显式评估日。
    ///
    /// # Returns
    /// * `Result<RunReport, RunnerError>` - 运行汇总或致命错误。
    pub async fn run(
        &self,
        universe: &[Stock],
        evaluation_date: NaiveDate,
    ) -> Result<RunReport, RunnerError> {
        info!(%evaluation_date, symbols = universe.len(), "Starting daily signal run");

        let mut history = self.store.load_history().await?;
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for stock in universe {
            match self.evaluate_stock(stock, evaluation_date, &history).await {
                Some(record) => {
                    info!(symbol = %record.symbol, kind = %record.kind, price = record.price, "Actionable signal");
                    history.append(record.clone());
                    records.push(record);
                }
                None => skipped += 1,
            }
        }

        // 先持久化，后通知：通知失败不得影响已写入的去重状态
        self.store.persist_history(&history).await?;

        let subject = crate::message::subject_for(evaluation_date);
        let content = crate::message::format_content(evaluation_date, &records);
        let notified = match self.notifier.notify(&subject, &content).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Notification delivery failed (non-fatal)");
                false
            }
        };

        info!(
            signals = records.len(),
            skipped, notified, "Daily signal run finished"
        );

        Ok(RunReport {
            evaluation_date,
            records,
            skipped,
            notified,
        })
    }

    /// # Summary
    /// 评估单个股票，产出可执行信号记录或 None。
    ///
    /// # Logic
    /// 1. 抓取截至评估日的收盘价序列；失败或为空 → 跳过 (warn)。
    /// 2. 提取评估日快照；评估日缺席（非交易日等）→ 跳过 (debug)。
    /// 3. 分类；历史不足或无条件成立 → 无信号。
    /// 4. 以该股票最近一条已记录信号为状态做去重判定。
    async fn evaluate_stock(
        &self,
        stock: &Stock,
        evaluation_date: NaiveDate,
        history: &SignalHistory,
    ) -> Option<SignalRecord> {
        let series = match self
            .provider
            .fetch_daily_closes(stock, evaluation_date, self.lookback_days)
            .await
        {
            Ok(series) if !series.is_empty() => series,
            Ok(_) => {
                warn!(symbol = %stock, "Empty price series, skipping");
                return None;
            }
            Err(e) => {
                warn!(symbol = %stock, error = %e, "Price data unavailable, skipping");
                return None;
            }
        };

        let snapshot = match indicator::snapshot_at(&series, evaluation_date) {
            Ok(snapshot) => snapshot,
            Err(SignalError::DateNotFound(date)) => {
                debug!(symbol = %stock, %date, "Evaluation date absent from series, skipping");
                return None;
            }
        };

        let fresh = classifier::classify(&snapshot)?;

        match dedup::evaluate(history.last_kind(&stock.symbol), fresh) {
            dedup::PolicyOutcome::Actionable(kind) => Some(SignalRecord {
                symbol: stock.symbol.clone(),
                date: evaluation_date,
                kind,
                price: snapshot.close,
            }),
            dedup::PolicyOutcome::RepeatIgnored(kind) => {
                debug!(symbol = %stock, %kind, "Repeat signal ignored");
                None
            }
            dedup::PolicyOutcome::NoPositionIgnored => {
                debug!(symbol = %stock, "SELL without prior BUY ignored");
                None
            }
        }
    }
}
