
use chrono::{Duration, NaiveDate};
use mock_ports::{EventLog, MockNotifier, MockProvider, MockStore};
use shingo_core::common::Stock;
use shingo_core::market::entity::ClosePoint;
use shingo_core::signal::entity::{SignalHistory, SignalKind, SignalRecord};
use shingo_runner::daily::{DailyRunner, RunnerError};
use std::sync::{Arc, Mutex};

const LOOKBACK_DAYS: u32 = 300;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

/// 连续日历日的收盘价序列（250 个点，足够 SMA200 有定义）
fn series_from(closes: impl Iterator<Item = f64>) -> Vec<ClosePoint> {
    closes
        .enumerate()
        .map(|(i, close)| ClosePoint::new(start_date() + Duration::days(i64::try_from(i).unwrap()), close))
        .collect()
}

/// 单调下跌序列：SMA20 < SMA50 < SMA200 且收盘价较 SMA20 回调超过 5% → BUY
fn declining_series() -> Vec<ClosePoint> {
    series_from((0..250).map(|i| 349.0 - f64::from(i)))
}

/// 单调上涨序列：SMA20 > SMA50 > SMA200 且收盘价站上 SMA20 → SELL
fn ascending_series() -> Vec<ClosePoint> {
    series_from((0..250).map(|i| 100.0 + f64::from(i)))
}

fn eval_date() -> NaiveDate {
    // 250 个点的最后一天
    start_date() + Duration::days(249)
}

fn prior_record(symbol: &str, kind: SignalKind) -> SignalRecord {
    SignalRecord {
        symbol: symbol.to_string(),
        date: start_date(),
        kind,
        price: 100.0,
    }
}

struct Fixture {
    runner: DailyRunner,
    store: Arc<MockStore>,
    notifier: Arc<MockNotifier>,
    events: EventLog,
}

fn fixture(provider: MockProvider, initial: SignalHistory) -> Fixture {
    fixture_with(provider, initial, false, false)
}

fn fixture_with(
    provider: MockProvider,
    initial: SignalHistory,
    fail_persist: bool,
    fail_notify: bool,
) -> Fixture {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let mut store = MockStore::new(initial, events.clone());
    store.fail_persist = fail_persist;
    let store = Arc::new(store);
    let mut notifier = MockNotifier::new(events.clone());
    notifier.fail = fail_notify;
    let notifier = Arc::new(notifier);
    let runner = DailyRunner::new(
        Arc::new(provider),
        store.clone(),
        notifier.clone(),
        LOOKBACK_DAYS,
    );
    Fixture {
        runner,
        store,
        notifier,
        events,
    }
}

fn universe(symbols: &[&str]) -> Vec<Stock> {
    symbols.iter().map(|s| Stock::new(*s, None)).collect()
}

/// 下跌趋势深度回调 → BUY 被记录、持久化并推送
#[tokio::test]
async fn test_buy_signal_end_to_end() {
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let f = fixture(provider, SignalHistory::new());

    let report = f.runner.run(&universe(&["RELIANCE"]), eval_date()).await.unwrap();

    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.symbol, "RELIANCE");
    assert_eq!(record.kind, SignalKind::Buy);
    assert_eq!(record.price, 100.0);
    assert_eq!(record.date, eval_date());

    // 历史被整体持久化，含新记录
    let persisted = f.store.persisted.lock().unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].last_kind("RELIANCE"), Some(SignalKind::Buy));

    // 消息含头部行与单条信号行
    let messages = f.notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].0.contains(&eval_date().to_string()));
    assert!(messages[0].1.contains("RELIANCE: BUY at 100.00"));
    assert!(report.notified);
}

/// 场景 2：历史为空时 SELL 不可执行，历史保持为空
#[tokio::test]
async fn test_first_sell_ignored() {
    let provider = MockProvider::new().with_series("TCS", ascending_series());
    let f = fixture(provider, SignalHistory::new());

    let report = f.runner.run(&universe(&["TCS"]), eval_date()).await.unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.skipped, 1);
    let persisted = f.store.persisted.lock().unwrap();
    assert!(persisted[0].is_empty());

    // 无信号消息
    let messages = f.notifier.messages.lock().unwrap();
    assert!(messages[0].1.contains("No SMA signals generated"));
}

/// 场景 3：上一条记录为 BUY，再次分类出 BUY → 重复忽略
#[tokio::test]
async fn test_repeat_buy_ignored() {
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let mut initial = SignalHistory::new();
    initial.append(prior_record("RELIANCE", SignalKind::Buy));
    let f = fixture(provider, initial);

    let report = f.runner.run(&universe(&["RELIANCE"]), eval_date()).await.unwrap();

    assert!(report.records.is_empty());
    let persisted = f.store.persisted.lock().unwrap();
    assert_eq!(persisted[0].len(), 1, "History must be unchanged");
}

/// 场景 4：上一条记录为 BUY，新分类为 SELL → 可执行，追加一条 SELL
#[tokio::test]
async fn test_sell_after_buy_actionable() {
    let provider = MockProvider::new().with_series("RELIANCE", ascending_series());
    let mut initial = SignalHistory::new();
    initial.append(prior_record("RELIANCE", SignalKind::Buy));
    let f = fixture(provider, initial);

    let report = f.runner.run(&universe(&["RELIANCE"]), eval_date()).await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].kind, SignalKind::Sell);
    assert_eq!(report.records[0].price, 349.0);

    let persisted = f.store.persisted.lock().unwrap();
    assert_eq!(persisted[0].len(), 2);
    assert_eq!(persisted[0].last_kind("RELIANCE"), Some(SignalKind::Sell));

    let messages = f.notifier.messages.lock().unwrap();
    assert!(messages[0].1.contains("RELIANCE: SELL at 349.00"));
}

/// 场景 5：评估日缺席于序列（周末等）→ 跳过，不报错
#[tokio::test]
async fn test_missing_evaluation_date_skipped() {
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let f = fixture(provider, SignalHistory::new());

    // 序列最后一天的次日（例如周末）
    let weekend = eval_date() + Duration::days(1);
    let report = f.runner.run(&universe(&["RELIANCE"]), weekend).await.unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.skipped, 1);
    let persisted = f.store.persisted.lock().unwrap();
    assert!(persisted[0].is_empty());
}

/// 单个股票数据不可用时被隔离，其余股票照常处理
#[tokio::test]
async fn test_per_symbol_failure_isolation() {
    // "MISSING" 未配置序列 → 提供者返回 NotFound
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let f = fixture(provider, SignalHistory::new());

    let report = f
        .runner
        .run(&universe(&["MISSING", "RELIANCE"]), eval_date())
        .await
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].symbol, "RELIANCE");
    assert_eq!(report.skipped, 1);
}

/// 持久化必须先于通知；通知失败不影响运行结果与已持久化历史
#[tokio::test]
async fn test_persist_before_notify_and_notify_failure_non_fatal() {
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let f = fixture_with(provider, SignalHistory::new(), false, true);

    let report = f.runner.run(&universe(&["RELIANCE"]), eval_date()).await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(!report.notified);

    // 事件顺序：先 persist 后 notify
    let events = f.events.lock().unwrap();
    assert_eq!(*events, vec!["persist".to_string(), "notify".to_string()]);

    // 历史已写入，不因通知失败回滚
    let persisted = f.store.persisted.lock().unwrap();
    assert_eq!(persisted[0].len(), 1);
}

/// 历史载入失败是运行级致命错误
#[tokio::test]
async fn test_load_failure_is_fatal() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let mut store = MockStore::new(SignalHistory::new(), events.clone());
    store.fail_load = true;
    let runner = DailyRunner::new(
        Arc::new(MockProvider::new()),
        Arc::new(store),
        Arc::new(MockNotifier::new(events)),
        LOOKBACK_DAYS,
    );

    let result = runner.run(&universe(&["RELIANCE"]), eval_date()).await;
    assert!(matches!(result, Err(RunnerError::Store(_))));
}

/// 持久化失败是运行级致命错误，且通知不会被发送
#[tokio::test]
async fn test_persist_failure_is_fatal_and_skips_notify() {
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let f = fixture_with(provider, SignalHistory::new(), true, false);

    let result = f.runner.run(&universe(&["RELIANCE"]), eval_date()).await;
    assert!(matches!(result, Err(RunnerError::Store(_))));

    let messages = f.notifier.messages.lock().unwrap();
    assert!(messages.is_empty(), "Notify must not run after a failed persist");
}

/// 同一输入重复运行：第二次运行因去重不再产生记录（幂等性）
#[tokio::test]
async fn test_second_identical_run_produces_no_new_records() {
    let provider = MockProvider::new().with_series("RELIANCE", declining_series());
    let f = fixture(provider, SignalHistory::new());
    let stocks = universe(&["RELIANCE"]);

    let first = f.runner.run(&stocks, eval_date()).await.unwrap();
    assert_eq!(first.records.len(), 1);

    let second = f.runner.run(&stocks, eval_date()).await.unwrap();
    assert!(second.records.is_empty());

    let persisted = f.store.persisted.lock().unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[1].len(), 1, "History must not grow on a repeat run");
}
