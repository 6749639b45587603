use chrono::NaiveDate;
use shingo_core::signal::entity::{SignalHistory, SignalKind, SignalRecord};
use shingo_core::store::port::SignalStore;
use shingo_store::signal_log::SqliteSignalStore;
use tempfile::tempdir;

fn record(symbol: &str, date: (i32, u32, u32), kind: SignalKind, price: f64) -> SignalRecord {
    SignalRecord {
        symbol: symbol.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        kind,
        price,
    }
}

/// # Summary
/// 信号日志的持久化与重建：空库、写入后重读、插入顺序保持。
///
/// # Logic
/// 1. 在显式传入的临时数据目录下创建存储（目录不存在时自动建立）。
/// 2. 空库载入 → 空历史。
/// 3. 持久化若干记录后重新载入，断言内容与插入顺序一致。
#[tokio::test]
async fn test_signal_log_round_trip() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    // 数据目录尚不存在的子路径：new 必须自行创建
    let data_dir = tmp_dir.path().join("signals");

    let store = SqliteSignalStore::new(&data_dir)
        .await
        .expect("Failed to create signal store");

    // 空库
    let empty = store.load_history().await.unwrap();
    assert!(empty.is_empty());

    // 首次持久化
    let mut history = SignalHistory::new();
    history.append(record("RELIANCE", (2025, 5, 20), SignalKind::Buy, 2850.55));
    history.append(record("TCS", (2025, 5, 21), SignalKind::Buy, 3500.0));
    history.append(record("RELIANCE", (2025, 5, 23), SignalKind::Sell, 2990.1));
    store.persist_history(&history).await.unwrap();

    let loaded = store.load_history().await.unwrap();
    assert_eq!(loaded, history);
    assert_eq!(loaded.last_kind("RELIANCE"), Some(SignalKind::Sell));
    assert_eq!(loaded.last_kind("TCS"), Some(SignalKind::Buy));

    // 插入顺序保持
    let symbols: Vec<&str> = loaded.records().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["RELIANCE", "TCS", "RELIANCE"]);
}

/// # Summary
/// 整体重写语义：覆盖而不是叠加，重复持久化幂等，跨实例状态保留。
#[tokio::test]
async fn test_signal_log_rewrite_and_cross_run_state() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    let data_dir = tmp_dir.path().to_path_buf();

    let store = SqliteSignalStore::new(&data_dir).await.unwrap();

    let mut history = SignalHistory::new();
    history.append(record("RELIANCE", (2025, 5, 20), SignalKind::Buy, 2850.55));
    store.persist_history(&history).await.unwrap();

    // 追加后整体重写：旧内容被覆盖而不是叠加
    history.append(record("INFY", (2025, 5, 26), SignalKind::Buy, 1500.25));
    store.persist_history(&history).await.unwrap();
    store.persist_history(&history).await.unwrap(); // 重复持久化必须幂等

    let reloaded = store.load_history().await.unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded, history);

    // 新的存储实例读取同一数据目录，跨运行的去重状态得以保留
    let second = SqliteSignalStore::new(&data_dir).await.unwrap();
    let cross_run = second.load_history().await.unwrap();
    assert_eq!(cross_run, history);
}
