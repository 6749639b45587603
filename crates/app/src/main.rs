mod settings;
mod universe;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use shingo_core::common::Stock;
use shingo_feed::yahoo::YahooProvider;
use shingo_notify::telegram::TelegramNotifier;
use shingo_runner::daily::DailyRunner;
use shingo_store::signal_log::SqliteSignalStore;
use tracing::info;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责载入配置、实例化所有具体实现组件并注入到 DailyRunner，
/// 执行单次评估日运行后退出。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 载入分层配置（文件 + 环境变量，启动后不可变）。
/// 3. 解析监控宇宙（CSV 文件优先，否则取配置内列表）。
/// 4. 在 main 内一次性解析评估日（配置给定的固定日期或当天），
///    作为显式参数传入运行器 —— 运行器内部不读系统时钟。
/// 5. 实例化基础设施层（Feed、Store、Notify）并注入运行器。
/// 6. 执行单次运行，打印汇总后正常退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    info!("Shingo signal monitor starting...");

    // 2. 载入配置
    let config = settings::load()?;

    // 3. 解析监控宇宙
    let symbols = match &config.universe.file {
        Some(path) => universe::load_symbols(path)?,
        None => config.universe.symbols.clone(),
    };
    let stocks: Vec<Stock> = symbols
        .into_iter()
        .map(|symbol| Stock::new(symbol, config.universe.exchange.clone()))
        .collect();
    info!(symbols = stocks.len(), "Universe resolved");

    // 4. 解析评估日（固定测试日期或当天，二选一的显式配置开关）
    let evaluation_date = config
        .run
        .evaluation_date
        .unwrap_or_else(|| Local::now().date_naive());
    info!(%evaluation_date, "Evaluation date resolved");

    // 5. 实例化基础设施层
    let provider = Arc::new(YahooProvider::new());
    let store = Arc::new(SqliteSignalStore::new(PathBuf::from(&config.store.data_dir)).await?);
    let notifier = Arc::new(TelegramNotifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.chat_ids.clone(),
    ));

    // 6. 执行单次运行
    let runner = DailyRunner::new(provider, store, notifier, config.run.lookback_days);
    let report = runner.run(&stocks, evaluation_date).await?;

    info!(
        signals = report.records.len(),
        skipped = report.skipped,
        notified = report.notified,
        "Run complete"
    );

    Ok(())
}
