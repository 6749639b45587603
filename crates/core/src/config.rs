use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub universe: UniverseConfig,
    pub run: RunConfig,
    pub telegram: TelegramConfig,
    pub store: StoreConfig,
}

/// 监控宇宙配置：显式列表或 CSV 文件（带 Symbol 列），文件优先
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseConfig {
    #[serde(default)]
    pub symbols: Vec<String>,
    // 可选的宇宙 CSV 文件路径 (例如 ind_nifty100list.csv)
    pub file: Option<String>,
    // 可选的交易所后缀 (例如 "NS")
    pub exchange: Option<String>,
}

/// 单次运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    // 评估日；缺省表示取当天日期
    pub evaluation_date: Option<NaiveDate>,
    // 行情回溯的日历天数，必须覆盖最长指标窗口 (200 交易日)
    pub lookback_days: u32,
}

/// Telegram 推送配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_ids: Vec<String>,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            universe: UniverseConfig {
                symbols: Vec::new(),
                file: None,
                exchange: Some("NS".to_string()),
            },
            run: RunConfig {
                evaluation_date: None,
                lookback_days: 300,
            },
            telegram: TelegramConfig {
                bot_token: String::new(),
                chat_ids: Vec::new(),
            },
            store: StoreConfig {
                data_dir: "data".to_string(),
            },
        }
    }
}
