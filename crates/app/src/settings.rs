use config::{Config, Environment, File};
use shingo_core::config::AppConfig;

/// # Summary
/// 分层载入全局应用配置。
///
/// # Logic
/// 1. 读取基础配置文件 `config/base.toml`。
/// 2. 叠加环境专属配置文件（`SHINGO_ENVIRONMENT` 指定，缺省 development，可缺席）。
/// 3. 叠加 `SHINGO` 前缀的环境变量（分隔符 `__`，
///    例如 `SHINGO_TELEGRAM__BOT_TOKEN` 覆盖 Bot Token 凭证）。
/// 4. 反序列化为 `AppConfig`，进程启动后不再变更。
///
/// # Returns
/// 成功返回配置，失败返回 `config::ConfigError`（运行级致命）。
pub fn load() -> Result<AppConfig, config::ConfigError> {
    let environment =
        std::env::var("SHINGO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/base"))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        .add_source(Environment::with_prefix("SHINGO").separator("__"))
        .build()?;

    settings.try_deserialize()
}
