use std::path::Path;
use thiserror::Error;

/// # Summary
/// 宇宙文件载入错误。
#[derive(Error, Debug)]
pub enum UniverseError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Universe file has no 'Symbol' column")]
    MissingSymbolColumn,
}

/// # Summary
/// 从 CSV 文件载入股票代码宇宙（例如 ind_nifty100list.csv）。
///
/// # Logic
/// 1. 读取表头并定位 `Symbol` 列。
/// 2. 逐行收集非空的代码，保持文件顺序。
///
/// # Arguments
/// * `path`: CSV 文件路径。
///
/// # Returns
/// 成功返回代码列表，失败返回 `UniverseError`。
pub fn load_symbols(path: impl AsRef<Path>) -> Result<Vec<String>, UniverseError> {
    let mut reader = csv::Reader::from_path(path)?;

    let symbol_index = reader
        .headers()?
        .iter()
        .position(|h| h == "Symbol")
        .ok_or(UniverseError::MissingSymbolColumn)?;

    let mut symbols = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(symbol) = row.get(symbol_index) {
            let symbol = symbol.trim();
            if !symbol.is_empty() {
                symbols.push(symbol.to_string());
            }
        }
    }
    Ok(symbols)
}
