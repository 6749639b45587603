use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use shingo_core::common::Stock;
use shingo_core::market::entity::ClosePoint;
use shingo_core::market::error::MarketError;
use shingo_core::market::port::DailyCloseProvider;
use tracing::debug;

/// # Summary
/// Yahoo Finance 日线行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，单次请求超时 10 秒。
/// - 同一运行内不做重试：失败的股票由调用方跳过。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
}

impl YahooProvider {
    /// # Summary
    /// 创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒超时。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * None
    ///
    /// # Returns
    /// 返回初始化后的 YahooProvider。
    #[allow(clippy::unwrap_used, clippy::expect_used)]
    pub fn new() -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".parse().unwrap()
        );

        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .default_headers(headers)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
#[derive(Deserialize, Debug)]
struct YahooResult {
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// # Summary
/// Yahoo API 指标容器。
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

/// # Summary
/// Yahoo API 原始报价数据（本系统只消费收盘价）。
#[derive(Deserialize, Debug)]
struct YahooQuote {
    /// 收盘价列表
    close: Vec<Option<f64>>,
}

#[async_trait]
impl DailyCloseProvider for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取截至评估日的日线收盘价序列。
    ///
    /// # Logic
    /// 1. 构建时间区间：`[end_date - lookback_days, end_date + 1 天)`，
    ///    终点加一天以使评估日当天的数据被包含（上游的闭区间约定）。
    /// 2. 以 interval=1d 发起异步请求并解析嵌套的 JSON 数据。
    /// 3. 跳过收盘价为 null 的槽位，将时间戳折叠为 UTC 日历日。
    /// 4. 同一日期出现多条时保留最后一条，保证每日至多一个点。
    ///
    /// # Arguments
    /// * `stock`: 证券身份。
    /// * `end_date`: 评估日（含）。
    /// * `lookback_days`: 回溯的日历天数。
    ///
    /// # Returns
    /// 成功返回按日期升序的收盘价列表，失败返回 MarketError。
    async fn fetch_daily_closes(
        &self,
        stock: &Stock,
        end_date: NaiveDate,
        lookback_days: u32,
    ) -> Result<Vec<ClosePoint>, MarketError> {
        let symbol = stock.provider_symbol();
        let start = end_date - Duration::days(i64::from(lookback_days));
        // 终点为次日零点，使评估日当天包含在区间内
        let end = end_date + Duration::days(1);

        let period1 = to_utc_midnight(start).timestamp();
        let period2 = to_utc_midnight(end).timestamp();

        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}",
            symbol
        );

        debug!(%symbol, %start, %end_date, "Fetching daily closes");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string().as_str()),
                ("period2", period2.to_string().as_str()),
                ("interval", "1d"),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        if let Some(err) = json.chart.error {
            return Err(MarketError::Provider(err.description));
        }

        let result = json
            .chart
            .result
            .ok_or(MarketError::NotFound)?
            .pop()
            .ok_or(MarketError::NotFound)?;

        let quote = result
            .indicators
            .quote
            .first()
            .ok_or(MarketError::Parse("No quote data".into()))?;

        let mut points: Vec<ClosePoint> = Vec::new();
        for (i, &ts) in result.timestamp.iter().enumerate() {
            if let Some(close) = quote.close.get(i).and_then(|x| *x) {
                let date = DateTime::<Utc>::from_timestamp(ts, 0)
                    .ok_or_else(|| MarketError::Parse(format!("Bad timestamp: {}", ts)))?
                    .date_naive();

                // 同一日期的后续槽位覆盖之前的（盘中快照让位于收盘值）
                match points.last_mut() {
                    Some(last) if last.date == date => last.close = close,
                    _ => points.push(ClosePoint::new(date, close)),
                }
            }
        }

        if points.is_empty() {
            return Err(MarketError::NotFound);
        }

        Ok(points)
    }
}

/// 日历日零点对应的 UTC 时刻
fn to_utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_time(chrono::NaiveTime::MIN), Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 23).unwrap();
        let dt = to_utc_midnight(date);
        assert_eq!(dt.timestamp(), 1_747_958_400);
    }
}
