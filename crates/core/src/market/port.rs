use crate::common::Stock;
use crate::market::entity::ClosePoint;
use crate::market::error::MarketError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// # Summary
/// 日线收盘价数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的序列必须按日期严格递增，且每个日期至多一个点。
/// - 当数据源存在足够历史时，回溯范围必须覆盖最长指标窗口（200 个交易日）。
#[async_trait]
pub trait DailyCloseProvider: Send + Sync {
    /// # Summary
    /// 获取特定证券截至评估日的日线收盘价序列。
    ///
    /// # Logic
    /// 1. 以 `end_date` 为终点，向前回溯 `lookback_days` 个日历日构建请求区间。
    /// 2. 执行网络请求并解析响应数据。
    /// 3. 将结果折叠为每个交易日一个收盘价点。
    ///
    /// # Arguments
    /// * `stock`: 证券身份。
    /// * `end_date`: 评估日（区间终点，含当日）。
    /// * `lookback_days`: 回溯的日历天数。
    ///
    /// # Returns
    /// 成功返回按日期升序的收盘价列表，失败返回 MarketError。
    async fn fetch_daily_closes(
        &self,
        stock: &Stock,
        end_date: NaiveDate,
        lookback_days: u32,
    ) -> Result<Vec<ClosePoint>, MarketError>;
}
