use crate::common::{HistoryPeriod, Stock};
use crate::market::entity::{Candle, CompanyProfile};
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 实现者不得在内部重试，一次失败即向上返回错误。
/// - 未知代码应返回空列表而非错误，以便上层给出“无数据”提示。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取特定证券在给定回溯区间内的日 K 线数据。
    ///
    /// # Logic
    /// 1. 将回溯区间映射为数据源的 range 参数。
    /// 2. 执行网络请求并解析响应数据。
    /// 3. 丢弃任何 OHLCV 字段缺失的交易日。
    ///
    /// # Arguments
    /// * `stock`: 证券身份。
    /// * `period`: 回溯区间。
    ///
    /// # Returns
    /// 成功返回按时间升序排列的 K 线列表（可能为空）。
    async fn fetch_history(
        &self,
        stock: &Stock,
        period: HistoryPeriod,
    ) -> Result<Vec<Candle>, MarketError>;

    /// # Summary
    /// 获取证券对应公司的基础资料。
    ///
    /// # Arguments
    /// * `stock`: 证券身份。
    ///
    /// # Returns
    /// 成功返回原始公司资料，缺失字段保持为 None。
    async fn fetch_profile(&self, stock: &Stock) -> Result<CompanyProfile, MarketError>;
}
