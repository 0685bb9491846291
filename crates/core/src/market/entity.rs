use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根日 K 线数据实体，记录一个交易日内的行情波动。
///
/// # Invariants
/// - `date` 是交易所当地时区的交易日，而不是 UTC 日期。
/// - `high` 必须大于或等于 `low`, `open`, `close`。
/// - 同一批历史数据按 `date` 严格递增排列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    // 交易日 (交易所当地日期)
    pub date: NaiveDate,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
}

/// # Summary
/// 数据源返回的原始公司资料，每个字段都可能缺失。
///
/// # Invariants
/// - 本结构只做搬运，不做任何默认值填充；默认值规则由分析层的字段默认表负责。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    // 公司全称 (longName)
    pub long_name: Option<String>,
    // 总市值 (marketCap)
    pub market_cap: Option<u64>,
    // 所属板块 (sector)
    pub sector: Option<String>,
    // 业务简介 (longBusinessSummary)
    pub long_business_summary: Option<String>,
}
