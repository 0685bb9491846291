//! 公司信息 (`stock_info`) 的组装规则。
//!
//! 缺失字段的默认值集中在 [`ProfileField::default_rule`] 一处定义，
//! 便于审阅与单独测试。

use kabuka_core::analysis::entity::CompanyMetadata;
use kabuka_core::analysis::error::AnalysisError;
use kabuka_core::common::Stock;
use kabuka_core::market::entity::CompanyProfile;
use rust_decimal::{Decimal, RoundingStrategy};

/// 简介保留的最大字符数
pub const SUMMARY_LIMIT: usize = 500;
/// 简介截断后追加的标记
pub const TRUNCATION_MARKER: &str = "...";
/// 数值类字段缺失时的占位
pub const NOT_AVAILABLE: &str = "N/A";
/// 简介缺失时的占位
pub const NO_SUMMARY: &str = "No summary available.";

/// 公司信息中来自数据源的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    MarketCap,
    Sector,
    Summary,
}

/// 字段缺失时的取值规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    // 使用规范化后的证券代码
    Ticker,
    // 使用固定文本
    Text(&'static str),
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Name,
        ProfileField::MarketCap,
        ProfileField::Sector,
        ProfileField::Summary,
    ];

    /// # Summary
    /// 字段默认表。
    ///
    /// | 字段       | 数据源键              | 默认值                   |
    /// |------------|-----------------------|--------------------------|
    /// | Name       | longName              | 证券代码                 |
    /// | MarketCap  | marketCap             | "N/A"                    |
    /// | Sector     | sector                | "N/A"                    |
    /// | Summary    | longBusinessSummary   | "No summary available."  |
    pub const fn default_rule(self) -> FieldDefault {
        match self {
            ProfileField::Name => FieldDefault::Ticker,
            ProfileField::MarketCap => FieldDefault::Text(NOT_AVAILABLE),
            ProfileField::Sector => FieldDefault::Text(NOT_AVAILABLE),
            ProfileField::Summary => FieldDefault::Text(NO_SUMMARY),
        }
    }

    /// 按默认表解析字段：数据源有值则原样使用，否则取默认值
    pub fn resolve(self, raw: Option<String>, stock: &Stock) -> String {
        raw.unwrap_or_else(|| match self.default_rule() {
            FieldDefault::Ticker => stock.symbol.clone(),
            FieldDefault::Text(text) => text.to_string(),
        })
    }
}

/// 截取前 500 个字符并无条件追加 "..."，短文本同样追加
pub fn truncate_summary(text: &str) -> String {
    let mut summary: String = text.chars().take(SUMMARY_LIMIT).collect();
    summary.push_str(TRUNCATION_MARKER);
    summary
}

/// # Summary
/// 将收盘价四舍五入 (银行家舍入) 到两位小数。
///
/// # Logic
/// 先保留 f64 的精确二进制值再舍入。`2.675` 的 f64 值略小于 2.675，因此得到 2.67；
/// 只有真正落在中点上的值才按偶数方向舍入。
///
/// # Returns
/// 收盘价不是有限数时返回 `AnalysisError::Fetch`。
pub fn round_price(close: f64) -> Result<Decimal, AnalysisError> {
    Decimal::from_f64_retain(close)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .ok_or_else(|| AnalysisError::Fetch(format!("Invalid closing price: {}", close)))
}

/// # Summary
/// 根据原始公司资料与最新收盘价组装 `CompanyMetadata`。
///
/// # Logic
/// 1. 各字段按默认表独立解析。
/// 2. 简介在解析后统一截断并追加标记。
/// 3. 当前价格取自传入的收盘价，忽略数据源的任何价格字段。
///
/// # Arguments
/// * `stock`: 规范化后的证券。
/// * `profile`: 数据源返回的原始资料。
/// * `last_close`: 历史数据最后一根 K 线的收盘价。
pub fn build_metadata(
    stock: &Stock,
    profile: CompanyProfile,
    last_close: f64,
) -> Result<CompanyMetadata, AnalysisError> {
    let summary = ProfileField::Summary.resolve(profile.long_business_summary, stock);

    Ok(CompanyMetadata {
        name: ProfileField::Name.resolve(profile.long_name, stock),
        current_price: round_price(last_close)?,
        market_cap: ProfileField::MarketCap
            .resolve(profile.market_cap.map(|cap| cap.to_string()), stock),
        sector: ProfileField::Sector.resolve(profile.sector, stock),
        summary: truncate_summary(&summary),
    })
}
