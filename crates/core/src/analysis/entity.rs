use crate::analysis::error::AnalysisError;
use crate::chart::entity::ChartSpec;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Summary
/// 看板展示的公司基础信息 (`stock_info`)。
///
/// # Invariants
/// - 所有字段均已填充：缺失值已按字段默认表替换。
/// - `current_price` 来自最后一根 K 线的收盘价，保留两位小数，而非数据源的实时报价。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyMetadata {
    /// 公司名称，缺失时为证券代码本身
    #[schema(example = "Apple Inc.")]
    pub name: String,
    /// 最新收盘价 (两位小数)
    #[schema(value_type = f64, example = 227.48)]
    pub current_price: Decimal,
    /// 总市值，缺失时为 "N/A"
    #[schema(example = "3450000000000")]
    pub market_cap: String,
    /// 所属板块，缺失时为 "N/A"
    #[schema(example = "Technology")]
    pub sector: String,
    /// 业务简介，截断至 500 字符后固定追加 "..."
    pub summary: String,
}

/// # Summary
/// 已渲染的图表：保留描述本身与渲染出的 HTML 片段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub spec: ChartSpec,
    // 可直接嵌入页面的 HTML 片段 (plot_div)
    pub html: String,
}

/// # Summary
/// 单次分析请求的完整结果。
///
/// # Invariants
/// - `error_message` 存在时，`chart` 与 `metadata` 必然为 None。
/// - `error_message` 不存在时，`chart` 与 `metadata` 必然同时存在。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    // 规范化 (大写) 后的证券代码
    pub ticker: String,
    pub error_message: Option<String>,
    pub chart: Option<RenderedChart>,
    pub metadata: Option<CompanyMetadata>,
}

impl AnalysisResult {
    /// 构造成功结果
    pub fn success(ticker: String, chart: RenderedChart, metadata: CompanyMetadata) -> Self {
        Self {
            ticker,
            error_message: None,
            chart: Some(chart),
            metadata: Some(metadata),
        }
    }

    /// 构造失败结果，图表与公司信息均为空
    pub fn failure(ticker: String, err: &AnalysisError) -> Self {
        Self {
            ticker,
            error_message: Some(err.to_string()),
            chart: None,
            metadata: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }

    /// 图表 HTML 片段，失败时为空字符串
    pub fn plot_div(&self) -> &str {
        self.chart.as_ref().map_or("", |c| c.html.as_str())
    }
}
