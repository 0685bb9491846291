//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use kabuka_core::analysis::entity::{AnalysisResult, CompanyMetadata};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================
//  看板相关 DTO
// ============================================================

/// 看板查询参数
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// 证券代码，大小写不敏感，缺失或为空时为 AAPL
    #[param(example = "aapl")]
    pub ticker: Option<String>,
}

/// 看板数据 DTO，字段与页面模板变量一一对应
///
/// 分析失败时 `plot_div` 为空字符串，`stock_info` 为 null，
/// `error_message` 携带用户可见的错误文本。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    /// 规范化 (大写) 后的证券代码
    #[schema(example = "AAPL")]
    pub ticker: String,
    /// 可嵌入页面的图表 HTML 片段
    pub plot_div: String,
    /// 公司基础信息
    pub stock_info: Option<CompanyMetadata>,
    /// 错误信息
    #[schema(example = "No data found for ticker 'ZZZZ'. Please check the symbol.")]
    pub error_message: Option<String>,
}

impl From<AnalysisResult> for DashboardResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            plot_div: result.plot_div().to_string(),
            ticker: result.ticker,
            stock_info: result.metadata,
            error_message: result.error_message,
        }
    }
}

/// 存活探针响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
