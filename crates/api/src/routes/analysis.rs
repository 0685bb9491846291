//! # 分析数据路由控制器
//!
//! 以 JSON 形式提供与看板页面相同的数据，便于前端自行渲染。

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, DashboardQuery, DashboardResponse};

/// 获取单个证券的分析数据
///
/// 分析失败 (无数据或抓取失败) 不视为请求失败：`success` 仍为 true，
/// 错误文本放在 `data.error_message` 中。
#[utoipa::path(
    get,
    path = "/api/v1/analysis",
    tag = "分析 (Analysis)",
    params(DashboardQuery),
    responses(
        (status = 200, description = "分析结果", body = ApiResponse<DashboardResponse>),
        (status = 400, description = "查询字符串不合法")
    )
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let Query(query) = query?;
    let result = state.analysis.build(query.ticker.as_deref()).await;
    Ok(Json(ApiResponse::ok(result.into())))
}
