//! # 看板页面路由控制器
//!
//! 实现 `/` 路径下的 HTML 看板。分析失败时同样返回 200，错误文本渲染在页面中。

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;

use crate::error::ApiError;
use crate::page::{DashboardPage, render_template};
use crate::server::AppState;
use crate::types::{DashboardQuery, DashboardResponse};

/// 渲染单个证券的行情分析看板
///
/// 展示最近一年的蜡烛图、SMA 20 / EMA 20 均线以及公司基础信息。
#[utoipa::path(
    get,
    path = "/",
    tag = "看板 (Dashboard)",
    params(DashboardQuery),
    responses(
        (status = 200, description = "看板页面 (包括分析失败时的错误页面)", body = String, content_type = "text/html"),
        (status = 400, description = "查询字符串不合法"),
        (status = 500, description = "页面模板渲染失败")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let result = state.analysis.build(query.ticker.as_deref()).await;
    let view = DashboardResponse::from(result);
    render_template(&DashboardPage::from(&view))
}
