//! # 看板页面渲染
//!
//! 将 `DashboardResponse` 填入 `templates/dashboard.html`。模板默认转义所有插值，
//! 只有 `plot_div` (由图表渲染器生成的可信片段) 以 `safe` 原样输出。

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use kabuka_core::analysis::entity::CompanyMetadata;

use crate::error::ApiError;
use crate::types::DashboardResponse;

/// 看板页面模板
///
/// # Logic
/// 1. 顶部为代码搜索表单，回填当前代码。
/// 2. 存在错误时显示错误横幅，且不渲染图表与公司信息。
/// 3. 否则依次输出图表片段与公司信息卡片。
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub ticker: &'a str,
    pub plot_div: &'a str,
    pub stock_info: Option<&'a CompanyMetadata>,
    pub error_message: Option<&'a str>,
}

impl<'a> From<&'a DashboardResponse> for DashboardPage<'a> {
    fn from(view: &'a DashboardResponse) -> Self {
        Self {
            ticker: &view.ticker,
            plot_div: &view.plot_div,
            stock_info: view.stock_info.as_ref(),
            error_message: view.error_message.as_deref(),
        }
    }
}

/// 将模板渲染为 axum 响应，渲染失败时返回 500
pub fn render_template<T: Template>(template: &T) -> Result<Response, ApiError> {
    let html = template.render().map_err(|e| {
        tracing::error!("Template render error: {}", e);
        ApiError::Internal(e.to_string())
    })?;
    Ok(Html(html).into_response())
}
