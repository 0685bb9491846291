//! # API 统一错误处理
//!
//! 分析失败不属于 API 错误：它们以 200 状态码连同 `error_message` 一起渲染。
//! 本模块只处理请求本身不合法或路由不存在等 HTTP 层问题。

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 资源未找到 (404)
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 服务内部错误 (500)，如页面模板渲染失败
    #[error("服务内部错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::debug!("Request rejected: {}", self);

        let body = Json(ApiErrorResponse::from_msg(self.to_string()));
        (status, body).into_response()
    }
}

/// 查询字符串无法解析时转换为 400
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
