//! # `kabuka-api` - HTTP 服务层
//!
//! 本 crate 是行情分析看板的 HTTP 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收浏览器的看板请求并渲染 HTML 页面
//! - 以 JSON 形式提供同一份分析结果
//! - 调用下层 `TickerAnalysisBuilder` 完成分析
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod page;
pub mod routes;
pub mod server;
pub mod types;
