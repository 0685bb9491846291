//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use axum::http::Uri;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use kabuka_analysis::builder::TickerAnalysisBuilder;

use crate::error::ApiError;
use crate::routes::{analysis, dashboard, health};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 状态只读，请求之间不共享任何可变数据。
#[derive(Clone)]
pub struct AppState {
    /// 分析构建器 (持有数据源与渲染器)
    pub analysis: Arc<TickerAnalysisBuilder>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kabuka 行情分析 API",
        version = "0.1.0",
        description = "单只股票的一年 K 线、SMA 20 / EMA 20 均线与公司基础信息。",
        license(name = "MIT")
    ),
    tags(
        (name = "看板 (Dashboard)", description = "HTML 看板页面"),
        (name = "分析 (Analysis)", description = "JSON 格式的分析数据"),
        (name = "系统 (System)", description = "存活探针")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 未匹配任何路由时返回 404
async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与中间件)。
pub fn build_router(state: AppState) -> Router {
    // 1. 业务路由与自动收集的 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(dashboard::dashboard))
        .routes(routes!(analysis::get_analysis))
        .routes(routes!(health::health))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (看板无鉴权，允许所有来源只读访问)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 构建路由并启动 HTTP 监听，收到 Ctrl-C 后优雅退出。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Kabuka server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时不应立即退出，保持服务运行
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
