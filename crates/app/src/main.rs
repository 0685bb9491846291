use std::sync::Arc;

use kabuka_analysis::builder::TickerAnalysisBuilder;
use kabuka_api::server::{AppState, start_server};
use kabuka_chart::plotly::PlotlyRenderer;
use kabuka_feed::yahoo::YahooProvider;
use tracing::info;

mod logging;
mod settings;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到分析构建器。
///
/// # Logic
/// 1. 加载分层配置。
/// 2. 初始化全局日志。
/// 3. 实例化基础设施层（Yahoo 数据源、plotly 渲染器）。
/// 4. 构造分析构建器并启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let config = settings::load(settings::DEFAULT_CONFIG_FILE)?;

    // 2. 初始化日志
    let _log_guard = logging::init(&config.log)?;
    info!("Kabuka starting...");

    // 3. 实例化基础设施层
    let feed = Arc::new(YahooProvider::new(&config.feed)?);
    let renderer = Arc::new(PlotlyRenderer::new());

    // 4. 构造分析构建器并启动服务
    let analysis = Arc::new(TickerAnalysisBuilder::new(feed, renderer));
    start_server(AppState { analysis }, &config.bind_addr()).await?;

    info!("Kabuka stopped");
    Ok(())
}
