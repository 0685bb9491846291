use std::sync::Arc;

use kabuka_core::analysis::entity::{AnalysisResult, CompanyMetadata, RenderedChart};
use kabuka_core::analysis::error::AnalysisError;
use kabuka_core::chart::entity::{
    CandlestickSeries, ChartSpec, Layout, LineSeries, Series, Theme, TRANSPARENT,
};
use kabuka_core::chart::port::ChartRenderer;
use kabuka_core::common::{HistoryPeriod, Stock};
use kabuka_core::market::entity::Candle;
use kabuka_core::market::port::MarketDataProvider;
use tracing::{info, warn};

use crate::indicator::IndicatorFrame;
use crate::metadata::build_metadata;

pub const PRICE_SERIES: &str = "Price";
pub const SMA_SERIES: &str = "SMA 20";
pub const EMA_SERIES: &str = "EMA 20";
const SMA_COLOR: &str = "orange";
const EMA_COLOR: &str = "cyan";

/// # Summary
/// 单个证券的看板分析构建器。
///
/// # Invariants
/// - 无状态：只持有只读的端口引用，可在并发请求间共享。
/// - 两次数据源调用严格顺序执行，失败不重试。
#[derive(Clone)]
pub struct TickerAnalysisBuilder {
    // 行情数据源
    provider: Arc<dyn MarketDataProvider>,
    // 图表渲染器
    renderer: Arc<dyn ChartRenderer>,
}

impl TickerAnalysisBuilder {
    pub fn new(provider: Arc<dyn MarketDataProvider>, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self { provider, renderer }
    }

    /// # Summary
    /// 为给定代码生成完整分析结果，是整个流程唯一的错误边界。
    ///
    /// # Logic
    /// 1. 规范化代码：缺失或为空时取 "AAPL"，统一大写。
    /// 2. 执行抓取、计算、渲染流程。
    /// 3. 任何失败都丢弃中间结果，只保留错误文本。
    ///
    /// # Arguments
    /// * `ticker_input`: 查询参数中的原始代码。
    ///
    /// # Returns
    /// 总是返回 `AnalysisResult`，错误体现在 `error_message` 中。
    pub async fn build(&self, ticker_input: Option<&str>) -> AnalysisResult {
        let stock = Stock::normalize(ticker_input);
        info!("Building analysis for {}", stock);

        match self.run(&stock).await {
            Ok((chart, metadata)) => {
                info!("Analysis for {} ready", stock);
                AnalysisResult::success(stock.symbol, chart, metadata)
            }
            Err(err) => {
                warn!("Analysis for {} failed: {}", stock, err);
                AnalysisResult::failure(stock.symbol, &err)
            }
        }
    }

    /// # Summary
    /// 抓取、计算与渲染流程本体。
    ///
    /// # Logic
    /// 1. 获取最近一年的日 K 线；为空则返回 `NoData`。
    /// 2. 计算 SMA20 / EMA20 并构建图表描述，交给渲染器。
    /// 3. 获取公司资料并按默认表组装公司信息。
    async fn run(
        &self,
        stock: &Stock,
    ) -> Result<(RenderedChart, CompanyMetadata), AnalysisError> {
        let candles = self
            .provider
            .fetch_history(stock, HistoryPeriod::OneYear)
            .await?;

        let Some(last) = candles.last() else {
            return Err(AnalysisError::NoData(stock.symbol.clone()));
        };

        let indicators = IndicatorFrame::compute(&candles);
        let spec = price_chart_spec(stock, &candles, indicators);
        let html = self.renderer.render(&spec)?;

        let profile = self.provider.fetch_profile(stock).await?;
        let metadata = build_metadata(stock, profile, last.close)?;

        Ok((RenderedChart { spec, html }, metadata))
    }
}

/// # Summary
/// 构建价格分析图表描述。
///
/// # Logic
/// 1. 依次放入蜡烛图 "Price"、折线 "SMA 20"、折线 "EMA 20"，顺序即图例顺序。
/// 2. 布局：标题 "<TICKER> Price Analysis"、Y 轴 "Price"、暗色主题、透明背景、白色字体。
pub fn price_chart_spec(stock: &Stock, candles: &[Candle], indicators: IndicatorFrame) -> ChartSpec {
    let x: Vec<_> = candles.iter().map(|c| c.date).collect();

    let price = Series::Candlestick(CandlestickSeries {
        name: PRICE_SERIES.to_string(),
        x: x.clone(),
        open: candles.iter().map(|c| c.open).collect(),
        high: candles.iter().map(|c| c.high).collect(),
        low: candles.iter().map(|c| c.low).collect(),
        close: candles.iter().map(|c| c.close).collect(),
    });

    let sma = Series::Line(LineSeries {
        name: SMA_SERIES.to_string(),
        x: x.clone(),
        y: indicators.sma20,
        color: SMA_COLOR.to_string(),
    });

    let ema = Series::Line(LineSeries {
        name: EMA_SERIES.to_string(),
        x,
        y: indicators.ema20.into_iter().map(Some).collect(),
        color: EMA_COLOR.to_string(),
    });

    ChartSpec {
        series: vec![price, sma, ema],
        layout: Layout {
            title: format!("{} Price Analysis", stock.symbol),
            y_axis_title: "Price".to_string(),
            theme: Theme::Dark,
            paper_bgcolor: TRANSPARENT.to_string(),
            plot_bgcolor: TRANSPARENT.to_string(),
            font_color: "white".to_string(),
        },
    }
}
