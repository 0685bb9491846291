use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use kabuka_analysis::builder::{EMA_SERIES, PRICE_SERIES, SMA_SERIES, TickerAnalysisBuilder};
use kabuka_chart::plotly::PlotlyRenderer;
use kabuka_core::chart::entity::{ChartSpec, Series, Theme, TRANSPARENT};
use kabuka_core::chart::error::ChartError;
use kabuka_core::chart::port::ChartRenderer;
use kabuka_core::common::{HistoryPeriod, Stock};
use kabuka_core::market::entity::{Candle, CompanyProfile};
use kabuka_core::market::error::MarketError;
use kabuka_core::market::port::MarketDataProvider;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// # Summary
/// 可编排返回值的模拟数据源，并记录调用情况。
struct MockProvider {
    history: Result<Vec<Candle>, MarketError>,
    profile: Result<CompanyProfile, MarketError>,
    history_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    symbols: Mutex<Vec<String>>,
}

impl MockProvider {
    fn new(
        history: Result<Vec<Candle>, MarketError>,
        profile: Result<CompanyProfile, MarketError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            history,
            profile,
            history_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            symbols: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch_history(
        &self,
        stock: &Stock,
        period: HistoryPeriod,
    ) -> Result<Vec<Candle>, MarketError> {
        assert_eq!(period, HistoryPeriod::OneYear);
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.symbols.lock().unwrap().push(stock.symbol.clone());
        self.history.clone()
    }

    async fn fetch_profile(&self, stock: &Stock) -> Result<CompanyProfile, MarketError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.symbols.lock().unwrap().push(stock.symbol.clone());
        self.profile.clone()
    }
}

/// 总是失败的渲染器
struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _spec: &ChartSpec) -> Result<String, ChartError> {
        Err(ChartError::Serialize("boom".to_string()))
    }
}

/// 生成收盘价为 1..=n 的连续日线
fn candles(n: u32) -> Vec<Candle> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    (1..=n)
        .map(|i| {
            let close = f64::from(i);
            Candle {
                date: start + Days::new(u64::from(i)),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
            }
        })
        .collect()
}

fn full_profile() -> CompanyProfile {
    CompanyProfile {
        long_name: Some("Apple Inc.".to_string()),
        market_cap: Some(3_450_000_000_000),
        sector: Some("Technology".to_string()),
        long_business_summary: Some("Apple designs consumer electronics.".to_string()),
    }
}

fn builder(provider: Arc<MockProvider>) -> TickerAnalysisBuilder {
    TickerAnalysisBuilder::new(provider, Arc::new(PlotlyRenderer::new()))
}

#[tokio::test]
async fn test_success_produces_chart_and_metadata() {
    let provider = MockProvider::new(Ok(candles(30)), Ok(full_profile()));
    let result = builder(provider.clone()).build(Some("aapl")).await;

    assert_eq!(result.ticker, "AAPL");
    assert!(result.error_message.is_none());
    assert!(result.is_success());

    let chart = result.chart.as_ref().unwrap();
    let names: Vec<&str> = chart.spec.series.iter().map(Series::name).collect();
    assert_eq!(names, vec![PRICE_SERIES, SMA_SERIES, EMA_SERIES]);
    assert!(chart.spec.series.iter().all(|s| s.len() == 30));
    assert_eq!(chart.spec.layout.title, "AAPL Price Analysis");
    assert_eq!(chart.spec.layout.y_axis_title, "Price");
    assert_eq!(chart.spec.layout.theme, Theme::Dark);
    assert_eq!(chart.spec.layout.paper_bgcolor, TRANSPARENT);
    assert_eq!(chart.spec.layout.plot_bgcolor, TRANSPARENT);
    assert_eq!(chart.spec.layout.font_color, "white");
    assert!(result.plot_div().contains("Plotly.newPlot"));

    let metadata = result.metadata.as_ref().unwrap();
    assert_eq!(metadata.name, "Apple Inc.");
    assert_eq!(metadata.current_price, dec!(30.00));
    assert_eq!(metadata.market_cap, "3450000000000");
    assert_eq!(metadata.sector, "Technology");
    assert_eq!(metadata.summary, "Apple designs consumer electronics....");

    assert_eq!(provider.history_calls.load(Ordering::SeqCst), 1);
    assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 1);
    assert_eq!(*provider.symbols.lock().unwrap(), vec!["AAPL", "AAPL"]);
}

#[tokio::test]
async fn test_indicator_series_values() {
    let provider = MockProvider::new(Ok(candles(30)), Ok(full_profile()));
    let result = builder(provider).build(Some("MSFT")).await;
    let chart = result.chart.unwrap();
    let spec = &chart.spec;

    let Series::Line(sma) = &spec.series[1] else {
        panic!("SMA series should be a line");
    };
    assert!(sma.y[..19].iter().all(Option::is_none));
    assert_eq!(sma.y[19], Some(10.5));

    let Series::Line(ema) = &spec.series[2] else {
        panic!("EMA series should be a line");
    };
    assert_eq!(ema.y[0], Some(1.0));
    assert!(ema.y.iter().all(Option::is_some));
}

#[tokio::test]
async fn test_empty_history_reports_no_data() {
    let provider = MockProvider::new(Ok(Vec::new()), Ok(full_profile()));
    let result = builder(provider.clone()).build(Some("zzzz")).await;

    assert_eq!(result.ticker, "ZZZZ");
    assert_eq!(
        result.error_message.as_deref(),
        Some("No data found for ticker 'ZZZZ'. Please check the symbol.")
    );
    assert!(result.chart.is_none());
    assert!(result.metadata.is_none());
    assert_eq!(result.plot_div(), "");
    // 空数据时直接返回，不再请求公司资料
    assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_history_failure_collapses_to_fetch_error() {
    let provider = MockProvider::new(
        Err(MarketError::Network("connection refused".to_string())),
        Ok(full_profile()),
    );
    let result = builder(provider).build(Some("AAPL")).await;

    assert_eq!(
        result.error_message.as_deref(),
        Some("Error fetching data: Network error: connection refused")
    );
    assert!(result.chart.is_none());
    assert!(result.metadata.is_none());
}

#[tokio::test]
async fn test_profile_failure_discards_rendered_chart() {
    let provider = MockProvider::new(
        Ok(candles(25)),
        Err(MarketError::Parse("unexpected token".to_string())),
    );
    let result = builder(provider).build(None).await;

    assert_eq!(result.ticker, "AAPL");
    let message = result.error_message.unwrap();
    assert!(message.starts_with("Error fetching data: "));
    assert!(result.chart.is_none());
    assert!(result.metadata.is_none());
}

#[tokio::test]
async fn test_render_failure_collapses_to_fetch_error() {
    let provider = MockProvider::new(Ok(candles(5)), Ok(full_profile()));
    let builder = TickerAnalysisBuilder::new(provider.clone(), Arc::new(FailingRenderer));
    let result = builder.build(Some("AAPL")).await;

    assert_eq!(
        result.error_message.as_deref(),
        Some("Error fetching data: Chart serialization error: boom")
    );
    assert!(result.chart.is_none());
    assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_default_ticker_and_missing_profile_fields() {
    let mut history = candles(3);
    history[2].close = 187.456;
    let provider = MockProvider::new(Ok(history), Ok(CompanyProfile::default()));
    let result = builder(provider).build(Some("")).await;

    assert_eq!(result.ticker, "AAPL");
    let metadata = result.metadata.unwrap();
    assert_eq!(metadata.name, "AAPL");
    assert_eq!(metadata.current_price, dec!(187.46));
    assert_eq!(metadata.market_cap, "N/A");
    assert_eq!(metadata.sector, "N/A");
    assert_eq!(metadata.summary, "No summary available....");
}
