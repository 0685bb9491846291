use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use kabuka_core::common::tls::install_crypto_provider;
use kabuka_core::common::{HistoryPeriod, Stock};
use kabuka_core::config::FeedConfig;
use kabuka_core::market::entity::{Candle, CompanyProfile};
use kabuka_core::market::error::MarketError;
use kabuka_core::market::port::MarketDataProvider;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo 对未知代码返回的错误码
const NOT_FOUND_CODE: &str = "Not Found";

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，客户端自带的 cookie 存储在所有请求 (及所有克隆) 间共享。
/// - crumb 不缓存：每次获取公司资料都会重新请求 cookie 与 crumb，并发请求只会相互刷新同一个会话 cookie。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 查询接口根地址，如 `https://query1.finance.yahoo.com`
    base_url: Url,
    /// 下发会话 cookie 的地址
    cookie_url: String,
}

impl YahooProvider {
    /// # Summary
    /// 根据数据源配置创建 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 安装 rustls 加密后端。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 按配置的超时初始化启用 cookie 存储的 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 数据源配置。
    ///
    /// # Returns
    /// 成功返回 YahooProvider，地址、Header 或客户端构建失败返回 MarketError。
    pub fn new(config: &FeedConfig) -> Result<Self, MarketError> {
        install_crypto_provider();

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MarketError::Network(format!("Invalid base URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MarketError::Network(format!("Invalid base URL: {}", config.base_url)));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let user_agent = config
            .user_agent
            .parse::<reqwest::header::HeaderValue>()
            .map_err(|e| MarketError::Network(e.to_string()))?;
        headers.insert(reqwest::header::USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            cookie_url: config.cookie_url.clone(),
        })
    }

    /// # Summary
    /// 在根地址后逐段拼接接口路径。
    ///
    /// # Logic
    /// 每一段都按单个路径段做百分号编码，用户输入的代码中的 `?`、`#`、`/`
    /// 不会改变请求的路径或查询参数。
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// # Summary
    /// 建立 Yahoo 会话并获取 crumb。
    ///
    /// # Logic
    /// 1. 访问 cookie 地址，由客户端记录下发的会话 cookie（该地址通常返回 404，状态码忽略）。
    /// 2. 携带 cookie 请求 getcrumb 接口，返回体即 crumb 文本。
    ///
    /// # Returns
    /// 成功返回 crumb，失败返回 `MarketError::Session`。
    async fn fetch_crumb(&self) -> Result<String, MarketError> {
        self.client
            .get(&self.cookie_url)
            .send()
            .await
            .map_err(|e| MarketError::Session(e.to_string()))?;

        let resp = self
            .client
            .get(self.endpoint(&["v1", "test", "getcrumb"]))
            .send()
            .await
            .map_err(|e| MarketError::Session(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Session(format!("HTTP {}", resp.status())));
        }

        let crumb = resp
            .text()
            .await
            .map_err(|e| MarketError::Session(e.to_string()))?;
        let crumb = crumb.trim();
        if crumb.is_empty() {
            return Err(MarketError::Session("empty crumb".into()));
        }
        Ok(crumb.to_string())
    }
}

/// # Summary
/// Yahoo v8 chart 接口响应顶层结构。
#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Deserialize, Debug)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情，chart 与 quoteSummary 接口共用。
#[derive(Deserialize, Debug)]
struct YahooError {
    code: String,
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
///
/// # Invariants
/// - 区间内没有交易日时 Yahoo 会省略 `timestamp` 字段。
#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

/// # Summary
/// 交易所元数据，`gmtoffset` 为交易所当地时间相对 UTC 的秒数。
#[derive(Deserialize, Debug, Default)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Deserialize, Debug)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

/// # Summary
/// Yahoo API 原始报价数据，每个字段与 `timestamp` 按下标对齐。
#[derive(Deserialize, Debug)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// # Summary
/// Yahoo v10 quoteSummary 接口响应顶层结构。
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryBody,
}

#[derive(Deserialize, Debug)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<YahooError>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    market_cap: Option<RawValue>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AssetProfileModule {
    sector: Option<String>,
    long_business_summary: Option<String>,
}

/// # Summary
/// Yahoo 数值字段的包装：`{"raw": 123, "fmt": "123"}`，缺失时为空对象。
#[derive(Deserialize, Debug)]
struct RawValue {
    raw: Option<u64>,
}

/// # Summary
/// 将 chart 接口响应转换为 K 线列表。
///
/// # Logic
/// 1. 若响应携带 "Not Found" 错误，视为该代码无数据，返回空列表。
/// 2. 其他错误原样透传为 `MarketError::Provider`。
/// 3. 按交易所 `gmtoffset` 将时间戳换算为当地交易日。
/// 4. 逐个时间戳对齐 OHLC，任一价格缺失的交易日直接丢弃。
fn parse_chart(json: ChartResponse) -> Result<Vec<Candle>, MarketError> {
    if let Some(err) = json.chart.error {
        if err.code == NOT_FOUND_CODE {
            debug!("Yahoo reported unknown symbol: {}", err.description);
            return Ok(Vec::new());
        }
        return Err(MarketError::Provider(err.description));
    }

    let Some(result) = json.chart.result.and_then(|mut v| v.pop()) else {
        return Ok(Vec::new());
    };

    if result.timestamp.is_empty() {
        return Ok(Vec::new());
    }

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or(MarketError::Parse("No quote data".into()))?;

    let offset = FixedOffset::east_opt(result.meta.gmtoffset).ok_or_else(|| {
        MarketError::Parse(format!("Invalid gmtoffset: {}", result.meta.gmtoffset))
    })?;

    let mut candles = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        if let (Some(o), Some(h), Some(l), Some(c)) = (
            quote.open.get(i).and_then(|x| *x),
            quote.high.get(i).and_then(|x| *x),
            quote.low.get(i).and_then(|x| *x),
            quote.close.get(i).and_then(|x| *x),
        ) {
            let date = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| MarketError::Parse(format!("Invalid timestamp: {}", ts)))?
                .with_timezone(&offset)
                .date_naive();

            candles.push(Candle {
                date,
                open: o,
                high: h,
                low: l,
                close: c,
            });
        }
    }

    Ok(candles)
}

/// # Summary
/// 将 quoteSummary 接口响应转换为公司资料。
///
/// # Logic
/// 1. 接口错误透传为 `MarketError::Provider`。
/// 2. 无结果时返回 `MarketError::NotFound`。
/// 3. 字段缺失保持为 None，由上层按默认表填充。
fn parse_profile(json: QuoteSummaryResponse) -> Result<CompanyProfile, MarketError> {
    if let Some(err) = json.quote_summary.error {
        return Err(MarketError::Provider(err.description));
    }

    let result = json
        .quote_summary
        .result
        .and_then(|mut v| v.pop())
        .ok_or(MarketError::NotFound)?;

    let (long_name, market_cap) = match result.price {
        Some(price) => (
            price.long_name,
            price.market_cap.and_then(|m| m.raw),
        ),
        None => (None, None),
    };

    let (sector, long_business_summary) = match result.asset_profile {
        Some(profile) => (profile.sector, profile.long_business_summary),
        None => (None, None),
    };

    Ok(CompanyProfile {
        long_name,
        market_cap,
        sector,
        long_business_summary,
    })
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取日 K 线历史数据。
    ///
    /// # Logic
    /// 1. 构建 chart 接口 URL，代码作为单个路径段编码，附带 range 与 interval。
    /// 2. 发起异步请求；404 交给响应体中的错误码判定，其余非 2xx 视为网络错误。
    /// 3. 解析嵌套的 JSON 数据并对齐为 K 线列表。
    ///
    /// # Arguments
    /// * `stock`: 证券实体。
    /// * `period`: 回溯区间。
    ///
    /// # Returns
    /// 成功返回 K 线列表（未知代码为空列表），失败返回 MarketError。
    async fn fetch_history(
        &self,
        stock: &Stock,
        period: HistoryPeriod,
    ) -> Result<Vec<Candle>, MarketError> {
        let url = self.endpoint(&["v8", "finance", "chart", stock.symbol.as_str()]);
        debug!("Fetching {} history for {}", period, stock.symbol);

        let resp = self
            .client
            .get(url)
            .query(&[("range", period.as_range()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(MarketError::Network(format!("HTTP {}", status)));
        }

        let json: ChartResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        let candles = parse_chart(json)?;
        debug!("Fetched {} candles for {}", candles.len(), stock.symbol);
        Ok(candles)
    }

    /// # Summary
    /// 从 Yahoo Finance 抓取公司基础资料。
    ///
    /// # Logic
    /// 1. 建立会话并获取 crumb。
    /// 2. 请求 quoteSummary 接口的 price 与 assetProfile 模块。
    /// 3. 提取名称、市值、板块与简介。
    ///
    /// # Arguments
    /// * `stock`: 证券实体。
    ///
    /// # Returns
    /// 成功返回公司资料，失败返回 MarketError。
    async fn fetch_profile(&self, stock: &Stock) -> Result<CompanyProfile, MarketError> {
        let crumb = self.fetch_crumb().await?;
        let url = self.endpoint(&["v10", "finance", "quoteSummary", stock.symbol.as_str()]);
        debug!("Fetching profile for {}", stock.symbol);

        let resp = self
            .client
            .get(url)
            .query(&[("modules", "price,assetProfile"), ("crumb", crumb.as_str())])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(MarketError::Network(format!("HTTP {}", status)));
        }

        let json: QuoteSummaryResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        parse_profile(json)
    }
}
