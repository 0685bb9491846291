use chrono::NaiveDate;
use kabuka_core::chart::entity::{ChartSpec, Layout, Series, Theme};
use kabuka_core::chart::error::ChartError;
use kabuka_core::chart::port::ChartRenderer;
use serde::Serialize;
use tracing::debug;

/// 默认使用的 plotly.js CDN 地址
pub const DEFAULT_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// # Summary
/// 基于 plotly.js 的图表渲染器。
///
/// # Invariants
/// - 输出为 HTML 片段而非完整页面，脚本从 CDN 加载。
/// - 每次渲染生成新的容器 id，同一页面可嵌入多个图表。
#[derive(Debug, Clone)]
pub struct PlotlyRenderer {
    cdn_url: String,
}

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self {
            cdn_url: DEFAULT_CDN_URL.to_string(),
        }
    }

}

impl Default for PlotlyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// # Summary
/// plotly.js 的 trace 描述，`type` 字段决定图形类型。
#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Trace<'a> {
    Candlestick {
        name: &'a str,
        x: Vec<String>,
        open: &'a [f64],
        high: &'a [f64],
        low: &'a [f64],
        close: &'a [f64],
    },
    Scatter {
        name: &'a str,
        mode: &'static str,
        x: Vec<String>,
        // None 序列化为 null，plotly 会在该处断开折线
        y: &'a [Option<f64>],
        line: LineStyle<'a>,
    },
}

#[derive(Serialize, Debug)]
struct LineStyle<'a> {
    color: &'a str,
}

#[derive(Serialize, Debug)]
struct Title<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct Font<'a> {
    color: &'a str,
}

#[derive(Serialize, Debug)]
struct Axis<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<Title<'a>>,
    gridcolor: &'static str,
    linecolor: &'static str,
    zerolinecolor: &'static str,
}

/// # Summary
/// plotly.js 的 layout 描述。
///
/// # Invariants
/// - 主题只决定网格与轴线颜色；背景色与字体色总是以图表描述中的显式值为准。
#[derive(Serialize, Debug)]
struct PlotlyLayout<'a> {
    title: Title<'a>,
    xaxis: Axis<'a>,
    yaxis: Axis<'a>,
    paper_bgcolor: &'a str,
    plot_bgcolor: &'a str,
    font: Font<'a>,
}

/// 主题对应的 (网格色, 轴线色)
fn theme_palette(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Dark => ("#283442", "#506784"),
    }
}

/// 交易日按 `YYYY-MM-DD` 输出，不做任何时区换算
fn format_dates(x: &[NaiveDate]) -> Vec<String> {
    x.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
}

/// # Summary
/// 校验序列内部各数组长度一致。
fn validate(series: &Series) -> Result<(), ChartError> {
    let expected = series.len();
    let consistent = match series {
        Series::Candlestick(s) => [s.open.len(), s.high.len(), s.low.len(), s.close.len()]
            .iter()
            .all(|&len| len == expected),
        Series::Line(s) => s.y.len() == expected,
    };
    if consistent {
        Ok(())
    } else {
        Err(ChartError::Invalid(format!(
            "series '{}' has mismatched lengths",
            series.name()
        )))
    }
}

fn to_trace(series: &Series) -> Trace<'_> {
    match series {
        Series::Candlestick(s) => Trace::Candlestick {
            name: &s.name,
            x: format_dates(&s.x),
            open: &s.open,
            high: &s.high,
            low: &s.low,
            close: &s.close,
        },
        Series::Line(s) => Trace::Scatter {
            name: &s.name,
            mode: "lines",
            x: format_dates(&s.x),
            y: &s.y,
            line: LineStyle { color: &s.color },
        },
    }
}

fn to_layout(layout: &Layout) -> PlotlyLayout<'_> {
    let (gridcolor, linecolor) = theme_palette(layout.theme);
    PlotlyLayout {
        title: Title {
            text: &layout.title,
        },
        xaxis: Axis {
            title: None,
            gridcolor,
            linecolor,
            zerolinecolor: gridcolor,
        },
        yaxis: Axis {
            title: Some(Title {
                text: &layout.y_axis_title,
            }),
            gridcolor,
            linecolor,
            zerolinecolor: gridcolor,
        },
        paper_bgcolor: &layout.paper_bgcolor,
        plot_bgcolor: &layout.plot_bgcolor,
        font: Font {
            color: &layout.font_color,
        },
    }
}

/// 序列化为可安全内嵌在 `<script>` 中的 JSON
fn to_script_json<T: Serialize>(value: &T) -> Result<String, ChartError> {
    let json = serde_json::to_string(value).map_err(|e| ChartError::Serialize(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}

impl ChartRenderer for PlotlyRenderer {
    /// # Summary
    /// 渲染 plotly.js 图表片段。
    ///
    /// # Logic
    /// 1. 校验每个序列的数组长度。
    /// 2. 将序列与布局转换为 plotly.js 的 data / layout JSON。
    /// 3. 生成容器 div 与调用 `Plotly.newPlot` 的脚本。
    fn render(&self, spec: &ChartSpec) -> Result<String, ChartError> {
        for series in &spec.series {
            validate(series)?;
        }

        let traces: Vec<Trace<'_>> = spec.series.iter().map(to_trace).collect();
        let data = to_script_json(&traces)?;
        let layout = to_script_json(&to_layout(&spec.layout))?;
        let div_id = uuid::Uuid::new_v4().to_string();
        debug!("Rendering chart {} with {} series", div_id, traces.len());

        Ok(format!(
            r#"<div>
<script type="text/javascript">window.PlotlyConfig = {{MathJaxConfig: 'local'}};</script>
<script charset="utf-8" src="{cdn}"></script>
<div id="{id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
<script type="text/javascript">window.PLOTLYENV = window.PLOTLYENV || {{}}; if (document.getElementById("{id}")) {{ Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}}); }}</script>
</div>"#,
            cdn = self.cdn_url,
            id = div_id,
            data = data,
            layout = layout,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabuka_core::chart::entity::{CandlestickSeries, LineSeries, TRANSPARENT};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn sample_spec(title: &str) -> ChartSpec {
        let x = vec![day(3), day(4)];
        ChartSpec {
            series: vec![
                Series::Candlestick(CandlestickSeries {
                    name: "Price".to_string(),
                    x: x.clone(),
                    open: vec![1.0, 2.0],
                    high: vec![1.5, 2.5],
                    low: vec![0.5, 1.5],
                    close: vec![1.2, 2.2],
                }),
                Series::Line(LineSeries {
                    name: "SMA 20".to_string(),
                    x,
                    y: vec![None, Some(1.7)],
                    color: "orange".to_string(),
                }),
            ],
            layout: Layout {
                title: title.to_string(),
                y_axis_title: "Price".to_string(),
                theme: Theme::Dark,
                paper_bgcolor: TRANSPARENT.to_string(),
                plot_bgcolor: TRANSPARENT.to_string(),
                font_color: "white".to_string(),
            },
        }
    }

    #[test]
    fn test_render_embeds_traces_and_layout() {
        let html = PlotlyRenderer::new().render(&sample_spec("AAPL Price Analysis")).unwrap();

        assert!(html.contains(DEFAULT_CDN_URL));
        assert!(html.contains(r#""type":"candlestick""#));
        assert!(html.contains(r#""type":"scatter""#));
        assert!(html.contains(r#""mode":"lines""#));
        assert!(html.contains(r#""y":[null,1.7]"#));
        assert!(html.contains(r#""x":["2025-03-03","2025-03-04"]"#));
        assert!(html.contains(r#""title":{"text":"AAPL Price Analysis"}"#));
        assert!(html.contains(r#""paper_bgcolor":"rgba(0,0,0,0)""#));
        assert!(html.contains(r#""font":{"color":"white"}"#));
        assert!(html.contains(r##""gridcolor":"#283442""##));
    }

    #[test]
    fn test_render_keeps_series_order() {
        let html = PlotlyRenderer::new().render(&sample_spec("X")).unwrap();
        let price = html.find(r#""name":"Price""#).unwrap();
        let sma = html.find(r#""name":"SMA 20""#).unwrap();
        assert!(price < sma);
    }

    #[test]
    fn test_render_escapes_script_close() {
        let html = PlotlyRenderer::new()
            .render(&sample_spec("</script><script>alert(1)</script>"))
            .unwrap();
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r"<\/script>"));
    }

    #[test]
    fn test_render_uses_unique_div_ids() {
        let renderer = PlotlyRenderer::new();
        let a = renderer.render(&sample_spec("A")).unwrap();
        let b = renderer.render(&sample_spec("A")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_render_rejects_mismatched_lengths() {
        let mut spec = sample_spec("X");
        if let Series::Line(line) = &mut spec.series[1] {
            line.y.push(Some(3.0));
        }
        let err = PlotlyRenderer::new().render(&spec).unwrap_err();
        assert_eq!(
            err,
            ChartError::Invalid("series 'SMA 20' has mismatched lengths".to_string())
        );
    }
}
