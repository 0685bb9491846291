use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 完全透明的背景色
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// # Summary
/// 与渲染实现无关的图表描述。
///
/// # Invariants
/// - `series` 的顺序即绘制顺序与图例顺序。
/// - 所有序列的 `x` 轴长度一致，并与源 K 线一一对应。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub series: Vec<Series>,
    pub layout: Layout,
}

/// # Summary
/// 图表中的单个数据序列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Series {
    // 蜡烛图 (OHLC)
    Candlestick(CandlestickSeries),
    // 折线
    Line(LineSeries),
}

impl Series {
    /// 序列在图例中显示的名称
    pub fn name(&self) -> &str {
        match self {
            Series::Candlestick(s) => &s.name,
            Series::Line(s) => &s.name,
        }
    }

    /// 序列包含的数据点数量
    pub fn len(&self) -> usize {
        match self {
            Series::Candlestick(s) => s.x.len(),
            Series::Line(s) => s.x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 蜡烛图序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickSeries {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// # Summary
/// 折线序列。
///
/// # Invariants
/// - `y` 中的 None 表示该点无值（渲染为断点），而不是 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
    // 线条颜色 (CSS 颜色名或 rgba)
    pub color: String,
}

/// 图表视觉主题
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
}

/// # Summary
/// 图表布局元数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    // 图表标题
    pub title: String,
    // Y 轴标题
    pub y_axis_title: String,
    // 视觉主题
    pub theme: Theme,
    // 整个画布背景色
    pub paper_bgcolor: String,
    // 绘图区背景色
    pub plot_bgcolor: String,
    // 默认字体颜色
    pub font_color: String,
}
