//! # `kabuka-chart` - 图表渲染
//!
//! 实现 `kabuka_core::chart::port::ChartRenderer`，将图表描述渲染为基于
//! plotly.js 的可嵌入 HTML 片段。

pub mod plotly;
