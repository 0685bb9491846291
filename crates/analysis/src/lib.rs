//! # `kabuka-analysis` - 行情分析
//!
//! 组合数据源与图表渲染器，为单个证券生成看板所需的全部数据：
//! - `indicator`: 移动平均等纯函数指标
//! - `metadata`: 公司信息的字段默认表与截断规则
//! - `builder`: 带统一错误边界的分析流程

pub mod builder;
pub mod indicator;
pub mod metadata;
