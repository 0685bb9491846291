//! # `kabuka-core` - 领域核心
//!
//! 定义行情分析看板的实体、错误与端口 (Port) 契约。
//! 本 crate 不包含任何网络或渲染实现，具体实现由 `kabuka-feed`、
//! `kabuka-chart` 等基础设施 crate 通过实现端口注入。

pub mod analysis;
pub mod chart;
pub mod common;
pub mod config;
pub mod market;
