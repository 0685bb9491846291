//! # `kabuka-feed` - 行情数据源适配
//!
//! 实现 `kabuka_core::market::port::MarketDataProvider`，目前仅支持 Yahoo Finance。

pub mod yahoo;
