use serde::{Deserialize, Serialize};

pub mod tls;

/// 未指定或指定为空时使用的默认证券代码
pub const DEFAULT_TICKER: &str = "AAPL";

/// # Summary
/// 证券标的实体，代表一次分析请求所针对的股票。
///
/// # Invariants
/// - `symbol` 始终为去除首尾空白后的大写形式，且非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    // 股票代码 (例如: AAPL, MSFT)
    pub symbol: String,
}

impl Stock {
    /// # Summary
    /// 将用户输入的原始代码规范化为证券实体。
    ///
    /// # Logic
    /// 1. 去除首尾空白。
    /// 2. 若输入缺失或为空，回退到 `DEFAULT_TICKER`。
    /// 3. 统一转换为大写。
    ///
    /// # Arguments
    /// * `input`: 查询参数中的原始代码，可能缺失。
    ///
    /// # Returns
    /// 规范化后的证券实体。
    pub fn normalize(input: Option<&str>) -> Self {
        let symbol = match input.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.to_uppercase(),
            _ => DEFAULT_TICKER.to_string(),
        };
        Self { symbol }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}

/// # Summary
/// 历史行情回溯区间。
///
/// # Invariants
/// - 看板只使用一年区间，枚举保留是为了让数据源实现显式映射区间字符串。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HistoryPeriod {
    // 最近一年 (365 个自然日)
    #[default]
    OneYear,
}

impl HistoryPeriod {
    /// 数据源识别的区间字符串
    pub fn as_range(&self) -> &'static str {
        match self {
            HistoryPeriod::OneYear => "1y",
        }
    }
}

impl std::fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases_input() {
        assert_eq!(Stock::normalize(Some("aapl")).symbol, "AAPL");
        assert_eq!(Stock::normalize(Some(" msft ")).symbol, "MSFT");
    }

    #[test]
    fn test_normalize_falls_back_to_default() {
        assert_eq!(Stock::normalize(None).symbol, "AAPL");
        assert_eq!(Stock::normalize(Some("")).symbol, "AAPL");
        assert_eq!(Stock::normalize(Some("   ")).symbol, "AAPL");
    }

    #[test]
    fn test_history_period_range() {
        assert_eq!(HistoryPeriod::OneYear.as_range(), "1y");
        assert_eq!(HistoryPeriod::default().to_string(), "1y");
    }
}
