use crate::chart::error::ChartError;
use crate::market::error::MarketError;
use thiserror::Error;

/// # Summary
/// 单次分析请求的用户可见错误。
///
/// # Invariants
/// - 只有两种错误：空数据与其他一切失败。
/// - 所有下层错误统一折叠为 `Fetch`，仅保留其文本，错误类型信息在此丢失。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    // 数据源返回了零条历史记录，携带规范化后的代码
    #[error("No data found for ticker '{0}'. Please check the symbol.")]
    NoData(String),
    // 获取、计算或渲染过程中的任何失败，携带底层错误文本
    #[error("Error fetching data: {0}")]
    Fetch(String),
}

impl From<MarketError> for AnalysisError {
    fn from(err: MarketError) -> Self {
        AnalysisError::Fetch(err.to_string())
    }
}

impl From<ChartError> for AnalysisError {
    fn from(err: ChartError) -> Self {
        AnalysisError::Fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        let err = AnalysisError::NoData("ZZZZ".to_string());
        assert_eq!(
            err.to_string(),
            "No data found for ticker 'ZZZZ'. Please check the symbol."
        );
    }

    #[test]
    fn test_market_error_collapses_to_fetch() {
        let err: AnalysisError = MarketError::Network("connection reset".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Error fetching data: Network error: connection reset"
        );
    }

    #[test]
    fn test_chart_error_collapses_to_fetch() {
        let err: AnalysisError = ChartError::Invalid("length mismatch".to_string()).into();
        assert!(err.to_string().starts_with("Error fetching data: "));
    }
}
