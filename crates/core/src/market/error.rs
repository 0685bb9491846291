use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，覆盖网络、会话、解析及数据缺失等问题。
///
/// # Invariants
/// - `Display` 文本会原样拼入用户可见的错误提示，措辞需面向最终用户可读。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    // 网络层错误，包含底层 HTTP 客户端错误信息或非 2xx 状态码
    #[error("Network error: {0}")]
    Network(String),
    // 数据源会话 (cookie / crumb) 建立失败
    #[error("Session error: {0}")]
    Session(String),
    // 数据解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 数据源返回了空结果集合
    #[error("Data not found")]
    NotFound,
    // 数据源明确报告的错误
    #[error("Provider error: {0}")]
    Provider(String),
}
