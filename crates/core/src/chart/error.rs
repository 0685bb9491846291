use thiserror::Error;

/// # Summary
/// 图表渲染错误枚举。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    // 图表描述无法序列化为渲染器所需格式
    #[error("Chart serialization error: {0}")]
    Serialize(String),
    // 图表描述本身不合法 (如序列长度不一致)
    #[error("Invalid chart: {0}")]
    Invalid(String),
}
