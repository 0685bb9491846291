use crate::chart::entity::ChartSpec;
use crate::chart::error::ChartError;

/// # Summary
/// 图表渲染器接口，将图表描述转换为可嵌入页面的片段。
///
/// # Invariants
/// - 渲染是纯计算，不得发起网络请求；实现必须是 `Send + Sync` 以便跨请求共享。
pub trait ChartRenderer: Send + Sync {
    /// # Summary
    /// 渲染图表。
    ///
    /// # Arguments
    /// * `spec`: 图表描述。
    ///
    /// # Returns
    /// 成功返回可直接嵌入 HTML 的片段字符串。
    fn render(&self, spec: &ChartSpec) -> Result<String, ChartError>;
}
