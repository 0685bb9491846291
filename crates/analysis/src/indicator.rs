//! 移动平均指标。
//!
//! 两个函数的输出都与输入按下标一一对齐，语义与 pandas 的
//! `rolling(window).mean()` 以及 `ewm(span, adjust=False).mean()` 一致。

use kabuka_core::market::entity::Candle;

/// 看板使用的 SMA 窗口
pub const SMA_WINDOW: u32 = 20;
/// 看板使用的 EMA 跨度
pub const EMA_SPAN: u32 = 20;

/// Simple Moving Average (SMA)
///
/// 返回与 `values` 对齐的向量：
/// - 前 `window - 1` 个位置为 `None` (无值，而不是 0)
/// - 其后为以当前位置结尾的 `window` 个值的算术平均
pub fn simple_moving_average(values: &[f64], window: u32) -> Vec<Option<f64>> {
    let Ok(width) = usize::try_from(window) else {
        return vec![None; values.len()];
    };
    if width == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < width {
                return None;
            }
            let sum: f64 = values[i + 1 - width..=i].iter().sum();
            Some(sum / f64::from(window))
        })
        .collect()
}

/// Exponential Moving Average (EMA)
///
/// `alpha = 2 / (span + 1)`，以第一个值为种子，之后对每个值递推：
/// `ema[i] = alpha * values[i] + (1 - alpha) * ema[i - 1]`。
/// 从第一个位置起即有定义。
pub fn exponential_moving_average(values: &[f64], span: u32) -> Vec<f64> {
    let Some(&seed) = values.first() else {
        return Vec::new();
    };
    let alpha = 2.0 / (f64::from(span) + 1.0);

    std::iter::once(seed)
        .chain(values[1..].iter().scan(seed, move |prev, &v| {
            *prev = alpha * v + (1.0 - alpha) * *prev;
            Some(*prev)
        }))
        .collect()
}

/// # Summary
/// 与 K 线逐条对齐的派生指标列。
///
/// # Invariants
/// - `sma20.len() == ema20.len() == candles.len()`。
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub sma20: Vec<Option<f64>>,
    pub ema20: Vec<f64>,
}

impl IndicatorFrame {
    /// 基于收盘价计算 SMA20 与 EMA20
    pub fn compute(candles: &[Candle]) -> Self {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        Self {
            sma20: simple_moving_average(&closes, SMA_WINDOW),
            ema20: exponential_moving_average(&closes, EMA_SPAN),
        }
    }
}
