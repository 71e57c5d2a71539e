use rand::Rng;
use std::ops::RangeInclusive;

pub const RSI_RANGE: RangeInclusive<f64> = 30.0..=70.0;
pub const MACD_RANGE: RangeInclusive<f64> = -0.5..=0.5;
pub const ROE_PCT_RANGE: RangeInclusive<f64> = 5.0..=25.0;
pub const DEBT_RATIO_PCT_RANGE: RangeInclusive<f64> = 20.0..=60.0;

/// Placeholder indicators embedded in a synthetic report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportMetrics {
    pub rsi: f64,
    pub macd: f64,
    pub roe_pct: f64,
    pub debt_ratio_pct: f64,
}

impl ReportMetrics {
    /// Draws each metric independently and uniformly from its range, rounded to 2 decimals.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            rsi: sample_rounded(rng, RSI_RANGE),
            macd: sample_rounded(rng, MACD_RANGE),
            roe_pct: sample_rounded(rng, ROE_PCT_RANGE),
            debt_ratio_pct: sample_rounded(rng, DEBT_RATIO_PCT_RANGE),
        }
    }
}

fn sample_rounded<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<f64>) -> f64 {
    round2(rng.gen_range(range))
}

// Rounding a bound-adjacent draw can only land on the bound itself, never past it.
// Draws in (-0.005, 0) round to -0.0, which is folded to 0.0 so it never prints as "-0.00".
fn round2(v: f64) -> f64 {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn generate_report<R: Rng + ?Sized>(subject: &str, rng: &mut R) -> String {
    render_report(subject, &ReportMetrics::sample(rng))
}

pub fn render_report(subject: &str, m: &ReportMetrics) -> String {
    format!(
        "## {subject} 综合分析报告\n\
         \n\
         ---\n\
         \n\
         ## 一、技术面分析\n\
         1. **K线技术形态**: 近90日K线图显示，{subject} 处于震荡上行趋势。\n\
         2. **技术指标信号**:\n    \
             * **RSI**: 当前RSI为 {rsi:.2}，处于中性区间。\n    \
             * **MACD**: MACD值为 {macd:.2}，快慢线接近金叉。\n\
         \n\
         ## 二、基本面分析\n\
         1. **盈利能力**: 最新财报显示，ROE (净资产收益率) 为 {roe:.2}%。\n\
         2. **财务健康度**: 资产负债率为 {debt:.2}%，现金流充裕。\n\
         \n\
         ## 三、综合评估\n\
         1. **核心结论**: 综合技术面与基本面，{subject} 短期看涨，长期基本面稳固。\n\
         2. **数据局限性**: 本报告为模拟数据，请接入真实数据源 (如 AkShare)。\n",
        rsi = m.rsi,
        macd = m.macd,
        roe = m.roe_pct,
        debt = m.debt_ratio_pct,
    )
}
