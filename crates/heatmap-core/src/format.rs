//! Human-readable number formatting for tooltips and modals

use crate::{ChangeFormatter, LargeNumberFormatter, MISSING};

/// Signed two-decimal percentage ("+1.23%", "-2.50%")
#[derive(Debug, Clone, Default)]
pub struct PercentChangeFormatter;

impl ChangeFormatter for PercentChangeFormatter {
    fn format(&self, change: Option<f64>) -> String {
        match change {
            Some(c) if !c.is_nan() => {
                let sign = if c > 0.0 { "+" } else { "" };
                format!("{}{:.2}%", sign, c)
            }
            _ => MISSING.to_string(),
        }
    }
}

/// Traded volume with " K" / " M" suffixes.
///
/// Thresholds are strict: above 10,000,000 scales to millions and above
/// 10,000 to thousands, so 1,000,000..=10,000,000 still renders in thousands.
#[derive(Debug, Clone, Default)]
pub struct VolumeFormatter;

impl LargeNumberFormatter for VolumeFormatter {
    fn format(&self, num: Option<f64>) -> String {
        let Some(vol) = present(num) else {
            return MISSING.to_string();
        };
        if vol > 1e7 {
            format!("{:.1} M", vol / 1e6)
        } else if vol > 1e4 {
            format!("{:.1} K", vol / 1e3)
        } else {
            group_digits(vol)
        }
    }
}

/// Market capitalisation with " M" / " B" / " T" suffixes
#[derive(Debug, Clone, Default)]
pub struct MarketCapFormatter;

impl LargeNumberFormatter for MarketCapFormatter {
    fn format(&self, num: Option<f64>) -> String {
        let Some(cap) = present(num) else {
            return MISSING.to_string();
        };
        if cap >= 1e12 {
            format!("{:.2} T", cap / 1e12)
        } else if cap >= 1e9 {
            format!("{:.2} B", cap / 1e9)
        } else if cap >= 1e6 {
            format!("{:.2} M", cap / 1e6)
        } else {
            group_digits(cap)
        }
    }
}

// Zero and NaN count as missing
fn present(num: Option<f64>) -> Option<f64> {
    num.filter(|n| *n != 0.0 && !n.is_nan())
}

pub fn format_change(change: Option<f64>) -> String {
    PercentChangeFormatter.format(change)
}

pub fn format_volume(volume: Option<f64>) -> String {
    VolumeFormatter.format(volume)
}

pub fn format_market_cap(cap: Option<f64>) -> String {
    MarketCapFormatter.format(cap)
}

/// Plain figure (price, P/E) or the missing placeholder
pub fn format_plain(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// en-US style grouping: comma thousands separators, at most three decimals
pub fn group_digits(num: f64) -> String {
    if !num.is_finite() {
        return num.to_string();
    }

    let rounded = format!("{:.3}", num.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    let sign = if num < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}
