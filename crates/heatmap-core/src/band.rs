//! Colour bands for daily price change

use crate::colors;

/// Price-change band used to colour treemap cells and the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeBand {
    DeepLoss,
    Loss,
    SlightLoss,
    SlightGain,
    Gain,
    DeepGain,
    Unknown,
}

impl ChangeBand {
    /// Classify a percentage change. Missing or NaN values are `Unknown`.
    pub fn classify(change: Option<f64>) -> Self {
        match change {
            Some(c) if c.is_nan() => Self::Unknown,
            Some(c) if c < -3.0 => Self::DeepLoss,
            Some(c) if c < -1.0 => Self::Loss,
            Some(c) if c < 0.0 => Self::SlightLoss,
            Some(c) if c < 1.0 => Self::SlightGain,
            Some(c) if c < 3.0 => Self::Gain,
            Some(_) => Self::DeepGain,
            None => Self::Unknown,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::DeepLoss => colors::DEEP_RED,
            Self::Loss => colors::MID_RED,
            Self::SlightLoss => colors::LIGHT_RED,
            Self::SlightGain => colors::LIGHT_GREEN,
            Self::Gain => colors::MID_GREEN,
            Self::DeepGain => colors::DEEP_GREEN,
            Self::Unknown => colors::NEUTRAL,
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            Self::DeepLoss => "< -3%",
            Self::Loss => "-1% to -3%",
            Self::SlightLoss => "0% to -1%",
            Self::SlightGain => "0% to +1%",
            Self::Gain => "+1% to +3%",
            Self::DeepGain => "> +3%",
            Self::Unknown => "n/a",
        }
    }

    /// Bands shown in the legend, most negative first
    pub fn legend() -> &'static [Self] {
        &[
            Self::DeepLoss,
            Self::Loss,
            Self::SlightLoss,
            Self::SlightGain,
            Self::Gain,
            Self::DeepGain,
        ]
    }
}

/// Fill colour for a percentage change
pub fn color_for_change(change: Option<f64>) -> &'static str {
    ChangeBand::classify(change).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors() {
        assert_eq!(color_for_change(Some(-4.0)), "#E02424");
        assert_eq!(color_for_change(Some(0.5)), "#34D399");
        assert_eq!(color_for_change(Some(f64::NAN)), "#F5F7FA");
        assert_eq!(color_for_change(None), "#F5F7FA");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(ChangeBand::classify(Some(-3.0)), ChangeBand::Loss);
        assert_eq!(ChangeBand::classify(Some(-1.0)), ChangeBand::SlightLoss);
        assert_eq!(ChangeBand::classify(Some(0.0)), ChangeBand::SlightGain);
        assert_eq!(ChangeBand::classify(Some(1.0)), ChangeBand::Gain);
        assert_eq!(ChangeBand::classify(Some(3.0)), ChangeBand::DeepGain);
        assert_eq!(ChangeBand::classify(Some(f64::INFINITY)), ChangeBand::DeepGain);
        assert_eq!(ChangeBand::classify(Some(f64::NEG_INFINITY)), ChangeBand::DeepLoss);
    }

    #[test]
    fn test_legend_order() {
        let labels: Vec<_> = ChangeBand::legend().iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            vec!["< -3%", "-1% to -3%", "0% to -1%", "0% to +1%", "+1% to +3%", "> +3%"]
        );
    }
}
