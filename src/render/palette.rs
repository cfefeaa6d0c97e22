use plotters::style::RGBColor;

pub const WINE: RGBColor = RGBColor(0x8B, 0x00, 0x00);
pub const FIREBRICK: RGBColor = RGBColor(0xB2, 0x22, 0x22);
pub const TOMATO: RGBColor = RGBColor(0xFF, 0x63, 0x47);
pub const DARK_SLATE: RGBColor = RGBColor(0x2F, 0x4F, 0x4F);
pub const FADE: RGBColor = RGBColor(0xFF, 0xE5, 0xE0);
pub const FOOTER_FILL: RGBColor = RGBColor(0xF2, 0xE9, 0xE4);
pub const ANNOTATION_GREEN: RGBColor = RGBColor(0x00, 0x80, 0x00);
pub const ANNOTATION_RED: RGBColor = RGBColor(0xFF, 0x00, 0x00);
pub const MISSING_CELL: RGBColor = RGBColor(0xBF, 0xBF, 0xBF);

pub const PIE_COLORS: [RGBColor; 3] = [
    RGBColor(0xCD, 0x5C, 0x5C),
    RGBColor(0xF0, 0x80, 0x80),
    RGBColor(0xFA, 0x72, 0x72),
];

/// ColorBrewer "Reds", light to dark.
const REDS: [RGBColor; 9] = [
    RGBColor(0xFF, 0xF5, 0xF0),
    RGBColor(0xFE, 0xE0, 0xD2),
    RGBColor(0xFC, 0xBB, 0xA1),
    RGBColor(0xFC, 0x92, 0x72),
    RGBColor(0xFB, 0x6A, 0x4A),
    RGBColor(0xEF, 0x3B, 0x2C),
    RGBColor(0xCB, 0x18, 0x1D),
    RGBColor(0xA5, 0x0F, 0x15),
    RGBColor(0x67, 0x00, 0x0D),
];

pub fn lerp(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// `t` 在 [0, 1] 之間，超出範圍會被截斷
pub fn reds(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (REDS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(REDS.len() - 2);
    lerp(REDS[index], REDS[index + 1], scaled - index as f64)
}

/// Color range of a heatmap: min/max of the finite values.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        (-1.0, 1.0)
    } else if max - min < f64::EPSILON {
        (min - 1.0, max)
    } else {
        (min, max)
    }
}

pub fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
    (value - min) / (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(FADE, WINE, 0.0), FADE);
        assert_eq!(lerp(FADE, WINE, 1.0), WINE);
        assert_eq!(lerp(FADE, WINE, 2.0), WINE);
    }

    #[test]
    fn test_reds_gets_darker() {
        let light = reds(0.0);
        let dark = reds(1.0);
        assert_eq!(light, REDS[0]);
        assert_eq!(dark, REDS[8]);
        assert!(reds(0.5).1 < light.1);
        assert_eq!(reds(f64::NAN), REDS[0]);
    }

    #[test]
    fn test_value_range_ignores_nan() {
        assert_eq!(value_range([0.2, f64::NAN, 1.0, -0.4]), (-0.4, 1.0));
        assert_eq!(value_range([f64::NAN]), (-1.0, 1.0));
        assert_eq!(value_range([1.0, 1.0]), (0.0, 1.0));
        assert!((normalize(0.3, (-0.4, 1.0)) - 0.5).abs() < 1e-12);
    }
}
