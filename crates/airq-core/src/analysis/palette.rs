//! Color assignment for chart series.

use crate::config::PaletteConfig;

/// Color for a raw station series, cycling through the qualitative palette.
pub fn series_color(index: usize) -> &'static str {
    PaletteConfig::SERIES[index % PaletteConfig::SERIES.len()]
}

/// Color for a moving-average overlay.
pub fn moving_average_color(index: usize) -> &'static str {
    PaletteConfig::MOVING_AVERAGE[index % PaletteConfig::MOVING_AVERAGE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_wrap() {
        assert_eq!(series_color(0), "#636EFA");
        assert_eq!(series_color(10), "#636EFA");
        assert_eq!(moving_average_color(1), "rgb(252,141,98)");
        assert_eq!(moving_average_color(9), "rgb(252,141,98)");
    }
}
