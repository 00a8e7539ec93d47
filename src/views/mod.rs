//! Chart-ready models for the three survey charts.
//!
//! Each view combines the aggregation and scale modules into pixel-space
//! geometry that a drawing surface can render directly. Coordinates are
//! relative to the plot area, i.e. already inside the margins.

pub mod bars;
pub mod boxplot;
pub mod scatter;

pub use bars::{Bar, GroupedBarView};
pub use boxplot::{BoxGlyph, BoxPlotView};
pub use scatter::{BrushSelection, Emphasis, LinkedHighlight, ScatterPoint, ScatterView};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Outer chart size and the margins reserved for axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        ChartLayout {
            width,
            height,
            margin,
        }
    }

    pub fn bar_chart() -> Self {
        Self::new(
            800.0,
            500.0,
            Margin {
                top: 50.0,
                right: 30.0,
                bottom: 70.0,
                left: 60.0,
            },
        )
    }

    pub fn box_plot() -> Self {
        Self::bar_chart()
    }

    pub fn scatter_plot() -> Self {
        Self::new(
            800.0,
            500.0,
            Margin {
                top: 50.0,
                right: 50.0,
                bottom: 50.0,
                left: 60.0,
            },
        )
    }

    /// Plot-area width; never negative.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Plot-area height; never negative.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_dimensions() {
        assert_eq!(ChartLayout::bar_chart().inner_width(), 710.0);
        assert_eq!(ChartLayout::bar_chart().inner_height(), 380.0);
        assert_eq!(ChartLayout::scatter_plot().inner_width(), 690.0);
        assert_eq!(ChartLayout::scatter_plot().inner_height(), 400.0);
    }

    #[test]
    fn test_margins_larger_than_chart_clamp_to_zero() {
        let layout = ChartLayout::new(
            50.0,
            50.0,
            Margin {
                top: 40.0,
                right: 40.0,
                bottom: 40.0,
                left: 40.0,
            },
        );
        assert_eq!(layout.inner_width(), 0.0);
        assert_eq!(layout.inner_height(), 0.0);
    }
}
