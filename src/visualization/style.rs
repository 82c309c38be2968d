//! Colors and markers per tree type

use plotters::style::RGBColor;

/// Tree implementations the benchmark knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeVariant {
    SimpleBTree,
    OptimizedBTree,
    LoggedBTree,
    LasTree,
    Other,
}

impl TreeVariant {
    /// Map a CSV label to a variant; unknown labels map to `Other`
    pub fn from_label(label: &str) -> Self {
        match label {
            "SimpleBTree" => Self::SimpleBTree,
            "OptimizedBTree" => Self::OptimizedBTree,
            "LoggedBTree" => Self::LoggedBTree,
            "LasTree" => Self::LasTree,
            _ => Self::Other,
        }
    }
}

/// Point marker shape for line charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Cross,
}

/// Drawing style of one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
    /// Draw bars hollow, in place of a hatch pattern
    pub hollow: bool,
}

const FALLBACK: &[RGBColor] = &[
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

const FALLBACK_MARKERS: &[Marker] = &[Marker::Circle, Marker::Square, Marker::Triangle, Marker::Cross];

impl SeriesStyle {
    /// Style for a tree label at position `index` in the legend
    pub fn for_label(label: &str, index: usize) -> Self {
        match TreeVariant::from_label(label) {
            TreeVariant::SimpleBTree => Self::new(RGBColor(31, 119, 180), Marker::Circle, false),
            TreeVariant::OptimizedBTree => Self::new(RGBColor(214, 39, 40), Marker::Square, false),
            TreeVariant::LoggedBTree => Self::new(RGBColor(44, 160, 44), Marker::Triangle, true),
            TreeVariant::LasTree => Self::new(RGBColor(255, 127, 14), Marker::Cross, true),
            TreeVariant::Other => Self::new(
                FALLBACK[index % FALLBACK.len()],
                FALLBACK_MARKERS[index % FALLBACK_MARKERS.len()],
                index % 2 == 1,
            ),
        }
    }

    fn new(color: RGBColor, marker: Marker, hollow: bool) -> Self {
        Self {
            color,
            marker,
            hollow,
        }
    }
}
