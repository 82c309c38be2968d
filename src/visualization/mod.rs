//! Visualization and plotting

pub mod grouped;
pub mod layout;
pub mod style;
pub mod utilization;

pub use grouped::GroupedPlotter;
pub use layout::{bar_span, ChartKind, ChartSpec, GroupedChart, Series, Subplot};
pub use style::{SeriesStyle, TreeVariant};
pub use utilization::UtilizationPlotter;
