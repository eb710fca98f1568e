//! Chart builders and SVG renderers
//!
//! Builders are pure reducers over the store's tables; renderers turn their
//! output into inline SVG for the dashboard.

pub mod sessions;
pub mod svg;
pub mod wood;

pub use sessions::{ScatterPoint, SessionScatter};
pub use svg::{render_bar_chart, render_scatter_chart};
pub use wood::{WoodSummary, WoodSummaryRow, WOOD_COUNTERS};

/// Category20 palette, used in series order
pub const CATEGORY20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Color for the n-th series
pub fn series_color(index: usize) -> &'static str {
    CATEGORY20[index % CATEGORY20.len()]
}
