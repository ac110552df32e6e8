pub mod heatmap;

pub use heatmap::{render_heatmap, save_heatmap, HeatmapConfig};
