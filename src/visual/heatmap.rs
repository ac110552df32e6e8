use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

use crate::error::{NetworkError, Result};
use crate::network::Network;

/// Canvas geometry for [`render_heatmap`]. Each `cell × cell` block is
/// filled with a single prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapConfig {
    pub width: u32,
    pub height: u32,
    pub cell: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        HeatmapConfig { width: 800, height: 800, cell: 10 }
    }
}

/// Renders the first output of a two-input network over the unit square.
///
/// The cell centred at pixel `(px, py)` is fed `(px / width, 1 - py / height)`,
/// so the origin sits bottom-left, and its gray level is
/// `255 · clamp(output, 0, 1)`. Only `predict` is used.
pub fn render_heatmap(network: &mut Network, config: &HeatmapConfig) -> Result<GrayImage> {
    if network.graph().input_width() != 2 {
        return Err(NetworkError::DimensionMismatch {
            what: "heatmap input",
            expected: 2,
            actual: network.graph().input_width(),
        });
    }
    if config.width == 0 || config.height == 0 || config.cell == 0 {
        return Err(NetworkError::invalid(format!("empty heatmap geometry {config:?}")));
    }

    let mut image = GrayImage::new(config.width, config.height);
    for y0 in (0..config.height).step_by(config.cell as usize) {
        for x0 in (0..config.width).step_by(config.cell as usize) {
            let cx = (x0 as f64 + config.cell as f64 / 2.0) / config.width as f64;
            let cy = (y0 as f64 + config.cell as f64 / 2.0) / config.height as f64;
            let output = network.predict(&[cx, 1.0 - cy])?[0];
            let level = Luma([(255.0 * output.clamp(0.0, 1.0)).round() as u8]);

            for y in y0..(y0 + config.cell).min(config.height) {
                for x in x0..(x0 + config.cell).min(config.width) {
                    image.put_pixel(x, y, level);
                }
            }
        }
    }
    Ok(image)
}

/// Writes a rendered heat map as PNG.
pub fn save_heatmap(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeId;
    use crate::network::NetworkConfig;

    /// `[2, 1]` network whose output rises with x and ignores y.
    fn x_ramp() -> Network {
        let mut net = Network::from_config(&NetworkConfig::new(&[2, 1]).seed(0)).unwrap();
        net.set_weight(EdgeId(0), 12.0).unwrap();
        net.set_weight(EdgeId(1), 0.0).unwrap();
        net.set_weight(EdgeId(2), -6.0).unwrap();
        net
    }

    #[test]
    fn gray_levels_follow_predictions() {
        let mut net = x_ramp();
        let config = HeatmapConfig { width: 40, height: 20, cell: 10 };
        let image = render_heatmap(&mut net, &config).unwrap();
        assert_eq!(image.dimensions(), (40, 20));

        let left = image.get_pixel(0, 0).0[0];
        let right = image.get_pixel(39, 0).0[0];
        assert!(left < 20, "left edge should be dark, got {left}");
        assert!(right > 235, "right edge should be bright, got {right}");
        // constant inside a cell, constant along y
        assert_eq!(image.get_pixel(10, 3), image.get_pixel(19, 9));
        assert_eq!(image.get_pixel(25, 0), image.get_pixel(25, 19));
    }

    #[test]
    fn partial_cells_are_clipped() {
        let mut net = x_ramp();
        let image = render_heatmap(&mut net, &HeatmapConfig { width: 25, height: 7, cell: 10 }).unwrap();
        assert_eq!(image.dimensions(), (25, 7));
    }

    #[test]
    fn rejects_networks_without_two_inputs() {
        let mut net = Network::new(&[3, 1]).unwrap();
        assert!(matches!(
            render_heatmap(&mut net, &HeatmapConfig::default()),
            Err(NetworkError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
        let mut net = x_ramp();
        assert!(render_heatmap(&mut net, &HeatmapConfig { width: 10, height: 10, cell: 0 }).is_err());
    }

    #[test]
    fn writes_png() {
        let mut net = x_ramp();
        let image = render_heatmap(&mut net, &HeatmapConfig { width: 20, height: 20, cell: 5 }).unwrap();
        let path = std::env::temp_dir().join(format!("graphnet-heatmap-{}.png", std::process::id()));
        save_heatmap(&image, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        std::fs::remove_file(&path).unwrap();
    }
}
