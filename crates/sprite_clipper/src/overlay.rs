//! Debug rendering of computed clip paths on top of the source sheet.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use crate::types::{ClipPath, Point};

#[derive(Debug, Clone)]
pub struct OverlayStyle {
    pub outline: Rgba<u8>,
    pub marker: Rgba<u8>,
    pub marker_stroke: Rgba<u8>,
    pub marker_radius: i32,
    /// Distance above the first vertex where the label marker sits
    pub label_offset: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            outline: Rgba([255, 0, 0, 255]),
            marker: Rgba([255, 0, 0, 255]),
            marker_stroke: Rgba([0, 0, 0, 255]),
            marker_radius: 3,
            label_offset: 20.0,
        }
    }
}

impl OverlayStyle {
    /// Where the label of `clip` is anchored
    pub fn label_anchor(&self, clip: &ClipPath) -> Option<Point> {
        clip.clip_path
            .first()
            .map(|first| Point::new(first.x, (first.y - self.label_offset).max(0.0)))
    }
}

/// Copy `image` and draw every clip path outline plus a marker at its label
/// anchor.
pub fn draw_overlay(image: &RgbaImage, clip_paths: &[ClipPath], style: &OverlayStyle) -> RgbaImage {
    let mut canvas = image.clone();

    for clip in clip_paths {
        let vertices = &clip.clip_path;
        for (i, start) in vertices.iter().enumerate() {
            let end = vertices[(i + 1) % vertices.len()];
            draw_line_segment_mut(&mut canvas, (start.x, start.y), (end.x, end.y), style.outline);
        }

        if let Some(anchor) = style.label_anchor(clip) {
            let center = (anchor.x.round() as i32, anchor.y.round() as i32);
            draw_filled_circle_mut(&mut canvas, center, style.marker_radius + 1, style.marker_stroke);
            draw_filled_circle_mut(&mut canvas, center, style.marker_radius, style.marker);
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_draws_outline_and_keeps_source() {
        let source = RgbaImage::new(40, 40);
        let clip = ClipPath {
            name: "sprite-1".into(),
            clip_path: vec![
                Point::new(25.0, 25.0),
                Point::new(25.0, 35.0),
                Point::new(35.0, 35.0),
                Point::new(35.0, 25.0),
            ],
        };
        let style = OverlayStyle::default();

        let overlay = draw_overlay(&source, std::slice::from_ref(&clip), &style);
        assert_eq!(overlay.dimensions(), source.dimensions());
        assert_eq!(overlay.get_pixel(30, 35), &style.outline);
        assert_eq!(overlay.get_pixel(25, 30), &style.outline);
        assert_eq!(overlay.get_pixel(25, 5), &style.marker);
        assert_eq!(source.get_pixel(30, 35), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_label_anchor_stays_inside_image() {
        let clip = ClipPath {
            name: "sprite-1".into(),
            clip_path: vec![Point::new(4.0, 6.0)],
        };
        assert_eq!(OverlayStyle::default().label_anchor(&clip), Some(Point::new(4.0, 0.0)));
    }
}
