//! Parallax background layer.
//!
//! Each layer receives the negated camera position as its scroll offset and
//! divides it by a travel factor: 1.0 moves with the world, larger values
//! appear further away. Tiling across the viewport is the backend's job;
//! [`background_tile_positions`] computes where the copies go.

use bevy_ecs::prelude::Component;

use crate::platform::Image;
use crate::resources::renderqueue::DrawCmd;

/// One scrolling background picture.
#[derive(Component, Debug, Clone)]
pub struct Parallax {
    image: Image,
    travel_factor: f32,
    x: i32,
    y: i32,
}

impl Parallax {
    /// Factors below 1.0 are raised to 1.0.
    pub fn new(image: Image, travel_factor: f32) -> Self {
        Self {
            image,
            travel_factor: travel_factor.max(1.0),
            x: 0,
            y: 0,
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn travel_factor(&self) -> f32 {
        self.travel_factor
    }

    /// Replace the scroll offset (not cumulative).
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Offset actually handed to the backend.
    pub fn offset(&self) -> (i32, i32) {
        (
            (self.x as f32 / self.travel_factor) as i32,
            (self.y as f32 / self.travel_factor) as i32,
        )
    }

    pub fn draw(&self) -> DrawCmd {
        let (offset_x, offset_y) = self.offset();
        DrawCmd::BackgroundLayer {
            image: self.image.clone(),
            offset_x,
            offset_y,
        }
    }
}

/// Horizontal positions at which a repeating background must be drawn.
///
/// `width` is the on-screen width of one copy. The offset is wrapped with
/// `%` and copies are laid out rightwards from there until the viewport edge,
/// then leftwards until the copy's right edge would be off-screen, so both
/// scroll directions are covered without seams.
pub fn background_tile_positions(offset_x: i32, width: i32, viewport_width: i32) -> Vec<i32> {
    if width <= 0 {
        return Vec::new();
    }
    let start = offset_x % width;
    let mut positions = Vec::new();

    let mut pos = start;
    while pos < viewport_width {
        positions.push(pos);
        pos += width;
    }

    let mut pos = start - width;
    while pos + width >= 0 {
        positions.push(pos);
        pos -= width;
    }

    positions
}

/// Screen origins of every copy of a background fitted to the viewport
/// height. The layer is pinned to the top edge and only scrolls sideways;
/// a vertical offset would uncover the clear colour above or below it.
pub fn background_layer_origins(
    offset_x: i32,
    width: i32,
    viewport_width: i32,
) -> Vec<(i32, i32)> {
    background_tile_positions(offset_x, width, viewport_width)
        .into_iter()
        .map(|x| (x, 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(factor: f32) -> Parallax {
        Parallax::new(Image::new("layer.xyz", 200, 200), factor)
    }

    #[test]
    fn test_unscrolled_offset_is_zero() {
        assert_eq!(layer(1.0).offset(), (0, 0));
    }

    #[test]
    fn test_factor_one_follows_scroll() {
        let mut p = layer(1.0);
        p.scroll(5, 5);
        assert_eq!(p.offset(), (5, 5));
    }

    #[test]
    fn test_dampened_offset() {
        let mut p = layer(2.0);
        p.scroll(10, 10);
        assert_eq!(p.offset(), (5, 5));
        assert_eq!(
            p.draw(),
            DrawCmd::BackgroundLayer {
                image: Image::new("layer.xyz", 200, 200),
                offset_x: 5,
                offset_y: 5,
            }
        );
    }

    #[test]
    fn test_scroll_replaces_previous_offset() {
        let mut p = layer(1.0);
        p.scroll(10, 0);
        p.scroll(-4, 2);
        assert_eq!(p.offset(), (-4, 2));
    }

    #[test]
    fn test_negative_offset_truncates_toward_zero() {
        let mut p = layer(4.0);
        p.scroll(-10, 0);
        assert_eq!(p.offset(), (-2, 0));
    }

    #[test]
    fn test_factor_clamped_to_one() {
        assert_eq!(layer(0.25).travel_factor(), 1.0);
    }

    #[test]
    fn test_tiles_cover_viewport_at_rest() {
        let mut positions = background_tile_positions(0, 300, 800);
        positions.sort();
        assert_eq!(positions, vec![-300, 0, 300, 600]);
    }

    #[test]
    fn test_tiles_cover_viewport_scrolled_left() {
        let mut positions = background_tile_positions(-450, 300, 800);
        positions.sort();
        // start wraps to -150; copies at -150, 150, 450, 750 span the viewport
        assert_eq!(positions, vec![-150, 150, 450, 750]);
        assert!(positions.iter().any(|&p| p <= 0 && p + 300 > 0));
        assert!(positions.iter().any(|&p| p < 800 && p + 300 >= 800));
    }

    #[test]
    fn test_tiles_cover_viewport_scrolled_right() {
        let mut positions = background_tile_positions(1000, 300, 800);
        positions.sort();
        assert_eq!(positions, vec![-200, 100, 400, 700]);
    }

    #[test]
    fn test_zero_width_draws_nothing() {
        assert!(background_tile_positions(10, 0, 800).is_empty());
    }

    #[test]
    fn test_fitted_layer_is_pinned_to_top() {
        let origins = background_layer_origins(-450, 300, 800);
        assert_eq!(origins, vec![(-150, 0), (150, 0), (450, 0), (750, 0)]);
    }
}
