//! Animated sprite strip.
//!
//! A [`Sprite`] slices an image into fixed-size cells and cycles through them
//! at roughly 12 frames per second. The clock is advanced explicitly with
//! [`Sprite::update`]; drawing produces a [`DrawCmd`] for the current frame.

use crate::platform::{Image, SourceRect};
use crate::resources::renderqueue::DrawCmd;

/// Time units (milliseconds) each frame stays on screen, about 12 fps.
pub const FRAME_DURATION: i64 = 83;

/// Image strip plus its animation clock.
#[derive(Debug, Clone)]
pub struct Sprite {
    image: Image,
    cell_width: u32,
    cell_height: u32,
    columns: u32,
    frames: u32,
    elapsed: i64,
    frame: u32,
}

impl Sprite {
    /// Build a sprite from an already loaded image.
    ///
    /// Frame count is `floor(w / cw) * floor(h / ch)`, never less than one so
    /// an oversized cell still shows the single (clipped) frame.
    pub fn new(image: Image, cell_width: u32, cell_height: u32) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        let columns = image.width() / cell_width;
        let rows = image.height() / cell_height;
        Self {
            image,
            cell_width,
            cell_height,
            columns: columns.max(1),
            frames: (columns * rows).max(1),
            elapsed: 0,
            frame: 0,
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn frame_count(&self) -> u32 {
        self.frames
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Advance the clock by `delta` time units.
    ///
    /// Large deltas advance several frames so playback speed does not depend
    /// on the frame rate.
    pub fn update(&mut self, delta: i64) {
        if delta <= 0 {
            return;
        }
        self.elapsed += delta;
        while self.elapsed >= FRAME_DURATION {
            self.elapsed -= FRAME_DURATION;
            self.frame += 1;
            if self.frame >= self.frames {
                self.frame = 0;
            }
        }
    }

    /// Source rectangle of the current frame inside the image.
    pub fn source_rect(&self) -> SourceRect {
        let col = self.frame % self.columns;
        let row = self.frame / self.columns;
        SourceRect::new(
            (col * self.cell_width) as i32,
            (row * self.cell_height) as i32,
            self.cell_width as i32,
            self.cell_height as i32,
        )
    }

    /// Draw command for the current frame at `(x, y)`.
    pub fn draw(&self, x: i32, y: i32, flip_h: bool) -> DrawCmd {
        DrawCmd::Image {
            image: self.image.clone(),
            x,
            y,
            src: self.source_rect(),
            flip_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> Sprite {
        Sprite::new(Image::new("test.xyz", 128, 32), 32, 32)
    }

    fn src_x(cmd: &DrawCmd) -> i32 {
        match cmd {
            DrawCmd::Image { src, .. } => src.x,
            _ => panic!("expected an image draw"),
        }
    }

    #[test]
    fn test_frame_count_from_image_size() {
        assert_eq!(strip().frame_count(), 4);
        let grid = Sprite::new(Image::new("grid.png", 64, 64), 32, 32);
        assert_eq!(grid.frame_count(), 4);
    }

    #[test]
    fn test_oversized_cell_has_one_frame() {
        let sprite = Sprite::new(Image::new("tiny.png", 16, 16), 33, 32);
        assert_eq!(sprite.frame_count(), 1);
    }

    #[test]
    fn test_draw_first_frame() {
        let cmd = strip().draw(10, 20, false);
        assert_eq!(
            cmd,
            DrawCmd::Image {
                image: Image::new("test.xyz", 128, 32),
                x: 10,
                y: 20,
                src: SourceRect::new(0, 0, 32, 32),
                flip_h: false,
            }
        );
    }

    #[test]
    fn test_draw_flipped() {
        match strip().draw(10, 20, true) {
            DrawCmd::Image { flip_h, .. } => assert!(flip_h),
            _ => panic!("expected an image draw"),
        }
    }

    #[test]
    fn test_frames_advance_every_83_units_and_wrap() {
        let mut sprite = strip();
        let mut seen = Vec::new();
        for _ in 0..4 {
            sprite.update(83);
            seen.push(src_x(&sprite.draw(10, 20, false)));
        }
        assert_eq!(seen, vec![32, 64, 96, 0]);
        assert_eq!(sprite.frame(), 0);
    }

    #[test]
    fn test_short_updates_accumulate() {
        let mut sprite = strip();
        sprite.update(40);
        assert_eq!(sprite.frame(), 0);
        sprite.update(43);
        assert_eq!(sprite.frame(), 1);
    }

    #[test]
    fn test_long_update_catches_up() {
        let mut sprite = strip();
        sprite.update(83 * 3 + 10);
        assert_eq!(sprite.frame(), 3);
    }

    #[test]
    fn test_grid_source_rect_moves_to_next_row() {
        let mut sprite = Sprite::new(Image::new("grid.png", 64, 64), 32, 32);
        sprite.update(83 * 2);
        assert_eq!(sprite.source_rect(), SourceRect::new(0, 32, 32, 32));
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut sprite = strip();
        sprite.update(-500);
        sprite.update(83);
        assert_eq!(sprite.frame(), 1);
    }
}
