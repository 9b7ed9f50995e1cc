//! Deferred draw commands.
//!
//! Systems cannot hold the graphics capability (it belongs to the engine), so
//! they push [`DrawCmd`]s into the [`RenderQueue`] resource. The owning scene
//! flushes the queue into the [`Gfx`] it was given once the schedule has run,
//! preserving submission order.

use bevy_ecs::prelude::Resource;

use crate::platform::{Gfx, Image, SourceRect};

/// A single call to be replayed against a [`Gfx`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image {
        image: Image,
        x: i32,
        y: i32,
        src: SourceRect,
        flip_h: bool,
    },
    BackgroundLayer {
        image: Image,
        offset_x: i32,
        offset_y: i32,
    },
}

impl DrawCmd {
    /// Issue this command against a graphics backend.
    pub fn submit(&self, gfx: &mut dyn Gfx) {
        match self {
            DrawCmd::Image {
                image,
                x,
                y,
                src,
                flip_h,
            } => gfx.draw_image(image, *x, *y, *src, *flip_h),
            DrawCmd::BackgroundLayer {
                image,
                offset_x,
                offset_y,
            } => gfx.draw_background_layer(image, *offset_x, *offset_y),
        }
    }
}

/// Ordered list of draw commands for the current frame.
#[derive(Resource, Debug, Default)]
pub struct RenderQueue {
    commands: Vec<DrawCmd>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = DrawCmd>) {
        self.commands.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Submit every queued command in order and leave the queue empty.
    pub fn flush(&mut self, gfx: &mut dyn Gfx) {
        for cmd in self.commands.drain(..) {
            cmd.submit(gfx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::MockGfx;

    #[test]
    fn test_flush_preserves_order_and_empties_queue() {
        let bg = Image::new("bg.png", 100, 100);
        let tiles = Image::new("tiles.png", 160, 160);
        let mut queue = RenderQueue::new();
        queue.push(DrawCmd::BackgroundLayer {
            image: bg,
            offset_x: -3,
            offset_y: 0,
        });
        queue.push(DrawCmd::Image {
            image: tiles,
            x: 16,
            y: 32,
            src: SourceRect::new(0, 0, 16, 16),
            flip_h: false,
        });

        let mut gfx = MockGfx::new();
        queue.flush(&mut gfx);

        assert!(queue.is_empty());
        assert_eq!(gfx.layers.len(), 1);
        assert_eq!(gfx.layers[0].offset_x, -3);
        assert_eq!(gfx.images.len(), 1);
        assert_eq!(gfx.images[0].name, "tiles.png");
        assert_eq!(gfx.images[0].x, 16);
    }
}
