//! In-memory draw target for rendering tests

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

pub(crate) struct RecordingDisplay {
    size: Size,
    pixels: Vec<Rgb565>,
    pub(crate) pixels_drawn: usize,
}

impl RecordingDisplay {
    pub(crate) fn new() -> Self {
        let size = Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32);
        Self {
            size,
            pixels: vec![Rgb565::BLACK; (size.width * size.height) as usize],
            pixels_drawn: 0,
        }
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> Rgb565 {
        self.pixels[(y * self.size.width + x) as usize]
    }

    pub(crate) fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.size.width && y < self.size.height {
                self.pixels[(y * self.size.width + x) as usize] = color;
                self.pixels_drawn += 1;
            }
        }
        Ok(())
    }
}
