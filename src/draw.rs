// Getting the packed panel buffer onto a desktop screen.
// Sinks only ever read the buffer; the rendering core never depends on them.
// 1) `expand_pixels` turns packed 1-bit rows into 0x00RRGGBB window pixels.
// 2) `Drawer` is a minifb window that shows the panel, scaled up.
// 3) `snapshot_image` / `HeadlessSink` produce PNG screenshots without a window.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::{debug, info};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::error::{Error, Result};

/// Ink as shown on a monitor.
pub const INK_RGB: u32 = 0x00_00_00_00;
/// Paper as shown on a monitor.
pub const PAPER_RGB: u32 = 0x00_FF_FF_FF;

/// Anything that can show a packed 1-bit frame.
pub trait DisplaySink {
    /// Show `buffer` (packed rows, MSB-first, 1 = ink) of `width` x `height`
    /// pixels, each panel pixel drawn as a `scale` x `scale` block.
    fn present(&mut self, buffer: &[u8], width: usize, height: usize, scale: usize) -> Result<()>;
}

fn check_len(buffer: &[u8], width: usize, height: usize) -> Result<usize> {
    let bytes_per_row = width.div_ceil(8);
    let expected = bytes_per_row * height;
    if buffer.len() != expected {
        return Err(Error::InvalidSnapshot {
            expected,
            actual: buffer.len(),
        });
    }
    Ok(bytes_per_row)
}

/// Unpack and upscale (nearest neighbour) into `0x00RRGGBB` pixels,
/// row-major, `width*scale` x `height*scale`. Scale 0 is treated as 1.
pub fn expand_pixels(buffer: &[u8], width: usize, height: usize, scale: usize) -> Result<Vec<u32>> {
    let bytes_per_row = check_len(buffer, width, height)?;
    let scale = scale.max(1);
    let out_w = width * scale;

    let mut pixels = Vec::with_capacity(out_w * height * scale);
    let mut row = Vec::with_capacity(out_w);
    for y in 0..height {
        row.clear();
        let packed = &buffer[y * bytes_per_row..(y + 1) * bytes_per_row];
        for x in 0..width {
            let ink = packed[x >> 3] & (0x80 >> (x & 7)) != 0;
            let rgb = if ink { INK_RGB } else { PAPER_RGB };
            row.extend(std::iter::repeat_n(rgb, scale));
        }
        for _ in 0..scale {
            pixels.extend_from_slice(&row);
        }
    }
    Ok(pixels)
}

fn to_image(pixels: &[u32], width: usize, height: usize) -> RgbImage {
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let p = pixels[y as usize * width + x as usize];
        Rgb([(p >> 16) as u8, (p >> 8) as u8, p as u8])
    })
}

/// Headless screenshot of a packed buffer.
pub fn snapshot_image(buffer: &[u8], width: usize, height: usize, scale: usize) -> Result<RgbImage> {
    let pixels = expand_pixels(buffer, width, height, scale)?;
    let scale = scale.max(1);
    Ok(to_image(&pixels, width * scale, height * scale))
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::Screenshot(format!("{}: {e}", path.display())))?;
    info!("saved screenshot to {}", path.display());
    Ok(())
}

/// Last frame shown by a sink, kept around for screenshots.
#[derive(Clone, Debug, Default)]
struct Frame {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Frame {
    fn capture(buffer: &[u8], width: usize, height: usize, scale: usize) -> Result<Self> {
        let pixels = expand_pixels(buffer, width, height, scale)?;
        let scale = scale.max(1);
        Ok(Self {
            pixels,
            width: width * scale,
            height: height * scale,
        })
    }

    fn save(&self, path: &Path) -> Result<()> {
        if self.pixels.is_empty() {
            return Err(Error::Screenshot("nothing has been presented yet".into()));
        }
        save_png(&to_image(&self.pixels, self.width, self.height), path)
    }
}

/// Sink with no window: remembers the last frame so it can be saved.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    frame: Frame,
    presented: usize,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Expanded pixels of the last frame plus its size.
    pub fn last_frame(&self) -> (&[u32], usize, usize) {
        (&self.frame.pixels, self.frame.width, self.frame.height)
    }

    pub fn save_screenshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.frame.save(path.as_ref())
    }
}

impl DisplaySink for HeadlessSink {
    fn present(&mut self, buffer: &[u8], width: usize, height: usize, scale: usize) -> Result<()> {
        self.frame = Frame::capture(buffer, width, height, scale)?;
        self.presented += 1;
        Ok(())
    }
}

pub struct Drawer {
    window: Window,
    frame: Frame,
}

impl Drawer {
    /// Open a window big enough for a `width` x `height` panel at `scale`.
    pub fn new(title: &str, width: usize, height: usize, scale: usize) -> Result<Self> {
        let scale = scale.max(1);
        let window = Window::new(title, width * scale, height * scale, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        debug!("opened {}x{} window", width * scale, height * scale);
        Ok(Self {
            window,
            frame: Frame::default(),
        })
    }

    /// Cap the refresh rate; minifb sleeps inside `update_with_buffer`.
    pub fn set_target_fps(&mut self, fps: usize) {
        self.window.set_target_fps(fps);
    }

    /// Returns false once the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// ESC or Q.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape) || self.window.is_key_down(Key::Q)
    }

    /// SPACE, edge-triggered.
    pub fn next_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    /// Index 0..=3 for keys 1..=4.
    pub fn mode_key_pressed(&self) -> Option<usize> {
        [Key::Key1, Key::Key2, Key::Key3, Key::Key4]
            .iter()
            .position(|&k| self.window.is_key_pressed(k, KeyRepeat::No))
    }

    pub fn screenshot_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// Write the last presented frame as a PNG.
    pub fn save_screenshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.frame.save(path.as_ref())
    }
}

impl DisplaySink for Drawer {
    fn present(&mut self, buffer: &[u8], width: usize, height: usize, scale: usize) -> Result<()> {
        self.frame = Frame::capture(buffer, width, height, scale)?;
        self.window
            .update_with_buffer(&self.frame.pixels, self.frame.width, self.frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }
}
