//! Frame rendering and image output.
//!
//! Drives the camera over every pixel, averages samples, and stores the
//! result in an [`ImageBuffer`] that can be written as PNG or PPM.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use prism_math::Interval;
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Color, OutputError, World, RAY_DEPTH_LIMIT};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Field of view in radians
    pub field_of_view: f32,
    /// Samples per pixel; above 1 the samples are jittered inside the pixel
    pub samples_per_pixel: u32,
    /// Recursion budget for reflected and refracted rays
    pub max_depth: u32,
    /// Tile edge length in pixels
    pub bucket_size: u32,
    /// Seed for every random decision in the frame
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            field_of_view: std::f32::consts::FRAC_PI_3,
            samples_per_pixel: 1,
            max_depth: RAY_DEPTH_LIMIT,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

/// Averaged color of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    pub color: Color,
    /// Samples discarded for being NaN or infinite
    pub dropped: u32,
}

/// Render a single pixel.
///
/// With one sample the ray goes through the pixel center; with more, each
/// ray is jittered inside the pixel. Non-finite samples are left out of
/// the average; a pixel with no finite samples is black.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> PixelSample {
    let samples = config.samples_per_pixel.max(1);
    let mut sum = Color::ZERO;
    let mut kept = 0;

    for _ in 0..samples {
        let ray = if samples == 1 {
            camera.ray_for_pixel(x, y)
        } else {
            camera.jittered_ray(x, y, rng)
        };
        let color = world.color_at(&ray, rng);
        if color.is_finite() {
            sum += color;
            kept += 1;
        }
    }

    let color = if kept > 0 { sum / kept as f32 } else { Color::ZERO };
    PixelSample {
        color,
        dropped: samples - kept,
    }
}

/// Render the whole frame in parallel buckets.
///
/// The image size comes from the camera. The world's own depth budget is
/// used for recursion.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (camera.hsize(), camera.vsize());
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets",
        width,
        height,
        config.samples_per_pixel.max(1),
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = bucket.rng(config.seed);
            render_bucket(bucket, camera, world, config, &mut rng)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    let mut dropped = 0;
    for result in &results {
        image.write_bucket(result);
        dropped += result.dropped_samples;
    }

    if dropped > 0 {
        log::warn!("Dropped {} non-finite samples", dropped);
    }
    log::info!("Rendered {} buckets in {:.2?}", results.len(), start.elapsed());

    image
}

/// Clamp a linear channel value to [0, 1] and quantize to 8 bits.
#[inline]
pub fn to_byte(channel: f32) -> u8 {
    (Interval::UNIT.clamp(channel) * 255.0).round() as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Row-major color buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Packed 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|color| color_to_rgb(*color)).collect()
    }

    /// Write a plain-text PPM (P3), one pixel per line.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for color in &self.pixels {
            let [r, g, b] = color_to_rgb(*color);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
        Ok(())
    }

    /// Save to disk; the extension picks the format (`png` or `ppm`).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "png" => image::save_buffer_with_format(
                path,
                &self.to_rgb8(),
                self.width,
                self.height,
                image::ColorType::Rgb8,
                image::ImageFormat::Png,
            )?,
            "ppm" => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_ppm(&mut writer)?;
                writer.flush()?;
            }
            _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
        }

        log::info!("Saved {}", path.display());
        Ok(())
    }
}
