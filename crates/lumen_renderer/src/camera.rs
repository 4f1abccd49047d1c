//! Camera for ray generation and rendering.

use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::renderer::{render_pixel, ImageBuffer};
use crate::sampling::sample_square;
use crate::{Color, Hittable, RenderError, RenderResult};
use lumen_math::{Ray, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Upper bound on `max_depth`; each bounce is one level of recursion.
pub const MAX_DEPTH_LIMIT: u32 = 512;

/// Upper bound on the image width and height in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

/// Pinhole camera at the origin looking down -Z.
///
/// Set the public configuration fields (directly or through the `with_*`
/// builders), then render. Derived viewport geometry is recomputed by
/// [`Camera::initialize`], which every render calls first.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Viewport settings
    pub viewport_height: f32,
    pub focal_length: f32,

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 10,
            max_depth: 5,
            viewport_height: 2.0,
            focal_length: 1.0,
            image_height: 1,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            samples_scale: 0.1,
        };
        camera.initialize();
        camera
    }

    /// Set the target width / height ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the image width in pixels; the height follows from the aspect ratio.
    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set viewport settings.
    pub fn with_viewport(mut self, viewport_height: f32, focal_length: f32) -> Self {
        self.viewport_height = viewport_height;
        self.focal_length = focal_length;
        self
    }

    /// Check that the configuration can produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 {
            return Err(RenderError::ZeroImageWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidAspectRatio(self.aspect_ratio));
        }
        let image_height = image_height_for(self.image_width, self.aspect_ratio);
        let pixel_count = u64::from(self.image_width) * u64::from(image_height);
        let max_pixels = isize::MAX as u64 / std::mem::size_of::<Color>() as u64;
        if self.image_width > MAX_IMAGE_DIMENSION
            || image_height > MAX_IMAGE_DIMENSION
            || pixel_count > max_pixels
        {
            return Err(RenderError::ImageTooLarge {
                width: self.image_width,
                height: image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            return Err(RenderError::InvalidViewportHeight(self.viewport_height));
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(RenderError::InvalidFocalLength(self.focal_length));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(RenderError::DepthTooLarge {
                depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }

    /// Recompute the derived viewport geometry from the configuration.
    ///
    /// Idempotent. The image height is at least 1 for any configuration.
    pub fn initialize(&mut self) {
        self.image_height = image_height_for(self.image_width, self.aspect_ratio);
        self.samples_scale = 1.0 / self.samples_per_pixel.max(1) as f32;
        self.center = Vec3::ZERO;

        // Use the real pixel ratio, not the requested one, after rounding the height
        let viewport_width =
            self.viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Across the horizontal edge, and down the vertical edge
        let viewport_u = Vec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -self.viewport_height, 0.0);

        self.pixel_delta_u = viewport_u / self.image_width.max(1) as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left = self.center
            - Vec3::new(0.0, 0.0, self.focal_length)
            - viewport_u / 2.0
            - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Image height in pixels, as of the last [`Camera::initialize`].
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    /// World-space center of pixel (i, j).
    pub fn pixel_center(&self, i: u32, j: u32) -> Vec3 {
        self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v
    }

    /// Generate a ray for pixel (i, j), jittered within the pixel's square.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Render the scene one pixel at a time, rows top to bottom.
    ///
    /// All randomness comes from `rng`, so a seeded generator reproduces the
    /// image exactly.
    pub fn render(&mut self, world: &dyn Hittable, rng: &mut dyn RngCore) -> RenderResult<ImageBuffer> {
        self.validate()?;
        self.initialize();

        log::info!(
            "Rendering {}x{} @ {} spp, max depth {}",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            self.max_depth
        );
        let start = Instant::now();

        let mut image = ImageBuffer::new(self.image_width, self.image_height);
        for y in 0..self.image_height {
            log::trace!("Scanline {} of {}", y + 1, self.image_height);
            for x in 0..self.image_width {
                let color = render_pixel(self, world, x, y, rng);
                image.set(x, y, color);
            }
        }

        log::info!("Rendered in {:.2?}", start.elapsed());
        Ok(image)
    }

    /// Render the scene in parallel, one bucket per task.
    ///
    /// Each bucket draws from its own generator seeded by `seed` and the
    /// bucket's index, so the result depends only on `seed`, never on thread
    /// count or scheduling.
    pub fn render_parallel(&mut self, world: &dyn Hittable, seed: u64) -> RenderResult<ImageBuffer> {
        self.validate()?;
        self.initialize();

        let camera: &Camera = self;
        let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);

        log::info!(
            "Rendering {}x{} @ {} spp, max depth {}: {} buckets on {} threads",
            camera.image_width,
            camera.image_height,
            camera.samples_per_pixel,
            camera.max_depth,
            buckets.len(),
            rayon::current_num_threads()
        );
        let start = Instant::now();

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let mut rng = bucket_rng(seed, bucket.index);
                let pixels = render_bucket(bucket, camera, world, &mut rng);
                log::debug!("Bucket {} at ({}, {}) done", bucket.index, bucket.x, bucket.y);
                BucketResult::new(*bucket, pixels)
            })
            .collect();

        let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
        for result in &results {
            image.write_bucket(result);
        }

        log::info!("Rendered in {:.2?}", start.elapsed());
        Ok(image)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// floor(width / aspect_ratio), clamped to at least 1.
fn image_height_for(image_width: u32, aspect_ratio: f32) -> u32 {
    let height = (image_width as f32 / aspect_ratio).floor();
    if height.is_finite() && height >= 1.0 {
        height as u32
    } else {
        1
    }
}

/// Independent, reproducible generator for one bucket.
fn bucket_rng(seed: u64, bucket_index: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (bucket_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
