//! Core shading and pixel output.
//!
//! Implements the recursive light transport:
//! - Depth-limited bounces off scattering materials
//! - A white-to-blue sky gradient as the only light source
//! - Gamma 2 encoding of averaged samples

use crate::{BucketResult, Camera, Color, HitRecord, Hittable};
use lumen_math::{Interval, Ray};
use rand::RngCore;

/// Hits closer than this to a ray's origin are ignored, so a bounced ray
/// does not immediately re-hit the surface it left.
pub const T_MIN: f32 = 0.001;

/// Displayable intensity range of a gamma-encoded channel.
const INTENSITY: Interval = Interval {
    min: 0.0,
    max: 1.0,
};

/// Compute the color seen by a ray.
///
/// Returns black once the bounce budget is spent or a material absorbs the
/// ray, the sky gradient when nothing is hit, and otherwise the attenuated
/// color of the scattered ray.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
        return sky_color(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical sky gradient: white looking straight down, blue straight up.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA, fully opaque.
///
/// Channels are gamma corrected, clamped to [0, 1] and rounded to the nearest byte.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |linear: f32| (255.0 * INTENSITY.clamp(linear_to_gamma(linear))).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Render a single pixel by averaging `camera.samples_per_pixel` jittered samples.
///
/// The camera must have been initialized.
pub fn render_pixel(camera: &Camera, world: &dyn Hittable, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Row-major buffer of linear pixel colors.
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
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (offset, color) in result.pixels.iter().enumerate() {
            let local_x = offset as u32 % bucket.width;
            let local_y = offset as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to gamma-corrected RGBA bytes, row-major, top row first.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|color| color_to_rgba(*color)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Material, Metal, Scene, ScatterResult, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    struct Void;

    impl Material for Void {
        fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
            None
        }
    }

    fn scene_with(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Scene {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(center, radius, material)));
        scene
    }

    #[test]
    fn test_zero_depth_is_black() {
        let mut rng = StdRng::seed_from_u64(42);
        let empty = Scene::new();
        let full = scene_with(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::ONE)),
        );

        for direction in [Vec3::Y, Vec3::NEG_Y, Vec3::NEG_Z] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &empty, 0, &mut rng), Color::ZERO);
            assert_eq!(ray_color(&ray, &full, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_sky_straight_down_is_white() {
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(ray_color(&ray, &Scene::new(), 5, &mut rng), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sky_straight_up_is_blue() {
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray_color(&ray, &Scene::new(), 5, &mut rng), Color::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn test_sky_ignores_direction_length() {
        let short = sky_color(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.5, -0.5)));
        let long = sky_color(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 4.0, -4.0)));
        assert!((short - long).length() < 1e-6);
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = scene_with(Vec3::new(0.0, 0.0, -1.0), 0.5, Arc::new(Void));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &scene, 5, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_single_bounce_budget_is_black_on_hit() {
        // The scattered ray arrives with depth 0 and gathers nothing
        let mut rng = StdRng::seed_from_u64(42);
        let scene = scene_with(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::ONE)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_reflects_sky_with_attenuation() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = scene_with(Vec3::ZERO, 1.0, Arc::new(Metal::new(Color::splat(0.5), 0.0)));

        // Straight down onto the top of the sphere, bounced straight up
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let color = ray_color(&ray, &scene, 5, &mut rng);

        assert!((color - Color::new(0.25, 0.35, 0.5)).length() < 1e-6, "got {color}");
    }

    #[test]
    fn test_diffuse_bounce_darkens_sky() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = scene_with(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -0.2));

        for _ in 0..100 {
            let color = ray_color(&ray, &scene, 10, &mut rng);
            assert!(color.max_element() <= 0.5 + 1e-6, "got {color}");
            assert!(color.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::new(0.25, 1.0, 0.0)), [128, 255, 0, 255]);
        assert_eq!(color_to_rgba(Color::new(4.0, -1.0, 0.01)), [255, 0, 26, 255]);
    }

    #[test]
    fn test_color_to_rgba_rounds_to_nearest() {
        // 0.5 -> 180.3, 0.9 -> 241.9
        assert_eq!(color_to_rgba(Color::new(0.25, 0.5, 0.9)), [128, 180, 242, 255]);
    }

    #[test]
    fn test_image_buffer_layout() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.pixels[5], Color::ONE);

        let rgba = image.to_rgba();
        assert_eq!(rgba.len(), 3 * 2 * 4);
        assert_eq!(&rgba[20..24], &[255, 255, 255, 255]);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
    }
}
