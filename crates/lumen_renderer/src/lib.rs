//! Lumen renderer - CPU ray tracing core.
//!
//! A recursive Monte Carlo ray tracer for scenes made of spheres with
//! diffuse and metallic materials, lit only by a sky gradient.
//!
//! The camera generates jittered rays per pixel, [`ray_color`] follows each
//! ray through its bounces, and the averaged samples land in an
//! [`ImageBuffer`] that converts to gamma-corrected RGBA bytes.

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, MAX_DEPTH_LIMIT, MAX_IMAGE_DIMENSION};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{color_to_rgba, linear_to_gamma, ray_color, render_pixel, sky_color, ImageBuffer, T_MIN};
pub use sampling::{gen_f32, random_in_unit_sphere, random_unit_vector, sample_square};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
