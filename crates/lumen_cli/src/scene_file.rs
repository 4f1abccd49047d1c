//! JSON scene descriptions.
//!
//! A scene file names its materials once and lets spheres refer to them, so
//! a material shared by several spheres is built once and shared:
//!
//! ```json
//! {
//!   "camera": { "image_width": 400, "samples_per_pixel": 50 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "chrome": { "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.3 }
//!   },
//!   "spheres": [
//!     { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
//!     { "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": "chrome" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use lumen_renderer::{Camera, Color, Lambertian, Material, Metal, Scene, Sphere, Vec3};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sphere {index} uses unknown material \"{name}\"")]
    UnknownMaterial { index: usize, name: String },

    #[error("sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("material \"{0}\" has a negative or non-finite albedo")]
    InvalidAlbedo(String),

    #[error("material \"{0}\" has a non-finite fuzz")]
    InvalidFuzz(String),
}

/// Result type for scene file operations.
pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Optional camera settings; `None` keeps whatever was set before.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSettings {
    pub aspect_ratio: Option<f32>,
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub viewport_height: Option<f32>,
    pub focal_length: Option<f32>,
}

impl CameraSettings {
    /// Layer `overrides` on top of these settings.
    pub fn merged_with(self, overrides: CameraSettings) -> CameraSettings {
        CameraSettings {
            aspect_ratio: overrides.aspect_ratio.or(self.aspect_ratio),
            image_width: overrides.image_width.or(self.image_width),
            samples_per_pixel: overrides.samples_per_pixel.or(self.samples_per_pixel),
            max_depth: overrides.max_depth.or(self.max_depth),
            viewport_height: overrides.viewport_height.or(self.viewport_height),
            focal_length: overrides.focal_length.or(self.focal_length),
        }
    }

    /// Apply the settings that are present to `camera`.
    pub fn apply(&self, mut camera: Camera) -> Camera {
        if let Some(aspect_ratio) = self.aspect_ratio {
            camera.aspect_ratio = aspect_ratio;
        }
        if let Some(image_width) = self.image_width {
            camera.image_width = image_width;
        }
        if let Some(samples_per_pixel) = self.samples_per_pixel {
            camera.samples_per_pixel = samples_per_pixel;
        }
        if let Some(max_depth) = self.max_depth {
            camera.max_depth = max_depth;
        }
        if let Some(viewport_height) = self.viewport_height {
            camera.viewport_height = viewport_height;
        }
        if let Some(focal_length) = self.focal_length {
            camera.focal_length = focal_length;
        }
        camera
    }
}

/// A material as written in a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum MaterialDescription {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
}

impl MaterialDescription {
    fn build(&self, name: &str) -> SceneFileResult<Arc<dyn Material>> {
        let albedo = match self {
            MaterialDescription::Lambertian { albedo } | MaterialDescription::Metal { albedo, .. } => {
                Color::from_array(*albedo)
            }
        };
        if !albedo.is_finite() || albedo.min_element() < 0.0 {
            return Err(SceneFileError::InvalidAlbedo(name.to_string()));
        }

        Ok(match self {
            MaterialDescription::Lambertian { .. } => Arc::new(Lambertian::new(albedo)),
            MaterialDescription::Metal { fuzz, .. } => {
                if !fuzz.is_finite() {
                    return Err(SceneFileError::InvalidFuzz(name.to_string()));
                }
                if !(0.0..=1.0).contains(fuzz) {
                    log::warn!("Material \"{}\": fuzz {} clamped to [0, 1]", name, fuzz);
                }
                Arc::new(Metal::new(albedo, *fuzz))
            }
        })
    }
}

/// A sphere as written in a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

/// A complete scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,
    pub materials: BTreeMap<String, MaterialDescription>,
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Read and parse a scene file.
    pub fn load(path: &Path) -> SceneFileResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a scene description from JSON text.
    pub fn from_json(text: &str) -> SceneFileResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The scene rendered when no file is given: a ground sphere with a
    /// diffuse sphere flanked by a polished and a brushed metal sphere.
    pub fn builtin() -> Self {
        let materials = BTreeMap::from([
            ("ground".to_string(), MaterialDescription::Lambertian { albedo: [0.8, 0.8, 0.0] }),
            ("center".to_string(), MaterialDescription::Lambertian { albedo: [0.1, 0.2, 0.5] }),
            ("left".to_string(), MaterialDescription::Metal { albedo: [0.8, 0.8, 0.8], fuzz: 0.3 }),
            ("right".to_string(), MaterialDescription::Metal { albedo: [0.8, 0.6, 0.2], fuzz: 1.0 }),
        ]);

        let sphere = |center: [f32; 3], radius: f32, material: &str| SphereDescription {
            center,
            radius,
            material: material.to_string(),
        };

        Self {
            camera: CameraSettings::default(),
            materials,
            spheres: vec![
                sphere([0.0, -100.5, -1.0], 100.0, "ground"),
                sphere([0.0, 0.0, -1.2], 0.5, "center"),
                sphere([-1.0, 0.0, -1.0], 0.5, "left"),
                sphere([1.0, 0.0, -1.0], 0.5, "right"),
            ],
        }
    }

    /// Build the renderable scene. Each named material is constructed once
    /// and shared by every sphere that uses it.
    pub fn build(&self) -> SceneFileResult<Scene> {
        let mut materials: BTreeMap<&str, Arc<dyn Material>> = BTreeMap::new();
        for (name, description) in &self.materials {
            materials.insert(name.as_str(), description.build(name)?);
        }

        let mut scene = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneFileError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneFileError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;

            scene.add(Box::new(Sphere::new(
                Vec3::from_array(sphere.center),
                sphere.radius,
                Arc::clone(material),
            )));
        }

        for (name, material) in &materials {
            if Arc::strong_count(material) == 1 {
                log::debug!("Material \"{}\" is not used by any sphere", name);
            }
        }

        log::info!(
            "Built scene with {} spheres and {} materials",
            scene.len(),
            materials.len()
        );
        Ok(scene)
    }
}
