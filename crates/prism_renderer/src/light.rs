//! Light sources.

use prism_math::{Transform, Vec3};

use crate::Color;

/// Occlusion above this value puts a point fully in shadow.
pub const DEFAULT_SHADOW_CUTOFF: f32 = 0.5;

/// An infinitely small emitter placed by its transform.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    transform: Transform,
    /// Emitted color and brightness
    pub intensity: Color,
    /// Occlusion threshold for dropping diffuse and specular terms
    pub shadow_cutoff: f32,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self::with_transform(Transform::translation(position.x, position.y, position.z), intensity)
    }

    pub fn with_transform(transform: Transform, intensity: Color) -> Self {
        Self {
            transform,
            intensity,
            shadow_cutoff: DEFAULT_SHADOW_CUTOFF,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World position: the light's local origin.
    pub fn position(&self) -> Vec3 {
        self.transform.origin()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
}

impl Light {
    pub fn position(&self) -> Vec3 {
        match self {
            Light::Point(light) => light.position(),
        }
    }

    pub fn intensity(&self) -> Color {
        match self {
            Light::Point(light) => light.intensity,
        }
    }

    pub fn shadow_cutoff(&self) -> f32 {
        match self {
            Light::Point(light) => light.shadow_cutoff,
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}
