//! The world: scene graph, lights, background, and the recursive trace.

use prism_math::{Ray, Vec3};
use rand::RngCore;

use crate::{Background, Color, Intersections, IxComps, Light, SceneGraph, RAY_DEPTH_LIMIT};

/// Everything a ray can see.
///
/// Read-only once rendering starts. Shared by reference across all render
/// threads; the only per-ray state is the ray's depth and the caller's
/// random generator.
#[derive(Debug, Clone)]
pub struct World {
    scene: SceneGraph,
    lights: Vec<Light>,
    background: Background,
    max_depth: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(SceneGraph::new())
    }
}

impl World {
    pub fn new(scene: SceneGraph) -> Self {
        Self {
            scene,
            lights: Vec::new(),
            background: Background::default(),
            max_depth: RAY_DEPTH_LIMIT,
        }
    }

    pub fn with_light(mut self, light: impl Into<Light>) -> Self {
        self.add_light(light);
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Override the recursion budget for reflected and refracted rays.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// All crossings of `ray` with every primitive, sorted globally.
    pub fn intersect(&self, ray: &Ray) -> Intersections {
        self.scene.intersect_all(ray)
    }

    /// Color seen along `ray`.
    pub fn color_at(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let xs = self.intersect(ray);
        let index = match xs.hit_index() {
            Some(index) => index,
            None => return self.background.shade(&IxComps::escaped(ray)),
        };

        match IxComps::prepare(&xs, index, ray, &self.scene) {
            Ok(comps) => self.shade_hit(&comps, rng),
            Err(err) => {
                log::warn!("Could not build shading frame: {}", err);
                Color::ZERO
            }
        }
    }

    /// Shade a prepared frame with the hit object's material.
    pub fn shade_hit(&self, comps: &IxComps, rng: &mut dyn RngCore) -> Color {
        match comps.object.and_then(|id| self.scene.material(id)) {
            Some(material) => material.shade(self, comps, rng),
            None => self.background.shade(comps),
        }
    }

    /// True if anything sits between `point` and the light.
    pub fn is_shadowed(&self, light: &Light, point: Vec3) -> bool {
        let to_light = light.position() - point;
        let distance = to_light.length();
        if !(distance > 0.0 && distance.is_finite()) {
            return false;
        }

        let ray = Ray::new(point, to_light / distance);
        match self.intersect(&ray).hit() {
            Some(hit) => hit.t < distance,
            None => false,
        }
    }
}
