//! Shading frame for a single intersection.

use prism_math::{reflect, Ray, Vec3, EPSILON};

use crate::{Intersections, NodeId, SceneGraph, SceneResult, ShadingPoint};

/// Refractive index of empty space.
pub const VACUUM_IOR: f32 = 1.0;

/// Everything shading needs to know about one hit.
///
/// Built fresh for every shaded intersection and thrown away afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IxComps {
    pub t: f32,
    /// `None` for rays that escaped the scene
    pub object: Option<NodeId>,
    pub point: Vec3,
    pub eye_v: Vec3,
    /// Unit normal, flipped to face the eye
    pub normal_v: Vec3,
    pub reflect_v: Vec3,
    /// True when the normal had to be flipped
    pub inside: bool,
    /// `point` nudged out along the normal, origin for shadow and reflection rays
    pub over_point: Vec3,
    /// `point` nudged in along the normal, origin for refraction rays
    pub under_point: Vec3,
    /// `over_point` in the hit object's local space
    pub object_point: Vec3,
    /// Index of the medium being left
    pub n1: f32,
    /// Index of the medium being entered
    pub n2: f32,
    /// Recursion depth of the ray that produced the hit
    pub depth: u32,
}

impl IxComps {
    /// Build the frame for entry `index` of `xs`, which `ray` produced.
    ///
    /// The whole ledger is replayed up to the hit to work out `n1` and `n2`,
    /// so it must contain every crossing along the ray, including those
    /// behind its origin.
    pub fn prepare(xs: &Intersections, index: usize, ray: &Ray, scene: &SceneGraph) -> SceneResult<Self> {
        let hit = *xs.get(index)?;
        scene.node(hit.object)?;

        let point = ray.at(hit.t);
        let eye_v = -ray.direction;
        let mut normal_v = scene.normal_at(hit.object, point);
        let inside = normal_v.dot(eye_v) < 0.0;
        if inside {
            normal_v = -normal_v;
        }

        let reflect_v = reflect(ray.direction, normal_v);
        let over_point = point + normal_v * EPSILON;
        let under_point = point - normal_v * EPSILON;
        let object_point = scene.point_to_object_space(hit.object, over_point);
        let (n1, n2) = refractive_indices(xs, index, point, scene);

        Ok(Self {
            t: hit.t,
            object: Some(hit.object),
            point,
            eye_v,
            normal_v,
            reflect_v,
            inside,
            over_point,
            under_point,
            object_point,
            n1,
            n2,
            depth: ray.depth,
        })
    }

    /// Frame for a ray that hit nothing, handed to the background.
    ///
    /// There is no surface point; the ray origin stands in for it.
    pub fn escaped(ray: &Ray) -> Self {
        let origin = ray.origin;
        Self {
            t: f32::INFINITY,
            object: None,
            point: origin,
            eye_v: -ray.direction,
            normal_v: Vec3::ZERO,
            reflect_v: ray.direction,
            inside: false,
            over_point: origin,
            under_point: origin,
            object_point: origin,
            n1: VACUUM_IOR,
            n2: VACUUM_IOR,
            depth: ray.depth,
        }
    }

    /// Where material fields are sampled.
    pub fn shading_point(&self) -> ShadingPoint {
        ShadingPoint::new(self.over_point, self.object_point)
    }

    /// True when both refractive indices are positive and finite.
    pub fn has_valid_indices(&self) -> bool {
        self.n1 > 0.0 && self.n2 > 0.0 && self.n1.is_finite() && self.n2.is_finite()
    }

    /// Schlick's approximation of the fraction of light reflected, in [0, 1].
    ///
    /// Returns 1.0 under total internal reflection and when either index is
    /// not a positive finite number.
    pub fn schlick(&self) -> f32 {
        if !self.has_valid_indices() {
            return 1.0;
        }
        let mut cos = self.eye_v.dot(self.normal_v).clamp(0.0, 1.0);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        (r0 + (1.0 - r0) * (1.0 - cos).powi(5)).clamp(0.0, 1.0)
    }
}

/// Replay the ledger up to `index`, tracking which objects the ray is inside.
fn refractive_indices(xs: &Intersections, index: usize, point: Vec3, scene: &SceneGraph) -> (f32, f32) {
    let ior_of = |containers: &[NodeId]| {
        containers.last().map_or(VACUUM_IOR, |&object| {
            let local = scene.point_to_object_space(object, point);
            scene
                .material(object)
                .map_or(VACUUM_IOR, |material| material.ior_at(&ShadingPoint::new(point, local)))
        })
    };

    let mut containers: Vec<NodeId> = Vec::new();
    let mut n1 = VACUUM_IOR;
    let mut n2 = VACUUM_IOR;

    for (i, entry) in xs.iter().enumerate() {
        if i == index {
            n1 = ior_of(&containers);
        }

        match containers.iter().position(|&object| object == entry.object) {
            Some(position) => {
                containers.remove(position);
            }
            None => containers.push(entry.object),
        }

        if i == index {
            n2 = ior_of(&containers);
            break;
        }
    }

    (n1, n2)
}
