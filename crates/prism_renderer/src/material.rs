//! Surface shading: Phong local illumination plus recursive reflection and
//! refraction.

use prism_math::{reflect, Ray};
use rand::RngCore;

use crate::sampling::perturb;
use crate::{Color, Field, IxComps, Light, ShadingPoint, World, VACUUM_IOR};

/// How a surface responds to light.
#[derive(Debug, Clone)]
pub enum Material {
    /// Debug view: the shading normal mapped to RGB
    Normals,
    Phong(Phong),
}

impl Default for Material {
    fn default() -> Self {
        Material::Phong(Phong::default())
    }
}

impl From<Phong> for Material {
    fn from(phong: Phong) -> Self {
        Material::Phong(phong)
    }
}

impl Material {
    /// Refractive index at a point on the surface.
    pub fn ior_at(&self, point: &ShadingPoint) -> f32 {
        match self {
            Material::Normals => VACUUM_IOR,
            Material::Phong(phong) => phong.ior.sample(point),
        }
    }

    /// Total color leaving the surface toward the eye.
    pub fn shade(&self, world: &World, comps: &IxComps, rng: &mut dyn RngCore) -> Color {
        match self {
            Material::Normals => comps.normal_v * 0.5 + Color::splat(0.5),
            Material::Phong(phong) => phong.shade(world, comps, rng),
        }
    }
}

/// Phong illumination with optional mirror and glass terms.
///
/// Every attribute is a field, so any of them can vary across the surface.
#[derive(Debug, Clone)]
pub struct Phong {
    pub color: Field<Color>,
    pub ambient: Field<f32>,
    pub diffuse: Field<f32>,
    pub specular: Field<f32>,
    pub shininess: Field<f32>,
    pub reflectivity: Field<f32>,
    /// Glossy blur applied to reflected rays
    pub reflection_roughness: Field<f32>,
    pub transparency: Field<f32>,
    pub ior: Field<f32>,
    /// Frosted blur applied to refracted rays
    pub refraction_roughness: Field<f32>,
    /// Weight reflection against refraction with Schlick's approximation
    /// instead of summing both.
    pub fresnel: bool,
}

impl Default for Phong {
    fn default() -> Self {
        Self {
            color: Field::solid(Color::ONE),
            ambient: Field::solid(0.1),
            diffuse: Field::solid(0.9),
            specular: Field::solid(0.9),
            shininess: Field::solid(200.0),
            reflectivity: Field::solid(0.0),
            reflection_roughness: Field::solid(0.0),
            transparency: Field::solid(0.0),
            ior: Field::solid(VACUUM_IOR),
            refraction_roughness: Field::solid(0.0),
            fresnel: false,
        }
    }
}

impl Phong {
    /// A plain colored surface with default coefficients.
    pub fn colored(color: impl Into<Field<Color>>) -> Self {
        Self {
            color: color.into(),
            ..Default::default()
        }
    }

    /// Clear glass with the given index of refraction.
    pub fn glass(ior: f32) -> Self {
        Self {
            color: Field::solid(Color::ZERO),
            ambient: Field::solid(0.0),
            diffuse: Field::solid(0.0),
            specular: Field::solid(1.0),
            shininess: Field::solid(300.0),
            reflectivity: Field::solid(1.0),
            transparency: Field::solid(1.0),
            ior: Field::solid(ior),
            fresnel: true,
            ..Default::default()
        }
    }

    /// Local illumination from one light.
    ///
    /// `occlusion` runs from 0 (fully lit) to 1 (fully blocked). Above the
    /// light's shadow cutoff only the ambient term survives; below it the
    /// diffuse and specular terms are scaled by `1 - occlusion`.
    pub fn lighting(&self, light: &Light, comps: &IxComps, occlusion: f32) -> Color {
        let at = comps.shading_point();
        let color = self.color.sample(&at) * light.intensity();
        let ambient = color * self.ambient.sample(&at);

        let light_v = (light.position() - comps.point).normalize_or_zero();
        let cos_theta = light_v.dot(comps.normal_v);
        if cos_theta < 0.0 || occlusion > light.shadow_cutoff() {
            return ambient;
        }

        let attenuation = 1.0 - occlusion;
        let diffuse = color * self.diffuse.sample(&at) * cos_theta * attenuation;

        let reflect_dot_eye = reflect(-light_v, comps.normal_v).dot(comps.eye_v);
        let specular = if reflect_dot_eye <= 0.0 {
            Color::ZERO
        } else {
            let factor = reflect_dot_eye.powf(self.shininess.sample(&at));
            light.intensity() * self.specular.sample(&at) * factor * attenuation
        };

        ambient + diffuse + specular
    }

    /// Direct light from every light in the world, with shadows.
    pub fn surface(&self, world: &World, comps: &IxComps) -> Color {
        world
            .lights()
            .iter()
            .map(|light| {
                let occlusion = if world.is_shadowed(light, comps.over_point) { 1.0 } else { 0.0 };
                self.lighting(light, comps, occlusion)
            })
            .sum()
    }

    /// Reflected light, or black when the surface is not reflective or the
    /// ray is out of bounces.
    pub fn reflect(&self, world: &World, comps: &IxComps, rng: &mut dyn RngCore) -> Color {
        if comps.depth >= world.max_depth() {
            return Color::ZERO;
        }
        let reflectivity = self.reflectivity.sample(&comps.shading_point());
        if reflectivity <= 0.0 {
            return Color::ZERO;
        }

        let ray = self.reflected_ray(comps, rng);
        finite_or_zero(world.color_at(&ray, rng) * reflectivity)
    }

    /// Mirror ray leaving `over_point`, blurred by the reflection roughness.
    pub fn reflected_ray(&self, comps: &IxComps, rng: &mut dyn RngCore) -> Ray {
        let roughness = self.reflection_roughness.sample(&comps.shading_point());
        let direction = perturb(comps.reflect_v, roughness, rng);
        Ray::with_depth(comps.over_point, direction, comps.depth + 1)
    }

    /// Transmitted light, or black when the surface is opaque, the ray is out
    /// of bounces, or the geometry gives total internal reflection.
    pub fn refract(&self, world: &World, comps: &IxComps, rng: &mut dyn RngCore) -> Color {
        if comps.depth >= world.max_depth() {
            return Color::ZERO;
        }
        let transparency = self.transparency.sample(&comps.shading_point());
        if transparency <= 0.0 {
            return Color::ZERO;
        }
        if !comps.has_valid_indices() {
            log::trace!("Skipping refraction with invalid indices {} -> {}", comps.n1, comps.n2);
            return Color::ZERO;
        }

        match self.refracted_ray(comps, rng) {
            Some(ray) => finite_or_zero(world.color_at(&ray, rng) * transparency),
            None => Color::ZERO,
        }
    }

    /// Ray bent by Snell's law leaving `under_point`, blurred by the refraction
    /// roughness. `None` under total internal reflection or with indices that
    /// are not positive and finite.
    pub fn refracted_ray(&self, comps: &IxComps, rng: &mut dyn RngCore) -> Option<Ray> {
        if !comps.has_valid_indices() {
            return None;
        }

        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eye_v.dot(comps.normal_v);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return None;
        }
        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normal_v * (n_ratio * cos_i - cos_t) - comps.eye_v * n_ratio;

        let roughness = self.refraction_roughness.sample(&comps.shading_point());
        let direction = perturb(direction, roughness, rng);
        Some(Ray::with_depth(comps.under_point, direction, comps.depth + 1))
    }

    pub fn shade(&self, world: &World, comps: &IxComps, rng: &mut dyn RngCore) -> Color {
        let surface = self.surface(world, comps);
        let reflected = self.reflect(world, comps, rng);
        let refracted = self.refract(world, comps, rng);

        // Degenerate indices skip the blend; both terms are already guarded
        if self.fresnel && comps.has_valid_indices() && self.is_reflective_and_transparent(comps) {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    fn is_reflective_and_transparent(&self, comps: &IxComps) -> bool {
        let at = comps.shading_point();
        self.reflectivity.sample(&at) > 0.0 && self.transparency.sample(&at) > 0.0
    }
}

/// Non-finite contributions are replaced with black so one degenerate ray
/// cannot poison the rest of the recursion.
#[inline]
fn finite_or_zero(color: Color) -> Color {
    if color.is_finite() {
        color
    } else {
        log::trace!("Dropping non-finite secondary contribution {:?}", color);
        Color::ZERO
    }
}
