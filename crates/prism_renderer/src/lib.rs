//! Prism renderer - a Whitted-style recursive ray tracer.
//!
//! Rays are intersected against an arena scene graph of implicit-surface
//! primitives, shaded with Phong illumination, and recursively reflected
//! and refracted until they run out of depth.
//!
//! - [`World::color_at`] is the single entry point for tracing a ray
//! - [`render`] drives a [`Camera`] over the frame in parallel buckets

mod background;
mod bucket;
mod camera;
mod comps;
mod error;
mod field;
mod intersection;
mod light;
mod material;
mod renderer;
mod sampling;
mod scene_graph;
mod shape;
mod world;

pub use background::Background;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use comps::{IxComps, VACUUM_IOR};
pub use error::{OutputError, SceneError, SceneResult};
pub use field::{Field, FieldValue, Pattern, ShadingPoint, Space};
pub use intersection::{Intersection, Intersections};
pub use light::{Light, PointLight, DEFAULT_SHADOW_CUTOFF};
pub use material::{Material, Phong};
pub use renderer::{color_to_rgb, render, render_pixel, to_byte, ImageBuffer, PixelSample, RenderConfig};
pub use scene_graph::{Node, NodeId, Primitive, SceneGraph};
pub use shape::{Caps, Shape};
pub use world::World;

/// Re-export the math types the public API is written in
pub use prism_math::{Aabb, Interval, Ray, Transform, TransformError, Vec3};

/// RGB color with linear channels, nominally in `[0, 1]`.
pub type Color = Vec3;

/// Default number of bounces a camera ray may spawn.
///
/// Reflection and refraction contribute black once a ray reaches this depth.
pub const RAY_DEPTH_LIMIT: u32 = 5;
