//! Shape geometry in canonical local space.
//!
//! Every variant is a stateless implicit surface centred on the local
//! origin. Scene-graph nodes carry the transform that places it in the
//! world; the functions here never see anything but local-space rays.
//!
//! Degenerate configurations (parallel rays, negative discriminants,
//! vanishing leading coefficients) produce an empty hit list.

use prism_math::{Aabb, Interval, Ray, Vec3, EPSILON};

/// The y-extent of a cylinder or cone and whether its ends are capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caps {
    /// Open interval of y values the lateral surface occupies
    pub bounds: Interval,
    /// Whether flat end caps close off the ends
    pub closed: bool,
}

impl Caps {
    /// Infinite in both directions, no caps.
    pub const UNBOUNDED: Caps = Caps {
        bounds: Interval::UNIVERSE,
        closed: false,
    };

    pub fn new(min: f32, max: f32, closed: bool) -> Self {
        Self {
            bounds: Interval::new(min.min(max), min.max(max)),
            closed,
        }
    }
}

/// Closed set of primitive surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Unit sphere at the origin
    Sphere,
    /// Infinite x-z plane
    Plane,
    /// Axis-aligned cube spanning -1..1 on every axis
    Cube,
    /// Radius 1 cylinder around the y axis
    Cylinder(Caps),
    /// Double-napped cone `x² + z² = y²`
    Cone(Caps),
    /// Never intersects; normal is the local point itself
    Null,
}

impl Shape {
    pub fn cylinder(min: f32, max: f32, closed: bool) -> Self {
        Shape::Cylinder(Caps::new(min, max, closed))
    }

    pub fn cone(min: f32, max: f32, closed: bool) -> Self {
        Shape::Cone(Caps::new(min, max, closed))
    }

    /// Parameters `t` where the local-space ray meets the surface.
    ///
    /// Order is not guaranteed; the intersection ledger sorts.
    pub fn local_intersect(&self, ray: &Ray) -> Vec<f32> {
        match self {
            Shape::Sphere => intersect_sphere(ray),
            Shape::Plane => intersect_plane(ray),
            Shape::Cube => intersect_cube(ray),
            Shape::Cylinder(caps) => intersect_cylinder(ray, caps),
            Shape::Cone(caps) => intersect_cone(ray, caps),
            Shape::Null => Vec::new(),
        }
    }

    /// Surface normal at a local-space point on the surface.
    ///
    /// Only meaningful for points on (or within EPSILON of) the surface.
    /// The result is unit length, except at the cone apex where it is zero.
    pub fn local_normal_at(&self, point: Vec3) -> Vec3 {
        let normal = match self {
            Shape::Sphere | Shape::Null => point,
            Shape::Plane => Vec3::Y,
            Shape::Cube => cube_normal(point),
            Shape::Cylinder(caps) => cylinder_normal(point, caps),
            Shape::Cone(caps) => cone_normal(point, caps),
        };
        normal.normalize_or_zero()
    }

    /// Local-space bounds.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Shape::Sphere | Shape::Cube | Shape::Null => {
                Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
            }
            Shape::Plane => Aabb::new(Interval::UNIVERSE, Interval::new(0.0, 0.0), Interval::UNIVERSE),
            Shape::Cylinder(caps) => {
                Aabb::new(Interval::new(-1.0, 1.0), caps.bounds, Interval::new(-1.0, 1.0))
            }
            Shape::Cone(caps) => {
                let limit = caps.bounds.min.abs().max(caps.bounds.max.abs());
                let radial = Interval::new(-limit, limit);
                Aabb::new(radial, caps.bounds, radial)
            }
        }
    }
}

/// Real roots of `a t² + b t + c`, smaller first.
fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t0 = (-b - sqrt_d) / (2.0 * a);
    let t1 = (-b + sqrt_d) / (2.0 * a);
    Some(if t0 > t1 { (t1, t0) } else { (t0, t1) })
}

fn intersect_sphere(ray: &Ray) -> Vec<f32> {
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.direction.dot(ray.origin);
    let c = ray.origin.length_squared() - 1.0;

    match solve_quadratic(a, b, c) {
        Some((t0, t1)) => vec![t0, t1],
        None => Vec::new(),
    }
}

fn intersect_plane(ray: &Ray) -> Vec<f32> {
    if ray.direction.y.abs() < EPSILON {
        return Vec::new();
    }
    vec![-ray.origin.y / ray.direction.y]
}

/// Slab entry/exit for one axis of the unit cube.
fn check_axis(origin: f32, direction: f32) -> (f32, f32) {
    let tmin_numerator = -1.0 - origin;
    let tmax_numerator = 1.0 - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (signed_infinity(tmin_numerator), signed_infinity(tmax_numerator))
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

#[inline]
fn signed_infinity(numerator: f32) -> f32 {
    if numerator < 0.0 {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    }
}

fn intersect_cube(ray: &Ray) -> Vec<f32> {
    let (xmin, xmax) = check_axis(ray.origin.x, ray.direction.x);
    let (ymin, ymax) = check_axis(ray.origin.y, ray.direction.y);
    let (zmin, zmax) = check_axis(ray.origin.z, ray.direction.z);

    let tmin = xmin.max(ymin).max(zmin);
    let tmax = xmax.min(ymax).min(zmax);

    if tmin > tmax {
        return Vec::new();
    }
    vec![tmin, tmax]
}

fn cube_normal(p: Vec3) -> Vec3 {
    let abs = p.abs();
    let max_c = abs.max_element();

    if max_c == abs.x {
        Vec3::new(p.x, 0.0, 0.0)
    } else if max_c == abs.y {
        Vec3::new(0.0, p.y, 0.0)
    } else {
        Vec3::new(0.0, 0.0, p.z)
    }
}

fn intersect_cylinder(ray: &Ray, caps: &Caps) -> Vec<f32> {
    let (o, d) = (ray.origin, ray.direction);
    let mut hits = Vec::new();

    // Parallel to the axis: only the caps can be hit.
    let a = d.x * d.x + d.z * d.z;
    if a.abs() >= EPSILON {
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - 1.0;
        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            push_within_bounds(ray, caps, [t0, t1], &mut hits);
        }
    }

    intersect_caps(ray, caps, |_| 1.0, &mut hits);
    hits
}

fn cylinder_normal(p: Vec3, caps: &Caps) -> Vec3 {
    let dist = p.x * p.x + p.z * p.z;

    if dist < 1.0 && p.y >= caps.bounds.max - EPSILON {
        Vec3::Y
    } else if dist < 1.0 && p.y <= caps.bounds.min + EPSILON {
        Vec3::NEG_Y
    } else {
        Vec3::new(p.x, 0.0, p.z)
    }
}

/// Double-napped cone `x² + z² = y²`.
///
/// A capped end at height `y_cap` is hit where `x² + z² <= y_cap²`, so the
/// cap radius is `|y_cap|`.
fn intersect_cone(ray: &Ray, caps: &Caps) -> Vec<f32> {
    let (o, d) = (ray.origin, ray.direction);
    let mut hits = Vec::new();

    let a = d.x * d.x - d.y * d.y + d.z * d.z;
    let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
    let c = o.x * o.x - o.y * o.y + o.z * o.z;

    if a.abs() < EPSILON {
        // Ray parallel to one nappe: the quadratic collapses to b t + c = 0.
        if b.abs() >= EPSILON {
            push_within_bounds(ray, caps, [-c / (2.0 * b)], &mut hits);
        }
    } else if let Some((t0, t1)) = solve_quadratic(a, b, c) {
        push_within_bounds(ray, caps, [t0, t1], &mut hits);
    }

    intersect_caps(ray, caps, f32::abs, &mut hits);
    hits
}

fn cone_normal(p: Vec3, caps: &Caps) -> Vec3 {
    let dist = p.x * p.x + p.z * p.z;
    let (min, max) = (caps.bounds.min, caps.bounds.max);

    if dist < max * max && p.y >= max - EPSILON {
        Vec3::Y
    } else if dist < min * min && p.y <= min + EPSILON {
        Vec3::NEG_Y
    } else {
        let y = dist.sqrt();
        Vec3::new(p.x, if p.y > 0.0 { -y } else { y }, p.z)
    }
}

/// Keep lateral-surface roots whose hit point lies strictly inside the y-extent.
fn push_within_bounds<const N: usize>(ray: &Ray, caps: &Caps, ts: [f32; N], hits: &mut Vec<f32>) {
    for t in ts {
        let y = ray.origin.y + t * ray.direction.y;
        if caps.bounds.surrounds(y) {
            hits.push(t);
        }
    }
}

/// Intersect the end caps, keeping hits inside `radius_at(cap_y)`.
fn intersect_caps(ray: &Ray, caps: &Caps, radius_at: impl Fn(f32) -> f32, hits: &mut Vec<f32>) {
    if !caps.closed || ray.direction.y.abs() < EPSILON {
        return;
    }

    for y in [caps.bounds.min, caps.bounds.max] {
        if !y.is_finite() {
            continue;
        }
        let t = (y - ray.origin.y) / ray.direction.y;
        let p = ray.at(t);
        let radius = radius_at(y);
        if p.x * p.x + p.z * p.z <= radius * radius {
            hits.push(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn ray(origin: [f32; 3], direction: [f32; 3]) -> Ray {
        Ray::new(Vec3::from(origin), Vec3::from(direction))
    }

    fn sorted(mut ts: Vec<f32>) -> Vec<f32> {
        ts.sort_by(f32::total_cmp);
        ts
    }

    fn assert_ts(actual: Vec<f32>, expected: &[f32]) {
        let actual = sorted(actual);
        assert_eq!(actual.len(), expected.len(), "got {:?}, expected {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOLERANCE, "got {:?}, expected {:?}", actual, expected);
        }
    }

    /// Implicit-surface membership used by the on-surface checks.
    fn on_surface(shape: &Shape, p: Vec3) -> bool {
        let near = |a: f32, b: f32| (a - b).abs() < TOLERANCE * a.abs().max(b.abs()).max(1.0);
        match shape {
            Shape::Sphere => near(p.length_squared(), 1.0),
            Shape::Plane => near(p.y, 0.0),
            Shape::Cube => near(p.abs().max_element(), 1.0),
            Shape::Cylinder(caps) => {
                let r2 = p.x * p.x + p.z * p.z;
                let side = near(r2, 1.0) && caps.bounds.contains(p.y);
                let cap = caps.closed
                    && (near(p.y, caps.bounds.min) || near(p.y, caps.bounds.max))
                    && r2 <= 1.0 + TOLERANCE;
                side || cap
            }
            Shape::Cone(caps) => {
                let r2 = p.x * p.x + p.z * p.z;
                let side = near(r2, p.y * p.y) && caps.bounds.contains(p.y);
                let cap = caps.closed
                    && (near(p.y, caps.bounds.min) || near(p.y, caps.bounds.max))
                    && r2 <= p.y * p.y + TOLERANCE;
                side || cap
            }
            Shape::Null => false,
        }
    }

    #[test]
    fn test_sphere_two_points() {
        assert_ts(Shape::Sphere.local_intersect(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0])), &[4.0, 6.0]);
    }

    #[test]
    fn test_sphere_tangent() {
        assert_ts(Shape::Sphere.local_intersect(&ray([0.0, 1.0, -5.0], [0.0, 0.0, 1.0])), &[5.0, 5.0]);
    }

    #[test]
    fn test_sphere_miss() {
        assert!(Shape::Sphere.local_intersect(&ray([0.0, 2.0, -5.0], [0.0, 0.0, 1.0])).is_empty());
    }

    #[test]
    fn test_sphere_ray_inside_and_behind() {
        assert_ts(Shape::Sphere.local_intersect(&ray([0.0, 0.0, 0.0], [0.0, 0.0, 1.0])), &[-1.0, 1.0]);
        assert_ts(Shape::Sphere.local_intersect(&ray([0.0, 0.0, 5.0], [0.0, 0.0, 1.0])), &[-6.0, -4.0]);
    }

    #[test]
    fn test_plane_parallel_and_coplanar() {
        assert!(Shape::Plane.local_intersect(&ray([0.0, 10.0, 0.0], [0.0, 0.0, 1.0])).is_empty());
        assert!(Shape::Plane.local_intersect(&ray([0.0, 0.0, 0.0], [0.0, 0.0, 1.0])).is_empty());
    }

    #[test]
    fn test_plane_from_above_and_below() {
        assert_ts(Shape::Plane.local_intersect(&ray([0.0, 1.0, 0.0], [0.0, -1.0, 0.0])), &[1.0]);
        assert_ts(Shape::Plane.local_intersect(&ray([0.0, -1.0, 0.0], [0.0, 1.0, 0.0])), &[1.0]);
    }

    #[test]
    fn test_cube_faces() {
        let cases = [
            ([5.0, 0.5, 0.0], [-1.0, 0.0, 0.0], [4.0, 6.0]),
            ([-5.0, 0.5, 0.0], [1.0, 0.0, 0.0], [4.0, 6.0]),
            ([0.5, 5.0, 0.0], [0.0, -1.0, 0.0], [4.0, 6.0]),
            ([0.5, -5.0, 0.0], [0.0, 1.0, 0.0], [4.0, 6.0]),
            ([0.5, 0.0, 5.0], [0.0, 0.0, -1.0], [4.0, 6.0]),
            ([0.5, 0.0, -5.0], [0.0, 0.0, 1.0], [4.0, 6.0]),
            ([0.0, 0.5, 0.0], [0.0, 0.0, 1.0], [-1.0, 1.0]),
        ];
        for (origin, direction, expected) in cases {
            assert_ts(Shape::Cube.local_intersect(&ray(origin, direction)), &expected);
        }
    }

    #[test]
    fn test_cube_misses() {
        let cases = [
            ([-2.0, 0.0, 0.0], [0.2673, 0.5345, 0.8018]),
            ([0.0, -2.0, 0.0], [0.8018, 0.2673, 0.5345]),
            ([0.0, 0.0, -2.0], [0.5345, 0.8018, 0.2673]),
            ([2.0, 0.0, 2.0], [0.0, 0.0, -1.0]),
            ([0.0, 2.0, 2.0], [0.0, -1.0, 0.0]),
            ([2.0, 2.0, 0.0], [-1.0, 0.0, 0.0]),
        ];
        for (origin, direction) in cases {
            assert!(Shape::Cube.local_intersect(&ray(origin, direction)).is_empty());
        }
    }

    #[test]
    fn test_cube_normal_picks_largest_component() {
        let cases = [
            ([1.0, 0.5, -0.8], [1.0, 0.0, 0.0]),
            ([-1.0, -0.2, 0.9], [-1.0, 0.0, 0.0]),
            ([-0.4, 1.0, -0.1], [0.0, 1.0, 0.0]),
            ([0.3, -1.0, -0.7], [0.0, -1.0, 0.0]),
            ([-0.6, 0.3, 1.0], [0.0, 0.0, 1.0]),
            ([0.4, 0.4, -1.0], [0.0, 0.0, -1.0]),
            ([1.0, 1.0, 1.0], [1.0, 0.0, 0.0]),
            ([-1.0, -1.0, -1.0], [-1.0, 0.0, 0.0]),
        ];
        for (point, normal) in cases {
            assert_eq!(Shape::Cube.local_normal_at(Vec3::from(point)), Vec3::from(normal));
        }
    }

    #[test]
    fn test_cylinder_misses() {
        let cyl = Shape::Cylinder(Caps::UNBOUNDED);
        assert!(cyl.local_intersect(&ray([1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).is_empty());
        assert!(cyl.local_intersect(&ray([0.0, 0.0, 0.0], [0.0, 1.0, 0.0])).is_empty());
        assert!(cyl.local_intersect(&ray([0.0, 0.0, -5.0], [1.0, 1.0, 1.0])).is_empty());
    }

    #[test]
    fn test_cylinder_hits() {
        let cyl = Shape::Cylinder(Caps::UNBOUNDED);
        assert_ts(cyl.local_intersect(&ray([1.0, 0.0, -5.0], [0.0, 0.0, 1.0])), &[5.0, 5.0]);
        assert_ts(cyl.local_intersect(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0])), &[4.0, 6.0]);

        let d = Vec3::new(0.1, 1.0, 1.0).normalize();
        let r = Ray::new(Vec3::new(0.5, 0.0, -5.0), d);
        assert_ts(cyl.local_intersect(&r), &[6.80798, 7.08872]);
    }

    #[test]
    fn test_truncated_cylinder() {
        let cyl = Shape::cylinder(1.0, 2.0, false);
        let cases = [
            ([0.0, 1.5, 0.0], [0.1, 1.0, 0.0], 0),
            ([0.0, 3.0, -5.0], [0.0, 0.0, 1.0], 0),
            ([0.0, 0.0, -5.0], [0.0, 0.0, 1.0], 0),
            ([0.0, 2.0, -5.0], [0.0, 0.0, 1.0], 0),
            ([0.0, 1.0, -5.0], [0.0, 0.0, 1.0], 0),
            ([0.0, 1.5, -2.0], [0.0, 0.0, 1.0], 2),
        ];
        for (origin, direction, count) in cases {
            assert_eq!(cyl.local_intersect(&ray(origin, direction)).len(), count);
        }
    }

    #[test]
    fn test_capped_cylinder() {
        let cyl = Shape::cylinder(1.0, 2.0, true);
        let cases = [
            ([0.0, 3.0, 0.0], [0.0, -1.0, 0.0]),
            ([0.0, 3.0, -2.0], [0.0, -1.0, 2.0]),
            ([0.0, 4.0, -2.0], [0.0, -1.0, 1.0]),
            ([0.0, 0.0, -2.0], [0.0, 1.0, 2.0]),
            ([0.0, -1.0, -2.0], [0.0, 1.0, 1.0]),
        ];
        for (origin, direction) in cases {
            assert_eq!(cyl.local_intersect(&ray(origin, direction)).len(), 2, "{:?}", origin);
        }
    }

    #[test]
    fn test_cylinder_normals() {
        let cyl = Shape::Cylinder(Caps::UNBOUNDED);
        assert_eq!(cyl.local_normal_at(Vec3::new(1.0, 0.0, 0.0)), Vec3::X);
        assert_eq!(cyl.local_normal_at(Vec3::new(0.0, 5.0, -1.0)), Vec3::NEG_Z);
        assert_eq!(cyl.local_normal_at(Vec3::new(-1.0, 1.0, 0.0)), Vec3::NEG_X);

        let capped = Shape::cylinder(1.0, 2.0, true);
        assert_eq!(capped.local_normal_at(Vec3::new(0.0, 1.0, 0.0)), Vec3::NEG_Y);
        assert_eq!(capped.local_normal_at(Vec3::new(0.5, 1.0, 0.0)), Vec3::NEG_Y);
        assert_eq!(capped.local_normal_at(Vec3::new(0.0, 2.0, 0.5)), Vec3::Y);
    }

    #[test]
    fn test_cone_hits() {
        let cone = Shape::Cone(Caps::UNBOUNDED);
        assert_ts(cone.local_intersect(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0])), &[5.0, 5.0]);

        let d = Vec3::new(-0.5, -1.0, 1.0).normalize();
        let r = Ray::new(Vec3::new(1.0, 1.0, -5.0), d);
        let ts = sorted(cone.local_intersect(&r));
        assert_eq!(ts.len(), 2);
        assert!((ts[0] - 4.55006).abs() < TOLERANCE);
        assert!((ts[1] - 49.44994).abs() < 1e-2);
    }

    #[test]
    fn test_cone_parallel_to_one_half() {
        let cone = Shape::Cone(Caps::UNBOUNDED);
        let d = Vec3::new(0.0, 1.0, 1.0).normalize();
        let r = Ray::new(Vec3::new(0.0, 0.0, -1.0), d);
        assert_ts(cone.local_intersect(&r), &[0.35355]);
    }

    #[test]
    fn test_capped_cone() {
        let cone = Shape::cone(-0.5, 0.5, true);
        assert_eq!(cone.local_intersect(&ray([0.0, 0.0, -5.0], [0.0, 1.0, 0.0])).len(), 0);
        assert_eq!(cone.local_intersect(&ray([0.0, 0.0, -0.25], [0.0, 1.0, 1.0])).len(), 2);
        assert_eq!(cone.local_intersect(&ray([0.0, 0.0, -0.25], [0.0, 1.0, 0.0])).len(), 4);
    }

    #[test]
    fn test_cone_cap_radius_is_cap_height() {
        let cone = Shape::cone(-0.5, 0.5, true);
        // 0.4² <= 0.5²: both caps plus the wall at y = ±0.4
        assert_eq!(cone.local_intersect(&ray([0.4, 2.0, 0.0], [0.0, -1.0, 0.0])).len(), 4);
        // 0.6² > 0.5²: outside both caps and the cone wall
        assert!(cone.local_intersect(&ray([0.6, 2.0, 0.0], [0.0, -1.0, 0.0])).is_empty());
    }

    #[test]
    fn test_cone_normals() {
        let cone = Shape::Cone(Caps::UNBOUNDED);
        assert_eq!(cone.local_normal_at(Vec3::ZERO), Vec3::ZERO);

        let n = cone.local_normal_at(Vec3::new(1.0, 1.0, 1.0));
        assert!(n.abs_diff_eq(Vec3::new(1.0, -2.0_f32.sqrt(), 1.0).normalize(), EPSILON));

        let n = cone.local_normal_at(Vec3::new(-1.0, -1.0, 0.0));
        assert!(n.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0).normalize(), EPSILON));

        let capped = Shape::cone(-1.0, 1.0, true);
        assert_eq!(capped.local_normal_at(Vec3::new(0.2, 1.0, 0.1)), Vec3::Y);
        assert_eq!(capped.local_normal_at(Vec3::new(0.2, -1.0, 0.1)), Vec3::NEG_Y);
    }

    #[test]
    fn test_null_shape_never_hits() {
        assert!(Shape::Null.local_intersect(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0])).is_empty());
    }

    #[test]
    fn test_every_hit_lies_on_the_surface() {
        let shapes = [
            Shape::Sphere,
            Shape::Plane,
            Shape::Cube,
            Shape::cylinder(-1.0, 1.5, true),
            Shape::cylinder(-2.0, 2.0, false),
            Shape::cone(-1.5, 1.0, true),
            Shape::Cone(Caps::UNBOUNDED),
        ];
        let rays = [
            ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]),
            ray([0.3, 4.0, -0.2], [0.0, -1.0, 0.0]),
            ray([-3.0, 2.0, -4.0], [0.5, -0.3, 0.8]),
            ray([0.2, -0.1, 0.1], [0.3, 0.9, -0.2]),
            ray([5.0, 0.5, 0.5], [-1.0, 0.05, 0.0]),
            ray([0.1, 3.0, -3.0], [0.0, -1.0, 1.0]),
        ];

        for shape in &shapes {
            for r in &rays {
                for t in shape.local_intersect(r) {
                    let p = r.at(t);
                    assert!(on_surface(shape, p), "{:?} hit {:?} at t={} off-surface", shape, p, t);
                }
            }
        }
    }

    #[test]
    fn test_normals_are_unit_on_surface() {
        let samples = [
            (Shape::Sphere, Vec3::new(0.0, 0.6, 0.8)),
            (Shape::Plane, Vec3::new(10.0, 0.0, -3.0)),
            (Shape::Cube, Vec3::new(0.3, -1.0, 0.2)),
            (Shape::cylinder(-1.0, 1.0, true), Vec3::new(0.6, 0.0, 0.8)),
            (Shape::cylinder(-1.0, 1.0, true), Vec3::new(0.1, 1.0, 0.2)),
            (Shape::cone(-1.0, 1.0, true), Vec3::new(0.3, 0.5, 0.4)),
        ];
        for (shape, point) in samples {
            let n = shape.local_normal_at(point);
            assert!((n.length() - 1.0).abs() < EPSILON, "{:?} normal {:?}", shape, n);
        }
    }

    #[test]
    fn test_bounding_boxes() {
        assert_eq!(Shape::Sphere.bounding_box().min(), Vec3::splat(-1.0));
        assert!(!Shape::Plane.bounding_box().is_finite());

        let cyl = Shape::cylinder(-5.0, 3.0, true).bounding_box();
        assert_eq!(cyl.min(), Vec3::new(-1.0, -5.0, -1.0));
        assert_eq!(cyl.max(), Vec3::new(1.0, 3.0, 1.0));

        let cone = Shape::cone(-5.0, 3.0, true).bounding_box();
        assert_eq!(cone.min(), Vec3::new(-5.0, -5.0, -5.0));
        assert_eq!(cone.max(), Vec3::new(5.0, 3.0, 5.0));
    }
}
