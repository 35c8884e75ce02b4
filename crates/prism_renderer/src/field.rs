//! Field samplers: procedural values evaluated at a shading point.
//!
//! Every material attribute is a `Field`, either a plain constant or a tree
//! of pattern nodes. A node maps the incoming point through its own
//! transform and then picks or mixes its children, which see the point in
//! the parent's pattern space.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use prism_math::{Transform, Vec3};

/// Values a field can produce.
pub trait FieldValue:
    Copy + Debug + Send + Sync + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
}

impl FieldValue for f32 {}
impl FieldValue for Vec3 {}

/// Which coordinates the root of a field is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    World,
    #[default]
    Object,
}

/// A surface point expressed in both world and object space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingPoint {
    pub world: Vec3,
    pub object: Vec3,
}

impl ShadingPoint {
    pub fn new(world: Vec3, object: Vec3) -> Self {
        Self { world, object }
    }

    /// Same coordinates in both spaces, for unit-transform primitives.
    pub fn at(point: Vec3) -> Self {
        Self::new(point, point)
    }
}

/// Pattern node kinds.
#[derive(Debug, Clone)]
pub enum Pattern<T> {
    Solid(T),
    /// `a` where `floor(x)` is even, `b` where it is odd
    Stripe(Box<Field<T>>, Box<Field<T>>),
    /// Linear ramp from `a` to `b` over each unit of x
    Gradient(Box<Field<T>>, Box<Field<T>>),
    /// Concentric rings around the y axis
    Ring(Box<Field<T>>, Box<Field<T>>),
    /// 3D checkerboard of unit cells
    Checker(Box<Field<T>>, Box<Field<T>>),
    /// `a * (1 - weight) + b * weight`
    Blend(Box<Field<T>>, Box<Field<T>>, f32),
}

/// A pattern node with its own transform and root coordinate space.
#[derive(Debug, Clone)]
pub struct Field<T> {
    pattern: Pattern<T>,
    transform: Transform,
    space: Space,
}

impl<T: FieldValue> Field<T> {
    pub fn new(pattern: Pattern<T>) -> Self {
        Self {
            pattern,
            transform: Transform::IDENTITY,
            space: Space::Object,
        }
    }

    pub fn solid(value: T) -> Self {
        Self::new(Pattern::Solid(value))
    }

    pub fn stripe(a: impl Into<Field<T>>, b: impl Into<Field<T>>) -> Self {
        Self::new(Pattern::Stripe(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn gradient(a: impl Into<Field<T>>, b: impl Into<Field<T>>) -> Self {
        Self::new(Pattern::Gradient(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn ring(a: impl Into<Field<T>>, b: impl Into<Field<T>>) -> Self {
        Self::new(Pattern::Ring(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn checker(a: impl Into<Field<T>>, b: impl Into<Field<T>>) -> Self {
        Self::new(Pattern::Checker(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn blend(a: impl Into<Field<T>>, b: impl Into<Field<T>>, weight: f32) -> Self {
        Self::new(Pattern::Blend(Box::new(a.into()), Box::new(b.into()), weight))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Only honored on the root of a field tree.
    pub fn in_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    pub fn pattern(&self) -> &Pattern<T> {
        &self.pattern
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn space(&self) -> Space {
        self.space
    }

    /// The constant value, if this field is a solid.
    pub fn as_solid(&self) -> Option<T> {
        match self.pattern {
            Pattern::Solid(value) => Some(value),
            _ => None,
        }
    }

    /// Evaluate the field at a shading point.
    pub fn sample(&self, point: &ShadingPoint) -> T {
        let p = match self.space {
            Space::World => point.world,
            Space::Object => point.object,
        };
        self.sample_local(p)
    }

    /// Evaluate with `p` already in the space this node is attached to.
    fn sample_local(&self, p: Vec3) -> T {
        let p = self.transform.point_to_local(p);
        match &self.pattern {
            Pattern::Solid(value) => *value,
            Pattern::Stripe(a, b) => {
                if is_even(p.x.floor()) {
                    a.sample_local(p)
                } else {
                    b.sample_local(p)
                }
            }
            Pattern::Gradient(a, b) => {
                let a = a.sample_local(p);
                let b = b.sample_local(p);
                a + (b - a) * (p.x - p.x.floor())
            }
            Pattern::Ring(a, b) => {
                if is_even((p.x * p.x + p.z * p.z).sqrt().floor()) {
                    a.sample_local(p)
                } else {
                    b.sample_local(p)
                }
            }
            Pattern::Checker(a, b) => {
                if is_even(p.x.floor() + p.y.floor() + p.z.floor()) {
                    a.sample_local(p)
                } else {
                    b.sample_local(p)
                }
            }
            Pattern::Blend(a, b, weight) => a.sample_local(p) * (1.0 - weight) + b.sample_local(p) * *weight,
        }
    }
}

#[inline]
fn is_even(cell: f32) -> bool {
    cell.rem_euclid(2.0) == 0.0
}

impl<T: FieldValue> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::solid(value)
    }
}
