//! Built-in demo scenes.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

use anyhow::Result;
use clap::ValueEnum;
use prism_renderer::{
    Background, Camera, Color, Field, Material, Phong, PointLight, RenderConfig, SceneGraph, Shape, Space,
    Transform, Vec3, World,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Three spheres on a plain floor
    Spheres,
    /// Nested glass spheres over a checkered floor
    Glass,
    /// Cube, cylinder and cone arranged in a transformed group
    Shapes,
}

/// Build the world and a camera sized from `config`.
pub fn build(kind: SceneKind, config: &RenderConfig) -> Result<(World, Camera)> {
    let (world, from, to) = match kind {
        SceneKind::Spheres => (spheres()?, Vec3::new(0.0, 1.5, -5.0), Vec3::new(0.0, 1.0, 0.0)),
        SceneKind::Glass => (glass()?, Vec3::new(0.0, 2.5, -6.0), Vec3::new(0.0, 1.0, 0.0)),
        SceneKind::Shapes => (shapes()?, Vec3::new(-2.0, 4.0, -9.0), Vec3::new(0.0, 1.0, 0.0)),
    };

    let world = world.with_max_depth(config.max_depth);
    let camera = Camera::new(config.width, config.height, config.field_of_view).look_at(from, to, Vec3::Y)?;

    log::debug!(
        "Built {:?} scene: {} nodes, {} lights",
        kind,
        world.scene().len(),
        world.lights().len()
    );
    Ok((world, camera))
}

fn key_light() -> PointLight {
    PointLight::new(Vec3::new(-10.0, 10.0, -10.0), Color::ONE)
}

fn spheres() -> Result<World> {
    let mut scene = SceneGraph::new();

    scene.add_primitive(
        Shape::Plane,
        Phong {
            color: Field::solid(Color::new(1.0, 0.9, 0.9)),
            specular: Field::solid(0.0),
            ..Default::default()
        }
        .into(),
        Transform::IDENTITY,
    );

    scene.add_primitive(
        Shape::Sphere,
        Phong {
            color: Field::solid(Color::new(0.1, 1.0, 0.5)),
            diffuse: Field::solid(0.7),
            specular: Field::solid(0.3),
            ..Default::default()
        }
        .into(),
        Transform::translation(-0.5, 1.0, 0.5),
    );

    scene.add_primitive(
        Shape::Sphere,
        Phong {
            color: Field::solid(Color::new(0.5, 1.0, 0.1)),
            diffuse: Field::solid(0.7),
            specular: Field::solid(0.3),
            reflectivity: Field::solid(0.2),
            ..Default::default()
        }
        .into(),
        Transform::scaling(0.5, 0.5, 0.5)?.then(&Transform::translation(1.5, 0.5, -0.5)),
    );

    scene.add_primitive(
        Shape::Sphere,
        Phong {
            color: Field::solid(Color::new(1.0, 0.8, 0.1)),
            diffuse: Field::solid(0.7),
            specular: Field::solid(0.3),
            reflection_roughness: Field::solid(0.05),
            reflectivity: Field::solid(0.3),
            ..Default::default()
        }
        .into(),
        Transform::scaling(0.33, 0.33, 0.33)?.then(&Transform::translation(-1.5, 0.33, -0.75)),
    );

    Ok(World::new(scene).with_light(key_light()))
}

fn glass() -> Result<World> {
    let mut scene = SceneGraph::new();

    let checker = Field::<Color>::checker(Color::new(0.15, 0.15, 0.2), Color::new(0.85, 0.85, 0.8))
        .in_space(Space::World);
    scene.add_primitive(
        Shape::Plane,
        Phong {
            color: checker,
            specular: Field::solid(0.0),
            reflectivity: Field::solid(0.1),
            ..Default::default()
        }
        .into(),
        Transform::IDENTITY,
    );

    scene.add_primitive(
        Shape::Sphere,
        Phong::glass(1.5).into(),
        Transform::translation(0.0, 1.0, 0.0),
    );

    // Air bubble inside the glass ball
    scene.add_primitive(
        Shape::Sphere,
        Phong::glass(1.0).into(),
        Transform::scaling(0.5, 0.5, 0.5)?.then(&Transform::translation(0.0, 1.0, 0.0)),
    );

    let ring = Field::<Color>::ring(Color::new(0.8, 0.2, 0.1), Color::new(0.9, 0.7, 0.2))
        .with_transform(Transform::scaling(0.2, 0.2, 0.2)?);
    scene.add_primitive(
        Shape::Sphere,
        Phong {
            color: ring,
            ..Default::default()
        }
        .into(),
        Transform::scaling(0.6, 0.6, 0.6)?.then(&Transform::translation(1.5, 0.6, 2.0)),
    );

    Ok(World::new(scene).with_light(key_light()).with_background(Background::sky()))
}

fn shapes() -> Result<World> {
    let mut scene = SceneGraph::new();

    let stripes = Field::<Color>::stripe(Color::new(0.9, 0.9, 0.9), Color::new(0.6, 0.6, 0.65))
        .with_transform(Transform::rotation_y(FRAC_PI_4));
    scene.add_primitive(
        Shape::Plane,
        Phong {
            color: stripes,
            specular: Field::solid(0.0),
            ..Default::default()
        }
        .into(),
        Transform::IDENTITY,
    );

    let group = scene.add_group(Transform::rotation_y(FRAC_PI_6).then(&Transform::translation(0.0, 0.0, 1.0)));

    let cube = scene.add_primitive(
        Shape::Cube,
        Phong {
            color: Field::<Color>::gradient(Color::new(0.2, 0.4, 0.9), Color::new(0.9, 0.3, 0.3))
                .with_transform(Transform::scaling(2.0, 1.0, 1.0)?.then(&Transform::translation(-1.0, 0.0, 0.0))),
            ..Default::default()
        }
        .into(),
        Transform::scaling(0.75, 0.75, 0.75)?
            .then(&Transform::rotation_y(FRAC_PI_4))
            .then(&Transform::translation(-2.5, 0.75, 0.0)),
    );

    let cylinder = scene.add_primitive(
        Shape::cylinder(0.0, 2.0, true),
        Phong {
            color: Field::solid(Color::new(0.3, 0.8, 0.4)),
            reflectivity: Field::solid(0.15),
            ..Default::default()
        }
        .into(),
        Transform::scaling(0.6, 1.0, 0.6)?,
    );

    let cone = scene.add_primitive(
        Shape::cone(-1.0, 0.0, true),
        Material::Normals,
        Transform::scaling(0.8, 1.5, 0.8)?.then(&Transform::translation(2.5, 1.5, 0.0)),
    );

    for child in [cube, cylinder, cone] {
        scene.add_child(group, child)?;
    }

    // A tilted mirror disc behind the group
    scene.add_primitive(
        Shape::cylinder(-0.05, 0.05, true),
        Phong {
            color: Field::solid(Color::splat(0.1)),
            diffuse: Field::solid(0.1),
            reflectivity: Field::solid(0.8),
            ..Default::default()
        }
        .into(),
        Transform::scaling(2.0, 1.0, 2.0)?
            .then(&Transform::rotation_x(FRAC_PI_2 - FRAC_PI_3 / 4.0))
            .then(&Transform::translation(0.0, 2.0, 5.0)),
    );

    Ok(World::new(scene).with_light(key_light()).with_background(Background::Solid(Color::new(0.05, 0.05, 0.08))))
}
