//! Error types for scene construction and image output.
//!
//! Geometric degeneracies never show up here: a ray that is parallel to a
//! plane or misses a quadric simply produces no intersections.

use prism_math::TransformError;
use thiserror::Error;

use crate::NodeId;

/// Errors raised while building or querying a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("node {0:?} does not belong to this scene graph")]
    UnknownNode(NodeId),

    #[error("node {child:?} is already a child of {parent:?}")]
    AlreadyParented { child: NodeId, parent: NodeId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("intersection index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
