//! Scene graph stored as an arena of nodes.
//!
//! Nodes are addressed by [`NodeId`]. Each node owns the list of its
//! children's ids and holds a plain parent index used only for walking up
//! the tree. A node with a [`Primitive`] is renderable; a node without one
//! only groups and transforms its children.

use prism_math::{Aabb, Interval, Mat4Ext, Ray, Transform, Vec3};

use crate::{Intersection, Intersections, Material, SceneError, SceneResult, Shape};

/// Stable handle to a node inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shape geometry paired with the material it is shaded with.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub struct Node {
    transform: Transform,
    primitive: Option<Primitive>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Local-space bounds of this node and its whole subtree
    bounds: Aabb,
}

impl Node {
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn primitive(&self) -> Option<&Primitive> {
        self.primitive.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn is_group(&self) -> bool {
        self.primitive.is_none()
    }
}

/// Arena-backed tree of groups and primitives.
///
/// Built once before rendering; every query method takes `&self`, so a
/// finished graph can be shared across render threads without locking.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty grouping node.
    pub fn add_group(&mut self, transform: Transform) -> NodeId {
        self.push(transform, None)
    }

    /// Add a renderable node.
    pub fn add_primitive(&mut self, shape: Shape, material: Material, transform: Transform) -> NodeId {
        self.push(transform, Some(Primitive { shape, material }))
    }

    fn push(&mut self, transform: Transform, primitive: Option<Primitive>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let bounds = primitive
            .as_ref()
            .map_or(Aabb::EMPTY, |p| p.shape.bounding_box());
        self.nodes.push(Node {
            transform,
            primitive,
            parent: None,
            children: Vec::new(),
            bounds,
        });
        id
    }

    /// Attach `child` under `parent`.
    ///
    /// Fails if either id is unknown, if `child` already has a parent, or if
    /// `child` is `parent` itself or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.node(parent)?;
        let child_node = self.node(child)?;

        if let Some(existing) = child_node.parent {
            return Err(SceneError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(SceneError::Cycle { parent, child });
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.refresh_bounds(parent);

        log::debug!("Attached node {} under {}", child.0, parent.0);
        Ok(())
    }

    /// Replace a node's transform.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> SceneResult<()> {
        self.node(id)?;
        self.nodes[id.0].transform = transform;
        if let Some(parent) = self.nodes[id.0].parent {
            self.refresh_bounds(parent);
        }
        Ok(())
    }

    /// Replace a primitive's shape. Groups have no shape and are rejected.
    pub fn set_shape(&mut self, id: NodeId, shape: Shape) -> SceneResult<()> {
        match self.nodes.get_mut(id.0).and_then(|node| node.primitive.as_mut()) {
            Some(primitive) => primitive.shape = shape,
            None => return Err(SceneError::UnknownNode(id)),
        }
        self.refresh_bounds(id);
        Ok(())
    }

    /// Mutable access to a primitive's material, for scene setup.
    pub fn material_mut(&mut self, id: NodeId) -> Option<&mut Material> {
        self.nodes
            .get_mut(id.0)
            .and_then(|node| node.primitive.as_mut())
            .map(|primitive| &mut primitive.material)
    }

    pub fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn material(&self, id: NodeId) -> Option<&Material> {
        self.nodes
            .get(id.0)
            .and_then(|node| node.primitive.as_ref())
            .map(|primitive| &primitive.material)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with no parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index))
    }

    /// Walk from the parent of `id` up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.nodes.get(id.0).and_then(|node| node.parent);
        std::iter::successors(first, move |current| self.nodes[current.0].parent)
    }

    // Bounds only depend on a node's own shape and its children, so a change
    // has to be pushed up through every ancestor.
    fn refresh_bounds(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            self.nodes[id.0].bounds = self.compute_bounds(id);
            current = self.nodes[id.0].parent;
        }
    }

    fn compute_bounds(&self, id: NodeId) -> Aabb {
        let node = &self.nodes[id.0];
        let own = node
            .primitive
            .as_ref()
            .map_or(Aabb::EMPTY, |p| p.shape.bounding_box());

        node.children.iter().fold(own, |acc, &child| {
            let child = &self.nodes[child.0];
            let mapped = child.transform.matrix().transform_aabb(&child.bounds);
            Aabb::surrounding(&acc, &mapped)
        })
    }

    /// Map a world-space point into the local space of `id`.
    ///
    /// Ancestors are undone first, root to node, then the node's own
    /// transform.
    pub fn point_to_object_space(&self, id: NodeId, point: Vec3) -> Vec3 {
        let node = &self.nodes[id.0];
        let point = match node.parent {
            Some(parent) => self.point_to_object_space(parent, point),
            None => point,
        };
        node.transform.point_to_local(point)
    }

    /// Map a point in the local space of `id` out to world space.
    pub fn point_to_world_space(&self, id: NodeId, point: Vec3) -> Vec3 {
        let node = &self.nodes[id.0];
        let point = node.transform.point_to_parent(point);
        match node.parent {
            Some(parent) => self.point_to_world_space(parent, point),
            None => point,
        }
    }

    /// Map a local-space normal to a unit world-space normal.
    pub fn normal_vector_to_world_space(&self, id: NodeId, normal: Vec3) -> Vec3 {
        self.normal_to_root(id, normal).normalize_or_zero()
    }

    // Unnormalized until the outermost level; non-uniform scales on
    // intermediate nodes would otherwise skew the result.
    fn normal_to_root(&self, id: NodeId, normal: Vec3) -> Vec3 {
        let node = &self.nodes[id.0];
        let normal = node.transform.normal_to_parent(normal);
        match node.parent {
            Some(parent) => self.normal_to_root(parent, normal),
            None => normal,
        }
    }

    /// World-space surface normal of a primitive at a world-space point.
    ///
    /// Groups have no surface and yield `Vec3::ZERO`.
    pub fn normal_at(&self, id: NodeId, world_point: Vec3) -> Vec3 {
        match &self.nodes[id.0].primitive {
            Some(primitive) => {
                let local_point = self.point_to_object_space(id, world_point);
                let local_normal = primitive.shape.local_normal_at(local_point);
                self.normal_vector_to_world_space(id, local_normal)
            }
            None => Vec3::ZERO,
        }
    }

    /// Intersect a ray given in the parent space of `id` with that subtree.
    pub fn intersect(&self, id: NodeId, ray: &Ray) -> Intersections {
        let mut hits = Vec::new();
        self.collect(id, ray, &mut hits);
        Intersections::from_vec(hits)
    }

    /// Intersect a world-space ray with every root subtree.
    pub fn intersect_all(&self, ray: &Ray) -> Intersections {
        let mut hits = Vec::new();
        for root in self.roots() {
            self.collect(root, ray, &mut hits);
        }
        Intersections::from_vec(hits)
    }

    fn collect(&self, id: NodeId, ray: &Ray, hits: &mut Vec<Intersection>) {
        let node = &self.nodes[id.0];
        let local = ray.transform(node.transform.inverse());

        // Both the ray and the cached bounds are in this node's local space.
        if !node.bounds.hit(&local, Interval::UNIVERSE) {
            return;
        }

        if let Some(primitive) = &node.primitive {
            hits.extend(
                primitive
                    .shape
                    .local_intersect(&local)
                    .into_iter()
                    .map(|t| Intersection::new(t, id)),
            );
        }
        for &child in &node.children {
            self.collect(child, &local, hits);
        }
    }
}
