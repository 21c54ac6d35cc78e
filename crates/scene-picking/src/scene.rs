//! Minimal scene graph for picking
//!
//! Nodes live in an arena indexed by [`NodeId`]; node 0 is the root. Only
//! what hit-testing needs is modelled: hierarchy, local transforms, names,
//! visibility and an optional pickable shape in local space.

use crate::ray::Ray;
use glam::{Affine3A, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation_y(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_rotation_y(angle);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Pickable geometry in the node's local space
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
    Mesh { triangles: Vec<[Vec3; 3]> },
}

impl Shape {
    /// Nearest hit parameter along a local-space ray
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Sphere { radius } => ray.intersect_sphere(Vec3::ZERO, *radius),
            Shape::Cuboid { half_extents } => ray.intersect_aabb(-*half_extents, *half_extents),
            Shape::Mesh { triangles } => triangles
                .iter()
                .filter_map(|tri| ray.intersect_triangle(*tri))
                .min_by(f32::total_cmp),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: Option<String>,
    pub transform: Transform,
    pub shape: Option<Shape>,
    /// Invisible nodes hide their whole subtree from picking
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode {
    pub fn new() -> Self {
        Self {
            name: None,
            transform: Transform::IDENTITY,
            shape: None,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::new().with_name("scene")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach `node` under `parent`. Returns `None` if `parent` does not exist.
    pub fn add(&mut self, parent: NodeId, mut node: SceneNode) -> Option<NodeId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rotate the whole scene about world +Y
    pub fn rotate_root_y(&mut self, angle: f32) {
        let root = &mut self.nodes[0].transform;
        root.rotation = (Quat::from_rotation_y(angle) * root.rotation).normalize();
    }

    /// Name every shaped node under `id` (inclusive), the way a model loader
    /// labels all meshes of a loaded file. Returns how many were named.
    pub fn tag_subtree(&mut self, id: NodeId, name: &str) -> usize {
        let mut tagged = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current.0) else {
                continue;
            };
            if node.shape.is_some() {
                node.name = Some(name.to_owned());
                tagged += 1;
            }
            stack.extend(node.children.iter().copied());
        }
        tagged
    }

    /// World transform of a node, composed from the root down
    pub fn world_transform(&self, id: NodeId) -> Option<Affine3A> {
        let mut node = self.node(id)?;
        let mut world = node.transform.to_affine();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            world = node.transform.to_affine() * world;
        }
        Some(world)
    }

    /// Nearest named node at or above `id`
    pub fn semantic_name(&self, id: NodeId) -> Option<&str> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            if let Some(name) = node.name.as_deref() {
                return Some(name);
            }
            current = node.parent;
        }
        None
    }

    /// Visit every visible node with its world transform, depth first.
    pub fn visit_visible(&self, mut visit: impl FnMut(NodeId, &SceneNode, &Affine3A)) {
        let mut stack = vec![(self.root(), Affine3A::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.to_affine();
            visit(id, node, &world);
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
    }
}
