//! Scene graph: a forest of owned transform nodes.
//!
//! A node exclusively owns its children, so the graph is a tree by
//! construction and traversal always terminates. Positional game logic
//! (collision, recycling) only looks at root nodes, whose local translation
//! is already their world position.

use glam::{Mat4, Vec3};

use crate::components::{MeshRef, PlatformId, PlayerState};
use crate::types::{Aabb, Transform};

/// What a node is, inspected by tag rather than by runtime type.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-only node; also the fallback for unrecognised spec entries.
    Generic,
    /// Renderable static model.
    Model,
    Camera,
    Player(PlayerState),
    Platform(PlatformId),
    Coin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub transform: Transform,
    pub velocity: Vec3,
    /// Bounding box in local space.
    pub aabb: Option<Aabb>,
    pub mesh: Option<MeshRef>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, transform: Transform) -> Self {
        Self {
            kind,
            transform,
            velocity: Vec3::ZERO,
            aabb: None,
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_aabb(mut self, aabb: Aabb) -> Self {
        self.aabb = Some(aabb);
        self
    }

    pub fn with_mesh(mut self, mesh: MeshRef) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Append a child, taking ownership of it.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Depth-first walk: `before` on this node, then each child in order, then `after`.
    pub fn traverse<B, A>(&self, before: &mut B, after: &mut A)
    where
        B: FnMut(&Node),
        A: FnMut(&Node),
    {
        before(self);
        for child in &self.children {
            child.traverse(before, after);
        }
        after(self);
    }

    /// Mutable form of [`Node::traverse`]. Callbacks may edit node data but
    /// cannot add or remove siblings of the node being visited.
    pub fn traverse_mut<B, A>(&mut self, before: &mut B, after: &mut A)
    where
        B: FnMut(&mut Node),
        A: FnMut(&mut Node),
    {
        before(self);
        for child in &mut self.children {
            child.traverse_mut(before, after);
        }
        after(self);
    }

    /// Walk the subtree with each node's world matrix (`parent * local`).
    pub fn traverse_world<F>(&self, parent: Mat4, f: &mut F)
    where
        F: FnMut(&Node, Mat4),
    {
        let world = parent * self.local_matrix();
        f(self, world);
        for child in &self.children {
            child.traverse_world(world, f);
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn platform_id(&self) -> Option<PlatformId> {
        match self.kind {
            NodeKind::Platform(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, NodeKind::Player(_))
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            NodeKind::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            NodeKind::Player(state) => Some(state),
            _ => None,
        }
    }

    /// The first child, if it is a camera.
    pub fn camera(&self) -> Option<&Node> {
        self.children
            .first()
            .filter(|child| child.kind == NodeKind::Camera)
    }

    pub fn camera_mut(&mut self) -> Option<&mut Node> {
        self.children
            .first_mut()
            .filter(|child| child.kind == NodeKind::Camera)
    }

    /// The coin attached to this node, if any.
    pub fn coin(&self) -> Option<&Node> {
        self.children.iter().find(|child| child.kind == NodeKind::Coin)
    }

    /// Local box moved to the node's translation. Only meaningful for root nodes.
    pub fn world_aabb(&self) -> Option<Aabb> {
        self.aabb.map(|aabb| aabb.translated(self.transform.translation))
    }
}

/// Ordered collection of root nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a root node.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove the first root platform with `id` and return it.
    /// A miss is tolerated: the node may already have been detached.
    pub fn remove_platform(&mut self, id: PlatformId) -> Option<Node> {
        match self.nodes.iter().position(|n| n.platform_id() == Some(id)) {
            Some(index) => Some(self.nodes.remove(index)),
            None => {
                log::warn!("remove of unknown platform {id} ignored");
                None
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Traverse every root in insertion order.
    pub fn traverse<B, A>(&self, mut before: B, mut after: A)
    where
        B: FnMut(&Node),
        A: FnMut(&Node),
    {
        for node in &self.nodes {
            node.traverse(&mut before, &mut after);
        }
    }

    /// Pre-order visit only.
    pub fn visit<F>(&self, f: F)
    where
        F: FnMut(&Node),
    {
        self.traverse(f, |_| {});
    }

    pub fn traverse_mut<B, A>(&mut self, mut before: B, mut after: A)
    where
        B: FnMut(&mut Node),
        A: FnMut(&mut Node),
    {
        for node in &mut self.nodes {
            node.traverse_mut(&mut before, &mut after);
        }
    }

    /// Visit every node with its composed world matrix.
    pub fn traverse_world<F>(&self, mut f: F)
    where
        F: FnMut(&Node, Mat4),
    {
        for node in &self.nodes {
            node.traverse_world(Mat4::IDENTITY, &mut f);
        }
    }

    pub fn platforms(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.platform_id().is_some())
    }

    pub fn platforms_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut().filter(|n| n.platform_id().is_some())
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.platform_id() == Some(id))
    }

    pub fn platform_count(&self) -> usize {
        self.platforms().count()
    }

    pub fn player(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.is_player())
    }

    pub fn camera(&self) -> Option<&Node> {
        self.player().and_then(Node::camera)
    }

    /// Total node count across all subtrees.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_| count += 1);
        count
    }
}
