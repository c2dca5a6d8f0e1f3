//! Declarative scene specification and its resolution into a scene graph.
//!
//! The specification is produced by an external loader (JSON on disk in the
//! shipped game). Mesh and texture tables are opaque here; nodes only carry
//! indices into them.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::{MeshRef, PlayerState, PlayerTuning};
use crate::constants::{PLAYER_AABB_MAX, PLAYER_AABB_MIN};
use crate::error::{Result, SceneError};
use crate::scene::{Node, NodeKind, Scene};
use crate::types::{Aabb, Transform};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSpec {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub meshes: Vec<serde_json::Value>,
    #[serde(default)]
    pub textures: Vec<serde_json::Value>,
}

impl SceneSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

/// One node entry of the specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    /// Type discriminator: `node`, `model`, `player`, `camera`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub translation: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
    pub mesh: Option<usize>,
    pub texture: Option<usize>,
    pub aabb: Option<Aabb>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,

    // Player tuning overrides.
    pub mouse_sensitivity: Option<f32>,
    pub max_speed: Option<f32>,
    pub friction: Option<f32>,
    pub acceleration: Option<f32>,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            kind: String::new(),
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            velocity: Vec3::ZERO,
            mesh: None,
            texture: None,
            aabb: None,
            children: Vec::new(),
            mouse_sensitivity: None,
            max_speed: None,
            friction: None,
            acceleration: None,
        }
    }
}

impl NodeSpec {
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    fn tuning(&self) -> PlayerTuning {
        let defaults = PlayerTuning::default();
        PlayerTuning {
            mouse_sensitivity: self.mouse_sensitivity.unwrap_or(defaults.mouse_sensitivity),
            max_speed: self.max_speed.unwrap_or(defaults.max_speed),
            friction: self.friction.unwrap_or(defaults.friction),
            acceleration: self.acceleration.unwrap_or(defaults.acceleration),
        }
    }
}

/// Resolves a [`SceneSpec`] into a [`Scene`].
pub struct SceneBuilder<'a> {
    spec: &'a SceneSpec,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(spec: &'a SceneSpec) -> Self {
        Self { spec }
    }

    /// Build the whole scene. Fails if any entry cannot be resolved or the
    /// scene has no player.
    pub fn build(&self) -> Result<Scene> {
        let mut scene = Scene::new();
        for node_spec in &self.spec.nodes {
            scene.add_node(self.create_node(node_spec)?);
        }
        if scene.player().is_none() {
            return Err(SceneError::MissingPlayer);
        }
        Ok(scene)
    }

    pub fn create_node(&self, spec: &NodeSpec) -> Result<Node> {
        match spec.kind.as_str() {
            "model" => {
                let mut node = Node::new(NodeKind::Model, spec.transform())
                    .with_velocity(spec.velocity);
                node.mesh = self.mesh_ref(spec)?;
                node.aabb = spec.aabb;
                self.add_children(&mut node, &spec.children)?;
                Ok(node)
            }
            "player" => {
                let camera_spec = spec.children.first().ok_or(SceneError::MissingCamera)?;
                let state = PlayerState {
                    tuning: spec.tuning(),
                    grounded: false,
                };
                let mut player = Node::new(NodeKind::Player(state), spec.transform())
                    .with_velocity(spec.velocity)
                    .with_aabb(
                        spec.aabb
                            .unwrap_or(Aabb::new(PLAYER_AABB_MIN, PLAYER_AABB_MAX)),
                    );
                player.mesh = self.mesh_ref(spec)?;
                player.add_child(Node::new(NodeKind::Camera, camera_spec.transform()));
                self.add_children(&mut player, &spec.children[1..])?;
                Ok(player)
            }
            "camera" => Ok(Node::new(NodeKind::Camera, spec.transform())),
            "node" => {
                let mut node = Node::new(NodeKind::Generic, spec.transform());
                node.aabb = spec.aabb;
                self.add_children(&mut node, &spec.children)?;
                Ok(node)
            }
            other => {
                log::warn!("unknown node type {other:?}, building a plain transform node");
                Ok(Node::new(NodeKind::Generic, spec.transform()))
            }
        }
    }

    fn add_children(&self, parent: &mut Node, children: &[NodeSpec]) -> Result<()> {
        for child in children {
            parent.add_child(self.create_node(child)?);
        }
        Ok(())
    }

    fn mesh_ref(&self, spec: &NodeSpec) -> Result<Option<MeshRef>> {
        let Some(mesh) = spec.mesh else {
            return Ok(None);
        };
        check_index("mesh", mesh, self.spec.meshes.len())?;
        if let Some(texture) = spec.texture {
            check_index("texture", texture, self.spec.textures.len())?;
        }
        Ok(Some(MeshRef {
            mesh,
            texture: spec.texture,
        }))
    }
}

fn check_index(kind: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(SceneError::IndexOutOfRange { kind, index, len })
    }
}
