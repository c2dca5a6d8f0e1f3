//! Level director: the procedural platform pool.
//!
//! A fixed number of platforms gives the illusion of an endless track:
//! whenever a platform scrolls past the recycle threshold it is removed and a
//! fresh one is spawned one separation behind the last-spawned platform.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use runner_core::components::{MeshRef, PlatformId};
use runner_core::constants::*;
use runner_core::events::GameEvent;
use runner_core::scene::{Node, NodeKind, Scene};
use runner_core::types::{round_to_precision, Aabb, Transform};

use crate::engine::RunConfig;

/// Everything needed to construct one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSpec {
    pub id: PlatformId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Probability of carrying a coin. Zero for the safe starting platforms.
    pub coin_chance: f64,
}

/// A coin to attach to a freshly spawned platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectibleSpec {
    /// Offset relative to the platform.
    pub offset: Vec3,
    pub rotation: Vec3,
}

/// Decide whether a platform gets a coin. Deterministic for a seeded RNG.
pub fn collectible_for(platform: &PlatformSpec, rng: &mut ChaCha8Rng) -> Option<CollectibleSpec> {
    if platform.coin_chance <= 0.0 {
        return None;
    }
    rng.gen_bool(platform.coin_chance.min(1.0))
        .then_some(CollectibleSpec {
            offset: COIN_OFFSET,
            rotation: COIN_ROTATION,
        })
}

/// Uniform sample in `[-half, half]`, rounded to the jitter precision.
fn jitter(rng: &mut ChaCha8Rng, half: f32) -> f32 {
    round_to_precision(rng.gen_range(-half..=half))
}

/// Bounded random offset for a spawned platform.
pub fn jitter_offset(rng: &mut ChaCha8Rng) -> Vec3 {
    Vec3::new(
        jitter(rng, JITTER_LATERAL),
        jitter(rng, JITTER_VERTICAL),
        jitter(rng, JITTER_TRAVEL),
    )
}

/// Build the scene node for a platform, with its coin if it has one.
/// The bounding box is expressed in already-scaled units.
pub fn platform_node(spec: &PlatformSpec, collectible: Option<&CollectibleSpec>) -> Node {
    let transform = Transform {
        translation: spec.position,
        rotation: Vec3::ZERO,
        scale: PLATFORM_SCALE,
    };
    let mut node = Node::new(NodeKind::Platform(spec.id), transform)
        .with_velocity(spec.velocity)
        .with_aabb(Aabb::new(PLATFORM_AABB_MIN, PLATFORM_AABB_MAX))
        .with_mesh(MeshRef {
            mesh: PLATFORM_MESH,
            texture: Some(PLATFORM_TEXTURE),
        });

    if let Some(coin) = collectible {
        let coin_transform = Transform {
            translation: coin.offset,
            rotation: coin.rotation,
            scale: Vec3::ONE,
        };
        node.add_child(
            Node::new(NodeKind::Coin, coin_transform)
                .with_aabb(Aabb::new(
                    Vec3::splat(-COIN_HALF_EXTENT),
                    Vec3::splat(COIN_HALF_EXTENT),
                ))
                .with_mesh(MeshRef {
                    mesh: COIN_MESH,
                    texture: Some(COIN_TEXTURE),
                }),
        );
    }
    node
}

/// Pool state for one run.
#[derive(Debug, Clone)]
pub struct Level {
    pub pool_size: usize,
    pub stationary_prefix: usize,
    pub separation: f32,
    pub conveyor_speed: f32,
    pub recycle_threshold: f32,
    pub coin_probability: f64,
    /// Ids issued so far; the next id is always `platform_count + 1`.
    platform_count: u32,
    /// Most recently spawned platform and its travel-axis position at spawn.
    last_spawned: Option<(PlatformId, f32)>,
}

impl Level {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            pool_size: config.pool_size,
            stationary_prefix: config.stationary_prefix,
            separation: config.separation,
            conveyor_speed: config.conveyor_speed,
            recycle_threshold: config.recycle_threshold,
            coin_probability: config.coin_probability.clamp(0.0, 1.0),
            platform_count: 0,
            last_spawned: None,
        }
    }

    /// Populate the initial run of platforms. All start stationary; the
    /// leading `stationary_prefix` are also unjittered and coin-free.
    pub fn build(&mut self, scene: &mut Scene, rng: &mut ChaCha8Rng) {
        for i in 0..self.pool_size {
            let base = Vec3::new(0.0, 0.0, i as f32 * -self.separation);
            let eligible = i >= self.stationary_prefix;
            self.spawn_platform(scene, rng, base, eligible, Vec3::ZERO);
        }
        log::info!(
            "level built: {} platforms, separation {}",
            self.pool_size,
            self.separation
        );
    }

    /// Replace every platform past the recycle threshold.
    ///
    /// The expired ids are collected before any removal, so the scene is
    /// never mutated while it is being walked.
    pub fn recycle(&mut self, scene: &mut Scene, rng: &mut ChaCha8Rng) -> Vec<GameEvent> {
        let expired: Vec<PlatformId> = scene
            .platforms()
            .filter(|p| p.transform.translation.z > self.recycle_threshold)
            .filter_map(Node::platform_id)
            .collect();

        let mut events = Vec::with_capacity(expired.len());
        for retired in expired {
            let z = self.last_spawned_z(scene) - self.separation;
            if scene.remove_platform(retired).is_none() {
                continue;
            }
            let velocity = Vec3::new(0.0, 0.0, self.conveyor_speed);
            let (spawned, position, has_coin) =
                self.spawn_platform(scene, rng, Vec3::new(0.0, 0.0, z), true, velocity);
            log::debug!("recycled {retired} -> {spawned} at {position} (coin: {has_coin})");
            events.push(GameEvent::PlatformRecycled {
                retired,
                spawned,
                position,
                has_coin,
            });
        }
        events
    }

    /// Broadcast conveyor motion to every live platform. Idempotent.
    pub fn set_moving(&self, scene: &mut Scene, moving: bool) {
        let speed = if moving { self.conveyor_speed } else { 0.0 };
        for platform in scene.platforms_mut() {
            platform.velocity.z = speed;
        }
    }

    /// Current travel-axis position of the last-spawned platform, falling
    /// back to where it was spawned if it is no longer live.
    pub fn last_spawned_z(&self, scene: &Scene) -> f32 {
        match self.last_spawned {
            Some((id, spawn_z)) => scene
                .platform(id)
                .map(|p| p.transform.translation.z)
                .unwrap_or(spawn_z),
            None => 0.0,
        }
    }

    pub fn last_spawned(&self) -> Option<PlatformId> {
        self.last_spawned.map(|(id, _)| id)
    }

    /// Number of ids issued so far.
    pub fn platform_count(&self) -> u32 {
        self.platform_count
    }

    fn next_id(&mut self) -> PlatformId {
        self.platform_count += 1;
        PlatformId(self.platform_count)
    }

    /// Spawn one platform at `base` (lateral and vertical axes at zero),
    /// jittered and coin-eligible if `eligible`.
    pub fn spawn_platform(
        &mut self,
        scene: &mut Scene,
        rng: &mut ChaCha8Rng,
        base: Vec3,
        eligible: bool,
        velocity: Vec3,
    ) -> (PlatformId, Vec3, bool) {
        let offset = if eligible {
            jitter_offset(rng)
        } else {
            Vec3::ZERO
        };
        let spec = PlatformSpec {
            id: self.next_id(),
            position: base + offset + Vec3::new(0.0, PLATFORM_BASE_Y, 0.0),
            velocity,
            coin_chance: if eligible { self.coin_probability } else { 0.0 },
        };
        let collectible = collectible_for(&spec, rng);

        scene.add_node(platform_node(&spec, collectible.as_ref()));
        self.last_spawned = Some((spec.id, spec.position.z));
        (spec.id, spec.position, collectible.is_some())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(9)
    }

    #[test]
    fn jitter_stays_in_bounds_and_rounded() {
        let mut rng = rng();
        for _ in 0..1000 {
            let o = jitter_offset(&mut rng);
            assert!(o.x.abs() <= JITTER_LATERAL);
            assert!(o.y.abs() <= JITTER_VERTICAL);
            assert!(o.z.abs() <= JITTER_TRAVEL);
            for v in [o.x, o.y, o.z] {
                assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-3, "{v} not rounded");
            }
        }
    }

    #[test]
    fn zero_chance_never_spawns_coin() {
        let mut rng = rng();
        let spec = PlatformSpec {
            id: PlatformId(1),
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            coin_chance: 0.0,
        };
        assert!((0..100).all(|_| collectible_for(&spec, &mut rng).is_none()));
    }

    #[test]
    fn collectible_is_deterministic_for_seed() {
        let spec = PlatformSpec {
            id: PlatformId(1),
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            coin_chance: 0.4,
        };
        let mut a = rng();
        let mut b = rng();
        for _ in 0..200 {
            assert_eq!(collectible_for(&spec, &mut a), collectible_for(&spec, &mut b));
        }
    }

    #[test]
    fn platform_node_attaches_single_coin() {
        let spec = PlatformSpec {
            id: PlatformId(4),
            position: Vec3::new(0.0, -0.2, -12.0),
            velocity: Vec3::new(0.0, 0.0, 3.0),
            coin_chance: 1.0,
        };
        let coin = CollectibleSpec {
            offset: COIN_OFFSET,
            rotation: COIN_ROTATION,
        };
        let node = platform_node(&spec, Some(&coin));
        assert_eq!(node.platform_id(), Some(PlatformId(4)));
        assert_eq!(node.children.len(), 1);
        let child = node.coin().expect("coin child");
        assert_eq!(child.transform.translation, COIN_OFFSET);
        assert_eq!(node.velocity.z, 3.0);
    }

    #[test]
    fn build_places_prefix_without_jitter() {
        let config = RunConfig::default();
        let mut level = Level::new(&config);
        let mut scene = Scene::new();
        level.build(&mut scene, &mut rng());

        assert_eq!(scene.platform_count(), config.pool_size);
        for (i, p) in scene.platforms().enumerate().take(config.stationary_prefix) {
            let expected = Vec3::new(0.0, PLATFORM_BASE_Y, i as f32 * -config.separation);
            assert_eq!(p.transform.translation, expected);
            assert!(p.coin().is_none());
        }
        assert!(scene.platforms().all(|p| p.velocity == Vec3::ZERO));
        assert_eq!(level.last_spawned(), Some(PlatformId(config.pool_size as u32)));
    }
}
