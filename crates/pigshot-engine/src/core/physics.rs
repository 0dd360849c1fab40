use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::EngineResult;
use crate::api::types::EntityId;
use crate::components::animation::{SpinDirection, SpinState};
use crate::components::entity::{CollisionMode, Entity, Group};
use crate::core::collision::{approaching_bottom, hits_face, single_axis, spheres_overlap, Axis, Face};
use crate::core::scene::Scene;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Vertical clamp applied to free bodies that escape the level box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Highest allowed center y. Vertical speed is killed on contact.
    pub ceiling: f32,
    /// Lowest allowed center y. Vertical speed is reflected on contact.
    pub floor: f32,
}

/// Physics tunables. All speeds are per reference tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Fraction of horizontal speed lost per reference tick.
    pub air_resistance: f32,
    /// Gravity stops accelerating a body falling faster than this.
    pub terminal_fall_speed: f32,
    pub reference_fps: f32,
    pub max_dt_scale: f32,
    /// A vertical contact slower than this on both axes brings the mover to rest.
    pub rest_speed: f32,
    /// Velocity components at or below this snap to zero after a contact.
    pub velocity_floor: f32,
    /// Speed kept when the projectile bounces off world geometry.
    pub bounce_factor: f32,
    pub spin_threshold: f32,
    pub spin_budget_deg: f32,
    pub spin_step_deg: f32,
    pub spin_nudge: f32,
    /// Minimum projectile impact speed that hurts a target.
    pub damage_speed_threshold: f32,
    pub damage_scale: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    /// Flat damage dealt through the sphere path.
    pub sphere_damage: i32,
    /// Health below which a composite reveals its hurt overlay.
    pub hurt_threshold: i32,
    /// How far below a resting body to look for support.
    pub support_depth: f32,
    pub arena: Option<ArenaBounds>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            air_resistance: 0.2 / 15.0,
            terminal_fall_speed: 30.0,
            reference_fps: 60.0,
            max_dt_scale: 4.0,
            rest_speed: 7.5,
            velocity_floor: 2.0,
            bounce_factor: 1.0 / 1.2,
            spin_threshold: 15.0,
            spin_budget_deg: 90.0,
            spin_step_deg: 9.0,
            spin_nudge: 0.5,
            damage_speed_threshold: 1.0,
            damage_scale: 2.5,
            damage_min: 5.0,
            damage_max: 10.0,
            sphere_damage: 25,
            hurt_threshold: 60,
            support_depth: 1.0,
            arena: None,
        }
    }
}

impl PhysicsConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Health lost by a target struck at `speed`.
    pub fn damage_for(&self, speed: f32) -> i32 {
        (speed.abs() * self.damage_scale)
            .clamp(self.damage_min, self.damage_max)
            .round() as i32
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Elastic-collision coefficients for masses `ma` (mover) and `mb` (struck).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassRatios {
    /// `2·ma / (ma+mb)`
    pub c1: f32,
    /// `2·mb / (ma+mb)`
    pub c2: f32,
    /// `(ma−mb) / (ma+mb)`
    pub c3: f32,
}

impl MassRatios {
    /// All zero when the masses sum to zero.
    pub fn new(ma: f32, mb: f32) -> Self {
        let total = ma + mb;
        if total == 0.0 {
            return Self { c1: 0.0, c2: 0.0, c3: 0.0 };
        }
        Self {
            c1: 2.0 * ma / total,
            c2: 2.0 * mb / total,
            c3: (ma - mb) / total,
        }
    }
}

/// Something the resolver did that the rest of the engine may react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    Damaged { target: EntityId, amount: i32, health: i32 },
    /// Health dropped below the hurt threshold on this hit.
    Hurt { target: EntityId },
    Destroyed { target: EntityId },
    /// The projectile swept through a coin or goal.
    Collected { id: EntityId, group: Group },
    /// The projectile came down on top of `support`.
    Landed { mover: EntityId, support: EntityId },
    /// The projectile came to rest.
    Rested { id: EntityId },
}

/// Integrator and collision resolver for the `Free` group.
pub struct PhysicsWorld {
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    // -- Integration --

    /// Advance every simulated body by one tick, appending contact events.
    pub fn step_into(
        &self,
        scene: &mut Scene,
        projectile: Option<EntityId>,
        dt_scale: f32,
        events: &mut Vec<ContactEvent>,
    ) {
        let count = scene.group(Group::Free).len();
        for i in 0..count {
            let id = scene.group(Group::Free)[i];
            if !scene.entity(id).is_simulated() {
                continue;
            }
            self.clamp_to_arena(scene.entity_mut(id));

            if !scene.entity(id).airborne && !self.has_support(scene, id) {
                scene.entity_mut(id).airborne = true;
            }
            if !scene.entity(id).airborne {
                continue;
            }

            let vel = self.integrate_velocity(scene.entity_mut(id), dt_scale);

            let dx = vel.x * dt_scale;
            scene.entity_mut(id).pos.x += dx;
            self.resolve_motion(scene, id, Axis::X, dx, projectile, events);

            // The horizontal contact may have changed vy.
            let dy = scene.entity(id).vel.y * dt_scale;
            scene.entity_mut(id).pos.y += dy;
            self.resolve_motion(scene, id, Axis::Y, dy, projectile, events);
        }
    }

    /// Gravity (below terminal fall speed) and horizontal drag.
    pub fn integrate_velocity(&self, body: &mut Entity, dt_scale: f32) -> Vec2 {
        if body.vel.y > -self.config.terminal_fall_speed {
            body.vel.y -= self.config.gravity * dt_scale;
        }
        body.vel.x -= self.config.air_resistance * dt_scale * body.vel.x;
        body.vel
    }

    fn clamp_to_arena(&self, body: &mut Entity) {
        let Some(arena) = self.config.arena else { return };
        if body.pos.y > arena.ceiling {
            body.pos.y = arena.ceiling;
            body.vel.y = 0.0;
        }
        if body.pos.y < arena.floor {
            body.pos.y = arena.floor;
            body.vel.y = -body.vel.y;
        }
    }

    fn resolve_motion(
        &self,
        scene: &mut Scene,
        id: EntityId,
        axis: Axis,
        delta: f32,
        projectile: Option<EntityId>,
        events: &mut Vec<ContactEvent>,
    ) {
        if scene.entity(id).collision == CollisionMode::Sphere {
            let (dx, dy) = match axis {
                Axis::X => (delta, 0.0),
                Axis::Y => (0.0, delta),
            };
            // Only one axis is ever non-zero here.
            if let Err(err) = self.resolve_sphere(scene, id, dx, dy, projectile, events) {
                log::warn!("sphere resolution skipped: {err}");
            }
        } else {
            self.resolve_box(scene, id, axis, delta, projectile, events);
        }
    }

    // -- Queries --

    /// Whether anything solid sits directly under a body.
    pub fn has_support(&self, scene: &Scene, id: EntityId) -> bool {
        let Some(below) = scene.entity(id).aabb() else {
            return false;
        };
        let below = below.translated(Vec2::new(0.0, -self.config.support_depth));
        scene.iter_group(Group::Free).any(|other| {
            other.id != id
                && other.can_collide()
                && other.aabb().is_some_and(|b| approaching_bottom(&b, &below))
        })
    }

    // -- Box resolution --

    /// Resolve a single-axis displacement of `mover` against every free body.
    ///
    /// Every candidate is processed (not just the first) so that corner
    /// landings apply each correction.
    pub fn resolve_box(
        &self,
        scene: &mut Scene,
        mover_id: EntityId,
        axis: Axis,
        delta: f32,
        projectile: Option<EntityId>,
        events: &mut Vec<ContactEvent>,
    ) {
        let Some(face) = Face::of_motion(axis, delta) else {
            return;
        };
        let is_projectile = projectile == Some(mover_id);
        if is_projectile {
            collect_pickups(scene, mover_id, face, events);
        }

        let count = scene.group(Group::Free).len();
        for i in 0..count {
            let target_id = scene.group(Group::Free)[i];
            if target_id == mover_id {
                continue;
            }
            let (mover, target) = scene.pair_mut(mover_id, target_id);
            if mover.is_fixed() || !mover.visible || !target.can_collide() {
                continue;
            }
            let (Some(mbox), Some(tbox)) = (mover.aabb(), target.aabb()) else {
                continue;
            };
            if !hits_face(face, &tbox, &mbox) {
                continue;
            }

            let impact = mover.vel;
            self.exchange_impulse(mover, target, axis, is_projectile);

            axis.set(&mut mover.pos, face.contact_coordinate(&tbox, mbox.half));

            if axis == Axis::Y
                && impact.x.abs() <= self.config.rest_speed
                && impact.y.abs() <= self.config.rest_speed
            {
                mover.vel = Vec2::ZERO;
                mover.airborne = false;
                if is_projectile {
                    events.push(ContactEvent::Rested { id: mover_id });
                }
            }

            self.apply_friction(mover, target);

            if is_projectile && face == Face::Bottom {
                events.push(ContactEvent::Landed { mover: mover_id, support: target_id });
            }

            if is_projectile && !target.is_fixed() {
                let speed = impact.x.abs().max(impact.y.abs());
                if speed >= self.config.damage_speed_threshold {
                    let amount = self.config.damage_for(speed);
                    self.damage(target, amount, events);
                }
            }
        }
    }

    fn exchange_impulse(&self, mover: &mut Entity, target: &mut Entity, axis: Axis, is_projectile: bool) {
        let k = MassRatios::new(mover.mass, target.mass);
        let va = axis.of(mover.vel);
        let vb = axis.of(target.vel);

        if !target.is_fixed() {
            axis.set(&mut target.vel, k.c1 * va - k.c3 * vb);
            target.airborne = true;
            let (vx, vy) = (mover.vel.x, mover.vel.y);
            if is_projectile
                && target.spin.is_none()
                && (vx.abs() >= self.config.spin_threshold || vy.abs() >= self.config.spin_threshold)
            {
                let direction = if vx > 0.0 || vy > 0.0 {
                    SpinDirection::Clockwise
                } else {
                    SpinDirection::CounterClockwise
                };
                target.spin = Some(SpinState::new(direction, self.config.spin_budget_deg));
            }
        }

        if target.is_fixed() && is_projectile {
            axis.set(&mut mover.vel, -va * self.config.bounce_factor);
        } else if !is_projectile {
            axis.set(&mut mover.vel, k.c3 * va + k.c2 * vb);
        }
    }

    /// Each body is slowed by the other's friction, then tiny components snap to zero.
    fn apply_friction(&self, mover: &mut Entity, target: &mut Entity) {
        let floor = self.config.velocity_floor;
        mover.vel /= 1.0 + target.friction;
        mover.vel = snap_small(mover.vel, floor);
        if !target.is_fixed() {
            target.vel /= 1.0 + mover.friction;
            target.vel = snap_small(target.vel, floor);
        }
    }

    fn damage(&self, target: &mut Entity, amount: i32, events: &mut Vec<ContactEvent>) {
        if target.health <= 0 {
            return;
        }
        let was_healthy = target.health >= self.config.hurt_threshold;
        let killed = target.apply_damage(amount);
        log::debug!("{} took {} damage ({} left)", target.name, amount, target.health);
        events.push(ContactEvent::Damaged {
            target: target.id,
            amount,
            health: target.health,
        });
        if was_healthy && target.health < self.config.hurt_threshold {
            events.push(ContactEvent::Hurt { target: target.id });
        }
        if killed {
            events.push(ContactEvent::Destroyed { target: target.id });
        }
    }

    // -- Sphere resolution --

    /// Center-distance resolution for round bodies.
    ///
    /// Exactly one of `dx`/`dy` may be non-zero. Returns whether anything was hit.
    pub fn resolve_sphere(
        &self,
        scene: &mut Scene,
        mover_id: EntityId,
        dx: f32,
        dy: f32,
        projectile: Option<EntityId>,
        events: &mut Vec<ContactEvent>,
    ) -> EngineResult<bool> {
        let Some((axis, delta)) = single_axis(dx, dy)? else {
            return Ok(false);
        };
        let is_projectile = projectile == Some(mover_id);
        let mut collided = false;

        let count = scene.group(Group::Free).len();
        for i in 0..count {
            let target_id = scene.group(Group::Free)[i];
            if target_id == mover_id {
                continue;
            }
            let (mover, target) = scene.pair_mut(mover_id, target_id);
            if !target.can_collide() {
                continue;
            }
            let (Some(ra), Some(rb)) = (mover.shape.bounding_radius(), target.shape.bounding_radius()) else {
                continue;
            };
            if !spheres_overlap(mover.pos, ra, target.pos, rb) {
                continue;
            }

            let va = axis.of(mover.vel);
            if !target.is_fixed() {
                axis.set(&mut target.vel, va / 2.0);
                target.airborne = true;
            }
            if !collided {
                mover.pos -= axis.unit(delta);
            }
            match axis {
                Axis::X => mover.vel.x = -va / (1.0 + target.friction),
                Axis::Y => {
                    mover.vel.y = -va / 2.0;
                    if mover.vel.y.abs() <= self.config.rest_speed {
                        mover.vel = Vec2::ZERO;
                        mover.airborne = false;
                        if is_projectile {
                            events.push(ContactEvent::Rested { id: mover_id });
                        }
                    }
                }
            }
            collided = true;

            if is_projectile && !target.is_fixed() {
                self.damage(target, self.config.sphere_damage, events);
            }
        }
        Ok(collided)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn snap_small(v: Vec2, floor: f32) -> Vec2 {
    Vec2::new(
        if v.x.abs() <= floor { 0.0 } else { v.x },
        if v.y.abs() <= floor { 0.0 } else { v.y },
    )
}

/// Consume coins and goals the projectile sweeps through.
fn collect_pickups(scene: &mut Scene, mover_id: EntityId, face: Face, events: &mut Vec<ContactEvent>) {
    let Some(mbox) = scene.entity(mover_id).aabb() else {
        return;
    };
    for group in [Group::Coin, Group::Goal] {
        let count = scene.group(group).len();
        for i in 0..count {
            let id = scene.group(group)[i];
            let pickup = scene.entity_mut(id);
            if !pickup.can_collide() {
                continue;
            }
            if pickup.aabb().is_some_and(|b| hits_face(face, &b, &mbox)) {
                pickup.visible = false;
                log::info!("collected {}", pickup.name);
                events.push(ContactEvent::Collected { id, group });
            }
        }
    }
}

/// Whether `id` overlaps any other visible collider in the free group.
pub fn overlaps_any(scene: &Scene, id: EntityId) -> bool {
    let Some(mbox) = scene.entity(id).aabb() else {
        return false;
    };
    scene.iter_group(Group::Free).any(|other| {
        other.id != id && other.can_collide() && other.aabb().is_some_and(|b| b.overlaps(&mbox))
    })
}
