//! Launch controller.
//!
//! Two input adapters (held key, pointer drag) feed one shot computation.
//! The controller owns the round's state machine and its two wall-clock
//! timers; the integrator never sees any of this except the projectile's
//! initial pose and velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::animation::{MotionAnim, RecoilProfile};
use crate::components::entity::Group;
use crate::components::shape::Shape;
use crate::core::scene::Scene;
use crate::core::time::Deadline;
use crate::input::intent::LaunchSource;

/// Cannon geometry and launch tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Point the barrel turns around.
    pub pivot: [f32; 2],
    pub barrel_length: f32,
    /// Where the projectile waits between shots.
    pub spawn: [f32; 2],
    /// Cap on each velocity component.
    pub max_speed: f32,
    /// Speed at keyboard power 1.0.
    pub full_power_speed: f32,
    pub initial_power: f32,
    /// Keyboard power gained per reference tick while charging.
    pub charge_rate: f32,
    pub power_step: f32,
    pub angle_step_deg: f32,
    pub initial_angle_deg: f32,
    /// Pointer drag → speed: `offset * pointer_scale + pointer_bias`.
    pub pointer_scale: f32,
    pub pointer_bias: f32,
    /// Drag length that reads as full power on the gauge.
    pub pointer_max_drag: f32,
    pub gauge_max_width: f32,
    pub gauge_left: f32,
    pub recoil: RecoilProfile,
    /// Seconds a rested projectile waits before going back to the cannon.
    pub rest_delay_secs: f64,
    /// Seconds after launch when the round ends regardless.
    pub flight_timeout_secs: f64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            pivot: [-315.0, -210.0],
            barrel_length: 80.0,
            spawn: [-315.0, -240.0],
            max_speed: 30.0,
            full_power_speed: 100.0,
            initial_power: 0.1,
            charge_rate: 0.01,
            power_step: 0.1,
            angle_step_deg: 10.0,
            initial_angle_deg: 45.0,
            pointer_scale: 1.0 / 15.0,
            pointer_bias: 3.0,
            pointer_max_drag: (760.0f32 * 760.0 + 560.0 * 560.0).sqrt(),
            gauge_max_width: 160.0,
            gauge_left: -350.0,
            recoil: RecoilProfile::default(),
            rest_delay_secs: 0.5,
            flight_timeout_secs: 2.0,
        }
    }
}

impl LaunchConfig {
    pub fn pivot(&self) -> Vec2 {
        Vec2::from(self.pivot)
    }

    pub fn spawn(&self) -> Vec2 {
        Vec2::from(self.spawn)
    }
}

/// Entities the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchRig {
    pub projectile: EntityId,
    /// Turned to the launch angle while charging.
    pub barrel: Option<EntityId>,
    /// Shown while charging.
    pub aim_indicator: Option<EntityId>,
    /// Power bar, resized while charging.
    pub gauge: Option<EntityId>,
}

/// Round state. Auto-reset is the transition back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    Charging(LaunchSource),
    Launched,
    Resting,
}

/// Initial conditions handed to the projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchShot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle_deg: f32,
}

pub struct LaunchController {
    pub config: LaunchConfig,
    rig: Option<LaunchRig>,
    state: LaunchState,
    /// Fraction of full power, `[0, 1]`.
    power: f32,
    angle_deg: f32,
    /// Last pointer position in world space.
    aim: Vec2,
    rest_timer: Deadline,
    flight_timer: Deadline,
}

impl LaunchController {
    pub fn new(config: LaunchConfig) -> Self {
        let angle_deg = config.initial_angle_deg;
        Self {
            config,
            rig: None,
            state: LaunchState::Idle,
            power: 0.0,
            angle_deg,
            aim: Vec2::ZERO,
            rest_timer: Deadline::default(),
            flight_timer: Deadline::default(),
        }
    }

    pub fn set_rig(&mut self, rig: LaunchRig) {
        self.rig = Some(rig);
    }

    pub fn rig(&self) -> Option<LaunchRig> {
        self.rig
    }

    pub fn projectile(&self) -> Option<EntityId> {
        self.rig.map(|r| r.projectile)
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    // -- Charging --

    /// `Idle → Charging`. Ignored in any other state.
    pub fn begin(&mut self, scene: &mut Scene, source: LaunchSource) {
        let Some(rig) = self.rig else { return };
        if self.state != LaunchState::Idle {
            log::debug!("launch begin ignored in {:?}", self.state);
            return;
        }
        self.state = LaunchState::Charging(source);
        match source {
            LaunchSource::Keyboard => self.power = self.config.initial_power,
            LaunchSource::Pointer => self.follow_pointer(),
        }
        set_visible(scene, rig.aim_indicator, true);
        set_visible(scene, rig.gauge, true);
        self.refresh_rig(scene, &rig);
    }

    /// Track the pointer. Only steers the shot while pointer-charging.
    pub fn aim(&mut self, scene: &mut Scene, target: Vec2) {
        self.aim = target;
        if self.state == LaunchState::Charging(LaunchSource::Pointer) {
            self.follow_pointer();
            if let Some(rig) = self.rig {
                self.refresh_rig(scene, &rig);
            }
        }
    }

    pub fn step_power(&mut self, scene: &mut Scene, steps: i32) {
        if self.state != LaunchState::Charging(LaunchSource::Keyboard) {
            return;
        }
        self.power = (self.power + steps as f32 * self.config.power_step).clamp(0.0, 1.0);
        if let Some(rig) = self.rig {
            self.refresh_rig(scene, &rig);
        }
    }

    pub fn step_angle(&mut self, scene: &mut Scene, steps: i32) {
        if self.state != LaunchState::Charging(LaunchSource::Keyboard) {
            return;
        }
        self.angle_deg = (self.angle_deg + steps as f32 * self.config.angle_step_deg).clamp(0.0, 90.0);
        if let Some(rig) = self.rig {
            self.refresh_rig(scene, &rig);
        }
    }

    /// Per-tick work: keyboard power keeps charging while held.
    pub fn tick(&mut self, scene: &mut Scene, dt_scale: f32) {
        if self.state != LaunchState::Charging(LaunchSource::Keyboard) {
            return;
        }
        self.power = (self.power + self.config.charge_rate * dt_scale).min(1.0);
        if let Some(rig) = self.rig {
            self.refresh_rig(scene, &rig);
        }
    }

    fn follow_pointer(&mut self) {
        let offset = self.aim - self.config.pivot();
        self.angle_deg = if offset.x == 0.0 {
            90.0
        } else {
            (offset.y.abs() / offset.x.abs()).atan().to_degrees()
        };
        let max = self.config.pointer_max_drag;
        self.power = (offset.length_squared() / (max * max)).min(1.0);
    }

    fn refresh_rig(&self, scene: &mut Scene, rig: &LaunchRig) {
        let dir = direction(self.angle_deg);
        if let Some(barrel) = rig.barrel {
            let barrel = scene.entity_mut(barrel);
            barrel.rotation = self.angle_deg.to_radians();
            barrel.pos = self.config.pivot() + dir * (self.config.barrel_length / 2.0);
        }
        if let Some(gauge) = rig.gauge {
            let gauge = scene.entity_mut(gauge);
            let width = (self.power * self.config.gauge_max_width).min(self.config.gauge_max_width);
            let height = match gauge.shape {
                Shape::Rect { height, .. } => height,
                _ => 0.0,
            };
            gauge.shape = Shape::rect(width, height);
            gauge.pos.x = self.config.gauge_left + width / 2.0;
        }
    }

    // -- Release --

    /// Shot the current charge would fire.
    pub fn compute_shot(&self, source: LaunchSource) -> LaunchShot {
        let cfg = &self.config;
        let dir = direction(self.angle_deg);
        let max = Vec2::splat(cfg.max_speed);
        let velocity = match source {
            LaunchSource::Keyboard => (dir * self.power * cfg.full_power_speed).min(max),
            LaunchSource::Pointer => {
                let offset = self.aim - cfg.pivot();
                (offset * cfg.pointer_scale + Vec2::splat(cfg.pointer_bias)).clamp(-max, max)
            }
        };
        LaunchShot {
            position: cfg.pivot() + dir * cfg.barrel_length,
            velocity,
            angle_deg: self.angle_deg,
        }
    }

    /// `Charging → Launched`. Returns the shot, or `None` when nothing fired:
    /// not charging, or the projectile is still moving.
    pub fn release(&mut self, scene: &mut Scene, now: f64) -> Option<LaunchShot> {
        let rig = self.rig?;
        let LaunchState::Charging(source) = self.state else {
            log::debug!("launch release ignored in {:?}", self.state);
            return None;
        };
        set_visible(scene, rig.aim_indicator, false);
        set_visible(scene, rig.gauge, false);

        if scene.entity(rig.projectile).airborne {
            log::debug!("projectile still moving, shot dropped");
            self.state = LaunchState::Idle;
            return None;
        }

        let shot = self.compute_shot(source);
        let body = scene.entity_mut(rig.projectile);
        body.pos = shot.position;
        body.vel = shot.velocity;
        body.airborne = true;

        self.start_recoil(scene);
        self.state = LaunchState::Launched;
        self.rest_timer.cancel();
        self.flight_timer.cancel();
        self.flight_timer.arm(now, self.config.flight_timeout_secs);
        log::info!(
            "launched at {:.0}° with velocity ({:.1}, {:.1})",
            shot.angle_deg,
            shot.velocity.x,
            shot.velocity.y
        );
        Some(shot)
    }

    fn start_recoil(&self, scene: &mut Scene) {
        let count = scene.group(Group::Cannon).len();
        for i in 0..count {
            let id = scene.group(Group::Cannon)[i];
            let part = scene.entity_mut(id);
            part.pos += part.motion.cancel_recoil();
            part.motion = MotionAnim::recoil(&self.config.recoil);
        }
    }

    // -- Round end --

    /// `Launched → Resting`, arming the idle countdown.
    pub fn on_rested(&mut self, now: f64) {
        if self.state == LaunchState::Launched {
            self.state = LaunchState::Resting;
            self.rest_timer.arm(now, self.config.rest_delay_secs);
        }
    }

    /// Fire whichever round timer is due. Returns `true` if the round was reset.
    pub fn poll_timers(&mut self, scene: &mut Scene, now: f64) -> bool {
        if !matches!(self.state, LaunchState::Launched | LaunchState::Resting) {
            return false;
        }
        let settled = self.rest_timer.fire(now)
            && self
                .projectile()
                .is_some_and(|id| !scene.entity(id).airborne);
        let timed_out = self.flight_timer.fire(now);
        if settled || timed_out {
            log::info!("round over ({})", if settled { "rested" } else { "timeout" });
            self.reset(scene);
            return true;
        }
        false
    }

    /// Put everything back at rest. Safe to call in any state, any number of times.
    pub fn reset(&mut self, scene: &mut Scene) {
        self.state = LaunchState::Idle;
        self.rest_timer.cancel();
        self.flight_timer.cancel();
        let Some(rig) = self.rig else { return };

        let spawn = self.config.spawn();
        let body = scene.entity_mut(rig.projectile);
        body.pos = spawn;
        body.vel = Vec2::ZERO;
        body.rotation = 0.0;
        body.airborne = false;
        body.spin = None;

        set_visible(scene, rig.aim_indicator, false);
        set_visible(scene, rig.gauge, false);

        let count = scene.group(Group::Cannon).len();
        for i in 0..count {
            let id = scene.group(Group::Cannon)[i];
            let part = scene.entity_mut(id);
            part.pos += part.motion.cancel_recoil();
        }
    }
}

impl Default for LaunchController {
    fn default() -> Self {
        Self::new(LaunchConfig::default())
    }
}

fn direction(angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(cos, sin)
}

fn set_visible(scene: &mut Scene, id: Option<EntityId>, visible: bool) {
    if let Some(id) = id {
        scene.entity_mut(id).visible = visible;
    }
}
