use glam::Vec2;

use crate::api::error::{EngineError, EngineResult};
use crate::api::types::{EntityId, GameEvent};
use crate::assets::level::{BodyDesc, LevelManifest};
use crate::components::entity::Pose;
use crate::components::shape::Shape;
use crate::core::composite::CompositeGraph;
use crate::core::physics::{ContactEvent, PhysicsConfig, PhysicsWorld};
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::input::intent::Intent;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{Camera2D, CameraConfig};
use crate::renderer::instance::PoseBuffer;
use crate::systems::animation::{tick_motion, tick_spins};
use crate::systems::launch::{LaunchConfig, LaunchController, LaunchRig, LaunchState};
use crate::systems::render::build_pose_buffer;
use crate::systems::spring::SpringChain;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Expected number of entities (default: 128).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    pub physics: PhysicsConfig,
    pub launch: LaunchConfig,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 128,
            max_events: 32,
            physics: PhysicsConfig::default(),
            launch: LaunchConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the world: load the level, register extra bodies.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Translate this frame's input into intents. The runner steps the
    /// simulation right after.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    pub launcher: LaunchController,
    pub springs: Vec<SpringChain>,
    pub composites: CompositeGraph,
    pub camera: Camera2D,
    pub clock: FrameClock,
    pub events: Vec<GameEvent>,
    contacts: Vec<ContactEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        let mut camera_config = config.camera;
        camera_config.half_extents = [config.world_width / 2.0, config.world_height / 2.0];
        Self {
            scene: Scene::with_capacity(config.max_instances),
            clock: FrameClock::new(config.physics.reference_fps, config.physics.max_dt_scale),
            physics: PhysicsWorld::new(config.physics.clone()),
            launcher: LaunchController::new(config.launch.clone()),
            springs: Vec::new(),
            composites: CompositeGraph::new(),
            camera: Camera2D::new(camera_config),
            events: Vec::with_capacity(config.max_events),
            contacts: Vec::new(),
        }
    }

    // -- World authoring --

    /// Register one body. A composite part's parent must already exist.
    pub fn create_body(&mut self, desc: &BodyDesc) -> EngineResult<EntityId> {
        let parent = match &desc.parent {
            Some(parent) => Some(self.scene.lookup(parent).map_err(|_| EngineError::UnknownParent {
                child: desc.name.clone(),
                parent: parent.clone(),
            })?),
            None => None,
        };
        let id = self.scene.spawn(desc.to_entity())?;
        if let Some(root) = parent {
            if desc.hurt_overlay {
                self.composites.set_hurt_overlay(root, id);
            } else {
                self.composites.attach(root, id);
            }
        }
        Ok(id)
    }

    /// Register every body, spring chain and the launch rig of a level.
    pub fn load_level(&mut self, level: &LevelManifest) -> EngineResult<()> {
        for desc in &level.bodies {
            self.create_body(desc)?;
        }

        for spring in &level.springs {
            let mut chain = SpringChain::new(self.scene.lookup(&spring.trigger)?, spring.depth);
            for link in &spring.links {
                chain = chain.with_link(self.scene.lookup(&link.name)?, link.mode);
            }
            if let Some(goal) = &spring.goal {
                chain = chain.with_goal(self.scene.lookup(goal)?);
            }
            self.springs.push(chain);
        }

        if let Some(rig) = &level.rig {
            let optional = |name: &Option<String>| -> EngineResult<Option<EntityId>> {
                name.as_deref().map(|n| self.scene.lookup(n)).transpose()
            };
            let rig = LaunchRig {
                projectile: self.scene.lookup(&rig.projectile)?,
                barrel: optional(&rig.barrel)?,
                aim_indicator: optional(&rig.aim_indicator)?,
                gauge: optional(&rig.gauge)?,
            };
            self.launcher.set_rig(rig);
        }

        log::info!(
            "level loaded: {} entities, {} composites, {} springs",
            self.scene.len(),
            self.composites.len(),
            self.springs.len()
        );
        Ok(())
    }

    pub fn load_level_json(&mut self, json: &str) -> EngineResult<()> {
        let level = LevelManifest::from_json(json)?;
        self.load_level(&level)
    }

    // -- Intents --

    /// Apply one decoded player intent.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::LaunchBegin(source) => self.launcher.begin(&mut self.scene, source),
            Intent::Aim(target) => self.launcher.aim(&mut self.scene, target),
            Intent::PowerStep(steps) => self.launcher.step_power(&mut self.scene, steps),
            Intent::AngleStep(steps) => self.launcher.step_angle(&mut self.scene, steps),
            Intent::LaunchEnd => {
                if let Some(shot) = self.launcher.release(&mut self.scene, self.clock.now()) {
                    self.events
                        .push(GameEvent::launched(shot.velocity.x, shot.velocity.y, shot.angle_deg));
                }
            }
            Intent::Pan(delta) => self.camera.pan(delta),
            Intent::Zoom(steps) => self.camera.zoom_by(steps),
            Intent::Reset => {
                log::info!("reset");
                self.launcher.reset(&mut self.scene);
                self.events.push(GameEvent::reset());
            }
        }
    }

    // -- Simulation --

    /// Advance the world by one frame of `frame_dt` seconds.
    pub fn step(&mut self, frame_dt: f32) {
        let dt_scale = self.clock.advance(frame_dt);
        let now = self.clock.now();

        self.launcher.tick(&mut self.scene, dt_scale);

        let mut contacts = std::mem::take(&mut self.contacts);
        contacts.clear();
        self.physics
            .step_into(&mut self.scene, self.launcher.projectile(), dt_scale, &mut contacts);
        for contact in &contacts {
            self.handle_contact(*contact, now);
        }
        self.contacts = contacts;

        tick_spins(&mut self.scene, &self.physics.config);
        for id in tick_motion(&mut self.scene, &self.launcher.config.recoil) {
            log::debug!("{} settled", self.scene.entity(id).name);
        }
        for spring in &mut self.springs {
            if let Some(goal) = spring.poll_complete(&mut self.scene) {
                self.events.push(GameEvent::goal_revealed(goal));
            }
        }

        if self.launcher.poll_timers(&mut self.scene, now) {
            self.events.push(GameEvent::reset());
        }
    }

    fn handle_contact(&mut self, contact: ContactEvent, now: f64) {
        match contact {
            ContactEvent::Damaged { target, amount, health } => {
                self.events.push(GameEvent::damaged(target, amount as f32, health));
            }
            ContactEvent::Hurt { target } => {
                if self.composites.reveal_hurt(&mut self.scene, target) {
                    log::info!("{} is hurt", self.scene.entity(target).name);
                }
            }
            ContactEvent::Destroyed { target } => {
                log::info!("{} destroyed", self.scene.entity(target).name);
                self.events.push(GameEvent::destroyed(target));
            }
            ContactEvent::Collected { id, .. } => {
                self.events.push(GameEvent::collected(id));
            }
            ContactEvent::Landed { support, .. } => {
                for spring in &mut self.springs {
                    spring.on_landed(&mut self.scene, support);
                }
            }
            ContactEvent::Rested { .. } => {
                log::debug!("projectile at rest");
                self.launcher.on_rested(now);
            }
        }
    }

    pub fn launch_state(&self) -> LaunchState {
        self.launcher.state()
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    // -- Read-only queries --

    /// World pose of a named entity (parts resolved through their root).
    pub fn read_pose(&self, name: &str) -> EngineResult<Pose> {
        let id = self.scene.lookup(name)?;
        Ok(self.composites.world_pose(&self.scene, id))
    }

    /// Whether a named entity is on screen.
    pub fn read_visible(&self, name: &str) -> EngineResult<bool> {
        let id = self.scene.lookup(name)?;
        Ok(self.composites.is_shown(&self.scene, id))
    }

    pub fn read_shape(&self, name: &str) -> EngineResult<Shape> {
        let id = self.scene.lookup(name)?;
        Ok(self.scene.entity(id).shape)
    }

    /// Write every shown entity's pose into `buffer`.
    pub fn build_poses(&self, buffer: &mut PoseBuffer) {
        build_pose_buffer(&self.scene, &self.composites, buffer);
    }

    /// Convert a point in normalized view coordinates to world space.
    pub fn view_to_world(&self, ndc: Vec2) -> Vec2 {
        self.camera.view_to_world(ndc)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
