use pigshot_engine::{CameraUniform, EngineContext, EngineResult, Game, GameConfig, InputEvent, InputQueue, PoseBuffer};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `pig-range`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    pose_buffer: PoseBuffer,
    camera: CameraUniform,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let ctx = EngineContext::with_config(&config);
        Self {
            camera: ctx.camera.uniform(),
            ctx,
            pose_buffer: PoseBuffer::with_capacity(config.max_instances),
            input: InputQueue::new(),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.publish();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace the current world with a level manifest. A rejected manifest
    /// leaves the running world untouched.
    pub fn load_level(&mut self, json: &str) -> EngineResult<()> {
        let mut ctx = EngineContext::with_config(&self.config);
        ctx.load_level_json(json)?;
        self.ctx = ctx;
        self.publish();
        Ok(())
    }

    /// Run one frame: decode input, step the world, publish poses.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();
        self.ctx.step(dt);

        self.publish();
    }

    fn publish(&mut self) {
        self.ctx.build_poses(&mut self.pose_buffer);
        self.camera = self.ctx.camera.uniform();
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for host-side reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.pose_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.pose_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera.projection.as_ptr() as *const f32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigshot_engine::Intent;

    const LEVEL: &str = r#"{
        "bodies": [
            { "name": "floor", "kind": "fixed", "mass": 10000, "pos": [0, -300],
              "shape": { "kind": "rect", "width": 800, "height": 60 } },
            { "name": "crate", "pos": [0, 0], "shape": { "kind": "rect", "width": 20, "height": 20 } }
        ]
    }"#;

    struct FallingCrate;

    impl Game for FallingCrate {
        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.load_level_json(LEVEL).unwrap();
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            for event in input.iter() {
                if let InputEvent::KeyDown { .. } = event {
                    ctx.apply(Intent::Reset);
                }
            }
        }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(FallingCrate);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.instance_count(), 0);
        assert_eq!(runner.context().clock.now(), 0.0);
    }

    #[test]
    fn tick_steps_world_and_publishes_poses() {
        let mut runner = GameRunner::new(FallingCrate);
        runner.init();
        assert_eq!(runner.instance_count(), 2);

        for _ in 0..30 {
            runner.tick(1.0 / 60.0);
        }
        let falling = runner.context().read_pose("crate").unwrap();
        assert!(falling.pos.y < 0.0);
    }

    #[test]
    fn input_is_consumed_once() {
        let mut runner = GameRunner::new(FallingCrate);
        runner.init();
        runner.push_input(InputEvent::KeyDown { key_code: 82 });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game_events_len(), 1);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn load_level_replaces_world() {
        let mut runner = GameRunner::new(FallingCrate);
        runner.init();
        let json = r#"{ "bodies": [ { "name": "rock", "kind": "fixed", "pos": [0, 0],
            "shape": { "kind": "rect", "width": 10, "height": 10 } } ] }"#;
        runner.load_level(json).unwrap();
        assert_eq!(runner.instance_count(), 1);
        assert!(runner.context().read_pose("crate").is_err());

        assert!(runner.load_level("{ not json").is_err());
        assert_eq!(runner.instance_count(), 1);
        assert!(runner.context().read_pose("rock").is_ok());
    }

    #[test]
    fn rejected_level_keeps_running_world() {
        let mut runner = GameRunner::new(FallingCrate);
        runner.init();
        runner.tick(1.0 / 60.0);
        let before = runner.context().read_pose("crate").unwrap();

        assert!(runner.load_level("{ not json").is_err());
        assert_eq!(runner.instance_count(), 2);
        let after = runner.context().read_pose("crate").unwrap();
        assert_eq!(after.pos, before.pos);

        runner.tick(1.0 / 60.0);
        assert!(runner.context().read_pose("crate").unwrap().pos.y < before.pos.y);
    }
}
