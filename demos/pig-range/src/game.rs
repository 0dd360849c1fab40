use glam::Vec2;
use pigshot_engine::*;

const LEVEL: &str = include_str!("level.json");

const KEY_SPACE: u32 = 32;
const KEY_LEFT: u32 = 37;
const KEY_UP: u32 = 38;
const KEY_RIGHT: u32 = 39;
const KEY_DOWN: u32 = 40;
const KEY_A: u32 = 65;
const KEY_B: u32 = 66;
const KEY_F: u32 = 70;
const KEY_R: u32 = 82;
const KEY_S: u32 = 83;
const KEY_U: u32 = 85;

/// World units the arrow keys pan by.
const KEY_PAN_STEP: f32 = 10.0;

/// Custom event kinds from the host UI
const CUSTOM_RESET: u32 = 1;

/// Cannon vs. pigs: loads the level and turns raw keyboard/mouse input
/// into launch, camera and reset intents.
pub struct PigRange {
    /// Last pointer position, in view coordinates.
    pointer: Vec2,
    /// Right button held: pointer motion pans the camera.
    panning: bool,
}

impl PigRange {
    pub fn new() -> Self {
        Self {
            pointer: Vec2::ZERO,
            panning: false,
        }
    }

    /// Keys act on release.
    fn key_intent(key_code: u32) -> Option<Intent> {
        match key_code {
            KEY_U => Some(Intent::LaunchBegin(LaunchSource::Keyboard)),
            KEY_SPACE => Some(Intent::LaunchEnd),
            KEY_F => Some(Intent::PowerStep(1)),
            KEY_S => Some(Intent::PowerStep(-1)),
            KEY_A => Some(Intent::AngleStep(1)),
            KEY_B => Some(Intent::AngleStep(-1)),
            KEY_UP => Some(Intent::Zoom(1)),
            KEY_DOWN => Some(Intent::Zoom(-1)),
            KEY_RIGHT => Some(Intent::Pan(Vec2::new(KEY_PAN_STEP, 0.0))),
            KEY_LEFT => Some(Intent::Pan(Vec2::new(-KEY_PAN_STEP, 0.0))),
            KEY_R => Some(Intent::Reset),
            _ => None,
        }
    }

    fn pointer_moved(&mut self, ctx: &mut EngineContext, to: Vec2) {
        let from = self.pointer;
        self.pointer = to;
        if self.panning {
            let delta = ctx.view_to_world(to) - ctx.view_to_world(from);
            ctx.apply(Intent::Pan(delta));
        }
        let target = ctx.view_to_world(to);
        ctx.apply(Intent::Aim(target));
    }
}

impl Default for PigRange {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PigRange {
    fn config(&self) -> GameConfig {
        GameConfig {
            physics: PhysicsConfig {
                arena: Some(ArenaBounds {
                    ceiling: 245.0,
                    floor: -265.0,
                }),
                ..PhysicsConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(e) = ctx.load_level_json(LEVEL) {
            log::error!("pig-range: level failed to load: {}", e);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::KeyUp { key_code } => {
                    if let Some(intent) = Self::key_intent(key_code) {
                        ctx.apply(intent);
                    }
                }
                InputEvent::PointerDown { x, y, button } => {
                    self.pointer_moved(ctx, Vec2::new(x, y));
                    match button {
                        BUTTON_PRIMARY => ctx.apply(Intent::LaunchBegin(LaunchSource::Pointer)),
                        BUTTON_SECONDARY => self.panning = true,
                        _ => {}
                    }
                }
                InputEvent::PointerMove { x, y } => self.pointer_moved(ctx, Vec2::new(x, y)),
                InputEvent::PointerUp { x, y, button } => {
                    self.pointer_moved(ctx, Vec2::new(x, y));
                    match button {
                        BUTTON_PRIMARY => ctx.apply(Intent::LaunchEnd),
                        BUTTON_SECONDARY => self.panning = false,
                        _ => {}
                    }
                }
                InputEvent::Wheel { delta } => {
                    if delta > 0.0 {
                        ctx.apply(Intent::Zoom(1));
                    } else if delta < 0.0 {
                        ctx.apply(Intent::Zoom(-1));
                    }
                }
                InputEvent::Custom { kind: CUSTOM_RESET, .. } => ctx.apply(Intent::Reset),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / 60.0;

    fn started() -> (PigRange, EngineContext) {
        let mut game = PigRange::new();
        let mut ctx = EngineContext::with_config(&game.config());
        game.init(&mut ctx);
        for _ in 0..40 {
            ctx.step(TICK);
        }
        ctx.clear_frame_data();
        (game, ctx)
    }

    fn feed(game: &mut PigRange, ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for event in events {
            input.push(*event);
        }
        game.update(ctx, &input);
    }

    #[test]
    fn level_loads_with_rig_and_hidden_goal() {
        let (_, ctx) = started();
        assert!(ctx.launcher.rig().is_some());
        assert_eq!(ctx.springs.len(), 1);
        assert!(!ctx.read_visible("goal").unwrap());
        assert!(!ctx.read_visible("pig1_bruise").unwrap());
        assert!(ctx.read_visible("coin1").unwrap());
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(PigRange::key_intent(KEY_U), Some(Intent::LaunchBegin(LaunchSource::Keyboard)));
        assert_eq!(PigRange::key_intent(KEY_SPACE), Some(Intent::LaunchEnd));
        assert_eq!(PigRange::key_intent(KEY_S), Some(Intent::PowerStep(-1)));
        assert_eq!(PigRange::key_intent(KEY_B), Some(Intent::AngleStep(-1)));
        assert_eq!(PigRange::key_intent(KEY_LEFT), Some(Intent::Pan(Vec2::new(-10.0, 0.0))));
        assert_eq!(PigRange::key_intent(KEY_R), Some(Intent::Reset));
        assert_eq!(PigRange::key_intent(0), None);
    }

    #[test]
    fn keyboard_launch_fires_on_release() {
        let (mut game, mut ctx) = started();
        feed(&mut game, &mut ctx, &[InputEvent::KeyUp { key_code: KEY_U }]);
        assert_eq!(ctx.launch_state(), LaunchState::Charging(LaunchSource::Keyboard));
        assert!(ctx.read_visible("power_gauge").unwrap());

        feed(&mut game, &mut ctx, &[InputEvent::KeyUp { key_code: KEY_SPACE }]);
        assert_eq!(ctx.launch_state(), LaunchState::Launched);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, event_kind::LAUNCHED);
    }

    #[test]
    fn key_down_alone_does_nothing() {
        let (mut game, mut ctx) = started();
        feed(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: KEY_U }]);
        assert_eq!(ctx.launch_state(), LaunchState::Idle);
    }

    #[test]
    fn pointer_drag_launches_toward_cursor() {
        let (mut game, mut ctx) = started();
        feed(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 0.5, y: 0.5, button: BUTTON_PRIMARY },
                InputEvent::PointerMove { x: 0.6, y: 0.4 },
            ],
        );
        assert_eq!(ctx.launch_state(), LaunchState::Charging(LaunchSource::Pointer));

        feed(&mut game, &mut ctx, &[InputEvent::PointerUp { x: 0.6, y: 0.4, button: BUTTON_PRIMARY }]);
        assert_eq!(ctx.launch_state(), LaunchState::Launched);
        let ball = ctx.scene.lookup("ball").unwrap();
        let vel = ctx.scene.entity(ball).vel;
        assert!(vel.x > 0.0 && vel.y > 0.0);
    }

    #[test]
    fn right_drag_pans_and_wheel_zooms() {
        let (mut game, mut ctx) = started();
        feed(&mut game, &mut ctx, &[InputEvent::Wheel { delta: 1.0 }, InputEvent::Wheel { delta: 1.0 }]);
        assert!(ctx.camera.zoom > 1.0);

        let before = ctx.camera.center;
        feed(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 0.0, y: 0.0, button: BUTTON_SECONDARY },
                InputEvent::PointerMove { x: 0.1, y: 0.0 },
                InputEvent::PointerUp { x: 0.1, y: 0.0, button: BUTTON_SECONDARY },
            ],
        );
        assert!(ctx.camera.center.x > before.x);
        assert_eq!(ctx.launch_state(), LaunchState::Idle);
    }

    #[test]
    fn custom_reset_event() {
        let (mut game, mut ctx) = started();
        feed(&mut game, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_RESET, a: 0.0, b: 0.0, c: 0.0 }]);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, event_kind::RESET);
    }
}
