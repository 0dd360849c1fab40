/// Variable-step frame clock.
///
/// Physics constants are tuned per reference tick, so each frame's real
/// elapsed time is turned into a `dt_scale` (1.0 at the reference rate).
/// The scale is capped so a long stall does not teleport bodies through walls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    reference_fps: f32,
    max_scale: f32,
    /// Seconds since the clock started.
    now: f64,
}

impl FrameClock {
    pub fn new(reference_fps: f32, max_scale: f32) -> Self {
        Self {
            reference_fps,
            max_scale,
            now: 0.0,
        }
    }

    /// Add a frame's elapsed seconds. Returns the dt scale for this tick.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let frame_dt = frame_dt.max(0.0);
        self.now += frame_dt as f64;
        (frame_dt * self.reference_fps).min(self.max_scale)
    }

    /// Wall-clock seconds since start.
    pub fn now(&self) -> f64 {
        self.now
    }
}

/// One-shot wall-clock deadline.
///
/// Arming an armed deadline keeps the earlier expiry; firing consumes it,
/// so polling after it has fired is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deadline {
    at: Option<f64>,
}

impl Deadline {
    pub fn arm(&mut self, now: f64, delay: f64) {
        if self.at.is_none() {
            self.at = Some(now + delay);
        }
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// `true` exactly once, on the first poll at or after expiry.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
