/// Frame timing and control
///
/// The character is ticked once per displayed frame with the wall-clock
/// time since the previous frame, so the clock produces one variable delta
/// per frame rather than fixed steps.
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame clock state
pub struct GameLoop {
    /// Time of last frame (`None` before the first frame and after resuming)
    last_frame_time: Option<Instant>,

    /// Whether the game is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Delta handed out by the most recent `begin_frame`
    delta_time: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            last_frame_time: None,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            delta_time: 0.0,
        }
    }

    /// Begin a new frame, returns the seconds elapsed since the previous one
    pub fn begin_frame(&mut self) -> f32 {
        self.begin_frame_at(Instant::now())
    }

    /// Begin a new frame at a given instant
    ///
    /// The first frame (and the first after resuming) has a delta of zero.
    /// While paused every delta is zero.
    pub fn begin_frame_at(&mut self, now: Instant) -> f32 {
        let frame_time = match self.last_frame_time {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_frame_time = Some(now);
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.delta_time = if self.paused {
            0.0
        } else {
            frame_time.as_secs_f32()
        };
        self.delta_time
    }

    /// Get the delta handed out by the most recent frame (in seconds)
    #[allow(dead_code)]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Forget the last frame so the pause is not replayed as one huge delta
            self.last_frame_time = None;
            log::info!("Game resumed");
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
