/// Game loop timing and control system
///
/// Implements a fixed timestep game loop. Every simulation step receives an
/// explicit [`SimClock`]; pausing is expressed as a single zero-length step
/// rather than a flag other systems have to consult.
use std::time::{Duration, Instant};

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Simulation time context handed to every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    /// Length of this step in seconds (0 while paused)
    pub dt: f32,
    /// Simulation time at the start of this step, in seconds
    pub time: f64,
}

impl SimClock {
    pub fn new(dt: f32, time: f64) -> Self {
        Self { dt, time }
    }

    /// A zero-length step at `time`
    pub fn paused(time: f64) -> Self {
        Self { dt: 0.0, time }
    }

    pub fn is_paused(&self) -> bool {
        self.dt <= 0.0
    }

    /// Clock for the step following this one
    pub fn next(&self) -> Self {
        Self {
            dt: self.dt,
            time: self.time + self.dt as f64,
        }
    }
}

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Simulation time (advances only while running)
    sim_time: f64,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Begin a new frame, returning the clocks of the steps to run.
    pub fn begin_frame(&mut self) -> Vec<SimClock> {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;
        self.advance(frame_time)
    }

    /// Feed `frame_time` of wall time into the accumulator.
    fn advance(&mut self, frame_time: Duration) -> Vec<SimClock> {
        // If paused, run a single zero-length step
        if self.paused {
            return vec![SimClock::paused(self.sim_time)];
        }

        self.accumulator += frame_time;

        let mut clocks = Vec::new();
        while self.accumulator >= FIXED_TIMESTEP_DURATION && (clocks.len() as u32) < MAX_PHYSICS_STEPS
        {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            clocks.push(SimClock::new(FIXED_TIMESTEP, self.sim_time));
            self.sim_time += FIXED_TIMESTEP as f64;
        }

        // Drop the backlog we refused to simulate
        if clocks.len() as u32 == MAX_PHYSICS_STEPS {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.update_count += clocks.len() as u64;
        clocks
    }

    /// Get total simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Get total number of frames processed
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
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
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
