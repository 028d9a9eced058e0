//! The stepper: owns the bodies and decouples simulation rate from frame rate
//!
//! Real elapsed time is clamped and accumulated; whole fixed ticks are run
//! from the accumulator and the remainder carries to the next frame.

use glam::Vec2;

use super::body::Body;
use super::broad_phase::BroadPhase;
use super::tick::tick;
use crate::settings::SimConfig;

/// Simulation world
#[derive(Debug, Clone)]
pub struct World {
    config: SimConfig,
    bodies: Vec<Body>,
    paused: bool,
    broad_phase: BroadPhase,
    accumulator: f32,
    /// Simulated (unpaused) ticks so far
    tick_count: u64,
}

impl World {
    /// Create a world from a config and an initial population.
    ///
    /// Bodies must have positive radius and mass.
    pub fn new(config: SimConfig, bodies: Vec<Body>) -> Self {
        debug_assert!(config.dt > 0.0, "tick length must be positive, got {}", config.dt);
        log::info!(
            "World {}x{} with {} bodies, broad phase {}",
            config.world_width,
            config.world_height,
            bodies.len(),
            config.broad_phase.as_str()
        );
        Self {
            paused: config.paused,
            broad_phase: config.broad_phase,
            config,
            bodies,
            accumulator: 0.0,
            tick_count: 0,
        }
    }

    /// Feed `elapsed` seconds of real time and run the fixed ticks it covers.
    ///
    /// Non-positive (or NaN) input is a no-op, as is any input when the
    /// configured tick length is not positive. While paused, ticks are still
    /// consumed from the accumulator but bodies do not change. Returns the
    /// number of simulated ticks.
    pub fn step(&mut self, elapsed: f32) -> u32 {
        if !(elapsed > 0.0) {
            return 0;
        }
        let dt = self.config.dt;
        if !(dt > 0.0) {
            log::warn!("Tick length {} is not positive; not stepping", dt);
            return 0;
        }
        let frame = if elapsed > self.config.max_frame_time {
            log::debug!(
                "Frame time {:.3}s clamped to {:.3}s",
                elapsed,
                self.config.max_frame_time
            );
            self.config.max_frame_time
        } else {
            elapsed
        };
        self.accumulator += frame;

        let params = self.config.partition_params();
        let mut simulated = 0;
        while self.accumulator >= dt {
            self.accumulator -= dt;
            if self.paused {
                continue;
            }
            tick(&mut self.bodies, self.broad_phase, &params, dt);
            self.tick_count += 1;
            simulated += 1;
        }
        simulated
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("Paused: {}", paused);
        }
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn broad_phase(&self) -> BroadPhase {
        self.broad_phase
    }

    pub fn set_broad_phase(&mut self, broad_phase: BroadPhase) {
        if self.broad_phase != broad_phase {
            log::info!("Broad phase: {}", broad_phase.as_str());
        }
        self.broad_phase = broad_phase;
    }

    pub fn toggle_broad_phase(&mut self) {
        self.set_broad_phase(self.broad_phase.toggled());
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Unconsumed real time (seconds), always below one tick
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// One-line HUD text: body count, pause state, broad phase
    pub fn status_line(&self) -> String {
        format!(
            "Bodies: {} | Paused: {} | Quadtree: {}",
            self.bodies.len(),
            if self.paused { "yes" } else { "no" },
            match self.broad_phase {
                BroadPhase::Partitioned => "ON",
                BroadPhase::BruteForce => "OFF",
            }
        )
    }
}
