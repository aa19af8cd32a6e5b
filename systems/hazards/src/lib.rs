#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-phase hazard scheduler: announce a batch ahead of time, then commit.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use quizrush_core::{Command, Event, GridSpec, IntensityTier, TilePos};

/// Random draws attempted per hazard position before giving up. Crowded
/// boards produce batches smaller than the tier's nominal size.
const PLACEMENT_ATTEMPTS: u32 = 32;

/// Pure system that drives the recurring hazard cycle.
///
/// Each cycle announces the next batch `lead` before the interval boundary
/// and commits it exactly at the boundary, replacing all previous hazards.
/// Batch size follows the active intensity tier.
#[derive(Debug)]
pub struct HazardScheduler {
    interval: Duration,
    lead: Duration,
    elapsed: Duration,
    announced: bool,
    rng: ChaCha8Rng,
}

impl HazardScheduler {
    /// Creates a scheduler with the provided cycle timing and RNG seed.
    #[must_use]
    pub fn new(interval: Duration, lead: Duration, seed: u64) -> Self {
        Self {
            interval,
            lead,
            elapsed: Duration::ZERO,
            announced: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes session events and emits announce/commit commands.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        tier: IntensityTier,
        grid: &GridSpec,
        is_tile_clear: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(TilePos) -> bool,
    {
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.elapsed = self.elapsed.saturating_add(*dt);
            }
        }

        if !self.announced && self.elapsed + self.lead >= self.interval {
            let positions = self.pick_batch(tier.hazard_batch_size(), grid, &is_tile_clear);
            out.push(Command::AnnounceHazards { positions });
            self.announced = true;
        }

        if self.elapsed >= self.interval {
            while self.elapsed >= self.interval {
                self.elapsed -= self.interval;
            }
            self.announced = false;
            out.push(Command::CommitHazards);
        }
    }

    fn pick_batch<F>(&mut self, size: usize, grid: &GridSpec, is_tile_clear: &F) -> Vec<TilePos>
    where
        F: Fn(TilePos) -> bool,
    {
        let mut batch: Vec<TilePos> = Vec::with_capacity(size);
        for _ in 0..size {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let x = self.rng.gen_range(0..grid.columns());
                let y = self.rng.gen_range(0..grid.rows());
                let candidate = TilePos::new(x, y);
                if batch.contains(&candidate) || !is_tile_clear(candidate) {
                    continue;
                }
                batch.push(candidate);
                break;
            }
        }
        batch
    }
}
