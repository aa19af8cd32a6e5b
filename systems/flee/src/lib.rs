#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic flee system that proposes enemy steps away from the player.

use std::time::Duration;

use quizrush_core::{Command, Direction, EnemyView, Event, GridSpec, TilePos};

const SCORE_INVALID: i32 = -1_000;
const SCORE_PER_DISTANCE_GAIN: f32 = 100.0;
const SCORE_AXIS_ALIGNED: i32 = 50;
const SCORE_DIAGONAL: i32 = 20;
const SCORE_EDGE_PENALTY: i32 = 30;
const SCORE_PANIC_BONUS: i32 = 100;

/// Tiles within this distance of the player trigger the panic bonus.
const PANIC_RADIUS: f32 = 2.0;

/// Pure system that reacts to session events and emits enemy move commands.
///
/// All enemies decide simultaneously against the same pre-tick snapshot;
/// the session arbitrates destination conflicts when it executes the
/// resulting commands in enemy-id order.
#[derive(Debug)]
pub struct Flee {
    interval: Duration,
    elapsed: Duration,
}

impl Flee {
    /// Creates a flee system deciding once per `interval` of session time.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Consumes session events and immutable views to emit move commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: TilePos,
        enemies: &EnemyView,
        grid: &GridSpec,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.elapsed = self.elapsed.saturating_add(*dt);
            }
        }
        if self.elapsed < self.interval {
            return;
        }
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
        }

        // One decision batch per handle call; stacked intervals would
        // re-evaluate the same snapshot and produce identical steps.
        for enemy in enemies.iter() {
            if let Some(to) = best_step(enemy.position, player, enemies, grid) {
                out.push(Command::MoveEnemy {
                    enemy_id: enemy.id,
                    to,
                });
            }
        }
    }
}

/// Picks the highest-scoring step for one enemy, or `None` when staying
/// put beats every move. Ties resolve to the earliest candidate in the
/// canonical direction order.
fn best_step(
    position: TilePos,
    player: TilePos,
    enemies: &EnemyView,
    grid: &GridSpec,
) -> Option<TilePos> {
    let mut best: Option<(i32, TilePos)> = None;
    for direction in Direction::ALL {
        let Some(candidate) = position.step(direction, grid.columns(), grid.rows()) else {
            continue;
        };
        let score = score_step(position, candidate, direction, player, enemies, grid);
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }

    let stay_score = score_stay(position, grid);
    match best {
        Some((score, candidate)) if score > stay_score => Some(candidate),
        _ => None,
    }
}

fn score_step(
    from: TilePos,
    to: TilePos,
    direction: Direction,
    player: TilePos,
    enemies: &EnemyView,
    grid: &GridSpec,
) -> i32 {
    if to == player || enemies.iter().any(|enemy| enemy.position == to) {
        return SCORE_INVALID;
    }

    let current_distance = from.distance(player);
    let new_distance = to.distance(player);
    let mut score = ((new_distance - current_distance) * SCORE_PER_DISTANCE_GAIN) as i32;

    let (step_x, step_y) = direction.offsets();
    let (away_x, away_y) = away_signs(from, player);
    if step_x != 0 && step_x == away_x {
        score += SCORE_AXIS_ALIGNED;
    }
    if step_y != 0 && step_y == away_y {
        score += SCORE_AXIS_ALIGNED;
    }

    if direction.is_diagonal() {
        score += SCORE_DIAGONAL;
    }

    if near_edge(to, grid) {
        score -= SCORE_EDGE_PENALTY;
    }

    // Urgency escalation: any move beats standing still once the player
    // is breathing down the enemy's neck.
    if current_distance <= PANIC_RADIUS {
        score += SCORE_PANIC_BONUS;
    }

    score
}

fn score_stay(position: TilePos, grid: &GridSpec) -> i32 {
    let mut score = 0;
    if near_edge(position, grid) {
        score -= SCORE_EDGE_PENALTY;
    }
    score
}

/// Per-axis signs pointing away from the player, zero when aligned.
fn away_signs(from: TilePos, player: TilePos) -> (i32, i32) {
    let dx = (i64::from(from.x()) - i64::from(player.x())).signum() as i32;
    let dy = (i64::from(from.y()) - i64::from(player.y())).signum() as i32;
    (dx, dy)
}

fn near_edge(tile: TilePos, grid: &GridSpec) -> bool {
    tile.x() == 0
        || tile.y() == 0
        || tile.x() + 1 >= grid.columns()
        || tile.y() + 1 >= grid.rows()
}
