#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Quiz Rush arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the session executes
//! those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values for systems and presentation collaborators to react to
//! deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Default master seed used when a configuration does not supply one.
pub const DEFAULT_RNG_SEED: u64 = 0x51e5_7ab1_7a2e_9d04;

/// Location of a single board tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    x: u32,
    y: u32,
}

impl TilePos {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Euclidean distance between two tiles in tile units.
    #[must_use]
    pub fn distance(self, other: TilePos) -> f32 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        ((dx * dx + dy * dy).sqrt()) as f32
    }

    /// Returns the neighboring tile one step in `direction`, when that tile
    /// lies inside a `columns` by `rows` board.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<TilePos> {
        let (dx, dy) = direction.offsets();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < columns && y < rows).then_some(TilePos::new(x, y))
    }
}

/// Eight compass movement directions available to the player and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Diagonal movement toward increasing columns and decreasing rows.
    NorthEast,
    /// Movement toward increasing column indices.
    East,
    /// Diagonal movement toward increasing columns and rows.
    SouthEast,
    /// Movement toward increasing row indices.
    South,
    /// Diagonal movement toward decreasing columns and increasing rows.
    SouthWest,
    /// Movement toward decreasing column indices.
    West,
    /// Diagonal movement toward decreasing columns and rows.
    NorthWest,
}

impl Direction {
    /// All compass directions in their canonical scoring order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit column and row offsets applied by one step in this direction.
    #[must_use]
    pub const fn offsets(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Reports whether the direction moves along both axes at once.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offsets();
        dx != 0 && dy != 0
    }
}

/// Describes the discrete tile layout of the arena board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl GridSpec {
    /// Creates a new board description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of columns contained in the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the board measured in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the board measured in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Reports whether the tile lies inside the board bounds.
    #[must_use]
    pub const fn contains(&self, tile: TilePos) -> bool {
        tile.x() < self.columns && tile.y() < self.rows
    }

    /// Center tile of the board, used as the player's starting position.
    #[must_use]
    pub const fn center(&self) -> TilePos {
        TilePos::new(self.columns / 2, self.rows / 2)
    }

    /// Continuous-space center of the provided tile.
    #[must_use]
    pub fn world_position(&self, tile: TilePos) -> Vec2 {
        Vec2::new(
            tile.x() as f32 * self.tile_length + self.tile_length / 2.0,
            tile.y() as f32 * self.tile_length + self.tile_length / 2.0,
        )
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cosmetic species tag attached to an enemy; the simulation treats all
/// enemy kinds identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Small green pursuit-avoider.
    Goblin,
    /// Fluttering pursuit-avoider.
    Bat,
    /// Slow oozing pursuit-avoider.
    Slime,
}

impl EnemyKind {
    /// All enemy kinds in spawn rotation order.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Goblin, EnemyKind::Bat, EnemyKind::Slime];
}

/// Identifier derived from a quiz question's text content.
///
/// Content-derived identifiers stay stable across sessions and question
/// reorderings, which is what the deduplication ledger keys on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Creates an identifier from a raw numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Derives the identifier for the provided question text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
        Self(u64::from_le_bytes(bytes))
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Category of quiz question, defined by the external quiz collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionKind(String);

impl QuestionKind {
    /// Creates a new question kind label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrowed label of the question kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A resolved question as reported back by the quiz collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Content-derived identifier of the answered question.
    pub id: QuestionId,
    /// Category the question was drawn from.
    pub kind: QuestionKind,
}

/// Ordered difficulty tier gating hazard density and quiz question mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntensityTier {
    /// Opening tier active at session start.
    One,
    /// Middle tier.
    Two,
    /// Final tier; completing it ends the session successfully.
    Three,
}

impl IntensityTier {
    /// Numeric rank of the tier, starting at 1.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            IntensityTier::One => 1,
            IntensityTier::Two => 2,
            IntensityTier::Three => 3,
        }
    }

    /// Tier reached by one promotion, if any remains.
    #[must_use]
    pub const fn next(self) -> Option<IntensityTier> {
        match self {
            IntensityTier::One => Some(IntensityTier::Two),
            IntensityTier::Two => Some(IntensityTier::Three),
            IntensityTier::Three => None,
        }
    }

    /// Number of hazards spawned per scheduler cycle at this tier.
    #[must_use]
    pub const fn hazard_batch_size(self) -> usize {
        match self {
            IntensityTier::One => 2,
            IntensityTier::Two => 4,
            IntensityTier::Three => 6,
        }
    }
}

/// Session-modifying effects offerable when a power-up tile is collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpEffect {
    /// One-shot shield: the next wrong answer does not reset the streak.
    StreakProtection,
    /// Arms hazard immunity; the next correct answer activates it.
    GoblinImmunity,
    /// Scales effective movement speed with the current streak.
    SpeedBoost,
}

impl PowerUpEffect {
    /// All effects in the order they are offered to the collaborator.
    pub const ALL: [PowerUpEffect; 3] = [
        PowerUpEffect::StreakProtection,
        PowerUpEffect::GoblinImmunity,
        PowerUpEffect::SpeedBoost,
    ];
}

/// Result payload handed back by the external quiz collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizResolution {
    /// The player answered the question correctly.
    Correct {
        /// Question that was answered.
        question: QuestionRecord,
    },
    /// The player answered the question incorrectly.
    Incorrect {
        /// Question that was answered.
        question: QuestionRecord,
    },
    /// The collaborator produced no usable answer; treated as incorrect
    /// by policy, without a ledger entry.
    Unanswered,
}

/// Kind of interrupt currently suspending the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterruptKind {
    /// Enemy collision delegated to the quiz collaborator. The session
    /// clock keeps counting down while this interrupt is outstanding.
    Quiz,
    /// Power-up tile collision delegated to the choice collaborator. The
    /// session clock pauses while this interrupt is outstanding.
    PowerUpChoice,
}

/// Lifecycle phase of an arena session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Pre-game countdown; the clock has not started.
    Countdown,
    /// The only phase in which movement, schedulers, and collisions run.
    Running,
    /// Simulation paused pending an external collaborator's result.
    Suspended,
    /// Terminal phase; a fresh session is required to play again.
    Ended,
}

/// Reasons a movement request may be denied by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDenied {
    /// The target tile lies outside the board.
    OutOfBounds,
    /// The target tile holds a live enemy; a quiz interrupt starts instead.
    EnemyEngaged,
    /// The session is not in its running phase.
    NotRunning,
    /// A collision-triggered interrupt is still awaiting resolution.
    InterruptPending,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance one tile in the given direction.
    RequestMove {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that an enemy relocate to the provided tile.
    MoveEnemy {
        /// Identifier of the enemy attempting to move.
        enemy_id: EnemyId,
        /// Destination tile chosen by the flee system.
        to: TilePos,
    },
    /// Announces the positions of the next hazard batch for advance warning.
    AnnounceHazards {
        /// Tiles the next batch will occupy.
        positions: Vec<TilePos>,
    },
    /// Replaces all live hazards with the previously announced batch.
    CommitHazards,
    /// Requests that a timer pickup appear at the provided tile.
    SpawnPickup {
        /// Destination tile chosen by the pickup scheduler.
        position: TilePos,
    },
    /// Resolves an outstanding quiz interrupt.
    ResolveQuiz {
        /// Outcome reported by the quiz collaborator.
        resolution: QuizResolution,
    },
    /// Resolves an outstanding power-up choice interrupt.
    ResolvePowerUp {
        /// Chosen effect, or `None` when the player declined.
        choice: Option<PowerUpEffect>,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// One countdown second elapsed before the match started.
    CountdownTicked {
        /// Whole seconds remaining before the session starts running.
        remaining: u32,
    },
    /// The countdown finished and the session entered its running phase.
    SessionStarted,
    /// Indicates that the simulation clock advanced while running.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The countdown clock gained or lost whole seconds.
    ClockAdjusted {
        /// Seconds remaining after the adjustment.
        remaining: u32,
        /// Signed change applied, after clamping.
        delta: i32,
    },
    /// Confirms that the player moved between two tiles.
    PlayerMoved {
        /// Tile the player occupied before moving.
        from: TilePos,
        /// Tile the player occupies after the move.
        to: TilePos,
    },
    /// Reports that a movement request was denied.
    PlayerMoveDenied {
        /// Direction that was requested.
        direction: Direction,
        /// Specific reason the request was denied.
        reason: MoveDenied,
    },
    /// Confirms that an enemy relocated to a new tile.
    EnemyMoved {
        /// Identifier of the enemy that moved.
        enemy_id: EnemyId,
        /// Tile the enemy occupied before moving.
        from: TilePos,
        /// Tile the enemy occupies after the move.
        to: TilePos,
    },
    /// Confirms that an enemy entered the board.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy_id: EnemyId,
        /// Cosmetic kind assigned to the enemy.
        kind: EnemyKind,
        /// Tile the enemy occupies after spawning.
        position: TilePos,
    },
    /// Confirms that an enemy was removed after a quiz resolution.
    EnemyDefeated {
        /// Identifier of the removed enemy.
        enemy_id: EnemyId,
        /// Tile the enemy occupied when removed.
        position: TilePos,
    },
    /// Advance warning for the next hazard batch.
    HazardsAnnounced {
        /// Tiles the pending batch will occupy.
        positions: Vec<TilePos>,
    },
    /// The pending hazard batch replaced all previous hazards.
    HazardsSpawned {
        /// Tiles now occupied by live hazards.
        positions: Vec<TilePos>,
    },
    /// The player stepped onto a live hazard.
    HazardStruck {
        /// Tile of the struck hazard.
        position: TilePos,
        /// Whether active hazard immunity absorbed the time penalty.
        blocked: bool,
    },
    /// A timer pickup appeared on the board.
    PickupSpawned {
        /// Tile occupied by the pickup.
        position: TilePos,
    },
    /// The player collected a timer pickup.
    PickupCollected {
        /// Tile the pickup occupied.
        position: TilePos,
        /// Whole seconds credited to the clock before clamping.
        bonus_seconds: u32,
    },
    /// A power-up tile appeared on the board.
    PowerUpTileSpawned {
        /// Tile occupied by the power-up.
        position: TilePos,
    },
    /// The player collected a power-up tile, starting a choice interrupt.
    PowerUpTileCollected {
        /// Tile the power-up occupied.
        position: TilePos,
    },
    /// A chosen power-up effect was applied to the session.
    PowerUpApplied {
        /// Effect that is now active or armed.
        effect: PowerUpEffect,
    },
    /// The player declined the offered power-up effects.
    PowerUpDeclined,
    /// Simulation ticking was handed over to an external collaborator.
    SuspensionStarted {
        /// Kind of interrupt awaiting resolution.
        interrupt: InterruptKind,
    },
    /// An interrupt exceeded the configured suspension timeout and was
    /// auto-resolved as unanswered or declined.
    SuspensionTimedOut {
        /// Kind of interrupt that timed out.
        interrupt: InterruptKind,
    },
    /// Simulation ticking resumed after an interrupt resolved.
    SessionResumed {
        /// Kind of interrupt that was resolved.
        interrupt: InterruptKind,
    },
    /// A quiz answer was recorded against the session tallies.
    AnswerRecorded {
        /// Whether the answer was correct.
        correct: bool,
        /// Question that was answered, absent for unanswered timeouts.
        question: Option<QuestionRecord>,
    },
    /// The score or streak changed after a scoring event.
    ScoreChanged {
        /// Total score after the change.
        score: u32,
        /// Current streak after the change.
        streak: u32,
    },
    /// The session was promoted to a higher intensity tier.
    IntensityRaised {
        /// Tier that became active.
        tier: IntensityTier,
    },
    /// The session reached a terminal state.
    SessionEnded {
        /// Final tallies for presentation and upload collaborators.
        summary: SessionSummary,
    },
}

/// Final tallies emitted once when a session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Count of correctly answered quiz questions.
    pub correct_answers: u32,
    /// Count of incorrectly answered quiz questions.
    pub wrong_answers: u32,
    /// Best streak achieved during the session.
    pub highest_streak: u32,
    /// Total score accumulated during the session.
    pub total_score: u32,
    /// `true` when the session ended by completing tier three rather than
    /// by the clock expiring.
    pub completed: bool,
    /// Highest intensity tier reached during the session.
    pub intensity_reached: IntensityTier,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Cosmetic kind assigned to the enemy.
    pub kind: EnemyKind,
    /// Tile currently occupied by the enemy.
    pub position: TilePos,
}

/// Read-only snapshot describing all live enemies on the board.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Configuration read once at session start and never mutated thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of tile columns on the board.
    pub grid_columns: u32,
    /// Number of tile rows on the board.
    pub grid_rows: u32,
    /// Side length of a square tile in world units.
    pub tile_length: f32,
    /// Enemy population maintained via respawn-on-defeat.
    pub max_enemies: u32,
    /// Maximum concurrent timer pickups on the board.
    pub max_timer_pickups: u32,
    /// Maximum concurrent collectible power-up tiles on the board.
    pub max_power_up_tiles: u32,
    /// Full hazard cycle length in milliseconds.
    pub hazard_interval_ms: u64,
    /// Advance-warning lead time before a hazard batch lands, in
    /// milliseconds. Must be shorter than the hazard interval.
    pub hazard_lead_ms: u64,
    /// Timer pickup spawn cadence in milliseconds.
    pub pickup_interval_ms: u64,
    /// Enemy flee decision cadence in milliseconds.
    pub flee_interval_ms: u64,
    /// Seconds on the clock when the session starts running.
    pub starting_seconds: u32,
    /// Hard cap on the clock; gains never push the clock past this.
    pub max_seconds: u32,
    /// Seconds credited for a correct quiz answer.
    pub correct_answer_bonus_seconds: u32,
    /// Seconds credited for collecting a timer pickup.
    pub pickup_bonus_seconds: u32,
    /// Seconds debited for striking a hazard.
    pub hazard_penalty_seconds: u32,
    /// Cumulative correct answers required to reach tier two.
    pub tier_two_threshold: u32,
    /// Cumulative correct answers required to reach tier three. Must be
    /// greater than the tier-two threshold.
    pub tier_three_threshold: u32,
    /// Correct answers required *within* tier three to complete the session.
    pub tier_three_completion_count: u32,
    /// Every Nth tier-three correct answer spawns an extra power-up tile.
    pub tier_three_power_up_cadence: u32,
    /// Whole seconds of pre-game countdown.
    pub countdown_seconds: u32,
    /// Maximum suspension age in milliseconds before an interrupt is
    /// auto-resolved as unanswered or declined.
    pub suspension_timeout_ms: u64,
    /// Base player movement speed in world units per second.
    pub base_player_speed: f32,
    /// Master seed from which all session RNG streams derive.
    pub rng_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_columns: 15,
            grid_rows: 10,
            tile_length: 64.0,
            max_enemies: 3,
            max_timer_pickups: 3,
            max_power_up_tiles: 3,
            hazard_interval_ms: 10_000,
            hazard_lead_ms: 3_000,
            pickup_interval_ms: 7_000,
            flee_interval_ms: 1_000,
            starting_seconds: 60,
            max_seconds: 60,
            correct_answer_bonus_seconds: 10,
            pickup_bonus_seconds: 5,
            hazard_penalty_seconds: 5,
            tier_two_threshold: 5,
            tier_three_threshold: 10,
            tier_three_completion_count: 10,
            tier_three_power_up_cadence: 5,
            countdown_seconds: 3,
            suspension_timeout_ms: 45_000,
            base_player_speed: 200.0,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl SessionConfig {
    /// Checks the configuration for contradictions before a session starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_columns == 0 || self.grid_rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.grid_columns,
                rows: self.grid_rows,
            });
        }
        if self.tile_length <= 0.0 {
            return Err(ConfigError::NonPositiveTileLength {
                tile_length: self.tile_length,
            });
        }
        if self.starting_seconds > self.max_seconds {
            return Err(ConfigError::StartExceedsCap {
                start: self.starting_seconds,
                cap: self.max_seconds,
            });
        }
        if self.tier_three_threshold <= self.tier_two_threshold {
            return Err(ConfigError::ThresholdOrder {
                tier_two: self.tier_two_threshold,
                tier_three: self.tier_three_threshold,
            });
        }
        if self.hazard_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "hazard_interval_ms",
            });
        }
        if self.pickup_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "pickup_interval_ms",
            });
        }
        if self.flee_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "flee_interval_ms",
            });
        }
        if self.hazard_lead_ms >= self.hazard_interval_ms {
            return Err(ConfigError::LeadExceedsInterval {
                lead_ms: self.hazard_lead_ms,
                interval_ms: self.hazard_interval_ms,
            });
        }
        Ok(())
    }

    /// Board geometry derived from the configured dimensions.
    #[must_use]
    pub const fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_columns, self.grid_rows, self.tile_length)
    }

    /// Full hazard cycle length.
    #[must_use]
    pub const fn hazard_interval(&self) -> Duration {
        Duration::from_millis(self.hazard_interval_ms)
    }

    /// Advance-warning lead time for hazard batches.
    #[must_use]
    pub const fn hazard_lead(&self) -> Duration {
        Duration::from_millis(self.hazard_lead_ms)
    }

    /// Timer pickup spawn cadence.
    #[must_use]
    pub const fn pickup_interval(&self) -> Duration {
        Duration::from_millis(self.pickup_interval_ms)
    }

    /// Enemy flee decision cadence.
    #[must_use]
    pub const fn flee_interval(&self) -> Duration {
        Duration::from_millis(self.flee_interval_ms)
    }

    /// Maximum suspension age before auto-resolution.
    #[must_use]
    pub const fn suspension_timeout(&self) -> Duration {
        Duration::from_millis(self.suspension_timeout_ms)
    }
}

/// Contradictions detected while validating a [`SessionConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The board has no tiles along at least one axis.
    #[error("grid must have at least one column and row, got {columns}x{rows}")]
    EmptyGrid {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Tiles must have positive extent in world units.
    #[error("tile length must be positive, got {tile_length}")]
    NonPositiveTileLength {
        /// Configured tile side length.
        tile_length: f32,
    },
    /// The clock would start above its own cap.
    #[error("starting time {start}s exceeds clock cap {cap}s")]
    StartExceedsCap {
        /// Configured starting seconds.
        start: u32,
        /// Configured clock cap.
        cap: u32,
    },
    /// Tier thresholds must be strictly increasing.
    #[error("tier-three threshold {tier_three} must exceed tier-two threshold {tier_two}")]
    ThresholdOrder {
        /// Configured tier-two threshold.
        tier_two: u32,
        /// Configured tier-three threshold.
        tier_three: u32,
    },
    /// A scheduler cadence of zero would spawn unboundedly every tick.
    #[error("{name} must be non-zero")]
    ZeroInterval {
        /// Name of the offending configuration field.
        name: &'static str,
    },
    /// The warning phase must fit inside the hazard cycle.
    #[error("hazard lead time {lead_ms}ms must be shorter than the interval {interval_ms}ms")]
    LeadExceedsInterval {
        /// Configured lead time in milliseconds.
        lead_ms: u64,
        /// Configured cycle length in milliseconds.
        interval_ms: u64,
    },
}
