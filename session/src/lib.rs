#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena session state for Quiz Rush.
//!
//! The session owns the single mutable state shared by every component:
//! board occupancy, the countdown clock, score and streak tallies, the
//! intensity progression, applied power-ups, the question deduplication
//! ledger, and the quiz/power-up interrupt protocol. All mutation flows
//! through [`apply`]; systems and adapters observe the session through the
//! [`query`] module and the events broadcast after each command.

mod clock;
mod intensity;
mod ledger;
mod powerups;

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use quizrush_core::{
    Command, ConfigError, Direction, EnemyId, EnemyKind, Event, GridSpec, InterruptKind,
    MoveDenied, PowerUpEffect, QuizResolution, SessionConfig, SessionPhase, SessionSummary,
    TilePos,
};

use clock::Clock;
use intensity::{IntensityOutcome, IntensityProgress};
use ledger::QuestionLedger;
use powerups::PowerUpState;

pub use powerups::PowerUpSnapshot;

const SECOND: Duration = Duration::from_secs(1);

/// Bounded number of random draws before a placement search gives up.
/// Crowded boards simply spawn fewer entities than requested.
const PLACEMENT_ATTEMPTS: u32 = 32;

/// Minimum distance in tiles between the player and a fresh enemy spawn.
const ENEMY_SPAWN_CLEARANCE: f32 = 2.0;

/// Represents the authoritative arena session state.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: GridSpec,
    phase: SessionPhase,
    countdown_remaining: u32,
    countdown_fraction: Duration,
    clock: Clock,
    score: u32,
    streak: u32,
    highest_streak: u32,
    correct_answers: u32,
    wrong_answers: u32,
    intensity: IntensityProgress,
    power_ups: PowerUpState,
    ledger: QuestionLedger,
    player: Player,
    enemies: Vec<Enemy>,
    hazards: Vec<TilePos>,
    pending_hazards: Vec<TilePos>,
    pickups: Vec<TilePos>,
    power_up_tiles: Vec<TilePos>,
    suspension: Option<Suspension>,
    completed: bool,
    next_enemy_id: u32,
    kind_cursor: usize,
    rng: ChaCha8Rng,
}

impl Session {
    /// Creates a new session from a validated configuration.
    ///
    /// The player starts at the board center and the initial enemy
    /// population is placed deterministically from the configured seed.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid();
        let phase = if config.countdown_seconds == 0 {
            SessionPhase::Running
        } else {
            SessionPhase::Countdown
        };
        let mut session = Self {
            grid,
            phase,
            countdown_remaining: config.countdown_seconds,
            countdown_fraction: Duration::ZERO,
            clock: Clock::new(config.starting_seconds, config.max_seconds),
            score: 0,
            streak: 0,
            highest_streak: 0,
            correct_answers: 0,
            wrong_answers: 0,
            intensity: IntensityProgress::new(),
            power_ups: PowerUpState::default(),
            ledger: QuestionLedger::default(),
            player: Player {
                position: grid.center(),
                base_speed: config.base_player_speed,
                effective_speed: config.base_player_speed,
            },
            enemies: Vec::new(),
            hazards: Vec::new(),
            pending_hazards: Vec::new(),
            pickups: Vec::new(),
            power_up_tiles: Vec::new(),
            suspension: None,
            completed: false,
            next_enemy_id: 0,
            kind_cursor: 0,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
        };

        let mut discarded = Vec::new();
        for _ in 0..session.config.max_enemies {
            if !session.spawn_enemy(&mut discarded) {
                break;
            }
        }
        Ok(session)
    }

    fn advance_time(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        match self.phase {
            SessionPhase::Ended => {}
            SessionPhase::Countdown => self.advance_countdown(dt, out_events),
            SessionPhase::Running => self.advance_running(dt, out_events),
            SessionPhase::Suspended => self.advance_suspended(dt, out_events),
        }
    }

    fn advance_countdown(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.countdown_fraction = self.countdown_fraction.saturating_add(dt);
        while self.countdown_fraction >= SECOND && self.phase == SessionPhase::Countdown {
            self.countdown_fraction -= SECOND;
            self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
            out_events.push(Event::CountdownTicked {
                remaining: self.countdown_remaining,
            });
            if self.countdown_remaining == 0 {
                self.phase = SessionPhase::Running;
                out_events.push(Event::SessionStarted);
            }
        }
    }

    fn advance_running(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });
        let seconds = self.clock.accumulate(dt);
        for _ in 0..seconds {
            let delta = self.clock.debit(1);
            out_events.push(Event::ClockAdjusted {
                remaining: self.clock.remaining(),
                delta,
            });
            if self.clock.is_expired() {
                self.end(false, out_events);
                return;
            }
        }
    }

    fn advance_suspended(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Some(kind) = self.suspension.as_ref().map(|suspension| suspension.kind) else {
            return;
        };

        // Quizzes are answered under time pressure: the clock keeps
        // draining and can end the session mid-interrupt. Power-up
        // choices pause the clock entirely.
        if kind == InterruptKind::Quiz {
            let seconds = self.clock.accumulate(dt);
            for _ in 0..seconds {
                let delta = self.clock.debit(1);
                out_events.push(Event::ClockAdjusted {
                    remaining: self.clock.remaining(),
                    delta,
                });
                if self.clock.is_expired() {
                    self.end(false, out_events);
                    return;
                }
            }
        }

        let timed_out = match self.suspension.as_mut() {
            Some(suspension) => {
                suspension.age = suspension.age.saturating_add(dt);
                suspension.age >= self.config.suspension_timeout()
            }
            None => false,
        };
        if !timed_out {
            return;
        }

        out_events.push(Event::SuspensionTimedOut { interrupt: kind });
        match kind {
            InterruptKind::Quiz => self.resolve_quiz(QuizResolution::Unanswered, out_events),
            InterruptKind::PowerUpChoice => self.resolve_power_up(None, out_events),
        }
    }

    fn request_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        match self.phase {
            SessionPhase::Running => {}
            SessionPhase::Suspended => {
                out_events.push(Event::PlayerMoveDenied {
                    direction,
                    reason: MoveDenied::InterruptPending,
                });
                return;
            }
            SessionPhase::Countdown | SessionPhase::Ended => {
                out_events.push(Event::PlayerMoveDenied {
                    direction,
                    reason: MoveDenied::NotRunning,
                });
                return;
            }
        }

        let from = self.player.position;
        let Some(target) = from.step(direction, self.grid.columns(), self.grid.rows()) else {
            out_events.push(Event::PlayerMoveDenied {
                direction,
                reason: MoveDenied::OutOfBounds,
            });
            return;
        };

        if let Some(enemy_id) = self.enemy_at(target) {
            out_events.push(Event::PlayerMoveDenied {
                direction,
                reason: MoveDenied::EnemyEngaged,
            });
            self.begin_suspension(InterruptKind::Quiz, Some(enemy_id), out_events);
            return;
        }

        self.player.position = target;
        out_events.push(Event::PlayerMoved { from, to: target });

        // Collision order is fixed: power-up tile, then pickup, then
        // hazard. The schedulers never stack occupants, so at most one
        // of these fires per move.
        if let Some(index) = self.power_up_tiles.iter().position(|tile| *tile == target) {
            let _ = self.power_up_tiles.remove(index);
            out_events.push(Event::PowerUpTileCollected { position: target });
            self.begin_suspension(InterruptKind::PowerUpChoice, None, out_events);
            return;
        }

        if let Some(index) = self.pickups.iter().position(|tile| *tile == target) {
            let _ = self.pickups.remove(index);
            let bonus = self.config.pickup_bonus_seconds;
            let delta = self.clock.credit(bonus);
            out_events.push(Event::PickupCollected {
                position: target,
                bonus_seconds: bonus,
            });
            out_events.push(Event::ClockAdjusted {
                remaining: self.clock.remaining(),
                delta,
            });
            return;
        }

        if let Some(index) = self.hazards.iter().position(|tile| *tile == target) {
            let _ = self.hazards.remove(index);
            let blocked = self.power_ups.absorb_hazard();
            out_events.push(Event::HazardStruck {
                position: target,
                blocked,
            });
            if !blocked {
                let delta = self.clock.debit(self.config.hazard_penalty_seconds);
                out_events.push(Event::ClockAdjusted {
                    remaining: self.clock.remaining(),
                    delta,
                });
                if self.clock.is_expired() {
                    self.end(false, out_events);
                }
            }
        }
    }

    fn move_enemy(&mut self, enemy_id: EnemyId, to: TilePos, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Running {
            return;
        }
        if !self.grid.contains(to) || to == self.player.position {
            return;
        }
        // A destination already claimed this tick loses silently; flee
        // decisions are scored against the pre-tick snapshot.
        if self.enemies.iter().any(|enemy| enemy.position == to) {
            return;
        }
        if let Some(enemy) = self.enemies.iter_mut().find(|enemy| enemy.id == enemy_id) {
            let from = enemy.position;
            enemy.position = to;
            out_events.push(Event::EnemyMoved { enemy_id, from, to });
        }
    }

    fn announce_hazards(&mut self, positions: Vec<TilePos>, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.pending_hazards.clear();
        for position in positions {
            if self.tile_is_clear(position) {
                self.pending_hazards.push(position);
            }
        }
        out_events.push(Event::HazardsAnnounced {
            positions: self.pending_hazards.clone(),
        });
    }

    fn commit_hazards(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.hazards.clear();
        let pending: Vec<TilePos> = self.pending_hazards.drain(..).collect();
        for position in pending {
            if self.tile_is_clear(position) {
                self.hazards.push(position);
            }
        }
        out_events.push(Event::HazardsSpawned {
            positions: self.hazards.clone(),
        });
    }

    fn spawn_pickup(&mut self, position: TilePos, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Running {
            return;
        }
        if self.pickups.len() as u32 >= self.config.max_timer_pickups {
            return;
        }
        if !self.tile_is_clear(position) {
            return;
        }
        self.pickups.push(position);
        out_events.push(Event::PickupSpawned { position });
    }

    fn resolve_quiz(&mut self, resolution: QuizResolution, out_events: &mut Vec<Event>) {
        let Some(suspension) = self.suspension.take() else {
            return;
        };
        if suspension.kind != InterruptKind::Quiz {
            self.suspension = Some(suspension);
            return;
        }

        let correct = matches!(resolution, QuizResolution::Correct { .. });
        let question = match resolution {
            QuizResolution::Correct { question } | QuizResolution::Incorrect { question } => {
                Some(question)
            }
            QuizResolution::Unanswered => None,
        };

        out_events.push(Event::AnswerRecorded {
            correct,
            question: question.clone(),
        });

        if correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
            let streak_before = self.streak;
            self.streak = self.streak.saturating_add(1);
            self.highest_streak = self.highest_streak.max(self.streak);
            self.score = self
                .score
                .saturating_add(100 + streak_before.saturating_sub(1) * 50);
            out_events.push(Event::ScoreChanged {
                score: self.score,
                streak: self.streak,
            });
            if let Some(question) = &question {
                let _ = self.ledger.record(self.intensity.tier(), question);
            }
            self.power_ups.on_correct_answer();
            self.refresh_player_speed();
            let delta = self.clock.credit(self.config.correct_answer_bonus_seconds);
            out_events.push(Event::ClockAdjusted {
                remaining: self.clock.remaining(),
                delta,
            });
        } else {
            self.wrong_answers = self.wrong_answers.saturating_add(1);
            let protected = self.power_ups.on_wrong_answer();
            if !protected {
                self.streak = 0;
            }
            out_events.push(Event::ScoreChanged {
                score: self.score,
                streak: self.streak,
            });
            if let Some(question) = &question {
                let _ = self.ledger.record(self.intensity.tier(), question);
            }
            self.refresh_player_speed();
        }

        // Win or lose, the engaged enemy is removed and the population
        // is restored. Losing carries no further enemy consequence.
        if let Some(enemy_id) = suspension.engaged_enemy {
            self.defeat_enemy(enemy_id, out_events);
        }

        if correct {
            for outcome in self.intensity.on_correct_answer(&self.config) {
                match outcome {
                    IntensityOutcome::Promoted(tier) => {
                        out_events.push(Event::IntensityRaised { tier });
                        self.spawn_power_up_tile(out_events);
                    }
                    IntensityOutcome::BonusPowerUp => self.spawn_power_up_tile(out_events),
                    IntensityOutcome::Completed => {
                        self.end(true, out_events);
                        return;
                    }
                }
            }
        }

        self.phase = SessionPhase::Running;
        out_events.push(Event::SessionResumed {
            interrupt: InterruptKind::Quiz,
        });
    }

    fn resolve_power_up(&mut self, choice: Option<PowerUpEffect>, out_events: &mut Vec<Event>) {
        let Some(suspension) = self.suspension.take() else {
            return;
        };
        if suspension.kind != InterruptKind::PowerUpChoice {
            self.suspension = Some(suspension);
            return;
        }

        match choice {
            Some(effect) => {
                self.power_ups.apply(effect);
                self.refresh_player_speed();
                out_events.push(Event::PowerUpApplied { effect });
            }
            None => out_events.push(Event::PowerUpDeclined),
        }

        self.phase = SessionPhase::Running;
        out_events.push(Event::SessionResumed {
            interrupt: InterruptKind::PowerUpChoice,
        });
    }

    fn begin_suspension(
        &mut self,
        kind: InterruptKind,
        engaged_enemy: Option<EnemyId>,
        out_events: &mut Vec<Event>,
    ) {
        self.phase = SessionPhase::Suspended;
        self.suspension = Some(Suspension {
            kind,
            age: Duration::ZERO,
            engaged_enemy,
        });
        out_events.push(Event::SuspensionStarted { interrupt: kind });
    }

    fn defeat_enemy(&mut self, enemy_id: EnemyId, out_events: &mut Vec<Event>) {
        if let Some(index) = self.enemies.iter().position(|enemy| enemy.id == enemy_id) {
            let enemy = self.enemies.remove(index);
            out_events.push(Event::EnemyDefeated {
                enemy_id: enemy.id,
                position: enemy.position,
            });
        }
        while (self.enemies.len() as u32) < self.config.max_enemies {
            if !self.spawn_enemy(out_events) {
                break;
            }
        }
    }

    fn spawn_enemy(&mut self, out_events: &mut Vec<Event>) -> bool {
        let Some(position) = self.find_clear_tile(ENEMY_SPAWN_CLEARANCE) else {
            return false;
        };
        let enemy_id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        let kind = EnemyKind::ALL[self.kind_cursor % EnemyKind::ALL.len()];
        self.kind_cursor = self.kind_cursor.wrapping_add(1);
        self.enemies.push(Enemy {
            id: enemy_id,
            kind,
            position,
        });
        out_events.push(Event::EnemySpawned {
            enemy_id,
            kind,
            position,
        });
        true
    }

    fn spawn_power_up_tile(&mut self, out_events: &mut Vec<Event>) {
        if self.power_up_tiles.len() as u32 >= self.config.max_power_up_tiles {
            return;
        }
        let Some(position) = self.find_clear_tile(0.0) else {
            return;
        };
        self.power_up_tiles.push(position);
        out_events.push(Event::PowerUpTileSpawned { position });
    }

    fn find_clear_tile(&mut self, player_clearance: f32) -> Option<TilePos> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = self.rng.gen_range(0..self.grid.columns());
            let y = self.rng.gen_range(0..self.grid.rows());
            let candidate = TilePos::new(x, y);
            if !self.tile_is_clear(candidate) {
                continue;
            }
            if candidate.distance(self.player.position) < player_clearance {
                continue;
            }
            return Some(candidate);
        }
        None
    }

    fn tile_is_clear(&self, tile: TilePos) -> bool {
        self.grid.contains(tile)
            && tile != self.player.position
            && !self.enemies.iter().any(|enemy| enemy.position == tile)
            && !self.hazards.contains(&tile)
            && !self.pending_hazards.contains(&tile)
            && !self.pickups.contains(&tile)
            && !self.power_up_tiles.contains(&tile)
    }

    fn enemy_at(&self, tile: TilePos) -> Option<EnemyId> {
        self.enemies
            .iter()
            .find(|enemy| enemy.position == tile)
            .map(|enemy| enemy.id)
    }

    fn refresh_player_speed(&mut self) {
        self.player.effective_speed = self
            .power_ups
            .effective_speed(self.player.base_speed, self.streak);
    }

    fn end(&mut self, completed: bool, out_events: &mut Vec<Event>) {
        self.phase = SessionPhase::Ended;
        self.suspension = None;
        self.completed = completed;
        out_events.push(Event::SessionEnded {
            summary: self.summary(),
        });
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct_answers: self.correct_answers,
            wrong_answers: self.wrong_answers,
            highest_streak: self.highest_streak,
            total_score: self.score,
            completed: self.completed,
            intensity_reached: self.intensity.tier(),
        }
    }
}

/// Applies the provided command to the session, mutating state
/// deterministically and appending the resulting events.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => session.advance_time(dt, out_events),
        Command::RequestMove { direction } => session.request_move(direction, out_events),
        Command::MoveEnemy { enemy_id, to } => session.move_enemy(enemy_id, to, out_events),
        Command::AnnounceHazards { positions } => session.announce_hazards(positions, out_events),
        Command::CommitHazards => session.commit_hazards(out_events),
        Command::SpawnPickup { position } => session.spawn_pickup(position, out_events),
        Command::ResolveQuiz { resolution } => session.resolve_quiz(resolution, out_events),
        Command::ResolvePowerUp { choice } => session.resolve_power_up(choice, out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use quizrush_core::{
        EnemySnapshot, EnemyView, GridSpec, InterruptKind, IntensityTier, PowerUpEffect,
        QuestionId, SessionPhase, SessionSummary, TilePos,
    };

    use super::{PowerUpSnapshot, Session};

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(session: &Session) -> SessionPhase {
        session.phase
    }

    /// Whole seconds left on the countdown clock.
    #[must_use]
    pub fn seconds_remaining(session: &Session) -> u32 {
        session.clock.remaining()
    }

    /// Total score accumulated so far.
    #[must_use]
    pub fn score(session: &Session) -> u32 {
        session.score
    }

    /// Current correct-answer streak.
    #[must_use]
    pub fn streak(session: &Session) -> u32 {
        session.streak
    }

    /// Best streak achieved so far.
    #[must_use]
    pub fn highest_streak(session: &Session) -> u32 {
        session.highest_streak
    }

    /// Intensity tier currently active.
    #[must_use]
    pub fn intensity_tier(session: &Session) -> IntensityTier {
        session.intensity.tier()
    }

    /// Correct answers recorded since entering tier three.
    #[must_use]
    pub fn tier_three_correct_answers(session: &Session) -> u32 {
        session.intensity.tier_three_correct()
    }

    /// Board geometry the session was configured with.
    #[must_use]
    pub fn grid(session: &Session) -> &GridSpec {
        &session.grid
    }

    /// Tile currently occupied by the player.
    #[must_use]
    pub fn player_position(session: &Session) -> TilePos {
        session.player.position
    }

    /// Player speed after power-up and streak modifiers.
    #[must_use]
    pub fn player_effective_speed(session: &Session) -> f32 {
        session.player.effective_speed
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(session: &Session) -> EnemyView {
        EnemyView::from_snapshots(
            session
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    kind: enemy.kind,
                    position: enemy.position,
                })
                .collect(),
        )
    }

    /// Tiles occupied by live hazards.
    #[must_use]
    pub fn hazards(session: &Session) -> &[TilePos] {
        &session.hazards
    }

    /// Announced-but-not-yet-spawned hazard positions (visual warning).
    #[must_use]
    pub fn pending_hazards(session: &Session) -> &[TilePos] {
        &session.pending_hazards
    }

    /// Tiles occupied by timer pickups.
    #[must_use]
    pub fn pickups(session: &Session) -> &[TilePos] {
        &session.pickups
    }

    /// Tiles occupied by collectible power-ups.
    #[must_use]
    pub fn power_up_tiles(session: &Session) -> &[TilePos] {
        &session.power_up_tiles
    }

    /// Kind of interrupt currently awaiting an external resolution.
    #[must_use]
    pub fn pending_interrupt(session: &Session) -> Option<InterruptKind> {
        session.suspension.as_ref().map(|suspension| suspension.kind)
    }

    /// Effects the power-up collaborator may offer the player.
    #[must_use]
    pub fn offerable_effects(_session: &Session) -> Vec<PowerUpEffect> {
        PowerUpEffect::ALL.to_vec()
    }

    /// Question identifiers the quiz collaborator must exclude at the
    /// current tier, in deterministic order.
    #[must_use]
    pub fn excluded_questions(session: &Session) -> Vec<QuestionId> {
        let mut ids: Vec<QuestionId> = session
            .ledger
            .excluded_for(session.intensity.tier())
            .into_iter()
            .collect();
        ids.sort();
        ids
    }

    /// Read-only copy of the applied power-up flags.
    #[must_use]
    pub fn power_ups(session: &Session) -> PowerUpSnapshot {
        session.power_ups.snapshot()
    }

    /// Reports whether the tile is inside the board and unoccupied.
    #[must_use]
    pub fn is_tile_clear(session: &Session, tile: TilePos) -> bool {
        session.tile_is_clear(tile)
    }

    /// Current tallies as they would appear in the final result event.
    #[must_use]
    pub fn summary(session: &Session) -> SessionSummary {
        session.summary()
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: TilePos,
    base_speed: f32,
    effective_speed: f32,
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: TilePos,
}

#[derive(Clone, Copy, Debug)]
struct Suspension {
    kind: InterruptKind,
    age: Duration,
    engaged_enemy: Option<EnemyId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session(config: SessionConfig) -> Session {
        Session::new(config).expect("valid config")
    }

    fn start_running(session: &mut Session) {
        let mut events = Vec::new();
        apply(session, Command::Tick { dt: SECOND * 3 }, &mut events);
        assert_eq!(query::phase(session), SessionPhase::Running);
    }

    #[test]
    fn new_session_places_player_and_enemies() {
        let config = SessionConfig::default();
        let session = new_session(config.clone());

        assert_eq!(query::phase(&session), SessionPhase::Countdown);
        assert_eq!(query::player_position(&session), config.grid().center());
        assert_eq!(query::enemy_view(&session).len(), config.max_enemies as usize);

        let enemies = query::enemy_view(&session).into_vec();
        for (index, enemy) in enemies.iter().enumerate() {
            assert!(config.grid().contains(enemy.position));
            assert_ne!(enemy.position, query::player_position(&session));
            for other in &enemies[index + 1..] {
                assert_ne!(enemy.position, other.position);
            }
        }
    }

    #[test]
    fn enemy_generation_is_deterministic_for_same_seed() {
        let first = new_session(SessionConfig::default());
        let second = new_session(SessionConfig::default());
        assert_eq!(
            query::enemy_view(&first).into_vec(),
            query::enemy_view(&second).into_vec()
        );
    }

    #[test]
    fn countdown_runs_for_three_seconds_before_starting() {
        let mut session = new_session(SessionConfig::default());
        let mut events = Vec::new();

        apply(&mut session, Command::Tick { dt: SECOND }, &mut events);
        apply(&mut session, Command::Tick { dt: SECOND }, &mut events);
        assert_eq!(query::phase(&session), SessionPhase::Countdown);

        apply(&mut session, Command::Tick { dt: SECOND }, &mut events);
        assert_eq!(query::phase(&session), SessionPhase::Running);
        assert!(events.contains(&Event::SessionStarted));
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::CountdownTicked { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn moves_are_denied_during_countdown() {
        let mut session = new_session(SessionConfig::default());
        let before = query::player_position(&session);
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::RequestMove {
                direction: Direction::East,
            },
            &mut events,
        );

        assert_eq!(query::player_position(&session), before);
        assert_eq!(
            events,
            vec![Event::PlayerMoveDenied {
                direction: Direction::East,
                reason: MoveDenied::NotRunning,
            }]
        );
    }

    #[test]
    fn out_of_bounds_moves_are_denied_without_mutation() {
        let config = SessionConfig {
            grid_columns: 1,
            grid_rows: 1,
            max_enemies: 0,
            ..SessionConfig::default()
        };
        let mut session = new_session(config);
        start_running(&mut session);
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::RequestMove {
                direction: Direction::North,
            },
            &mut events,
        );

        assert_eq!(query::player_position(&session), TilePos::new(0, 0));
        assert_eq!(
            events,
            vec![Event::PlayerMoveDenied {
                direction: Direction::North,
                reason: MoveDenied::OutOfBounds,
            }]
        );
    }

    #[test]
    fn running_ticks_drain_the_clock() {
        let mut session = new_session(SessionConfig::default());
        start_running(&mut session);
        let mut events = Vec::new();

        apply(&mut session, Command::Tick { dt: SECOND * 2 }, &mut events);
        assert_eq!(query::seconds_remaining(&session), 58);
        assert!(events.contains(&Event::ClockAdjusted {
            remaining: 59,
            delta: -1,
        }));
    }

    #[test]
    fn pickup_collection_credits_the_clock_with_cap() {
        let config = SessionConfig {
            max_enemies: 0,
            ..SessionConfig::default()
        };
        let mut session = new_session(config);
        start_running(&mut session);
        let mut events = Vec::new();

        let player = query::player_position(&session);
        let target = player
            .step(Direction::East, 15, 10)
            .expect("target inside board");
        apply(
            &mut session,
            Command::SpawnPickup { position: target },
            &mut events,
        );
        assert_eq!(query::pickups(&session), &[target]);

        // Clock is at the 60s cap, so the credit clamps to zero.
        apply(
            &mut session,
            Command::RequestMove {
                direction: Direction::East,
            },
            &mut events,
        );
        assert!(events.contains(&Event::PickupCollected {
            position: target,
            bonus_seconds: 5,
        }));
        assert!(events.contains(&Event::ClockAdjusted {
            remaining: 60,
            delta: 0,
        }));
        assert!(query::pickups(&session).is_empty());
    }

    #[test]
    fn pickup_spawns_respect_the_cap() {
        let config = SessionConfig {
            max_enemies: 0,
            max_timer_pickups: 1,
            ..SessionConfig::default()
        };
        let mut session = new_session(config);
        start_running(&mut session);
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::SpawnPickup {
                position: TilePos::new(0, 0),
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::SpawnPickup {
                position: TilePos::new(1, 0),
            },
            &mut events,
        );

        assert_eq!(query::pickups(&session).len(), 1);
    }

    #[test]
    fn enemy_moves_skip_claimed_destinations() {
        let config = SessionConfig {
            max_enemies: 2,
            ..SessionConfig::default()
        };
        let mut session = new_session(config);
        start_running(&mut session);
        let enemies = query::enemy_view(&session).into_vec();
        let first = enemies[0];
        let second = enemies[1];
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::MoveEnemy {
                enemy_id: first.id,
                to: second.position,
            },
            &mut events,
        );

        assert!(events.is_empty());
        let after = query::enemy_view(&session).into_vec();
        assert_eq!(after[0].position, first.position);
    }

    #[test]
    fn hazard_commit_replaces_previous_batch() {
        let config = SessionConfig {
            max_enemies: 0,
            ..SessionConfig::default()
        };
        let mut session = new_session(config);
        start_running(&mut session);
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::AnnounceHazards {
                positions: vec![TilePos::new(0, 0), TilePos::new(1, 0)],
            },
            &mut events,
        );
        assert_eq!(query::pending_hazards(&session).len(), 2);
        apply(&mut session, Command::CommitHazards, &mut events);
        assert_eq!(query::hazards(&session).len(), 2);
        assert!(query::pending_hazards(&session).is_empty());

        apply(
            &mut session,
            Command::AnnounceHazards {
                positions: vec![TilePos::new(2, 2)],
            },
            &mut events,
        );
        apply(&mut session, Command::CommitHazards, &mut events);
        assert_eq!(query::hazards(&session), &[TilePos::new(2, 2)]);
    }

    #[test]
    fn resolutions_without_a_pending_interrupt_are_ignored() {
        let mut session = new_session(SessionConfig::default());
        start_running(&mut session);
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::ResolveQuiz {
                resolution: QuizResolution::Unanswered,
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::ResolvePowerUp { choice: None },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::phase(&session), SessionPhase::Running);
    }
}
