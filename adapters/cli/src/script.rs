//! Stand-in collaborators that let the session play itself end to end.

use quizrush_core::{
    Direction, IntensityTier, PowerUpEffect, QuestionId, QuestionKind, QuestionRecord,
    QuizResolution, TilePos,
};
use quizrush_session::{query, Session};

/// Every Nth answer is deliberately wrong so streak resets get exercised.
const WRONG_ANSWER_CADENCE: u64 = 5;

const QUESTION_BANK: &[(&str, &str)] = &[
    ("Which keyword introduces an immutable binding?", "syntax"),
    ("What does the question mark operator propagate?", "syntax"),
    ("Which keyword makes a binding mutable?", "syntax"),
    ("What punctuation ends a statement expression?", "syntax"),
    ("What does the borrow checker verify?", "concepts"),
    ("What happens to a value when it goes out of scope?", "concepts"),
    ("How many mutable references may alias at once?", "concepts"),
    ("What trait powers the for loop?", "concepts"),
    ("Which macro prints a value for inspection?", "debugging"),
    ("What does a panic unwind by default?", "debugging"),
    ("Which attribute marks a unit test?", "debugging"),
    ("What does an integer overflow do in debug builds?", "debugging"),
];

/// Deterministic quiz collaborator backed by a fixed question bank.
///
/// Questions already excluded for the active tier are skipped; once the
/// bank is exhausted the script falls back to repeats, which the ledger
/// tolerates.
#[derive(Debug, Default)]
pub(crate) struct ScriptedQuiz {
    answered: u64,
}

impl ScriptedQuiz {
    pub(crate) fn answer(
        &mut self,
        _tier: IntensityTier,
        excluded: &[QuestionId],
    ) -> QuizResolution {
        let question = QUESTION_BANK
            .iter()
            .map(|(text, kind)| QuestionRecord {
                id: QuestionId::from_text(text),
                kind: QuestionKind::new(*kind),
            })
            .find(|record| !excluded.contains(&record.id))
            .unwrap_or_else(|| {
                let (text, kind) = QUESTION_BANK[0];
                QuestionRecord {
                    id: QuestionId::from_text(text),
                    kind: QuestionKind::new(kind),
                }
            });

        self.answered += 1;
        if self.answered % WRONG_ANSWER_CADENCE == 0 {
            QuizResolution::Incorrect { question }
        } else {
            QuizResolution::Correct { question }
        }
    }
}

/// Deterministic power-up collaborator cycling through the offered effects.
#[derive(Debug, Default)]
pub(crate) struct ScriptedChooser {
    picks: usize,
}

impl ScriptedChooser {
    pub(crate) fn choose(&mut self, offered: &[PowerUpEffect]) -> Option<PowerUpEffect> {
        if offered.is_empty() {
            return None;
        }
        let effect = offered[self.picks % offered.len()];
        self.picks += 1;
        Some(effect)
    }
}

/// One greedy step toward the nearest enemy, or the nearest pickup when
/// the board has no enemies.
pub(crate) fn plan_step(session: &Session) -> Option<Direction> {
    let player = query::player_position(session);
    let enemy_target = query::enemy_view(session)
        .into_vec()
        .into_iter()
        .map(|enemy| enemy.position)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
    let target = enemy_target.or_else(|| {
        query::pickups(session)
            .iter()
            .copied()
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
    })?;
    direction_toward(player, target)
}

fn direction_toward(from: TilePos, to: TilePos) -> Option<Direction> {
    let dx = (i64::from(to.x()) - i64::from(from.x())).signum() as i32;
    let dy = (i64::from(to.y()) - i64::from(from.y())).signum() as i32;
    Direction::ALL
        .into_iter()
        .find(|direction| direction.offsets() == (dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_skips_excluded_questions() {
        let mut quiz = ScriptedQuiz::default();
        let first_id = QuestionId::from_text(QUESTION_BANK[0].0);
        let resolution = quiz.answer(IntensityTier::One, &[first_id]);
        match resolution {
            QuizResolution::Correct { question } => {
                assert_ne!(question.id, first_id);
            }
            other => panic!("unexpected resolution {other:?}"),
        }
    }

    #[test]
    fn quiz_misses_on_a_fixed_cadence() {
        let mut quiz = ScriptedQuiz::default();
        let mut wrong = 0;
        for _ in 0..10 {
            if matches!(
                quiz.answer(IntensityTier::One, &[]),
                QuizResolution::Incorrect { .. }
            ) {
                wrong += 1;
            }
        }
        assert_eq!(wrong, 2);
    }

    #[test]
    fn chooser_cycles_through_offered_effects() {
        let mut chooser = ScriptedChooser::default();
        let offered = PowerUpEffect::ALL;
        assert_eq!(chooser.choose(&offered), Some(offered[0]));
        assert_eq!(chooser.choose(&offered), Some(offered[1]));
        assert_eq!(chooser.choose(&offered), Some(offered[2]));
        assert_eq!(chooser.choose(&offered), Some(offered[0]));
        assert_eq!(chooser.choose(&[]), None);
    }

    #[test]
    fn steps_point_at_the_target() {
        assert_eq!(
            direction_toward(TilePos::new(3, 3), TilePos::new(5, 3)),
            Some(Direction::East)
        );
        assert_eq!(
            direction_toward(TilePos::new(3, 3), TilePos::new(1, 5)),
            Some(Direction::SouthWest)
        );
        assert_eq!(direction_toward(TilePos::new(3, 3), TilePos::new(3, 3)), None);
    }
}
