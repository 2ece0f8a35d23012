//! Random problem generation for the quiz and challenge modes.
//!
//! Flow:
//! 1) Pick a target solution type (quiz) or goal + edit mode (challenge)
//!    uniformly.
//! 2) Draw coefficients from the configured bounds so the classification
//!    matches the target by construction.
//! 3) Hand the result to the stores; handlers serve it by id.

use rand::Rng;
use uuid::Uuid;

use crate::config::GeneratorBounds;
use crate::domain::{
  ChallengeRound, Coefficients, EditMode, PresentationStyle, QuizProblem, SolutionType,
};
use crate::equation::classify;

const EDIT_MODES: [EditMode; 3] = [EditMode::EditRight, EditMode::EditLeft, EditMode::EditBoth];

/// Generate a quiz problem whose classification equals a uniformly chosen
/// target type, shown either symbolically or as a graph.
pub fn generate_quiz_problem(bounds: &GeneratorBounds) -> QuizProblem {
  let mut rng = rand::thread_rng();
  let target_type = SolutionType::ALL[rng.gen_range(0..SolutionType::ALL.len())];
  let style = if rng.gen_bool(0.5) {
    PresentationStyle::Symbolic
  } else {
    PresentationStyle::Graphical
  };

  let slope = bounds.quiz_slope_min..=bounds.quiz_slope_max;
  let intercept = bounds.quiz_intercept_min..=bounds.quiz_intercept_max;

  let a = rng.gen_range(slope.clone());
  let b = rng.gen_range(intercept.clone());
  let (c, d) = match target_type {
    SolutionType::OneSolution => {
      // Offsetting the slope guarantees a != c regardless of the draw.
      let offset = rng.gen_range(1..=bounds.quiz_offset_max);
      let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
      (a + offset * sign, rng.gen_range(intercept.clone()))
    }
    SolutionType::NoSolution => {
      // Rejection loop: terminates because the intercept range holds at
      // least two values (enforced by GeneratorBounds::validated).
      assert!(bounds.quiz_intercept_min < bounds.quiz_intercept_max);
      let mut d = rng.gen_range(intercept.clone());
      while d == b {
        d = rng.gen_range(intercept.clone());
      }
      (a, d)
    }
    SolutionType::InfiniteSolutions => (a, b),
  };

  let coeffs = Coefficients::new(a, b, c, d);
  debug_assert_eq!(classify(&coeffs), target_type);

  QuizProblem {
    id: Uuid::new_v4().to_string(),
    coeffs,
    target_type,
    style,
  }
}

/// Deal a new "fix the equation" round: a uniformly chosen goal, an edit
/// mode deciding which side is locked, random starting values for the
/// unlocked slots and zeroes elsewhere.
///
/// The start is not checked against the goal, so a round can occasionally
/// begin already solvable with no edits (e.g. edit-both + one-solution).
/// That mirrors how the game has always dealt rounds.
pub fn generate_challenge(bounds: &GeneratorBounds) -> ChallengeRound {
  let mut rng = rand::thread_rng();
  let goal = SolutionType::ALL[rng.gen_range(0..SolutionType::ALL.len())];
  let edit_mode = EDIT_MODES[rng.gen_range(0..EDIT_MODES.len())];

  let mut a = rng.gen_range(bounds.challenge_slope_min..=bounds.challenge_slope_max);
  let mut b = rng.gen_range(bounds.challenge_intercept_min..=bounds.challenge_intercept_max);
  let mut c = rng.gen_range(bounds.challenge_slope_min..=bounds.challenge_slope_max);
  let mut d = rng.gen_range(bounds.challenge_intercept_min..=bounds.challenge_intercept_max);

  match edit_mode {
    EditMode::EditRight => {
      c = 0;
      d = 0;
    }
    EditMode::EditLeft => {
      a = 0;
      b = 0;
    }
    EditMode::EditBoth => {
      a = 0;
      b = 0;
      c = 0;
      d = 0;
    }
  }

  let initial = Coefficients::new(a, b, c, d);
  ChallengeRound {
    id: Uuid::new_v4().to_string(),
    goal,
    edit_mode,
    initial,
    current: initial,
    solved: false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Coefficient;

  #[test]
  fn quiz_problems_always_match_their_target() {
    let bounds = GeneratorBounds::default();
    for _ in 0..2000 {
      let p = generate_quiz_problem(&bounds);
      assert_eq!(
        classify(&p.coeffs),
        p.target_type,
        "coeffs {:?} misclassified",
        p.coeffs
      );
    }
  }

  #[test]
  fn quiz_draws_stay_inside_bounds() {
    let bounds = GeneratorBounds::default();
    for _ in 0..500 {
      let p = generate_quiz_problem(&bounds);
      assert!(p.coeffs.a >= bounds.quiz_slope_min && p.coeffs.a <= bounds.quiz_slope_max);
      assert!(p.coeffs.b >= bounds.quiz_intercept_min && p.coeffs.b <= bounds.quiz_intercept_max);
      // c may exceed the slope range by at most the offset.
      assert!(p.coeffs.c >= bounds.quiz_slope_min - bounds.quiz_offset_max);
      assert!(p.coeffs.c <= bounds.quiz_slope_max + bounds.quiz_offset_max);
    }
  }

  #[test]
  fn challenge_zeroes_the_editable_side() {
    let bounds = GeneratorBounds::default();
    for _ in 0..500 {
      let round = generate_challenge(&bounds);
      match round.edit_mode {
        EditMode::EditRight => {
          assert_eq!(round.initial.c, 0);
          assert_eq!(round.initial.d, 0);
          assert!(round.edit_mode.is_locked(Coefficient::A));
          assert!(round.edit_mode.is_locked(Coefficient::B));
        }
        EditMode::EditLeft => {
          assert_eq!(round.initial.a, 0);
          assert_eq!(round.initial.b, 0);
          assert!(round.edit_mode.is_locked(Coefficient::C));
          assert!(round.edit_mode.is_locked(Coefficient::D));
        }
        EditMode::EditBoth => {
          assert_eq!(round.initial, Coefficients::new(0, 0, 0, 0));
          assert!(round.edit_mode.locked_slots().is_empty());
        }
      }
      assert!(!round.solved);
      assert_eq!(round.initial, round.current);
    }
  }

  #[test]
  fn locked_slots_survive_any_submission() {
    let bounds = GeneratorBounds::default();
    for _ in 0..500 {
      let round = generate_challenge(&bounds);
      let wild = Coefficients::new(99, -99, 42, -42);
      let merged = round.apply_submission(&wild);
      match round.edit_mode {
        EditMode::EditRight => {
          assert_eq!(merged.a, round.initial.a);
          assert_eq!(merged.b, round.initial.b);
          assert_eq!(merged.c, 42);
          assert_eq!(merged.d, -42);
        }
        EditMode::EditLeft => {
          assert_eq!(merged.c, round.initial.c);
          assert_eq!(merged.d, round.initial.d);
          assert_eq!(merged.a, 99);
          assert_eq!(merged.b, -99);
        }
        EditMode::EditBoth => assert_eq!(merged, wild),
      }
    }
  }

  #[test]
  fn goal_predicates_match_the_spec_examples() {
    let bounds = GeneratorBounds::default();
    let mut round = generate_challenge(&bounds);
    round.goal = SolutionType::NoSolution;
    assert!(round.goal_met(&Coefficients::new(4, 1, 4, 2)));
    assert!(!round.goal_met(&Coefficients::new(4, 1, 5, 2)));

    round.goal = SolutionType::InfiniteSolutions;
    assert!(round.goal_met(&Coefficients::new(-2, 7, -2, 7)));
    assert!(!round.goal_met(&Coefficients::new(-2, 7, -2, 8)));

    round.goal = SolutionType::OneSolution;
    assert!(round.goal_met(&Coefficients::new(2, 1, -1, 4)));
    assert!(!round.goal_met(&Coefficients::new(3, 5, 3, -2)));
  }

  #[test]
  fn degenerate_bounds_fall_back_to_defaults() {
    let mut bounds = GeneratorBounds::default();
    bounds.quiz_intercept_min = 5;
    bounds.quiz_intercept_max = 5;
    let validated = bounds.validated();
    assert!(validated.quiz_intercept_min < validated.quiz_intercept_max);
  }
}
