//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Checking quiz answers (label-prefix match, style-dependent feedback)
//!   - Advancing quiz sessions and producing the end-of-run summary
//!   - Evaluating challenge submissions with locked-slot enforcement

use tracing::{info, instrument, warn};

use crate::config::Feedback;
use crate::domain::{ChallengeRound, Coefficient, Coefficients, PresentationStyle, QuizProblem};
use crate::input::CoefficientField;
use crate::state::{AppState, QuizSession, QUIZ_LENGTH};
use crate::util::fill_template;

/// An answer is correct when the selected label starts with the canonical
/// label of the target type. Graph-mode options carry a suffix
/// ("One Solution: Lines Intersect"), hence prefix matching.
pub fn answer_is_correct(problem: &QuizProblem, selected: &str) -> bool {
  selected.starts_with(problem.target_type.label())
}

/// Feedback for a wrong answer depends on how the problem was shown:
/// graphical problems point at the line relationship, symbolic problems
/// point at the two variable terms.
pub fn wrong_answer_message(feedback: &Feedback, problem: &QuizProblem) -> String {
  match problem.style {
    PresentationStyle::Graphical => feedback.quiz_wrong_graphical.clone(),
    PresentationStyle::Symbolic => fill_template(
      &feedback.quiz_wrong_symbolic,
      &[
        ("a", &problem.coeffs.a.to_string()),
        ("c", &problem.coeffs.c.to_string()),
      ],
    ),
  }
}

/// End-of-run summary line, keyed on the final score.
pub fn quiz_summary(feedback: &Feedback, score: u32) -> String {
  if score == QUIZ_LENGTH {
    feedback.quiz_summary_perfect.clone()
  } else if score >= 7 {
    feedback.quiz_summary_good.clone()
  } else {
    feedback.quiz_summary_keep_practicing.clone()
  }
}

/// Evaluate a quiz answer: consume the problem, score the session, build
/// the feedback message. Unknown session or problem ids are soft errors.
#[instrument(level = "info", skip(state), fields(%session_id, %problem_id))]
pub async fn check_quiz_answer(
  state: &AppState,
  session_id: &str,
  problem_id: &str,
  selected: &str,
) -> (bool, String, Option<QuizSession>) {
  if state.get_session(session_id).await.is_none() {
    warn!(target: "quiz", %session_id, "Answer for unknown session");
    return (false, format!("Unknown sessionId: {}", session_id), None);
  }
  let Some(problem) = state.take_problem(problem_id).await else {
    warn!(target: "quiz", %problem_id, "Answer for unknown or already-answered problem");
    return (false, format!("Unknown problemId: {}", problem_id), None);
  };

  let correct = answer_is_correct(&problem, selected);
  let message = if correct {
    state.feedback.quiz_correct.clone()
  } else {
    wrong_answer_message(&state.feedback, &problem)
  };

  let Some(session) = state.record_answer(session_id, correct).await else {
    warn!(target: "quiz", %session_id, "Answer for unknown session");
    return (false, format!("Unknown sessionId: {}", session_id), None);
  };

  info!(
    target: "quiz",
    session = %session_id,
    %correct,
    score = session.score,
    answered = session.answered,
    "Answer evaluated"
  );
  (correct, message, Some(session))
}

/// Evaluate a challenge submission. Locked slots are re-imposed from the
/// round's dealt values before the goal predicate runs, so the stored side
/// of the equation cannot be edited away. Idempotent: callable any number
/// of times until the round is regenerated.
#[instrument(level = "info", skip(state), fields(%challenge_id))]
pub async fn submit_challenge(
  state: &AppState,
  challenge_id: &str,
  submitted: &Coefficients,
) -> (bool, String, Option<ChallengeRound>) {
  let Some(round) = state.get_challenge(challenge_id).await else {
    warn!(target: "challenge", %challenge_id, "Submission for unknown challenge");
    return (false, format!("Unknown challengeId: {}", challenge_id), None);
  };

  let effective = round.apply_submission(submitted);
  let solved = round.goal_met(&effective);

  let updated = ChallengeRound {
    current: effective,
    solved,
    ..round
  };
  state.update_challenge(updated.clone()).await;

  let message = if solved {
    state.feedback.challenge_solved.clone()
  } else {
    state.feedback.challenge_missed.clone()
  };
  info!(
    target: "challenge",
    id = %challenge_id,
    goal = updated.goal.label(),
    %solved,
    "Submission evaluated"
  );
  (solved, message, Some(updated))
}

/// Apply a text edit to one coefficient slot of an active round.
///
/// The tolerant field semantics live in `input::CoefficientField`: text
/// that parses commits immediately, intermediate states ("" or "-") leave
/// the stored value alone, and a final edit (`commit = true`) with
/// unparseable text reverts to the stored value. Locked slots reject the
/// edit outright.
#[instrument(level = "debug", skip(state), fields(%challenge_id, slot = ?slot, commit))]
pub async fn edit_coefficient(
  state: &AppState,
  challenge_id: &str,
  slot: Coefficient,
  text: &str,
  commit: bool,
) -> Result<(i64, String), String> {
  let Some(round) = state.get_challenge(challenge_id).await else {
    warn!(target: "challenge", %challenge_id, "Edit for unknown challenge");
    return Err(format!("Unknown challengeId: {}", challenge_id));
  };
  if round.edit_mode.is_locked(slot) {
    return Err(format!("Coefficient {:?} is locked for this round", slot));
  }

  let mut field = CoefficientField::new(round.current.get(slot));
  field.type_text(text);
  if commit {
    field.commit();
  }

  let mut updated = round;
  updated.current.set(slot, field.value());
  state.update_challenge(updated).await;
  Ok((field.value(), field.text().to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{PresentationStyle, QuizProblem, SolutionType};

  fn problem(target: SolutionType, style: PresentationStyle) -> QuizProblem {
    QuizProblem {
      id: "p1".into(),
      coeffs: Coefficients::new(2, 1, -1, 4),
      target_type: target,
      style,
    }
  }

  #[test]
  fn prefix_matching_accepts_graph_mode_labels() {
    let p = problem(SolutionType::OneSolution, PresentationStyle::Graphical);
    assert!(answer_is_correct(&p, "One Solution"));
    assert!(answer_is_correct(&p, "One Solution: Lines Intersect"));
    assert!(!answer_is_correct(&p, "No Solution: Lines are Parallel"));
  }

  #[test]
  fn symbolic_feedback_names_the_variable_terms() {
    let feedback = Feedback::default();
    let p = problem(SolutionType::NoSolution, PresentationStyle::Symbolic);
    let msg = wrong_answer_message(&feedback, &p);
    assert!(msg.contains("2x"), "got: {msg}");
    assert!(msg.contains("-1x"), "got: {msg}");
  }

  #[test]
  fn graphical_feedback_talks_about_lines() {
    let feedback = Feedback::default();
    let p = problem(SolutionType::NoSolution, PresentationStyle::Graphical);
    let msg = wrong_answer_message(&feedback, &p);
    assert_eq!(msg, feedback.quiz_wrong_graphical);
  }

  #[test]
  fn summary_tiers() {
    let feedback = Feedback::default();
    assert_eq!(quiz_summary(&feedback, 10), feedback.quiz_summary_perfect);
    assert_eq!(quiz_summary(&feedback, 7), feedback.quiz_summary_good);
    assert_eq!(quiz_summary(&feedback, 6), feedback.quiz_summary_keep_practicing);
  }

  #[tokio::test]
  async fn full_quiz_session_finishes_after_ten_answers() {
    let state = AppState::new();
    let (session, mut problem) = state.start_quiz().await;

    let mut last = None;
    for i in 0..QUIZ_LENGTH {
      // Always answer with the correct label.
      let label = problem.target_type.label().to_string();
      let (correct, _msg, snapshot) =
        check_quiz_answer(&state, &session.id, &problem.id, &label).await;
      assert!(correct);
      let snapshot = snapshot.expect("session snapshot");
      assert_eq!(snapshot.answered, i + 1);
      assert_eq!(snapshot.score, i + 1);
      last = Some(snapshot.clone());

      if snapshot.finished {
        break;
      }
      problem = state.next_problem(&session.id).await.expect("next problem");
    }

    let last = last.expect("at least one answer");
    assert!(last.finished);
    assert_eq!(last.score, QUIZ_LENGTH);
    assert!(state.next_problem(&session.id).await.is_none());
    assert_eq!(quiz_summary(&state.feedback, last.score), state.feedback.quiz_summary_perfect);
  }

  #[tokio::test]
  async fn a_problem_is_consumed_by_one_answer() {
    let state = AppState::new();
    let (session, problem) = state.start_quiz().await;
    let label = problem.target_type.label().to_string();

    let (first, _, _) = check_quiz_answer(&state, &session.id, &problem.id, &label).await;
    assert!(first);
    let (second, msg, snapshot) =
      check_quiz_answer(&state, &session.id, &problem.id, &label).await;
    assert!(!second);
    assert!(msg.contains("Unknown problemId"));
    assert!(snapshot.is_none());
  }

  #[tokio::test]
  async fn editing_a_locked_slot_is_rejected() {
    let state = AppState::new();
    let mut round = state.new_challenge().await;
    round.edit_mode = crate::domain::EditMode::EditRight;
    state.update_challenge(round.clone()).await;

    let err = edit_coefficient(&state, &round.id, Coefficient::A, "7", true)
      .await
      .expect_err("locked slot");
    assert!(err.contains("locked"));
  }

  #[tokio::test]
  async fn editing_tolerates_intermediate_text() {
    let state = AppState::new();
    let mut round = state.new_challenge().await;
    round.edit_mode = crate::domain::EditMode::EditBoth;
    round.initial = Coefficients::new(0, 0, 0, 0);
    round.current = Coefficients::new(2, 0, 0, 0);
    state.update_challenge(round.clone()).await;

    // A lone minus sign keeps the stored value.
    let (value, text) = edit_coefficient(&state, &round.id, Coefficient::A, "-", false)
      .await
      .expect("editable slot");
    assert_eq!(value, 2);
    assert_eq!(text, "-");

    // Finishing the edit with garbage reverts.
    let (value, text) = edit_coefficient(&state, &round.id, Coefficient::A, "-", true)
      .await
      .expect("editable slot");
    assert_eq!(value, 2);
    assert_eq!(text, "2");

    // A real number commits and sticks in the stored round.
    let (value, _) = edit_coefficient(&state, &round.id, Coefficient::A, "-9", false)
      .await
      .expect("editable slot");
    assert_eq!(value, -9);
    let stored = state.get_challenge(&round.id).await.expect("round");
    assert_eq!(stored.current.a, -9);
  }

  #[tokio::test]
  async fn challenge_round_trip_respects_locks() {
    let state = AppState::new();
    let mut round = state.new_challenge().await;
    // Pin the round to a known shape for the assertions below.
    round.goal = SolutionType::NoSolution;
    round.edit_mode = crate::domain::EditMode::EditLeft;
    round.initial = Coefficients::new(0, 0, 3, -2);
    round.current = round.initial;
    round.solved = false;
    state.update_challenge(round.clone()).await;

    // Trying to overwrite the locked right side has no effect; the left
    // side edits land. a==c and b!=d: goal met.
    let submitted = Coefficients::new(3, 5, 9, 9);
    let (solved, msg, updated) = submit_challenge(&state, &round.id, &submitted).await;
    assert!(solved, "{msg}");
    let updated = updated.expect("round");
    assert_eq!(updated.current, Coefficients::new(3, 5, 3, -2));
    assert!(updated.solved);

    // Failed submit keeps the round active.
    let (solved, _, updated) =
      submit_challenge(&state, &round.id, &Coefficients::new(1, 5, 9, 9)).await;
    assert!(!solved);
    assert!(!updated.expect("round").solved);
  }
}
