//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; unknown ids come back as 404 + error JSON.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::logic::{check_quiz_answer, edit_coefficient, quiz_summary, submit_challenge};
use crate::protocol::*;
use crate::state::{AppState, QUIZ_LENGTH};

#[derive(serde::Serialize)]
struct ErrorOut {
  error: String,
}

fn not_found(message: String) -> axum::response::Response {
  (StatusCode::NOT_FOUND, Json(ErrorOut { error: message })).into_response()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(body), fields(a = body.a, b = body.b, c = body.c, d = body.d))]
pub async fn http_post_explore(Json(body): Json<ExploreIn>) -> impl IntoResponse {
  let out = explore_out(&body.coeffs(), body.half_range);
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_quiz_start(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let (session, problem) = state.start_quiz().await;
  info!(target: "quiz", session = %session.id, "HTTP quiz started");
  Json(quiz_start_out(&session, &problem))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, %body.problem_id))]
pub async fn http_post_quiz_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> impl IntoResponse {
  let (correct, message, session) =
    check_quiz_answer(&state, &body.session_id, &body.problem_id, &body.answer).await;
  let Some(session) = session else {
    return not_found(message);
  };
  let summary = session.finished.then(|| quiz_summary(&state.feedback, session.score));
  Json(AnswerOut {
    correct,
    message,
    score: session.score,
    answered: session.answered,
    total: QUIZ_LENGTH,
    finished: session.finished,
    summary,
  })
  .into_response()
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_post_quiz_next(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NextQuestionIn>,
) -> impl IntoResponse {
  let Some(session) = state.get_session(&body.session_id).await else {
    return not_found(format!("Unknown sessionId: {}", body.session_id));
  };
  if session.finished {
    return Json(NextQuestionOut {
      problem: None,
      question_number: session.answered,
      total: QUIZ_LENGTH,
      score: session.score,
      finished: true,
    })
    .into_response();
  }
  let Some(problem) = state.next_problem(&body.session_id).await else {
    return not_found(format!("Unknown sessionId: {}", body.session_id));
  };
  Json(NextQuestionOut {
    problem: Some(to_problem_out(&problem)),
    question_number: session.answered + 1,
    total: QUIZ_LENGTH,
    score: session.score,
    finished: false,
  })
  .into_response()
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_challenge(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let round = state.new_challenge().await;
  info!(target: "challenge", id = %round.id, "HTTP challenge served");
  Json(to_challenge_out(&round))
}

#[instrument(level = "info", skip(state, body), fields(%body.challenge_id, slot = ?body.slot))]
pub async fn http_post_challenge_edit(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EditCoefficientIn>,
) -> impl IntoResponse {
  match edit_coefficient(&state, &body.challenge_id, body.slot, &body.text, body.commit).await {
    Ok((value, text)) => Json(EditCoefficientOut { slot: body.slot, value, text }).into_response(),
    Err(message) => not_found(message),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.challenge_id))]
pub async fn http_post_challenge_submit(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChallengeSubmitIn>,
) -> impl IntoResponse {
  let (solved, message, round) = submit_challenge(&state, &body.challenge_id, &body.coeffs()).await;
  let Some(round) = round else {
    return not_found(message);
  };
  Json(ChallengeSubmitOut {
    solved,
    message,
    round: to_challenge_out(&round),
  })
  .into_response()
}
