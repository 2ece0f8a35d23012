//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::domain::Coefficients;
use crate::logic::{check_quiz_answer, edit_coefficient, quiz_summary, submit_challenge};
use crate::protocol::*;
use crate::state::{AppState, QUIZ_LENGTH};

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "eqx_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "eqx_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target = "eqx_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "eqx_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "eqx_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Explore { a, b, c, d, half_range } => {
      let out = explore_out(&Coefficients::new(a, b, c, d), half_range);
      ServerWsMessage::Explore(out)
    }

    ClientWsMessage::StartQuiz => {
      let (session, problem) = state.start_quiz().await;
      tracing::info!(target: "quiz", session = %session.id, "WS quiz started");
      ServerWsMessage::QuizStarted(quiz_start_out(&session, &problem))
    }

    ClientWsMessage::SubmitAnswer { session_id, problem_id, answer } => {
      let (correct, message, session) =
        check_quiz_answer(state, &session_id, &problem_id, &answer).await;
      let Some(session) = session else {
        return ServerWsMessage::Error { message };
      };
      let summary = session.finished.then(|| quiz_summary(&state.feedback, session.score));
      ServerWsMessage::AnswerResult(AnswerOut {
        correct,
        message,
        score: session.score,
        answered: session.answered,
        total: QUIZ_LENGTH,
        finished: session.finished,
        summary,
      })
    }

    ClientWsMessage::NextQuestion { session_id } => {
      let Some(session) = state.get_session(&session_id).await else {
        return ServerWsMessage::Error { message: format!("Unknown sessionId: {}", session_id) };
      };
      if session.finished {
        return ServerWsMessage::NextQuestion(NextQuestionOut {
          problem: None,
          question_number: session.answered,
          total: QUIZ_LENGTH,
          score: session.score,
          finished: true,
        });
      }
      match state.next_problem(&session_id).await {
        Some(problem) => ServerWsMessage::NextQuestion(NextQuestionOut {
          problem: Some(to_problem_out(&problem)),
          question_number: session.answered + 1,
          total: QUIZ_LENGTH,
          score: session.score,
          finished: false,
        }),
        None => ServerWsMessage::Error { message: format!("Unknown sessionId: {}", session_id) },
      }
    }

    ClientWsMessage::NewChallenge => {
      let round = state.new_challenge().await;
      tracing::info!(target: "challenge", id = %round.id, "WS challenge served");
      ServerWsMessage::Challenge(to_challenge_out(&round))
    }

    ClientWsMessage::EditCoefficient { challenge_id, slot, text, commit } => {
      match edit_coefficient(state, &challenge_id, slot, &text, commit).await {
        Ok((value, text)) => {
          ServerWsMessage::CoefficientEdited(EditCoefficientOut { slot, value, text })
        }
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::SubmitChallenge { challenge_id, a, b, c, d } => {
      let (solved, message, round) =
        submit_challenge(state, &challenge_id, &Coefficients::new(a, b, c, d)).await;
      let Some(round) = round else {
        return ServerWsMessage::Error { message };
      };
      ServerWsMessage::ChallengeResult(ChallengeSubmitOut {
        solved,
        message,
        round: to_challenge_out(&round),
      })
    }
  }
}
