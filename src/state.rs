//! Application state: in-memory stores for quiz sessions, open quiz
//! problems and challenge rounds, plus the loaded configuration.
//!
//! Nothing is persisted; a restart simply forgets every round in flight.
//! All stores sit behind `tokio::sync::RwLock` because the HTTP and
//! WebSocket handlers share one `Arc<AppState>`.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_app_config_from_env, Feedback, GeneratorBounds};
use crate::domain::{ChallengeRound, QuizProblem};
use crate::generate::{generate_challenge, generate_quiz_problem};

/// Questions per quiz run.
pub const QUIZ_LENGTH: u32 = 10;

/// One learner's quiz run: running score and how many questions they have
/// answered so far.
#[derive(Clone, Debug)]
pub struct QuizSession {
    pub id: String,
    pub score: u32,
    pub answered: u32,
    pub finished: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
    pub open_problems: Arc<RwLock<HashMap<String, QuizProblem>>>,
    pub challenges: Arc<RwLock<HashMap<String, ChallengeRound>>>,
    pub feedback: Feedback,
    pub bounds: GeneratorBounds,
}

impl AppState {
    /// Build state from env: load optional TOML config, validate generator
    /// bounds, start with empty stores.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();
        let bounds = cfg.bounds.validated();
        info!(
            target: "eqx_backend",
            quiz_slopes = %format!("{}..={}", bounds.quiz_slope_min, bounds.quiz_slope_max),
            quiz_intercepts = %format!("{}..={}", bounds.quiz_intercept_min, bounds.quiz_intercept_max),
            "Generator bounds ready"
        );

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            open_problems: Arc::new(RwLock::new(HashMap::new())),
            challenges: Arc::new(RwLock::new(HashMap::new())),
            feedback: cfg.feedback,
            bounds,
        }
    }

    /// Start a fresh quiz run and deal its first problem.
    #[instrument(level = "info", skip(self))]
    pub async fn start_quiz(&self) -> (QuizSession, QuizProblem) {
        let session = QuizSession {
            id: Uuid::new_v4().to_string(),
            score: 0,
            answered: 0,
            finished: false,
        };
        let problem = generate_quiz_problem(&self.bounds);
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        self.open_problems
            .write()
            .await
            .insert(problem.id.clone(), problem.clone());
        info!(target: "quiz", session = %session.id, problem = %problem.id, "Quiz started");
        (session, problem)
    }

    pub async fn get_session(&self, id: &str) -> Option<QuizSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Take a problem out of the open store. Each problem is answerable
    /// exactly once; a second take on the same id returns None.
    pub async fn take_problem(&self, id: &str) -> Option<QuizProblem> {
        self.open_problems.write().await.remove(id)
    }

    /// Record an answer against a session, returning the updated snapshot.
    /// None when the session id is unknown.
    #[instrument(level = "debug", skip(self), fields(%session_id, correct))]
    pub async fn record_answer(&self, session_id: &str, correct: bool) -> Option<QuizSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(session_id)?;
        if session.finished {
            return Some(session.clone());
        }
        session.answered += 1;
        if correct {
            session.score += 1;
        }
        if session.answered >= QUIZ_LENGTH {
            session.finished = true;
        }
        Some(session.clone())
    }

    /// Deal the next problem for a running session. None when the session
    /// is unknown or already finished.
    #[instrument(level = "info", skip(self), fields(%session_id))]
    pub async fn next_problem(&self, session_id: &str) -> Option<QuizProblem> {
        let session = self.get_session(session_id).await?;
        if session.finished {
            return None;
        }
        let problem = generate_quiz_problem(&self.bounds);
        self.open_problems
            .write()
            .await
            .insert(problem.id.clone(), problem.clone());
        info!(target: "quiz", session = %session_id, problem = %problem.id, "Next problem dealt");
        Some(problem)
    }

    /// Deal a fresh challenge round and store it. Any previous round kept
    /// by the same client is simply abandoned in the store.
    #[instrument(level = "info", skip(self))]
    pub async fn new_challenge(&self) -> ChallengeRound {
        let round = generate_challenge(&self.bounds);
        self.challenges
            .write()
            .await
            .insert(round.id.clone(), round.clone());
        info!(
            target: "challenge",
            id = %round.id,
            goal = round.goal.label(),
            edit_mode = ?round.edit_mode,
            "Challenge dealt"
        );
        round
    }

    pub async fn get_challenge(&self, id: &str) -> Option<ChallengeRound> {
        self.challenges.read().await.get(id).cloned()
    }

    /// Overwrite a stored round (after a submission updated it).
    pub async fn update_challenge(&self, round: ChallengeRound) {
        self.challenges.write().await.insert(round.id.clone(), round);
    }
}
