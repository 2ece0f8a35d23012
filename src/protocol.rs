//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ChallengeRound, Coefficient, Coefficients, EditMode, IntersectionPoint, PresentationStyle,
    QuizProblem, SamplePoint, SolutionType,
};
use crate::equation::{classify, format_equation, intersection, sample_points};
use crate::state::{QuizSession, QUIZ_LENGTH};

/// Fixed half-range used when a quiz or challenge chart is rendered (the
/// explore view lets the client pick its own).
pub const QUIZ_GRAPH_HALF_RANGE: i64 = 10;

/// Largest half-range the explore API accepts; the axis slider tops out
/// here. Also bounds how many sample points one request can ask for.
pub const EXPLORE_HALF_RANGE_MAX: i64 = 50;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Explore {
        a: i64,
        b: i64,
        c: i64,
        d: i64,
        #[serde(rename = "halfRange")]
        half_range: Option<i64>,
    },
    StartQuiz,
    SubmitAnswer {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(rename = "problemId")]
        problem_id: String,
        answer: String,
    },
    NextQuestion {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    NewChallenge,
    EditCoefficient {
        #[serde(rename = "challengeId")]
        challenge_id: String,
        slot: Coefficient,
        text: String,
        #[serde(default)]
        commit: bool,
    },
    SubmitChallenge {
        #[serde(rename = "challengeId")]
        challenge_id: String,
        a: i64,
        b: i64,
        c: i64,
        d: i64,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Explore(ExploreOut),
    QuizStarted(QuizStartOut),
    AnswerResult(AnswerOut),
    NextQuestion(NextQuestionOut),
    Challenge(ChallengeOut),
    CoefficientEdited(EditCoefficientOut),
    ChallengeResult(ChallengeSubmitOut),
    Error {
        message: String,
    },
}

/// DTO for a served quiz problem. The target type deliberately stays
/// server-side so the client cannot read the answer off the wire.
#[derive(Debug, Serialize)]
pub struct QuizProblemOut {
    pub id: String,
    pub style: PresentationStyle,
    /// Present for symbolic problems.
    pub equation: Option<String>,
    /// Present for graphical problems.
    pub points: Option<Vec<SamplePoint>>,
    /// Answer buttons, in display order.
    pub options: Vec<String>,
}

/// Convert an internal `QuizProblem` to the public DTO.
pub fn to_problem_out(p: &QuizProblem) -> QuizProblemOut {
    let (equation, points, options) = match p.style {
        PresentationStyle::Symbolic => (
            Some(format_equation(&p.coeffs)),
            None,
            vec![
                "One Solution".to_string(),
                "No Solution".to_string(),
                "Infinite Solutions".to_string(),
            ],
        ),
        PresentationStyle::Graphical => (
            None,
            Some(sample_points(&p.coeffs, QUIZ_GRAPH_HALF_RANGE)),
            vec![
                "One Solution: Lines Intersect".to_string(),
                "No Solution: Lines are Parallel".to_string(),
                "Infinite Solutions: Lines are Identical".to_string(),
            ],
        ),
    };
    QuizProblemOut {
        id: p.id.clone(),
        style: p.style,
        equation,
        points,
        options,
    }
}

/// DTO for a challenge round. Locked slots are listed so the UI can hide
/// those inputs; their values travel in `coeffs`.
#[derive(Debug, Serialize)]
pub struct ChallengeOut {
    pub id: String,
    pub goal: String,
    #[serde(rename = "editMode")]
    pub edit_mode: EditMode,
    pub locked: Vec<Coefficient>,
    pub coeffs: Coefficients,
    pub equation: String,
    pub solved: bool,
}

pub fn to_challenge_out(round: &ChallengeRound) -> ChallengeOut {
    ChallengeOut {
        id: round.id.clone(),
        goal: round.goal.label().to_string(),
        edit_mode: round.edit_mode,
        locked: round.edit_mode.locked_slots().to_vec(),
        coeffs: round.current,
        equation: format_equation(&round.current),
        solved: round.solved,
    }
}

/// Explore-mode snapshot: classification plus everything the chart needs.
#[derive(Debug, Serialize)]
pub struct ExploreOut {
    #[serde(rename = "solutionType")]
    pub solution_type: SolutionType,
    pub label: String,
    pub equation: String,
    pub intersection: Option<IntersectionPoint>,
    pub points: Vec<SamplePoint>,
}

/// Assemble the explore snapshot. The half-range defaults when missing and
/// is clamped into the slider's 1..=50 window, so a request can never ask
/// for an unbounded point vector.
pub fn explore_out(coeffs: &Coefficients, half_range: Option<i64>) -> ExploreOut {
    let half_range = half_range
        .unwrap_or(QUIZ_GRAPH_HALF_RANGE)
        .clamp(1, EXPLORE_HALF_RANGE_MAX);
    let solution_type = classify(coeffs);
    ExploreOut {
        solution_type,
        label: solution_type.label().to_string(),
        equation: format_equation(coeffs),
        intersection: intersection(coeffs),
        points: sample_points(coeffs, half_range),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ExploreIn {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    #[serde(rename = "halfRange")]
    pub half_range: Option<i64>,
}

impl ExploreIn {
    pub fn coeffs(&self) -> Coefficients {
        Coefficients::new(self.a, self.b, self.c, self.d)
    }
}

#[derive(Debug, Serialize)]
pub struct QuizStartOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub problem: QuizProblemOut,
    #[serde(rename = "questionNumber")]
    pub question_number: u32,
    pub total: u32,
    pub score: u32,
}

pub fn quiz_start_out(session: &QuizSession, problem: &QuizProblem) -> QuizStartOut {
    QuizStartOut {
        session_id: session.id.clone(),
        problem: to_problem_out(problem),
        question_number: session.answered + 1,
        total: QUIZ_LENGTH,
        score: session.score,
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "problemId")]
    pub problem_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub message: String,
    pub score: u32,
    pub answered: u32,
    pub total: u32,
    pub finished: bool,
    /// Present only on the finishing answer.
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextQuestionIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct NextQuestionOut {
    /// None when the run is over.
    pub problem: Option<QuizProblemOut>,
    #[serde(rename = "questionNumber")]
    pub question_number: u32,
    pub total: u32,
    pub score: u32,
    pub finished: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChallengeSubmitIn {
    #[serde(rename = "challengeId")]
    pub challenge_id: String,
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
}

impl ChallengeSubmitIn {
    pub fn coeffs(&self) -> Coefficients {
        Coefficients::new(self.a, self.b, self.c, self.d)
    }
}

#[derive(Debug, Deserialize)]
pub struct EditCoefficientIn {
    #[serde(rename = "challengeId")]
    pub challenge_id: String,
    pub slot: Coefficient,
    pub text: String,
    #[serde(default)]
    pub commit: bool,
}

/// Echo of a tolerant field edit: the committed value plus the text the
/// input should now display (reverted/normalized on commit).
#[derive(Debug, Serialize)]
pub struct EditCoefficientOut {
    pub slot: Coefficient,
    pub value: i64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChallengeSubmitOut {
    pub solved: bool,
    pub message: String,
    pub round: ChallengeOut,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co(a: i64, b: i64, c: i64, d: i64) -> Coefficients {
        Coefficients::new(a, b, c, d)
    }

    #[test]
    fn explore_defaults_the_half_range() {
        let out = explore_out(&co(2, 1, -1, 4), None);
        assert_eq!(out.points.len(), (2 * (QUIZ_GRAPH_HALF_RANGE + 2) + 1) as usize);
        assert_eq!(out.equation, "2x + 1 = -x + 4");
        assert_eq!(out.label, "One Solution");
    }

    #[test]
    fn explore_clamps_tiny_half_ranges_up_to_one() {
        let out = explore_out(&co(1, 0, 2, 0), Some(0));
        // half-range 1 plus two padding columns each side.
        assert_eq!(out.points.len(), 7);

        let neg = explore_out(&co(1, 0, 2, 0), Some(-30));
        assert_eq!(neg.points.len(), 7);
    }

    #[test]
    fn explore_clamps_huge_half_ranges_to_the_slider_max() {
        let out = explore_out(&co(1, 0, 2, 0), Some(4_000_000_000));
        assert_eq!(out.points.len(), (2 * (EXPLORE_HALF_RANGE_MAX + 2) + 1) as usize);
        assert_eq!(out.points.first().unwrap().x, -(EXPLORE_HALF_RANGE_MAX + 2));
        assert_eq!(out.points.last().unwrap().x, EXPLORE_HALF_RANGE_MAX + 2);
    }

    #[test]
    fn explore_reports_the_crossing_point_only_for_one_solution() {
        let one = explore_out(&co(2, 1, -1, 4), None);
        assert_eq!(one.solution_type, SolutionType::OneSolution);
        let p = one.intersection.expect("crossing point");
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 3.0);

        let parallel = explore_out(&co(3, 5, 3, -2), None);
        assert_eq!(parallel.solution_type, SolutionType::NoSolution);
        assert!(parallel.intersection.is_none());

        let identical = explore_out(&co(-2, 7, -2, 7), None);
        assert_eq!(identical.solution_type, SolutionType::InfiniteSolutions);
        assert!(identical.intersection.is_none());
    }
}
