//! Domain models for the equation explorer: coefficients, solution types,
//! quiz problems and challenge rounds.

use serde::{Deserialize, Serialize};

/// The four integer coefficients of `ax + b = cx + d`, read as two lines
/// `y = a*x + b` (left) and `y = c*x + d` (right).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coefficients {
  pub a: i64,
  pub b: i64,
  pub c: i64,
  pub d: i64,
}

impl Coefficients {
  pub fn new(a: i64, b: i64, c: i64, d: i64) -> Self {
    Self { a, b, c, d }
  }

  pub fn get(&self, slot: Coefficient) -> i64 {
    match slot {
      Coefficient::A => self.a,
      Coefficient::B => self.b,
      Coefficient::C => self.c,
      Coefficient::D => self.d,
    }
  }

  pub fn set(&mut self, slot: Coefficient, value: i64) {
    match slot {
      Coefficient::A => self.a = value,
      Coefficient::B => self.b = value,
      Coefficient::C => self.c = value,
      Coefficient::D => self.d = value,
    }
  }
}

/// How the two lines relate. Always derived from the current coefficients,
/// never stored on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionType {
  OneSolution,
  NoSolution,
  InfiniteSolutions,
}

impl SolutionType {
  /// Canonical display label, also the answer-matching prefix.
  pub fn label(&self) -> &'static str {
    match self {
      SolutionType::OneSolution => "One Solution",
      SolutionType::NoSolution => "No Solution",
      SolutionType::InfiniteSolutions => "Infinite Solutions",
    }
  }

  pub const ALL: [SolutionType; 3] = [
    SolutionType::OneSolution,
    SolutionType::NoSolution,
    SolutionType::InfiniteSolutions,
  ];
}

/// Where the two lines cross. Present only for `SolutionType::OneSolution`;
/// both values are rounded to 2 decimals for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
  pub x: f64,
  pub y: f64,
}

/// One charted sample: both lines evaluated at the same integer x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePoint {
  pub x: i64,
  pub y1: i64,
  pub y2: i64,
}

/// How a quiz problem is shown to the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStyle {
  /// Rendered as `ax + b = cx + d`.
  Symbolic,
  /// Rendered as the two plotted lines, no symbols.
  Graphical,
}

/// A generated quiz question. Immutable once generated; consumed by a
/// single answer check and then discarded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizProblem {
  pub id: String,
  pub coeffs: Coefficients,
  pub target_type: SolutionType,
  pub style: PresentationStyle,
}

/// Which side(s) of the equation the learner may edit in a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
  /// Left side is given; learner fills in c and d.
  EditRight,
  /// Right side is given; learner fills in a and b.
  EditLeft,
  /// All four coefficients start at zero and are editable.
  EditBoth,
}

/// Identifier for a single coefficient slot. Kept as an enum so locked-slot
/// checks are typed rather than string set membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coefficient {
  A,
  B,
  C,
  D,
}

impl EditMode {
  /// Slots fixed at generation time for this mode.
  pub fn locked_slots(&self) -> &'static [Coefficient] {
    match self {
      EditMode::EditRight => &[Coefficient::A, Coefficient::B],
      EditMode::EditLeft => &[Coefficient::C, Coefficient::D],
      EditMode::EditBoth => &[],
    }
  }

  pub fn is_locked(&self, slot: Coefficient) -> bool {
    self.locked_slots().contains(&slot)
  }
}

/// A "fix the equation" round. `initial` keeps the coefficients as dealt so
/// locked slots can be re-imposed on every submit; `current` tracks the
/// learner's latest edits.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChallengeRound {
  pub id: String,
  pub goal: SolutionType,
  pub edit_mode: EditMode,
  pub initial: Coefficients,
  pub current: Coefficients,
  pub solved: bool,
}

impl ChallengeRound {
  /// The goal's success predicate over a candidate coefficient set.
  pub fn goal_met(&self, coeffs: &Coefficients) -> bool {
    match self.goal {
      SolutionType::NoSolution => coeffs.a == coeffs.c && coeffs.b != coeffs.d,
      SolutionType::InfiniteSolutions => coeffs.a == coeffs.c && coeffs.b == coeffs.d,
      SolutionType::OneSolution => coeffs.a != coeffs.c,
    }
  }

  /// Merge a submission with this round's locked slots: locked values come
  /// from `initial`, everything else from the submission.
  pub fn apply_submission(&self, submitted: &Coefficients) -> Coefficients {
    let pick = |slot: Coefficient, fixed: i64, sub: i64| {
      if self.edit_mode.is_locked(slot) { fixed } else { sub }
    };
    Coefficients {
      a: pick(Coefficient::A, self.initial.a, submitted.a),
      b: pick(Coefficient::B, self.initial.b, submitted.b),
      c: pick(Coefficient::C, self.initial.c, submitted.c),
      d: pick(Coefficient::D, self.initial.d, submitted.d),
    }
  }
}
