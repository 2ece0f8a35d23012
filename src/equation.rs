//! Pure equation math: classification, intersection, chart samples and
//! symbolic rendering of `ax + b = cx + d`.
//!
//! Everything here is total over integer inputs and free of side effects;
//! the handlers call these on every request instead of caching results.

use crate::domain::{Coefficients, IntersectionPoint, SamplePoint, SolutionType};

/// Classify the relationship between `y = a*x + b` and `y = c*x + d`.
///
/// Equal slopes mean parallel lines: identical when the intercepts also
/// match, otherwise never touching. Different slopes cross exactly once.
pub fn classify(coeffs: &Coefficients) -> SolutionType {
  if coeffs.a == coeffs.c {
    if coeffs.b == coeffs.d {
      SolutionType::InfiniteSolutions
    } else {
      SolutionType::NoSolution
    }
  } else {
    SolutionType::OneSolution
  }
}

/// Solve `a*x + b = c*x + d` for the crossing point. `None` when the slopes
/// are equal (parallel or coincident). Values are rounded to 2 decimals,
/// matching what the chart overlay displays.
pub fn intersection(coeffs: &Coefficients) -> Option<IntersectionPoint> {
  if coeffs.a == coeffs.c {
    return None;
  }
  let x = (coeffs.d - coeffs.b) as f64 / (coeffs.a - coeffs.c) as f64;
  let y = coeffs.a as f64 * x + coeffs.b as f64;
  Some(IntersectionPoint { x: round2(x), y: round2(y) })
}

/// Evaluate both lines at every integer x in `[-(half_range+2), half_range+2]`.
///
/// `half_range` must be positive (the axis slider goes 5..=50). The two
/// extra columns on each side keep the lines from visibly stopping at the
/// chart edge. Coefficients are caller-supplied and unbounded, so the y
/// values saturate at the i64 limits instead of overflowing.
pub fn sample_points(coeffs: &Coefficients, half_range: i64) -> Vec<SamplePoint> {
  let range = half_range + 2;
  (-range..=range)
    .map(|x| SamplePoint {
      x,
      y1: coeffs.a.saturating_mul(x).saturating_add(coeffs.b),
      y2: coeffs.c.saturating_mul(x).saturating_add(coeffs.d),
    })
    .collect()
}

/// Render `ax + b = cx + d` the way the page shows it: zero terms drop out,
/// unit slopes render as `x` / `-x`, and a side that is all zeros renders
/// as a bare `0`.
pub fn format_equation(coeffs: &Coefficients) -> String {
  format!(
    "{} = {}",
    format_side(coeffs.a, coeffs.b),
    format_side(coeffs.c, coeffs.d)
  )
}

fn format_side(m: i64, k: i64) -> String {
  if m == 0 && k == 0 {
    return "0".to_string();
  }
  let m_str = match m {
    0 => String::new(),
    1 => "x".to_string(),
    -1 => "-x".to_string(),
    _ => format!("{}x", m),
  };
  let k_str = if k == 0 && m != 0 {
    String::new()
  } else if k > 0 && m != 0 {
    format!("+ {}", k)
  } else {
    format!("{}", k)
  };
  format!("{} {}", m_str, k_str).trim().to_string()
}

fn round2(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}
