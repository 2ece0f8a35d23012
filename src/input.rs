//! Tolerant editing model for coefficient text fields.
//!
//! A field holds a committed integer plus whatever the user has typed so
//! far. Intermediate states that don't parse (empty string, a lone minus
//! sign) are held without committing; finishing an edit with unparseable
//! content reverts silently to the last committed value.

/// One coefficient text field: committed value + in-progress text.
#[derive(Clone, Debug)]
pub struct CoefficientField {
  committed: i64,
  text: String,
}

impl CoefficientField {
  pub fn new(value: i64) -> Self {
    Self { committed: value, text: value.to_string() }
  }

  pub fn value(&self) -> i64 {
    self.committed
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  /// Replace the committed value from outside (e.g. a new round was dealt).
  pub fn set(&mut self, value: i64) {
    self.committed = value;
    self.text = value.to_string();
  }

  /// Accept a keystroke's worth of new text. Commits as soon as the text
  /// parses as an integer; otherwise keeps the old committed value and
  /// just remembers the text.
  pub fn type_text(&mut self, text: &str) {
    self.text = text.to_string();
    if text.is_empty() || text == "-" {
      return;
    }
    if let Ok(n) = text.parse::<i64>() {
      self.committed = n;
    }
  }

  /// Finish editing (blur). Unparseable text reverts to the committed
  /// value; parseable text is normalized (e.g. "007" becomes "7").
  pub fn commit(&mut self) -> i64 {
    match self.text.parse::<i64>() {
      Ok(n) => {
        self.committed = n;
        self.text = n.to_string();
      }
      Err(_) => {
        self.text = self.committed.to_string();
      }
    }
    self.committed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn typing_a_number_commits_immediately() {
    let mut f = CoefficientField::new(2);
    f.type_text("-7");
    assert_eq!(f.value(), -7);
    assert_eq!(f.commit(), -7);
  }

  #[test]
  fn intermediate_states_hold_the_old_value() {
    let mut f = CoefficientField::new(3);
    f.type_text("");
    assert_eq!(f.value(), 3);
    f.type_text("-");
    assert_eq!(f.value(), 3);
    assert_eq!(f.text(), "-");
  }

  #[test]
  fn committing_garbage_reverts() {
    let mut f = CoefficientField::new(5);
    f.type_text("-");
    assert_eq!(f.commit(), 5);
    assert_eq!(f.text(), "5");

    f.type_text("abc");
    assert_eq!(f.value(), 5);
    assert_eq!(f.commit(), 5);
    assert_eq!(f.text(), "5");
  }

  #[test]
  fn commit_normalizes_the_text() {
    let mut f = CoefficientField::new(0);
    f.type_text("007");
    assert_eq!(f.value(), 7);
    f.commit();
    assert_eq!(f.text(), "7");
  }

  #[test]
  fn set_resets_both_value_and_text() {
    let mut f = CoefficientField::new(1);
    f.type_text("-");
    f.set(-4);
    assert_eq!(f.value(), -4);
    assert_eq!(f.text(), "-4");
  }
}
