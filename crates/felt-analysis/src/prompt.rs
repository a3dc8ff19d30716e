//! Prompt templating for hand analysis.
//!
//! The prompt is an external text resource with two substitution variables;
//! a built-in template stands in when no file is configured or readable.

use std::{fs, io, path::Path};

/// Placeholder for the free-text hand description.
const HAND_DETAILS_VAR: &str = "{{HAND_DETAILS}}";
/// Placeholder for the signed result amount.
const RESULT_VAR: &str = "{{RESULT}}";

const DEFAULT_TEMPLATE: &str = "\
As a professional poker coach, please analyze the following poker hand:

Hand Details: {{HAND_DETAILS}}
Result: {{RESULT}}

Please provide analysis on:
1. Technical Analysis: was the hand played correctly
2. Decision Evaluation: quality of the key decision points
3. Improvement Suggestions: how the play could improve
4. Learning Points: key takeaways from this hand

Keep it concise but insightful.";

/// A hand-analysis prompt with `{{HAND_DETAILS}}` and `{{RESULT}}` variables.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
  text: String,
}

impl Default for PromptTemplate {
  /// The built-in coaching prompt.
  fn default() -> Self {
    Self {
      text: DEFAULT_TEMPLATE.to_owned(),
    }
  }
}

impl PromptTemplate {
  /// Read a template from disk.
  pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
    Ok(Self {
      text: fs::read_to_string(path)?,
    })
  }

  /// Substitute both variables. The result renders with an explicit sign
  /// (`+250`, `-80`) so wins and losses are unambiguous to the model.
  pub fn render(&self, details: &str, result: i64) -> String {
    self
      .text
      .replace(HAND_DETAILS_VAR, details)
      .replace(RESULT_VAR, &format!("{result:+}"))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_substitutes_both_variables() {
    let template = PromptTemplate {
      text: "hand: {{HAND_DETAILS}} net: {{RESULT}}".into(),
    };
    assert_eq!(template.render("AA vs KK", 250), "hand: AA vs KK net: +250");
  }

  #[test]
  fn render_keeps_the_sign_on_losses() {
    let template = PromptTemplate {
      text: "{{RESULT}}".into(),
    };
    assert_eq!(template.render("", -80), "-80");
  }

  #[test]
  fn default_template_carries_both_variables() {
    let rendered = PromptTemplate::default().render("limped pot", 0);
    assert!(rendered.contains("limped pot"));
    assert!(rendered.contains("+0"));
  }
}
