//! Configuration options sent when the language server starts.


use serde::Deserialize;
use std::time::Duration;

/// Settings for the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
  /// How long, in milliseconds, to wait for edits to stop before building.
  pub debounce_ms: u64,
  /// The output target passed to the compiler.
  pub target: String,
  /// The extension of source files, without the leading `.`.
  pub file_extension: String,
  /// The language identifier, used for hover code fences and command names.
  pub language_id: String,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      debounce_ms: 100,
      target: "js".to_owned(),
      file_extension: "sk".to_owned(),
      language_id: "skew".to_owned(),
    }
  }
}

impl Options {
  /// Returns the debounce delay.
  #[must_use]
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }

  /// Returns the literal file name suffix of source files, like `.sk`.
  #[must_use]
  pub fn file_suffix(&self) -> String {
    format!(".{}", self.file_extension)
  }

  /// Returns the name of the editor command that applies a fix.
  #[must_use]
  pub fn apply_fix_command(&self) -> String {
    format!("{}.applyFix", self.language_id)
  }
}
