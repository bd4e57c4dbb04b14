//! The most recent completion result, kept around for resolving its items later.

#[cfg(test)]
mod tests;

use compiler::Completion;
use serde::{Deserialize, Serialize};

/// The `data` of a completion item, used to find the item again when resolving it.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemData {
  /// An index into a specific session.
  Versioned { session: u64, index: i64 },
  /// An index into whatever session is current.
  Index(i64),
}

impl ItemData {
  pub(crate) fn new(session: u64, index: usize) -> Self {
    Self::Versioned { session, index: i64::try_from(index).unwrap_or(i64::MAX) }
  }
}

/// The completions from the latest query. Each query replaces the whole session.
#[derive(Debug, Default)]
pub(crate) struct Sessions {
  id: u64,
  completions: Option<Vec<Completion>>,
}

impl Sessions {
  /// Replaces the session and returns the id of the new one.
  pub(crate) fn replace(&mut self, completions: Option<Vec<Completion>>) -> u64 {
    self.id = self.id.wrapping_add(1);
    self.completions = completions;
    self.id
  }

  pub(crate) fn current(&self) -> Option<&[Completion]> {
    self.completions.as_deref()
  }

  /// Returns nothing for indices out of range, and for items from sessions that are no longer
  /// current.
  pub(crate) fn get(&self, data: &ItemData) -> Option<&Completion> {
    let index = match *data {
      ItemData::Versioned { session, index } => {
        if session != self.id {
          log::info!("tried to resolve a completion from stale session {session}");
          return None;
        }
        index
      }
      ItemData::Index(index) => index,
    };
    self.current()?.get(usize::try_from(index).ok()?)
  }
}

/// Joins comment lines into paragraphs. Lines are trimmed, consecutive non-blank lines are joined
/// with a space, and blank lines separate paragraphs.
pub(crate) fn format_comments<S>(lines: &[S]) -> String
where
  S: AsRef<str>,
{
  let mut ret = String::new();
  let mut was_blank = false;
  for line in lines {
    let line = line.as_ref().trim();
    if line.is_empty() {
      was_blank = true;
      continue;
    }
    if !ret.is_empty() {
      ret.push_str(if was_blank { "\n\n" } else { " " });
    }
    ret.push_str(line);
    was_blank = false;
  }
  ret
}
