//! Documents open in the editor.

#[cfg(test)]
mod tests;

use crate::convert;
use anyhow::{Result, bail};
use fast_hash::FxHashMap;
use lsp_types::{TextDocumentContentChangeEvent, Url};

/// The live text of every open document. Authoritative over what is on disk.
#[derive(Debug, Default)]
pub(crate) struct Documents(FxHashMap<Url, String>);

impl Documents {
  pub(crate) fn open(&mut self, url: Url, text: String) {
    if self.0.insert(url, text).is_some() {
      log::warn!("opened an already open document");
    }
  }

  pub(crate) fn change(
    &mut self,
    url: &Url,
    changes: Vec<TextDocumentContentChangeEvent>,
  ) -> Result<()> {
    let Some(text) = self.0.get_mut(url) else { bail!("{url} is not open") };
    apply_changes(text, changes);
    Ok(())
  }

  pub(crate) fn close(&mut self, url: &Url) -> Result<()> {
    match self.0.remove(url) {
      Some(_) => Ok(()),
      None => bail!("{url} is not open"),
    }
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&Url, &str)> {
    self.0.iter().map(|(url, text)| (url, text.as_str()))
  }
}

/// adapted from rust-analyzer.
fn apply_changes(contents: &mut String, mut content_changes: Vec<TextDocumentContentChangeEvent>) {
  // If at least one of the changes is a full document change, use the last of them as the starting
  // point and ignore all previous changes.
  let content_changes = match content_changes.iter().rposition(|change| change.range.is_none()) {
    Some(idx) => {
      *contents = std::mem::take(&mut content_changes[idx].text);
      &content_changes[idx + 1..]
    }
    None => &content_changes[..],
  };
  if content_changes.is_empty() {
    return;
  }
  let mut pos_db = text_pos::PositionDb::new(contents);
  // Each change is in terms of the text after the previous one, and may cross lines. Only rebuild
  // the line index when a change ends at or after the first line the last change touched.
  let mut index_valid = u32::MAX;
  for change in content_changes {
    let Some(range) = change.range else { continue };
    if index_valid <= range.end.line {
      pos_db = text_pos::PositionDb::new(contents);
    }
    index_valid = range.start.line;
    match pos_db.text_range_utf16(convert::text_range(range)) {
      Some(range) => contents.replace_range(std::ops::Range::<usize>::from(range), &change.text),
      None => log::warn!("ignoring a change with an out of bounds range: {range:?}"),
    }
  }
}
