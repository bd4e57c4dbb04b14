//! See [`Fixes`].

#[cfg(test)]
mod tests;

use compiler::Fix;
use fast_hash::FxHashMap;
use lsp_types::{Diagnostic, Url};

/// The fixes for published diagnostics.
///
/// A protocol diagnostic has no room for the compiler's fixes, but it is the only thing the editor
/// gives back when asking for code actions. So we key the fixes by the fields of the diagnostic
/// the editor will send back verbatim: the severity, the range, and the message.
///
/// Entries are never evicted. Every diagnostic the editor currently shows was (re-)recorded when it
/// was last published, so stale entries are never looked up.
#[derive(Debug, Default)]
pub(crate) struct Fixes(FxHashMap<Url, FxHashMap<String, Vec<Fix>>>);

impl Fixes {
  /// A later diagnostic identical to an earlier one overwrites its fixes.
  pub(crate) fn record(
    &mut self,
    url: &Url,
    diagnostic: &Diagnostic,
    fixes: Vec<Fix>,
  ) -> serde_json::Result<()> {
    let key = key(diagnostic)?;
    self.0.entry(url.clone()).or_default().insert(key, fixes);
    Ok(())
  }

  pub(crate) fn lookup(&self, url: &Url, diagnostic: &Diagnostic) -> Option<&[Fix]> {
    let key = key(diagnostic).ok()?;
    self.0.get(url)?.get(&key).map(Vec::as_slice)
  }
}

fn key(diagnostic: &Diagnostic) -> serde_json::Result<String> {
  serde_json::to_string(&(diagnostic.severity, diagnostic.range, diagnostic.message.as_str()))
}
