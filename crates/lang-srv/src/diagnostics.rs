//! Publish diagnostics.

use crate::{convert, cx::Cx, fixes::Fixes};
use fast_hash::{FxHashMap, FxHashSet};
use lsp_types::Url;

/// Sends diagnostics for every url with diagnostics in this build, and clears them for every url
/// that had some last time but has none now.
///
/// `published` is the set of urls we last sent diagnostics for. It is updated.
pub(crate) fn publish(
  cx: &Cx,
  published: &mut FxHashSet<Url>,
  fixes: &mut Fixes,
  diagnostics: Vec<compiler::Diagnostic>,
) {
  let mut current = FxHashMap::<Url, Vec<lsp_types::Diagnostic>>::default();
  for diagnostic in diagnostics {
    let Some(url) = convert::url(&diagnostic.range.source) else { continue };
    let lsp_diagnostic = convert::lsp_diagnostic(&diagnostic, &cx.options.language_id);
    if let Err(e) = fixes.record(&url, &lsp_diagnostic, diagnostic.fixes) {
      log::error!("couldn't record fixes: {e}");
    }
    current.entry(url).or_default().push(lsp_diagnostic);
  }
  // clear first, so the editor doesn't briefly show both old and new.
  for url in std::mem::take(published) {
    if current.contains_key(&url) {
      continue;
    }
    // had old diagnostics, but no new diagnostics. clear the old diagnostics.
    cx.send_diagnostics(url, Vec::new());
  }
  for (url, ds) in current {
    published.insert(url.clone());
    cx.send_diagnostics(url, ds);
  }
}
