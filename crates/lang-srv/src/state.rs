//! See [`St`].

use crate::completions::Sessions;
use crate::cx::Cx;
use crate::documents::Documents;
use crate::fixes::Fixes;
use crate::scheduler::Scheduler;
use crate::{diagnostics, gather};
use anyhow::Result;
use compiler::{CompileOptions, Compiler, Source};
use fast_hash::FxHashSet;
use lsp_types::Url;
use std::path::PathBuf;
use std::time::Instant;

/// The state of the server. Everything here is owned by the one thread running the main loop.
pub(crate) struct St {
  pub(crate) cx: Cx,
  pub(crate) compiler: Box<dyn Compiler>,
  /// `None` means only open documents are compiled.
  pub(crate) root: Option<PathBuf>,
  pub(crate) documents: Documents,
  pub(crate) scheduler: Scheduler,
  /// The urls we last sent non-empty diagnostics for.
  pub(crate) published: FxHashSet<Url>,
  pub(crate) fixes: Fixes,
  pub(crate) sessions: Sessions,
  /// The names of the sources in the last successful build.
  pub(crate) sources: Vec<String>,
}

impl St {
  pub(crate) fn new(cx: Cx, compiler: Box<dyn Compiler>, root: Option<PathBuf>) -> Self {
    let scheduler = Scheduler::new(cx.options.debounce());
    Self {
      cx,
      compiler,
      root,
      documents: Documents::default(),
      scheduler,
      published: FxHashSet::default(),
      fixes: Fixes::default(),
      sessions: Sessions::default(),
      sources: Vec::new(),
    }
  }

  /// Cancels any pending build and schedules a new one.
  pub(crate) fn request_build(&mut self) {
    self.scheduler.request(Instant::now());
  }

  /// Runs the pending build if it is due.
  pub(crate) fn on_timer(&mut self, now: Instant) {
    if self.scheduler.take_due(now) {
      self.build();
    }
  }

  /// Builds and publishes. A failure is reported, but leaves the last published diagnostics as they
  /// were and does not stop later builds.
  pub(crate) fn build(&mut self) {
    if let Err(e) = self.try_build() {
      self.cx.report_error(&format!("build failed: {e:#}"));
    }
  }

  fn try_build(&mut self) -> Result<()> {
    let inputs = elapsed::log("gather", || self.gather())?;
    let names: Vec<_> = inputs.iter().map(|x| x.name.clone()).collect();
    let options =
      CompileOptions { target: self.cx.options.target.clone(), stop_after_resolve: true };
    let res = elapsed::log("compile", || self.compiler.compile(&options, inputs))?;
    self.sources = names;
    diagnostics::publish(&self.cx, &mut self.published, &mut self.fixes, res.diagnostics);
    Ok(())
  }

  pub(crate) fn gather(&self) -> Result<Vec<Source>> {
    let suffix = self.cx.options.file_suffix();
    gather::get(&self.cx.fs, self.root.as_deref(), &suffix, &self.documents)
  }
}
