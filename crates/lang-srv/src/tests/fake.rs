//! A fake compiler.

use anyhow::{Result, bail};
use compiler::{
  BuildResult, CompileOptions, CompletionQuery, CompletionResult, Compiler, DefinitionResult,
  PositionQuery, RenameResult, SignatureResult, Source, Symbol, SymbolsQuery, SymbolsResult,
  TooltipQuery, TooltipResult,
};
use fast_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// What the fake compiler saw and what it will answer.
#[derive(Debug, Default)]
pub(crate) struct Script {
  /// The inputs of every call to `compile`, in order.
  pub(crate) compiled: Vec<Vec<Source>>,
  /// The results of the next calls to `compile`. When empty, `compile` returns no diagnostics.
  pub(crate) builds: VecDeque<Result<BuildResult>>,
  pub(crate) tooltip: TooltipResult,
  pub(crate) definition: DefinitionResult,
  pub(crate) symbols: FxHashMap<String, Vec<Symbol>>,
  pub(crate) rename: RenameResult,
  pub(crate) completions: VecDeque<CompletionResult>,
  pub(crate) completion_inputs: Vec<Vec<Source>>,
  pub(crate) signature: SignatureResult,
  /// When set, every query fails.
  pub(crate) broken: bool,
}

/// A compiler that answers from a shared [`Script`].
#[derive(Debug, Default, Clone)]
pub(crate) struct FakeCompiler(pub(crate) Rc<RefCell<Script>>);

impl FakeCompiler {
  fn check(&self) -> Result<()> {
    if self.0.borrow().broken {
      bail!("the compiler is broken");
    }
    Ok(())
  }
}

impl Compiler for FakeCompiler {
  fn compile(&mut self, _: &CompileOptions, inputs: Vec<Source>) -> Result<BuildResult> {
    let mut script = self.0.borrow_mut();
    script.compiled.push(inputs);
    script.builds.pop_front().unwrap_or_else(|| Ok(BuildResult::default()))
  }

  fn tooltip_query(&self, _: &TooltipQuery) -> Result<TooltipResult> {
    self.check()?;
    Ok(self.0.borrow().tooltip.clone())
  }

  fn definition_query(&self, _: &PositionQuery) -> Result<DefinitionResult> {
    self.check()?;
    Ok(self.0.borrow().definition.clone())
  }

  fn symbols_query(&self, query: &SymbolsQuery) -> Result<SymbolsResult> {
    self.check()?;
    Ok(SymbolsResult { symbols: self.0.borrow().symbols.get(&query.source).cloned() })
  }

  fn rename_query(&self, _: &PositionQuery) -> Result<RenameResult> {
    self.check()?;
    Ok(self.0.borrow().rename.clone())
  }

  fn completion_query(&mut self, query: &CompletionQuery) -> Result<CompletionResult> {
    self.check()?;
    let mut script = self.0.borrow_mut();
    script.completion_inputs.push(query.inputs.clone());
    Ok(script.completions.pop_front().unwrap_or_default())
  }

  fn signature_query(&self, _: &PositionQuery) -> Result<SignatureResult> {
    self.check()?;
    Ok(self.0.borrow().signature.clone())
  }
}
