//! The query API of the compiler the language server drives.
//!
//! Nothing here does any analysis. An implementation of [`Compiler`] owns the actual parsing,
//! resolution and type checking, and remembers the state of the most recent [`Compiler::compile`]
//! so later queries can be answered against it.

use serde::{Deserialize, Serialize};

/// A compiled unit. `name` is the URI of the unit and is unique within one set of inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
  /// The URI.
  pub name: String,
  /// The full text.
  pub contents: String,
}

/// A zero-based position in a source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
  /// The line.
  pub line: u32,
  /// The column.
  pub column: u32,
}

/// A range in a named source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
  /// The URI of the source this range is in.
  pub source: String,
  /// The start, inclusive.
  pub start: Position,
  /// The end, exclusive.
  pub end: Position,
}

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
  /// The program is wrong.
  Error,
  /// The program is suspicious.
  Warning,
  /// Any other kind. Shown as a warning.
  #[serde(other)]
  Other,
}

/// A suggested text replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
  /// The compiler's name for this kind of fix, like `UNNECESSARY_PARENTHESES`.
  #[serde(default)]
  pub kind: String,
  /// What to replace.
  pub range: Range,
  /// A human-readable summary, used as the title of the fix.
  pub description: String,
  /// The text that must currently be at `range` for the fix to apply.
  pub expected: String,
  /// The text to put at `range`.
  pub replacement: String,
}

/// An issue reported by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
  /// The severity.
  pub kind: DiagnosticKind,
  /// Where the issue is.
  pub range: Range,
  /// The message.
  pub text: String,
  /// Suggested fixes, possibly empty.
  #[serde(default)]
  pub fixes: Vec<Fix>,
}

/// The kinds of symbols the compiler knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum SymbolKind {
  ParameterFunction,
  ParameterObject,
  ObjectClass,
  ObjectEnum,
  ObjectFlags,
  ObjectGlobal,
  ObjectInterface,
  ObjectNamespace,
  ObjectWrapped,
  FunctionAnnotation,
  FunctionConstructor,
  FunctionGlobal,
  FunctionInstance,
  FunctionLocal,
  VariableArgument,
  VariableEnumOrFlags,
  VariableGlobal,
  VariableInstance,
  VariableLocal,
  /// A kind this server does not know about.
  #[serde(other)]
  Other,
}

/// A declared symbol in a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
  /// The kind.
  pub kind: SymbolKind,
  /// The name.
  pub name: String,
  /// The range of the declaration.
  pub range: Range,
  /// The name of the enclosing symbol, if any.
  pub parent: Option<String>,
}

/// One entry of a completion result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
  /// The kind.
  pub kind: SymbolKind,
  /// The name, which is also the text to insert.
  pub name: String,
  /// The type, rendered.
  #[serde(rename = "type")]
  pub ty: String,
  /// The raw lines of the doc comment, if any.
  pub comments: Option<Vec<String>>,
}

/// Options for [`Compiler::compile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
  /// The output target, e.g. `js`.
  pub target: String,
  /// Stop after name resolution. The server never needs emitted code.
  pub stop_after_resolve: bool,
}

/// The result of [`Compiler::compile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
  /// Every diagnostic for every input. Never a delta.
  pub diagnostics: Vec<Diagnostic>,
}

/// A query about one position in one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuery {
  /// The URI of the source.
  pub source: String,
  /// The line.
  pub line: u32,
  /// The column.
  pub column: u32,
}

/// A query for [`Compiler::tooltip_query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipQuery {
  /// Where.
  #[serde(flatten)]
  pub position: PositionQuery,
  /// Leave diagnostics out of the tooltip.
  pub ignore_diagnostics: bool,
}

/// The result of [`Compiler::tooltip_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipResult {
  /// The tooltip text.
  pub tooltip: Option<String>,
  /// The range the tooltip is about.
  pub range: Option<Range>,
}

/// The result of [`Compiler::definition_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionResult {
  /// Where the symbol is defined.
  pub definition: Option<Range>,
}

/// A query for [`Compiler::symbols_query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolsQuery {
  /// The URI of the source.
  pub source: String,
}

/// The result of [`Compiler::symbols_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolsResult {
  /// The symbols declared in the source.
  pub symbols: Option<Vec<Symbol>>,
}

/// The result of [`Compiler::rename_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameResult {
  /// Every range referring to the symbol, including its declaration.
  pub ranges: Option<Vec<Range>>,
}

/// A query for [`Compiler::completion_query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionQuery {
  /// Where.
  #[serde(flatten)]
  pub position: PositionQuery,
  /// The output target.
  pub target: String,
  /// The full set of inputs, recompiled for the query.
  pub inputs: Vec<Source>,
}

/// The result of [`Compiler::completion_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
  /// The range the completion replaces.
  pub range: Option<Range>,
  /// The candidates.
  pub completions: Option<Vec<Completion>>,
}

/// The result of [`Compiler::signature_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResult {
  /// The full signature of the function being called.
  pub signature: Option<String>,
  /// The rendered arguments.
  pub arguments: Option<Vec<String>>,
  /// Which argument the position is in.
  pub argument_index: i64,
}

/// The compiler.
///
/// Every method may fail. A failure is reported to the user but never stops the server.
pub trait Compiler {
  /// Compiles every input from scratch, replacing whatever state was there before.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn compile(
    &mut self,
    options: &CompileOptions,
    inputs: Vec<Source>,
  ) -> anyhow::Result<BuildResult>;

  /// Returns a tooltip for a position.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn tooltip_query(&self, query: &TooltipQuery) -> anyhow::Result<TooltipResult>;

  /// Returns where the symbol at a position is defined.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn definition_query(&self, query: &PositionQuery) -> anyhow::Result<DefinitionResult>;

  /// Returns the symbols declared in a source.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn symbols_query(&self, query: &SymbolsQuery) -> anyhow::Result<SymbolsResult>;

  /// Returns every range referring to the symbol at a position.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn rename_query(&self, query: &PositionQuery) -> anyhow::Result<RenameResult>;

  /// Returns completions at a position.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn completion_query(&mut self, query: &CompletionQuery) -> anyhow::Result<CompletionResult>;

  /// Returns the signature of the call surrounding a position.
  ///
  /// # Errors
  ///
  /// If the compiler failed.
  fn signature_query(&self, query: &PositionQuery) -> anyhow::Result<SignatureResult>;
}
