//! Conversions between LSP types and the compiler's types.


use anyhow::{Result, bail};
use compiler::{Fix, PositionQuery, Symbol, SymbolKind};
use fast_hash::FxHashMap;
use lsp_types::Url;
use std::path::PathBuf;

pub(crate) fn file_path(url: &Url) -> Result<PathBuf> {
  if url.scheme() != "file" {
    bail!("not a file url: {url}")
  }
  match url.to_file_path() {
    Ok(pb) => Ok(pb),
    Err(()) => bail!("couldn't make a URL into a file path: {url}"),
  }
}

/// Logs on failure.
pub(crate) fn url(source: &str) -> Option<Url> {
  match Url::parse(source) {
    Ok(x) => Some(x),
    Err(e) => {
      log::error!("couldn't parse {source:?} as a URL: {e}");
      None
    }
  }
}

pub(crate) fn position_query(params: &lsp_types::TextDocumentPositionParams) -> PositionQuery {
  PositionQuery {
    source: params.text_document.uri.to_string(),
    line: params.position.line,
    column: params.position.character,
  }
}

fn text_position(pos: lsp_types::Position) -> text_pos::PositionUtf16 {
  text_pos::PositionUtf16 { line: pos.line, col: pos.character }
}

pub(crate) fn text_range(range: lsp_types::Range) -> text_pos::RangeUtf16 {
  text_pos::RangeUtf16 { start: text_position(range.start), end: text_position(range.end) }
}

pub(crate) fn lsp_position(pos: compiler::Position) -> lsp_types::Position {
  lsp_types::Position { line: pos.line, character: pos.column }
}

pub(crate) fn lsp_range(range: &compiler::Range) -> lsp_types::Range {
  lsp_types::Range { start: lsp_position(range.start), end: lsp_position(range.end) }
}

pub(crate) fn lsp_location(range: &compiler::Range) -> Option<lsp_types::Location> {
  Some(lsp_types::Location { uri: url(&range.source)?, range: lsp_range(range) })
}

pub(crate) fn lsp_diagnostic(
  diagnostic: &compiler::Diagnostic,
  source: &str,
) -> lsp_types::Diagnostic {
  lsp_types::Diagnostic {
    range: lsp_range(&diagnostic.range),
    severity: Some(match diagnostic.kind {
      compiler::DiagnosticKind::Error => lsp_types::DiagnosticSeverity::ERROR,
      compiler::DiagnosticKind::Warning | compiler::DiagnosticKind::Other => {
        lsp_types::DiagnosticSeverity::WARNING
      }
    }),
    source: Some(source.to_owned()),
    message: diagnostic.text.clone(),
    ..Default::default()
  }
}

pub(crate) fn registration<N, T>(options: T) -> Result<lsp_types::Registration>
where
  N: lsp_types::notification::Notification,
  T: serde::Serialize,
{
  Ok(lsp_types::Registration {
    id: N::METHOD.to_owned(),
    method: N::METHOD.to_owned(),
    register_options: Some(serde_json::to_value(options)?),
  })
}

/// Kinds with no good protocol equivalent are left out of symbol lists.
fn symbol_kind(kind: SymbolKind) -> Option<lsp_types::SymbolKind> {
  let ret = match kind {
    SymbolKind::ObjectClass | SymbolKind::ObjectWrapped => lsp_types::SymbolKind::CLASS,
    SymbolKind::ObjectEnum => lsp_types::SymbolKind::ENUM,
    SymbolKind::ObjectInterface => lsp_types::SymbolKind::INTERFACE,
    SymbolKind::ObjectNamespace => lsp_types::SymbolKind::NAMESPACE,
    SymbolKind::FunctionAnnotation | SymbolKind::FunctionGlobal => lsp_types::SymbolKind::FUNCTION,
    SymbolKind::FunctionConstructor => lsp_types::SymbolKind::CONSTRUCTOR,
    SymbolKind::FunctionInstance => lsp_types::SymbolKind::METHOD,
    SymbolKind::VariableEnumOrFlags => lsp_types::SymbolKind::ENUM_MEMBER,
    SymbolKind::VariableGlobal => lsp_types::SymbolKind::VARIABLE,
    SymbolKind::VariableInstance => lsp_types::SymbolKind::FIELD,
    SymbolKind::ParameterFunction
    | SymbolKind::ParameterObject
    | SymbolKind::ObjectFlags
    | SymbolKind::ObjectGlobal
    | SymbolKind::FunctionLocal
    | SymbolKind::VariableArgument
    | SymbolKind::VariableLocal
    | SymbolKind::Other => return None,
  };
  Some(ret)
}

pub(crate) fn completion_kind(kind: SymbolKind) -> lsp_types::CompletionItemKind {
  match kind {
    SymbolKind::ParameterFunction | SymbolKind::ParameterObject => {
      lsp_types::CompletionItemKind::TYPE_PARAMETER
    }
    SymbolKind::ObjectClass
    | SymbolKind::ObjectEnum
    | SymbolKind::ObjectFlags
    | SymbolKind::ObjectGlobal
    | SymbolKind::ObjectInterface
    | SymbolKind::ObjectNamespace
    | SymbolKind::ObjectWrapped => lsp_types::CompletionItemKind::CLASS,
    SymbolKind::FunctionAnnotation
    | SymbolKind::FunctionConstructor
    | SymbolKind::FunctionGlobal
    | SymbolKind::FunctionInstance
    | SymbolKind::FunctionLocal => lsp_types::CompletionItemKind::FUNCTION,
    SymbolKind::VariableArgument
    | SymbolKind::VariableEnumOrFlags
    | SymbolKind::VariableGlobal
    | SymbolKind::VariableInstance
    | SymbolKind::VariableLocal => lsp_types::CompletionItemKind::VARIABLE,
    SymbolKind::Other => lsp_types::CompletionItemKind::TEXT,
  }
}

pub(crate) fn flat_symbols<I>(url: &Url, symbols: I) -> Vec<lsp_types::SymbolInformation>
where
  I: IntoIterator<Item = Symbol>,
{
  symbols
    .into_iter()
    .filter_map(|sym| {
      let kind = symbol_kind(sym.kind)?;
      #[allow(deprecated)]
      let ret = lsp_types::SymbolInformation {
        name: sym.name,
        kind,
        tags: None,
        deprecated: None,
        location: lsp_types::Location { uri: url.clone(), range: lsp_range(&sym.range) },
        container_name: sym.parent,
      };
      Some(ret)
    })
    .collect()
}

type Slot = Option<(lsp_types::SymbolKind, Symbol)>;

/// Nests each symbol under the first symbol named by its parent. Symbols whose parent is unknown,
/// or whose chain of parents leads back to themselves, are at the top level.
pub(crate) fn nested_symbols(symbols: Vec<Symbol>) -> Vec<lsp_types::DocumentSymbol> {
  let mut slots: Vec<Slot> =
    symbols.into_iter().filter_map(|sym| Some((symbol_kind(sym.kind)?, sym))).map(Some).collect();
  let mut first_by_name = FxHashMap::<String, usize>::default();
  for (idx, slot) in slots.iter().enumerate() {
    if let Some((_, sym)) = slot {
      first_by_name.entry(sym.name.clone()).or_insert(idx);
    }
  }
  let parents: Vec<Option<usize>> = slots
    .iter()
    .enumerate()
    .map(|(idx, slot)| {
      let parent = slot.as_ref()?.1.parent.as_deref()?;
      let parent = *first_by_name.get(parent)?;
      (parent != idx).then_some(parent)
    })
    .collect();
  let mut children = vec![Vec::<usize>::new(); slots.len()];
  let mut roots = Vec::<usize>::new();
  for (idx, &parent) in parents.iter().enumerate() {
    match parent {
      Some(parent) if !is_cyclic(&parents, idx) => children[parent].push(idx),
      Some(_) | None => roots.push(idx),
    }
  }
  roots.into_iter().filter_map(|idx| document_symbol(idx, &mut slots, &children)).collect()
}

fn is_cyclic(parents: &[Option<usize>], start: usize) -> bool {
  let mut cur = parents.get(start).copied().flatten();
  // a chain longer than this is stuck in some other cycle.
  for _ in 0..parents.len() {
    match cur {
      None => return false,
      Some(idx) if idx == start => return true,
      Some(idx) => cur = parents.get(idx).copied().flatten(),
    }
  }
  false
}

fn document_symbol(
  idx: usize,
  slots: &mut [Slot],
  children: &[Vec<usize>],
) -> Option<lsp_types::DocumentSymbol> {
  let (kind, sym) = slots.get_mut(idx)?.take()?;
  let children: Vec<_> = children
    .get(idx)
    .into_iter()
    .flatten()
    .filter_map(|&child| document_symbol(child, slots, children))
    .collect();
  let range = lsp_range(&sym.range);
  #[allow(deprecated)]
  let ret = lsp_types::DocumentSymbol {
    name: sym.name,
    detail: None,
    kind,
    tags: None,
    deprecated: None,
    range,
    selection_range: range,
    children: Some(children),
  };
  Some(ret)
}

pub(crate) fn completion_item(
  completion: &compiler::Completion,
  range: lsp_types::Range,
  data: Option<serde_json::Value>,
) -> lsp_types::CompletionItem {
  lsp_types::CompletionItem {
    label: completion.name.clone(),
    kind: Some(completion_kind(completion.kind)),
    text_edit: Some(lsp_types::CompletionTextEdit::Edit(lsp_types::TextEdit {
      range,
      new_text: completion.name.clone(),
    })),
    data,
    ..Default::default()
  }
}

/// The fix is not applied here. The editor runs `command`, which checks the text at the range is
/// still what the fix expects before replacing it.
pub(crate) fn fix_action(
  command: &str,
  url: &Url,
  fix: &Fix,
) -> Result<lsp_types::CodeActionOrCommand> {
  let arguments = vec![
    serde_json::Value::String(url.to_string()),
    serde_json::to_value(&fix.range)?,
    serde_json::Value::String(fix.expected.clone()),
    serde_json::Value::String(fix.replacement.clone()),
  ];
  Ok(lsp_types::CodeActionOrCommand::CodeAction(lsp_types::CodeAction {
    title: fix.description.clone(),
    kind: Some(lsp_types::CodeActionKind::QUICKFIX),
    command: Some(lsp_types::Command {
      title: fix.description.clone(),
      command: command.to_owned(),
      arguments: Some(arguments),
    }),
    ..Default::default()
  }))
}
