//! Handle requests.
//!
//! Each request is one compiler query against whatever build most recently finished. No request
//! waits for or starts a build.

use crate::completions::{self, ItemData};
use crate::state::St;
use crate::{convert, helpers};
use anyhow::Result;
use compiler::{CompletionQuery, SymbolsQuery, TooltipQuery};
use lsp_server::{ErrorCode, Request, Response};
use lsp_types::Url;
use std::collections::HashMap;
use std::ops::ControlFlow;

pub(crate) fn handle(st: &mut St, req: Request) {
  log::debug!("got request: {req:?}");
  let id = req.id.clone();
  st.cx.req_queue.incoming.register(id.clone(), ());
  let res = match go(st, req) {
    ControlFlow::Break(Ok(val)) => Response::new_ok(id, val),
    ControlFlow::Break(Err(e)) => {
      st.cx.report_error(&format!("request failed: {e:#}"));
      Response::new_ok(id, serde_json::Value::Null)
    }
    ControlFlow::Continue(req) => {
      log::warn!("unhandled request: {req:?}");
      let message = format!("unknown method {}", req.method);
      Response::new_err(id, ErrorCode::MethodNotFound as i32, message)
    }
  };
  st.cx.send_response(res);
}

#[allow(clippy::too_many_lines)]
fn go(st: &mut St, mut r: Request) -> ControlFlow<Result<serde_json::Value>, Request> {
  r = helpers::try_req::<lsp_types::request::HoverRequest, _, _>(r, |params| {
    let query = TooltipQuery {
      position: convert::position_query(&params.text_document_position_params),
      // the editor shows diagnostics on hover already.
      ignore_diagnostics: true,
    };
    let res = st.compiler.tooltip_query(&query)?;
    Ok(res.tooltip.map(|value| lsp_types::Hover {
      contents: lsp_types::HoverContents::Scalar(lsp_types::MarkedString::LanguageString(
        lsp_types::LanguageString { language: st.cx.options.language_id.clone(), value },
      )),
      range: res.range.as_ref().map(convert::lsp_range),
    }))
  })?;
  r = helpers::try_req::<lsp_types::request::GotoDefinition, _, _>(r, |params| {
    let query = convert::position_query(&params.text_document_position_params);
    let res = st.compiler.definition_query(&query)?;
    Ok(
      res
        .definition
        .as_ref()
        .and_then(convert::lsp_location)
        .map(lsp_types::GotoDefinitionResponse::Scalar),
    )
  })?;
  r = helpers::try_req::<lsp_types::request::DocumentSymbolRequest, _, _>(r, |params| {
    let url = params.text_document.uri;
    let res = st.compiler.symbols_query(&SymbolsQuery { source: url.to_string() })?;
    Ok(res.symbols.map(|symbols| {
      if st.cx.hierarchical_symbols {
        lsp_types::DocumentSymbolResponse::Nested(convert::nested_symbols(symbols))
      } else {
        lsp_types::DocumentSymbolResponse::Flat(convert::flat_symbols(&url, symbols))
      }
    }))
  })?;
  r = helpers::try_req::<lsp_types::request::WorkspaceSymbolRequest, _, _>(r, |params| {
    let needle = params.query.to_lowercase();
    let mut ret = Vec::<lsp_types::SymbolInformation>::new();
    for source in &st.sources {
      let Some(url) = convert::url(source) else { continue };
      let res = st.compiler.symbols_query(&SymbolsQuery { source: source.clone() })?;
      let Some(symbols) = res.symbols else { continue };
      let symbols = symbols.into_iter().filter(|x| x.name.to_lowercase().contains(&needle));
      ret.extend(convert::flat_symbols(&url, symbols));
    }
    Ok(Some(lsp_types::WorkspaceSymbolResponse::Flat(ret)))
  })?;
  r = helpers::try_req::<lsp_types::request::Rename, _, _>(r, |params| {
    let query = convert::position_query(&params.text_document_position);
    let res = st.compiler.rename_query(&query)?;
    Ok(res.ranges.map(|ranges| {
      let mut changes = HashMap::<Url, Vec<lsp_types::TextEdit>>::new();
      for range in ranges {
        let Some(url) = convert::url(&range.source) else { continue };
        changes.entry(url).or_default().push(lsp_types::TextEdit {
          range: convert::lsp_range(&range),
          new_text: params.new_name.clone(),
        });
      }
      lsp_types::WorkspaceEdit { changes: Some(changes), ..Default::default() }
    }))
  })?;
  r = helpers::try_req::<lsp_types::request::References, _, _>(r, |params| {
    let query = convert::position_query(&params.text_document_position);
    let res = st.compiler.rename_query(&query)?;
    let locations: Option<Vec<_>> =
      res.ranges.map(|ranges| ranges.iter().filter_map(convert::lsp_location).collect());
    Ok(locations)
  })?;
  r = helpers::try_req::<lsp_types::request::Completion, _, _>(r, |params| {
    let query = CompletionQuery {
      position: convert::position_query(&params.text_document_position),
      target: st.cx.options.target.clone(),
      inputs: st.gather()?,
    };
    let res = st.compiler.completion_query(&query)?;
    let session = st.sessions.replace(res.completions);
    let (Some(range), Some(completions)) = (res.range, st.sessions.current()) else {
      return Ok(None);
    };
    let range = convert::lsp_range(&range);
    let items: Vec<_> = completions
      .iter()
      .enumerate()
      .map(|(idx, completion)| -> Result<_> {
        let data = serde_json::to_value(ItemData::new(session, idx))?;
        Ok(convert::completion_item(completion, range, Some(data)))
      })
      .collect::<Result<_>>()?;
    Ok(Some(lsp_types::CompletionResponse::Array(items)))
  })?;
  r = helpers::try_req::<lsp_types::request::ResolveCompletionItem, _, _>(r, |item| {
    let data = item.data.clone().and_then(|x| serde_json::from_value::<ItemData>(x).ok());
    let Some(completion) = data.and_then(|data| st.sessions.get(&data)) else {
      return Ok(None);
    };
    let documentation = completion
      .comments
      .as_deref()
      .map(|lines| lsp_types::Documentation::String(completions::format_comments(lines)));
    Ok(Some(lsp_types::CompletionItem {
      label: completion.name.clone(),
      detail: Some(completion.ty.clone()),
      documentation,
      ..item
    }))
  })?;
  r = helpers::try_req::<lsp_types::request::SignatureHelpRequest, _, _>(r, |params| {
    let query = convert::position_query(&params.text_document_position_params);
    let res = st.compiler.signature_query(&query)?;
    let (Some(label), Some(arguments)) = (res.signature, res.arguments) else {
      return Ok(None);
    };
    let parameters = arguments
      .into_iter()
      .map(|label| lsp_types::ParameterInformation {
        label: lsp_types::ParameterLabel::Simple(label),
        documentation: None,
      })
      .collect();
    Ok(Some(lsp_types::SignatureHelp {
      signatures: vec![lsp_types::SignatureInformation {
        label,
        documentation: None,
        parameters: Some(parameters),
        active_parameter: None,
      }],
      active_signature: Some(0),
      active_parameter: u32::try_from(res.argument_index).ok(),
    }))
  })?;
  r = helpers::try_req::<lsp_types::request::CodeActionRequest, _, _>(r, |params| {
    let url = params.text_document.uri;
    let command = st.cx.options.apply_fix_command();
    let mut actions = Vec::<lsp_types::CodeActionOrCommand>::new();
    for diagnostic in &params.context.diagnostics {
      let Some(fixes) = st.fixes.lookup(&url, diagnostic) else { continue };
      for fix in fixes {
        actions.push(convert::fix_action(&command, &url, fix)?);
      }
    }
    Ok(Some(actions))
  })?;
  ControlFlow::Continue(r)
}
