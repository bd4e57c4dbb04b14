//! Initialize a new server.

use crate::cx::{Cx, Outgoing};
use crate::{convert, state::St};
use compiler::Compiler;
use crossbeam_channel::Sender;
use lsp_server::Message;
use std::path::PathBuf;

pub(crate) fn init(
  init: lsp_types::InitializeParams,
  sender: Sender<Message>,
  compiler: Box<dyn Compiler>,
) -> St {
  let options: config::init::Options = init
    .initialization_options
    .and_then(|v| match serde_json::from_value(v) {
      Ok(x) => Some(x),
      Err(e) => {
        log::warn!("invalid initialization_options: {e}");
        None
      }
    })
    .unwrap_or_default();
  let mut cx = Cx::new(options, sender);
  cx.hierarchical_symbols = init
    .capabilities
    .text_document
    .as_ref()
    .and_then(|x| x.document_symbol.as_ref()?.hierarchical_document_symbol_support)
    .unwrap_or_default();
  let last_workspace_folder = init
    .workspace_folders
    .and_then(|mut xs| {
      let ret = xs.pop();
      if !xs.is_empty() {
        log::warn!("we only support the last workspace folder");
      }
      ret
    })
    .map(|x| x.uri);
  #[allow(deprecated)]
  let root_uri = last_workspace_folder.or(init.root_uri);
  let mut root_err = None::<String>;
  let root = match root_uri {
    Some(url) => match convert::file_path(&url) {
      Ok(x) => Some(x),
      Err(e) => {
        root_err = Some(format!("cannot use workspace root {url}: {e:#}"));
        None
      }
    },
    #[allow(deprecated)]
    None => init.root_path.map(PathBuf::from),
  };
  let mut st = St::new(cx, compiler, root);
  if let Some(e) = root_err {
    st.cx.report_error(&e);
  }
  let want_watched_files = init
    .capabilities
    .workspace
    .and_then(|x| x.did_change_watched_files?.dynamic_registration)
    .unwrap_or_default();
  if want_watched_files {
    register_watched_files(&mut st);
  }
  if !st.cx.registered_for_watched_files {
    log::warn!("the server will not necessarily be notified when files change on-disk.");
    log::warn!("on-disk changes made outside the editor, e.g. with `git checkout`, will only be");
    log::warn!("picked up on the next edit or save.");
  }
  st.request_build();
  st
}

fn register_watched_files(st: &mut St) {
  let Some(root) = &st.root else { return };
  let base_uri = match lsp_types::Url::from_directory_path(root) {
    Ok(x) => x,
    Err(()) => {
      log::error!("couldn't make {} into a URL", root.display());
      return;
    }
  };
  let watchers = vec![lsp_types::FileSystemWatcher {
    glob_pattern: lsp_types::GlobPattern::Relative(lsp_types::RelativePattern {
      base_uri: lsp_types::OneOf::Right(base_uri),
      pattern: format!("**/*.{}", st.cx.options.file_extension),
    }),
    kind: None,
  }];
  let registration = convert::registration::<lsp_types::notification::DidChangeWatchedFiles, _>(
    lsp_types::DidChangeWatchedFilesRegistrationOptions { watchers },
  );
  match registration {
    Ok(registration) => {
      st.cx.send_request::<lsp_types::request::RegisterCapability>(
        lsp_types::RegistrationParams { registrations: vec![registration] },
        Outgoing::RegisterWatchedFiles,
      );
      st.cx.registered_for_watched_files = true;
    }
    Err(e) => log::error!("couldn't make the watched files registration: {e:#}"),
  }
}
