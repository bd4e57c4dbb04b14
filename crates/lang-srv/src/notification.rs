//! Handle notifications.

use crate::helpers;
use crate::state::St;
use anyhow::Result;
use lsp_server::Notification;
use std::ops::ControlFlow;

pub(crate) fn handle(st: &mut St, notif: Notification) {
  log::debug!("got notification: {notif:?}");
  match go(st, notif) {
    ControlFlow::Break(Ok(())) => {}
    ControlFlow::Break(Err(e)) => log::error!("couldn't handle notification: {e:#}"),
    ControlFlow::Continue(notif) => log::warn!("unhandled notification: {notif:?}"),
  }
}

fn go(st: &mut St, mut n: Notification) -> ControlFlow<Result<()>, Notification> {
  n = helpers::try_notif::<lsp_types::notification::DidOpenTextDocument, _>(n, |params| {
    st.documents.open(params.text_document.uri, params.text_document.text);
    st.request_build();
    Ok(())
  })?;
  n = helpers::try_notif::<lsp_types::notification::DidChangeTextDocument, _>(n, |params| {
    st.documents.change(&params.text_document.uri, params.content_changes)?;
    st.request_build();
    Ok(())
  })?;
  n = helpers::try_notif::<lsp_types::notification::DidCloseTextDocument, _>(n, |params| {
    // the on-disk contents, if any, take over.
    st.request_build();
    st.documents.close(&params.text_document.uri)
  })?;
  n = helpers::try_notif::<lsp_types::notification::DidChangeWatchedFiles, _>(n, |_| {
    st.request_build();
    Ok(())
  })?;
  n = helpers::try_notif::<lsp_types::notification::DidSaveTextDocument, _>(n, |_| {
    if st.cx.registered_for_watched_files {
      log::debug!("ignoring DidSaveTextDocument since we registered for watched file events");
    } else {
      st.request_build();
    }
    Ok(())
  })?;
  n = helpers::try_notif::<lsp_types::notification::Cancel, _>(n, |params| {
    // every request is answered before the next message is read, so there is nothing to cancel.
    log::debug!("ignoring cancel for {:?}", params.id);
    Ok(())
  })?;
  ControlFlow::Continue(n)
}
