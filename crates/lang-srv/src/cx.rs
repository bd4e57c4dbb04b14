//! See [`Cx`].

use crossbeam_channel::Sender;
use lsp_server::{Message, Notification, ReqQueue, Response};
use lsp_types::Url;

/// Requests we send to the client, so we know what a response is for.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Outgoing {
  RegisterWatchedFiles,
}

/// The context, kind of like "semi-permanent" state.
///
/// Nothing on this is replaced after initialization. The mutable parts only get tweaked.
pub(crate) struct Cx {
  pub(crate) options: config::init::Options,
  pub(crate) registered_for_watched_files: bool,
  pub(crate) hierarchical_symbols: bool,
  pub(crate) fs: paths::RealFileSystem,
  pub(crate) sender: Sender<Message>,
  pub(crate) req_queue: ReqQueue<(), Outgoing>,
}

impl Cx {
  pub(crate) fn new(options: config::init::Options, sender: Sender<Message>) -> Self {
    Self {
      options,
      registered_for_watched_files: false,
      hierarchical_symbols: false,
      fs: paths::RealFileSystem::default(),
      sender,
      req_queue: ReqQueue::default(),
    }
  }

  pub(crate) fn send(&self, msg: Message) {
    log::debug!("sending {msg:?}");
    if let Err(e) = self.sender.send(msg) {
      log::error!("couldn't send a message, the connection is gone: {e}");
    }
  }

  pub(crate) fn send_request<R>(&mut self, params: R::Params, data: Outgoing)
  where
    R: lsp_types::request::Request,
  {
    let req = self.req_queue.outgoing.register(R::METHOD.to_owned(), params, data);
    self.send(req.into());
  }

  pub(crate) fn send_response(&mut self, res: Response) {
    match self.req_queue.incoming.complete(res.id.clone()) {
      Some(()) => self.send(res.into()),
      None => log::warn!("tried to respond to a non-queued request: {res:?}"),
    }
  }

  pub(crate) fn send_notification<N>(&self, params: N::Params)
  where
    N: lsp_types::notification::Notification,
  {
    let notif = Notification::new(N::METHOD.to_owned(), params);
    self.send(notif.into());
  }

  pub(crate) fn send_diagnostics(&self, url: Url, diagnostics: Vec<lsp_types::Diagnostic>) {
    self.send_notification::<lsp_types::notification::PublishDiagnostics>(
      lsp_types::PublishDiagnosticsParams { uri: url, diagnostics, version: None },
    );
  }

  /// Logs the error, writes it to the client's console, and pops it up for the user. Never fatal.
  pub(crate) fn report_error(&self, message: &str) {
    log::error!("{message}");
    let message = format!("{}: {message}", self.options.language_id);
    self.send_notification::<lsp_types::notification::LogMessage>(lsp_types::LogMessageParams {
      typ: lsp_types::MessageType::ERROR,
      message: message.clone(),
    });
    self.send_notification::<lsp_types::notification::ShowMessage>(lsp_types::ShowMessageParams {
      typ: lsp_types::MessageType::ERROR,
      message,
    });
  }
}
