//! A language server that decides when to recompile a workspace, what to feed the compiler, and how
//! to turn what the compiler says into protocol messages.
//!
//! The compiler itself is anything implementing [`compiler::Compiler`].

mod capabilities;
mod completions;
mod convert;
mod cx;
mod diagnostics;
mod documents;
mod fixes;
mod gather;
mod helpers;
mod init;
mod notification;
mod request;
mod response;
mod scheduler;
mod state;

#[cfg(test)]
mod tests;

use compiler::Compiler;
use lsp_server::{Connection, Message};
use std::time::Instant;

enum Event {
  Message(Message),
  BuildDue,
  Disconnected,
}

fn run_inner(
  conn: &Connection,
  init: lsp_types::InitializeParams,
  compiler: Box<dyn Compiler>,
) -> anyhow::Result<()> {
  log::info!("start up main loop: {init:#?}");
  let mut st = init::init(init, conn.sender.clone(), compiler);
  loop {
    let event = match st.scheduler.deadline() {
      Some(deadline) => crossbeam_channel::select! {
        recv(conn.receiver) -> msg => msg.map_or(Event::Disconnected, Event::Message),
        recv(crossbeam_channel::at(deadline)) -> _ => Event::BuildDue,
      },
      None => conn.receiver.recv().map_or(Event::Disconnected, Event::Message),
    };
    match event {
      Event::Message(Message::Request(req)) => {
        if conn.handle_shutdown(&req)? {
          log::info!("shut down main loop");
          return Ok(());
        }
        request::handle(&mut st, req);
      }
      Event::Message(Message::Response(res)) => response::handle(&mut st, res),
      Event::Message(Message::Notification(notif)) => notification::handle(&mut st, notif),
      Event::BuildDue => st.on_timer(Instant::now()),
      Event::Disconnected => {
        log::warn!("the connection closed without a shutdown request");
        return Ok(());
      }
    }
  }
}

/// Run the language server over stdio, driving `compiler`.
///
/// # Errors
///
/// If the connection to the client failed.
pub fn run_stdio<C>(compiler: C) -> anyhow::Result<()>
where
  C: Compiler + 'static,
{
  let (connection, io_threads) = lsp_server::Connection::stdio();
  let params = connection.initialize(serde_json::to_value(capabilities::get())?)?;
  run_inner(&connection, serde_json::from_value(params)?, Box::new(compiler))?;
  io_threads.join()?;
  Ok(())
}
