//! Handle responses to our requests.

use crate::cx::Outgoing;
use crate::state::St;
use lsp_server::Response;

pub(crate) fn handle(st: &mut St, res: Response) {
  log::debug!("got response: {res:?}");
  let Some(data) = st.cx.req_queue.outgoing.complete(res.id.clone()) else {
    log::warn!("received response for non-queued request: {res:?}");
    return;
  };
  match data {
    Outgoing::RegisterWatchedFiles => {
      if let Some(e) = res.error {
        log::warn!("couldn't register for watched file events: {}", e.message);
        log::warn!("falling back to building on save");
        st.cx.registered_for_watched_files = false;
      }
    }
  }
}
