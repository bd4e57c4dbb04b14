//! Misc. helpers.

use anyhow::{Result, anyhow};
use lsp_server::{ExtractError, Notification, Request};
use std::ops::ControlFlow;

/// Runs `f` if `req` is an `R`. The result is serialized, ready for a response.
pub(crate) fn try_req<R, F, T>(
  req: Request,
  f: F,
) -> ControlFlow<Result<serde_json::Value>, Request>
where
  R: lsp_types::request::Request,
  F: FnOnce(R::Params) -> Result<T>,
  T: serde::Serialize,
{
  match req.extract::<R::Params>(R::METHOD) {
    Ok((_, params)) => ControlFlow::Break(f(params).and_then(|x| Ok(serde_json::to_value(x)?))),
    Err(e) => extract_error(e),
  }
}

pub(crate) fn try_notif<N, F>(notif: Notification, f: F) -> ControlFlow<Result<()>, Notification>
where
  N: lsp_types::notification::Notification,
  F: FnOnce(N::Params) -> Result<()>,
{
  match notif.extract::<N::Params>(N::METHOD) {
    Ok(params) => ControlFlow::Break(f(params)),
    Err(e) => extract_error(e),
  }
}

fn extract_error<T, U>(e: ExtractError<T>) -> ControlFlow<Result<U>, T> {
  match e {
    ExtractError::MethodMismatch(x) => ControlFlow::Continue(x),
    ExtractError::JsonError { method, error } => {
      ControlFlow::Break(Err(anyhow!("couldn't deserialize for {method}: {error}")))
    }
  }
}
