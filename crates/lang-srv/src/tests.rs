//! Test helpers and tests that drive the whole server.

pub(crate) mod fake;
