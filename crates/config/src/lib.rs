//! Configuration.

pub mod init;
