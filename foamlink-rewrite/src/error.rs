use std::{io, string::FromUtf8Error};

use thiserror::Error;

/// Error type for foamlink-rewrite operations.
///
/// Link and permalink resolution never fail; only the filesystem scan and
/// HTML serialization can.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Pages root error: {0}")]
  PagesRoot(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Directory walk error: {0}")]
  Walk(#[from] walkdir::Error),

  #[error("Serialized HTML is not valid UTF-8: {0}")]
  Utf8(#[from] FromUtf8Error),
}
