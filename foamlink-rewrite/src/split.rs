//! Splitting raw link targets into pathname, query and hash.
use std::fmt;

/// A link target split into its three parts.
///
/// `query` is either empty or starts with `?`, `hash` is either empty or
/// starts with `#`. Displaying the value reassembles the original target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitUrl {
  pub pathname: String,
  pub query:    String,
  pub hash:     String,
}

impl SplitUrl {
  /// Split a raw `href`/`src` value. Accepts any string.
  ///
  /// The first `?` ends the pathname. The first `#` after it (or in the whole
  /// string when there is no `?`) starts the hash.
  #[must_use]
  pub fn parse(raw: &str) -> Self {
    let (pathname, query, hash) = match raw.split_once('?') {
      Some((pathname, rest)) => {
        match rest.split_once('#') {
          Some((query, hash)) => (pathname, format!("?{query}"), format!("#{hash}")),
          None => (pathname, format!("?{rest}"), String::new()),
        }
      },
      None => {
        match raw.split_once('#') {
          Some((pathname, hash)) => (pathname, String::new(), format!("#{hash}")),
          None => (raw, String::new(), String::new()),
        }
      },
    };

    Self {
      pathname: pathname.to_string(),
      query,
      hash,
    }
  }

  /// Reassemble `pathname + query + hash` with a replacement pathname.
  #[must_use]
  pub fn with_pathname(&self, pathname: &str) -> String {
    format!("{pathname}{}{}", self.query, self.hash)
  }
}

impl fmt::Display for SplitUrl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.pathname, self.query, self.hash)
  }
}
