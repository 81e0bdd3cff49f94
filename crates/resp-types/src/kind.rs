use std::fmt;

/// The grammar production a [`Command`](crate::Command) was decoded from.
///
/// ```text
/// ┌──────────────┬────────┬───────────────────────────────────────┐
/// │ Kind         │ Marker │ Values                                │
/// ├──────────────┼────────┼───────────────────────────────────────┤
/// │ Multi        │ *      │ zero or more bulk arguments           │
/// │              │ (none) │ inline lines also decode as Multi     │
/// │ BulkString   │ $      │ exactly one, possibly null            │
/// │ Integer      │ :      │ exactly one, the decimal text         │
/// │ SimpleStatus │ +      │ exactly one, the status text          │
/// └──────────────┴────────┴───────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
  Multi,
  BulkString,
  Integer,
  SimpleStatus,
}

impl CommandKind {
  /// Uppercase label used in diagnostics and CLI output.
  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      Self::Multi => "MULTI",
      Self::BulkString => "BULK",
      Self::Integer => "INTEGER",
      Self::SimpleStatus => "STATUS",
    }
  }
}

impl fmt::Display for CommandKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
