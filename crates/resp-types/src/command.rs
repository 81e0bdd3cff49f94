use std::fmt;

use bytes::Bytes;

use crate::kind::CommandKind;

/// One decoded unit of the stream.
///
/// Values are owned: the decoder copies every argument out of its read
/// buffer into a [`Bytes`] before handing the command over, so a
/// `Command` stays valid no matter what the parser does next. Cloning
/// is cheap (reference-counted values).
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────────────┐
/// │ Field             │ Meaning                                      │
/// ├───────────────────┼──────────────────────────────────────────────┤
/// │ kind              │ which production produced it                 │
/// │ values            │ ordered args; `None` is a null bulk string   │
/// │ integer           │ the number of an Integer command, else 0     │
/// │ byte_length       │ raw bytes consumed from the stream           │
/// │ final_in_batch    │ nothing else was buffered after this command │
/// └───────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// `final_in_batch` is the flush signal: when it is `false`, more
/// commands are already sitting in the buffer and the consumer may keep
/// batching replies; when `true`, replies should be flushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
  kind: CommandKind,
  values: Vec<Option<Bytes>>,
  integer: i64,
  byte_length: usize,
  final_in_batch: bool,
}

impl Command {
  /// A multi-bulk (array) command, or an inline line split into tokens.
  #[must_use]
  pub fn multi(values: Vec<Option<Bytes>>) -> Self {
    Self::new(CommandKind::Multi, values, 0)
  }

  /// A standalone bulk string. `None` is the null bulk (`$-1`).
  #[must_use]
  pub fn bulk(value: Option<Bytes>) -> Self {
    Self::new(CommandKind::BulkString, vec![value], 0)
  }

  /// An integer line. The single value holds the decimal text.
  #[must_use]
  pub fn integer(value: i64) -> Self {
    let text = Bytes::from(value.to_string());
    Self::new(CommandKind::Integer, vec![Some(text)], value)
  }

  /// A status line, without its marker or terminator.
  #[must_use]
  pub fn status(text: Bytes) -> Self {
    Self::new(CommandKind::SimpleStatus, vec![Some(text)], 0)
  }

  fn new(kind: CommandKind, values: Vec<Option<Bytes>>, integer: i64) -> Self {
    Self {
      kind,
      values,
      integer,
      byte_length: 0,
      final_in_batch: false,
    }
  }

  /// Attach the number of stream bytes this command consumed.
  #[must_use]
  pub fn with_byte_length(mut self, byte_length: usize) -> Self {
    self.byte_length = byte_length;
    self
  }

  /// Mark whether the read buffer was drained by this command.
  #[must_use]
  pub fn with_final_in_batch(mut self, final_in_batch: bool) -> Self {
    self.final_in_batch = final_in_batch;
    self
  }

  #[must_use]
  pub fn kind(&self) -> CommandKind {
    self.kind
  }

  /// All values in wire order, nulls included.
  #[must_use]
  pub fn values(&self) -> &[Option<Bytes>] {
    &self.values
  }

  /// The value at `index`, or `None` when out of range or null.
  #[must_use]
  pub fn get(&self, index: usize) -> Option<&[u8]> {
    self.values.get(index)?.as_deref()
  }

  /// The first argument, conventionally the command name.
  #[must_use]
  pub fn name(&self) -> Option<&[u8]> {
    self.get(0)
  }

  /// Iterate over the arguments after the name.
  pub fn args(&self) -> impl Iterator<Item = Option<&[u8]>> {
    self.values.iter().skip(1).map(Option::as_deref)
  }

  #[must_use]
  pub fn arg_count(&self) -> usize {
    self.values.len()
  }

  /// The number carried by an [`CommandKind::Integer`] command.
  #[must_use]
  pub fn integer_value(&self) -> i64 {
    self.integer
  }

  #[must_use]
  pub fn byte_length(&self) -> usize {
    self.byte_length
  }

  #[must_use]
  pub fn is_final_in_batch(&self) -> bool {
    self.final_in_batch
  }

  /// Consume the command and return its values.
  #[must_use]
  pub fn into_values(self) -> Vec<Option<Bytes>> {
    self.values
  }
}

/// One-line rendering used by logs, the CLI, and snapshot tests.
///
/// ```text
/// MULTI ["SET", "k", nil] bytes=27 final=true
/// INTEGER 1000 bytes=7 final=true
/// ```
impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ", self.kind)?;

    if self.kind == CommandKind::Integer {
      write!(f, "{}", self.integer)?;
    } else {
      f.write_str("[")?;
      for (i, value) in self.values.iter().enumerate() {
        if i > 0 {
          f.write_str(", ")?;
        }
        match value {
          Some(v) => write!(f, "\"{}\"", v.escape_ascii())?,
          None => f.write_str("nil")?,
        }
      }
      f.write_str("]")?;
    }

    write!(
      f,
      " bytes={} final={}",
      self.byte_length, self.final_in_batch
    )
  }
}
