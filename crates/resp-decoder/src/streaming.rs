use resp_types::Command;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::error::DecodeError;
use crate::parser::Parser;
use crate::source::ByteSource;

/// Push-based command sequence: a parser running on a blocking task,
/// handing results over a bounded channel.
///
/// ```text
///   ByteSource ──read──▶ Parser (spawn_blocking) ──mpsc(capacity)──▶ consumer
/// ```
///
/// The channel is bounded, so a slow consumer blocks the producer
/// instead of letting decoded commands pile up in memory. The producer
/// stops at the first of:
///
///   - end of stream (channel closes, no item sent),
///   - a decode or I/O error (sent as the last item, then the channel
///     closes),
///   - the consumer dropping the stream.
///
/// The channel closes exactly once, when the producer drops its sender.
///
/// # Example
///
/// ```rust
/// use resp_decoder::{Parser, spawn_command_stream};
///
/// # #[tokio::main]
/// # async fn main() {
/// let input: &'static [u8] = b"*1\r\n$4\r\nPING\r\n+OK\r\n";
/// let mut stream = spawn_command_stream(Parser::new(input), 16);
///
/// let mut names = Vec::new();
/// while let Some(result) = stream.next().await {
///     names.push(result.unwrap().kind());
/// }
/// assert_eq!(names.len(), 2);
/// # }
/// ```
pub struct CommandStream {
    rx: mpsc::Receiver<Result<Command, DecodeError>>,
    task: JoinHandle<usize>,
}

/// Start decoding `parser` on a blocking task.
///
/// `capacity` is the number of decoded commands that may wait in the
/// channel; values below 1 are raised to 1.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
pub fn spawn_command_stream<S>(parser: Parser<S>, capacity: usize) -> CommandStream
where
    S: ByteSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let task = tokio::task::spawn_blocking(move || produce(parser, &tx));
    CommandStream { rx, task }
}

/// Producer loop. Returns how many items were delivered.
fn produce<S: ByteSource>(
    mut parser: Parser<S>,
    tx: &mpsc::Sender<Result<Command, DecodeError>>,
) -> usize {
    let mut delivered = 0;

    for item in parser.commands() {
        let failed = item.is_err();
        // blocks while the channel is full
        if tx.blocking_send(item).is_err() {
            debug!(delivered, "command stream receiver dropped");
            return delivered;
        }
        delivered += 1;
        if failed {
            debug!(delivered, "command stream stopped on error");
            return delivered;
        }
    }

    debug!(delivered, "command stream reached end of input");
    delivered
}

impl CommandStream {
    /// Receive the next decoded command.
    ///
    /// Returns `None` once the producer has finished and every queued
    /// item has been received.
    pub async fn next(&mut self) -> Option<Result<Command, DecodeError>> {
        self.rx.recv().await
    }

    /// Stop receiving and wait for the producer to exit.
    ///
    /// Dropping the receiver makes the producer's next send fail, so it
    /// exits after at most one more decode. A producer blocked inside
    /// its source stays blocked until that read returns.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if the producer task panicked.
    pub async fn finish(self) -> Result<usize, JoinError> {
        drop(self.rx);
        self.task.await
    }

    /// Split off the raw receiver, detaching the producer task.
    #[must_use]
    pub fn into_receiver(self) -> mpsc::Receiver<Result<Command, DecodeError>> {
        self.rx
    }
}
