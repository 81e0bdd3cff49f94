use std::io::{self, ErrorKind, Read};

/// A blocking producer of stream bytes.
///
/// The parser only ever asks for "at least `min` bytes into this
/// region". An implementation must either deliver that many, report
/// end-of-stream as [`ErrorKind::UnexpectedEof`], or fail with another
/// I/O error. Returning fewer than `min` bytes with `Ok` is a contract
/// violation.
///
/// Every [`Read`] is a `ByteSource`, so sockets, files, pipes and
/// in-memory cursors all work directly.
pub trait ByteSource {
    /// Fill at least `min` bytes at the front of `buf`.
    ///
    /// `buf.len()` is always `>= min`. More bytes may be written, up to
    /// `buf.len()`; the return value says how many.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedEof`] when the source is exhausted first,
    /// or whatever the underlying read failed with.
    fn fill_at_least(&mut self, buf: &mut [u8], min: usize) -> io::Result<usize>;
}

impl<R: Read> ByteSource for R {
    fn fill_at_least(&mut self, buf: &mut [u8], min: usize) -> io::Result<usize> {
        let mut filled = 0;
        while filled < min {
            match self.read(&mut buf[filled..]) {
                Ok(0) => return Err(ErrorKind::UnexpectedEof.into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}
