//! I/O utilities for byte-at-a-time record decoding
//!
//! The record readers need single-byte reads with one byte of lookahead and
//! the current stream offset for error reporting. Writers report how many
//! bytes went through them so the pipeline can fill in its statistics.

use byteorder::ReadBytesExt;
use std::io::{self, ErrorKind, Read, Write};

use crate::scanner::MAX_RUN_LENGTH;

/// Sequential byte reader with a single byte of lookahead
pub struct ByteCursor<R> {
    reader: R,
    peeked: Option<u8>,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            position: 0,
        }
    }

    /// Consume the next byte, `None` at end of stream
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.peeked.take() {
            Some(byte) => Some(byte),
            None => self.read_one()?,
        };
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }

    /// Look at the next byte without consuming it
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.read_one()?;
        }
        Ok(self.peeked)
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    fn read_one(&mut self) -> io::Result<Option<u8>> {
        match self.reader.read_u8() {
            Ok(byte) => Ok(Some(byte)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Writer adapter that counts the bytes written through it
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Write `value` repeated `count` times
pub fn write_repeated<W: Write>(writer: &mut W, value: u8, count: u8) -> io::Result<()> {
    let run = [value; MAX_RUN_LENGTH as usize];
    writer.write_all(&run[..count as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = ByteCursor::new(Cursor::new(vec![1u8, 2]));
        assert_eq!(cursor.peek().unwrap(), Some(1));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_byte().unwrap(), Some(1));
        assert_eq!(cursor.next_byte().unwrap(), Some(2));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.peek().unwrap(), None);
        assert_eq!(cursor.next_byte().unwrap(), None);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_counting_writer() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(b"abc").unwrap();
        write_repeated(&mut writer, b'z', 4).unwrap();
        assert_eq!(writer.bytes_written(), 7);
        assert_eq!(writer.into_inner(), b"abczzzz".to_vec());
    }

    #[test]
    fn test_write_repeated_zero() {
        let mut out = Vec::new();
        write_repeated(&mut out, 9, 0).unwrap();
        assert!(out.is_empty());
    }
}
