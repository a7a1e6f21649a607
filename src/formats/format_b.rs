//! Format B: escape-based records
//! Singleton runs: [VALUE], longer runs: [VALUE][VALUE][COUNT]
//!
//! A value byte followed by the same value marks a run and the next byte is
//! its count. This cannot be confused with two literals because the scanner
//! never emits a singleton run next to another run of the same value; the
//! only same-valued neighbours it produces follow a full 255-byte run, which
//! is itself written as a triple.

use crate::config::Method;
use crate::error::{Result, RleError};
use crate::io::{write_repeated, ByteCursor};
use crate::scanner::Run;
use byteorder::WriteBytesExt;
use std::io::{self, Read, Write};

pub fn write_run<W: Write>(writer: &mut W, run: Run) -> io::Result<()> {
    if run.len == 1 {
        writer.write_u8(run.value)
    } else {
        writer.write_all(&[run.value, run.value, run.len])
    }
}

pub fn encoded_len(run: Run) -> u64 {
    if run.len == 1 { 1 } else { 3 }
}

/// Decode records until end of stream, returning the number of records read.
///
/// With `strict` set, triples whose count is below 2 are rejected since the
/// writer never produces them.
pub fn decode<R: Read, W: Write>(
    cursor: &mut ByteCursor<R>,
    writer: &mut W,
    strict: bool,
) -> Result<u64> {
    let mut records = 0;

    while let Some(value) = cursor.next_byte()? {
        let offset = cursor.position() - 1;

        if cursor.peek()? == Some(value) {
            cursor.next_byte()?;
            let count = cursor.next_byte()?.ok_or(RleError::TruncatedStream {
                method: Some(Method::B),
                offset,
            })?;

            if strict && count < 2 {
                return Err(RleError::InvalidRunLength { method: Method::B, offset, len: count });
            }

            write_repeated(writer, value, count)?;
        } else {
            // Literal; the peeked byte starts the next record.
            writer.write_u8(value)?;
        }
        records += 1;
    }

    Ok(records)
}
