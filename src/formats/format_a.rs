//! Format A: one fixed 2-byte record `[COUNT][VALUE]` per run
//! Every run is written this way, singleton runs included, so the output
//! is always exactly twice the number of runs.

use crate::config::Method;
use crate::error::{Result, RleError};
use crate::io::{write_repeated, ByteCursor};
use crate::scanner::Run;
use byteorder::WriteBytesExt;
use std::io::{self, Read, Write};

pub const RECORD_LEN: u64 = 2;

pub fn write_run<W: Write>(writer: &mut W, run: Run) -> io::Result<()> {
    writer.write_u8(run.len)?;
    writer.write_u8(run.value)
}

pub fn encoded_len(_run: Run) -> u64 {
    RECORD_LEN
}

/// Decode records until end of stream, returning the number of records read.
///
/// A zero count expands to nothing unless `strict` is set, in which case it
/// is reported as an invalid run length.
pub fn decode<R: Read, W: Write>(
    cursor: &mut ByteCursor<R>,
    writer: &mut W,
    strict: bool,
) -> Result<u64> {
    let mut records = 0;

    while let Some(count) = cursor.next_byte()? {
        let offset = cursor.position() - 1;
        let value = cursor.next_byte()?.ok_or(RleError::TruncatedStream {
            method: Some(Method::A),
            offset,
        })?;

        if strict && count == 0 {
            return Err(RleError::InvalidRunLength { method: Method::A, offset, len: count });
        }

        write_repeated(writer, value, count)?;
        records += 1;
    }

    Ok(records)
}
