//! Run scanner shared by both record formats
//!
//! Splits a byte stream into maximal runs of one repeated value. A run never
//! exceeds [`MAX_RUN_LENGTH`]; a longer physical run comes out as several
//! consecutive runs of the same value. Two adjacent runs share a value only
//! when the first one is exactly [`MAX_RUN_LENGTH`] long.

use std::io::{self, Bytes, Read};

pub const MAX_RUN_LENGTH: u8 = 255;

/// A value and how many times it repeats, `1..=MAX_RUN_LENGTH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub value: u8,
    pub len: u8,
}

impl Run {
    pub fn new(value: u8, len: u8) -> Self {
        debug_assert!(len != 0, "runs are never empty");
        Self { value, len }
    }
}

/// Lazy iterator of runs over a byte source.
///
/// The source is consumed once. Wrap unbuffered readers in a `BufReader`
/// since bytes are pulled one at a time. After the first I/O error the
/// iterator is fused.
pub struct RunScanner<R> {
    bytes: Bytes<R>,
    current: Option<u8>,
    count: u8,
    finished: bool,
}

impl<R: Read> RunScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            current: None,
            count: 0,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for RunScanner<R> {
    type Item = io::Result<Run>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.bytes.next() {
                Some(Ok(byte)) => {
                    let Some(current) = self.current else {
                        self.current = Some(byte);
                        self.count = 1;
                        continue;
                    };

                    if byte == current {
                        self.count += 1;
                        if self.count == MAX_RUN_LENGTH {
                            // The flushed record covers everything seen so far.
                            self.count = 0;
                            return Some(Ok(Run::new(current, MAX_RUN_LENGTH)));
                        }
                    } else {
                        let flushed = self.count;
                        self.current = Some(byte);
                        self.count = 1;
                        if flushed != 0 {
                            return Some(Ok(Run::new(current, flushed)));
                        }
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    let current = self.current.take()?;
                    if self.count == 0 {
                        return None;
                    }
                    return Some(Ok(Run::new(current, self.count)));
                }
            }
        }
    }
}

/// Collect all runs of an in-memory buffer
pub fn scan(data: &[u8]) -> io::Result<Vec<Run>> {
    RunScanner::new(data).collect()
}
