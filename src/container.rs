use crate::config::Method;
use crate::error::{Result, RleError};
use crate::formats::{format_a, format_b};
use crate::io::ByteCursor;
use crate::scanner::Run;
use byteorder::WriteBytesExt;
use std::io::{self, Read, Write};

/// The container header is the tag byte alone.
pub const TAG_LEN: u64 = 1;

pub fn write_tag<W: Write>(writer: &mut W, method: Method) -> Result<()> {
	writer.write_u8(method.tag())?;
	Ok(())
}

/// Read the tag byte and resolve it to a record format.
pub fn read_tag<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Method> {
	let tag = cursor.next_byte()?.ok_or(RleError::TruncatedStream { method: None, offset: 0 })?;
	Method::from_tag(tag).ok_or(RleError::UnknownFormat(tag))
}

pub fn write_run<W: Write>(writer: &mut W, method: Method, run: Run) -> io::Result<()> {
	match method {
		Method::A => format_a::write_run(writer, run),
		Method::B => format_b::write_run(writer, run),
	}
}

pub fn encoded_len(method: Method, run: Run) -> u64 {
	match method {
		Method::A => format_a::encoded_len(run),
		Method::B => format_b::encoded_len(run),
	}
}

/// Decode every record after the tag, returning the record count.
pub fn read_records<R: Read, W: Write>(
	cursor: &mut ByteCursor<R>,
	writer: &mut W,
	method: Method,
	strict: bool,
) -> Result<u64> {
	match method {
		Method::A => format_a::decode(cursor, writer, strict),
		Method::B => format_b::decode(cursor, writer, strict),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn test_tag_bytes() {
		let mut out = Vec::new();
		write_tag(&mut out, Method::A).unwrap();
		write_tag(&mut out, Method::B).unwrap();
		assert_eq!(out, vec![0x21, 0x8a]);
	}

	#[test]
	fn test_read_unknown_tag() {
		let mut cursor = ByteCursor::new(Cursor::new(vec![0x00u8, 1, 2]));
		assert!(matches!(read_tag(&mut cursor), Err(RleError::UnknownFormat(0x00))));
	}

	#[test]
	fn test_read_missing_tag() {
		let mut cursor = ByteCursor::new(Cursor::new(Vec::<u8>::new()));
		assert!(matches!(
			read_tag(&mut cursor),
			Err(RleError::TruncatedStream { method: None, offset: 0 })
		));
	}

	#[test]
	fn test_dispatch_by_tag() {
		// Same bytes, different meaning depending on the tag.
		for (tag, expected) in [(0x21u8, vec![7u8, 7, 7]), (0x8a, vec![3u8, 7])] {
			let mut cursor = ByteCursor::new(Cursor::new(vec![tag, 3, 7]));
			let method = read_tag(&mut cursor).unwrap();
			let mut out = Vec::new();
			read_records(&mut cursor, &mut out, method, false).unwrap();
			assert_eq!(out, expected);
		}
	}
}
