use crate::config::{Method, RleConfig};
use crate::container::{self, TAG_LEN};
use crate::error::{Result, RleError};
use crate::io::{ByteCursor, CountingWriter};
use crate::scanner::RunScanner;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct EncodeStats {
	pub method: Method,
	pub original_size: u64,
	pub compressed_size: u64,
	pub runs: u64,
	pub ratio: f64,
}

#[derive(Debug, Clone)]
pub struct DecodeStats {
	pub method: Method,
	pub compressed_size: u64,
	pub decoded_size: u64,
}

#[derive(Debug, Clone)]
pub struct FileInfo {
	pub method: Method,
	pub compressed_size: u64,
	pub original_size: u64,
	pub records: u64,
	pub compression_ratio: f64,
}

fn ratio(original: u64, compressed: u64) -> f64 {
	if compressed > 0 { original as f64 / compressed as f64 } else { 0.0 }
}

/// Write the tag for `method` followed by one record per run of `reader`.
pub fn encode<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	method: Method,
) -> Result<EncodeStats> {
	let mut out = CountingWriter::new(writer);
	container::write_tag(&mut out, method)?;

	let mut original_size = 0u64;
	let mut runs = 0u64;
	for run in RunScanner::new(reader) {
		let run = run?;
		container::write_run(&mut out, method, run)?;
		original_size += run.len as u64;
		runs += 1;
	}
	out.flush()?;

	let compressed_size = out.bytes_written();
	debug!("encoded {} bytes into {} runs ({:?}), {} bytes out", original_size, runs, method, compressed_size);

	Ok(EncodeStats {
		method,
		original_size,
		compressed_size,
		runs,
		ratio: ratio(original_size, compressed_size),
	})
}

/// Read the tag, then expand the records with the matching format.
/// Nothing is written when the tag is unknown.
pub fn decode<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<DecodeStats> {
	let mut cursor = ByteCursor::new(reader);
	let method = container::read_tag(&mut cursor)?;
	let (stats, _records) = decode_records(&mut cursor, writer, method, false)?;
	Ok(stats)
}

fn decode_records<R: Read, W: Write>(
	cursor: &mut ByteCursor<R>,
	writer: &mut W,
	method: Method,
	strict: bool,
) -> Result<(DecodeStats, u64)> {
	let mut out = CountingWriter::new(writer);
	let records = container::read_records(cursor, &mut out, method, strict)?;
	out.flush()?;

	let stats = DecodeStats {
		method,
		compressed_size: cursor.position(),
		decoded_size: out.bytes_written(),
	};
	debug!("decoded {} records ({:?}): {} -> {} bytes", records, method, stats.compressed_size, stats.decoded_size);
	Ok((stats, records))
}

pub fn info<R: Read>(reader: &mut R) -> Result<FileInfo> {
	let mut cursor = ByteCursor::new(reader);
	let method = container::read_tag(&mut cursor)?;
	let (stats, records) = decode_records(&mut cursor, &mut io::sink(), method, false)?;

	Ok(FileInfo {
		method,
		compressed_size: stats.compressed_size,
		original_size: stats.decoded_size,
		records,
		compression_ratio: ratio(stats.decoded_size, stats.compressed_size),
	})
}

/// Decode the whole stream, also rejecting run lengths the encoder never writes.
pub fn validate<R: Read>(reader: &mut R) -> Result<bool> {
	let mut cursor = ByteCursor::new(reader);
	let method = container::read_tag(&mut cursor)?;
	decode_records(&mut cursor, &mut io::sink(), method, true)?;
	Ok(true)
}

/// Size of the container `encode` would produce, without writing it.
pub fn estimate_encoded_size<R: Read>(reader: &mut R, method: Method) -> Result<u64> {
	let mut size = TAG_LEN;
	for run in RunScanner::new(reader) {
		size += container::encoded_len(method, run?);
	}
	Ok(size)
}

/// Open `path` for writing, refusing to replace an existing file unless
/// `overwrite` is set.
pub fn open_output(path: &Path, overwrite: bool) -> Result<File> {
	let mut options = OpenOptions::new();
	options.write(true);
	if overwrite {
		options.create(true).truncate(true);
	} else {
		options.create_new(true);
	}

	options.open(path).map_err(|e| {
		if e.kind() == ErrorKind::AlreadyExists {
			RleError::AlreadyExists(path.to_path_buf())
		} else {
			RleError::Io(e)
		}
	})
}

fn discard_on_error<T>(path: &Path, result: Result<T>) -> Result<T> {
	if result.is_err() {
		if let Err(e) = fs::remove_file(path) {
			warn!("could not remove partial output {}: {}", path.display(), e);
		}
	}
	result
}

/// Encode `reader` into a new file at `output`.
pub fn encode_to_path<R: Read>(reader: R, output: &Path, config: &RleConfig) -> Result<EncodeStats> {
	config.validate()?;
	let mut reader = BufReader::with_capacity(config.buffer_size, reader);

	let mut writer = BufWriter::with_capacity(config.buffer_size, open_output(output, config.overwrite)?);
	let result = encode(&mut reader, &mut writer, config.method)
		.and_then(|stats| writer.flush().map(|_| stats).map_err(RleError::from));
	drop(writer);

	discard_on_error(output, result)
}

/// Decode `reader` into a new file at `output`.
///
/// The tag is checked before `output` is created, so an unknown or missing
/// tag leaves the file system untouched.
pub fn decode_to_path<R: Read>(reader: R, output: &Path, config: &RleConfig) -> Result<DecodeStats> {
	config.validate()?;
	let mut cursor = ByteCursor::new(BufReader::with_capacity(config.buffer_size, reader));
	let method = container::read_tag(&mut cursor)?;

	let mut writer = BufWriter::with_capacity(config.buffer_size, open_output(output, config.overwrite)?);
	let result = decode_records(&mut cursor, &mut writer, method, false)
		.and_then(|(stats, _)| writer.flush().map(|_| stats).map_err(RleError::from));
	drop(writer);

	discard_on_error(output, result)
}

pub fn encode_file<P: AsRef<Path>, Q: AsRef<Path>>(
	input: P,
	output: Q,
	config: &RleConfig,
) -> Result<EncodeStats> {
	let (input, output) = (input.as_ref(), output.as_ref());
	info!("encoding {} -> {} ({:?})", input.display(), output.display(), config.method);
	let stats = encode_to_path(File::open(input)?, output, config)?;
	info!("encoded {} bytes to {} bytes ({:.2}x)", stats.original_size, stats.compressed_size, stats.ratio);
	Ok(stats)
}

pub fn decode_file<P: AsRef<Path>, Q: AsRef<Path>>(
	input: P,
	output: Q,
	config: &RleConfig,
) -> Result<DecodeStats> {
	let (input, output) = (input.as_ref(), output.as_ref());
	info!("decoding {} -> {}", input.display(), output.display());
	let stats = decode_to_path(File::open(input)?, output, config)?;
	info!("decoded {:?} stream of {} bytes to {} bytes", stats.method, stats.compressed_size, stats.decoded_size);
	Ok(stats)
}
