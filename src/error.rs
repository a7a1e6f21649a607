use crate::config::Method;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RleError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid format selector: 0x{0:02x}")]
	InvalidFormatSelector(u8),

	#[error("Output file already exists: {}", .0.display())]
	AlreadyExists(PathBuf),

	#[error("Unknown container format tag: 0x{0:02x}")]
	UnknownFormat(u8),

	#[error("Truncated stream ({method:?}) at byte offset {offset}")]
	TruncatedStream { method: Option<Method>, offset: u64 },

	#[error("Invalid run length {len} ({method:?}) at byte offset {offset}")]
	InvalidRunLength { method: Method, offset: u64, len: u8 },

	#[error("Configuration error: {0}")]
	Config(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid product attribute: {0}")]
	InvalidAttribute(String),

	#[error("Product with ID {0} already exists")]
	DuplicateId(u32),

	#[error("Parse error on line {line}: {message}")]
	Parse { line: usize, message: String },
}

pub type Result<T, E = RleError> = std::result::Result<T, E>;
