use crate::error::RleError;
use std::str::FromStr;

/// Tag byte written in front of a Format A stream (`'!'`).
pub const METHOD_A: u8 = 0x21;
/// Tag byte written in front of a Format B stream.
pub const METHOD_B: u8 = 0x8a;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Record encoding used after the tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Fixed `(count, value)` pair for every run.
    A,
    /// Literal byte for singleton runs, `value, value, count` otherwise.
    B,
}

impl Method {
    pub fn tag(self) -> u8 {
        match self {
            Method::A => METHOD_A,
            Method::B => METHOD_B,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            METHOD_A => Some(Method::A),
            METHOD_B => Some(Method::B),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Method {
    type Error = RleError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Method::from_tag(tag).ok_or(RleError::InvalidFormatSelector(tag))
    }
}

impl FromStr for Method {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" => Ok(Method::A),
            "b" => Ok(Method::B),
            _ => Err(RleError::Config(format!("Invalid method: {}", s))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RleConfig {
    pub method: Method,
    pub overwrite: bool,
    pub buffer_size: usize,
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            method: Method::A,
            overwrite: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl RleConfig {
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn validate(&self) -> Result<(), RleError> {
        if self.buffer_size == 0 {
            return Err(RleError::Config("buffer size must be non-zero".to_string()));
        }
        Ok(())
    }
}
