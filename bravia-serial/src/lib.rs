//! Serial control protocol for Sony Bravia displays.
//!
//! [`frame`] owns the byte-level wire format (request framing, response
//! validation, answer codes) and [`display`] maps device operations such as
//! power and input selection onto it.

pub mod display;
pub mod error;
pub mod frame;

#[cfg(test)]
mod mock;

use std::io::{self, Read};

pub use display::{BraviaDisplay, InputMode, PictureMode};
pub use error::{Answer, BraviaError};
pub use frame::BraviaPort;

/// Sum of all bytes, truncated to the low 8 bits.
/// Used both when building requests and when verifying responses.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc.wrapping_add(*b))
}

/// A byte stream connected to a display.
///
/// The protocol assumes exclusive ownership of the link for the duration of
/// one request/response exchange.
pub trait Transport {
    /// Identifier used in log messages, e.g. the serial device path.
    fn name(&self) -> &str;

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read up to `len` bytes. Returns fewer bytes only when the link timed
    /// out or reached EOF.
    fn read_up_to(&mut self, len: usize) -> io::Result<Vec<u8>>;
}

/// Fill a buffer of `len` bytes from `reader`, stopping early on EOF or on a
/// read timeout. Helper for [`Transport`] implementations backed by a
/// [`std::io::Read`].
pub fn read_up_to<R: Read + ?Sized>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0; len];
    let mut filled = 0;
    while filled < len {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(e) => return Err(e),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

/// Formats bytes as `[0x83, 0x00, 0xFF]` for logging.
pub struct HexBytes<'a>(pub &'a [u8]);

impl std::fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (idx, byte) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "0x{byte:02X}")?;
        }
        write!(f, "]")
    }
}
