//! Request framing and response validation.
//!
//! Frame formats:
//!
//! - Read request: `[0x83, 0x00, function, 0xFF, 0xFF, checksum]`
//! - Write request: `[0x8C, 0x00, function, len, payload..., checksum]`,
//!   where `len` counts the payload plus the checksum byte
//! - Read response: `[0x70, answer, len, payload..., checksum]`
//! - Write response: `[0x70, answer, checksum]`
//!
//! The checksum is always the low byte of the sum of every preceding byte in
//! the frame.

use log::debug;

use crate::{
    HexBytes, Transport, checksum,
    error::{Answer, BraviaError, Result},
};

pub const READ_REQUEST_HEADER: u8 = 0x83;
pub const WRITE_REQUEST_HEADER: u8 = 0x8C;
/// Second byte of every request. The same for all known functions.
pub const REQUEST_CATEGORY: u8 = 0x00;
pub const RESPONSE_HEADER: u8 = 0x70;

/// The length byte of a write request also counts the checksum.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize - 1;

const READ_REQUEST_FILLER: [u8; 2] = [0xFF, 0xFF];
const RESPONSE_HEADER_LEN: usize = 3;
const WRITE_RESPONSE_LEN: usize = 3;

pub fn build_read_request(function: u8) -> [u8; 6] {
    let mut frame = [
        READ_REQUEST_HEADER,
        REQUEST_CATEGORY,
        function,
        READ_REQUEST_FILLER[0],
        READ_REQUEST_FILLER[1],
        0,
    ];
    frame[5] = checksum(&frame[..5]);
    frame
}

pub fn build_write_request(function: u8, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(BraviaError::PayloadTooLarge { len: payload.len() });
    }
    let mut frame = Vec::with_capacity(payload.len() + 5);
    frame.extend([
        WRITE_REQUEST_HEADER,
        REQUEST_CATEGORY,
        function,
        payload.len() as u8 + 1,
    ]);
    frame.extend_from_slice(payload);
    frame.push(checksum(&frame));
    Ok(frame)
}

/// Check that the last byte of `frame` is the checksum of the others.
pub fn verify_checksum(frame: &[u8]) -> Result<()> {
    let Some((&got, rest)) = frame.split_last() else {
        return Err(BraviaError::LengthMismatch {
            expected: 1,
            got: 0,
        });
    };
    let expected = checksum(rest);
    if expected != got {
        return Err(BraviaError::ChecksumMismatch { expected, got });
    }
    Ok(())
}

fn check_header(header: u8) -> Result<()> {
    if header != RESPONSE_HEADER {
        return Err(BraviaError::InvalidHeader { got: header });
    }
    Ok(())
}

fn check_answer(answer: u8) -> Result<()> {
    match Answer::from_byte(answer) {
        None => Ok(()),
        Some(answer) => Err(answer.into()),
    }
}

/// Validate the first three bytes of a read response and return the declared
/// length of the remainder (payload plus checksum).
///
/// A nonzero answer fails here, before any of the payload is looked at.
pub fn check_read_header(header: [u8; 3]) -> Result<usize> {
    check_header(header[0])?;
    check_answer(header[1])?;
    Ok(header[2] as usize)
}

/// Validate a full read response and return its payload without the
/// trailing checksum.
///
/// Checks run in order: header byte, answer byte, length, checksum.
pub fn parse_read_response(header: [u8; 3], body: &[u8]) -> Result<&[u8]> {
    let declared = check_read_header(header)?;
    if body.len() != declared {
        return Err(BraviaError::LengthMismatch {
            expected: declared,
            got: body.len(),
        });
    }
    if body.is_empty() {
        // the checksum byte itself is missing
        return Err(BraviaError::LengthMismatch {
            expected: 1,
            got: 0,
        });
    }

    let mut frame = Vec::with_capacity(RESPONSE_HEADER_LEN + body.len());
    frame.extend_from_slice(&header);
    frame.extend_from_slice(body);
    verify_checksum(&frame)?;

    Ok(&body[..body.len() - 1])
}

/// Validate a write response.
///
/// Checks run in order: length, header byte, checksum, answer byte.
pub fn parse_write_response(bytes: &[u8]) -> Result<()> {
    if bytes.len() != WRITE_RESPONSE_LEN {
        return Err(BraviaError::LengthMismatch {
            expected: WRITE_RESPONSE_LEN,
            got: bytes.len(),
        });
    }
    check_header(bytes[0])?;
    verify_checksum(bytes)?;
    check_answer(bytes[1])
}

/// Performs request/response exchanges over a [`Transport`].
///
/// Every request consumes its full response before returning, so the stream
/// stays aligned for the next exchange unless the display sent garbage.
pub struct BraviaPort<T> {
    transport: T,
}

impl<T: Transport> BraviaPort<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send a read request and return the response payload. Its format
    /// depends on the function byte.
    pub fn request_read(&mut self, function: u8) -> Result<Vec<u8>> {
        let request = build_read_request(function);
        debug!(
            "sending read request on {}: {}",
            self.transport.name(),
            HexBytes(&request)
        );
        self.transport.write_all(&request)?;

        let raw_header = self.transport.read_up_to(RESPONSE_HEADER_LEN)?;
        let header: [u8; 3] = match raw_header.as_slice().try_into() {
            Ok(header) => header,
            Err(_) => {
                return Err(BraviaError::LengthMismatch {
                    expected: RESPONSE_HEADER_LEN,
                    got: raw_header.len(),
                });
            }
        };
        let declared = check_read_header(header)?;
        let body = self.transport.read_up_to(declared)?;
        let payload = parse_read_response(header, &body)?;

        debug!(
            "received read response on {}: {}",
            self.transport.name(),
            HexBytes(payload)
        );
        Ok(payload.to_vec())
    }

    /// Send a write request and wait for the acknowledgement.
    pub fn request_write(&mut self, function: u8, payload: &[u8]) -> Result<()> {
        let request = build_write_request(function, payload)?;
        debug!(
            "sending write request on {}: {}",
            self.transport.name(),
            HexBytes(&request)
        );
        self.transport.write_all(&request)?;

        let response = self.transport.read_up_to(WRITE_RESPONSE_LEN)?;
        parse_write_response(&response)?;
        debug!(
            "received write response on {}: {}",
            self.transport.name(),
            HexBytes(&response)
        );
        Ok(())
    }
}
