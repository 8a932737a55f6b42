use thiserror::Error;

/// Nonzero answer byte of a response: the display refused the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Answer {
    #[error("Limit Over (Abnormal End - over maximum value)")]
    LimitOverMaximum,
    #[error("Limit Over (Abnormal End - under minimum value)")]
    LimitUnderMinimum,
    #[error("Command Canceled (Abnormal End)")]
    CommandCanceled,
    #[error("Parse Error (Data Format Error)")]
    ParseError,
    #[error("Unrecognized response answer 0x{0:02X}")]
    Unrecognized(u8),
}

impl Answer {
    /// `None` for `0x00` (success), otherwise the error the byte stands for.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x00 => return None,
            0x01 => Self::LimitOverMaximum,
            0x02 => Self::LimitUnderMinimum,
            0x03 => Self::CommandCanceled,
            0x04 => Self::ParseError,
            other => Self::Unrecognized(other),
        })
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::LimitOverMaximum => 0x01,
            Self::LimitUnderMinimum => 0x02,
            Self::CommandCanceled => 0x03,
            Self::ParseError => 0x04,
            Self::Unrecognized(code) => *code,
        }
    }
}

#[derive(Debug, Error)]
pub enum BraviaError {
    #[error("payload is too large (expected length <= 254 bytes, got {len} bytes)")]
    PayloadTooLarge { len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid response header 0x{got:02X}")]
    InvalidHeader { got: u8 },

    #[error("unexpected response length (expected {expected} bytes, got {got} bytes)")]
    LengthMismatch { expected: usize, got: usize },

    #[error("invalid response checksum (expected 0x{expected:02X}, got 0x{got:02X})")]
    ChecksumMismatch { expected: u8, got: u8 },

    #[error("display returned an error: {0}")]
    Device(#[from] Answer),

    #[error("unexpected {what} value 0x{value:02X}")]
    UnexpectedValue { what: &'static str, value: u8 },

    #[error("unexpected {what} payload length (expected {expected} bytes, got {got} bytes)")]
    UnexpectedPayloadLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}

impl BraviaError {
    /// True when the display itself rejected the request, as opposed to a
    /// transport, framing or decoding fault.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

pub type Result<T> = std::result::Result<T, BraviaError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn answer_table() {
        assert_eq!(Answer::from_byte(0x00), None);
        assert_eq!(Answer::from_byte(0x01), Some(Answer::LimitOverMaximum));
        assert_eq!(Answer::from_byte(0x02), Some(Answer::LimitUnderMinimum));
        assert_eq!(Answer::from_byte(0x03), Some(Answer::CommandCanceled));
        assert_eq!(Answer::from_byte(0x04), Some(Answer::ParseError));
        assert_eq!(Answer::from_byte(0x9A), Some(Answer::Unrecognized(0x9A)));
        for byte in 1..=u8::MAX {
            assert_eq!(Answer::from_byte(byte).unwrap().code(), byte);
        }
    }

    #[test]
    fn answer_messages() {
        assert_eq!(
            Answer::LimitOverMaximum.to_string(),
            "Limit Over (Abnormal End - over maximum value)"
        );
        assert_eq!(
            Answer::Unrecognized(0x0B).to_string(),
            "Unrecognized response answer 0x0B"
        );
        let err = BraviaError::from(Answer::CommandCanceled);
        assert!(err.is_device_error());
        assert_eq!(
            err.to_string(),
            "display returned an error: Command Canceled (Abnormal End)"
        );
    }
}
