use std::str::FromStr;

use thiserror::Error;

use crate::{
    Transport,
    error::{BraviaError, Result},
    frame::BraviaPort,
};

const POWER_STATE_FUNCTION: u8 = 0x00;
const INPUT_MODE_FUNCTION: u8 = 0x02;
const PICTURE_MODE_FUNCTION: u8 = 0x20;
/// Picture mode sub-command selecting a mode directly instead of cycling.
const PICTURE_MODE_DIRECT: u8 = 0x01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PictureMode {
    Vivid = 0x00,
    Standard = 0x01,
    CinemaHome = 0x02,
    Custom = 0x03,
    CinemaPro = 0x06,
    Sports = 0x07,
    Game = 0x08,
    Graphics = 0x09,
}

impl PictureMode {
    pub const ALL: [Self; 8] = [
        Self::Vivid,
        Self::Standard,
        Self::CinemaHome,
        Self::Custom,
        Self::CinemaPro,
        Self::Sports,
        Self::Game,
        Self::Graphics,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => Self::Vivid,
            0x01 => Self::Standard,
            0x02 => Self::CinemaHome,
            0x03 => Self::Custom,
            0x06 => Self::CinemaPro,
            0x07 => Self::Sports,
            0x08 => Self::Game,
            0x09 => Self::Graphics,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vivid => "vivid",
            Self::Standard => "standard",
            Self::CinemaHome => "cinema_home",
            Self::Custom => "custom",
            Self::CinemaPro => "cinema_pro",
            Self::Sports => "sports",
            Self::Game => "game",
            Self::Graphics => "graphics",
        }
    }
}

/// The high nibble of the code is the input type, the low nibble the index
/// of the input of that type (e.g. 0x42 is the second HDMI input).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputMode {
    Scart1 = 0x21,
    Scart2 = 0x22,
    Scart3 = 0x23,
    Component1 = 0x31,
    Component2 = 0x32,
    Component3 = 0x33,
    Hdmi1 = 0x41,
    Hdmi2 = 0x42,
    Hdmi3 = 0x43,
    Hdmi4 = 0x44,
    Hdmi5 = 0x45,
    Pc = 0x51,
    SharedInput = 0x71,
}

impl InputMode {
    pub const ALL: [Self; 13] = [
        Self::Scart1,
        Self::Scart2,
        Self::Scart3,
        Self::Component1,
        Self::Component2,
        Self::Component3,
        Self::Hdmi1,
        Self::Hdmi2,
        Self::Hdmi3,
        Self::Hdmi4,
        Self::Hdmi5,
        Self::Pc,
        Self::SharedInput,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x21 => Self::Scart1,
            0x22 => Self::Scart2,
            0x23 => Self::Scart3,
            0x31 => Self::Component1,
            0x32 => Self::Component2,
            0x33 => Self::Component3,
            0x41 => Self::Hdmi1,
            0x42 => Self::Hdmi2,
            0x43 => Self::Hdmi3,
            0x44 => Self::Hdmi4,
            0x45 => Self::Hdmi5,
            0x51 => Self::Pc,
            0x71 => Self::SharedInput,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scart1 => "scart_1",
            Self::Scart2 => "scart_2",
            Self::Scart3 => "scart_3",
            Self::Component1 => "component_1",
            Self::Component2 => "component_2",
            Self::Component3 => "component_3",
            Self::Hdmi1 => "hdmi_1",
            Self::Hdmi2 => "hdmi_2",
            Self::Hdmi3 => "hdmi_3",
            Self::Hdmi4 => "hdmi_4",
            Self::Hdmi5 => "hdmi_5",
            Self::Pc => "pc",
            Self::SharedInput => "shared_input",
        }
    }
}

impl std::fmt::Display for PictureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseModeError {
    #[error("unknown picture mode: {0:?}")]
    UnknownPictureMode(String),
    #[error("unknown input mode: {0:?}")]
    UnknownInputMode(String),
}

impl FromStr for PictureMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseModeError::UnknownPictureMode(s.to_owned()))
    }
}

impl FromStr for InputMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseModeError::UnknownInputMode(s.to_owned()))
    }
}

pub fn encode_power(on: bool) -> [u8; 1] {
    [if on { 0x01 } else { 0x00 }]
}

pub fn decode_power(payload: &[u8]) -> Result<bool> {
    let [byte] = payload else {
        return Err(BraviaError::UnexpectedPayloadLength {
            what: "power state",
            expected: 1,
            got: payload.len(),
        });
    };
    match *byte {
        0x00 => Ok(false),
        0x01 => Ok(true),
        value => Err(BraviaError::UnexpectedValue {
            what: "power state",
            value,
        }),
    }
}

pub fn encode_picture_mode(mode: PictureMode) -> [u8; 2] {
    [PICTURE_MODE_DIRECT, mode.code()]
}

/// Input type goes in byte 0, input index in byte 1.
pub fn encode_input_mode(mode: InputMode) -> [u8; 2] {
    let code = mode.code();
    [code >> 4, code & 0x0F]
}

pub fn decode_input_mode(payload: &[u8]) -> Result<InputMode> {
    let [input_type, index] = payload else {
        return Err(BraviaError::UnexpectedPayloadLength {
            what: "input mode",
            expected: 2,
            got: payload.len(),
        });
    };
    let code = ((input_type & 0x0F) << 4) | (index & 0x0F);
    InputMode::from_code(code).ok_or(BraviaError::UnexpectedValue {
        what: "input mode",
        value: code,
    })
}

/// High-level control of a Bravia display.
///
/// Every call is one independent request/response exchange.
pub struct BraviaDisplay<T> {
    port: BraviaPort<T>,
}

impl<T: Transport> BraviaDisplay<T> {
    pub fn new(transport: T) -> Self {
        Self {
            port: BraviaPort::new(transport),
        }
    }

    pub fn into_inner(self) -> T {
        self.port.into_inner()
    }

    /// `true` if the display is on.
    pub fn power_state(&mut self) -> Result<bool> {
        let payload = self.port.request_read(POWER_STATE_FUNCTION)?;
        decode_power(&payload)
    }

    pub fn set_power_state(&mut self, on: bool) -> Result<()> {
        self.port
            .request_write(POWER_STATE_FUNCTION, &encode_power(on))
    }

    /// The protocol has no way to read the picture mode back.
    pub fn set_picture_mode(&mut self, mode: PictureMode) -> Result<()> {
        self.port
            .request_write(PICTURE_MODE_FUNCTION, &encode_picture_mode(mode))
    }

    pub fn input_mode(&mut self) -> Result<InputMode> {
        let payload = self.port.request_read(INPUT_MODE_FUNCTION)?;
        decode_input_mode(&payload)
    }

    pub fn set_input_mode(&mut self, mode: InputMode) -> Result<()> {
        self.port
            .request_write(INPUT_MODE_FUNCTION, &encode_input_mode(mode))
    }
}
