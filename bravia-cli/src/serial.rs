use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use bravia_serial::Transport;
use log::debug;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerialConfig {
    pub path: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PORT.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// A display connected through a serial port (8N1, no flow control).
pub struct SerialTransport {
    path: String,
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(config: &SerialConfig) -> anyhow::Result<Self> {
        debug!(
            "opening {} at {} baud, timeout {:?}",
            config.path, config.baud_rate, config.timeout
        );
        let port = serialport::new(&config.path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.timeout)
            .open()
            .with_context(|| format!("failed to open serial port {}", config.path))?;
        Ok(Self {
            path: config.path.clone(),
            port,
        })
    }
}

impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.path
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()
    }

    fn read_up_to(&mut self, len: usize) -> io::Result<Vec<u8>> {
        bravia_serial::read_up_to(&mut self.port, len)
    }
}
