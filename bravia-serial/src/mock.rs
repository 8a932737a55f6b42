use std::collections::VecDeque;
use std::io;

use crate::Transport;

/// Scripted transport: hands out `incoming` in order and records every write.
#[derive(Default)]
pub struct MockTransport {
    pub incoming: VecDeque<u8>,
    pub written: Vec<Vec<u8>>,
    pub read_sizes: Vec<usize>,
}

impl MockTransport {
    pub fn with_response(bytes: &[u8]) -> Self {
        Self {
            incoming: bytes.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.written.push(bytes.to_vec());
        Ok(())
    }

    fn read_up_to(&mut self, len: usize) -> io::Result<Vec<u8>> {
        self.read_sizes.push(len);
        let n = len.min(self.incoming.len());
        Ok(self.incoming.drain(..n).collect())
    }
}

/// Build a well-formed read response carrying `payload`.
pub fn read_response(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x70, 0x00, payload.len() as u8 + 1];
    frame.extend_from_slice(payload);
    frame.push(crate::checksum(&frame));
    frame
}

/// Build a write acknowledgement with the given answer byte.
pub fn write_response(answer: u8) -> Vec<u8> {
    let mut frame = vec![0x70, answer];
    frame.push(crate::checksum(&frame));
    frame
}
