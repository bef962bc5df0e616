use super::cursor::{Reader, Writer};
use super::{ACK_SIZE, ACK_SUCCESS, LIVENESS_NOTICE_SIZE};

use crate::{SessionId, WireError};

/// Single-integer acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack(pub i32);

impl Ack {
    pub const SUCCESS: Ack = Ack(ACK_SUCCESS);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    pub fn encode(self) -> [u8; ACK_SIZE] {
        let mut buf = [0u8; ACK_SIZE];
        Writer::new(&mut buf).write_i32(self.0);
        buf
    }

    #[track_caller]
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut reader = Reader::new(buf, ACK_SIZE, "acknowledgement")?;
        Ok(Ack(reader.read_i32()))
    }
}

/// Tells the process monitor which process owns a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessNotice {
    pub pid: u32,
    pub session_id: SessionId,
}

impl LivenessNotice {
    pub fn encode(&self) -> [u8; LIVENESS_NOTICE_SIZE] {
        let mut buf = [0u8; LIVENESS_NOTICE_SIZE];
        let mut writer = Writer::new(&mut buf);
        writer.write_u32(self.pid);
        writer.write_u32(self.session_id.0);
        buf
    }

    #[track_caller]
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut reader = Reader::new(buf, LIVENESS_NOTICE_SIZE, "liveness notice")?;
        Ok(Self {
            pid: reader.read_u32(),
            session_id: SessionId(reader.read_u32()),
        })
    }
}
