//! Received frame in monitor (TNC2) text format.
//!
//! `SRC>DST,VIA1,VIA2,...,VIAn:payload`
//!
//! The frame keeps two markers into its text: where the destination call
//! ends (the `,` or `:` right after it) and where the payload starts (just
//! past the first `:` of the header).

use serde::Serialize;

use crate::error::FrameError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    text: String,
    #[serde(skip)]
    dstcall_end: usize,
    #[serde(skip)]
    info_start: usize,
}

impl Frame {
    /// Split a monitor-format line into its header markers.
    pub fn parse(line: impl Into<String>) -> Result<Self, FrameError> {
        let text = line.into();

        let gt = match text.find('>') {
            Some(0) | None => return Err(FrameError::MissingSource),
            Some(idx) => idx,
        };
        let dst_start = gt + 1;
        let dstcall_end = text[dst_start..]
            .find([',', ':'])
            .map(|off| dst_start + off)
            .ok_or(FrameError::MissingPayload)?;
        if dstcall_end == dst_start {
            return Err(FrameError::MissingDestination);
        }
        let colon = text[dstcall_end..]
            .find(':')
            .map(|off| dstcall_end + off)
            .ok_or(FrameError::MissingPayload)?;

        Ok(Self {
            text,
            dstcall_end,
            info_start: colon + 1,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        let gt = self.text.find('>').unwrap_or(0);
        &self.text[..gt]
    }

    pub fn destination(&self) -> &str {
        let gt = self.source().len();
        &self.text[gt + 1..self.dstcall_end]
    }

    /// Header text after the destination terminator, up to and including the
    /// payload delimiter. Empty when the frame has no via path.
    pub fn via_segment(&self) -> &str {
        &self.text[self.dstcall_end + 1..self.info_start]
    }

    pub fn payload(&self) -> &str {
        &self.text[self.info_start..]
    }

    /// Byte offset of the destination terminator.
    pub fn dstcall_end(&self) -> usize {
        self.dstcall_end
    }

    /// Byte offset of the first payload byte.
    pub fn info_start(&self) -> usize {
        self.info_start
    }
}
