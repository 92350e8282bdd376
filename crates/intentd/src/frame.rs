//! Minimal Ethernet header decoding for packet-in frames.

use sdn_types::{EtherType, MacAddress};

/// Length of an untagged Ethernet II header.
const HEADER_LEN: usize = 14;

/// The fields of an Ethernet II header the controller cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: MacAddress,
    pub src: MacAddress,
    pub ethertype: EtherType,
}

impl EthernetHeader {
    /// Decodes the leading header of a raw frame.
    ///
    /// Returns `None` for frames too short to carry one; such frames are
    /// dropped by the caller with no forwarding decision.
    pub fn decode(frame: &[u8]) -> Option<Self> {
        if frame.len() < HEADER_LEN {
            return None;
        }
        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        dst.copy_from_slice(&frame[0..6]);
        src.copy_from_slice(&frame[6..12]);
        let ethertype = u16::from_be_bytes([frame[12], frame[13]]);
        Some(Self {
            dst: MacAddress::new(dst),
            src: MacAddress::new(src),
            ethertype: EtherType::new(ethertype),
        })
    }
}
