//! Learning-switch behavior as observed through the gateway.

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use common::{frame, GatewayCall, RecordingGateway};
use intentd::{FlowAction, LearningSwitch, PacketIn, LEARNED_RULE_PRIORITY};
use pretty_assertions::assert_eq;
use sdn_types::{MacAddress, PortNo, SwitchId};
use tracing::instrument::WithSubscriber;
use tracing_subscriber::fmt::MakeWriter;

const MAC_A: [u8; 6] = [0x00, 0x00, 0x00, 0x00, 0x00, 0xaa];
const MAC_B: [u8; 6] = [0x00, 0x00, 0x00, 0x00, 0x00, 0xbb];
const BROADCAST: [u8; 6] = [0xff; 6];

fn packet_in(switch: u64, in_port: u32, frame: Vec<u8>) -> PacketIn {
    PacketIn {
        switch: SwitchId::new(switch),
        in_port: PortNo::new(in_port),
        frame,
        buffer_id: None,
    }
}

#[tokio::test]
async fn unknown_destination_floods_without_installing() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    let pkt = packet_in(1, 3, frame(MAC_B, MAC_A, 0x0800));
    lsw.handle_packet_in(&gateway, &pkt).await;

    // Source learned even though the destination is unknown.
    assert_eq!(
        lsw.learned_port(SwitchId::new(1), MacAddress::new(MAC_A)),
        Some(PortNo::new(3))
    );
    assert!(gateway.installs().is_empty());
    let outs = gateway.packet_outs();
    assert_eq!(outs.len(), 1);
    let GatewayCall::PacketOut { action, .. } = &outs[0] else {
        unreachable!()
    };
    assert_eq!(*action, FlowAction::Flood);
}

#[tokio::test]
async fn known_destination_installs_one_shortcut_and_one_packet_out() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    // MAC A announces itself on switch 1 port 3.
    lsw.handle_packet_in(&gateway, &packet_in(1, 3, frame(MAC_B, MAC_A, 0x0800)))
        .await;
    gateway.take();

    // A later frame toward A from port 1 resolves to port 3.
    lsw.handle_packet_in(&gateway, &packet_in(1, 1, frame(MAC_A, MAC_B, 0x0800)))
        .await;

    let installs = gateway.installs();
    assert_eq!(installs.len(), 1);
    let rule = &installs[0];
    assert_eq!(rule.switch, SwitchId::new(1));
    assert_eq!(rule.priority, LEARNED_RULE_PRIORITY);
    assert_eq!(rule.matching.in_port, Some(PortNo::new(1)));
    assert_eq!(rule.matching.eth_dst, Some(MacAddress::new(MAC_A)));
    assert_eq!(rule.action, FlowAction::Output(PortNo::new(3)));

    let outs = gateway.packet_outs();
    assert_eq!(outs.len(), 1);
    let GatewayCall::PacketOut { action, .. } = &outs[0] else {
        unreachable!()
    };
    assert_eq!(*action, FlowAction::Output(PortNo::new(3)));
}

#[tokio::test]
async fn tables_are_per_switch() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    lsw.handle_packet_in(&gateway, &packet_in(1, 3, frame(MAC_B, MAC_A, 0x0800)))
        .await;

    // Switch 2 has not seen MAC A.
    assert_eq!(
        lsw.learned_port(SwitchId::new(2), MacAddress::new(MAC_A)),
        None
    );
    gateway.take();
    lsw.handle_packet_in(&gateway, &packet_in(2, 1, frame(MAC_A, MAC_B, 0x0800)))
        .await;
    assert!(gateway.installs().is_empty());
}

#[tokio::test]
async fn lldp_and_ipv6_are_ignored_entirely() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    for ethertype in [0x88cc_u16, 0x86dd] {
        lsw.handle_packet_in(&gateway, &packet_in(1, 3, frame(MAC_B, MAC_A, ethertype)))
            .await;
    }

    assert!(gateway.calls().is_empty());
    // Out of scope for learning too.
    assert_eq!(
        lsw.learned_port(SwitchId::new(1), MacAddress::new(MAC_A)),
        None
    );
}

#[tokio::test]
async fn group_destination_floods_learns_and_never_installs() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    lsw.handle_packet_in(&gateway, &packet_in(1, 2, frame(BROADCAST, MAC_A, 0x0806)))
        .await;

    // The source is still learned from a broadcast frame.
    assert_eq!(
        lsw.learned_port(SwitchId::new(1), MacAddress::new(MAC_A)),
        Some(PortNo::new(2))
    );
    assert!(gateway.installs().is_empty());
    let outs = gateway.packet_outs();
    assert_eq!(outs.len(), 1);
    let GatewayCall::PacketOut { action, .. } = &outs[0] else {
        unreachable!()
    };
    assert_eq!(*action, FlowAction::Flood);
}

#[tokio::test]
async fn malformed_frame_produces_no_side_effects() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    lsw.handle_packet_in(&gateway, &packet_in(1, 1, vec![0xde, 0xad]))
        .await;

    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn buffered_frames_omit_raw_bytes_in_packet_out() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    let mut pkt = packet_in(1, 3, frame(MAC_B, MAC_A, 0x0800));
    pkt.buffer_id = Some(42);
    lsw.handle_packet_in(&gateway, &pkt).await;

    let outs = gateway.packet_outs();
    assert_eq!(outs.len(), 1);
    let GatewayCall::PacketOut {
        buffer_id, data, ..
    } = &outs[0]
    else {
        unreachable!()
    };
    assert_eq!(*buffer_id, Some(42));
    assert_eq!(*data, None);
}

#[tokio::test]
async fn unbuffered_frames_carry_raw_bytes_in_packet_out() {
    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();

    let bytes = frame(MAC_B, MAC_A, 0x0800);
    lsw.handle_packet_in(&gateway, &packet_in(1, 3, bytes.clone()))
        .await;

    let outs = gateway.packet_outs();
    let GatewayCall::PacketOut { data, .. } = &outs[0] else {
        unreachable!()
    };
    assert_eq!(data.as_deref(), Some(bytes.as_slice()));
}

/// Writer that collects formatted log output for inspection.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn only_non_group_frames_are_logged_as_packet_ins() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .finish();

    let gateway = RecordingGateway::new();
    let mut lsw = LearningSwitch::new();
    let multicast = [0x01, 0x00, 0x5e, 0x00, 0x00, 0x01];

    async {
        lsw.handle_packet_in(&gateway, &packet_in(1, 2, frame(multicast, MAC_A, 0x0800)))
            .await;
        lsw.handle_packet_in(&gateway, &packet_in(1, 2, frame(BROADCAST, MAC_A, 0x0800)))
            .await;
        lsw.handle_packet_in(&gateway, &packet_in(1, 2, frame(MAC_B, MAC_A, 0x0800)))
            .await;
    }
    .with_subscriber(subscriber)
    .await;

    // Group-addressed frames stay quiet; only the unicast one announces
    // itself.
    let logs = capture.contents();
    assert_eq!(logs.matches("packet in").count(), 1);
}
