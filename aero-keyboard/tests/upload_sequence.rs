//! Integration tests for the session layer.
//!
//! A recording transport stands in for the keyboard so the exact call
//! sequence can be checked: which reports, which chunks, in what order, and
//! what happens to the session when a call fails part way through.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aero_keyboard::{
    pack_image, Color, KeyboardError, KeyboardSession, Mode, RgbColor, SessionState,
    UploadStage,
};
use aero_transport::protocol::FRAME_SIZE;
use aero_transport::{Transport, TransportDeviceInfo, TransportError};

const BEGIN: [u8; 8] = [0x12, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0xE4];
const COMMIT: [u8; 8] = [0x08, 0x00, 0x34, 0x05, 0x32, 0x02, 0x01, 0x89];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Report([u8; FRAME_SIZE]),
    Write(Vec<u8>),
    Close,
}

/// Records every call; optionally fails the Nth one (0-based, closes excluded)
struct RecordingTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_at: Option<usize>,
    io_count: usize,
    info: TransportDeviceInfo,
}

impl RecordingTransport {
    fn new() -> (Self, Arc<Mutex<Vec<Call>>>) {
        Self::failing_at(None)
    }

    fn failing_at(fail_at: Option<usize>) -> (Self, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let transport = Self {
            calls: Arc::clone(&calls),
            fail_at,
            io_count: 0,
            info: TransportDeviceInfo {
                vid: 0x1044,
                pid: 0x7a3b,
                interface_number: 3,
                device_path: "mock".to_string(),
                serial: None,
                manufacturer: None,
                product_name: Some("Mock keyboard".to_string()),
            },
        };
        (transport, calls)
    }

    fn record(&mut self, call: Call) -> Result<(), TransportError> {
        let index = self.io_count;
        self.io_count += 1;
        if self.fail_at == Some(index) {
            return Err(TransportError::Disconnected);
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl Transport for RecordingTransport {
    fn send_feature_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<(), TransportError> {
        self.record(Call::Report(*frame))
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        self.record(Call::Write(chunk.to_vec()))
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(Call::Close);
        Ok(())
    }
}

fn snapshot(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<Call> {
    calls.lock().unwrap().clone()
}

fn close_count(calls: &[Call]) -> usize {
    calls.iter().filter(|c| **c == Call::Close).count()
}

fn gradient_image() -> Vec<u8> {
    (0..512).map(|i| (i % 251) as u8).collect()
}

// ── Custom upload ──

#[test]
fn custom_upload_call_order() {
    let (transport, calls) = RecordingTransport::new();
    let mut session = KeyboardSession::new(transport);
    let image = gradient_image();

    session.apply_custom(&image).unwrap();
    assert_eq!(session.state(), SessionState::Committed);

    let calls = snapshot(&calls);
    assert_eq!(calls.len(), 10);
    assert_eq!(calls[0], Call::Report(BEGIN));
    for (i, call) in calls[1..9].iter().enumerate() {
        assert_eq!(*call, Call::Write(image[i * 64..(i + 1) * 64].to_vec()), "chunk {i}");
    }
    assert_eq!(calls[9], Call::Report(COMMIT));
}

#[test]
fn begin_and_commit_do_not_depend_on_image() {
    for image in [vec![0u8; 512], vec![0xFF; 512], gradient_image()] {
        let (transport, calls) = RecordingTransport::new();
        let mut session = KeyboardSession::new(transport);
        session.apply_custom(&image).unwrap();

        let calls = snapshot(&calls);
        assert_eq!(calls.first(), Some(&Call::Report(BEGIN)));
        assert_eq!(calls.last(), Some(&Call::Report(COMMIT)));
    }
}

#[test]
fn packed_image_upload() {
    let (transport, calls) = RecordingTransport::new();
    let mut session = KeyboardSession::new(transport);
    let image = pack_image(&HashMap::from([("esc", RgbColor::RED)]));

    session.apply_image(&image).unwrap();

    let calls = snapshot(&calls);
    // esc is slot 12: bytes 44..48 of the first chunk
    match &calls[1] {
        Call::Write(chunk) => assert_eq!(&chunk[44..48], &[0, 255, 0, 0]),
        other => panic!("expected first chunk, got {other:?}"),
    }
}

#[test]
fn wrong_length_image_sends_nothing() {
    for len in [0, 511, 513] {
        let (transport, calls) = RecordingTransport::new();
        let mut session = KeyboardSession::new(transport);

        let err = session.apply_custom(&vec![0u8; len]).unwrap_err();
        assert!(
            matches!(err, KeyboardError::Length { expected: 512, actual } if actual == len),
            "{err:?}"
        );
        assert_eq!(session.state(), SessionState::Opened);
        assert!(snapshot(&calls).is_empty());
    }
}

#[test]
fn chunk_failure_aborts_upload() {
    // call 0 is the begin frame, calls 1..=8 are chunks
    for failing_chunk in 0..8 {
        let (transport, calls) = RecordingTransport::failing_at(Some(failing_chunk + 1));
        let mut session = KeyboardSession::new(transport);

        let err = session.apply_custom(&gradient_image()).unwrap_err();
        match &err {
            KeyboardError::UploadAborted { stage, source } => {
                assert_eq!(*stage, UploadStage::Chunk { index: failing_chunk });
                assert!(matches!(source, TransportError::Disconnected));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.device_state_uncertain());
        assert_eq!(session.state(), SessionState::Failed);

        // begin frame plus the chunks written before the failure, no commit
        let recorded = snapshot(&calls);
        assert_eq!(recorded.len(), 1 + failing_chunk);
        assert!(!recorded.contains(&Call::Report(COMMIT)));

        // failed is terminal
        let retry = session.apply_preset(Mode::Static, 0, 20, Color::White);
        assert!(matches!(retry, Err(KeyboardError::SessionFailed)));
        assert_eq!(snapshot(&calls).len(), 1 + failing_chunk);

        drop(session);
        assert_eq!(close_count(&snapshot(&calls)), 1);
    }
}

#[test]
fn commit_failure_aborts_upload() {
    let (transport, calls) = RecordingTransport::failing_at(Some(9));
    let mut session = KeyboardSession::new(transport);

    let err = session.apply_custom(&gradient_image()).unwrap_err();
    assert!(matches!(
        err,
        KeyboardError::UploadAborted {
            stage: UploadStage::Commit,
            ..
        }
    ));
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(snapshot(&calls).len(), 9);
}

#[test]
fn begin_frame_failure_is_transport_error() {
    let (transport, calls) = RecordingTransport::failing_at(Some(0));
    let mut session = KeyboardSession::new(transport);

    let err = session.apply_custom(&gradient_image()).unwrap_err();
    assert!(matches!(
        err,
        KeyboardError::Transport(TransportError::Disconnected)
    ));
    assert!(!err.device_state_uncertain());
    assert_eq!(session.state(), SessionState::Failed);
    assert!(snapshot(&calls).is_empty());
}

// ── Presets ──

#[test]
fn preset_sends_one_report() {
    let (transport, calls) = RecordingTransport::new();
    let mut session = KeyboardSession::new(transport);

    session
        .apply_preset(Mode::Static, 0, 20, Color::White)
        .unwrap();
    assert_eq!(session.state(), SessionState::Preset);
    assert_eq!(
        snapshot(&calls),
        vec![Call::Report([0x08, 0x00, 0x01, 0x00, 0x14, 0x07, 0x00, 0xDB])]
    );
}

#[test]
fn preset_validation_sends_nothing() {
    let (transport, calls) = RecordingTransport::new();
    let mut session = KeyboardSession::new(transport);

    let err = session
        .apply_preset(Mode::Breathing, 11, 20, Color::Red)
        .unwrap_err();
    assert!(matches!(err, KeyboardError::Validation(_)));

    let err = session
        .apply_preset(Mode::Breathing, 5, 52, Color::Red)
        .unwrap_err();
    assert!(matches!(err, KeyboardError::Validation(_)));

    assert_eq!(session.state(), SessionState::Opened);
    assert!(snapshot(&calls).is_empty());
}

#[test]
fn commands_after_commit_are_accepted() {
    let (transport, calls) = RecordingTransport::new();
    let mut session = KeyboardSession::new(transport);

    session.apply_custom(&[0u8; 512]).unwrap();
    session
        .apply_preset(Mode::Rotate, 3, 51, Color::Blue)
        .unwrap();
    session.apply_custom(&[0u8; 512]).unwrap();

    assert_eq!(session.state(), SessionState::Committed);
    assert_eq!(snapshot(&calls).len(), 21);
}

// ── Lifecycle ──

#[test]
fn explicit_close_then_drop_closes_once() {
    let (transport, calls) = RecordingTransport::new();
    let mut session = KeyboardSession::new(transport);

    session.close().unwrap();
    session.close().unwrap();

    let err = session
        .apply_preset(Mode::Static, 0, 20, Color::White)
        .unwrap_err();
    assert!(matches!(err, KeyboardError::Closed));
    let err = session.apply_custom(&[0u8; 512]).unwrap_err();
    assert!(matches!(err, KeyboardError::Closed));

    drop(session);
    assert_eq!(snapshot(&calls), vec![Call::Close]);
}

#[test]
fn drop_closes_transport() {
    let (transport, calls) = RecordingTransport::new();
    {
        let mut session = KeyboardSession::new(transport);
        session
            .apply_preset(Mode::Neon, 1, 10, Color::Purple)
            .unwrap();
        assert_eq!(session.device_info().interface_number, 3);
    }
    let calls = snapshot(&calls);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls.last(), Some(&Call::Close));
}

#[test]
fn boxed_transport_session() {
    let (transport, calls) = RecordingTransport::new();
    let boxed: Box<dyn Transport> = Box::new(transport);
    let mut session = KeyboardSession::new(boxed);

    session.apply_custom(&gradient_image()).unwrap();
    drop(session);

    let calls = snapshot(&calls);
    assert_eq!(calls.len(), 11);
    assert_eq!(close_count(&calls), 1);
}

// ── Hardware ──

#[test]
#[ignore = "requires a connected keyboard"]
fn hardware_static_preset() {
    let selector = aero_transport::DeviceSelector::default();
    let mut session = KeyboardSession::open(&selector).expect("open keyboard");
    session
        .apply_preset(Mode::Static, 0, 20, Color::White)
        .expect("apply preset");
    session.close().expect("close");
}
