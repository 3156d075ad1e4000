// src/terminal/mod.rs

use alloc::string::String;
use tracing::{debug, trace};

use crate::common::{
    command,
    error::TelemetryError,
    frame::RawFrame,
    hal_traits::{Preferences, ReadingSink, SerialLink},
};
use crate::decoder::{self, DecodedReading, DecoderState, FwssField, Timestamp};

/// Serial terminal for one connected sensor.
///
/// Owns the decoder state and talks to the outside world only through its
/// three collaborators: the link it sends on, the settings it reads on every
/// frame and send, and the sink that shows readings.
#[derive(Debug)]
pub struct SerialTerminal<L, P, D>
where
    L: SerialLink,
    P: Preferences,
    D: ReadingSink,
{
    link: L,
    prefs: P,
    sink: D,
    state: DecoderState,
}

impl<L, P, D> SerialTerminal<L, P, D>
where
    L: SerialLink,
    P: Preferences,
    D: ReadingSink,
{
    pub fn new(link: L, prefs: P, sink: D) -> Self {
        SerialTerminal { link, prefs, sink, state: DecoderState::new() }
    }

    /// Handles one received message and pushes the resulting reading to the sink.
    pub fn on_frame_received(&mut self, raw: &str, now: &Timestamp) -> DecodedReading {
        trace!(raw, "frame received");
        let frame = RawFrame::tokenize(raw);
        let mode = self.prefs.sensor_mode();
        let reading = decoder::decode(&frame, mode, &mut self.state, now);
        self.sink.show(&reading);
        reading
    }

    /// Raw value of the FWSS field selected in settings.
    ///
    /// `None` when no field is selected or `raw` doesn't carry it. The
    /// displayed reading is not touched.
    pub fn selected_field(&self, raw: &str) -> Option<(FwssField, u32)> {
        let field = self.prefs.fwss_field()?;
        match decoder::fwss_field(&RawFrame::tokenize(raw), field) {
            Ok(value) => Some((field, value)),
            Err(e) => {
                trace!(?field, "selected field not read: {}", e);
                None
            }
        }
    }

    /// Received message as the raw log view shows it.
    pub fn echo_received(&self, raw: &str) -> String {
        command::echo(raw, self.prefs.received_message_option())
    }

    /// Frames `message` with the configured terminator and sends it.
    ///
    /// `WouldBlock` from the link is passed through untouched so the caller
    /// can retry; the framed text is returned on success.
    pub fn send_message(&mut self, message: &str) -> nb::Result<String, TelemetryError<L::Error>> {
        let terminator = self.prefs.line_terminator();
        let framed = command::frame(message, terminator);
        match self.link.send(&framed) {
            Ok(()) => {
                debug!(bytes = framed.len(), ?terminator, "message sent");
                Ok(framed)
            }
            Err(nb::Error::WouldBlock) => Err(nb::Error::WouldBlock),
            Err(nb::Error::Other(e)) => Err(nb::Error::Other(TelemetryError::Link(e))),
        }
    }

    /// Current reading, as last pushed to the sink.
    pub fn reading(&self) -> &DecodedReading {
        self.state.display()
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    /// Settings changes take effect on the next frame or send.
    pub fn preferences_mut(&mut self) -> &mut P {
        &mut self.prefs
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Gives the collaborators back.
    pub fn release(self) -> (L, P, D) {
        (self.link, self.prefs, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::preferences::StoredPreferences;
    use crate::common::types::{LineTerminator, ReceivedMessageOption, SensorMode};
    use crate::decoder::{LAST_UPDATE_PREFIX, WAITING_TITLE};
    use alloc::vec::Vec;
    use chrono::NaiveDate;

    // --- Mock collaborators ---

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockLinkError;

    #[derive(Debug, Default)]
    struct MockLink {
        sent: Vec<String>,
        busy_for: usize,
        fail: bool,
    }

    impl SerialLink for MockLink {
        type Error = MockLinkError;

        fn send(&mut self, framed: &str) -> nb::Result<(), Self::Error> {
            if self.fail {
                return Err(nb::Error::Other(MockLinkError));
            }
            if self.busy_for > 0 {
                self.busy_for -= 1;
                return Err(nb::Error::WouldBlock);
            }
            self.sent.push(String::from(framed));
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct MockSink {
        shown: Vec<DecodedReading>,
    }

    impl ReadingSink for MockSink {
        fn show(&mut self, reading: &DecodedReading) {
            self.shown.push(reading.clone());
        }
    }

    type TestTerminal = SerialTerminal<MockLink, StoredPreferences, MockSink>;

    fn terminal(mode: SensorMode, terminator: LineTerminator) -> TestTerminal {
        let prefs = StoredPreferences::from_typed(mode, terminator, ReceivedMessageOption::None);
        SerialTerminal::new(MockLink::default(), prefs, MockSink::default())
    }

    fn now() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap().and_hms_opt(8, 15, 0).unwrap()
    }

    const FWSS_FRAME: &str = "0x01 0x29 0x00 0x00 0x00 0x00 0x00 0xff 0x0a 0x01 0x04";
    const LOAC_FRAME: &str = concat!(
        "0x01 0x37 0x00 0x00 0x00 0x00 0x00 0x00 0x00 0x00 ",
        "0x00 0x00 0x00 0x00 0x00 0x00 0x00 0x01 0xf4"
    );

    #[test]
    fn test_frame_pushes_full_reading_to_sink() {
        let mut term = terminal(SensorMode::Fwss, LineTerminator::None);
        let reading = term.on_frame_received(FWSS_FRAME, &now());
        assert!(reading.title.starts_with(LAST_UPDATE_PREFIX));
        assert_eq!(reading.value_text("Spa Output level").as_deref(), Some("NA"));
        assert_eq!(reading.value_text("Saline test data").as_deref(), Some("HI"));
        assert_eq!(term.sink().shown, [reading.clone()]);
        assert_eq!(*term.reading(), reading);
    }

    #[test]
    fn test_ignored_frame_still_refreshes_sink() {
        let mut term = terminal(SensorMode::Fwss, LineTerminator::None);
        term.on_frame_received("0x01 0x29 0x00", &now());
        assert_eq!(term.sink().shown.len(), 1);
        assert_eq!(term.sink().shown[0].title, WAITING_TITLE);
    }

    #[test]
    fn test_mode_is_read_on_every_frame() {
        let mut term = terminal(SensorMode::Fwss, LineTerminator::None);
        term.on_frame_received(FWSS_FRAME, &now());
        assert!(term.state().first_fwss_received());

        term.preferences_mut().set_sensor_mode(SensorMode::Loac);
        let reading = term.on_frame_received(LOAC_FRAME, &now());
        assert_eq!(reading.value_text("Conductivity").as_deref(), Some("5"));
        assert!(!term.state().first_fwss_received());

        // FWSS data while LOAC is selected is ignored
        let after = term.on_frame_received(FWSS_FRAME, &now());
        assert_eq!(after, reading);

        term.preferences_mut().sensor_mode = 7; // unknown, same as none
        let reading = term.on_frame_received(LOAC_FRAME, &now());
        assert_eq!(reading, DecodedReading::placeholder());
        assert!(!term.state().first_loac_received());
    }

    #[test]
    fn test_send_message_applies_terminator() {
        let mut term = terminal(SensorMode::None, LineTerminator::CarriageReturnNewline);
        assert_eq!(term.send_message("ON").unwrap(), "ON\r\n");

        term.preferences_mut().set_line_terminator(LineTerminator::None);
        assert_eq!(term.send_message("ON").unwrap(), "ON");

        let (link, _, _) = term.release();
        assert_eq!(link.sent, ["ON\r\n", "ON"]);
    }

    #[test]
    fn test_send_message_would_block_then_succeeds() {
        let mut term = terminal(SensorMode::None, LineTerminator::Newline);
        term.link_mut().busy_for = 2;
        assert!(matches!(term.send_message("AT"), Err(nb::Error::WouldBlock)));
        assert!(matches!(term.send_message("AT"), Err(nb::Error::WouldBlock)));
        assert_eq!(term.send_message("AT").unwrap(), "AT\n");
    }

    #[test]
    fn test_send_message_link_error() {
        let mut term = terminal(SensorMode::None, LineTerminator::Newline);
        term.link_mut().fail = true;
        let err = term.send_message("AT").unwrap_err();
        assert!(matches!(err, nb::Error::Other(TelemetryError::Link(MockLinkError))));
    }

    #[test]
    fn test_echo_received() {
        let mut term = terminal(SensorMode::None, LineTerminator::None);
        assert_eq!(term.echo_received("0x01"), "0x01");
        term.preferences_mut().received_message_option = 1;
        assert_eq!(term.echo_received("0x01"), "0x01\n");
    }

    #[test]
    fn test_selected_field_follows_settings() {
        let mut term = terminal(SensorMode::Fwss, LineTerminator::None);
        assert_eq!(term.selected_field(FWSS_FRAME), None);

        term.preferences_mut().set_fwss_field(Some(FwssField::FourMonthTimer));
        assert_eq!(term.selected_field(FWSS_FRAME), Some((FwssField::FourMonthTimer, 4)));
        // Not an FWSS frame
        assert_eq!(term.selected_field(LOAC_FRAME), None);

        // Diagnostic fields need the long frame
        term.preferences_mut().set_fwss_field(Some(FwssField::ErrorCodes));
        assert_eq!(term.selected_field(FWSS_FRAME), None);

        // Inspection leaves the reading alone
        assert_eq!(*term.reading(), DecodedReading::placeholder());
        assert!(term.sink().shown.is_empty());
    }
}
