//! Replays captured telemetry through the decoder.
//!
//! Usage: `replay <fwss|loac|none> [none|nl|cr|crnl] [field]`
//!
//! Each stdin line is one received frame. A `field` number (1 to 10, in FWSS
//! frame order) also prints that raw FWSS field for every frame carrying it.
//!
//! Lines starting with `>` are outgoing commands instead; they are framed and
//! written to stdout with the line ending escaped.

use std::{
    env,
    io::{self, BufRead, Write},
    process,
};

use hm10_telemetry::{
    common::{
        hal_traits::ReadingSink, LineTerminator, ReceivedMessageOption, SerialLink,
        StoredPreferences,
    },
    decoder::FwssField,
    DecodedReading, SensorMode, SerialTerminal,
};

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Link that writes framed messages to stdout.
struct StdoutLink;

impl SerialLink for StdoutLink {
    type Error = io::Error;

    fn send(&mut self, framed: &str) -> nb::Result<(), Self::Error> {
        let mut out = io::stdout().lock();
        writeln!(out, "> {}", framed.escape_debug()).map_err(nb::Error::Other)
    }
}

/// Prints every reading.
struct StdoutSink;

impl ReadingSink for StdoutSink {
    fn show(&mut self, reading: &DecodedReading) {
        println!("{}\n", reading);
    }
}

fn usage() -> ! {
    eprintln!("usage: replay <fwss|loac|none> [none|nl|cr|crnl] [field]");
    process::exit(2)
}

pub fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mode: SensorMode = match args.get(1).map(|s| s.parse()) {
        Some(Ok(mode)) => mode,
        _ => usage(),
    };
    let terminator: LineTerminator = match args.get(2).map(|s| s.parse()) {
        None => LineTerminator::None,
        Some(Ok(terminator)) => terminator,
        Some(Err(())) => usage(),
    };
    let field = match args.get(3).map(|s| s.parse::<u8>()) {
        None => None,
        Some(Ok(n)) if n <= FwssField::ALL.len() as u8 => FwssField::from_u8(n),
        Some(_) => usage(),
    };

    info!(%mode, ?terminator, ?field, "replaying frames from stdin");
    let mut prefs = StoredPreferences::from_typed(mode, terminator, ReceivedMessageOption::None);
    prefs.set_fwss_field(field);
    let mut terminal = SerialTerminal::new(StdoutLink, prefs, StdoutSink);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("read stdin: {}", e);
                process::exit(1);
            }
        };

        if let Some(message) = line.strip_prefix('>') {
            match terminal.send_message(message.trim_start()) {
                Ok(_) => {}
                Err(nb::Error::WouldBlock) => warn!("link busy, message dropped"),
                Err(nb::Error::Other(e)) => warn!("send failed: {}", e),
            }
        } else if !line.is_empty() {
            let now = chrono::Local::now().naive_local();
            terminal.on_frame_received(&line, &now);
            if let Some((field, value)) = terminal.selected_field(&line) {
                println!("{:?} = {}\n", field, value);
            }
        }
    }
}
