//! Hardware MIDI input: the midir callback thread is the single producer
//! of the engine's event queue.

use color_eyre::eyre::{eyre, Result as EyreResult};
use midir::{MidiInput, MidiInputConnection};

use monovox::io::midi::MidiEvent;
use monovox::MidiEventSender;

use crate::menu::read_int;

/// Connect a MIDI input port, selected on stdin, to the event queue.
///
/// Returns `None` when no input ports exist; audio and the menu keep
/// running, there is just nothing to play notes with.
pub fn connect(sender: MidiEventSender) -> EyreResult<Option<MidiInputConnection<MidiEventSender>>> {
    let input = MidiInput::new("monovox input").map_err(|err| eyre!("MIDI init failed: {err}"))?;

    let ports = input.ports();
    if ports.is_empty() {
        log::warn!("no MIDI input ports found");
        println!("No MIDI input ports found.");
        return Ok(None);
    }

    println!("Choose MIDI input device:");
    for (index, port) in ports.iter().enumerate() {
        let name = input
            .port_name(port)
            .unwrap_or_else(|_| "<unknown>".into());
        println!(" {}: {}", index + 1, name);
    }
    let selection = read_int(1, ports.len() as i64) as usize - 1;

    let port = &ports[selection];
    let name = input
        .port_name(port)
        .unwrap_or_else(|_| "<unknown>".into());

    let connection = input
        .connect(
            port,
            "monovox",
            |timestamp, bytes, sender| {
                if let Some(event) = MidiEvent::from_bytes(bytes, timestamp) {
                    // a full queue drops the event; the render deadline wins
                    sender.try_send(event);
                }
            },
            sender,
        )
        .map_err(|err| eyre!("cannot open MIDI port: {err}"))?;

    log::info!("connected to MIDI input {name}");
    Ok(Some(connection))
}
