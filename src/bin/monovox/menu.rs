//! Line-oriented control surface: waveform selection and envelope values.

use std::io;

use monovox::dsp::envelope::{
    ATTACK_MAX_MS, DECAY_MAX_MS, RELEASE_MAX_MS, SUSTAIN_MAX_PERCENT,
};
use monovox::dsp::oscillator::Waveform;
use monovox::ControlHandle;

/// Run the menu loop until the user quits.
pub fn run(mut control: ControlHandle) {
    loop {
        println!("Choose action:");
        println!(" 1: set waveform");
        println!(" 2: set envelope");
        println!(" 0: quit");

        match read_int(0, 2) {
            1 => {
                println!(" 1: pulse\n 2: triangle\n 3: sawtooth\n 4: sine");
                let selector = read_int(1, 4);
                control.set_waveform(Waveform::from_selector(selector as i32));
            }
            2 => {
                println!("Set attack, decay, sustain and release values:");
                control.set_attack_ms(read_int(0, i64::from(ATTACK_MAX_MS)) as u32);
                control.set_decay_ms(read_int(0, i64::from(DECAY_MAX_MS)) as u32);
                control.set_sustain_percent(read_int(0, i64::from(SUSTAIN_MAX_PERCENT)) as u32);
                control.set_release_ms(read_int(0, i64::from(RELEASE_MAX_MS)) as u32);
            }
            _ => return,
        }
    }
}

/// Read an integer in `min..=max` from stdin, re-prompting until valid.
pub fn read_int(min: i64, max: i64) -> i64 {
    loop {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line).unwrap_or(0);
        if read == 0 {
            // EOF: treat as the minimum (quits the menu when stdin closes)
            return min;
        }
        match line.trim().parse::<i64>() {
            Ok(value) if (min..=max).contains(&value) => return value,
            _ => println!("Give a number between {min}-{max}!"),
        }
    }
}
