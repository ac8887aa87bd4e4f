//! Benchmarks for the render loop and its per-sample primitives.
//!
//! Run with: cargo bench
//!
//! Reference deadlines at 44.1 kHz:
//!   - 64 frames  = 1.45ms
//!   - 128 frames = 2.90ms
//!   - 256 frames = 5.80ms
//!   - 512 frames = 11.61ms
//! A render must finish well inside its deadline to be usable live.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use monovox::dsp::envelope::Envelope;
use monovox::dsp::oscillator::{Oscillator, Waveform};
use monovox::dsp::pitch::PitchModulator;
use monovox::io::midi::MidiEvent;
use monovox::{EngineConfig, SynthEngine};

/// Common buffer sizes used in audio applications.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

const WAVEFORMS: [Waveform; 4] = [
    Waveform::Pulse,
    Waveform::Triangle,
    Waveform::Sawtooth,
    Waveform::Sine,
];

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/render");

    for &size in BLOCK_SIZES {
        for waveform in WAVEFORMS {
            let (mut engine, mut midi, mut control) = SynthEngine::new(EngineConfig::default());
            control.set_waveform(waveform);
            midi.try_send(MidiEvent::new(0x90, 69, 100, 0));

            let mut buffer = vec![0.0f32; size * 2];
            // apply the note-on and settle past the attack
            for _ in 0..64 {
                engine.render(&mut buffer);
            }

            let id = BenchmarkId::new(format!("{waveform:?}").to_lowercase(), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| engine.render(black_box(&mut buffer)));
            });
        }
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut env = Envelope::new(44_100.0);
        env.set_attack_ms(3_000); // stay in the attack ramp throughout
        env.trigger(100);

        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..size {
                    black_box(env.advance());
                }
            })
        });
    }

    group.finish();
}

fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        for waveform in WAVEFORMS {
            let mut osc = Oscillator::new();
            let id = BenchmarkId::new(format!("{waveform:?}").to_lowercase(), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| {
                    for _ in 0..size {
                        black_box(osc.sample(waveform, 50.0));
                        osc.advance(440.0, 44_100.0);
                    }
                })
            });
        }
    }

    group.finish();
}

fn bench_vibrato(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/vibrato");

    for &size in BLOCK_SIZES {
        let mut pitch = PitchModulator::new();
        let mut bent = 440.0;
        group.bench_with_input(BenchmarkId::new("apply", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..size {
                    bent = pitch.apply_vibrato(black_box(bent), 440.0, 44_100.0);
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_envelope,
    bench_oscillator,
    bench_vibrato,
);
criterion_main!(benches);
