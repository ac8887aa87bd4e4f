//! Output stream setup: the engine runs inside the cpal callback.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, Stream, StreamConfig};

use monovox::SynthEngine;

pub struct OutputDevice {
    device: cpal::Device,
    sample_rate: u32,
}

impl OutputDevice {
    /// Open the default output device and remember its native sample rate.
    pub fn open() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let default_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        let sample_rate = default_config.sample_rate().0;

        log::info!(
            "audio output: {} at {} Hz",
            device.name().unwrap_or_else(|_| "<unknown>".into()),
            sample_rate
        );

        Ok(Self {
            device,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Build and start a stereo f32 stream that renders the engine.
    pub fn start(self, mut engine: SynthEngine) -> EyreResult<Stream> {
        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(self.sample_rate),
            // small fixed buffers keep MIDI-to-audio latency low
            buffer_size: BufferSize::Fixed(engine.config().frames_per_buffer),
        };

        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| engine.render(data),
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        Ok(stream)
    }
}
