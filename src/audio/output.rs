//! Cue tone output using cpal.

use std::sync::Arc;

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, SampleFormat, Stream, StreamConfig,
};
use parking_lot::Mutex;
use tracing::{debug, error, info};

use super::Mixer;
use crate::error::{Error, Result};

/// Running output stream on the default device, fed by a [`Mixer`]
pub struct ToneOutput {
    _stream: Stream,
    sample_rate: u32,
    channels: u16,
    device_name: String,
}

impl ToneOutput {
    /// Open the default output device and start streaming the mixer
    pub fn open(mixer: Mixer, volume: Arc<Mutex<f32>>) -> Result<Self> {
        let host = cpal::default_host();

        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("Using audio output device: {device_name}");

        Self::with_device(device, device_name, mixer, volume)
    }

    fn with_device(
        device: Device,
        device_name: String,
        mixer: Mixer,
        volume: Arc<Mutex<f32>>,
    ) -> Result<Self> {
        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::AudioOutput(format!("Failed to get output config: {e}")))?;

        debug!("Supported output config: {:?}", supported_config);

        let sample_format = supported_config.sample_format();
        let config: StreamConfig = supported_config.into();

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, mixer, volume)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, mixer, volume)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, mixer, volume)?,
            _ => {
                return Err(Error::UnsupportedFormat(format!("{sample_format:?}")));
            }
        };

        stream
            .play()
            .map_err(|e| Error::AudioOutput(format!("Failed to start stream: {e}")))?;

        debug!(
            "Tone output ready: {}Hz, {} channels",
            config.sample_rate.0, config.channels
        );

        Ok(Self {
            _stream: stream,
            sample_rate: config.sample_rate.0,
            channels: config.channels,
            device_name,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &Device,
        config: &StreamConfig,
        mixer: Mixer,
        volume: Arc<Mutex<f32>>,
    ) -> Result<Stream> {
        let channels = usize::from(config.channels);

        let err_fn = |err| {
            error!("Audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let gain = *volume.lock();
                    let mut mixed = vec![0.0f32; data.len()];
                    mixer.render(&mut mixed, channels, gain);

                    for (sample, value) in data.iter_mut().zip(mixed) {
                        *sample = T::from_sample(value);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| Error::AudioOutput(format!("Failed to build stream: {e}")))?;

        Ok(stream)
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub const fn channels(&self) -> u16 {
        self.channels
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}
