use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

const SAMPLE_RATE: u32 = 44_100;
const CHIRP_SECS: f32 = 0.6;
const SEGMENT_SECS: f32 = 0.15;
const HIGH_FREQ: f32 = 1_320.0;
const LOW_FREQ: f32 = 880.0;

/// Two-tone alert chirp, a synthesized stand-in for the radar ping the app
/// historically shipped as an mp3. Finite, mono, with a linear fade-out.
pub struct AlertChirp {
    num_sample: usize,
    total_samples: usize,
}

impl AlertChirp {
    pub fn new() -> Self {
        Self {
            num_sample: 0,
            total_samples: (SAMPLE_RATE as f32 * CHIRP_SECS) as usize,
        }
    }
}

impl Default for AlertChirp {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for AlertChirp {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }

        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        self.num_sample += 1;

        // Alternate tones every segment so the chirp warbles.
        let freq = if (t / SEGMENT_SECS) as u32 % 2 == 0 {
            HIGH_FREQ
        } else {
            LOW_FREQ
        };

        let envelope = 1.0 - t / CHIRP_SECS;
        Some((2.0 * PI * freq * t).sin() * 0.2 * envelope)
    }
}

impl Source for AlertChirp {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(CHIRP_SECS))
    }
}
