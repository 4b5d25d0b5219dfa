use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Soundscape {
    Forest,
    Ocean,
    Mountain,
    Meadow,
}

impl Soundscape {
    pub const ALL: [Soundscape; 4] = [
        Soundscape::Forest,
        Soundscape::Ocean,
        Soundscape::Mountain,
        Soundscape::Meadow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Soundscape::Forest => "Forest Serenity",
            Soundscape::Ocean => "Ocean Waves",
            Soundscape::Mountain => "Mountain Vista",
            Soundscape::Meadow => "Meadow Tranquility",
        }
    }

    pub fn layers(&self) -> &'static [&'static str] {
        match self {
            Soundscape::Forest => &["Birds chirping", "Gentle breeze", "Rustling leaves"],
            Soundscape::Ocean => &["Ocean waves", "Seagulls", "Gentle wind"],
            Soundscape::Mountain => &["Alpine wind", "Distant birds", "Mountain stream"],
            Soundscape::Meadow => &["Buzzing bees", "Gentle breeze", "Grasshopper chirps"],
        }
    }

    /// Length of one listening break.
    pub fn session_secs(&self) -> f64 {
        match self {
            Soundscape::Forest => 300.0,
            Soundscape::Ocean => 420.0,
            Soundscape::Mountain => 600.0,
            Soundscape::Meadow => 360.0,
        }
    }

    fn texture(&self) -> Texture {
        match self {
            // Slow surf: deep rumble with a wave roughly every 8 seconds.
            Soundscape::Ocean => Texture {
                drift: 0.03,
                swell_hz: 0.125,
                swell_depth: 0.6,
                hiss: 0.05,
                gain: 0.45,
            },
            Soundscape::Mountain => Texture {
                drift: 0.015,
                swell_hz: 0.05,
                swell_depth: 0.4,
                hiss: 0.15,
                gain: 0.35,
            },
            Soundscape::Forest => Texture {
                drift: 0.01,
                swell_hz: 0.2,
                swell_depth: 0.2,
                hiss: 0.3,
                gain: 0.25,
            },
            Soundscape::Meadow => Texture {
                drift: 0.008,
                swell_hz: 0.3,
                swell_depth: 0.15,
                hiss: 0.4,
                gain: 0.2,
            },
        }
    }

    pub fn generator(&self) -> NatureNoise {
        NatureNoise::new(*self, StdRng::from_entropy())
    }

    pub fn seeded_generator(&self, seed: u64) -> NatureNoise {
        NatureNoise::new(*self, StdRng::seed_from_u64(seed))
    }
}

#[derive(Debug, Clone, Copy)]
struct Texture {
    /// Brownian step size; larger means a rougher low end.
    drift: f32,
    swell_hz: f32,
    swell_depth: f32,
    /// Share of bright, unfiltered noise mixed over the rumble.
    hiss: f32,
    gain: f32,
}

/// Endless mono sample stream for one soundscape.
pub struct NatureNoise {
    soundscape: Soundscape,
    texture: Texture,
    brown: f32,
    swell_phase: f32,
    rng: StdRng,
}

impl NatureNoise {
    fn new(soundscape: Soundscape, rng: StdRng) -> Self {
        Self {
            soundscape,
            texture: soundscape.texture(),
            brown: 0.0,
            swell_phase: 0.0,
            rng,
        }
    }

    pub fn soundscape(&self) -> Soundscape {
        self.soundscape
    }

    pub fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }
}

impl Iterator for NatureNoise {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let white: f32 = self.rng.gen_range(-1.0..1.0);

        self.brown = ((self.brown + white * self.texture.drift) * 0.9995).clamp(-1.0, 1.0);

        self.swell_phase += self.texture.swell_hz / SAMPLE_RATE as f32;
        if self.swell_phase >= 1.0 {
            self.swell_phase -= 1.0;
        }
        let swell = 1.0 - self.texture.swell_depth * 0.5 * (1.0 + (TAU * self.swell_phase).cos());

        let mix = self.brown * (1.0 - self.texture.hiss) + white * self.texture.hiss * 0.2;
        Some((mix * swell * self.texture.gain).clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_range() {
        for soundscape in Soundscape::ALL {
            let out_of_range = soundscape
                .seeded_generator(7)
                .take(SAMPLE_RATE as usize)
                .filter(|s| !(-1.0..=1.0).contains(s))
                .count();
            assert_eq!(out_of_range, 0, "{soundscape:?}");
        }
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let a: Vec<f32> = Soundscape::Ocean.seeded_generator(42).take(512).collect();
        let b: Vec<f32> = Soundscape::Ocean.seeded_generator(42).take(512).collect();
        let c: Vec<f32> = Soundscape::Ocean.seeded_generator(43).take(512).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_layers_listed() {
        assert_eq!(Soundscape::Ocean.layers()[0], "Ocean waves");
        assert_eq!(Soundscape::Meadow.label(), "Meadow Tranquility");
    }
}
