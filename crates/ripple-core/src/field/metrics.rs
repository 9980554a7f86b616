use super::RippleField;
use crate::texture::Pixel;
use serde::{Deserialize, Serialize};

/// One impulse dropped into the field. `x` is the column, `y` the row; both
/// wrap onto the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disturbance {
    pub x: i32,
    pub y: i32,
    pub magnitude: i32,
}

/// What the most recent sample did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleOutcome {
    pub delta: f32,
    pub advanced: bool,
    pub reset: bool,
    pub disturbance: Option<Disturbance>,
}

/// Running counters since construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RippleStats {
    pub samples: usize,
    pub advances: usize,
    pub suppressed: usize,
    pub resets: usize,
    pub disturbances: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrameMetrics {
    pub frame: usize,
    pub time: f32,
    pub delta: f32,
    pub advanced: bool,
    pub reset: bool,
    pub disturbance: Option<Disturbance>,
    /// Sum of squared displacements of the rendered buffer.
    pub energy: u64,
    pub peak: u16,
    pub checksum: u64,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub frames: usize,
    pub sample_every: usize,
    pub grid_side: usize,
    pub stats: RippleStats,
    pub samples: Vec<FrameMetrics>,
    #[serde(default)]
    pub final_checksum: u64,
}

impl RunSummary {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// FNV-1a over the pixel values, for cheap frame comparisons.
pub fn checksum(pixels: &[Pixel]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    pixels.iter().fold(OFFSET, |hash, &px| {
        px.to_le_bytes()
            .iter()
            .fold(hash, |h, &b| (h ^ b as u64).wrapping_mul(PRIME))
    })
}

impl<const BITS: u32> RippleField<BITS> {
    pub(crate) fn collect_frame_metrics(&self, frame: usize) -> FrameMetrics {
        let outcome = self.last_outcome;
        let rendered = self.previous_field();
        FrameMetrics {
            frame,
            time: self.clock.time(),
            delta: outcome.delta,
            advanced: outcome.advanced,
            reset: outcome.reset,
            disturbance: outcome.disturbance,
            energy: rendered.energy(),
            peak: rendered.peak(),
            checksum: checksum(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_distinguishes_order() {
        assert_ne!(checksum(&[1, 2]), checksum(&[2, 1]));
        assert_eq!(checksum(&[]), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn summary_round_trips_through_json() {
        let summary = RunSummary {
            schema_version: 1,
            frames: 2,
            sample_every: 1,
            grid_side: 128,
            stats: RippleStats::default(),
            samples: vec![FrameMetrics {
                frame: 1,
                disturbance: Some(Disturbance {
                    x: 3,
                    y: 4,
                    magnitude: 500,
                }),
                ..FrameMetrics::default()
            }],
            final_checksum: 7,
        };
        let json = summary.to_json_pretty().expect("serializable");
        let back: RunSummary = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back.samples[0].disturbance, summary.samples[0].disturbance);
        assert_eq!(back.grid_side, 128);
    }

    #[test]
    fn missing_schema_version_defaults_to_one() {
        let json = r#"{"frames":0,"sample_every":1,"grid_side":64,"stats":{"samples":0,"advances":0,"suppressed":0,"resets":0,"disturbances":0},"samples":[]}"#;
        let summary: RunSummary = serde_json::from_str(json).expect("deserializable");
        assert_eq!(summary.schema_version, 1);
        assert_eq!(summary.final_checksum, 0);
    }
}
