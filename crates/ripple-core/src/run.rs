use crate::config::{RunConfig, RunConfigError};
use crate::field::{checksum, FrameMetrics, RippleField, RunSummary};
use crate::host::{ManualClock, TimeSource};
use crate::texture::TextureSource;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    InvalidSampleEvery,
    TooManyFrames { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            RunError::TooManyFrames { max, actual } => {
                write!(f, "frames ({actual}) exceed supported maximum ({max})")
            }
            RunError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for RunError {}

/// Drives a ripple field at a fixed frame rate with a seeded RNG, without a host engine.
pub struct RippleRun<T, const BITS: u32 = 7> {
    field: RippleField<BITS>,
    texture: T,
    clock: ManualClock,
    rng: ChaCha12Rng,
    config: RunConfig,
    frame: usize,
}

impl<T: TextureSource, const BITS: u32> RippleRun<T, BITS> {
    pub const MAX_FRAMES: usize = 1_000_000;
    pub const MAX_SAMPLES: usize = 50_000;

    pub fn new(config: RunConfig, texture: T) -> Self {
        Self::try_new(config, texture).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(config: RunConfig, texture: T) -> Result<Self, RunConfigError> {
        config.validate()?;
        Ok(Self {
            field: RippleField::try_new(config.ripple.clone())?,
            texture,
            clock: ManualClock::new(config.start_time),
            rng: ChaCha12Rng::seed_from_u64(config.seed),
            config,
            frame: 0,
        })
    }

    pub fn field(&self) -> &RippleField<BITS> {
        &self.field
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Sample the current frame, then move the clock to the next one.
    pub fn step(&mut self) -> FrameMetrics {
        self.frame += 1;
        let now = self.clock.seconds();
        self.field.sample_texture(
            now,
            self.config.disturbance_interval,
            &self.texture,
            &mut self.rng,
        );
        self.clock.advance(self.config.frame_interval);
        self.field.collect_frame_metrics(self.frame)
    }

    pub fn run(&mut self, frames: usize, sample_every: usize) -> RunSummary {
        self.try_run(frames, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_run(&mut self, frames: usize, sample_every: usize) -> Result<RunSummary, RunError> {
        if sample_every == 0 {
            return Err(RunError::InvalidSampleEvery);
        }
        if frames > Self::MAX_FRAMES {
            return Err(RunError::TooManyFrames {
                max: Self::MAX_FRAMES,
                actual: frames,
            });
        }
        let estimated_samples = if frames == 0 {
            0
        } else {
            ((frames - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_SAMPLES {
            return Err(RunError::TooManySamples {
                max: Self::MAX_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        for frame in 1..=frames {
            let metrics = self.step();
            if frame % sample_every == 0 || frame == frames {
                samples.push(metrics);
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            frames,
            sample_every,
            grid_side: RippleField::<BITS>::SIDE,
            stats: self.field.stats().clone(),
            samples,
            final_checksum: checksum(self.field.cache_block().pixels()),
        })
    }
}
