pub mod animation;
pub mod metrics;

pub use metrics::*;

use crate::clock::SimulationClock;
use crate::config::{RippleConfig, RippleConfigError};
use crate::height_field::HeightField;
use crate::host::{RandomSource, TimeSource};
use crate::texture::{Pixel, TextureHandle, TextureLookup, TextureSource};

/// Borrowed view of the distorted pixel block produced by the last advancing sample.
///
/// Valid until the next call that mutates the field.
#[derive(Clone, Copy, Debug)]
pub struct CacheBlock<'a> {
    pixels: &'a [Pixel],
    side: usize,
}

impl<'a> CacheBlock<'a> {
    pub fn pixels(&self) -> &'a [Pixel] {
        self.pixels
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn row(&self, row: usize) -> &'a [Pixel] {
        &self.pixels[row * self.side..(row + 1) * self.side]
    }
}

/// Double-buffered toroidal water simulation with side `1 << BITS`.
///
/// Each advancing sample swaps the buffers, optionally drops one random
/// impulse into the current buffer, propagates from current into previous,
/// and resamples the source texture through the previous buffer.
pub struct RippleField<const BITS: u32 = 7> {
    pub(crate) clock: SimulationClock,
    pub(crate) buffers: [HeightField<BITS>; 2],
    pub(crate) current: usize,
    pub(crate) cache: Vec<Pixel>,
    pub(crate) config: RippleConfig,
    pub(crate) stats: RippleStats,
    pub(crate) last_outcome: SampleOutcome,
}

pub type RippleField128 = RippleField<7>;
pub type RippleField64 = RippleField<6>;

impl<const BITS: u32> RippleField<BITS> {
    pub const SIDE: usize = HeightField::<BITS>::SIDE;

    pub fn new(config: RippleConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(config: RippleConfig) -> Result<Self, RippleConfigError> {
        config.validate()?;
        Ok(Self {
            clock: SimulationClock::default(),
            buffers: [HeightField::new(), HeightField::new()],
            current: 0,
            cache: vec![0; HeightField::<BITS>::LEN],
            config,
            stats: RippleStats::default(),
            last_outcome: SampleOutcome::default(),
        })
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RippleConfig) -> Result<(), RippleConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn stats(&self) -> &RippleStats {
        &self.stats
    }

    pub fn last_outcome(&self) -> &SampleOutcome {
        &self.last_outcome
    }

    /// Buffer that receives impulses; holds the older state after propagation.
    pub fn current_field(&self) -> &HeightField<BITS> {
        &self.buffers[self.current]
    }

    /// Buffer written by propagation and used to distort the cache block.
    pub fn previous_field(&self) -> &HeightField<BITS> {
        &self.buffers[self.current ^ 1]
    }

    pub fn cache_block(&self) -> CacheBlock<'_> {
        CacheBlock {
            pixels: &self.cache,
            side: Self::SIDE,
        }
    }

    /// Drop all simulation state. The next sample reinitializes the clock.
    pub fn reset(&mut self) {
        self.clock = SimulationClock::default();
        for buf in &mut self.buffers {
            buf.clear();
        }
        self.current = 0;
        self.cache.fill(0);
        self.last_outcome = SampleOutcome::default();
    }

    pub(crate) fn swap_buffers(&mut self) {
        self.current ^= 1;
    }

    /// Sample through the host services: reads the time once, resolves the
    /// texture handle and draws disturbances from `rng`.
    ///
    /// An unresolved handle still advances the simulation but leaves the
    /// cache block as it was.
    pub fn sample<C, R, L>(
        &mut self,
        target_interval: f32,
        handle: TextureHandle,
        time: &C,
        rng: &mut R,
        textures: &L,
    ) -> CacheBlock<'_>
    where
        C: TimeSource + ?Sized,
        R: RandomSource + ?Sized,
        L: TextureLookup + ?Sized,
    {
        let now = time.seconds();
        match textures.resolve(handle) {
            Some(texture) => self.sample_texture(now, target_interval, texture, rng),
            None => {
                log::warn!("ripple sample for unknown texture {handle:?}");
                self.advance(now, target_interval, rng);
                self.cache_block()
            }
        }
    }

    /// Advance the simulation to `now` and, if it moved, rerender the cache
    /// block from `texture`. Returns the block and its side length.
    pub fn sample_texture<T, R>(
        &mut self,
        now: f32,
        target_interval: f32,
        texture: &T,
        rng: &mut R,
    ) -> CacheBlock<'_>
    where
        T: TextureSource + ?Sized,
        R: RandomSource + ?Sized,
    {
        if self.advance(now, target_interval, rng) {
            self.render(texture);
        }
        self.cache_block()
    }

    /// Clock, disturbance and propagation phases of a sample. Returns whether
    /// the simulation moved.
    pub(crate) fn advance<R>(&mut self, now: f32, target_interval: f32, rng: &mut R) -> bool
    where
        R: RandomSource + ?Sized,
    {
        let adv = self.clock.advance(now, &self.config);
        self.stats.samples += 1;
        if adv.reset {
            self.stats.resets += 1;
        }
        let mut outcome = SampleOutcome {
            delta: adv.delta,
            reset: adv.reset,
            ..SampleOutcome::default()
        };

        if adv.delta > 0.0 {
            self.swap_buffers();
            if self.clock.since_disturbance() > target_interval {
                self.clock.mark_disturbance();
                let disturbance = self.draw_disturbance(rng);
                self.spawn_ripple(disturbance);
                self.stats.disturbances += 1;
                outcome.disturbance = Some(disturbance);
            }
            self.animate();
            self.stats.advances += 1;
            outcome.advanced = true;
        } else {
            self.stats.suppressed += 1;
        }

        self.last_outcome = outcome;
        outcome.advanced
    }

    fn draw_disturbance<R>(&self, rng: &mut R) -> Disturbance
    where
        R: RandomSource + ?Sized,
    {
        let x = rng.random_long(0, self.config.max_coordinate);
        let y = rng.random_long(0, self.config.max_coordinate);
        let magnitude = rng.random_long(0, self.config.max_magnitude);
        Disturbance { x, y, magnitude }
    }
}

impl<const BITS: u32> Default for RippleField<BITS> {
    fn default() -> Self {
        Self::new(RippleConfig::default())
    }
}
