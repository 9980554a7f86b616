use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use ripple_core::{Image, RippleConfig, RippleField};
use std::time::{Duration, Instant};

fn bench<const BITS: u32>(texture: &Image, frames: usize) -> Duration {
    let mut field = RippleField::<BITS>::new(RippleConfig::default());
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let start = Instant::now();
    for frame in 0..frames {
        let now = frame as f32 * 0.1;
        field.sample_texture(now, 0.2, texture, &mut rng);
    }
    start.elapsed()
}

fn main() {
    let texture_size = 256;
    let frames = 10_000;
    println!(
        "Benchmarking {} frames against a {}x{} texture",
        frames, texture_size, texture_size
    );

    let texture = Image::checkerboard(texture_size, 16, 0x0000, 0xffff)
        .expect("power-of-two texture size");

    let duration_large = bench::<7>(&texture, frames);
    println!("Time for {} frames on 128x128: {:?}", frames, duration_large);
    println!(
        "Avg time per frame (128x128): {:?}",
        duration_large / frames as u32
    );

    let duration_small = bench::<6>(&texture, frames);
    println!("Time for {} frames on 64x64: {:?}", frames, duration_small);
    println!(
        "Avg time per frame (64x64): {:?}",
        duration_small / frames as u32
    );

    let diff = duration_large.saturating_sub(duration_small);
    println!("Extra cost of the large grid: {:?}", diff);
}
