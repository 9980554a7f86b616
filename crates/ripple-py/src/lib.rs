use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use ripple_core::run::RippleRun;
use ripple_core::{Image, RunConfig};

/// Minimal PyO3 module exposing ripple-core to Python.
#[pyfunction]
fn version() -> &'static str {
    "0.1.0"
}

/// Run a seeded headless simulation over a checkerboard texture and return
/// the run summary as JSON.
#[pyfunction]
#[pyo3(signature = (frames, seed=42, frame_interval=None, disturbance_interval=None, sample_every=1, texture_size=128))]
fn simulate_json(
    frames: usize,
    seed: u64,
    frame_interval: Option<f32>,
    disturbance_interval: Option<f32>,
    sample_every: usize,
    texture_size: u32,
) -> PyResult<String> {
    let defaults = RunConfig::default();
    let config = RunConfig {
        seed,
        frame_interval: frame_interval.unwrap_or(defaults.frame_interval),
        disturbance_interval: disturbance_interval.unwrap_or(defaults.disturbance_interval),
        ..defaults
    };
    let texture = Image::checkerboard(texture_size, (texture_size / 8).max(1), 0x0000, 0xffff)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let mut run = RippleRun::<_, 7>::try_new(config, texture)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let summary = run
        .try_run(frames, sample_every)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    summary
        .to_json_pretty()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_json, m)?)?;
    Ok(())
}
