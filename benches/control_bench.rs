//! Benchmarks for the gesture controls and per-frame bank updates.
//!
//! Run with: cargo bench
//!
//! One update runs per tracker frame, so the budget is the frame period:
//!   - 30 fps = 33.3ms
//!   - 60 fps = 16.7ms
//!   - 120 fps = 8.3ms
//!
//! Benchmark groups:
//!   - controls/*   Single wheel/knob state machines
//!   - scenarios/*  Full bank updates and snapshot -> mixer mapping

use criterion::{criterion_group, criterion_main};

mod controls;
mod scenarios;

/// Frames simulated per iteration. Long enough to cover grab, drag, release.
pub const FRAME_COUNTS: &[usize] = &[1, 60, 600];

criterion_group!(
    benches,
    controls::bench_rotary,
    controls::bench_linear,
    scenarios::bench_bank,
    scenarios::bench_mapper,
);
criterion_main!(benches);
