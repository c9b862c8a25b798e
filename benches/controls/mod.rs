//! Benchmarks for the single-control state machines.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pinch_deck::{HandObservation, Handedness, LinearControl, RotaryControl, Zone};

use crate::FRAME_COUNTS;

const DECK: Zone = Zone::new(0.02, 0.25, 0.35, 0.85);
const KNOB: Zone = Zone::new(0.38, 0.35, 0.48, 0.75);

/// Pinch path circling the deck center, one point per frame.
fn orbit(frames: usize) -> Vec<HandObservation> {
    let c = DECK.center();
    (0..frames)
        .map(|i| {
            let (sin, cos) = (i as f32 * 0.15).sin_cos();
            HandObservation::pinching(Handedness::Left, c.x + 0.1 * cos, c.y + 0.1 * sin)
        })
        .collect()
}

/// Pinch path sweeping up and down the knob.
fn sweep(frames: usize) -> Vec<HandObservation> {
    (0..frames)
        .map(|i| {
            let t = (i as f32 * 0.05).sin() * 0.5 + 0.5;
            HandObservation::pinching(Handedness::Left, 0.43, KNOB.top + t * KNOB.height())
        })
        .collect()
}

pub fn bench_rotary(c: &mut Criterion) {
    let mut group = c.benchmark_group("controls/rotary");

    for &frames in FRAME_COUNTS {
        let path = orbit(frames);

        // Grabbed the whole time
        let mut wheel = RotaryControl::new(DECK, 2.0);
        group.bench_with_input(BenchmarkId::new("grabbed", frames), &frames, |b, _| {
            b.iter(|| {
                for obs in &path {
                    black_box(wheel.update(black_box(Some(obs))));
                }
            })
        });

        // No hand at all
        let mut wheel = RotaryControl::new(DECK, 2.0);
        group.bench_with_input(BenchmarkId::new("idle", frames), &frames, |b, _| {
            b.iter(|| {
                for _ in 0..frames {
                    black_box(wheel.update(black_box(None)));
                }
            })
        });
    }

    group.finish();
}

pub fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("controls/linear");

    for &frames in FRAME_COUNTS {
        let path = sweep(frames);
        let mut knob = LinearControl::new(KNOB, 1.5, 0.7);
        group.bench_with_input(BenchmarkId::new("grabbed", frames), &frames, |b, _| {
            b.iter(|| {
                for obs in &path {
                    black_box(knob.update(black_box(Some(obs))));
                }
            })
        });
    }

    group.finish();
}
