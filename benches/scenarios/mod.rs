//! Benchmarks for full frames: both hands through the bank, then the mixer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pinch_deck::{
    mixer::{DeckMapper, MixerMessage},
    AssignmentPolicy, ControlBank, ControlConfig, HandObservation, Handedness,
};

use crate::FRAME_COUNTS;

/// Per-frame hand lists: left hand orbiting its wheel, right hand sweeping
/// its knob, with a duplicated left label every tenth frame.
fn session(frames: usize) -> Vec<Vec<HandObservation>> {
    let bank = ControlBank::default();
    let wheel = bank.deck(Handedness::Left).center();
    let knob = *bank.knob(Handedness::Right).zone();

    (0..frames)
        .map(|i| {
            let (sin, cos) = (i as f32 * 0.15).sin_cos();
            let t = (i as f32 * 0.05).sin() * 0.5 + 0.5;
            let mut hands = vec![
                HandObservation::pinching(Handedness::Left, wheel.x + 0.1 * cos, wheel.y + 0.1 * sin),
                HandObservation::pinching(Handedness::Right, 0.57, knob.top + t * knob.height()),
            ];
            if i % 10 == 0 {
                hands.push(HandObservation::open(Handedness::Left, 0.5, 0.1));
            }
            hands
        })
        .collect()
}

pub fn bench_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/bank");

    let policies = [
        ("last_wins", AssignmentPolicy::LastWins),
        ("drop_ambiguous", AssignmentPolicy::DropAmbiguous),
        ("nearest_zone", AssignmentPolicy::NearestZone),
    ];

    for &frames in FRAME_COUNTS {
        let frames_data = session(frames);

        for (label, policy) in policies {
            let config = ControlConfig {
                assignment: policy,
                ..ControlConfig::default()
            };
            let mut bank = ControlBank::new(&config).expect("default layout is valid");
            group.bench_with_input(BenchmarkId::new(label, frames), &frames, |b, _| {
                b.iter(|| {
                    for hands in &frames_data {
                        black_box(bank.update(black_box(hands)));
                    }
                })
            });
        }
    }

    group.finish();
}

pub fn bench_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mapper");

    for &frames in FRAME_COUNTS {
        let frames_data = session(frames);
        let mut bank = ControlBank::default();
        let mut mapper = DeckMapper::default();
        let mut sent: Vec<MixerMessage> = Vec::with_capacity(frames * 4);

        group.bench_with_input(BenchmarkId::new("bank_and_mapper", frames), &frames, |b, _| {
            b.iter(|| {
                sent.clear();
                for hands in &frames_data {
                    let snapshot = bank.update(hands);
                    mapper.apply(black_box(&snapshot), &mut sent);
                }
                black_box(sent.len())
            })
        });
    }

    group.finish();
}
