//! Axis Frame Benchmarks
//!
//! Measures scroll frame resolution and wheel PDU emission for frames of
//! various sizes and sources.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wl_rdp_input::input::axis::{resolve, AxisEvent, AxisFrame, AxisSource, Fixed};
use wl_rdp_input::input::{DesktopScaler, Result, ScrollAxis, WireSink};

/// Sink that drops everything
struct NullSink;

impl WireSink for NullSink {
    fn send_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()> {
        black_box((flags, x, y));
        Ok(())
    }

    fn send_extended_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()> {
        black_box((flags, x, y));
        Ok(())
    }

    fn send_keyboard(&mut self, pressed: bool, scancode: u16) -> Result<()> {
        black_box((pressed, scancode));
        Ok(())
    }

    fn send_focus_in(&mut self, lock_flags: u16) -> Result<()> {
        black_box(lock_flags);
        Ok(())
    }
}

/// A touchpad-style burst: continuous events on both axes, source last
fn finger_burst(len: usize) -> Vec<AxisEvent> {
    let mut events: Vec<AxisEvent> = (0..len)
        .map(|i| AxisEvent::Continuous {
            x: 400,
            y: 300,
            axis: if i % 2 == 0 {
                ScrollAxis::Vertical
            } else {
                ScrollAxis::Horizontal
            },
            value: Fixed::from_f64(12.5 + i as f64),
        })
        .collect();
    events.push(AxisEvent::Source(AxisSource::Finger));
    events
}

/// A wheel burst: discrete notches with their continuous twins
fn wheel_burst(len: usize) -> Vec<AxisEvent> {
    let mut events = vec![AxisEvent::Source(AxisSource::Wheel)];
    for _ in 0..len {
        events.push(AxisEvent::Discrete {
            x: 400,
            y: 300,
            axis: ScrollAxis::Vertical,
            steps: 3,
        });
        events.push(AxisEvent::Continuous {
            x: 400,
            y: 300,
            axis: ScrollAxis::Vertical,
            value: Fixed::from_f64(30.0),
        });
    }
    events
}

/// Benchmark frame resolution alone
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis_resolve");

    for len in [1, 8, 64] {
        let finger = finger_burst(len);
        let wheel = wheel_burst(len);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("finger", len), &finger, |b, events| {
            b.iter(|| black_box(resolve(black_box(events))))
        });
        group.bench_with_input(BenchmarkId::new("wheel", len), &wheel, |b, events| {
            b.iter(|| black_box(resolve(black_box(events))))
        });
    }

    group.finish();
}

/// Benchmark the full frame path: buffer, resolve, quantize, send
fn bench_finish(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis_frame_finish");
    let scaler = DesktopScaler::new((1280, 720), (1920, 1080));

    for len in [1, 8, 64] {
        let events = finger_burst(len);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("smart_sizing", len), &events, |b, events| {
            let mut sink = NullSink;
            let mut frame = AxisFrame::new();
            b.iter(|| {
                for event in events {
                    frame.push(*event);
                }
                black_box(frame.finish(&mut sink, &scaler))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_finish);
criterion_main!(benches);
