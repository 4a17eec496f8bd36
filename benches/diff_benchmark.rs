//! Diffing engine benchmark: cost of turning a dashboard frame into ANSI.
//!
//! A typical tick changes a handful of clock and counter cells.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dst_dashboard::buffer::diff::{render_diff, render_full, DiffState};
use dst_dashboard::{Buffer, Cell, Rect, Rgb, Style};

/// Create a buffer with varied content and colors.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let c = char::from(b'A' + ((x + y + seed) % 26) as u8);
            let style = Style::new(
                Rgb::new((x * 3 % 256) as u8, (y * 7 % 256) as u8, (seed % 256) as u8),
                Rgb::new(20, 20, 30),
            );
            buffer.set(x, y, Cell::new(c).with_style(style));
        }
    }
    buffer
}

fn diff_identical_buffers(c: &mut Criterion) {
    let buffer = create_test_buffer(80, 24, 0);
    let buffer_clone = buffer.clone();

    c.bench_function("diff_80x24_identical", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(
                black_box(&buffer),
                black_box(&buffer_clone),
                &[],
                &mut output,
                &mut state,
            )
        });
    });
}

fn diff_counter_update(c: &mut Criterion) {
    let buffer_a = create_test_buffer(80, 24, 0);
    let mut buffer_b = buffer_a.clone();
    buffer_b.put_str(64, 7, "00000009", Style::DEFAULT, 80);
    buffer_b.put_str(70, 0, " 01:01:02 ", Style::DEFAULT, 80);
    let dirty = [Rect::new(64, 7, 8, 1), Rect::new(70, 0, 10, 1)];

    c.bench_function("diff_80x24_counter_update", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(
                black_box(&buffer_a),
                black_box(&buffer_b),
                &dirty,
                &mut output,
                &mut state,
            )
        });
    });
}

fn full_render(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);

    c.bench_function("render_full_200x50", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            let mut state = DiffState::new();
            render_full(black_box(&buffer), &mut output, &mut state);
        });
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50)] {
        let buffer_a = create_test_buffer(width, height, 0);
        let buffer_b = create_test_buffer(width, height, 1);

        group.bench_with_input(
            BenchmarkId::new("full_change", format!("{width}x{height}")),
            &(buffer_a, buffer_b),
            |b, (a, bb)| {
                b.iter(|| {
                    let mut output = Vec::with_capacity(65536);
                    let mut state = DiffState::new();
                    render_diff(black_box(a), black_box(bb), &[], &mut output, &mut state)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_counter_update,
    full_render,
    diff_various_sizes,
);
criterion_main!(benches);
