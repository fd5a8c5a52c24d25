use camerakit::jpeg::{encode_i420, encode_nv21, CAPTURE_QUALITY};
use criterion::{criterion_group, criterion_main, Criterion};

pub fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("jpeg");
    for dim in [
        (320, 240),
        (640, 480),
        (960, 540),
        (1280, 720),
        (1920, 1080),
        (3840, 2160),
    ]
    .iter()
    {
        let frame = vec![128u8; dim.0 as usize * dim.1 as usize * 3 / 2];
        group.bench_with_input(format!("i420/{}x{}", dim.0, dim.1), &frame, |b, frame| {
            b.iter(|| encode_i420(frame, dim.0, dim.1, CAPTURE_QUALITY).unwrap())
        });
        group.bench_with_input(format!("nv21/{}x{}", dim.0, dim.1), &frame, |b, frame| {
            b.iter(|| encode_nv21(frame, dim.0, dim.1, CAPTURE_QUALITY).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_encode);
criterion_main!(benches);
