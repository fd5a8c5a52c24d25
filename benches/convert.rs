use camerakit::{
    convert::{extract_planar_bytes, image_to_bytes},
    image::{ColorFormat, PlanarImage, Rect},
};
use criterion::{criterion_group, criterion_main, Criterion};

pub fn benchmark_extract(c: &mut Criterion) {
    let fmts = [ColorFormat::Planar, ColorFormat::SemiPlanar];
    let dims = [(320, 240), (640, 480), (1280, 720), (1920, 1080), (3840, 2160)];

    for fmt in fmts.iter() {
        let mut group = c.benchmark_group(format!("extract/{:?}", fmt));
        for dim in dims.iter() {
            let frame = vec![0u8; dim.0 as usize * dim.1 as usize * 3 / 2];
            let img = PlanarImage::from_nv21(frame, dim.0, dim.1).unwrap();
            group.bench_with_input(format!("{}x{}", dim.0, dim.1), &img, |b, img| {
                b.iter(|| extract_planar_bytes(img, *fmt))
            });

            let cropped = img.clone().with_crop(Rect::new(0, 0, dim.0 as i32 / 2, dim.1 as i32 / 2));
            group.bench_with_input(format!("{}x{}-crop", dim.0, dim.1), &cropped, |b, img| {
                b.iter(|| extract_planar_bytes(img, *fmt))
            });
        }
        group.finish();
    }
}

pub fn benchmark_nv21(c: &mut Criterion) {
    let mut group = c.benchmark_group("nv21");
    for dim in [(640, 480), (1280, 720), (1920, 1080)].iter() {
        let frame = vec![0u8; dim.0 as usize * dim.1 as usize * 3 / 2];
        let img = PlanarImage::from_nv21(frame, dim.0, dim.1).unwrap();
        group.bench_with_input(format!("{}x{}", dim.0, dim.1), &img, |b, img| {
            b.iter(|| image_to_bytes(img))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_extract, benchmark_nv21);
criterion_main!(benches);
