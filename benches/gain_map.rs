use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use xform_gain_rs::image_pipeline::{
    GainConfig, GainDerivation, ImageType, RasterImage, compute_stats, derive_gain_map,
};

fn generate_vignetted_image(width: usize, height: usize) -> RasterImage {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = (cx * cx + cy * cy).sqrt();
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt() / radius;
            data.push((220.0 - 140.0 * d * d) as u8);
        }
    }
    RasterImage::from_data(width, height, ImageType::Grayscale, 255, data).unwrap()
}

fn benchmark_derivation_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_by_size");
    
    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];
    
    for (width, height, label) in sizes {
        let image = generate_vignetted_image(width, height);
        
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &image,
            |b, image| {
                let config = GainConfig::default();
                b.iter(|| {
                    let _ = derive_gain_map(black_box(image), &config);
                });
            },
        );
    }
    
    group.finish();
}

fn benchmark_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    let image = generate_vignetted_image(500, 500);
    let stats = compute_stats(&image);
    let derivation = GainDerivation::plan(&stats, &GainConfig::default()).unwrap();
    let gain = derivation.fill(&image).unwrap();
    
    group.bench_function("grayscale_500x500", |b| {
        b.iter(|| {
            let _ = gain.apply(derivation.apply_offset(), derivation.reported_scale, black_box(&image));
        });
    });
    
    group.finish();
}

criterion_group!(
    benches,
    benchmark_derivation_sizes,
    benchmark_apply
);
criterion_main!(benches);
