use criterion::{criterion_group, criterion_main, Criterion};
use pixveil_core::{hide, unveil, LsbCodec, PixelGrid};

pub fn image_decoding(c: &mut Criterion) {
    let cover = PixelGrid::from_fn(512, 512, 4, |r, c, ch| (r ^ c ^ ch) as u8)
        .expect("Cover grid is not valid.");
    let concealed = hide(&vec![0x5A; 64 * 1024], &cover).expect("Cannot hide the secret");

    c.bench_function("Image Decoding", |b| {
        b.iter(|| {
            LsbCodec::extract(&concealed.stego, concealed.key_bundle.bit_length)
                .expect("Failed to extract the bits")
        })
    });

    c.bench_function("Image Unveiling", |b| {
        b.iter(|| unveil(&concealed.stego, &concealed.key_bundle).expect("Failed to unveil"))
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
