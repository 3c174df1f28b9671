use criterion::{criterion_group, criterion_main, Criterion};
use pixveil_core::{bytes_to_bits, hide, LsbCodec, PixelGrid};

pub fn image_encoding(c: &mut Criterion) {
    let cover = PixelGrid::from_fn(512, 512, 4, |r, c, ch| (r ^ c ^ ch) as u8)
        .expect("Cover grid is not valid.");
    let secret = vec![0x5A; 64 * 1024];

    c.bench_function("Image Encoding", |b| {
        let bits = bytes_to_bits(&secret);

        b.iter(|| LsbCodec::embed(&cover, &bits).expect("Cannot embed the secret"))
    });

    c.bench_function("Image Hiding", |b| {
        b.iter(|| hide(&secret, &cover).expect("Cannot hide the secret"))
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
