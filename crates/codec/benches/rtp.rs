use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rtp_scanner_codec::{Classification, classify};

#[rustfmt::skip]
const SAMPLES: [&[u8]; 4] = [
    &[0x80u8, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x01, 0xff, 0x00, 0x00, 0x00],
    &[0x90u8, 0x72, 0x04, 0xf1, 0xf8, 0x87, 0x3f, 0xad, 0x67, 0xfe, 0x9d, 0xfc, 0xbe, 0xde, 0x00, 0x01],
    &[0x80u8, 0xc8, 0x00, 0x06, 0x79, 0x26, 0x69, 0x55, 0xe8, 0xe2, 0xe2, 0x17, 0xd4, 0x2f, 0x05, 0x91],
    &[0x40u8, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x01, 0xff, 0x00, 0x00, 0x00],
];

fn criterion_benchmark(c: &mut Criterion) {
    let mut samples = SAMPLES.into_iter().cycle();

    let mut rtp_criterion = c.benchmark_group("rtp");

    rtp_criterion.throughput(Throughput::Elements(1));
    rtp_criterion.bench_function("classify_and_decode", |bencher| {
        bencher.iter(|| {
            if let Some(bytes) = samples.next() {
                if let Classification::RtpCandidate(fixed) = classify(bytes) {
                    std::hint::black_box(fixed.decode());
                }
            }
        })
    });

    rtp_criterion.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
