//! Benchmark driving a jump-heavy countdown loop through the interpreter.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flatframe_common::utils::strings::decode_hex;
use flatframe_vm::core::{harness::FrameBuilder, layout::FrameState};

fn test_countdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatframe_vm");

    // PUSH1 255; JUMPDEST; PUSH1 1; SWAP1; SUB; DUP1; PUSH1 2; JUMPI; STOP
    let code = decode_hex("60ff5b600190038060025700").expect("invalid bytecode");

    group.sample_size(500);
    group.bench_function(BenchmarkId::from_parameter("countdown"), |b| {
        b.iter(|| {
            let mut host = FrameBuilder::new()
                .code(&code)
                .gas(1_000_000)
                .build()
                .expect("failed to build frame");

            host.execute();

            assert_eq!(host.frame().state, FrameState::CompletedSuccess as u32);
            assert_eq!(host.frame().stack_size, 1);
        });
    });

    group.finish();
}

criterion_group!(benches, test_countdown);
criterion_main!(benches);
