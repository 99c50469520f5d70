use eof_bytecode::Eips;
use eof_fillers::FixtureEnumerator;

fn main() {
    divan::main();
}

#[divan::bench]
fn generate_v1(bencher: divan::Bencher) {
    let enumerator = FixtureEnumerator::new(Eips::V1);
    bencher.bench_local(|| {
        let set = enumerator.generate().expect("expected a consistent fixture set");
        divan::black_box_drop(set);
    });
}

#[divan::bench]
fn generate_structure_only(bencher: divan::Bencher) {
    let enumerator = FixtureEnumerator::new(Eips::EOF);
    bencher.bench_local(|| {
        let set = enumerator.generate().expect("expected a consistent fixture set");
        divan::black_box_drop(set);
    });
}

#[divan::bench]
fn assemble_all(bencher: divan::Bencher) {
    let set = FixtureEnumerator::new(Eips::V1)
        .generate()
        .expect("expected a consistent fixture set");
    bencher.bench_local(|| {
        let total: usize = set.iter().map(|(_, bytes, _)| bytes.len()).sum();
        divan::black_box(total)
    });
}
