use criterion::{criterion_group, criterion_main, Criterion, black_box};
use fixedpt::{
    IFixed,
    Overflow,
    UFixed,
    consts::*,
};

type Q5_3 = UFixed<U5, U3>;
type Q17_16 = IFixed<U17, U16>;
type Q32_32 = IFixed<U32, U32>;

fn f64_mul(operands: (f64, f64)) -> f64 {
    operands.0 * operands.1
}

fn q5_3_mul(operands: (Q5_3, Q5_3)) -> Q5_3 {
    operands.0 * operands.1
}

fn q17_16_mul(operands: (Q17_16, Q17_16)) -> Q17_16 {
    operands.0 * operands.1
}

fn q32_32_mul(operands: (Q32_32, Q32_32)) -> Q32_32 {
    operands.0 * operands.1
}

fn mixed_mul(operands: (UFixed<U2, U4>, Q5_3)) -> UFixed<U5, U4> {
    operands.0 * operands.1
}

fn q17_16_add(operands: (Q17_16, Q17_16)) -> Q17_16 {
    operands.0 + operands.1
}

fn q17_16_add_wrap(operands: (Q17_16, Q17_16)) -> Q17_16 {
    operands.0.add_with(operands.1, Overflow::Wrap)
}

fn q17_16_div(operands: (Q17_16, Q17_16)) -> Q17_16 {
    operands.0 / operands.1
}

fn q17_16_from_f64(value: f64) -> Q17_16 {
    Q17_16::from_f64(value)
}

fn q17_16_to_f64(value: Q17_16) -> f64 {
    value.to_f64()
}

fn q32_32_to_f64(value: Q32_32) -> f64 {
    value.to_f64()
}

macro_rules! test_and_bench {
    ($group: ident, $name: ident, $start: expr, $end: expr) => {
        let start = $start;
        let end = $end;
        assert_eq!($name(start), end, concat!("Verification failed for ", stringify!($name),
            ":\nleft =  {:?},\nright = {:?}"), $name(start), end);
        $group.bench_function(stringify!($name), |b| b.iter(|| $name(black_box(start))));
    };
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Arithmetic");
    test_and_bench!(group, f64_mul, (-3.5, 1.25), -4.375);
    test_and_bench!(group, q5_3_mul, (Q5_3::from_f64(8.25), Q5_3::from_f64(2.5)),
        Q5_3::from_f64(20.625));
    test_and_bench!(group, q17_16_mul, (Q17_16::from_f64(-3.5), Q17_16::from_f64(1.25)),
        Q17_16::from_f64(-4.375));
    test_and_bench!(group, q32_32_mul, (Q32_32::from_f64(1000.5), Q32_32::from_f64(-0.25)),
        Q32_32::from_f64(-250.125));
    test_and_bench!(group, mixed_mul,
        (UFixed::<U2, U4>::from_f64(2.25), Q5_3::from_f64(1.5)),
        UFixed::<U5, U4>::from_f64(3.375));
    test_and_bench!(group, q17_16_add, (Q17_16::from_f64(30000.5), Q17_16::from_f64(40000.25)),
        Q17_16::max_value());
    test_and_bench!(group, q17_16_add_wrap,
        (Q17_16::from_f64(30000.5), Q17_16::from_f64(40000.25)),
        Q17_16::from_f64(-61071.25));
    test_and_bench!(group, q17_16_div, (Q17_16::from_f64(10.0), Q17_16::from_f64(4.0)),
        Q17_16::from_f64(2.5));
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Conversion");
    test_and_bench!(group, q17_16_from_f64, 3.125, Q17_16::from_raw(0x3_2000));
    test_and_bench!(group, q17_16_to_f64, Q17_16::from_raw(0x3_2000), 3.125);
    test_and_bench!(group, q32_32_to_f64, Q32_32::from_raw(-0x1_8000_0000), -1.5);
    group.finish();
}

criterion_group!(benches, bench_arithmetic, bench_conversion);
criterion_main!(benches);
