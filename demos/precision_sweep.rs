//! Precision sweep
//!
//! Multiplies and divides two reals as 16-bit-integer fixed-point values with a range of
//! fractional widths, and reports the error of each result against `f64`. This gives a quick
//! feel for how many fractional bits a computation needs.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example precision_sweep -- 3.14159 2.71828
//! cargo run --example precision_sweep -- --signed --wrap -1.75 300
//! ```

use clap::Parser;
use fixedpt::{
    FixedPoint,
    Overflow,
    consts::*,
};

#[derive(Parser)]
#[command(name = "precision_sweep")]
#[command(version)]
#[command(about = "Compare fixed-point multiplication and division against f64")]
struct Cli {
    /// Left operand
    #[arg(allow_negative_numbers = true)]
    lhs: f64,

    /// Right operand
    #[arg(allow_negative_numbers = true)]
    rhs: f64,

    /// Use signed (two's-complement) types
    #[arg(short, long)]
    signed: bool,

    /// Wrap on overflow instead of saturating
    #[arg(short, long)]
    wrap: bool,
}

fn print_header(cli: &Cli) {
    println!("{} * {} = {}", cli.lhs, cli.rhs, cli.lhs * cli.rhs);
    println!("{} / {} = {}", cli.lhs, cli.rhs, cli.lhs / cli.rhs);
    println!();
    println!("{:>5} {:>22} {:>12} {:>22} {:>12}", "frac", "product", "error", "quotient", "error");
}

fn print_row(cli: &Cli, frac_bits: u32, product: f64, quotient: Option<f64>) {
    let product_error = (cli.lhs * cli.rhs - product).abs();
    match quotient {
        Some(quotient) => {
            let quotient_error = (cli.lhs / cli.rhs - quotient).abs();
            println!("{:>5} {:>22} {:>12.3e} {:>22} {:>12.3e}",
                frac_bits, product, product_error, quotient, quotient_error);
        }
        None => println!("{:>5} {:>22} {:>12.3e} {:>22} {:>12}",
            frac_bits, product, product_error, "divide by zero", "-"),
    }
}

macro_rules! sweep {
    ($cli: ident, $overflow: ident, $signed: literal; $($frac: ident),+) => {
        $(
            let lhs = FixedPoint::<U16, $frac, $signed>::from_f64($cli.lhs);
            let rhs = FixedPoint::<U16, $frac, $signed>::from_f64($cli.rhs);
            let product = lhs.mul_with(rhs, $overflow);
            let quotient = if rhs == FixedPoint::default() { None } else { Some(lhs / rhs) };
            print_row(&$cli, lhs.frac_bits(), product.to_f64(), quotient.map(|q| q.to_f64()));
        )+
    };
}

fn main() {
    let cli = Cli::parse();
    let overflow = if cli.wrap { Overflow::Wrap } else { Overflow::Saturate };

    print_header(&cli);
    if cli.signed {
        sweep!(cli, overflow, true; U0, U2, U4, U6, U8, U10, U12, U16, U20, U24, U32, U40, U48);
    }
    else {
        sweep!(cli, overflow, false; U0, U2, U4, U6, U8, U10, U12, U16, U20, U24, U32, U40, U48);
    }
}
