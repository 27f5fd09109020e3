//! Solve one bisection from a weight-matrix file.
//!
//! Usage: `cargo run --release --example bisect -- <graph> <size_of_X> [expected_weight]`
//! Set `RUST_LOG=debug` to watch the search.
use exact_bisect::prelude::*;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <path_to_graph> <size_of_set_X> [expected_weight]", args[0]);
        std::process::exit(1);
    }
    let target: usize = args[2].parse()?;
    let expected: Option<Weight> = args.get(3).map(|s| s.parse()).transpose()?;

    let start = Instant::now();
    let graph = MatrixReader.read_path(&args[1])?;
    let result = search(&graph, target, &SearchConfig::default())?;

    println!("{}", args[1]);
    match &result.config {
        Some(config) => {
            println!("Minimal weight: {}", result.weight);
            println!("{config}");
        }
        None => println!("No split with |X| = {target} exists"),
    }
    println!("time: {:.3}s", start.elapsed().as_secs_f64());

    if let Some(expected) = expected {
        assert_eq!(result.weight, expected, "unexpected minimal weight");
    }
    Ok(())
}
