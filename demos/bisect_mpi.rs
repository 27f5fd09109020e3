//! Distributed bisection over MPI.
//!
//! Usage:
//! `mpirun -n 4 cargo run --release --features mpi-support --example bisect_mpi -- <graph> <X>`
#[cfg(feature = "mpi-support")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use exact_bisect::prelude::*;

    env_logger::init();
    let universe = mpi::initialize().ok_or("MPI already initialised")?;
    let comm = MpiComm::new(universe.world());

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        if comm.rank() == 0 {
            eprintln!("Usage: {} <path_to_graph> <size_of_set_X>", args[0]);
        }
        std::process::exit(1);
    }
    let target: usize = args[2].parse()?;
    let graph = MatrixReader.read_path(&args[1])?;

    let start = std::time::Instant::now();
    let result = search_distributed(&comm, &graph, target, &SearchConfig::default())?;
    if comm.rank() == 0 {
        println!("Minimal weight: {}", result.weight);
        if let Some(config) = &result.config {
            println!("{config}");
        }
        println!("time: {:.3}s", start.elapsed().as_secs_f64());
    }
    Ok(())
}

#[cfg(not(feature = "mpi-support"))]
fn main() {
    eprintln!("rebuild with --features mpi-support");
}
