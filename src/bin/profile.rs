use std::time::{Duration, Instant};

use mazegen::{
    generators::{Algorithm, get_rng},
    logging,
    maze::{Grid, RectGrid},
};

const SIDE: u16 = 512;

/// Usage: `profile [iterations] [algorithm]`. Times every algorithm when none is given.
fn main() -> std::io::Result<()> {
    let _guard = logging::init("mazegen-profile.log");

    let mut args = std::env::args().skip(1);
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);
    let algorithms = match args.next() {
        Some(name) => match name.parse::<Algorithm>() {
            Ok(algorithm) => vec![algorithm],
            Err(e) => {
                eprintln!("{}", e);
                return Ok(());
            }
        },
        None => Algorithm::ALL.to_vec(),
    };

    for algorithm in algorithms {
        // The recursive variant is capped, profile it on the largest square it accepts
        let side = match algorithm.cell_limit() {
            Some(limit) => SIDE.min(limit.isqrt() as u16),
            None => SIDE,
        };

        let mut total = Duration::ZERO;
        for seed in 0..num_iters as u64 {
            let mut grid = RectGrid::new(side, side);
            let mut rng = get_rng(Some(seed));
            let start = (side / 2, side / 2);

            let began = Instant::now();
            if let Err(e) = algorithm.generate(&mut grid, start, &mut rng) {
                eprintln!("{}: {}", algorithm, e);
                break;
            }
            total += began.elapsed();
            debug_assert_eq!(grid.edge_count(), grid.cell_count() - 1);
        }

        let average = total / num_iters.max(1) as u32;
        tracing::info!(
            "[profile] {} on {}x{}: {:?} average over {} runs",
            algorithm,
            side,
            side,
            average,
            num_iters
        );
        println!("{:<40} {:>4}x{:<4} {:>12.3?}", algorithm.to_string(), side, side, average);
    }
    Ok(())
}
