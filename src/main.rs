use std::io::Write;

use crossterm::terminal;
use unicode_truncate::UnicodeTruncateStr;

use mazegen::{
    generators::{Algorithm, generate_maze},
    logging,
    maze::{GridCell, RectGrid},
};

/// Largest accepted side length, in cells.
const MAX_SIDE: u16 = 1024;

fn main() -> std::io::Result<()> {
    let _guard = logging::init("mazegen.log");

    let mut args = std::env::args().skip(1);
    let dims = match (args.next(), args.next()) {
        (Some(width), Some(height)) => format!("{} {}", width, height),
        _ => {
            println!(
                "Enter maze dimensions (width height). Maximum size is {}x{}:",
                MAX_SIDE, MAX_SIDE
            );
            read_line()?
        }
    };
    let Some((width, height)) = parse_dimensions(&dims) else {
        eprintln!(
            "Please enter two numbers between 1 and {} for width and height.",
            MAX_SIDE
        );
        return Ok(());
    };

    let algorithm = match args.next() {
        Some(name) => match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                eprintln!("{}", e);
                return Ok(());
            }
        },
        None => {
            println!("Select maze generation algorithm:");
            for (i, algorithm) in Algorithm::ALL.iter().enumerate() {
                println!("{:>2}. {} ({})", i + 1, algorithm, algorithm.key());
            }
            let selection = read_line()?;
            let picked = selection
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| Algorithm::ALL.get(i).copied())
                .or_else(|| selection.parse::<Algorithm>().ok());
            match picked {
                Some(algorithm) => algorithm,
                None => {
                    eprintln!("Invalid selection.");
                    return Ok(());
                }
            }
        }
    };

    let seed = match args.next() {
        Some(s) => match s.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                eprintln!("Seed must be a non-negative integer.");
                return Ok(());
            }
        },
        None => None,
    };

    let mut grid = RectGrid::new(width, height);
    tracing::info!(
        "[main] {} on {}x{} grid, seed {:?}",
        algorithm,
        width,
        height,
        seed
    );
    let start = match generate_maze(&mut grid, algorithm, seed) {
        Ok(start) => start,
        Err(e) => {
            tracing::error!("[main] generation failed: {}", e);
            eprintln!("{}", e);
            return Ok(());
        }
    };

    // Fallback width when stdout is not a terminal: the whole maze
    let term_width = terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or((width as usize * 2 + 1) * GridCell::CELL_WIDTH as usize);
    let header = format!(
        "{} | {}x{} | seed {} | start {:?}",
        algorithm,
        width,
        height,
        seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
        start
    );
    let (header, _) = header.unicode_truncate(term_width);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", header)?;
    grid.render(&mut stdout, Some(start))
}

fn read_line() -> std::io::Result<String> {
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input)
}

fn parse_dimensions(input: &str) -> Option<(u16, u16)> {
    let dims = input
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<u16>().ok())
        .filter(|side| (1..=MAX_SIDE).contains(side))
        .collect::<Vec<_>>();
    match dims[..] {
        [width, height] => Some((width, height)),
        _ => None,
    }
}
