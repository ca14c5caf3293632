use std::time::{Duration, Instant};

use anyhow::Result;
use aoc1718::{default_input, Solution, YEARS};

fn main() -> Result<()> {
    let mut total = Duration::default();
    for &(year, days) in YEARS {
        println!("===== Year {} =====", year);
        for (i, &day) in days.iter().enumerate() {
            total += execute_day(year, i + 1, day)?;
        }
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day(year: u32, n: usize, f: Solution) -> Result<Duration> {
    println!("Day {}:", n);
    let input = default_input(year, n)?;

    let start = Instant::now();
    let (part1, part2) = f(&input)?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
