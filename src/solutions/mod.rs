use anyhow::Result;

pub mod year2017;
pub mod year2018;

/// A day's solvers behind a uniform signature so the runner and the benchmarks
/// can treat all days alike.
pub type Solution = fn(&str) -> Result<(String, String)>;

macro_rules! solutions {
    ($($day:path),+ $(,)?) => {
        &[$(
            |input: &str| $day(input).map(|(part1, part2)| (part1.to_string(), part2.to_string()))
        ),+]
    };
}
pub(crate) use solutions;

pub static YEARS: &[(u32, &[Solution])] = &[
    (2017, year2017::SOLUTIONS),
    (2018, year2018::SOLUTIONS),
];
