pub mod solutions;

use anyhow::{Context, Result};

pub use solutions::{Solution, YEARS};

pub fn load_input(name: &str) -> Result<String> {
    let path = format!("inputs/{}", name);
    std::fs::read_to_string(&path).with_context(|| format!("can't read input file {}", path))
}

pub fn default_input(year: u32, day: usize) -> Result<String> {
    load_input(&format!("{}/{}.txt", year, day))
}

/// Every decimal integer in `s` in order of appearance, honoring a directly
/// attached `-` sign. Digit runs must fit in an `i64`.
pub fn ints(s: &str) -> Vec<i64> {
    let bytes = s.as_bytes();
    let mut numbers = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let signed = bytes[i] == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        if signed || bytes[i].is_ascii_digit() {
            let start = i;
            i += 1;
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            numbers.push(s[start..i].parse().unwrap());
        } else {
            i += 1;
        }
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ints() {
        assert_eq!(ints("#1 @ 257,829: 10x23"), [1, 257, 829, 10, 23]);
        assert_eq!(ints("p=<6,-1224,0>, v=-3"), [6, -1224, 0, -3]);
        assert_eq!(ints("x-y"), []);
        assert_eq!(ints("a-7b"), [-7]);
    }
}
