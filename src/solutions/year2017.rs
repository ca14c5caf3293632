use std::{cmp::Reverse, collections::VecDeque};

use anyhow::{bail, ensure, Context, Result};
use indexmap::IndexSet;
use memchr::memchr;
use nalgebra::Vector3;
use num::{integer::Roots, Complex};
use petgraph::unionfind::UnionFind;
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use spliter::{ParallelSpliterator, Spliterator};

use super::{solutions, Solution};
use crate::ints;

pub static SOLUTIONS: &[Solution] = solutions![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14,
    day15, day16, day17, day18, day19, day20, day21, day22, day23, day24, day25,
];

pub fn day1(input: &str) -> Result<(u32, u32)> {
    let digits: Vec<u32> = input
        .trim()
        .bytes()
        .map(|b| {
            ensure!(b.is_ascii_digit(), "not a digit: {}", b as char);
            Ok(u32::from(b - b'0'))
        })
        .collect::<Result<_>>()?;

    let matching_sum = |step: usize| {
        digits
            .iter()
            .enumerate()
            .filter(|&(i, digit)| *digit == digits[(i + step) % digits.len()])
            .map(|(_, digit)| digit)
            .sum()
    };
    Ok((matching_sum(1), matching_sum(digits.len() / 2)))
}

pub fn day2(input: &str) -> Result<(u32, u32)> {
    let rows = input
        .lines()
        .map(|line| {
            line.split_whitespace()
                .map(|n| Ok(n.parse()?))
                .collect::<Result<Vec<u32>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let checksum = rows
        .iter()
        .map(|row| {
            let min = row.iter().min().context("empty row")?;
            let max = row.iter().max().context("empty row")?;
            Ok(max - min)
        })
        .sum::<Result<u32>>()?;
    let division_sum = rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .find_map(|(i, &a)| {
                    row[i + 1..].iter().find_map(|&b| {
                        let (large, small) = (a.max(b), a.min(b));
                        (small != 0 && large % small == 0).then(|| large / small)
                    })
                })
                .context("no evenly divisible pair")
        })
        .sum::<Result<u32>>()?;
    Ok((checksum, division_sum))
}

pub fn day3(input: &str) -> Result<(i64, i64)> {
    let n: i64 = input.trim().parse()?;

    let part1 = if n == 1 {
        0
    } else {
        // ring k ends at the odd square (2k+1)^2 in its bottom-right corner
        let ring = ((n - 1).sqrt() + 1) / 2;
        let side_offset = (n - (2 * ring - 1).pow(2) - 1) % (2 * ring);
        ring + (side_offset - (ring - 1)).abs()
    };

    let mut values = FxHashMap::default();
    values.insert((0, 0), 1);
    let (mut x, mut y) = (0i64, 0i64);
    let mut part2 = 1;
    'outer: for leg in 0.. {
        let (dx, dy) = [(1, 0), (0, 1), (-1, 0), (0, -1)][leg % 4];
        for _ in 0..leg / 2 + 1 {
            x += dx;
            y += dy;
            let value = (-1..=1)
                .flat_map(|ox| (-1..=1).map(move |oy| (x + ox, y + oy)))
                .filter_map(|neighbor| values.get(&neighbor))
                .sum();
            values.insert((x, y), value);
            if value >= n {
                part2 = value;
                break 'outer;
            }
        }
    }
    Ok((part1, part2))
}

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let valid = |anagrams: bool| {
        input
            .lines()
            .filter(|line| {
                let mut seen = FxHashSet::default();
                line.split_whitespace().all(|word| {
                    let mut word = word.as_bytes().to_vec();
                    if anagrams {
                        word.sort_unstable();
                    }
                    seen.insert(word)
                })
            })
            .count()
    };
    Ok((valid(false), valid(true)))
}

pub fn day5(input: &str) -> Result<(usize, usize)> {
    let offsets = input
        .lines()
        .map(|l| Ok(l.parse()?))
        .collect::<Result<Vec<i64>>>()?;

    let jumps = |strange: bool| {
        let mut offsets = offsets.clone();
        let mut pc = 0i64;
        let mut steps = 0;
        while let Some(offset) = usize::try_from(pc).ok().and_then(|pc| offsets.get_mut(pc)) {
            pc += *offset;
            *offset += if strange && *offset >= 3 { -1 } else { 1 };
            steps += 1;
        }
        steps
    };
    Ok((jumps(false), jumps(true)))
}

pub fn day6(input: &str) -> Result<(usize, usize)> {
    let mut banks = input
        .split_whitespace()
        .map(|n| Ok(n.parse()?))
        .collect::<Result<Vec<u32>>>()?;
    ensure!(!banks.is_empty(), "no memory banks");

    let mut seen = IndexSet::new();
    while seen.insert(banks.clone()) {
        // ties go to the lowest index
        let (mut i, &blocks) = banks
            .iter()
            .enumerate()
            .max_by_key(|&(i, &blocks)| (blocks, Reverse(i)))
            .unwrap();
        banks[i] = 0;
        for _ in 0..blocks {
            i = (i + 1) % banks.len();
            banks[i] += 1;
        }
    }
    Ok((seen.len(), seen.len() - seen.get_index_of(&banks).unwrap()))
}

pub fn day7(input: &str) -> Result<(String, i64)> {
    let re = Regex::new(r"(?m)^(\w+) \((\d+)\)(?: -> (.+))?$")?;
    let mut weights = FxHashMap::default();
    let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    let mut has_parent = FxHashSet::default();
    for caps in re.captures_iter(input) {
        let name = caps.get(1).unwrap().as_str();
        weights.insert(name, caps[2].parse::<i64>()?);
        if let Some(kids) = caps.get(3) {
            for kid in kids.as_str().split(", ") {
                children.entry(name).or_default().push(kid);
                has_parent.insert(kid);
            }
        }
    }
    let root = *weights
        .keys()
        .find(|name| !has_parent.contains(*name))
        .context("tower has no root")?;

    // Post-order so the deepest imbalance is reported, not one it causes
    // further up.
    fn subtree_weight<'a>(
        node: &str,
        weights: &FxHashMap<&'a str, i64>,
        children: &FxHashMap<&'a str, Vec<&'a str>>,
        corrected: &mut Option<i64>,
    ) -> i64 {
        let Some(kids) = children.get(node) else {
            return weights[node];
        };
        let kid_weights: Vec<i64> = kids
            .iter()
            .map(|&kid| subtree_weight(kid, weights, children, corrected))
            .collect();
        if corrected.is_none() && kids.len() > 1 {
            let odd = kid_weights
                .iter()
                .position(|&w| kid_weights.iter().filter(|&&v| v == w).count() == 1);
            if let Some(odd) = odd {
                if let Some(&majority) = kid_weights.iter().find(|&&v| v != kid_weights[odd]) {
                    *corrected = Some(weights[kids[odd]] + majority - kid_weights[odd]);
                }
            }
        }
        weights[node] + kid_weights.iter().sum::<i64>()
    }

    let mut corrected = None;
    subtree_weight(root, &weights, &children, &mut corrected);
    let corrected = corrected.context("tower is already balanced")?;
    Ok((root.to_string(), corrected))
}

pub fn day8(input: &str) -> Result<(i64, i64)> {
    let re = Regex::new(r"(?m)^(\w+) (inc|dec) (-?\d+) if (\w+) (\S+) (-?\d+)$")?;
    let mut registers: FxHashMap<&str, i64> = FxHashMap::default();
    let mut highest_ever = 0;
    for caps in re.captures_iter(input) {
        let target = caps.get(1).unwrap().as_str();
        registers.entry(target).or_insert(0);
        let left = *registers.entry(caps.get(4).unwrap().as_str()).or_insert(0);
        let right: i64 = caps[6].parse()?;
        let condition = match &caps[5] {
            ">" => left > right,
            "<" => left < right,
            ">=" => left >= right,
            "<=" => left <= right,
            "==" => left == right,
            "!=" => left != right,
            op => bail!("unknown comparison: {}", op),
        };
        if condition {
            let amount: i64 = caps[3].parse()?;
            let register = registers.get_mut(target).unwrap();
            *register += if &caps[2] == "inc" { amount } else { -amount };
            highest_ever = highest_ever.max(*register);
        }
    }
    let part1 = registers.values().copied().max().unwrap_or(0);
    Ok((part1, highest_ever))
}

pub fn day9(input: &str) -> Result<(u32, u32)> {
    let mut score = 0;
    let mut depth = 0;
    let mut garbage_count = 0;
    let mut in_garbage = false;
    let mut stream = input.trim().chars();
    while let Some(c) = stream.next() {
        match (in_garbage, c) {
            (true, '!') => {
                stream.next();
            }
            (true, '>') => in_garbage = false,
            (true, _) => garbage_count += 1,
            (false, '<') => in_garbage = true,
            (false, '{') => {
                depth += 1;
                score += depth;
            }
            (false, '}') => depth -= 1,
            _ => {}
        }
    }
    Ok((score, garbage_count))
}

fn knot_rounds(lengths: &[usize], rounds: usize) -> Vec<u8> {
    let mut marks: Vec<u8> = (0..=255).collect();
    let mut position = 0;
    let mut skip = 0;
    for _ in 0..rounds {
        for &length in lengths {
            for i in 0..length / 2 {
                marks.swap((position + i) % 256, (position + length - 1 - i) % 256);
            }
            position = (position + length + skip) % 256;
            skip += 1;
        }
    }
    marks
}

/// The dense hash as a single 128 bit number.
fn knot_hash(input: &str) -> u128 {
    let lengths: Vec<usize> = input
        .trim()
        .bytes()
        .map(usize::from)
        .chain([17, 31, 73, 47, 23])
        .collect();
    knot_rounds(&lengths, 64)
        .chunks(16)
        .fold(0, |hash, chunk| {
            hash << 8 | u128::from(chunk.iter().fold(0u8, |acc, &b| acc ^ b))
        })
}

pub fn day10(input: &str) -> Result<(u32, String)> {
    let lengths = input
        .trim()
        .split(',')
        .map(|n| Ok(n.trim().parse()?))
        .collect::<Result<Vec<usize>>>()?;
    ensure!(lengths.iter().all(|&l| l <= 256), "length over 256");
    let marks = knot_rounds(&lengths, 1);
    let part1 = u32::from(marks[0]) * u32::from(marks[1]);
    Ok((part1, format!("{:032x}", knot_hash(input))))
}

pub fn day11(input: &str) -> Result<(i32, i32)> {
    let (mut x, mut y, mut z) = (0i32, 0i32, 0i32);
    let mut distance = 0;
    let mut furthest = 0;
    for step in input.trim().split(',') {
        let (dx, dy, dz) = match step {
            "n" => (0, 1, -1),
            "s" => (0, -1, 1),
            "ne" => (1, 0, -1),
            "sw" => (-1, 0, 1),
            "nw" => (-1, 1, 0),
            "se" => (1, -1, 0),
            _ => bail!("unknown direction: {}", step),
        };
        x += dx;
        y += dy;
        z += dz;
        distance = (x.abs() + y.abs() + z.abs()) / 2;
        furthest = furthest.max(distance);
    }
    Ok((distance, furthest))
}

pub fn day12(input: &str) -> Result<(usize, usize)> {
    let mut union_find = UnionFind::new(input.lines().count());
    for line in input.lines() {
        let (program, peers) = line.split_once(" <-> ").context("malformed pipe list")?;
        let program: usize = program.parse()?;
        for peer in peers.split(", ") {
            union_find.union(program, peer.parse()?);
        }
    }
    let labels = union_find.into_labeling();
    let part1 = labels.iter().filter(|&&group| group == labels[0]).count();
    let part2 = labels.iter().collect::<FxHashSet<_>>().len();
    Ok((part1, part2))
}

pub fn day13(input: &str) -> Result<(u32, u32)> {
    let layers = input
        .lines()
        .map(|line| {
            let (depth, range) = line.split_once(": ").context("malformed layer")?;
            Ok((depth.parse()?, range.parse()?))
        })
        .collect::<Result<Vec<(u32, u32)>>>()?;

    // a scanner with the given range is at the top every 2 * (range - 1)
    // picoseconds
    let caught = |delay: u32| {
        layers
            .iter()
            .filter(move |&&(depth, range)| (delay + depth) % (2 * (range - 1)) == 0)
    };
    let part1 = caught(0).map(|&(depth, range)| depth * range).sum();
    let part2 = (0..)
        .find(|&delay| caught(delay).next().is_none())
        .context("no safe delay")?;
    Ok((part1, part2))
}

pub fn day14(input: &str) -> Result<(u32, usize)> {
    let key = input.trim();
    let rows: Vec<u128> = (0..128)
        .into_par_iter()
        .map(|row| knot_hash(&format!("{}-{}", key, row)))
        .collect();
    let part1 = rows.iter().map(|row| row.count_ones()).sum();

    let mut grid = [[false; 128]; 128];
    for y in 0..128 {
        for x in 0..128 {
            grid[y][x] = (rows[y] >> (127 - x)) & 1 == 1;
        }
    }
    let mut regions = 0;
    for y in 0..128 {
        for x in 0..128 {
            if !grid[y][x] {
                continue;
            }
            regions += 1;
            let mut stack = vec![(y, x)];
            while let Some((y, x)) = stack.pop() {
                if y >= 128 || x >= 128 || !grid[y][x] {
                    continue;
                }
                grid[y][x] = false;
                stack.extend([
                    (y.wrapping_sub(1), x),
                    (y + 1, x),
                    (y, x.wrapping_sub(1)),
                    (y, x + 1),
                ]);
            }
        }
    }
    Ok((part1, regions))
}

pub fn day15(input: &str) -> Result<(usize, usize)> {
    let seeds = ints(input);
    ensure!(seeds.len() == 2, "expected two generator seeds");
    let generator = |seed: i64, factor: i64| {
        std::iter::successors(Some(seed), move |&value| Some(value * factor % 2147483647)).skip(1)
    };

    let judge = |pairs: usize, multiple_a: i64, multiple_b: i64| {
        generator(seeds[0], 16807)
            .filter(|value| value % multiple_a == 0)
            .zip(generator(seeds[1], 48271).filter(|value| value % multiple_b == 0))
            .take(pairs)
            .filter(|&(a, b)| (a & 0xffff) == (b & 0xffff))
            .count()
    };
    Ok((judge(40_000_000, 1, 1), judge(5_000_000, 4, 8)))
}

pub fn day16(input: &str) -> Result<(String, String)> {
    enum Move {
        Spin(usize),
        Exchange(usize, usize),
        Partner(u8, u8),
    }

    let moves = input
        .trim()
        .split(',')
        .map(|m| {
            Ok(match m.as_bytes().first() {
                Some(b's') => Move::Spin(m[1..].parse::<usize>()? % 16),
                Some(b'x') => {
                    let (a, b) = m[1..].split_once('/').context("malformed exchange")?;
                    let (a, b) = (a.parse()?, b.parse()?);
                    ensure!(a < 16 && b < 16, "exchange position out of range: {}", m);
                    Move::Exchange(a, b)
                }
                Some(b'p') => {
                    let (a, b) = m[1..].split_once('/').context("malformed partner")?;
                    let (a, b) = (
                        *a.as_bytes().first().context("malformed partner")?,
                        *b.as_bytes().first().context("malformed partner")?,
                    );
                    ensure!(
                        (b'a'..=b'p').contains(&a) && (b'a'..=b'p').contains(&b),
                        "unknown program: {}",
                        m
                    );
                    Move::Partner(a, b)
                }
                _ => bail!("unknown dance move: {}", m),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let dance = |order: &mut Vec<u8>| {
        for step in &moves {
            match *step {
                Move::Spin(n) => order.rotate_right(n),
                Move::Exchange(a, b) => order.swap(a, b),
                Move::Partner(a, b) => {
                    let a = order.iter().position(|&p| p == a).unwrap();
                    let b = order.iter().position(|&p| p == b).unwrap();
                    order.swap(a, b);
                }
            }
        }
    };

    // a billion dances is many cycles through a short loop of orders
    let initial: Vec<u8> = (b'a'..=b'p').collect();
    let mut orders = vec![];
    let mut order = initial.clone();
    loop {
        orders.push(order.clone());
        dance(&mut order);
        if order == initial {
            break;
        }
    }
    let part1 = orders.get(1).unwrap_or(&initial).clone();
    let part2 = orders[1_000_000_000 % orders.len()].clone();
    Ok((String::from_utf8(part1)?, String::from_utf8(part2)?))
}

pub fn day17(input: &str) -> Result<(u32, u32)> {
    let step: usize = input.trim().parse()?;

    let mut buffer = vec![0u32];
    let mut position = 0;
    for value in 1..=2017 {
        position = (position + step) % buffer.len() + 1;
        buffer.insert(position, value);
    }
    let part1 = buffer[(position + 1) % buffer.len()];

    // 0 never moves from the front, so only track what sits at index 1
    let mut after_zero = 0;
    let mut position = 0;
    for value in 1..=50_000_000u32 {
        position = (position + step) % value as usize + 1;
        if position == 1 {
            after_zero = value;
        }
    }
    Ok((part1, after_zero))
}

#[derive(Clone, Copy)]
enum Operand {
    Register(usize),
    Literal(i64),
}

impl Operand {
    fn parse(token: &str) -> Result<Operand> {
        Ok(match token.as_bytes() {
            &[c @ b'a'..=b'z'] => Operand::Register(usize::from(c - b'a')),
            _ => Operand::Literal(token.parse()?),
        })
    }

    fn value(self, registers: &[i64; 26]) -> i64 {
        match self {
            Operand::Register(r) => registers[r],
            Operand::Literal(n) => n,
        }
    }
}

fn register(token: &str) -> Result<usize> {
    match Operand::parse(token)? {
        Operand::Register(r) => Ok(r),
        Operand::Literal(_) => bail!("expected a register: {}", token),
    }
}

pub fn day18(input: &str) -> Result<(i64, usize)> {
    #[derive(Clone, Copy)]
    enum Instruction {
        Snd(Operand),
        Set(usize, Operand),
        Add(usize, Operand),
        Mul(usize, Operand),
        Mod(usize, Operand),
        Rcv(usize),
        Jgz(Operand, Operand),
    }

    let instructions = input
        .lines()
        .map(|line| {
            let mut tokens = line.split_whitespace();
            let mut next = || tokens.next().context("truncated instruction");
            Ok(match next()? {
                "snd" => Instruction::Snd(Operand::parse(next()?)?),
                "set" => Instruction::Set(register(next()?)?, Operand::parse(next()?)?),
                "add" => Instruction::Add(register(next()?)?, Operand::parse(next()?)?),
                "mul" => Instruction::Mul(register(next()?)?, Operand::parse(next()?)?),
                "mod" => Instruction::Mod(register(next()?)?, Operand::parse(next()?)?),
                "rcv" => Instruction::Rcv(register(next()?)?),
                "jgz" => Instruction::Jgz(Operand::parse(next()?)?, Operand::parse(next()?)?),
                op => bail!("unknown instruction: {}", op),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Part 1 treats snd/rcv as sound: run solo until the first non-zero rcv.
    let mut registers = [0i64; 26];
    let mut pc = 0i64;
    let mut last_sound = 0;
    let part1 = loop {
        let Some(&instruction) = usize::try_from(pc).ok().and_then(|pc| instructions.get(pc))
        else {
            break last_sound;
        };
        match instruction {
            Instruction::Snd(x) => last_sound = x.value(&registers),
            Instruction::Set(r, y) => registers[r] = y.value(&registers),
            Instruction::Add(r, y) => registers[r] += y.value(&registers),
            Instruction::Mul(r, y) => registers[r] *= y.value(&registers),
            Instruction::Mod(r, y) => registers[r] = registers[r].rem_euclid(y.value(&registers)),
            Instruction::Rcv(r) => {
                if registers[r] != 0 {
                    break last_sound;
                }
            }
            Instruction::Jgz(x, y) => {
                if x.value(&registers) > 0 {
                    pc += y.value(&registers);
                    continue;
                }
            }
        }
        pc += 1;
    };

    struct Program<'a> {
        instructions: &'a [Instruction],
        registers: [i64; 26],
        pc: i64,
        sends: usize,
    }

    impl<'a> Program<'a> {
        fn new(instructions: &'a [Instruction], id: i64) -> Program<'a> {
            let mut registers = [0; 26];
            registers[usize::from(b'p' - b'a')] = id;
            Program { instructions, registers, pc: 0, sends: 0 }
        }

        // Runs until the program blocks on an empty queue or terminates,
        // returning how many instructions it got through.
        fn run(&mut self, incoming: &mut VecDeque<i64>, outgoing: &mut VecDeque<i64>) -> usize {
            let mut executed = 0;
            while let Some(&instruction) =
                usize::try_from(self.pc).ok().and_then(|pc| self.instructions.get(pc))
            {
                match instruction {
                    Instruction::Snd(x) => {
                        outgoing.push_back(x.value(&self.registers));
                        self.sends += 1;
                    }
                    Instruction::Set(r, y) => self.registers[r] = y.value(&self.registers),
                    Instruction::Add(r, y) => self.registers[r] += y.value(&self.registers),
                    Instruction::Mul(r, y) => self.registers[r] *= y.value(&self.registers),
                    Instruction::Mod(r, y) => {
                        self.registers[r] = self.registers[r].rem_euclid(y.value(&self.registers))
                    }
                    Instruction::Rcv(r) => match incoming.pop_front() {
                        Some(value) => self.registers[r] = value,
                        None => return executed,
                    },
                    Instruction::Jgz(x, y) => {
                        executed += 1;
                        if x.value(&self.registers) > 0 {
                            self.pc += y.value(&self.registers);
                        } else {
                            self.pc += 1;
                        }
                        continue;
                    }
                }
                executed += 1;
                self.pc += 1;
            }
            executed
        }
    }

    let mut programs = [Program::new(&instructions, 0), Program::new(&instructions, 1)];
    let mut queues = [VecDeque::new(), VecDeque::new()];
    loop {
        let [incoming, outgoing] = &mut queues;
        let mut executed = programs[0].run(incoming, outgoing);
        let [outgoing, incoming] = &mut queues;
        executed += programs[1].run(incoming, outgoing);
        if executed == 0 {
            break;
        }
    }
    Ok((part1, programs[1].sends))
}

pub fn day19(input: &str) -> Result<(String, usize)> {
    let grid: Vec<&[u8]> = input.lines().map(str::as_bytes).collect();
    let start = grid
        .first()
        .and_then(|row| memchr(b'|', row))
        .context("no entry point on the top row")?;

    let at = |x: i64, y: i64| {
        if x < 0 || y < 0 {
            b' '
        } else {
            grid.get(y as usize)
                .and_then(|row| row.get(x as usize))
                .copied()
                .unwrap_or(b' ')
        }
    };

    let (mut x, mut y) = (start as i64, 0i64);
    let (mut dx, mut dy) = (0i64, 1i64);
    let mut letters = String::new();
    let mut steps = 0;
    loop {
        let c = at(x, y);
        match c {
            b' ' => break,
            b'+' => {
                // turn onto whichever perpendicular path continues
                (dx, dy) = if at(x + dy, y + dx) != b' ' { (dy, dx) } else { (-dy, -dx) };
            }
            b'A'..=b'Z' => letters.push(c as char),
            _ => {}
        }
        steps += 1;
        x += dx;
        y += dy;
    }
    Ok((letters, steps))
}

pub fn day20(input: &str) -> Result<(usize, usize)> {
    struct Particle {
        position: Vector3<i64>,
        velocity: Vector3<i64>,
        acceleration: Vector3<i64>,
    }

    let mut particles = input
        .lines()
        .map(|line| {
            let n = ints(line);
            ensure!(n.len() == 9, "malformed particle: {}", line);
            Ok(Particle {
                position: Vector3::new(n[0], n[1], n[2]),
                velocity: Vector3::new(n[3], n[4], n[5]),
                acceleration: Vector3::new(n[6], n[7], n[8]),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // long term, the weakest acceleration stays closest to the origin
    let part1 = particles
        .iter()
        .enumerate()
        .min_by_key(|(_, particle)| particle.acceleration.abs().sum())
        .map(|(i, _)| i)
        .context("no particles")?;

    let mut quiet_ticks = 0;
    while quiet_ticks < 100 {
        let mut positions: FxHashMap<Vector3<i64>, usize> = FxHashMap::default();
        for particle in &mut particles {
            particle.velocity += particle.acceleration;
            particle.position += particle.velocity;
            *positions.entry(particle.position).or_insert(0) += 1;
        }
        let before = particles.len();
        particles.retain(|particle| positions[&particle.position] == 1);
        quiet_ticks = if particles.len() == before { quiet_ticks + 1 } else { 0 };
    }
    Ok((part1, particles.len()))
}

fn fractal_pixels(rules_text: &str, iterations: usize) -> Result<usize> {
    fn cells(s: &str) -> Vec<Vec<bool>> {
        s.split('/').map(|row| row.bytes().map(|b| b == b'#').collect()).collect()
    }

    fn mask(cells: &[Vec<bool>]) -> u16 {
        cells.iter().flatten().fold(0, |mask, &cell| mask << 1 | u16::from(cell))
    }

    fn rotated(cells: &[Vec<bool>]) -> Vec<Vec<bool>> {
        let size = cells.len();
        (0..size).map(|y| (0..size).map(|x| cells[size - 1 - x][y]).collect()).collect()
    }

    fn flipped(cells: &[Vec<bool>]) -> Vec<Vec<bool>> {
        cells.iter().map(|row| row.iter().rev().copied().collect()).collect()
    }

    // index every rule under all eight orientations of its pattern
    let mut rules: FxHashMap<(usize, u16), Vec<Vec<bool>>> = FxHashMap::default();
    for line in rules_text.lines() {
        let (from, to) = line.split_once(" => ").context("malformed rule")?;
        let mut from = cells(from);
        let to = cells(to);
        ensure!(from.len() + 1 == to.len(), "malformed rule: {}", line);
        for _ in 0..4 {
            rules.insert((from.len(), mask(&from)), to.clone());
            rules.insert((from.len(), mask(&flipped(&from))), to.clone());
            from = rotated(&from);
        }
    }

    let mut grid = cells(".#./..#/###");
    for _ in 0..iterations {
        let size = grid.len();
        let block = if size % 2 == 0 { 2 } else { 3 };
        let blocks = size / block;
        let new_block = block + 1;
        let mut next = vec![vec![false; blocks * new_block]; blocks * new_block];
        for by in 0..blocks {
            for bx in 0..blocks {
                let square: Vec<Vec<bool>> = (0..block)
                    .map(|y| (0..block).map(|x| grid[by * block + y][bx * block + x]).collect())
                    .collect();
                let replacement = rules
                    .get(&(block, mask(&square)))
                    .context("no rule matches a block")?;
                for y in 0..new_block {
                    for x in 0..new_block {
                        next[by * new_block + y][bx * new_block + x] = replacement[y][x];
                    }
                }
            }
        }
        grid = next;
    }
    Ok(grid.iter().flatten().filter(|&&cell| cell).count())
}

pub fn day21(input: &str) -> Result<(usize, usize)> {
    Ok((fractal_pixels(input, 5)?, fractal_pixels(input, 18)?))
}

pub fn day22(input: &str) -> Result<(usize, usize)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Node {
        Weakened,
        Infected,
        Flagged,
    }

    let lines: Vec<&str> = input.lines().collect();
    let center_x = lines.first().map_or(0, |line| line.len() / 2) as i32;
    let center_y = (lines.len() / 2) as i32;
    let mut initial: FxHashMap<Complex<i32>, Node> = FxHashMap::default();
    for (y, line) in lines.iter().enumerate() {
        for (x, c) in line.bytes().enumerate() {
            if c == b'#' {
                initial.insert(
                    Complex::new(x as i32 - center_x, y as i32 - center_y),
                    Node::Infected,
                );
            }
        }
    }

    // directions as complex numbers; with y growing downward, multiplying by
    // -i turns left and by i turns right
    let bursts = |count: usize, evolved: bool| {
        let mut nodes = initial.clone();
        let mut position = Complex::new(0, 0);
        let mut direction = Complex::new(0, -1);
        let mut infections = 0;
        for _ in 0..count {
            match nodes.get(&position).copied() {
                None => {
                    direction *= Complex::new(0, -1);
                    if evolved {
                        nodes.insert(position, Node::Weakened);
                    } else {
                        nodes.insert(position, Node::Infected);
                        infections += 1;
                    }
                }
                Some(Node::Weakened) => {
                    nodes.insert(position, Node::Infected);
                    infections += 1;
                }
                Some(Node::Infected) => {
                    direction *= Complex::new(0, 1);
                    if evolved {
                        nodes.insert(position, Node::Flagged);
                    } else {
                        nodes.remove(&position);
                    }
                }
                Some(Node::Flagged) => {
                    direction = -direction;
                    nodes.remove(&position);
                }
            }
            position += direction;
        }
        infections
    };
    Ok((bursts(10_000, false), bursts(10_000_000, true)))
}

pub fn day23(input: &str) -> Result<(usize, usize)> {
    #[derive(Clone, Copy)]
    enum Instruction {
        Set(usize, Operand),
        Sub(usize, Operand),
        Mul(usize, Operand),
        Jnz(Operand, Operand),
    }

    let instructions = input
        .lines()
        .map(|line| {
            let mut tokens = line.split_whitespace();
            let mut next = || tokens.next().context("truncated instruction");
            Ok(match next()? {
                "set" => Instruction::Set(register(next()?)?, Operand::parse(next()?)?),
                "sub" => Instruction::Sub(register(next()?)?, Operand::parse(next()?)?),
                "mul" => Instruction::Mul(register(next()?)?, Operand::parse(next()?)?),
                "jnz" => Instruction::Jnz(Operand::parse(next()?)?, Operand::parse(next()?)?),
                op => bail!("unknown instruction: {}", op),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut registers = [0i64; 26];
    let mut pc = 0i64;
    let mut multiplications = 0;
    while let Some(&instruction) = usize::try_from(pc).ok().and_then(|pc| instructions.get(pc)) {
        match instruction {
            Instruction::Set(r, y) => registers[r] = y.value(&registers),
            Instruction::Sub(r, y) => registers[r] -= y.value(&registers),
            Instruction::Mul(r, y) => {
                registers[r] *= y.value(&registers);
                multiplications += 1;
            }
            Instruction::Jnz(x, y) => {
                if x.value(&registers) != 0 {
                    pc += y.value(&registers);
                    continue;
                }
            }
        }
        pc += 1;
    }

    // With a = 1 the program counts composites in steps of 17 between
    // b * 100 + 100000 and that plus 17000; running it directly takes ages.
    let Some(&Instruction::Set(_, Operand::Literal(seed))) = instructions.first() else {
        bail!("program does not start by seeding b");
    };
    let first = seed * 100 + 100_000;
    let part2 = (first..=first + 17_000)
        .step_by(17)
        .filter(|&n| (2i64..).take_while(|d| d * d <= n).any(|d| n % d == 0))
        .count();
    Ok((multiplications, part2))
}

pub fn day24(input: &str) -> Result<(u32, u32)> {
    let components = input
        .lines()
        .map(|line| {
            let (a, b) = line.split_once('/').context("malformed component")?;
            Ok((a.parse()?, b.parse()?))
        })
        .collect::<Result<Vec<(u32, u32)>>>()?;
    ensure!(components.len() <= 64, "too many components for a u64 bitmask");

    struct Bridges<'a> {
        components: &'a [(u32, u32)],
        // open port, used-component bitmask, length, strength
        stack: Vec<(u32, u64, u32, u32)>,
    }

    impl Iterator for Bridges<'_> {
        type Item = (u32, u32);

        fn next(&mut self) -> Option<Self::Item> {
            let (port, used, length, strength) = self.stack.pop()?;
            for (i, &(a, b)) in self.components.iter().enumerate() {
                if used & (1 << i) != 0 {
                    continue;
                }
                let far = match (a == port, b == port) {
                    (true, _) => b,
                    (_, true) => a,
                    _ => continue,
                };
                self.stack.push((far, used | (1 << i), length + 1, strength + a + b));
            }
            Some((length, strength))
        }
    }

    impl Spliterator for Bridges<'_> {
        fn split(&mut self) -> Option<Self> {
            let half = self.stack.len() / 2;
            (half > 0).then(|| Bridges {
                components: self.components,
                stack: self.stack.split_off(half),
            })
        }
    }

    let bridges = Bridges { components: &components, stack: vec![(0, 0, 0, 0)] };
    let (strongest, (_, longest_strength)) = bridges
        .par_split()
        .map(|(length, strength)| (strength, (length, strength)))
        .reduce(|| (0, (0, 0)), |a, b| (a.0.max(b.0), a.1.max(b.1)));
    Ok((strongest, longest_strength))
}

pub fn day25(input: &str) -> Result<(usize, &'static str)> {
    let header =
        Regex::new(r"Begin in state (\w)\.\s+Perform a diagnostic checksum after (\d+) steps\.")?;
    let caps = header.captures(input).context("missing blueprint header")?;
    let initial = caps[1].as_bytes()[0];
    let steps: usize = caps[2].parse()?;

    let branch = Regex::new(
        r"If the current value is (\d):\s+- Write the value (\d)\.\s+- Move one slot to the (right|left)\.\s+- Continue with state (\w)\.",
    )?;
    // branches[state] holds the (write, move, next state) triples for reading
    // a 0 and a 1; blueprints list states in order, 0-branch first
    let mut branches: Vec<[(bool, i64, usize); 2]> = vec![];
    for caps in branch.captures_iter(input) {
        let write = &caps[2] == "1";
        let offset = if &caps[3] == "right" { 1 } else { -1 };
        let next = usize::from(caps[4].as_bytes()[0] - b'A');
        if &caps[1] == "0" {
            branches.push([(write, offset, next); 2]);
        } else {
            let entry = branches.last_mut().context("1-branch before its 0-branch")?;
            entry[1] = (write, offset, next);
        }
    }

    let mut ones = FxHashSet::default();
    let mut cursor = 0i64;
    let mut state = usize::from(initial - b'A');
    for _ in 0..steps {
        let current = usize::from(ones.contains(&cursor));
        let (write, offset, next) = branches.get(state).context("undefined state")?[current];
        if write {
            ones.insert(cursor);
        } else {
            ones.remove(&cursor);
        }
        cursor += offset;
        state = next;
    }
    Ok((ones.len(), "n/a"))
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;

    use indoc::indoc;

    use super::*;

    fn execute_day_input<S: Display, T: Display>(
        day: fn(&str) -> Result<(S, T)>,
        input: &str,
    ) -> Result<(S, T)> {
        day(input)
    }

    #[test]
    fn test_day1() -> Result<()> {
        assert_eq!(execute_day_input(day1, "1122")?.0, 3);
        assert_eq!(execute_day_input(day1, "1111")?.0, 4);
        assert_eq!(execute_day_input(day1, "91212129")?.0, 9);
        assert_eq!(execute_day_input(day1, "1212")?.1, 6);
        assert_eq!(execute_day_input(day1, "123425")?.1, 4);
        Ok(())
    }

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            5 1 9 5
            7 5 3
            2 4 6 8
        "};
        assert_eq!(execute_day_input(day2, example)?.0, 18);
        let example = indoc! {"
            5 9 2 8
            9 4 7 3
            3 8 6 5
        "};
        assert_eq!(execute_day_input(day2, example)?.1, 9);
        Ok(())
    }

    #[test]
    fn test_day3() -> Result<()> {
        assert_eq!(execute_day_input(day3, "1")?.0, 0);
        assert_eq!(execute_day_input(day3, "12")?.0, 3);
        assert_eq!(execute_day_input(day3, "23")?.0, 2);
        assert_eq!(execute_day_input(day3, "1024")?.0, 31);
        assert_eq!(execute_day_input(day3, "750")?.1, 806);
        Ok(())
    }

    #[test]
    fn test_day4() -> Result<()> {
        let example = indoc! {"
            aa bb cc dd ee
            aa bb cc dd aa
            aa bb cc dd aaa
        "};
        assert_eq!(execute_day_input(day4, example)?.0, 2);
        let example = indoc! {"
            abcde fghij
            abcde xyz ecdab
            a ab abc abd abf abj
            iiii oiii ooii oooi oooo
            oiii ioii iioi iiio
        "};
        assert_eq!(execute_day_input(day4, example)?.1, 3);
        Ok(())
    }

    #[test]
    fn test_day5() -> Result<()> {
        let example = indoc! {"
            0
            3
            0
            1
            -3
        "};
        assert_eq!(execute_day_input(day5, example)?, (5, 10));
        Ok(())
    }

    #[test]
    fn test_day6() -> Result<()> {
        assert_eq!(execute_day_input(day6, "0 2 7 0")?, (5, 4));
        Ok(())
    }

    #[test]
    fn test_day7() -> Result<()> {
        let example = indoc! {"
            pbga (66)
            xhth (57)
            ebii (61)
            havc (66)
            ktlj (57)
            fwft (72) -> ktlj, cntj, xhth
            qoyq (66)
            padx (45) -> pbga, havc, qoyq
            tknk (41) -> ugml, padx, fwft
            jptl (61)
            ugml (68) -> gyxo, ebii, jptl
            gyxo (61)
            cntj (57)
        "};
        let (root, corrected) = execute_day_input(day7, example)?;
        assert_eq!(root, "tknk");
        assert_eq!(corrected, 60);
        Ok(())
    }

    #[test]
    fn test_day8() -> Result<()> {
        let example = indoc! {"
            b inc 5 if a > 1
            a inc 1 if b < 5
            c dec -10 if a >= 1
            c inc -20 if c == 10
        "};
        assert_eq!(execute_day_input(day8, example)?, (1, 10));
        Ok(())
    }

    #[test]
    fn test_day9() -> Result<()> {
        assert_eq!(execute_day_input(day9, "{}")?.0, 1);
        assert_eq!(execute_day_input(day9, "{{{}}}")?.0, 6);
        assert_eq!(execute_day_input(day9, "{{},{}}")?.0, 5);
        assert_eq!(execute_day_input(day9, "{{{},{},{{}}}}")?.0, 16);
        assert_eq!(execute_day_input(day9, "{{<ab>},{<ab>},{<ab>},{<ab>}}")?.0, 9);
        assert_eq!(execute_day_input(day9, "{{<a!>},{<a!>},{<a!>},{<ab>}}")?.0, 3);
        assert_eq!(execute_day_input(day9, "<random characters>")?.1, 17);
        assert_eq!(execute_day_input(day9, "<<<<>")?.1, 3);
        assert_eq!(execute_day_input(day9, "<{!>}>")?.1, 2);
        assert_eq!(execute_day_input(day9, "<!!!>>")?.1, 0);
        assert_eq!(execute_day_input(day9, "<{o\"i!a,<{i<a>")?.1, 10);
        Ok(())
    }

    #[test]
    fn test_day10() -> Result<()> {
        assert_eq!(format!("{:032x}", knot_hash("")), "a2582a3a0e66e6e86e3812dcb672a272");
        assert_eq!(format!("{:032x}", knot_hash("AoC 2017")), "33efeb34ea91902bb2f59c9920caa6cd");
        assert_eq!(execute_day_input(day10, "1,2,3")?.1, "3efbe78a8d82f29979031a4aa0b16a9d");
        assert_eq!(execute_day_input(day10, "1,2,4")?.1, "63960835bcdc130f0b66d7ff4f6a5a8e");
        Ok(())
    }

    #[test]
    fn test_day11() -> Result<()> {
        assert_eq!(execute_day_input(day11, "ne,ne,ne")?.0, 3);
        assert_eq!(execute_day_input(day11, "ne,ne,sw,sw")?, (0, 2));
        assert_eq!(execute_day_input(day11, "ne,ne,s,s")?.0, 2);
        assert_eq!(execute_day_input(day11, "se,sw,se,sw,sw")?.0, 3);
        Ok(())
    }

    #[test]
    fn test_day12() -> Result<()> {
        let example = indoc! {"
            0 <-> 2
            1 <-> 1
            2 <-> 0, 3, 4
            3 <-> 2, 4
            4 <-> 2, 3, 6
            5 <-> 6
            6 <-> 4, 5
        "};
        assert_eq!(execute_day_input(day12, example)?, (6, 2));
        Ok(())
    }

    #[test]
    fn test_day13() -> Result<()> {
        let example = indoc! {"
            0: 3
            1: 2
            4: 4
            6: 4
        "};
        assert_eq!(execute_day_input(day13, example)?, (24, 10));
        Ok(())
    }

    #[test]
    fn test_day14() -> Result<()> {
        assert_eq!(execute_day_input(day14, "flqrgnkx")?, (8108, 1242));
        Ok(())
    }

    #[test]
    fn test_day15() -> Result<()> {
        let example = indoc! {"
            Generator A starts with 65
            Generator B starts with 8921
        "};
        assert_eq!(execute_day_input(day15, example)?, (588, 309));
        Ok(())
    }

    #[test]
    fn test_day16() -> Result<()> {
        assert_eq!(execute_day_input(day16, "s3")?.0, "nopabcdefghijklm");
        assert_eq!(execute_day_input(day16, "s1,x3/4,pe/b")?.0, "paedcbfghijklmno");
        Ok(())
    }

    #[test]
    fn test_day17() -> Result<()> {
        assert_eq!(execute_day_input(day17, "3")?.0, 638);
        Ok(())
    }

    #[test]
    fn test_day18() -> Result<()> {
        let example = indoc! {"
            set a 1
            add a 2
            mul a a
            mod a 5
            snd a
            set a 0
            rcv a
            jgz a -1
            set a 1
            jgz a -2
        "};
        assert_eq!(execute_day_input(day18, example)?.0, 4);
        let example = indoc! {"
            snd 1
            snd 2
            snd p
            rcv a
            rcv b
            rcv c
            rcv d
        "};
        assert_eq!(execute_day_input(day18, example)?.1, 3);
        Ok(())
    }

    #[test]
    fn test_day19() -> Result<()> {
        let example = indoc! {"
                 |
                 |  +--+
                 A  |  C
             F---|----E|--+
                 |  |  |  D
                 +B-+  +--+
        "};
        let (letters, steps) = execute_day_input(day19, example)?;
        assert_eq!(letters, "ABCDEF");
        assert_eq!(steps, 38);
        Ok(())
    }

    #[test]
    fn test_day20() -> Result<()> {
        let example = indoc! {"
            p=<3,0,0>, v=<2,0,0>, a=<-1,0,0>
            p=<4,0,0>, v=<0,0,0>, a=<-2,0,0>
        "};
        assert_eq!(execute_day_input(day20, example)?.0, 0);
        let example = indoc! {"
            p=<-6,0,0>, v=<3,0,0>, a=<0,0,0>
            p=<-4,0,0>, v=<2,0,0>, a=<0,0,0>
            p=<-2,0,0>, v=<1,0,0>, a=<0,0,0>
            p=<3,0,0>, v=<-1,0,0>, a=<0,0,0>
        "};
        assert_eq!(execute_day_input(day20, example)?.1, 1);
        Ok(())
    }

    #[test]
    fn test_day21() -> Result<()> {
        let rules = indoc! {"
            ../.# => ##./#../...
            .#./..#/### => #..#/..../..../#..#
        "};
        assert_eq!(fractal_pixels(rules, 2)?, 12);
        Ok(())
    }

    #[test]
    fn test_day22() -> Result<()> {
        let example = indoc! {"
            ..#
            #..
            ...
        "};
        assert_eq!(execute_day_input(day22, example)?, (5587, 2511944));
        Ok(())
    }

    #[test]
    fn test_day23() -> Result<()> {
        let program = indoc! {"
            set b 57
            mul b 2
            mul b 10
        "};
        let (multiplications, composites) = execute_day_input(day23, program)?;
        assert_eq!(multiplications, 2);

        // recount 105700..=122700 step 17 against a sieve
        let limit = 351;
        let mut sieve = vec![true; limit + 1];
        sieve[0] = false;
        sieve[1] = false;
        for p in 2..=limit {
            if sieve[p] {
                for multiple in (p * p..=limit).step_by(p) {
                    sieve[multiple] = false;
                }
            }
        }
        let expected = (105_700..=122_700)
            .step_by(17)
            .filter(|&n| (2..=limit).any(|p| sieve[p] && n % p == 0))
            .count();
        assert_eq!(composites, expected);
        Ok(())
    }

    #[test]
    fn test_day24() -> Result<()> {
        let example = indoc! {"
            0/2
            2/2
            2/3
            3/4
            3/5
            0/1
            10/1
            9/10
        "};
        assert_eq!(execute_day_input(day24, example)?, (31, 19));
        Ok(())
    }

    #[test]
    fn test_day25() -> Result<()> {
        let example = indoc! {"
            Begin in state A.
            Perform a diagnostic checksum after 6 steps.

            In state A:
              If the current value is 0:
                - Write the value 1.
                - Move one slot to the right.
                - Continue with state B.
              If the current value is 1:
                - Write the value 0.
                - Move one slot to the left.
                - Continue with state B.

            In state B:
              If the current value is 0:
                - Write the value 1.
                - Move one slot to the left.
                - Continue with state A.
              If the current value is 1:
                - Write the value 1.
                - Move one slot to the right.
                - Continue with state A.
        "};
        assert_eq!(execute_day_input(day25, example)?.0, 3);
        Ok(())
    }
}
