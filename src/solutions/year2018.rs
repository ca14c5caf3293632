use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque},
};

use aho_corasick::AhoCorasick;
use anyhow::{bail, ensure, Context, Result};
use nalgebra::{Point2, Vector2};
use petgraph::unionfind::UnionFind;
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{solutions, Solution};
use crate::ints;

pub static SOLUTIONS: &[Solution] = solutions![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14,
    day15, day16, day17, day18, day19, day20, day21, day22, day23, day24, day25,
];

pub fn day1(input: &str) -> Result<(i64, i64)> {
    let changes = input
        .lines()
        .map(|line| Ok(line.parse()?))
        .collect::<Result<Vec<i64>>>()?;
    let sum = changes.iter().sum();

    let mut seen = FxHashSet::default();
    seen.insert(0);
    let mut frequency = 0;
    let repeated = changes
        .iter()
        .cycle()
        .find_map(|change| {
            frequency += change;
            (!seen.insert(frequency)).then_some(frequency)
        })
        .context("frequency never repeats")?;
    Ok((sum, repeated))
}

pub fn day2(input: &str) -> Result<(usize, String)> {
    let ids: Vec<&str> = input.lines().collect();
    let mut twos = 0;
    let mut threes = 0;
    for id in &ids {
        let mut counts = [0u8; 26];
        for b in id.bytes() {
            counts[usize::from(b - b'a')] += 1;
        }
        twos += usize::from(counts.contains(&2));
        threes += usize::from(counts.contains(&3));
    }

    let part2 = ids
        .iter()
        .enumerate()
        .find_map(|(i, a)| {
            ids[i + 1..].iter().find_map(|b| {
                let common: String = a
                    .chars()
                    .zip(b.chars())
                    .filter_map(|(x, y)| (x == y).then_some(x))
                    .collect();
                (common.len() + 1 == a.len()).then_some(common)
            })
        })
        .context("no ids differ by exactly one letter")?;
    Ok((twos * threes, part2))
}

pub fn day3(input: &str) -> Result<(usize, i64)> {
    let claims = input
        .lines()
        .map(|line| {
            let n = ints(line);
            ensure!(n.len() == 5, "malformed claim: {}", line);
            Ok((n[0], n[1] as usize, n[2] as usize, n[3] as usize, n[4] as usize))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut fabric = vec![0u16; 1000 * 1000];
    for &(_, x, y, w, h) in &claims {
        for y in y..y + h {
            for x in x..x + w {
                fabric[y * 1000 + x] += 1;
            }
        }
    }
    let part1 = fabric.iter().filter(|&&count| count >= 2).count();
    let intact = claims
        .iter()
        .find(|&&(_, x, y, w, h)| {
            (y..y + h).all(|y| (x..x + w).all(|x| fabric[y * 1000 + x] == 1))
        })
        .map(|&(id, ..)| id)
        .context("every claim overlaps")?;
    Ok((part1, intact))
}

pub fn day4(input: &str) -> Result<(u32, u32)> {
    let mut records: Vec<&str> = input.lines().collect();
    records.sort_unstable();

    let mut sleep_minutes: FxHashMap<u32, [u32; 60]> = FxHashMap::default();
    let mut guard = None;
    let mut sleep_start = 0;
    for record in records {
        let minute: usize = record.get(15..17).context("malformed record")?.parse()?;
        if let Some((_, rest)) = record.split_once('#') {
            guard = Some(
                rest.split_whitespace()
                    .next()
                    .context("missing guard id")?
                    .parse::<u32>()?,
            );
        } else if record.ends_with("falls asleep") {
            sleep_start = minute;
        } else {
            let guard = guard.context("sleep record before any shift")?;
            let minutes = sleep_minutes.entry(guard).or_insert([0; 60]);
            for m in sleep_start..minute {
                minutes[m] += 1;
            }
        }
    }

    let sleepiest_minute = |minutes: &[u32; 60]| {
        let (minute, &count) = minutes
            .iter()
            .enumerate()
            .max_by_key(|&(_, &count)| count)
            .unwrap();
        (minute as u32, count)
    };

    let (&guard, minutes) = sleep_minutes
        .iter()
        .max_by_key(|(_, minutes)| minutes.iter().sum::<u32>())
        .context("no guard ever slept")?;
    let part1 = guard * sleepiest_minute(minutes).0;

    let (&guard, minute, _) = sleep_minutes
        .iter()
        .map(|(guard, minutes)| {
            let (minute, count) = sleepiest_minute(minutes);
            (guard, minute, count)
        })
        .max_by_key(|&(_, _, count)| count)
        .context("no guard ever slept")?;
    Ok((part1, guard * minute))
}

pub fn day5(input: &str) -> Result<(usize, usize)> {
    let polymer = input.trim().as_bytes();
    // stack 26 runs the full polymer; stack i the polymer with unit i removed
    let mut stacks: Vec<Vec<u8>> = vec![Vec::new(); 27];
    for &unit in polymer {
        for (i, stack) in stacks.iter_mut().enumerate() {
            if i < 26 && (unit | 0x20) == b'a' + i as u8 {
                continue;
            }
            match stack.last() {
                // opposite polarities of a unit differ exactly in bit 5
                Some(&top) if (top ^ unit) == 0x20 => {
                    stack.pop();
                }
                _ => stack.push(unit),
            }
        }
    }
    let part1 = stacks[26].len();
    let part2 = stacks[..26].iter().map(Vec::len).min().unwrap();
    Ok((part1, part2))
}

pub fn day6(input: &str) -> Result<(usize, usize)> {
    let points = input
        .lines()
        .map(|line| {
            let (x, y) = line.split_once(", ").context("malformed coordinate")?;
            Ok((x.parse::<i32>()?, y.parse::<i32>()?))
        })
        .collect::<Result<Vec<_>>>()?;
    ensure!(!points.is_empty(), "no coordinates");

    let min_x = points.iter().map(|p| p.0).min().unwrap();
    let max_x = points.iter().map(|p| p.0).max().unwrap();
    let min_y = points.iter().map(|p| p.1).min().unwrap();
    let max_y = points.iter().map(|p| p.1).max().unwrap();

    let mut areas: FxHashMap<usize, usize> = FxHashMap::default();
    let mut infinite: FxHashSet<usize> = FxHashSet::default();
    let mut safe_region = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // (distance, Some(index)) of the closest coordinate; ties claim
            // nothing
            let mut nearest = None;
            let mut total = 0;
            for (i, &(px, py)) in points.iter().enumerate() {
                let distance = (px - x).abs() + (py - y).abs();
                total += distance;
                nearest = match nearest {
                    Some((best, _)) if distance > best => nearest,
                    Some((best, _)) if distance == best => Some((best, None)),
                    _ => Some((distance, Some(i))),
                };
            }
            if total < 10_000 {
                safe_region += 1;
            }
            if let Some((_, Some(i))) = nearest {
                // an area touching the bounding box keeps growing forever
                if x == min_x || x == max_x || y == min_y || y == max_y {
                    infinite.insert(i);
                }
                *areas.entry(i).or_insert(0) += 1;
            }
        }
    }

    let part1 = areas
        .iter()
        .filter(|(i, _)| !infinite.contains(i))
        .map(|(_, &area)| area)
        .max()
        .context("every area is infinite")?;
    Ok((part1, safe_region))
}

fn schedule(input: &str, workers: usize, base_duration: u32) -> Result<(String, u32)> {
    let re = Regex::new(r"(?m)^Step (\w) must be finished before step (\w) can begin\.$")?;
    let mut dependencies: BTreeMap<char, BTreeSet<char>> = BTreeMap::new();
    for caps in re.captures_iter(input) {
        let before = caps[1].chars().next().context("empty step name")?;
        let after = caps[2].chars().next().context("empty step name")?;
        dependencies.entry(before).or_default();
        dependencies.entry(after).or_default().insert(before);
    }

    // alone: always take the alphabetically first unblocked step
    let mut pending = dependencies.clone();
    let mut order = String::new();
    while !pending.is_empty() {
        let step = *pending
            .iter()
            .find_map(|(step, blockers)| blockers.is_empty().then_some(step))
            .context("dependency cycle")?;
        pending.remove(&step);
        for blockers in pending.values_mut() {
            blockers.remove(&step);
        }
        order.push(step);
    }

    // with helpers: a worker pool where each step takes a letter-based time
    let mut pending = dependencies;
    let mut running: Vec<(u32, char)> = vec![];
    let mut time = 0;
    loop {
        while running.len() < workers {
            let Some(&step) = pending
                .iter()
                .find_map(|(step, blockers)| blockers.is_empty().then_some(step))
            else {
                break;
            };
            pending.remove(&step);
            running.push((time + base_duration + u32::from(step as u8 - b'A' + 1), step));
        }
        let Some(&(finish, step)) = running.iter().min_by_key(|&&(finish, _)| finish) else {
            break;
        };
        time = finish;
        running.retain(|&(_, s)| s != step);
        for blockers in pending.values_mut() {
            blockers.remove(&step);
        }
    }
    Ok((order, time))
}

pub fn day7(input: &str) -> Result<(String, u32)> {
    schedule(input, 5, 60)
}

pub fn day8(input: &str) -> Result<(u64, u64)> {
    struct Node {
        children: Vec<Node>,
        metadata: Vec<u64>,
    }

    fn parse(numbers: &mut std::slice::Iter<u64>) -> Option<Node> {
        let child_count = *numbers.next()?;
        let metadata_count = *numbers.next()?;
        let children = (0..child_count).map(|_| parse(numbers)).collect::<Option<_>>()?;
        let metadata =
            (0..metadata_count).map(|_| numbers.next().copied()).collect::<Option<_>>()?;
        Some(Node { children, metadata })
    }

    fn metadata_sum(node: &Node) -> u64 {
        node.metadata.iter().sum::<u64>()
            + node.children.par_iter().map(metadata_sum).sum::<u64>()
    }

    fn value(node: &Node) -> u64 {
        if node.children.is_empty() {
            node.metadata.iter().sum()
        } else {
            node.metadata
                .iter()
                .filter_map(|&i| node.children.get(usize::try_from(i).ok()?.checked_sub(1)?))
                .map(value)
                .sum()
        }
    }

    let numbers = input
        .split_whitespace()
        .map(|n| Ok(n.parse()?))
        .collect::<Result<Vec<u64>>>()?;
    let root = parse(&mut numbers.iter()).context("malformed license tree")?;
    Ok((metadata_sum(&root), value(&root)))
}

pub fn day9(input: &str) -> Result<(u64, u64)> {
    let numbers = ints(input);
    ensure!(numbers.len() == 2, "expected player and marble counts");
    let players = usize::try_from(numbers[0]).context("bad player count")?;
    let last_marble = u64::try_from(numbers[1]).context("bad marble count")?;
    ensure!(players > 0, "no players");
    Ok((marble_game(players, last_marble), marble_game(players, last_marble * 100)))
}

// Deque with the current marble at the front; rotations replace pointer
// chasing.
fn marble_game(players: usize, last_marble: u64) -> u64 {
    let mut circle = VecDeque::with_capacity(last_marble as usize + 1);
    circle.push_back(0);
    let mut scores = vec![0; players];
    for marble in 1..=last_marble {
        if marble % 23 == 0 {
            for _ in 0..7 {
                let back = circle.pop_back().unwrap();
                circle.push_front(back);
            }
            scores[marble as usize % players] += marble + circle.pop_front().unwrap();
        } else {
            for _ in 0..2 {
                let front = circle.pop_front().unwrap();
                circle.push_back(front);
            }
            circle.push_front(marble);
        }
    }
    scores.into_iter().max().unwrap_or(0)
}

pub fn day10(input: &str) -> Result<(String, u32)> {
    let mut points = input
        .lines()
        .map(|line| {
            let n = ints(line);
            ensure!(n.len() == 4, "malformed point of light: {}", line);
            Ok((Point2::new(n[0], n[1]), Vector2::new(n[2], n[3])))
        })
        .collect::<Result<Vec<_>>>()?;
    ensure!(!points.is_empty(), "no points of light");

    let height = |points: &[(Point2<i64>, Vector2<i64>)]| {
        let (min, max) = points
            .iter()
            .fold((i64::MAX, i64::MIN), |(min, max), (p, _)| (min.min(p.y), max.max(p.y)));
        max - min
    };

    // the message appears at the moment of tightest vertical spread
    let mut seconds = 0;
    let mut best = height(&points);
    loop {
        let advanced: Vec<_> = points.iter().map(|&(p, v)| (p + v, v)).collect();
        let spread = height(&advanced);
        if spread > best {
            break;
        }
        best = spread;
        points = advanced;
        seconds += 1;
    }

    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (i64::MAX, i64::MIN, i64::MAX, i64::MIN),
        |(min_x, max_x, min_y, max_y), (p, _)| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );
    let lit: FxHashSet<(i64, i64)> = points.iter().map(|(p, _)| (p.x, p.y)).collect();
    let message = (min_y..=max_y)
        .map(|y| {
            (min_x..=max_x)
                .map(|x| if lit.contains(&(x, y)) { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok((message, seconds))
}

pub fn day11(input: &str) -> Result<(String, String)> {
    let serial: i64 = input.trim().parse()?;

    // summed-area table over the 300x300 grid, 1-based with a zero border
    let mut sums = vec![[0i64; 301]; 301];
    for y in 1..=300i64 {
        for x in 1..=300i64 {
            let rack = x + 10;
            let power = (rack * y + serial) * rack / 100 % 10 - 5;
            sums[y as usize][x as usize] = power
                + sums[y as usize - 1][x as usize]
                + sums[y as usize][x as usize - 1]
                - sums[y as usize - 1][x as usize - 1];
        }
    }

    let best_square = |size: usize| {
        let mut best = (i64::MIN, 0, 0);
        for y in size..=300 {
            for x in size..=300 {
                let power = sums[y][x] - sums[y - size][x] - sums[y][x - size]
                    + sums[y - size][x - size];
                if power > best.0 {
                    best = (power, x - size + 1, y - size + 1);
                }
            }
        }
        best
    };

    let (_, x, y) = best_square(3);
    let (_, size, x2, y2) = (1..=300usize)
        .into_par_iter()
        .map(|size| {
            let (power, x, y) = best_square(size);
            (power, size, x, y)
        })
        .max()
        .context("grid is never empty")?;
    Ok((format!("{},{}", x, y), format!("{},{},{}", x2, y2, size)))
}

pub fn day12(input: &str) -> Result<(i64, i64)> {
    fn pot_sum(state: &[u8], start: i64) -> i64 {
        state
            .iter()
            .enumerate()
            .filter(|&(_, &pot)| pot == b'#')
            .map(|(i, _)| start + i as i64)
            .sum()
    }

    let (header, rules) = input.split_once("\n\n").context("missing spread rules")?;
    let mut state: Vec<u8> = header
        .strip_prefix("initial state: ")
        .context("malformed header")?
        .trim()
        .bytes()
        .collect();

    let growing: Vec<&str> = rules
        .lines()
        .filter_map(|line| {
            let (pattern, outcome) = line.split_once(" => ")?;
            (outcome == "#").then_some(pattern)
        })
        .collect();
    let rules = AhoCorasick::new(&growing)?;

    // the plants settle into a glider; once the sum grows by the same amount
    // twice in a row, extrapolate the remaining generations
    let mut start = 0i64;
    let mut previous_sum = pot_sum(&state, start);
    let mut part1 = 0;
    let mut increases = (1, 0);
    let mut generation = 0u64;
    while generation < 20 || (increases.0 != increases.1 && generation < 2_000) {
        let first = state.iter().position(|&pot| pot == b'#').context("all plants died")?;
        let last = state.iter().rposition(|&pot| pot == b'#').unwrap();
        let mut padded = vec![b'.'; 4];
        padded.extend_from_slice(&state[first..=last]);
        padded.extend_from_slice(b"....");
        start += first as i64 - 4;

        let mut next = vec![b'.'; padded.len()];
        for growth in rules.find_overlapping_iter(&padded) {
            next[growth.start() + 2] = b'#';
        }
        state = next;
        generation += 1;

        let sum = pot_sum(&state, start);
        increases = (increases.1, sum - previous_sum);
        previous_sum = sum;
        if generation == 20 {
            part1 = sum;
        }
    }
    let part2 = previous_sum + increases.1 * (50_000_000_000 - generation) as i64;
    Ok((part1, part2))
}

pub fn day13(input: &str) -> Result<(String, String)> {
    struct Cart {
        y: usize,
        x: usize,
        direction: u8, // 0 up, 1 right, 2 down, 3 left
        turns: u32,
        dead: bool,
    }

    let mut track: Vec<Vec<u8>> = input.lines().map(|line| line.bytes().collect()).collect();
    let mut carts = vec![];
    for (y, row) in track.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let direction = match *cell {
                b'^' => 0,
                b'>' => 1,
                b'v' => 2,
                b'<' => 3,
                _ => continue,
            };
            *cell = if direction % 2 == 0 { b'|' } else { b'-' };
            carts.push(Cart { y, x, direction, turns: 0, dead: false });
        }
    }

    let mut first_crash = None;
    while carts.len() > 1 {
        carts.sort_unstable_by_key(|cart| (cart.y, cart.x));
        for i in 0..carts.len() {
            if carts[i].dead {
                continue;
            }
            let (mut y, mut x) = (carts[i].y, carts[i].x);
            match carts[i].direction {
                0 => y -= 1,
                1 => x += 1,
                2 => y += 1,
                _ => x -= 1,
            }
            if let Some(j) = carts.iter().position(|c| !c.dead && (c.y, c.x) == (y, x)) {
                carts[i].dead = true;
                carts[j].dead = true;
                first_crash.get_or_insert(format!("{},{}", x, y));
                continue;
            }
            let cart = &mut carts[i];
            cart.y = y;
            cart.x = x;
            match track[y][x] {
                b'/' => {
                    cart.direction = if cart.direction % 2 == 0 {
                        (cart.direction + 1) % 4
                    } else {
                        (cart.direction + 3) % 4
                    };
                }
                b'\\' => {
                    cart.direction = if cart.direction % 2 == 0 {
                        (cart.direction + 3) % 4
                    } else {
                        (cart.direction + 1) % 4
                    };
                }
                b'+' => {
                    cart.direction = match cart.turns % 3 {
                        0 => (cart.direction + 3) % 4,
                        1 => cart.direction,
                        _ => (cart.direction + 1) % 4,
                    };
                    cart.turns += 1;
                }
                _ => {}
            }
        }
        carts.retain(|cart| !cart.dead);
    }

    let part1 = first_crash.context("no collision ever happens")?;
    let part2 = carts
        .first()
        .map(|cart| format!("{},{}", cart.x, cart.y))
        .unwrap_or_else(|| "n/a".into());
    Ok((part1, part2))
}

pub fn day14(input: &str) -> Result<(String, usize)> {
    let input = input.trim();
    let n: usize = input.parse()?;
    let pattern: Vec<u8> = input.bytes().map(|b| b - b'0').collect();

    let mut scores = vec![3u8, 7];
    let (mut elf1, mut elf2) = (0, 1);
    let mut part2 = None;
    while part2.is_none() || scores.len() < n + 10 {
        let sum = scores[elf1] + scores[elf2];
        if sum >= 10 {
            scores.push(sum / 10);
            if part2.is_none() && scores.ends_with(&pattern) {
                part2 = Some(scores.len() - pattern.len());
            }
        }
        scores.push(sum % 10);
        if part2.is_none() && scores.ends_with(&pattern) {
            part2 = Some(scores.len() - pattern.len());
        }
        elf1 = (elf1 + 1 + usize::from(scores[elf1])) % scores.len();
        elf2 = (elf2 + 1 + usize::from(scores[elf2])) % scores.len();
    }
    let part1 = scores[n..n + 10].iter().map(|&digit| char::from(b'0' + digit)).collect();
    Ok((part1, part2.context("pattern never appears")?))
}

pub fn day15(input: &str) -> Result<(i64, i64)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Cell {
        Wall,
        Open,
        Unit { elf: bool, hp: i64, power: i64 },
    }

    #[derive(Clone)]
    struct Battle {
        grid: Vec<Vec<Cell>>,
        elves: usize,
        goblins: usize,
    }

    impl Battle {
        fn parse(input: &str, elf_power: i64) -> Battle {
            let mut elves = 0;
            let mut goblins = 0;
            let grid = input
                .lines()
                .map(|line| {
                    line.bytes()
                        .map(|b| match b {
                            b'E' => {
                                elves += 1;
                                Cell::Unit { elf: true, hp: 200, power: elf_power }
                            }
                            b'G' => {
                                goblins += 1;
                                Cell::Unit { elf: false, hp: 200, power: 3 }
                            }
                            b'#' => Cell::Wall,
                            _ => Cell::Open,
                        })
                        .collect()
                })
                .collect();
            Battle { grid, elves, goblins }
        }

        // One full round in reading order. Returns false if combat ends
        // before every unit got its turn, which doesn't count as a round.
        fn round(&mut self) -> bool {
            if self.elves == 0 || self.goblins == 0 {
                return false;
            }
            let order: Vec<(usize, usize)> = self
                .grid
                .iter()
                .enumerate()
                .flat_map(|(y, row)| {
                    row.iter()
                        .enumerate()
                        .filter_map(move |(x, cell)| {
                            matches!(cell, Cell::Unit { .. }).then_some((y, x))
                        })
                })
                .collect();

            let mut acted = FxHashSet::default();
            for (y, x) in order {
                if acted.contains(&(y, x)) {
                    continue;
                }
                let Cell::Unit { elf, hp, power } = self.grid[y][x] else {
                    continue;
                };
                if (if elf { self.goblins } else { self.elves }) == 0 {
                    return false;
                }
                // attack in place when already adjacent, otherwise take one
                // step towards the nearest enemy and try again
                let position = if self.attack(y, x, elf, power) {
                    (y, x)
                } else if let Some((ny, nx)) = self.step(y, x, elf) {
                    self.grid[ny][nx] = Cell::Unit { elf, hp, power };
                    self.grid[y][x] = Cell::Open;
                    self.attack(ny, nx, elf, power);
                    (ny, nx)
                } else {
                    (y, x)
                };
                acted.insert(position);
            }
            true
        }

        // Hits the adjacent enemy with the fewest hit points, ties in reading
        // order. The maps are wall-bordered so neighbor indices stay in range.
        fn attack(&mut self, y: usize, x: usize, elf: bool, power: i64) -> bool {
            let mut target = None;
            for (ny, nx) in [(y - 1, x), (y, x - 1), (y, x + 1), (y + 1, x)] {
                if let Cell::Unit { elf: other, hp, .. } = self.grid[ny][nx] {
                    if other != elf && target.map_or(true, |(best, _)| hp < best) {
                        target = Some((hp, (ny, nx)));
                    }
                }
            }
            let Some((_, (ny, nx))) = target else {
                return false;
            };
            let dead = if let Cell::Unit { hp, .. } = &mut self.grid[ny][nx] {
                *hp -= power;
                *hp <= 0
            } else {
                false
            };
            if dead {
                self.grid[ny][nx] = Cell::Open;
                if elf {
                    self.goblins -= 1;
                } else {
                    self.elves -= 1;
                }
            }
            true
        }

        // Breadth-first search for the nearest square next to an enemy; ties
        // pick the first such square and then the first step, both in reading
        // order. The heap ordering encodes exactly that priority.
        fn step(&self, y: usize, x: usize, elf: bool) -> Option<(usize, usize)> {
            let neighbors = |y: usize, x: usize| [(y - 1, x), (y, x - 1), (y, x + 1), (y + 1, x)];
            let in_range = |y: usize, x: usize| {
                neighbors(y, x).into_iter().any(|(ny, nx)| {
                    matches!(self.grid[ny][nx], Cell::Unit { elf: other, .. } if other != elf)
                })
            };

            let mut heap = BinaryHeap::new();
            let mut visited = FxHashSet::default();
            visited.insert((y, x));
            for (ny, nx) in neighbors(y, x) {
                if self.grid[ny][nx] == Cell::Open {
                    heap.push(Reverse((1u32, (ny, nx), (ny, nx))));
                }
            }
            while let Some(Reverse((distance, current, start))) = heap.pop() {
                if !visited.insert(current) {
                    continue;
                }
                if in_range(current.0, current.1) {
                    return Some(start);
                }
                for (ny, nx) in neighbors(current.0, current.1) {
                    if self.grid[ny][nx] == Cell::Open && !visited.contains(&(ny, nx)) {
                        heap.push(Reverse((distance + 1, (ny, nx), start)));
                    }
                }
            }
            None
        }
    }

    fn fight(mut battle: Battle) -> (bool, usize, i64) {
        let mut rounds = 0;
        while battle.round() {
            rounds += 1;
        }
        let hp_left: i64 = battle
            .grid
            .iter()
            .flatten()
            .filter_map(|cell| match cell {
                Cell::Unit { hp, .. } => Some(hp),
                _ => None,
            })
            .sum();
        (battle.goblins == 0, battle.elves, rounds * hp_left)
    }

    let initial = Battle::parse(input, 3);
    let elf_count = initial.elves;
    let (_, _, part1) = fight(initial);

    // lowest elf attack power where the elves win without a single loss
    let part2 = (4..)
        .find_map(|power| {
            let (elves_won, elves, score) = fight(Battle::parse(input, power));
            (elves_won && elves == elf_count).then_some(score)
        })
        .context("no attack power spares every elf")?;
    Ok((part1, part2))
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Opcode {
    Addr,
    Addi,
    Mulr,
    Muli,
    Banr,
    Bani,
    Borr,
    Bori,
    Setr,
    Seti,
    Gtir,
    Gtri,
    Gtrr,
    Eqir,
    Eqri,
    Eqrr,
}

const OPCODES: [Opcode; 16] = [
    Opcode::Addr,
    Opcode::Addi,
    Opcode::Mulr,
    Opcode::Muli,
    Opcode::Banr,
    Opcode::Bani,
    Opcode::Borr,
    Opcode::Bori,
    Opcode::Setr,
    Opcode::Seti,
    Opcode::Gtir,
    Opcode::Gtri,
    Opcode::Gtrr,
    Opcode::Eqir,
    Opcode::Eqri,
    Opcode::Eqrr,
];

impl Opcode {
    fn from_name(name: &str) -> Option<Opcode> {
        Some(match name {
            "addr" => Opcode::Addr,
            "addi" => Opcode::Addi,
            "mulr" => Opcode::Mulr,
            "muli" => Opcode::Muli,
            "banr" => Opcode::Banr,
            "bani" => Opcode::Bani,
            "borr" => Opcode::Borr,
            "bori" => Opcode::Bori,
            "setr" => Opcode::Setr,
            "seti" => Opcode::Seti,
            "gtir" => Opcode::Gtir,
            "gtri" => Opcode::Gtri,
            "gtrr" => Opcode::Gtrr,
            "eqir" => Opcode::Eqir,
            "eqri" => Opcode::Eqri,
            "eqrr" => Opcode::Eqrr,
            _ => return None,
        })
    }

    // Value for the target register, or None on an out-of-range register
    // operand.
    fn eval(self, registers: &[i64], a: i64, b: i64) -> Option<i64> {
        let reg = |i: i64| usize::try_from(i).ok().and_then(|i| registers.get(i).copied());
        Some(match self {
            Opcode::Addr => reg(a)? + reg(b)?,
            Opcode::Addi => reg(a)? + b,
            Opcode::Mulr => reg(a)? * reg(b)?,
            Opcode::Muli => reg(a)? * b,
            Opcode::Banr => reg(a)? & reg(b)?,
            Opcode::Bani => reg(a)? & b,
            Opcode::Borr => reg(a)? | reg(b)?,
            Opcode::Bori => reg(a)? | b,
            Opcode::Setr => reg(a)?,
            Opcode::Seti => a,
            Opcode::Gtir => i64::from(a > reg(b)?),
            Opcode::Gtri => i64::from(reg(a)? > b),
            Opcode::Gtrr => i64::from(reg(a)? > reg(b)?),
            Opcode::Eqir => i64::from(a == reg(b)?),
            Opcode::Eqri => i64::from(reg(a)? == b),
            Opcode::Eqrr => i64::from(reg(a)? == reg(b)?),
        })
    }
}

pub fn day16(input: &str) -> Result<(usize, i64)> {
    let mut samples = vec![];
    let mut program = "";
    for block in input.split("\n\n") {
        if block.starts_with("Before:") {
            let n = ints(block);
            ensure!(n.len() == 12, "malformed sample: {}", block);
            samples.push((
                [n[0], n[1], n[2], n[3]],
                [n[4], n[5], n[6], n[7]],
                [n[8], n[9], n[10], n[11]],
            ));
        } else if !block.trim().is_empty() {
            program = block.trim();
        }
    }

    // bitmask over OPCODES of the opcodes consistent with one sample
    let behaves_like = |&(before, instruction, after): &([i64; 4], [i64; 4], [i64; 4])| -> u16 {
        let [_, a, b, c] = instruction;
        let Some(c) = usize::try_from(c).ok().filter(|&c| c < 4) else {
            return 0;
        };
        let mut mask = 0;
        for (i, opcode) in OPCODES.iter().enumerate() {
            if let Some(value) = opcode.eval(&before, a, b) {
                let mut registers = before;
                registers[c] = value;
                if registers == after {
                    mask |= 1 << i;
                }
            }
        }
        mask
    };

    let masks: Vec<u16> = samples.iter().map(behaves_like).collect();
    let part1 = masks.iter().filter(|mask| mask.count_ones() >= 3).count();

    // intersect the candidate sets per opcode number, then peel off numbers
    // that are down to a single candidate
    let mut candidates = [u16::MAX; 16];
    for (sample, mask) in samples.iter().zip(&masks) {
        let number = usize::try_from(sample.1[0])
            .ok()
            .filter(|&number| number < 16)
            .context("bad opcode number")?;
        candidates[number] &= mask;
    }
    let mut assigned: [Option<Opcode>; 16] = [None; 16];
    for _ in 0..16 {
        let number = candidates
            .iter()
            .position(|mask| mask.count_ones() == 1)
            .context("opcode numbering is ambiguous")?;
        let bit = candidates[number].trailing_zeros() as usize;
        assigned[number] = Some(OPCODES[bit]);
        for mask in &mut candidates {
            *mask &= !(1u16 << bit);
        }
    }

    let mut registers = [0i64; 4];
    for line in program.lines() {
        let n = ints(line);
        ensure!(n.len() == 4, "malformed instruction: {}", line);
        let number = usize::try_from(n[0])
            .ok()
            .filter(|&number| number < 16)
            .context("bad opcode number")?;
        let opcode = assigned[number].context("opcode never pinned down")?;
        let value = opcode.eval(&registers, n[1], n[2]).context("register out of range")?;
        let c = usize::try_from(n[3]).ok().filter(|&c| c < 4).context("bad target register")?;
        registers[c] = value;
    }
    Ok((part1, registers[0]))
}

pub fn day17(input: &str) -> Result<(usize, usize)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Tile {
        Sand,
        Clay,
        Flowing,
        Settled,
    }

    // each vein as (x0, x1, y0, y1), either "x=495, y=2..7" or the transpose
    let mut veins = vec![];
    for line in input.lines() {
        let n = ints(line);
        ensure!(n.len() == 3, "malformed clay vein: {}", line);
        if line.starts_with('x') {
            veins.push((n[0], n[0], n[1], n[2]));
        } else {
            veins.push((n[1], n[2], n[0], n[0]));
        }
    }

    // one column of padding so spills over the outermost clay stay in range
    let min_x = veins.iter().map(|v| v.0).min().context("no clay veins")? - 1;
    let max_x = veins.iter().map(|v| v.1).max().unwrap() + 1;
    let min_y = veins.iter().map(|v| v.2).min().unwrap();
    let max_y = veins.iter().map(|v| v.3).max().unwrap();

    let width = usize::try_from(max_x - min_x + 1)?;
    let height = usize::try_from(max_y - min_y + 1)?;
    let mut grid = vec![vec![Tile::Sand; width]; height];
    for &(x0, x1, y0, y1) in &veins {
        for y in y0..=y1 {
            for x in x0..=x1 {
                grid[(y - min_y) as usize][(x - min_x) as usize] = Tile::Clay;
            }
        }
    }

    let spring_x = usize::try_from(500 - min_x).context("spring outside the clay range")?;
    let mut streams = vec![(spring_x, 0usize)];
    while let Some((x, mut y)) = streams.pop() {
        if grid[y][x] == Tile::Flowing {
            continue;
        }
        // fall until clay or settled water
        loop {
            if y >= height || matches!(grid[y][x], Tile::Clay | Tile::Settled) {
                break;
            }
            grid[y][x] = Tile::Flowing;
            y += 1;
        }
        if y >= height || y == 0 {
            continue;
        }
        y -= 1;

        // spread sideways; closed rows settle and push the water level up,
        // open ends spawn new falling streams
        loop {
            let mut left = x;
            while matches!(grid[y + 1][left], Tile::Clay | Tile::Settled)
                && left > 0
                && grid[y][left - 1] != Tile::Clay
            {
                left -= 1;
            }
            let mut right = x;
            while matches!(grid[y + 1][right], Tile::Clay | Tile::Settled)
                && right + 1 < width
                && grid[y][right + 1] != Tile::Clay
            {
                right += 1;
            }

            let left_open = !matches!(grid[y + 1][left], Tile::Clay | Tile::Settled);
            let right_open = !matches!(grid[y + 1][right], Tile::Clay | Tile::Settled);
            if left_open || right_open {
                for x in left..=right {
                    grid[y][x] = Tile::Flowing;
                }
                if left_open {
                    streams.push((left, y + 1));
                }
                if right_open {
                    streams.push((right, y + 1));
                }
                break;
            }
            for x in left..=right {
                grid[y][x] = Tile::Settled;
            }
            if y == 0 {
                break;
            }
            y -= 1;
        }
    }

    let reached = grid
        .iter()
        .flatten()
        .filter(|&&tile| matches!(tile, Tile::Flowing | Tile::Settled))
        .count();
    let settled = grid.iter().flatten().filter(|&&tile| tile == Tile::Settled).count();
    Ok((reached, settled))
}

pub fn day18(input: &str) -> Result<(usize, usize)> {
    let mut area: Vec<Vec<u8>> = input.lines().map(|line| line.bytes().collect()).collect();

    let step = |area: &Vec<Vec<u8>>| -> Vec<Vec<u8>> {
        area.iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, &acre)| {
                        let mut trees = 0;
                        let mut yards = 0;
                        for dy in -1i32..=1 {
                            for dx in -1i32..=1 {
                                if (dy, dx) == (0, 0) {
                                    continue;
                                }
                                let (ny, nx) = (y as i32 + dy, x as i32 + dx);
                                if ny < 0 || nx < 0 {
                                    continue;
                                }
                                let neighbor = area
                                    .get(ny as usize)
                                    .and_then(|row| row.get(nx as usize))
                                    .copied();
                                match neighbor {
                                    Some(b'|') => trees += 1,
                                    Some(b'#') => yards += 1,
                                    _ => {}
                                }
                            }
                        }
                        match acre {
                            b'.' if trees >= 3 => b'|',
                            b'|' if yards >= 3 => b'#',
                            b'#' if yards == 0 || trees == 0 => b'.',
                            other => other,
                        }
                    })
                    .collect()
            })
            .collect()
    };

    let resources = |area: &Vec<Vec<u8>>| {
        let trees = area.iter().flatten().filter(|&&acre| acre == b'|').count();
        let yards = area.iter().flatten().filter(|&&acre| acre == b'#').count();
        trees * yards
    };

    let mut after_ten = area.clone();
    for _ in 0..10 {
        after_ten = step(&after_ten);
    }
    let part1 = resources(&after_ten);

    // the automaton falls into a cycle; detect it and spin the rest forward
    let mut seen: FxHashMap<Vec<Vec<u8>>, usize> = FxHashMap::default();
    let mut minute = 0;
    let part2 = loop {
        if let Some(&previous) = seen.get(&area) {
            let cycle = minute - previous;
            let remaining = (1_000_000_000 - minute) % cycle;
            for _ in 0..remaining {
                area = step(&area);
            }
            break resources(&area);
        }
        seen.insert(area.clone(), minute);
        area = step(&area);
        minute += 1;
    };
    Ok((part1, part2))
}

// Time-travel device programs from days 19 and 21: six registers, one of them
// bound to the instruction pointer.
struct Elfcode {
    ip_register: usize,
    instructions: Vec<(Opcode, i64, i64, usize)>,
}

impl Elfcode {
    fn parse(input: &str) -> Result<Elfcode> {
        let mut lines = input.lines();
        let ip_register = lines
            .next()
            .and_then(|line| line.strip_prefix("#ip "))
            .context("missing #ip header")?
            .parse()?;
        ensure!(ip_register < 6, "instruction pointer register out of range");
        let instructions = lines
            .map(|line| {
                let (name, rest) = line.split_once(' ').context("malformed instruction")?;
                let opcode =
                    Opcode::from_name(name).with_context(|| format!("unknown opcode {}", name))?;
                let n = ints(rest);
                ensure!(n.len() == 3, "malformed instruction: {}", line);
                let c = usize::try_from(n[2])
                    .ok()
                    .filter(|&c| c < 6)
                    .context("bad target register")?;
                Ok((opcode, n[0], n[1], c))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Elfcode { ip_register, instructions })
    }

    // One instruction; false once the pointer leaves the program. The bound
    // register gets the pointer written in before the instruction runs and
    // read back out afterwards.
    fn step(&self, registers: &mut [i64; 6], ip: &mut i64) -> Result<bool> {
        let Some(&(opcode, a, b, c)) =
            usize::try_from(*ip).ok().and_then(|ip| self.instructions.get(ip))
        else {
            return Ok(false);
        };
        registers[self.ip_register] = *ip;
        registers[c] = opcode.eval(registers, a, b).context("register out of range")?;
        *ip = registers[self.ip_register] + 1;
        Ok(true)
    }
}

pub fn day19(input: &str) -> Result<(i64, i64)> {
    let program = Elfcode::parse(input)?;

    let mut registers = [0i64; 6];
    let mut ip = 0;
    while program.step(&mut registers, &mut ip)? {}
    let part1 = registers[0];

    // with r0 = 1 the program computes the divisor sum of a much larger
    // target; let the setup run, take the largest register as the target and
    // do the sum directly
    let mut registers = [0i64; 6];
    registers[0] = 1;
    let mut ip = 0;
    let mut target = 0;
    for _ in 0..1000 {
        if !program.step(&mut registers, &mut ip)? {
            break;
        }
        target = target.max(registers.iter().copied().max().unwrap_or(0));
    }
    let mut part2 = 0;
    let mut divisor = 1;
    while divisor * divisor <= target {
        if target % divisor == 0 {
            part2 += divisor;
            if divisor != target / divisor {
                part2 += target / divisor;
            }
        }
        divisor += 1;
    }
    Ok((part1, part2))
}

pub fn day20(input: &str) -> Result<(u32, usize)> {
    let regex = input
        .trim()
        .strip_prefix('^')
        .and_then(|r| r.strip_suffix('$'))
        .context("route regex must be anchored")?;

    // walk the regex recording a door between every pair of adjacent rooms;
    // branches save the position at the group start and restore it on |
    let mut doors: FxHashMap<(i32, i32), FxHashSet<(i32, i32)>> = FxHashMap::default();
    let mut position = (0, 0);
    let mut saved = vec![];
    for c in regex.chars() {
        match c {
            '(' => saved.push(position),
            '|' => position = *saved.last().context("unmatched | in route regex")?,
            ')' => {
                saved.pop().context("unmatched ) in route regex")?;
            }
            _ => {
                let (x, y) = position;
                let next = match c {
                    'N' => (x, y - 1),
                    'S' => (x, y + 1),
                    'E' => (x + 1, y),
                    'W' => (x - 1, y),
                    _ => bail!("unexpected {:?} in route regex", c),
                };
                doors.entry(position).or_default().insert(next);
                doors.entry(next).or_default().insert(position);
                position = next;
            }
        }
    }

    let mut distances = FxHashMap::default();
    distances.insert((0, 0), 0u32);
    let mut queue = VecDeque::from([(0, 0)]);
    while let Some(room) = queue.pop_front() {
        let distance = distances[&room];
        for &next in doors.get(&room).into_iter().flatten() {
            if !distances.contains_key(&next) {
                distances.insert(next, distance + 1);
                queue.push_back(next);
            }
        }
    }
    let furthest = distances.values().copied().max().unwrap_or(0);
    let far_rooms = distances.values().filter(|&&distance| distance >= 1000).count();
    Ok((furthest, far_rooms))
}

pub fn day21(input: &str) -> Result<(i64, i64)> {
    let program = Elfcode::parse(input)?;

    // the only instruction touching register 0 is an eqrr halt check; watch
    // the compared register there and force the check to fail instead of
    // executing it
    let (watch_ip, watch_register) = program
        .instructions
        .iter()
        .enumerate()
        .find_map(|(ip, &(opcode, a, b, _))| {
            if opcode != Opcode::Eqrr {
                return None;
            }
            if a == 0 {
                Some((ip, usize::try_from(b).ok()?))
            } else if b == 0 {
                Some((ip, usize::try_from(a).ok()?))
            } else {
                None
            }
        })
        .context("no eqrr instruction compares against register 0")?;
    ensure!(watch_register < 6, "watched register out of range");

    let mut registers = [0i64; 6];
    let mut ip = 0;
    let mut seen = FxHashSet::default();
    let mut first = None;
    let mut last = 0;
    loop {
        if usize::try_from(ip).ok() == Some(watch_ip) {
            let value = registers[watch_register];
            first.get_or_insert(value);
            if !seen.insert(value) {
                break;
            }
            last = value;
            // register 0 stays 0, so the comparison always fails; skip it
            let (_, _, _, target) = program.instructions[watch_ip];
            registers[program.ip_register] = ip;
            registers[target] = 0;
            ip += 1;
            continue;
        }
        if !program.step(&mut registers, &mut ip)? {
            break;
        }
    }
    Ok((first.context("the halt check is never reached")?, last))
}

pub fn day22(input: &str) -> Result<(u64, u32)> {
    let numbers = ints(input);
    ensure!(numbers.len() == 3, "expected depth and target coordinates");
    let depth = numbers[0] as u64;
    let (target_x, target_y) = (numbers[1] as usize, numbers[2] as usize);

    // erosion levels for a grid padded past the target; the fastest route
    // never strays further than this
    let width = target_x + 60;
    let height = target_y + 60;
    let mut erosion = vec![vec![0u64; width]; height];
    for y in 0..height {
        for x in 0..width {
            let geologic = if (x, y) == (0, 0) || (x, y) == (target_x, target_y) {
                0
            } else if y == 0 {
                x as u64 * 16807
            } else if x == 0 {
                y as u64 * 48271
            } else {
                erosion[y][x - 1] * erosion[y - 1][x]
            };
            erosion[y][x] = (geologic + depth) % 20183;
        }
    }

    let mut risk = 0;
    for y in 0..=target_y {
        for x in 0..=target_x {
            risk += erosion[y][x] % 3;
        }
    }

    // Dijkstra over (position, tool). Tools are numbered so that the tool
    // equal to a region's type is the one you cannot hold there; the torch
    // is 1.
    let region = |x: usize, y: usize| (erosion[y][x] % 3) as u32;
    let mut best: FxHashMap<(usize, usize, u32), u32> = FxHashMap::default();
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0u32, 0usize, 0usize, 1u32)));
    let part2 = loop {
        let Some(Reverse((minutes, x, y, tool))) = heap.pop() else {
            bail!("the target is unreachable");
        };
        if (x, y, tool) == (target_x, target_y, 1) {
            break minutes;
        }
        let known = best.entry((x, y, tool)).or_insert(u32::MAX);
        if *known <= minutes {
            continue;
        }
        *known = minutes;

        let other = (0..3).find(|&t| t != tool && t != region(x, y)).unwrap_or(tool);
        heap.push(Reverse((minutes + 7, x, y, other)));
        for (nx, ny) in
            [(x.wrapping_sub(1), y), (x + 1, y), (x, y.wrapping_sub(1)), (x, y + 1)]
        {
            if nx < width && ny < height && tool != region(nx, ny) {
                heap.push(Reverse((minutes + 1, nx, ny, tool)));
            }
        }
    };
    Ok((risk, part2))
}

pub fn day23(input: &str) -> Result<(usize, i64)> {
    let bots = input
        .lines()
        .map(|line| {
            let n = ints(line);
            ensure!(n.len() == 4, "malformed nanobot: {}", line);
            Ok(([n[0], n[1], n[2]], n[3]))
        })
        .collect::<Result<Vec<_>>>()?;

    let &(strongest, radius) = bots
        .iter()
        .max_by_key(|&&(_, radius)| radius)
        .context("no nanobots")?;
    let part1 = bots
        .iter()
        .filter(|(position, _)| {
            (0..3).map(|i| (position[i] - strongest[i]).abs()).sum::<i64>() <= radius
        })
        .count();

    // octree search; a cube's bot count only shrinks when split, so the first
    // size-1 cube popped is the best point
    fn box_distance(corner: [i64; 3], size: i64, point: [i64; 3]) -> i64 {
        (0..3)
            .map(|i| {
                let low = corner[i];
                let high = corner[i] + size - 1;
                (low - point[i]).max(point[i] - high).max(0)
            })
            .sum()
    }

    let count = |corner: [i64; 3], size: i64| {
        bots.iter()
            .filter(|&&(position, radius)| box_distance(corner, size, position) <= radius)
            .count()
    };

    let extent = bots
        .iter()
        .flat_map(|&(position, radius)| position.into_iter().map(move |c| c.abs() + radius))
        .max()
        .unwrap_or(1);
    // the start cube spans [-size/2, size/2) and has to reach past +extent
    let mut size = 1;
    while size / 2 <= extent {
        size *= 2;
    }

    let start = [-size / 2; 3];
    let mut heap = BinaryHeap::new();
    heap.push((
        count(start, size),
        Reverse(box_distance(start, size, [0, 0, 0])),
        Reverse(size),
        start,
    ));
    let part2 = loop {
        let Some((_, Reverse(origin_distance), Reverse(size), corner)) = heap.pop() else {
            bail!("search space exhausted");
        };
        if size == 1 {
            break origin_distance;
        }
        let half = size / 2;
        for dz in 0..2 {
            for dy in 0..2 {
                for dx in 0..2 {
                    let sub = [
                        corner[0] + dx * half,
                        corner[1] + dy * half,
                        corner[2] + dz * half,
                    ];
                    heap.push((
                        count(sub, half),
                        Reverse(box_distance(sub, half, [0, 0, 0])),
                        Reverse(half),
                        sub,
                    ));
                }
            }
        }
    };
    Ok((part1, part2))
}

pub fn day24(input: &str) -> Result<(u64, u64)> {
    #[derive(Clone)]
    struct Group {
        units: u64,
        hit_points: u64,
        damage: u64,
        attack: String,
        initiative: u64,
        weaknesses: Vec<String>,
        immunities: Vec<String>,
    }

    impl Group {
        fn power(&self) -> u64 {
            self.units * self.damage
        }

        fn damage_to(&self, defender: &Group) -> u64 {
            if defender.immunities.contains(&self.attack) {
                0
            } else if defender.weaknesses.contains(&self.attack) {
                self.power() * 2
            } else {
                self.power()
            }
        }
    }

    let re = Regex::new(
        r"^(\d+) units each with (\d+) hit points (?:\(([^)]+)\) )?with an attack that does (\d+) (\w+) damage at initiative (\d+)$",
    )?;
    let mut base: [Vec<Group>; 2] = [vec![], vec![]];
    let mut side = 0;
    for line in input.lines() {
        let line = line.trim();
        if line == "Immune System:" {
            side = 0;
        } else if line == "Infection:" {
            side = 1;
        } else if let Some(caps) = re.captures(line) {
            let mut weaknesses = vec![];
            let mut immunities = vec![];
            if let Some(traits) = caps.get(3) {
                for part in traits.as_str().split("; ") {
                    if let Some(kinds) = part.strip_prefix("weak to ") {
                        weaknesses = kinds.split(", ").map(String::from).collect();
                    } else if let Some(kinds) = part.strip_prefix("immune to ") {
                        immunities = kinds.split(", ").map(String::from).collect();
                    }
                }
            }
            base[side].push(Group {
                units: caps[1].parse()?,
                hit_points: caps[2].parse()?,
                damage: caps[4].parse()?,
                attack: caps[5].to_string(),
                initiative: caps[6].parse()?,
                weaknesses,
                immunities,
            });
        }
    }

    enum Outcome {
        Immune(u64),
        Infection(u64),
        Stalemate,
    }

    let fight = |mut armies: [Vec<Group>; 2]| -> Outcome {
        loop {
            if armies[0].is_empty() {
                return Outcome::Infection(armies[1].iter().map(|group| group.units).sum());
            }
            if armies[1].is_empty() {
                return Outcome::Immune(armies[0].iter().map(|group| group.units).sum());
            }

            // target selection, strongest groups choosing first
            let mut choosers: Vec<(usize, usize)> = (0..2)
                .flat_map(|side| (0..armies[side].len()).map(move |i| (side, i)))
                .collect();
            choosers.sort_unstable_by_key(|&(side, i)| {
                Reverse((armies[side][i].power(), armies[side][i].initiative))
            });
            let mut chosen = [FxHashSet::default(), FxHashSet::default()];
            let mut attacks: Vec<((usize, usize), (usize, usize))> = vec![];
            for (side, i) in choosers {
                let attacker = &armies[side][i];
                let enemy = 1 - side;
                let target = (0..armies[enemy].len())
                    .filter(|j| !chosen[enemy].contains(j))
                    .filter(|&j| attacker.damage_to(&armies[enemy][j]) > 0)
                    .max_by_key(|&j| {
                        let defender = &armies[enemy][j];
                        (attacker.damage_to(defender), defender.power(), defender.initiative)
                    });
                if let Some(j) = target {
                    chosen[enemy].insert(j);
                    attacks.push(((side, i), (enemy, j)));
                }
            }

            // attacks land in decreasing initiative; a group wiped out earlier
            // in the round deals no damage
            attacks.sort_unstable_by_key(|&((side, i), _)| Reverse(armies[side][i].initiative));
            let mut killed = 0;
            for ((side, i), (enemy, j)) in attacks {
                if armies[side][i].units == 0 {
                    continue;
                }
                let damage = armies[side][i].damage_to(&armies[enemy][j]);
                let defender = &mut armies[enemy][j];
                let losses = (damage / defender.hit_points).min(defender.units);
                defender.units -= losses;
                killed += losses;
            }
            if killed == 0 {
                return Outcome::Stalemate;
            }
            for army in &mut armies {
                army.retain(|group| group.units > 0);
            }
        }
    };

    let boosted = |boost: u64| {
        let mut armies = base.clone();
        for group in &mut armies[0] {
            group.damage += boost;
        }
        armies
    };

    let part1 = match fight(boosted(0)) {
        Outcome::Immune(units) | Outcome::Infection(units) => units,
        Outcome::Stalemate => bail!("the unboosted fight stalls"),
    };
    let part2 = (1..)
        .find_map(|boost| match fight(boosted(boost)) {
            Outcome::Immune(units) => Some(units),
            _ => None,
        })
        .context("no boost is ever enough")?;
    Ok((part1, part2))
}

pub fn day25(input: &str) -> Result<(usize, &'static str)> {
    let points = input
        .lines()
        .map(|line| {
            let n = ints(line);
            ensure!(n.len() == 4, "malformed spacetime point: {}", line);
            Ok([n[0], n[1], n[2], n[3]])
        })
        .collect::<Result<Vec<_>>>()?;

    let mut union_find = UnionFind::new(points.len());
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            let distance: i64 = (0..4).map(|k| (a[k] - b[k]).abs()).sum();
            if distance <= 3 {
                union_find.union(i, j);
            }
        }
    }
    let constellations = union_find.into_labeling().into_iter().collect::<FxHashSet<_>>().len();
    Ok((constellations, "n/a"))
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
        assert_eq!(execute_day_input(day1, "+1\n-2\n+3\n+1")?, (3, 2));
        assert_eq!(execute_day_input(day1, "+1\n+1\n+1")?.0, 3);
        assert_eq!(execute_day_input(day1, "+1\n-1")?.1, 0);
        assert_eq!(execute_day_input(day1, "+3\n+3\n+4\n-2\n-4")?.1, 10);
        Ok(())
    }

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            abcdef
            bababc
            abbcde
            abcccd
            aabcdd
            abcdee
            ababab
        "};
        assert_eq!(execute_day_input(day2, example)?.0, 12);
        let example = indoc! {"
            abcde
            fghij
            klmno
            pqrst
            fguij
            axcye
            wvxyz
        "};
        assert_eq!(execute_day_input(day2, example)?.1, "fgij");
        Ok(())
    }

    #[test]
    fn test_day3() -> Result<()> {
        let example = indoc! {"
            #1 @ 1,3: 4x4
            #2 @ 3,1: 4x4
            #3 @ 5,5: 2x2
        "};
        assert_eq!(execute_day_input(day3, example)?, (4, 3));
        Ok(())
    }

    #[test]
    fn test_day4() -> Result<()> {
        let example = indoc! {"
            [1518-11-01 00:00] Guard #10 begins shift
            [1518-11-01 00:05] falls asleep
            [1518-11-01 00:25] wakes up
            [1518-11-01 00:30] falls asleep
            [1518-11-01 00:55] wakes up
            [1518-11-01 23:58] Guard #99 begins shift
            [1518-11-02 00:40] falls asleep
            [1518-11-02 00:50] wakes up
            [1518-11-03 00:05] Guard #10 begins shift
            [1518-11-03 00:24] falls asleep
            [1518-11-03 00:29] wakes up
            [1518-11-04 00:02] Guard #99 begins shift
            [1518-11-04 00:36] falls asleep
            [1518-11-04 00:46] wakes up
            [1518-11-05 00:03] Guard #99 begins shift
            [1518-11-05 00:45] falls asleep
            [1518-11-05 00:55] wakes up
        "};
        assert_eq!(execute_day_input(day4, example)?, (240, 4455));
        Ok(())
    }

    #[test]
    fn test_day5() -> Result<()> {
        assert_eq!(execute_day_input(day5, "dabAcCaCBAcCcaDA")?, (10, 4));
        Ok(())
    }

    #[test]
    fn test_day6() -> Result<()> {
        let example = indoc! {"
            1, 1
            1, 6
            8, 3
            3, 4
            5, 5
            8, 9
        "};
        assert_eq!(execute_day_input(day6, example)?.0, 17);
        Ok(())
    }

    #[test]
    fn test_day7() -> Result<()> {
        let example = indoc! {"
            Step C must be finished before step A can begin.
            Step C must be finished before step F can begin.
            Step A must be finished before step B can begin.
            Step A must be finished before step D can begin.
            Step B must be finished before step E can begin.
            Step D must be finished before step E can begin.
            Step F must be finished before step E can begin.
        "};
        assert_eq!(execute_day_input(day7, example)?.0, "CABDFE");
        assert_eq!(schedule(example, 2, 0)?, ("CABDFE".to_string(), 15));
        Ok(())
    }

    #[test]
    fn test_day8() -> Result<()> {
        assert_eq!(execute_day_input(day8, "2 3 0 3 10 11 12 1 1 0 1 99 2 1 1 2")?, (138, 66));
        Ok(())
    }

    #[test]
    fn test_day9() -> Result<()> {
        assert_eq!(execute_day_input(day9, "9 players; last marble is worth 25 points")?.0, 32);
        assert_eq!(marble_game(10, 1618), 8317);
        assert_eq!(marble_game(13, 7999), 146373);
        assert_eq!(marble_game(17, 1104), 2764);
        assert_eq!(marble_game(21, 6111), 54718);
        assert_eq!(marble_game(30, 5807), 37305);
        Ok(())
    }

    #[test]
    fn test_day10() -> Result<()> {
        let example = indoc! {"
            position=< 9,  1> velocity=< 0,  2>
            position=< 7,  0> velocity=<-1,  0>
            position=< 3, -2> velocity=<-1,  1>
            position=< 6, 10> velocity=<-2, -1>
            position=< 2, -4> velocity=< 2,  2>
            position=<-6, 10> velocity=< 2, -2>
            position=< 1,  8> velocity=< 1, -1>
            position=< 1,  7> velocity=< 1,  0>
            position=<-3, 11> velocity=< 1, -2>
            position=< 7,  6> velocity=<-1, -1>
            position=<-2,  3> velocity=< 1,  0>
            position=<-4,  3> velocity=< 2,  0>
            position=<10, -3> velocity=<-1,  1>
            position=< 5, 11> velocity=< 1, -2>
            position=< 4,  7> velocity=< 0, -1>
            position=< 8, -2> velocity=< 0,  1>
            position=<15,  0> velocity=<-2,  0>
            position=< 1,  6> velocity=< 1,  0>
            position=< 8,  9> velocity=< 0, -1>
            position=< 3,  3> velocity=<-1,  1>
            position=< 0,  5> velocity=< 0, -1>
            position=<-2,  2> velocity=< 2,  0>
            position=< 5, -2> velocity=< 1,  2>
            position=< 1,  4> velocity=< 2,  1>
            position=<-2,  7> velocity=< 2, -2>
            position=< 3,  6> velocity=<-1, -1>
            position=< 5,  0> velocity=< 1,  0>
            position=<-6,  0> velocity=< 2,  0>
            position=< 5,  9> velocity=< 1, -2>
            position=<14,  7> velocity=<-2,  0>
            position=<-3,  6> velocity=< 2, -1>
        "};
        let message = indoc! {"
            #...#..###
            #...#...#.
            #...#...#.
            #####...#.
            #...#...#.
            #...#...#.
            #...#...#.
            #...#..###
        "};
        let (grid, seconds) = execute_day_input(day10, example)?;
        assert_eq!(grid, message.trim_end());
        assert_eq!(seconds, 3);
        Ok(())
    }

    #[test]
    fn test_day11() -> Result<()> {
        assert_eq!(execute_day_input(day11, "18")?, ("33,45".to_string(), "90,269,16".to_string()));
        Ok(())
    }

    #[test]
    fn test_day12() -> Result<()> {
        let example = indoc! {"
            initial state: #..#.#..##......###...###

            ...## => #
            ..#.. => #
            .#... => #
            .#.#. => #
            .#.## => #
            .##.. => #
            .#### => #
            #.#.# => #
            #.### => #
            ##.#. => #
            ##.## => #
            ###.. => #
            ###.# => #
            ####. => #
        "};
        assert_eq!(execute_day_input(day12, example)?.0, 325);
        Ok(())
    }

    #[test]
    fn test_day13() -> Result<()> {
        let example = indoc! {r"
            /->-\
            |   |  /----\
            | /-+--+-\  |
            | | |  | v  |
            \-+-/  \-+--/
              \------/
        "};
        assert_eq!(execute_day_input(day13, example)?.0, "7,3");
        let example = indoc! {r"
            />-<\
            |   |
            | /<+-\
            | | | v
            \>+</ |
              |   ^
              \<->/
        "};
        assert_eq!(execute_day_input(day13, example)?.1, "6,4");
        Ok(())
    }

    #[test]
    fn test_day14() -> Result<()> {
        assert_eq!(execute_day_input(day14, "9")?.0, "5158916779");
        assert_eq!(execute_day_input(day14, "5")?.0, "0124515891");
        assert_eq!(execute_day_input(day14, "18")?.0, "9251071085");
        assert_eq!(execute_day_input(day14, "2018")?.0, "5941429882");
        assert_eq!(execute_day_input(day14, "51589")?.1, 9);
        assert_eq!(execute_day_input(day14, "01245")?.1, 5);
        assert_eq!(execute_day_input(day14, "92510")?.1, 18);
        assert_eq!(execute_day_input(day14, "59414")?.1, 2018);
        Ok(())
    }

    #[test]
    fn test_day15() -> Result<()> {
        let example = indoc! {"
            #######
            #.G...#
            #...EG#
            #.#.#G#
            #..G#E#
            #.....#
            #######
        "};
        assert_eq!(execute_day_input(day15, example)?, (27730, 4988));
        let example = indoc! {"
            #######
            #E..EG#
            #.#G.E#
            #E.##E#
            #G..#.#
            #..E#.#
            #######
        "};
        assert_eq!(execute_day_input(day15, example)?, (39514, 31284));
        Ok(())
    }

    #[test]
    fn test_day16() {
        // the sample from the puzzle text behaves like mulr, addi and seti
        let before = [3, 2, 1, 1];
        let after = [3, 2, 2, 1];
        let matching = OPCODES
            .iter()
            .filter(|opcode| {
                opcode.eval(&before, 2, 1).map_or(false, |value| {
                    let mut registers = before;
                    registers[2] = value;
                    registers == after
                })
            })
            .count();
        assert_eq!(matching, 3);
    }

    #[test]
    fn test_day17() -> Result<()> {
        let example = indoc! {"
            x=495, y=2..7
            y=7, x=495..501
            x=501, y=3..7
            x=498, y=2..4
            x=506, y=1..2
            x=498, y=10..13
            x=504, y=10..13
            y=13, x=498..504
        "};
        assert_eq!(execute_day_input(day17, example)?, (57, 29));
        Ok(())
    }

    #[test]
    fn test_day18() -> Result<()> {
        let example = indoc! {"
            .#.#...|#.
            .....#|##|
            .|..|...#.
            ..|#.....#
            #.#|||#|#|
            ...#.||...
            .|....|...
            ||...#|.#|
            |.||||..|.
            ...#.|..|.
        "};
        assert_eq!(execute_day_input(day18, example)?.0, 1147);
        Ok(())
    }

    #[test]
    fn test_day19() -> Result<()> {
        let example = indoc! {"
            #ip 0
            seti 5 0 1
            seti 6 0 2
            addi 0 1 0
            addr 1 2 3
            setr 1 0 0
            seti 8 0 4
            seti 9 0 5
        "};
        assert_eq!(execute_day_input(day19, example)?.0, 6);
        Ok(())
    }

    #[test]
    fn test_day20() -> Result<()> {
        assert_eq!(execute_day_input(day20, "^WNE$")?, (3, 0));
        assert_eq!(execute_day_input(day20, "^ENWWW(NEEE|SSE(EE|N))$")?.0, 10);
        assert_eq!(execute_day_input(day20, "^ENNWSWW(NEWS|)SSSEEN(WNSE|)EE(SWEN|)NNN$")?.0, 18);
        assert_eq!(
            execute_day_input(day20, "^ESSWWN(E|NNENN(EESS(WNSE|)SSS|WWWSSSSE(SW|NNNE)))$")?.0,
            23
        );
        assert_eq!(
            execute_day_input(
                day20,
                "^WSSEESWWWNW(S|NENNEEEENN(ESSSSW(NWSW|SSEN)|WSWWN(E|WWS(E|SS))))$"
            )?
            .0,
            31
        );
        Ok(())
    }

    #[test]
    fn test_day21() -> Result<()> {
        // the watched register at the halt check runs 3, 5, 3, ...
        let program = indoc! {"
            #ip 5
            seti 3 0 1
            eqrr 1 0 4
            addr 4 5 5
            seti 4 0 5
            seti 11 0 5
            eqri 1 3 4
            addr 4 5 5
            seti 9 0 5
            seti 5 0 1
            seti 0 0 5
            seti 3 0 1
            seti 0 0 5
        "};
        assert_eq!(execute_day_input(day21, program)?, (3, 5));
        Ok(())
    }

    #[test]
    fn test_day22() -> Result<()> {
        assert_eq!(execute_day_input(day22, "depth: 510\ntarget: 10,10")?, (114, 45));
        Ok(())
    }

    #[test]
    fn test_day23() -> Result<()> {
        let example = indoc! {"
            pos=<0,0,0>, r=4
            pos=<1,0,0>, r=1
            pos=<4,0,0>, r=3
            pos=<0,2,0>, r=1
            pos=<0,5,0>, r=3
            pos=<0,0,3>, r=1
            pos=<1,1,1>, r=1
            pos=<1,1,2>, r=1
            pos=<1,3,1>, r=1
        "};
        assert_eq!(execute_day_input(day23, example)?.0, 7);
        let example = indoc! {"
            pos=<10,12,12>, r=2
            pos=<12,14,12>, r=2
            pos=<16,12,12>, r=4
            pos=<14,14,14>, r=6
            pos=<50,50,50>, r=200
            pos=<10,10,10>, r=5
        "};
        assert_eq!(execute_day_input(day23, example)?.1, 36);
        // bot sitting exactly on the power-of-two search extent
        assert_eq!(execute_day_input(day23, "pos=<4,0,0>, r=0")?, (1, 4));
        Ok(())
    }

    #[test]
    fn test_day24() -> Result<()> {
        let example = indoc! {"
            Immune System:
            17 units each with 5390 hit points (weak to radiation, bludgeoning) with an attack that does 4507 fire damage at initiative 2
            989 units each with 1274 hit points (immune to fire; weak to bludgeoning, slashing) with an attack that does 25 slashing damage at initiative 3

            Infection:
            801 units each with 4706 hit points (weak to radiation) with an attack that does 116 bludgeoning damage at initiative 1
            4485 units each with 2961 hit points (immune to radiation; weak to fire, cold) with an attack that does 12 slashing damage at initiative 4
        "};
        assert_eq!(execute_day_input(day24, example)?, (5216, 51));
        Ok(())
    }

    #[test]
    fn test_day25() -> Result<()> {
        let example = indoc! {"
            0,0,0,0
            3,0,0,0
            0,3,0,0
            0,0,3,0
            0,0,0,3
            0,0,0,6
            9,0,0,0
            12,0,0,0
        "};
        assert_eq!(execute_day_input(day25, example)?.0, 2);
        let example = indoc! {"
            -1,2,2,0
            0,0,2,-2
            0,0,0,-2
            -1,2,0,0
            -2,-2,-2,2
            3,0,2,-1
            -1,3,2,2
            -1,0,-1,0
            0,2,1,-2
            3,0,0,0
        "};
        assert_eq!(execute_day_input(day25, example)?.0, 4);
        let example = indoc! {"
            1,-1,0,1
            2,0,-1,0
            3,2,-1,0
            0,0,3,1
            0,0,-1,-1
            2,3,-2,0
            -2,2,0,0
            2,-2,0,-1
            1,-1,0,-1
            3,2,0,2
        "};
        assert_eq!(execute_day_input(day25, example)?.0, 3);
        let example = indoc! {"
            1,-1,-1,-2
            -2,-2,0,1
            0,2,1,3
            -2,3,-2,1
            0,2,3,-2
            -1,-1,1,-2
            0,-2,-1,0
            -2,2,3,-1
            1,2,2,0
            -1,-2,0,-2
        "};
        assert_eq!(execute_day_input(day25, example)?.0, 8);
        Ok(())
    }
}
