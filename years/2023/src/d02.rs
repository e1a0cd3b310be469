//! Day 2: Cube Conundrum
//!
//! Each record lists the cubes revealed from a bag over several rounds. Part
//! one sums the ids of games possible with a known bag, part two sums the
//! "power" of the smallest bag each game could have been played with.

use core::ops::Index;

use lib::prelude::*;
use log::debug;
use regex::Regex;

/// The bag games in part one are checked against.
const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

/// Color of a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    fn parse(color: &str) -> Option<Self> {
        match color {
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            _ => None,
        }
    }
}

/// A number of cubes per color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cubes {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Cubes {
    /// Raise the count of the given color to at least `count`.
    fn raise(&mut self, color: Color, count: u32) {
        let c = match color {
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Blue => &mut self.blue,
        };

        *c = (*c).max(count);
    }

    /// Test if every count fits within `bag`.
    pub fn fits(&self, bag: &Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    /// The product of all counts, or `None` if it doesn't fit in a `u64`.
    pub fn power(&self) -> Option<u64> {
        u64::from(self.red)
            .checked_mul(u64::from(self.green))?
            .checked_mul(u64::from(self.blue))
    }
}

impl Index<Color> for Cubes {
    type Output = u32;

    #[inline]
    fn index(&self, color: Color) -> &Self::Output {
        match color {
            Color::Red => &self.red,
            Color::Green => &self.green,
            Color::Blue => &self.blue,
        }
    }
}

/// A single game record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: u32,
    /// Cubes revealed in each round.
    pub rounds: Vec<Cubes>,
}

impl Game {
    /// The fewest cubes of each color the game could have been played with.
    pub fn minimum(&self) -> Cubes {
        let mut cubes = Cubes::default();

        for round in &self.rounds {
            for color in [Color::Red, Color::Green, Color::Blue] {
                cubes.raise(color, round[color]);
            }
        }

        cubes
    }
}

/// Parser for game records.
pub struct Parser {
    header: Regex,
    pull: Regex,
}

impl Parser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            header: Regex::new(r"^Game\s+(\d+):")?,
            pull: Regex::new(r"(\d+)\s+(\w+)")?,
        })
    }

    /// Parse a single `Game <id>: <n> <color>, ...; ...` record.
    pub fn parse(&self, line: &str) -> Result<Game> {
        let header = self
            .header
            .captures(line)
            .with_context(|| anyhow!("missing game header in {line:?}"))?;

        let id = header[1].parse::<u32>()?;
        let rest = &line[header[0].len()..];

        let mut rounds = Vec::new();

        for part in rest.split(';') {
            let mut round = Cubes::default();

            for pull in self.pull.captures_iter(part) {
                let count = pull[1].parse::<u32>()?;

                let Some(color) = Color::parse(&pull[2]) else {
                    bail!("game {id}: unknown color `{}`", &pull[2]);
                };

                round.raise(color, count);
            }

            rounds.push(round);
        }

        Ok(Game { id, rounds })
    }
}

/// Solve both parts, returning the sum of ids of games possible with [BAG]
/// and the sum of the power of each game's minimum bag.
pub fn solve(mut input: IStr) -> Result<(u64, u64)> {
    let parser = Parser::new()?;

    let mut o1 = 0u64;
    let mut o2 = 0u64;

    while let Some(line) = input.try_line::<IStr>()? {
        let text = line.as_str()?;

        if text.trim().is_empty() {
            continue;
        }

        let game = parser.parse(text).map_err(|e| line.error(e))?;
        let minimum = game.minimum();

        if minimum.fits(&BAG) {
            o1 += u64::from(game.id);
        } else {
            debug!("game {} is impossible, needs {minimum:?}", game.id);
        }

        let power = minimum
            .power()
            .and_then(|power| o2.checked_add(power))
            .ok_or_else(|| line.error(anyhow!("game {}: power overflows", game.id)))?;

        o2 = power;
    }

    Ok((o1, o2))
}
