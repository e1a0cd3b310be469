//! Day 3: Gear Ratios
//!
//! The input is an engine schematic: a grid of numbers, symbols and blanks.
//! Numbers touching a symbol, including diagonally, are part numbers. A `*`
//! touching exactly two numbers is a gear whose ratio is their product.

use core::ops::Range;
use std::collections::HashMap;

use lib::prelude::*;
use log::debug;

/// The kind of a single cell in the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single digit of a number.
    Digit(u8),
    /// Any punctuation other than `.` and `_`.
    Symbol(u8),
    /// Everything else.
    Blank,
}

impl Token {
    /// Classify a single byte of the schematic.
    ///
    /// Bytes outside of ASCII are blank.
    #[inline]
    pub fn classify(b: u8) -> Self {
        match b {
            b'0'..=b'9' => Token::Digit(b - b'0'),
            b'.' | b'_' => Token::Blank,
            b if b.is_ascii_punctuation() => Token::Symbol(b),
            _ => Token::Blank,
        }
    }
}

/// A number in the schematic, spanning `columns` on `row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number {
    pub value: u32,
    pub row: usize,
    pub columns: Range<usize>,
}

/// Numbers touching a potential gear. Only the first two are kept since a
/// gear needs exactly two.
#[derive(Debug, Default)]
struct Gear {
    count: usize,
    numbers: ArrayVec<u32, 2>,
}

impl Gear {
    fn push(&mut self, value: u32) {
        self.count += 1;
        let _ = self.numbers.try_push(value);
    }

    /// The ratio of the gear, if it is one.
    fn ratio(&self) -> Option<u64> {
        match (self.count, &self.numbers[..]) {
            (2, &[a, b]) => Some(u64::from(a) * u64::from(b)),
            _ => None,
        }
    }
}

/// Totals produced by scanning a schematic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    /// Sum of all part numbers.
    pub parts: u64,
    /// Sum of all gear ratios.
    pub ratios: u64,
}

/// A parsed engine schematic.
pub struct Schematic {
    grid: Grid<'static, u8>,
    numbers: Vec<Number>,
}

impl Schematic {
    /// Parse a schematic, every row of which must be as wide as the first.
    pub fn new(input: IStr) -> Result<Self> {
        let mut lines = input;
        let mut columns = None;
        let mut numbers = Vec::new();

        for (y, line) in lines.lines::<IStr>().enumerate() {
            let line = line?;

            let width = *columns.get_or_insert(line.len());

            if width == 0 {
                return Err(line.error(anyhow!("empty row")).into());
            }

            if line.len() != width {
                let error = anyhow!("row is {} wide, expected {width}", line.len());
                return Err(line.error(error).into());
            }

            let cells = line.as_data();
            let mut x = 0;

            while x < cells.len() {
                let start = x;
                let mut value = 0u32;

                while let Some(&c) = cells.get(x) {
                    let Token::Digit(d) = Token::classify(c) else {
                        break;
                    };

                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u32::from(d)))
                        .ok_or_else(|| {
                            line.error(anyhow!("number at column {} is too large", start + 1))
                        })?;

                    x += 1;
                }

                if x == start {
                    x += 1;
                    continue;
                }

                numbers.push(Number {
                    value,
                    row: y,
                    columns: start..x,
                });
            }
        }

        let Some(columns) = columns else {
            bail!("empty schematic");
        };

        let grid = input.as_data().as_grid_with_stride(columns, 1);
        Ok(Self { grid, numbers })
    }

    /// All numbers in reading order.
    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    /// Symbols adjacent to the given number, as `(row, column, symbol)`.
    pub fn symbols_around<'a>(
        &'a self,
        number: &Number,
    ) -> impl Iterator<Item = (usize, usize, u8)> + 'a {
        self.grid
            .around(number.row, number.columns.clone())
            .filter_map(|(y, x, &c)| match Token::classify(c) {
                Token::Symbol(s) => Some((y, x, s)),
                _ => None,
            })
    }

    /// Scan every number for adjacent symbols and gears.
    pub fn scan(&self) -> Scan {
        let mut scan = Scan::default();
        let mut gears = HashMap::<(usize, usize), Gear>::new();

        for number in &self.numbers {
            let mut is_part = false;

            for (y, x, symbol) in self.symbols_around(number) {
                is_part = true;

                if symbol == b'*' {
                    gears.entry((y, x)).or_default().push(number.value);
                }
            }

            if is_part {
                scan.parts += u64::from(number.value);
            }
        }

        for ((y, x), gear) in gears {
            if let Some(ratio) = gear.ratio() {
                debug!("gear at {y}:{x} has ratio {ratio}");
                scan.ratios += ratio;
            }
        }

        scan
    }
}

/// Solve both parts, returning the sum of part numbers and the sum of gear
/// ratios.
pub fn solve(input: IStr) -> Result<(u64, u64)> {
    let scan = Schematic::new(input)?.scan();
    Ok((scan.parts, scan.ratios))
}

#[cfg(test)]
mod tests {
    use super::{solve, Number, Schematic, Token};
    use crate::examples::{example, istr};

    #[test]
    fn test_example() {
        assert_eq!(solve(example!("d03.txt")).unwrap(), (4361, 467835));
    }

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify(b'7'), Token::Digit(7));
        assert_eq!(Token::classify(b'.'), Token::Blank);
        assert_eq!(Token::classify(b'*'), Token::Symbol(b'*'));
        assert_eq!(Token::classify(b'#'), Token::Symbol(b'#'));
        assert_eq!(Token::classify(b'_'), Token::Blank);
        assert_eq!(Token::classify(b'a'), Token::Blank);
        assert_eq!(Token::classify(0xc3), Token::Blank);
    }

    #[test]
    fn test_numbers() {
        let schematic = Schematic::new(example!("d03.txt")).unwrap();
        let numbers = schematic.numbers();
        assert_eq!(numbers.len(), 10);
        assert_eq!(
            numbers[0],
            Number {
                value: 467,
                row: 0,
                columns: 0..3
            }
        );
        assert_eq!(
            numbers[9],
            Number {
                value: 598,
                row: 9,
                columns: 5..8
            }
        );
    }

    #[test]
    fn test_numbers_at_edges() {
        let schematic = Schematic::new(istr(b"12.\n..#\n-99")).unwrap();
        let values = schematic
            .numbers()
            .iter()
            .map(|n| n.value)
            .collect::<Vec<_>>();
        assert_eq!(values, [12, 99]);
        assert_eq!(solve(istr(b"12.\n..#\n-99")).unwrap(), (111, 0));
    }

    #[test]
    fn test_gear_needs_exactly_two_numbers() {
        let one = b"....\n.*..\n..5.\n";
        assert_eq!(solve(istr(one)).unwrap(), (5, 0));

        let two = b"2...\n.*..\n..5.\n";
        assert_eq!(solve(istr(two)).unwrap(), (7, 10));

        let three = b"2.3.\n.*..\n..5.\n";
        assert_eq!(solve(istr(three)).unwrap(), (10, 0));
    }

    #[test]
    fn test_number_counts_toward_every_gear() {
        assert_eq!(solve(istr(b"1*2*3\n")).unwrap(), (6, 8));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let input = istr(b"...\n..\n...\n");
        let error = Schematic::new(input).err().unwrap();
        let error = lib::cli::error_context("inputs/d03.txt", input, error);
        assert_eq!(
            format!("{error:#}"),
            "inputs/d03.txt:2:1-2: row is 2 wide, expected 3"
        );

        assert!(Schematic::new(istr(b"")).is_err());
        assert!(Schematic::new(istr(b"\n...\n")).is_err());
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert_eq!(solve(istr(b"1.\n.#")).unwrap(), (1, 0));
    }

    #[test]
    fn test_crowded_gears_do_not_overflow() {
        let input = istr(b"1000000.1000000\n.......*.......\n1000000.1000000\n");
        assert_eq!(solve(input).unwrap(), (4000000, 0));

        let input = istr(b"4000000000*4000000000\n");
        assert_eq!(solve(input).unwrap(), (8000000000, 16000000000000000000));
    }
}
