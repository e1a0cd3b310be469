//! Day 1: Trebuchet?!
//!
//! Recover calibration values from the first and last digit of each line,
//! where part two also accepts digits spelled out with letters.

use lib::prelude::*;
use log::debug;

/// Solve both parts, returning the sum of calibration values using only
/// numeric digits and then using spelled-out digits as well.
pub fn solve(mut input: IStr) -> Result<(u32, u32)> {
    let mut o1 = 0;
    let mut o2 = 0;

    while let Some(line) = input.try_line::<&[u8]>()? {
        let (a, b) = (calibration(line, false), calibration(line, true));

        if b == 0 {
            debug!("no digits in {:?}", line.as_bstr());
        }

        o1 += a;
        o2 += b;
    }

    Ok((o1, o2))
}

/// Calibration value of a single line, `0` if it contains no digits.
pub fn calibration(line: &[u8], spelled: bool) -> u32 {
    let mut digits = (0..line.len()).filter_map(|at| digit(&line[at..], spelled));

    let Some(first) = digits.next() else {
        return 0;
    };

    let last = digits.last().unwrap_or(first);
    first * 10 + last
}

/// The digit at the start of `rest`, if there is one.
///
/// Spelled-out digits may share letters with their neighbours, as in
/// `eightwo`, so callers probe every offset rather than skipping past a match.
fn digit(rest: &[u8], spelled: bool) -> Option<u32> {
    if let [d @ b'0'..=b'9', ..] = rest {
        return Some(u32::from(*d - b'0'));
    }

    if !spelled {
        return None;
    }

    let d = match rest {
        [b'o', b'n', b'e', ..] => 1,
        [b't', b'w', b'o', ..] => 2,
        [b't', b'h', b'r', b'e', b'e', ..] => 3,
        [b'f', b'o', b'u', b'r', ..] => 4,
        [b'f', b'i', b'v', b'e', ..] => 5,
        [b's', b'i', b'x', ..] => 6,
        [b's', b'e', b'v', b'e', b'n', ..] => 7,
        [b'e', b'i', b'g', b'h', b't', ..] => 8,
        [b'n', b'i', b'n', b'e', ..] => 9,
        _ => return None,
    };

    Some(d)
}
