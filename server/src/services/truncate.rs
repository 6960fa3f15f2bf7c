//! History truncation — keep the newest lines of a serialized conversation.
//!
//! DESIGN
//! ======
//! The prompt is a newline-joined log of `User:` / `Chiku:` lines. When it is
//! longer than the budget, lines are taken from the end while the running
//! total of `line length + 1` (the separator) stays within budget. The first
//! line that would overflow stops the scan, so the result is always a
//! contiguous suffix. If the final line alone does not fit, nothing is kept.
//!
//! Lengths are counted in `char`s, not bytes.

use std::borrow::Cow;

#[cfg(test)]
#[path = "truncate_test.rs"]
mod tests;

/// Truncate `message` to at most `budget` characters, dropping the oldest
/// lines first. Returns the input unchanged when it already fits.
#[must_use]
pub fn truncate_history(message: &str, budget: usize) -> Cow<'_, str> {
    if message.chars().count() <= budget {
        return Cow::Borrowed(message);
    }

    let lines: Vec<&str> = message.split('\n').collect();
    let mut used = 0usize;
    let mut first_kept = lines.len();

    for (idx, line) in lines.iter().enumerate().rev() {
        let cost = line.chars().count() + 1;
        if used + cost > budget {
            break;
        }
        used += cost;
        first_kept = idx;
    }

    Cow::Owned(lines[first_kept..].join("\n"))
}
