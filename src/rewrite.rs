// src/rewrite.rs
//! Numbered-option parsing and interactive selection for rewrite mode.

#![deny(missing_docs)]

use crate::error::TypofixResult;
use std::io::{BufRead, Write};

/// Collect the options of a numbered list (`"<digits>. <text>"` per line).
///
/// Lines that don't look like list items are skipped, so stray prose from
/// the model does not break parsing.
pub fn parse_options(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .filter_map(|line| {
            let (number, rest) = line.split_once('.')?;
            let number = number.trim();
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                Some(rest.trim().to_string())
            } else {
                None
            }
        })
        .collect()
}

/// The option for a 1-based `choice`, or `None` when out of range.
pub fn select(options: &[String], choice: i64) -> Option<&str> {
    let index = usize::try_from(choice).ok()?.checked_sub(1)?;
    options.get(index).map(String::as_str)
}

/// Ask for an option number until an integer is entered.
///
/// Returns `None` when `input` is exhausted before a number is read.
pub fn prompt_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    count: usize,
) -> TypofixResult<Option<i64>> {
    loop {
        write!(output, "Select an option (1-{count}): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }
        match answer.parse::<i64>() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => writeln!(output, "Error: '{answer}' is not a valid integer.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_numbered_lines() {
        assert_eq!(parse_options("1. Alpha\n2. Beta"), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn skips_prose_and_keeps_dots_in_text() {
        let text = "Here you go:\n\n 1. First. With dot.\n2.Second\nv2. nope\n. empty number\n10. Tenth";
        assert_eq!(
            parse_options(text),
            vec!["First. With dot.", "Second", "Tenth"]
        );
    }

    #[test]
    fn nothing_to_parse() {
        assert!(parse_options("Suggestion: This is a test suggestion.").is_empty());
        assert!(parse_options("").is_empty());
    }

    #[test]
    fn selection_range() {
        let options = parse_options("1. Alpha\n2. Beta");
        assert_eq!(select(&options, 1), Some("Alpha"));
        assert_eq!(select(&options, 2), Some("Beta"));
        assert_eq!(select(&options, 3), None);
        assert_eq!(select(&options, 0), None);
        assert_eq!(select(&options, -1), None);
    }

    #[test]
    fn prompt_retries_until_integer() {
        let mut input = Cursor::new("abc\n\n 2 \n");
        let mut output = Vec::new();
        let choice = prompt_selection(&mut input, &mut output, 3).unwrap();
        assert_eq!(choice, Some(2));
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Select an option (1-3): ").count(), 3);
        assert!(shown.contains("Error: 'abc' is not a valid integer."));
    }

    #[test]
    fn prompt_gives_up_at_end_of_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(prompt_selection(&mut input, &mut output, 2).unwrap(), None);
    }
}
