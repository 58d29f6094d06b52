//! Interactive collection of ring parameters.
//!
//! Each numeric answer that cannot be parsed, or is out of range, falls back
//! to a default: 10 nodes, a budget of 6 hops, the last node as recipient.

use crate::config::{default_nodes, default_ttl};
use crate::driver::RingParams;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Ask for the four ring parameters. The result always validates.
pub fn prompt_params<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<RingParams> {
    let node_count = ask_number(
        &mut input,
        &mut output,
        "Number of nodes",
        |n: &usize| *n >= 1,
        default_nodes(),
    )?;

    let initial_ttl = ask_number(
        &mut input,
        &mut output,
        "Token hop budget",
        |_: &i64| true,
        default_ttl(),
    )?;

    let recipient_id = ask_number(
        &mut input,
        &mut output,
        "Recipient node id",
        |id: &usize| *id < node_count,
        node_count - 1,
    )?;

    writeln!(output, "Message to send:")?;
    let message = read_answer(&mut input)?;

    Ok(RingParams {
        node_count,
        initial_ttl,
        recipient_id,
        message,
    })
}

fn ask_number<T, R, W>(
    input: &mut R,
    output: &mut W,
    question: &str,
    accept: impl Fn(&T) -> bool,
    default: T,
) -> io::Result<T>
where
    T: FromStr + Display,
    R: BufRead,
    W: Write,
{
    write!(output, "{question}: ")?;
    output.flush()?;

    let answer = read_answer(input)?;
    let value = match answer.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            writeln!(output, "Could not use '{}', using the default.", answer.trim())?;
            default
        }
    };
    writeln!(output, "{question}: {value}")?;
    Ok(value)
}

/// Read one line without its line ending. End of input reads as empty.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(answers: &str) -> RingParams {
        let mut output = Vec::new();
        prompt_params(Cursor::new(answers), &mut output).unwrap()
    }

    #[test]
    fn test_valid_answers() {
        let params = prompt("3\n6\n2\nhi there\n");
        assert_eq!(
            params,
            RingParams {
                node_count: 3,
                initial_ttl: 6,
                recipient_id: 2,
                message: "hi there".to_string(),
            }
        );
    }

    #[test]
    fn test_unparsable_answers_use_defaults() {
        let params = prompt("many\nlots\nsomeone\n\n");
        assert_eq!(params.node_count, 10);
        assert_eq!(params.initial_ttl, 6);
        assert_eq!(params.recipient_id, 9);
        assert_eq!(params.message, "");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_budget_is_kept() {
        let params = prompt("3\n-1\n2\nhi\n");
        assert_eq!(params.initial_ttl, -1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_nodes_uses_default() {
        let params = prompt("0\n1\n0\nx\n");
        assert_eq!(params.node_count, 10);
        assert_eq!(params.recipient_id, 0);
    }

    #[test]
    fn test_recipient_outside_ring_uses_last_node() {
        let params = prompt("4\n2\n4\nmsg\r\n");
        assert_eq!(params.recipient_id, 3);
        assert_eq!(params.message, "msg");
    }

    #[test]
    fn test_end_of_input() {
        let params = prompt("");
        assert_eq!(params.node_count, 10);
        assert_eq!(params.message, "");
    }

    #[test]
    fn test_echoes_chosen_values() {
        let mut output = Vec::new();
        prompt_params(Cursor::new("2\nlots\n1\nhey\n"), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Number of nodes: 2"));
        assert!(output.contains("Could not use 'lots', using the default."));
        assert!(output.contains("Token hop budget: 6"));
    }
}
