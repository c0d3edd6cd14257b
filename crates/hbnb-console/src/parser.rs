//! Line classification and the verb-form grammar.
//!
//! The leading run of identifier characters (`[A-Za-z0-9_]`) is the command
//! word. A known command word selects the verb form; otherwise a line
//! containing `.` is handed to the [dotted](crate::dotted) grammar.

use crate::dotted;
use crate::request::{Line, Request, Updates, Verb};

/// Classify and parse one console line.
pub fn parse_line(line: &str) -> Line {
    let line = line.trim();
    if line.is_empty() {
        return Line::Empty;
    }
    if let Some(topic) = line.strip_prefix('?') {
        return Line::Help(first_token(topic));
    }

    let word_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    let (word, rest) = line.split_at(word_end);

    match word {
        "quit" => Line::Quit,
        "EOF" => Line::Eof,
        "help" => Line::Help(first_token(rest)),
        _ => match Verb::from_name(word) {
            Some(verb) => Line::Request(parse_verb_form(verb, rest)),
            None if line.contains('.') => dotted::parse(line),
            None => Line::Unknown(line.to_string()),
        },
    }
}

/// Parse the arguments following a verb: `[<Type>] [<id>] [<name>] [<value...>]`.
///
/// Only `update` looks past the identity. Its value is everything after the
/// attribute name, so it may contain spaces; surrounding double quotes are
/// stripped from both name and value.
pub fn parse_verb_form(verb: Verb, args: &str) -> Request {
    let [type_name, id, name, value] = split_max::<4>(args);
    let mut request = Request::new(verb);
    request.type_name = type_name.map(str::to_string);
    request.id = id.map(str::to_string);

    if verb == Verb::Update {
        request.updates = match (name.map(unquote), value.map(unquote)) {
            (None, _) => Updates::Missing,
            (Some(name), _) if name.is_empty() => Updates::Missing,
            (Some(name), None) => Updates::NameOnly(name.to_string()),
            (Some(name), Some(value)) => Updates::pair(name, value),
        };
    }
    request
}

/// Split on whitespace into at most `N` pieces. The last piece keeps its
/// inner whitespace.
fn split_max<const N: usize>(text: &str) -> [Option<&str>; N] {
    let mut pieces = [None; N];
    let mut rest = text.trim();
    for (i, slot) in pieces.iter_mut().enumerate() {
        if rest.is_empty() {
            break;
        }
        if i + 1 == N {
            *slot = Some(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                *slot = Some(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                *slot = Some(rest);
                rest = "";
            }
        }
    }
    pieces
}

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

fn first_token(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_string)
}
