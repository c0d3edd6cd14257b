//! The dotted-form grammar: `<Type>.<verb>(<args>)`.
//!
//! ```text
//! args      := [ identity [ "," body ] ]
//! identity  := '"' [A-Za-z0-9_-]+ '"'
//! body      := json-object | dict-literal | name [ "," value ]
//! ```
//!
//! A body is tried as a JSON object first, then as a dict literal that also
//! accepts single quotes and bare scalar values, and finally as a positional
//! `name, value` pair.

use hbnb_types::AttrValue;

use crate::request::{Line, Request, Updates, Verb};

/// Parse a dotted-form line. The caller guarantees it contains a `.`.
pub fn parse(line: &str) -> Line {
    let Some((type_name, call)) = line.split_once('.') else {
        return Line::Unknown(line.to_string());
    };
    if !(call.contains('(') && call.contains(')')) {
        return Line::BadFunction;
    }
    let Some((func, args)) = call.split_once('(') else {
        return Line::BadFunction;
    };
    let Some(verb) = Verb::from_name(func).filter(|v| v.is_dotted()) else {
        return Line::BadFunction;
    };

    let inner = &args[..args.rfind(')').unwrap_or(args.len())];
    let (id, remainder) = match split_identity(inner.trim()) {
        Some((id, rest)) => (Some(id), rest),
        None => (None, ""),
    };

    let mut request = Request::new(verb);
    if !type_name.is_empty() {
        request.type_name = Some(type_name.to_string());
    }
    match verb {
        Verb::All | Verb::Count | Verb::Create => {}
        Verb::Show | Verb::Destroy => request.id = id.map(str::to_string),
        Verb::Update => {
            request.id = id.map(str::to_string);
            request.updates = parse_body(remainder);
        }
    }
    Line::Request(request)
}

/// Split a leading quoted identity off the argument text.
///
/// Returns the identity and the rest with any separating comma removed.
fn split_identity(args: &str) -> Option<(&str, &str)> {
    let quoted = args.strip_prefix('"')?;
    let end = quoted
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(quoted.len());
    if end == 0 || !quoted[end..].starts_with('"') {
        return None;
    }
    let rest = quoted[end + 1..].trim_start();
    let rest = rest.strip_prefix(',').unwrap_or(rest).trim();
    Some((&quoted[..end], rest))
}

/// Interpret the text after the identity as attribute assignments.
pub fn parse_body(body: &str) -> Updates {
    let body = body.trim();
    if body.is_empty() {
        return Updates::Missing;
    }
    if let Some(pairs) = parse_mapping(body) {
        return Updates::Pairs(pairs);
    }

    let (name, value) = match body.split_once(',') {
        Some((name, value)) => (unquote(name), Some(unquote(value))),
        None => (unquote(body), None),
    };
    match value {
        _ if name.is_empty() => Updates::Missing,
        None => Updates::NameOnly(name.to_string()),
        Some(value) => Updates::pair(name, value),
    }
}

/// Parse `{ name: value, ... }` into ordered assignments.
pub fn parse_mapping(text: &str) -> Option<Vec<(String, String)>> {
    if let Ok(map) = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(text) {
        return Some(
            map.iter()
                .map(|(name, value)| (name.clone(), AttrValue::from_json(value).render()))
                .collect(),
        );
    }
    DictParser::new(text).parse()
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Recursive-descent parser for dict literals such as
/// `{ 'name': 'Pool', "max_guest": 4 }`.
struct DictParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> DictParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn parse(mut self) -> Option<Vec<(String, String)>> {
        self.expect('{')?;
        let mut pairs = Vec::new();
        self.skip_ws();
        if self.eat('}') {
            return self.at_end().then_some(pairs);
        }
        loop {
            self.skip_ws();
            let name = self.quoted()?;
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.value()?;
            pairs.push((name, value));
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect('}')?;
            return self.at_end().then_some(pairs);
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.eat(expected).then_some(())
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos == self.src.len()
    }

    /// A `'...'` or `"..."` string; backslash escapes the next character.
    fn quoted(&mut self) -> Option<String> {
        let quote = self.bump().filter(|c| *c == '"' || *c == '\'')?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                '\\' => out.push(self.bump()?),
                c if c == quote => return Some(out),
                c => out.push(c),
            }
        }
    }

    /// A quoted string or a bare scalar running up to `,` or `}`.
    fn value(&mut self) -> Option<String> {
        if matches!(self.peek(), Some('"' | '\'')) {
            return self.quoted();
        }
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ',' && c != '}') {
            self.bump();
        }
        let bare = self.src[start..self.pos].trim();
        (!bare.is_empty()).then(|| bare.to_string())
    }
}
