//! # Command Syntax
//!
//! The console accepts two spellings of the same command:
//!
//! ```text
//! update User 1f2e name "Ann Lee"          space separated
//! User.update(1f2e, name "Ann Lee")        call style
//! User.update("1f2e", "name", "Ann Lee")   call style, comma separated
//! ```
//!
//! Each spelling has its own small parser, and both produce the same
//! [`Invocation`]. Validation (is the class known, does the record exist)
//! is not done here: it lives with the commands so that it is written
//! once for both spellings.
//!
//! Tokens may be quoted with `"` or `'` to carry spaces; stray quotes at
//! either end of a token are stripped. After the id, a `{...}` literal is
//! read as one JSON object straight from the remaining text, so commas
//! inside it survive; anything after the object is ignored.

use crate::error::CommandError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Show,
    All,
    Update,
    Destroy,
    Count,
}

impl Verb {
    pub const ALL: [Verb; 6] = [
        Verb::Create,
        Verb::Show,
        Verb::All,
        Verb::Update,
        Verb::Destroy,
        Verb::Count,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Show => "show",
            Verb::All => "all",
            Verb::Update => "update",
            Verb::Destroy => "destroy",
            Verb::Count => "count",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Verb::Create => "Create a new instance and print its id: create <class>",
            Verb::Show => "Print an instance: show <class> <id>",
            Verb::All => "Print all instances, optionally of one class: all [class]",
            Verb::Update => {
                "Set an attribute: update <class> <id> <attribute> <value> | update <class> <id> {json}"
            }
            Verb::Destroy => "Delete an instance: destroy <class> <id>",
            Verb::Count => "Print the number of instances: count <class|all>",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Verb {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.name() == s)
            .ok_or(CommandError::InvalidMethod)
    }
}

/// What follows the id.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Attribute {
        name: Option<String>,
        value: Option<String>,
    },
    Object(Map<String, Value>),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Attribute {
            name: None,
            value: None,
        }
    }
}

/// Normalized arguments, shared by both spellings.
///
/// Nothing is validated yet: `kind` is whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub kind: Option<String>,
    pub id: Option<String>,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub verb: Verb,
    pub args: Args,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Empty,
    Quit,
    Eof,
    Help(Option<String>),
    Invoke(Invocation),
    /// Call style whose verb is not one we know.
    InvalidMethod,
    Unknown(String),
}

pub fn parse_line(input: &str) -> Line {
    let line = input.trim();
    if line.is_empty() {
        return Line::Empty;
    }

    let (head, rest) = match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], &line[at..]),
        None => (line, ""),
    };

    match head {
        "quit" => Line::Quit,
        "EOF" => Line::Eof,
        "help" => Line::Help(Lexer::new(rest, false).next_token().filter(|t| !t.is_empty())),
        _ => match head.parse::<Verb>() {
            Ok(verb) => Line::Invoke(Invocation {
                verb,
                args: parse_spaced(rest),
            }),
            Err(_) => parse_call(line).unwrap_or_else(|| Line::Unknown(line.to_string())),
        },
    }
}

/// `<kind> [id] [attr] [value]`, or `<kind> <id> {json}`.
fn parse_spaced(rest: &str) -> Args {
    let mut lexer = Lexer::new(rest, false);
    let kind = non_empty(lexer.next_token());
    let id = non_empty(lexer.next_token());
    let payload = parse_payload(&mut lexer);
    Args { kind, id, payload }
}

/// `<kind>.<verb>(<args>)`. Returns `None` when the line does not have
/// that shape at all.
fn parse_call(line: &str) -> Option<Line> {
    let open = line.find('(')?;
    let inner = line[open + 1..].strip_suffix(')')?;
    let (kind, verb) = line[..open].rsplit_once('.')?;

    let verb = match verb.trim().parse::<Verb>() {
        Ok(verb) => verb,
        Err(_) => return Some(Line::InvalidMethod),
    };

    let mut lexer = Lexer::new(inner, true);
    let id = non_empty(lexer.next_token());
    let payload = parse_payload(&mut lexer);

    Some(Line::Invoke(Invocation {
        verb,
        args: Args {
            kind: non_empty(Some(strip_quotes(kind.trim()).to_string())),
            id,
            payload,
        },
    }))
}

/// An object literal wins when one parses at the front of the remainder;
/// text after it is ignored, like extra tokens after a value. A `{` that
/// does not open a valid object never becomes an attribute name.
fn parse_payload(lexer: &mut Lexer<'_>) -> Payload {
    let rest = lexer.rest();
    if rest.starts_with('{') {
        return match serde_json::Deserializer::from_str(rest)
            .into_iter::<Map<String, Value>>()
            .next()
        {
            Some(Ok(object)) => Payload::Object(object),
            _ => Payload::default(),
        };
    }

    let name = non_empty(lexer.next_token());
    let value = non_empty(lexer.next_token());
    Payload::Attribute { name, value }
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

pub fn strip_quotes(token: &str) -> &str {
    token.trim_matches(|c: char| c == '"' || c == '\'')
}

fn is_separator(c: char, commas: bool) -> bool {
    c.is_whitespace() || (commas && c == ',')
}

/// Splits on whitespace (and commas, in call style) outside of quotes.
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    commas: bool,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, commas: bool) -> Self {
        Self {
            input,
            pos: 0,
            commas,
        }
    }

    fn skip_separators(&mut self) {
        let commas = self.commas;
        let input = self.input;
        let rest = &input[self.pos..];
        let trimmed = rest.trim_start_matches(|c: char| is_separator(c, commas));
        self.pos += rest.len() - trimmed.len();
    }

    /// Unconsumed input, separators skipped.
    fn rest(&mut self) -> &'a str {
        self.skip_separators();
        let input = self.input;
        &input[self.pos..]
    }

    fn next_token(&mut self) -> Option<String> {
        let commas = self.commas;
        let rest = self.rest();
        let first = rest.chars().next()?;

        if first == '"' || first == '\'' {
            let body = &rest[1..];
            return match body.find(first) {
                Some(end) => {
                    self.pos += end + 2;
                    Some(body[..end].to_string())
                }
                None => {
                    self.pos = self.input.len();
                    Some(strip_quotes(body).to_string())
                }
            };
        }

        let end = rest
            .find(|c: char| is_separator(c, commas))
            .unwrap_or(rest.len());
        self.pos += end;
        Some(strip_quotes(&rest[..end]).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invocation(line: &str) -> Invocation {
        match parse_line(line) {
            Line::Invoke(invocation) => invocation,
            other => panic!("expected an invocation for {:?}, got {:?}", line, other),
        }
    }

    fn attribute(name: &str, value: &str) -> Payload {
        Payload::Attribute {
            name: Some(name.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn control_lines() {
        assert_eq!(parse_line(""), Line::Empty);
        assert_eq!(parse_line("   \t"), Line::Empty);
        assert_eq!(parse_line("quit"), Line::Quit);
        assert_eq!(parse_line("EOF"), Line::Eof);
        assert_eq!(parse_line("help"), Line::Help(None));
        assert_eq!(parse_line("help show"), Line::Help(Some("show".into())));
    }

    #[test]
    fn spaced_update_with_quoted_value() {
        let inv = invocation("update User 1234 name \"Ann Lee\"");
        assert_eq!(inv.verb, Verb::Update);
        assert_eq!(inv.args.kind.as_deref(), Some("User"));
        assert_eq!(inv.args.id.as_deref(), Some("1234"));
        assert_eq!(inv.args.payload, attribute("name", "Ann Lee"));
    }

    #[test]
    fn quotes_are_stripped_from_every_token() {
        let inv = invocation("update \"User\" '1234' 'age' \"20\"");
        assert_eq!(inv.args.kind.as_deref(), Some("User"));
        assert_eq!(inv.args.id.as_deref(), Some("1234"));
        assert_eq!(inv.args.payload, attribute("age", "20"));
    }

    #[test]
    fn extra_pairs_are_ignored() {
        let inv = invocation("update BaseModel 1 age \"20\" color \"red\"");
        assert_eq!(inv.args.payload, attribute("age", "20"));
    }

    #[test]
    fn missing_arguments_stay_missing() {
        let inv = invocation("update");
        assert_eq!(inv.args, Args::default());

        let inv = invocation("update User 1 color");
        assert_eq!(
            inv.args.payload,
            Payload::Attribute {
                name: Some("color".into()),
                value: None
            }
        );
    }

    #[test]
    fn spaced_update_with_object() {
        let inv = invocation("update BaseModel 1 {\"email\": \"xxx@gm\", \"age\": 3}");
        let expected = json!({"email": "xxx@gm", "age": 3});
        assert_eq!(
            inv.args.payload,
            Payload::Object(expected.as_object().unwrap().clone())
        );
    }

    #[test]
    fn both_spellings_normalize_to_the_same_invocation() {
        let spaced = invocation("update User 1234 name \"Ann\"");
        assert_eq!(invocation("User.update(1234, name \"Ann\")"), spaced);
        assert_eq!(invocation("User.update(\"1234\", \"name\", \"Ann\")"), spaced);

        let spaced = invocation("show City 42");
        assert_eq!(invocation("City.show(42)"), spaced);
        assert_eq!(invocation("City.show(\"42\")"), spaced);

        assert_eq!(invocation("User.count()"), invocation("count User"));
        assert_eq!(invocation("User.all()"), invocation("all User"));
    }

    #[test]
    fn call_style_object_keeps_inner_commas() {
        let inv = invocation("Place.update(7, {\"name\": \"a, b\", \"max_guest\": 3, \"x\": \"y\"})");
        let expected = json!({"name": "a, b", "max_guest": 3, "x": "y"});
        assert_eq!(inv.args.id.as_deref(), Some("7"));
        assert_eq!(
            inv.args.payload,
            Payload::Object(expected.as_object().unwrap().clone())
        );
    }

    #[test]
    fn call_style_without_arguments() {
        let inv = invocation("BaseModel.show()");
        assert_eq!(inv.args.kind.as_deref(), Some("BaseModel"));
        assert_eq!(inv.args.id, None);

        let inv = invocation("base.destroy()");
        assert_eq!(inv.args.kind.as_deref(), Some("base"));
    }

    #[test]
    fn call_style_unknown_verb() {
        assert_eq!(parse_line("User.fly()"), Line::InvalidMethod);
        assert_eq!(parse_line("User.fly(1, 2)"), Line::InvalidMethod);
    }

    #[test]
    fn unrecognized_lines() {
        assert_eq!(
            parse_line("hello world"),
            Line::Unknown("hello world".to_string())
        );
        assert_eq!(parse_line("User.show(1"), Line::Unknown("User.show(1".to_string()));
        assert_eq!(parse_line("Usershow()"), Line::Unknown("Usershow()".to_string()));
    }

    #[test]
    fn malformed_object_has_no_attribute_name() {
        let inv = invocation("update User 1 {name Ann");
        assert_eq!(inv.args.payload, Payload::default());

        let inv = invocation("User.update(1, {\"b\": )");
        assert_eq!(inv.args.payload, Payload::default());
    }

    #[test]
    fn text_after_an_object_is_ignored() {
        let expected = json!({"b": "x y"});
        let expected = Payload::Object(expected.as_object().unwrap().clone());

        let inv = invocation("update User 1 {\"b\": \"x y\"} trailing");
        assert_eq!(inv.args.payload, expected);

        let inv = invocation("User.update(1, {\"b\": \"x y\"}, \"more\")");
        assert_eq!(inv.args.payload, expected);
    }

    #[test]
    fn verb_names_round_trip() {
        for verb in Verb::ALL {
            assert_eq!(verb.name().parse::<Verb>(), Ok(verb));
        }
        assert_eq!("Create".parse::<Verb>(), Err(CommandError::InvalidMethod));
    }
}
