//! Line-oriented text format for graph descriptions.
//!
//! # Format
//! One declaration per line; blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! # a weighted triangle with a lonely node
//! A - B (weight=3)
//! B -> C (weight=1.5, label="one way")
//! C - A
//! lonely (x=-2, seen=false, cost=inf)
//! ```
//!
//! - `name` declares a node, `a -> b` a directed arc and `a - b` an
//!   undirected edge (a reciprocal arc pair).
//! - A name is an identifier, a quoted string (`'...'` or `"..."` with
//!   backslash escapes) or a number. Numeric names are canonicalised:
//!   `+7` and `007` name `7`, `1.50` names `1.5`, `2.` names `2.0`.
//!   Floats at or above `1e16` or below `1e-4` name their exponent form
//!   with a signed two-digit exponent: `1e16` names `1e+16`, `25e-7` names
//!   `2.5e-06`.
//! - An optional `( ... )` block holds `key=value` options. Keys are
//!   identifiers or quoted strings. Values are numbers (optionally signed),
//!   quoted strings or the case-insensitive constants `true`, `false`,
//!   `none` and `inf`. Separating commas are optional.
//!
//! Errors carry the 1-based line number of the offending line.

use crate::graph_error::GraphError;
use crate::io::{GraphReader, GraphWriter};
use crate::topology::arc::ArcLike;
use crate::topology::attributes::{
    AttrValue, Attributed, Attributes, Sign, format_attributes, format_key,
};
use crate::topology::factory::{DefaultFactory, GraphFactory};
use crate::topology::graph::Graph;
use crate::topology::load::Record;
use crate::topology::node::NodeLike;
use std::io::{Read, Write};
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    /// Raw digits as written; interpretation depends on position.
    Number(String),
    Arrow,
    Dash,
    Plus,
    Equals,
    Comma,
    Open,
    Close,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn tokenize(text: &str, line: usize) -> Result<Vec<Token>, GraphError> {
    let mut out = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        let tok = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' | ')' | ',' | '=' | '+' => {
                chars.next();
                match c {
                    '(' => Token::Open,
                    ')' => Token::Close,
                    ',' => Token::Comma,
                    '=' => Token::Equals,
                    _ => Token::Plus,
                }
            }
            '-' => {
                chars.next();
                if chars.next_if_eq(&'>').is_some() {
                    Token::Arrow
                } else {
                    Token::Dash
                }
            }
            '"' | '\'' => {
                chars.next();
                Token::Str(lex_string(&mut chars, c, line)?)
            }
            c if c.is_ascii_digit() || c == '.' => Token::Number(lex_number(&mut chars, line)?),
            c if is_ident_start(c) => {
                let mut s = String::new();
                while let Some(c) = chars.next_if(|&c| is_ident_continue(c)) {
                    s.push(c);
                }
                Token::Ident(s)
            }
            other => {
                return Err(GraphError::parse(
                    line,
                    format!("unexpected character `{other}`"),
                ));
            }
        };
        out.push(tok);
    }
    Ok(out)
}

fn lex_string(chars: &mut Peekable<Chars<'_>>, quote: char, line: usize) -> Result<String, GraphError> {
    let mut s = String::new();
    loop {
        match chars.next() {
            None => return Err(GraphError::parse(line, "unterminated string")),
            Some(c) if c == quote => return Ok(s),
            Some('\\') => match chars.next() {
                Some('n') => s.push('\n'),
                Some('t') => s.push('\t'),
                Some('r') => s.push('\r'),
                Some('0') => s.push('\0'),
                Some(c @ ('\\' | '\'' | '"')) => s.push(c),
                Some(c) => {
                    s.push('\\');
                    s.push(c);
                }
                None => return Err(GraphError::parse(line, "unterminated string")),
            },
            Some(c) => s.push(c),
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>, raw: &mut String) -> usize {
    let mut n = 0;
    while let Some(d) = chars.next_if(char::is_ascii_digit) {
        raw.push(d);
        n += 1;
    }
    n
}

fn lex_number(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<String, GraphError> {
    let mut raw = String::new();
    let mut digits = take_digits(chars, &mut raw);
    if let Some(dot) = chars.next_if_eq(&'.') {
        raw.push(dot);
        digits += take_digits(chars, &mut raw);
    }
    if digits == 0 {
        return Err(GraphError::parse(line, "malformed number `.`"));
    }
    if let Some(e) = chars.next_if(|&c| c == 'e' || c == 'E') {
        raw.push(e);
        if let Some(sign) = chars.next_if(|&c| c == '+' || c == '-') {
            raw.push(sign);
        }
        if take_digits(chars, &mut raw) == 0 {
            return Err(GraphError::parse(line, format!("malformed number `{raw}`")));
        }
    }
    if let Some(&c) = chars.peek() {
        if is_ident_continue(c) || c == '.' {
            return Err(GraphError::parse(
                line,
                format!("malformed number `{raw}{c}`"),
            ));
        }
    }
    Ok(raw)
}

fn is_float(raw: &str) -> bool {
    raw.contains(['.', 'e', 'E'])
}

fn canonical_number(raw: &str, line: usize) -> Result<String, GraphError> {
    if is_float(raw) {
        let x: f64 = raw
            .parse()
            .map_err(|_| GraphError::parse(line, format!("malformed number `{raw}`")))?;
        Ok(float_name(x))
    } else {
        let trimmed = raw.trim_start_matches('0');
        Ok(if trimmed.is_empty() { "0" } else { trimmed }.to_owned())
    }
}

/// Shortest round-trip form with a signed, two-digit exponent (`1e+16`).
fn float_name(x: f64) -> String {
    let text = format!("{x:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = exp.strip_prefix('-').map_or(('+', exp), |d| ('-', d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

fn number_value(raw: &str, negative: bool, line: usize) -> Result<AttrValue, GraphError> {
    let signed = if negative {
        format!("-{raw}")
    } else {
        raw.to_owned()
    };
    if is_float(raw) {
        signed
            .parse::<f64>()
            .map(AttrValue::Float)
            .map_err(|_| GraphError::parse(line, format!("malformed number `{raw}`")))
    } else {
        signed
            .parse::<i64>()
            .map(AttrValue::Int)
            .map_err(|_| GraphError::parse(line, format!("integer out of range: {signed}")))
    }
}

/// Cursor over the tokens of one line.
struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    peeked: Option<Token>,
    line: usize,
}

impl TokenStream {
    fn new(text: &str, line: usize) -> Result<Self, GraphError> {
        let mut tokens = tokenize(text, line)?.into_iter();
        let peeked = tokens.next();
        Ok(Self {
            tokens,
            peeked,
            line,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.peeked.as_ref()
    }

    fn next(&mut self) -> Option<Token> {
        std::mem::replace(&mut self.peeked, self.tokens.next())
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == Some(tok) {
            self.next();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> GraphError {
        GraphError::parse(self.line, message)
    }

    fn finish(mut self) -> Result<(), GraphError> {
        match self.next() {
            None => Ok(()),
            Some(tok) => Err(self.error(format!("unexpected trailing {tok:?}"))),
        }
    }

    fn name(&mut self) -> Result<String, GraphError> {
        match self.next() {
            Some(Token::Ident(s)) | Some(Token::Str(s)) => Ok(s),
            Some(Token::Number(raw)) => canonical_number(&raw, self.line),
            Some(Token::Plus) => match self.next() {
                Some(Token::Number(raw)) => canonical_number(&raw, self.line),
                _ => Err(self.error("illegal node name after `+`")),
            },
            Some(tok) => Err(self.error(format!("illegal node name {tok:?}"))),
            None => Err(self.error("missing node name")),
        }
    }

    /// `key=value` pairs up to `)` (when `closed`) or the end of input.
    fn options(&mut self, closed: bool) -> Result<Attributes, GraphError> {
        let mut attrs = Attributes::new();
        loop {
            match self.peek() {
                Some(Token::Close) if closed => {
                    self.next();
                    return Ok(attrs);
                }
                None if closed => return Err(self.error("unclosed option block")),
                None => return Ok(attrs),
                _ => {}
            }
            let key = match self.next() {
                Some(Token::Ident(s)) | Some(Token::Str(s)) => s,
                _ => return Err(self.error("missing name in option string")),
            };
            if !self.eat(&Token::Equals) {
                return Err(self.error(format!("missing `=` after option `{key}`")));
            }
            let value = self.value(&key)?;
            attrs.insert(key, value);
            self.eat(&Token::Comma);
        }
    }

    fn value(&mut self, key: &str) -> Result<AttrValue, GraphError> {
        let sign = match self.peek() {
            Some(Token::Dash) => Some(Sign::Negative),
            Some(Token::Plus) => Some(Sign::Positive),
            _ => None,
        };
        if sign.is_some() {
            self.next();
        }
        let negative = sign == Some(Sign::Negative);
        match self.next() {
            Some(Token::Number(raw)) => number_value(&raw, negative, self.line),
            Some(Token::Ident(word)) => match (word.to_ascii_lowercase().as_str(), sign) {
                ("inf", _) if negative => Ok(AttrValue::Infinity(Sign::Negative)),
                ("inf", _) => Ok(AttrValue::Infinity(Sign::Positive)),
                ("true", None) => Ok(AttrValue::Bool(true)),
                ("false", None) => Ok(AttrValue::Bool(false)),
                ("none", None) => Ok(AttrValue::Null),
                ("true" | "false" | "none", Some(_)) => {
                    Err(self.error(format!("sign before non-numeric value of `{key}`")))
                }
                _ => Err(self.error(format!("illegal option value `{word}` for `{key}`"))),
            },
            Some(Token::Str(s)) if sign.is_none() => Ok(AttrValue::Str(s)),
            Some(Token::Str(_)) => Err(self.error(format!("sign before string value of `{key}`"))),
            _ => Err(self.error(format!("missing value for option `{key}`"))),
        }
    }
}

/// Parse a standalone option string such as `x=100, y=-2, filled=true`.
///
/// Errors are reported against line 1.
pub fn scan_options(options: &str) -> Result<Attributes, GraphError> {
    let mut stream = TokenStream::new(options, 1)?;
    let attrs = stream.options(false)?;
    stream.finish()?;
    Ok(attrs)
}

/// Parse one non-blank, non-comment line into a record.
pub fn parse_line(line: usize, text: &str) -> Result<Record, GraphError> {
    let mut stream = TokenStream::new(text, line)?;
    let first = stream.name()?;
    let record = match stream.peek() {
        Some(Token::Arrow | Token::Dash) => {
            let directed = stream.next() == Some(Token::Arrow);
            let second = stream.name()?;
            Record::Edge {
                from: first,
                to: second,
                directed,
                attrs: Attributes::new(),
            }
        }
        _ => Record::node(first),
    };
    let attrs = if stream.eat(&Token::Open) {
        stream.options(true)?
    } else {
        Attributes::new()
    };
    stream.finish()?;
    Ok(record.with_attrs(attrs))
}

/// Lazily parse every declaration of `text`, feeding [`Graph::load`].
pub fn parse_records(text: &str) -> impl Iterator<Item = Result<Record, GraphError>> + '_ {
    text.lines().enumerate().filter_map(|(i, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some(parse_line(i + 1, line))
        }
    })
}

/// Reader for the text format.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReader;

impl GraphReader for TextReader {
    fn read<R: Read, F: GraphFactory>(
        &self,
        mut reader: R,
        factory: F,
    ) -> Result<Graph<F>, GraphError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut graph = Graph::with_factory(factory);
        graph.load(parse_records(&text))?;
        Ok(graph)
    }
}

/// Writer for the text format.
///
/// Emits a node line for every node that carries attributes or has no
/// incident arcs, then one directed line per arc in arc order. Reading the
/// output back yields the same arcs with the same attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextWriter;

fn option_block(attrs: &Attributes) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" ({})", format_attributes(attrs))
    }
}

impl GraphWriter for TextWriter {
    fn write<W: Write, F: GraphFactory>(
        &self,
        mut writer: W,
        graph: &Graph<F>,
    ) -> Result<(), GraphError> {
        writeln!(
            writer,
            "# {} nodes, {} arcs",
            graph.node_count(),
            graph.arc_count()
        )?;
        for node in graph.nodes().iter().filter_map(|&n| {
            let isolated = graph.out_degree(n) + graph.in_degree(n) == 0;
            graph
                .node(n)
                .filter(|node| isolated || !node.attributes().is_empty())
        }) {
            writeln!(
                writer,
                "{}{}",
                format_key(node.name()),
                option_block(node.attributes())
            )?;
        }
        for arc in graph.arcs().iter().filter_map(|&a| graph.arc(a)) {
            let (Some(from), Some(to)) = (graph.name_of(arc.start()), graph.name_of(arc.finish()))
            else {
                return Err(GraphError::InvariantViolation(
                    "arc endpoint missing from graph".into(),
                ));
            };
            writeln!(
                writer,
                "{} -> {}{}",
                format_key(from),
                format_key(to),
                option_block(arc.attributes())
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Read a graph description file with the default element types.
pub fn read_graph(path: impl AsRef<Path>) -> Result<Graph, GraphError> {
    read_graph_with(path, DefaultFactory)
}

/// Read a graph description file, building elements through `factory`.
pub fn read_graph_with<F: GraphFactory>(
    path: impl AsRef<Path>,
    factory: F,
) -> Result<Graph<F>, GraphError> {
    let path = path.as_ref();
    log::debug!("reading graph description {}", path.display());
    let file = std::fs::File::open(path)
        .map_err(|e| GraphError::Io(format!("{}: {e}", path.display())))?;
    TextReader.read(std::io::BufReader::new(file), factory)
}

/// Serialize `graph` in the text format.
pub fn write_graph<F: GraphFactory>(graph: &Graph<F>, writer: impl Write) -> Result<(), GraphError> {
    TextWriter.write(writer, graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(text: &str) -> Record {
        parse_line(1, text).unwrap()
    }

    fn attrs(pairs: &[(&str, AttrValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn declarations() {
        assert_eq!(one("A"), Record::node("A"));
        assert_eq!(one("A -> B"), Record::arc("A", "B"));
        assert_eq!(one("A - B"), Record::edge("A", "B"));
        assert_eq!(one("A-B"), Record::edge("A", "B"));
        assert_eq!(one("'New York' -> \"L.A.\""), Record::arc("New York", "L.A."));
    }

    #[test]
    fn numeric_names_are_canonical() {
        assert_eq!(one("+7"), Record::node("7"));
        assert_eq!(one("007"), Record::node("7"));
        assert_eq!(one("1.50 - 2."), Record::edge("1.5", "2.0"));
        assert_eq!(one("0"), Record::node("0"));
        assert_eq!(one("1e16"), Record::node("1e+16"));
        assert_eq!(one("25e-7"), Record::node("2.5e-06"));
        assert_eq!(one("1.5E+20 -> 1e-123"), Record::arc("1.5e+20", "1e-123"));
        assert_eq!(one("1e15"), Record::node("1000000000000000.0"));
        assert_eq!(one("0.0001"), Record::node("0.0001"));
    }

    #[test]
    fn option_values() {
        let got = scan_options(
            r#"x=100, y=-2, z=+4, w=1.5, filled=TRUE, gone=False, n=None, hi=inf, lo=-Inf, label="my label", 'odd key'='v'"#,
        )
        .unwrap();
        let want = attrs(&[
            ("x", AttrValue::Int(100)),
            ("y", AttrValue::Int(-2)),
            ("z", AttrValue::Int(4)),
            ("w", AttrValue::Float(1.5)),
            ("filled", AttrValue::Bool(true)),
            ("gone", AttrValue::Bool(false)),
            ("n", AttrValue::Null),
            ("hi", AttrValue::Infinity(Sign::Positive)),
            ("lo", AttrValue::Infinity(Sign::Negative)),
            ("label", AttrValue::Str("my label".into())),
            ("odd key", AttrValue::Str("v".into())),
        ]);
        assert_eq!(got, want);
    }

    #[test]
    fn commas_are_optional_and_later_keys_win() {
        let got = scan_options("a=1 b=2, a=3,").unwrap();
        assert_eq!(got, attrs(&[("a", AttrValue::Int(3)), ("b", AttrValue::Int(2))]));
        assert!(scan_options("").unwrap().is_empty());
    }

    #[test]
    fn string_escapes() {
        let got = scan_options(r#"s="a\"b\\c\n", t='it\'s'"#).unwrap();
        assert_eq!(got["s"], AttrValue::Str("a\"b\\c\n".into()));
        assert_eq!(got["t"], AttrValue::Str("it's".into()));
    }

    #[test]
    fn options_attach_to_records() {
        let rec = one("A - B (weight=3)");
        assert_eq!(
            rec,
            Record::edge("A", "B").with_attrs(attrs(&[("weight", AttrValue::Int(3))]))
        );
        let rec = one("A (label=\"has ) inside\")");
        assert_eq!(
            rec,
            Record::node("A").with_attrs(attrs(&[("label", AttrValue::Str("has ) inside".into()))]))
        );
    }

    #[test]
    fn rejects_bad_option_strings() {
        for bad in [
            "x=red",
            "x",
            "x 3",
            "=3",
            "x=",
            "x=-true",
            "x=-\"s\"",
            "x=99999999999999999999",
            "x=1.2.3",
            "x=12abc",
        ] {
            assert!(
                matches!(scan_options(bad), Err(GraphError::ParseError { line: 1, .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_lines() {
        for bad in [
            "A -> (x=1)",
            "A (x=1",
            "A B",
            "A -> B C",
            "A (x=1) junk",
            "\"open",
            "A ; B",
            "-> B",
        ] {
            assert!(parse_line(4, bad).is_err(), "accepted {bad:?}");
        }
        assert_eq!(
            parse_line(4, "A (x=1").unwrap_err(),
            GraphError::parse(4, "unclosed option block")
        );
    }

    #[test]
    fn records_skip_comments_and_blank_lines() {
        let text = "# header\n\nA - B\n   # indented comment\n  C  \n";
        let records: Vec<_> = parse_records(text).collect::<Result<_, _>>().unwrap();
        assert_eq!(records, [Record::edge("A", "B"), Record::node("C")]);
    }

    #[test]
    fn parse_error_carries_line_number() {
        let text = "A - B\n\nB -> C (w=oops)\nD\n";
        let mut g = Graph::new();
        let err = g.load(parse_records(text)).unwrap_err();
        assert!(matches!(err, GraphError::ParseError { line: 3, .. }));
        // the first record stays applied
        assert_eq!(g.arc_count(), 2);
        assert!(g.node_id("D").is_none());
    }

    #[test]
    fn writer_output() {
        let mut g = Graph::new();
        g.load(parse_records("A - B (w=2)\nC\nD (x=1.0)\nD -> A\n")).unwrap();
        let mut out = Vec::new();
        write_graph(&g, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# 4 nodes, 3 arcs\nC\nD (x=1.0)\nA -> B (w=2)\nB -> A (w=2)\nD -> A\n"
        );
    }

    #[test]
    fn writer_quotes_odd_names() {
        let mut g = Graph::new();
        g.add_arc("New York", "7").unwrap();
        let mut out = Vec::new();
        write_graph(&g, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\"New York\" -> \"7\"\n"));
        let back: Vec<_> = parse_records(&text).collect::<Result<_, _>>().unwrap();
        assert_eq!(back, [Record::arc("New York", "7")]);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_graph("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }

    #[test]
    fn reader_from_bytes() {
        let g = TextReader
            .read("A -> B\nB -> C\n".as_bytes(), DefaultFactory)
            .unwrap();
        assert_eq!(g.to_string(), "<A -> B, B -> C>");
    }
}
