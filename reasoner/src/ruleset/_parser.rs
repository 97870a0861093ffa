use super::RuleSet;
use crate::pattern::{NodePattern, StatementPattern};
use crate::rule::{Rule, RuleError};
use entail_api::ns::Namespace;
use entail_api::term::{Iri, Node, TermError};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use thiserror::Error;

lazy_static! {
    static ref PREFIX_LINE: Regex =
        Regex::new(r"(?i)\A\s*PREFIX\s+([A-Za-z][A-Za-z0-9_\-.]*)?:\s*<([^<>\s]*)>\s*\z").unwrap();
    static ref RULE_NAME: Regex = Regex::new(r"\A([^\s()\[\]:]+)\s*:").unwrap();
    static ref VARIABLE: Regex = Regex::new(r"\A\?([^\s,()\[\]]+)").unwrap();
    static ref IRI_REF: Regex = Regex::new(r"\A<([^<>\s]*)>").unwrap();
    static ref PNAME: Regex =
        Regex::new(r"\A([A-Za-z][A-Za-z0-9_\-.]*)?:([^\s,()\[\]<>]*)").unwrap();
    static ref LITERAL: Regex =
        Regex::new(r#"\A(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#).unwrap();
    static ref DATATYPE_IRI: Regex = Regex::new(r"\A\^\^<([^<>\s]*)>").unwrap();
    static ref DATATYPE_PNAME: Regex =
        Regex::new(r"\A\^\^([A-Za-z][A-Za-z0-9_\-.]*)?:([^\s,()\[\]<>]*)").unwrap();
    static ref LANG: Regex = Regex::new(r"\A@([A-Za-z]+(?:-[A-Za-z0-9]+)*)").unwrap();
}

/// A parser for rule files.
///
/// A rule file contains:
/// * prefix declarations, of the form `PREFIX ns: <http://example.org/ns#>`;
/// * rules, of the form `[name: (s1, p1, o1), (s2, p2, o2) -> (s3, p3, o3)]`,
///   possibly spanning several lines, and where the name is optional;
/// * blank lines, and comment lines starting with `#`.
///
/// In a rule, terms in a triple are separated by commas and/or whitespace, and can be
/// * variables: `?name`,
/// * IRIs: `<http://example.org/>` or `prefix:local`,
/// * literals: `"text"` or `'text'`, optionally followed by
///   `^^<datatype>`, `^^prefix:datatype` or `@lang`.
///
/// No prefix is predefined.
#[derive(Clone, Debug, Default)]
pub struct RuleParser {
    prefixes: HashMap<String, Namespace>,
}

impl RuleParser {
    /// Build a parser with no known prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `prefix` for all subsequent parsing.
    pub fn add_prefix<T: Into<String>>(&mut self, prefix: T, namespace: Namespace) {
        self.prefixes.insert(prefix.into(), namespace);
    }

    /// The namespace associated with `prefix`, if any.
    pub fn prefix(&self, prefix: &str) -> Option<&Namespace> {
        self.prefixes.get(prefix)
    }

    /// Parse a single rule, using the prefixes known so far.
    pub fn parse_rule(&self, text: &str) -> Result<Rule, RuleParseError> {
        self.rule_at(text, 1)
    }

    /// Parse a rule file.
    ///
    /// The prefixes declared in `text` are remembered by this parser.
    pub fn parse_str(&mut self, text: &str) -> Result<RuleSet, RuleParseError> {
        let mut rules = RuleSet::new();
        let mut buffer = String::new();
        let mut first_line = 0;
        for (i, line) in text.lines().enumerate() {
            let lineno = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if buffer.is_empty() {
                if let Some(caps) = PREFIX_LINE.captures(line) {
                    let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                    let ns = Namespace::new(&caps[2]).map_err(|e| RuleParseError::Term {
                        line: lineno,
                        source: e.into(),
                    })?;
                    self.add_prefix(prefix, ns);
                    continue;
                }
                first_line = lineno;
            }
            buffer.push_str(line);
            buffer.push('\n');
            if trimmed.ends_with(']') {
                rules.insert(self.rule_at(&buffer, first_line)?);
                buffer.clear();
            }
        }
        if !buffer.is_empty() {
            return Err(RuleParseError::Syntax {
                line: first_line,
                message: "unterminated rule".into(),
            });
        }
        Ok(rules)
    }

    fn rule_at(&self, text: &str, first_line: usize) -> Result<Rule, RuleParseError> {
        let mut c = Cursor {
            text,
            pos: 0,
            first_line,
        };
        c.skip(false);
        c.expect("[")?;
        c.skip(false);
        let name = c.captures(&RULE_NAME).map(|caps| caps[1].to_string());
        let mut preconditions = vec![];
        loop {
            c.skip(true);
            if c.eat("->") {
                break;
            }
            preconditions.push(self.pattern(&mut c)?);
        }
        c.skip(false);
        let effect = self.pattern(&mut c)?;
        c.skip(true);
        c.expect("]")?;
        c.skip(false);
        if !c.rest().is_empty() {
            return Err(c.syntax("unexpected text after rule"));
        }
        match name {
            Some(name) => Rule::named(name, preconditions, effect),
            None => Rule::new(preconditions, effect),
        }
        .map_err(|source| RuleParseError::Rule {
            line: first_line,
            source,
        })
    }

    fn pattern(&self, c: &mut Cursor) -> Result<StatementPattern, RuleParseError> {
        c.expect("(")?;
        c.skip(true);
        let s = self.term(c)?;
        c.skip(true);
        let p = self.term(c)?;
        c.skip(true);
        let o = self.term(c)?;
        c.skip(true);
        c.expect(")")?;
        Ok(StatementPattern::new(s, p, o))
    }

    fn term(&self, c: &mut Cursor) -> Result<NodePattern, RuleParseError> {
        let line = c.line();
        let term_err = |source: TermError| RuleParseError::Term { line, source };
        if let Some(caps) = c.captures(&VARIABLE) {
            return NodePattern::var(&caps[1]).map_err(term_err);
        }
        if let Some(caps) = c.captures(&IRI_REF) {
            return Ok(Node::iri(&caps[1]).map_err(term_err)?.into());
        }
        if let Some(caps) = c.captures(&LITERAL) {
            let lex = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| unescape(m.as_str()))
                .unwrap_or_default();
            let node = if let Some(dt) = c.captures(&DATATYPE_IRI) {
                let dt = Iri::new(&dt[1]).map_err(|e| term_err(e.into()))?;
                Node::typed_literal(lex, dt)
            } else if let Some(dt) = c.captures(&DATATYPE_PNAME) {
                Node::typed_literal(lex, self.resolve(&dt, line)?)
            } else if let Some(tag) = c.captures(&LANG) {
                Node::lang_literal(lex, &tag[1]).map_err(term_err)?
            } else {
                Node::literal(lex)
            };
            return Ok(node.into());
        }
        if let Some(caps) = c.captures(&PNAME) {
            return Ok(Node::Iri(self.resolve(&caps, line)?).into());
        }
        Err(c.syntax("expected a term"))
    }

    /// `caps` must have the prefix in group 1 and the local name in group 2
    fn resolve(&self, caps: &Captures, line: usize) -> Result<Iri, RuleParseError> {
        let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let ns = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| RuleParseError::UnknownPrefix {
                line,
                prefix: prefix.to_string(),
            })?;
        ns.get(&caps[2]).map_err(|e| RuleParseError::Term {
            line,
            source: e.into(),
        })
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    first_line: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn line(&self) -> usize {
        self.first_line + self.text[..self.pos].matches('\n').count()
    }

    fn skip(&mut self, commas: bool) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || (commas && c == ','));
        self.pos += rest.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        let found = self.rest().starts_with(token);
        if found {
            self.pos += token.len();
        }
        found
    }

    fn expect(&mut self, token: &str) -> Result<(), RuleParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.syntax(&format!("expected '{token}'")))
        }
    }

    fn captures(&mut self, re: &Regex) -> Option<Captures<'a>> {
        let caps = re.captures(self.rest())?;
        self.pos += caps.get(0)?.end();
        Some(caps)
    }

    fn syntax(&self, message: &str) -> RuleParseError {
        let near: String = self.rest().chars().take(20).collect();
        RuleParseError::Syntax {
            line: self.line(),
            message: format!("{message} near {near:?}"),
        }
    }
}

fn unescape(txt: &str) -> String {
    let mut ret = String::with_capacity(txt.len());
    let mut chars = txt.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            ret.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => ret.push('\n'),
            Some('r') => ret.push('\r'),
            Some('t') => ret.push('\t'),
            Some(e @ ('"' | '\'' | '\\')) => ret.push(e),
            Some(other) => {
                ret.push('\\');
                ret.push(other);
            }
            None => ret.push('\\'),
        }
    }
    ret
}

/// An error raised while parsing rules.
#[derive(Debug, Error)]
pub enum RuleParseError {
    /// The text does not follow the rule syntax.
    #[error("Syntax error at line {line}: {message}")]
    Syntax {
        /// line where the error was detected
        line: usize,
        /// description of the error
        message: String,
    },
    /// A prefixed name uses an undeclared prefix.
    #[error("Unknown prefix '{prefix}:' at line {line}")]
    UnknownPrefix {
        /// line of the prefixed name
        line: usize,
        /// the undeclared prefix
        prefix: String,
    },
    /// A term is syntactically correct but invalid.
    #[error("Invalid term at line {line}: {source}")]
    Term {
        /// line of the term
        line: usize,
        /// the underlying error
        source: TermError,
    },
    /// A rule is syntactically correct but invalid.
    #[error("Invalid rule at line {line}: {source}")]
    Rule {
        /// line where the rule starts
        line: usize,
        /// the underlying error
        source: RuleError,
    },
}
