//! Typed simple selectors.
//!
//! A [`Selector`] is a comma-separated list of compound selectors. Each
//! compound is an optional tag name (or `*`) followed by any number of
//! `#id`, `.class` and attribute tests:
//!
//! | Syntax      | Matches elements whose attribute          |
//! |-------------|-------------------------------------------|
//! | `[a]`       | is present                                |
//! | `[a=v]`     | equals `v`                                |
//! | `[a~=v]`    | contains the whitespace-separated word `v`|
//! | `[a^=v]`    | starts with `v`                           |
//! | `[a$=v]`    | ends with `v`                             |
//! | `[a*=v]`    | contains `v`                              |
//!
//! Values may be bare identifiers or single/double quoted. Combinators are
//! rejected at parse time. The empty selector is valid and matches nothing.

use std::fmt;
use std::str::FromStr;

use ecow::EcoString;

use crate::ast::{HtmlElement, Node};
use crate::error::{SelectorError, SelectorResult};

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    source: EcoString,
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<EcoString>,
    id: Option<EcoString>,
    classes: Vec<EcoString>,
    attrs: Vec<AttrTest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    name: EcoString,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(EcoString),
    Word(EcoString),
    Prefix(EcoString),
    Suffix(EcoString),
    Contains(EcoString),
}

impl Selector {
    /// Parses a selector list.
    pub fn parse(source: &str) -> SelectorResult<Self> {
        let compounds = Parser::new(source).parse_list()?;
        Ok(Self {
            source: source.trim().into(),
            compounds,
        })
    }

    /// Whether the selector has no compounds (and thus matches nothing).
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// The trimmed source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `element` matches any compound of the list.
    pub fn matches(&self, element: &HtmlElement) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }

    /// All matching elements of `node`'s subtree (self included), in
    /// document order.
    pub fn select<'a>(&self, node: &'a Node) -> Vec<&'a HtmlElement> {
        if self.is_empty() {
            return Vec::new();
        }
        node.find_all(&|el| self.matches(el))
    }

    /// The first matching element of `node`'s subtree.
    pub fn select_first<'a>(&self, node: &'a Node) -> Option<&'a HtmlElement> {
        if self.is_empty() {
            return None;
        }
        node.find(&|el| self.matches(el))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, element: &HtmlElement) -> bool {
        if let Some(tag) = &self.tag
            && tag.as_str() != "*"
            && !element.is(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.attr("id") != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
            && self.attrs.iter().all(|test| test.matches(element))
    }
}

impl AttrTest {
    fn matches(&self, element: &HtmlElement) -> bool {
        let Some(value) = element.attr(&self.name) else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(expected) => value == expected.as_str(),
            AttrOp::Word(word) => value.split_ascii_whitespace().any(|w| w == word.as_str()),
            AttrOp::Prefix(prefix) => !prefix.is_empty() && value.starts_with(prefix.as_str()),
            AttrOp::Suffix(suffix) => !suffix.is_empty() && value.ends_with(suffix.as_str()),
            AttrOp::Contains(needle) => !needle.is_empty() && value.contains(needle.as_str()),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn unexpected(&self, ch: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            ch,
            offset: self.pos,
            source: self.src.into(),
        }
    }

    fn parse_list(&mut self) -> SelectorResult<Vec<Compound>> {
        let mut compounds = Vec::new();
        self.skip_whitespace();
        if self.peek().is_none() {
            return Ok(compounds);
        }

        loop {
            self.skip_whitespace();
            let compound = self.parse_compound()?;
            if compound.is_empty() {
                return match self.peek() {
                    None | Some(',') => Err(SelectorError::EmptyCompound(self.src.into())),
                    Some(ch) => Err(self.unexpected(ch)),
                };
            }
            compounds.push(compound);

            let before_ws = self.pos;
            self.skip_whitespace();
            match self.peek() {
                None => return Ok(compounds),
                Some(',') => {
                    self.bump();
                }
                Some('>' | '+' | '~') => {
                    return Err(SelectorError::UnsupportedCombinator(self.src.into()));
                }
                Some(_) if self.pos > before_ws => {
                    return Err(SelectorError::UnsupportedCombinator(self.src.into()));
                }
                Some(ch) => return Err(self.unexpected(ch)),
            }
        }
    }

    fn parse_compound(&mut self) -> SelectorResult<Compound> {
        let mut compound = Compound::default();
        if self.eat('*') {
            compound.tag = Some("*".into());
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.parse_ident()?.to_ascii_lowercase().into());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.parse_attr()?);
                }
                _ => return Ok(compound),
            }
        }
    }

    fn parse_ident(&mut self) -> SelectorResult<EcoString> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(ch) => self.unexpected(ch),
                None => SelectorError::UnexpectedEnd(self.src.into()),
            });
        }
        Ok(self.src[start..self.pos].into())
    }

    fn parse_attr(&mut self) -> SelectorResult<AttrTest> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();

        let op: fn(EcoString) -> AttrOp = match self.bump() {
            Some(']') => {
                return Ok(AttrTest {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => AttrOp::Equals,
            Some(modifier @ ('~' | '^' | '$' | '*')) => {
                if !self.eat('=') {
                    return Err(match self.peek() {
                        Some(ch) => self.unexpected(ch),
                        None => SelectorError::UnexpectedEnd(self.src.into()),
                    });
                }
                match modifier {
                    '~' => AttrOp::Word,
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    _ => AttrOp::Contains,
                }
            }
            Some(ch) => {
                self.pos -= ch.len_utf8();
                return Err(self.unexpected(ch));
            }
            None => return Err(SelectorError::UnexpectedEnd(self.src.into())),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                loop {
                    match self.bump() {
                        Some(ch) if ch == quote => break,
                        Some(_) => {}
                        None => return Err(SelectorError::UnexpectedEnd(self.src.into())),
                    }
                }
                EcoString::from(&self.src[start..self.pos - quote.len_utf8()])
            }
            _ => self.parse_ident()?,
        };

        self.skip_whitespace();
        match self.bump() {
            Some(']') => Ok(AttrTest {
                name,
                op: op(value),
            }),
            Some(ch) => {
                self.pos -= ch.len_utf8();
                Err(self.unexpected(ch))
            }
            None => Err(SelectorError::UnexpectedEnd(self.src.into())),
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}
