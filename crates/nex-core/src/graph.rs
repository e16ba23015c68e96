//! RDF graph model
//!
//! An append-only, insertion-ordered collection of statements owned by the
//! caller. Translators only ever add to it; nothing here removes or replaces
//! a statement, and identical statements written twice are kept twice.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab;

// ============================================================================
// Terms
// ============================================================================

/// An IRI naming a node or a predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Iri(Cow<'static, str>);

impl Iri {
    /// Create an IRI from an owned or borrowed string
    pub fn new(iri: impl Into<String>) -> Self {
        Self(Cow::Owned(iri.into()))
    }

    /// Create an IRI from a static string (usable in constants)
    pub const fn from_static(iri: &'static str) -> Self {
        Self(Cow::Borrowed(iri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// New IRI made of this one followed by `suffix`
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self::new(format!("{}{}", self.0, suffix))
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// How a literal is qualified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    Plain,
    Lang(String),
    Typed(Iri),
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    kind: LiteralKind,
}

impl Literal {
    /// Plain literal without language or datatype
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Plain,
        }
    }

    /// Language-tagged literal; an absent or empty tag yields a plain literal
    pub fn lang(lexical: impl Into<String>, tag: Option<&str>) -> Self {
        let kind = match tag.map(str::trim) {
            Some(tag) if !tag.is_empty() => LiteralKind::Lang(tag.to_string()),
            _ => LiteralKind::Plain,
        };
        Self {
            lexical: lexical.into(),
            kind,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            kind: LiteralKind::Typed(datatype),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, vocab::XSD_STRING)
    }

    pub fn int(value: i64) -> Self {
        Self::typed(value.to_string(), vocab::XSD_INT)
    }

    pub fn float(value: f32) -> Self {
        Self::typed(value.to_string(), vocab::XSD_FLOAT)
    }

    pub fn double(value: f64) -> Self {
        Self::typed(value.to_string(), vocab::XSD_DOUBLE)
    }

    pub fn date_time(value: DateTime<Utc>) -> Self {
        Self::typed(
            value.to_rfc3339_opts(SecondsFormat::Millis, true),
            vocab::XSD_DATE_TIME,
        )
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Lang(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn datatype(&self) -> Option<&Iri> {
        match &self.kind {
            LiteralKind::Typed(datatype) => Some(datatype),
            _ => None,
        }
    }

    /// Numeric value of the lexical form, if it parses as one
    pub fn as_f64(&self) -> Option<f64> {
        self.lexical.trim().parse().ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.lexical.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '"' => f.write_str("\\\"")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")?;
        match &self.kind {
            LiteralKind::Plain => Ok(()),
            LiteralKind::Lang(tag) => write!(f, "@{tag}"),
            LiteralKind::Typed(datatype) => write!(f, "^^{}", NTriplesIri(datatype)),
        }
    }
}

/// Object position of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Iri(_) => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(value: Iri) -> Self {
        Self::Iri(value)
    }
}

impl From<&Iri> for Term {
    fn from(value: &Iri) -> Self {
        Self::Iri(value.clone())
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "{}", NTriplesIri(iri)),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

/// IRI written in N-Triples form, escaping characters not allowed in `<...>`
struct NTriplesIri<'a>(&'a Iri);

impl fmt::Display for NTriplesIri<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        for c in self.0.as_str().chars() {
            match c {
                '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                    write!(f, "\\u{:04X}", c as u32)?
                }
                c if c <= ' ' => write!(f, "\\u{:04X}", c as u32)?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str(">")
    }
}

// ============================================================================
// Statements and graph
// ============================================================================

/// A statement (Subject, Predicate, Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: Iri, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} .",
            NTriplesIri(&self.subject),
            NTriplesIri(&self.predicate),
            self.object
        )
    }
}

/// Caller-owned, append-only statement collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement
    pub fn add(&mut self, subject: &Iri, predicate: &Iri, object: impl Into<Term>) {
        self.triples
            .push(Triple::new(subject.clone(), predicate.clone(), object));
    }

    /// Append an already built statement
    pub fn insert(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Statements matching the given pattern; `None` matches anything
    pub fn filter<'g, 'q>(
        &'g self,
        subject: Option<&'q Iri>,
        predicate: Option<&'q Iri>,
        object: Option<&'q Term>,
    ) -> impl Iterator<Item = &'g Triple> + 'q
    where
        'g: 'q,
    {
        self.triples.iter().filter(move |t| {
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| &t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        })
    }

    /// Objects of `subject predicate ?o`
    pub fn objects<'g, 'q>(
        &'g self,
        subject: &'q Iri,
        predicate: &'q Iri,
    ) -> impl Iterator<Item = &'g Term> + 'q
    where
        'g: 'q,
    {
        self.filter(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
    }

    /// First object of `subject predicate ?o`
    pub fn object(&self, subject: &Iri, predicate: &Iri) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Subjects of `?s predicate object`
    pub fn subjects<'g, 'q>(
        &'g self,
        predicate: &'q Iri,
        object: &'q Term,
    ) -> impl Iterator<Item = &'g Iri> + 'q
    where
        'g: 'q,
    {
        self.filter(None, Some(predicate), Some(object))
            .map(|t| &t.subject)
    }

    /// Subjects typed with `class` via `rdf:type`
    pub fn instances_of(&self, class: &Iri) -> Vec<&Iri> {
        let class = Term::Iri(class.clone());
        self.triples
            .iter()
            .filter(|t| t.predicate == vocab::RDF_TYPE && t.object == class)
            .map(|t| &t.subject)
            .collect()
    }

    pub fn contains(&self, subject: &Iri, predicate: &Iri, object: &Term) -> bool {
        self.filter(Some(subject), Some(predicate), Some(object))
            .next()
            .is_some()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

/// N-Triples serialization, one statement per line
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{triple}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
