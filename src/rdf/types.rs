//! RDF type definitions
//!
//! Thin wrappers around the oxrdf primitives used by the P-LOD graph.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode};
use std::fmt;
use thiserror::Error;

/// IRI of `xsd:string`, the implicit datatype of simple literals
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// RDF term errors
#[derive(Error, Debug)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an IRI string
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(format!("{iri}: {e}")))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

/// Blank node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a blank node from a string identifier
    pub fn from_id(id: &str) -> RdfResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(e.to_string()))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

impl From<OxBlankNode> for BlankNode {
    fn from(node: OxBlankNode) -> Self {
        Self(node)
    }
}

/// RDF literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// Get the datatype
    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OxLiteral> for Literal {
    fn from(lit: OxLiteral) -> Self {
        Self(lit)
    }
}

/// RDF subject (NamedNode or BlankNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
}

impl RdfSubject {
    /// The IRI when this subject is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfSubject::NamedNode(n) => Some(n),
            RdfSubject::BlankNode(_) => None,
        }
    }

    /// Plain string form: the IRI, or `_:id` for blank nodes
    pub fn lexical(&self) -> String {
        match self {
            RdfSubject::NamedNode(n) => n.as_str().to_string(),
            RdfSubject::BlankNode(b) => b.to_string(),
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => write!(f, "{}", n),
            RdfSubject::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

/// RDF predicate (always a NamedNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    /// Create a new predicate from an IRI
    pub fn new(iri: &str) -> RdfResult<Self> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

/// RDF object (NamedNode, BlankNode, or Literal)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl RdfObject {
    /// The IRI when this object is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfObject::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    /// The literal when this object is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            RdfObject::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Plain string form: the IRI, the lexical value of a literal, or `_:id`
    pub fn lexical(&self) -> String {
        match self {
            RdfObject::NamedNode(n) => n.as_str().to_string(),
            RdfObject::BlankNode(b) => b.to_string(),
            RdfObject::Literal(l) => l.value().to_string(),
        }
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => write!(f, "{}", n),
            RdfObject::BlankNode(b) => write!(f, "{}", b),
            RdfObject::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: RdfSubject,
    /// Predicate
    pub predicate: RdfPredicate,
    /// Object
    pub object: RdfObject,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("urn:p-lod:id:pompeii").unwrap();
        assert_eq!(node.as_str(), "urn:p-lod:id:pompeii");
        assert_eq!(node.to_string(), "<urn:p-lod:id:pompeii>");
    }

    #[test]
    fn test_invalid_iri() {
        assert!(NamedNode::new("urn:p-lod:id:not valid").is_err());
        assert!(NamedNode::new("no-scheme").is_err());
    }

    #[test]
    fn test_literal() {
        let lit = Literal::new_simple_literal("Pompeii");
        assert_eq!(lit.value(), "Pompeii");
        assert_eq!(lit.datatype().as_str(), XSD_STRING);

        let lit = Literal::new_language_tagged_literal("Pompei", "it").unwrap();
        assert_eq!(lit.language(), Some("it"));
    }

    #[test]
    fn test_lexical_forms() {
        let iri: RdfObject = NamedNode::new("urn:p-lod:id:r1").unwrap().into();
        assert_eq!(iri.lexical(), "urn:p-lod:id:r1");

        let lit: RdfObject = Literal::new_simple_literal("Regio I").into();
        assert_eq!(lit.lexical(), "Regio I");
        assert!(lit.as_literal().is_some());

        let blank: RdfObject = BlankNode::from_id("b0").unwrap().into();
        assert_eq!(blank.lexical(), "_:b0");
    }

    #[test]
    fn test_triple_display() {
        let triple = Triple::new(
            NamedNode::new("urn:p-lod:id:r1").unwrap().into(),
            RdfPredicate::new("urn:p-lod:id:spatially-within").unwrap(),
            NamedNode::new("urn:p-lod:id:pompeii").unwrap().into(),
        );

        assert_eq!(
            triple.to_string(),
            "<urn:p-lod:id:r1> <urn:p-lod:id:spatially-within> <urn:p-lod:id:pompeii> ."
        );
    }
}
