//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)

mod turtle;

use super::Triple;
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }

    /// Media type served for this format
    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NTriples => "application/n-triples",
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Turtle or N-Triples syntax error
    #[error("Parse error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// Term rejected while building the triple
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::Turtle => turtle::parse_turtle(input.as_bytes()),
            RdfFormat::NTriples => turtle::parse_ntriples(input.as_bytes()),
        }
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &Path, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        match format {
            RdfFormat::Turtle => turtle::parse_turtle(reader),
            RdfFormat::NTriples => turtle::parse_ntriples(reader),
        }
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize<'a, I>(triples: I, format: RdfFormat) -> SerializeResult<String>
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        let bytes = match format {
            RdfFormat::Turtle => turtle::format_turtle(triples)?,
            RdfFormat::NTriples => turtle::format_ntriples(triples)?,
        };

        String::from_utf8(bytes).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"
        @prefix p-lod: <urn:p-lod:id:> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        p-lod:r1 rdfs:label "Regio I" ;
            p-lod:spatially-within p-lod:pompeii .
    "#;

    #[test]
    fn test_parse_turtle() {
        let triples = RdfParser::parse(INPUT, RdfFormat::Turtle).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject.lexical(), "urn:p-lod:id:r1");
        assert_eq!(triples[0].object.lexical(), "Regio I");
        assert_eq!(triples[1].object.lexical(), "urn:p-lod:id:pompeii");
    }

    #[test]
    fn test_parse_error() {
        let result = RdfParser::parse("p-lod:r1 p-lod:x .", RdfFormat::Turtle);
        assert!(matches!(result, Err(ParseError::Syntax(_))));
    }

    #[test]
    fn test_serialize_empty() {
        let output = RdfSerializer::serialize(std::iter::empty::<&Triple>(), RdfFormat::Turtle).unwrap();
        assert!(output.trim().is_empty());
    }

    #[test]
    fn test_serialize_ntriples() {
        let triples = RdfParser::parse(INPUT, RdfFormat::Turtle).unwrap();
        let output = RdfSerializer::serialize(&triples, RdfFormat::NTriples).unwrap();

        assert!(output.contains(r#"<urn:p-lod:id:r1> <http://www.w3.org/2000/01/rdf-schema#label> "Regio I" ."#));
        assert_eq!(output.lines().count(), 2);

        let reparsed = RdfParser::parse(&output, RdfFormat::NTriples).unwrap();
        assert_eq!(reparsed, triples);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(RdfFormat::from_path(Path::new("data/p-lod.ttl")), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_path(Path::new("dump.NT")), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_path(Path::new("dump.rdf")), None);
        assert_eq!(RdfFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(RdfFormat::Turtle.media_type(), "text/turtle");
    }
}
