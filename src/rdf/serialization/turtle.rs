//! Turtle and N-Triples implementation on top of rio

use super::{ParseError, ParseResult, SerializeResult};
use crate::rdf::types::XSD_STRING;
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};
use std::io::BufRead;

/// Parse a Turtle document
pub(super) fn parse_turtle<R: BufRead>(reader: R) -> ParseResult<Vec<Triple>> {
    collect(TurtleParser::new(reader, None))
}

/// Parse an N-Triples document
pub(super) fn parse_ntriples<R: BufRead>(reader: R) -> ParseResult<Vec<Triple>> {
    collect(NTriplesParser::new(reader))
}

/// Serialize triples as Turtle
pub(super) fn format_turtle<'a, I>(triples: I) -> SerializeResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Triple>,
{
    let mut formatter = TurtleFormatter::new(Vec::new());
    for triple in triples {
        format_triple(&mut formatter, triple)?;
    }
    Ok(formatter.finish()?)
}

/// Serialize triples as N-Triples
pub(super) fn format_ntriples<'a, I>(triples: I) -> SerializeResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Triple>,
{
    let mut formatter = NTriplesFormatter::new(Vec::new());
    for triple in triples {
        format_triple(&mut formatter, triple)?;
    }
    Ok(formatter.finish()?)
}

fn collect<P>(mut parser: P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser<Error = TurtleError>,
{
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> ParseResult<()> {
        triples.push(Triple::new(
            convert_subject(t.subject)?,
            convert_predicate(t.predicate)?,
            convert_object(t.object)?,
        ));
        Ok(())
    })?;
    Ok(triples)
}

fn format_triple<F: TriplesFormatter>(formatter: &mut F, triple: &Triple) -> Result<(), F::Error> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };
    let predicate = model::NamedNode {
        iri: triple.predicate.as_str(),
    };

    // Owned datatype must outlive the borrowed rio literal
    let datatype = triple.object.as_literal().map(Literal::datatype);
    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => {
            let literal = match (l.language(), &datatype) {
                (Some(language), _) => model::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                },
                (None, Some(dt)) if dt.as_str() != XSD_STRING => model::Literal::Typed {
                    value: l.value(),
                    datatype: model::NamedNode { iri: dt.as_str() },
                },
                _ => model::Literal::Simple { value: l.value() },
            };
            model::Term::Literal(literal)
        }
    };

    formatter.format(&model::Triple {
        subject,
        predicate,
        object,
    })
}

fn convert_subject(s: model::Subject) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::from_id(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: model::Term) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::from_id(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        model::Term::Literal(model::Literal::Simple { value }) => {
            Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
        }
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => {
            Literal::new_language_tagged_literal(value, language)
                .map(RdfObject::Literal)
                .map_err(|e| ParseError::Parse(e.to_string()))
        }
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
        }
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
