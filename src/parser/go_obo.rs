//! Parses OBO formatted Gene Ontology data, e.g. `go-basic.obo`
//!
//! Only `[Term]` stanzas are parsed, the header and all other stanzas
//! (e.g. `[Typedef]`) are ignored. From each term the following fields
//! are used:
//!
//! - `id` (required, stanzas without id are skipped)
//! - `name`
//! - `namespace` (must be one of the three [`Branch`] namespaces)
//! - `is_a` (connection to a parent)
//! - `relationship` (only `part_of`, connection to a parent)
//! - `is_obsolete`
//! - `replaced_by`
//!
//! ```text
//! [Term]
//! id: GO:0005739
//! name: mitochondrion
//! namespace: cellular_component
//! is_a: GO:0043231 ! intracellular membrane-bounded organelle
//! relationship: part_of GO:0005737 ! cytoplasm
//! ```
use std::collections::HashMap;
use std::io::BufRead;

use tracing::{debug, info, trace};

use crate::term::{Branch, GoTermId, Relation};
use crate::{GoError, GoResult, OBO_TERM_MARKER};

const IS_A: &str = "is_a";
const RELATIONSHIP: &str = "relationship";
const PART_OF: &str = "part_of";
const LABEL_SEPARATOR: &str = " ! ";

/// A single term, as declared in a `[Term]` stanza
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTerm {
    /// The id of the term
    pub id: GoTermId,
    /// The name (label) of the term
    pub name: Option<String>,
    /// The branch, derived from the `namespace`
    pub branch: Option<Branch>,
    /// `true` if the term is flagged with `is_obsolete: true`
    pub obsolete: bool,
    /// The replacement of an obsolete term
    pub replaced_by: Option<GoTermId>,
}

/// A connection from a child term to one of its parents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// The more general term
    pub parent: GoTermId,
    /// The more specific term
    pub child: GoTermId,
    /// The kind of relation between both terms
    pub relation: Relation,
}

/// The result of parsing an OBO source
///
/// It contains all declared terms and their parent connections and is
/// used to build an [`Ontology`](crate::Ontology).
#[derive(Debug, Default, Clone)]
pub struct ParsedOntology {
    terms: Vec<ParsedTerm>,
    edges: Vec<Edge>,
}

impl ParsedOntology {
    /// Returns all declared terms, in the order of the source
    pub fn terms(&self) -> &[ParsedTerm] {
        &self.terms
    }

    /// Returns all parent connections, in the order of the source
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns a map of every term with a namespace to its [`Branch`]
    ///
    /// Terms without a namespace are not part of the map.
    pub fn branches(&self) -> HashMap<GoTermId, Branch> {
        self.terms
            .iter()
            .filter_map(|term| term.branch.map(|branch| (term.id.clone(), branch)))
            .collect()
    }

    /// Consumes `self` and returns the terms and edges
    pub fn into_parts(self) -> (Vec<ParsedTerm>, Vec<Edge>) {
        (self.terms, self.edges)
    }
}

/// Collects the fields of a single `[Term]` stanza
#[derive(Debug, Default)]
struct Stanza {
    id: Option<GoTermId>,
    name: Option<String>,
    branch: Option<Branch>,
    obsolete: bool,
    replaced_by: Option<GoTermId>,
    parents: Vec<(GoTermId, Relation)>,
}

impl Stanza {
    fn add_line(&mut self, line: &str, line_number: usize) -> GoResult<()> {
        let malformed = || GoError::MalformedLine {
            line: line_number,
            content: line.to_string(),
        };

        let (key, value) = line.split_once(": ").ok_or_else(malformed)?;
        let value = value.trim();
        match key {
            "id" => self.id = Some(value.into()),
            "name" => self.name = Some(value.to_string()),
            "namespace" => self.branch = Some(Branch::from_namespace(value)?),
            IS_A => {
                let parent = parent_id(value).ok_or_else(malformed)?;
                self.parents.push((parent, Relation::IsA));
            }
            RELATIONSHIP if value.contains(PART_OF) => {
                let parent = value
                    .split_once("part_of ")
                    .and_then(|(_, target)| parent_id(target))
                    .ok_or_else(malformed)?;
                self.parents.push((parent, Relation::PartOf));
            }
            "is_obsolete" => self.obsolete = value == "true",
            "replaced_by" => self.replaced_by = Some(value.into()),
            _ => (),
        }
        Ok(())
    }

    /// Adds the term and its parent connections to `parsed`
    fn finish(self, parsed: &mut ParsedOntology) {
        let Some(id) = self.id else {
            trace!("Skipping term without id");
            return;
        };

        for (parent, relation) in self.parents {
            parsed.edges.push(Edge {
                parent,
                child: id.clone(),
                relation,
            });
        }

        parsed.terms.push(ParsedTerm {
            id,
            name: self.name,
            branch: self.branch,
            obsolete: self.obsolete,
            replaced_by: self.replaced_by,
        });
    }
}

/// Returns the id from a `<id> ! <label>` value
///
/// If the label is missing, the whole value is used as id
fn parent_id(value: &str) -> Option<GoTermId> {
    let id = value
        .split_once(LABEL_SEPARATOR)
        .map_or(value, |(id, _)| id)
        .trim();
    if id.is_empty() {
        None
    } else {
        Some(id.into())
    }
}

fn is_stanza_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// Parses OBO data from a reader
///
/// Parsing fails on the first invalid line.
///
/// # Errors
///
/// - [`GoError::InvalidInput`]: the reader returns invalid data
/// - [`GoError::MalformedLine`]: a line of a term does not contain `: `
///   or a `part_of` relationship has no target
/// - [`GoError::UnknownBranch`]: a term has an unknown namespace
pub fn parse<R: BufRead>(reader: R) -> GoResult<ParsedOntology> {
    let mut parsed = ParsedOntology::default();
    let mut current: Option<Stanza> = None;
    let mut ignored_stanzas = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|_| GoError::InvalidInput(format!("unable to read line {}", idx + 1)))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_stanza_header(line) {
            if let Some(stanza) = current.take() {
                stanza.finish(&mut parsed);
            }
            if line == OBO_TERM_MARKER {
                current = Some(Stanza::default());
            } else {
                trace!("Ignoring stanza {}", line);
                ignored_stanzas += 1;
            }
            continue;
        }

        if let Some(stanza) = current.as_mut() {
            stanza.add_line(line, idx + 1)?;
        }
    }

    if let Some(stanza) = current.take() {
        stanza.finish(&mut parsed);
    }

    debug!("Ignored {} non-term stanzas", ignored_stanzas);
    info!(
        "Parsed {} terms with {} parent connections",
        parsed.terms.len(),
        parsed.edges.len()
    );
    Ok(parsed)
}

/// Parses an OBO formatted string
///
/// # Errors
///
/// See [`parse`]
pub fn parse_str(obo: &str) -> GoResult<ParsedOntology> {
    parse(obo.as_bytes())
}

#[cfg(test)]
mod test {
    use super::*;

    const TWO_TERMS: &str = "\
[Term]
id: GO:0000001
name: root
namespace: biological_process

[Term]
id: GO:0000002
name: leaf
namespace: biological_process
is_a: GO:0000001 ! root
";

    #[test]
    fn split_terms() {
        let parsed = parse_str(TWO_TERMS).unwrap();
        assert_eq!(parsed.terms().len(), 2);
        assert_eq!(parsed.edges().len(), 1);

        let edge = &parsed.edges()[0];
        assert_eq!(edge.parent, "GO:0000001");
        assert_eq!(edge.child, "GO:0000002");
        assert_eq!(edge.relation, Relation::IsA);

        let branches = parsed.branches();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches.get("GO:0000002"), Some(&Branch::BiologicalProcess));
    }

    #[test]
    fn header_and_typedef_are_ignored() {
        let obo = "\
format-version: 1.2
data-version: releases/2024-01-17

[Term]
id: GO:0000001
namespace: cellular_component

[Typedef]
id: part_of
name: part of
xref BFO:0000050
";
        let parsed = parse_str(obo).unwrap();
        assert_eq!(parsed.terms().len(), 1);
        assert_eq!(parsed.terms()[0].id, "GO:0000001");
    }

    #[test]
    fn part_of_relationship() {
        let obo = "\
[Term]
id: GO:0000003
namespace: cellular_component
is_a: GO:0000001 ! organelle
relationship: part_of GO:0000002 ! cytoplasm
relationship: regulates GO:0000004 ! something
";
        let parsed = parse_str(obo).unwrap();
        let edges = parsed.edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].parent, "GO:0000002");
        assert_eq!(edges[1].relation, Relation::PartOf);
    }

    #[test]
    fn part_of_without_target() {
        let obo = "[Term]\nid: GO:0000003\nrelationship: has_part_of\n";
        assert!(matches!(
            parse_str(obo),
            Err(GoError::MalformedLine { line: 3, .. })
        ));
    }

    #[test]
    fn missing_id() {
        let obo = "\
[Term]
name: nameless
namespace: molecular_function
is_a: GO:0000001 ! root

[Term]
id: GO:0000001
";
        let parsed = parse_str(obo).unwrap();
        assert_eq!(parsed.terms().len(), 1);
        assert!(parsed.edges().is_empty());
    }

    #[test]
    fn missing_namespace() {
        let obo = "[Term]\nid: GO:0000001\nname: no branch\n";
        let parsed = parse_str(obo).unwrap();
        assert_eq!(parsed.terms().len(), 1);
        assert!(parsed.branches().is_empty());
    }

    #[test]
    fn unknown_namespace() {
        let obo = "[Term]\nid: GO:0000001\nnamespace: external\n";
        match parse_str(obo) {
            Err(GoError::UnknownBranch(ns)) => assert_eq!(ns, "external"),
            other => panic!("expected UnknownBranch, got {other:?}"),
        }
    }

    #[test]
    fn malformed_line() {
        let obo = "[Term]\nid: GO:0000001\nnamespace biological_process\n";
        match parse_str(obo) {
            Err(GoError::MalformedLine { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "namespace biological_process");
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn obsolete_terms() {
        let obo = "\
[Term]
id: GO:0000005
name: obsolete ribosomal chaperone activity
namespace: molecular_function
is_obsolete: true
replaced_by: GO:0044183
";
        let parsed = parse_str(obo).unwrap();
        let term = &parsed.terms()[0];
        assert!(term.obsolete);
        assert_eq!(term.replaced_by, Some("GO:0044183".into()));
        assert_eq!(term.name.as_deref(), Some("obsolete ribosomal chaperone activity"));
    }

    #[test]
    fn parent_without_label() {
        assert_eq!(parent_id("GO:0000001"), Some("GO:0000001".into()));
        assert_eq!(parent_id("GO:0000001 ! root ! again"), Some("GO:0000001".into()));
        assert_eq!(parent_id(" ! root"), None);
    }

    #[test]
    fn multiple_parents() {
        let obo = "\
[Term]
id: GO:0000010
is_a: GO:0000001 ! a
is_a: GO:0000002 ! b
is_a: GO:0000003 ! c
";
        let parsed = parse_str(obo).unwrap();
        assert_eq!(parsed.edges().len(), 3);
        assert!(parsed.edges().iter().all(|edge| edge.child == "GO:0000010"));
    }
}
