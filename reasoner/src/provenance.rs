//! I record which statements justify each inference graph,
//! so that inferred statements can be retracted along with their sources.
//!
//! All provenance data lives in the metadata graph ([`entail::InferenceMetadata`]):
//! * `g rdf:type entail:InferenceGraph` marks `g` as an inference graph;
//! * `g entail:sourceStatement ref` links `g` to each of its sources,
//!   where `ref` depends on the [`ProvenanceMode`].
use entail_api::ns::{entail, rdf};
use entail_api::statement::{Statement, StatementMatcher};
use entail_api::store::Store;
use entail_api::term::Node;
use std::collections::BTreeSet;
use uuid::Uuid;

/// How source statements are referred to in the metadata graph.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ProvenanceMode {
    /// A source is referred to by a plain literal,
    /// holding the N-Triples form of its subject, predicate and object
    /// (see [`fingerprint`]).
    #[default]
    Compressed,
    /// A source is referred to by a fresh resource `r`,
    /// described with the RDF reification vocabulary
    /// (`rdf:subject`, `rdf:predicate`, `rdf:object`),
    /// plus `entail:context` if the source is in a named graph.
    Uncompressed,
}

/// The graph holding all provenance data.
pub fn metadata_graph() -> Node {
    entail::InferenceMetadata.to_node()
}

/// The literal used to refer to `st` in [`ProvenanceMode::Compressed`] mode.
///
/// The context of `st` is ignored.
pub fn fingerprint(st: &Statement) -> Node {
    Node::literal(format!("{} {} {}", st.subject, st.predicate, st.object))
}

/// Reads and writes provenance data in a [`Store`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Provenance {
    mode: ProvenanceMode,
}

impl Provenance {
    /// Build a provenance recorder using the given mode.
    pub fn new(mode: ProvenanceMode) -> Self {
        Provenance { mode }
    }

    /// The mode of this recorder.
    pub fn mode(&self) -> ProvenanceMode {
        self.mode
    }

    /// Mark `graph` as an inference graph.
    pub fn mark_inference_graph<S: Store>(&self, store: &mut S, graph: &Node) -> Result<(), S::Error> {
        store.add_statement(Statement::in_graph(
            graph.clone(),
            rdf::type_,
            entail::InferenceGraph,
            metadata_graph(),
        ))
    }

    /// Record that `source` is one of the statements justifying `graph`.
    pub fn record_source<S: Store>(
        &self,
        store: &mut S,
        graph: &Node,
        source: &Statement,
    ) -> Result<(), S::Error> {
        let meta = metadata_graph();
        let reference = match self.mode {
            ProvenanceMode::Compressed => fingerprint(source),
            ProvenanceMode::Uncompressed => {
                let r = mint_resource(store)?;
                let mut describe = |p: Node, o: Node| {
                    store.add_statement(Statement::in_graph(r.clone(), p, o, meta.clone()))
                };
                describe(rdf::type_.into(), rdf::Statement.into())?;
                describe(rdf::subject.into(), source.subject.clone())?;
                describe(rdf::predicate.into(), source.predicate.clone())?;
                describe(rdf::object.into(), source.object.clone())?;
                if let Some(c) = &source.context {
                    describe(entail::context.into(), c.clone())?;
                }
                r
            }
        };
        store.add_statement(Statement::in_graph(
            graph.clone(),
            entail::sourceStatement,
            reference,
            meta,
        ))
    }

    /// The inference graphs having `st` among their sources.
    ///
    /// Only the subject, predicate and object of `st` are taken into account.
    pub fn graphs_sourced_by<S: Store>(&self, store: &S, st: &Statement) -> Result<BTreeSet<Node>, S::Error> {
        let references = match self.mode {
            ProvenanceMode::Compressed => BTreeSet::from([fingerprint(st)]),
            ProvenanceMode::Uncompressed => {
                let records = |p: Node, o: &Node| {
                    store
                        .list_statements(&meta_matcher(None, Some(p), Some(o.clone())))
                        .all_subjects()
                };
                let mut found = records(rdf::subject.into(), &st.subject)?;
                if !found.is_empty() {
                    let with_pred = records(rdf::predicate.into(), &st.predicate)?;
                    found.retain(|r| with_pred.contains(r));
                }
                if !found.is_empty() {
                    let with_obj = records(rdf::object.into(), &st.object)?;
                    found.retain(|r| with_obj.contains(r));
                }
                found
            }
        };
        let mut graphs = BTreeSet::new();
        for r in references {
            let m = meta_matcher(None, Some(entail::sourceStatement.into()), Some(r));
            graphs.extend(store.list_statements(&m).all_subjects()?);
        }
        Ok(graphs)
    }

    /// Remove `graph`, with all its provenance data.
    ///
    /// Return the number of statements that were in `graph`.
    pub fn drop_graph<S: Store>(&self, store: &mut S, graph: &Node) -> Result<usize, S::Error> {
        let removed = store.remove_statements(&StatementMatcher::graph(graph.clone()))?;
        if self.mode == ProvenanceMode::Uncompressed {
            let m = meta_matcher(Some(graph.clone()), Some(entail::sourceStatement.into()), None);
            let records = store.list_statements(&m).all_objects()?;
            for r in records.into_iter().filter(Node::is_resource) {
                store.remove_statements(&meta_matcher(Some(r), None, None))?;
            }
        }
        store.remove_statements(&meta_matcher(Some(graph.clone()), None, None))?;
        log::trace!("dropped inference graph {graph} ({removed} statements)");
        Ok(removed)
    }
}

/// Mint an IRI that is neither a subject nor a graph name in `store`.
pub fn mint_resource<S: Store>(store: &S) -> Result<Node, S::Error> {
    loop {
        let candidate = Node::iri_unchecked(format!("urn:uuid:{}", Uuid::new_v4()));
        let as_subject = StatementMatcher::new(Some(candidate.clone()), None, None);
        if !store.contains_statements(&as_subject)?
            && !store.contains_statements(&StatementMatcher::graph(candidate.clone()))?
        {
            return Ok(candidate);
        }
        log::debug!("minted IRI {candidate} is already in use");
    }
}

fn meta_matcher(s: Option<Node>, p: Option<Node>, o: Option<Node>) -> StatementMatcher {
    StatementMatcher::new(s, p, o).in_graph(metadata_graph())
}
