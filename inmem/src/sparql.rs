//! Evaluation of SPARQL queries against a [`MemoryStore`].
//!
//! Solutions are computed eagerly:
//! the queries issued by the inference engine are small conjunctive queries,
//! whose results are consumed entirely anyway.
//!
//! Blank nodes in a query behave as non-distinguished variables.
use crate::{MemoryStore, MemoryStoreError};
use entail_api::query::{BindingSet, QueryResult};
use entail_api::statement::StatementMatcher;
use entail_api::store::Store;
use entail_api::term::{Iri, LanguageTag, Literal, Node};
use spargebra::algebra::{GraphPattern, QueryDataset};
use spargebra::term::{NamedNode, NamedNodePattern, TermPattern, TriplePattern};
use spargebra::{Query as QueryAST, SparqlParser};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

type Binding = HashMap<String, Node>;

/// Parse `query` and evaluate it against `store`.
pub(crate) fn evaluate<'a>(
    store: &'a MemoryStore,
    query: &str,
) -> Result<QueryResult<'a, MemoryStoreError>, MemoryStoreError> {
    let parsed = SparqlParser::new().parse_query(query)?;
    log::trace!("{:#?}", parsed);
    let exec = Exec { store };
    match &parsed {
        QueryAST::Select {
            dataset, pattern, ..
        } => {
            check_dataset(dataset)?;
            let Solutions { variables, rows } = exec.select(pattern, None)?;
            let variables: Arc<[String]> = variables.into();
            let rows = rows.into_iter().map(move |b| {
                let values = variables.iter().map(|v| b.get(v).cloned()).collect();
                Ok(BindingSet::new(Arc::clone(&variables), values))
            });
            Ok(QueryResult::from_bindings(rows))
        }
        QueryAST::Ask {
            dataset, pattern, ..
        } => {
            check_dataset(dataset)?;
            let found = !exec.select(pattern, None)?.rows.is_empty();
            Ok(QueryResult::from_bool(found))
        }
        QueryAST::Construct { .. } => Err(MemoryStoreError::NotImplemented("CONSTRUCT query")),
        QueryAST::Describe { .. } => Err(MemoryStoreError::NotImplemented("DESCRIBE query")),
    }
}

fn check_dataset(dataset: &Option<QueryDataset>) -> Result<(), MemoryStoreError> {
    match dataset {
        None => Ok(()),
        Some(_) => Err(MemoryStoreError::NotImplemented("FROM clause")),
    }
}

/// The solutions of a graph pattern, with the variables it binds (in order of appearance).
#[derive(Debug, Default)]
struct Solutions {
    variables: Vec<String>,
    rows: Vec<Binding>,
}

impl Solutions {
    fn add_variables<I: IntoIterator<Item = String>>(&mut self, vars: I) {
        for v in vars {
            if !self.variables.contains(&v) {
                self.variables.push(v);
            }
        }
    }

    fn join(mut self, right: Solutions) -> Solutions {
        self.add_variables(right.variables);
        let mut rows = vec![];
        for l in &self.rows {
            for r in &right.rows {
                if compatible(l, r) {
                    let mut merged = l.clone();
                    merged.extend(r.iter().map(|(k, v)| (k.clone(), v.clone())));
                    rows.push(merged);
                }
            }
        }
        self.rows = rows;
        self
    }

    fn union(mut self, right: Solutions) -> Solutions {
        self.add_variables(right.variables);
        self.rows.extend(right.rows);
        self
    }

    fn project(self, variables: Vec<String>) -> Solutions {
        let rows = self
            .rows
            .into_iter()
            .map(|mut b| {
                b.retain(|k, _| variables.contains(k));
                b
            })
            .collect();
        Solutions { variables, rows }
    }

    fn distinct(mut self) -> Solutions {
        let mut seen = HashSet::new();
        let variables = &self.variables;
        self.rows.retain(|b| {
            let key: Vec<Option<Node>> = variables.iter().map(|v| b.get(v).cloned()).collect();
            seen.insert(key)
        });
        self
    }

    fn slice(mut self, start: usize, length: Option<usize>) -> Solutions {
        self.rows = self
            .rows
            .into_iter()
            .skip(start)
            .take(length.unwrap_or(usize::MAX))
            .collect();
        self
    }
}

fn compatible(b1: &Binding, b2: &Binding) -> bool {
    b1.iter().all(|(k, v)| b2.get(k).map(|v2| v == v2).unwrap_or(true))
}

struct Exec<'a> {
    store: &'a MemoryStore,
}

impl Exec<'_> {
    /// Evaluates `pattern` on the active graph `graph`
    /// (`None` standing for the union of all graphs).
    fn select(&self, pattern: &GraphPattern, graph: Option<&Node>) -> Result<Solutions, MemoryStoreError> {
        use GraphPattern::*;
        use MemoryStoreError::NotImplemented;
        match pattern {
            Bgp { patterns } => self.bgp(patterns, graph),
            Join { left, right } => Ok(self.select(left, graph)?.join(self.select(right, graph)?)),
            Union { left, right } => Ok(self.select(left, graph)?.union(self.select(right, graph)?)),
            Graph { name, inner } => self.graph(name, inner),
            Project { inner, variables } => {
                let variables = variables.iter().map(|v| v.as_str().to_string()).collect();
                Ok(self.select(inner, graph)?.project(variables))
            }
            Distinct { inner } => Ok(self.select(inner, graph)?.distinct()),
            Reduced { inner } => self.select(inner, graph),
            Slice {
                inner,
                start,
                length,
            } => Ok(self.select(inner, graph)?.slice(*start, *length)),
            Filter { .. } => Err(NotImplemented("FILTER")),
            LeftJoin { .. } => Err(NotImplemented("OPTIONAL")),
            Minus { .. } => Err(NotImplemented("MINUS")),
            Path { .. } => Err(NotImplemented("property path")),
            Values { .. } => Err(NotImplemented("VALUES")),
            _ => Err(NotImplemented("graph pattern")),
        }
    }

    fn bgp(&self, patterns: &[TriplePattern], graph: Option<&Node>) -> Result<Solutions, MemoryStoreError> {
        let mut solutions = Solutions::default();
        for tp in patterns {
            solutions.add_variables(pattern_variables(tp));
        }
        self.bgp_rec(patterns, graph, Binding::new(), &mut solutions.rows)?;
        Ok(solutions)
    }

    fn bgp_rec(
        &self,
        patterns: &[TriplePattern],
        graph: Option<&Node>,
        b: Binding,
        rows: &mut Vec<Binding>,
    ) -> Result<(), MemoryStoreError> {
        let [first, remaining @ ..] = patterns else {
            // empty BGP, always succeeds
            rows.push(b);
            return Ok(());
        };
        let s = Slot::from_term(&first.subject, &b)?;
        let p = Slot::from_named_node(&first.predicate, &b);
        let o = Slot::from_term(&first.object, &b)?;
        let matcher = StatementMatcher {
            subject: s.bound(),
            predicate: p.bound(),
            object: o.bound(),
            context: graph.cloned(),
        };
        // the union of all graphs is a set of triples
        let mut seen = HashSet::new();
        for st in self.store.list_statements(&matcher) {
            let st = st?;
            if graph.is_none()
                && !seen.insert((st.subject.clone(), st.predicate.clone(), st.object.clone()))
            {
                continue;
            }
            let mut b2 = b.clone();
            if s.bind(&st.subject, &mut b2) && p.bind(&st.predicate, &mut b2) && o.bind(&st.object, &mut b2) {
                self.bgp_rec(remaining, graph, b2, rows)?;
            }
        }
        Ok(())
    }

    fn graph(&self, name: &NamedNodePattern, inner: &GraphPattern) -> Result<Solutions, MemoryStoreError> {
        match name {
            NamedNodePattern::NamedNode(nn) => self.select(inner, Some(&named_node(nn))),
            NamedNodePattern::Variable(var) => {
                let var = var.as_str();
                let mut solutions = Solutions {
                    variables: vec![var.to_string()],
                    rows: vec![],
                };
                let names: Vec<Node> = self.store.graph_names().cloned().collect();
                for g in names {
                    let Solutions { variables, rows } = self.select(inner, Some(&g))?;
                    solutions.add_variables(variables);
                    for mut row in rows {
                        match row.get(var) {
                            Some(n) if n != &g => continue,
                            Some(_) => {}
                            None => {
                                row.insert(var.to_string(), g.clone());
                            }
                        }
                        solutions.rows.push(row);
                    }
                }
                Ok(solutions)
            }
        }
    }
}

/// One position of a triple pattern, under the current binding.
enum Slot {
    Bound(Node),
    Free(String),
}

impl Slot {
    #[allow(unreachable_patterns)]
    fn from_term(tp: &TermPattern, b: &Binding) -> Result<Self, MemoryStoreError> {
        let key = match tp {
            TermPattern::NamedNode(nn) => return Ok(Slot::Bound(named_node(nn))),
            TermPattern::Literal(lit) => return Ok(Slot::Bound(literal(lit))),
            TermPattern::BlankNode(bn) => format!("_:{}", bn.as_str()),
            TermPattern::Variable(v) => v.as_str().to_string(),
            _ => return Err(MemoryStoreError::NotImplemented("quoted triple pattern")),
        };
        Ok(Self::free_or_bound(key, b))
    }

    fn from_named_node(nnp: &NamedNodePattern, b: &Binding) -> Self {
        match nnp {
            NamedNodePattern::NamedNode(nn) => Slot::Bound(named_node(nn)),
            NamedNodePattern::Variable(v) => Self::free_or_bound(v.as_str().to_string(), b),
        }
    }

    fn free_or_bound(key: String, b: &Binding) -> Self {
        match b.get(&key) {
            Some(n) => Slot::Bound(n.clone()),
            None => Slot::Free(key),
        }
    }

    fn bound(&self) -> Option<Node> {
        match self {
            Slot::Bound(n) => Some(n.clone()),
            Slot::Free(_) => None,
        }
    }

    /// Bind this slot to `node` in `b`,
    /// returning false if `b` already binds it to another node.
    fn bind(&self, node: &Node, b: &mut Binding) -> bool {
        match self {
            // already enforced by the matcher
            Slot::Bound(_) => true,
            Slot::Free(key) => match b.get(key) {
                Some(n) => n == node,
                None => {
                    b.insert(key.clone(), node.clone());
                    true
                }
            },
        }
    }
}

fn pattern_variables(tp: &TriplePattern) -> impl Iterator<Item = String> + '_ {
    let s = match &tp.subject {
        TermPattern::Variable(v) => Some(v.as_str().to_string()),
        _ => None,
    };
    let p = match &tp.predicate {
        NamedNodePattern::Variable(v) => Some(v.as_str().to_string()),
        _ => None,
    };
    let o = match &tp.object {
        TermPattern::Variable(v) => Some(v.as_str().to_string()),
        _ => None,
    };
    s.into_iter().chain(p).chain(o)
}

fn named_node(nn: &NamedNode) -> Node {
    Node::Iri(Iri::new_unchecked(nn.as_str()))
}

fn literal(lit: &spargebra::term::Literal) -> Node {
    match lit.language() {
        Some(tag) => Node::Literal(Literal::new_lang(
            lit.value(),
            LanguageTag::new_unchecked(tag.to_ascii_lowercase()),
        )),
        None => Node::typed_literal(lit.value(), Iri::new_unchecked(lit.datatype().as_str())),
    }
}
