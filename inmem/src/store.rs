//! I define [`MemoryStore`], an in-memory indexed quad store.
use crate::index::{TermIndex, DEFAULT_GRAPH};
use crate::{sparql, MemoryStoreError};
use entail_api::query::{QueryLanguage, QueryResult};
use entail_api::statement::{Statement, StatementMatcher};
use entail_api::store::{StatementIter, Store};
use entail_api::term::Node;
use std::collections::BTreeSet;

type Quad = [u32; 4];

/// An in-memory quad store.
///
/// Nodes are interned in a [`TermIndex`],
/// and every quad is stored in four sorted indexes
/// (`GSPO`, `SPOG`, `POSG`, `OSPG`),
/// so that any [`StatementMatcher`] is answered by a range scan.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    terms: TermIndex,
    gspo: BTreeSet<Quad>,
    spog: BTreeSet<Quad>,
    posg: BTreeSet<Quad>,
    ospg: BTreeSet<Quad>,
}

impl MemoryStore {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over the names of the non-empty named graphs of this store.
    pub fn graph_names(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut last = DEFAULT_GRAPH;
        self.gspo.iter().filter_map(move |q| {
            if q[0] == last {
                None
            } else {
                last = q[0];
                Some(self.terms.get_term(q[0]))
            }
        })
    }

    fn decode(&self, [g, s, p, o]: Quad) -> Statement {
        Statement {
            subject: self.terms.get_term(s).clone(),
            predicate: self.terms.get_term(p).clone(),
            object: self.terms.get_term(o).clone(),
            context: (g != DEFAULT_GRAPH).then(|| self.terms.get_term(g).clone()),
        }
    }

    /// Translate `matcher` into `[g, s, p, o]` index constraints.
    ///
    /// Return `None` if the matcher mentions a node absent from the store,
    /// in which case it can not match anything.
    fn encode_matcher(&self, matcher: &StatementMatcher) -> Option<[Option<u32>; 4]> {
        let enc = |n: &Option<Node>| match n {
            None => Some(None),
            Some(n) => self.terms.get_index(n).map(Some),
        };
        Some([
            enc(&matcher.context)?,
            enc(&matcher.subject)?,
            enc(&matcher.predicate)?,
            enc(&matcher.object)?,
        ])
    }

    /// All `[g, s, p, o]` quads satisfying the given constraints.
    fn quads_matching(&self, [g, s, p, o]: [Option<u32>; 4]) -> Box<dyn Iterator<Item = Quad> + '_> {
        let check = move |q: &Quad| {
            g.map(|i| i == q[0]).unwrap_or(true)
                && s.map(|i| i == q[1]).unwrap_or(true)
                && p.map(|i| i == q[2]).unwrap_or(true)
                && o.map(|i| i == q[3]).unwrap_or(true)
        };
        // pick the index with the longest usable prefix
        match (s, p, o) {
            (Some(s), Some(p), Some(o)) => Box::new(
                prefix_scan(&self.spog, &[s, p, o])
                    .map(|[s, p, o, g]| [g, s, p, o])
                    .filter(check),
            ),
            (Some(s), Some(p), None) => Box::new(
                prefix_scan(&self.spog, &[s, p])
                    .map(|[s, p, o, g]| [g, s, p, o])
                    .filter(check),
            ),
            (Some(s), None, Some(o)) => Box::new(
                prefix_scan(&self.ospg, &[o, s])
                    .map(|[o, s, p, g]| [g, s, p, o])
                    .filter(check),
            ),
            (Some(s), None, None) => Box::new(
                prefix_scan(&self.spog, &[s])
                    .map(|[s, p, o, g]| [g, s, p, o])
                    .filter(check),
            ),
            (None, Some(p), Some(o)) => Box::new(
                prefix_scan(&self.posg, &[p, o])
                    .map(|[p, o, s, g]| [g, s, p, o])
                    .filter(check),
            ),
            (None, Some(p), None) => Box::new(
                prefix_scan(&self.posg, &[p])
                    .map(|[p, o, s, g]| [g, s, p, o])
                    .filter(check),
            ),
            (None, None, Some(o)) => Box::new(
                prefix_scan(&self.ospg, &[o])
                    .map(|[o, s, p, g]| [g, s, p, o])
                    .filter(check),
            ),
            (None, None, None) => match g {
                Some(g) => Box::new(prefix_scan(&self.gspo, &[g])),
                None => Box::new(self.gspo.iter().copied()),
            },
        }
    }

    fn insert_quad(&mut self, [g, s, p, o]: Quad) -> bool {
        if !self.gspo.insert([g, s, p, o]) {
            return false;
        }
        self.spog.insert([s, p, o, g]);
        self.posg.insert([p, o, s, g]);
        self.ospg.insert([o, s, p, g]);
        true
    }

    fn remove_quad(&mut self, [g, s, p, o]: Quad) -> bool {
        if !self.gspo.remove(&[g, s, p, o]) {
            return false;
        }
        self.spog.remove(&[s, p, o, g]);
        self.posg.remove(&[p, o, s, g]);
        self.ospg.remove(&[o, s, p, g]);
        true
    }
}

fn prefix_scan<'a>(set: &'a BTreeSet<Quad>, prefix: &[u32]) -> impl Iterator<Item = Quad> + 'a {
    let mut lo = [u32::MIN; 4];
    let mut hi = [u32::MAX; 4];
    lo[..prefix.len()].copy_from_slice(prefix);
    hi[..prefix.len()].copy_from_slice(prefix);
    set.range(lo..=hi).copied()
}

impl Store for MemoryStore {
    type Error = MemoryStoreError;

    fn add_statement(&mut self, statement: Statement) -> Result<(), Self::Error> {
        if !statement.is_valid() {
            return Err(MemoryStoreError::InvalidStatement(statement));
        }
        let mut ensure = |n: &Node| self.terms.ensure_index(n).ok_or(MemoryStoreError::TermIndexFull);
        let g = match &statement.context {
            None => DEFAULT_GRAPH,
            Some(c) => ensure(c)?,
        };
        let s = ensure(&statement.subject)?;
        let p = ensure(&statement.predicate)?;
        let o = ensure(&statement.object)?;
        if self.insert_quad([g, s, p, o]) {
            log::trace!("added {statement}");
        }
        Ok(())
    }

    fn remove_statements(&mut self, matcher: &StatementMatcher) -> Result<usize, Self::Error> {
        let Some(constraints) = self.encode_matcher(matcher) else {
            return Ok(0);
        };
        let quads: Vec<_> = self.quads_matching(constraints).collect();
        let mut count = 0;
        for q in quads {
            if self.remove_quad(q) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn list_statements(&self, matcher: &StatementMatcher) -> StatementIter<'_, Self::Error> {
        match self.encode_matcher(matcher) {
            None => StatementIter::new(std::iter::empty()),
            Some(constraints) => {
                StatementIter::new(self.quads_matching(constraints).map(|q| Ok(self.decode(q))))
            }
        }
    }

    fn contains_any_statement(&self, statement: &Statement) -> Result<bool, Self::Error> {
        let matcher = StatementMatcher::new(
            Some(statement.subject.clone()),
            Some(statement.predicate.clone()),
            Some(statement.object.clone()),
        );
        Ok(self
            .encode_matcher(&matcher)
            .map(|c| self.quads_matching(c).next().is_some())
            .unwrap_or(false))
    }

    fn execute_query(
        &self,
        query: &str,
        language: QueryLanguage,
    ) -> Result<QueryResult<'_, Self::Error>, Self::Error> {
        match language {
            QueryLanguage::Sparql => sparql::evaluate(self, query),
            QueryLanguage::User(name) => Err(MemoryStoreError::UnsupportedLanguage(name)),
        }
    }

    fn statement_count(&self) -> Result<usize, Self::Error> {
        Ok(self.gspo.len())
    }
}
