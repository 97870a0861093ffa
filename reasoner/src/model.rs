//! I define [`InferenceModel`], the inference engine wrapping a [`Store`].
use crate::config::InferenceConfig;
use crate::error::{InferenceError, InferenceResult};
use crate::observer::{CancellationFlag, InferenceEvent, InferenceObserver};
use crate::provenance::{metadata_graph, mint_resource, Provenance};
use crate::rule::Rule;
use crate::ruleset::{RuleParser, RuleSet};
use entail_api::ns::{entail, rdf};
use entail_api::query::QueryLanguage;
use entail_api::statement::{Statement, StatementMatcher};
use entail_api::store::Store;
use entail_api::term::Node;
use std::collections::{BTreeSet, VecDeque};

/// A [`Store`] wrapper materializing the consequences of a set of [rules](Rule).
///
/// Every statement inferred by a rule is stored in a graph of its own
/// (an *inference graph*), described in the [metadata graph](crate::provenance::metadata_graph)
/// together with the statements it was inferred from.
/// This allows inferred statements to be retracted when any of their sources is removed.
/// Rules never match the statements of the metadata graph.
///
/// Inference is incremental:
/// [`add_statement`](InferenceModel::add_statement) only fires the rules that the new statement can trigger,
/// and [`remove_statements`](InferenceModel::remove_statements) only retracts what depended on the removed statements.
/// Changing the rules, or modifying the store directly, requires a
/// [`clear_inference`](InferenceModel::clear_inference) followed by a
/// [`perform_inference`](InferenceModel::perform_inference).
pub struct InferenceModel<S: Store> {
    store: S,
    rules: RuleSet,
    config: InferenceConfig,
    provenance: Provenance,
    observers: Vec<Box<dyn InferenceObserver>>,
}

impl<S: Store> InferenceModel<S> {
    /// Wrap `store`, with the default configuration and no rule.
    pub fn new(store: S) -> Self {
        Self::new_with_config(store, InferenceConfig::new())
    }

    /// Wrap `store`, with the given configuration and no rule.
    pub fn new_with_config(store: S, config: InferenceConfig) -> Self {
        InferenceModel {
            store,
            rules: RuleSet::new(),
            provenance: Provenance::new(config.provenance()),
            config,
            observers: vec![],
        }
    }

    /// The configuration of this model.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// The rules of this model.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Add a rule to this model, replacing the rule with the same name if any.
    ///
    /// NB: the new rule is not applied to the statements already in the store.
    pub fn add_rule(&mut self, rule: Rule) -> Option<Rule> {
        self.rules.insert(rule)
    }

    /// Replace all the rules of this model.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    /// Parse a rule file (see [`RuleParser`]) and add its rules to this model.
    ///
    /// Return the number of rules read.
    pub fn load_rules(&mut self, text: &str) -> InferenceResult<usize, S::Error> {
        let rules = RuleParser::new().parse_str(text)?;
        let n = rules.len();
        self.rules.extend(rules);
        Ok(n)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying store, for modifications bypassing inference.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Register an observer, to be notified after each successful mutating operation.
    pub fn add_observer<O: InferenceObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Add `statement` to the store, and infer the statements it entails
    /// (recursively, unless [configured](InferenceConfig::recursive) otherwise).
    ///
    /// Return the number of inferred statements.
    pub fn add_statement(&mut self, statement: Statement) -> InferenceResult<usize, S::Error> {
        let inferred = self.assert(statement)?;
        self.notify(InferenceEvent::StatementsAdded {
            asserted: 1,
            inferred,
        });
        Ok(inferred)
    }

    /// Add several statements (see [`add_statement`](InferenceModel::add_statement)).
    ///
    /// Return the number of inferred statements.
    pub fn add_statements<I>(&mut self, statements: I) -> InferenceResult<usize, S::Error>
    where
        I: IntoIterator<Item = Statement>,
    {
        let mut asserted = 0;
        let mut inferred = 0;
        for st in statements {
            inferred += self.assert(st)?;
            asserted += 1;
        }
        self.notify(InferenceEvent::StatementsAdded { asserted, inferred });
        Ok(inferred)
    }

    fn assert(&mut self, statement: Statement) -> InferenceResult<usize, S::Error> {
        if !statement.is_valid() {
            return Err(InferenceError::InvalidStatement(statement));
        }
        self.store
            .add_statement(statement.clone())
            .map_err(InferenceError::Store)?;
        let recurse = self.config.recursive();
        let mut pass = Pass::new(self, None);
        pass.trigger(&statement)?;
        if recurse {
            pass.drain()?;
        }
        Ok(pass.inferred)
    }

    /// Fire every rule matching `statement`, which is assumed to be in the store.
    ///
    /// If `recurse` is true, the inferred statements fire rules in turn, until no new statement is inferred.
    /// Return the number of inferred statements.
    pub fn infer_statement(&mut self, statement: &Statement, recurse: bool) -> InferenceResult<usize, S::Error> {
        let inferred = {
            let mut pass = Pass::new(self, None);
            pass.trigger(statement)?;
            if recurse {
                pass.drain()?;
            }
            pass.inferred
        };
        self.notify(InferenceEvent::InferencePerformed { inferred });
        Ok(inferred)
    }

    /// Remove all statements matching `matcher`,
    /// together with all the statements inferred from them.
    ///
    /// Statements of the metadata graph are never matched.
    /// Return the number of statements matching `matcher` that were removed.
    pub fn remove_statements(&mut self, matcher: &StatementMatcher) -> InferenceResult<usize, S::Error> {
        let meta = metadata_graph();
        let mut targets = vec![];
        for st in self.store.list_statements(matcher) {
            let st = st.map_err(InferenceError::Store)?;
            if st.context.as_ref() != Some(&meta) {
                targets.push(st);
            }
        }
        let mut visited = BTreeSet::new();
        let mut removed = 0;
        let mut dropped = 0;
        for st in targets {
            dropped += self.drop_dependants(&st, &mut visited)?;
            removed += self
                .store
                .remove_statements(&StatementMatcher::from(&st))
                .map_err(InferenceError::Store)?;
            // an inferred statement takes its inference graph with it
            if let Some(g) = &st.context {
                if visited.insert(g.clone()) && self.is_inference_graph(g)? {
                    self.provenance
                        .drop_graph(&mut self.store, g)
                        .map_err(InferenceError::Store)?;
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            log::debug!("{removed} statements removed, {dropped} inference graphs dropped");
        }
        self.notify(InferenceEvent::StatementsRemoved {
            removed,
            inference_graphs_dropped: dropped,
        });
        Ok(removed)
    }

    /// Drop every inference graph depending, directly or transitively, on `st`,
    /// skipping those in `visited`.
    fn drop_dependants(
        &mut self,
        st: &Statement,
        visited: &mut BTreeSet<Node>,
    ) -> InferenceResult<usize, S::Error> {
        let mut pending: Vec<Node> = self.sourced_by(st)?;
        pending.retain(|g| visited.insert(g.clone()));
        let mut to_drop = vec![];
        while let Some(g) = pending.pop() {
            let members = self
                .store
                .list_statements(&StatementMatcher::graph(g.clone()))
                .all_statements()
                .map_err(InferenceError::Store)?;
            for m in members {
                for g2 in self.sourced_by(&m)? {
                    if visited.insert(g2.clone()) {
                        pending.push(g2);
                    }
                }
            }
            to_drop.push(g);
        }
        for g in &to_drop {
            self.provenance
                .drop_graph(&mut self.store, g)
                .map_err(InferenceError::Store)?;
            log::debug!("dropped inference graph {g}");
        }
        Ok(to_drop.len())
    }

    fn sourced_by(&self, st: &Statement) -> InferenceResult<Vec<Node>, S::Error> {
        let graphs = self
            .provenance
            .graphs_sourced_by(&self.store, st)
            .map_err(InferenceError::Store)?;
        Ok(graphs.into_iter().collect())
    }

    fn is_inference_graph(&self, g: &Node) -> InferenceResult<bool, S::Error> {
        let marker = StatementMatcher::new(
            Some(g.clone()),
            Some(rdf::type_.into()),
            Some(entail::InferenceGraph.into()),
        )
        .in_graph(metadata_graph());
        self.store
            .contains_statements(&marker)
            .map_err(InferenceError::Store)
    }

    /// Apply all the rules to the whole store, until no new statement is inferred.
    ///
    /// Return the number of inferred statements.
    pub fn perform_inference(&mut self) -> InferenceResult<usize, S::Error> {
        self.perform_inference_with(&CancellationFlag::new())
    }

    /// Same as [`perform_inference`](InferenceModel::perform_inference),
    /// but stop with [`InferenceError::Cancelled`] as soon as `cancel` is raised.
    ///
    /// The statements inferred before cancellation are kept.
    pub fn perform_inference_with(&mut self, cancel: &CancellationFlag) -> InferenceResult<usize, S::Error> {
        let inferred = {
            let mut pass = Pass::new(self, Some(cancel));
            let rules = pass.rules;
            for rule in rules {
                pass.fire(rule, None)?;
            }
            pass.drain()?;
            pass.inferred
        };
        log::info!("inference performed, {inferred} statements inferred");
        self.notify(InferenceEvent::InferencePerformed { inferred });
        Ok(inferred)
    }

    /// Remove all inferred statements, and all provenance data.
    ///
    /// Return the number of inference graphs dropped.
    pub fn clear_inference(&mut self) -> InferenceResult<usize, S::Error> {
        let query = format!(
            "SELECT ?g WHERE {{ GRAPH {} {{ ?g {} {} . }} }}",
            metadata_graph(),
            rdf::type_.to_node(),
            entail::InferenceGraph.to_node(),
        );
        log::trace!("{query}");
        let rows = self
            .store
            .execute_query(&query, QueryLanguage::Sparql)
            .map_err(|source| InferenceError::QueryCompilation {
                query: query.clone(),
                source,
            })?
            .all_bindings()
            .map_err(InferenceError::Store)?;
        let graphs: BTreeSet<Node> = rows.iter().filter_map(|b| b.get("g").cloned()).collect();
        for g in &graphs {
            self.store
                .remove_statements(&StatementMatcher::graph(g.clone()))
                .map_err(InferenceError::Store)?;
        }
        self.store
            .remove_statements(&StatementMatcher::graph(metadata_graph()))
            .map_err(InferenceError::Store)?;
        let n = graphs.len();
        log::info!("inference cleared, {n} inference graphs dropped");
        self.notify(InferenceEvent::InferenceCleared { graphs: n });
        Ok(n)
    }

    /// The number of statements in the store, excluding provenance data.
    pub fn statement_count(&self) -> InferenceResult<usize, S::Error> {
        let total = self.store.statement_count().map_err(InferenceError::Store)?;
        let mut meta = 0;
        for st in self.store.list_statements(&StatementMatcher::graph(metadata_graph())) {
            st.map_err(InferenceError::Store)?;
            meta += 1;
        }
        Ok(total - meta)
    }

    fn notify(&mut self, event: InferenceEvent) {
        for o in &mut self.observers {
            o.on_event(&event);
        }
    }
}

/// The state of one inference pass.
struct Pass<'a, S: Store> {
    store: &'a mut S,
    rules: &'a RuleSet,
    provenance: Provenance,
    optimized: bool,
    cancel: Option<&'a CancellationFlag>,
    queue: VecDeque<Statement>,
    inferred: usize,
}

impl<'a, S: Store> Pass<'a, S> {
    fn new(model: &'a mut InferenceModel<S>, cancel: Option<&'a CancellationFlag>) -> Self {
        Pass {
            store: &mut model.store,
            rules: &model.rules,
            provenance: model.provenance,
            optimized: model.config.optimized_queries(),
            cancel,
            queue: VecDeque::new(),
            inferred: 0,
        }
    }

    fn check_cancelled(&self) -> InferenceResult<(), S::Error> {
        match self.cancel {
            Some(flag) if flag.is_cancelled() => Err(InferenceError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Fire every rule matching `st`.
    fn trigger(&mut self, st: &Statement) -> InferenceResult<(), S::Error> {
        let rules = self.rules;
        for rule in rules.iter().filter(|r| r.matches(st)) {
            self.fire(rule, Some(st))?;
        }
        Ok(())
    }

    /// Fire the rules matching the inferred statements, until none is left.
    fn drain(&mut self) -> InferenceResult<(), S::Error> {
        while let Some(st) = self.queue.pop_front() {
            self.check_cancelled()?;
            self.trigger(&st)?;
        }
        Ok(())
    }

    fn fire(&mut self, rule: &Rule, trigger: Option<&Statement>) -> InferenceResult<(), S::Error> {
        let bound = rule.bind_to_statement(trigger);
        let query = bound.compile_query(self.optimized)?;
        if query.is_unsatisfiable() {
            log::trace!("{}: no possible match for {:?}", rule.label(), trigger);
            return Ok(());
        }
        let query = query.to_string();
        log::trace!("{}: {query}", rule.label());
        let rows = self
            .store
            .execute_query(&query, QueryLanguage::Sparql)
            .map_err(|source| InferenceError::QueryCompilation {
                query: query.clone(),
                source,
            })?
            .all_bindings()
            .map_err(InferenceError::Store)?;
        for row in rows {
            self.check_cancelled()?;
            log::trace!("{row:?}");
            for inst in bound.instantiations(&row)? {
                let effect = inst.effect();
                if !effect.is_valid() {
                    log::debug!("{}: skipping invalid statement {effect}", rule.label());
                    continue;
                }
                if self
                    .store
                    .contains_any_statement(effect)
                    .map_err(InferenceError::Store)?
                {
                    continue;
                }
                // rows may come from the metadata graph, or from a candidate that does not hold
                if !self.all_hold(inst.preconditions())? {
                    continue;
                }
                self.materialize(rule, effect.clone(), inst.preconditions())?;
            }
        }
        Ok(())
    }

    /// Whether every statement of `statements` is in some graph other than the metadata graph.
    fn all_hold(&self, statements: &[Statement]) -> InferenceResult<bool, S::Error> {
        let meta = metadata_graph();
        for st in statements {
            let matcher = StatementMatcher::new(
                Some(st.subject.clone()),
                Some(st.predicate.clone()),
                Some(st.object.clone()),
            );
            let mut found = false;
            for candidate in self.store.list_statements(&matcher) {
                if candidate.map_err(InferenceError::Store)?.context.as_ref() != Some(&meta) {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn materialize(
        &mut self,
        rule: &Rule,
        effect: Statement,
        sources: &[Statement],
    ) -> InferenceResult<(), S::Error> {
        let g = mint_resource(&*self.store).map_err(InferenceError::Store)?;
        let effect = effect.with_context(Some(g.clone()));
        self.store
            .add_statement(effect.clone())
            .map_err(InferenceError::Store)?;
        self.provenance
            .mark_inference_graph(&mut *self.store, &g)
            .map_err(InferenceError::Store)?;
        for source in sources {
            self.provenance
                .record_source(&mut *self.store, &g, source)
                .map_err(InferenceError::Store)?;
        }
        log::debug!("{}: inferred {effect}", rule.label());
        self.inferred += 1;
        self.queue.push_back(effect);
        Ok(())
    }
}
