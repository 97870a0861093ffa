//! I define [`Rule`], an inference rule made of preconditions and an effect,
//! and the machinery to turn a rule into SPARQL queries and query results into statements.
//!
//! A rule is an immutable value.
//! To fire it for a given statement (its *trigger*),
//! [bind](Rule::bind_to_statement) it to that statement,
//! which yields a short-lived [`BoundRule`].
use crate::pattern::{NodePattern, StatementPattern};
use entail_api::query::BindingSet;
use entail_api::statement::Statement;
use entail_api::term::{Node, VarName};
use std::fmt;
use thiserror::Error;

/// A position of a compiled pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Slot {
    /// index in [`Rule::variables`]
    Var(usize),
    Fixed(Node),
}

/// Values for each variable of a rule, indexed like [`Rule::variables`].
type Values = Vec<Option<Node>>;

/// An inference rule: if all the preconditions hold (under one consistent binding
/// of their variables), then the effect holds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    name: Option<String>,
    preconditions: Vec<StatementPattern>,
    effect: StatementPattern,
    variables: Vec<VarName>,
    precondition_slots: Vec<[Slot; 3]>,
    effect_slots: [Slot; 3],
}

impl Rule {
    /// Build an anonymous rule.
    ///
    /// Fails if `preconditions` is empty,
    /// if a pattern has a fixed predicate that is not an IRI,
    /// or if a variable of `effect` does not appear in any precondition.
    pub fn new(preconditions: Vec<StatementPattern>, effect: StatementPattern) -> Result<Self, RuleError> {
        Self::build(None, preconditions, effect)
    }

    /// Build a named rule (see [`Rule::new`]).
    pub fn named<T: Into<String>>(
        name: T,
        preconditions: Vec<StatementPattern>,
        effect: StatementPattern,
    ) -> Result<Self, RuleError> {
        Self::build(Some(name.into()), preconditions, effect)
    }

    fn build(
        name: Option<String>,
        preconditions: Vec<StatementPattern>,
        effect: StatementPattern,
    ) -> Result<Self, RuleError> {
        let mut variables: Vec<VarName> = vec![];
        for v in preconditions.iter().flat_map(StatementPattern::variables) {
            if !variables.contains(v) {
                variables.push(v.clone());
            }
        }
        let mut rule = Rule {
            name,
            preconditions,
            effect,
            variables,
            precondition_slots: vec![],
            effect_slots: [Slot::Var(0), Slot::Var(0), Slot::Var(0)],
        };
        if rule.preconditions.is_empty() {
            return Err(RuleError::NoPrecondition { rule: rule.label() });
        }
        for p in rule.preconditions.iter().chain(Some(&rule.effect)) {
            if let NodePattern::Fixed(n) = &p.predicate {
                if !n.is_iri() {
                    return Err(RuleError::InvalidPredicate {
                        rule: rule.label(),
                        pattern: p.to_string(),
                    });
                }
            }
        }
        if let Some(v) = rule.effect.variables().find(|v| !rule.variables.contains(v)) {
            return Err(RuleError::UnboundVariable {
                rule: rule.label(),
                variable: v.to_string(),
            });
        }
        rule.precondition_slots = rule.preconditions.iter().map(|p| rule.slots(p)).collect();
        rule.effect_slots = rule.slots(&rule.effect);
        Ok(rule)
    }

    fn slots(&self, pattern: &StatementPattern) -> [Slot; 3] {
        pattern.positions().map(|np| match np {
            NodePattern::Fixed(n) => Slot::Fixed(n.clone()),
            NodePattern::Variable(v) => {
                let i = self.var_index(v);
                debug_assert!(i.is_some(), "variable {v} is not interned");
                Slot::Var(i.unwrap_or_default())
            }
        })
    }

    fn var_index(&self, v: &VarName) -> Option<usize> {
        self.variables.iter().position(|w| w == v)
    }

    /// The name of this rule, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The preconditions of this rule, in order.
    pub fn preconditions(&self) -> &[StatementPattern] {
        &self.preconditions
    }

    /// The effect of this rule.
    pub fn effect(&self) -> &StatementPattern {
        &self.effect
    }

    /// The distinct variables of this rule, in order of first appearance in the preconditions.
    pub fn variables(&self) -> &[VarName] {
        &self.variables
    }

    /// Whether `st` matches any precondition of this rule,
    /// i.e. whether adding `st` to a store might make this rule produce new statements.
    pub fn matches(&self, st: &Statement) -> bool {
        self.preconditions.iter().any(|p| p.matches(st))
    }

    /// Bind this rule to the statement that triggered it.
    ///
    /// `None`, or a statement that is not [valid](Statement::is_valid),
    /// yields a rule with no trigger.
    pub fn bind_to_statement(&self, trigger: Option<&Statement>) -> BoundRule<'_> {
        BoundRule {
            rule: self,
            trigger: trigger.filter(|st| st.is_valid()).cloned(),
        }
    }

    /// The name of this rule if it has one, its textual form otherwise.
    pub(crate) fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.to_string(),
        }
    }

    /// The substitution that makes the `j`-th precondition equal to `trigger`,
    /// or `None` if there is none.
    fn trigger_substitution(&self, j: usize, trigger: &Statement) -> Option<Values> {
        let mut subst = vec![None; self.variables.len()];
        let nodes = [&trigger.subject, &trigger.predicate, &trigger.object];
        for (slot, node) in self.precondition_slots[j].iter().zip(nodes) {
            match slot {
                Slot::Fixed(n) if n != node => return None,
                Slot::Fixed(_) => {}
                Slot::Var(i) => match &subst[*i] {
                    Some(prev) if prev != node => return None,
                    Some(_) => {}
                    None => subst[*i] = Some(node.clone()),
                },
            }
        }
        // only an IRI can stand in a predicate position
        let bad_predicate = self.precondition_slots.iter().any(|slots| match &slots[1] {
            Slot::Var(i) => subst[*i].as_ref().is_some_and(|n| !n.is_iri()),
            Slot::Fixed(_) => false,
        });
        if bad_predicate {
            return None;
        }
        Some(subst)
    }

    fn instantiate(&self, slots: &[Slot; 3], values: &[Node]) -> Statement {
        let node = |slot: &Slot| match slot {
            Slot::Fixed(n) => n.clone(),
            Slot::Var(i) => values[*i].clone(),
        };
        Statement::new(node(&slots[0]), node(&slots[1]), node(&slots[2]))
    }

    fn render(&self, pattern: &StatementPattern, subst: &[Option<Node>]) -> String {
        pattern.to_sparql(|v| self.var_index(v).and_then(|i| subst[i].as_ref()))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        for (i, p) in self.preconditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            p.fmt(f)?;
        }
        write!(f, " -> {}]", self.effect)
    }
}

/// A [`Rule`] bound to the statement that triggered it (if any).
#[derive(Clone, Debug)]
pub struct BoundRule<'a> {
    rule: &'a Rule,
    trigger: Option<Statement>,
}

impl<'a> BoundRule<'a> {
    /// The underlying rule.
    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// The statement this rule is bound to, if any.
    pub fn trigger(&self) -> Option<&Statement> {
        self.trigger.as_ref()
    }

    /// Compile this rule into a query retrieving the bindings of its preconditions.
    ///
    /// If `use_trigger` is true and this rule has a trigger,
    /// the query only retrieves the bindings involving the trigger:
    /// for every precondition matching the trigger,
    /// the other preconditions are queried with the variables of that precondition fixed.
    /// The resulting rows lack those variables;
    /// [`instantiations`](BoundRule::instantiations) restores them from the trigger.
    ///
    /// Fails with [`RuleError::TriggerMismatch`] if no precondition matches the trigger.
    pub fn compile_query(&self, use_trigger: bool) -> Result<Query, RuleError> {
        let rule = self.rule;
        let full = || Query {
            alternatives: vec![rule.preconditions.iter().map(|p| p.to_sparql(|_| None)).collect()],
        };
        let Some(trigger) = self.trigger.as_ref().filter(|_| use_trigger) else {
            return Ok(full());
        };
        let matching: Vec<usize> = (0..rule.preconditions.len())
            .filter(|j| rule.preconditions[*j].matches(trigger))
            .collect();
        if matching.is_empty() {
            return Err(RuleError::TriggerMismatch {
                rule: rule.label(),
                statement: trigger.to_string(),
            });
        }
        // blank nodes in a query are variables, so they can not be used to fix a variable
        if [&trigger.subject, &trigger.predicate, &trigger.object]
            .into_iter()
            .any(Node::is_blank_node)
        {
            return Ok(full());
        }
        let alternatives = matching
            .into_iter()
            .filter_map(|j| {
                let subst = rule.trigger_substitution(j, trigger)?;
                Some(
                    rule.preconditions
                        .iter()
                        .enumerate()
                        .filter(|(k, _)| *k != j)
                        .map(|(_, p)| rule.render(p, &subst))
                        .collect(),
                )
            })
            .collect();
        Ok(Query { alternatives })
    }

    /// Every way in which `row`, one result of [`compile_query`](BoundRule::compile_query),
    /// completed with the trigger, binds all the variables of the rule.
    ///
    /// The result is usually a single instantiation;
    /// when several preconditions could have been satisfied by the trigger,
    /// it may contain several ones, some of which may not hold in the store.
    ///
    /// Fails with [`RuleError::UnboundVariable`] if `row` can not be completed.
    pub fn instantiations(&self, row: &BindingSet) -> Result<Vec<Instantiation>, RuleError> {
        let rule = self.rule;
        let values: Values = rule
            .variables
            .iter()
            .map(|v| row.get(v.as_str()).cloned())
            .collect();
        let complete = |vals: &Values| vals.iter().all(Option::is_some);
        if complete(&values) {
            return Ok(vec![self.instantiation(values, None)]);
        }
        let mut ret = vec![];
        if let Some(trigger) = &self.trigger {
            for j in 0..rule.preconditions.len() {
                let vars: Vec<usize> = rule.precondition_slots[j]
                    .iter()
                    .filter_map(|s| match s {
                        Slot::Var(i) => Some(*i),
                        Slot::Fixed(_) => None,
                    })
                    .collect();
                if vars.is_empty() || vars.iter().any(|i| values[*i].is_some()) {
                    continue;
                }
                let Some(subst) = rule.trigger_substitution(j, trigger) else {
                    continue;
                };
                let merged: Values = values
                    .iter()
                    .zip(subst)
                    .map(|(v, s)| v.clone().or(s))
                    .collect();
                if complete(&merged) {
                    ret.push(self.instantiation(merged, Some(j)));
                }
            }
        }
        if ret.is_empty() {
            let missing = values.iter().position(Option::is_none).unwrap_or_default();
            return Err(RuleError::UnboundVariable {
                rule: rule.label(),
                variable: rule.variables[missing].to_string(),
            });
        }
        Ok(ret)
    }

    /// The effect of this rule under `row` (see [`instantiations`](BoundRule::instantiations)).
    pub fn bind_effect(&self, row: &BindingSet) -> Result<Statement, RuleError> {
        let mut inst = self.instantiations(row)?;
        Ok(inst.swap_remove(0).effect)
    }

    /// The preconditions of this rule under `row` (see [`instantiations`](BoundRule::instantiations)).
    pub fn bind_preconditions(&self, row: &BindingSet) -> Result<Vec<Statement>, RuleError> {
        let mut inst = self.instantiations(row)?;
        Ok(inst.swap_remove(0).preconditions)
    }

    /// `values` must be complete
    fn instantiation(&self, values: Values, from_trigger: Option<usize>) -> Instantiation {
        let rule = self.rule;
        let values: Vec<Node> = values.into_iter().flatten().collect();
        debug_assert_eq!(values.len(), rule.variables.len());
        let instantiate = |slots: &[Slot; 3]| rule.instantiate(slots, &values);
        let mut preconditions: Vec<Statement> = rule.precondition_slots.iter().map(instantiate).collect();
        if let (Some(j), Some(trigger)) = (from_trigger, &self.trigger) {
            preconditions[j].context = trigger.context.clone();
        }
        Instantiation {
            effect: instantiate(&rule.effect_slots),
            preconditions,
        }
    }
}

/// A rule with all its variables bound:
/// the statement it produces, and the statements justifying it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instantiation {
    effect: Statement,
    preconditions: Vec<Statement>,
}

impl Instantiation {
    /// The statement produced by the rule (in the default graph).
    ///
    /// NB: it may not be a [valid](Statement::is_valid) statement,
    /// e.g. if a rule moves a literal to the subject position.
    pub fn effect(&self) -> &Statement {
        &self.effect
    }

    /// The statements matching the preconditions of the rule.
    ///
    /// Only the statement that triggered the rule carries its context;
    /// the others are in the default graph.
    pub fn preconditions(&self) -> &[Statement] {
        &self.preconditions
    }
}

/// A compiled rule query: a union of conjunctive queries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    alternatives: Vec<Vec<String>>,
}

impl Query {
    /// True if this query has no alternative,
    /// because the trigger contradicts the rule.
    /// Such a query has no result, and must not be sent to a store.
    pub fn is_unsatisfiable(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn group(f: &mut fmt::Formatter<'_>, patterns: &[String]) -> fmt::Result {
            write!(f, "{{ ")?;
            for p in patterns {
                write!(f, "{p} ")?;
            }
            write!(f, "}}")
        }
        write!(f, "SELECT * WHERE ")?;
        match &self.alternatives[..] {
            [single] => group(f, single),
            alternatives => {
                write!(f, "{{ ")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " UNION ")?;
                    }
                    group(f, alt)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// An error in the definition or the application of a [`Rule`].
///
/// Rules are identified by their name or, for anonymous rules, their textual form.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RuleError {
    /// A variable could not be bound to a node.
    #[error("Variable ?{variable} is unbound in rule {rule}")]
    UnboundVariable {
        /// the rule
        rule: String,
        /// the variable (without its leading `?`)
        variable: String,
    },
    /// A rule was built without preconditions.
    #[error("Rule {rule} has no precondition")]
    NoPrecondition {
        /// the rule
        rule: String,
    },
    /// A pattern has a fixed predicate that is not an IRI.
    #[error("Pattern {pattern} of rule {rule} has an invalid predicate")]
    InvalidPredicate {
        /// the rule
        rule: String,
        /// the offending pattern
        pattern: String,
    },
    /// A rule was asked to use a trigger matching none of its preconditions.
    #[error("Statement {statement} matches no precondition of rule {rule}")]
    TriggerMismatch {
        /// the rule
        rule: String,
        /// the trigger
        statement: String,
    },
}

#[cfg(test)]
mod test;
