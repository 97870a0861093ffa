//! I define [`RuleSet`], an ordered collection of named rules,
//! the [`RuleParser`] reading rule files,
//! and the [standard rule sets](StandardRuleSet).
use crate::rule::Rule;

mod _parser;
pub use _parser::*;
mod _standard;
pub use _standard::*;

/// An ordered collection of [`Rule`]s.
///
/// Named rules are unique: inserting a rule replaces any rule with the same name,
/// in place.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `rule` at the end of this set, or in place of the rule with the same name.
    ///
    /// Return the replaced rule, if any.
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        let existing = rule
            .name()
            .and_then(|name| self.rules.iter().position(|r| r.name() == Some(name)));
        match existing {
            Some(i) => Some(std::mem::replace(&mut self.rules[i], rule)),
            None => {
                self.rules.push(rule);
                None
            }
        }
    }

    /// Insert all the rules of `other` into this set.
    pub fn extend(&mut self, other: RuleSet) {
        for rule in other.rules {
            self.insert(rule);
        }
    }

    /// The rule named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == Some(name))
    }

    /// Remove the rule named `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        let i = self.rules.iter().position(|r| r.name() == Some(name))?;
        Some(self.rules.remove(i))
    }

    /// Iterate over the rules of this set, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// The names of the named rules of this set, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().filter_map(Rule::name)
    }

    /// Number of rules in this set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether this set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        let mut ret = RuleSet::new();
        for rule in iter {
            ret.insert(rule);
        }
        ret
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pattern::{NodePattern, StatementPattern};
    use entail_api::ns::rdfs;

    fn rule(name: &str, p: entail_api::ns::NsTerm) -> Rule {
        let x = || NodePattern::var("x").unwrap();
        Rule::named(name, vec![StatementPattern::new(x(), p, x())], StatementPattern::new(x(), p, x())).unwrap()
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut set = RuleSet::new();
        assert!(set.insert(rule("a", rdfs::subClassOf)).is_none());
        assert!(set.insert(rule("b", rdfs::subClassOf)).is_none());
        let old = set.insert(rule("a", rdfs::subPropertyOf)).unwrap();
        assert_eq!(old, rule("a", rdfs::subClassOf));
        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.get("a"), Some(&rule("a", rdfs::subPropertyOf)));
    }

    #[test]
    fn remove() {
        let mut set: RuleSet = [rule("a", rdfs::subClassOf), rule("b", rdfs::subClassOf)]
            .into_iter()
            .collect();
        assert!(set.remove("a").is_some());
        assert!(set.remove("a").is_none());
        assert_eq!(set.len(), 1);
        assert!(set.get("b").is_some());
    }
}
