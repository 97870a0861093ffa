use super::{RuleParser, RuleSet};

/// The rule sets shipped with this crate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StandardRuleSet {
    /// The [RDFS entailment rules](https://www.w3.org/TR/rdf-mt/#RDFSRules)
    /// that produce new statements from other statements
    /// (rdfs1, rdfs4a/b and rdfs12, which apply to every node, are not included).
    Rdfs,
    /// Transitive, symmetric and inverse properties,
    /// as defined by the [NEPOMUK Representational Language](http://www.semanticdesktop.org/ontologies/2007/08/15/nrl/).
    Nrl,
}

impl StandardRuleSet {
    /// The source text of this rule set.
    pub fn source(self) -> &'static str {
        match self {
            StandardRuleSet::Rdfs => RDFS,
            StandardRuleSet::Nrl => NRL,
        }
    }
}

impl RuleSet {
    /// Build one of the [standard rule sets](StandardRuleSet).
    pub fn standard(kind: StandardRuleSet) -> RuleSet {
        RuleParser::new()
            .parse_str(kind.source())
            .expect("standard rule sets are valid")
    }
}

const RDFS: &str = r#"
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

# rdfs:domain
[rdfs2: (?aaa rdfs:domain ?xxx), (?uuu ?aaa ?yyy) -> (?uuu rdf:type ?xxx)]
# rdfs:range
[rdfs3: (?aaa rdfs:range ?xxx), (?uuu ?aaa ?vvv) -> (?vvv rdf:type ?xxx)]
[rdfs5: (?uuu rdfs:subPropertyOf ?vvv), (?vvv rdfs:subPropertyOf ?xxx) -> (?uuu rdfs:subPropertyOf ?xxx)]
[rdfs6: (?uuu rdf:type rdf:Property) -> (?uuu rdfs:subPropertyOf ?uuu)]
[rdfs7: (?aaa rdfs:subPropertyOf ?bbb), (?uuu ?aaa ?yyy) -> (?uuu ?bbb ?yyy)]
[rdfs8: (?uuu rdf:type rdfs:Class) -> (?uuu rdfs:subClassOf rdfs:Resource)]
[rdfs9: (?uuu rdfs:subClassOf ?xxx), (?vvv rdf:type ?uuu) -> (?vvv rdf:type ?xxx)]
[rdfs10: (?uuu rdf:type rdfs:Class) -> (?uuu rdfs:subClassOf ?uuu)]
[rdfs11: (?uuu rdfs:subClassOf ?vvv), (?vvv rdfs:subClassOf ?xxx) -> (?uuu rdfs:subClassOf ?xxx)]
[rdfs13: (?uuu rdf:type rdfs:Datatype) -> (?uuu rdfs:subClassOf rdfs:Literal)]
"#;

const NRL: &str = r#"
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX nrl: <http://www.semanticdesktop.org/ontologies/2007/08/15/nrl#>

[transitive: (?p rdf:type nrl:TransitiveProperty), (?a ?p ?b), (?b ?p ?c) -> (?a ?p ?c)]
[symmetric: (?p rdf:type nrl:SymmetricProperty), (?a ?p ?b) -> (?b ?p ?a)]
[inverse: (?p nrl:inverseProperty ?q), (?a ?p ?b) -> (?b ?q ?a)]
"#;
