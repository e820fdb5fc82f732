//! AST to (rules table, residual subject forest). `DEFINE` in the AST is a
//! sibling marker: it sits among three consecutive top-level nodes meaning
//! "the next two top-level sibling subtrees form a rule."

use crate::arena::{Forest, NodeId};
use crate::error::{Error, Result};
use crate::limits;
use crate::symbol::Reserved;

/// One `(lhs, rhs)` pair, stored as root ids into a dedicated
/// rules-forest. Rules are written once at extraction time and never
/// mutated afterward.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub lhs: NodeId,
    pub rhs: NodeId,
}

/// Ordered rule set. Order is significant: the rewriter uses
/// first-match-wins, so any container here must preserve insertion order.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        RuleTable { rules: Vec::new() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Scans the top-level subtrees of `ast` left to right. A `DEFINE` subtree
/// consumes the two immediately following top-level subtrees as `lhs` and
/// `rhs`, copying both into `rules_forest`; anything else is copied
/// verbatim into `subject` as residual, rewritable input.
pub fn extract_rules(
    ast: &Forest,
    reserved: &Reserved,
    rules_forest: &mut Forest,
    subject: &mut Forest,
) -> Result<RuleTable> {
    let mut rules = RuleTable::new();
    let mut i = 0;
    while i < ast.len() {
        if ast.symbol(i) == reserved.define {
            i += 1;
            if i >= ast.len() {
                return Err(Error::TruncatedRule);
            }
            let lhs = ast.copy_tree(rules_forest, i)?;
            i += ast.subtree_size(i);
            if i >= ast.len() {
                return Err(Error::TruncatedRule);
            }
            let rhs = ast.copy_tree(rules_forest, i)?;
            i += ast.subtree_size(i);
            if rules.rules.len() >= limits::RULES_TABLE_CAPACITY {
                return Err(Error::TooManyRules);
            }
            rules.rules.push(Rule { lhs, rhs });
        } else {
            ast.copy_tree(subject, i)?;
            i += ast.subtree_size(i);
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{init_reserved, SymbolTable};
    use crate::token::tokenize;
    use crate::parser::parse;

    fn extract(input: &str) -> Result<(SymbolTable, Forest, Forest, RuleTable)> {
        let mut symbols = SymbolTable::new();
        let reserved = init_reserved(&mut symbols)?;
        let mut tokens = Forest::new();
        tokenize(input.as_bytes(), &mut symbols, &reserved, &mut tokens)?;
        let mut ast = Forest::new();
        parse(&tokens, &reserved, &mut ast)?;
        let mut rules_forest = Forest::new();
        let mut subject = Forest::new();
        let rules = extract_rules(&ast, &reserved, &mut rules_forest, &mut subject)?;
        Ok((symbols, rules_forest, subject, rules))
    }

    #[test]
    fn no_rules_leaves_subject_untouched() {
        let (symbols, _rules_forest, subject, rules) = extract("hello").unwrap();
        assert_eq!(rules.len(), 0);
        assert_eq!(subject.len(), 1);
        assert_eq!(symbols.bytes_of(subject.symbol(0)).unwrap(), b"hello");
    }

    #[test]
    fn one_rule_is_removed_from_the_residual_subject() {
        let (_, _rules_forest, subject, rules) = extract("<> a b a").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(subject.len(), 1);
    }

    #[test]
    fn rules_preserve_declaration_order() {
        let (symbols, rules_forest, _subject, rules) = extract("<> a b <> c d").unwrap();
        let rules: Vec<_> = rules.iter().collect();
        assert_eq!(rules.len(), 2);
        assert_eq!(symbols.bytes_of(rules_forest.symbol(rules[0].lhs)).unwrap(), b"a");
        assert_eq!(symbols.bytes_of(rules_forest.symbol(rules[1].lhs)).unwrap(), b"c");
    }

    #[test]
    fn missing_rhs_is_truncated_rule() {
        assert_eq!(extract("<> a").unwrap_err(), Error::TruncatedRule);
    }

    #[test]
    fn missing_lhs_is_truncated_rule() {
        assert!(extract("<>  ").is_err());
    }

    #[test]
    fn rule_table_capacity_is_enforced() {
        let mut program = String::new();
        for i in 0..=crate::limits::RULES_TABLE_CAPACITY {
            program.push_str(&format!("<> a{i} b{i} "));
        }
        assert_eq!(extract(&program).unwrap_err(), Error::TooManyRules);
    }
}
