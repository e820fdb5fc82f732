//! The outer rewrite loop: repeatedly pass over the subject forest, trying
//! each rule in declaration order against each top-level subtree, until a
//! whole pass makes no rewrite (a fixed point).

use log::{debug, trace};

use crate::arena::Forest;
use crate::error::Result;
use crate::limits;
use crate::parser::parse;
use crate::registers::Registers;
use crate::rules::{extract_rules, RuleTable};
use crate::symbol::{init_reserved, Reserved, SymbolTable};
use crate::token::tokenize;
use crate::matcher::{instantiate_rhs, matches};

/// Runs one pass over `src`'s top-level subtrees, writing the result of
/// rewriting (or copying through unchanged) every one of them into `dst`,
/// which must be empty. Returns whether any subtree was rewritten, which is
/// the loop's continuation signal — reset once per pass, not per subtree
/// (see the design note on this in `DESIGN.md`: the reference C resets it
/// per subtree and so only ever looks at the last item's outcome).
pub fn run_pass(
    rules_forest: &Forest,
    rules: &RuleTable,
    reserved: &Reserved,
    registers: &mut Registers,
    src: &Forest,
    dst: &mut Forest,
) -> Result<bool> {
    debug_assert!(dst.is_empty());
    let mut rewritten = false;
    let mut id = 0;
    while id < src.len() {
        let mut did_rewrite = false;
        for rule in rules.iter() {
            registers.reset();
            if matches(rules_forest, rule.lhs, src, id, reserved, registers) {
                trace!("rule matched at subject position {id}, instantiating rhs");
                instantiate_rhs(rules_forest, rule, registers, reserved, dst)?;
                did_rewrite = true;
                rewritten = true;
                break;
            }
        }
        if !did_rewrite {
            trace!("no rule matched at subject position {id}, copying through");
            src.copy_tree(dst, id)?;
        }
        id += src.subtree_size(id);
    }
    Ok(rewritten)
}

/// Tokenizes, parses and extracts the rules from `source`, then rewrites
/// the residual subject to a fixed point. Returns the final subject forest
/// (the program's output) along with the symbol table needed to render it.
///
/// This is the single entry point the CLI driver calls; everything it does
/// — reading `source` off disk, printing the result, reporting errors — is
/// left to the caller.
pub fn run_program(source: &[u8]) -> Result<(SymbolTable, Forest)> {
    let mut symbols = SymbolTable::new();
    let reserved = init_reserved(&mut symbols)?;

    let mut tokens = Forest::with_capacity_bounded(limits::SUBJECT_ARENA_CAPACITY);
    tokenize(source, &mut symbols, &reserved, &mut tokens)?;

    let mut ast = Forest::with_capacity_bounded(limits::SUBJECT_ARENA_CAPACITY);
    parse(&tokens, &reserved, &mut ast)?;

    let mut rules_forest = Forest::with_capacity_bounded(limits::RULES_FOREST_CAPACITY);
    let mut subject = Forest::with_capacity_bounded(limits::SUBJECT_ARENA_CAPACITY);
    let rules = extract_rules(&ast, &reserved, &mut rules_forest, &mut subject)?;
    debug!("extracted {} rule(s), {} residual subject node(s)", rules.len(), subject.len());

    let mut registers = Registers::new(&reserved);
    let mut src = subject;
    let mut dst = Forest::with_capacity_bounded(limits::SUBJECT_ARENA_CAPACITY);

    let mut pass = 0u32;
    loop {
        pass += 1;
        let rewritten = run_pass(&rules_forest, &rules, &reserved, &mut registers, &src, &mut dst)?;
        debug!("pass {pass}: rewritten = {rewritten}");
        std::mem::swap(&mut src, &mut dst);
        dst.clear();
        if !rewritten {
            break;
        }
    }
    Ok((symbols, src))
}
