//! Pattern matching and substitution: the LHS of a rule walked against a
//! subject subtree, binding register atoms to captured subtrees and
//! enforcing consistency; and the RHS instantiated under those bindings.

use log::trace;

use crate::arena::{Forest, NodeId};
use crate::error::Result;
use crate::registers::Registers;
use crate::rules::Rule;
use crate::symbol::Reserved;

/// Walks `lhs_root` (in `lhs`) against `subject_root` (in `subject`) with
/// two cursors, one per tree. Registers capture on first sight and must
/// structurally agree with their existing binding on every later
/// occurrence. `registers` is assumed freshly reset by the caller before
/// each attempt.
pub fn matches(
    lhs: &Forest,
    lhs_root: NodeId,
    subject: &Forest,
    subject_root: NodeId,
    reserved: &Reserved,
    registers: &mut Registers,
) -> bool {
    let size1 = lhs.subtree_size(lhs_root);
    let mut i2 = 0usize;
    let mut i1 = 0usize;
    while i1 < size1 {
        let sym = lhs.symbol(lhs_root + i1);
        if reserved.is_register(sym) {
            let subject_id = subject_root + i2;
            if subject_id >= subject.len() {
                return false;
            }
            match registers.get(sym) {
                None => {
                    let captured = match subject.copy_tree(registers.forest_mut(), subject_id) {
                        Ok(id) => id,
                        Err(_) => return false,
                    };
                    registers.bind(sym, captured);
                }
                Some(bound) => {
                    if !registers.forest().basic_match(bound, subject, subject_id) {
                        trace!("register did not match existing binding");
                        return false;
                    }
                }
            }
            i2 += subject.subtree_size(subject_id);
            i1 += 1;
        } else {
            let subject_id = subject_root + i2;
            if subject_id >= subject.len() || lhs.symbol(lhs_root + i1) != subject.symbol(subject_id) {
                return false;
            }
            let lhs_offset = lhs.parent(lhs_root + i1) as isize - lhs_root as isize;
            let subject_offset = subject.parent(subject_id) as isize - subject_root as isize;
            if lhs_offset != subject_offset {
                return false;
            }
            i1 += 1;
            i2 += 1;
        }
    }
    true
}

/// Copies `rule`'s RHS subtree from `rules_forest` into `dst`, substituting
/// every register occurrence (including at the RHS root) by a copy of its
/// bound subtree from `registers`. The substituted subtree's root adopts
/// the RHS node's former parent; unbound registers are emitted literally
/// (a degenerate case for a well-formed rule, whose registers all appear
/// on its LHS).
pub fn instantiate_rhs(
    rules_forest: &Forest,
    rule: &Rule,
    registers: &Registers,
    reserved: &Reserved,
    dst: &mut Forest,
) -> Result<NodeId> {
    let root_id = rule.rhs;
    let size = rules_forest.subtree_size(root_id);
    let mut emitted: Vec<NodeId> = Vec::with_capacity(size);

    let root_symbol = rules_forest.symbol(root_id);
    let root = emit(root_symbol, registers, reserved, dst, None)?;
    emitted.push(root);

    for i in 1..size {
        let rhs_id = root_id + i;
        let sym = rules_forest.symbol(rhs_id);
        let parent_offset = rules_forest.parent(rhs_id) - root_id;
        let parent_dst = emitted[parent_offset];
        let id = emit(sym, registers, reserved, dst, Some(parent_dst))?;
        emitted.push(id);
    }
    Ok(root)
}

/// Emits one RHS position into `dst`: either the literal symbol, or (for a
/// bound register) the register's captured subtree spliced in as a
/// replacement, attached to `parent` when given.
fn emit(
    sym: crate::symbol::Symbol,
    registers: &Registers,
    reserved: &Reserved,
    dst: &mut Forest,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    if reserved.is_register(sym) {
        if let Some(bound) = registers.get(sym) {
            return registers.forest().copy_tree_into(dst, bound, parent);
        }
    }
    match parent {
        None => dst.new_root(sym),
        Some(p) => dst.new_child(sym, p),
    }
}
