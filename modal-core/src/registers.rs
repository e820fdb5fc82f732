//! Register bindings captured during one match attempt, plus the
//! dedicated forest their captured subtrees live in.

use crate::arena::Forest;
use crate::symbol::{Reserved, Symbol};

/// Fixed-size mapping from register symbol to an optional captured subtree
/// root in [`Registers::forest`]. Reset to all-unbound before every
/// attempted rule application; a binding lives only for the duration of
/// one match attempt.
pub struct Registers {
    bindings: Vec<Option<usize>>,
    forest: Forest,
}

impl Registers {
    pub fn new(reserved: &Reserved) -> Self {
        Registers {
            bindings: vec![None; reserved.last_register as usize + 1],
            forest: Forest::new(),
        }
    }

    /// Clears every binding and discards the previous attempt's captured
    /// subtrees.
    pub fn reset(&mut self) {
        self.forest.clear();
        for slot in &mut self.bindings {
            *slot = None;
        }
    }

    pub fn get(&self, register: Symbol) -> Option<usize> {
        self.bindings[register as usize]
    }

    pub fn bind(&mut self, register: Symbol, root: usize) {
        self.bindings[register as usize] = Some(root);
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn forest_mut(&mut self) -> &mut Forest {
        &mut self.forest
    }
}
