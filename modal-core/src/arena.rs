use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::symbol::{Symbol, SymbolTable};

/// An index into a [`Forest`]. Every tree is stored as a contiguous run of
/// ids starting at its root; a root's own id is its parent.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    symbol: Symbol,
    parent: NodeId,
}

/// A bounded, append-only array of nodes. Trees are never freed
/// individually; a forest is reset wholesale by truncating it to empty,
/// which is how the rewrite loop reclaims the previous pass's memory (see
/// [`crate::interpreter::run_pass`]).
#[derive(Debug, Default)]
pub struct Forest {
    nodes: Vec<Node>,
    capacity: Option<usize>,
}

impl Forest {
    /// A forest with no hard capacity; pushes only fail if the process
    /// itself runs out of memory.
    pub fn new() -> Self {
        Forest {
            nodes: Vec::new(),
            capacity: None,
        }
    }

    /// A forest that fails with [`Error::ArenaFull`] once `capacity` nodes
    /// have been appended. This is the constructor the CLI uses so the
    /// fixed-size-arena contract from the reference implementation stays
    /// observable and testable.
    pub fn with_capacity_bounded(capacity: usize) -> Self {
        Forest {
            nodes: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resets the arena to empty without releasing its backing storage.
    /// This is the generational-copying reclamation scheme: the old
    /// generation is discarded wholesale rather than freed node by node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    pub fn symbol(&self, id: NodeId) -> Symbol {
        self.nodes[id].symbol
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent
    }

    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes[id].parent == id
    }

    fn push(&mut self, node: Node) -> Result<NodeId> {
        if let Some(cap) = self.capacity {
            if self.nodes.len() >= cap {
                return Err(Error::ArenaFull);
            }
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        Ok(id)
    }

    /// Appends a new root: a node whose parent is its own index.
    pub fn new_root(&mut self, symbol: Symbol) -> Result<NodeId> {
        let id = self.nodes.len();
        self.push(Node { symbol, parent: id })
    }

    /// Appends a new child of `parent`, which must already exist in this
    /// forest.
    pub fn new_child(&mut self, symbol: Symbol, parent: NodeId) -> Result<NodeId> {
        debug_assert!(parent < self.nodes.len());
        self.push(Node { symbol, parent })
    }

    /// Number of ids that make up the subtree rooted at `root`: walks
    /// forward until an index is reached whose parent lies outside the
    /// current subtree (i.e. is itself a root, or points further back than
    /// `root`).
    pub fn subtree_size(&self, root: NodeId) -> usize {
        let mut i = root + 1;
        while i < self.nodes.len() && self.nodes[i].parent >= root && !self.is_root(i) {
            i += 1;
        }
        i - root
    }

    /// Copies the subtree rooted at `root` in `self` into `dst`, shifting
    /// every parent offset by the same additive amount. Returns the new
    /// subtree's root id in `dst`.
    pub fn copy_tree(&self, dst: &mut Forest, root: NodeId) -> Result<NodeId> {
        self.copy_tree_into(dst, root, None)
    }

    /// As [`Self::copy_tree`], but the copied subtree's root becomes a
    /// child of `parent` instead of a fresh root when `parent` is `Some`.
    /// Used by the substitutor to splice a register's captured subtree
    /// into a rule's RHS in place of the register node it replaces.
    pub fn copy_tree_into(&self, dst: &mut Forest, root: NodeId, parent: Option<NodeId>) -> Result<NodeId> {
        let size = self.subtree_size(root);
        let new_root = match parent {
            None => dst.new_root(self.symbol(root))?,
            Some(p) => dst.new_child(self.symbol(root), p)?,
        };
        for i in 1..size {
            let src_id = root + i;
            let parent_offset = self.parent(src_id) - root;
            dst.new_child(self.symbol(src_id), new_root + parent_offset)?;
        }
        Ok(new_root)
    }

    /// Returns `true` iff the two rooted subtrees have identical size,
    /// identical symbol at every offset, and identical relative parent
    /// structure. This is an equivalence relation on rooted subtrees and is
    /// used to compare a register's existing binding against a fresh
    /// candidate capture.
    pub fn basic_match(&self, id1: NodeId, other: &Forest, id2: NodeId) -> bool {
        let size1 = self.subtree_size(id1);
        let size2 = other.subtree_size(id2);
        if size1 != size2 {
            return false;
        }
        for i in 0..size1 {
            if self.symbol(id1 + i) != other.symbol(id2 + i) {
                return false;
            }
            if i != 0 {
                let offset1 = self.parent(id1 + i) as isize - id1 as isize;
                let offset2 = other.parent(id2 + i) as isize - id2 as isize;
                if offset1 != offset2 {
                    return false;
                }
            }
        }
        true
    }

    /// Diagnostic-only: flat `(sym sym ... )` rendering, closing parens
    /// emitted as the parent chain unwinds. Not part of the semantic
    /// contract; used for trace logging and for the CLI's final output.
    pub fn write_flat<W: Write>(&self, out: &mut W, symbols: &SymbolTable, root: NodeId) -> io::Result<()> {
        let size = self.subtree_size(root);
        let mut old_parent = root;
        for i in 0..size {
            let id = root + i;
            let new_parent = self.parent(id);
            if new_parent < old_parent {
                let mut p = old_parent;
                while p > new_parent {
                    write!(out, ") ")?;
                    p = self.parent(p);
                }
            }
            let bytes = symbols.bytes_of(self.symbol(id)).unwrap_or(b"<?>");
            out.write_all(bytes)?;
            write!(out, " ")?;
            old_parent = new_parent;
        }
        let mut n = root + size - 1;
        while !self.is_root(n) {
            write!(out, ") ")?;
            n = self.parent(n);
        }
        Ok(())
    }

    /// Diagnostic-only: indented one-symbol-per-line rendering.
    pub fn write_indented<W: Write>(&self, out: &mut W, symbols: &SymbolTable, root: NodeId) -> io::Result<()> {
        let size = self.subtree_size(root);
        let mut level: i32 = 0;
        let mut parent = root;
        for i in 0..size {
            let id = root + i;
            if i > 0 {
                let new_parent = self.parent(id);
                if new_parent > parent {
                    level += 1;
                } else if new_parent < parent {
                    level -= 1;
                }
                parent = new_parent;
            }
            for _ in 0..(level * 4) {
                write!(out, " ")?;
            }
            let bytes = symbols.bytes_of(self.symbol(id)).unwrap_or(b"<?>");
            out.write_all(bytes)?;
            writeln!(out)?;
        }
        Ok(())
    }
}
