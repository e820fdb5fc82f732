//! Flat token sequence to nested AST, using parenthesis structure alone.
//! `DEFINE` passes through as an ordinary sibling token here; it is only
//! given meaning by [`crate::rules`].

use crate::arena::{Forest, NodeId};
use crate::error::{Error, Result};
use crate::symbol::Reserved;

/// Reads the flat tokens in `src` (as produced by [`crate::token::tokenize`])
/// and writes a nested forest into `dst`.
pub fn parse(src: &Forest, reserved: &Reserved, dst: &mut Forest) -> Result<()> {
    let mut current_parent: Option<NodeId> = None;
    for i in 0..src.len() {
        let sym = src.symbol(i);
        if sym == reserved.open_paren {
            let id = match current_parent {
                None => dst.new_root(sym)?,
                Some(parent) => dst.new_child(sym, parent)?,
            };
            current_parent = Some(id);
        } else if sym == reserved.close_paren {
            match current_parent {
                None => return Err(Error::UnmatchedCloseParen),
                Some(parent) => {
                    current_parent = if dst.is_root(parent) {
                        None
                    } else {
                        Some(dst.parent(parent))
                    };
                }
            }
        } else {
            match current_parent {
                None => {
                    dst.new_root(sym)?;
                }
                Some(parent) => {
                    dst.new_child(sym, parent)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{init_reserved, SymbolTable};
    use crate::token::tokenize;

    fn parse_str(input: &str) -> Result<(SymbolTable, Forest, Reserved)> {
        let mut symbols = SymbolTable::new();
        let reserved = init_reserved(&mut symbols)?;
        let mut tokens = Forest::new();
        tokenize(input.as_bytes(), &mut symbols, &reserved, &mut tokens)?;
        let mut ast = Forest::new();
        parse(&tokens, &reserved, &mut ast)?;
        Ok((symbols, ast, reserved))
    }

    #[test]
    fn flat_atom_is_a_single_root() {
        let (_, ast, _) = parse_str("hello").unwrap();
        assert_eq!(ast.len(), 1);
        assert!(ast.is_root(0));
    }

    #[test]
    fn nested_parens_become_child_structure() {
        // Each `(` is itself a node (symbol OPEN_PAREN); the atoms and
        // nested parens inside it are its children. `(f (g hello))` is
        // therefore 5 nodes: `(`, f, `(`, g, hello.
        let (symbols, ast, reserved) = parse_str("(f (g hello))").unwrap();
        assert_eq!(ast.len(), 5);
        assert!(ast.is_root(0));
        assert_eq!(ast.symbol(0), reserved.open_paren);
        assert_eq!(ast.parent(1), 0);
        assert_eq!(symbols.bytes_of(ast.symbol(1)).unwrap(), b"f");
        assert_eq!(ast.parent(2), 0);
        assert_eq!(ast.symbol(2), reserved.open_paren);
        assert_eq!(ast.parent(3), 2);
        assert_eq!(symbols.bytes_of(ast.symbol(3)).unwrap(), b"g");
        assert_eq!(ast.parent(4), 2);
        assert_eq!(symbols.bytes_of(ast.symbol(4)).unwrap(), b"hello");
    }

    #[test]
    fn siblings_share_the_same_parent() {
        let (_, ast, _) = parse_str("(pair foo foo)").unwrap();
        assert_eq!(ast.len(), 4);
        assert_eq!(ast.parent(1), 0);
        assert_eq!(ast.parent(2), 0);
        assert_eq!(ast.parent(3), 0);
    }

    #[test]
    fn multiple_top_level_items_are_separate_roots() {
        let (_, ast, _) = parse_str("a b (c d)").unwrap();
        assert!(ast.is_root(0));
        assert!(ast.is_root(1));
        assert!(ast.is_root(2));
        assert_eq!(ast.parent(3), 2);
    }

    #[test]
    fn unmatched_close_paren_is_an_error() {
        assert_eq!(parse_str(")").unwrap_err(), Error::UnmatchedCloseParen);
        assert_eq!(parse_str("(a))").unwrap_err(), Error::UnmatchedCloseParen);
    }

    #[test]
    fn parse_round_trip_preserves_symbol_and_parent_offset_sequence() {
        // Parsing the same source twice, independently, must yield an AST
        // with an identical (symbol, parent-offset) sequence per subtree:
        // parsing has no hidden state that could make it non-deterministic.
        let (_, ast1, _) = parse_str("(f (g ?x) ?x)").unwrap();
        let (_, ast2, _) = parse_str("(f (g ?x) ?x)").unwrap();
        let size = ast1.subtree_size(0);
        assert_eq!(size, ast2.subtree_size(0));
        for i in 0..size {
            assert_eq!(ast1.symbol(i), ast2.symbol(i));
            assert_eq!(
                ast1.parent(i) as isize - 0,
                ast2.parent(i) as isize - 0
            );
        }
    }
}
