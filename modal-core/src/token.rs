//! Byte stream to flat token sequence. Every token is emitted as a root
//! node in `dst`; hierarchy is added by [`crate::parser`].

use log::trace;

use crate::arena::Forest;
use crate::error::{Error, Result};
use crate::limits;
use crate::symbol::{Reserved, SymbolTable};

const DELIMITERS: [u8; 4] = [b' ', b'\n', b'(', b')'];

#[inline]
fn is_delimiter(b: u8) -> bool {
    DELIMITERS.contains(&b)
}

/// Tokenizes `bytes` into `dst`, interning each atom along the way.
///
/// `<>` is special: the tokenizer requires it to be followed immediately by
/// a single space (not a newline, not a paren, not end-of-file); anything
/// else is [`Error::ExpectedSpaceAfterDefine`].
pub fn tokenize(
    bytes: &[u8],
    symbols: &mut SymbolTable,
    reserved: &Reserved,
    dst: &mut Forest,
) -> Result<()> {
    let mut scratch: Vec<u8> = Vec::with_capacity(limits::ATOM_BYTES_MAX.min(64));
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !is_delimiter(b) {
            if scratch.len() >= limits::ATOM_BYTES_MAX {
                return Err(Error::AtomTooLong(limits::ATOM_BYTES_MAX));
            }
            scratch.push(b);
            i += 1;
            let sym = symbols.intern(&scratch)?;
            if sym == reserved.define {
                if bytes.get(i) != Some(&b' ') {
                    return Err(Error::ExpectedSpaceAfterDefine);
                }
                trace!("token: <>");
                dst.new_root(sym)?;
                scratch.clear();
            }
        } else {
            if !scratch.is_empty() {
                let sym = symbols.intern(&scratch)?;
                dst.new_root(sym)?;
                scratch.clear();
                if sym == reserved.define && b != b' ' {
                    return Err(Error::ExpectedSpaceAfterDefine);
                }
            }
            match b {
                b'(' => {
                    trace!("token: (");
                    dst.new_root(reserved.open_paren)?;
                }
                b')' => {
                    trace!("token: )");
                    dst.new_root(reserved.close_paren)?;
                }
                b' ' | b'\n' => {}
                _ => unreachable!("DELIMITERS only contains space, newline, ( and )"),
            }
            i += 1;
        }
    }
    if !scratch.is_empty() {
        let sym = symbols.intern(&scratch)?;
        dst.new_root(sym)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::init_reserved;

    fn tokenize_str(input: &str) -> Result<(SymbolTable, Forest)> {
        let mut symbols = SymbolTable::new();
        let reserved = init_reserved(&mut symbols)?;
        let mut dst = Forest::new();
        tokenize(input.as_bytes(), &mut symbols, &reserved, &mut dst)?;
        Ok((symbols, dst))
    }

    #[test]
    fn atoms_and_parens_become_root_tokens() {
        let (symbols, forest) = tokenize_str("(pair foo foo)").unwrap();
        let rendered: Vec<&[u8]> = (0..forest.len())
            .map(|i| symbols.bytes_of(forest.symbol(i)).unwrap())
            .collect();
        assert_eq!(
            rendered,
            vec![
                &b"("[..],
                &b"pair"[..],
                &b"foo"[..],
                &b"foo"[..],
                &b")"[..]
            ]
        );
        for i in 0..forest.len() {
            assert!(forest.is_root(i));
        }
    }

    #[test]
    fn define_must_be_followed_by_a_space() {
        assert_eq!(
            tokenize_str("<>a b").unwrap_err(),
            Error::ExpectedSpaceAfterDefine
        );
        assert_eq!(
            tokenize_str("<>\na b").unwrap_err(),
            Error::ExpectedSpaceAfterDefine
        );
        assert_eq!(tokenize_str("<>").unwrap_err(), Error::ExpectedSpaceAfterDefine);
        assert!(tokenize_str("<> a b").is_ok());
    }

    #[test]
    fn trailing_atom_without_delimiter_is_flushed_at_eof() {
        let (symbols, forest) = tokenize_str("hello").unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(symbols.bytes_of(forest.symbol(0)).unwrap(), b"hello");
    }

    #[test]
    fn whitespace_is_discarded() {
        let (_, forest) = tokenize_str("  a   b\n c ").unwrap();
        assert_eq!(forest.len(), 3);
    }

    #[test]
    fn atom_past_the_length_cap_is_an_error() {
        let too_long = "a".repeat(crate::limits::ATOM_BYTES_MAX + 1);
        assert_eq!(
            tokenize_str(&too_long).unwrap_err(),
            Error::AtomTooLong(crate::limits::ATOM_BYTES_MAX)
        );
    }
}
