//! Default arena capacities, ported from the reference interpreter's
//! hard-coded `#define`s. These are only enforced when a [`crate::Forest`]
//! is built with [`crate::Forest::with_capacity_bounded`]; the unbounded
//! constructors used internally by the matcher and by property tests grow
//! on demand instead.

/// `RULES_FOREST_NODES_MAX` in the reference implementation.
pub const RULES_FOREST_CAPACITY: usize = 0x100;

/// `RULES_COUNT_MAX` in the reference implementation.
pub const RULES_TABLE_CAPACITY: usize = 0x100;

/// `ARENA_NODES_MAX` in the reference implementation; applies to both the
/// `src` and `dst` subject arenas.
pub const SUBJECT_ARENA_CAPACITY: usize = 0x200;

/// `REGISTERS_FOREST_NODES_MAX` in the reference implementation.
pub const REGISTERS_FOREST_CAPACITY: usize = 0x100;

/// `STRING_COUNT_MAX` in the reference implementation. The register
/// alphabet alone occupies 223 of these, so this must stay comfortably
/// above that floor.
pub const SYMBOL_TABLE_CAPACITY: usize = 0x400;

/// `INTERNED_STRINGS_BUFFER_SIZE` in the reference implementation: total
/// bytes across all interned atoms, not counting the register alphabet
/// (which is generated, not read from source).
pub const INTERNED_BYTES_CAPACITY: usize = 0x1000;

/// `SYMBOL_SIZE_MAX` in the reference implementation: the longest atom the
/// tokenizer will accumulate before interning it.
pub const ATOM_BYTES_MAX: usize = 0x100;
