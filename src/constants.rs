//! Compact Term Tag Constants
//!
//! Defines the primary tag and extended sub-tag bytes used by the compact term
//! format that appears after the fixed header of a BEAM module's Code chunk.
//! Every compact term starts with a "starter" byte whose low three bits select
//! one of these primary tags (or escape into the extended dispatch when the
//! primary tag is [`EXTENDED`]).

/// Index into the literal table.
pub const LITERAL: u8 = 0;
/// Inline signed integer operand.
pub const INTEGER: u8 = 1;
/// Index into the atom table.
pub const ATOM: u8 = 2;
/// General-purpose register index.
pub const X_REG: u8 = 3;
/// Stack slot index.
pub const Y_REG: u8 = 4;
/// Jump target id.
pub const LABEL: u8 = 5;
/// Unicode code point operand.
pub const CHAR: u8 = 6;
/// Escape into the extended sub-tag dispatch (the full starter byte is significant).
pub const EXTENDED: u8 = 7;

/// Extended sub-tag: 64-bit IEEE-754 float literal.
pub const EXT_FLOAT: u8 = 0x07;
/// Extended sub-tag: argument list, length-prefixed by a compact Integer term.
pub const EXT_LIST: u8 = 0x17;
/// Extended sub-tag: float-arithmetic register.
pub const EXT_FLOAT_REG: u8 = 0x27;
/// Extended sub-tag: allocation list, pair-count-prefixed by a compact Integer term.
pub const EXT_ALLOC_LIST: u8 = 0x37;
/// Extended sub-tag: literal-table index carried through an inner compact term.
pub const EXT_LITERAL: u8 = 0x47;
/// Extended sub-tag: register annotated with a static type-table index.
pub const EXT_TYPED_REG: u8 = 0x57;

/// Mask isolating the primary tag (low 3 bits) of a starter byte.
pub const PRIMARY_TAG_MASK: u8 = 0x07;
/// Bit distinguishing the small form (0) from medium/large forms (1).
pub const FORM_BIT: u8 = 0x08;
/// Mask isolating bits 3-4, which distinguish medium form (`0x08`) from large form (`0x18`).
pub const FORM_SELECT_MASK: u8 = 0x18;
/// Value of [`FORM_SELECT_MASK`] bits identifying the medium (11-bit) form.
pub const FORM_MEDIUM: u8 = 0x08;
/// Value of [`FORM_SELECT_MASK`] bits identifying the large (byte-array) form.
pub const FORM_LARGE: u8 = 0x18;
/// Top three bits of a large-form starter byte (`S` in the byte-count formula).
pub const LARGE_SIZE_MASK: u8 = 0xE0;
/// Value of the large-form size field that escapes into a recursively-encoded size.
pub const LARGE_SIZE_ESCAPE: u8 = 7;
