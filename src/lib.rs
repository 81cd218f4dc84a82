//! Codec for the compact term format used to encode virtual-machine
//! instruction operands in the Code chunk of BEAM object files.
//!
//! A compact term is a tagged, variable-length, self-delimiting value:
//! register references, jump labels, atom/literal table indices, inline
//! integers (including arbitrary-precision ones), characters, float
//! literals, typed registers, and lists/allocation lists of such operands.
//! [`decode`] parses one term from the front of a byte slice; [`encode`]
//! produces the canonical, minimal-length bytes for a [`Term`]. The pair is
//! roundtrip-exact for canonical input, which is what a conforming compiler
//! emits.
//!
//! ```
//! use compact_term_format::{decode, encode, Term};
//!
//! let (term, rest) = decode(&[0x53]).unwrap();
//! assert_eq!(term, Term::XReg(5));
//! assert!(rest.is_empty());
//! assert_eq!(encode(&term), vec![0x53]);
//! ```

mod constants;
mod decode;
mod encode;
mod int_bytes;
mod stream;
mod term;

pub use decode::{decode, DecodeError};
pub use encode::encode;
pub use stream::{decode_all, roundtrip};
pub use term::Term;
