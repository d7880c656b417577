//! Minimal edit scripts between two sequences.
//!
//! [`diff_by`] returns the shortest list of single element deletions and
//! insertions turning a source sequence into a target sequence, using the
//! linear space variant of the Myers algorithm. Elements are opaque: the
//! caller supplies the equality. [`apply`] replays such a script.
//!
//! ```
//! use editscript::{apply, diff_text, Op};
//!
//! let old = vec!["bar", "baz"];
//! let new = vec!["foo", "baz"];
//! let script = diff_text(&old, &new);
//! assert_eq!(script, vec![
//!     Op::Delete { old_pos: 0, elem: "bar" },
//!     Op::Insert { old_pos: 1, new_pos: 0, elem: "foo" },
//! ]);
//! assert_eq!(apply(&old, &script), Ok(vec!["foo", "baz"]));
//! ```

pub mod apply;
pub mod error;
pub mod myers;

pub use apply::{apply, apply_by};
pub use error::ApplyError;
pub use myers::{diff, diff_by, diff_text, distance, distance_by, Op, Script, ScriptExt};
