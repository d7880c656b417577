use crate::error::ApplyError;
use crate::myers::Op;
use std::borrow::Borrow;
use tracing::debug;

/// Replays an edit script on `source`, returning the target sequence.
///
/// Operations are processed in order: untouched source elements are copied
/// up to each operation's `old_pos`, deletions skip the element there and
/// insertions must land exactly at their `new_pos`. Works with scripts that
/// borrow their elements (as returned by [`crate::myers::diff`]) as well as
/// owned ones.
///
/// # Examples
///
/// ```
/// use editscript::{apply, diff};
///
/// let old = vec!["bar", "baz"];
/// let new = vec!["foo", "baz"];
/// assert_eq!(apply(&old, &diff(&old, &new)), Ok(new));
/// ```
pub fn apply<T, E>(source: &[T], script: &[Op<E>]) -> Result<Vec<T>, ApplyError>
where
    T: Clone + PartialEq,
    E: Borrow<T>,
{
    apply_by(source, script, |a, b| a == b)
}

/// Same as [`apply`], checking deleted elements against the source with
/// `equals` (source element first).
pub fn apply_by<T, E, F>(source: &[T], script: &[Op<E>], equals: F) -> Result<Vec<T>, ApplyError>
where
    T: Clone,
    E: Borrow<T>,
    F: FnMut(&T, &T) -> bool,
{
    replay(source, script, equals).inspect_err(|err| {
        debug!(
            source_len = source.len(),
            ops = script.len(),
            %err,
            "edit script does not apply"
        )
    })
}

fn replay<T, E, F>(source: &[T], script: &[Op<E>], mut equals: F) -> Result<Vec<T>, ApplyError>
where
    T: Clone,
    E: Borrow<T>,
    F: FnMut(&T, &T) -> bool,
{
    let mut result = Vec::with_capacity(source.len());
    let mut cursor = 0;

    for op in script {
        let old_pos = op.old_pos();
        if old_pos < cursor {
            return Err(ApplyError::OutOfOrder { old_pos, cursor });
        }
        if old_pos > source.len() {
            return Err(ApplyError::OutOfBounds {
                old_pos,
                len: source.len(),
            });
        }
        result.extend_from_slice(&source[cursor..old_pos]);
        cursor = old_pos;

        match op {
            Op::Delete { elem, .. } => {
                let Some(current) = source.get(old_pos) else {
                    return Err(ApplyError::OutOfBounds {
                        old_pos,
                        len: source.len(),
                    });
                };
                if !equals(current, elem.borrow()) {
                    return Err(ApplyError::DeleteMismatch { old_pos });
                }
                cursor += 1;
            }
            Op::Insert { new_pos, elem, .. } => {
                if result.len() != *new_pos {
                    return Err(ApplyError::InsertMisplaced {
                        new_pos: *new_pos,
                        actual: result.len(),
                    });
                }
                result.push(elem.borrow().clone());
            }
        }
    }

    result.extend_from_slice(&source[cursor..]);
    Ok(result)
}
