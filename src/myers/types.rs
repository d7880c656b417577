/// Alias for a vector of Op
/// Result of the Myers diff functions
pub type Script<T> = Vec<Op<T>>;

/// A single step of an edit script.
///
/// `old_pos` is always a position in the source sequence: the removed element
/// for a `Delete`, the element the insertion lands in front of for an `Insert`.
/// `new_pos` is the position of the inserted element in the target sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op<T> {
    Delete {
        old_pos: usize,
        elem: T,
    },
    Insert {
        old_pos: usize,
        new_pos: usize,
        elem: T,
    },
}

impl<T> Op<T> {
    pub fn old_pos(&self) -> usize {
        match self {
            Op::Delete { old_pos, .. } | Op::Insert { old_pos, .. } => *old_pos,
        }
    }

    /// Position in the target sequence, `None` for deletions.
    pub fn new_pos(&self) -> Option<usize> {
        match self {
            Op::Delete { .. } => None,
            Op::Insert { new_pos, .. } => Some(*new_pos),
        }
    }

    pub fn elem(&self) -> &T {
        match self {
            Op::Delete { elem, .. } | Op::Insert { elem, .. } => elem,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Op::Insert { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Op::Delete { .. })
    }

    /// Transforms the element while keeping both positions.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Op<U> {
        match self {
            Op::Delete { old_pos, elem } => Op::Delete {
                old_pos,
                elem: f(elem),
            },
            Op::Insert {
                old_pos,
                new_pos,
                elem,
            } => Op::Insert {
                old_pos,
                new_pos,
                elem: f(elem),
            },
        }
    }
}

impl<T: Clone> Op<&T> {
    pub fn cloned(&self) -> Op<T> {
        (*self).map(|elem| elem.clone())
    }
}

/// Counters over a whole script.
pub trait ScriptExt {
    fn insertions(&self) -> usize;
    fn deletions(&self) -> usize;
}

impl<T> ScriptExt for [Op<T>] {
    fn insertions(&self) -> usize {
        self.iter().filter(|op| op.is_insert()).count()
    }

    fn deletions(&self) -> usize {
        self.iter().filter(|op| op.is_delete()).count()
    }
}
