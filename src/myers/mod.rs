pub mod types;
pub use types::*;

use std::cmp::{max, min};
use std::ops::Range;
use tracing::{debug, trace};

/// Furthest reach per diagonal, kept in a ring of `2 * min(n, m) + 2` slots.
///
/// Diagonals are negative as often as positive, so the slot is the Euclidean
/// remainder. `abs(k % len)` is not equivalent: it maps `k` and `-k` to the
/// same slot.
struct V {
    data: Vec<isize>,
}

impl V {
    fn new(size: usize) -> Self {
        V {
            data: vec![0; size],
        }
    }

    fn slot(&self, k: isize) -> usize {
        k.rem_euclid(self.data.len() as isize) as usize
    }

    fn get(&self, k: isize) -> isize {
        self.data[self.slot(k)]
    }

    fn set(&mut self, k: isize, val: isize) {
        let slot = self.slot(k);
        self.data[slot] = val;
    }
}

/// Middle snake of a sub-problem, in coordinates local to its ranges.
/// `(x, y)` is where the snake starts, `(u, v)` where it ends.
#[derive(Debug)]
struct Snake {
    x: usize,
    y: usize,
    u: usize,
    v: usize,
    /// Edit distance of the whole sub-problem
    d: usize,
}

impl Snake {
    fn is_point(&self) -> bool {
        self.x == self.u || self.y == self.v
    }
}

struct Myers<'a, T, F> {
    source: &'a [T],
    target: &'a [T],
    equals: F,
    script: Script<&'a T>,
}

impl<'a, T, F> Myers<'a, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    fn compare(&mut self, source: Range<usize>, target: Range<usize>) {
        if source.is_empty() {
            let new = self.target;
            let old_pos = source.start;
            self.script.extend(target.map(|new_pos| Op::Insert {
                old_pos,
                new_pos,
                elem: &new[new_pos],
            }));
            return;
        }
        if target.is_empty() {
            let old = self.source;
            self.script.extend(source.map(|old_pos| Op::Delete {
                old_pos,
                elem: &old[old_pos],
            }));
            return;
        }

        let snake = self.middle_snake(&source, &target);
        trace!(
            source_start = source.start,
            target_start = target.start,
            x = snake.x,
            y = snake.y,
            u = snake.u,
            v = snake.v,
            d = snake.d,
            "middle snake"
        );

        let (n, m) = (source.len(), target.len());
        if snake.d > 1 || !snake.is_point() {
            self.compare(
                source.start..source.start + snake.x,
                target.start..target.start + snake.y,
            );
            self.compare(
                source.start + snake.u..source.end,
                target.start + snake.v..target.end,
            );
        } else if m > n {
            // one extra element at the end of target, the rest was matched
            self.compare(source.end..source.end, target.start + n..target.end);
        } else if m < n {
            self.compare(source.start + m..source.end, target.end..target.end);
        }
    }

    /// Runs the forward and backward searches in lockstep until their reaches
    /// overlap on a diagonal. Both ranges must be non-empty.
    fn middle_snake(&mut self, source: &Range<usize>, target: &Range<usize>) -> Snake {
        let n = source.len() as isize;
        let m = target.len() as isize;
        let l = n + m;
        let w = n - m;
        let ring = (2 * min(n, m) + 2) as usize;
        let mut forward = V::new(ring);
        let mut backward = V::new(ring);

        for h in 0..=(l / 2 + l % 2) {
            // parity 1 walks from the start, parity 0 from the end
            for parity in [1, 0] {
                let is_forward = parity == 1;
                let (c, d) = if is_forward {
                    (&mut forward, &backward)
                } else {
                    (&mut backward, &forward)
                };

                let k_min = -(h - 2 * max(0, h - m));
                let k_max = h - 2 * max(0, h - n);
                for k in (k_min..=k_max).step_by(2) {
                    let mut a = if k == -h || (k != h && c.get(k - 1) < c.get(k + 1)) {
                        c.get(k + 1)
                    } else {
                        c.get(k - 1) + 1
                    };
                    let mut b = a - k;
                    let (s, t) = (a, b);
                    while a < n && b < m && self.matches(source, target, a, b, is_forward) {
                        a += 1;
                        b += 1;
                    }
                    c.set(k, a);

                    let z = w - k;
                    if l % 2 == parity && z >= -(h - parity) && z <= h - parity && a + d.get(z) >= n
                    {
                        let (x, y, u, v, dist) = if is_forward {
                            (s, t, a, b, 2 * h - 1)
                        } else {
                            (n - a, m - b, n - s, m - t, 2 * h)
                        };
                        return Snake {
                            x: x as usize,
                            y: y as usize,
                            u: u as usize,
                            v: v as usize,
                            d: dist as usize,
                        };
                    }
                }
            }
        }

        unreachable!("no middle snake between {source:?} and {target:?}")
    }

    /// Compares the `a`-th source and `b`-th target element of the ranges,
    /// counted from the end when walking backward.
    fn matches(
        &mut self,
        source: &Range<usize>,
        target: &Range<usize>,
        a: isize,
        b: isize,
        is_forward: bool,
    ) -> bool {
        let (a, b) = (a as usize, b as usize);
        let (i, j) = if is_forward {
            (source.start + a, target.start + b)
        } else {
            (source.end - a - 1, target.end - b - 1)
        };
        let (old, new) = (self.source, self.target);
        (self.equals)(&old[i], &new[j])
    }
}

/// Computes the minimal edit script between two sequences, comparing
/// elements with `equals`.
///
/// This is the linear space variant of the Myers algorithm: it looks for the
/// middle snake of the edit graph and recurses on both sides of it. Memory is
/// `O(min(N, M))` and time `O(min(N, M) * D)`.
///
/// `equals` always receives the source element first. Elements in the script
/// borrow from `source` and `target`.
///
/// # Examples
///
/// ```
/// use editscript::myers::{diff_by, Op};
///
/// let old = ["Hello", "World"];
/// let new = ["hello", "rust", "world"];
/// let result = diff_by(&old, &new, |a, b| a.eq_ignore_ascii_case(b));
/// assert_eq!(result, vec![Op::Insert { old_pos: 1, new_pos: 1, elem: &"rust" }]);
/// ```
///
/// # Arguments
///
/// * `source` - The original sequence
/// * `target` - The new sequence
/// * `equals` - Equality between a source and a target element
pub fn diff_by<'a, T, F>(source: &'a [T], target: &'a [T], equals: F) -> Script<&'a T>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut myers = Myers {
        source,
        target,
        equals,
        script: Vec::new(),
    };
    myers.compare(0..source.len(), 0..target.len());
    debug!(
        source_len = source.len(),
        target_len = target.len(),
        ops = myers.script.len(),
        "computed edit script"
    );
    myers.script
}

/// Computes the minimal edit script between two sequences using `==`.
///
/// # Examples
///
/// ```
/// use editscript::myers::{diff, Op};
///
/// let old = vec![1, 2, 3];
/// let new = vec![1, 3, 4];
/// let result = diff(&old, &new);
/// assert_eq!(result, vec![
///     Op::Delete { old_pos: 1, elem: &2 },
///     Op::Insert { old_pos: 3, new_pos: 2, elem: &4 },
/// ]);
/// ```
pub fn diff<'a, T: PartialEq>(source: &'a [T], target: &'a [T]) -> Script<&'a T> {
    diff_by(source, target, |a, b| a == b)
}

/// Computes the diff between two lists of already split text tokens
/// (lines, words) using exact equality.
pub fn diff_text<'a, S: AsRef<str>>(source: &'a [S], target: &'a [S]) -> Script<&'a str> {
    diff_by(source, target, |a, b| {
        AsRef::<str>::as_ref(a) == AsRef::<str>::as_ref(b)
    })
    .into_iter()
    .map(|op| op.map(AsRef::<str>::as_ref))
    .collect()
}

/// Number of single element insertions and deletions needed to turn
/// `source` into `target`.
pub fn distance_by<T, F>(source: &[T], target: &[T], equals: F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    diff_by(source, target, equals).len()
}

/// Same as [`distance_by`] using `==`.
pub fn distance<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    distance_by(source, target, |a, b| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::apply;
    use proptest::prelude::*;

    fn del<T>(old_pos: usize, elem: T) -> Op<T> {
        Op::Delete { old_pos, elem }
    }

    fn ins<T>(old_pos: usize, new_pos: usize, elem: T) -> Op<T> {
        Op::Insert {
            old_pos,
            new_pos,
            elem,
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // quadratic LCS table, only used as a reference
    fn reference_distance<T: PartialEq>(old: &[T], new: &[T]) -> usize {
        let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];
        for x in 0..old.len() {
            for y in 0..new.len() {
                table[x + 1][y + 1] = if old[x] == new[y] {
                    table[x][y] + 1
                } else {
                    max(table[x][y + 1], table[x + 1][y])
                };
            }
        }
        old.len() + new.len() - 2 * table[old.len()][new.len()]
    }

    proptest! {
        #[test]
        fn test_reconstruction(
            old in prop::collection::vec(0u8..4, 0..40),
            new in prop::collection::vec(0u8..4, 0..40),
        ) {
            let result = diff(&old, &new);
            prop_assert_eq!(apply(&old, &result), Ok(new));
        }

        #[test]
        fn test_minimality(
            old in prop::collection::vec(0u8..3, 0..16),
            new in prop::collection::vec(0u8..3, 0..16),
        ) {
            prop_assert_eq!(diff(&old, &new).len(), reference_distance(&old, &new));
        }

        #[test]
        fn test_length_invariant(old: Vec<u8>, new: Vec<u8>) {
            let result = diff(&old, &new);
            let deletes = result.deletions();
            let inserts = result.insertions();
            prop_assert!(deletes <= old.len());
            prop_assert_eq!(old.len() - deletes, new.len() - inserts);
        }

        #[test]
        fn test_idempotency(els: Vec<u8>) {
            prop_assert_eq!(diff(&els, &els), vec![]);
        }

        #[test]
        fn test_new_empty(els: Vec<u8>) {
            let result = diff(&els, &[]);
            let expected: Script<&u8> = els.iter().enumerate().map(|(i, e)| del(i, e)).collect();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn test_old_empty(els: Vec<u8>) {
            let result = diff(&[], &els);
            let expected: Script<&u8> = els.iter().enumerate().map(|(i, e)| ins(0, i, e)).collect();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn test_symmetry(
            old in prop::collection::vec(0u8..4, 0..40),
            new in prop::collection::vec(0u8..4, 0..40),
        ) {
            let result = diff(&old, &new);
            let result_2 = diff(&new, &old);
            prop_assert_eq!(result.len(), result_2.len());
            prop_assert_eq!(result.insertions(), result_2.deletions());
            prop_assert_eq!(result.deletions(), result_2.insertions());
        }

        #[test]
        fn test_ordered_positions(
            old in prop::collection::vec(0u8..4, 0..40),
            new in prop::collection::vec(0u8..4, 0..40),
        ) {
            let result = diff(&old, &new);
            prop_assert!(result.windows(2).all(|w| w[0].old_pos() <= w[1].old_pos()));
        }
    }

    #[test]
    fn test_scenarios() {
        let empty: Vec<&str> = vec![];
        assert_eq!(diff_text(&empty, &empty), vec![]);
        assert_eq!(diff_text(&empty, &["foo"]), vec![ins(0, 0, "foo")]);
        assert_eq!(
            diff_text(&["foo", "bar", "baz"], &["foo", "bar", "baz"]),
            vec![]
        );
        assert_eq!(
            diff_text(&["foo", "bar", "baz"], &["foo", "baz"]),
            vec![del(1, "bar")]
        );
        assert_eq!(diff_text(&["baz"], &["foo", "baz"]), vec![ins(0, 0, "foo")]);
        assert_eq!(
            diff_text(&["bar", "baz"], &["foo", "baz"]),
            vec![del(0, "bar"), ins(1, 0, "foo")]
        );
        assert_eq!(
            diff_text(&["foo", "bar", "baz"], &["foo", "bar"]),
            vec![del(2, "baz")]
        );
    }

    #[test]
    fn test_simple_diff() {
        let old = chars("abc");
        let new = chars("axc");
        assert_eq!(diff(&old, &new), vec![del(1, &'b'), ins(2, 1, &'x')]);
    }

    #[test]
    fn test_completely_different() {
        let old = chars("abc");
        let new = chars("xyz");
        assert_eq!(
            diff(&old, &new),
            vec![
                del(0, &'a'),
                del(1, &'b'),
                del(2, &'c'),
                ins(3, 0, &'x'),
                ins(3, 1, &'y'),
                ins(3, 2, &'z'),
            ]
        );
    }

    #[test]
    fn test_single_element_different() {
        assert_eq!(diff(&["a"], &["b"]), vec![del(0, &"a"), ins(1, 0, &"b")]);
    }

    #[test]
    fn test_duplicates() {
        let old = chars("aab");
        let new = chars("abb");
        assert_eq!(diff(&old, &new), vec![del(0, &'a'), ins(3, 2, &'b')]);
    }

    #[test]
    fn test_insertion_in_middle() {
        let old = chars("ac");
        let new = chars("abc");
        assert_eq!(diff(&old, &new), vec![ins(1, 1, &'b')]);
    }

    #[test]
    fn test_paper_example() {
        let old = chars("abcabba");
        let new = chars("cbabac");
        assert_eq!(
            diff(&old, &new),
            vec![
                del(0, &'a'),
                ins(1, 0, &'c'),
                del(2, &'c'),
                del(5, &'b'),
                ins(7, 5, &'c'),
            ]
        );
        assert_eq!(distance(&old, &new), 5);
    }

    #[test]
    fn test_changes_at_both_ends() {
        let old = chars("abcdefghij");
        let new = chars("xbcdefghiy");
        assert_eq!(
            diff(&old, &new),
            vec![
                del(0, &'a'),
                ins(1, 0, &'x'),
                del(9, &'j'),
                ins(10, 9, &'y'),
            ]
        );
    }

    #[test]
    fn test_negative_diagonals() {
        // folding negative diagonals onto positive ones never terminates here
        let old = chars("ca");
        let new = chars("abbb");
        let result = diff(&old, &new);
        assert_eq!(result.len(), reference_distance(&old, &new));
        assert_eq!(apply(&old, &result), Ok(new));
    }

    #[test]
    fn test_custom_predicate() {
        let old = chars("Hello");
        let new = chars("hELLO");
        assert_eq!(diff_by(&old, &new, |a, b| a.eq_ignore_ascii_case(b)), vec![]);
        assert_eq!(distance_by(&old, &new, |a, b| a == b), 10);
    }

    #[test]
    fn test_predicate_argument_order() {
        // only holds when the source element comes first
        let old = vec![1, 2, 3];
        let new = vec![2, 3, 4];
        assert_eq!(diff_by(&old, &new, |a, b| a + 1 == *b), vec![]);
    }

    #[test]
    fn test_ring_slots() {
        let mut v = V::new(4);
        v.set(-1, 7);
        v.set(2, 9);
        assert_eq!(v.get(3), 7);
        assert_eq!(v.get(-2), 9);
        assert_eq!(v.slot(-5), 3);
    }
}
