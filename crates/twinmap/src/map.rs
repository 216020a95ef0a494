//! The dual-view container.

use std::fmt;

use twin_forest::{assert_tree, avl, find, first, last, lower_bound, next, prev, upper_bound};

use crate::cursor::{LeftCursor, RightCursor};
use crate::error::TwinMapError;
use crate::node::{ByLeft, ByRight, PairNode, Slot};

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// An ordered bidirectional map: a set of `(left, right)` pairs in which
/// every left value and every right value appears at most once.
///
/// Two AVL trees index the same slot arena, one ordered by the left
/// comparator and one by the right, so lookup, insertion, and removal are
/// O(log n) from either side, and a cursor in one ordering converts to the
/// other ordering in O(1) ([`LeftCursor::flip`]).
///
/// Comparators return a sign; two keys are the same value exactly when the
/// comparator returns `0` for them.
pub struct TwinMap<L, R, CL = fn(&L, &L) -> i32, CR = fn(&R, &R) -> i32>
where
    CL: Fn(&L, &L) -> i32,
    CR: Fn(&R, &R) -> i32,
{
    slots: Vec<Slot<L, R>>,
    free: Vec<u32>,
    left_root: Option<u32>,
    right_root: Option<u32>,
    cmp_left: CL,
    cmp_right: CR,
    len: usize,
}

impl<L, R> TwinMap<L, R>
where
    L: PartialOrd,
    R: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparators(default_comparator::<L>, default_comparator::<R>)
    }
}

impl<L, R> Default for TwinMap<L, R>
where
    L: PartialOrd,
    R: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R, CL, CR> TwinMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> i32,
    CR: Fn(&R, &R) -> i32,
{
    pub fn with_comparators(cmp_left: CL, cmp_right: CR) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            left_root: None,
            right_root: None,
            cmp_left,
            cmp_right,
            len: 0,
        }
    }

    fn alloc(&mut self, node: PairNode<L, R>) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.slots[i as usize] = Some(node);
                i
            }
            None => {
                self.slots.push(Some(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, i: u32) {
        self.slots[i as usize] = None;
        self.free.push(i);
    }

    fn node(&self, i: u32) -> &PairNode<L, R> {
        self.slots[i as usize].as_ref().expect("live slot")
    }

    /// Number of pairs.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every pair. Invalidates all cursors.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.left_root = None;
        self.right_root = None;
        self.len = 0;
    }

    /// O(1) content exchange.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    // ---- cursors, left view ----

    /// Cursor to the minimum left value, or the end cursor when empty.
    pub fn begin_left(&self) -> LeftCursor {
        LeftCursor(first::<_, ByLeft>(&self.slots, self.left_root))
    }

    /// One past the maximum left value.
    pub fn end_left(&self) -> LeftCursor {
        LeftCursor(None)
    }

    /// In-order successor. Advancing the end cursor is a programmer error.
    pub fn next_left(&self, cur: LeftCursor) -> LeftCursor {
        match cur.0 {
            Some(i) => LeftCursor(next::<_, ByLeft>(&self.slots, i)),
            None => {
                debug_assert!(false, "advancing the end cursor");
                cur
            }
        }
    }

    /// In-order predecessor. Stepping back from the end cursor yields the
    /// maximum pair.
    pub fn prev_left(&self, cur: LeftCursor) -> LeftCursor {
        match cur.0 {
            Some(i) => LeftCursor(prev::<_, ByLeft>(&self.slots, i)),
            None => LeftCursor(last::<_, ByLeft>(&self.slots, self.left_root)),
        }
    }

    /// The left value under the cursor, `None` at the end.
    pub fn left_at(&self, cur: LeftCursor) -> Option<&L> {
        cur.0.map(|i| &self.node(i).left)
    }

    /// Both values of the pair under the cursor.
    pub fn pair_at_left(&self, cur: LeftCursor) -> Option<(&L, &R)> {
        cur.0.map(|i| {
            let n = self.node(i);
            (&n.left, &n.right)
        })
    }

    // ---- cursors, right view ----

    pub fn begin_right(&self) -> RightCursor {
        RightCursor(first::<_, ByRight>(&self.slots, self.right_root))
    }

    pub fn end_right(&self) -> RightCursor {
        RightCursor(None)
    }

    pub fn next_right(&self, cur: RightCursor) -> RightCursor {
        match cur.0 {
            Some(i) => RightCursor(next::<_, ByRight>(&self.slots, i)),
            None => {
                debug_assert!(false, "advancing the end cursor");
                cur
            }
        }
    }

    pub fn prev_right(&self, cur: RightCursor) -> RightCursor {
        match cur.0 {
            Some(i) => RightCursor(prev::<_, ByRight>(&self.slots, i)),
            None => RightCursor(last::<_, ByRight>(&self.slots, self.right_root)),
        }
    }

    /// The right value under the cursor, `None` at the end.
    pub fn right_at(&self, cur: RightCursor) -> Option<&R> {
        cur.0.map(|i| &self.node(i).right)
    }

    pub fn pair_at_right(&self, cur: RightCursor) -> Option<(&R, &L)> {
        cur.0.map(|i| {
            let n = self.node(i);
            (&n.right, &n.left)
        })
    }

    // ---- lookup ----

    /// Cursor to the pair with this left value, or the end cursor.
    pub fn find_left(&self, key: &L) -> LeftCursor {
        LeftCursor(find::<_, ByLeft, _>(
            &self.slots,
            self.left_root,
            key,
            &self.cmp_left,
        ))
    }

    pub fn find_right(&self, key: &R) -> RightCursor {
        RightCursor(find::<_, ByRight, _>(
            &self.slots,
            self.right_root,
            key,
            &self.cmp_right,
        ))
    }

    pub fn contains_left(&self, key: &L) -> bool {
        !self.find_left(key).is_end()
    }

    pub fn contains_right(&self, key: &R) -> bool {
        !self.find_right(key).is_end()
    }

    /// The right value paired with `key`, or [`TwinMapError::NotFound`].
    pub fn at_left(&self, key: &L) -> Result<&R, TwinMapError> {
        match find::<_, ByLeft, _>(&self.slots, self.left_root, key, &self.cmp_left) {
            Some(i) => Ok(&self.node(i).right),
            None => Err(TwinMapError::NotFound),
        }
    }

    /// The left value paired with `key`, or [`TwinMapError::NotFound`].
    pub fn at_right(&self, key: &R) -> Result<&L, TwinMapError> {
        match find::<_, ByRight, _>(&self.slots, self.right_root, key, &self.cmp_right) {
            Some(i) => Ok(&self.node(i).left),
            None => Err(TwinMapError::NotFound),
        }
    }

    /// First pair whose left value is not less than `key`.
    pub fn lower_bound_left(&self, key: &L) -> LeftCursor {
        LeftCursor(lower_bound::<_, ByLeft, _>(
            &self.slots,
            self.left_root,
            key,
            &self.cmp_left,
        ))
    }

    /// First pair whose left value is strictly greater than `key`.
    pub fn upper_bound_left(&self, key: &L) -> LeftCursor {
        LeftCursor(upper_bound::<_, ByLeft, _>(
            &self.slots,
            self.left_root,
            key,
            &self.cmp_left,
        ))
    }

    pub fn lower_bound_right(&self, key: &R) -> RightCursor {
        RightCursor(lower_bound::<_, ByRight, _>(
            &self.slots,
            self.right_root,
            key,
            &self.cmp_right,
        ))
    }

    pub fn upper_bound_right(&self, key: &R) -> RightCursor {
        RightCursor(upper_bound::<_, ByRight, _>(
            &self.slots,
            self.right_root,
            key,
            &self.cmp_right,
        ))
    }

    // ---- mutation ----

    /// Inserts the pair `(left, right)` and returns a cursor to it.
    ///
    /// If either value is already present on its side, nothing is inserted
    /// and the end cursor is returned.
    pub fn insert(&mut self, left: L, right: R) -> LeftCursor {
        if self.contains_left(&left) || self.contains_right(&right) {
            return self.end_left();
        }

        let idx = self.alloc(PairNode::new(left, right));
        self.left_root = Some(avl::insert::<_, ByLeft, _>(
            &mut self.slots,
            self.left_root,
            idx,
            &self.cmp_left,
        ));
        self.right_root = Some(avl::insert::<_, ByRight, _>(
            &mut self.slots,
            self.right_root,
            idx,
            &self.cmp_right,
        ));
        self.len += 1;
        LeftCursor(Some(idx))
    }

    fn unlink(&mut self, idx: u32) {
        let lroot = self.left_root.expect("map not empty");
        self.left_root = avl::remove::<_, ByLeft>(&mut self.slots, lroot, idx);
        let rroot = self.right_root.expect("map not empty");
        self.right_root = avl::remove::<_, ByRight>(&mut self.slots, rroot, idx);
        self.release(idx);
        self.len -= 1;
    }

    /// Erases the pair under the cursor from both views and returns the
    /// successor in the left ordering. Erasing the end cursor is a
    /// programmer error.
    pub fn erase_left_at(&mut self, cur: LeftCursor) -> LeftCursor {
        let idx = cur.0.expect("erasing the end cursor");
        let succ = next::<_, ByLeft>(&self.slots, idx);
        self.unlink(idx);
        LeftCursor(succ)
    }

    /// Right-view twin of [`TwinMap::erase_left_at`].
    pub fn erase_right_at(&mut self, cur: RightCursor) -> RightCursor {
        let idx = cur.0.expect("erasing the end cursor");
        let succ = next::<_, ByRight>(&self.slots, idx);
        self.unlink(idx);
        RightCursor(succ)
    }

    /// Erases the pair with this left value, if any. Returns whether a pair
    /// was erased.
    pub fn erase_left(&mut self, key: &L) -> bool {
        match find::<_, ByLeft, _>(&self.slots, self.left_root, key, &self.cmp_left) {
            Some(i) => {
                self.unlink(i);
                true
            }
            None => false,
        }
    }

    pub fn erase_right(&mut self, key: &R) -> bool {
        match find::<_, ByRight, _>(&self.slots, self.right_root, key, &self.cmp_right) {
            Some(i) => {
                self.unlink(i);
                true
            }
            None => false,
        }
    }

    /// Erases every pair in `[first, last)` of the left ordering and
    /// returns `last`.
    pub fn erase_left_range(&mut self, first: LeftCursor, last: LeftCursor) -> LeftCursor {
        let mut curr = first;
        while curr != last {
            curr = self.erase_left_at(curr);
        }
        last
    }

    pub fn erase_right_range(&mut self, first: RightCursor, last: RightCursor) -> RightCursor {
        let mut curr = first;
        while curr != last {
            curr = self.erase_right_at(curr);
        }
        last
    }

    /// The right value paired with `key`, inserting `(key, R::default())`
    /// when `key` is absent.
    ///
    /// If the default right value is already paired with some *other* left
    /// key, that pair is erased first; asking for the default on a new key
    /// steals the default away from whichever key held it.
    pub fn at_left_or_default(&mut self, key: L) -> &R
    where
        R: Default,
    {
        if let Some(i) = find::<_, ByLeft, _>(&self.slots, self.left_root, &key, &self.cmp_left) {
            return &self.node(i).right;
        }
        let def = R::default();
        if let Some(holder) =
            find::<_, ByRight, _>(&self.slots, self.right_root, &def, &self.cmp_right)
        {
            self.unlink(holder);
        }
        let cur = self.insert(key, def);
        let idx = cur.0.expect("insert succeeds after eviction");
        &self.node(idx).right
    }

    /// Mirror of [`TwinMap::at_left_or_default`], defaulting the left side.
    pub fn at_right_or_default(&mut self, key: R) -> &L
    where
        L: Default,
    {
        if let Some(i) = find::<_, ByRight, _>(&self.slots, self.right_root, &key, &self.cmp_right)
        {
            return &self.node(i).left;
        }
        let def = L::default();
        if let Some(holder) =
            find::<_, ByLeft, _>(&self.slots, self.left_root, &def, &self.cmp_left)
        {
            self.unlink(holder);
        }
        let def_cur = self.insert(def, key);
        let idx = def_cur.0.expect("insert succeeds after eviction");
        &self.node(idx).left
    }

    // ---- iteration ----

    /// Pairs in left order.
    pub fn iter_left(&self) -> LeftIter<'_, L, R> {
        LeftIter {
            slots: &self.slots,
            curr: first::<_, ByLeft>(&self.slots, self.left_root),
        }
    }

    /// Pairs in reverse left order.
    pub fn iter_left_rev(&self) -> LeftRevIter<'_, L, R> {
        LeftRevIter {
            slots: &self.slots,
            curr: last::<_, ByLeft>(&self.slots, self.left_root),
        }
    }

    /// `(right, left)` pairs in right order.
    pub fn iter_right(&self) -> RightIter<'_, L, R> {
        RightIter {
            slots: &self.slots,
            curr: first::<_, ByRight>(&self.slots, self.right_root),
        }
    }

    /// `(right, left)` pairs in reverse right order.
    pub fn iter_right_rev(&self) -> RightRevIter<'_, L, R> {
        RightRevIter {
            slots: &self.slots,
            curr: last::<_, ByRight>(&self.slots, self.right_root),
        }
    }

    // ---- validation ----

    /// Checks every structural invariant: both trees' balance, heights,
    /// parent links and strict ordering, plus the coupling between the
    /// trees and the slot bookkeeping.
    pub fn assert_valid(&self) -> Result<(), String> {
        assert_tree::<_, ByLeft, _>(&self.slots, self.left_root, &self.cmp_left)?;
        assert_tree::<_, ByRight, _>(&self.slots, self.right_root, &self.cmp_right)?;

        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        if occupied != self.len {
            return Err(format!("{} live slots, size {}", occupied, self.len));
        }
        if occupied + self.free.len() != self.slots.len() {
            return Err("slot bookkeeping broken".to_string());
        }
        for &i in &self.free {
            if self.slots[i as usize].is_some() {
                return Err("free-list entry is occupied".to_string());
            }
        }

        let mut in_left = vec![false; self.slots.len()];
        let mut count = 0usize;
        let mut curr = first::<_, ByLeft>(&self.slots, self.left_root);
        while let Some(i) = curr {
            in_left[i as usize] = true;
            count += 1;
            curr = next::<_, ByLeft>(&self.slots, i);
        }
        if count != self.len {
            return Err(format!("left tree reaches {count} pairs, size {}", self.len));
        }

        let mut count = 0usize;
        let mut curr = first::<_, ByRight>(&self.slots, self.right_root);
        while let Some(i) = curr {
            if !in_left[i as usize] {
                return Err("right tree reaches a pair the left tree does not".to_string());
            }
            count += 1;
            curr = next::<_, ByRight>(&self.slots, i);
        }
        if count != self.len {
            return Err(format!(
                "right tree reaches {count} pairs, size {}",
                self.len
            ));
        }

        Ok(())
    }
}

impl<L, R, CL, CR> PartialEq for TwinMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> i32,
    CR: Fn(&R, &R) -> i32,
{
    /// Equal when the sizes match and, at **every** position of the left
    /// ordering, both sides are comparator-equivalent under `self`'s
    /// comparators.
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut a = first::<_, ByLeft>(&self.slots, self.left_root);
        let mut b = first::<_, ByLeft>(&other.slots, other.left_root);
        while let (Some(i), Some(j)) = (a, b) {
            let an = self.node(i);
            let bn = other.node(j);
            if (self.cmp_left)(&an.left, &bn.left) != 0 {
                return false;
            }
            if (self.cmp_right)(&an.right, &bn.right) != 0 {
                return false;
            }
            a = next::<_, ByLeft>(&self.slots, i);
            b = next::<_, ByLeft>(&other.slots, j);
        }
        true
    }
}

impl<L, R, CL, CR> Clone for TwinMap<L, R, CL, CR>
where
    L: Clone,
    R: Clone,
    CL: Fn(&L, &L) -> i32 + Clone,
    CR: Fn(&R, &R) -> i32 + Clone,
{
    /// Deep copy: a fresh arena holding the same logical pairs. Mutating
    /// one copy never affects the other.
    fn clone(&self) -> Self {
        let mut out = Self::with_comparators(self.cmp_left.clone(), self.cmp_right.clone());
        for (l, r) in self.iter_left() {
            out.insert(l.clone(), r.clone());
        }
        out
    }
}

impl<L, R, CL, CR> Extend<(L, R)> for TwinMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> i32,
    CR: Fn(&R, &R) -> i32,
{
    /// Inserts each pair; duplicates are rejected the way [`TwinMap::insert`]
    /// rejects them.
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (l, r) in iter {
            self.insert(l, r);
        }
    }
}

impl<L, R> FromIterator<(L, R)> for TwinMap<L, R>
where
    L: PartialOrd,
    R: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<L, R, CL, CR> fmt::Debug for TwinMap<L, R, CL, CR>
where
    L: fmt::Debug,
    R: fmt::Debug,
    CL: Fn(&L, &L) -> i32,
    CR: Fn(&R, &R) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

pub struct LeftIter<'a, L, R> {
    slots: &'a [Slot<L, R>],
    curr: Option<u32>,
}

impl<'a, L, R> Iterator for LeftIter<'a, L, R> {
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        let n = self.slots[i as usize].as_ref().expect("live slot");
        self.curr = next::<_, ByLeft>(self.slots, i);
        Some((&n.left, &n.right))
    }
}

pub struct LeftRevIter<'a, L, R> {
    slots: &'a [Slot<L, R>],
    curr: Option<u32>,
}

impl<'a, L, R> Iterator for LeftRevIter<'a, L, R> {
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        let n = self.slots[i as usize].as_ref().expect("live slot");
        self.curr = prev::<_, ByLeft>(self.slots, i);
        Some((&n.left, &n.right))
    }
}

pub struct RightIter<'a, L, R> {
    slots: &'a [Slot<L, R>],
    curr: Option<u32>,
}

impl<'a, L, R> Iterator for RightIter<'a, L, R> {
    type Item = (&'a R, &'a L);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        let n = self.slots[i as usize].as_ref().expect("live slot");
        self.curr = next::<_, ByRight>(self.slots, i);
        Some((&n.right, &n.left))
    }
}

pub struct RightRevIter<'a, L, R> {
    slots: &'a [Slot<L, R>],
    curr: Option<u32>,
}

impl<'a, L, R> Iterator for RightRevIter<'a, L, R> {
    type Item = (&'a R, &'a L);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        let n = self.slots[i as usize].as_ref().expect("live slot");
        self.curr = prev::<_, ByRight>(self.slots, i);
        Some((&n.right, &n.left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_recycled() {
        let mut map: TwinMap<i32, i32> = TwinMap::new();
        for i in 0..8 {
            map.insert(i, -i);
        }
        let slots_before = map.slots.len();

        assert!(map.erase_left(&3));
        assert_eq!(map.free.len(), 1);

        map.insert(100, -100);
        assert_eq!(map.free.len(), 0);
        assert_eq!(map.slots.len(), slots_before);
        map.assert_valid().unwrap();
    }
}
