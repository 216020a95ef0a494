//! Ordered traversal and lookup over one side of an arena-indexed tree.
//!
//! `next` / `prev` step via parent pointers, so in-order walks need no stack
//! and no recursion: descend into the right/left subtree's extreme when one
//! exists, otherwise ascend while the current node is a right/left child.
//!
//! Comparators return a sign (`< 0`, `0`, `> 0`); two keys are the same
//! value exactly when the comparator returns `0` for them.

use crate::types::TreeSide;

/// Leftmost node under `root`, or `None` for the empty tree.
pub fn first<N, S: TreeSide<N>>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = S::l(&arena[curr as usize]) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub fn last<N, S: TreeSide<N>>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = S::r(&arena[curr as usize]) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor of `curr`, or `None` past the last node.
pub fn next<N, S: TreeSide<N>>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = S::r(&arena[curr as usize]) {
        let mut c = r;
        while let Some(l) = S::l(&arena[c as usize]) {
            c = l;
        }
        return Some(c);
    }
    let mut p = S::p(&arena[curr as usize]);
    while let Some(pi) = p {
        if S::r(&arena[pi as usize]) == Some(curr) {
            curr = pi;
            p = S::p(&arena[pi as usize]);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor of `curr`.
pub fn prev<N, S: TreeSide<N>>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = S::l(&arena[curr as usize]) {
        let mut c = l;
        while let Some(r) = S::r(&arena[c as usize]) {
            c = r;
        }
        return Some(c);
    }
    let mut p = S::p(&arena[curr as usize]);
    while let Some(pi) = p {
        if S::l(&arena[pi as usize]) == Some(curr) {
            curr = pi;
            p = S::p(&arena[pi as usize]);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Node comparator-equivalent to `key`, or `None`.
pub fn find<N, S, C>(arena: &[N], root: Option<u32>, key: &S::Key, cmp: &C) -> Option<u32>
where
    S: TreeSide<N>,
    C: Fn(&S::Key, &S::Key) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let c = cmp(key, S::key(&arena[i as usize]));
        if c == 0 {
            return Some(i);
        }
        curr = if c < 0 {
            S::l(&arena[i as usize])
        } else {
            S::r(&arena[i as usize])
        };
    }
    None
}

/// First node whose key is not less than `key`, or `None`.
pub fn lower_bound<N, S, C>(arena: &[N], root: Option<u32>, key: &S::Key, cmp: &C) -> Option<u32>
where
    S: TreeSide<N>,
    C: Fn(&S::Key, &S::Key) -> i32,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        let c = cmp(S::key(&arena[i as usize]), key);
        if c < 0 {
            curr = S::r(&arena[i as usize]);
        } else if c > 0 {
            res = Some(i);
            curr = S::l(&arena[i as usize]);
        } else {
            return Some(i);
        }
    }
    res
}

/// First node whose key is strictly greater than `key`, or `None`.
pub fn upper_bound<N, S, C>(arena: &[N], root: Option<u32>, key: &S::Key, cmp: &C) -> Option<u32>
where
    S: TreeSide<N>,
    C: Fn(&S::Key, &S::Key) -> i32,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        let c = cmp(S::key(&arena[i as usize]), key);
        if c <= 0 {
            curr = S::r(&arena[i as usize]);
        } else {
            res = Some(i);
            curr = S::l(&arena[i as usize]);
        }
    }
    res
}
