//! Height-balanced insertion and removal for one side of an arena-indexed
//! tree.
//!
//! Every structural mutation updates all affected parent/child links before
//! heights are recomputed. After the structural step, `insert` and `remove`
//! walk the parent chain back to the root, recomputing each ancestor's
//! height and applying the standard single or double rotation wherever a
//! balance factor reaches ±2.

use crate::traverse::{first, next};
use crate::types::TreeSide;

#[inline]
fn height_of<N, S: TreeSide<N>>(arena: &[N], i: Option<u32>) -> u32 {
    i.map_or(0, |i| S::height(&arena[i as usize]))
}

#[inline]
fn update_height<N, S: TreeSide<N>>(arena: &mut [N], i: u32) {
    let lh = height_of::<N, S>(arena, S::l(&arena[i as usize]));
    let rh = height_of::<N, S>(arena, S::r(&arena[i as usize]));
    S::set_height(&mut arena[i as usize], 1 + lh.max(rh));
}

/// Single rotation for the left-left case: `nl` replaces `n` as subtree head.
fn ll_rotate<N, S: TreeSide<N>>(arena: &mut [N], n: u32, nl: u32) {
    let p = S::p(&arena[n as usize]);
    let nlr = S::r(&arena[nl as usize]);

    S::set_p(&mut arena[nl as usize], p);
    S::set_r(&mut arena[nl as usize], Some(n));
    S::set_p(&mut arena[n as usize], Some(nl));
    S::set_l(&mut arena[n as usize], nlr);
    if let Some(nlr) = nlr {
        S::set_p(&mut arena[nlr as usize], Some(n));
    }
    if let Some(p) = p {
        if S::l(&arena[p as usize]) == Some(n) {
            S::set_l(&mut arena[p as usize], Some(nl));
        } else {
            S::set_r(&mut arena[p as usize], Some(nl));
        }
    }

    update_height::<N, S>(arena, n);
    update_height::<N, S>(arena, nl);
}

/// Single rotation for the right-right case: `nr` replaces `n`.
fn rr_rotate<N, S: TreeSide<N>>(arena: &mut [N], n: u32, nr: u32) {
    let p = S::p(&arena[n as usize]);
    let nrl = S::l(&arena[nr as usize]);

    S::set_p(&mut arena[nr as usize], p);
    S::set_l(&mut arena[nr as usize], Some(n));
    S::set_p(&mut arena[n as usize], Some(nr));
    S::set_r(&mut arena[n as usize], nrl);
    if let Some(nrl) = nrl {
        S::set_p(&mut arena[nrl as usize], Some(n));
    }
    if let Some(p) = p {
        if S::l(&arena[p as usize]) == Some(n) {
            S::set_l(&mut arena[p as usize], Some(nr));
        } else {
            S::set_r(&mut arena[p as usize], Some(nr));
        }
    }

    update_height::<N, S>(arena, n);
    update_height::<N, S>(arena, nr);
}

/// Double rotation for the left-right case: `nlr` replaces `n`.
fn lr_rotate<N, S: TreeSide<N>>(arena: &mut [N], n: u32, nl: u32, nlr: u32) {
    rr_rotate::<N, S>(arena, nl, nlr);
    ll_rotate::<N, S>(arena, n, nlr);
}

/// Double rotation for the right-left case: `nrl` replaces `n`.
fn rl_rotate<N, S: TreeSide<N>>(arena: &mut [N], n: u32, nr: u32, nrl: u32) {
    ll_rotate::<N, S>(arena, nr, nrl);
    rr_rotate::<N, S>(arena, n, nrl);
}

/// Recomputes `n`'s height and rotates once if `n` is out of balance.
/// Returns the node now heading this subtree.
fn rebalance<N, S: TreeSide<N>>(arena: &mut [N], n: u32) -> u32 {
    update_height::<N, S>(arena, n);
    let lh = height_of::<N, S>(arena, S::l(&arena[n as usize]));
    let rh = height_of::<N, S>(arena, S::r(&arena[n as usize]));

    if lh > rh + 1 {
        let nl = S::l(&arena[n as usize]).expect("left child exists");
        let nll = height_of::<N, S>(arena, S::l(&arena[nl as usize]));
        let nlr = height_of::<N, S>(arena, S::r(&arena[nl as usize]));
        if nll >= nlr {
            ll_rotate::<N, S>(arena, n, nl);
            nl
        } else {
            let c = S::r(&arena[nl as usize]).expect("right child exists");
            lr_rotate::<N, S>(arena, n, nl, c);
            c
        }
    } else if rh > lh + 1 {
        let nr = S::r(&arena[n as usize]).expect("right child exists");
        let nrr = height_of::<N, S>(arena, S::r(&arena[nr as usize]));
        let nrl = height_of::<N, S>(arena, S::l(&arena[nr as usize]));
        if nrr >= nrl {
            rr_rotate::<N, S>(arena, n, nr);
            nr
        } else {
            let c = S::l(&arena[nr as usize]).expect("left child exists");
            rl_rotate::<N, S>(arena, n, nr, c);
            c
        }
    } else {
        n
    }
}

/// Rebalances every node from `n` up to the root. Returns the root.
fn retrace<N, S: TreeSide<N>>(arena: &mut [N], mut n: u32) -> u32 {
    loop {
        let head = rebalance::<N, S>(arena, n);
        match S::p(&arena[head as usize]) {
            Some(p) => n = p,
            None => return head,
        }
    }
}

/// Structural insertion of `node` at the position dictated by descending
/// comparisons from `root`, followed by rebalancing. Returns the new root.
///
/// The caller guarantees `node`'s key is not already present; the engine
/// performs no duplicate check.
pub fn insert<N, S, C>(arena: &mut [N], root: Option<u32>, node: u32, cmp: &C) -> u32
where
    S: TreeSide<N>,
    C: Fn(&S::Key, &S::Key) -> i32,
{
    S::set_l(&mut arena[node as usize], None);
    S::set_r(&mut arena[node as usize], None);
    S::set_height(&mut arena[node as usize], 1);

    let Some(mut curr) = root else {
        S::set_p(&mut arena[node as usize], None);
        return node;
    };

    loop {
        let c = cmp(
            S::key(&arena[node as usize]),
            S::key(&arena[curr as usize]),
        );
        let child = if c < 0 {
            S::l(&arena[curr as usize])
        } else {
            S::r(&arena[curr as usize])
        };
        match child {
            Some(nxt) => curr = nxt,
            None => {
                if c < 0 {
                    S::set_l(&mut arena[curr as usize], Some(node));
                } else {
                    S::set_r(&mut arena[curr as usize], Some(node));
                }
                S::set_p(&mut arena[node as usize], Some(curr));
                return retrace::<N, S>(arena, curr);
            }
        }
    }
}

/// Exchanges the tree positions of `x` and `y` without touching either
/// node's identity or stored values. Handles the adjacent parent/child
/// cases explicitly. Returns the (possibly new) root.
fn swap_positions<N, S: TreeSide<N>>(arena: &mut [N], mut root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let xp = S::p(&arena[x as usize]);
    let xl = S::l(&arena[x as usize]);
    let xr = S::r(&arena[x as usize]);

    let yp = S::p(&arena[y as usize]);
    let yl = S::l(&arena[y as usize]);
    let yr = S::r(&arena[y as usize]);

    if yl == Some(x) {
        S::set_l(&mut arena[x as usize], Some(y));
        S::set_p(&mut arena[y as usize], Some(x));
    } else {
        S::set_l(&mut arena[x as usize], yl);
        if let Some(yl) = yl {
            S::set_p(&mut arena[yl as usize], Some(x));
        }
    }

    if yr == Some(x) {
        S::set_r(&mut arena[x as usize], Some(y));
        S::set_p(&mut arena[y as usize], Some(x));
    } else {
        S::set_r(&mut arena[x as usize], yr);
        if let Some(yr) = yr {
            S::set_p(&mut arena[yr as usize], Some(x));
        }
    }

    if xl == Some(y) {
        S::set_l(&mut arena[y as usize], Some(x));
        S::set_p(&mut arena[x as usize], Some(y));
    } else {
        S::set_l(&mut arena[y as usize], xl);
        if let Some(xl) = xl {
            S::set_p(&mut arena[xl as usize], Some(y));
        }
    }

    if xr == Some(y) {
        S::set_r(&mut arena[y as usize], Some(x));
        S::set_p(&mut arena[x as usize], Some(y));
    } else {
        S::set_r(&mut arena[y as usize], xr);
        if let Some(xr) = xr {
            S::set_p(&mut arena[xr as usize], Some(y));
        }
    }

    if xp.is_none() {
        root = y;
        S::set_p(&mut arena[y as usize], None);
    } else if xp != Some(y) {
        S::set_p(&mut arena[y as usize], xp);
        if let Some(xp) = xp {
            if S::l(&arena[xp as usize]) == Some(x) {
                S::set_l(&mut arena[xp as usize], Some(y));
            } else {
                S::set_r(&mut arena[xp as usize], Some(y));
            }
        }
    }

    if yp.is_none() {
        root = x;
        S::set_p(&mut arena[x as usize], None);
    } else if yp != Some(x) {
        S::set_p(&mut arena[x as usize], yp);
        if let Some(yp) = yp {
            if S::l(&arena[yp as usize]) == Some(y) {
                S::set_l(&mut arena[yp as usize], Some(x));
            } else {
                S::set_r(&mut arena[yp as usize], Some(x));
            }
        }
    }

    // Heights belong to positions, not nodes.
    let xh = S::height(&arena[x as usize]);
    let yh = S::height(&arena[y as usize]);
    S::set_height(&mut arena[x as usize], yh);
    S::set_height(&mut arena[y as usize], xh);

    root
}

/// Removes `node` from the tree rooted at `root`, then rebalances the
/// ancestor chain. Returns the new root (`None` if the tree became empty).
///
/// A node with two children first swaps positions with its in-order
/// predecessor (the rightmost node of its left subtree) so that both nodes
/// keep their identities, then is detached from its now-trivial position.
/// `node`'s links are cleared on the way out.
pub fn remove<N, S: TreeSide<N>>(arena: &mut [N], root: u32, node: u32) -> Option<u32> {
    let mut root = root;

    if S::l(&arena[node as usize]).is_some() && S::r(&arena[node as usize]).is_some() {
        let mut pred = S::l(&arena[node as usize]).expect("left child exists");
        while let Some(r) = S::r(&arena[pred as usize]) {
            pred = r;
        }
        root = swap_positions::<N, S>(arena, root, node, pred);
    }

    let p = S::p(&arena[node as usize]);
    let child = S::l(&arena[node as usize]).or(S::r(&arena[node as usize]));
    if let Some(c) = child {
        S::set_p(&mut arena[c as usize], p);
    }

    S::set_p(&mut arena[node as usize], None);
    S::set_l(&mut arena[node as usize], None);
    S::set_r(&mut arena[node as usize], None);
    S::set_height(&mut arena[node as usize], 1);

    let Some(p) = p else {
        return child;
    };

    if S::l(&arena[p as usize]) == Some(node) {
        S::set_l(&mut arena[p as usize], child);
    } else {
        S::set_r(&mut arena[p as usize], child);
    }
    Some(retrace::<N, S>(arena, p))
}

/// Validates parent links, stored heights, the balance bound, and strict
/// in-order key ordering for the tree rooted at `root`.
pub fn assert_tree<N, S, C>(arena: &[N], root: Option<u32>, cmp: &C) -> Result<(), String>
where
    S: TreeSide<N>,
    C: Fn(&S::Key, &S::Key) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if S::p(&arena[root as usize]).is_some() {
        return Err("root has a parent".to_string());
    }

    fn check<N, S: TreeSide<N>>(arena: &[N], node: u32) -> Result<u32, String> {
        let l = S::l(&arena[node as usize]);
        let r = S::r(&arena[node as usize]);

        let mut lh = 0;
        if let Some(l) = l {
            if S::p(&arena[l as usize]) != Some(node) {
                return Err("broken parent link on left child".to_string());
            }
            lh = check::<N, S>(arena, l)?;
        }
        let mut rh = 0;
        if let Some(r) = r {
            if S::p(&arena[r as usize]) != Some(node) {
                return Err("broken parent link on right child".to_string());
            }
            rh = check::<N, S>(arena, r)?;
        }

        let expected = 1 + lh.max(rh);
        let actual = S::height(&arena[node as usize]);
        if actual != expected {
            return Err(format!("height mismatch: expected {expected}, got {actual}"));
        }
        if lh.abs_diff(rh) > 1 {
            return Err("balance violated".to_string());
        }

        Ok(expected)
    }

    check::<N, S>(arena, root)?;

    let mut curr = first::<N, S>(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let c = cmp(S::key(&arena[prev as usize]), S::key(&arena[i as usize]));
            if c >= 0 {
                return Err("node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next::<N, S>(arena, i);
    }

    Ok(())
}
