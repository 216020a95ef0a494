//! The pair record and its two tree-side views.

use twin_forest::TreeSide;

/// One pair of the map: a left value, a right value, and one link quartet
/// per tree. Membership in both trees is atomic: a record is linked into
/// both or into neither.
///
/// `p` / `l` / `r` / `h` are the left-ordered tree's links, `p2` / `l2` /
/// `r2` / `h2` the right-ordered tree's.
pub(crate) struct PairNode<L, R> {
    pub left: L,
    pub right: R,
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub h: u32,
    pub p2: Option<u32>,
    pub l2: Option<u32>,
    pub r2: Option<u32>,
    pub h2: u32,
}

impl<L, R> PairNode<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self {
            left,
            right,
            p: None,
            l: None,
            r: None,
            h: 1,
            p2: None,
            l2: None,
            r2: None,
            h2: 1,
        }
    }
}

/// Arena slot. Erasing a pair vacates its slot (dropping both values); the
/// index goes on the free-list and may be recycled by a later insert.
pub(crate) type Slot<L, R> = Option<PairNode<L, R>>;

#[inline]
fn live<L, R>(slot: &Slot<L, R>) -> &PairNode<L, R> {
    slot.as_ref().expect("live slot")
}

#[inline]
fn live_mut<L, R>(slot: &mut Slot<L, R>) -> &mut PairNode<L, R> {
    slot.as_mut().expect("live slot")
}

/// The left-ordered tree's view of a slot.
pub(crate) enum ByLeft {}

/// The right-ordered tree's view of a slot.
pub(crate) enum ByRight {}

impl<L, R> TreeSide<Slot<L, R>> for ByLeft {
    type Key = L;

    fn p(n: &Slot<L, R>) -> Option<u32> {
        live(n).p
    }
    fn l(n: &Slot<L, R>) -> Option<u32> {
        live(n).l
    }
    fn r(n: &Slot<L, R>) -> Option<u32> {
        live(n).r
    }
    fn set_p(n: &mut Slot<L, R>, v: Option<u32>) {
        live_mut(n).p = v;
    }
    fn set_l(n: &mut Slot<L, R>, v: Option<u32>) {
        live_mut(n).l = v;
    }
    fn set_r(n: &mut Slot<L, R>, v: Option<u32>) {
        live_mut(n).r = v;
    }
    fn height(n: &Slot<L, R>) -> u32 {
        live(n).h
    }
    fn set_height(n: &mut Slot<L, R>, h: u32) {
        live_mut(n).h = h;
    }
    fn key(n: &Slot<L, R>) -> &L {
        &live(n).left
    }
}

impl<L, R> TreeSide<Slot<L, R>> for ByRight {
    type Key = R;

    fn p(n: &Slot<L, R>) -> Option<u32> {
        live(n).p2
    }
    fn l(n: &Slot<L, R>) -> Option<u32> {
        live(n).l2
    }
    fn r(n: &Slot<L, R>) -> Option<u32> {
        live(n).r2
    }
    fn set_p(n: &mut Slot<L, R>, v: Option<u32>) {
        live_mut(n).p2 = v;
    }
    fn set_l(n: &mut Slot<L, R>, v: Option<u32>) {
        live_mut(n).l2 = v;
    }
    fn set_r(n: &mut Slot<L, R>, v: Option<u32>) {
        live_mut(n).r2 = v;
    }
    fn height(n: &Slot<L, R>) -> u32 {
        live(n).h2
    }
    fn set_height(n: &mut Slot<L, R>, h: u32) {
        live_mut(n).h2 = h;
    }
    fn key(n: &Slot<L, R>) -> &R {
        &live(n).right
    }
}
