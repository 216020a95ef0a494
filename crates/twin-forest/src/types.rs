//! The tree-side accessor trait.

/// One tree's view of a node that may be a member of several trees at once.
///
/// A dual-tree node carries two independent link quartets; each quartet is
/// surfaced as its own `TreeSide` implementation (a zero-sized policy type),
/// and the tree functions take the side as a type parameter. The node itself
/// is stored in a caller-owned arena and addressed by `u32` index.
pub trait TreeSide<N> {
    /// The key this side orders by.
    type Key;

    fn p(n: &N) -> Option<u32>;
    fn l(n: &N) -> Option<u32>;
    fn r(n: &N) -> Option<u32>;
    fn set_p(n: &mut N, v: Option<u32>);
    fn set_l(n: &mut N, v: Option<u32>);
    fn set_r(n: &mut N, v: Option<u32>);

    /// Height of the subtree rooted here, counting this node. A leaf is 1.
    fn height(n: &N) -> u32;
    fn set_height(n: &mut N, h: u32);

    fn key(n: &N) -> &Self::Key;
}
