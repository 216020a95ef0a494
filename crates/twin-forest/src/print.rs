//! Debug printer for one side of an arena-indexed tree.

use std::fmt::Debug;

use crate::types::TreeSide;

/// Indented rendering of the subtree under `node`.
pub fn print<N, S>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    S: TreeSide<N>,
    S::Key: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<N, S>(arena, S::l(n), &format!("{tab}  "));
            let right = print::<N, S>(arena, S::r(n), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                S::height(n),
                S::key(n)
            )
        }
    }
}
