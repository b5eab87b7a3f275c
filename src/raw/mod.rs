mod arena;
mod handle;
mod node;
mod raw_splay_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_splay_tree::RawSplayTree;
