mod balance;
mod inorder;
mod node;
mod raw_tree;

pub use balance::{Avl, Balance, Unbalanced};
pub(crate) use inorder::{InOrder, InOrderMut, IntoInOrder};
pub(crate) use node::Node;
pub(crate) use raw_tree::RawTree;
