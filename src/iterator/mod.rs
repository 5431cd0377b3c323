//! Iterator pattern: a lazy, memoizing walk over a remote contact graph and
//! eager traversals over a binary tree.

pub mod contacts;
pub mod directory;
pub mod profile;
pub mod spammer;
pub mod tree;

pub use contacts::{Contact, ContactIterator};
pub use directory::{sample_profiles, Directory, SocialNetwork};
pub use profile::{Profile, CONTACT_KINDS};
pub use spammer::SocialSpammer;
pub use tree::{
    sample_tree, DepthFirstIterator, LevelOrderIterator, PreOrderIterator, TreeIterator, TreeNode,
};
