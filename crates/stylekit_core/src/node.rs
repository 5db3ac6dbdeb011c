//! Node handles

use slotmap::new_key_type;

new_key_type! {
    /// Handle to an element in a document tree
    pub struct NodeId;
}
