//! Structural consistency check.
//!
//! Run by the pipeline after every pass in debug builds. A failure means a
//! pass left the tree in a state the printer could misread: a slot naming a
//! freed node, a slot naming a node that was detached and never put back, or
//! one node reachable from two slots.

use rustc_hash::FxHashSet;

use super::{Tree, TreeError};
use crate::NodeId;

impl Tree {
    pub fn validate(&self, root: NodeId) -> Result<(), TreeError> {
        self.node(root)?;
        let mut seen = FxHashSet::default();
        seen.insert(root);
        let mut worklist = vec![root];
        while let Some(id) = worklist.pop() {
            let node = self.node(id)?;
            let mut error = None;
            node.kind.for_each_slot(&mut |child| {
                if error.is_some() {
                    return;
                }
                match self.node(child) {
                    Err(e) => error = Some(e),
                    Ok(child_node) if child_node.parent != Some(id) => {
                        error = Some(TreeError::ParentMismatch {
                            child,
                            expected: id,
                            actual: child_node.parent,
                        });
                    }
                    Ok(_) if !seen.insert(child) => {
                        error = Some(TreeError::Shared { child });
                    }
                    Ok(_) => worklist.push(child),
                }
            });
            if let Some(error) = error {
                return Err(error);
            }
        }
        Ok(())
    }
}
