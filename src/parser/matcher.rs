use log::{debug, trace};
use serde_json::Value;
use std::sync::Arc;

use super::context::{ContextPropagator, GroupContext};
use super::signature::SignatureSet;

/// A node that matched a record signature, annotated with the nearest
/// enclosing group context.
#[derive(Debug, Clone)]
pub struct CandidateRecord<'a> {
    pub node: &'a Value,
    pub context: Arc<GroupContext>,
    /// Index of the source the node came from.
    pub source: usize,
    /// Discovery order inside that source.
    pub ordinal: usize,
    pub depth: usize,
}

impl<'a> CandidateRecord<'a> {
    pub fn with_source(mut self, source: usize) -> Self {
        self.source = source;
        self
    }
}

pub struct StructuralMatcher<'s> {
    signatures: &'s SignatureSet,
}

impl<'s> StructuralMatcher<'s> {
    pub fn new(signatures: &'s SignatureSet) -> Self {
        Self { signatures }
    }

    /// Lazily yields every record-shaped node under `root`, depth first and
    /// in document order.
    pub fn matches<'a>(&self, root: &'a Value) -> Matches<'a, 's> {
        let context = GroupContext::unknown();
        Matches {
            signatures: self.signatures,
            propagator: ContextPropagator::new(self.signatures),
            stack: vec![Frame {
                node: root,
                context,
                depth: 0,
            }],
            ordinal: 0,
            visited: 0,
        }
    }
}

struct Frame<'a> {
    node: &'a Value,
    context: Arc<GroupContext>,
    depth: usize,
}

/// Depth-first traversal driven by an explicit stack, so hostile nesting
/// depth costs heap, not native stack.
pub struct Matches<'a, 's> {
    signatures: &'s SignatureSet,
    propagator: ContextPropagator<'s>,
    stack: Vec<Frame<'a>>,
    ordinal: usize,
    visited: usize,
}

impl<'a, 's> Matches<'a, 's> {
    fn push_children(&mut self, node: &'a Value, context: &Arc<GroupContext>, depth: usize) {
        // Reversed so that popping restores document order.
        match node {
            Value::Object(map) => {
                for child in map.values().rev() {
                    self.push(child, context, depth + 1);
                }
            }
            Value::Array(items) => {
                for child in items.iter().rev() {
                    self.push(child, context, depth + 1);
                }
            }
            _ => {}
        }
    }

    fn push(&mut self, node: &'a Value, context: &Arc<GroupContext>, depth: usize) {
        // Scalars can never match; skip the frame entirely.
        if node.is_object() || node.is_array() {
            self.stack.push(Frame {
                node,
                context: Arc::clone(context),
                depth,
            });
        }
    }

    /// Number of container nodes popped so far.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

impl<'a, 's> Iterator for Matches<'a, 's> {
    type Item = CandidateRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let signatures = self.signatures;
        while let Some(Frame {
            node,
            context,
            depth,
        }) = self.stack.pop()
        {
            self.visited += 1;
            let Value::Object(map) = node else {
                self.push_children(node, &context, depth);
                continue;
            };

            if let Some(signature) = signatures.record_match(map) {
                // Record wins over group; a record that also looks like a
                // group is still scanned for nested groups.
                if !signature.is_leaf() || signatures.group_match(map).is_some() {
                    self.push_children(node, &context, depth);
                }

                let ordinal = self.ordinal;
                self.ordinal += 1;
                debug!(
                    "Record '{}' #{} at depth {} (league={:?})",
                    signature.name(),
                    ordinal,
                    depth,
                    context.name()
                );
                return Some(CandidateRecord {
                    node,
                    context,
                    source: 0,
                    ordinal,
                    depth,
                });
            }

            match self.propagator.enter(map, &context) {
                Some(group) => self.push_children(node, &group, depth),
                None => {
                    trace!("Descending into mapping with {} keys at depth {}", map.len(), depth);
                    self.push_children(node, &context, depth)
                }
            }
        }
        None
    }
}
