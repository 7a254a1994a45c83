use log::trace;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::signature::SignatureSet;

/// Competition-level metadata declared by a container node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupFields {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub round: Option<String>,
}

impl GroupFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.logo.is_none() && self.round.is_none()
    }

    /// Fields set on `self` win; gaps are filled from `fallback`.
    pub fn overlay(&self, fallback: &GroupFields) -> GroupFields {
        GroupFields {
            name: self.name.clone().or_else(|| fallback.name.clone()),
            logo: self.logo.clone().or_else(|| fallback.logo.clone()),
            round: self.round.clone().or_else(|| fallback.round.clone()),
        }
    }
}

/// Context scoping every record found below one container node.
///
/// Contexts are shared read-only between the records they scope and hold a
/// link to the enclosing context, so the full ancestor chain of a record is
/// available without the traversal keeping a separate stack around.
#[derive(Debug)]
pub struct GroupContext {
    fields: GroupFields,
    declared: GroupFields,
    depth: usize,
    parent: Option<Arc<GroupContext>>,
}

impl GroupContext {
    /// Root context for records that have no enclosing group.
    pub fn unknown() -> Arc<Self> {
        Arc::new(Self {
            fields: GroupFields::default(),
            declared: GroupFields::default(),
            depth: 0,
            parent: None,
        })
    }

    /// A nested group keeps whatever it declares and inherits the rest.
    pub fn nest(parent: &Arc<GroupContext>, declared: GroupFields) -> Arc<Self> {
        Arc::new(Self {
            fields: declared.overlay(&parent.fields),
            declared,
            depth: parent.depth + 1,
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn is_unknown(&self) -> bool {
        self.parent.is_none()
    }

    /// Effective metadata after inheritance.
    pub fn fields(&self) -> &GroupFields {
        &self.fields
    }

    /// Only what the container node itself declared.
    pub fn declared(&self) -> &GroupFields {
        &self.declared
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    /// Enclosing contexts, innermost first, excluding `self`.
    pub fn ancestors(&self) -> impl Iterator<Item = &GroupContext> {
        std::iter::successors(self.parent.as_deref(), |ctx| ctx.parent.as_deref())
    }
}

/// Decides which context scopes the children of a mapping node.
pub struct ContextPropagator<'s> {
    signatures: &'s SignatureSet,
}

impl<'s> ContextPropagator<'s> {
    pub fn new(signatures: &'s SignatureSet) -> Self {
        Self { signatures }
    }

    /// Returns a new nested context when `map` is a group container, or
    /// `None` when the current context keeps applying.
    pub fn enter(
        &self,
        map: &Map<String, Value>,
        current: &Arc<GroupContext>,
    ) -> Option<Arc<GroupContext>> {
        let signature = self.signatures.group_match(map)?;
        let declared = signature.capture(map);
        trace!(
            "Group '{}' matched at depth {} (name={:?})",
            signature.name(),
            current.depth() + 1,
            declared.name
        );
        Some(GroupContext::nest(current, declared))
    }
}
