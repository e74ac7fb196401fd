use serde::{Deserialize, Serialize};

use crate::styles::{AppStyles, DesignStyles};
use crate::trace::{AppTraceRef, DesignTraceRef, Platform};

/// Coarse semantic type shared by design and app nodes.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Container,
    Text,
    Image,
    Button,
    Input,
    Icon,
    #[default]
    Unknown,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Container => "container",
            ComponentType::Text => "text",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
            ComponentType::Input => "input",
            ComponentType::Icon => "icon",
            ComponentType::Unknown => "unknown",
        }
    }
}

/// A node with ordered children. Children keep the order of the source tree.
pub trait TreeNode: Sized {
    fn child_nodes(&self) -> &[Self];
}

/// Pre-order walk (parent before children) over a forest.
pub struct Preorder<'a, T> {
    stack: Vec<&'a T>,
}

impl<'a, T: TreeNode> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().iter().rev());
        Some(node)
    }
}

/// Walks `roots` and all their descendants in pre-order. Iterative, so deep
/// trees do not grow the call stack.
pub fn preorder<T: TreeNode>(roots: &[T]) -> Preorder<'_, T> {
    Preorder { stack: roots.iter().rev().collect() }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignComponent {
    pub trace_ref: DesignTraceRef,
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    #[serde(default)]
    pub styles: DesignStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<DesignComponent>,
}

impl DesignComponent {
    pub fn new(trace_ref: DesignTraceRef, component_type: ComponentType) -> Self {
        Self {
            trace_ref,
            component_type,
            styles: DesignStyles::default(),
            text: None,
            children: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl TreeNode for DesignComponent {
    fn child_nodes(&self) -> &[Self] {
        &self.children
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppElement {
    pub trace_ref: AppTraceRef,
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    #[serde(default)]
    pub styles: AppStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<AppElement>,
}

impl AppElement {
    pub fn new(trace_ref: AppTraceRef, component_type: ComponentType) -> Self {
        Self {
            trace_ref,
            component_type,
            styles: AppStyles::default(),
            text: None,
            children: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl TreeNode for AppElement {
    fn child_nodes(&self) -> &[Self] {
        &self.children
    }
}

/// A design frame: the root of one screen's component tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignScreen {
    pub trace_ref: DesignTraceRef,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub components: Vec<DesignComponent>,
}

/// A runtime snapshot of one screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppScreen {
    pub trace_ref: AppTraceRef,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub elements: Vec<AppElement>,
}

/// All screens ingested from one design file.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
    pub screens: Vec<DesignScreen>,
}

/// All screens captured during one app inspection session.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppCapture {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub session_id: String,
    pub screens: Vec<AppScreen>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<DesignComponent>) -> DesignComponent {
        let mut n = DesignComponent::new(DesignTraceRef::new("file", id), ComponentType::Container);
        n.children = children;
        n
    }

    #[test]
    fn preorder_emits_parents_before_children_in_source_order() {
        let forest = vec![
            node("a", vec![node("a1", vec![node("a1x", vec![])]), node("a2", vec![])]),
            node("b", vec![]),
        ];
        let ids: Vec<&str> = preorder(&forest).map(|n| n.trace_ref.node_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "a1x", "a2", "b"]);
    }

    #[test]
    fn preorder_handles_very_deep_trees() {
        let mut n = node("leaf", vec![]);
        for i in 0..2_000 {
            n = node(&format!("n{i}"), vec![n]);
        }
        assert_eq!(preorder(std::slice::from_ref(&n)).count(), 2_001);
    }

    #[test]
    fn empty_forest_yields_nothing() {
        let forest: Vec<AppElement> = vec![];
        assert_eq!(preorder(&forest).count(), 0);
    }
}
