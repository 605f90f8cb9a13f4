// ==========================================
// EA Portal Data Core - domain/product/version tree builder
// ==========================================
// Flat technology rows -> hierarchical tree: root -> one node per
// "/"-separated domain segment -> product -> version.
// ==========================================

use crate::domain::technology::DomainTreeNode;
use crate::domain::types::{NodeKind, RawRow};
use crate::normalize::text_of;
use std::collections::HashSet;

use super::aggregate::{DOMAIN_KEYS, PRODUCT_KEYS, VERSION_KEYS};

// Mutable build structure; serialized into DomainTreeNode at the end
// so the output carries no live references.
struct NodeBuilder {
    name: String,
    kind: NodeKind,
    children: Vec<NodeBuilder>,
    versions: HashSet<String>,
}

impl NodeBuilder {
    fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            children: Vec::new(),
            versions: HashSet::new(),
        }
    }

    /// Find-or-create a child, keeping sibling uniqueness by name and
    /// level, and insertion order for new siblings.
    fn ensure_child(&mut self, name: &str, kind: NodeKind) -> &mut NodeBuilder {
        let pos = match self
            .children
            .iter()
            .position(|c| c.name == name && c.kind == kind)
        {
            Some(pos) => pos,
            None => {
                self.children.push(NodeBuilder::new(name, kind));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    fn into_node(self) -> DomainTreeNode {
        let version_count = if self.kind == NodeKind::Product {
            Some(self.versions.len())
        } else {
            None
        };
        DomainTreeNode {
            name: self.name,
            kind: self.kind,
            children: self.children.into_iter().map(Self::into_node).collect(),
            version_count,
        }
    }
}

/// Build the navigation tree. Tree depth for a row with N domain
/// segments is N + 2 (product and version levels).
pub fn build_domain_tree(rows: &[RawRow]) -> DomainTreeNode {
    let mut root = NodeBuilder::new("root", NodeKind::Root);

    for row in rows {
        let domain = text_of(row, DOMAIN_KEYS).unwrap_or_default();
        let product = text_of(row, PRODUCT_KEYS).unwrap_or_default();
        let version = text_of(row, VERSION_KEYS).unwrap_or_default();

        let mut cursor = &mut root;
        for segment in domain.split('/').map(str::trim).filter(|s| !s.is_empty()) {
            cursor = cursor.ensure_child(segment, NodeKind::Domain);
        }

        if product.is_empty() {
            continue;
        }
        let product_node = cursor.ensure_child(&product, NodeKind::Product);
        if !version.is_empty() {
            product_node.versions.insert(version.clone());
            product_node.ensure_child(&version, NodeKind::Version);
        }
    }

    root.into_node()
}
