use std::collections::HashMap;

/// One level of a regulation's hierarchical numbering.
///
/// Children are kept in first-insertion order; `index` maps a fragment to its position.
#[derive(Debug, Clone, Default)]
pub struct RegulationNode {
    fragment: String,
    content: String,
    children: Vec<RegulationNode>,
    index: HashMap<String, usize>,
}

impl RegulationNode {
    /// Creates a node for `fragment` holding `content`.
    pub fn new(fragment: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            content: content.into(),
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Empty sentinel used as the trie root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The identifier fragment this node is keyed by.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The text stored for this node.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Looks up a direct child by fragment.
    pub fn child(&self, fragment: &str) -> Option<&RegulationNode> {
        self.index.get(fragment).map(|&i| &self.children[i])
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &RegulationNode> {
        self.children.iter()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the child for `fragment`, creating it with `content` if absent.
    ///
    /// The second value is `true` when a node was created. An existing child keeps its
    /// original content.
    pub(crate) fn child_or_insert(
        &mut self,
        fragment: &str,
        content: &str,
    ) -> (&mut RegulationNode, bool) {
        if let Some(&i) = self.index.get(fragment) {
            return (&mut self.children[i], false);
        }

        let i = self.children.len();
        self.children.push(RegulationNode::new(fragment, content));
        self.index.insert(fragment.to_string(), i);
        (&mut self.children[i], true)
    }
}
