use super::ToolStore;
use crate::ids::ItemId;
use crate::models::*;

pub type ProblemTreeStore = ToolStore<ProblemTree>;

impl ToolStore<ProblemTree> {
    /// Replace the trunk text. An empty trunk is stored as `""`.
    pub fn set_core_problem(&self, text: &str) {
        let text = text.to_string();
        self.try_edit(|doc, _| {
            if doc.core_problem == text {
                return false;
            }
            doc.core_problem = text;
            true
        });
    }

    pub fn add_cause(&self, text: &str) -> Option<ItemId> {
        self.add_node(text, TreeNodeKind::Cause)
    }

    pub fn add_effect(&self, text: &str) -> Option<ItemId> {
        self.add_node(text, TreeNodeKind::Effect)
    }

    /// Append a node and clear that side's input box. Blank text is ignored.
    pub fn add_node(&self, text: &str, kind: TreeNodeKind) -> Option<ItemId> {
        let text = non_blank(text)?;
        let id = self.next_id();
        let node = TreeNode {
            id: id.clone(),
            text,
            kind,
        };
        self.edit(|doc, draft| {
            doc.items.push(node);
            match kind {
                TreeNodeKind::Cause => draft.cause.clear(),
                TreeNodeKind::Effect => draft.effect.clear(),
            }
        });
        Some(id)
    }

    /// Add the pending input of one side.
    pub fn submit_draft(&self, kind: TreeNodeKind) -> Option<ItemId> {
        let draft = self.draft();
        let text = match kind {
            TreeNodeKind::Cause => draft.cause,
            TreeNodeKind::Effect => draft.effect,
        };
        self.add_node(&text, kind)
    }

    pub fn remove_item(&self, id: &ItemId) -> bool {
        self.try_edit(|doc, _| remove_by_id(&mut doc.items, id))
    }

    pub fn causes(&self) -> Vec<TreeNode> {
        self.nodes(TreeNodeKind::Cause)
    }

    pub fn effects(&self) -> Vec<TreeNode> {
        self.nodes(TreeNodeKind::Effect)
    }

    fn nodes(&self, kind: TreeNodeKind) -> Vec<TreeNode> {
        self.read(|doc| {
            doc.items
                .iter()
                .filter(|node| node.kind == kind)
                .cloned()
                .collect()
        })
    }
}
