use super::ToolStore;
use crate::ids::ItemId;
use crate::models::*;

pub type FeedbackStore = ToolStore<Feedback>;

impl ToolStore<Feedback> {
    pub fn add_item(&self, text: &str, kind: FeedbackKind) -> Option<ItemId> {
        let text = non_blank(text)?;
        let id = self.next_id();
        let item = FeedbackItem {
            id: id.clone(),
            text,
            kind,
        };
        self.edit(|doc, draft| {
            doc.items.push(item);
            draft.text.clear();
        });
        Some(id)
    }

    pub fn submit_draft(&self) -> Option<ItemId> {
        let draft = self.draft();
        self.add_item(&draft.text, draft.kind)
    }

    pub fn remove_item(&self, id: &ItemId) -> bool {
        self.try_edit(|doc, _| remove_by_id(&mut doc.items, id))
    }

    /// Items in insertion order, optionally only one kind.
    pub fn filtered(&self, kind: Option<FeedbackKind>) -> Vec<FeedbackItem> {
        self.read(|doc| {
            doc.items
                .iter()
                .filter(|item| kind.map_or(true, |k| item.kind == k))
                .cloned()
                .collect()
        })
    }

    /// `(kind, count)` for every kind, in tab order.
    pub fn counts(&self) -> Vec<(FeedbackKind, usize)> {
        self.read(|doc| {
            FeedbackKind::ALL
                .iter()
                .map(|&kind| (kind, doc.items.iter().filter(|i| i.kind == kind).count()))
                .collect()
        })
    }
}
