use serde::Serialize;

use super::ToolStore;
use crate::ids::ItemId;
use crate::models::*;

pub type ExpectationsStore = ToolStore<Expectations>;

/// Per-kind tally shown under the expectation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectationSummary {
    pub kind: ExpectationKind,
    pub count: usize,
    pub high_priority: usize,
}

impl ToolStore<Expectations> {
    /// Append an expectation. Blank text is ignored.
    pub fn add_item(&self, text: &str, kind: ExpectationKind, priority: Priority) -> Option<ItemId> {
        let text = non_blank(text)?;
        let id = self.next_id();
        let item = ExpectationItem {
            id: id.clone(),
            text,
            kind,
            priority,
        };
        self.edit(|doc, draft| {
            doc.items.push(item);
            draft.text.clear();
            draft.priority = Priority::Medium;
        });
        Some(id)
    }

    /// Add whatever is in the input row, under the selected tab.
    pub fn submit_draft(&self) -> Option<ItemId> {
        let draft = self.draft();
        self.add_item(&draft.text, draft.kind, draft.priority)
    }

    pub fn remove_item(&self, id: &ItemId) -> bool {
        self.try_edit(|doc, _| remove_by_id(&mut doc.items, id))
    }

    /// Items of one kind, most urgent first; equal priorities keep insertion
    /// order.
    pub fn grouped(&self, kind: ExpectationKind) -> Vec<ExpectationItem> {
        let mut items = self.filtered(Some(kind));
        items.sort_by_key(|item| item.priority);
        items
    }

    /// Items in insertion order, optionally only one kind.
    pub fn filtered(&self, kind: Option<ExpectationKind>) -> Vec<ExpectationItem> {
        self.read(|doc| {
            doc.items
                .iter()
                .filter(|item| kind.map_or(true, |k| item.kind == k))
                .cloned()
                .collect()
        })
    }

    pub fn summary(&self) -> Vec<ExpectationSummary> {
        self.read(|doc| {
            ExpectationKind::ALL
                .iter()
                .map(|&kind| {
                    let of_kind = doc.items.iter().filter(|i| i.kind == kind);
                    ExpectationSummary {
                        kind,
                        count: of_kind.clone().count(),
                        high_priority: of_kind.filter(|i| i.priority == Priority::High).count(),
                    }
                })
                .collect()
        })
    }
}
