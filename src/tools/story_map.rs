use super::ToolStore;
use crate::ids::ItemId;
use crate::models::*;

pub type StoryMapStore = ToolStore<StoryMap>;

impl ToolStore<StoryMap> {
    pub fn set_title(&self, title: &str) {
        let title = title.to_string();
        self.try_edit(|doc, _| {
            if doc.title == title {
                return false;
            }
            doc.title = title;
            true
        });
    }

    /// Append a card to a lane. Its column is the number of cards already in
    /// that lane. Blank text is ignored.
    pub fn add_item(&self, text: &str, kind: StoryKind) -> Option<ItemId> {
        let text = non_blank(text)?;
        let id = self.next_id();
        let card_id = id.clone();
        self.edit(|doc, draft| {
            let column = doc.items.iter().filter(|i| i.kind == kind).count() as u32;
            doc.items.push(StoryItem {
                id: card_id,
                text,
                kind,
                column,
                row: kind.row(),
            });
            draft.text.clear();
        });
        Some(id)
    }

    /// Add the pending text to the selected lane.
    pub fn submit_draft(&self) -> Option<ItemId> {
        let draft = self.draft();
        self.add_item(&draft.text, draft.kind)
    }

    pub fn remove_item(&self, id: &ItemId) -> bool {
        self.try_edit(|doc, _| remove_by_id(&mut doc.items, id))
    }

    /// Cards of one lane, left to right.
    pub fn lane(&self, kind: StoryKind) -> Vec<StoryItem> {
        self.read(|doc| {
            let mut cards: Vec<StoryItem> = doc
                .items
                .iter()
                .filter(|i| i.kind == kind)
                .cloned()
                .collect();
            cards.sort_by_key(|card| card.column);
            cards
        })
    }

    /// All lanes, top to bottom.
    pub fn grid(&self) -> Vec<(StoryKind, Vec<StoryItem>)> {
        StoryKind::ALL
            .iter()
            .map(|&kind| (kind, self.lane(kind)))
            .collect()
    }
}
