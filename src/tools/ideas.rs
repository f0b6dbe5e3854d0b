use super::ToolStore;
use crate::ids::ItemId;
use crate::models::*;

pub type IdeasBoardStore = ToolStore<IdeasBoard>;

impl ToolStore<IdeasBoard> {
    /// Pin a new idea with no votes. Blank text is ignored.
    pub fn add_idea(&self, text: &str, category: IdeaCategory, color: &str) -> Option<ItemId> {
        let text = non_blank(text)?;
        let id = self.next_id();
        let idea = Idea {
            id: id.clone(),
            text,
            category,
            color: color.to_string(),
            votes: 0,
        };
        self.edit(|doc, draft| {
            doc.ideas.push(idea);
            draft.text.clear();
        });
        Some(id)
    }

    /// Add the pending idea with the selected category and color.
    pub fn submit_draft(&self) -> Option<ItemId> {
        let draft = self.draft();
        self.add_idea(&draft.text, draft.category, &draft.color)
    }

    pub fn remove_idea(&self, id: &ItemId) -> bool {
        self.try_edit(|doc, _| remove_by_id(&mut doc.ideas, id))
    }

    /// One more vote. Unknown ids are ignored. Returns the new count.
    pub fn vote(&self, id: &ItemId) -> Option<u32> {
        let mut votes = None;
        self.try_edit(|doc, _| match doc.ideas.iter_mut().find(|i| &i.id == id) {
            Some(idea) => {
                idea.votes = idea.votes.saturating_add(1);
                votes = Some(idea.votes);
                true
            }
            None => false,
        });
        votes
    }

    /// Ideas matching `filter`, most votes first. Equal votes keep insertion
    /// order.
    pub fn ranked(&self, filter: IdeaFilter) -> Vec<Idea> {
        self.read(|doc| {
            let mut ideas: Vec<Idea> = doc
                .ideas
                .iter()
                .filter(|idea| filter.matches(idea))
                .cloned()
                .collect();
            ideas.sort_by(|a, b| b.votes.cmp(&a.votes));
            ideas
        })
    }
}
