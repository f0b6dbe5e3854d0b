use super::ToolStore;
use crate::models::*;

pub type EmpathyMapStore = ToolStore<EmpathyMap>;

impl ToolStore<EmpathyMap> {
    pub fn set_persona_name(&self, name: &str) {
        let name = name.to_string();
        self.try_edit(|doc, _| {
            if doc.persona_name == name {
                return false;
            }
            doc.persona_name = name;
            true
        });
    }

    /// Append an entry to a quadrant and clear its input. Blank text is
    /// ignored. Returns the entry's position.
    pub fn add_entry(&self, quadrant: Quadrant, text: &str) -> Option<usize> {
        let text = non_blank(text)?;
        Some(self.edit(|doc, draft| {
            let entries = doc.quadrant_mut(quadrant);
            entries.push(text);
            draft.input_mut(quadrant).clear();
            entries.len() - 1
        }))
    }

    pub fn submit_draft(&self, quadrant: Quadrant) -> Option<usize> {
        let text = self.draft().input(quadrant).to_string();
        self.add_entry(quadrant, &text)
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_entry(&self, quadrant: Quadrant, index: usize) -> bool {
        self.try_edit(|doc, _| {
            let entries = doc.quadrant_mut(quadrant);
            if index < entries.len() {
                entries.remove(index);
                true
            } else {
                false
            }
        })
    }

    pub fn entries(&self, quadrant: Quadrant) -> Vec<String> {
        self.read(|doc| doc.quadrant(quadrant).to_vec())
    }
}
