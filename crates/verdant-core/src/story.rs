//! Narrative progression.
//!
//! Stories unlock when their trigger task completes. Trigger id 0 is
//! reserved for the intro story, which unlocks when a fresh game starts.
//! Each story unlocks at most once, including across save/restore.

use tracing::{debug, warn};

use verdant_types::{StoryDef, StoryId, TaskId};

/// The reserved trigger id for the story shown at the start of a new game.
pub const INTRO_TRIGGER: TaskId = TaskId::new(0);

/// Tracks which stories have been unlocked.
#[derive(Debug, Clone)]
pub struct StoryLog {
    stories: Vec<StoryDef>,
    completed: Vec<StoryId>,
}

impl StoryLog {
    /// Build a log over the given story table with nothing unlocked.
    pub const fn new(stories: Vec<StoryDef>) -> Self {
        Self {
            stories,
            completed: Vec::new(),
        }
    }

    /// Look up a story definition by id.
    pub fn get(&self, id: StoryId) -> Option<&StoryDef> {
        self.stories.iter().find(|story| story.id == id)
    }

    /// Ids of unlocked stories, in unlock order.
    pub fn history(&self) -> &[StoryId] {
        &self.completed
    }

    /// Whether the story with the given id has been unlocked.
    pub fn is_unlocked(&self, id: StoryId) -> bool {
        self.completed.contains(&id)
    }

    /// Unlock the story triggered by `task`, if there is one and it has not
    /// been seen before. Returns the newly unlocked story id.
    pub fn trigger(&mut self, task: TaskId) -> Option<StoryId> {
        let story = self
            .stories
            .iter()
            .find(|story| story.trigger_task == task)?;
        if self.completed.contains(&story.id) {
            return None;
        }
        debug!(story = %story.id, title = %story.title, "Story unlocked");
        self.completed.push(story.id);
        Some(story.id)
    }

    /// Restore the set of unlocked stories from a save. Ids that no longer
    /// exist in the story table are dropped with a warning.
    pub fn apply_snapshot(&mut self, completed: &[StoryId]) {
        self.completed.clear();
        for id in completed {
            if self.get(*id).is_none() {
                warn!(story = %id, "Dropping unknown story id from save");
                continue;
            }
            if !self.completed.contains(id) {
                self.completed.push(*id);
            }
        }
    }
}
