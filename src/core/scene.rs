//! Scene switching between the level and the level-completed screen.
use tracing::info;

use crate::core::level::{Level, LevelEvent};
use crate::core::process_events::FrameInput;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    Level,
    LevelCompleted,
}

pub struct Game {
    pub scene: Scene,
    pub level: Level,
    pub escapes: u32,
}

impl Game {
    pub fn new(level: Level) -> Self {
        Self { scene: Scene::Level, level, escapes: 0 }
    }

    /// Runs the active scene for one frame and returns what happened in the level.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Vec<LevelEvent> {
        match self.scene {
            Scene::Level => {
                let events = self.level.update(input, dt);
                if events.contains(&LevelEvent::Escaped) {
                    self.escapes += 1;
                    self.scene = Scene::LevelCompleted;
                }
                events
            }
            Scene::LevelCompleted => {
                if input.confirm {
                    info!("starting the level again");
                    self.level.reset();
                    self.scene = Scene::Level;
                }
                Vec::new()
            }
        }
    }
}
