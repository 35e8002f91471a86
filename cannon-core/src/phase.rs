/// Top-level scenes a participant moves through.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum Scene {
    #[default]
    Intro,
    Training,
    Ready,
    Game,
    End,
}

impl Scene {
    pub fn next(&self) -> Option<Self> {
        use Scene::*;
        Some(match self {
            Intro => Training,
            Training => Ready,
            Ready => Game,
            Game => End,
            End => return None,
        })
    }

    /// Scenes in which the cannon accepts fire input.
    pub fn allows_fire(&self) -> bool {
        matches!(self, Scene::Training | Scene::Game)
    }

    /// Whether trial data produced in this scene is saved.
    pub fn records_data(&self) -> bool {
        matches!(self, Scene::Game)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Scene::End)
    }
}
