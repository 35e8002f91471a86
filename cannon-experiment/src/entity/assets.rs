use crate::error::ExperimentError;
use std::collections::HashSet;

/// Keys of the assets the host has finished preloading.
///
/// Controllers check for their assets at construction and refuse to exist
/// without them.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    keys: HashSet<String>,
}

impl AssetManifest {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every asset the game scene preloads.
    pub fn standard() -> Self {
        let mut m = Self::empty();
        for colour in ["pink", "purple", "grey"] {
            m.insert(format!("ball_{colour}"));
            m.insert(format!("ball_{colour}_explode"));
        }
        for colour in ["pink", "purple"] {
            for i in 1..=5 {
                m.insert(format!("asteroid_{colour}_{i}"));
            }
        }
        for key in ["alien", "cannon", "cannon_stuff", "planet", "background", "star"] {
            m.insert(key);
        }
        m
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn require(&self, owner: &'static str, key: &str) -> Result<(), ExperimentError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(ExperimentError::MissingAsset {
                owner,
                key: key.to_string(),
            })
        }
    }
}
