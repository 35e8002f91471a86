//! Launch parameters read from the participant's URL query string.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    pub subject_id: String,
    pub testing: bool,
    pub study_id: String,
    pub short: bool,
    /// Raw task code; validated when the configuration is applied.
    pub task: String,
}

impl LaunchParams {
    /// Parses `PROLIFIC_PID`, `TEST`, `STUDY`, `SHORT` and `TASK` from a
    /// query string (with or without the leading `?`). Values are taken
    /// verbatim, without percent-decoding. A missing subject id is replaced by
    /// a random number in `0..=2_000_000`.
    pub fn from_query<R: Rng>(query: &str, rng: &mut R) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(&str, Option<&str>)> = query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| match p.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (p, None),
            })
            .collect();

        let has = |name: &str| pairs.iter().any(|(k, _)| *k == name);
        let value = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .and_then(|(_, v)| *v)
                .unwrap_or("")
                .to_string()
        };

        let subject_id = if has("PROLIFIC_PID") {
            value("PROLIFIC_PID")
        } else {
            rng.random_range(0..=2_000_000u32).to_string()
        };
        let testing = if has("TEST") { value("TEST") } else { "FALSE".to_string() };
        let study_id = if has("STUDY") { value("STUDY") } else { "NONE".to_string() };
        let task = if has("TASK") { value("TASK") } else { "MB".to_string() };

        Self {
            subject_id,
            testing: testing != "FALSE",
            study_id,
            short: has("SHORT"),
            task,
        }
    }

    /// Study id as stored alongside the data.
    pub fn study_key(&self) -> String {
        self.study_id.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn reads_all_parameters() {
        let mut rng = Pcg32::seed_from_u64(1);
        let p = LaunchParams::from_query(
            "?PROLIFIC_PID=abc123&TEST=TRUE&STUDY=Pilot&SHORT&TASK=MBMF",
            &mut rng,
        );
        assert_eq!(p.subject_id, "abc123");
        assert!(p.testing);
        assert_eq!(p.study_id, "Pilot");
        assert_eq!(p.study_key(), "pilot");
        assert!(p.short);
        assert_eq!(p.task, "MBMF");
    }

    #[test]
    fn falls_back_to_defaults() {
        let mut rng = Pcg32::seed_from_u64(7);
        let p = LaunchParams::from_query("", &mut rng);
        assert!(!p.testing);
        assert_eq!(p.study_id, "NONE");
        assert!(!p.short);
        assert_eq!(p.task, "MB");
        let id: u32 = p.subject_id.parse().unwrap();
        assert!(id <= 2_000_000);
    }

    #[test]
    fn task_is_not_validated_here() {
        let mut rng = Pcg32::seed_from_u64(0);
        let p = LaunchParams::from_query("TASK=bogus", &mut rng);
        assert_eq!(p.task, "bogus");
    }
}
