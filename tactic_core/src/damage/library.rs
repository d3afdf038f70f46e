//! Versioned damage database loading
//!
//! One JSON document per supported game version, embedded at compile time.
//! Loading selects the exact `major.minor` match when available and falls
//! back to the highest shipped version otherwise. A database that fails to
//! parse is the single operator-visible failure of the engine: it is logged
//! and the library stays empty, so every spell-damage query resolves to 0.

use super::profile::ChampionProfile;
use crate::config;
use log::error;
use std::collections::HashMap;

/// Embedded damage documents, keyed by `major.minor` game version.
const DAMAGE_FILES: &[(&str, &str)] = &[("9.7", include_str!("../../data/damage/9_7.json"))];

/// Loaded champion damage profiles for one game version.
#[derive(Debug, Default)]
pub struct DamageLibrary {
    profiles: HashMap<String, ChampionProfile>,
    version: Option<String>,
}

impl DamageLibrary {
    /// Empty library; every lookup misses.
    pub fn empty() -> Self {
        DamageLibrary::default()
    }

    /// Load the database for `game_version` ("major.minor"), keeping only the
    /// archetypes named in `roster`.
    pub fn load(game_version: &str, roster: &[String]) -> Self {
        let document = DAMAGE_FILES
            .iter()
            .find(|(version, _)| *version == game_version)
            .or_else(|| DAMAGE_FILES.iter().max_by(|a, b| a.0.cmp(b.0)));

        let (version, content) = match document {
            Some(&(version, content)) => (version, content),
            None => {
                error!("no suitable damage library is available");
                return DamageLibrary::empty();
            }
        };

        match config::parse_json::<HashMap<String, ChampionProfile>>(content) {
            Ok(mut all) => {
                let profiles = roster
                    .iter()
                    .filter_map(|name| all.remove(name).map(|p| (name.clone(), p)))
                    .collect();
                DamageLibrary {
                    profiles,
                    version: Some(version.to_string()),
                }
            }
            Err(err) => {
                error!("damage library {} failed to parse: {}", version, err);
                DamageLibrary::empty()
            }
        }
    }

    pub fn profile(&self, archetype: &str) -> Option<&ChampionProfile> {
        self.profiles.get(archetype)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_exact_version_load() {
        let library = DamageLibrary::load("9.7", &roster(&["Annie", "Ashe"]));
        assert_eq!(library.version(), Some("9.7"));
        assert!(library.profile("Annie").is_some());
        assert!(library.profile("Ashe").is_some());
    }

    #[test]
    fn test_unknown_version_falls_back_to_highest() {
        let library = DamageLibrary::load("12.1", &roster(&["Annie"]));
        assert_eq!(library.version(), Some("9.7"));
        assert!(library.profile("Annie").is_some());
    }

    #[test]
    fn test_roster_filters_profiles() {
        let library = DamageLibrary::load("9.7", &roster(&["Annie"]));
        assert!(library.profile("Ashe").is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_unknown_archetype_misses() {
        let library = DamageLibrary::load("9.7", &roster(&["NotAChampion"]));
        assert!(library.profile("NotAChampion").is_none());
        assert!(library.is_empty());
    }
}
