// Persona profiles
//
// Each persona is loaded from `<dir>/<name>_prompt.json`. The fixed prompt
// never changes during a run; the dynamic prompt is rewritten by the
// evolution engine.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::errors::ParleyError;

pub type PersonaId = String;

/// A persona and its two prompt fragments
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaProfile {
    pub id: PersonaId,
    fixed_prompt: String,
    pub dynamic_prompt: String,
}

/// On-disk shape of a persona file
#[derive(Debug, Deserialize)]
struct PersonaFile {
    fixed_prompt: String,
    #[serde(alias = "dynamic_prompt")]
    variable_prompt: String,
}

impl PersonaProfile {
    pub fn new(
        id: impl Into<PersonaId>,
        fixed_prompt: impl Into<String>,
        dynamic_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            fixed_prompt: fixed_prompt.into(),
            dynamic_prompt: dynamic_prompt.into(),
        }
    }

    pub fn fixed_prompt(&self) -> &str {
        &self.fixed_prompt
    }

    /// Load `<dir>/<id>_prompt.json`
    pub fn load(dir: &Path, id: &str) -> Result<Self, ParleyError> {
        let path = dir.join(format!("{}_prompt.json", id));
        let what = format!("Persona file for {}", id);

        let contents =
            fs::read_to_string(&path).map_err(|e| ParleyError::unreadable(&what, &path, e))?;
        let file: PersonaFile = serde_json::from_str(&contents)
            .map_err(|e| ParleyError::malformed(&what, &path, e))?;

        Ok(Self::new(id, file.fixed_prompt, file.variable_prompt))
    }
}

/// All personas in the order they were listed
#[derive(Debug, Clone, Default)]
pub struct PersonaStore {
    profiles: Vec<PersonaProfile>,
}

impl PersonaStore {
    pub fn new(profiles: Vec<PersonaProfile>) -> Self {
        Self { profiles }
    }

    /// Load one persona file per name in `names`
    pub fn load(dir: &Path, names: &[PersonaId]) -> Result<Self, ParleyError> {
        let profiles = names
            .iter()
            .map(|name| PersonaProfile::load(dir, name))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!("Loaded {} personas", profiles.len());
        Ok(Self::new(profiles))
    }

    pub fn ids(&self) -> Vec<PersonaId> {
        self.profiles.iter().map(|p| p.id.clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Result<&PersonaProfile, ParleyError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ParleyError::UnknownPersona(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut PersonaProfile, ParleyError> {
        self.profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ParleyError::UnknownPersona(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_reads_variable_prompt() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("alice_prompt.json"),
            r#"{"fixed_prompt": "You are Alice.", "variable_prompt": "Be curious."}"#,
        )
        .unwrap();

        let persona = PersonaProfile::load(dir.path(), "alice").unwrap();
        assert_eq!(persona.id, "alice");
        assert_eq!(persona.fixed_prompt(), "You are Alice.");
        assert_eq!(persona.dynamic_prompt, "Be curious.");
    }

    #[test]
    fn test_load_accepts_dynamic_prompt_key() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("bob_prompt.json"),
            r#"{"fixed_prompt": "You are Bob.", "dynamic_prompt": "Be terse."}"#,
        )
        .unwrap();

        let persona = PersonaProfile::load(dir.path(), "bob").unwrap();
        assert_eq!(persona.dynamic_prompt, "Be terse.");
    }

    #[test]
    fn test_missing_persona_file() {
        let dir = tempdir().unwrap();
        let err = PersonaProfile::load(dir.path(), "ghost").unwrap_err();
        assert!(matches!(err, ParleyError::MissingResource { .. }));
        assert!(err.to_string().contains("ghost_prompt.json"));
    }

    #[test]
    fn test_malformed_persona_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("carol_prompt.json"), r#"{"fixed_prompt": 3}"#).unwrap();
        let err = PersonaProfile::load(dir.path(), "carol").unwrap_err();
        assert!(matches!(err, ParleyError::MalformedResource { .. }));
    }

    #[test]
    fn test_store_lookup() {
        let mut store = PersonaStore::new(vec![
            PersonaProfile::new("alice", "A", "a"),
            PersonaProfile::new("bob", "B", "b"),
        ]);
        assert_eq!(store.ids(), vec!["alice".to_string(), "bob".to_string()]);
        assert!(store.contains("bob"));
        assert!(matches!(store.get("zed"), Err(ParleyError::UnknownPersona(_))));

        store.get_mut("bob").unwrap().dynamic_prompt = "new".to_string();
        assert_eq!(store.get("bob").unwrap().dynamic_prompt, "new");
        assert_eq!(store.get("bob").unwrap().fixed_prompt(), "B");
    }
}
