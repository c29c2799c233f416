//! Stub engine backend.
//!
//! A deterministic stand-in for the native SDK binding: it validates its inputs the
//! way the real engine does and answers every accepted search with an empty result
//! envelope. Used by the test suite and by deployments where the native runtime is
//! not installed.

use serde_json::Value;

use super::types::{EngineError, SearchEngine};

#[derive(Debug)]
pub struct StubEngine {
    config: Value,
}

impl StubEngine {
    /// Validates the engine configuration and constructs the backend.
    pub fn new(config_json: &str) -> Result<Self, EngineError> {
        let config: Value = serde_json::from_str(config_json).map_err(|err| {
            EngineError::Configuration(format!("engine configuration is not valid JSON: {err}"))
        })?;
        Ok(Self { config })
    }
}

impl SearchEngine for StubEngine {
    fn search_by_attributes(
        &self,
        attributes: &str,
        _profile: &str,
        _flags: i64,
    ) -> Result<String, EngineError> {
        let parsed: Value = serde_json::from_str(attributes).map_err(|err| {
            EngineError::BadInput(format!("search attributes are not valid JSON: {err}"))
        })?;
        if !parsed.is_object() {
            return Err(EngineError::BadInput(
                "search attributes must be a JSON object".to_string(),
            ));
        }
        Ok(r#"{"RESOLVED_ENTITIES":[]}"#.to_string())
    }

    fn prime(&self) -> Result<(), EngineError> {
        let sections = self.config.as_object().map(|obj| obj.len()).unwrap_or(0);
        tracing::debug!("stub engine primed ({sections} configuration sections)");
        Ok(())
    }
}
