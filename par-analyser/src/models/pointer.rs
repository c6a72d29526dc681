//! Pointer triple model

use serde::{Deserialize, Serialize};

/// One Observation/Reflection/Recommendation unit from a PAR entry
///
/// Always fully populated: the parser never emits a partial triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTriple {
    pub observation: String,
    pub reflection: String,
    pub recommendation: String,
}

impl PointerTriple {
    pub fn new(
        observation: impl Into<String>,
        reflection: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            observation: observation.into(),
            reflection: reflection.into(),
            recommendation: recommendation.into(),
        }
    }
}
