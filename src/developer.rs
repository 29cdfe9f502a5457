use serde::{Deserialize, Serialize};

/// Static identification returned by `GET /api/developer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeveloperInfo {
    pub student_id: String,
    pub name: String,
}

impl Default for DeveloperInfo {
    fn default() -> Self {
        Self {
            student_id: "W23003084".to_string(),
            name: "Will Hick".to_string(),
        }
    }
}
