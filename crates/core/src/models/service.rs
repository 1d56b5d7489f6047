use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    /// Length of one booking, which is also the generated slot length.
    pub duration_minutes: i32,
    pub is_active: bool,
}
