use serde::{Deserialize, Serialize};

/// A city as listed in the static catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CityRecord {
    pub id: u64,
    pub name: String,
    pub country: String,
}
