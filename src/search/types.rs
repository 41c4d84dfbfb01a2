use serde::{Deserialize, Serialize};

/// The four location identifiers sent with a property search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// District name or id
    pub district: String,
    /// Mandal name or id
    pub mandal: String,
    /// Village name or id
    pub village: String,
    /// Survey number, already trimmed
    pub survey_no: String,
}

impl SearchQuery {
    pub fn new(
        district: impl Into<String>,
        mandal: impl Into<String>,
        village: impl Into<String>,
        survey_no: impl Into<String>,
    ) -> Self {
        Self {
            district: district.into(),
            mandal: mandal.into(),
            village: village.into(),
            survey_no: survey_no.into(),
        }
    }
}
