use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// The candidate's personal details plus the API credential, read from the
/// profile JSON once at startup. The file spells the phone field `number`.
#[derive(Clone, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    #[serde(rename = "number", alias = "phone")]
    pub phone: String,
    pub api_key: String,
}

impl fmt::Debug for CandidateProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateProfile")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl CandidateProfile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::ProfileMissing(path.to_path_buf())
            } else {
                ConfigError::ProfileRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            ProfileParseError::Json(source) => ConfigError::ProfileMalformed {
                path: path.to_path_buf(),
                source,
            },
            ProfileParseError::Empty(field) => ConfigError::EmptyField(field),
        })
    }

    fn from_json(raw: &str) -> Result<Self, ProfileParseError> {
        let profile: CandidateProfile =
            serde_json::from_str(raw).map_err(ProfileParseError::Json)?;
        if profile.api_key.trim().is_empty() {
            return Err(ProfileParseError::Empty("api_key"));
        }
        Ok(profile)
    }

    /// Header block for a letter dated `date`.
    pub fn header(&self, date: NaiveDate) -> LetterHeader {
        LetterHeader {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date: date.format("%B %d, %Y").to_string(),
        }
    }
}

#[derive(Debug)]
enum ProfileParseError {
    Json(serde_json::Error),
    Empty(&'static str),
}

/// The four lines printed at the top-left of every letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterHeader {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Already formatted, e.g. "October 18, 2026".
    pub date: String,
}
