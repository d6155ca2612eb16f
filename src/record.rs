//! Resume records produced by the extractor.
//!
//! A successful extraction keeps the model's JSON exactly as decoded; nothing
//! checks it against the schema. The typed structs below are a lenient view
//! over that JSON for callers who want field access.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResumeRecord {
    /// Decode failure, with the model's reply kept verbatim.
    Error { error: String, raw_response: String },
    /// Whatever JSON the model returned.
    Parsed(Value),
}

impl ResumeRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, ResumeRecord::Error { .. })
    }

    /// Typed view of a parsed record. Missing fields fall back to empty
    /// values; `None` for the error variant.
    pub fn typed(&self) -> Option<Result<ParsedResume, serde_json::Error>> {
        match self {
            ResumeRecord::Parsed(value) => Some(ParsedResume::deserialize(value)),
            ResumeRecord::Error { .. } => None,
        }
    }

    /// Render as JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> String {
        // Values built from decoded JSON or plain strings always serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Skills,
    pub certifications: Vec<String>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub graduation_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}
