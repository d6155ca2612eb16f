//! Resume extraction: prompt construction, model call and reply decoding.

use crate::llm::{ChatModel, LlmError};
use crate::record::ResumeRecord;
use serde_json::Value;
use tracing::debug;

/// Fixed instruction sent as the system message on every call.
pub const SYSTEM_PROMPT: &str = r#"You are a resume parsing expert. Extract structured information from resumes.
Return your response as valid JSON with the following structure:
{
  "personal_info": {
    "name": "",
    "email": "",
    "phone": "",
    "location": "",
    "linkedin": "",
    "portfolio": ""
  },
  "summary": "",
  "work_experience": [
    {
      "company": "",
      "position": "",
      "start_date": "",
      "end_date": "",
      "description": "",
      "achievements": []
    }
  ],
  "education": [
    {
      "institution": "",
      "degree": "",
      "field": "",
      "graduation_date": "",
      "gpa": ""
    }
  ],
  "skills": {
    "technical": [],
    "soft": [],
    "languages": []
  },
  "certifications": [],
  "projects": [
    {
      "name": "",
      "description": "",
      "technologies": []
    }
  ]
}

Extract all available information. Use empty strings or empty arrays if information is not present."#;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Build the user message that carries the resume.
pub fn user_message(resume_text: &str) -> String {
    format!("Please parse this resume:\n\n{}", resume_text)
}

/// Send the resume to the model and decode its reply.
///
/// Only transport failures are errors; a reply that is not JSON comes back
/// as [`ResumeRecord::Error`].
pub async fn parse_resume<M>(resume_text: &str, model: &M) -> Result<ResumeRecord, LlmError>
where
    M: ChatModel + ?Sized,
{
    debug!("Sending resume ({} bytes) to model", resume_text.len());
    let reply = model.invoke(SYSTEM_PROMPT, &user_message(resume_text)).await?;
    debug!("Model replied with {} bytes", reply.len());

    let record = decode_reply(&reply);
    match record.typed() {
        Some(Ok(resume)) => debug!(
            "Extracted {} work entries, {} education entries, {} projects",
            resume.work_experience.len(),
            resume.education.len(),
            resume.projects.len()
        ),
        Some(Err(e)) => debug!("Reply does not follow the resume schema: {}", e),
        None => {}
    }
    Ok(record)
}

/// Decode a model reply into a record.
pub fn decode_reply(reply: &str) -> ResumeRecord {
    match serde_json::from_str::<Value>(extract_json_payload(reply)) {
        Ok(value) => ResumeRecord::Parsed(value),
        Err(e) => {
            debug!("Model reply is not valid JSON: {}", e);
            ResumeRecord::Error {
                error: format!("Failed to parse response: {}", e),
                raw_response: reply.to_string(),
            }
        }
    }
}

/// Locate the JSON payload in a reply that may be wrapped in markdown fences.
///
/// Only the first fence is considered. A "```json" fence wins over a bare
/// "```" one; with no fence at all the reply is returned untouched.
pub fn extract_json_payload(reply: &str) -> &str {
    if let Some(pos) = reply.find(JSON_FENCE) {
        fenced_slice(reply, pos + JSON_FENCE.len())
    } else if let Some(pos) = reply.find(FENCE) {
        fenced_slice(reply, pos + FENCE.len())
    } else {
        reply
    }
}

fn fenced_slice(reply: &str, start: usize) -> &str {
    let end = match reply[start..].find(FENCE) {
        Some(offset) => start + offset,
        // No closing fence: the end is index -1, just before the last character.
        None => reply.char_indices().next_back().map_or(0, |(i, _)| i),
    };
    if end <= start {
        ""
    } else {
        reply[start..end].trim()
    }
}
