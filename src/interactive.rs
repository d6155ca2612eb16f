//! Line-based terminal prompt.
//!
//! Collects pasted resume text until a line reading `END`, then runs the
//! extractor and prints the record.

use crate::extractor::parse_resume;
use crate::llm::{ChatModel, LlmError};
use crate::record::ResumeRecord;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

/// Line that ends input, compared after trimming and ignoring case.
pub const SENTINEL: &str = "END";

/// Read lines until the sentinel (or end of input) and join them with `\n`.
///
/// Lines are kept as typed; only the sentinel check trims.
pub fn collect_resume_text<R: BufRead>(input: R) -> std::io::Result<String> {
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().to_uppercase() == SENTINEL {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Run one interactive session.
///
/// `connect` is only called once there is resume text to send. Returns
/// `None` when nothing was pasted.
pub async fn run_interactive<R, W, F, M>(
    input: R,
    out: &mut W,
    connect: F,
) -> Result<Option<ResumeRecord>>
where
    R: BufRead,
    W: Write,
    F: FnOnce() -> Result<M, LlmError>,
    M: ChatModel,
{
    writeln!(out, "=== Resume Parser Chatbot ===")?;
    writeln!(
        out,
        "Paste your resume text below. Type '{}' on a new line when finished.\n",
        SENTINEL
    )?;
    out.flush()?;

    let resume_text = collect_resume_text(input).context("Failed to read resume text")?;

    if resume_text.trim().is_empty() {
        writeln!(out, "No resume text provided!")?;
        return Ok(None);
    }

    writeln!(out, "\n🔄 Parsing resume...\n")?;
    out.flush()?;

    let model = connect().context("Failed to create model client")?;
    info!("Parsing {} lines of resume text", resume_text.lines().count());
    let record = parse_resume(&resume_text, &model)
        .await
        .context("Resume parsing request failed")?;

    let rule = "=".repeat(50);
    writeln!(out, "{}", rule)?;
    writeln!(out, "PARSED RESUME DATA")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", record.to_pretty_json())?;
    out.flush()?;

    Ok(Some(record))
}
