//! CLI command implementations.

pub mod analyze;
pub mod apply;
pub mod diff;

use cleanform::{Cleanform, CleanformError, Session};

use crate::cli::LoadArgs;

/// Load the input file into a fresh session.
pub(crate) fn open_session(load: &LoadArgs) -> Result<Session, Box<dyn std::error::Error>> {
    if !load.file.exists() {
        return Err(format!("File not found: {}", load.file.display()).into());
    }

    let cleanform = Cleanform::with_config(load.config());
    let (session, _source) = cleanform.load(&load.file)?;
    Ok(session)
}

/// Enable each issue id in order. Unknown ids are reported with the valid ones.
pub(crate) fn enable_rules(
    session: &mut Session,
    ids: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    for id in ids {
        if session.enabled().iter().any(|r| &r.id == id) {
            continue;
        }
        match session.toggle(id.as_str()).map(|_| ()) {
            Ok(()) => {}
            Err(CleanformError::UnknownIssue(_)) => return Err(unknown_issue(session, id).into()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn unknown_issue(session: &Session, id: &str) -> String {
    let known: Vec<&str> = session.issues().iter().map(|i| i.id.as_str()).collect();
    format!(
        "Unknown issue id '{}'. Detected issues: {}",
        id,
        if known.is_empty() {
            "none".to_string()
        } else {
            known.join(", ")
        }
    )
}
