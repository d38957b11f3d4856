/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the command
/// layer can turn any failure into plain reply text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("submission is missing the !text or !source section")]
    MalformedSubmission,

    #[error("a quote with the same text already exists")]
    DuplicateQuote,

    #[error("no submission to retract")]
    NothingToRetract,

    #[error("remote quote unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// Reply text shown to the user for this failure; `command` is the
    /// configured slash command the format help points at.
    pub fn user_message(&self, command: &str) -> String {
        match self {
            Error::MalformedSubmission => format!(
                "Submission format:\n{}",
                crate::formatting::submission_format(command)
            ),
            Error::DuplicateQuote => "Submission failed: the same quote already exists~".to_string(),
            Error::NothingToRetract => {
                "Retract failed: there is no submission of yours to retract".to_string()
            }
            _ => "Something went wrong, please try again later".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_carries_format_help() {
        let msg = Error::MalformedSubmission.user_message("luck");
        assert!(msg.contains("/luck submit"));
        assert!(msg.contains("!text"));
        assert!(msg.contains("!source"));
    }

    #[test]
    fn internal_errors_stay_generic() {
        let msg = Error::Storage("disk I/O error at /var/lib/x".to_string()).user_message("jrrp");
        assert!(!msg.contains("/var/lib"));
    }
}
