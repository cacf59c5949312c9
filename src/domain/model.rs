//! Trained-model metadata and artifact naming.

use chrono::{DateTime, Utc};

/// Metadata recorded once per successful training attempt.
///
/// A record exists only when the artifact stream finished writing AND the
/// engine's training response carried a server-assigned filename; the row
/// is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRecord {
    /// Timestamp-derived artifact file name, e.g. `1714670000000.tar.gz`.
    pub model_name: String,
    pub comment: Option<String>,
    pub bot_id: Option<String>,
    /// Where the artifact was written locally.
    pub local_path: String,
    /// Filename the engine assigned to the model on its side.
    pub server_path: String,
    pub server_response: String,
}

/// Artifact file name for a training attempt started at `now`.
///
/// Millisecond timestamps are not collision-free under rapid concurrent
/// training of the same bot; the naming is kept for compatibility with
/// existing artifact trees.
pub fn artifact_file_name(now: DateTime<Utc>) -> String {
    format!("{}.tar.gz", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn artifact_name_uses_unix_millis() {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        assert_eq!(artifact_file_name(at), format!("{}.tar.gz", at.timestamp_millis()));
    }

    #[test]
    fn artifact_names_differ_across_instants() {
        let a = Utc.timestamp_millis_opt(1_714_670_000_000).unwrap();
        let b = Utc.timestamp_millis_opt(1_714_670_000_001).unwrap();
        assert_ne!(artifact_file_name(a), artifact_file_name(b));
    }
}
