//! CLI command implementations
//!
//! This module contains all CLI command implementations, one per pipeline
//! stage plus configuration tooling.

pub mod anonymize;
pub mod date_map;
pub mod init;
pub mod site_map;
pub mod status;
pub mod subject_map;
pub mod validate;

use crate::domain::VeilError;

/// Maps a stage error to the process exit code.
///
/// Configuration problems (bad config file, missing declared source or
/// column) exit with 2; everything else is a fatal runtime error (5).
pub(crate) fn exit_code_for(error: &VeilError) -> i32 {
    match error {
        VeilError::Configuration(_) | VeilError::Source(_) => 2,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{MappingError, SourceError};
    use std::path::PathBuf;

    #[test]
    fn test_configuration_errors_exit_2() {
        let err = VeilError::Configuration("bad".to_string());
        assert_eq!(exit_code_for(&err), 2);

        let err = VeilError::Source(SourceError::NotFound(PathBuf::from("x.csv")));
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn test_runtime_errors_exit_5() {
        let err = VeilError::Mapping(MappingError::SiteNotFound {
            site: "ZZ".to_string(),
            subject: "ZZ00001".to_string(),
        });
        assert_eq!(exit_code_for(&err), 5);

        let err = VeilError::Io("disk full".to_string());
        assert_eq!(exit_code_for(&err), 5);
    }
}
