// Error taxonomy for the credential loader. Only conditions a caller may
// want to match on get their own variant; everything else travels as a
// plain `anyhow` error with context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LpError {
    /// A stored credential was rejected by the remote service. The fix is
    /// manual: delete the file and authenticate again.
    #[error("invalid credentials: please remove {auth_file} and rerun to authenticate")]
    InvalidCredentials { auth_file: PathBuf },

    /// The interactive handshake was rejected by the remote service.
    #[error("authorization against {endpoint} failed: {body}")]
    AuthorizationFailed { endpoint: String, body: String },

    /// No home directory could be determined, so there is nowhere to read
    /// or write credential files.
    #[error("cannot determine the home directory")]
    MissingHomeDirectory,
}
