use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("wallet is not reachable: {0}")]
    WalletUnavailable(String),

    #[error("user is not signed in")]
    NotSignedIn,

    #[error("wallet returned malformed user data: {0}")]
    MalformedUserData(String),
}
