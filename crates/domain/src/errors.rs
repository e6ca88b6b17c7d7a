use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Failed to read input file {path}: {reason}")]
    InputFile { path: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("No usable resolvers supplied")]
    TransportNoUsableResolvers,

    #[error("All resolvers are unreachable")]
    TransportAllServersUnreachable,
}

impl DomainError {
    /// True for failures caused by reaching (or not reaching) a server rather
    /// than by the content of its answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::Transport { .. }
                | DomainError::TransportAllServersUnreachable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_family_is_transport() {
        let server = "192.0.2.1:53".to_string();
        assert!(DomainError::TransportTimeout { server: server.clone() }.is_transport());
        assert!(DomainError::TransportConnectionRefused { server: server.clone() }.is_transport());
        assert!(DomainError::Transport { server, reason: "reset".into() }.is_transport());
        assert!(DomainError::TransportAllServersUnreachable.is_transport());
    }

    #[test]
    fn test_content_errors_are_not_transport() {
        assert!(!DomainError::InvalidDnsResponse("short".into()).is_transport());
        assert!(!DomainError::InvalidIpAddress("x".into()).is_transport());
        assert!(!DomainError::IoError("eof".into()).is_transport());
        assert!(!DomainError::TransportNoUsableResolvers.is_transport());
    }
}
