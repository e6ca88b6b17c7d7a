use std::fmt;

/// Classification of a failed reverse lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No reverse mapping exists for the address.
    HostNotFound,
    /// The name service could not answer (unreachable resolver, bad request, SERVFAIL).
    ResolutionFailed,
    /// Anything the backend could not classify.
    Unknown,
    /// The run was cancelled before this address produced an answer.
    Cancelled,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::HostNotFound => "host_not_found",
            FailureKind::ResolutionFailed => "resolution_failed",
            FailureKind::Unknown => "unknown",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl LookupFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn host_not_found(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::HostNotFound, detail)
    }

    pub fn resolution_failed(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::ResolutionFailed, detail)
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Unknown, detail)
    }

    pub fn cancelled(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Cancelled, detail)
    }
}

/// Renders the classic one-line message, e.g. `Error: Hostname not found (...)`.
impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::HostNotFound => write!(f, "Error: Hostname not found ({})", self.detail),
            FailureKind::ResolutionFailed => {
                write!(f, "Error: Resolution failed ({})", self.detail)
            }
            FailureKind::Unknown => write!(f, "Unknown error: {}", self.detail),
            FailureKind::Cancelled => write!(f, "Error: Resolution cancelled ({})", self.detail),
        }
    }
}

impl std::error::Error for LookupFailure {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Resolved(String),
    Failed(LookupFailure),
}

impl LookupResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, LookupResult::Resolved(_))
    }

    pub fn hostname(&self) -> Option<&str> {
        match self {
            LookupResult::Resolved(hostname) => Some(hostname),
            LookupResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LookupFailure> {
        match self {
            LookupResult::Resolved(_) => None,
            LookupResult::Failed(failure) => Some(failure),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure().map(|f| f.kind)
    }
}

impl From<Result<String, LookupFailure>> for LookupResult {
    fn from(result: Result<String, LookupFailure>) -> Self {
        match result {
            Ok(hostname) => LookupResult::Resolved(hostname),
            Err(failure) => LookupResult::Failed(failure),
        }
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupResult::Resolved(hostname) => f.write_str(hostname),
            LookupResult::Failed(failure) => failure.fmt(f),
        }
    }
}

/// One input address paired with what its lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub ip: String,
    pub result: LookupResult,
}

impl ResolutionOutcome {
    pub fn new(ip: impl Into<String>, result: LookupResult) -> Self {
        Self {
            ip: ip.into(),
            result,
        }
    }

    pub fn resolved(ip: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self::new(ip, LookupResult::Resolved(hostname.into()))
    }

    pub fn failed(ip: impl Into<String>, failure: LookupFailure) -> Self {
        Self::new(ip, LookupResult::Failed(failure))
    }

    /// Hostname on success, the classified error message otherwise.
    pub fn message(&self) -> String {
        self.result.to_string()
    }
}
