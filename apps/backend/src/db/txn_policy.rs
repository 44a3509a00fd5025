use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (default)
    CommitOnOk,
    /// Roll back on success; lets a test exercise a handler without keeping its writes
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parse `TURNSTILE_TXN_POLICY` values (`commit` / `rollback`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "commit" => Some(TxnPolicy::CommitOnOk),
            "rollback" => Some(TxnPolicy::RollbackOnOk),
            _ => None,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process-wide policy; `CommitOnOk` until one is set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the process-wide policy. Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
