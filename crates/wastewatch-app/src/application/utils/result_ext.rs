use wastewatch_domain::shared::DomainError;

/// Shorthands for folding foreign errors into `DomainError`
pub trait ResultExt<T, E> {
    /// `result.to_infra_err()?`
    fn to_infra_err(self) -> Result<T, DomainError>;

    /// Replace the cause with a fixed public message, keeping the variant
    /// family. Used where internal query errors must not leak.
    fn mask_err(self, message: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    fn mask_err(self, message: &str) -> Result<T, DomainError> {
        self.map_err(|e| {
            log::warn!("{message}: {e}");
            DomainError::Repository(message.to_string())
        })
    }
}
