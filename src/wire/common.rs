use crate::error::{AcmeError, AcmeResult};

// Serde skip_serialization_if helper
pub(crate) fn is_false(value: &bool) -> bool {
    !value
}

pub trait ResourceStatus: std::fmt::Debug + Copy + Sized {
    fn is_failure(&self) -> bool;

    fn error(&self) -> Option<AcmeError> {
        if self.is_failure() {
            Some(AcmeError::InvalidState(
                format!("{:?}", self).to_ascii_lowercase(),
            ))
        } else {
            None
        }
    }

    fn as_result(&self) -> AcmeResult<Self> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(*self),
        }
    }
}

/// Resources whose URL is carried out-of-band in a `Location` response
/// header rather than the JSON body itself.
pub(crate) trait LocationResource {
    fn location_mut(&mut self) -> &mut Option<String>;
}
