//! Optional semantic checks for user records.
//!
//! Decoding already guarantees field presence and types. The checks here go
//! further and are only applied when the server enables them.

use crate::models::UserRecord;
use thiserror::Error;

pub const MAX_AGE: i64 = 150;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("email must look like local@domain")]
    InvalidEmail,

    #[error("age {0} is outside 0..=150")]
    AgeOutOfRange(i64),
}

impl UserRecord {
    /// Returns the first rule the record breaks, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        match self.email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => return Err(ValidationError::InvalidEmail),
        }

        if !(0..=MAX_AGE).contains(&self.age) {
            return Err(ValidationError::AgeOutOfRange(self.age));
        }

        Ok(())
    }
}
