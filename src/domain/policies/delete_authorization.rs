//! Delete Authorization Policy
//!
//! Deleting a ledger entry requires the configured secret. Only SHA-256
//! digests are kept and compared, so a rejection says nothing about how
//! close the attempt was.

use sha2::{Digest, Sha256};

use crate::error::{HerbicalibError, HerbicalibResult};

#[derive(Clone, Default)]
pub struct DeleteAuthorization {
    secret_digest: Option<[u8; 32]>,
}

impl std::fmt::Debug for DeleteAuthorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteAuthorization")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}

impl DeleteAuthorization {
    /// An empty or missing secret disables deletion
    pub fn from_secret(secret: Option<&str>) -> Self {
        Self {
            secret_digest: secret.filter(|s| !s.is_empty()).map(digest),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret_digest.is_some()
    }

    pub fn authorize(&self, credential: Option<&str>) -> HerbicalibResult<()> {
        let Some(expected) = self.secret_digest else {
            return Err(HerbicalibError::DeleteDisabled);
        };
        let Some(credential) = credential else {
            return Err(HerbicalibError::AuthorizationDenied);
        };

        let actual = digest(credential);
        let diff = expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if diff == 0 {
            Ok(())
        } else {
            Err(HerbicalibError::AuthorizationDenied)
        }
    }
}
