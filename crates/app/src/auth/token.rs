//! Bearer tokens handed to customers.
//!
//! A token reads `cs_v1_{token uuid}.{secret hex}`. Only a SHA-256 verifier of
//! the secret is stored, bound to the token row and the customer it belongs to.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{auth::ApiTokenUuid, domain::customers::records::CustomerUuid};

const PREFIX: &str = "cs";

const SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    /// Value stored in the `version` column.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = BearerTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        if value == Self::V1.as_i16() {
            Ok(Self::V1)
        } else {
            Err(BearerTokenError::UnknownVersion)
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerTokenError {
    #[error("bearer token is malformed")]
    Malformed,

    #[error("bearer token version is not recognised")]
    UnknownVersion,

    #[error("bearer token secret is not {SECRET_LEN} hex-encoded bytes")]
    BadSecret,
}

/// A bearer token with its secret in memory. The secret is wiped on drop.
pub struct BearerToken {
    pub uuid: ApiTokenUuid,
    pub version: ApiTokenVersion,
    secret: [u8; SECRET_LEN],
}

impl BearerToken {
    /// Fresh token with a random secret.
    #[must_use]
    pub fn generate(uuid: ApiTokenUuid) -> Self {
        let mut secret = [0_u8; SECRET_LEN];

        OsRng.fill_bytes(&mut secret);

        Self {
            uuid,
            version: ApiTokenVersion::V1,
            secret,
        }
    }

    /// Hex SHA-256 over `{token}:{version}:{customer}:{secret}`.
    #[must_use]
    pub fn verifier(&self, customer: CustomerUuid) -> String {
        let mut secret_hex = hex(&self.secret);

        let mut input = format!(
            "{}:{}:{}:{secret_hex}",
            self.uuid.into_uuid().simple(),
            self.version.as_i16(),
            customer.into_uuid().simple(),
        );

        let digest = hex(&Sha256::digest(input.as_bytes()));

        secret_hex.zeroize();
        input.zeroize();

        digest
    }

    /// Whether `stored` was produced by [`BearerToken::verifier`] for this
    /// token and customer. Runs in time independent of where the first
    /// differing byte sits.
    #[must_use]
    pub fn verifies(&self, customer: CustomerUuid, stored: &str) -> bool {
        let computed = self.verifier(customer);

        computed.len() == stored.len()
            && computed
                .bytes()
                .zip(stored.bytes())
                .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("uuid", &self.uuid)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}_{}_{}.{}",
            self.version.tag(),
            self.uuid.into_uuid().simple(),
            hex(&self.secret)
        )
    }
}

impl FromStr for BearerToken {
    type Err = BearerTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (head, secret_hex) = token.split_once('.').ok_or(BearerTokenError::Malformed)?;

        let rest = head
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .ok_or(BearerTokenError::Malformed)?;

        let (tag, uuid) = rest.split_once('_').ok_or(BearerTokenError::Malformed)?;

        let version = match tag {
            "v1" => ApiTokenVersion::V1,
            _ => return Err(BearerTokenError::UnknownVersion),
        };

        let uuid = Uuid::try_parse(uuid).or(Err(BearerTokenError::Malformed))?;

        let secret = unhex(secret_hex).ok_or(BearerTokenError::BadSecret)?;

        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(uuid),
            version,
            secret,
        })
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn unhex(encoded: &str) -> Option<[u8; SECRET_LEN]> {
    if encoded.len() != SECRET_LEN * 2 {
        return None;
    }

    let mut bytes = [0_u8; SECRET_LEN];

    for (byte, pair) in bytes.iter_mut().zip(encoded.as_bytes().chunks_exact(2)) {
        let high = char::from(*pair.first()?).to_digit(16)?;
        let low = char::from(*pair.get(1)?).to_digit(16)?;

        *byte = u8::try_from(high * 16 + low).ok()?;
    }

    Some(bytes)
}
