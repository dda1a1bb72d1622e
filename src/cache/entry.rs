//! Cache Entry Module
//!
//! Defines the stored unit of the cache and its JSON codec.
//!
//! An entry is stored as `{"value": <json>, "expiresOn": null | "<ISO-8601 UTC>"}`.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;

const VALUE_FIELD: &str = "value";
const EXPIRES_ON_FIELD: &str = "expiresOn";

// == Decode Error ==
/// Reasons a stored representation cannot be read as a cache entry.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Not a JSON object
    #[error("not a JSON object: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required field is absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// `expiresOn` is neither null nor a timestamp string
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),
}

// == Cache Entry ==
/// A value together with its optional absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Expiration instant, None = never expires
    pub expires_on: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl_seconds` from now.
    ///
    /// The expiry is truncated to milliseconds, the precision of the stored format.
    /// A TTL too large to represent is treated as no expiry.
    pub fn new(value: Value, ttl_seconds: Option<u64>) -> Self {
        let expires_on = ttl_seconds.and_then(|ttl| {
            let ttl = TimeDelta::try_seconds(i64::try_from(ttl).ok()?)?;
            Utc::now().checked_add_signed(ttl)
        });

        Self {
            value,
            expires_on: expires_on.map(|at| at.trunc_subsecs(3)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: the entry is expired once `now >= expires_on`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_on {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    // == Encode ==
    /// Serializes the entry into its stored representation.
    pub fn encode(&self) -> String {
        let expires_on = match self.expires_on {
            Some(at) => Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => Value::Null,
        };

        json!({
            VALUE_FIELD: self.value,
            EXPIRES_ON_FIELD: expires_on,
        })
        .to_string()
    }

    // == Decode ==
    /// Parses a stored representation.
    ///
    /// Unknown extra fields are ignored.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let mut fields: Map<String, Value> = serde_json::from_str(raw)?;

        let value = fields
            .remove(VALUE_FIELD)
            .ok_or(DecodeError::MissingField(VALUE_FIELD))?;

        let expires_on = match fields.remove(EXPIRES_ON_FIELD) {
            None => return Err(DecodeError::MissingField(EXPIRES_ON_FIELD)),
            Some(Value::Null) => None,
            Some(Value::String(text)) => Some(
                text.parse::<DateTime<Utc>>()
                    .map_err(|e| DecodeError::InvalidExpiry(format!("{text}: {e}")))?,
            ),
            Some(other) => return Err(DecodeError::InvalidExpiry(other.to_string())),
        };

        Ok(Self { value, expires_on })
    }
}
