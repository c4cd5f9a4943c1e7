//! Issuance response decoding.
//!
//! The input is the JSON body a PKI secrets engine returns from its `issue`
//! endpoint. Only `data.private_key`, `data.certificate` and `data.ca_chain`
//! drive output; the remaining fields are decoded for completeness and
//! anything unknown is ignored.

use crate::error::{Result, SpongeError};
use serde::{Deserialize, Deserializer};

/// Top-level issuance response envelope.
///
/// Every field is optional and `null` decodes as the field's default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IssuanceResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lease_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lease_duration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub renewable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub data: IssuanceData,
    /// Free-form warnings block; usually `null` or a list of strings.
    pub warnings: serde_json::Value,
}

/// Certificate material carried in the `data` object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IssuanceData {
    /// CA certificates in the order the issuer supplied them.
    #[serde(deserialize_with = "null_as_default")]
    pub ca_chain: Vec<String>,
    /// PEM-encoded leaf certificate.
    #[serde(deserialize_with = "null_as_default")]
    pub certificate: String,
    /// Expiration timestamp (Unix seconds).
    #[serde(deserialize_with = "null_as_default")]
    pub expiration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub issuing_ca: String,
    /// PEM-encoded private key.
    #[serde(deserialize_with = "null_as_default")]
    pub private_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private_key_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl IssuanceResponse {
    /// Decodes a response from raw input bytes.
    ///
    /// The top-level value must be a JSON object. Fields with the wrong type
    /// are rejected; missing fields decode as empty.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(input)?;
        let shape = match &value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Null => Some("null"),
            serde_json::Value::Bool(_) => Some("a boolean"),
            serde_json::Value::Number(_) => Some("a number"),
            serde_json::Value::String(_) => Some("a string"),
            serde_json::Value::Array(_) => Some("an array"),
        };
        if let Some(found) = shape {
            return Err(SpongeError::NotAnObject(found));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Checks that the key and certificate are both present.
    pub fn validate(&self) -> Result<()> {
        if self.data.private_key.is_empty() || self.data.certificate.is_empty() {
            return Err(SpongeError::MissingFields);
        }
        Ok(())
    }

    pub fn private_key(&self) -> &str {
        &self.data.private_key
    }

    pub fn certificate(&self) -> &str {
        &self.data.certificate
    }

    pub fn ca_chain(&self) -> &[String] {
        &self.data.ca_chain
    }
}
