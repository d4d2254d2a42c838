//! Serde adapters for JSON protocol wire encodings.
//!
//! Use with `#[serde(with = "...")]` on optional shape members.

/// Timestamps as epoch seconds (JSON number, millisecond precision).
pub mod epoch_seconds {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional timestamp.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => {
                let millis = time.timestamp_millis();
                if millis % 1000 == 0 {
                    serializer.serialize_i64(millis / 1000)
                } else {
                    serializer.serialize_f64(millis as f64 / 1000.0)
                }
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp from an integer or fractional number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = Option::<f64>::deserialize(deserializer)?;
        seconds
            .map(|secs| {
                let millis = (secs * 1000.0).round() as i64;
                Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
                    serde::de::Error::custom(format!("timestamp out of range: {}", secs))
                })
            })
            .transpose()
    }
}

/// Binary data as standard base64 strings.
pub mod blob {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize optional bytes.
    pub fn serialize<S>(value: &Option<Bytes>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize optional bytes.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|text| {
                STANDARD
                    .decode(text.as_bytes())
                    .map(Bytes::from)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
