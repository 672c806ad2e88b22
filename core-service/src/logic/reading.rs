//! Sensor readings
//!
//! `SensorPayload` is what arrives over the wire: every field optional,
//! numbers possibly sent as strings, `dust` accepted in place of
//! `dust_equiv`. `SensorReading` is the resolved, fully-defaulted form the
//! scorer works with.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound sensor payload (ESP8266 JSON body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorPayload {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mq2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mq135: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub dust_equiv: Option<f64>,
    /// Older firmware sends `dust` instead of `dust_equiv`
    #[serde(default, deserialize_with = "lenient_number")]
    pub dust: Option<f64>,
}

impl SensorPayload {
    /// Particulate estimate, preferring `dust_equiv` over `dust`
    pub fn dust_value(&self) -> Option<f64> {
        self.dust_equiv.or(self.dust)
    }

    /// Resolve into a reading, defaulting every missing field to 0
    pub fn resolve(&self) -> SensorReading {
        SensorReading {
            temperature: self.temperature.unwrap_or(0.0),
            humidity: self.humidity.unwrap_or(0.0),
            mq2: self.mq2.unwrap_or(0.0),
            mq135: self.mq135.unwrap_or(0.0),
            dust_equiv: self.dust_value().unwrap_or(0.0),
        }
    }
}

/// A fully resolved sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub mq2: f64,
    pub mq135: f64,
    pub dust_equiv: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, humidity: f64, mq2: f64, mq135: f64, dust_equiv: f64) -> Self {
        Self { temperature, humidity, mq2, mq135, dust_equiv }
    }
}

/// Accepts JSON numbers, numeric strings and booleans; rejects everything
/// else, including non-finite values.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    let number = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n)))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", s)))?,
        Some(Value::Bool(b)) => if b { 1.0 } else { 0.0 },
        Some(other) => {
            return Err(de::Error::custom(format!("expected a number, got {}", other)));
        }
    };

    if !number.is_finite() {
        return Err(de::Error::custom("expected a finite number"));
    }

    Ok(Some(number))
}
