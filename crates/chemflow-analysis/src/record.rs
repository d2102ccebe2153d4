//! Equipment records and the metric selector
//!
//! An [`EquipmentRecord`] is one row of an uploaded equipment dataset. The
//! field names match the upload header:
//!
//! ```text
//! Equipment Name,Type,Flowrate,Pressure,Temperature
//! Pump-1,Pump,120.5,5.2,110.0
//! ```
//!
//! Numeric cells are read leniently: a number, a numeric string, an empty
//! cell or `null` are all accepted, and anything that does not parse becomes
//! `NaN`. Downstream aggregation drops non-finite values where it needs to.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};

/// A single equipment sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    /// Display name of the equipment
    #[serde(rename = "Equipment Name")]
    pub name: String,
    /// Categorical equipment type (pump, valve, reactor, ...)
    #[serde(rename = "Type")]
    pub equipment_type: String,
    #[serde(rename = "Flowrate", deserialize_with = "lenient_f64")]
    pub flowrate: f64,
    #[serde(rename = "Pressure", deserialize_with = "lenient_f64")]
    pub pressure: f64,
    #[serde(rename = "Temperature", deserialize_with = "lenient_f64")]
    pub temperature: f64,
}

impl EquipmentRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        equipment_type: impl Into<String>,
        flowrate: f64,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        Self {
            name: name.into(),
            equipment_type: equipment_type.into(),
            flowrate,
            pressure,
            temperature,
        }
    }

    /// Returns the value of the selected metric.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Flowrate => self.flowrate,
            Metric::Pressure => self.pressure,
            Metric::Temperature => self.temperature,
        }
    }
}

/// The numeric field driving the histogram, box plot and grouped views.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    Flowrate,
    Pressure,
    Temperature,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Flowrate, Self::Pressure, Self::Temperature];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Flowrate => "Flowrate",
            Metric::Pressure => "Pressure",
            Metric::Temperature => "Temperature",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown metric '{name}' (expected flowrate, pressure or temperature)")]
pub struct ParseMetricError {
    #[error(not(source))]
    name: String,
}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMetricError { name: s.to_owned() })
    }
}

/// Accepts a number, a numeric string, an empty cell or null; anything
/// unparseable becomes `NaN`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientF64;

    impl<'de> de::Visitor<'de> for LenientF64 {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        #[expect(clippy::cast_precision_loss)]
        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        #[expect(clippy::cast_precision_loss)]
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse().unwrap_or(f64::NAN))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<f64, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientF64)
}
