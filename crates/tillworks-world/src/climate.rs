//! Climate classification.
//!
//! Raw climate readings are continuous factors. Strategies usually only care
//! about coarse bands, so the controller classifies its reference reading
//! with the thresholds below:
//!
//! | Temperature  | Class     |
//! |--------------|-----------|
//! | > 2.0        | Hellish   |
//! | > 1.0        | Hot       |
//! | > 0.85       | Warm      |
//! | > 0.35       | Normal    |
//! | > 0.0        | Cold      |
//! | otherwise    | Icy       |
//!
//! Humidity above 0.85 is damp, at least 0.3 is normal, anything lower is
//! arid.

use rust_decimal::Decimal;
use tillworks_types::{HumidityClass, TemperatureClass};

/// Classify a raw temperature factor.
pub fn classify_temperature(value: Decimal) -> TemperatureClass {
    if value > Decimal::TWO {
        TemperatureClass::Hellish
    } else if value > Decimal::ONE {
        TemperatureClass::Hot
    } else if value > Decimal::new(85, 2) {
        TemperatureClass::Warm
    } else if value > Decimal::new(35, 2) {
        TemperatureClass::Normal
    } else if value > Decimal::ZERO {
        TemperatureClass::Cold
    } else {
        TemperatureClass::Icy
    }
}

/// Classify a raw humidity factor.
pub fn classify_humidity(value: Decimal) -> HumidityClass {
    if value > Decimal::new(85, 2) {
        HumidityClass::Damp
    } else if value >= Decimal::new(3, 1) {
        HumidityClass::Normal
    } else {
        HumidityClass::Arid
    }
}
