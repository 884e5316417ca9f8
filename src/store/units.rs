/*
 * Responsibility
 * - 身長・体重の単位と換算 (保存値は cm / kg)
 */
use std::str::FromStr;

use crate::store::StoreError;

const CENTIMETRES_PER_METRE: f64 = 100.0;
const CENTIMETRES_PER_FOOT: f64 = 30.48;
const GRAMS_PER_KILOGRAM: f64 = 1000.0;
const KILOGRAMS_PER_POUND: f64 = 0.453_592_37;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightUnit {
    Metre,
    Centimetre,
    Foot,
}

impl HeightUnit {
    /// Convert a stored base-unit value (centimetres) into this unit.
    pub fn from_centimetres(self, cm: f64) -> f64 {
        match self {
            HeightUnit::Metre => cm / CENTIMETRES_PER_METRE,
            HeightUnit::Centimetre => cm,
            HeightUnit::Foot => cm / CENTIMETRES_PER_FOOT,
        }
    }
}

impl FromStr for HeightUnit {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "METRE" => Ok(HeightUnit::Metre),
            "CENTIMETRE" => Ok(HeightUnit::Centimetre),
            "FOOT" => Ok(HeightUnit::Foot),
            _ => Err(StoreError::UnsupportedUnit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilogram,
    Gram,
    Pound,
}

impl WeightUnit {
    /// Convert a stored base-unit value (kilograms) into this unit.
    pub fn from_kilograms(self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kilogram => kg,
            WeightUnit::Gram => kg * GRAMS_PER_KILOGRAM,
            WeightUnit::Pound => kg / KILOGRAMS_PER_POUND,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KILOGRAM" => Ok(WeightUnit::Kilogram),
            "GRAM" => Ok(WeightUnit::Gram),
            "POUND" => Ok(WeightUnit::Pound),
            _ => Err(StoreError::UnsupportedUnit(s.to_string())),
        }
    }
}
