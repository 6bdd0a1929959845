//! Barometric altitude, following the international standard atmosphere (ISO 2533) below 11 km.

/// Exponent of the pressure ratio, `1 / 5.255`.
const EXPONENT: f32 = 0.190_294_96;

/// Height in metres at which the pressure of a standard atmosphere has dropped to zero in the
/// linear temperature model.
const SCALE_HEIGHT_M: f32 = 44_330.0;

/// Standard sea level pressure in Pa.
pub const STANDARD_SEA_LEVEL_PRESSURE: f32 = 101_325.0;

/// Altitude in metres of `pressure` relative to the level where `reference` was measured.
///
/// Both pressures in Pa. Equal pressures give 0 m, lower pressures a positive altitude.
pub fn altitude(pressure: f32, reference: f32) -> f32 {
    SCALE_HEIGHT_M * (1.0 - libm::powf(pressure / reference, EXPONENT))
}

/// Pressure at sea level, in Pa, for a `pressure` measured at a known `altitude` in metres.
///
/// Inverse of [`altitude`]; pass the result as reference to get altitudes above sea level.
pub fn sea_level_pressure(pressure: f32, altitude: f32) -> f32 {
    pressure / libm::powf(1.0 - altitude / SCALE_HEIGHT_M, 1.0 / EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pressure_is_zero() {
        assert!(altitude(100_000.0, 100_000.0).abs() < 1e-3);
        assert!(altitude(69_964.0, 69_964.0).abs() < 1e-3);
    }

    #[test]
    fn one_kilometre() {
        let h = altitude(STANDARD_SEA_LEVEL_PRESSURE * 0.887, STANDARD_SEA_LEVEL_PRESSURE);
        assert!((h - 1000.0).abs() < 3.0, "{}", h);
    }

    #[test]
    fn higher_pressure_is_below_reference() {
        assert!(altitude(101_500.0, 101_325.0) < 0.0);
    }

    #[test]
    fn sea_level_round_trip() {
        let p0 = sea_level_pressure(89_875.0, 1000.0);
        let h = altitude(89_875.0, p0);
        assert!((h - 1000.0).abs() < 0.5, "{}", h);
    }
}
