//! Physical unit conversions
//!
//! WordprocessingML measures page geometry in twentieths of a point
//! ("twips", 1440 per inch) and DrawingML measures pictures in English
//! Metric Units (914400 per inch).

/// EMUs per inch (914400)
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per centimetre (360000)
pub const EMU_PER_CENTIMETER: i64 = 360_000;

/// EMUs per pixel at 96 DPI (9525)
pub const EMU_PER_PIXEL: i64 = 9_525;

/// Twips per inch (1440)
pub const TWIPS_PER_INCH: f64 = 1440.0;

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Largest extent DrawingML accepts (`ST_PositiveCoordinate`)
pub const MAX_EMU: i64 = 27_273_042_316_900;

/// Convert centimetres to EMUs, rounding half to even like `Math.rint`
///
/// The result is clamped to `0..=MAX_EMU`; NaN gives 0.
pub fn cm_to_emu(cm: f64) -> i64 {
    let emu = (cm * EMU_PER_CENTIMETER as f64).round_ties_even();
    if emu.is_nan() {
        return 0;
    }
    (emu as i64).clamp(0, MAX_EMU)
}

/// Convert centimetres to twentieths of a point, truncating
///
/// `cm_to_twips(2.0)` is 1133, a 2 cm page margin.
pub fn cm_to_twips(cm: f64) -> i64 {
    (cm / CM_PER_INCH * TWIPS_PER_INCH) as i64
}

/// Convert EMUs to pixels at 96 DPI
pub fn emu_to_pixels(emu: i64) -> i64 {
    (emu as f64 / EMU_PER_PIXEL as f64).round() as i64
}

/// Convert EMUs to centimetres
pub fn emu_to_cm(emu: i64) -> f64 {
    emu as f64 / EMU_PER_CENTIMETER as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_emu() {
        assert_eq!(cm_to_emu(1.0), 360_000);
        assert_eq!(cm_to_emu(2.54), EMU_PER_INCH);
        assert_eq!(cm_to_emu(16.2), 5_832_000);
        assert_eq!(cm_to_emu(10.01), 3_603_600);
    }

    #[test]
    fn test_cm_to_emu_clamped() {
        assert_eq!(cm_to_emu(f64::INFINITY), MAX_EMU);
        assert_eq!(cm_to_emu(1e300), MAX_EMU);
        assert_eq!(cm_to_emu(-3.0), 0);
        assert_eq!(cm_to_emu(f64::NAN), 0);
    }

    #[test]
    fn test_cm_to_twips() {
        assert_eq!(cm_to_twips(2.54), 1440);
        assert_eq!(cm_to_twips(2.0), 1133);
        assert_eq!(cm_to_twips(0.0), 0);
    }

    #[test]
    fn test_emu_to_pixels() {
        // 914400 EMUs = 1 inch = 96 pixels at 96 DPI
        assert_eq!(emu_to_pixels(EMU_PER_INCH), 96);
    }

    #[test]
    fn test_emu_to_cm() {
        assert!((emu_to_cm(5_832_000) - 16.2).abs() < 1e-9);
    }
}
