//! Static reference data
//!
//! Population tables and published coefficients consumed by the formula
//! library. Nothing here is computed; every lookup is a scan over a
//! `const` table.

use serde::Serialize;

use crate::formulas::BiologicalSex;

// ============================================================================
// ABSI population reference
// ============================================================================

/// Mean and standard deviation of ABSI for one sex and age band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbsiReference {
    /// Inclusive lower age bound in years
    pub min_age: u32,
    /// Inclusive upper age bound in years
    pub max_age: u32,
    pub mean: f64,
    pub sd: f64,
}

const fn absi(min_age: u32, max_age: u32, mean: f64, sd: f64) -> AbsiReference {
    AbsiReference {
        min_age,
        max_age,
        mean,
        sd,
    }
}

/// Adult ABSI norms by age band, smoothed from NHANES 1999-2004
pub const ABSI_MALE: [AbsiReference; 7] = [
    absi(0, 24, 0.0780, 0.0038),
    absi(25, 34, 0.0794, 0.0038),
    absi(35, 44, 0.0808, 0.0037),
    absi(45, 54, 0.0820, 0.0036),
    absi(55, 64, 0.0831, 0.0036),
    absi(65, 74, 0.0841, 0.0037),
    absi(75, u32::MAX, 0.0850, 0.0039),
];

pub const ABSI_FEMALE: [AbsiReference; 7] = [
    absi(0, 24, 0.0754, 0.0050),
    absi(25, 34, 0.0770, 0.0052),
    absi(35, 44, 0.0785, 0.0053),
    absi(45, 54, 0.0800, 0.0053),
    absi(55, 64, 0.0815, 0.0053),
    absi(65, 74, 0.0829, 0.0054),
    absi(75, u32::MAX, 0.0842, 0.0056),
];

/// Reference row covering `age_years` for `sex`
pub fn absi_reference(sex: BiologicalSex, age_years: u32) -> AbsiReference {
    let table: &[AbsiReference] = match sex {
        BiologicalSex::Male => &ABSI_MALE,
        BiologicalSex::Female => &ABSI_FEMALE,
    };
    // Bands tile 0..=u32::MAX, so the scan always hits
    table
        .iter()
        .copied()
        .find(|row| (row.min_age..=row.max_age).contains(&age_years))
        .unwrap_or(table[table.len() - 1])
}

// ============================================================================
// Wilks coefficients
// ============================================================================

/// Fifth-degree polynomial coefficients of the original Wilks formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WilksCoefficients {
    pub terms: [f64; 6],
    /// Bodyweight range (kg) the polynomial was fitted over
    pub min_bodyweight_kg: f64,
    pub max_bodyweight_kg: f64,
}

pub const WILKS_MALE: WilksCoefficients = WilksCoefficients {
    terms: [
        -216.0475144,
        16.2606339,
        -0.002388645,
        -0.00113732,
        7.01863e-06,
        -1.291e-08,
    ],
    min_bodyweight_kg: 40.0,
    max_bodyweight_kg: 201.9,
};

pub const WILKS_FEMALE: WilksCoefficients = WilksCoefficients {
    terms: [
        594.31747775582,
        -27.23842536447,
        0.82112226871,
        -0.00930733913,
        4.731582e-05,
        -9.054e-08,
    ],
    min_bodyweight_kg: 26.51,
    max_bodyweight_kg: 154.53,
};

pub fn wilks_coefficients(sex: BiologicalSex) -> &'static WilksCoefficients {
    match sex {
        BiologicalSex::Male => &WILKS_MALE,
        BiologicalSex::Female => &WILKS_FEMALE,
    }
}

// ============================================================================
// Calendar tables
// ============================================================================

/// Western zodiac sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

impl ZodiacSign {
    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
        }
    }
}

/// First (month, day) of each sign, in calendar order
const ZODIAC_STARTS: [(u32, u32, ZodiacSign); 12] = [
    (1, 20, ZodiacSign::Aquarius),
    (2, 19, ZodiacSign::Pisces),
    (3, 21, ZodiacSign::Aries),
    (4, 20, ZodiacSign::Taurus),
    (5, 21, ZodiacSign::Gemini),
    (6, 21, ZodiacSign::Cancer),
    (7, 23, ZodiacSign::Leo),
    (8, 23, ZodiacSign::Virgo),
    (9, 23, ZodiacSign::Libra),
    (10, 23, ZodiacSign::Scorpio),
    (11, 22, ZodiacSign::Sagittarius),
    (12, 22, ZodiacSign::Capricorn),
];

/// Zodiac sign for a birth month (1-12) and day
pub fn zodiac_sign(month: u32, day: u32) -> ZodiacSign {
    ZODIAC_STARTS
        .iter()
        .rev()
        .find(|(m, d, _)| (month, day) >= (*m, *d))
        .map(|(_, _, sign)| *sign)
        // Before Jan 20 the year is still in Capricorn
        .unwrap_or(ZodiacSign::Capricorn)
}

const BIRTHSTONES: [&str; 12] = [
    "Garnet",
    "Amethyst",
    "Aquamarine",
    "Diamond",
    "Emerald",
    "Pearl",
    "Ruby",
    "Peridot",
    "Sapphire",
    "Opal",
    "Topaz",
    "Turquoise",
];

/// Traditional birthstone for a month (1-12)
pub fn birthstone(month: u32) -> &'static str {
    let index = month.clamp(1, 12) as usize - 1;
    BIRTHSTONES[index]
}
