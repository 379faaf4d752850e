//! Classification of formula outputs into ordered bands
//!
//! Every table is an ordered list of bands, each closed by an upper bound
//! that is either exclusive (`value < upper`) or inclusive
//! (`value <= upper`). The last band of every table is unbounded, so each
//! table covers the whole real line and a finite value always lands in
//! exactly one band. The boundary rule is declared per band, not globally.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{CalcError, CalcResult};
use crate::formulas::body::absi_z_score;
use crate::formulas::BiologicalSex;

// ============================================================================
// Colors
// ============================================================================

/// Display color attached to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Gray,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    DarkRed,
    Purple,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Gray => "#9ca3af",
            Color::Blue => "#3b82f6",
            Color::Green => "#22c55e",
            Color::Yellow => "#eab308",
            Color::Orange => "#f97316",
            Color::Red => "#ef4444",
            Color::DarkRed => "#991b1b",
            Color::Purple => "#a855f7",
        }
    }
}

// ============================================================================
// Band tables
// ============================================================================

/// One band of a classification table
#[derive(Debug, Clone, Copy)]
struct Band<C> {
    upper: f64,
    inclusive: bool,
    category: C,
}

impl<C: Copy> Band<C> {
    /// `value < upper`
    const fn below(upper: f64, category: C) -> Self {
        Band {
            upper,
            inclusive: false,
            category,
        }
    }

    /// `value <= upper`
    const fn up_to(upper: f64, category: C) -> Self {
        Band {
            upper,
            inclusive: true,
            category,
        }
    }

    /// Everything above the previous band
    const fn rest(category: C) -> Self {
        Band {
            upper: f64::INFINITY,
            inclusive: true,
            category,
        }
    }

    fn contains(&self, value: f64) -> bool {
        if self.inclusive {
            value <= self.upper
        } else {
            value < self.upper
        }
    }
}

/// First band whose upper bound admits `value`
fn scan<C: Copy>(metric: Metric, bands: &[Band<C>], value: f64) -> CalcResult<C> {
    if !value.is_finite() {
        return Err(CalcError::invalid("value", format!("{} value must be finite", metric.name())));
    }
    bands
        .iter()
        .find(|band| band.contains(value))
        .map(|band| band.category)
        .ok_or_else(|| {
            tracing::warn!(metric = metric.name(), value, "value fell outside every band");
            CalcError::ClassificationGap {
                metric: metric.name(),
                value,
            }
        })
}

/// Behavior shared by every typed category
pub trait Banded: Copy {
    fn label(&self) -> &'static str;
    fn color(&self) -> Color;
    /// Position in the table, 0 for the lowest band
    fn ordinal(&self) -> u8;
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category (WHO)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    ObeseClass1,
    ObeseClass2,
    ObeseClass3,
}

/// Coarse BMI grouping used by cross-metric interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiGroup {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 7] = [
        BmiCategory::SeverelyUnderweight,
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::ObeseClass1,
        BmiCategory::ObeseClass2,
        BmiCategory::ObeseClass3,
    ];

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    pub fn group(&self) -> BmiGroup {
        match self {
            BmiCategory::SeverelyUnderweight | BmiCategory::Underweight => BmiGroup::Underweight,
            BmiCategory::Normal => BmiGroup::Normal,
            BmiCategory::Overweight => BmiGroup::Overweight,
            BmiCategory::ObeseClass1 | BmiCategory::ObeseClass2 | BmiCategory::ObeseClass3 => BmiGroup::Obese,
        }
    }
}

impl Banded for BmiCategory {
    fn label(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClass1 => "Obese (Class I)",
            BmiCategory::ObeseClass2 => "Obese (Class II)",
            BmiCategory::ObeseClass3 => "Obese (Class III)",
        }
    }

    fn color(&self) -> Color {
        match self {
            BmiCategory::SeverelyUnderweight => Color::Orange,
            BmiCategory::Underweight => Color::Yellow,
            BmiCategory::Normal => Color::Green,
            BmiCategory::Overweight => Color::Yellow,
            BmiCategory::ObeseClass1 => Color::Orange,
            BmiCategory::ObeseClass2 => Color::Red,
            BmiCategory::ObeseClass3 => Color::DarkRed,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

// 25.0 exactly is Overweight
const BMI_BANDS: [Band<BmiCategory>; 7] = [
    Band::below(16.0, BmiCategory::SeverelyUnderweight),
    Band::below(18.5, BmiCategory::Underweight),
    Band::below(25.0, BmiCategory::Normal),
    Band::below(30.0, BmiCategory::Overweight),
    Band::below(35.0, BmiCategory::ObeseClass1),
    Band::below(40.0, BmiCategory::ObeseClass2),
    Band::rest(BmiCategory::ObeseClass3),
];

pub fn classify_bmi(bmi: f64) -> CalcResult<BmiCategory> {
    scan(Metric::Bmi, &BMI_BANDS, bmi)
}

// ============================================================================
// ABSI
// ============================================================================

/// Mortality risk implied by the ABSI z-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsiRisk {
    Low,
    Average,
    High,
    VeryHigh,
}

impl AbsiRisk {
    pub const ALL: [AbsiRisk; 4] = [
        AbsiRisk::Low,
        AbsiRisk::Average,
        AbsiRisk::High,
        AbsiRisk::VeryHigh,
    ];

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }
}

impl Banded for AbsiRisk {
    fn label(&self) -> &'static str {
        match self {
            AbsiRisk::Low => "Low Risk",
            AbsiRisk::Average => "Average Risk",
            AbsiRisk::High => "High Risk",
            AbsiRisk::VeryHigh => "Very High Risk",
        }
    }

    fn color(&self) -> Color {
        match self {
            AbsiRisk::Low => Color::Green,
            AbsiRisk::Average => Color::Yellow,
            AbsiRisk::High => Color::Orange,
            AbsiRisk::VeryHigh => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const ABSI_Z_BANDS: [Band<AbsiRisk>; 4] = [
    Band::below(-0.868, AbsiRisk::Low),
    Band::below(0.868, AbsiRisk::Average),
    Band::below(1.645, AbsiRisk::High),
    Band::rest(AbsiRisk::VeryHigh),
];

pub fn classify_absi_z(z: f64) -> CalcResult<AbsiRisk> {
    scan(Metric::AbsiZScore, &ABSI_Z_BANDS, z)
}

// ============================================================================
// Waist ratios
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhtrCategory {
    UnderweightRisk,
    Healthy,
    Increased,
    High,
}

impl Banded for WhtrCategory {
    fn label(&self) -> &'static str {
        match self {
            WhtrCategory::UnderweightRisk => "Underweight Risk",
            WhtrCategory::Healthy => "Healthy",
            WhtrCategory::Increased => "Increased Risk",
            WhtrCategory::High => "High Risk",
        }
    }

    fn color(&self) -> Color {
        match self {
            WhtrCategory::UnderweightRisk => Color::Blue,
            WhtrCategory::Healthy => Color::Green,
            WhtrCategory::Increased => Color::Orange,
            WhtrCategory::High => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const WHTR_BANDS: [Band<WhtrCategory>; 4] = [
    Band::below(0.4, WhtrCategory::UnderweightRisk),
    Band::below(0.5, WhtrCategory::Healthy),
    Band::below(0.6, WhtrCategory::Increased),
    Band::rest(WhtrCategory::High),
];

pub fn classify_whtr(ratio: f64) -> CalcResult<WhtrCategory> {
    scan(Metric::WaistToHeight, &WHTR_BANDS, ratio)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhrRisk {
    Low,
    Moderate,
    High,
}

impl Banded for WhrRisk {
    fn label(&self) -> &'static str {
        match self {
            WhrRisk::Low => "Low Risk",
            WhrRisk::Moderate => "Moderate Risk",
            WhrRisk::High => "High Risk",
        }
    }

    fn color(&self) -> Color {
        match self {
            WhrRisk::Low => Color::Green,
            WhrRisk::Moderate => Color::Yellow,
            WhrRisk::High => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

// WHO cut-offs are quoted as "0.95 or less"; upper bounds are inclusive
const WHR_MALE_BANDS: [Band<WhrRisk>; 3] = [
    Band::up_to(0.95, WhrRisk::Low),
    Band::up_to(1.0, WhrRisk::Moderate),
    Band::rest(WhrRisk::High),
];

const WHR_FEMALE_BANDS: [Band<WhrRisk>; 3] = [
    Band::up_to(0.80, WhrRisk::Low),
    Band::up_to(0.85, WhrRisk::Moderate),
    Band::rest(WhrRisk::High),
];

pub fn classify_whr(ratio: f64, sex: BiologicalSex) -> CalcResult<WhrRisk> {
    match sex {
        BiologicalSex::Male => scan(Metric::WaistToHip, &WHR_MALE_BANDS, ratio),
        BiologicalSex::Female => scan(Metric::WaistToHip, &WHR_FEMALE_BANDS, ratio),
    }
}

// ============================================================================
// Body fat
// ============================================================================

/// Body fat category (American Council on Exercise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub const ALL: [BodyFatCategory; 5] = [
        BodyFatCategory::Essential,
        BodyFatCategory::Athletic,
        BodyFatCategory::Fitness,
        BodyFatCategory::Average,
        BodyFatCategory::Obese,
    ];

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }
}

impl Banded for BodyFatCategory {
    fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::Essential => "Essential Fat",
            BodyFatCategory::Athletic => "Athletes",
            BodyFatCategory::Fitness => "Fitness",
            BodyFatCategory::Average => "Average",
            BodyFatCategory::Obese => "Obese",
        }
    }

    fn color(&self) -> Color {
        match self {
            BodyFatCategory::Essential => Color::Blue,
            BodyFatCategory::Athletic | BodyFatCategory::Fitness => Color::Green,
            BodyFatCategory::Average => Color::Yellow,
            BodyFatCategory::Obese => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const BODY_FAT_MALE_BANDS: [Band<BodyFatCategory>; 5] = [
    Band::below(6.0, BodyFatCategory::Essential),
    Band::below(14.0, BodyFatCategory::Athletic),
    Band::below(18.0, BodyFatCategory::Fitness),
    Band::below(25.0, BodyFatCategory::Average),
    Band::rest(BodyFatCategory::Obese),
];

const BODY_FAT_FEMALE_BANDS: [Band<BodyFatCategory>; 5] = [
    Band::below(14.0, BodyFatCategory::Essential),
    Band::below(21.0, BodyFatCategory::Athletic),
    Band::below(25.0, BodyFatCategory::Fitness),
    Band::below(32.0, BodyFatCategory::Average),
    Band::rest(BodyFatCategory::Obese),
];

/// Also used for relative fat mass, which estimates the same percentage
pub fn classify_body_fat(body_fat_percent: f64, sex: BiologicalSex) -> CalcResult<BodyFatCategory> {
    match sex {
        BiologicalSex::Male => scan(Metric::BodyFat, &BODY_FAT_MALE_BANDS, body_fat_percent),
        BiologicalSex::Female => scan(Metric::BodyFat, &BODY_FAT_FEMALE_BANDS, body_fat_percent),
    }
}

// ============================================================================
// Wilks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WilksLevel {
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Elite,
}

impl Banded for WilksLevel {
    fn label(&self) -> &'static str {
        match self {
            WilksLevel::Beginner => "Beginner",
            WilksLevel::Novice => "Novice",
            WilksLevel::Intermediate => "Intermediate",
            WilksLevel::Advanced => "Advanced",
            WilksLevel::Elite => "Elite",
        }
    }

    fn color(&self) -> Color {
        match self {
            WilksLevel::Beginner => Color::Gray,
            WilksLevel::Novice => Color::Blue,
            WilksLevel::Intermediate => Color::Green,
            WilksLevel::Advanced => Color::Orange,
            WilksLevel::Elite => Color::Purple,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const WILKS_MALE_BANDS: [Band<WilksLevel>; 5] = [
    Band::below(200.0, WilksLevel::Beginner),
    Band::below(300.0, WilksLevel::Novice),
    Band::below(400.0, WilksLevel::Intermediate),
    Band::below(500.0, WilksLevel::Advanced),
    Band::rest(WilksLevel::Elite),
];

const WILKS_FEMALE_BANDS: [Band<WilksLevel>; 5] = [
    Band::below(150.0, WilksLevel::Beginner),
    Band::below(250.0, WilksLevel::Novice),
    Band::below(325.0, WilksLevel::Intermediate),
    Band::below(400.0, WilksLevel::Advanced),
    Band::rest(WilksLevel::Elite),
];

pub fn classify_wilks(score: f64, sex: BiologicalSex) -> CalcResult<WilksLevel> {
    match sex {
        BiologicalSex::Male => scan(Metric::Wilks, &WILKS_MALE_BANDS, score),
        BiologicalSex::Female => scan(Metric::Wilks, &WILKS_FEMALE_BANDS, score),
    }
}

// ============================================================================
// Perceived stress
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

impl Banded for StressLevel {
    fn label(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low Stress",
            StressLevel::Moderate => "Moderate Stress",
            StressLevel::High => "High Perceived Stress",
        }
    }

    fn color(&self) -> Color {
        match self {
            StressLevel::Low => Color::Green,
            StressLevel::Moderate => Color::Yellow,
            StressLevel::High => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

// Scores are integers: 0-13, 14-26, 27-40
const PSS_BANDS: [Band<StressLevel>; 3] = [
    Band::up_to(13.0, StressLevel::Low),
    Band::up_to(26.0, StressLevel::Moderate),
    Band::rest(StressLevel::High),
];

pub fn classify_pss(total: u8) -> CalcResult<StressLevel> {
    scan(Metric::Pss, &PSS_BANDS, f64::from(total))
}

// ============================================================================
// Glycemia
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum A1cCategory {
    Normal,
    Prediabetes,
    Diabetes,
}

impl Banded for A1cCategory {
    fn label(&self) -> &'static str {
        match self {
            A1cCategory::Normal => "Normal",
            A1cCategory::Prediabetes => "Prediabetes",
            A1cCategory::Diabetes => "Diabetes",
        }
    }

    fn color(&self) -> Color {
        match self {
            A1cCategory::Normal => Color::Green,
            A1cCategory::Prediabetes => Color::Orange,
            A1cCategory::Diabetes => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const A1C_BANDS: [Band<A1cCategory>; 3] = [
    Band::below(5.7, A1cCategory::Normal),
    Band::below(6.5, A1cCategory::Prediabetes),
    Band::rest(A1cCategory::Diabetes),
];

pub fn classify_a1c(a1c_percent: f64) -> CalcResult<A1cCategory> {
    scan(Metric::A1c, &A1C_BANDS, a1c_percent)
}

/// Fasting plasma glucose category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseCategory {
    Low,
    Normal,
    Prediabetes,
    Diabetes,
}

impl Banded for GlucoseCategory {
    fn label(&self) -> &'static str {
        match self {
            GlucoseCategory::Low => "Low (Hypoglycemia)",
            GlucoseCategory::Normal => "Normal",
            GlucoseCategory::Prediabetes => "Prediabetes",
            GlucoseCategory::Diabetes => "Diabetes",
        }
    }

    fn color(&self) -> Color {
        match self {
            GlucoseCategory::Low => Color::Blue,
            GlucoseCategory::Normal => Color::Green,
            GlucoseCategory::Prediabetes => Color::Orange,
            GlucoseCategory::Diabetes => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const FASTING_GLUCOSE_BANDS: [Band<GlucoseCategory>; 4] = [
    Band::below(70.0, GlucoseCategory::Low),
    Band::below(100.0, GlucoseCategory::Normal),
    Band::below(126.0, GlucoseCategory::Prediabetes),
    Band::rest(GlucoseCategory::Diabetes),
];

/// Classify a fasting glucose reading in mg/dL
pub fn classify_fasting_glucose(mgdl: f64) -> CalcResult<GlucoseCategory> {
    scan(Metric::FastingGlucose, &FASTING_GLUCOSE_BANDS, mgdl)
}

// ============================================================================
// Sleep debt
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepDebtLevel {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl Banded for SleepDebtLevel {
    fn label(&self) -> &'static str {
        match self {
            SleepDebtLevel::Minimal => "Minimal Debt",
            SleepDebtLevel::Mild => "Mild Debt",
            SleepDebtLevel::Moderate => "Moderate Debt",
            SleepDebtLevel::Severe => "Severe Debt",
        }
    }

    fn color(&self) -> Color {
        match self {
            SleepDebtLevel::Minimal => Color::Green,
            SleepDebtLevel::Mild => Color::Yellow,
            SleepDebtLevel::Moderate => Color::Orange,
            SleepDebtLevel::Severe => Color::Red,
        }
    }

    fn ordinal(&self) -> u8 {
        *self as u8
    }
}

const SLEEP_DEBT_BANDS: [Band<SleepDebtLevel>; 4] = [
    Band::below(1.0, SleepDebtLevel::Minimal),
    Band::below(5.0, SleepDebtLevel::Mild),
    Band::below(10.0, SleepDebtLevel::Moderate),
    Band::rest(SleepDebtLevel::Severe),
];

/// Classify accumulated sleep debt in hours
pub fn classify_sleep_debt(debt_hours: f64) -> CalcResult<SleepDebtLevel> {
    scan(Metric::SleepDebt, &SLEEP_DEBT_BANDS, debt_hours)
}

// ============================================================================
// Dynamic entry point
// ============================================================================

/// Metric names accepted by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Bmi,
    /// Raw ABSI; converted to a z-score using sex and age
    Absi,
    AbsiZScore,
    WaistToHeight,
    WaistToHip,
    BodyFat,
    Wilks,
    Pss,
    A1c,
    FastingGlucose,
    SleepDebt,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Bmi => "bmi",
            Metric::Absi => "absi",
            Metric::AbsiZScore => "absi_z_score",
            Metric::WaistToHeight => "waist_to_height",
            Metric::WaistToHip => "waist_to_hip",
            Metric::BodyFat => "body_fat",
            Metric::Wilks => "wilks",
            Metric::Pss => "pss",
            Metric::A1c => "a1c",
            Metric::FastingGlucose => "fasting_glucose",
            Metric::SleepDebt => "sleep_debt",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bmi" => Ok(Metric::Bmi),
            "absi" => Ok(Metric::Absi),
            "absi_z_score" | "absi_z" => Ok(Metric::AbsiZScore),
            "waist_to_height" | "whtr" => Ok(Metric::WaistToHeight),
            "waist_to_hip" | "whr" => Ok(Metric::WaistToHip),
            "body_fat" | "rfm" => Ok(Metric::BodyFat),
            "wilks" => Ok(Metric::Wilks),
            "pss" => Ok(Metric::Pss),
            "a1c" => Ok(Metric::A1c),
            "fasting_glucose" | "glucose" => Ok(Metric::FastingGlucose),
            "sleep_debt" => Ok(Metric::SleepDebt),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

/// Person-level context some tables are keyed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationContext {
    #[serde(default)]
    pub sex: Option<BiologicalSex>,
    #[serde(default)]
    pub age_years: Option<u32>,
}

impl ClassificationContext {
    pub fn new(sex: BiologicalSex, age_years: u32) -> Self {
        ClassificationContext {
            sex: Some(sex),
            age_years: Some(age_years),
        }
    }

    pub fn for_sex(sex: BiologicalSex) -> Self {
        ClassificationContext {
            sex: Some(sex),
            age_years: None,
        }
    }

    fn sex(&self) -> CalcResult<BiologicalSex> {
        self.sex.ok_or_else(|| CalcError::invalid("sex", "required for this classification"))
    }

    fn age(&self) -> CalcResult<u32> {
        self.age_years
            .ok_or_else(|| CalcError::invalid("age_years", "required for this classification"))
    }
}

/// A classified value, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Category {
    pub metric: Metric,
    pub label: &'static str,
    pub color: Color,
    pub ordinal: u8,
}

impl Category {
    pub fn of<C: Banded>(metric: Metric, category: C) -> Self {
        Category {
            metric,
            label: category.label(),
            color: category.color(),
            ordinal: category.ordinal(),
        }
    }
}

/// Classify `value` for `metric`
///
/// Sex-specific tables require `context.sex`; raw ABSI also requires
/// `context.age_years`.
pub fn classify(metric: Metric, value: f64, context: &ClassificationContext) -> CalcResult<Category> {
    let category = match metric {
        Metric::Bmi => Category::of(metric, classify_bmi(value)?),
        Metric::Absi => {
            let z = absi_z_score(value, context.sex()?, context.age()?)?;
            Category::of(metric, classify_absi_z(z)?)
        }
        Metric::AbsiZScore => Category::of(metric, classify_absi_z(value)?),
        Metric::WaistToHeight => Category::of(metric, classify_whtr(value)?),
        Metric::WaistToHip => Category::of(metric, classify_whr(value, context.sex()?)?),
        Metric::BodyFat => Category::of(metric, classify_body_fat(value, context.sex()?)?),
        Metric::Wilks => Category::of(metric, classify_wilks(value, context.sex()?)?),
        Metric::Pss => {
            if value.fract() != 0.0 || !(0.0..=40.0).contains(&value) {
                return Err(CalcError::invalid("value", "PSS total must be a whole number from 0 to 40"));
            }
            Category::of(metric, classify_pss(value as u8)?)
        }
        Metric::A1c => Category::of(metric, classify_a1c(value)?),
        Metric::FastingGlucose => Category::of(metric, classify_fasting_glucose(value)?),
        Metric::SleepDebt => Category::of(metric, classify_sleep_debt(value)?),
    };
    Ok(category)
}
