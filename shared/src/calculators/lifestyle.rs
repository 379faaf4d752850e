//! Sleep, stress and calendar calculators

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{CalculatorKind, Report};
use crate::classification::{classify_pss, classify_sleep_debt, Category, Metric, SleepDebtLevel, StressLevel};
use crate::config::EngineConfig;
use crate::errors::CalcResult;
use crate::formulas::dates::{age_on, birthday_countdown, days_lived, weekday_name, BirthdayCountdown, CalendarSpan};
use crate::formulas::sleep::{cycle_options, parse_clock, recovery_nights, sleep_debt_minutes, CycleOption, SleepMode};
use crate::formulas::stress::{score_pss, PssScore};
use crate::formulas::Formula;
use crate::inputs::{AgeInput, Normalize, PssInput, SleepCycleInput, SleepDebtInput};
use crate::reference::{birthstone, zodiac_sign, ZodiacSign};
use crate::results::{FormulaOutput, FormulaResult};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// ============================================================================
// Sleep cycles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepCycleReport {
    pub mode: SleepMode,
    pub target: NaiveDateTime,
    pub latency_minutes: u32,
    pub cycle_minutes: u32,
    /// One entry per configured cycle count, in that order
    pub options: Vec<CycleOption>,
}

pub fn compute_sleep_cycle(input: &SleepCycleInput, config: &EngineConfig) -> CalcResult<SleepCycleReport> {
    let input = input.prepare()?;
    let target = input.date.and_time(parse_clock(&input.time)?);
    let latency_minutes = input.latency_minutes.unwrap_or(config.sleep.default_latency_minutes);
    let options = cycle_options(
        input.mode,
        target,
        latency_minutes,
        config.sleep.cycle_minutes,
        &config.sleep.cycle_counts,
    )?;

    Ok(SleepCycleReport {
        mode: input.mode,
        target,
        latency_minutes,
        cycle_minutes: config.sleep.cycle_minutes,
        options,
    })
}

impl Report for SleepCycleReport {
    fn formula_result(&self) -> FormulaResult {
        let label = match self.mode {
            SleepMode::WakeAt => "bedtime",
            SleepMode::SleepAt | SleepMode::Now => "wake_time",
        };

        self.options.iter().fold(
            FormulaResult::new(CalculatorKind::SleepCycle)
                .output(FormulaOutput::new("latency", f64::from(self.latency_minutes), Formula::SleepCycles).unit("min").whole())
                .output(FormulaOutput::new("cycle_length", f64::from(self.cycle_minutes), Formula::SleepCycles).unit("min").whole())
                .detail("target", self.target.format(TIME_FORMAT).to_string()),
            |result, option| {
                result.detail(
                    label,
                    format!(
                        "{} ({} cycles, {:.1} h, {})",
                        option.time.format(TIME_FORMAT),
                        option.cycles,
                        f64::from(option.sleep_minutes) / 60.0,
                        option.quality.description()
                    ),
                )
            },
        )
    }

    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

// ============================================================================
// Sleep debt
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepDebtReport {
    pub debt_minutes: f64,
    pub debt_hours: f64,
    pub average_hours: f64,
    /// Nights of extra sleep at the configured rate
    pub recovery_nights: u32,
    pub level: SleepDebtLevel,
}

pub fn compute_sleep_debt(input: &SleepDebtInput, config: &EngineConfig) -> CalcResult<SleepDebtReport> {
    let input = input.prepare()?;
    let debt_minutes = sleep_debt_minutes(input.target_hours, &input.nights)?;
    let debt_hours = debt_minutes / 60.0;

    Ok(SleepDebtReport {
        debt_minutes,
        debt_hours,
        average_hours: input.nights.iter().sum::<f64>() / input.nights.len() as f64,
        recovery_nights: recovery_nights(debt_minutes, config.sleep_debt.recovery_minutes_per_night)?,
        level: classify_sleep_debt(debt_hours)?,
    })
}

impl Report for SleepDebtReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::SleepDebt)
            .output(FormulaOutput::new("debt_hours", self.debt_hours, Formula::SleepDebt).unit("h"))
            .output(FormulaOutput::new("debt_minutes", self.debt_minutes, Formula::SleepDebt).unit("min").whole())
            .output(FormulaOutput::new("average_sleep", self.average_hours, Formula::Derived).unit("h"))
            .output(FormulaOutput::new("recovery_nights", f64::from(self.recovery_nights), Formula::Derived).whole())
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::of(Metric::SleepDebt, self.level)]
    }
}

// ============================================================================
// Perceived Stress Scale
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PssReport {
    pub score: PssScore,
    pub level: StressLevel,
}

pub fn compute_pss(input: &PssInput) -> CalcResult<PssReport> {
    let input = input.prepare()?;
    let score = score_pss(&input.answers)?;
    Ok(PssReport {
        score,
        level: classify_pss(score.total)?,
    })
}

impl Report for PssReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::Pss)
            .output(FormulaOutput::new("total", f64::from(self.score.total), Formula::Pss10).whole())
            .output(FormulaOutput::new("helplessness", f64::from(self.score.helplessness), Formula::Pss10).whole())
            .output(FormulaOutput::new("self_efficacy", f64::from(self.score.self_efficacy), Formula::Pss10).whole())
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::of(Metric::Pss, self.level)]
    }
}

// ============================================================================
// Age and birthday
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeReport {
    pub age: CalendarSpan,
    pub days_lived: i64,
    pub next_birthday: BirthdayCountdown,
    pub birth_weekday: &'static str,
    pub zodiac: ZodiacSign,
    pub birthstone: &'static str,
}

pub fn compute_age(input: &AgeInput) -> CalcResult<AgeReport> {
    let input = input.prepare()?;
    let birth: NaiveDate = input.birth_date;
    Ok(AgeReport {
        age: age_on(birth, input.reference_date)?,
        days_lived: days_lived(birth, input.reference_date)?,
        next_birthday: birthday_countdown(birth, input.reference_date)?,
        birth_weekday: weekday_name(birth),
        zodiac: zodiac_sign(birth.month(), birth.day()),
        birthstone: birthstone(birth.month()),
    })
}

impl Report for AgeReport {
    fn formula_result(&self) -> FormulaResult {
        let countdown = &self.next_birthday;
        FormulaResult::new(CalculatorKind::Age)
            .output(FormulaOutput::new("years", f64::from(self.age.years), Formula::CalendarAge).whole())
            .output(FormulaOutput::new("months", f64::from(self.age.months), Formula::CalendarAge).whole())
            .output(FormulaOutput::new("days", f64::from(self.age.days), Formula::CalendarAge).whole())
            .output(FormulaOutput::new("days_lived", self.days_lived as f64, Formula::CalendarAge).whole())
            .output(FormulaOutput::new("birthday_months", f64::from(countdown.months), Formula::CalendarAge).whole())
            .output(FormulaOutput::new("birthday_days", f64::from(countdown.days), Formula::CalendarAge).whole())
            .output(FormulaOutput::new("days_to_birthday", countdown.total_days as f64, Formula::CalendarAge).whole())
            .output(FormulaOutput::new("turning", f64::from(countdown.turning), Formula::CalendarAge).whole())
            .detail("next_birthday", countdown.date.format("%Y-%m-%d").to_string())
            .detail("birth_weekday", self.birth_weekday)
            .detail("zodiac", self.zodiac.name())
            .detail("birthstone", self.birthstone)
    }

    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::formulas::sleep::CycleQuality;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sleep_input(mode: SleepMode, time: &str) -> SleepCycleInput {
        SleepCycleInput {
            mode,
            date: date(2024, 3, 10),
            time: time.to_string(),
            latency_minutes: None,
        }
    }

    // =========================================================================
    // Sleep cycles
    // =========================================================================

    #[test]
    fn test_wake_at_rolls_back_past_midnight() {
        let report = compute_sleep_cycle(&sleep_input(SleepMode::WakeAt, "00:30"), &EngineConfig::default()).unwrap();
        assert_eq!(report.latency_minutes, 15);
        let five = report.options.iter().find(|option| option.cycles == 5).unwrap();
        assert_eq!(five.time, date(2024, 3, 9).and_hms_opt(16, 45, 0).unwrap());
        assert_eq!(five.quality, CycleQuality::Optimal);
    }

    #[test]
    fn test_sleep_at_rolls_forward() {
        let input = SleepCycleInput {
            latency_minutes: Some(0),
            ..sleep_input(SleepMode::SleepAt, "11:30 PM")
        };
        let report = compute_sleep_cycle(&input, &EngineConfig::default()).unwrap();
        // 4 cycles after 23:30
        assert_eq!(report.options[1].time, date(2024, 3, 11).and_hms_opt(5, 30, 0).unwrap());
        let result = report.formula_result();
        assert_eq!(result.details.len(), 1 + report.options.len());
        assert_eq!(result.details[1].name, "wake_time");
    }

    #[test]
    fn test_sleep_cycle_uses_configured_counts() {
        let mut config = EngineConfig::default();
        config.sleep.cycle_counts = vec![5, 6];
        let report = compute_sleep_cycle(&sleep_input(SleepMode::WakeAt, "07:00"), &config).unwrap();
        assert_eq!(report.options.len(), 2);
        assert_eq!(report.formula_result().details[1].value, "2024-03-09 23:15 (5 cycles, 7.5 h, Recommended)");
    }

    #[test]
    fn test_sleep_cycle_rejects_bad_clock() {
        let result = compute_sleep_cycle(&sleep_input(SleepMode::Now, "25:99"), &EngineConfig::default());
        assert!(matches!(result, Err(CalcError::InvalidTime(_))));
    }

    // =========================================================================
    // Sleep debt
    // =========================================================================

    #[test]
    fn test_sleep_debt_report() {
        let input = SleepDebtInput {
            target_hours: 8.0,
            nights: vec![6.0, 7.0, 9.0, 5.5, 8.0],
        };
        let report = compute_sleep_debt(&input, &EngineConfig::default()).unwrap();
        // 2 + 1 + 0 + 2.5 + 0 hours; the 9 h night repays nothing
        assert_eq!(report.debt_hours, 5.5);
        assert_eq!(report.recovery_nights, 6);
        assert_eq!(report.level, SleepDebtLevel::Moderate);
        assert!((report.average_hours - 7.1).abs() < 1e-9);
    }

    #[test]
    fn test_sleep_debt_recovery_rate_from_config() {
        let mut config = EngineConfig::default();
        config.sleep_debt.recovery_minutes_per_night = 30;
        let input = SleepDebtInput {
            target_hours: 8.0,
            nights: vec![7.0],
        };
        let report = compute_sleep_debt(&input, &config).unwrap();
        assert_eq!(report.recovery_nights, 2);
        assert_eq!(report.level, SleepDebtLevel::Mild);
    }

    // =========================================================================
    // PSS
    // =========================================================================

    #[test]
    fn test_pss_all_twos_is_moderate() {
        let report = compute_pss(&PssInput { answers: vec![2; 10] }).unwrap();
        assert_eq!(report.score.total, 20);
        assert_eq!(report.level, StressLevel::Moderate);
        assert_eq!(report.categories()[0].label, "Moderate Stress");
        assert_eq!(report.formula_result().get("total"), Some(20.0));
    }

    #[test]
    fn test_pss_subscales_sum_to_total() {
        let report = compute_pss(&PssInput {
            answers: vec![4, 3, 4, 0, 1, 3, 0, 1, 4, 3],
        })
        .unwrap();
        assert_eq!(report.score.helplessness + report.score.self_efficacy, report.score.total);
        assert_eq!(report.level, StressLevel::High);
    }

    // =========================================================================
    // Age
    // =========================================================================

    #[test]
    fn test_age_report() {
        let input = AgeInput {
            birth_date: date(1990, 7, 15),
            reference_date: date(2024, 3, 10),
        };
        let report = compute_age(&input).unwrap();
        assert_eq!((report.age.years, report.age.months, report.age.days), (33, 7, 24));
        assert_eq!(report.next_birthday.date, date(2024, 7, 15));
        assert_eq!(report.next_birthday.turning, 34);
        assert_eq!(report.next_birthday.total_days, 127);
        assert_eq!(report.birth_weekday, "Sunday");
        assert_eq!(report.zodiac, ZodiacSign::Cancer);
        assert_eq!(report.birthstone, "Ruby");
    }

    #[test]
    fn test_leap_day_birthday_in_common_year() {
        let input = AgeInput {
            birth_date: date(2000, 2, 29),
            reference_date: date(2023, 1, 1),
        };
        let report = compute_age(&input).unwrap();
        assert_eq!(report.next_birthday.date, date(2023, 2, 28));
        assert_eq!(report.formula_result().details[0].value, "2023-02-28");
    }

    #[test]
    fn test_reference_before_birth_rejected() {
        let input = AgeInput {
            birth_date: date(2000, 1, 1),
            reference_date: date(1999, 12, 31),
        };
        assert!(matches!(compute_age(&input), Err(CalcError::InvalidTime(_))));
    }
}
