//! Sleep cycle timing and sleep debt
//!
//! Times are full date-times so that adding or subtracting several hours
//! rolls across midnight onto the correct calendar day.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Length of one sleep cycle in minutes
pub const CYCLE_MINUTES: u32 = 90;

/// Cycle counts offered by the calculator
pub const DEFAULT_CYCLE_COUNTS: [u32; 4] = [3, 4, 5, 6];

/// Most cycles a single suggestion may span
pub const MAX_CYCLES: u32 = 12;

/// Longest configurable cycle in minutes
pub const MAX_CYCLE_MINUTES: u32 = 180;

/// What the target time means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepMode {
    /// Target is the wake-up time; suggest bedtimes
    WakeAt,
    /// Target is the bedtime; suggest wake-up times
    SleepAt,
    /// Target is the current time; suggest wake-up times
    Now,
}

/// How restful a given number of complete cycles is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleQuality {
    Insufficient,
    Minimal,
    Adequate,
    Optimal,
    Extended,
}

impl CycleQuality {
    pub fn for_cycles(cycles: u32) -> Self {
        match cycles {
            0..=2 => CycleQuality::Insufficient,
            3 => CycleQuality::Minimal,
            4 => CycleQuality::Adequate,
            5 | 6 => CycleQuality::Optimal,
            _ => CycleQuality::Extended,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CycleQuality::Insufficient => "Insufficient",
            CycleQuality::Minimal => "Minimum",
            CycleQuality::Adequate => "Adequate",
            CycleQuality::Optimal => "Recommended",
            CycleQuality::Extended => "Extended",
        }
    }
}

/// One suggested bedtime or wake-up time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleOption {
    pub cycles: u32,
    /// Bedtime in `WakeAt` mode, wake-up time otherwise
    pub time: NaiveDateTime,
    /// Time actually asleep
    pub sleep_minutes: u32,
    pub quality: CycleQuality,
}

/// Parse a clock time such as "07:30", "7:30", "19:05" or "7:30 AM"
pub fn parse_clock(raw: &str) -> CalcResult<NaiveTime> {
    let trimmed = raw.trim();
    ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| CalcError::InvalidTime(format!("unrecognized clock time '{raw}'")))
}

/// Candidate times for each cycle count
///
/// `WakeAt` subtracts `cycles × cycle_minutes + latency` from the target;
/// the other modes add `latency + cycles × cycle_minutes`.
pub fn cycle_options(
    mode: SleepMode,
    target: NaiveDateTime,
    latency_minutes: u32,
    cycle_minutes: u32,
    cycle_counts: &[u32],
) -> CalcResult<Vec<CycleOption>> {
    if cycle_minutes == 0 {
        return Err(CalcError::invalid("cycle_minutes", "must be positive"));
    }

    cycle_counts
        .iter()
        .map(|&cycles| {
            let sleep_minutes = cycles
                .checked_mul(cycle_minutes)
                .ok_or_else(|| CalcError::invalid("cycle_counts", format!("{cycles} cycles is out of range")))?;
            let offset = Duration::minutes(i64::from(sleep_minutes) + i64::from(latency_minutes));
            let time = match mode {
                SleepMode::WakeAt => target.checked_sub_signed(offset),
                SleepMode::SleepAt | SleepMode::Now => target.checked_add_signed(offset),
            }
            .ok_or_else(|| CalcError::InvalidTime("result is outside the supported calendar".to_string()))?;

            Ok(CycleOption {
                cycles,
                time,
                sleep_minutes,
                quality: CycleQuality::for_cycles(cycles),
            })
        })
        .collect()
}

/// Accumulated sleep debt in minutes
///
/// Each night short of `target_hours` adds its shortfall. Nights above the
/// target do not pay debt back.
pub fn sleep_debt_minutes(target_hours: f64, nights_hours: &[f64]) -> CalcResult<f64> {
    if !target_hours.is_finite() || target_hours <= 0.0 || target_hours > 24.0 {
        return Err(CalcError::invalid("target_hours", "must be between 0 and 24"));
    }
    if nights_hours.is_empty() {
        return Err(CalcError::invalid("nights", "at least one night is required"));
    }

    nights_hours.iter().try_fold(0.0, |debt, &hours| {
        if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
            return Err(CalcError::invalid("nights", format!("{hours} is not a valid number of hours")));
        }
        Ok(debt + (target_hours - hours).max(0.0) * 60.0)
    })
}

/// Nights of extra sleep needed to repay `debt_minutes`
pub fn recovery_nights(debt_minutes: f64, recovery_minutes_per_night: u32) -> CalcResult<u32> {
    if recovery_minutes_per_night == 0 {
        return Err(CalcError::invalid("recovery_minutes_per_night", "must be positive"));
    }
    if debt_minutes <= 0.0 {
        return Ok(0);
    }
    Ok((debt_minutes / f64::from(recovery_minutes_per_night)).ceil() as u32)
}
