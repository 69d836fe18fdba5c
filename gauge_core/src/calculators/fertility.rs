//! # Fertility / Ovulation
//!
//! Calendar predictions from the first day of the last period: ovulation
//! falls one luteal phase before the next period, the fertile window spans
//! the five days before ovulation through the day after, and the due date
//! follows Naegele's rule adjusted for cycle length.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engine::{Calculator, FieldSpec, PresentedResult};
use crate::errors::FieldError;
use crate::formulas::Formula;
use crate::settings::Settings;

/// Luteal phase when none is given, days
pub const DEFAULT_LUTEAL_PHASE: u32 = 14;
/// Days the fertile window opens before ovulation
pub const FERTILE_DAYS_BEFORE: u64 = 5;
/// Days the fertile window stays open after ovulation
pub const FERTILE_DAYS_AFTER: u64 = 1;
/// Gestation from LMP for a 28-day cycle, days
pub const GESTATION_DAYS: u64 = 280;
/// Cycles listed after the current one
pub const UPCOMING_CYCLES: u32 = 3;

const REFERENCE_CYCLE: u32 = 28;
const EARLIEST_YEAR: i32 = 1900;
const LATEST_YEAR: i32 = 2200;
const DISPLAY_FORMAT: &str = "%b %-d, %Y";

fn default_luteal_phase() -> u32 {
    DEFAULT_LUTEAL_PHASE
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Predictions for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePrediction {
    pub period_start: NaiveDate,
    pub ovulation: NaiveDate,
    pub fertile_window: DateWindow,
}

/// Cycle starting on `period_start`.
pub fn predict_cycle(period_start: NaiveDate, cycle_length: u32, luteal_phase: u32) -> CyclePrediction {
    let ovulation = period_start + Days::new(u64::from(cycle_length.saturating_sub(luteal_phase)));
    CyclePrediction {
        period_start,
        ovulation,
        fertile_window: DateWindow {
            start: ovulation - Days::new(FERTILE_DAYS_BEFORE),
            end: ovulation + Days::new(FERTILE_DAYS_AFTER),
        },
    }
}

/// LMP + 280 days, shifted by the cycle's difference from 28 days
pub fn due_date(last_period: NaiveDate, cycle_length: u32) -> NaiveDate {
    let base = last_period + Days::new(GESTATION_DAYS);
    if cycle_length >= REFERENCE_CYCLE {
        base + Days::new(u64::from(cycle_length - REFERENCE_CYCLE))
    } else {
        base - Days::new(u64::from(REFERENCE_CYCLE - cycle_length))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilityInput {
    /// First day of the last menstrual period
    pub last_period: NaiveDate,
    pub cycle_length: u32,
    #[serde(default = "default_luteal_phase")]
    pub luteal_phase: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilityOutput {
    pub ovulation: NaiveDate,
    pub fertile_window: DateWindow,
    pub next_period: NaiveDate,
    pub due_date: NaiveDate,
    /// The cycles after the current one
    pub upcoming: Vec<CyclePrediction>,
}

pub struct FertilityCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::date("last_period", "First day of last period"),
    FieldSpec::integer("cycle_length", "Cycle length", 21, 45).with_unit("days"),
    FieldSpec::integer("luteal_phase", "Luteal phase", 9, 16)
        .with_unit("days")
        .optional(),
];

impl Calculator for FertilityCalculator {
    const ID: &'static str = "fertility";
    const TITLE: &'static str = "Ovulation & Fertility Calculator";

    type Input = FertilityInput;
    type Output = FertilityOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> FertilityInput {
        FertilityInput {
            last_period: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            cycle_length: REFERENCE_CYCLE,
            luteal_phase: DEFAULT_LUTEAL_PHASE,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::OvulationDay, Formula::NaegeleDueDate]
    }

    fn cross_check(input: &FertilityInput) -> Vec<FieldError> {
        let year = input.last_period.year();
        if (EARLIEST_YEAR..=LATEST_YEAR).contains(&year) {
            Vec::new()
        } else {
            vec![FieldError::constraint(
                "last_period",
                format!("Last period must fall between {} and {}", EARLIEST_YEAR, LATEST_YEAR),
            )]
        }
    }

    fn estimate(input: &FertilityInput) -> FertilityOutput {
        let current = predict_cycle(input.last_period, input.cycle_length, input.luteal_phase);
        let next_period = input.last_period + Days::new(u64::from(input.cycle_length));

        let upcoming = (1..=UPCOMING_CYCLES)
            .map(|k| {
                let start = input.last_period + Days::new(u64::from(k * input.cycle_length));
                predict_cycle(start, input.cycle_length, input.luteal_phase)
            })
            .collect();

        FertilityOutput {
            ovulation: current.ovulation,
            fertile_window: current.fertile_window,
            next_period,
            due_date: due_date(input.last_period, input.cycle_length),
            upcoming,
        }
    }

    fn present(output: &FertilityOutput, _settings: &Settings) -> PresentedResult {
        let day = |date: NaiveDate| date.format(DISPLAY_FORMAT).to_string();
        let window = |w: &DateWindow| format!("{} - {}", day(w.start), day(w.end));

        let mut presented = PresentedResult::new(Self::ID, Self::TITLE, day(output.ovulation))
            .line("ovulation", "Estimated ovulation", day(output.ovulation))
            .line("fertile_window", "Fertile window", window(&output.fertile_window))
            .line("next_period", "Next period", day(output.next_period))
            .line("due_date", "Due date if conceived this cycle", day(output.due_date));

        for (i, cycle) in output.upcoming.iter().enumerate() {
            presented = presented.line(
                format!("cycle_{}", i + 2),
                format!("Cycle starting {}", day(cycle.period_start)),
                format!("fertile {}", window(&cycle.fertile_window)),
            );
        }

        presented.note("Calendar predictions assume regular cycles and are not contraception")
    }
}
