//! Meal aggregation for the nutrition charts.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::models::Meal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    /// Missing nutrients add nothing.
    pub fn add(&mut self, meal: &Meal) {
        self.calories += meal.calories.unwrap_or(0.0);
        self.protein += meal.protein.unwrap_or(0.0);
        self.carbs += meal.carbs.unwrap_or(0.0);
        self.fat += meal.fat.unwrap_or(0.0);
    }

    pub fn of<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        let mut totals = Self::default();
        for meal in meals {
            totals.add(meal);
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub day: String,
    #[serde(flatten)]
    pub totals: NutritionTotals,
}

/// Per-day totals for meals in the last `window_days` days up to `now`,
/// oldest day first. Days without meals are omitted.
pub fn weekly_nutrition(meals: &[Meal], now: NaiveDateTime, window_days: u32) -> Vec<DailyNutrition> {
    let since = now - Duration::days(i64::from(window_days));

    let mut by_day: BTreeMap<NaiveDate, NutritionTotals> = BTreeMap::new();
    for meal in meals
        .iter()
        .filter(|m| m.consumed_at >= since && m.consumed_at <= now)
    {
        by_day.entry(meal.consumed_at.date()).or_default().add(meal);
    }

    by_day
        .into_iter()
        .map(|(date, totals)| DailyNutrition {
            date,
            day: date.format("%a").to_string(),
            totals,
        })
        .collect()
}

/// `weekly_nutrition` over `MonitorConfig::nutrition_window_days`.
pub fn recent_nutrition(meals: &[Meal], now: NaiveDateTime, config: &MonitorConfig) -> Vec<DailyNutrition> {
    weekly_nutrition(meals, now, config.nutrition_window_days)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionComparison {
    pub current: NutritionTotals,
    pub previous: NutritionTotals,
    /// `None` when the previous week logged no calories.
    pub calorie_change_pct: Option<f64>,
}

/// The last 7 days against the 7 days before them.
pub fn week_over_week(meals: &[Meal], now: NaiveDateTime) -> NutritionComparison {
    let week_start = now - Duration::days(7);
    let prev_start = week_start - Duration::days(7);

    let current = NutritionTotals::of(
        meals
            .iter()
            .filter(|m| m.consumed_at >= week_start && m.consumed_at <= now),
    );
    let previous = NutritionTotals::of(
        meals
            .iter()
            .filter(|m| m.consumed_at >= prev_start && m.consumed_at < week_start),
    );

    let calorie_change_pct = (previous.calories > 0.0)
        .then(|| (current.calories - previous.calories) / previous.calories * 100.0);

    NutritionComparison {
        current,
        previous,
        calorie_change_pct,
    }
}

/// Daily macro goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroTargets {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 250.0,
            fat: 65.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub consumed: NutritionTotals,
    pub targets: MacroTargets,
    pub calories_pct: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

/// Consumed totals against targets. Pass one day's meals.
pub fn daily_progress(meals: &[Meal], targets: MacroTargets) -> MacroProgress {
    let consumed = NutritionTotals::of(meals);
    MacroProgress {
        calories_pct: percent(consumed.calories, targets.calories),
        protein_pct: percent(consumed.protein, targets.protein),
        carbs_pct: percent(consumed.carbs, targets.carbs),
        fat_pct: percent(consumed.fat, targets.fat),
        consumed,
        targets,
    }
}

fn percent(consumed: f64, target: f64) -> f64 {
    if target > 0.0 {
        consumed / target * 100.0
    } else {
        0.0
    }
}
