pub mod nutrition;
pub mod trend;

pub use nutrition::{
    daily_progress, recent_nutrition, week_over_week, weekly_nutrition, DailyNutrition, MacroProgress,
    MacroTargets, NutritionComparison, NutritionTotals,
};
pub use trend::{key_trends, trend, KeyTrend, KEY_TREND_METRICS};
