//! Growth stage resolution
//!
//! A crop's stage is never stored. It is derived from the crop type, the
//! sowing date and the caller-supplied "now", using per-crop day counts.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{DomainError, DomainResult};
use crate::models::{CropType, GrowthStage};

/// Exclusive upper bounds, in days after sowing, of the sowing, vegetative,
/// flowering and maturity stages. Anything past the last bound is harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageThresholds(pub [i64; 4]);

impl StageThresholds {
    pub fn stage_at(&self, elapsed_days: i64) -> GrowthStage {
        let [sowing, vegetative, flowering, maturity] = self.0;
        if elapsed_days < sowing {
            GrowthStage::Sowing
        } else if elapsed_days < vegetative {
            GrowthStage::Vegetative
        } else if elapsed_days < flowering {
            GrowthStage::Flowering
        } else if elapsed_days < maturity {
            GrowthStage::Maturity
        } else {
            GrowthStage::Harvest
        }
    }

    /// First day (after sowing) on which `stage` begins
    pub fn stage_start(&self, stage: GrowthStage) -> i64 {
        match stage {
            GrowthStage::Sowing => 0,
            GrowthStage::Vegetative => self.0[0],
            GrowthStage::Flowering => self.0[1],
            GrowthStage::Maturity => self.0[2],
            GrowthStage::Harvest => self.0[3],
        }
    }
}

/// Day-count table for a crop
pub fn thresholds_for(crop_type: CropType) -> StageThresholds {
    match crop_type {
        CropType::Rice => StageThresholds([25, 60, 90, 110]),
        CropType::Wheat => StageThresholds([20, 70, 100, 125]),
        CropType::Sugarcane => StageThresholds([30, 150, 240, 330]),
        CropType::Cotton => StageThresholds([15, 60, 110, 150]),
        CropType::Maize => StageThresholds([15, 50, 80, 110]),
        CropType::Pulses => StageThresholds([15, 45, 75, 100]),
        CropType::Vegetables => StageThresholds([10, 40, 70, 90]),
    }
}

/// Table used for crop names that are not in the closed set
pub const FALLBACK_CROP_TYPE: CropType = CropType::Vegetables;

/// Whole days elapsed since sowing, truncated. Negative for future dates.
pub fn elapsed_days(sowing_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    now.date_naive().signed_duration_since(sowing_date).num_days()
}

/// Resolve the stage of a crop sown on `sowing_date` as of `now`.
///
/// A sowing date in the future resolves to [`GrowthStage::Sowing`].
pub fn resolve_stage(crop_type: CropType, sowing_date: NaiveDate, now: DateTime<Utc>) -> GrowthStage {
    thresholds_for(crop_type).stage_at(elapsed_days(sowing_date, now))
}

/// Days remaining until the next stage begins, `None` at harvest
pub fn days_until_next_stage(
    crop_type: CropType,
    sowing_date: NaiveDate,
    now: DateTime<Utc>,
) -> Option<i64> {
    let thresholds = thresholds_for(crop_type);
    let elapsed = elapsed_days(sowing_date, now);
    let next = thresholds.stage_at(elapsed).next()?;
    Some(thresholds.stage_start(next) - elapsed)
}

/// Parse a stored sowing date ("YYYY-MM-DD", optionally followed by a time)
pub fn parse_sowing_date(raw: &str) -> DomainResult<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidSowingDate(raw.to_string()))
}

/// Resolve from untyped input, reporting unknown crops and bad dates
pub fn try_resolve_stage(
    raw_crop_type: &str,
    raw_sowing_date: &str,
    now: DateTime<Utc>,
) -> DomainResult<GrowthStage> {
    let crop_type: CropType = raw_crop_type.parse()?;
    let sowing_date = parse_sowing_date(raw_sowing_date)?;
    Ok(resolve_stage(crop_type, sowing_date, now))
}

/// Resolve from untyped input without failing: unknown crops use the
/// vegetables table and unparseable dates resolve to sowing.
pub fn resolve_stage_lenient(
    raw_crop_type: &str,
    raw_sowing_date: &str,
    now: DateTime<Utc>,
) -> GrowthStage {
    let crop_type = raw_crop_type.parse().unwrap_or(FALLBACK_CROP_TYPE);
    match parse_sowing_date(raw_sowing_date) {
        Ok(sowing_date) => resolve_stage(crop_type, sowing_date, now),
        Err(_) => GrowthStage::Sowing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap()
    }

    fn sown_days_ago(days: i64) -> NaiveDate {
        now().date_naive() - Duration::days(days)
    }

    #[test]
    fn test_rice_forty_days_is_vegetative() {
        assert_eq!(
            resolve_stage(CropType::Rice, sown_days_ago(40), now()),
            GrowthStage::Vegetative
        );
    }

    #[test]
    fn test_boundary_day_belongs_to_later_stage() {
        let rice = [
            (24, GrowthStage::Sowing),
            (25, GrowthStage::Vegetative),
            (59, GrowthStage::Vegetative),
            (60, GrowthStage::Flowering),
            (90, GrowthStage::Maturity),
            (109, GrowthStage::Maturity),
            (110, GrowthStage::Harvest),
        ];
        for (days, expected) in rice {
            assert_eq!(
                resolve_stage(CropType::Rice, sown_days_ago(days), now()),
                expected,
                "rice at day {}",
                days
            );
        }
    }

    #[test]
    fn test_future_sowing_date_is_sowing() {
        let future = now().date_naive() + Duration::days(12);
        assert_eq!(elapsed_days(future, now()), -12);
        assert_eq!(resolve_stage(CropType::Wheat, future, now()), GrowthStage::Sowing);
    }

    #[test]
    fn test_elapsed_days_across_year_rollover() {
        let sowing = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 5, 0).unwrap();
        assert_eq!(elapsed_days(sowing, now), 1);
    }

    #[test]
    fn test_days_until_next_stage() {
        assert_eq!(
            days_until_next_stage(CropType::Rice, sown_days_ago(40), now()),
            Some(20)
        );
        assert_eq!(
            days_until_next_stage(CropType::Rice, sown_days_ago(200), now()),
            None
        );
    }

    #[test]
    fn test_try_resolve_reports_unknown_crop() {
        assert!(matches!(
            try_resolve_stage("banana", "2026-09-01", now()),
            Err(DomainError::UnknownCropType(_))
        ));
        assert!(matches!(
            try_resolve_stage("rice", "not a date", now()),
            Err(DomainError::InvalidSowingDate(_))
        ));
        assert_eq!(
            try_resolve_stage("rice", "2026-09-08", now()).unwrap(),
            GrowthStage::Vegetative
        );
    }

    #[test]
    fn test_lenient_resolution_falls_back() {
        // 45 days: vegetables table says flowering, rice would say vegetative
        let sowing = sown_days_ago(45).format("%Y-%m-%d").to_string();
        assert_eq!(resolve_stage_lenient("banana", &sowing, now()), GrowthStage::Flowering);
        assert_eq!(resolve_stage_lenient("rice", "", now()), GrowthStage::Sowing);
        assert_eq!(resolve_stage_lenient("rice", "garbage", now()), GrowthStage::Sowing);
    }

    #[test]
    fn test_parse_sowing_date_accepts_timestamps() {
        assert_eq!(
            parse_sowing_date("2026-09-01T00:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
    }
}
