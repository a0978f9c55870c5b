use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::money::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(at: &DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Short axis label such as `Jan/24`.
    pub fn short_label(&self) -> String {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let name = NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        format!("{}/{:02}", name, self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketMode {
    Count,
    Sum,
}

/// A row with a creation time and, for orders, an amount.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TimestampedRecord {
    #[serde(default, rename = "created_at")]
    pub timestamp: Option<String>,
    #[serde(default, rename = "total")]
    pub amount: Option<Money>,
}

#[cfg(test)]
impl TimestampedRecord {
    pub fn new(timestamp: &str, amount: Option<Money>) -> Self {
        Self {
            timestamp: Some(timestamp.to_string()),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: MonthKey,
    pub value: Decimal,
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    // Postgres text output: space separator, short offset (`+00`).
    if let Ok(at) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// One bucket per month present in `records`, ascending. Months without
/// records are not synthesized.
pub fn bucket_by_month(records: &[TimestampedRecord], mode: BucketMode) -> Vec<MonthBucket> {
    let mut months: BTreeMap<MonthKey, Decimal> = BTreeMap::new();
    for record in records {
        let Some(at) = record.timestamp.as_deref().and_then(parse_timestamp) else {
            tracing::debug!(timestamp = ?record.timestamp, "skipping record without a usable timestamp");
            continue;
        };
        let step = match mode {
            BucketMode::Count => Decimal::ONE,
            BucketMode::Sum => record.amount.map(|m| m.amount()).unwrap_or(Decimal::ZERO),
        };
        *months.entry(MonthKey::of(&at)).or_insert(Decimal::ZERO) += step;
    }
    months
        .into_iter()
        .map(|(month, value)| MonthBucket { month, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(year: i32, month: u32) -> MonthKey {
        MonthKey { year, month }
    }

    #[test]
    fn counts_per_month_without_filling_gaps() {
        let records = vec![
            TimestampedRecord::new("2024-03-02T09:00:00Z", None),
            TimestampedRecord::new("2024-01-05T10:00:00+00:00", None),
            TimestampedRecord::new("2024-01-20T10:00:00+00:00", None),
        ];
        let buckets = bucket_by_month(&records, BucketMode::Count);
        assert_eq!(
            buckets,
            vec![
                MonthBucket { month: key(2024, 1), value: Decimal::from(2) },
                MonthBucket { month: key(2024, 3), value: Decimal::from(1) },
            ]
        );
        assert_eq!(buckets[0].month.to_string(), "2024-01");
    }

    #[test]
    fn sums_amounts_and_keeps_months_with_missing_amounts() {
        let records = vec![
            TimestampedRecord::new("2023-12-31T12:00:00Z", Some(Money::from_cents(10_050))),
            TimestampedRecord::new("2023-12-01 08:00:00", Some(Money::from_cents(4_950))),
            TimestampedRecord::new("2024-02-10", None),
        ];
        let buckets = bucket_by_month(&records, BucketMode::Sum);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, key(2023, 12));
        assert_eq!(buckets[0].value, Decimal::from(150));
        assert_eq!(buckets[1].month, key(2024, 2));
        assert_eq!(buckets[1].value, Decimal::ZERO);
    }

    #[test]
    fn months_are_taken_in_utc() {
        let records = vec![TimestampedRecord::new("2024-01-31T22:30:00-03:00", None)];
        let buckets = bucket_by_month(&records, BucketMode::Count);
        assert_eq!(buckets[0].month, key(2024, 2));
    }

    #[test]
    fn unusable_timestamps_are_skipped() {
        let records = vec![
            TimestampedRecord::default(),
            TimestampedRecord::new("yesterday", None),
            TimestampedRecord::new("2024-05-01T00:00:00.123456+00:00", None),
        ];
        let buckets = bucket_by_month(&records, BucketMode::Count);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, key(2024, 5));
    }

    #[test]
    fn parses_postgres_text_timestamps() {
        let at = parse_timestamp("2024-06-15 23:59:59.5+00").unwrap();
        assert_eq!(MonthKey::of(&at), key(2024, 6));
        assert!(parse_timestamp("2024-13-01").is_none());
    }

    #[test]
    fn short_labels() {
        assert_eq!(key(2024, 1).short_label(), "Jan/24");
        assert_eq!(key(2009, 12).short_label(), "Dec/09");
    }

    #[test]
    fn decodes_order_rows() {
        let rows: Vec<TimestampedRecord> =
            serde_json::from_str(r#"[{"created_at":"2024-01-05T10:00:00Z","total":"99.90"},{"created_at":null}]"#)
                .unwrap();
        assert_eq!(rows[0].amount, Some(Money::from_cents(9_990)));
        assert_eq!(rows[1].timestamp, None);
    }
}
