//! Weekday recency/frequency/monetary aggregation and hour-of-day profiles.

use bikeshare_core::models::{
    DailyRecord, HourProfile, HourlyRecord, Weekday, WeekdayAggregate,
};
use chrono::NaiveDate;

// ── WeekdayBucket ─────────────────────────────────────────────────────────────

/// Running totals for one weekday code.
#[derive(Debug, Clone, Default)]
struct WeekdayBucket {
    latest: Option<NaiveDate>,
    monetary: u64,
    frequency: u32,
}

impl WeekdayBucket {
    fn add_record(&mut self, record: &DailyRecord) {
        self.latest = Some(match self.latest {
            Some(d) => d.max(record.dteday),
            None => record.dteday,
        });
        self.monetary += u64::from(record.cnt);
        self.frequency += 1;
    }
}

// ── WeekdayAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups daily records by weekday code.
pub struct WeekdayAggregator;

impl WeekdayAggregator {
    /// Recency, frequency and monetary figures for all seven weekdays, in code
    /// order (Sunday first).
    ///
    /// Recency is measured against the latest `dteday` in the whole slice.
    /// Empty buckets report zero frequency and monetary value and no recency.
    /// Records whose code falls outside 0–6 are ignored; the loader rejects
    /// them before they get here.
    pub fn aggregate(records: &[DailyRecord]) -> Vec<WeekdayAggregate> {
        let mut buckets: [WeekdayBucket; 7] = Default::default();
        for record in records {
            if let Some(bucket) = buckets.get_mut(usize::from(record.weekday)) {
                bucket.add_record(record);
            }
        }

        let global_latest = buckets.iter().filter_map(|b| b.latest).max();

        Weekday::ALL
            .iter()
            .zip(buckets.iter())
            .map(|(&label, bucket)| WeekdayAggregate {
                label,
                recency: match (global_latest, bucket.latest) {
                    (Some(global), Some(own)) => Some((global - own).num_days()),
                    _ => None,
                },
                monetary: bucket.monetary,
                frequency: bucket.frequency,
            })
            .collect()
    }

    /// `(label, total rentals)` pairs in the order given.
    pub fn totals(aggregates: &[WeekdayAggregate]) -> Vec<(Weekday, u64)> {
        aggregates.iter().map(|a| (a.label, a.monetary)).collect()
    }

    /// Weekday with the most rentals.  Ties go to the earlier code; `None`
    /// when every bucket is empty.
    pub fn busiest(aggregates: &[WeekdayAggregate]) -> Option<Weekday> {
        let mut best: Option<&WeekdayAggregate> = None;
        for agg in aggregates.iter().filter(|a| a.frequency > 0) {
            if best.map_or(true, |b| agg.monetary > b.monetary) {
                best = Some(agg);
            }
        }
        best.map(|a| a.label)
    }

    /// Weekday with the fewest rentals among non-empty buckets.
    pub fn quietest(aggregates: &[WeekdayAggregate]) -> Option<Weekday> {
        let mut best: Option<&WeekdayAggregate> = None;
        for agg in aggregates.iter().filter(|a| a.frequency > 0) {
            if best.map_or(true, |b| agg.monetary < b.monetary) {
                best = Some(agg);
            }
        }
        best.map(|a| a.label)
    }
}

// ── HourlyAggregator ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct HourBucket {
    total: u64,
    samples: u32,
    working_total: u64,
    working_samples: u32,
}

impl HourBucket {
    fn add_record(&mut self, record: &HourlyRecord) {
        self.total += u64::from(record.cnt);
        self.samples += 1;
        if record.is_working_day() {
            self.working_total += u64::from(record.cnt);
            self.working_samples += 1;
        }
    }

    fn into_profile(self, hour: u8) -> HourProfile {
        let off_total = self.total - self.working_total;
        let off_samples = self.samples - self.working_samples;
        HourProfile {
            hour,
            mean: ratio(self.total, self.samples),
            mean_working_day: ratio(self.working_total, self.working_samples),
            mean_off_day: ratio(off_total, off_samples),
            total: self.total,
            samples: self.samples,
        }
    }
}

fn ratio(total: u64, samples: u32) -> Option<f64> {
    (samples > 0).then(|| total as f64 / f64::from(samples))
}

/// Stateless helper that groups hourly records by hour of day.
pub struct HourlyAggregator;

impl HourlyAggregator {
    /// Exactly 24 profiles, hours 0–23.  Rows with `hr > 23` are skipped.
    pub fn profile(records: &[HourlyRecord]) -> Vec<HourProfile> {
        let mut buckets = [HourBucket::default(); 24];
        for record in records {
            if let Some(bucket) = buckets.get_mut(usize::from(record.hr)) {
                bucket.add_record(record);
            }
        }

        buckets
            .into_iter()
            .zip(0u8..)
            .map(|(bucket, hour)| bucket.into_profile(hour))
            .collect()
    }

    /// Hour with the highest overall mean.
    pub fn peak_hour(profiles: &[HourProfile]) -> Option<u8> {
        profiles
            .iter()
            .filter_map(|p| p.mean.map(|m| (p.hour, m)))
            .fold(None, |best: Option<(u8, f64)>, (hour, mean)| match best {
                Some((_, m)) if m >= mean => best,
                _ => Some((hour, mean)),
            })
            .map(|(hour, _)| hour)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
