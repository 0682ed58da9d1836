// src/nachweis.rs
//! The Nachweis record and the pre-fill values for a new one.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::count_week_numbers;
use crate::schedule::{ReportingPeriod, TrainingProfile};

/// One periodic training report, as the Azubi records it.
///
/// This mirrors the journal row the surrounding application stores
/// (activities, school content, signature state). The coverage engine only
/// ever reads the covered date range via [`Nachweis::period`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nachweis {
    pub nummer: u32,
    pub ausbildungswoche: u32,
    pub jahr: i32,
    pub kalenderwoche: u32,
    pub datum_start: NaiveDate,
    pub datum_ende: NaiveDate,
    #[serde(default)]
    pub abteilung: String,
    #[serde(default)]
    pub betrieb: String,
    #[serde(default)]
    pub schule: String,
    #[serde(default)]
    pub fertig: bool,
    #[serde(default)]
    pub eingereicht_bei: String,
    #[serde(default)]
    pub unterschrieben: bool,
}

impl Nachweis {
    /// The reporting period this Nachweis covers.
    pub fn period(&self) -> ReportingPeriod {
        ReportingPeriod::new(self.datum_start, self.datum_ende)
    }
}

/// Collect the covered periods of a batch of reports, in the shape the
/// coverage engine consumes.
pub fn covered_periods(reports: &[Nachweis]) -> Vec<ReportingPeriod> {
    reports.iter().map(Nachweis::period).collect()
}

/// Pre-fill values for a new Nachweis targeting one reporting period.
///
/// The caller picks the period (usually the current one, or the newest gap)
/// and passes the user's existing reports; everything here is derived, no
/// clock or storage reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NachweisSeed {
    pub nummer: u32,
    pub ausbildungswoche: u32,
    pub jahr: i32,
    pub kalenderwoche: u32,
    pub datum_start: NaiveDate,
    pub datum_ende: NaiveDate,
}

impl NachweisSeed {
    pub fn for_period(
        profile: &TrainingProfile,
        period: ReportingPeriod,
        existing: &[Nachweis],
    ) -> Self {
        let nummer = existing.iter().map(|n| n.nummer).max().unwrap_or(0) + 1;
        // Ausbildungswoche counts ISO weeks since the start date. Without a
        // start date the best available default is one past the number of
        // reports already written.
        let ausbildungswoche = match profile.start_date {
            Some(start_date) => count_week_numbers(start_date, period.start),
            None => existing.len() as u32 + 1,
        };
        Self {
            nummer,
            ausbildungswoche,
            jahr: period.start.year(),
            kalenderwoche: period.start.iso_week().week(),
            datum_start: period.start,
            datum_ende: period.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ReportingInterval;

    fn d(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").expect("valid test date")
    }

    fn nachweis(nummer: u32, start: &str, end: &str) -> Nachweis {
        Nachweis {
            nummer,
            ausbildungswoche: nummer,
            jahr: d(start).year(),
            kalenderwoche: d(start).iso_week().week(),
            datum_start: d(start),
            datum_ende: d(end),
            abteilung: "IT".to_string(),
            betrieb: String::new(),
            schule: String::new(),
            fertig: false,
            eingereicht_bei: String::new(),
            unterschrieben: false,
        }
    }

    #[test]
    fn seed_continues_numbering_from_highest_nummer() {
        let profile =
            TrainingProfile::new(Some(d("2025-11-24")), ReportingInterval::Weekly);
        let existing = vec![
            nachweis(1, "2025-11-24", "2025-11-28"),
            nachweis(2, "2025-12-01", "2025-12-05"),
        ];
        let period = ReportingPeriod::new(d("2025-12-08"), d("2025-12-12"));

        let seed = NachweisSeed::for_period(&profile, period, &existing);

        assert_eq!(seed.nummer, 3);
    }

    #[test]
    fn seed_starts_numbering_at_one_without_reports() {
        let profile =
            TrainingProfile::new(Some(d("2025-11-24")), ReportingInterval::Weekly);
        let period = ReportingPeriod::new(d("2025-11-24"), d("2025-11-28"));

        let seed = NachweisSeed::for_period(&profile, period, &[]);

        assert_eq!(seed.nummer, 1);
        assert_eq!(seed.ausbildungswoche, 1);
    }

    #[test]
    fn seed_derives_ausbildungswoche_from_start_date() {
        let profile =
            TrainingProfile::new(Some(d("2025-11-24")), ReportingInterval::Weekly);
        // Third week of the Ausbildung.
        let period = ReportingPeriod::new(d("2025-12-08"), d("2025-12-12"));

        let seed = NachweisSeed::for_period(&profile, period, &[]);

        assert_eq!(seed.ausbildungswoche, 3);
    }

    #[test]
    fn seed_falls_back_to_report_count_without_start_date() {
        let profile = TrainingProfile::new(None, ReportingInterval::Weekly);
        let existing = vec![
            nachweis(1, "2025-11-24", "2025-11-28"),
            nachweis(2, "2025-12-01", "2025-12-05"),
        ];
        let period = ReportingPeriod::new(d("2025-12-08"), d("2025-12-12"));

        let seed = NachweisSeed::for_period(&profile, period, &existing);

        assert_eq!(seed.ausbildungswoche, 3);
    }

    #[test]
    fn seed_calendar_fields_match_the_target_period() {
        let profile =
            TrainingProfile::new(Some(d("2025-11-24")), ReportingInterval::Weekly);
        // ISO week 1 of 2026 starts in December 2025.
        let period = ReportingPeriod::new(d("2025-12-29"), d("2026-01-02"));

        let seed = NachweisSeed::for_period(&profile, period, &[]);

        assert_eq!(seed.jahr, 2025);
        assert_eq!(seed.kalenderwoche, 1);
        assert_eq!(seed.datum_start, d("2025-12-29"));
        assert_eq!(seed.datum_ende, d("2026-01-02"));
    }

    #[test]
    fn nachweis_rows_round_trip_through_csv() {
        let rows = vec![
            nachweis(1, "2025-11-24", "2025-11-28"),
            nachweis(2, "2025-12-01", "2025-12-05"),
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row).expect("serialize Nachweis row");
        }
        let data = writer.into_inner().expect("flush CSV buffer");

        let mut reader = csv::Reader::from_reader(data.as_slice());
        let parsed: Vec<Nachweis> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("parse Nachweis rows");

        assert_eq!(parsed, rows);
    }
}
