use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use maternal_risk::{validate_check_in, BloodPressure, CheckIn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    email: String,
    full_name: String,
    week: u32,
    date: DateTime<Utc>,
    headache: u8,
    swelling: u8,
    sleep_quality: u8,
    fatigue: u8,
    mood: u8,
    dizziness: u8,
    systolic: Option<u16>,
    diastolic: Option<u16>,
    blood_sugar: Option<f64>,
    activity_level: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct ParticipantCheckIn {
    pub email: String,
    pub full_name: String,
    pub check_in: CheckIn,
}

impl From<CsvRow> for ParticipantCheckIn {
    fn from(row: CsvRow) -> Self {
        let blood_pressure = match (row.systolic, row.diastolic) {
            (Some(systolic), Some(diastolic)) => Some(BloodPressure {
                systolic,
                diastolic,
            }),
            _ => None,
        };

        Self {
            email: row.email,
            full_name: row.full_name,
            check_in: CheckIn {
                week: row.week,
                date: row.date,
                headache: row.headache,
                swelling: row.swelling,
                sleep_quality: row.sleep_quality,
                fatigue: row.fatigue,
                mood: row.mood,
                dizziness: row.dizziness,
                blood_pressure,
                blood_sugar: row.blood_sugar,
                activity_level: row.activity_level,
            },
        }
    }
}

/// Reads and validates every row of a check-in CSV export.
pub fn read_csv(csv_path: &Path) -> anyhow::Result<Vec<ParticipantCheckIn>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut rows = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row: ParticipantCheckIn = result
            .with_context(|| format!("invalid check-in on data row {}", line + 1))?
            .into();
        validate_check_in(&row.check_in)
            .with_context(|| format!("rejected check-in for {}", row.email))?;
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), path = %csv_path.display(), "read check-in csv");
    Ok(rows)
}

/// Picks one participant's check-ins out of a CSV export. Without an email
/// the file must hold a single participant.
pub fn check_ins_for(
    rows: Vec<ParticipantCheckIn>,
    email: Option<&str>,
) -> anyhow::Result<Vec<CheckIn>> {
    let selected: Vec<ParticipantCheckIn> = match email {
        Some(email) => rows.into_iter().filter(|r| r.email == email).collect(),
        None => rows,
    };

    if let Some(first) = selected.first() {
        if selected.iter().any(|r| r.email != first.email) {
            anyhow::bail!("CSV holds check-ins for several participants; pass --email");
        }
    }

    Ok(selected.into_iter().map(|r| r.check_in).collect())
}
