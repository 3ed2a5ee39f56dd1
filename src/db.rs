use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone, Utc};
use maternal_risk::{BloodPressure, CheckIn};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::import::{self, ParticipantCheckIn};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

async fn upsert_participant(pool: &PgPool, full_name: &str, email: &str) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO maternal_risk.participants (id, full_name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE
        SET full_name = EXCLUDED.full_name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(email)
    .fetch_one(pool)
    .await?
    .get("id");

    Ok(id)
}

/// Inserts or replaces the check-in for its week. Returns true when a row
/// was written.
async fn upsert_check_in(
    pool: &PgPool,
    participant_id: Uuid,
    check_in: &CheckIn,
) -> anyhow::Result<bool> {
    let week = i32::try_from(check_in.week).context("week does not fit in INTEGER")?;

    let result = sqlx::query(
        r#"
        INSERT INTO maternal_risk.check_ins
        (id, participant_id, week, submitted_at, headache, swelling, sleep_quality,
         fatigue, mood, dizziness, systolic, diastolic, blood_sugar, activity_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (participant_id, week) DO UPDATE
        SET submitted_at = EXCLUDED.submitted_at,
            headache = EXCLUDED.headache,
            swelling = EXCLUDED.swelling,
            sleep_quality = EXCLUDED.sleep_quality,
            fatigue = EXCLUDED.fatigue,
            mood = EXCLUDED.mood,
            dizziness = EXCLUDED.dizziness,
            systolic = EXCLUDED.systolic,
            diastolic = EXCLUDED.diastolic,
            blood_sugar = EXCLUDED.blood_sugar,
            activity_level = EXCLUDED.activity_level
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(participant_id)
    .bind(week)
    .bind(check_in.date)
    .bind(i16::from(check_in.headache))
    .bind(i16::from(check_in.swelling))
    .bind(i16::from(check_in.sleep_quality))
    .bind(i16::from(check_in.fatigue))
    .bind(i16::from(check_in.mood))
    .bind(i16::from(check_in.dizziness))
    .bind(check_in.blood_pressure.map(|bp| i32::from(bp.systolic)))
    .bind(check_in.blood_pressure.map(|bp| i32::from(bp.diastolic)))
    .bind(check_in.blood_sugar)
    .bind(check_in.activity_level.map(i16::from))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn seed_check_ins(start: DateTime<Utc>) -> Vec<CheckIn> {
    let base = CheckIn {
        week: 20,
        date: start,
        headache: 1,
        swelling: 2,
        sleep_quality: 4,
        fatigue: 2,
        mood: 4,
        dizziness: 1,
        blood_pressure: Some(BloodPressure {
            systolic: 116,
            diastolic: 74,
        }),
        blood_sugar: Some(98.0),
        activity_level: Some(4),
    };

    vec![
        base.clone(),
        CheckIn {
            week: 21,
            date: start + Duration::weeks(1),
            swelling: 3,
            fatigue: 3,
            blood_pressure: None,
            blood_sugar: None,
            ..base.clone()
        },
        CheckIn {
            week: 22,
            date: start + Duration::weeks(2),
            headache: 3,
            swelling: 4,
            sleep_quality: 3,
            fatigue: 4,
            mood: 3,
            dizziness: 2,
            blood_pressure: Some(BloodPressure {
                systolic: 124,
                diastolic: 80,
            }),
            activity_level: Some(3),
            ..base.clone()
        },
        CheckIn {
            week: 23,
            date: start + Duration::weeks(3),
            headache: 4,
            swelling: 4,
            sleep_quality: 2,
            fatigue: 4,
            mood: 2,
            dizziness: 3,
            blood_pressure: Some(BloodPressure {
                systolic: 141,
                diastolic: 92,
            }),
            blood_sugar: Some(132.0),
            activity_level: Some(2),
            ..base
        },
    ]
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let participants = vec![
        ("Amara Okafor", "amara.okafor@example.com"),
        ("Lena Hoffmann", "lena.hoffmann@example.com"),
    ];
    let start = Utc
        .with_ymd_and_hms(2026, 1, 12, 9, 0, 0)
        .single()
        .context("invalid seed start date")?;

    for (index, (full_name, email)) in participants.into_iter().enumerate() {
        let participant_id = upsert_participant(pool, full_name, email).await?;
        let offset = Duration::days(i64::try_from(index)?);
        for check_in in seed_check_ins(start + offset) {
            upsert_check_in(pool, participant_id, &check_in).await?;
        }
        tracing::debug!(%email, "seeded participant");
    }

    Ok(())
}

fn rating(row: &PgRow, column: &str) -> anyhow::Result<u8> {
    let value: i16 = row.try_get(column)?;
    u8::try_from(value).with_context(|| format!("{column} value {value} out of range"))
}

fn check_in_from_row(row: &PgRow) -> anyhow::Result<CheckIn> {
    let week: i32 = row.try_get("week")?;
    let systolic: Option<i32> = row.try_get("systolic")?;
    let diastolic: Option<i32> = row.try_get("diastolic")?;
    let activity_level: Option<i16> = row.try_get("activity_level")?;

    let blood_pressure = match (systolic, diastolic) {
        (Some(systolic), Some(diastolic)) => Some(BloodPressure {
            systolic: u16::try_from(systolic).context("systolic out of range")?,
            diastolic: u16::try_from(diastolic).context("diastolic out of range")?,
        }),
        _ => None,
    };

    Ok(CheckIn {
        week: u32::try_from(week).context("week out of range")?,
        date: row.try_get("submitted_at")?,
        headache: rating(row, "headache")?,
        swelling: rating(row, "swelling")?,
        sleep_quality: rating(row, "sleep_quality")?,
        fatigue: rating(row, "fatigue")?,
        mood: rating(row, "mood")?,
        dizziness: rating(row, "dizziness")?,
        blood_pressure,
        blood_sugar: row.try_get("blood_sugar")?,
        activity_level: activity_level
            .map(u8::try_from)
            .transpose()
            .context("activity_level out of range")?,
    })
}

/// All check-ins for a participant, most recent week first.
pub async fn fetch_check_ins(pool: &PgPool, email: &str) -> anyhow::Result<Vec<CheckIn>> {
    let rows = sqlx::query(
        r#"
        SELECT c.week, c.submitted_at, c.headache, c.swelling, c.sleep_quality,
               c.fatigue, c.mood, c.dizziness, c.systolic, c.diastolic,
               c.blood_sugar, c.activity_level
        FROM maternal_risk.check_ins c
        JOIN maternal_risk.participants p ON p.id = c.participant_id
        WHERE p.email = $1
        ORDER BY c.week DESC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    rows.iter().map(check_in_from_row).collect()
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    let rows = import::read_csv(csv_path)?;
    let mut written = 0usize;

    for ParticipantCheckIn {
        email,
        full_name,
        check_in,
    } in rows
    {
        let participant_id = upsert_participant(pool, &full_name, &email).await?;
        if upsert_check_in(pool, participant_id, &check_in).await? {
            written += 1;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maternal_risk::{build_risk_trajectory, RiskLevel};

    #[test]
    fn seed_history_escalates_over_the_weeks() {
        let start = Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0).unwrap();
        let points = build_risk_trajectory(&seed_check_ins(start));
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].overall_level, RiskLevel::Low);
        assert_eq!(points[3].preeclampsia, RiskLevel::High);
    }
}
