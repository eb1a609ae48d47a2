use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

use crate::models::exercise::{canonical_equipment, canonical_sub_target, canonical_target};
use crate::models::routine::{DEFAULT_ROUTINE_DESCRIPTION, DEFAULT_ROUTINE_NAME};
use crate::models::{Exercise, ExerciseInfo, Profile, RepMax, Routine, WeightRecord, WorkoutRecord};

// ─── Column helpers ──────────────────────────────────────────────────────────

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_exercises(idx: usize, s: &str) -> rusqlite::Result<Vec<Exercise>> {
    serde_json::from_str(s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ─── Exercise catalog ────────────────────────────────────────────────────────

pub struct ExerciseRepo;

impl ExerciseRepo {
    /// Add a catalog entry. Target, sub-target and equipment are checked
    /// against the fixed vocabularies and stored in canonical spelling.
    pub fn add(
        conn: &Connection,
        name: &str,
        target: &str,
        sub_target: Option<&str>,
        equipment: &str,
    ) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Exercise must have a name");
        }
        let target = canonical_target(target)
            .ok_or_else(|| anyhow!("Unknown target '{}'", target))?;
        let sub_target = match sub_target {
            Some(s) => Some(
                canonical_sub_target(target, s)
                    .ok_or_else(|| anyhow!("'{}' is not a sub-target of {}", s, target))?,
            ),
            None => None,
        };
        let equipment = canonical_equipment(equipment)
            .ok_or_else(|| anyhow!("Unknown equipment '{}'", equipment))?;

        if Self::find_by_name(conn, name)?.is_some() {
            bail!("Exercise '{}' already exists", name);
        }

        conn.execute(
            "INSERT INTO exercises (name, target, sub_target, equipment) VALUES (?1, ?2, ?3, ?4)",
            params![name, target, sub_target, equipment],
        )?;
        log::info!("Added exercise {}", name);
        Ok(conn.last_insert_rowid())
    }

    pub fn list(conn: &Connection) -> Result<Vec<ExerciseInfo>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, target, sub_target, equipment
             FROM exercises ORDER BY name COLLATE NOCASE",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ExerciseInfo {
                id: row.get(0)?,
                name: row.get(1)?,
                target: row.get(2)?,
                sub_target: row.get(3)?,
                equipment: row.get(4)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn filter(
        conn: &Connection,
        targets: &[String],
        equipment: &[String],
    ) -> Result<Vec<ExerciseInfo>> {
        Ok(Self::list(conn)?
            .into_iter()
            .filter(|e| e.matches(targets, equipment))
            .collect())
    }

    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<ExerciseInfo>> {
        let exercises = Self::list(conn)?;
        Ok(exercises
            .into_iter()
            .find(|e| e.name.to_lowercase() == name.trim().to_lowercase()))
    }
}

// ─── Routines ────────────────────────────────────────────────────────────────

pub struct RoutineRepo;

impl RoutineRepo {
    pub fn create(conn: &Connection, name: Option<&str>) -> Result<Routine> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_ROUTINE_NAME);
        conn.execute(
            "INSERT INTO routines (name, description, exercises) VALUES (?1, ?2, '[]')",
            params![name, DEFAULT_ROUTINE_DESCRIPTION],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Created routine {} ({})", id, name);
        Ok(Routine {
            id,
            name: name.to_string(),
            description: DEFAULT_ROUTINE_DESCRIPTION.to_string(),
            exercises: Vec::new(),
        })
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<Routine>> {
        conn.query_row(
            "SELECT id, name, description, exercises FROM routines WHERE id = ?1",
            params![id],
            |row| {
                let exercises: String = row.get(3)?;
                Ok(Routine {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    exercises: parse_exercises(3, &exercises)?,
                })
            },
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn list(conn: &Connection) -> Result<Vec<Routine>> {
        let mut stmt =
            conn.prepare("SELECT id, name, description, exercises FROM routines ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let exercises: String = row.get(3)?;
            Ok(Routine {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                exercises: parse_exercises(3, &exercises)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Overwrite name, description and exercises of an existing routine.
    pub fn save(conn: &Connection, routine: &Routine) -> Result<()> {
        let exercises =
            serde_json::to_string(&routine.exercises).context("Serializing routine exercises")?;
        let changed = conn.execute(
            "UPDATE routines SET name = ?1, description = ?2, exercises = ?3 WHERE id = ?4",
            params![routine.name, routine.description, exercises, routine.id],
        )?;
        if changed == 0 {
            bail!("Routine {} not found", routine.id);
        }
        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM routines WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

// ─── Workout history ─────────────────────────────────────────────────────────

pub struct WorkoutRepo;

impl WorkoutRepo {
    /// Log a finished workout and add it to the profile totals.
    pub fn end_workout(
        conn: &Connection,
        routine_name: &str,
        description: &str,
        exercises: &[Exercise],
        duration: f64,
        date: DateTime<Utc>,
    ) -> Result<i64> {
        if !duration.is_finite() || duration < 0.0 {
            bail!("Workout duration must be a non-negative number of seconds");
        }
        let exercises = serde_json::to_string(exercises).context("Serializing workout exercises")?;

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO workouts (routine_name, description, exercises, date, duration)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![routine_name, description, exercises, format_date(&date), duration],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO profile (id, workouts, duration) VALUES (1, 1, ?1)
             ON CONFLICT(id) DO UPDATE SET workouts = workouts + 1, duration = duration + ?1",
            params![duration],
        )?;
        tx.commit()?;

        log::info!("Logged workout {} ({}s)", routine_name, duration);
        Ok(id)
    }

    /// Most recent first.
    pub fn list(conn: &Connection) -> Result<Vec<WorkoutRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, routine_name, description, exercises, date, duration
             FROM workouts ORDER BY date DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let exercises: String = row.get(3)?;
            let date: String = row.get(4)?;
            Ok(WorkoutRecord {
                id: row.get(0)?,
                routine_name: row.get(1)?,
                description: row.get(2)?,
                exercises: parse_exercises(3, &exercises)?,
                date: parse_date(4, &date)?,
                duration: row.get(5)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn dates(conn: &Connection) -> Result<Vec<DateTime<Utc>>> {
        let mut stmt = conn.prepare("SELECT date FROM workouts ORDER BY date")?;
        let rows = stmt.query_map([], |row| {
            let date: String = row.get(0)?;
            parse_date(0, &date)
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── One-rep-max records ─────────────────────────────────────────────────────

pub struct RecordRepo;

impl RecordRepo {
    /// Append to an exercise's history. The exercise must be in the catalog
    /// and is stored under its catalog spelling. Returns false when the
    /// exact same date and weight is already logged for it.
    pub fn add(conn: &Connection, exercise: &str, date: DateTime<Utc>, weight: f64) -> Result<bool> {
        if !weight.is_finite() || weight < 0.0 {
            bail!("Weight must be a non-negative number");
        }
        let exercise = Self::catalog_name(conn, exercise)?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO records (exercise, date, weight) VALUES (?1, ?2, ?3)",
            params![exercise, format_date(&date), weight],
        )?;
        if changed == 0 {
            log::warn!("Duplicate record for {} ignored", exercise);
        }
        Ok(changed > 0)
    }

    /// Entries in the order they were logged.
    pub fn history(conn: &Connection, exercise: &str) -> Result<Vec<WeightRecord>> {
        let exercise = Self::catalog_name(conn, exercise)?;
        let mut stmt =
            conn.prepare("SELECT date, weight FROM records WHERE exercise = ?1 ORDER BY id")?;

        let rows = stmt.query_map(params![exercise], |row| {
            let date: String = row.get(0)?;
            Ok(WeightRecord {
                date: parse_date(0, &date)?,
                weight: row.get(1)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Catalog spelling of `exercise`, matched case-insensitively.
    pub fn catalog_name(conn: &Connection, exercise: &str) -> Result<String> {
        if exercise.trim().is_empty() {
            bail!("Record needs an exercise name");
        }
        ExerciseRepo::find_by_name(conn, exercise)?
            .map(|e| e.name)
            .ok_or_else(|| anyhow!("Exercise '{}' is not in the catalog", exercise.trim()))
    }

    /// Every exercise with at least one record, by name.
    pub fn all(conn: &Connection) -> Result<Vec<RepMax>> {
        let mut stmt = conn.prepare("SELECT exercise, date, weight FROM records ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let date: String = row.get(1)?;
            Ok((
                row.get::<_, String>(0)?,
                WeightRecord {
                    date: parse_date(1, &date)?,
                    weight: row.get(2)?,
                },
            ))
        })?;

        let mut grouped: BTreeMap<String, Vec<WeightRecord>> = BTreeMap::new();
        for r in rows {
            let (exercise, record) = r?;
            grouped.entry(exercise).or_default().push(record);
        }

        Ok(grouped
            .into_iter()
            .map(|(exercise, history)| RepMax { exercise, history })
            .collect())
    }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub struct ProfileRepo;

impl ProfileRepo {
    pub fn get(conn: &Connection) -> Result<Profile> {
        let profile = conn
            .query_row(
                "SELECT username, workouts, duration, goal FROM profile WHERE id = 1",
                [],
                |row| {
                    Ok(Profile {
                        username: row.get(0)?,
                        workouts: row.get(1)?,
                        duration: row.get(2)?,
                        goal: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(profile.unwrap_or_default())
    }

    pub fn set_username(conn: &Connection, username: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            bail!("Username cannot be empty");
        }
        conn.execute(
            "INSERT INTO profile (id, username) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET username = ?1",
            params![username],
        )?;
        Ok(())
    }

    /// Store the weekly goal, clamped to 0..=7. Returns the stored value.
    pub fn set_goal(conn: &Connection, goal: i64) -> Result<u8> {
        let goal = Profile::clamp_goal(goal);
        conn.execute(
            "INSERT INTO profile (id, goal) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET goal = ?1",
            params![goal],
        )?;
        Ok(goal)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
