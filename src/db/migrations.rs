use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS exercises (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
            target      TEXT NOT NULL
                        CHECK(target IN ('Chest','Back','Arms','Shoulders','Legs','Core')),
            sub_target  TEXT,
            equipment   TEXT NOT NULL
                        CHECK(equipment IN ('Barbell','Dumbbell','Machine','Cable','Bodyweight'))
        );

        CREATE TABLE IF NOT EXISTS routines (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '-',
            exercises    TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS workouts (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            routine_name  TEXT NOT NULL,
            description   TEXT NOT NULL,
            exercises     TEXT NOT NULL DEFAULT '[]',
            date          TEXT NOT NULL,
            duration      REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date);

        CREATE TABLE IF NOT EXISTS records (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            exercise  TEXT NOT NULL,
            date      TEXT NOT NULL,
            weight    REAL NOT NULL CHECK(weight >= 0),
            UNIQUE(exercise, date, weight)
        );

        CREATE INDEX IF NOT EXISTS idx_records_exercise ON records(exercise);

        CREATE TABLE IF NOT EXISTS profile (
            id        INTEGER PRIMARY KEY CHECK(id = 1),
            username  TEXT NOT NULL DEFAULT '',
            workouts  INTEGER NOT NULL DEFAULT 0,
            duration  REAL NOT NULL DEFAULT 0,
            goal      INTEGER NOT NULL DEFAULT 0 CHECK(goal BETWEEN 0 AND 7)
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    seed_catalog(conn)?;
    Ok(())
}

fn seed_catalog(conn: &Connection) -> Result<()> {
    let builtins = [
        ("Bench Press", "Chest", Some("Upper Pectorals"), "Barbell"),
        ("Incline Dumbbell Press", "Chest", Some("Upper Pectorals"), "Dumbbell"),
        ("Cable Fly", "Chest", Some("Lower Pectorals"), "Cable"),
        ("Deadlift", "Back", Some("Rhomboids"), "Barbell"),
        ("Lat Pulldown", "Back", Some("Lats"), "Cable"),
        ("Pull Up", "Back", Some("Lats"), "Bodyweight"),
        ("Overhead Press", "Shoulders", Some("Front Deltoids"), "Barbell"),
        ("Lateral Raise", "Shoulders", Some("Side Deltoids"), "Dumbbell"),
        ("Barbell Curl", "Arms", Some("Biceps"), "Barbell"),
        ("Tricep Pushdown", "Arms", Some("Triceps"), "Cable"),
        ("Squat", "Legs", Some("Quadriceps"), "Barbell"),
        ("Leg Curl", "Legs", Some("Hamstrings"), "Machine"),
        ("Calf Raise", "Legs", Some("Calves"), "Machine"),
        ("Plank", "Core", None, "Bodyweight"),
    ];

    for (name, target, sub_target, equipment) in &builtins {
        conn.execute(
            "INSERT OR IGNORE INTO exercises (name, target, sub_target, equipment)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![name, target, sub_target, equipment],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 14);
    }

    #[test]
    fn routines_table_columns() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let mut stmt = conn.prepare("PRAGMA table_info(routines)").unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(1))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(columns, vec!["id", "name", "description", "exercises"]);
    }
}
