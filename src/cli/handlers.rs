use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::cli::args::{ExerciseCommands, RecordCommands, RoutineCommands};
use crate::config::AppConfig;
use crate::db::repository::{
    ExerciseRepo, MetaRepo, ProfileRepo, RecordRepo, RoutineRepo, WorkoutRepo,
};
use crate::models::routine::apply_overrides;
use crate::models::{CalendarMarks, ChartPoint, Exercise, Profile, Set, SetOverride};
use crate::reports::{
    best_weight, build_calendar_marks, bucket_by_week, bucket_by_week_starting, compute_display_max,
    latest_weight, to_chart_series, WeekStart, WEEKS_SHOWN,
};
use crate::utils::chart::{render_bars, render_month};
use crate::utils::format::{format_duration, format_weight, pad_right, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const ACCENT: &str = "\x1b[38;2;76;175;80m";

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("BenchMark is already set up. Use --reset to change your profile.");
                return Ok(());
            }
        }
    }

    let current = ProfileRepo::get(conn)?;
    let default_name = if current.username.is_empty() {
        config.profile.default_username.clone()
    } else {
        current.username.clone()
    };

    println!();
    println_colored!(ACCENT, "  BenchMark setup");
    println!();
    let name = prompt(&format!("  Username [{}]: ", default_name))?;
    let name = if name.trim().is_empty() { default_name } else { name };
    ProfileRepo::set_username(conn, &name)?;

    let goal = prompt(&format!("  Weekly workout goal, 0-7 [{}]: ", current.goal))?;
    let goal = if goal.trim().is_empty() {
        current.goal
    } else {
        let requested: i64 = goal
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a number", goal.trim()))?;
        ProfileRepo::set_goal(conn, requested)?
    };

    MetaRepo::set(conn, "setup_done", "1")?;

    let config_path = AppConfig::config_path()?;
    if !config_path.exists() {
        config.save()?;
        log::info!("Wrote default config to {:?}", config_path);
    }

    println!();
    println_colored!(GREEN, "  ✓ Ready, {}. Weekly goal: {}", name.trim(), goal);
    println!();
    Ok(())
}

// ─── Exercises ───────────────────────────────────────────────────────────────

pub fn handle_exercise(conn: &Connection, action: &ExerciseCommands) -> Result<()> {
    match action {
        ExerciseCommands::List { targets, equipment } => {
            let exercises = ExerciseRepo::filter(conn, targets, equipment)?;
            println!();
            if exercises.is_empty() {
                println_colored!(DIM, "  No exercises match those filters");
            } else {
                println_colored!(ACCENT, "  Exercises ({})", exercises.len());
                println!();
                for e in &exercises {
                    let target = match &e.sub_target {
                        Some(sub) => format!("{} / {}", e.target, sub),
                        None => e.target.clone(),
                    };
                    println!(
                        "  {}  {}  {}",
                        pad_right(&e.name, 26),
                        pad_right(&target, 28),
                        e.equipment
                    );
                }
            }
            println!();
        }
        ExerciseCommands::Add {
            name,
            target,
            sub_target,
            equipment,
        } => {
            ExerciseRepo::add(conn, name, target, sub_target.as_deref(), equipment)?;
            println_colored!(GREEN, "  ✓ Exercise added: {}", name.trim());
        }
    }
    Ok(())
}

// ─── Routines ────────────────────────────────────────────────────────────────

pub fn handle_routine(conn: &Connection, config: &AppConfig, action: &RoutineCommands) -> Result<()> {
    match action {
        RoutineCommands::New { name } => {
            let routine = RoutineRepo::create(conn, name.as_deref())?;
            println_colored!(GREEN, "  ✓ Created routine #{} — {}", routine.id, routine.name);
        }
        RoutineCommands::List => {
            let routines = RoutineRepo::list(conn)?;
            println!();
            if routines.is_empty() {
                println_colored!(DIM, "  No routines yet. Create one with `benchmark routine new`");
            } else {
                println_colored!(ACCENT, "  Routines");
                println!();
                for r in &routines {
                    println!(
                        "  #{:<4} {}  {}",
                        r.id,
                        pad_right(&r.name, 24),
                        exercise_summary(&r.exercises)
                    );
                }
            }
            println!();
        }
        RoutineCommands::Show { id } => {
            let routine = load_routine(conn, *id)?;
            println!();
            println_colored!(ACCENT, "  #{} {}", routine.id, routine.name);
            println_colored!(DIM, "  {}", routine.description);
            println!();
            print_exercises(&routine.exercises);
            println!();
        }
        RoutineCommands::Edit {
            id,
            name,
            description,
            sets,
        } => {
            let mut routine = load_routine(conn, *id)?;
            if let Some(name) = name {
                routine.name = name.trim().to_string();
            }
            if let Some(description) = description {
                routine.description = description.trim().to_string();
            }
            routine.exercises = apply_overrides(&routine.exercises, sets)?;
            RoutineRepo::save(conn, &routine)?;
            println_colored!(GREEN, "  ✓ Saved routine #{} — {}", routine.id, routine.name);
        }
        RoutineCommands::AddExercise {
            id,
            exercise,
            sets,
            reps,
            weight,
        } => {
            let mut routine = load_routine(conn, *id)?;
            let info = ExerciseRepo::find_by_name(conn, exercise)?
                .ok_or_else(|| anyhow!("Exercise '{}' is not in the catalog", exercise))?;
            if !weight.is_finite() || *weight < 0.0 {
                bail!("Weight must be a non-negative number");
            }
            let set_count = sets.unwrap_or(config.workout.default_sets);
            let reps = reps.unwrap_or(config.workout.default_reps);
            routine.exercises.push(Exercise {
                exercise_name: info.name.clone(),
                sets: (0..set_count)
                    .map(|_| Set {
                        reps,
                        weight: *weight,
                    })
                    .collect(),
            });
            RoutineRepo::save(conn, &routine)?;
            println_colored!(
                GREEN,
                "  ✓ Added {} ({} × {}) to {}",
                info.name,
                set_count,
                reps,
                routine.name
            );
        }
        RoutineCommands::RemoveExercise { id, index } => {
            let mut routine = load_routine(conn, *id)?;
            if *index >= routine.exercises.len() {
                bail!("Routine #{} has no exercise at index {}", id, index);
            }
            let removed = routine.exercises.remove(*index);
            RoutineRepo::save(conn, &routine)?;
            println_colored!(AMBER, "  Removed {} from {}", removed.exercise_name, routine.name);
        }
        RoutineCommands::Delete { id } => {
            if RoutineRepo::delete(conn, *id)? {
                println_colored!(RED, "  ✗ Routine #{} deleted", id);
            } else {
                bail!("Routine #{} not found", id);
            }
        }
    }
    Ok(())
}

fn load_routine(conn: &Connection, id: i64) -> Result<crate::models::Routine> {
    RoutineRepo::get(conn, id)?.ok_or_else(|| anyhow!("Routine #{} not found", id))
}

fn exercise_summary(exercises: &[Exercise]) -> String {
    let sets: usize = exercises.iter().map(|e| e.sets.len()).sum();
    format!("{} exercises, {} sets", exercises.len(), sets)
}

fn print_exercises(exercises: &[Exercise]) {
    if exercises.is_empty() {
        println_colored!(DIM, "  No exercises");
        return;
    }
    for (ei, e) in exercises.iter().enumerate() {
        println_colored!(BOLD, "  {}  {}", ei, e.exercise_name);
        for (si, s) in e.sets.iter().enumerate() {
            println!("     {}-{}  {} kg × {}", ei, si, format_weight(s.weight), s.reps);
        }
    }
}

// ─── Workout ─────────────────────────────────────────────────────────────────

pub fn handle_workout(
    conn: &Connection,
    routine_id: i64,
    duration: f64,
    overrides: &[SetOverride],
) -> Result<()> {
    let routine = load_routine(conn, routine_id)?;
    let performed = apply_overrides(&routine.exercises, overrides)?;
    WorkoutRepo::end_workout(
        conn,
        &routine.name,
        &routine.description,
        &performed,
        duration,
        Utc::now(),
    )?;

    let profile = ProfileRepo::get(conn)?;
    println_colored!(
        GREEN,
        "  ✓ {} logged — {}",
        routine.name,
        format_duration(duration)
    );
    println_colored!(
        DIM,
        "  {} workouts, {} in total",
        profile.workouts,
        format_duration(profile.duration)
    );
    Ok(())
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_history(conn: &Connection, config: &AppConfig, calendar: bool) -> Result<()> {
    let history = WorkoutRepo::list(conn)?;
    println!();

    if calendar {
        let dates: Vec<DateTime<Utc>> = history.iter().map(|w| w.date).collect();
        let marks = build_calendar_marks(&dates);
        let today = Local::now().date_naive();
        for line in render_month(today.year(), today.month(), &marks, config.reports.week_start) {
            println!("  {}", line);
        }
        println!();
    }

    if history.is_empty() {
        println_colored!(DIM, "  No workouts logged yet");
    } else {
        println_colored!(ACCENT, "  History ({} workouts)", history.len());
        println!();
        for w in &history {
            let when = w.date.with_timezone(&Local).format("%a %d %b %Y %H:%M");
            println_colored!(BOLD, "  {}  {}", when, w.routine_name);
            println_colored!(
                DIM,
                "    {}  ·  {} sets  ·  {} kg volume",
                format_duration(w.duration),
                w.total_sets(),
                format_weight(w.volume())
            );
        }
    }
    println!();
    Ok(())
}

// ─── Records ─────────────────────────────────────────────────────────────────

pub fn handle_record(conn: &Connection, config: &AppConfig, action: &RecordCommands) -> Result<()> {
    match action {
        RecordCommands::Add {
            exercise,
            weight,
            date,
        } => {
            let when = match date {
                Some(d) => parse_record_date(d)?,
                None => Utc::now(),
            };
            let name = RecordRepo::catalog_name(conn, exercise)?;
            if RecordRepo::add(conn, &name, when, *weight)? {
                println_colored!(
                    GREEN,
                    "  ✓ 1RM added for {}: {} kg",
                    name,
                    format_weight(*weight)
                );
            } else {
                println_colored!(DIM, "  That record is already logged");
            }
        }
        RecordCommands::Show { exercise } => {
            let name = RecordRepo::catalog_name(conn, exercise)?;
            let history = RecordRepo::history(conn, &name)?;
            if history.is_empty() {
                bail!("No records for '{}'", name);
            }
            let best = best_weight(&history)?;
            let latest = latest_weight(&history)?;
            let series = to_chart_series(&history);

            println!();
            println_colored!(ACCENT, "  {}", name);
            println_colored!(
                BOLD,
                "  Best: {} kg   Latest: {} kg",
                format_weight(best),
                format_weight(latest)
            );
            println!();
            for line in render_bars(&series, best, 0.0, config.reports.bar_width) {
                println!("  {}", line);
            }
            println!();
        }
        RecordCommands::List => {
            let summaries = record_summaries(conn)?;
            println!();
            if summaries.is_empty() {
                println_colored!(DIM, "  No records yet. Add one with `benchmark record add`");
            } else {
                println_colored!(ACCENT, "  Personal records");
                println!();
                for s in &summaries {
                    println!(
                        "  {}  best {:>6}  latest {:>6}",
                        pad_right(&s.exercise, 26),
                        format_weight(s.best),
                        format_weight(s.latest)
                    );
                }
            }
            println!();
        }
    }
    Ok(())
}

/// `YYYY-MM-DD`, taken as local noon.
fn parse_record_date(s: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Bad date '{}', expected YYYY-MM-DD", s))?;
    let noon = day
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| anyhow!("Bad date '{}'", s))?;
    let local = Local
        .from_local_datetime(&noon)
        .earliest()
        .ok_or_else(|| anyhow!("'{}' does not exist in the local time zone", s))?;
    Ok(local.with_timezone(&Utc))
}

// ─── Goal / profile ──────────────────────────────────────────────────────────

pub fn handle_goal(conn: &Connection, goal: i64) -> Result<()> {
    let stored = ProfileRepo::set_goal(conn, goal)?;
    if stored as i64 != goal {
        log::warn!("Goal {} clamped to {}", goal, stored);
    }
    println_colored!(GREEN, "  ✓ Weekly workout goal set at {}", stored);
    Ok(())
}

pub fn handle_profile(conn: &Connection, username: Option<&str>) -> Result<()> {
    if let Some(name) = username {
        ProfileRepo::set_username(conn, name)?;
        println_colored!(GREEN, "  ✓ Profile updated");
    }
    let profile = ProfileRepo::get(conn)?;
    println!();
    println_colored!(ACCENT, "  {}", profile.username);
    print_metrics(&profile);
    println!();
    Ok(())
}

fn print_metrics(profile: &Profile) {
    println!("  Total workouts:     {}", profile.workouts);
    println!("  Total duration:     {}", format_duration(profile.duration));
    println!(
        "  Average duration:   {}",
        format_duration(profile.average_duration())
    );
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecordSummary {
    pub exercise: String,
    pub best: f64,
    pub latest: f64,
    pub series: Vec<ChartPoint>,
}

/// Everything the profile screen shows, computed for `now`.
#[derive(Debug, Serialize)]
pub struct ProfileReport {
    pub profile: Profile,
    pub average_duration: f64,
    pub calendar: CalendarMarks,
    pub weekly: Vec<ChartPoint>,
    pub weekly_max: f64,
    pub records: Vec<RecordSummary>,
}

pub fn build_profile_report<Tz: TimeZone>(
    conn: &Connection,
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Result<ProfileReport> {
    let profile = ProfileRepo::get(conn)?;
    let dates = WorkoutRepo::dates(conn)?;
    let tz = now.timezone();
    let zoned: Vec<DateTime<Tz>> = dates.iter().map(|d| d.with_timezone(&tz)).collect();

    let weekly = match week_start {
        WeekStart::Sunday => bucket_by_week(&zoned, now),
        other => bucket_by_week_starting(&zoned, now, other),
    };
    // One step of headroom above the tallest bar or goal line.
    let weekly_max = compute_display_max(&weekly, profile.goal as f64) + 1.0;

    Ok(ProfileReport {
        average_duration: profile.average_duration(),
        calendar: build_calendar_marks(&dates),
        weekly,
        weekly_max,
        records: record_summaries(conn)?,
        profile,
    })
}

fn record_summaries(conn: &Connection) -> Result<Vec<RecordSummary>> {
    RecordRepo::all(conn)?
        .into_iter()
        .map(|rm| -> Result<RecordSummary> {
            Ok(RecordSummary {
                best: best_weight(&rm.history)?,
                latest: latest_weight(&rm.history)?,
                series: to_chart_series(&rm.history),
                exercise: rm.exercise,
            })
        })
        .collect()
}

pub fn handle_stats(conn: &Connection, config: &AppConfig) -> Result<()> {
    let report = build_profile_report(conn, &Local::now(), config.reports.week_start)?;
    let profile = &report.profile;
    let goal = profile.goal as u32;
    let this_week = report
        .weekly
        .last()
        .map(ChartPoint::value_or_zero)
        .unwrap_or(0.0) as u32;

    println!();
    let title = if profile.username.is_empty() {
        "Profile"
    } else {
        profile.username.as_str()
    };
    println_colored!(ACCENT, "  {}", title);
    println!();
    print_metrics(profile);
    println!();

    if goal == 0 {
        println_colored!(DIM, "  No weekly goal set. Use `benchmark goal <n>`");
    } else if this_week >= goal {
        println_colored!(
            GREEN,
            "  This week:  {}  {}/{} ✓",
            progress_bar(this_week, goal, 10),
            this_week,
            goal
        );
    } else {
        println_colored!(
            AMBER,
            "  This week:  {}  {}/{}",
            progress_bar(this_week, goal, 10),
            this_week,
            goal
        );
    }
    println!();

    println_colored!(DIM, "  Workouts per week, last {} weeks (│ = goal)", WEEKS_SHOWN);
    for line in render_bars(
        &report.weekly,
        report.weekly_max,
        goal as f64,
        config.reports.bar_width,
    ) {
        println!("  {}", line);
    }
    println!();

    if !report.records.is_empty() {
        println_colored!(DIM, "  Personal records");
        for s in &report.records {
            println!(
                "  {}  best {:>6}  latest {:>6}",
                pad_right(&s.exercise, 26),
                format_weight(s.best),
                format_weight(s.latest)
            );
        }
        println!();
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, config: &AppConfig) -> Result<()> {
    let report = build_profile_report(conn, &Local::now(), config.reports.week_start)?;
    let json = serde_json::to_string_pretty(&report).context("Serializing report")?;
    println!("{}", json);
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
