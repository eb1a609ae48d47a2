use clap::{Parser, Subcommand};

use crate::models::SetOverride;

#[derive(Parser, Debug)]
#[command(name = "benchmark", version, author, about = "A terminal workout tracker: routines, history, 1RM records and weekly goals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup (username and weekly goal)
    Setup {
        /// Reset existing profile settings
        #[arg(long)]
        reset: bool,
    },
    /// Exercise catalog
    Exercise {
        #[command(subcommand)]
        action: ExerciseCommands,
    },
    /// Workout routines
    Routine {
        #[command(subcommand)]
        action: RoutineCommands,
    },
    /// Finish a workout from a routine and log it to history
    Workout {
        /// Routine id
        routine: i64,
        /// Time spent, in seconds
        #[arg(long)]
        duration: f64,
        /// Set actually performed, as E-S=WEIGHTxREPS (repeatable)
        #[arg(long = "set", value_name = "E-S=WxR")]
        sets: Vec<SetOverride>,
    },
    /// Show workout history
    History {
        /// Show this month's calendar with workout days marked
        #[arg(long)]
        calendar: bool,
    },
    /// One-rep-max records
    Record {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Set the weekly workout goal (0-7)
    Goal {
        #[arg(allow_negative_numbers = true)]
        goal: i64,
    },
    /// Show or edit the profile
    Profile {
        /// New username
        #[arg(long)]
        username: Option<String>,
    },
    /// Show totals, the weekly chart and personal bests
    Stats,
    /// Print report data as JSON
    Export,
}

#[derive(Subcommand, Debug)]
pub enum ExerciseCommands {
    /// List the catalog, optionally filtered
    List {
        /// Target or sub-target to include (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,
        /// Equipment to include (repeatable)
        #[arg(long)]
        equipment: Vec<String>,
    },
    /// Add an exercise to the catalog
    Add {
        name: String,
        /// Chest, Back, Arms, Shoulders, Legs or Core
        #[arg(long)]
        target: String,
        #[arg(long)]
        sub_target: Option<String>,
        /// Barbell, Dumbbell, Machine, Cable or Bodyweight
        #[arg(long)]
        equipment: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoutineCommands {
    /// Create an empty routine
    New {
        name: Option<String>,
    },
    /// List routines
    List,
    /// Show a routine's exercises and sets
    Show {
        id: i64,
    },
    /// Rename a routine, change its description or edit its sets
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// E-S=WEIGHTxREPS (repeatable)
        #[arg(long = "set", value_name = "E-S=WxR")]
        sets: Vec<SetOverride>,
    },
    /// Append an exercise to a routine
    AddExercise {
        id: i64,
        exercise: String,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        reps: Option<u32>,
        #[arg(long, default_value = "0")]
        weight: f64,
    },
    /// Remove an exercise from a routine by index
    RemoveExercise {
        id: i64,
        index: usize,
    },
    /// Delete a routine
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Log a one-rep max
    Add {
        exercise: String,
        weight: f64,
        /// Date as YYYY-MM-DD (defaults to now)
        #[arg(long)]
        date: Option<String>,
    },
    /// Best, latest and progression for one exercise
    Show {
        exercise: String,
    },
    /// Best and latest for every exercise
    List,
}
