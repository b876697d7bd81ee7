// src/cli.rs
use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan, run and review workouts", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print list/history/progress output as CSV instead of tables
    #[arg(long, global = true)]
    pub export_csv: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuscleGroupCli {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    FullBody,
    Cardio,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseTypeCli {
    Strength,
    Cardio,
    Flexibility,
    Balance,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyCli {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitsCli {
    Metric,
    Imperial,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Define a new exercise
    CreateExercise {
        /// Title of the exercise (e.g., "Bench Press")
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, value_enum, default_value_t = MuscleGroupCli::Chest)]
        muscle_group: MuscleGroupCli,
        #[arg(long = "type", value_enum, default_value_t = ExerciseTypeCli::Strength)]
        type_: ExerciseTypeCli,
        #[arg(long, value_enum, default_value_t = DifficultyCli::Beginner)]
        difficulty: DifficultyCli,
        /// Link to an illustration
        #[arg(long)]
        image: Option<String>,
    },
    /// Change fields of an existing exercise
    EditExercise {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_enum)]
        muscle_group: Option<MuscleGroupCli>,
        #[arg(long = "type", value_enum)]
        type_: Option<ExerciseTypeCli>,
        #[arg(long, value_enum)]
        difficulty: Option<DifficultyCli>,
        /// New image link; pass an empty string to remove it
        #[arg(long)]
        image: Option<String>,
    },
    DeleteExercise {
        id: String,
    },
    /// List exercises, optionally filtered by a search term
    ListExercises {
        /// Matches title, description, muscle group or type
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a training plan
    CreatePlan {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Plan row as EXERCISE_ID[:SETS[:REPS[:REST_SECS]]], repeat in order.
        /// Missing values default to 3 sets, 10 reps, 60s rest.
        #[arg(short, long = "exercise", value_name = "ROW", required = true)]
        exercises: Vec<String>,
    },
    /// Change fields of an existing plan
    EditPlan {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Replaces all plan rows when given (same format as create-plan)
        #[arg(short, long = "exercise", value_name = "ROW")]
        exercises: Vec<String>,
    },
    DeletePlan {
        id: String,
    },
    /// List training plans, optionally filtered by a search term
    ListPlans {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the exercises of one plan
    ShowPlan {
        id: String,
    },
    /// Run a guided workout session for a plan
    Train {
        plan_id: String,
    },
    /// List the most recent workout sessions
    History {
        /// How many sessions to show (defaults to the configured limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show progress statistics
    Progress,
    /// Show the path to the database file
    DbPath,
    /// Show the path to the config file
    ConfigPath,
    /// Set the units used to enter and display weights
    SetUnits {
        #[arg(value_enum)]
        units: UnitsCli,
    },
    /// Set how many sessions the history command lists by default
    SetRecentLimit { limit: usize },
    /// Set the table header colour (e.g. green, darkcyan)
    SetHeaderColor { color: String },
    /// Generate shell completion scripts
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> Command {
    Cli::command()
}
