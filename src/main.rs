//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use chrono::Local;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use std::io::{self, stdout, BufRead, Write};
use tracing_subscriber::EnvFilter;

use fitlog_lib::{
    progress, session, AppService, Difficulty, EditExerciseParams, EditPlanParams, Exercise,
    ExerciseType, MuscleGroup, NewExercise, NewPlan, PlanExercise, ProgressSummary,
    RecentSessionView, SessionDraft, TrainingPlan, Units, VolumePoint, WeekdayCount,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli_args = cli::parse_args();
    let export_csv = cli_args.export_csv;

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();

        eprintln!("Generating completion script for {}...", shell); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout()); // Print script to stdout
        return Ok(());
    }

    // Initialize the application service (loads config, opens the database)
    let mut service =
        AppService::initialize().context("Failed to initialize application service")?;
    let header_color = service.config.theme.header();

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }

        // --- Exercise Commands ---
        cli::Commands::CreateExercise {
            title,
            description,
            muscle_group,
            type_,
            difficulty,
            image,
        } => {
            let exercise = service
                .create_exercise(NewExercise {
                    title: title.trim().to_string(),
                    description,
                    muscle_group: cli_muscle_group(muscle_group),
                    exercise_type: cli_exercise_type(type_),
                    difficulty: cli_difficulty(difficulty),
                    image_url: image.filter(|url| !url.trim().is_empty()),
                })
                .context("Error creating exercise")?;
            println!(
                "Successfully added exercise: '{}' ({}, {}, {}) ID: {}",
                exercise.title,
                exercise.muscle_group,
                exercise.exercise_type,
                exercise.difficulty,
                exercise.id
            );
        }
        cli::Commands::EditExercise {
            id,
            title,
            description,
            muscle_group,
            type_,
            difficulty,
            image,
        } => {
            let image_update = image.map(|url| {
                let url = url.trim().to_string();
                (!url.is_empty()).then_some(url)
            });
            let params = EditExerciseParams {
                id: id.clone(),
                title: title.map(|t| t.trim().to_string()),
                description,
                muscle_group: muscle_group.map(cli_muscle_group),
                exercise_type: type_.map(cli_exercise_type),
                difficulty: difficulty.map(cli_difficulty),
                image_url: image_update,
            };
            match service.edit_exercise(params) {
                Ok(Some(exercise)) => {
                    println!("Successfully updated exercise '{}' (ID: {}).", exercise.title, id)
                }
                Ok(None) => bail!("Exercise not found: {}", id),
                Err(e) => bail!("Error editing exercise '{}': {}", id, e),
            }
        }
        cli::Commands::DeleteExercise { id } => {
            if service.delete_exercise(&id)? {
                println!("Successfully deleted exercise ID {id}.");
                println!("Plans and past sessions that used it now show it as unknown.");
            } else {
                bail!("Exercise not found: {}", id);
            }
        }
        cli::Commands::ListExercises { search } => {
            let exercises = service.search_exercises(search.as_deref().unwrap_or(""));
            if exercises.is_empty() {
                println!("No exercises found.");
            } else if export_csv {
                print_exercise_csv(&exercises)?;
            } else {
                print_exercise_table(&exercises, header_color);
            }
        }

        // --- Plan Commands ---
        cli::Commands::CreatePlan {
            title,
            description,
            exercises,
        } => {
            let rows = parse_plan_rows(&service, &exercises)?;
            let plan = service
                .create_plan(NewPlan {
                    title: title.trim().to_string(),
                    description,
                    exercises: rows,
                })
                .context("Error creating plan")?;
            println!(
                "Successfully created plan '{}' with {} exercises. ID: {}",
                plan.title,
                plan.exercises.len(),
                plan.id
            );
        }
        cli::Commands::EditPlan {
            id,
            title,
            description,
            exercises,
        } => {
            let rows = if exercises.is_empty() {
                None
            } else {
                Some(parse_plan_rows(&service, &exercises)?)
            };
            let params = EditPlanParams {
                id: id.clone(),
                title: title.map(|t| t.trim().to_string()),
                description,
                exercises: rows,
            };
            match service.edit_plan(params) {
                Ok(Some(plan)) => println!(
                    "Successfully updated plan '{}' (ID: {}), last updated {}.",
                    plan.title,
                    plan.id,
                    plan.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                ),
                Ok(None) => bail!("Plan not found: {}", id),
                Err(e) => bail!("Error editing plan '{}': {}", id, e),
            }
        }
        cli::Commands::DeletePlan { id } => {
            if service.delete_plan(&id)? {
                println!("Successfully deleted plan ID {id}.");
            } else {
                bail!("Plan not found: {}", id);
            }
        }
        cli::Commands::ListPlans { search } => {
            let plans = service.search_plans(search.as_deref().unwrap_or(""));
            if plans.is_empty() {
                println!("No training plans found. Create one with 'create-plan'.");
            } else if export_csv {
                print_plan_csv(&plans)?;
            } else {
                print_plan_table(&plans, header_color);
            }
        }
        cli::Commands::ShowPlan { id } => {
            let Some(plan) = service.store.plan(&id) else {
                bail!("Plan not found: {}", id);
            };
            print_plan_detail(&service, plan, header_color);
        }

        // --- Training ---
        cli::Commands::Train { plan_id } => {
            let draft = match service.start_session(&plan_id) {
                Ok(draft) => draft,
                Err(e) => bail!("{e}. Use 'list-plans' to see available plans."),
            };
            run_training_session(&mut service, draft, header_color)?;
        }

        // --- Progress ---
        cli::Commands::History { limit } => {
            let recent = service.recent_sessions_with_limit(limit)?;
            if recent.is_empty() {
                println!("No workout history available yet. Start training to see your progress!");
            } else if export_csv {
                print_history_csv(&recent, service.config.units)?;
            } else {
                print_history_table(&recent, header_color, service.config.units);
            }
        }
        cli::Commands::Progress => {
            let summary = service.progress_summary();
            let volume = service.volume_by_date_sorted();
            let frequency = service.frequency_by_weekday();
            if export_csv {
                print_volume_csv(&volume, service.config.units)?;
            } else {
                print_summary(&summary);
                if volume.is_empty() {
                    println!("No workout data available yet.");
                } else {
                    print_volume_table(&volume, header_color, service.config.units);
                    print_frequency_table(&frequency, header_color);
                }
            }
        }

        // --- Paths & Config ---
        cli::Commands::DbPath => {
            println!("Database file is located at: {:?}", service.get_db_path());
        }
        cli::Commands::ConfigPath => {
            println!("Config file is located at: {:?}", service.get_config_path());
        }
        cli::Commands::SetUnits { units } => {
            let units = match units {
                cli::UnitsCli::Metric => Units::Metric,
                cli::UnitsCli::Imperial => Units::Imperial,
            };
            service.set_units(units)?;
            println!("Weights will be entered and shown in {}.", units.weight_label());
        }
        cli::Commands::SetRecentLimit { limit } => {
            service.set_recent_sessions_limit(limit)?;
            println!("History will list the last {limit} sessions.");
        }
        cli::Commands::SetHeaderColor { color } => {
            service.set_header_color(&color)?;
            println!("Table header colour set to {}.", service.config.theme.header_color);
        }
    }

    Ok(())
}

fn cli_muscle_group(value: cli::MuscleGroupCli) -> MuscleGroup {
    match value {
        cli::MuscleGroupCli::Chest => MuscleGroup::Chest,
        cli::MuscleGroupCli::Back => MuscleGroup::Back,
        cli::MuscleGroupCli::Shoulders => MuscleGroup::Shoulders,
        cli::MuscleGroupCli::Arms => MuscleGroup::Arms,
        cli::MuscleGroupCli::Legs => MuscleGroup::Legs,
        cli::MuscleGroupCli::Core => MuscleGroup::Core,
        cli::MuscleGroupCli::FullBody => MuscleGroup::FullBody,
        cli::MuscleGroupCli::Cardio => MuscleGroup::Cardio,
    }
}

fn cli_exercise_type(value: cli::ExerciseTypeCli) -> ExerciseType {
    match value {
        cli::ExerciseTypeCli::Strength => ExerciseType::Strength,
        cli::ExerciseTypeCli::Cardio => ExerciseType::Cardio,
        cli::ExerciseTypeCli::Flexibility => ExerciseType::Flexibility,
        cli::ExerciseTypeCli::Balance => ExerciseType::Balance,
    }
}

fn cli_difficulty(value: cli::DifficultyCli) -> Difficulty {
    match value {
        cli::DifficultyCli::Beginner => Difficulty::Beginner,
        cli::DifficultyCli::Intermediate => Difficulty::Intermediate,
        cli::DifficultyCli::Advanced => Difficulty::Advanced,
        cli::DifficultyCli::Expert => Difficulty::Expert,
    }
}

/// Parses `EXERCISE_ID[:SETS[:REPS[:REST_SECS]]]`, filling in the plan defaults.
fn parse_plan_row(raw: &str) -> Result<PlanExercise> {
    let mut parts = raw.split(':').map(str::trim);
    let exercise_id = parts.next().filter(|id| !id.is_empty());
    let Some(exercise_id) = exercise_id else {
        bail!("Plan row '{}' is missing an exercise id", raw);
    };
    let mut row = PlanExercise::with_defaults(exercise_id);
    let field = |name: &str, target: &mut u32, value: Option<&str>| -> Result<()> {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            *target = value
                .parse()
                .with_context(|| format!("Invalid {name} '{value}' in plan row '{raw}'"))?;
        }
        Ok(())
    };
    field("sets", &mut row.sets, parts.next())?;
    field("reps", &mut row.reps, parts.next())?;
    field("rest time", &mut row.rest_time, parts.next())?;
    if parts.next().is_some() {
        bail!("Plan row '{}' has too many fields", raw);
    }
    Ok(row)
}

fn parse_plan_rows(service: &AppService, raw_rows: &[String]) -> Result<Vec<PlanExercise>> {
    raw_rows
        .iter()
        .map(|raw| {
            let row = parse_plan_row(raw)?;
            if service.store.exercise(&row.exercise_id).is_none() {
                bail!(
                    "Unknown exercise id '{}'. Use 'list-exercises' to see available exercises.",
                    row.exercise_id
                );
            }
            Ok(row)
        })
        .collect()
}

// ---- Guided training session ----

#[derive(Debug, Clone, PartialEq)]
enum TrainCommand {
    Weight(usize, String),
    Reps(usize, String),
    Rpe(usize, String),
    Toggle(usize),
    Next,
    Previous,
    Finish,
    Quit,
    Help,
}

/// Parses one line typed during a session. Set numbers are 1-based on screen.
fn parse_train_command(line: &str) -> Result<TrainCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("Type 'h' for help.".to_string());
    };
    let set_number = |word: Option<&str>| -> Result<usize, String> {
        let word = word.ok_or_else(|| "Missing set number.".to_string())?;
        match word.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("'{word}' is not a set number.")),
        }
    };
    let command = match verb.to_lowercase().as_str() {
        "w" | "weight" => {
            let set = set_number(words.next())?;
            TrainCommand::Weight(set, words.next().unwrap_or("").to_string())
        }
        "r" | "reps" => {
            let set = set_number(words.next())?;
            TrainCommand::Reps(set, words.next().unwrap_or("").to_string())
        }
        "e" | "rpe" => {
            let set = set_number(words.next())?;
            TrainCommand::Rpe(set, words.next().unwrap_or("").to_string())
        }
        "c" | "done" => TrainCommand::Toggle(set_number(words.next())?),
        "n" | "next" => TrainCommand::Next,
        "p" | "prev" => TrainCommand::Previous,
        "f" | "finish" => TrainCommand::Finish,
        "q" | "quit" => TrainCommand::Quit,
        "h" | "?" | "help" => TrainCommand::Help,
        other => return Err(format!("Unknown command '{other}'. Type 'h' for help.")),
    };
    Ok(command)
}

fn print_train_help(units: Units) {
    println!("Commands (set numbers start at 1):");
    println!("  w <set> <weight>   set weight in {}", units.weight_label());
    println!("  r <set> <reps>     set reps");
    println!("  e <set> <rpe>      set perceived exertion 1-10 (empty clears)");
    println!("  c <set>            mark set done / not done");
    println!("  n / p              next / previous exercise");
    println!("  f                  finish and save (on the last exercise)");
    println!("  q                  quit without saving");
}

fn print_current_exercise(
    service: &AppService,
    draft: &SessionDraft,
    header_color: Color,
) {
    let Some(data) = draft.current() else {
        println!("This plan has no exercises.");
        return;
    };
    let units = service.config.units;
    let exercise = service.store.exercise(&data.exercise_id);

    println!();
    println!(
        "{} - Exercise {} of {}",
        draft.plan_title(),
        draft.current_exercise_index() + 1,
        draft.exercise_count()
    );
    match exercise {
        Some(exercise) => {
            println!("{} [{} | {}]", exercise.title, exercise.muscle_group, exercise.difficulty);
            if !exercise.description.is_empty() {
                println!("{}", exercise.description);
            }
        }
        None => println!("{}", service.exercise_title(&data.exercise_id)),
    }
    if let Some(planned) = draft.current_planned().filter(|p| p.rest_time > 0) {
        println!("Rest: {}s", planned.rest_time);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Set").fg(header_color),
            Cell::new(format!("Weight ({})", units.weight_label())).fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("RPE").fg(header_color),
            Cell::new("Done").fg(header_color),
        ]);
    for (index, set) in data.sets.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(format!("{:.1}", units.from_kg(set.weight))),
            Cell::new(set.reps),
            Cell::new(set.rpe.map_or("-".to_string(), |rpe| rpe.to_string())),
            if set.completed {
                Cell::new("yes").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                Cell::new("no")
            },
        ]);
    }
    println!("{table}");
}

fn run_training_session(
    service: &mut AppService,
    mut draft: SessionDraft,
    header_color: Color,
) -> Result<()> {
    let units = service.config.units;
    print_train_help(units);
    print_current_exercise(service, &draft, header_color);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            println!("Input closed. Session discarded.");
            return Ok(());
        };
        let line = line?;

        let command = match parse_train_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match command {
            TrainCommand::Weight(set, input) => match units {
                Units::Metric => draft.set_weight(set, &input),
                Units::Imperial => {
                    draft.set_weight_value(set, units.to_kg(session::coerce_weight(&input)))
                }
            },
            TrainCommand::Reps(set, input) => draft.set_reps(set, &input),
            TrainCommand::Rpe(set, input) => draft.set_rpe(set, &input),
            TrainCommand::Toggle(set) => draft.toggle_completed(set),
            TrainCommand::Next => {
                if draft.is_last_exercise() {
                    println!("This is the last exercise. Type 'f' to finish.");
                }
                draft.advance();
            }
            TrainCommand::Previous => draft.retreat(),
            TrainCommand::Finish => {
                if !draft.is_last_exercise() {
                    println!("Finish is available on the last exercise. Type 'n' to move on.");
                    continue;
                }
                let saved = service.finish_session(draft)?;
                println!(
                    "Workout completed and saved! {} on {} (volume {:.1} {}).",
                    service.plan_title(&saved.plan_id),
                    saved.date(),
                    units.from_kg(saved.volume()),
                    units.weight_label()
                );
                return Ok(());
            }
            TrainCommand::Quit => {
                println!("Session discarded.");
                return Ok(());
            }
            TrainCommand::Help => {
                print_train_help(units);
                continue;
            }
        }
        print_current_exercise(service, &draft, header_color);
    }
}

// ---- Output ----

fn print_exercise_table(exercises: &[&Exercise], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(header_color),
            Cell::new("Title").fg(header_color),
            Cell::new("Muscle Group").fg(header_color),
            Cell::new("Type").fg(header_color),
            Cell::new("Difficulty").fg(header_color),
            Cell::new("Description").fg(header_color),
        ]);

    for exercise in exercises {
        table.add_row(vec![
            Cell::new(&exercise.id),
            Cell::new(&exercise.title),
            Cell::new(exercise.muscle_group),
            Cell::new(exercise.exercise_type),
            Cell::new(exercise.difficulty),
            Cell::new(&exercise.description),
        ]);
    }
    println!("{table}");
}

fn print_plan_table(plans: &[&TrainingPlan], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(header_color),
            Cell::new("Title").fg(header_color),
            Cell::new("Exercises").fg(header_color),
            Cell::new("Description").fg(header_color),
            Cell::new("Updated").fg(header_color),
        ]);

    for plan in plans {
        table.add_row(vec![
            Cell::new(&plan.id),
            Cell::new(&plan.title),
            Cell::new(plan.exercises.len()),
            Cell::new(&plan.description),
            Cell::new(plan.updated_at.with_timezone(&Local).format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");
}

fn print_plan_detail(service: &AppService, plan: &TrainingPlan, header_color: Color) {
    println!("{} (ID: {})", plan.title, plan.id);
    if !plan.description.is_empty() {
        println!("{}", plan.description);
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Sets").fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Rest (s)").fg(header_color),
        ]);
    for (index, row) in plan.exercises.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(service.exercise_title(&row.exercise_id)),
            Cell::new(row.sets),
            Cell::new(row.reps),
            Cell::new(row.rest_time),
        ]);
    }
    println!("{table}");
}

fn print_summary(summary: &ProgressSummary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Total Workouts").add_attribute(Attribute::Bold),
        Cell::new(summary.total_workouts),
    ]);
    table.add_row(vec![
        Cell::new("Total Time").add_attribute(Attribute::Bold),
        Cell::new(progress::format_duration(summary.total_duration_minutes)),
    ]);
    table.add_row(vec![
        Cell::new("Most Trained").add_attribute(Attribute::Bold),
        Cell::new(summary.most_trained),
    ]);
    table.add_row(vec![
        Cell::new("Last Workout").add_attribute(Attribute::Bold),
        Cell::new(
            summary
                .last_workout_date
                .map_or("N/A".to_string(), |date| date.to_string()),
        ),
    ]);
    println!("{table}");
}

fn print_volume_table(volume: &[VolumePoint], header_color: Color, units: Units) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Date").fg(header_color),
            Cell::new(format!("Volume (Reps*Weight {})", units.weight_label())).fg(header_color),
        ]);
    for point in volume {
        table.add_row(vec![
            Cell::new(point.date.format("%Y-%m-%d")),
            Cell::new(format!("{:.2}", units.from_kg(point.volume))),
        ]);
    }
    println!("{table}");
}

fn print_frequency_table(frequency: &[WeekdayCount], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            frequency
                .iter()
                .map(|day| Cell::new(day.weekday).fg(header_color))
                .collect::<Vec<_>>(),
        );
    table.add_row(
        frequency
            .iter()
            .map(|day| Cell::new(day.sessions))
            .collect::<Vec<_>>(),
    );
    println!("{table}");
}

fn print_history_table(recent: &[RecentSessionView], header_color: Color, units: Units) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Date").fg(header_color),
            Cell::new("Plan").fg(header_color),
            Cell::new("Duration").fg(header_color),
            Cell::new("Exercises").fg(header_color),
            Cell::new(format!("Volume ({})", units.weight_label())).fg(header_color),
            Cell::new("Session ID").fg(header_color),
        ]);
    for view in recent {
        table.add_row(vec![
            Cell::new(view.date.format("%Y-%m-%d")),
            Cell::new(&view.plan_title),
            Cell::new(progress::format_duration(view.duration_minutes)),
            Cell::new(view.exercise_count),
            Cell::new(format!("{:.1}", units.from_kg(view.volume))),
            Cell::new(&view.session_id),
        ]);
    }
    println!("{table}");
}

fn print_exercise_csv(exercises: &[&Exercise]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record([
        "ID",
        "Title",
        "Muscle_Group",
        "Type",
        "Difficulty",
        "Description",
        "Image",
    ])?;
    for exercise in exercises {
        writer.write_record([
            exercise.id.clone(),
            exercise.title.clone(),
            exercise.muscle_group.to_string(),
            exercise.exercise_type.to_string(),
            exercise.difficulty.to_string(),
            exercise.description.clone(),
            exercise.image_url.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_plan_csv(plans: &[&TrainingPlan]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["ID", "Title", "Exercises", "Description", "Created_UTC", "Updated_UTC"])?;
    for plan in plans {
        writer.write_record([
            plan.id.clone(),
            plan.title.clone(),
            plan.exercises.len().to_string(),
            plan.description.clone(),
            plan.created_at.to_rfc3339(),
            plan.updated_at.to_rfc3339(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_history_csv(recent: &[RecentSessionView], units: Units) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record([
        "Date",
        "Plan",
        "Duration_min",
        "Exercises",
        format!("Volume_{}", units.weight_label()).as_str(),
        "Session_ID",
    ])?;
    for view in recent {
        writer.write_record([
            view.date.format("%Y-%m-%d").to_string(),
            view.plan_title.clone(),
            format!("{:.2}", view.duration_minutes),
            view.exercise_count.to_string(),
            format!("{:.2}", units.from_kg(view.volume)),
            view.session_id.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_volume_csv(volume: &[VolumePoint], units: Units) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Date", format!("Volume_{}", units.weight_label()).as_str()])?;
    for point in volume {
        writer.write_record([
            point.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", units.from_kg(point.volume)),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
