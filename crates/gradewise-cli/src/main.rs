//! gradewise CLI: the terminal front-end for the grade calculator.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "gradewise", version, about = "Course grade and CGPA calculator")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter courses step by step and calculate the CGPA (default)
    Interactive {
        /// Reveal the CGPA without counting up
        #[arg(long)]
        no_animation: bool,
    },

    /// Compute the score and grade of a single course
    Compute {
        /// Course name
        #[arg(long)]
        name: String,

        /// Credit hours (1-10)
        #[arg(long)]
        credits: String,

        /// Comma-separated assignment scores; blanks count as 0
        #[arg(long, default_value = "")]
        assignments: String,

        /// Quiz 1 score (0-100)
        #[arg(long)]
        quiz1: String,

        /// Quiz 2 score (0-100)
        #[arg(long)]
        quiz2: String,

        /// Final exam score (0-100)
        #[arg(long)]
        final_exam: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Calculate the CGPA of a TOML course sheet
    Cgpa {
        /// Path to the course sheet
        #[arg(long)]
        courses: PathBuf,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report title (defaults to the sheet name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Show or toggle the saved theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeAction {
    /// Print the saved theme
    Show,
    /// Switch between dark and light
    Toggle,
}

fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "gradewise=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command.unwrap_or(Commands::Interactive {
        no_animation: false,
    }) {
        Commands::Interactive { no_animation } => {
            commands::interactive::execute(no_animation, config)
        }
        Commands::Compute {
            name,
            credits,
            assignments,
            quiz1,
            quiz2,
            final_exam,
            format,
        } => commands::compute::execute(name, credits, assignments, quiz1, quiz2, final_exam, format),
        Commands::Cgpa {
            courses,
            format,
            output,
            title,
        } => commands::cgpa::execute(courses, format, output, title, config),
        Commands::Theme { action } => {
            let toggle = matches!(action, Some(ThemeAction::Toggle));
            commands::theme::execute(toggle, config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
