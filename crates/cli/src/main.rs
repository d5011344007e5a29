use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::style::Stylize;
use itertools::Itertools;
use log::{debug, info};

use parex_cli::cli_args::Args;
use parex_cli::console::{Confirmation, OptionSet, Question};
use parex_cli::io::Io;
use parex_core::error::Result;
use parex_core::writer::Writer;

const DECLINED_EXIT_CODE: i32 = 128;

const PHRASES: [&str; 5] = [
    "I'm thinking...",
    "I'm writing...",
    "Where's my paper?",
    "Where's my pencil?",
    "I'd like some coffee.",
];

/// Writes one phrase per step, pausing between steps.
fn prepare_questions(sink: &mut impl Writer, steps: usize, delay: Duration) -> Result<()> {
    for (step, phrase) in PHRASES.iter().cycle().take(steps).enumerate() {
        debug!("Monitor step {step}");
        sink.write_line(phrase)?;
        thread::sleep(delay);
    }
    Ok(())
}

fn purpose_reply(key: &str) -> &'static str {
    match key {
        "ac" => "An excellent choice",
        "e" => "You found a powerful tool",
        "?" => "So long, and thanks for all the fish",
        _ => "What?!",
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;
    let mut io = Io::stdio(settings);

    io.clear_screen()?;
    io.write_header("Parex Commander\nExample of using the console prompts")?;

    let go = io.make_confirmation(&Confirmation::new("Do you want to continue?"))?;
    if !go {
        io.write_line(&"Err... maybe next time.".yellow().to_string())?;
        info!("User declined to continue");
        io.exit_error(DECLINED_EXIT_CODE);
    }
    io.write_line(&"Thanks!".green().to_string())?;

    if !args.skip_monitor {
        let (steps, delay) = (args.steps, args.delay());
        io.monitoring("Wait a minute, I'm preparing questions.", |sink| {
            prepare_questions(sink, steps, delay)
        })??;
    }

    let name = io.make_question(&Question::new("What is your name?").validator(|text: &str| {
        if text.is_empty() {
            Err("Name is required".to_string())
        } else {
            Ok(())
        }
    }))?;
    io.write_line(&format!("Hi, {}", name.as_str().bold()))?;

    let purpose = io.make_selection(
        "What is your purpose?",
        OptionSet::from_pairs([("ac", "App creator"), ("e", "Explorer"), ("?", "42")]),
    )?;
    io.write_line(purpose_reply(purpose.value()))?;

    let frameworks = io.make_multi_selection(
        "What is your favourite JS framework?",
        ["Angular", "React", "Svelte", "Vue"],
        true,
    )?;
    io.write_line(&format!(
        "WOW! I like {} too!",
        frameworks.iter().map(|choice| choice.value()).join(" and ")
    ))?;

    io.write_line("Thanks, we'll get back to you.")?;
    io.exit_success()
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
