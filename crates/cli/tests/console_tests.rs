use indexmap::IndexMap;

use parex_cli::console::ui::SELECT_SOME_OPTION;
use parex_cli::console::{Confirmation, OptionKey, OptionSet, Question};
use parex_cli::io::Io;
use parex_core::ansi::erase_lines_above;
use parex_core::config::Settings;
use parex_core::error::Error;
use parex_core::input::ScriptedInput;
use parex_core::key::Key;
use parex_core::terminal::NoopTerminal;
use parex_core::writer::{BufferWriter, Writer};

type TestIo = Io<BufferWriter, ScriptedInput, NoopTerminal>;

fn io_with(input: ScriptedInput) -> TestIo {
    let settings = Settings {
        monitor_lines: 2,
        ..Settings::default()
    };
    Io::new(BufferWriter::new(), input, NoopTerminal::new(), settings)
}

const FRAMEWORKS: [&str; 4] = ["Angular", "React", "Svelte", "Vue"];

#[test]
fn test_full_walkthrough() {
    let input = ScriptedInput::new()
        .line("YES")
        .line("")
        .line("Ada")
        .keys(&[Key::ArrowDown, Key::Enter])
        .keys(&[
            Key::ArrowDown,
            Key::Space,
            Key::ArrowDown,
            Key::Space,
            Key::Enter,
        ]);
    let mut io = io_with(input);

    assert!(io
        .make_confirmation(&Confirmation::new("Continue?"))
        .unwrap());

    let outcome = io
        .monitoring("Preparing", |sink| {
            for i in 5..9 {
                sink.write_line(&format!("Processing item #{i}"))?;
            }
            Ok::<_, Error>("Import finished.")
        })
        .unwrap()
        .unwrap();
    assert_eq!(outcome, "Import finished.");

    let name = io
        .make_question(&Question::new("What is your name?").validator(|text: &str| {
            if text.is_empty() {
                Err("Name is required".to_string())
            } else {
                Ok(())
            }
        }))
        .unwrap();
    assert_eq!(name, "Ada");

    let purpose = io
        .make_selection(
            "What is your purpose?",
            OptionSet::from_pairs([("ac", "App creator"), ("e", "Explorer"), ("?", "42")]),
        )
        .unwrap();
    assert_eq!(purpose.value(), "e");
    assert_eq!(purpose.label, "Explorer");

    let frameworks = io
        .make_multi_selection("Favourite framework?", FRAMEWORKS, true)
        .unwrap();
    let values: Vec<&str> = frameworks.iter().map(|choice| choice.value()).collect();
    assert_eq!(values, vec!["React", "Svelte"]);

    let (writer, input, terminal) = io.into_parts();
    assert_eq!(input.remaining(), 0);
    // One engagement per menu and one for the monitor
    assert_eq!(terminal.enter_count(), 3);
    assert_eq!(terminal.restore_count(), 3);
    assert!(writer.contents().contains("Name is required\n"));
    assert!(writer.contents().contains(":> Preparing\n"));
}

#[test]
fn test_svelte_is_third_option() {
    let mut io = io_with(ScriptedInput::new().keys(&[Key::ArrowDown, Key::ArrowDown, Key::Enter]));
    let choice = io.make_selection("Favourite?", FRAMEWORKS).unwrap();

    assert_eq!(choice.value(), "Svelte");
    assert_eq!(choice.position, 2);
    assert_eq!(choice.key, OptionKey::Position(2));
}

#[test]
fn test_index_map_options_return_keys() {
    let mut options = IndexMap::new();
    options.insert("php".to_string(), "PHP array".to_string());
    options.insert("json".to_string(), "JSON".to_string());

    let mut io = io_with(ScriptedInput::new().keys(&[Key::ArrowUp, Key::Enter]));
    let choice = io.make_selection("Config type?", options).unwrap();

    assert_eq!(choice.value(), "json");
}

#[test]
fn test_required_multi_selection_asks_again() {
    let mut io = io_with(ScriptedInput::new().keys(&[Key::Enter, Key::Space, Key::Enter]));
    let choices = io
        .make_multi_selection("Favourite?", FRAMEWORKS, true)
        .unwrap();

    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].value(), "Angular");
    assert!(io.writer().contents().contains(SELECT_SOME_OPTION));
}

#[test]
fn test_optional_multi_selection_can_be_empty() {
    let mut io = io_with(ScriptedInput::new().key(&Key::Enter));
    let choices = io
        .make_multi_selection("Favourite?", FRAMEWORKS, false)
        .unwrap();

    assert!(choices.is_empty());
    assert!(!io.writer().contents().contains(SELECT_SOME_OPTION));
}

#[test]
fn test_empty_options_never_touch_terminal() {
    let mut io = io_with(ScriptedInput::new());
    let result = io.make_selection("Nothing?", Vec::<String>::new());

    assert!(matches!(result, Err(Error::EmptyOptions)));
    assert_eq!(io.terminal().enter_count(), 0);
    assert_eq!(io.writer().contents(), "");
}

#[test]
fn test_closed_input_restores_terminal() {
    let mut io = io_with(ScriptedInput::new().key(&Key::ArrowDown));
    let result = io.make_selection("Favourite?", FRAMEWORKS);

    assert!(matches!(result, Err(Error::InputClosed)));
    assert_eq!(io.terminal().enter_count(), 1);
    assert_eq!(io.terminal().restore_count(), 1);
}

#[test]
fn test_menu_is_erased_after_selection() {
    let mut io = io_with(ScriptedInput::new().key(&Key::Enter));
    io.make_selection("Favourite?", FRAMEWORKS).unwrap();

    // Prompt, four options and the hint
    let tail = format!("{}\n", erase_lines_above(6));
    assert!(io.writer().contents().ends_with(&tail));
}

#[test]
fn test_unsupported_terminal_falls_back_to_line_mode() {
    let input = ScriptedInput::new().bytes(b"\x1b[B\n");
    let mut io = Io::new(
        BufferWriter::new(),
        input,
        NoopTerminal::unsupported(),
        Settings::default(),
    );

    let choice = io.make_selection("Favourite?", FRAMEWORKS).unwrap();

    assert_eq!(choice.value(), "React");
    assert!(io.writer().contents().contains("Raw key input is unavailable"));
    assert_eq!(io.terminal().enter_count(), 0);
}

#[test]
fn test_line_mode_crlf_does_not_answer_next_prompt() {
    let input = ScriptedInput::new().bytes(b"\r\n").bytes(b"n\r\n");
    let mut io = Io::new(
        BufferWriter::new(),
        input,
        NoopTerminal::unsupported(),
        Settings::default(),
    );

    let choice = io.make_selection("Config type?", ["php", "json"]).unwrap();
    let confirmed = io
        .make_confirmation(&Confirmation::new("Create config?"))
        .unwrap();

    assert_eq!(choice.value(), "php");
    assert!(!confirmed);
    let (_, input, _) = io.into_parts();
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_invalid_utf8_answer_is_reprompted() {
    let input = ScriptedInput::new().bytes(b"\xff\n").line("y");
    let mut io = io_with(input);

    assert!(io
        .make_confirmation(&Confirmation::new("Continue?"))
        .unwrap());
    assert!(io
        .writer()
        .contents()
        .contains("Please enter one of the options: y, yes, n, no"));
}

#[test]
fn test_confirmation_custom_aliases() {
    let mut io = io_with(ScriptedInput::new().line("nein"));
    let confirmation = Confirmation::new("Weiter?")
        .default_answer(false)
        .yes_aliases(["ja", "j"])
        .no_aliases(["nein", "n"]);

    assert!(!io.make_confirmation(&confirmation).unwrap());
    assert_eq!(io.writer().contents(), "Weiter? [ja/NEIN] ");
}

#[test]
fn test_question_default_value() {
    let mut io = io_with(ScriptedInput::new().line("   "));
    let answer = io
        .make_question(&Question::new("Environment?").default_value("dev"))
        .unwrap();

    assert_eq!(answer, "dev");
    assert_eq!(io.writer().contents(), "Environment? [dev] \n");
}

#[test]
fn test_monitor_zero_lines() {
    let mut io = io_with(ScriptedInput::new());
    let result = io.monitoring_with_lines("Nothing", 0, |_| ());

    assert!(matches!(result, Err(Error::ZeroMonitorHeight)));
}

#[test]
fn test_writer_passthrough() {
    let mut io = io_with(ScriptedInput::new());
    io.write("a").unwrap();
    io.write_line("b").unwrap();

    let mut writer = io.into_parts().0;
    assert_eq!(writer.take(), "ab\n");
    writer.write("c").unwrap();
    assert_eq!(writer.contents(), "c");
}
