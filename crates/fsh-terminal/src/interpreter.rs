//! Tokenizer and the read-eval-print loop.
//!
//! Routing is a fixed match on the lower-cased first token. Operations
//! answer with strings; the loop additionally catches panics so a single
//! bad command never tears down the session.

use std::any::Any;
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use fsh_types::error::FshError;

use crate::catalog::render_help;
use crate::file_commands::FileOps;

/// Printed before each read.
pub const PROMPT: &str = "> ";

/// Printed once when the loop starts.
pub const WELCOME: &str = "Welcome to the fsh command line.";

/// Printed when `exit` is entered.
pub const FAREWELL: &str = "Goodbye!";

thread_local! {
    /// Set while a guarded command runs; the panic hook stays silent then.
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the current panic hook so panics inside a guarded command are not
/// printed to the console. Panics elsewhere still reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !GUARDED.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// What the loop should do after one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print the message and read the next line.
    Continue(String),
    /// Stop the loop.
    Exit,
}

/// Interactive shell over a set of file operations.
pub struct Shell {
    ops: FileOps,
}

impl Shell {
    pub fn new(ops: FileOps) -> Self {
        Self { ops }
    }

    /// Dispatch a single input line.
    ///
    /// Command names are case-insensitive. An empty line is treated as an
    /// unrecognized command.
    pub fn execute(&self, line: &str) -> Flow {
        if line.is_empty() {
            return Flow::Continue(FshError::UnrecognizedCommand.to_string());
        }

        let tokens = tokenize(line);
        let args: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let name = args[0].to_lowercase();
        log::debug!("Dispatching '{name}' with {} argument(s)", args.len() - 1);

        let message = match name.as_str() {
            "tch" => self.ops.create(&args),
            "mv" => self.ops.rename_or_move(&args),
            "ls" => self.ops.list(&args),
            "cd" => self.ops.open_directory(&args),
            "help" => render_help(args.get(1).copied()),
            "exit" => return Flow::Exit,
            _ => FshError::UnrecognizedCommand.to_string(),
        };
        Flow::Continue(message)
    }

    /// [`Shell::execute`], with panics turned into a printed message.
    fn execute_guarded(&self, line: &str) -> Flow {
        install_quiet_hook();
        GUARDED.with(|g| g.set(true));
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.execute(line)));
        GUARDED.with(|g| g.set(false));
        match result {
            Ok(flow) => flow,
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                log::warn!("Command '{line}' panicked: {msg}");
                Flow::Continue(format!("Unexpected error: {msg}"))
            },
        }
    }

    /// Run the loop until `exit` or end of input.
    ///
    /// Only console I/O failures end the loop early.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{WELCOME}")?;
        writeln!(output)?;
        writeln!(output, "{}", render_help(None))?;

        let mut buf = Vec::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                log::debug!("End of input");
                break;
            }
            let raw = String::from_utf8_lossy(&buf);
            let line = raw.trim_end_matches(['\n', '\r']);

            match self.execute_guarded(line) {
                Flow::Continue(message) => writeln!(output, "{message}")?,
                Flow::Exit => {
                    writeln!(output, "{FAREWELL}")?;
                    break;
                },
            }
        }
        output.flush()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown failure".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tokenizer: double quotes group, spaces split.
// ---------------------------------------------------------------------------

/// Split a command line on spaces, keeping double-quoted runs together.
///
/// - `"` toggles quoting and is dropped from the output.
/// - Every unquoted space ends a token, so consecutive spaces produce empty
///   tokens.
/// - An unterminated quote simply runs to the end of the line.
///
/// The result always has at least one element; `tokenize("")` is `[""]`.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    tokens.push(current);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsh_platform::Launcher;
    use fsh_types::error::Result;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    struct NullLauncher;
    impl Launcher for NullLauncher {
        fn open(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    struct PanickingLauncher;
    impl Launcher for PanickingLauncher {
        fn open(&self, _path: &Path) -> Result<()> {
            panic!("launcher exploded");
        }
    }

    fn make_shell(dir: &Path) -> Shell {
        Shell::new(FileOps::new(dir, Box::new(NullLauncher)))
    }

    fn run_script(shell: &Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(Cursor::new(script.as_bytes()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn unrecognized() -> String {
        FshError::UnrecognizedCommand.to_string()
    }

    // ---- tokenize ----

    #[test]
    fn tokenize_empty_line() {
        assert_eq!(tokenize(""), [""]);
    }

    #[test]
    fn tokenize_simple() {
        assert_eq!(tokenize("a b"), ["a", "b"]);
    }

    #[test]
    fn tokenize_quoted_segment() {
        assert_eq!(tokenize("a \"b c\" d"), ["a", "b c", "d"]);
    }

    #[test]
    fn tokenize_unbalanced_quote() {
        assert_eq!(tokenize("a \"b"), ["a", "b"]);
        assert_eq!(tokenize("a \"b c"), ["a", "b c"]);
    }

    #[test]
    fn tokenize_quote_mid_token() {
        assert_eq!(tokenize("ab\"c d\"e f"), ["abc de", "f"]);
    }

    #[test]
    fn tokenize_keeps_empty_tokens() {
        assert_eq!(tokenize("a  b"), ["a", "", "b"]);
        assert_eq!(tokenize(" "), ["", ""]);
        assert_eq!(tokenize("\"\""), [""]);
    }

    #[test]
    fn tokenize_only_splits_on_space() {
        assert_eq!(tokenize("a\tb"), ["a\tb"]);
    }

    // ---- execute ----

    #[test]
    fn empty_line_is_unrecognized() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        assert_eq!(shell.execute(""), Flow::Continue(unrecognized()));
    }

    #[test]
    fn unknown_command_is_unrecognized() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        assert_eq!(shell.execute("bogus arg"), Flow::Continue(unrecognized()));
        assert_eq!(shell.execute(" ls"), Flow::Continue(unrecognized()));
    }

    #[test]
    fn exit_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        assert_eq!(shell.execute("exit"), Flow::Exit);
        assert_eq!(shell.execute("EXIT"), Flow::Exit);
    }

    #[test]
    fn help_shows_catalog() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let Flow::Continue(text) = shell.execute("Help") else {
            panic!("help must not exit");
        };
        assert_eq!(text, render_help(None));
    }

    #[test]
    fn help_with_trailing_space_or_unknown_name_shows_catalog() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let full = Flow::Continue(render_help(None));
        assert_eq!(shell.execute("help "), full);
        assert_eq!(shell.execute("help foo"), full);
        assert_eq!(shell.execute("HELP \"\""), full);
    }

    #[test]
    fn help_with_command_name_narrows_catalog() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let Flow::Continue(text) = shell.execute("help cd") else {
            panic!("help must not exit");
        };
        assert!(text.contains("- cd [path]"));
        assert!(!text.contains("- tch"));
    }

    #[test]
    fn routes_to_file_operations() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());

        assert_eq!(
            shell.execute("TCH \"two words.txt\""),
            Flow::Continue("File 'two words.txt' created successfully.".into())
        );
        assert!(tmp.path().join("two words.txt").is_file());

        assert_eq!(
            shell.execute("mv \"two words.txt\" one.txt"),
            Flow::Continue("File renamed successfully.".into())
        );
        assert!(tmp.path().join("one.txt").is_file());

        let Flow::Continue(listing) = shell.execute("ls") else {
            panic!("ls must not exit");
        };
        assert!(listing.contains("- one.txt"));

        assert_eq!(
            shell.execute("cd ."),
            Flow::Continue(format!("Directory '{}' opened.", tmp.path().join(".").display()))
        );
    }

    #[test]
    fn panic_in_operation_is_caught() {
        let tmp = TempDir::new().unwrap();
        let shell = Shell::new(FileOps::new(tmp.path(), Box::new(PanickingLauncher)));
        let out = run_script(&shell, "cd .\ntch after.txt\nexit\n");
        assert!(out.contains("Unexpected error: launcher exploded"), "{out}");
        assert!(out.contains("File 'after.txt' created successfully."));
        assert!(out.ends_with(&format!("{FAREWELL}\n")));
    }

    #[test]
    fn guard_is_cleared_after_caught_panic() {
        let tmp = TempDir::new().unwrap();
        let shell = Shell::new(FileOps::new(tmp.path(), Box::new(PanickingLauncher)));
        assert_eq!(
            shell.execute_guarded("cd ."),
            Flow::Continue("Unexpected error: launcher exploded".into())
        );
        assert!(!GUARDED.with(Cell::get));
        assert!(QUIET_HOOK.is_completed());
    }

    // ---- run ----

    #[test]
    fn help_bogus_exit_session() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let out = run_script(&shell, "help\nbogus\nexit\n");

        let help = render_help(None);
        let expected = format!(
            "{WELCOME}\n\n{help}\n{PROMPT}{help}\n{PROMPT}{}\n{PROMPT}{FAREWELL}\n",
            unrecognized()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn end_of_input_stops_loop() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let out = run_script(&shell, "tch a.txt");
        assert!(out.contains("File 'a.txt' created successfully."));
        assert!(out.ends_with(PROMPT));
        assert!(!out.contains(FAREWELL));
    }

    #[test]
    fn blank_input_line_is_unrecognized() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let out = run_script(&shell, "\r\nexit\r\n");
        assert!(out.contains(&format!("{PROMPT}{}\n", unrecognized())));
        assert!(out.ends_with(&format!("{FAREWELL}\n")));
    }

    #[test]
    fn invalid_utf8_input_is_tolerated() {
        let tmp = TempDir::new().unwrap();
        let shell = make_shell(tmp.path());
        let mut out = Vec::new();
        shell
            .run(Cursor::new(b"\xff\xfe\nexit\n".to_vec()), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(&unrecognized()));
        assert!(out.ends_with(&format!("{FAREWELL}\n")));
    }

    #[test]
    fn session_does_not_touch_files_on_listing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("f"), b"").unwrap();
        let shell = make_shell(tmp.path());
        let out = run_script(&shell, "ls -R\nls -R\nexit\n");
        let first = out.find("Directories in").unwrap();
        let second = out.rfind("Directories in").unwrap();
        assert!(first < second);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tokenize_never_empty(input in ".{0,64}") {
                prop_assert!(!tokenize(&input).is_empty());
            }

            #[test]
            fn unquoted_input_splits_on_every_space(input in "[a-z ]{0,40}") {
                let expected: Vec<String> = input.split(' ').map(str::to_string).collect();
                prop_assert_eq!(tokenize(&input), expected);
            }

            #[test]
            fn quoted_token_survives_intact(word in "[a-z ]{0,20}") {
                let tokens = tokenize(&format!("tch \"{word}\""));
                prop_assert_eq!(tokens, vec!["tch".to_string(), word]);
            }

            #[test]
            fn quotes_never_appear_in_tokens(input in "[a-z \"]{0,40}") {
                for token in tokenize(&input) {
                    prop_assert!(!token.contains('"'));
                }
            }
        }
    }
}
