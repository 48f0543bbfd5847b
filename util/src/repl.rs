use std::path::PathBuf;

use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Command failed: {0:?}")]
    Command(E),
}

pub trait Repl {
    type Error: std::fmt::Debug;
    fn history(&self) -> Option<PathBuf> {
        None
    }
    fn execute(&mut self, input: &str) -> Result<(), Self::Error>;
}

/// Joins lines ending in `\` into one input.
#[derive(Default)]
struct Pending(Option<String>);

impl Pending {
    fn feed(&mut self, mut line: String) -> Option<String> {
        if line.ends_with('\\') {
            line.pop();
            line.push('\n');
            self.0.get_or_insert_with(String::new).push_str(&line);
            return None;
        }
        Some(match self.0.take() {
            Some(mut input) => {
                input.push_str(&line);
                input
            }
            None => line,
        })
    }
}

pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    let history = repl.history();
    if let Some(path) = &history {
        if let Err(e) = editor.load_history(path) {
            debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }
    let mut pending = Pending::default();
    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                let Some(input) = pending.feed(line) else {
                    continue;
                };
                editor.add_history_entry(input.as_str());
                repl.execute(&input).map_err(Error::Command)?;
                if let Some(path) = &history {
                    if let Err(e) = editor.save_history(path) {
                        warn!(path = %path.display(), error = %e, "failed to save history");
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break Ok(());
            }
            Err(e) => break Err(Error::Readline(e)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_continuation() {
        let mut pending = Pending::default();
        assert_eq!(pending.feed("eval \\".to_string()), None);
        assert_eq!(
            pending.feed("pred-two".to_string()),
            Some("eval \npred-two".to_string())
        );
        assert_eq!(pending.feed("list".to_string()), Some("list".to_string()));
    }
}
