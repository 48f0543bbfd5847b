use std::{ffi::OsString, io::Write, path::PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use arith::{MultiStep, StepError, Term, TermRef};
use tracing_subscriber::EnvFilter;
use util::repl;

mod samples;

const DEFAULT_HISTORY: &str = "history.txt";

#[derive(PartialEq, Eq, Debug)]
struct Config {
    history: Option<PathBuf>,
    max_steps: Option<usize>,
}

impl Config {
    fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var_os(key))
    }

    fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let history = match var("ARITH_HISTORY") {
            Some(path) if path.is_empty() => None,
            Some(path) => Some(path.into()),
            None => Some(DEFAULT_HISTORY.into()),
        };
        let max_steps = match var("ARITH_MAX_STEPS") {
            Some(limit) => {
                let limit = limit
                    .into_string()
                    .map_err(|s| anyhow!("ARITH_MAX_STEPS is not valid unicode: {s:?}"))?;
                Some(
                    limit
                        .parse()
                        .with_context(|| format!("invalid ARITH_MAX_STEPS `{limit}`"))?,
                )
            }
            None => None,
        };
        Ok(Self { history, max_steps })
    }
}

struct Session {
    config: Config,
}

fn sample(name: &str) -> Result<TermRef> {
    if name.is_empty() {
        bail!("missing sample name, try `list`");
    }
    samples::lookup(name).ok_or_else(|| anyhow!("unknown sample `{name}`, try `list`"))
}

fn describe(term: &Term) -> String {
    match term.as_nat() {
        Some(n) => format!("{term} : value ({n})"),
        None if term.is_value() => format!("{term} : value"),
        None => format!("{term} : stuck"),
    }
}

impl Session {
    fn run(&self, input: &str, out: &mut impl Write) -> Result<()> {
        let input = input.trim();
        let (command, name) = input
            .split_once(char::is_whitespace)
            .map(|(command, name)| (command, name.trim()))
            .unwrap_or((input, ""));
        match command {
            "" => {}
            "list" => {
                for (name, term) in samples::catalogue() {
                    writeln!(out, "{name}: {term}")?;
                }
            }
            "show" => writeln!(out, "{}", sample(name)?)?,
            "reduce" => {
                let term = sample(name)?;
                match arith::step(&term) {
                    Ok(reduct) => writeln!(out, "{reduct}")?,
                    Err(StepError::NoRuleApplies) => writeln!(out, "no rule applies")?,
                    Err(e) => return Err(e.into()),
                }
            }
            "eval" => {
                let m = MultiStep::new(sample(name)?);
                let normal = match self.config.max_steps {
                    Some(limit) => m.evaluate_bounded(limit)?,
                    None => m.evaluate()?,
                };
                writeln!(out, "{}", describe(&normal))?;
            }
            "trace" => {
                let m = MultiStep::new(sample(name)?);
                writeln!(out, "   {m}")?;
                for reduct in m.steps() {
                    writeln!(out, "-> {}", reduct?)?;
                }
            }
            _ => bail!("unknown command `{command}`, expected one of: list, show, reduce, eval, trace"),
        }
        Ok(())
    }
}

impl repl::Repl for Session {
    type Error = anyhow::Error;

    fn history(&self) -> Option<PathBuf> {
        self.config.history.clone()
    }

    fn execute(&mut self, input: &str) -> Result<(), Self::Error> {
        let stdout = std::io::stdout();
        if let Err(e) = self.run(input, &mut stdout.lock()) {
            eprintln!("Error: {e:#}");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let config = Config::from_env()?;
    tracing::debug!(?config, "starting");
    repl::start_repl(Session { config })?;
    Ok(())
}
