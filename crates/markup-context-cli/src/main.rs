use anyhow::{Context, Result, bail};
use markup_context_config::Config;
use markup_context_engine::{Probe, Strategy, classify_with, io, offset_at};
use std::{env, path::PathBuf, process};

#[derive(Debug, PartialEq)]
struct Args {
    file: PathBuf,
    position: Position,
    language: Option<String>,
    strategy: Option<Strategy>,
}

/// Where the cursor is: a byte offset, or a 1-based `LINE:COL` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Position {
    Offset(usize),
    LineColumn { line: usize, column: usize },
}

impl Position {
    fn parse(raw: &str) -> Result<Self> {
        let Some((line, column)) = raw.split_once(':') else {
            let offset: usize = raw
                .parse()
                .with_context(|| format!("'{raw}' is not a byte offset"))?;
            return Ok(Self::Offset(offset));
        };

        let line: usize = line
            .parse()
            .with_context(|| format!("'{line}' is not a line number"))?;
        let column: usize = column
            .parse()
            .with_context(|| format!("'{column}' is not a column number"))?;
        if line == 0 || column == 0 {
            bail!("lines and columns start at 1");
        }
        Ok(Self::LineColumn { line, column })
    }

    fn resolve(self, text: &str) -> Option<usize> {
        match self {
            Self::Offset(offset) => Some(offset),
            Self::LineColumn { line, column } => offset_at(text, line - 1, column - 1),
        }
    }
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut language = None;
    let mut strategy = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--language" => {
                let value = iter.next().context("--language needs a value")?;
                language = Some(value.clone());
            }
            "--strategy" => {
                let value = iter.next().context("--strategy needs a value")?;
                strategy = Some(value.parse::<Strategy>().map_err(anyhow::Error::msg)?);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            _ => positional.push(arg),
        }
    }

    let [file, position] = positional.as_slice() else {
        bail!("expected a file and a position");
    };
    Ok(Args {
        file: PathBuf::from(file),
        position: Position::parse(position)?,
        language,
        strategy,
    })
}

fn run(args: Args) -> Result<bool> {
    let strategy = match args.strategy {
        Some(strategy) => strategy,
        None => Config::load()?.strategy,
    };

    let source = io::read_source(&args.file, args.language.as_deref())?;
    let offset = args
        .position
        .resolve(&source.text)
        .with_context(|| format!("{:?} is outside {}", args.position, args.file.display()))?;

    let source_id = args.file.to_string_lossy();
    let Some(probe) = Probe::for_language(&source.language_id, &source_id, &source.text, offset)
    else {
        log::warn!("Language '{}' is not classified", source.language_id);
        return Ok(false);
    };
    Ok(classify_with(&probe, strategy))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("markup-context-cli");

    let parsed = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Usage: {program} <file> <OFFSET|LINE:COL> [--language ID] [--strategy syntax-tree|heuristic]"
            );
            process::exit(1);
        }
    };

    let in_text = run(parsed)?;
    println!("{}", if in_text { "text" } else { "code" });
    Ok(())
}
