use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rust_sqlite::command::{MetaCommand, Output, Statement};
use rust_sqlite::{LAYOUT, Table};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// An in-memory, single table database with a tiny SQL-ish prompt
#[derive(Parser, Debug)]
#[command(name = "rust-sqlite", version, about)]
struct Args {
    /// Log more to stderr (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Text shown before each line of input
    #[arg(long, default_value = "db > ")]
    prompt: String,
}

struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Returns `false` once the input is exhausted.
    fn read_input(&mut self, reader: &mut impl BufRead) -> Result<bool> {
        self.buffer.clear();
        let read = reader
            .read_line(&mut self.buffer)
            .context("failed to read line")?;
        self.buffer = self.buffer.trim().to_string();
        Ok(read > 0)
    }
}

enum InputType {
    Meta(MetaCommand),
    Statement(rust_sqlite::Result<Statement>),
}

impl InputType {
    fn parse(input: &str) -> InputType {
        if let Some(meta) = MetaCommand::parse(input) {
            InputType::Meta(meta)
        } else {
            InputType::Statement(Statement::prepare(input))
        }
    }
}

fn print_prompt(out: &mut impl Write, prompt: &str) -> Result<()> {
    write!(out, "{prompt}")?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut table = Table::new();
    let mut input_buffer = InputBuffer::new();

    loop {
        print_prompt(&mut out, &args.prompt)?;
        if !input_buffer.read_input(&mut reader)? {
            debug!("end of input");
            break;
        }
        if input_buffer.buffer.is_empty() {
            continue;
        }

        match InputType::parse(&input_buffer.buffer) {
            InputType::Meta(MetaCommand::Exit) => break,
            InputType::Meta(MetaCommand::Constants) => {
                for (name, value) in LAYOUT {
                    writeln!(out, "{name}: {value}")?;
                }
            }
            InputType::Meta(MetaCommand::Unrecognized) => {
                writeln!(out, "Unrecognized meta-command: {}", input_buffer.buffer)?;
            }
            InputType::Statement(Ok(statement)) => match statement.execute(&mut table) {
                Ok(Output::Inserted) => writeln!(out, "Executed.")?,
                Ok(Output::Rows(rows)) => {
                    for (_, row) in rows {
                        writeln!(out, "{row}")?;
                    }
                    writeln!(out, "Executed.")?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            InputType::Statement(Err(e)) => {
                debug!(error = ?e, "could not prepare statement");
                writeln!(out, "{e}")?;
            }
        }
    }

    info!(rows = table.row_count(), "closing table");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}
