use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::{env, process};

use log::{LevelFilter, Log, Metadata, Record, info};
use nes6502::cpu::RESET_VECTOR;
use nes6502::{Cartridge, Cpu};
use thiserror::Error;

const DEFAULT_STEPS: u64 = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
enum UsageError {
    #[error("missing ROM path")]
    MissingRom,
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("invalid --steps value: {0}")]
    BadSteps(String),
    #[error("unknown argument: {0}")]
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    rom: PathBuf,
    steps: u64,
    log: Option<PathBuf>,
    dump: Option<PathBuf>,
    level: LevelFilter,
}

impl Options {
    /// Returns `Ok(None)` when help was requested.
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Option<Self>, UsageError> {
        let mut args = args.into_iter();
        let mut rom: Option<PathBuf> = None;
        let mut steps = DEFAULT_STEPS;
        let mut log = None;
        let mut dump = None;
        let mut level = LevelFilter::Info;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--steps" => {
                    let value = args.next().ok_or(UsageError::MissingValue("--steps"))?;
                    steps = value.parse().map_err(|_| UsageError::BadSteps(value))?;
                }
                "--log" => {
                    log = Some(PathBuf::from(
                        args.next().ok_or(UsageError::MissingValue("--log"))?,
                    ));
                }
                "--dump" => {
                    dump = Some(PathBuf::from(
                        args.next().ok_or(UsageError::MissingValue("--dump"))?,
                    ));
                }
                "--verbose" | "-v" => level = level.max(LevelFilter::Debug),
                "--trace" => level = LevelFilter::Trace,
                "--help" | "-h" => return Ok(None),
                _ if rom.is_none() && !arg.starts_with('-') => rom = Some(PathBuf::from(arg)),
                _ => return Err(UsageError::Unknown(arg)),
            }
        }

        Ok(Some(Self {
            rom: rom.ok_or(UsageError::MissingRom)?,
            steps,
            log,
            dump,
            level,
        }))
    }
}

fn print_usage() {
    eprintln!("usage: nes6502 <rom.nes> [--steps N] [--log FILE] [--dump FILE] [--verbose] [--trace]");
}

/// Leveled lines on stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            process::exit(2);
        }
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(options.level);
    }

    if let Err(err) = run(&options) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), Box<dyn Error>> {
    let cart = Cartridge::from_ines_file(&options.rom)?;
    info!(
        "loaded {}: {} KiB PRG, {} KiB CHR, mapper {}, {:?} mirroring",
        options.rom.display(),
        cart.prg_rom().len() / 1024,
        cart.chr_rom().len() / 1024,
        cart.mapper_id(),
        cart.mirroring()
    );

    let mut cpu = Cpu::new();
    cpu.power(cart.prg_rom());
    info!(
        "reset vector ${:04X}, {} cycles at power-on",
        cpu.bus().read_word(RESET_VECTOR),
        cpu.cycles()
    );

    let mut logfile = match &options.log {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    for _ in 0..options.steps {
        if let Some(out) = logfile.as_mut() {
            writeln!(
                out,
                "{} Instruction [{:02X}] {}",
                cpu.info(),
                cpu.peek_opcode(),
                cpu.disassemble()
            )?;
        }
        cpu.step();
    }
    if let Some(mut out) = logfile {
        out.flush()?;
    }

    if let Some(path) = &options.dump {
        let mut out = BufWriter::new(File::create(path)?);
        for line in cpu.bus().dump_lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        info!("memory dumped to {}", path.display());
    }

    info!("ran {} steps: {}", options.steps, cpu.info());
    Ok(())
}
