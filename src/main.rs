//! lsb-stego - hide text in images.
//!
//! Writes a (optionally compressed and encrypted) message into the low bits
//! of an image's color channels and reads it back.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use lsb_stego::carrier::{format_bytes, required_bytes, NoProgress};
use lsb_stego::pipeline::build_payload;
use lsb_stego::{
    batch_decode, image_io, spawn_decode, spawn_encode, CapacityReport, DecodeOptions,
    EncodeOptions, Image, StegoTask,
};
use simple_logger::SimpleLogger;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "lsb-stego")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide text messages in image pixels",
    long_about = "Hides text in the least-significant bits of an image's RGB channels, with optional LZW compression and AES-256-GCM password encryption."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an image
    Encode {
        /// Carrier image
        input: PathBuf,

        /// Output PNG
        output: PathBuf,

        /// Message text
        #[arg(long, conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message from a file
        #[arg(long, conflicts_with = "message")]
        message_file: Option<PathBuf>,

        /// Prompt for a password and encrypt the message
        #[arg(long)]
        password: bool,

        /// Skip LZW compression
        #[arg(long)]
        no_compress: bool,

        /// Low bits used per color channel (1-8)
        #[arg(long, default_value = "1")]
        lsb_depth: u8,
    },

    /// Recover a hidden message
    Decode {
        /// Image with a hidden message
        input: PathBuf,

        /// Prompt for the password
        #[arg(long)]
        password: bool,

        /// Low bits used per color channel (1-8)
        #[arg(long, default_value = "1")]
        lsb_depth: u8,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show how many bytes an image can hold
    Capacity {
        /// Carrier image
        input: PathBuf,

        /// Low bits used per color channel (1-8)
        #[arg(long, default_value = "1")]
        lsb_depth: u8,
    },

    /// Show how much of an image a message would use
    Stats {
        /// Carrier image
        input: PathBuf,

        /// Message text
        #[arg(long, conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message from a file
        #[arg(long, conflicts_with = "message")]
        message_file: Option<PathBuf>,

        /// Skip LZW compression
        #[arg(long)]
        no_compress: bool,

        /// Low bits used per color channel (1-8)
        #[arg(long, default_value = "1")]
        lsb_depth: u8,
    },

    /// Recover messages from every image in a directory
    BatchDecode {
        /// Directory to scan
        dir: PathBuf,

        /// Prompt for the password
        #[arg(long)]
        password: bool,

        /// Low bits used per color channel (1-8)
        #[arg(long, default_value = "1")]
        lsb_depth: u8,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Warning: logger unavailable: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            message,
            message_file,
            password,
            no_compress,
            lsb_depth,
        } => cmd_encode(
            &input,
            &output,
            message,
            message_file,
            password,
            EncodeOptions::new(lsb_depth, !no_compress),
        ),

        Commands::Decode {
            input,
            password,
            lsb_depth,
            output,
        } => cmd_decode(&input, password, DecodeOptions::new(lsb_depth), output),

        Commands::Capacity { input, lsb_depth } => cmd_capacity(&input, lsb_depth),

        Commands::Stats {
            input,
            message,
            message_file,
            no_compress,
            lsb_depth,
        } => cmd_stats(
            &input,
            message,
            message_file,
            EncodeOptions::new(lsb_depth, !no_compress),
        ),

        Commands::BatchDecode {
            dir,
            password,
            lsb_depth,
        } => cmd_batch_decode(&dir, password, DecodeOptions::new(lsb_depth)),
    }
}

fn prompt_password(prompt: &str) -> io::Result<String> {
    rpassword::prompt_password(prompt).or_else(|_| {
        eprint!("{}", prompt);
        io::stderr().flush()?;
        let mut password = String::new();
        io::stdin().read_line(&mut password)?;
        Ok(password.trim().to_string())
    })
}

fn read_password(wanted: bool, confirm: bool) -> anyhow::Result<Option<String>> {
    if !wanted {
        return Ok(None);
    }

    let password = prompt_password("Password: ")?;
    if confirm && prompt_password("Confirm password: ")? != password {
        bail!("passwords do not match");
    }
    Ok(Some(password))
}

fn read_message(
    message: Option<String>,
    message_file: Option<PathBuf>,
) -> anyhow::Result<String> {
    match (message, message_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading message from {}", path.display())),
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading message from stdin")?;
            Ok(buffer)
        }
    }
}

fn load_carrier(path: &Path) -> anyhow::Result<Image> {
    image_io::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Drain progress ticks to stderr until the worker finishes.
fn wait_with_progress<T: Send + 'static>(
    task: StegoTask<T>,
    label: &str,
) -> lsb_stego::Result<T> {
    let mut last = None;
    for tick in task.progress().iter() {
        let percent = (tick.fraction() * 100.0) as u32;
        if last != Some(percent) {
            eprint!("\r{}... {:>3}%", label, percent);
            last = Some(percent);
        }
    }
    eprintln!();
    task.join()
}

fn cmd_encode(
    input: &Path,
    output: &Path,
    message: Option<String>,
    message_file: Option<PathBuf>,
    password: bool,
    options: EncodeOptions,
) -> anyhow::Result<()> {
    let carrier = load_carrier(input)?;
    let message = read_message(message, message_file)?;
    let password = read_password(password, true)?;
    let length = message.len();

    let task = spawn_encode(carrier, message, password, options)?;
    let stego = wait_with_progress(task, "Embedding")?;

    image_io::save(output, &stego).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Hid {} in {} (depth {}, compression {})",
        format_bytes(length),
        output.display(),
        options.lsb_depth,
        if options.compression { "on" } else { "off" }
    );

    Ok(())
}

fn cmd_decode(
    input: &Path,
    password: bool,
    options: DecodeOptions,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let carrier = load_carrier(input)?;
    let password = read_password(password, false)?;

    let task = spawn_decode(carrier, password, options)?;
    let message = wait_with_progress(task, "Scanning")?;

    match output {
        Some(path) => {
            std::fs::write(&path, message.as_bytes())?;
            println!("Wrote {} to {}", format_bytes(message.len()), path.display());
        }
        None => {
            io::stdout().write_all(message.as_bytes())?;
            println!();
        }
    }

    Ok(())
}

fn cmd_capacity(input: &Path, lsb_depth: u8) -> anyhow::Result<()> {
    if let Err(e) = EncodeOptions::new(lsb_depth, false).validate() {
        bail!("{}", e);
    }
    let carrier = load_carrier(input)?;
    let report = CapacityReport::new(carrier.width(), carrier.height(), 0, lsb_depth);

    println!("{}x{} pixels", carrier.width(), carrier.height());
    println!("Capacity at depth {}: {}", lsb_depth, format_bytes(report.capacity));

    Ok(())
}

fn cmd_stats(
    input: &Path,
    message: Option<String>,
    message_file: Option<PathBuf>,
    options: EncodeOptions,
) -> anyhow::Result<()> {
    if let Err(e) = options.validate() {
        bail!("{}", e);
    }
    let carrier = load_carrier(input)?;
    let message = read_message(message, message_file)?;
    let payload = build_payload(&message, None, &options)?;
    let used = required_bytes(payload.len());
    let report = CapacityReport::new(carrier.width(), carrier.height(), used, options.lsb_depth);

    println!("Carrier Statistics");
    println!("==================");
    println!("Pixels:           {}", report.pixels);
    println!("LSB bits:         {}", report.lsb_bits);
    println!("Capacity:         {}", format_bytes(report.capacity));
    println!();
    println!("Message:          {}", format_bytes(message.len()));
    println!("Embedded size:    {}", format_bytes(report.used));
    println!("Remaining:        {}", format_bytes(report.remaining));
    println!("Usage:            {:.1}%", report.efficiency);

    if !report.fits() {
        println!();
        println!("✗ Message does not fit at depth {}", options.lsb_depth);
    }

    Ok(())
}

fn cmd_batch_decode(dir: &Path, password: bool, options: DecodeOptions) -> anyhow::Result<()> {
    let password = read_password(password, false)?;

    let mut paths = Vec::new();
    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() || !image_io::is_image_path(path) {
            continue;
        }
        match image_io::load(path) {
            Ok(image) => {
                paths.push(path.to_path_buf());
                images.push(image);
            }
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }

    if images.is_empty() {
        bail!("no readable images in {}", dir.display());
    }

    let results = batch_decode(&images, password.as_deref(), &options, &mut NoProgress);

    let mut found = 0;
    for entry in &results {
        let path = paths[entry.index].display();
        match &entry.outcome {
            Ok(message) => {
                found += 1;
                println!("{}: {}", path, message);
            }
            Err(e) => println!("{}: ({})", path, e),
        }
    }
    println!();
    println!("{} of {} images carried a message", found, results.len());

    Ok(())
}
