//! Build automation tasks for the lamp-kit project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The lamp only runs on the Pico 1, so every firmware build targets the
/// RP2040's Cortex-M0+.
const PICO_TARGET: &str = "thumbv6m-none-eabi";
const PICO_FEATURES: &str = "pico1,arm,defmt";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for lamp-kit project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: build lib, demo and compile-only bins, run host
    /// tests, generate docs
    CheckAll,
    /// Build the library for the Pico
    Build,
    /// Build a demo firmware image
    Demo {
        /// Demo name (e.g., led_lamp)
        name: String,
    },
    /// Build UF2 firmware file for flashing to the Pico
    Uf2 {
        /// Demo name (e.g., led_lamp)
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build => build_lib(),
        Commands::Demo { name } => build_demo(&name),
        Commands::Uf2 { name } => build_uf2(&name),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Building library...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        PICO_TARGET,
        "--features",
        PICO_FEATURES,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building demos...".cyan());
    for demo in ["led_lamp"] {
        println!("  {}", format!("- {demo}").bright_black());
        if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
            "build",
            "--example",
            demo,
            "--target",
            PICO_TARGET,
            "--features",
            PICO_FEATURES,
            "--no-default-features",
        ])) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building compile-only device checks...".cyan());
    for bin in ["lamp_devices"] {
        println!("  {}", format!("- {bin}").bright_black());
        if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
            "build",
            "--bin",
            bin,
            "--target",
            PICO_TARGET,
            "--features",
            PICO_FEATURES,
            "--no-default-features",
        ])) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut host_test_cmd = Command::new("cargo");
    host_test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--tests"]);

    if let Some(target) = &host_target {
        host_test_cmd.arg("--target").arg(target);
    }

    host_test_cmd.args(["--no-default-features", "--features", "host"]);

    if !run_command(&mut host_test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running doc tests...".cyan());
    let mut doc_test_cmd = Command::new("cargo");
    doc_test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--doc"]);

    if let Some(target) = &host_target {
        doc_test_cmd.arg("--target").arg(target);
    }

    doc_test_cmd.args(["--no-default-features", "--features", "host"]);

    if !run_command(&mut doc_test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--target",
        PICO_TARGET,
        "--no-deps",
        "--features",
        PICO_FEATURES,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    ExitCode::SUCCESS
}

fn build_lib() -> ExitCode {
    let workspace_root = workspace_root();
    println!(
        "{}",
        format!("Building library with features: {PICO_FEATURES}").cyan()
    );

    if run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        PICO_TARGET,
        "--features",
        PICO_FEATURES,
        "--no-default-features",
    ])) {
        println!("{}", "Build successful! ✨".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_demo(name: &str) -> ExitCode {
    let workspace_root = workspace_root();
    println!(
        "{}",
        format!("Building demo '{name}' with features: {PICO_FEATURES}").cyan()
    );

    if run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--example",
        name,
        "--target",
        PICO_TARGET,
        "--features",
        PICO_FEATURES,
        "--no-default-features",
    ])) {
        println!("{}", "Build successful! ✨".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_uf2(name: &str) -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", format!("Building UF2 for demo '{name}'").cyan());
    println!("  Features: {}", PICO_FEATURES.bright_black());
    println!("  Target: {}", PICO_TARGET.bright_black());

    // Build in release mode for UF2
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--example",
        name,
        "--release",
        "--target",
        PICO_TARGET,
        "--features",
        PICO_FEATURES,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{PICO_TARGET}/release/examples/{name}");
    let uf2_path = format!("{name}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    // `cargo xtask` runs from the workspace root; build commands inherit it.
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if let Some(host) = line.strip_prefix("host: ") {
            return Some(host.trim().to_string());
        }
    }
    None
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
