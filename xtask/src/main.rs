// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Build automation for the Cadenza workspace
// Run with: cargo xtask <command>

use anyhow::Result;
use std::process::Command;
use std::time::Instant;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const CHECK: &str = "✓";
const CROSS: &str = "✗";

struct Task {
    name: &'static str,
    summary: &'static str,
    args: &'static [&'static str],
}

const TASKS: &[Task] = &[
    Task {
        name: "build",
        summary: "Build all workspace crates",
        args: &["build", "--workspace"],
    },
    Task {
        name: "test",
        summary: "Run unit, integration and doc tests",
        args: &["test", "--workspace"],
    },
    Task {
        name: "check",
        summary: "Type-check without building executables",
        args: &["check", "--workspace"],
    },
    Task {
        name: "format",
        summary: "Format all code with rustfmt",
        args: &["fmt", "--all"],
    },
    Task {
        name: "clippy",
        summary: "Lint with warnings as errors",
        args: &["clippy", "--workspace", "--", "-D", "warnings"],
    },
];

fn print_help() {
    println!("{BOLD}{CYAN}Cadenza build automation{RESET}");
    println!("{BOLD}{YELLOW}Usage:{RESET} cargo xtask <command>\n");
    println!("{BOLD}Available commands:{RESET}");
    for task in TASKS {
        println!("  {BOLD}{BLUE}{:<8}{RESET} - {}", task.name, task.summary);
    }
    println!("  {BOLD}{BLUE}{:<8}{RESET} - Run the full pipeline", "all");
}

fn run_task(task: &Task) -> Result<()> {
    let command_line = format!("cargo {}", task.args.join(" "));
    println!("\n{BOLD}{CYAN}━━━ {} ━━━{RESET}", task.summary);
    println!("{BOLD}Command:{RESET} {command_line}");

    let start = Instant::now();
    let status = Command::new("cargo").args(task.args).status()?;
    let seconds = start.elapsed().as_secs_f64();

    if status.success() {
        println!("{BOLD}{GREEN}{CHECK} {} completed in {seconds:.2}s{RESET}", task.name);
        Ok(())
    } else {
        println!("{BOLD}{RED}{CROSS} {} failed after {seconds:.2}s{RESET}", task.name);
        anyhow::bail!("{} failed", task.name)
    }
}

fn run_all() -> Result<()> {
    println!("{BOLD}{CYAN}Starting full pipeline: build → test → check → format → clippy{RESET}");
    let start = Instant::now();
    let mut failures = 0;

    for (i, task) in TASKS.iter().enumerate() {
        println!("\n{BOLD}{BLUE}[{}/{}] {}{RESET}", i + 1, TASKS.len(), task.name);
        if run_task(task).is_err() {
            failures += 1;
        }
    }

    let seconds = start.elapsed().as_secs_f64();
    if failures == 0 {
        println!("\n{BOLD}{GREEN}{CHECK} All {} tasks passed in {seconds:.2}s{RESET}", TASKS.len());
        Ok(())
    } else {
        println!("\n{BOLD}{YELLOW}⚠ {failures}/{} tasks failed ({seconds:.2}s){RESET}", TASKS.len());
        anyhow::bail!("pipeline failed")
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_help();
        return Ok(());
    };

    if command == "all" {
        return run_all();
    }
    match TASKS.iter().find(|t| t.name == command) {
        Some(task) => run_task(task),
        None => {
            println!("{BOLD}{RED}{CROSS} Unknown command: {command}{RESET}\n");
            print_help();
            anyhow::bail!("unknown command")
        }
    }
}
