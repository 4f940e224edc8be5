//! fsim - interactive shell over the simulated inode filesystem.
//!
//! Usage:
//!   fsim <root-dir>
//!
//! The root directory holds the simulation's backing files: the
//! `inodes_list` inode table plus one file per directory, named by
//! decimal inode index. Commands: ls, cd, mkdir, touch, exit, plus
//! read-only dumps of the in-memory state (e_ilist, e_ninodes, e_dir,
//! e_nitems).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fsim_core::{truncate_name, Command, Directory, DiskStore, SimError, SimResult, Simulator};

/// Simulated inode filesystem shell
#[derive(Parser, Debug)]
#[command(name = "fsim")]
#[command(about = "Interactive simulated-filesystem shell")]
struct Args {
    /// Simulation root directory holding inodes_list and the
    /// per-directory backing files
    root: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !args.root.is_dir() {
        eprintln!("Invalid input. '{}' is not a directory", args.root.display());
        return ExitCode::FAILURE;
    }

    match run(DiskStore::new(&args.root)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(store: DiskStore) -> SimResult<()> {
    let mut sim = Simulator::open(store)?;
    warn_trailing(&sim);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF acts like exit
        }

        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or("");
        let raw_arg = words.next().unwrap_or("");
        let arg = truncate_name(raw_arg);
        if arg.len() < raw_arg.len() {
            println!("Argument truncated down to 32 bytes: {arg}");
        }

        match Command::parse(word) {
            Command::Ls => {
                for entry in sim.list() {
                    println!("{} {}", entry.inode, entry.name);
                }
            }
            Command::Cd => {
                if arg.is_empty() {
                    println!("cd: missing operand");
                } else if let Err(err) = sim.change_dir(arg) {
                    println!("cd: {err}");
                } else {
                    warn_dir_trailing(sim.cwd());
                }
            }
            Command::Mkdir => {
                if arg.is_empty() {
                    println!("mkdir: missing operand");
                } else if let Err(err) = sim.make_dir(arg) {
                    report_create("mkdir", "directory", arg, &err);
                }
            }
            Command::Touch => {
                if arg.is_empty() {
                    println!("touch: missing operand");
                } else if let Err(err) = sim.touch(arg) {
                    report_create("touch", "file", arg, &err);
                }
            }
            Command::Exit => break,
            Command::DumpInodes => dump_inodes(&sim, usize::MAX),
            Command::DumpInodesHead => dump_inodes(&sim, 10),
            Command::DumpDir => dump_dir(&sim, usize::MAX),
            Command::DumpDirHead => dump_dir(&sim, 10),
            Command::Unknown => println!("nothing"),
        }
    }

    sim.persist()?;
    Ok(())
}

/// Shell-like messages for the mutation commands. Capacity exhaustion
/// is reported distinctly from a name collision.
fn report_create(verb: &str, noun: &str, name: &str, err: &SimError) {
    match err {
        SimError::AlreadyExists(name) => {
            println!("{verb}: cannot create {noun} '{name}': File exists");
        }
        SimError::OutOfInodes => {
            println!("{verb}: cannot create {noun} '{name}': no free inodes left");
        }
        SimError::DirectoryFull(..) => {
            println!("{verb}: cannot create {noun} '{name}': no space left in directory");
        }
        other => println!("{verb}: {other}"),
    }
}

/// Note decode diagnostics (trailing partial records) on stderr.
fn warn_trailing(sim: &Simulator<DiskStore>) {
    if sim.inodes().trailing() > 0 {
        eprintln!(
            "warning: inodes_list: {} trailing bytes ignored",
            sim.inodes().trailing()
        );
    }
    warn_dir_trailing(sim.cwd());
}

fn warn_dir_trailing(dir: &Directory) {
    if dir.trailing() > 0 {
        eprintln!(
            "warning: directory {}: {} trailing bytes ignored",
            dir.name(),
            dir.trailing()
        );
    }
}

fn dump_inodes(sim: &Simulator<DiskStore>, limit: usize) {
    println!("inode table contents ({} in use):", sim.inodes().len());
    for (slot, inode) in sim.inodes().iter().enumerate().take(limit) {
        println!("\t{}:{} {}", slot, inode.index, inode.kind.tag() as char);
    }
}

fn dump_dir(sim: &Simulator<DiskStore>, limit: usize) {
    println!(
        "directory {} contents ({} entries):",
        sim.cwd().name(),
        sim.cwd().len()
    );
    for (slot, entry) in sim.list().iter().enumerate().take(limit) {
        println!("\t{}:{} {}", slot, entry.inode, entry.name);
    }
}
