use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

use jbc_graph::cpool::ConstantPool;
use jbc_graph::render::{self, LocalNames};
use jbc_graph::{MethodGraph, Pc, decode_method};

mod dump;

use dump::MethodDump;

#[derive(Parser)]
#[command(name = "jbc", about = "JVM bytecode instruction-graph decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a method dump and print the linear instruction listing
    Listing {
        /// Path to the YAML method dump
        input: PathBuf,
    },
    /// Decode a method dump and print nested producer trees
    Tree {
        /// Path to the YAML method dump
        input: PathBuf,
        /// PC of the tree root (default: every instruction no other
        /// instruction consumes)
        #[arg(short, long)]
        pc: Option<u32>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Listing { input } => cmd_listing(&input),
        Commands::Tree { input, pc } => cmd_tree(&input, pc),
    }
}

fn load_graph(path: &PathBuf) -> (MethodDump, ConstantPool, MethodGraph) {
    let dump = match MethodDump::load(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let code = match dump.code_bytes() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let pool = dump.build_pool();
    let graph = match decode_method(&code, &pool, dump.max_stack) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    (dump, pool, graph)
}

fn cmd_listing(path: &PathBuf) {
    let (dump, pool, graph) = load_graph(path);
    let locals = dump.local_table();
    let locals_ref = locals.as_ref().map(|t| t as &dyn LocalNames);
    print!("{}", render::listing_string(&graph, &pool, locals_ref));
}

fn cmd_tree(path: &PathBuf, pc: Option<u32>) {
    let (dump, pool, graph) = load_graph(path);
    let locals = dump.local_table();
    let locals_ref = locals.as_ref().map(|t| t as &dyn LocalNames);

    let roots: Vec<Pc> = match pc {
        Some(pc) => vec![pc],
        None => root_pcs(&graph),
    };

    for root in roots {
        match render::tree_string(&graph, root, &pool, locals_ref) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// PCs of instructions whose result no other instruction consumes; these are
/// the statement-level roots of the method.
fn root_pcs(graph: &MethodGraph) -> Vec<Pc> {
    let consumed: HashSet<Pc> = graph
        .instructions()
        .iter()
        .flat_map(|insn| insn.popped.producers())
        .collect();
    graph
        .instructions()
        .iter()
        .map(|insn| insn.pc)
        .filter(|pc| !consumed.contains(pc))
        .collect()
}
