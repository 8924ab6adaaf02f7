use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use tarombo_core::config::TreeConfig;
use tarombo_core::genealogy::branch_sizes;
use tarombo_core::{Lineage, QueryOutcome, Session};

#[derive(Parser)]
#[command(name = "tarombo")]
#[command(version)]
#[command(about = "Search a family tree (tarombo) and trace a person's generation and ancestry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Path to the family CSV file
    #[arg(short, long, default_value = "Tarombo.csv")]
    data: String,

    /// TOML file with root_name, name_column and parent_column
    #[arg(long)]
    config: Option<String>,

    /// Name of the synthetic common ancestor
    #[arg(long)]
    root: Option<String>,

    /// Column holding each person's name
    #[arg(long)]
    name_column: Option<String>,

    /// Column holding the parent's name
    #[arg(long)]
    parent_column: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List names containing the given text (case-insensitive)
    Search {
        #[command(flatten)]
        source: Source,

        /// Text to look for
        query: String,
    },

    /// Show the generation and ancestry of a person by exact name
    Lookup {
        #[command(flatten)]
        source: Source,

        /// Full name, as listed by `search`
        name: String,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Search, then show the generation and ancestry of the first match
    Query {
        #[command(flatten)]
        source: Source,

        /// Text to look for
        text: String,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the tree as a Graphviz DOT graph
    Graph {
        #[command(flatten)]
        source: Source,

        /// Highlight the ancestry of this exact name
        #[arg(long)]
        highlight: Option<String>,

        /// Write DOT to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Prompt for a search text, then for a full name to trace
    Interactive {
        #[command(flatten)]
        source: Source,
    },

    /// Build the tree and report its shape and any unresolved parents
    Validate {
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { source, query } => cmd_search(&source, &query),
        Commands::Lookup {
            source,
            name,
            format,
        } => cmd_lookup(&source, &name, &format),
        Commands::Query {
            source,
            text,
            format,
        } => cmd_query(&source, &text, &format),
        Commands::Graph {
            source,
            highlight,
            output,
        } => cmd_graph(&source, highlight.as_deref(), output.as_deref()),
        Commands::Interactive { source } => cmd_interactive(&source),
        Commands::Validate { source } => cmd_validate(&source),
    }
}

fn load_config(source: &Source) -> Result<TreeConfig> {
    let mut config = match source.config.as_deref() {
        Some(path) => TreeConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from '{}'", path))?,
        None => TreeConfig::default(),
    };
    if let Some(root) = &source.root {
        config.root_name = root.clone();
    }
    if let Some(column) = &source.name_column {
        config.name_column = column.clone();
    }
    if let Some(column) = &source.parent_column {
        config.parent_column = column.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn load_session(source: &Source) -> Result<Session> {
    let config = load_config(source)?;
    let session = Session::from_csv(&source.data, &config)
        .with_context(|| format!("Failed to build family tree from '{}'", source.data))?;
    log::info!(
        "Loaded {} records from '{}'",
        session.records().len(),
        source.data
    );
    Ok(session)
}

fn cmd_search(source: &Source, query: &str) -> Result<()> {
    let session = load_session(source)?;
    let matches = session.search(query);
    if matches.is_empty() {
        println!("No matching names found for '{}'", query);
        return Ok(());
    }
    println!("Matching names:");
    for name in matches {
        println!("  {}", name);
    }
    Ok(())
}

fn cmd_lookup(source: &Source, name: &str, output_format: &str) -> Result<()> {
    let session = load_session(source)?;
    let outcome = match session.lookup(name) {
        Some(lineage) => QueryOutcome::Found(lineage),
        None => QueryOutcome::NotFound {
            name: name.to_string(),
        },
    };
    print_outcome(&outcome, output_format)
}

fn cmd_query(source: &Source, text: &str, output_format: &str) -> Result<()> {
    let session = load_session(source)?;
    let outcome = session.query(text);
    print_outcome(&outcome, output_format)
}

fn print_outcome(outcome: &QueryOutcome, output_format: &str) -> Result<()> {
    match output_format.to_lowercase().as_str() {
        "json" => {
            let json_str = serde_json::to_string_pretty(outcome)?;
            println!("{}", json_str);
        }
        "text" => println!("{}", outcome),
        other => anyhow::bail!("Unknown format '{}'. Use 'text' (default) or 'json'.", other),
    }
    Ok(())
}

fn cmd_graph(source: &Source, highlight: Option<&str>, output: Option<&str>) -> Result<()> {
    let session = load_session(source)?;

    let lineage: Option<Lineage> = match highlight {
        Some(name) => {
            let lineage = session.lookup(name);
            if lineage.is_none() {
                eprintln!(
                    "Warning: {} was not found in the family tree; nothing highlighted",
                    name
                );
            }
            lineage
        }
        None => None,
    };

    let dot = session.render_dot(lineage.as_ref());
    match output {
        Some(path) => {
            std::fs::write(path, &dot).with_context(|| format!("Failed to write '{}'", path))?;
            eprintln!("Wrote DOT graph to '{}'", path);
        }
        None => print!("{}", dot),
    }
    Ok(())
}

fn cmd_interactive(source: &Source) -> Result<()> {
    let session = load_session(source)?;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    let query_prompt = "Enter a name and clan (e.g. 'Ompu Raja Hutapea'): ";
    let Some(query) = prompt(&mut lines, query_prompt)? else {
        return Ok(());
    };
    let matches = session.search(&query);
    if matches.is_empty() {
        println!("No matching names found for '{}'", query);
        return Ok(());
    }
    println!("Matching names:");
    for name in &matches {
        println!("  {}", name);
    }

    let Some(name) = prompt(&mut lines, "Enter the full name from the list above: ")? else {
        return Ok(());
    };
    match session.lookup(&name) {
        Some(lineage) => println!("{}", lineage),
        None => println!("{} was not found in the family tree", name),
    }
    Ok(())
}

fn prompt<B: BufRead>(lines: &mut std::io::Lines<B>, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn cmd_validate(source: &Source) -> Result<()> {
    let session = load_session(source)?;
    let tree = session.tree();
    tree.validate().context("Family tree failed validation")?;

    println!("Family tree OK: {} people", session.records().len());
    println!("Root: {}", tree.root_node().name());
    println!("Generations: {}", tree.max_generation());

    let branches = branch_sizes(tree, tree.root());
    println!("Direct children of root: {}", branches.len());
    if let Some(&(id, size)) = branches.iter().max_by_key(|&&(_, size)| size) {
        println!("Largest branch: {} ({} people)", tree.node(id).name(), size);
    }

    let unresolved = tree.unresolved_parents();
    if !unresolved.is_empty() {
        println!(
            "\n{} people were attached to the root because their parent was not found:",
            unresolved.len()
        );
        for name in unresolved {
            let declared = session
                .records()
                .iter()
                .find(|r| r.name == name)
                .and_then(|r| r.parent_name.as_deref())
                .unwrap_or("");
            println!("  {} (parent '{}')", name, declared);
        }
    }
    Ok(())
}
