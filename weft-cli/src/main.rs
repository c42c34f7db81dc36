//! weft command-line front end
//!
//! Parses a file or an inline string and prints the document tree, the
//! token stream or a JSON dump of the DOM.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use owo_colors::OwoColorize;
use simple_logger::SimpleLogger;
use weft_common::{DocumentSource, clear_warnings, load_source};
use weft_dom::DomTree;
use weft_html::{ParseIssue, ParserOptions, StrInput, parse_with_options, print_tree, tokenize};

/// weft: WHATWG HTML5 parser
#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM tree of a file
    weft ./index.html

    # Parse inline HTML
    weft --html '<p>Hello <b>world'

    # Dump tokens without tree construction
    weft --tokens --html '<a href=x>y</a>'

    # Serialize the DOM as JSON and list parse errors
    weft --json --issues ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print the DOM as JSON
    #[arg(long, conflicts_with = "tokens")]
    json: bool,

    /// Parse with the scripting flag enabled
    #[arg(long)]
    scripting: bool,

    /// Report parse errors after the output
    #[arg(long)]
    issues: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;

    let source = DocumentSource::from_parts(cli.path.as_deref(), cli.html.clone())?;
    let html = load_source(&source)?;
    info!("parsing {} characters", html.chars().count());
    clear_warnings();

    if cli.tokens {
        for token in tokenize(&html) {
            println!("{token}");
        }
        return Ok(());
    }

    let options = ParserOptions {
        scripting: cli.scripting,
        collect_issues: cli.issues,
        ..ParserOptions::default()
    };
    let output = parse_with_options(DomTree::new(), StrInput::new(&html), &options);
    let tree = output.document;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print_tree(&tree, tree.root(), 0);
    }

    if cli.issues {
        print_issues(&output.issues);
    }

    Ok(())
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        eprintln!("{}", "no parse errors".green());
        return;
    }
    eprintln!();
    eprintln!("{}", format!("{} parse issue(s)", issues.len()).bold());
    for issue in issues {
        if issue.is_error {
            eprintln!("  {}", issue.red());
        } else {
            eprintln!("  {}", issue.yellow());
        }
    }
}
