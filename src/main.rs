use clap::{Parser as ClapParser, Subcommand};
use ghjq::cli::{self, CliError, FilterOptions, QuerySyntax, SetOp, SetOptions};
use ghjq::{Value, output, records_from_json};
use std::fs;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "ghjq")]
#[command(about = "ghjq - query and set algebra over GitHub repository metadata JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a record collection with a predicate query
    Filter {
        /// The query (infix form by default)
        query: String,

        /// JSON input file (reads from stdin if not provided)
        input: Option<String>,

        /// Treat the query as the nested-list JSON form
        #[arg(long)]
        sexpr: bool,

        /// Abort on the first record that fails to evaluate
        #[arg(long)]
        strict: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate query syntax, don't execute
        #[arg(long)]
        syntax_only: bool,
    },

    /// Union of collections, deduplicated by identity key
    Union {
        #[command(flatten)]
        args: SetArgs,
    },

    /// Intersection of collections by identity key
    Intersect {
        #[command(flatten)]
        args: SetArgs,
    },

    /// Records of the first collection absent from all the others
    Diff {
        #[command(flatten)]
        args: SetArgs,
    },
}

#[derive(clap::Args)]
struct SetArgs {
    /// Input files ('-' reads stdin, so commands can be piped)
    #[arg(required = true)]
    files: Vec<String>,

    /// Identity field path
    #[arg(short, long, default_value = "id")]
    key: String,

    /// Fail if any record has no identity instead of dropping it
    #[arg(long)]
    abort_on_missing_key: bool,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Filter {
            query,
            input,
            sexpr,
            strict,
            pretty,
            syntax_only,
        } => run_filter(query, input, sexpr, strict, pretty, syntax_only),
        Commands::Union { args } => run_set(SetOp::Union, args),
        Commands::Intersect { args } => run_set(SetOp::Intersect, args),
        Commands::Diff { args } => run_set(SetOp::Diff, args),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_filter(
    query: String,
    input: Option<String>,
    sexpr: bool,
    strict: bool,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let syntax = if sexpr {
        QuerySyntax::NestedList
    } else {
        QuerySyntax::Infix
    };

    if syntax_only {
        cli::parse_filter_query(&query, syntax)?;
        println!("Syntax is valid");
        return Ok(());
    }

    let input = match input {
        Some(path) => Some(read_input(&path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = FilterOptions {
        query,
        syntax,
        input,
        strict,
    };

    let report = cli::execute_filter(&options)?;
    for error in &report.errors {
        eprintln!("warning: skipped {}", error);
    }
    print_records(&report.matched, pretty);
    Ok(())
}

fn run_set(op: SetOp, args: SetArgs) -> Result<(), CliError> {
    let mut collections: Vec<Vec<Value>> = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let text = read_input(file)?;
        collections.push(records_from_json(&text)?);
    }

    let options = SetOptions {
        op,
        key: args.key,
        abort_on_missing_key: args.abort_on_missing_key,
    };

    let report = cli::execute_set_op(&options, &collections)?;
    for skipped in &report.skipped {
        eprintln!("warning: skipped {}", skipped);
    }
    print_records(&report.records, args.pretty);
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(CliError::Io)
    }
}

fn print_records(records: &[Value], pretty: bool) {
    let json = if pretty {
        output::records_to_json_pretty(records)
    } else {
        output::records_to_json(records)
    };
    println!("{}", json);
}
