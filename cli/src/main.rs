use bumpalo::Bump;
use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use numexpr_guard::{
    FUNCTIONS, GuardOptions, Matcher, render_error, render_error_to_string_no_color,
};
use std::io::BufRead;
use std::io::BufReader;
use tracing::debug;

/// numexpr-guard - check expressions against the numexpr allowlist grammar
#[derive(Parser, Debug)]
#[command(name = "numexpr-guard")]
#[command(about = "Validate numexpr expressions before evaluation", long_about = None)]
struct Args {
    /// Print the parsed tree of accepted expressions (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Maximum nesting depth of parentheses and negations
    #[arg(long, env = "NUMEXPR_GUARD_MAX_DEPTH", default_value_t = GuardOptions::default().max_depth)]
    max_depth: usize,

    /// Print the allowlisted functions and exit
    #[arg(long)]
    list_functions: bool,

    /// Disable colors in error reports
    #[arg(long)]
    no_color: bool,

    /// Expressions to check (if not provided, reads one per line from stdin)
    expressions: Vec<String>,
}

/// Check one expression, reporting the outcome. Returns whether it was
/// accepted.
fn check_input(matcher: &Matcher, input: &str, args: &Args) -> bool {
    let arena = Bump::new();
    let parsed = match matcher.parse(&arena, input) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(kind = %e.kind, "rejected");
            if args.no_color {
                eprint!("{}", render_error_to_string_no_color(&e));
            } else {
                render_error(&e);
            }
            return false;
        }
    };

    if args.debug_parse {
        println!("=== Parsed Tree ===");
        println!("{:#?}", parsed.expr);
        println!("{}", parsed.expr);
        println!();
    }

    println!("ok: {}", input);
    true
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if args.list_functions {
        for function in FUNCTIONS {
            println!("{}", function);
        }
        return Ok(());
    }

    let matcher = Matcher::with_options(GuardOptions {
        max_depth: args.max_depth,
    });

    let mut total = 0usize;
    let mut rejected = 0usize;

    if !args.expressions.is_empty() {
        for expr in &args.expressions {
            total += 1;
            if !check_input(&matcher, expr, &args) {
                rejected += 1;
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.into_diagnostic()?;
            if line.trim().is_empty() {
                continue;
            }
            total += 1;
            if !check_input(&matcher, &line, &args) {
                rejected += 1;
            }
        }
    }

    debug!(total, rejected, "done");
    if rejected > 0 {
        return Err(miette!("{} of {} expression(s) rejected", rejected, total));
    }

    Ok(())
}
