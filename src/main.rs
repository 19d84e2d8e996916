use clap::Parser;
use infix_ast::{lexer, postfix, Bindings, Tree};
use miette::{IntoDiagnostic, NamedSource};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate an infix expression through its syntax tree", long_about = None)]
struct Input {
    /// The expression to evaluate, e.g. "2^(1+2)*pi"
    expr: String,

    /// View the syntax tree level by level after printing the result.
    #[clap(short, long, default_value = "false")]
    view: bool,

    /// Bind a free identifier, as NAME=VALUE. May be repeated.
    #[clap(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// Debug the lexer, printing out each token. Does not build or evaluate.
    #[clap(long, default_value = "false")]
    debug_tokens: bool,

    /// Debug the converter, printing out the postfix list. Does not build or evaluate.
    #[clap(long, default_value = "false")]
    debug_postfix: bool,

    /// Log every pipeline stage to stderr.
    #[clap(long, default_value = "false")]
    verbose: bool,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found '{s}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn main() {
    let input = Input::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if input.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let source = infix_ast::strip_whitespace(&input.expr);
    if let Err(report) = run(input, &source) {
        eprintln!("{:?}", report.with_source_code(NamedSource::new("<expr>", source)));
        std::process::exit(1);
    }
}

fn run(input: Input, source: &str) -> miette::Result<()> {
    let tokens = lexer::tokenize(source);
    if input.debug_tokens {
        for token in tokens {
            println!("{token} @ {}..{}", token.span.start, token.span.end);
        }
        return Ok(());
    }

    let symbols = postfix::to_postfix(&tokens)?;
    if input.debug_postfix {
        println!("{}", symbols.join(" "));
        return Ok(());
    }

    let tree = Tree::from_postfix(symbols)?;
    let bindings: Bindings = input.vars.into_iter().collect();
    let value = infix_ast::evaluate_with(&tree, &bindings)?;
    println!("{value}");

    if input.view {
        view(&tree).into_diagnostic()?;
    }

    Ok(())
}

fn view(tree: &Tree) -> std::io::Result<()> {
    use std::io::Write;

    let mut out = std::io::stdout().lock();
    writeln!(out, "depth {}", tree.max_depth())?;
    write!(out, "{tree}")
}
