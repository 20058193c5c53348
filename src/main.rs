use std::io;

use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;
use miette::WrapErr;
use postfix_calc::Expression;
use postfix_calc::Lexer;

#[derive(Parser, Debug)]
#[command(about = "Evaluate infix arithmetic through its postfix form")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the tokens of an expression
    Tokenize { expression: String },
    /// Print the postfix form of an expression
    Postfix { expression: String },
    /// Evaluate an expression
    Eval {
        expression: String,
        /// Variable binding, e.g. `--var x=2.5`
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, f64)>,
    },
    /// Interactive calculator (the default)
    Repl,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value for `{name}`: {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> miette::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Repl) {
        Commands::Tokenize { expression } => {
            for token in Lexer::new(&expression) {
                println!("{token}");
            }
        }
        Commands::Postfix { expression } => {
            let mut expr = Expression::new(expression.as_str());
            let postfix = expr
                .postfix()
                .map_err(|e| miette::Report::new(e).with_source_code(expression.clone()))?;
            println!("{postfix}");
        }
        Commands::Eval { expression, vars } => {
            let mut expr = Expression::new(expression.as_str());
            for (name, value) in vars {
                expr.bind_variable(name, value);
            }
            let result = expr
                .calculate()
                .map_err(|e| miette::Report::new(e).with_source_code(expression.clone()))?;
            println!("{result}");
        }
        Commands::Repl => {
            let stdin = io::stdin();
            postfix_calc::repl::run(stdin.lock(), io::stdout())
                .into_diagnostic()
                .wrap_err("interactive session failed")?;
        }
    }
    Ok(())
}
