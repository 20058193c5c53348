use std::io::{self, BufRead, Write};

use log::debug;

use crate::Expression;

const BANNER: &str = "\
===== SIMPLE EXPRESSION CALCULATOR =====
Operations are supported: +, -, *, /, ^
The use of variables and brackets is supported
Examples: 2+3*4, (a+b)*c, x^2+y^2
";

/// Runs the read-eval-print loop until `exit` or end of input.
///
/// Every variable in an expression is prompted for before evaluation.
/// Errors from the calculator are printed and the loop carries on.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "{BANNER}")?;

    loop {
        writeln!(output, "Enter an expression (or 'exit' for exit):")?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let line = line.trim_end_matches(['\r', '\n']);
        if line == "exit" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let mut expr = Expression::new(line);
        let names: Vec<String> = expr
            .variable_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut interrupted = false;
        for name in names {
            match prompt_value(&mut input, &mut output, &name)? {
                Some(value) => expr.bind_variable(name, value),
                None => {
                    interrupted = true;
                    break;
                }
            }
        }
        if interrupted {
            break;
        }

        match expr.calculate() {
            Ok(result) => {
                writeln!(output, "RESULT: {result}")?;
                let postfix = expr.postfix().unwrap_or_default();
                writeln!(output, "POSTFIX ENTRY: {postfix}")?;
            }
            Err(e) => {
                debug!("`{line}` failed: {e:?}");
                writeln!(output, "ERROR: {e}")?;
            }
        }
        writeln!(output)?;
    }

    writeln!(output, "PROGRAM COMPLETED.")?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Asks for `name` until a number is entered. `None` on end of input.
fn prompt_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    name: &str,
) -> io::Result<Option<f64>> {
    loop {
        write!(output, "Enter a value for {name}: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(output, "ERROR: `{}` is not a number ({e})", line.trim())?,
        }
    }
}
