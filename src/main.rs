use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use symexpr::{
  AdaptiveOptions, Expression, Lexicon, NewtonOptions, adaptive_simpson,
  simpson, simpson_piecewise, trapezoid,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
  after_help = "Environment variables:
  SYMEXPR_LOG_LEVEL=debug     Log level (error, warn, info, debug, trace)
  SYMEXPR_NEWTON_TOL=1e-9     Default Newton step tolerance
  SYMEXPR_NEWTON_MAX_ITER=100 Default Newton iteration limit
  SYMEXPR_SAMPLES=100         Default integration intervals / samples"
)]
struct Cli {
  /// Print results as JSON
  #[arg(long, global = true)]
  json: bool,

  /// Diagnostics written to stderr
  #[arg(
    long,
    value_enum,
    global = true,
    env = "SYMEXPR_LOG_LEVEL",
    default_value = "warn"
  )]
  log_level: LogLevel,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an expression
  Eval {
    expression: String,
    /// Variable bindings, e.g. "a=1,b=x+2"
    #[arg(short, long, allow_hyphen_values = true)]
    bind: Option<String>,
  },
  /// Apply the algebraic identities (x+0, x*1, ...)
  Simplify { expression: String },
  /// Inline named expressions and multiply out products over sums
  Expand {
    expression: String,
    /// Named expressions, e.g. "s=b+c"
    #[arg(short, long, allow_hyphen_values = true)]
    define: Option<String>,
  },
  /// Differentiate symbolically
  Diff {
    expression: String,
    #[arg(long)]
    var: String,
    #[arg(short, long, allow_hyphen_values = true)]
    bind: Option<String>,
  },
  /// Find a root with Newton's method
  #[command(allow_negative_numbers = true)]
  Root {
    expression: String,
    #[arg(long)]
    var: String,
    #[arg(long)]
    x0: f64,
    #[arg(long, env = "SYMEXPR_NEWTON_TOL", default_value = "1e-9")]
    tol: f64,
    #[arg(long, env = "SYMEXPR_NEWTON_MAX_ITER", default_value = "100")]
    max_iter: usize,
    #[arg(short, long, allow_hyphen_values = true)]
    bind: Option<String>,
  },
  /// Integrate numerically over [from, to]
  #[command(allow_negative_numbers = true)]
  Integrate {
    expression: String,
    #[arg(long)]
    var: String,
    #[arg(long)]
    from: f64,
    #[arg(long)]
    to: f64,
    /// Intervals for Simpson, sample points for the trapezoid rule
    #[arg(short, env = "SYMEXPR_SAMPLES", default_value = "100")]
    n: usize,
    #[arg(long, value_enum, default_value = "simpson")]
    method: Method,
    #[arg(short, long, allow_hyphen_values = true)]
    bind: Option<String>,
  },
  /// Simpson's rule on each span between breakpoints
  #[command(allow_negative_numbers = true)]
  Piecewise {
    expression: String,
    #[arg(long)]
    var: String,
    #[arg(long, value_delimiter = ',', required = true)]
    breaks: Vec<f64>,
    #[arg(short, env = "SYMEXPR_SAMPLES", default_value = "100")]
    n: usize,
    #[arg(short, long, allow_hyphen_values = true)]
    bind: Option<String>,
  },
  /// List the built-in operators
  Operators,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl LogLevel {
  fn directive(self) -> &'static str {
    match self {
      LogLevel::Error => "error",
      LogLevel::Warn => "warn",
      LogLevel::Info => "info",
      LogLevel::Debug => "debug",
      LogLevel::Trace => "trace",
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
  Trapezoid,
  Simpson,
  Adaptive,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(cli.log_level.directive()))
    .with_writer(std::io::stderr)
    .init();

  let output = run(cli.command)?;
  if cli.json {
    println!("{output}");
  } else {
    println!("{}", plain(&output));
  }
  Ok(())
}

/// Parses `text`, failing on the first translation error.
fn parse(lexicon: &Lexicon, text: &str) -> Result<Expression> {
  let expression = Expression::parse(lexicon, text);
  if let Some(error) = expression.errors().first() {
    bail!("cannot parse `{text}`: {error}");
  }
  Ok(expression)
}

fn bind(lexicon: &Lexicon, bindings: Option<&str>) -> Result<()> {
  if let Some(text) = bindings {
    lexicon
      .bind_all(text)
      .with_context(|| format!("invalid bindings `{text}`"))?;
  }
  Ok(())
}

fn run(command: Commands) -> Result<Value> {
  let lexicon = Lexicon::new();
  let value = match command {
    Commands::Eval { expression, bind: b } => {
      bind(&lexicon, b.as_deref())?;
      let value = parse(&lexicon, &expression)?.try_number()?;
      json!({ "expression": expression, "value": value })
    }
    Commands::Simplify { expression } => {
      let result = parse(&lexicon, &expression)?.simplify();
      json!({ "expression": expression, "result": result.to_string() })
    }
    Commands::Expand { expression, define } => {
      bind(&lexicon, define.as_deref())?;
      let result = parse(&lexicon, &expression)?.expand();
      json!({ "expression": expression, "result": result.to_string() })
    }
    Commands::Diff {
      expression,
      var,
      bind: b,
    } => {
      let derivative = parse(&lexicon, &expression)?.differentiate(&var);
      let simplified = derivative.simplify();
      bind(&lexicon, b.as_deref())?;
      let value = simplified.try_number().ok();
      json!({
        "expression": expression,
        "variable": var,
        "result": simplified.to_string(),
        "value": value,
      })
    }
    Commands::Root {
      expression,
      var,
      x0,
      tol,
      max_iter,
      bind: b,
    } => {
      bind(&lexicon, b.as_deref())?;
      let options = NewtonOptions {
        tolerance: tol,
        max_iterations: max_iter,
      };
      let found =
        parse(&lexicon, &expression)?.newton_root(&options, &var, x0)?;
      json!({
        "expression": expression,
        "variable": var,
        "root": found.root,
        "residual": found.residual,
        "step": found.step,
        "iterations": found.iterations,
        "converged": found.converged,
      })
    }
    Commands::Integrate {
      expression,
      var,
      from,
      to,
      n,
      method,
      bind: b,
    } => {
      bind(&lexicon, b.as_deref())?;
      let f = parse(&lexicon, &expression)?;
      let value = match method {
        Method::Trapezoid => trapezoid(&f, &var, from, to, n)?,
        Method::Simpson => simpson(&f, &var, from, to, n)?,
        Method::Adaptive => {
          adaptive_simpson(&f, &var, from, to, &AdaptiveOptions::default())?
        }
      };
      json!({
        "expression": expression,
        "from": from,
        "to": to,
        "value": value,
      })
    }
    Commands::Piecewise {
      expression,
      var,
      breaks,
      n,
      bind: b,
    } => {
      bind(&lexicon, b.as_deref())?;
      let f = parse(&lexicon, &expression)?;
      let parts = simpson_piecewise(&f, &var, &breaks, n)?;
      json!({ "expression": expression, "breaks": breaks, "values": parts })
    }
    Commands::Operators => json!(symexpr::operators::catalogue()),
  };
  Ok(value)
}

/// Human-readable form of a command result.
fn plain(output: &Value) -> String {
  if let Some(names) = output.as_array() {
    return names
      .iter()
      .filter_map(Value::as_str)
      .collect::<Vec<_>>()
      .join(" ");
  }
  if let Some(values) = output.get("values").and_then(Value::as_array) {
    return values
      .iter()
      .map(Value::to_string)
      .collect::<Vec<_>>()
      .join("\n");
  }
  if output.get("root").is_some() {
    let status = if output["converged"] == json!(true) {
      "converged"
    } else {
      "not converged"
    };
    return format!(
      "{} = {} ({status} after {} iterations, residual {})",
      output["variable"].as_str().unwrap_or("?"),
      output["root"],
      output["iterations"],
      output["residual"]
    );
  }
  match (output.get("result"), output.get("value")) {
    (Some(Value::String(result)), _) => result.clone(),
    (_, Some(value)) => value.to_string(),
    _ => output.to_string(),
  }
}
