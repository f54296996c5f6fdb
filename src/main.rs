use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use num_complex::Complex64;

use calcnumerics::configuration::Configuration;
use calcnumerics::format::numberformat::{
    format_error,
    format_number,
    format_scalar
};
use calcnumerics::math::scalar::Scalar;
use calcnumerics::ode::eulerproblem::EulerProblem;
use calcnumerics::precision::edigits::EDigitsComputation;
use calcnumerics::series::serieskind::SeriesKind;
use calcnumerics::series::taylorapprox::TaylorApproximation;
use calcnumerics::special::gamma::{
    gamma_complex,
    gamma_integral
};
use calcnumerics::special::zeta::zeta;
use calcnumerics::summation::chunkedriemannsum::ChunkedRiemannSum;
use calcnumerics::summation::interval::Interval;
use calcnumerics::summation::sumrule::SumRule;
use calcnumerics::task::cancellation::ComputationSlot;

const PLACES: u32 = 6;

#[derive(Parser)]
#[command(name = "calcnumerics", version, about = "Riemann sums, Taylor series, digits of e and Euler's method")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Approximate a definite integral
    Riemann {
        #[arg(short, long, default_value = "square")]
        function: Integrand,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        from: f64,

        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        to: f64,

        /// Number of panels
        #[arg(short = 'n', long, default_value = "1000")]
        samples: u64,

        /// left, right, midpoint or trapezoid
        #[arg(short, long, default_value = "midpoint")]
        rule: SumRule,
    },

    /// Evaluate a truncated Taylor series
    Taylor {
        /// sin, cos, exp, sinh, cosh, ln, geometric or reciprocal
        #[arg(short, long, default_value = "exp")]
        kind: SeriesKind,

        #[arg(allow_hyphen_values = true)]
        x: f64,

        /// Imaginary part of x
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        imag: f64,

        #[arg(short, long, default_value = "10")]
        degree: u32,
    },

    /// Digits of e from the Maclaurin series
    EDigits {
        #[arg(default_value = "100")]
        degree: u64,
    },

    /// Euler's method against a known solution
    Euler {
        #[arg(short, long, default_value = "exponential")]
        problem: CliEulerProblem,

        /// Step size
        #[arg(short, long, default_value = "0.1")]
        delta: f64,
    },

    /// Riemann zeta function
    Zeta {
        #[arg(allow_hyphen_values = true)]
        re: f64,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        im: f64,
    },

    /// Gamma function, directly and as an integral
    Gamma {
        #[arg(allow_hyphen_values = true)]
        x: f64,

        /// Upper limit of the integral
        #[arg(long, default_value = "50")]
        upper: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Integrand {
    Square,
    Cube,
    Sin,
    Exp,
    Sqrt,
    Reciprocal,
}

impl Integrand {
    fn function(self) -> fn(f64) -> f64 {
        match self {
            Integrand::Square => |x| x * x,
            Integrand::Cube => |x| x * x * x,
            Integrand::Sin => f64::sin,
            Integrand::Exp => f64::exp,
            Integrand::Sqrt => f64::sqrt,
            Integrand::Reciprocal => f64::recip,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliEulerProblem {
    Exponential,
    Linear,
}

impl From<CliEulerProblem> for EulerProblem {
    fn from(problem: CliEulerProblem) -> Self {
        match problem {
            CliEulerProblem::Exponential => EulerProblem::Exponential,
            CliEulerProblem::Linear => EulerProblem::Linear,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Configuration::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Configuration::new(),
    };

    match cli.command {
        Commands::Riemann { function, from, to, samples, rule } => {
            cmd_riemann(&config, function, from, to, samples, rule)
        }
        Commands::Taylor { kind, x, imag, degree } => cmd_taylor(&config, kind, x, imag, degree),
        Commands::EDigits { degree } => cmd_e_digits(&config, degree),
        Commands::Euler { problem, delta } => cmd_euler(&config, problem.into(), delta),
        Commands::Zeta { re, im } => cmd_zeta(&config, re, im),
        Commands::Gamma { x, upper } => cmd_gamma(&config, x, upper),
    }
}

fn report_progress(processed: u64, total: u64) {
    let percent = if total == 0 { 100.0 } else { processed as f64 / total as f64 * 100.0 };
    eprint!("\r{:5.1}%", percent);
    let _ = std::io::stderr().flush();
}

fn cmd_riemann(config: &Configuration, function: Integrand, from: f64, to: f64, samples: u64, rule: SumRule) -> Result<()> {
    let mut slot = ComputationSlot::new("riemann");
    let interval = Interval::new(from, to)?;
    let sum = ChunkedRiemannSum::with_settings(
        function.function(),
        interval,
        samples,
        rule,
        &config.summation,
        slot.begin(),
    )?;
    let chunked = sum.total() > config.summation.chunk_size;
    let area = sum.run(|processed, total| {
        if chunked {
            report_progress(processed, total)
        }
    })?;
    if chunked {
        eprintln!();
    }
    slot.clear();

    println!("{} sum with {} panels: {}", rule, samples, format_number(area, PLACES, None, &config.format));
    Ok(())
}

fn cmd_taylor(config: &Configuration, kind: SeriesKind, x: f64, imag: f64, degree: u32) -> Result<()> {
    let x = if imag == 0.0 { Scalar::Real(x) } else { Scalar::complex(x, imag) };
    let result = TaylorApproximation::evaluate(x, kind, degree);
    let settings = &config.format;

    println!("{} at x = {}, degree {}", kind, format_scalar(x, PLACES, settings), degree);
    println!("  approximation  {}", format_scalar(result.approximation(), PLACES, settings));
    println!("  actual         {}", format_scalar(result.actual(), PLACES, settings));
    println!("  error          {}", format_error(&result.error(), PLACES, settings));
    if let Some(bound) = result.lagrange_bound() {
        println!("  lagrange bound {}", format_number(bound, PLACES, None, settings));
    }
    Ok(())
}

fn cmd_e_digits(config: &Configuration, degree: u64) -> Result<()> {
    let mut slot = ComputationSlot::new("e-digits");
    let computation = EDigitsComputation::new(degree, &config.e_digits, slot.begin())?;
    let chunked = config.e_digits.chunk_size_for(degree) <= degree;
    let result = computation.run(|processed, total| {
        if chunked {
            report_progress(processed, total)
        }
    })?;
    if chunked {
        eprintln!();
    }
    slot.clear();

    println!("{}", result.digits());
    println!("{} digits in {} ms", result.digit_count(), result.elapsed_ms());
    Ok(())
}

fn cmd_euler(config: &Configuration, problem: EulerProblem, delta: f64) -> Result<()> {
    let min_delta = 1.0 / problem.max_intervals() as f64;
    if delta < min_delta {
        anyhow::bail!("step size {} is below the smallest offered, {}", delta, min_delta);
    }
    let trajectory = problem.solve(delta, &config.euler)?;
    let settings = &config.format;

    println!("{:>10} {:>14} {:>14} {:>14}", "x", "approx y", "true y", "error");
    for row in trajectory.rows() {
        println!(
            "{:>10} {:>14} {:>14} {:>14}",
            format_number(row.x, 4, None, settings),
            format_number(row.approx_y, PLACES, None, settings),
            format_number(row.true_y, PLACES, None, settings),
            format_number(row.absolute_error, PLACES, None, settings),
        );
    }
    println!("{} steps of {}", trajectory.steps(), trajectory.delta());
    Ok(())
}

fn cmd_zeta(config: &Configuration, re: f64, im: f64) -> Result<()> {
    let value = zeta(Complex64::new(re, im));
    let value = if value.im == 0.0 { Scalar::Real(value.re) } else { Scalar::Complex(value) };
    println!("ζ({}) = {}", format_scalar(Scalar::complex(re, im), PLACES, &config.format), format_scalar(value, PLACES, &config.format));
    Ok(())
}

fn cmd_gamma(config: &Configuration, x: f64, upper: f64) -> Result<()> {
    let settings = &config.format;
    let direct = gamma_complex(Complex64::new(x, 0.0)).re;
    let integral = gamma_integral(x, upper)?;
    println!("Γ({}) = {}", format_number(x, PLACES, None, settings), format_number(direct, PLACES, None, settings));
    println!(
        "∫₀^{} t^(x−1) e^(−t) dt = {}",
        format_number(upper, PLACES, None, settings),
        format_number(integral, PLACES, None, settings)
    );
    Ok(())
}
