use std::path::PathBuf;

use structopt::StructOpt;
use structopt::clap;

use raven_ibl::ShKernel;
use raven_log::LevelFilter;

/// Flags taking one value, as (short, long).
const VALUE_FLAGS: [(&str, &str); 6] = [
    ("-i", "--input"),
    ("-o", "--output"),
    ("-p", "--preview"),
    ("-k", "--kernel"),
    ("-l", "--level"),
    ("", "--log-file"),
];

const SWITCHES: [(&str, &str); 3] = [
    ("-v", "--verbose"),
    ("-h", "--help"),
    ("-V", "--version"),
];

/// Console variables collected from the command line.
#[derive(Debug, Clone)]
pub struct ConsoleVars {
    pub input: Option<String>,
    pub output: PathBuf,
    pub preview: PathBuf,
    pub verbose: bool,
    pub kernel: ShKernel,
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "shgen", about = "Bake the diffuse irradiance of a cubemap into nine SH coefficients.")]
struct ConsoleVarsImpl {
    /// input cubemap: a DDS file, a directory searched for *.dds, or a wildcard pattern
    #[structopt(short, long)]
    input: Option<String>,

    /// output JSON file of the coefficients
    #[structopt(short, long, default_value = "diffuse.json")]
    output: PathBuf,

    /// also reconstruct the irradiance and write it as a preview cubemap
    #[structopt(short, long)]
    verbose: bool,

    /// preview cubemap written in verbose mode
    #[structopt(short, long, default_value = "diffuse.dds")]
    preview: PathBuf,

    /// convolution kernel (please choose from radiance, irradiance, prescaled)
    #[structopt(short, long, default_value = "prescaled")]
    kernel: ShKernel,

    /// log level (please choose from trace, debug, info, warn, error)
    #[structopt(short, long, default_value = "info", parse(try_from_str = raven_log::parse_level))]
    level: LevelFilter,

    /// also write the log into this file
    #[structopt(long)]
    log_file: Option<PathBuf>,
}

impl From<ConsoleVarsImpl> for ConsoleVars {
    fn from(vars: ConsoleVarsImpl) -> Self {
        Self {
            input: vars.input,
            output: vars.output,
            preview: vars.preview,
            verbose: vars.verbose,
            kernel: vars.kernel,
            level: vars.level,
            log_file: vars.log_file,
        }
    }
}

/// Collect console configuration from the process arguments.
///
/// Also returns the arguments that were ignored, so they can be reported once logging is up.
pub fn from_args() -> Result<(ConsoleVars, Vec<String>), clap::Error> {
    parse(std::env::args())
}

/// Parse `args`, the first one being the program name.
///
/// Unknown flags (with the values following them), flags missing their value and stray
/// words are dropped before parsing and returned as the second element.
pub fn parse<I>(args: I) -> Result<(ConsoleVars, Vec<String>), clap::Error>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let (kept, ignored) = split_known_args(args.into_iter().map(Into::into));
    let vars = ConsoleVarsImpl::from_iter_safe(kept)?;
    Ok((vars.into(), ignored))
}

#[inline]
fn is_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

fn takes_value(arg: &str) -> bool {
    VALUE_FLAGS.iter().any(|(short, long)| arg == *short || arg == *long)
}

#[inline]
fn is_long_with_value(arg: &str, long: &str) -> bool {
    arg.strip_prefix(long).map_or(false, |rest| rest.starts_with('='))
}

/// A long flag written with a single dash, like `-input` or `-level=debug`.
fn is_single_dash_long(arg: &str) -> bool {
    if arg.starts_with("--") {
        return false;
    }

    let as_long = format!("-{}", arg);
    VALUE_FLAGS.iter().chain(SWITCHES.iter())
        .any(|(_, long)| as_long == *long || is_long_with_value(&as_long, long))
}

/// `--input=sky.dds` or `-isky.dds`
fn has_inline_value(arg: &str) -> bool {
    VALUE_FLAGS.iter().any(|(short, long)| {
        is_long_with_value(arg, long)
            || (!short.is_empty() && arg.len() > 2 && arg.starts_with(short) && !is_single_dash_long(arg))
    })
}

fn split_known_args(args: impl Iterator<Item = String>) -> (Vec<String>, Vec<String>) {
    let mut args = args.peekable();
    let mut kept = Vec::new();
    let mut ignored = Vec::new();

    // program name
    kept.extend(args.next());

    while let Some(arg) = args.next() {
        if !is_flag(&arg) {
            ignored.push(arg);
        } else if SWITCHES.iter().any(|(short, long)| arg == *short || arg == *long) || has_inline_value(&arg) {
            kept.push(arg);
        } else if takes_value(&arg) {
            match args.next_if(|next| !is_flag(next)) {
                Some(value) => {
                    kept.push(arg);
                    kept.push(value);
                }
                None => ignored.push(arg),
            }
        } else {
            ignored.push(arg);
            while let Some(value) = args.next_if(|next| !is_flag(next)) {
                ignored.push(value);
            }
        }
    }

    (kept, ignored)
}
