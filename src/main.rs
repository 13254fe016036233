//! CLI entrypoint.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::{fs, process};

use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use richdoc::{ObjectInfo, OutputFormat, RenderOptions, Result, RichDoc, SphinxBuild, telemetry};

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Output formats accepted by `--format`.
enum FormatArg {
	/// HTML markup.
	Html,
	/// Plain text.
	Text,
}

impl From<FormatArg> for OutputFormat {
	fn from(format: FormatArg) -> Self {
		match format {
			FormatArg::Html => Self::Html,
			FormatArg::Text => Self::Text,
		}
	}
}

#[derive(Args, Clone)]
struct CommonArgs {
	/// Directory scratch directories are created in (defaults to a per-user temp directory)
	#[arg(long, env = "RICHDOC_CACHE_DIR")]
	cache_dir: Option<PathBuf>,

	/// Directory the shared Sphinx configuration is generated into
	#[arg(long)]
	conf_dir: Option<PathBuf>,

	/// Generate a throwaway Sphinx configuration for every build
	#[arg(long, default_value_t = false)]
	temp_confdir: bool,

	/// Path to the sphinx-build executable
	#[arg(long, env = "RICHDOC_SPHINX_BUILD")]
	sphinx_build: Option<PathBuf>,

	/// Python interpreter probed for matplotlib plot support
	#[arg(long)]
	python: Option<PathBuf>,

	/// Log engine invocations and directories to stderr
	#[arg(short = 'v', long, default_value_t = false)]
	verbose: bool,

	/// Disable ANSI colors in CLI output
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

#[derive(Args, Clone)]
struct OptionArgs {
	/// JSON file with render options; flags below override it
	#[arg(long, value_name = "FILE")]
	options: Option<PathBuf>,

	/// Do not load MathJax or the math extension
	#[arg(long, default_value_t = false)]
	no_math: bool,

	/// Load MathJax from the local asset directory
	#[arg(long, default_value_t = false)]
	local_mathjax: bool,

	/// Start with docstring sections collapsed
	#[arg(long, default_value_t = false)]
	collapse: bool,

	/// Show the section outline
	#[arg(long, default_value_t = false)]
	outline: bool,

	/// Apply the legacy Qt4 web view tweaks
	#[arg(long, default_value_t = false)]
	use_qt4: bool,
}

#[derive(Args, Clone)]
struct RenderArgs {
	/// Object info JSON file, or `-` for stdin
	#[arg(default_value = "-")]
	input: String,

	/// Write a plain-text page instead of HTML
	#[arg(long, default_value_t = false)]
	text: bool,

	/// Print a file:// URL instead of a path
	#[arg(long, default_value_t = false)]
	url: bool,

	#[command(flatten)]
	options: OptionArgs,

	#[command(flatten)]
	common: CommonArgs,
}

#[derive(Args, Clone)]
struct DocstringArgs {
	/// reStructuredText docstring file, or `-` for stdin
	#[arg(default_value = "-")]
	input: String,

	/// Output format
	#[arg(short = 'f', long, value_enum, default_value = "html")]
	format: FormatArg,

	#[command(flatten)]
	options: OptionArgs,

	#[command(flatten)]
	common: CommonArgs,
}

#[derive(Subcommand)]
enum Command {
	/// Render the rich page for an introspected object and print its location.
	Render(RenderArgs),
	/// Process a raw docstring and print the result.
	Docstring(DocstringArgs),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the richdoc CLI.
struct Cli {
	#[command(subcommand)]
	command: Command,
}

impl Command {
	fn common(&self) -> &CommonArgs {
		match self {
			Self::Render(args) => &args.common,
			Self::Docstring(args) => &args.common,
		}
	}
}

/// Read `input` from a file, or from stdin when it is `-`.
fn read_input(input: &str) -> io::Result<String> {
	if input == "-" {
		let mut buffer = String::new();
		io::stdin().read_to_string(&mut buffer)?;
		Ok(buffer)
	} else {
		fs::read_to_string(input)
	}
}

/// Build render options from an optional JSON file and the CLI flags.
fn render_options(args: &OptionArgs) -> Result<RenderOptions> {
	let base = match &args.options {
		Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
		None => RenderOptions::default(),
	};
	Ok(RenderOptions {
		render_math: base.render_math && !args.no_math,
		local_mathjax: base.local_mathjax || args.local_mathjax,
		collapse_sections: base.collapse_sections || args.collapse,
		use_qt4: base.use_qt4 || args.use_qt4,
		outline: base.outline || args.outline,
	})
}

/// Build a RichDoc instance configured with common CLI knobs.
fn build_richdoc(common: &CommonArgs) -> Result<RichDoc> {
	let engine = match &common.sphinx_build {
		Some(program) => SphinxBuild::new(program).with_python(SphinxBuild::find_python()),
		None => SphinxBuild::locate()?,
	};
	let engine = match &common.python {
		Some(python) => engine.with_python(Some(python.clone())),
		None => engine,
	};

	let mut richdoc = RichDoc::new(engine).with_temp_confdir(common.temp_confdir);
	if let Some(dir) = &common.cache_dir {
		richdoc = richdoc.with_cache_dir(dir.clone());
	}
	if let Some(dir) = &common.conf_dir {
		richdoc = richdoc.with_conf_dir(dir.clone());
	}
	Ok(richdoc)
}

fn run(command: Command) -> Result<()> {
	match command {
		Command::Render(args) => {
			let oinfo = ObjectInfo::from_json(&read_input(&args.input)?)?;
			let options = render_options(&args.options)?;
			let richdoc = build_richdoc(&args.common)?;
			let artifact = if args.text {
				richdoc.render_text(&oinfo, &options)?
			} else {
				richdoc.render(&oinfo, &options)?
			};
			if args.url {
				println!("{}", artifact.url()?);
			} else {
				println!("{}", artifact.path.display());
			}
		}
		Command::Docstring(args) => {
			let docstring = read_input(&args.input)?;
			let options = render_options(&args.options)?;
			let richdoc = build_richdoc(&args.common)?;
			print!("{}", richdoc.sphinxify(&docstring, args.format.into(), &options)?);
		}
	}
	Ok(())
}

fn main() {
	let cli = Cli::parse();
	let common = cli.command.common();
	let color = !common.no_color && io::stderr().is_terminal();
	telemetry::init(common.verbose, color);

	if let Err(e) = run(cli.command) {
		if color {
			eprintln!("{} {e}", "error:".red().bold());
		} else {
			eprintln!("error: {e}");
		}
		process::exit(1);
	}
}
