use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use scorescribe::config::Config;
use scorescribe::draw::RenderStyle;
use scorescribe::input::{InputState, ToolSignal};
use scorescribe::session::{self, ProjectFileOptions};
use scorescribe::{export, script};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "scorescribe")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SCORESCRIBE_BUILD_ID"), ")"),
    about = "Scoresheet placement and input routing for music notation"
)]
struct Cli {
    /// Config file to use instead of ~/.config/scorescribe/config.toml
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an event script against a project and write the results
    Replay {
        /// JSON array of input events
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Project file to start from (a new project if absent)
        #[arg(long, short = 'p', value_name = "FILE")]
        project: Option<PathBuf>,

        /// Where to save the resulting project
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,

        /// Export the current page as PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Export every page to a PDF
        #[arg(long, value_name = "FILE")]
        pdf: Option<PathBuf>,
    },

    /// List the notation symbols and their trigger keys
    Symbols,

    /// Write a documented default config file
    InitConfig {
        /// Print the example config instead of writing it
        #[arg(long, action = ArgAction::SetTrue)]
        stdout: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay {
            script,
            project,
            out,
            png,
            pdf,
        } => {
            let config = load_config(cli.config.as_deref())?;
            replay(&config, &script, project.as_deref(), out.as_deref(), png, pdf)
        }
        Command::Symbols => {
            let registry = scorescribe::NotationRegistry::builtin();
            for symbol in registry.iter() {
                println!("{}\t{}\t{}", symbol.trigger, symbol.name, symbol.glyph);
            }
            Ok(())
        }
        Command::InitConfig { stdout } => {
            if stdout {
                print!("{}", include_str!("../config.example.toml"));
                return Ok(());
            }
            let path = match cli.config {
                Some(path) => path,
                None => Config::get_config_path()?,
            };
            Config::create_default_file(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn replay(
    config: &Config,
    script_path: &Path,
    project_path: Option<&Path>,
    out: Option<&Path>,
    png: Option<PathBuf>,
    pdf: Option<PathBuf>,
) -> Result<()> {
    let events = script::load_script(script_path)?;
    let file_options = ProjectFileOptions::from(&config.session);

    let mut state = InputState::from_config(config).context("invalid keybindings")?;
    if let Some(path) = project_path {
        match session::load_project(path, &file_options)? {
            Some(loaded) => state.load_project(loaded.project),
            None => log::info!("Starting a new project ({} not loaded)", path.display()),
        }
    }
    if let Err(err) = state.create_overlay() {
        log::warn!("Ink overlay unavailable, drawing will not be rasterised: {err}");
    }

    let signal = ToolSignal::new();
    state.subscribe_tools(&signal);
    script::run(&mut state, &signal, &events);

    let style = RenderStyle::from(config);
    if let Some(path) = png {
        export::export_png(
            state.current_page(),
            state.registry(),
            state.layout(),
            &style,
            &path,
        )?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = pdf {
        export::export_pdf(
            state.project(),
            state.registry(),
            state.layout(),
            &style,
            &path,
        )?;
        println!("Wrote {}", path.display());
    }

    let page = state.current_page();
    println!(
        "{} event(s) replayed; page {}/{}: {} symbol(s), {} text, {} articulation(s), {} line(s)",
        events.len(),
        state.project().current_index() + 1,
        state.project().page_count(),
        page.symbols().len(),
        page.texts().len(),
        page.articulations().len(),
        page.lines().len()
    );

    if let Some(path) = out {
        if !session::save_project(state.project(), path, &file_options)? {
            anyhow::bail!(
                "project exceeds session.max_file_size_mb; {} not saved",
                path.display()
            );
        }
        println!("Saved {}", path.display());
    }
    Ok(())
}
