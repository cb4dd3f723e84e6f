//! roboforge CLI - keep template/example stores fresh and scaffold projects

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use roboforge_core::{
    find_main_file, ExampleLoader, GradleBootstrap, HttpClient, ProjectGenerator, ProjectOptions,
    ProjectType, Repository, Settings, SyncOutcome, Updater, ZipReader, USER_AGENT,
};

/// Static descriptor assets bundled with the binary, seeded into the
/// template store on startup. Existing files are never overwritten.
const SEED_ASSETS: &[(&str, &str)] = &[
    ("settings.gradle", include_str!("../assets/settings.gradle")),
    (
        "wpilib_preferences.json",
        include_str!("../assets/wpilib_preferences.json"),
    ),
    (
        "java/build.gradle.template",
        include_str!("../assets/java/build.gradle.template"),
    ),
    (
        "java/gradle.properties.template",
        include_str!("../assets/java/gradle.properties.template"),
    ),
    (
        "cpp/build.gradle.template",
        include_str!("../assets/cpp/build.gradle.template"),
    ),
    (
        "cpp/gradle.properties.template",
        include_str!("../assets/cpp/gradle.properties.template"),
    ),
];

#[derive(Parser)]
#[command(name = "roboforge")]
#[command(about = "Scaffold FRC robot projects from versioned template archives")]
#[command(version)]
struct Args {
    /// Settings file (YAML); defaults apply when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the local template/example stores from the remote repository
    Update {
        #[arg(value_enum, default_value = "all")]
        target: UpdateTarget,
    },
    /// Generate a new project from the template store
    Generate {
        /// Destination directory for the new project
        #[arg(short, long)]
        dest: PathBuf,

        /// Project flavor: sample, commandbased, iterative or timed
        #[arg(short = 't', long = "type", default_value = "timed")]
        project_type: ProjectType,

        /// Extra dependency declaration for gradle.properties (repeatable)
        #[arg(long = "dep")]
        dependencies: Vec<String>,

        /// Generate a debug-enabled project
        #[arg(long)]
        debug: bool,
    },
    /// List or open the bundled example projects
    Example {
        #[command(subcommand)]
        command: ExampleCommand,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum UpdateTarget {
    Templates,
    Examples,
    All,
}

#[derive(Subcommand)]
enum ExampleCommand {
    /// List the examples in the current archive
    List,
    /// Extract an example to a temp directory and open its entry point
    Open { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    seed_assets(&settings)?;

    match args.command {
        Command::Update { target } => update(&settings, target).await,
        Command::Generate {
            dest,
            project_type,
            dependencies,
            debug,
        } => generate(&settings, dest, project_type, dependencies, debug).await,
        Command::Example { command } => example(&settings, command).await,
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roboforge/config.yaml"),
    };
    Settings::load(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))
}

/// Write any missing bundled asset into the template store root.
fn seed_assets(settings: &Settings) -> Result<()> {
    let root = settings.templates_root();
    for (rel, contents) in SEED_ASSETS {
        let path = root.join(rel);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to seed {}", path.display()))?;
    }
    Ok(())
}

async fn update(settings: &Settings, target: UpdateTarget) -> Result<()> {
    let repos = match target {
        UpdateTarget::Templates => vec![Repository::templates(settings.templates_root())],
        UpdateTarget::Examples => vec![Repository::examples(settings.examples_root())],
        UpdateTarget::All => vec![
            Repository::templates(settings.templates_root()),
            Repository::examples(settings.examples_root()),
        ],
    };

    let updater = Updater::new(HttpClient::new(USER_AGENT));
    let lang = settings.language;
    for repo in &repos {
        print!(
            "  {} {} store ({})...",
            "->".blue(),
            repo.display_name(),
            lang
        );
        match updater.sync(repo, lang).await {
            Ok(SyncOutcome::UpToDate) => println!(" {}", "up to date".green()),
            Ok(SyncOutcome::Updated { version }) => {
                println!(" {} ({})", "updated".green(), version)
            }
            Err(e) => {
                println!(" {}", "failed".red());
                return Err(e).with_context(|| {
                    format!(
                        "could not update the {} store",
                        repo.display_name().to_lowercase()
                    )
                });
            }
        }
    }
    Ok(())
}

async fn generate(
    settings: &Settings,
    dest: PathBuf,
    project_type: ProjectType,
    dependencies: Vec<String>,
    debug: bool,
) -> Result<()> {
    let repo = Repository::templates(settings.templates_root());
    let updater = Updater::new(HttpClient::new(USER_AGENT));

    if settings.auto_update {
        update(settings, UpdateTarget::Templates).await?;
    }
    let archive = updater
        .latest_archive_path(&repo, settings.language)
        .await?;
    if !archive.exists() {
        bail!(
            "template archive not found at {}; run `roboforge update templates` first",
            archive.display()
        );
    }

    let mut options = ProjectOptions::new(dest.clone(), project_type);
    options.dependencies = dependencies;
    options.debug = debug;

    let generator = ProjectGenerator::new(&ZipReader, &GradleBootstrap, settings);
    generator.generate(&options, &repo, &archive).await?;

    println!();
    println!(
        "{} {} project in {}",
        "Generated".green().bold(),
        project_type,
        dest.display()
    );
    println!();
    println!("Next steps:");
    println!("  cd {}", dest.display());
    println!("  ./gradlew build");
    Ok(())
}

async fn example(settings: &Settings, command: ExampleCommand) -> Result<()> {
    let repo = Repository::examples(settings.examples_root());
    let updater = Updater::new(HttpClient::new(USER_AGENT));

    if settings.auto_update {
        update(settings, UpdateTarget::Examples).await?;
    }
    let archive = updater
        .latest_archive_path(&repo, settings.language)
        .await?;
    if !archive.exists() {
        bail!(
            "example archive not found at {}; run `roboforge update examples` first",
            archive.display()
        );
    }

    let mut loader = ExampleLoader::new(ZipReader);
    match command {
        ExampleCommand::List => {
            for info in loader.list(&archive)? {
                let tags = if info.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", info.tags.join(", "))
                };
                println!(
                    "  {} {} - {}{}",
                    "->".blue(),
                    info.name.bold(),
                    info.description,
                    tags.dimmed()
                );
            }
        }
        ExampleCommand::Open { name } => {
            let examples = loader.list(&archive)?;
            let info = examples
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(&name))
                .with_context(|| format!("no example named '{name}'"))?
                .clone();

            let paths = loader.extract(&archive, &info)?;
            let main = find_main_file(&paths)?;
            println!(
                "{} {} file(s) extracted",
                "Opened".green().bold(),
                paths.len()
            );
            println!("  entry point: {}", main.display());
            open::that(main)?;
        }
    }
    Ok(())
}
