mod cli;

use anyhow::Context;
use camino::Utf8Path;
use clap::Parser;
use cli::{Command, Options};
use golem_db::{File, RootDatabase, check_file};
use golem_errors::Renderer;
use golem_template::{FileKind, TemplateConfig};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    init_logging();

    let options = Options::parse();
    let config = options.template.resolve()?;
    let db = RootDatabase::default();

    match options.command {
        Command::Check { paths } => {
            let renderer = Renderer::styled();
            let mut errors = 0;

            for path in paths {
                let file = open(&db, &path, &config)?;
                if file.kind(&db) == FileKind::Other {
                    tracing::warn!(%path, "skipping file that is neither Go source nor a template");
                    continue;
                }
                let diagnostics = check_file(&db, file);
                let text = file.text(&db);

                for diagnostic in diagnostics {
                    eprintln!("{}", diagnostic.render(&renderer, path.as_str(), text));
                }
                errors += diagnostics.len();
            }

            if errors > 0 {
                anyhow::bail!("found {errors} syntax error(s)");
            }
            Ok(())
        }
        Command::Tree { path } => {
            let file = open(&db, &path, &config)?;
            match file.kind(&db) {
                FileKind::Template => {
                    for region in file.template(&db).regions() {
                        match region.parse() {
                            Some(parse) => print!("{}", parse.debug_dump()),
                            None => println!("HOST@{:?}", region.range()),
                        }
                        if let Some(error) = region.error() {
                            println!("error@{:?}: {error}", region.range());
                        }
                    }
                }
                FileKind::Source => print!("{}", file.parse(&db).debug_dump()),
                FileKind::Other => {
                    anyhow::bail!("`{path}` is neither Go source nor a template")
                }
            }
            Ok(())
        }
    }
}

fn open(db: &RootDatabase, path: &Utf8Path, config: &TemplateConfig) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    tracing::debug!(%path, bytes = text.len(), "read file");
    Ok(File::new(db, path.to_owned(), text, config.clone()))
}

/// Logs go to stderr, filtered by `GOLEM_LOG` (default `warn`).
fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let filter = EnvFilter::try_from_env("GOLEM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
