use crate::components::Registry;
use crate::config::Config;
use crate::host::Host;
use crate::icons::{CategoryFilter, GlyphSet, Glyphs, IconCatalog};
use crate::utils::{format_path_for_display, get_config_path, get_log_dir};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Headless UI components with an interactive terminal showcase
#[derive(Parser, Debug)]
#[command(name = "componentry", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered components
    List,
    /// Render a component and print its UI tree
    Render {
        /// Registered component name, e.g. `pagination`
        name: String,
        /// Component options as a JSON object
        #[arg(short, long)]
        options: Option<String>,
    },
    /// Search the icon catalog
    Icons {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category: all, development, ui, business, social, files, devices, media
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Show where the configuration and logs live
    Config,
}

impl Cli {
    /// Run a subcommand; launching the TUI for no subcommand is the caller's job
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::List) => Self::cmd_list(),
            Some(Commands::Render { name, options }) => Self::cmd_render(&name, options.as_deref()),
            Some(Commands::Icons { search, category }) => Self::cmd_icons(&search, &category),
            Some(Commands::Config) => Self::cmd_config(),
            None => Ok(()),
        }
    }

    fn cmd_list() -> Result<()> {
        for name in Registry::with_builtins().names() {
            println!("{}", name);
        }
        Ok(())
    }

    fn cmd_render(name: &str, options: Option<&str>) -> Result<()> {
        let registry = Registry::with_builtins();
        for line in render_outline(&registry, name, options)? {
            println!("{}", line);
        }
        Ok(())
    }

    fn cmd_icons(search: &str, category: &str) -> Result<()> {
        let glyphs = Glyphs::new();
        let lines = icon_lines(&IconCatalog::builtin(), &glyphs, search, category)?;
        if lines.is_empty() {
            println!("No icons match");
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    fn cmd_config() -> Result<()> {
        let config_path = get_config_path();
        let config = Config::load_or_create(&config_path).context("Failed to load configuration")?;
        println!("Config:      {}", format_path_for_display(&config_path));
        println!("Preferences: {}", format_path_for_display(&config.preferences_file));
        println!("Logs:        {}", format_path_for_display(&get_log_dir()));
        println!("Theme:       {}", config.theme_type().name());
        Ok(())
    }
}

/// Subscriber for one-shot subcommands: plain lines to `writer`, filtered by
/// `RUST_LOG` and defaulting to warnings
pub fn cli_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish()
}

/// Render `name` with `options` on a fresh page and outline its subtree
pub fn render_outline(registry: &Registry, name: &str, options: Option<&str>) -> Result<Vec<String>> {
    let options: Value = match options {
        Some(json) => serde_json::from_str(json).context("Options must be valid JSON")?,
        None => Value::Object(Default::default()),
    };
    if !registry.contains(name) {
        bail!("Unknown component '{}'; run `componentry list`", name);
    }
    let mut component = registry
        .create(name, options)
        .ok_or_else(|| anyhow!("Options do not fit component '{}'", name))?;
    let mut host = Host::new();
    let handle = host.mount(component.as_mut())?;
    Ok(host.document.outline(handle))
}

/// One line per icon matching `search` in `category`
pub fn icon_lines(
    catalog: &IconCatalog,
    glyphs: &dyn GlyphSet,
    search: &str,
    category: &str,
) -> Result<Vec<String>> {
    let filter: CategoryFilter = category.parse().map_err(|e: String| anyhow!(e))?;
    Ok(catalog
        .filter(search, filter)
        .into_iter()
        .map(|icon| {
            format!(
                "{} {:<24} {}",
                glyphs.symbol(icon.category),
                icon.name,
                icon.category.label()
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconSet;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["componentry", "render", "pagination", "-o", "{}"]);
        match cli.command {
            Some(Commands::Render { name, options }) => {
                assert_eq!(name, "pagination");
                assert_eq!(options.as_deref(), Some("{}"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Cli::parse_from(["componentry"]).command.is_none());
    }

    #[test]
    fn test_render_outline_rejects_unknown_and_bad_json() {
        let registry = Registry::with_builtins();
        assert!(render_outline(&registry, "nope", None).is_err());
        assert!(render_outline(&registry, "button", Some("{not json")).is_err());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_cli_subscriber_reports_registry_errors() {
        let captured = Captured::default();
        let subscriber = cli_subscriber(captured.clone());
        tracing::subscriber::with_default(subscriber, || {
            let registry = Registry::with_builtins();
            assert!(registry.create("nope", Value::Object(Default::default())).is_none());
        });
        let output = captured.text();
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("Component 'nope' not found"), "{output}");
    }

    #[test]
    fn test_icon_lines_filter() {
        let glyphs = Glyphs::with_icon_set(IconSet::Ascii);
        let lines = icon_lines(&IconCatalog::builtin(), &glyphs, "", "media").unwrap();
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.starts_with("[MED]")));
        assert!(icon_lines(&IconCatalog::builtin(), &glyphs, "", "cooking").is_err());
    }
}
