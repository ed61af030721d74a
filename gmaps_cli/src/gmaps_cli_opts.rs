use anyhow::Error;
use clap::Parser;
use log::debug;
use stack_string::{format_sstr, StackString};
use std::path::{Path, PathBuf};
use stdout_channel::StdoutChannel;

use gmaps_lib::{
    client_runtime::CLIENT_RUNTIME_JS, map_definition::MapDocument,
    map_type::get_map_type_choices, maps_config::MapsConfig, maps_manager::MapsManager,
};

#[derive(Parser, Debug)]
pub enum GmapsCliOpts {
    /// Render a yaml or json map document to a standalone html page
    Render {
        #[clap(short, long)]
        input: PathBuf,
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long)]
        title: Option<StackString>,
        #[clap(short, long)]
        key: Option<StackString>,
    },
    /// Print only the map bodies of a document, without the page around them
    Body {
        #[clap(short, long)]
        input: PathBuf,
    },
    /// Print the client side runtime script
    Runtime,
    /// Print the script tag loading the maps library
    Library {
        #[clap(short, long)]
        sensor: bool,
    },
    /// List the supported map types
    Types,
}

impl GmapsCliOpts {
    /// # Errors
    /// Return error if config loading, reading the input or rendering fails
    pub async fn process_args() -> Result<(), Error> {
        let config = MapsConfig::get_config(None)?;
        let stdout: StdoutChannel<StackString> = StdoutChannel::new();

        Self::parse().run(&config, &stdout).await?;

        stdout.close().await?;
        Ok(())
    }

    /// # Errors
    /// Return error if reading the input or rendering fails
    pub async fn run(
        self,
        config: &MapsConfig,
        stdout: &StdoutChannel<StackString>,
    ) -> Result<(), Error> {
        match self {
            Self::Render {
                input,
                output,
                title,
                key,
            } => {
                let page = render_document(
                    config,
                    &input,
                    title.as_ref().map(StackString::as_str),
                    key.as_ref().map(StackString::as_str),
                )
                .await?;
                match output {
                    Some(output) => {
                        debug!("write {} bytes to {}", page.len(), output.display());
                        tokio::fs::write(&output, page.as_bytes()).await?;
                        stdout.send(format_sstr!("wrote {}", output.display()));
                    }
                    None => stdout.send(page),
                }
            }
            Self::Body { input } => {
                let manager = load_document(config, &input, None).await?.1;
                stdout.send(manager.render_maps()?);
            }
            Self::Runtime => stdout.send(CLIENT_RUNTIME_JS),
            Self::Library { sensor } => {
                let manager = MapsManager::new(config.clone());
                stdout.send(manager.library_tag(sensor)?);
            }
            Self::Types => {
                for (value, label) in get_map_type_choices() {
                    stdout.send(format_sstr!("{value}\t{label}"));
                }
            }
        }
        Ok(())
    }
}

async fn load_document(
    config: &MapsConfig,
    input: &Path,
    key: Option<&str>,
) -> Result<(MapDocument, MapsManager), Error> {
    let contents = tokio::fs::read_to_string(input).await?;
    let doc = MapDocument::parse(input, &contents)?;
    let mut manager = MapsManager::new(config.clone());
    if let Some(key) = key {
        manager.set_key(key);
    }
    let handles = doc.build(&mut manager)?;
    debug!("loaded {} maps from {}", handles.len(), input.display());
    Ok((doc, manager))
}

/// Read a map document and render it as a full html page, `title` overrides
/// the document title and `key` the configured api key.
/// # Errors
/// Return error if the document can't be read or rendered
pub async fn render_document(
    config: &MapsConfig,
    input: &Path,
    title: Option<&str>,
    key: Option<&str>,
) -> Result<StackString, Error> {
    let (doc, manager) = load_document(config, input, key).await?;
    let title = title.unwrap_or(doc.title.as_str());
    manager.render_page(title).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use anyhow::Error;
    use stack_string::StackString;
    use stdout_channel::StdoutChannel;
    use tempfile::TempDir;

    use gmaps_lib::{maps_config::MapsConfig, maps_manager::MapsManager};

    use crate::gmaps_cli_opts::GmapsCliOpts;

    #[tokio::test]
    async fn test_render_to_output() -> Result<(), Error> {
        let tempdir = TempDir::new()?;
        let input = tempdir.path().join("doc.json");
        let output = tempdir.path().join("doc.html");
        tokio::fs::write(
            &input,
            r#"{"title": "T", "maps": [{"id": "m1", "markers": [{"latitude": 1.0, "longitude": 2.0}]}]}"#,
        )
        .await?;

        let config = MapsConfig::new();
        let stdout: StdoutChannel<StackString> = StdoutChannel::new();
        let opts = GmapsCliOpts::Render {
            input,
            output: Some(output.clone()),
            title: None,
            key: None,
        };
        opts.run(&config, &stdout).await?;

        let page = tokio::fs::read_to_string(&output).await?;
        assert!(page.contains("<title>T</title>"));
        assert!(page.contains(r#"gmap.addMarker(1, 2, "");"#));
        Ok(())
    }

    #[tokio::test]
    async fn test_render_rejects_bad_callback() -> Result<(), Error> {
        let tempdir = TempDir::new()?;
        let input = tempdir.path().join("doc.yaml");
        tokio::fs::write(&input, "maps:\n  - id: m1\n    click_callback: \"x();y\"\n").await?;

        let config = MapsConfig::new();
        let stdout: StdoutChannel<StackString> = StdoutChannel::new();
        let opts = GmapsCliOpts::Body { input };
        assert!(opts.run(&config, &stdout).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_library_and_runtime() -> Result<(), Error> {
        let config = MapsConfig::new();
        let stdout: StdoutChannel<StackString> = StdoutChannel::new();
        GmapsCliOpts::Library { sensor: true }
            .run(&config, &stdout)
            .await?;
        GmapsCliOpts::Runtime.run(&config, &stdout).await?;
        GmapsCliOpts::Types.run(&config, &stdout).await?;
        stdout.close().await?;

        let manager = MapsManager::new(config);
        assert!(!manager.has_maps());
        assert!(manager.library_tag(true)?.contains("sensor=true"));
        Ok(())
    }
}
