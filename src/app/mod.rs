use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::config::{Catalog, FilterRequest};
use crate::filters::{LAYER_IDS, build_layer_filter};
use crate::map::{FeatureMap, apply_filters_to_map, clear_filters};
use crate::sinks::{DataSink, GeoJsonSink, GeoJsonlSink};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Reference catalog file (YAML or JSON); built-in Seoul tables if omitted
    #[arg(short, long, global = true, env = "TREEMAP_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Number of threads (default: all cores)
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the filter expression for one layer, or for every tree layer
    Filter {
        /// Layer id (protected-trees, roadside-trees, park-trees)
        #[arg(short, long)]
        layer: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Apply filters to tree features and write what each layer shows
    Render {
        /// Input features (.geojson or .geojsonl)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (.geojson, .geojsonl), or - for stdout
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (auto-detected if omitted)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Reset layers to their tree-type filter instead of applying facets
        #[arg(long)]
        clear: bool,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Print the active reference catalog as YAML
    Catalog,
}

#[derive(Args, Debug, Default)]
pub struct RequestArgs {
    /// Species names to show (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub species: Vec<String>,

    /// Size bucket ids to show (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub sizes: Vec<String>,

    /// Favorite tree ids to restrict to (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub favorites: Vec<String>,

    /// Filter request file (YAML or JSON); flags override its lists
    #[arg(long)]
    pub request: Option<PathBuf>,
}

impl RequestArgs {
    pub fn resolve(&self) -> Result<FilterRequest> {
        let mut request = match &self.request {
            Some(path) => FilterRequest::load(path)?,
            None => FilterRequest::default(),
        };

        if !self.species.is_empty() {
            request.species = self.species.clone();
        }
        if !self.sizes.is_empty() {
            request.sizes = self.sizes.clone();
        }
        if !self.favorites.is_empty() {
            request.favorite_ids = self.favorites.clone();
        }

        Ok(request)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum OutputFormat {
    #[value(name = "geojson")]
    GeoJson,
    #[value(name = "geojsonl", alias = "jsonl")]
    GeoJsonl,
}

pub fn output_format_label(format: &OutputFormat) -> &'static str {
    match format {
        OutputFormat::GeoJson => "geojson",
        OutputFormat::GeoJsonl => "geojsonl",
    }
}

pub fn detect_format(output: &Path) -> Option<OutputFormat> {
    if output == Path::new("-") {
        return Some(OutputFormat::GeoJsonl);
    }
    let ext = output.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "geojson" => Some(OutputFormat::GeoJson),
        "geojsonl" | "jsonl" | "json" => Some(OutputFormat::GeoJsonl),
        _ => None,
    }
}

pub fn init_sink(format: &OutputFormat, output: &Path) -> Result<Box<dyn DataSink + Send>> {
    match format {
        OutputFormat::GeoJson => {
            if output == Path::new("-") {
                anyhow::bail!(
                    "CLI: GeoJSON output to stdout is not supported; use geojsonl instead"
                );
            }
            tracing::info!("Sink: {} -> {:?}", output_format_label(format), output);
            Ok(Box::new(GeoJsonSink::new(output)?))
        }
        OutputFormat::GeoJsonl => {
            if output == Path::new("-") {
                tracing::info!("Sink: {} -> stdout", output_format_label(format));
                Ok(Box::new(GeoJsonlSink::stdout()?))
            } else {
                tracing::info!("Sink: {} -> {:?}", output_format_label(format), output);
                Ok(Box::new(GeoJsonlSink::new(output)?))
            }
        }
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::seoul()),
    }
}

/// Filter expressions as JSON: a bare expression for one layer, otherwise an
/// object keyed by layer id.
pub fn filter_json(layer: Option<&str>, request: &FilterRequest, catalog: &Catalog) -> Value {
    match layer {
        Some(layer_id) => build_layer_filter(layer_id, request, catalog).to_json(),
        None => {
            let filters: Map<String, Value> = LAYER_IDS
                .iter()
                .map(|id| {
                    (
                        id.to_string(),
                        build_layer_filter(id, request, catalog).to_json(),
                    )
                })
                .collect();
            Value::Object(filters)
        }
    }
}

/// Run a render pass and return the number of features written.
pub fn render(
    input: &Path,
    sink: &mut dyn DataSink,
    request: &FilterRequest,
    catalog: &Catalog,
    clear: bool,
) -> Result<u64> {
    let mut map = FeatureMap::load(input)?;
    for layer_id in LAYER_IDS {
        map.add_layer(layer_id);
    }

    if clear {
        clear_filters(Some(&mut map));
    } else {
        apply_filters_to_map(Some(&mut map), request, catalog);
    }

    let mut written = 0u64;
    for layer_id in LAYER_IDS {
        let visible = map.visible_features(layer_id);
        tracing::info!(
            "Render: {} shows {} of {} features",
            layer_id,
            visible.len(),
            map.feature_count()
        );
        for feature in visible {
            sink.add_feature(layer_id, feature)
                .with_context(|| format!("Render: Failed writing feature on {}", layer_id))?;
            written += 1;
        }
    }

    sink.finish().context("Render: Failed to finalize sink")?;
    Ok(written)
}

pub fn run(cli: &Cli) -> Result<()> {
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match &cli.command {
        Command::Filter {
            layer,
            pretty,
            request,
        } => {
            let request = request.resolve()?;
            let json = filter_json(layer.as_deref(), &request, &catalog);
            let text = if *pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            };
            println!("{}", text);
        }
        Command::Render {
            input,
            output,
            format,
            clear,
            request,
        } => {
            let request = request.resolve()?;
            let format = format
                .or_else(|| detect_format(output))
                .context("CLI: Could not detect output format from extension; use --format")?;

            let mut sink = init_sink(&format, output)?;
            let start = std::time::Instant::now();
            let written = render(input, sink.as_mut(), &request, &catalog, *clear)?;
            tracing::info!(
                "Done! Written {} features in {:.2}s",
                written,
                start.elapsed().as_secs_f64()
            );
        }
        Command::Catalog => {
            print!("{}", serde_yaml::to_string(&catalog)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("out.geojson")), Some(OutputFormat::GeoJson));
        assert_eq!(detect_format(Path::new("out.JSONL")), Some(OutputFormat::GeoJsonl));
        assert_eq!(detect_format(Path::new("-")), Some(OutputFormat::GeoJsonl));
        assert_eq!(detect_format(Path::new("out.parquet")), None);
    }

    #[test]
    fn test_flags_override_request_lists() {
        let args = RequestArgs {
            species: vec!["벚나무".into()],
            favorites: vec!["T-1".into()],
            ..Default::default()
        };
        let request = args.resolve().unwrap();
        assert_eq!(request.species, vec!["벚나무".to_string()]);
        assert!(request.sizes.is_empty());
        assert_eq!(request.favorite_ids, vec!["T-1".to_string()]);
    }

    #[test]
    fn test_filter_json_all_layers() {
        let json = filter_json(None, &FilterRequest::default(), &Catalog::seoul());
        assert_eq!(
            json,
            json!({
                "protected-trees": ["==", ["get", "tree_type"], "protected"],
                "roadside-trees": ["==", ["get", "tree_type"], "roadside"],
                "park-trees": ["==", ["get", "tree_type"], "park"]
            })
        );
    }

    #[test]
    fn test_cli_parses_comma_lists() {
        let cli = Cli::try_parse_from([
            "treemap",
            "filter",
            "--layer",
            "park-trees",
            "--species",
            "은행나무,벚나무",
            "--sizes",
            "small",
        ])
        .unwrap();
        let Command::Filter { layer, request, .. } = cli.command else {
            panic!("expected filter command");
        };
        assert_eq!(layer.as_deref(), Some("park-trees"));
        assert_eq!(request.species, ["은행나무", "벚나무"]);
        assert_eq!(request.sizes, ["small"]);
    }
}
