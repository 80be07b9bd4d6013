use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use sprite_clipper::{ClipPathGroup, DegeneratePolicy, OverlayStyle, Pipeline, PixelSampling, draw_overlay, load_sheet};
use sprite_clipper_cli::{ClipperConfig, OutputFormat, default_destination, overlay_path};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Compute a convex clip path for every sprite in a sprite sheet", long_about = None)]
struct Cli {
    /// Sprite sheet image
    #[arg(required_unless_present_any = ["print_schema", "print_config_schema"])]
    source: Option<PathBuf>,
    /// Output document (defaults to `<source stem>.json`)
    destination: Option<PathBuf>,
    /// TOML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Group name written into the document (defaults to the source file stem)
    #[arg(short, long)]
    group: Option<String>,
    /// Pixels with alpha above this value are opaque
    #[arg(long)]
    alpha_threshold: Option<u8>,
    /// Hull input per pixel: origin, diagonal or corners
    #[arg(long)]
    sampling: Option<PixelSampling>,
    /// What to do with regions too small to form a polygon: abort or skip
    #[arg(long)]
    on_degenerate: Option<DegeneratePolicy>,
    /// Prefix of generated clip path names
    #[arg(long)]
    name_prefix: Option<String>,
    /// Feed every region pixel to the hull builder, not just the boundary
    #[arg(long)]
    all_pixels: bool,
    /// Output encoding: json or geojson
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Do not write the debug overlay image
    #[arg(long)]
    no_overlay: bool,
    /// Print the JSON Schema of the output document and exit
    #[arg(long)]
    print_schema: bool,
    /// Print the JSON Schema of the configuration file and exit
    #[arg(long)]
    print_config_schema: bool,
}

impl Cli {
    /// Config file values, overridden by any flags given on the command line
    fn resolve_config(&self) -> Result<ClipperConfig> {
        let mut config = match &self.config {
            Some(path) => ClipperConfig::from_file(path)
                .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
            None => ClipperConfig::default(),
        };

        if let Some(group) = &self.group {
            config.group = Some(group.clone());
        }
        if let Some(threshold) = self.alpha_threshold {
            config.pipeline.alpha_threshold = threshold;
        }
        if let Some(sampling) = self.sampling {
            config.pipeline.sampling = sampling;
        }
        if let Some(policy) = self.on_degenerate {
            config.pipeline.on_degenerate = policy;
        }
        if let Some(prefix) = &self.name_prefix {
            config.pipeline.name_prefix = prefix.clone();
        }
        if self.all_pixels {
            config.pipeline.boundary_only = false;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_overlay {
            config.overlay = false;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", serde_json::to_string_pretty(&ClipPathGroup::schema())?);
        return Ok(());
    }
    if cli.print_config_schema {
        println!("{}", serde_json::to_string_pretty(&schemars::schema_for!(ClipperConfig))?);
        return Ok(());
    }

    let source = cli.source.clone().ok_or_else(|| eyre!("no source image given"))?;
    let destination = cli.destination.clone().unwrap_or_else(|| default_destination(&source));
    let config = cli.resolve_config()?;

    clip_sheet(&source, &destination, &config)
}

fn clip_sheet(source: &Path, destination: &Path, config: &ClipperConfig) -> Result<()> {
    let sheet = load_sheet(source)
        .wrap_err_with(|| format!("failed to open {}", source.display()))?;

    let pipeline = Pipeline::builder()
        .with_options(config.pipeline.clone())
        .build();
    info!("{}", pipeline.info());

    let result = pipeline
        .process_image(&sheet)
        .wrap_err_with(|| format!("failed to clip {}", source.display()))?;
    info!(
        "Found {} sprites in {}x{} image",
        result.len(),
        result.image_width,
        result.image_height
    );

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match config.format {
        OutputFormat::Json => {
            let group = result.to_group(config.group_for(source), source.to_string_lossy());
            group.save_json(destination)?;
        }
        OutputFormat::Geojson => result.save_geojson(destination)?,
    }
    info!("Output written to: {}", destination.display());

    if config.overlay {
        let image_path = overlay_path(source, destination);
        if image_path != destination.with_extension("png") {
            warn!("Overlay would overwrite the source image, using {}", image_path.display());
        }
        draw_overlay(&sheet, &result.clip_paths, &OverlayStyle::default())
            .save(&image_path)
            .wrap_err_with(|| format!("failed to write {}", image_path.display()))?;
        info!("Image written to: {}", image_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sprite_clipper").chain(args.iter().copied())).unwrap()
    }

    fn write_sheet(path: &Path) {
        let mut sheet = RgbaImage::new(12, 8);
        for y in 1..5 {
            for x in 1..4 {
                sheet.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        sheet.save(path).unwrap();
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("clip.toml");
        fs::write(
            &config_path,
            r#"
            group = "from-config"
            alpha_threshold = 40
            sampling = "diagonal"
            name_prefix = "cfg-"
            format = "geojson"
            "#,
        )
        .unwrap();
        let config_arg = config_path.to_string_lossy().into_owned();

        let config = parse(&["sheet.png", "--config", &config_arg]).resolve_config().unwrap();
        assert_eq!(config.group.as_deref(), Some("from-config"));
        assert_eq!(config.pipeline.alpha_threshold, 40);
        assert_eq!(config.pipeline.sampling, PixelSampling::Diagonal);
        assert_eq!(config.format, OutputFormat::Geojson);
        assert!(config.overlay);

        let config = parse(&[
            "sheet.png",
            "--config", &config_arg,
            "--group", "hud",
            "--alpha-threshold", "3",
            "--sampling", "corners",
            "--on-degenerate", "skip",
            "--name-prefix", "icon-",
            "--all-pixels",
            "--format", "json",
            "--no-overlay",
        ])
        .resolve_config()
        .unwrap();
        assert_eq!(config.group.as_deref(), Some("hud"));
        assert_eq!(config.pipeline.alpha_threshold, 3);
        assert_eq!(config.pipeline.sampling, PixelSampling::Corners);
        assert_eq!(config.pipeline.on_degenerate, DegeneratePolicy::Skip);
        assert_eq!(config.pipeline.name_prefix, "icon-");
        assert!(!config.pipeline.boundary_only);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.overlay);
    }

    #[test]
    fn test_source_required_unless_printing_schema() {
        assert!(Cli::try_parse_from(["sprite_clipper"]).is_err());
        assert!(parse(&["--print-schema"]).source.is_none());
        assert_eq!(parse(&["sheet.png"]).resolve_config().unwrap(), ClipperConfig::default());
    }

    #[test]
    fn test_clip_sheet_writes_document_and_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("icons.png");
        write_sheet(&source);
        let destination = dir.path().join("out").join("icons.json");

        clip_sheet(&source, &destination, &ClipperConfig::default()).unwrap();

        let group = ClipPathGroup::from_json_file(&destination).unwrap();
        assert_eq!(group.group, "icons");
        assert_eq!(group.clip_paths.len(), 1);
        assert_eq!(group.clip_paths[0].name, "sprite-1");
        assert!(dir.path().join("out").join("icons.png").exists());
    }

    #[test]
    fn test_clip_sheet_geojson_without_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("icons.png");
        write_sheet(&source);
        let destination = dir.path().join("icons.geojson");

        let config = parse(&["icons.png", "--format", "geojson", "--no-overlay"])
            .resolve_config()
            .unwrap();
        clip_sheet(&source, &destination, &config).unwrap();

        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
        assert_eq!(document["type"], "FeatureCollection");
        assert_eq!(document["clip_path_count"], 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_clip_sheet_keeps_source_next_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("icons.png");
        write_sheet(&source);
        let before = fs::read(&source).unwrap();

        clip_sheet(&source, &dir.path().join("icons.json"), &ClipperConfig::default()).unwrap();

        assert_eq!(fs::read(&source).unwrap(), before);
        assert!(dir.path().join("icons.overlay.png").exists());
    }
}
