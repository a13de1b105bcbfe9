//! One generation run: load, populate, render and write every output.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use hexgrid::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::args::Args;

const OUTPUT_DIR: &str = "generated-grids";

/// Files written by [`generate`].
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub svg: PathBuf,
    pub html: PathBuf,
    pub pdf: Option<PathBuf>,
    pub plan: AllocationPlan,
}

/// `generated-grids/<config-stem>-<unix-seconds>`.
pub fn default_output_stem(config: &Path, now: SystemTime) -> PathBuf {
    let name = config
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_owned());
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    Path::new(OUTPUT_DIR).join(format!("{name}-{secs}"))
}

/// Run the whole pipeline for `args`.
///
/// The configuration is validated before anything is written. Outputs are written in
/// the order SVG, HTML, PDF; a failure stops the run and leaves earlier files in place.
pub fn generate(args: &Args) -> Result<Artifacts> {
    let config = GridConfig::load(&args.config)
        .with_context(|| format!("failed to load configuration '{}'", args.config.display()))?;

    let mut grid = Grid::try_new(args.rows, args.cols, &config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let plan = populate(&mut grid, &mut rng);

    let stem = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_stem(&args.config, SystemTime::now()));
    if let Some(dir) = stem.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    }

    let svg = SvgDocument::new(&grid).to_string();
    let svg_path = with_extension(&stem, "svg");
    write(&svg_path, svg.as_bytes())?;

    let legend = Legend::from_items(grid.item_types());
    let html_path = with_extension(&stem, "html");
    write(&html_path, HtmlPage::new(&svg, &legend).to_string().as_bytes())?;

    let pdf_path = if args.pdf {
        let title = args
            .config
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Hex Grid".to_owned());
        let bytes = PdfDocument::new(&grid)
            .with_options(PdfOptions::default().with_title(title))
            .to_bytes();
        let path = with_extension(&stem, "pdf");
        write(&path, &bytes)?;
        Some(path)
    } else {
        None
    };

    info!(
        "Generated {}x{} grid from '{}' into '{}'.",
        args.rows,
        args.cols,
        args.config.display(),
        stem.display()
    );

    Ok(Artifacts {
        svg: svg_path,
        html: html_path,
        pdf: pdf_path,
        plan,
    })
}

/// Append `.ext` without replacing anything that looks like an extension in the stem.
fn with_extension(stem: &Path, ext: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const CONFIG: &str = r##"(
        default: "#F5F0E1",
        items: [
            (name: "Forest", percentage: 50.0, style: "fill", color: "#2E7D32"),
            (name: "Village", percentage: 50.0, style: "dot", color: "#C62828", dice: Some("2d6")),
        ],
    )"##;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hexgrid-cli-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn default_stem_uses_config_name_and_time() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let stem = default_output_stem(Path::new("specs/desert-world.ron"), now);
        assert_eq!(
            stem,
            Path::new("generated-grids").join("desert-world-1700000000")
        );
    }

    #[test]
    fn extensions_are_appended() {
        assert_eq!(
            with_extension(Path::new("out/map.v2"), "svg"),
            PathBuf::from("out/map.v2.svg")
        );
    }

    #[test]
    fn writes_all_outputs() {
        let dir = scratch_dir("all");
        let config = dir.join("world.ron");
        fs::write(&config, CONFIG).unwrap();

        let mut args = Args::new(&config);
        args.out = Some(dir.join("nested").join("world"));
        args.seed = Some(3);

        let artifacts = generate(&args).unwrap();
        assert_eq!(artifacts.plan.assigned(), 100);

        let svg = fs::read_to_string(&artifacts.svg).unwrap();
        let html = fs::read_to_string(&artifacts.html).unwrap();
        let pdf = fs::read(artifacts.pdf.as_ref().unwrap()).unwrap();
        assert!(html.contains(&svg));
        assert!(pdf.starts_with(b"%PDF-"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn same_seed_writes_the_same_svg() {
        let dir = scratch_dir("seed");
        let config = dir.join("world.ron");
        fs::write(&config, CONFIG).unwrap();

        let mut args = Args::new(&config);
        args.seed = Some(11);
        args.pdf = false;

        args.out = Some(dir.join("a"));
        let a = generate(&args).unwrap();
        args.out = Some(dir.join("b"));
        let b = generate(&args).unwrap();

        assert!(a.pdf.is_none());
        assert_eq!(
            fs::read_to_string(a.svg).unwrap(),
            fs::read_to_string(b.svg).unwrap()
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_configuration_writes_nothing() {
        let dir = scratch_dir("invalid");
        let config = dir.join("bad.ron");
        fs::write(
            &config,
            r##"(default: "#FFFFFF", items: [(name: "a", percentage: 80.0, style: "fill", color: "#000000"), (name: "b", percentage: 30.0, style: "dot", color: "#000000")])"##,
        )
        .unwrap();

        let mut args = Args::new(&config);
        args.out = Some(dir.join("out").join("bad"));
        let err = generate(&args).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds 100%"));
        assert!(!dir.join("out").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn shipped_grid_specs_are_valid() {
        let specs = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../grid-specs");
        let mut found = 0;
        for entry in fs::read_dir(&specs).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|e| e == "ron") {
                GridConfig::load(&path)
                    .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
                found += 1;
            }
        }
        assert!(found >= 3, "expected at least 3 sample configurations");
    }
}
