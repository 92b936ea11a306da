/// FRA Atlas command-line renderer for native builds.
///
/// Loads a feature snapshot, applies layer visibility and selection from the
/// command line, prints the panel, badges and legend, and writes the map as
/// SVG.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    if let Err(e) = cli::run(cli::Args::parse()) {
        eprintln!("fra-atlas: {}", e);
        std::process::exit(1);
    }
}

// WASM builds embed the library directly.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use fra_atlas::canvas::SvgSurface;
    use fra_atlas::constants::{DEFAULT_SVG_HEIGHT, DEFAULT_SVG_WIDTH};
    use fra_atlas::message::Message;
    use fra_atlas::model::{FeatureId, LayerId};
    use fra_atlas::snapshot::load_snapshot;
    use fra_atlas::{AtlasConfig, AtlasSession, MetricKind, RegionFilter};

    /// Render an FRA atlas snapshot to SVG
    #[derive(Parser, Debug)]
    #[command(name = "fra-atlas", version, about)]
    pub struct Args {
        /// Configuration file; defaults to the per-user config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Hide a layer by id (repeatable)
        #[arg(long, value_name = "ID")]
        hide: Vec<String>,

        /// Show a layer by id (repeatable)
        #[arg(long, value_name = "ID")]
        show: Vec<String>,

        /// Only draw features in this state
        #[arg(long, value_name = "NAME")]
        state: Option<String>,

        /// Only draw features in this district
        #[arg(long, value_name = "NAME")]
        district: Option<String>,

        /// Select a feature and print its detail
        #[arg(long, value_name = "ID")]
        select: Option<String>,

        /// Print the summary without writing the SVG
        #[arg(long)]
        dry_run: bool,

        /// Feature snapshot (JSON)
        snapshot: PathBuf,

        /// Output SVG; defaults to the snapshot path with an .svg extension
        output: Option<PathBuf>,
    }

    impl Args {
        fn region_filter(&self) -> RegionFilter {
            RegionFilter {
                state: self.state.clone(),
                district: self.district.clone(),
            }
        }
    }

    fn load_config(path: Option<&PathBuf>) -> Result<AtlasConfig, String> {
        match path {
            Some(path) => AtlasConfig::load_from_path(path).map_err(|e| e.to_string()),
            None => Ok(AtlasConfig::load_from_default_path().unwrap_or_default()),
        }
    }

    pub fn run(args: Args) -> Result<(), String> {
        let config = load_config(args.config.as_ref())?;

        env_logger::Builder::new()
            .filter_level(config.preferences.log_level.to_level_filter())
            .parse_default_env()
            .init();
        log::info!("🗺️  FRA Atlas starting ({} layers)", config.layers.len());

        let surface = SvgSurface::new(DEFAULT_SVG_WIDTH, DEFAULT_SVG_HEIGHT);
        let mut session = AtlasSession::from_config(&config, surface).map_err(|e| e.to_string())?;
        session.mount().map_err(|e| e.to_string())?;

        let default_layer = config
            .layers
            .iter()
            .find(|l| l.enabled)
            .or_else(|| config.layers.first())
            .map(|l| LayerId::new(l.id.as_str()))
            .ok_or("configuration has no layers")?;
        let features = load_snapshot(&args.snapshot, &default_layer).map_err(|e| e.to_string())?;
        session
            .update(Message::SnapshotLoaded(features))
            .map_err(|e| e.to_string())?;

        let wanted = args
            .hide
            .iter()
            .map(|id| (id, false))
            .chain(args.show.iter().map(|id| (id, true)));
        for (id, enabled) in wanted {
            let id = LayerId::new(id.as_str());
            match session.registry().get(&id).map(|l| l.enabled) {
                None => return Err(format!("unknown layer '{}'", id)),
                Some(current) if current != enabled => {
                    session.toggle(&id).map_err(|e| e.to_string())?;
                }
                Some(_) => {}
            }
        }
        let filter = args.region_filter();
        if !filter.is_empty() {
            session
                .set_region_filter(filter)
                .map_err(|e| e.to_string())?;
        }
        if let Some(id) = &args.select {
            session
                .select(&FeatureId::new(id.as_str()))
                .map_err(|e| e.to_string())?;
        }

        if let Some(view) = session.panel_view() {
            print!("{}", view);
        }
        println!();
        println!("{} | {}", session.zoom_badge(), session.layers_badge());
        let report = session.last_report();
        println!(
            "{} markers drawn, {} hidden, {} filtered, {} without position",
            report.drawn,
            report.hidden,
            report.filtered,
            report.dropped.len()
        );
        for kind in [MetricKind::Saturation, MetricKind::Ndvi] {
            println!("{} legend:", kind.name());
            for entry in session.legend(kind) {
                println!("  {} {}", entry.color, entry.label);
            }
        }
        if let Some(selection) = session.selected() {
            println!();
            print!("{}", selection.detail);
        }

        if args.dry_run {
            log::info!("Dry run, no SVG written");
            return Ok(());
        }
        let output = args
            .output
            .unwrap_or_else(|| args.snapshot.with_extension("svg"));
        session
            .canvas()
            .surface()
            .write_to(&output)
            .map_err(|e| e.to_string())?;
        println!("Wrote {}", output.display());
        Ok(())
    }

}
