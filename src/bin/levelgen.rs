use std::path::PathBuf;
use std::str::FromStr;

use gate_course::level::{LevelConfig, generate_level};
use gate_course::parse::gate_file;
use log::LevelFilter;

const DEFAULT_OUTFILE: &str = "level.txt";

const USAGE: &str = r"levelgen (gate-course)

USAGE:
  levelgen [options]

OPTIONS:
  -o, --outfile <path>   Output gate file (default: level.txt)
      --config <file>    Read parameters from a RON file; flags below override it
      --debug            Echo every gate line to stdout and log debug output
      --quiet            Only log warnings and errors
      --wsize <int>      World half-extent
      --wmargin <int>    Margin kept free inside the world
      --gcount <int>     Number of gates
      --gwidth <float>   Gate width
      --gheight <float>  Gate height
      --pcount <int>     Number of chained paths
      --pcpmin <int>     Minimum control points per path
      --pcpmax <int>     Maximum control points per path
      --pcpspread <f>    Control point spread in [0, 1]
  -h, --help             Show this help
";

fn main() {
    if let Err(err) = run() {
        eprintln!("levelgen error: {err}");
        std::process::exit(1);
    }
}

/// Command-line values that override the loaded configuration.
#[derive(Debug, Default)]
struct Overrides {
    world_size: Option<u32>,
    world_margin: Option<u32>,
    gate_count: Option<usize>,
    gate_width: Option<f64>,
    gate_height: Option<f64>,
    path_count: Option<usize>,
    path_control_point_min: Option<usize>,
    path_control_point_max: Option<usize>,
    path_control_point_spread: Option<f64>,
}

impl Overrides {
    fn apply(&self, config: &mut LevelConfig) {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        set(&mut config.world_size, self.world_size);
        set(&mut config.world_margin, self.world_margin);
        set(&mut config.gate_count, self.gate_count);
        set(&mut config.gate_width, self.gate_width);
        set(&mut config.gate_height, self.gate_height);
        set(&mut config.path_count, self.path_count);
        set(&mut config.path_control_point_min, self.path_control_point_min);
        set(&mut config.path_control_point_max, self.path_control_point_max);
        set(
            &mut config.path_control_point_spread,
            self.path_control_point_spread,
        );
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut args = Args::new(args);

    let mut outfile = PathBuf::from(DEFAULT_OUTFILE);
    let mut config_path: Option<PathBuf> = None;
    let mut debug = false;
    let mut quiet = false;
    let mut overrides = Overrides::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--outfile" => outfile = PathBuf::from(args.value(&arg)?),
            "--config" => config_path = Some(PathBuf::from(args.value("--config")?)),
            "--debug" => debug = true,
            "--quiet" => quiet = true,
            "--wsize" => overrides.world_size = Some(args.parsed("--wsize")?),
            "--wmargin" => overrides.world_margin = Some(args.parsed("--wmargin")?),
            "--gcount" => overrides.gate_count = Some(args.parsed("--gcount")?),
            "--gwidth" => overrides.gate_width = Some(args.parsed("--gwidth")?),
            "--gheight" => overrides.gate_height = Some(args.parsed("--gheight")?),
            "--pcount" => overrides.path_count = Some(args.parsed("--pcount")?),
            "--pcpmin" => overrides.path_control_point_min = Some(args.parsed("--pcpmin")?),
            "--pcpmax" => overrides.path_control_point_max = Some(args.parsed("--pcpmax")?),
            "--pcpspread" => {
                overrides.path_control_point_spread = Some(args.parsed("--pcpspread")?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
        }
    }

    let level_filter = log_level(debug, quiet)?;
    env_logger::Builder::new()
        .filter_level(level_filter)
        .try_init()
        .map_err(|e| format!("install logger: {e}"))?;

    let mut config = match config_path.as_deref() {
        Some(path) => LevelConfig::load(path).map_err(|e| e.to_string())?,
        None => LevelConfig::default(),
    };
    overrides.apply(&mut config);

    let level = generate_level(&config, &mut rand::rng()).map_err(|e| e.to_string())?;

    if debug {
        print!("{}", gate_file::gates_to_string(&level.gates));
    }

    gate_file::write_file(&outfile, &level.gates)
        .map_err(|e| format!("write {}: {e}", outfile.display()))?;
    log::info!("wrote {} gates to {}", level.gate_count(), outfile.display());

    Ok(())
}

fn log_level(debug: bool, quiet: bool) -> Result<LevelFilter, String> {
    match (debug, quiet) {
        (true, true) => Err("use either --debug or --quiet (not both)".to_string()),
        (true, false) => Ok(LevelFilter::Debug),
        (false, true) => Ok(LevelFilter::Warn),
        (false, false) => Ok(LevelFilter::Info),
    }
}

struct Args {
    args: Vec<String>,
    pos: usize,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self { args, pos: 0 }
    }

    fn next(&mut self) -> Option<String> {
        let arg = self.args.get(self.pos)?.clone();
        self.pos += 1;
        Some(arg)
    }

    fn value(&mut self, flag: &str) -> Result<String, String> {
        self.next()
            .ok_or_else(|| format!("missing value for {flag}\n\n{USAGE}"))
    }

    fn parsed<T>(&mut self, flag: &str) -> Result<T, String>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.value(flag)?;
        raw.parse()
            .map_err(|e| format!("invalid value `{raw}` for {flag}: {e}\n\n{USAGE}"))
    }
}
