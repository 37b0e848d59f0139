use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

/// Directories created on first start.
const REQUIRED_DIRS: &[&str] = &[
    "website",
    "website/db",
    "website/static/css",
    "website/templates",
];

/// The page shell. Without it every request would 500.
const PAGE_TEMPLATE: &str = "website/templates/index.html.tera";

const STYLESHEET: &str = "website/static/css/board.css";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Check (and prepare) the website tree under `root`.
pub fn check(root: &Path) -> BootReport {
    let mut report = BootReport::default();

    for dir in REQUIRED_DIRS {
        let path = root.join(dir);
        if path.exists() {
            continue;
        }
        match fs::create_dir_all(&path) {
            Ok(_) => info!("  Created directory: {}", dir),
            Err(e) => {
                error!("  FAILED to create directory {}: {}", dir, e);
                report.errors += 1;
            }
        }
    }

    if !root.join(PAGE_TEMPLATE).exists() {
        error!("  MISSING page template: {}", PAGE_TEMPLATE);
        report.errors += 1;
    }

    if !root.join(STYLESHEET).exists() {
        warn!("  Missing stylesheet: {} (board will be unstyled)", STYLESHEET);
        report.warnings += 1;
    }

    // The slot table lives in website/db; a read-only dir means every save fails.
    let probe = root.join("website/db/.write_test");
    match fs::write(&probe, "test") {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
        }
        Err(e) => {
            error!("  Database directory not writable: {}", e);
            report.errors += 1;
        }
    }

    report
}

/// Run the boot check against the working directory. Aborts on errors.
pub fn run() {
    info!("Postboard boot check starting...");

    let report = check(Path::new("."));

    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found, using default config");
    }

    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!("Boot check passed with {} warning(s).", report.warnings);
    } else {
        info!("Boot check passed.");
    }
}
