use std::fs;
use std::process;

use log::{error, info, warn};

use crate::config::SiteConfig;

/// Data files each region is fed from. A missing one only degrades that
/// region, so boot just warns.
const DATA_FILES: &[&str] = &[
    "posts.json",
    "affiliates-shop.json",
    "affiliates-services.json",
    "komuniti.json",
    "about.md",
];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing data files, and aborts
/// only when the filesystem itself is unusable.
pub fn run(config: &SiteConfig) {
    info!("tapak boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in [&config.data_dir, &config.static_dir] {
        if !dir.exists() {
            match fs::create_dir_all(dir) {
                Ok(_) => info!("  Created directory: {}", dir.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir.display(), e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Data files ──────────────────────────────────
    for file in DATA_FILES {
        let path = config.data_dir.join(file);
        if !path.exists() {
            warn!(
                "  Missing data file: {} (that section will be empty)",
                path.display()
            );
            warnings += 1;
        }
    }

    // ── 3. Data directory readable ─────────────────────
    if let Err(e) = fs::read_dir(&config.data_dir) {
        error!("  Data directory not readable: {}", e);
        errors += 1;
    }

    if errors > 0 {
        error!(
            "Boot check failed with {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!("Boot check passed with {} warning(s)", warnings);
    } else {
        info!("Boot check passed");
    }
}
