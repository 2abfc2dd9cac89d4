//! pib-etl - build `pib_industrias.csv` and `pib_estatal.csv`
//!
//! ```bash
//! pib-etl        # reads ./source_industrias and ./source_estatal
//! ```
//!
//! Directories can be overridden through `PIB_INDUSTRY_DIR`,
//! `PIB_REGIONAL_DIR`, `PIB_OUTPUT_DIR` and `PIB_REGIONAL_VINTAGE`
//! (environment or `.env`).

use pib_etl::{logs, run_all, EtlConfig};
use std::error::Error;

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    logs::init();

    let config = EtlConfig::from_env();

    match run_all(&config) {
        Ok(summary) => {
            logs::log_success(format!(
                "Done: {} industry rows, {} state rows",
                summary.industry_rows, summary.regional_rows
            ));
        }
        Err(e) => {
            logs::log_error(e.to_string());
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
