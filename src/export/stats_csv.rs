//! CSV export of the training statistics series.

use std::path::Path;

use crate::{Result, pipeline::stats::StatsSeries};

/// Writes one row per statistics flush. Counts are per-interval, not
/// cumulative.
pub struct StatsCsvExporter;

impl StatsCsvExporter {
    /// Write the series to `path`, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Csv`] on write or formatting failures.
    pub fn export<P: AsRef<Path>>(series: &StatsSeries, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record([
            "Episode",
            "X Wins",
            "O Wins",
            "Draws",
            "Game Length",
            "X Epsilon",
            "O Epsilon",
        ])?;

        for row in series.rows() {
            writer.write_record(&[
                row.episode.to_string(),
                row.x_wins.to_string(),
                row.o_wins.to_string(),
                row.draws.to_string(),
                row.game_length.to_string(),
                row.x_epsilon.to_string(),
                row.o_epsilon.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
