use crate::domain::model::Resolution;
use crate::utils::error::Result;
use std::path::Path;

/// Write a resolved batch as CSV, one row per input in batch order.
/// Unresolved fields become empty cells.
pub fn write_csv(path: &Path, resolutions: &[Resolution]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["name", "number", "id"])?;

    for resolution in resolutions {
        writer.write_record([
            resolution.name.clone().unwrap_or_default(),
            resolution
                .number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            resolution.id.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
