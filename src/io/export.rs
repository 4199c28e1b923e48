//! Export observations with fitted values to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Fitted;
use crate::error::{AppError, EXIT_USAGE};

/// Write `label,x,y,y_fit,residual` rows to `out`.
pub fn write_fitted_csv<W: Write>(mut out: W, fitted: &[Fitted]) -> Result<(), AppError> {
    writeln!(out, "label,x,y,y_fit,residual")
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV header: {e}")))?;

    for f in fitted {
        let o = &f.observation;
        writeln!(
            out,
            "{},{},{},{:.6},{:.6}",
            o.label,
            o.x,
            o.y,
            f.y_fit,
            f.residual,
        )
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the CSV export to `path`.
pub fn write_fitted_csv_file(path: &Path, fitted: &[Fitted]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_fitted_csv(file, fitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    #[test]
    fn csv_rows_follow_input_order() {
        let fitted = vec![
            Fitted {
                observation: Observation::new("Jan", 1000.0, 25000.0),
                y_fit: 24714.285714,
                residual: 285.714286,
            },
            Fitted {
                observation: Observation::new("Feb", 2.5, 3.0),
                y_fit: 3.0,
                residual: 0.0,
            },
        ];
        let mut buf = Vec::new();
        write_fitted_csv(&mut buf, &fitted).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert_eq!(
            csv,
            concat!(
                "label,x,y,y_fit,residual\n",
                "Jan,1000,25000,24714.285714,285.714286\n",
                "Feb,2.5,3,3.000000,0.000000\n",
            )
        );
    }
}
