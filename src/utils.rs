use crate::report::error::ReportError;
use log::info;
use std::io;
use std::path::Path;

pub fn ensure_output_dir_exists(path: &Path) -> Result<(), ReportError> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ReportError::OutputPathNotDir(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            std::fs::create_dir_all(path)
                .map_err(|e| ReportError::OutputDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ReportError::OutputDirCreation(path.to_path_buf(), e)),
    }
}
