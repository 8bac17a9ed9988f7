use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const QUALIFIER: &str = ""; // Typically empty on macOS and Linux
const ORGANIZATION: &str = "Crowntium";
const APPLICATION: &str = "Crowntium-Token-Panel";

pub fn app_user_data_dir_path() -> Result<PathBuf, std::io::Error> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to determine project directories",
        )
    })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn create_app_user_data_directory_if_not_exists() -> Result<PathBuf, std::io::Error> {
    let app_data_dir = app_user_data_dir_path()?;
    fs::create_dir_all(&app_data_dir)?;

    let metadata = fs::metadata(&app_data_dir)?;
    if !metadata.is_dir() {
        return Err(std::io::Error::other("Created path is not a directory"));
    }
    Ok(app_data_dir)
}

pub fn app_user_data_file_path(filename: &str) -> Result<PathBuf, std::io::Error> {
    if filename.is_empty() || filename.contains(std::path::is_separator) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Invalid filename",
        ));
    }
    let app_data_dir = app_user_data_dir_path()?;
    Ok(app_data_dir.join(filename))
}
