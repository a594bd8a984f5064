use crate::error::Error;
use std::fs;
use std::path::Path;

mod serializing;

pub(crate) use serializing::serialize;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "/etc/X11/xorg.conf.d/10-monitor.conf";

/// Replaces the config file with `config`, creating missing directories.
///
/// Returns `false` without touching the file when `config` is empty.
pub(crate) fn persist(path: &Path, config: &str) -> Result<bool, Error> {
    if config.is_empty() {
        log::info!("no connected output has a current mode, nothing to persist");
        return Ok(false);
    }

    let persist_error = |source| Error::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(persist_error)?;
    }
    fs::write(path, config).map_err(persist_error)?;

    log::debug!("wrote {} bytes to {path:?}", config.len());
    Ok(true)
}
