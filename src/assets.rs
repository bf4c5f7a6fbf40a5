//! Assets embedded at compile time.
//!
//! The default provisioning script ships inside the binary and is written
//! out to a temp location before execution, so a plain `corral provision`
//! works without any project-local files.

use crate::error::{CorralError, Result};
use include_dir::{include_dir, Dir};
use std::path::PathBuf;

static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

const PROVISION_SCRIPT: &str = "scripts/configure-cluster.sh";

/// Write the embedded provisioning script to disk and return its path.
pub fn materialize_provision_script() -> Result<PathBuf> {
    let file =
        ASSETS_DIR
            .get_file(PROVISION_SCRIPT)
            .ok_or_else(|| CorralError::ConfigNotFound {
                path: PathBuf::from(PROVISION_SCRIPT),
            })?;

    let target = std::env::temp_dir().join("corral-configure-cluster.sh");
    std::fs::write(&target, file.contents())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(target)
}
