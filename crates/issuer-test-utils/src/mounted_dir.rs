//! Temporary certificate mount for loader, cache and server tests.

use crate::fixtures::{self, CertFixture};
use issuer_service::config::JwksFileConfig;
use issuer_service::models::RotationSlot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary directory laid out like the mounted certificate volume,
/// using the default file names.
///
/// Files are replaced through a rename so a concurrent refresh never reads
/// a half-written file.
pub struct MountedKeyDir {
    dir: TempDir,
}

impl MountedKeyDir {
    /// Create an empty mount.
    pub fn new() -> Result<Self, anyhow::Error> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Create a mount with the three RSA fixtures in their natural slots,
    /// each with its fixture kid.
    pub fn with_default_keys() -> Result<Self, anyhow::Error> {
        let mount = Self::new()?;
        mount.write_slot(RotationSlot::Next, &fixtures::NEXT, fixtures::NEXT.kid)?;
        mount.write_slot(RotationSlot::Active, &fixtures::ACTIVE, fixtures::ACTIVE.kid)?;
        mount.write_slot(
            RotationSlot::Previous,
            &fixtures::PREVIOUS,
            fixtures::PREVIOUS.kid,
        )?;
        Ok(mount)
    }

    /// Write `fixture` and `kid` into the files backing `slot`.
    pub fn write_slot(
        &self,
        slot: RotationSlot,
        fixture: &CertFixture,
        kid: &str,
    ) -> Result<(), anyhow::Error> {
        self.write_cert(slot, fixture.pem)?;
        self.write_kid(slot, kid)
    }

    /// Replace only the certificate file of `slot`.
    pub fn write_cert(&self, slot: RotationSlot, contents: &str) -> Result<(), anyhow::Error> {
        self.replace_file(&self.config().cert_file(slot), contents)
    }

    /// Replace only the kid file of `slot`.
    pub fn write_kid(&self, slot: RotationSlot, kid: &str) -> Result<(), anyhow::Error> {
        self.replace_file(&self.config().kid_file(slot), kid)
    }

    /// Delete both files of `slot`.
    pub fn remove_slot(&self, slot: RotationSlot) -> Result<(), anyhow::Error> {
        let config = self.config();
        fs::remove_file(config.cert_file(slot))?;
        fs::remove_file(config.kid_file(slot))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// File configuration for this mount with refresh disabled.
    pub fn config(&self) -> JwksFileConfig {
        let mut config = JwksFileConfig::with_mount_path(self.dir.path());
        config.update_interval_seconds = 0;
        config
    }

    fn replace_file(&self, target: &Path, contents: &str) -> Result<(), anyhow::Error> {
        let file_name = target
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("no file name in {}", target.display()))?;
        let staging = self
            .dir
            .path()
            .join(format!(".{}.tmp", file_name.to_string_lossy()));

        fs::write(&staging, contents)?;
        fs::rename(&staging, target)?;
        Ok(())
    }
}
