//! Secrets-file gate.
//!
//! The launcher only cares whether the secrets file exists. If it does not,
//! the template is copied into place byte for byte and the operator is asked
//! to fill it in. An existing secrets file is never opened for writing.

use crate::domain::error::LauncherError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsStatus {
    /// Already there; left untouched.
    Present,
    /// Freshly copied from the template; needs operator edits.
    Created,
}

/// Read-only view of what [`ensure_secrets_file`] would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsCheck {
    Present,
    WouldCreate,
    TemplateMissing,
}

pub fn inspect_secrets(secrets: &Path, template: &Path) -> SecretsCheck {
    if secrets.exists() {
        SecretsCheck::Present
    } else if template.is_file() {
        SecretsCheck::WouldCreate
    } else {
        SecretsCheck::TemplateMissing
    }
}

pub fn ensure_secrets_file(secrets: &Path, template: &Path) -> Result<SecretsStatus, LauncherError> {
    if secrets.exists() {
        return Ok(SecretsStatus::Present);
    }

    let mut source = match File::open(template) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LauncherError::TemplateMissing {
                path: template.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    // create_new fails if something appeared since the exists() check.
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(secrets) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(SecretsStatus::Present),
        Err(e) => return Err(e.into()),
    };

    let copied = io::copy(&mut source, &mut dest)
        .and_then(|_| dest.sync_all())
        .and_then(|_| source.metadata())
        .and_then(|meta| fs::set_permissions(secrets, meta.permissions()));
    if let Err(e) = copied {
        drop(dest);
        let _ = fs::remove_file(secrets);
        return Err(e.into());
    }

    Ok(SecretsStatus::Created)
}
