//! Application bootstrap
//!
//! Resolves runtime flags once, locates the mount point in the host document
//! and hands both to the application's single entry point. The host document
//! and the application are capabilities supplied by the caller.

use thiserror::Error;

use crate::env::{self, ConfigFlags, EnvMap};

/// Identifier of the element the application mounts into.
pub const MOUNT_ID: &str = "root";

/// Errors during application startup
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The host page has no element with the mount identifier. Fatal.
    #[error("mount target missing: no element with id '{id}'")]
    MountTargetMissing { id: String },
}

/// Element lookup on the host page.
pub trait Document {
    type Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

/// Options passed to [`Application::init`].
#[derive(Debug)]
pub struct InitOptions<E> {
    /// Mount point.
    pub node: E,
    /// Startup flags, owned by the application from here on.
    pub flags: ConfigFlags,
}

/// The external UI component's entry point.
pub trait Application<E> {
    type Handle;

    fn init(&self, options: InitOptions<E>) -> Self::Handle;
}

/// Start the application.
///
/// Runs once, synchronously, before any event handling. On
/// [`BootstrapError::MountTargetMissing`] the application is never
/// initialized and no handle is produced.
pub fn start<D, A>(document: &D, app: &A, env: &EnvMap) -> Result<A::Handle, BootstrapError>
where
    D: Document,
    A: Application<D::Element>,
{
    let flags = env::resolve(env);

    let node = document
        .element_by_id(MOUNT_ID)
        .ok_or_else(|| BootstrapError::MountTargetMissing {
            id: MOUNT_ID.to_string(),
        })?;

    tracing::debug!(mount = MOUNT_ID, "initializing application");
    Ok(app.init(InitOptions { node, flags }))
}
