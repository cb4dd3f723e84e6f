//! Post-extraction build tool bootstrap.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Seam for the wrapper-generation step so tests can substitute the real
/// build tool.
pub trait WrapperBootstrap: Send + Sync {
    fn generate_wrapper(&self, project_dir: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Runs `gradle wrapper` in the project directory.
pub struct GradleBootstrap;

impl WrapperBootstrap for GradleBootstrap {
    async fn generate_wrapper(&self, project_dir: &Path) -> Result<()> {
        debug!(dir = %project_dir.display(), "generating gradle wrapper");
        let output = Command::new("gradle")
            .arg("wrapper")
            .current_dir(project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::BuildTool(format!("failed to launch gradle: {e}")))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            return Err(Error::BuildTool(stderr.trim().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Bootstrap stand-in that records invocations instead of running
    /// gradle.
    #[derive(Default)]
    pub struct RecordingBootstrap {
        pub calls: AtomicUsize,
    }

    impl WrapperBootstrap for RecordingBootstrap {
        async fn generate_wrapper(&self, _project_dir: &Path) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Bootstrap stand-in that always fails with captured stderr.
    pub struct FailingBootstrap;

    impl WrapperBootstrap for FailingBootstrap {
        async fn generate_wrapper(&self, _project_dir: &Path) -> Result<()> {
            Err(Error::BuildTool("FAILURE: task 'wrapper' not found".to_string()))
        }
    }
}
