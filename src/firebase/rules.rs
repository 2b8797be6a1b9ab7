//! Security-rules management: writes the rules files and deploys them with
//! the Firebase CLI.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info, warn};

pub const FIRESTORE_RULES_FILE: &str = "firestore.rules";
pub const STORAGE_RULES_FILE: &str = "storage.rules";

/// Open development rules for the Bazar Se collections
pub const FIRESTORE_RULES: &str = r#"rules_version = '2';
service cloud.firestore {
  match /databases/{database}/documents {
    // Development rules: open access while the catalog is being seeded
    match /{document=**} {
      allow read, write: if true;
    }

    match /vendors/{vendorId} {
      allow read, write, create, update, delete: if true;
      allow list: if true;
    }

    match /ujjain_businesses/{businessId} {
      allow read, write, create, update, delete: if true;
      allow list: if true;
    }

    match /categories/{categoryId} {
      allow read, write, create, update, delete: if true;
      allow list: if true;
    }

    match /offers/{offerId} {
      allow read, write, create, update, delete: if true;
      allow list: if true;
    }

    match /users/{userId} {
      allow read, write, create, update, delete: if true;
      allow list: if true;
    }
  }
}
"#;

pub const STORAGE_RULES: &str = r#"rules_version = '2';
service firebase.storage {
  match /b/{bucket}/o {
    match /{allPaths=**} {
      allow read, write: if true;
    }
  }
}
"#;

/// Write both rules files into `dir`
pub async fn write_rules_files(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(dir.join(FIRESTORE_RULES_FILE), FIRESTORE_RULES)
        .await
        .context("Failed to write Firestore rules")?;
    fs::write(dir.join(STORAGE_RULES_FILE), STORAGE_RULES)
        .await
        .context("Failed to write Storage rules")?;
    info!("Wrote rules files to {}", dir.display());
    Ok(())
}

/// Check the Firebase CLI is installed and authenticated
pub async fn check_cli() -> Result<()> {
    let output = Command::new("firebase")
        .arg("--version")
        .output()
        .await
        .context("Firebase CLI not found; install with: npm install -g firebase-tools")?;

    if !output.status.success() {
        anyhow::bail!("Firebase CLI returned an error");
    }

    let version = String::from_utf8_lossy(&output.stdout);
    info!("Firebase CLI version: {}", version.trim());
    Ok(())
}

/// Deploy the rules in `dir` to the given project
pub async fn deploy(project_id: &str, dir: &Path) -> Result<()> {
    info!("Deploying rules to project {}", project_id);

    let status = Command::new("firebase")
        .current_dir(dir)
        .args([
            "deploy",
            "--only",
            "firestore:rules,storage",
            "--project",
            project_id,
        ])
        .status()
        .await
        .context("Failed to run firebase deploy")?;

    if !status.success() {
        anyhow::bail!("firebase deploy exited with {}", status);
    }

    info!("Rules deployed");
    Ok(())
}

/// Re-deploy on a fixed cadence; failures are logged and retried on the next
/// tick.
pub async fn watch(project_id: &str, dir: &Path, interval: Duration) -> Result<()> {
    check_cli().await?;
    loop {
        write_rules_files(dir).await?;
        if let Err(e) = deploy(project_id, dir).await {
            error!("Rules deploy failed: {:#}", e);
            warn!("Retrying in {:?}", interval);
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firestore_rules_cover_the_catalog_collections() {
        assert!(FIRESTORE_RULES.contains("rules_version = '2'"));
        assert!(FIRESTORE_RULES.contains("/ujjain_businesses/"));
        assert!(FIRESTORE_RULES.contains("/categories/"));
    }

    #[tokio::test]
    async fn writes_both_rules_files() {
        let dir = std::env::temp_dir().join("bazar_scout_rules_test");
        write_rules_files(&dir).await.unwrap();
        assert!(dir.join(FIRESTORE_RULES_FILE).exists());
        assert!(dir.join(STORAGE_RULES_FILE).exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
