use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings that apply to the whole clinic workspace rather than to a single
/// record collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalSettings {
    /// Database file name, resolved relative to the workspace root.
    pub database_file: String,
    /// When true, listing commands print record identifiers as well.
    pub verbose: bool,
}

/// One entry of the doctor roster: a stable code plus a display name.
///
/// The roster is an immutable configuration table injected at startup. There
/// is deliberately no runtime interface to add doctors; a deployment swaps
/// the roster by editing `clinic.toml`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Doctor {
    pub code: String,
    pub name: String,
}

/// The on-disk configuration of a clinic workspace (`clinic.toml`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClinicConfig {
    pub version: String,
    pub roster: Vec<Doctor>,
    pub global_settings: GlobalSettings,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            roster: vec![
                Doctor {
                    code: "D01".to_string(),
                    name: "Dr. Juan Perez - General Medicine".to_string(),
                },
                Doctor {
                    code: "D02".to_string(),
                    name: "Dra. Maria Lopez - Pediatrics".to_string(),
                },
                Doctor {
                    code: "D03".to_string(),
                    name: "Dr. Carlos Ruiz - Cardiology".to_string(),
                },
                Doctor {
                    code: "D04".to_string(),
                    name: "Dra. Ana Gomez - Gynecology".to_string(),
                },
            ],
            global_settings: GlobalSettings {
                database_file: "clinic.db".to_string(),
                verbose: false,
            },
        }
    }
}

/// Locates, loads, and saves the workspace configuration.
///
/// A workspace root is any directory containing `clinic.toml`. Discovery
/// walks up from the current directory so commands work from anywhere inside
/// the workspace; if no config exists yet (first run, before `init`), the
/// current directory becomes the root.
pub struct ConfigManager {
    config_path: PathBuf,
    root: PathBuf,
}

const CONFIG_FILE: &str = "clinic.toml";

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let root = find_workspace_root()?;
        Ok(Self::at(root))
    }

    /// Builds a manager rooted at an explicit directory. Used by tests and by
    /// anything that must not depend on the process working directory.
    pub fn new_at(root: PathBuf) -> Self {
        Self::at(root)
    }

    fn at(root: PathBuf) -> Self {
        let config_path = root.join(CONFIG_FILE);
        Self { config_path, root }
    }

    /// Writes the default configuration if none exists. Idempotent: an
    /// existing `clinic.toml` is left untouched.
    pub fn initialize(&self) -> Result<()> {
        if self.config_path.exists() {
            return Ok(());
        }
        self.save_config(&ClinicConfig::default())
    }

    /// Checks the loaded configuration for problems a deployment would want
    /// to know about before taking bookings.
    pub fn validate_config(&self) -> Result<()> {
        let config = self.load_config()?;
        let issues = config_issues(&config);

        if issues.is_empty() {
            println!("✓ Configuration is valid.");
            Ok(())
        } else {
            println!("⚠️  Found issues in configuration:");
            for issue in issues {
                println!("  - {issue}");
            }
            anyhow::bail!("Configuration validation failed.");
        }
    }

    /// Absolute path of the SQLite database named by the configuration.
    pub fn database_path(&self) -> Result<PathBuf> {
        let config = self.load_config()?;
        Ok(self.root.join(config.global_settings.database_file))
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<ClinicConfig>;
    fn save_config(&self, config: &ClinicConfig) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<ClinicConfig> {
        if !self.config_path.exists() {
            return Ok(ClinicConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn save_config(&self, config: &ClinicConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}

/// Collects human-readable problems with a configuration: unsupported
/// version, an empty roster, blank or duplicate doctor codes.
fn config_issues(config: &ClinicConfig) -> Vec<String> {
    let mut issues = Vec::new();

    if config.version != "1.0" {
        issues.push(format!("Unsupported config version: {}", config.version));
    }

    if config.roster.is_empty() {
        issues.push("Doctor roster is empty; no appointments can be scheduled".to_string());
    }

    let mut seen = std::collections::HashSet::new();
    for doctor in &config.roster {
        if doctor.code.trim().is_empty() {
            issues.push(format!("Doctor '{}' has an empty code", doctor.name));
        }
        if doctor.name.trim().is_empty() {
            issues.push(format!("Doctor code '{}' has an empty name", doctor.code));
        }
        if !seen.insert(doctor.code.clone()) {
            issues.push(format!("Duplicate doctor code: {}", doctor.code));
        }
    }

    issues
}

fn find_workspace_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    let mut dir = current_dir.as_path();

    loop {
        if dir.join(CONFIG_FILE).exists() {
            return Ok(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            // No clinic.toml anywhere above us: treat the current directory
            // as a fresh workspace so `init` can create one here.
            None => return Ok(current_dir),
        }
    }
}
