//! Doctor command for system diagnostics
//!
//! Provides health checks for the backend connection, the listing
//! endpoint, and the local download directory.

use colored::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiClient;
use crate::cli::Config;
use crate::errors::ClientError;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor {
    server_url: String,
    download_dir: PathBuf,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(server_url: String, download_dir: PathBuf) -> Self {
        Self {
            server_url,
            download_dir,
        }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = Vec::new();

        checks.push(self.check_server_api().await);
        checks.push(self.check_submissions_endpoint().await);
        checks.push(self.check_download_dir());
        checks.push(self.check_disk_space());
        checks.push(self.check_config());

        checks
    }

    /// Check 1: Backend API reachable
    async fn check_server_api(&self) -> HealthCheck {
        match ApiClient::with_config(&self.server_url, Duration::from_secs(5)) {
            Ok(client) => {
                if client.is_available().await {
                    HealthCheck {
                        name: "Backend API".to_string(),
                        status: HealthStatus::Pass,
                    }
                } else {
                    HealthCheck {
                        name: "Backend API".to_string(),
                        status: HealthStatus::Fail(format!(
                            "Server not reachable at {}",
                            self.server_url
                        )),
                    }
                }
            }
            Err(e) => HealthCheck {
                name: "Backend API".to_string(),
                status: HealthStatus::Fail(format!("Cannot build HTTP client: {}", e)),
            },
        }
    }

    /// Check 2: Submissions endpoint answers with a well-formed listing
    async fn check_submissions_endpoint(&self) -> HealthCheck {
        let client = match ApiClient::with_config(&self.server_url, Duration::from_secs(5)) {
            Ok(client) => client,
            Err(e) => {
                return HealthCheck {
                    name: "Submissions Endpoint".to_string(),
                    status: HealthStatus::Fail(format!("Cannot build HTTP client: {}", e)),
                }
            }
        };

        match client.fetch_submissions().await {
            Ok(_) => HealthCheck {
                name: "Submissions Endpoint".to_string(),
                status: HealthStatus::Pass,
            },
            Err(ClientError::ApiError(msg)) => HealthCheck {
                name: "Submissions Endpoint".to_string(),
                status: HealthStatus::Warn(format!("Server responded but listing failed: {}", msg)),
            },
            Err(e) => HealthCheck {
                name: "Submissions Endpoint".to_string(),
                status: HealthStatus::Fail(format!("Cannot fetch listing: {}", e)),
            },
        }
    }

    /// Check 3: Download directory is writable
    fn check_download_dir(&self) -> HealthCheck {
        if !self.download_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(&self.download_dir) {
                return HealthCheck {
                    name: "Download Directory".to_string(),
                    status: HealthStatus::Fail(format!(
                        "Cannot create {}: {}",
                        self.download_dir.display(),
                        e
                    )),
                };
            }
        }

        // Test write permission by attempting to create a temp file
        let test_file = self.download_dir.join(".resumedrop_test");
        match std::fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = std::fs::remove_file(&test_file);
                HealthCheck {
                    name: "Download Directory".to_string(),
                    status: HealthStatus::Pass,
                }
            }
            Err(_) => HealthCheck {
                name: "Download Directory".to_string(),
                status: HealthStatus::Fail("No write permission in download directory".to_string()),
            },
        }
    }

    /// Check 4: Disk space
    fn check_disk_space(&self) -> HealthCheck {
        use sysinfo::Disks;
        let disks = Disks::new_with_refreshed_list();

        let download_path = Path::new(&self.download_dir);

        // Find disk containing the download directory
        for disk in &disks {
            if download_path.starts_with(disk.mount_point()) {
                let available_gb = disk.available_space() / (1024 * 1024 * 1024);

                return if available_gb < 1 {
                    HealthCheck {
                        name: "Disk Space".to_string(),
                        status: HealthStatus::Fail(
                            format!("Less than 1GB available ({} GB)", available_gb)
                        ),
                    }
                } else if available_gb < 5 {
                    HealthCheck {
                        name: "Disk Space".to_string(),
                        status: HealthStatus::Warn(
                            format!("Low disk space ({} GB available)", available_gb)
                        ),
                    }
                } else {
                    HealthCheck {
                        name: "Disk Space".to_string(),
                        status: HealthStatus::Pass,
                    }
                };
            }
        }

        HealthCheck {
            name: "Disk Space".to_string(),
            status: HealthStatus::Warn("Could not determine disk space".to_string()),
        }
    }

    /// Check 5: Config file parses
    fn check_config(&self) -> HealthCheck {
        match Config::load_default() {
            Ok(_) => HealthCheck {
                name: "Config File".to_string(),
                status: HealthStatus::Pass,
            },
            Err(e) => HealthCheck {
                name: "Config File".to_string(),
                status: HealthStatus::Fail(e.to_string()),
            },
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "ResumeDrop System Diagnostics".bold().cyan());
        println!("{:<22} {}", "Check", "Status");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => format!("{} PASS", "✓".green()),
                HealthStatus::Warn(msg) => format!("{} WARN: {}", "⚠".yellow(), msg),
                HealthStatus::Fail(msg) => format!("{} FAIL: {}", "✗".red(), msg),
            };

            println!("{:<22} {}", check.name, status);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
