use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::time::{sleep, timeout};

/// Environment variables that would otherwise leak credentials into the child.
const CREDENTIAL_ENV: [&str; 5] = [
    "CLOUDINARY_CLOUD_NAME",
    "NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME",
    "CLOUDINARY_API_KEY",
    "CLOUDINARY_API_SECRET",
    "CLOUDINARY_FOLDER",
];

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[media_host]
cloud_name = "test"
api_key = "key"
api_secret = "secret"
"#,
        port
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn gallery_command(config_path: &std::path::Path) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_gallery"));
    command
        .env("GALLERY_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true);
    for key in CREDENTIAL_ENV {
        command.env_remove(key);
    }
    command
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_health_endpoint() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = gallery_command(temp_file.path())
        .spawn()
        .expect("Failed to spawn server");

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_images_without_folder_reports_configuration_error() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = gallery_command(temp_file.path())
        .spawn()
        .expect("Failed to spawn server");

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/api/images", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["error"], "Server configuration error");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        gallery_command(std::path::Path::new("/nonexistent/config.toml")).output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_missing_credentials_exits_with_error() {
    let config_without_credentials = r#"
[server]
port = 8080
"#;
    let temp_file = write_config(config_without_credentials);

    let result = timeout(
        Duration::from_secs(5),
        gallery_command(temp_file.path()).output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
