use super::*;

#[test]
fn command_line_lists_core_options_and_plugins() {
    let service = Service {
        plugins: vec![Plugin::CircuitExplorer, Plugin::Dti],
        max_clients: 2,
        log_level: LogLevel::Debug,
        ..Service::new("0.0.0.0:5001")
    };
    assert_eq!(
        service.command_line(),
        [
            "braynsService",
            "--uri",
            "0.0.0.0:5001",
            "--log-level",
            "debug",
            "--max-clients",
            "2",
            "--plugin",
            "braynsCircuitExplorer",
            "--plugin",
            "braynsDti",
        ]
    );
}

#[test]
fn command_line_adds_ssl_options_that_are_set() {
    let service = Service {
        plugins: Vec::new(),
        ssl: Some(SslServerContext {
            certificate_file: Some(PathBuf::from("cert.pem")),
            private_key_passphrase: Some("secret".to_owned()),
            ..SslServerContext::default()
        }),
        ..Service::default()
    };
    let args = service.command_line();
    let tail = &args[7..];
    assert_eq!(
        tail,
        [
            "--secure",
            "true",
            "--certificate-file",
            "cert.pem",
            "--private-key-passphrase",
            "secret",
        ]
    );
}

#[test]
fn defaults_load_every_plugin() {
    let service = Service::default();
    assert_eq!(service.plugins.len(), Plugin::all().len());
    assert_eq!(service.log_level.as_str(), "warn");
    assert_eq!(service.max_clients, 1);
}

#[test]
fn missing_executable_is_process_error() {
    let service = Service {
        executable: PathBuf::from("/nonexistent/braynsService"),
        ..Service::default()
    };
    let err = service.start().unwrap_err();
    assert!(matches!(err, BraynsError::Process(_)), "{err}");
}

#[test]
fn zero_clients_is_rejected() {
    let service = Service {
        max_clients: 0,
        ..Service::default()
    };
    assert!(matches!(service.start(), Err(BraynsError::Validation(_))));
}

#[cfg(unix)]
#[test]
fn started_process_output_is_captured() {
    let service = Service {
        executable: PathBuf::from("echo"),
        plugins: Vec::new(),
        ..Service::new("127.0.0.1:1")
    };
    let mut process = service.start().unwrap();
    assert!(process.wait().unwrap().success());
    assert_eq!(
        process.logs(),
        ["--uri 127.0.0.1:1 --log-level warn --max-clients 1"]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn manager_reports_early_exit_with_logs() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let service = Service {
        executable: PathBuf::from("echo"),
        plugins: Vec::new(),
        ..Service::new(format!("127.0.0.1:{port}"))
    };
    let connector = crate::Connector {
        uri: format!("127.0.0.1:{port}"),
        max_attempts: None,
        attempt_period: std::time::Duration::from_millis(10),
        ..crate::Connector::default()
    };
    let err = manager::start(&service, &connector).await.unwrap_err();
    let BraynsError::Process(message) = err else {
        panic!("unexpected error: {err}");
    };
    assert!(message.contains("--max-clients 1"), "{message}");
}

#[cfg(unix)]
#[tokio::test]
async fn manager_stops_service_when_connection_gives_up() {
    use std::os::unix::fs::PermissionsExt;

    let script = std::env::temp_dir().join(format!("brayns-idle-{}.sh", std::process::id()));
    std::fs::write(&script, "#!/bin/sh\nsleep 5 &\nexec sleep 30\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let service = Service {
        executable: script.clone(),
        plugins: Vec::new(),
        ..Service::new(format!("127.0.0.1:{port}"))
    };
    let connector = crate::Connector {
        uri: format!("127.0.0.1:{port}"),
        max_attempts: Some(2),
        attempt_period: std::time::Duration::from_millis(10),
        ..crate::Connector::default()
    };
    let started = std::time::Instant::now();
    let err = manager::start(&service, &connector).await.unwrap_err();
    assert!(matches!(err, BraynsError::ServiceUnavailable(_)), "{err}");
    assert!(started.elapsed() < std::time::Duration::from_secs(4));
    std::fs::remove_file(script).unwrap();
}
