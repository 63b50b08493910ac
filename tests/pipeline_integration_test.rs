use anyhow::Result;
use httpmock::prelude::*;
use iss_flyover::config::toml_config::TomlConfig;
use iss_flyover::utils::validation::Validate;
use iss_flyover::{
    CliConfig, Coordinates, FlyoverConfig, FlyoverError, FlyoverPipeline, PassWindow,
    ReqwestClient, Stage,
};
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_for(server: &MockServer) -> FlyoverConfig {
    FlyoverConfig {
        ip_service: server.url("/ip"),
        geo_service: server.url("/geo"),
        pass_service: server.url("/iss-pass.json"),
        ..FlyoverConfig::default()
    }
}

fn pipeline_for(config: &FlyoverConfig) -> Result<FlyoverPipeline<ReqwestClient>> {
    Ok(FlyoverPipeline::new(ReqwestClient::new(config)?, config)?)
}

#[tokio::test]
async fn test_next_passes_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let ip_mock = server.mock(|when, then| {
        when.method(GET).path("/ip").query_param("format", "json");
        then.status(200).json_body(serde_json::json!({"ip": "1.2.3.4"}));
    });
    let geo_mock = server.mock(|when, then| {
        when.method(GET).path("/geo/1.2.3.4");
        then.status(200)
            .json_body(serde_json::json!({"data": {"latitude": 37.4, "longitude": -122.1}}));
    });
    let pass_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/iss-pass.json")
            .query_param("lat", "37.4")
            .query_param("lon", "-122.1");
        then.status(200).json_body(serde_json::json!({
            "message": "success",
            "response": [
                {"risetime": 1000000000, "duration": 600},
                {"risetime": 1000005400, "duration": 487}
            ]
        }));
    });

    let pipeline = pipeline_for(&config_for(&server))?;
    let report = pipeline.run().await?;

    assert_eq!(report.ip.as_str(), "1.2.3.4");
    assert_eq!(report.coordinates, Coordinates::new(37.4, -122.1));
    assert_eq!(
        report.passes,
        vec![
            PassWindow {
                risetime: 1_000_000_000,
                duration: 600
            },
            PassWindow {
                risetime: 1_000_005_400,
                duration: 487
            },
        ]
    );

    ip_mock.assert_hits(1);
    geo_mock.assert_hits(1);
    pass_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_ip_failure_skips_later_stages() -> Result<()> {
    let server = MockServer::start();
    let ip_mock = server.mock(|when, then| {
        when.method(GET).path("/ip");
        then.status(502).body("bad gateway");
    });
    let geo_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/geo");
        then.status(200)
            .json_body(serde_json::json!({"data": {"latitude": 1.0, "longitude": 1.0}}));
    });
    let pass_mock = server.mock(|when, then| {
        when.method(GET).path("/iss-pass.json");
        then.status(200).json_body(serde_json::json!({"response": []}));
    });

    let pipeline = pipeline_for(&config_for(&server))?;
    let err = pipeline.next_passes().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Ip));
    assert!(err.to_string().contains("502"));
    assert!(err.to_string().contains("bad gateway"));
    ip_mock.assert_hits(1);
    geo_mock.assert_hits(0);
    pass_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_geo_failure_skips_pass_lookup() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ip");
        then.status(200).json_body(serde_json::json!({"ip": "1.2.3.4"}));
    });
    let geo_mock = server.mock(|when, then| {
        when.method(GET).path("/geo/1.2.3.4");
        then.status(200).json_body(serde_json::json!({"data": {"longitude": 1.0}}));
    });
    let pass_mock = server.mock(|when, then| {
        when.method(GET).path("/iss-pass.json");
        then.status(200).json_body(serde_json::json!({"response": []}));
    });

    let pipeline = pipeline_for(&config_for(&server))?;
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(
        err,
        FlyoverError::Parse { stage: Stage::Coordinates, ref field, .. } if field == "data.latitude"
    ));
    geo_mock.assert_hits(1);
    pass_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() -> Result<()> {
    let config = FlyoverConfig {
        // nothing listens on the discard port
        ip_service: "http://127.0.0.1:9/ip".to_string(),
        timeout_seconds: Some(2),
        ..FlyoverConfig::default()
    };

    let err = pipeline_for(&config)?.next_passes().await.unwrap_err();

    assert!(matches!(err, FlyoverError::Transport { stage: Stage::Ip, .. }));
    Ok(())
}

#[tokio::test]
async fn test_config_file_points_pipeline_at_services() -> Result<()> {
    let server = MockServer::start();
    let ip_mock = server.mock(|when, then| {
        when.method(GET).path("/custom-ip");
        then.status(200).json_body(serde_json::json!({"ip": "5.6.7.8"}));
    });

    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "[services]\nip = \"{}\"\n\n[http]\ntimeout_seconds = 4\n",
        server.url("/custom-ip")
    )?;

    let cli = CliConfig::parse_from([
        "iss-flyover",
        "--config",
        file.path().to_str().unwrap(),
        "ip",
    ]);
    let config = FlyoverConfig::load(&cli)?;
    config.validate()?;
    assert_eq!(config.timeout_seconds, Some(4));

    let ip = pipeline_for(&config)?.fetch_my_ip().await?;

    assert_eq!(ip.as_str(), "5.6.7.8");
    ip_mock.assert();
    Ok(())
}

#[test]
fn test_config_file_with_bad_endpoint_fails_validation() -> Result<()> {
    let file = TomlConfig::from_toml_str("[services]\npass = \"ftp://example.com/passes\"\n")?;
    let cli = CliConfig::parse_from(["iss-flyover"]);

    let config = FlyoverConfig::from_sources(&cli, Some(&file));

    assert!(matches!(
        config.validate(),
        Err(FlyoverError::InvalidConfigValue { ref field, .. }) if field == "services.pass"
    ));
    Ok(())
}
