use std::path::PathBuf;

use cf_config::CfConfig;
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("COMPLYFLOW_SOURCES__FRAMEWORKS_DIR", "/srv/catalogs");
        jail.set_env("COMPLYFLOW_GENERAL__DEFAULT_LIMIT", "7");

        let config = CfConfig::load().expect("config loads");
        assert_eq!(config.sources.frameworks_dir, PathBuf::from("/srv/catalogs"));
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn env_vars_beat_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".complyflow")?;
        jail.create_file(
            ".complyflow/config.toml",
            r#"
[output]
tasks_file = "from-toml.jsonl"
"#,
        )?;
        jail.set_env("COMPLYFLOW_OUTPUT__TASKS_FILE", "from-env.jsonl");

        let config = CfConfig::load().expect("config loads");
        assert_eq!(config.output.tasks_file, PathBuf::from("from-env.jsonl"));
        Ok(())
    });
}

#[test]
fn external_overrides_fill_config_values() {
    Jail::expect_with(|_jail| {
        let overrides = vec![
            (
                "COMPLYFLOW_REMEDIATION__ASSIGNED_BY".to_string(),
                "ci-bot".to_string(),
            ),
            (
                "COMPLYFLOW_GENERAL__DEFAULT_LIMIT".to_string(),
                "12".to_string(),
            ),
            ("UNRELATED_KEY".to_string(), "ignored".to_string()),
        ];

        let config = CfConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.remediation.assigned_by, "ci-bot");
        assert_eq!(config.general.default_limit, 12);
        Ok(())
    });
}

#[test]
fn process_env_beats_external_overrides() {
    Jail::expect_with(|jail| {
        jail.set_env("COMPLYFLOW_REMEDIATION__ASSIGNED_BY", "from-env");
        let overrides = vec![(
            "COMPLYFLOW_REMEDIATION__ASSIGNED_BY".to_string(),
            "from-external".to_string(),
        )];

        let config = CfConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.remediation.assigned_by, "from-env");
        Ok(())
    });
}
