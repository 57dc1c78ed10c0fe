use figment::Jail;
use relic_config::RelicConfig;

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("RELIC_GENERAL__NUM_PACKAGES", "12");
        jail.set_env("RELIC_REGISTRY__USER_AGENT", "relic-test");
        jail.set_env("RELIC_CLASSIFY__USE_ORACLE", "false");

        let config = RelicConfig::load().expect("config loads");
        assert_eq!(config.general.num_packages, 12);
        assert_eq!(config.registry.user_agent, "relic-test");
        assert!(!config.classify.use_oracle);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".relic")?;
        jail.create_file(
            ".relic/config.toml",
            r#"
[general]
outfile = "from-file.json"
"#,
        )?;
        jail.set_env("RELIC_GENERAL__OUTFILE", "from-env.json");

        let config = RelicConfig::load().expect("config loads");
        assert_eq!(config.general.outfile.to_str(), Some("from-env.json"));
        Ok(())
    });
}

#[test]
fn unrelated_relic_env_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("RELIC_LOG", "debug");

        let config = RelicConfig::load().expect("config loads");
        assert_eq!(config.general.num_packages, 100);
        Ok(())
    });
}
