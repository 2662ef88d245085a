use clap::ArgMatches;

use crate::app_bootstrap::{AppBootstrap, AppConfig};
use crate::comm::enhanced_config::EnhancedConfigManager;
use crate::comm::init_tracing;

/// 处理 `server` 命令：加载配置、初始化日志、应用命令行覆盖并启动服务
pub async fn handle_server_command(matches: &ArgMatches) -> anyhow::Result<()> {
    let config_manager = EnhancedConfigManager::new()?;
    let app_config = config_manager.get_app_config();

    init_tracing(&app_config.logging_level, app_config.logging_json_format);
    config_manager.print_config_summary();

    let bootstrap = apply_overrides(
        AppBootstrap::new().with_config(AppConfig::from(app_config)),
        matches,
    );
    bootstrap.run().await?;
    Ok(())
}

/// 命令行参数优先于配置文件
fn apply_overrides(mut bootstrap: AppBootstrap, matches: &ArgMatches) -> AppBootstrap {
    if let Some(host) = matches.get_one::<String>("host") {
        bootstrap = bootstrap.with_host(host.clone());
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        bootstrap = bootstrap.with_port(*port);
    }
    if let Some(workers) = matches.get_one::<usize>("workers") {
        bootstrap = bootstrap.with_workers(*workers);
    }
    bootstrap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_registry::{build_app, APP_NAME};

    #[test]
    fn test_cli_overrides_config() {
        let matches = build_app()
            .try_get_matches_from([APP_NAME, "server", "--host", "127.0.0.1", "-p", "9001"])
            .unwrap();
        let sub = matches.subcommand_matches("server").unwrap();

        let bootstrap = apply_overrides(AppBootstrap::new(), sub);
        assert_eq!(bootstrap.config().host, "127.0.0.1");
        assert_eq!(bootstrap.config().port, 9001);
        assert_eq!(bootstrap.config().workers, None);
    }
}
