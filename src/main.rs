use clap::ArgMatches;

use hotel_listing::cmd::{handle_browse_command, handle_server_command, handle_version_command};
use hotel_listing::command_registry::build_app;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 构建命令行应用
    let matches: ArgMatches = build_app().get_matches();

    match matches.subcommand() {
        Some(("server", sub_matches)) => handle_server_command(sub_matches).await?,
        Some(("browse", sub_matches)) => handle_browse_command(sub_matches).await?,
        Some(("version", _)) => handle_version_command(),
        _ => {
            // subcommand_required(true) 已保证不会走到这里
            eprintln!("未知命令，请使用 --help 查看可用命令");
            std::process::exit(1);
        }
    }

    Ok(())
}
