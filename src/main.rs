use anyhow::Result;
use clap::{App as Cli, Arg};
use projects_view::app::App;
use projects_view::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .short("b")
                .long("base-url")
                .value_name("URL")
                .help("Project API base URL, overriding the config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short("u")
                .long("url")
                .value_name("LOCATION")
                .help("Location to open, e.g. http://localhost/projects?page=2")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if !config.file_exists() {
        config.save()?;
    }
    if let Some(base_url) = matches.value_of("base-url") {
        config.base_url = base_url.to_owned();
    }

    App::start(config, matches.value_of("url")).await
}
