use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = bzr_api::Args::parse();

	bzr_api::run(args).await
}
