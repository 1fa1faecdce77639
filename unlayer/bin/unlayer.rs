use clap::Parser;
use unlayer::{
    cli::UnlayerArgs,
    extract::TarExtractor,
    oci::{AuthContext, RegistryClient},
    pull, UnlayerResult,
};

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> UnlayerResult<()> {
    dotenvy::dotenv().ok();

    let args = UnlayerArgs::parse();
    init_tracing(args.verbose);

    let auth = AuthContext::from_scheme(args.auth)?;
    let registry = RegistryClient::new(auth);

    pull::pull_layers(
        &args.image,
        &args.platform,
        args.layers,
        &args.output,
        &registry,
        &TarExtractor,
    )
    .await?;

    tracing::info!(
        "extracted {} layer(s) of {} into {}",
        args.layers,
        args.image,
        args.output.display()
    );

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// Initializes the tracing subscriber, raising the level to debug when
/// verbose logging is requested.
fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("unlayer=debug"))
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }
}
