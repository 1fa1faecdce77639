use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::styles,
    config::{DEFAULT_LAYER_COUNT, DEFAULT_OUTPUT_DIR, DEFAULT_PLATFORM},
    oci::{AuthScheme, ImageReference, PlatformSelector},
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// `unlayer` pulls the most recent layers of a container image and extracts them
#[derive(Debug, Parser)]
#[command(name = "unlayer", author, version, disable_version_flag = true, styles=styles::styles())]
pub struct UnlayerArgs {
    /// Image reference, e.g. `alpine:3.20` or `registry.example.com:5000/team/app:1.0`
    #[arg(name = "IMAGE")]
    pub image: ImageReference,

    /// Platform to select from a multi-platform image
    #[arg(short, long, default_value = DEFAULT_PLATFORM)]
    pub platform: PlatformSelector,

    /// Directory the layers are extracted into
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Number of most recent layers to pull
    #[arg(short = 'n', long, default_value_t = DEFAULT_LAYER_COUNT)]
    pub layers: usize,

    /// Authentication scheme for registry requests
    #[arg(long, value_enum, default_value = "token")]
    pub auth: AuthScheme,

    /// Enable verbose logging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
