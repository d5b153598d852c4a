use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use twenty48_rendering::{Color, Palette};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Loads a palette manifest from disk.
///
/// ```toml
/// version = 1
/// empty = "#000000"
/// tiles = ["#cd0000", "#00cd00"]
/// ```
pub fn load_palette(path: impl AsRef<Path>) -> Result<Palette> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read palette manifest at {}", path.display()))?;
    parse_manifest(&contents)
        .with_context(|| format!("invalid palette manifest at {}", path.display()))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    empty: Option<String>,
    tiles: Vec<String>,
}

fn parse_manifest(contents: &str) -> Result<Palette> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse palette manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported palette manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let empty = match manifest.empty.as_deref() {
        Some(value) => Color::from_hex(value)?,
        None => Palette::default().empty(),
    };
    let tiles = manifest
        .tiles
        .iter()
        .map(|value| Color::from_hex(value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Palette::new(empty, tiles)?)
}
