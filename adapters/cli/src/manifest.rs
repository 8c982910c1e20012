use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tether_world::{Campaign, Level};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Default manifest location relative to the repository root.
pub(crate) const DEFAULT_MANIFEST_PATH: &str = "levels/manifest.toml";

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    levels: Vec<ManifestEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct ManifestEntry {
    name: String,
    path: String,
}

/// Level listed in the manifest with its path resolved against the manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LevelSource {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
}

/// Reads the manifest and every level it lists, validating each one.
pub(crate) fn load_campaign(path: impl AsRef<Path>) -> Result<Campaign> {
    let manifest_path = path.as_ref();
    let contents = fs::read_to_string(manifest_path).with_context(|| {
        format!(
            "failed to read level manifest at {}",
            manifest_path.display()
        )
    })?;
    let base = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut levels = Vec::new();
    for source in parse_manifest(&contents, &base)? {
        let text = fs::read_to_string(&source.path).with_context(|| {
            format!(
                "failed to read level `{}` at {}",
                source.name,
                source.path.display()
            )
        })?;
        let level = Level::parse(source.name, &text)
            .with_context(|| format!("invalid level file {}", source.path.display()))?;
        levels.push(level);
    }

    Ok(Campaign::new(levels)?)
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<LevelSource>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse level manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported level manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }
    if manifest.levels.is_empty() {
        bail!("level manifest lists no levels");
    }

    let mut names = HashSet::new();
    let mut sources = Vec::with_capacity(manifest.levels.len());
    for entry in manifest.levels {
        if !names.insert(entry.name.clone()) {
            bail!("level manifest contains duplicate level `{}`", entry.name);
        }
        sources.push(LevelSource {
            path: base_path.join(&entry.path),
            name: entry.name,
        });
    }

    Ok(sources)
}
