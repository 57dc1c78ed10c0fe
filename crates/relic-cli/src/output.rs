use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use relic_core::ResolvedPackage;

/// Write the ranking as a JSON array.
pub fn write_json(path: &Path, packages: &[ResolvedPackage]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, packages)
        .with_context(|| format!("failed to serialize ranking to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), count = packages.len(), "ranking written");
    Ok(())
}

/// One `stars  name  url` line per package.
pub fn render_ranking(packages: &[ResolvedPackage]) -> String {
    let width = packages
        .iter()
        .map(|p| p.stars.to_string().len())
        .max()
        .unwrap_or(0);
    let name_width = packages.iter().map(|p| p.name.len()).max().unwrap_or(0);

    packages
        .iter()
        .map(|p| format!("{:>width$}  {:<name_width$}  {}\n", p.stars, p.name, p.url))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pkg(name: &str, stars: u64) -> ResolvedPackage {
        ResolvedPackage {
            name: name.to_string(),
            downloads: 1,
            github_owner: "acme".to_string(),
            github_name: name.to_string(),
            stars,
            url: format!("https://github.com/acme/{name}"),
        }
    }

    #[test]
    fn writes_json_array_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("result.json");
        let packages = vec![pkg("foo", 42), pkg("bar", 7)];

        write_json(&path, &packages).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ResolvedPackage> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, packages);
    }

    #[test]
    fn empty_ranking_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn renders_aligned_lines() {
        let rendered = render_ranking(&[pkg("foo", 1234), pkg("longname", 7)]);
        assert_eq!(
            rendered,
            "1234  foo       https://github.com/acme/foo\n   7  longname  https://github.com/acme/longname\n"
        );
    }
}
