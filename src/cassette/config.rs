//! Loading cassettes from disk.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    let cassette: Cassette = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
    tracing::debug!(
        name = %cassette.name,
        interactions = cassette.interactions.len(),
        "Loaded cassette"
    );
    Ok(CassetteReplayer::new(&cassette))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_handwritten_cassette() {
        let dir = std::env::temp_dir().join("nailstudio_cassette_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.cassette.yaml");
        std::fs::write(
            &path,
            r#"
name: enhance-only
recorded_at: "2026-01-01T00:00:00Z"
commit: test
interactions:
  - seq: 0
    port: generative_model
    method: generate_content
    input: {}
    output:
      Ok:
        candidates:
          - parts:
              - text: "Glossy french tips on almond nails."
"#,
        )
        .unwrap();

        let mut replayer = load_cassette(&path).unwrap();
        let i = replayer.next_interaction("generative_model", "generate_content");
        assert_eq!(i.seq, 0);
        assert_eq!(
            i.output["Ok"]["candidates"][0]["parts"][0]["text"],
            "Glossy french tips on almond nails."
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_nonexistent_fails() {
        assert!(load_cassette(Path::new("/nonexistent/cassette.yaml")).is_err());
    }

    #[test]
    fn load_malformed_fails() {
        let dir = std::env::temp_dir().join("nailstudio_cassette_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.cassette.yaml");
        std::fs::write(&path, "interactions: {{{").unwrap();

        let err = load_cassette(&path).unwrap_err();
        assert!(err.contains("Failed to parse cassette file"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
