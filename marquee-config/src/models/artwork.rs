use anyhow::{Context, anyhow, ensure};
use marquee_core::{
    ArtworkResolution, ArtworkVariantSelector, ImageFetcher,
    NominalAspectRatios, SelectorSettings, ServerUrlBuilder, SizingPolicy,
};
use marquee_model::MediaItem;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

/// Path to a TOML or JSON artwork config file.
pub const CONFIG_PATH_VAR: &str = "MARQUEE_ARTWORK_CONFIG_PATH";
/// Inline JSON artwork config.
pub const CONFIG_JSON_VAR: &str = "MARQUEE_ARTWORK_CONFIG_JSON";

const DEFAULT_FILES: &[&str] =
    &["artwork.toml", "artwork.json", "config/artwork.toml"];

/// Source that produced the artwork configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtworkConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Artwork engine settings shared by every slot in a client.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// Aspect tolerance, parent thumb inheritance and the base variant
    /// priority.
    pub selector: SelectorSettings,
    /// Ratios used to size slots before an image has loaded, or always when
    /// a policy enforces them.
    pub nominal_aspect_ratios: NominalAspectRatios,
    /// Policy new resolutions start from. Views override per slot.
    pub default_policy: SizingPolicy,
    /// Media server base URL for [`ServerUrlBuilder`].
    pub server_url: Option<Url>,
}

impl ArtworkConfig {
    /// Load artwork configuration using environment variables.
    /// Evaluation order:
    /// 1) `$MARQUEE_ARTWORK_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$MARQUEE_ARTWORK_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) built-in defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ArtworkConfigSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ArtworkConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ArtworkConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ArtworkConfigSource::File(path)));
        }

        Ok((Self::default(), ArtworkConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read artwork config from {}", path.display())
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid artwork config {}", path.display())
            })?,
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid artwork config {}: {}",
                        path.display(),
                        err
                    )
                })?
            }
            _ => Self::parse_any(&contents, &path.display().to_string())?,
        };

        config.validate().with_context(|| {
            format!("rejected artwork config {}", path.display())
        })?;
        Ok(config)
    }

    /// Parse TOML or JSON and validate. `origin` names the source in errors.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        let config = Self::parse_any(contents, origin)?;
        config
            .validate()
            .with_context(|| format!("rejected artwork config {origin}"))?;
        Ok(config)
    }

    fn parse_any(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // TOML first, JSON second.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse artwork config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid artwork config json: {err}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let tolerance = self.selector.aspect_tolerance;
        ensure!(
            tolerance.is_finite() && tolerance >= 0.0,
            "selector.aspect_tolerance must be a finite, non-negative number (got {tolerance})"
        );

        let fallback = self.nominal_aspect_ratios.fallback;
        ensure!(
            fallback.is_finite() && fallback > 0.0,
            "nominal_aspect_ratios.fallback must be positive (got {fallback})"
        );

        if let Some((variant, ratio)) = self
            .nominal_aspect_ratios
            .variants
            .iter()
            .find(|(_, ratio)| !(ratio.is_finite() && **ratio > 0.0))
        {
            return Err(anyhow!(
                "nominal_aspect_ratios.variants.{variant} must be positive (got {ratio})"
            ));
        }

        if let Some(url) = &self.server_url {
            ServerUrlBuilder::new(url.clone())
                .map_err(|err| anyhow!("server_url: {err}"))?;
        }

        Ok(())
    }

    pub fn variant_selector(&self) -> ArtworkVariantSelector {
        ArtworkVariantSelector::new(self.selector.clone())
    }

    /// URL builder for `server_url`, when one is configured.
    pub fn url_builder(&self) -> anyhow::Result<Option<ServerUrlBuilder>> {
        self.server_url
            .clone()
            .map(|url| {
                ServerUrlBuilder::new(url)
                    .map_err(|err| anyhow!("server_url: {err}"))
            })
            .transpose()
    }

    /// A resolution for `item` configured from these settings.
    pub fn resolution(
        &self,
        item: Arc<MediaItem>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> ArtworkResolution {
        ArtworkResolution::for_item(item, fetcher)
            .with_selector(self.variant_selector())
            .with_nominal_ratios(self.nominal_aspect_ratios.clone())
            .with_policy(self.default_policy.clone())
    }

    /// First default config file under `root`.
    pub fn find_default_file_in(root: &Path) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }

    fn find_default_file() -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::ArtworkConfig;
    use marquee_model::{ImageVariant, ItemType};

    #[test]
    fn empty_documents_yield_defaults() {
        assert_eq!(
            ArtworkConfig::parse_from_str("", "empty").unwrap(),
            ArtworkConfig::default()
        );
        assert_eq!(
            ArtworkConfig::parse_json("{}").unwrap(),
            ArtworkConfig::default()
        );
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let raw = r#"
            server_url = "http://media.local:8096/"

            [selector]
            aspect_tolerance = 0.05
            base_priority = ["Thumb", "Primary"]

            [nominal_aspect_ratios]
            fallback = 1.5

            [nominal_aspect_ratios.variants]
            Backdrop = 2.0

            [[nominal_aspect_ratios.overrides]]
            variant = "Primary"
            item_type = "Season"
            ratio = 0.75

            [default_policy]
            desired_height = 300.0
            show_watched_overlay = true
            preferred_variant_order = ["thumb", "backdrop"]
        "#;

        let config = ArtworkConfig::parse_from_str(raw, "inline").unwrap();
        assert_eq!(config.selector.aspect_tolerance, 0.05);
        assert!(config.selector.inherit_parent_thumbs);
        assert_eq!(
            config.selector.base_priority,
            vec![ImageVariant::Thumb, ImageVariant::Primary]
        );
        assert_eq!(
            config
                .nominal_aspect_ratios
                .lookup(ImageVariant::Backdrop, &ItemType::Movie),
            2.0
        );
        assert_eq!(
            config
                .nominal_aspect_ratios
                .lookup(ImageVariant::Primary, &ItemType::Season),
            0.75
        );
        assert_eq!(
            config
                .nominal_aspect_ratios
                .lookup(ImageVariant::Logo, &ItemType::Movie),
            1.5
        );
        assert_eq!(config.default_policy.desired_height, Some(300.0));
        assert_eq!(
            config.default_policy.preferred_variant_order,
            vec![ImageVariant::Thumb, ImageVariant::Backdrop]
        );
        assert!(config.url_builder().unwrap().is_some());
    }

    #[test]
    fn parse_from_str_validates() {
        let err = ArtworkConfig::parse_from_str(
            "[nominal_aspect_ratios]\nfallback = -2.0\n",
            "inline",
        )
        .unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("inline"), "{rendered}");
        assert!(rendered.contains("fallback"), "{rendered}");
    }

    #[test]
    fn unknown_variant_names_are_errors() {
        let err = ArtworkConfig::parse_json(
            r#"{"default_policy": {"preferred_variant_order": ["Poster"]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Poster"), "{err}");
    }

    #[test]
    fn validation_rejects_unusable_numbers() {
        assert!(
            ArtworkConfig::parse_json(r#"{"selector": {"aspect_tolerance": -1}}"#)
                .is_err()
        );
        assert!(
            ArtworkConfig::parse_json(
                r#"{"nominal_aspect_ratios": {"variants": {"Logo": 0}}}"#
            )
            .is_err()
        );
    }
}
